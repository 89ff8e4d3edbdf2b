use clap::{Parser, Subcommand};
use unicode_width::UnicodeWidthStr;

use crate::{list::table::SortDirection, models::EntityKind, tui::ui::truncate_string};

/// Widest column printed by `list`
pub const MAX_COLUMN_WIDTH: usize = 28;

#[derive(Parser)]
#[command(name = "medboard")]
#[command(about = "Terminal dashboard for browsing hospital management lists")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal UI (default)
    Tui {
        /// Open this list directly instead of the main menu
        #[arg(short, long, value_enum)]
        entity: Option<EntityKind>,
    },

    /// Fetch one page of a list and print it
    List {
        /// Which list to fetch
        #[arg(value_enum)]
        entity: EntityKind,

        /// Free-text search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Filter as key=value (repeatable)
        #[arg(short, long, value_parser = parse_filter)]
        filter: Vec<(String, String)>,

        /// Column key to sort by
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort order (asc, desc)
        #[arg(long, default_value = "asc")]
        order: SortDirection,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Rows per page (10, 25, 50, 100)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how a status string is presented
    Status {
        /// Status text, e.g. "Out Of Stock"
        text: String,
    },
}

/// Parse a `key=value` filter argument
pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("Invalid filter '{}'. Expected key=value", raw)),
    }
}

/// Lay out a plain-text table: header, dashed rule, then one line per row
pub fn format_table(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(headers)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().map(|row| line(row.as_slice())));
    lines
}

fn pad(cell: &str, width: usize) -> String {
    let text = truncate_string(cell, width);
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}
