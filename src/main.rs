use std::{ffi::OsStr, io, path::Path, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::{json, Map, Value};
use tracing::{error, info};

use medboard::{
    api::ApiClient,
    cli::{format_table, Cli, Commands},
    config::Config,
    context::AppContext,
    entities::{Appointment, Doctor, InventoryItem, Invoice, ListEntity, MedicalRecord, Patient},
    list::{
        controller::{FetchOutcome, ListController},
        pagination::is_valid_page_size,
        query::QueryState,
        status::present_status,
        table::{CellValue, DataTable, SortState},
    },
    models::EntityKind,
    tui::{App, Screen},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "medboard=info");
    }

    let config = Config::from_env()?;
    config.validate()?;

    let command = cli.command.unwrap_or(Commands::Tui { entity: None });
    // The TUI owns the terminal, so it only logs to the file
    init_logging(&config.log_file, !matches!(command, Commands::Tui { .. }));

    match command {
        Commands::Tui { entity } => run_tui(config, entity),

        Commands::List {
            entity,
            search,
            filter,
            sort_by,
            order,
            page,
            limit,
            json,
        } => {
            let page_size = limit.unwrap_or(config.list.page_size);
            if !is_valid_page_size(page_size) {
                return Err(anyhow!(
                    "Unsupported page size {}. Use 10, 25, 50 or 100",
                    page_size
                ));
            }

            let mut query = QueryState::new(page_size);
            query.set_search(&search);
            for (key, value) in &filter {
                query.set_filter(key, value);
            }
            if let Some(key) = sort_by {
                query.set_sort(SortState::new(&key, order));
            }
            query.set_page(page);

            let client = ApiClient::new(&config).context("Failed to create API client")?;
            match entity {
                EntityKind::Patients => print_list::<Patient>(&client, query, json).await,
                EntityKind::Doctors => print_list::<Doctor>(&client, query, json).await,
                EntityKind::Appointments => print_list::<Appointment>(&client, query, json).await,
                EntityKind::Billing => print_list::<Invoice>(&client, query, json).await,
                EntityKind::Inventory => print_list::<InventoryItem>(&client, query, json).await,
                EntityKind::Records => print_list::<MedicalRecord>(&client, query, json).await,
            }
        }

        Commands::Status { text } => {
            let presentation = present_status(&text);
            println!(
                "{} {}  (icon: {:?}, color: {:?})",
                presentation.icon.glyph(),
                presentation.label,
                presentation.icon,
                presentation.color
            );
            Ok(())
        }
    }
}

/// Log to `log_file`, and to stderr as well when `to_stderr` is set
fn init_logging(log_file: &Path, to_stderr: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file.file_name().unwrap_or_else(|| OsStr::new("medboard.log"));
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}

fn run_tui(config: Config, entity: Option<EntityKind>) -> Result<()> {
    let client = ApiClient::new(&config).context("Failed to create API client")?;
    let context = AppContext::from_config(&config);
    info!(
        "Starting medboard TUI against {} as {}",
        client.base_url(),
        context.session.label()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, context, Arc::new(client));
    if let Some(kind) = entity {
        app.navigate_to_screen(Screen::List(kind));
    }
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => info!("medboard TUI exited successfully"),
        Err(e) => error!("medboard TUI encountered an error: {}", e),
    }
    result
}

/// Fetch one page of `R` and print it as a table or JSON
async fn print_list<R: ListEntity>(client: &ApiClient, query: QueryState, json: bool) -> Result<()> {
    let mut controller = ListController::<R>::with_query(query.with_filter_defaults(&R::filters()));
    if controller.load(client).await == FetchOutcome::Failed {
        return Err(anyhow!(
            "Failed to fetch {}: {}",
            R::KIND.title(),
            controller.last_error().unwrap_or("unknown error")
        ));
    }

    let table = DataTable::new(R::columns());
    let pagination = controller.pagination();

    if json {
        let rows: Vec<Value> = controller
            .rows()
            .iter()
            .map(|row| {
                let fields: Map<String, Value> = table
                    .columns
                    .iter()
                    .map(|column| {
                        let value = match column.render(row) {
                            CellValue::Empty => Value::Null,
                            cell => Value::String(cell.plain()),
                        };
                        (column.key.clone(), value)
                    })
                    .collect();
                Value::Object(fields)
            })
            .collect();

        let output = json!({
            "entity": R::KIND,
            "page": pagination.current_page,
            "totalPages": pagination.total_pages,
            "total": pagination.total_items,
            "rows": rows,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if controller.rows().is_empty() {
        println!("{}", R::empty_message());
        return Ok(());
    }

    let headers: Vec<String> = table.columns.iter().map(|c| c.label.clone()).collect();
    let rows: Vec<Vec<String>> = controller
        .rows()
        .iter()
        .map(|row| table.render_row(row).iter().map(CellValue::plain).collect())
        .collect();
    for line in format_table(&headers, &rows) {
        println!("{}", line);
    }
    println!();
    println!(
        "{} (page {} of {})",
        pagination.range_label(),
        pagination.current_page,
        pagination.total_pages
    );
    Ok(())
}
