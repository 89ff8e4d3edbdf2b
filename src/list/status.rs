//! Status presentation: maps free-text statuses to a label, icon and color

/// Icon category shown next to a status label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Check,
    Clock,
    Cross,
    Alert,
    Info,
    Unknown,
}

impl StatusIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            StatusIcon::Check => "✓",
            StatusIcon::Clock => "◷",
            StatusIcon::Cross => "✗",
            StatusIcon::Alert => "⚠",
            StatusIcon::Info => "ℹ",
            StatusIcon::Unknown => "•",
        }
    }
}

/// Color class of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
    Purple,
    Gray,
}

/// Visual presentation of a status string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPresentation {
    pub label: String,
    pub icon: StatusIcon,
    pub color: StatusColor,
}

// (normalized key, label, icon, color)
const KNOWN_STATUSES: &[(&str, &str, StatusIcon, StatusColor)] = &[
    ("active", "Active", StatusIcon::Check, StatusColor::Green),
    ("inactive", "Inactive", StatusIcon::Cross, StatusColor::Gray),
    ("available", "Available", StatusIcon::Check, StatusColor::Green),
    ("on-leave", "On Leave", StatusIcon::Clock, StatusColor::Yellow),
    ("pending", "Pending", StatusIcon::Clock, StatusColor::Yellow),
    ("scheduled", "Scheduled", StatusIcon::Clock, StatusColor::Blue),
    ("confirmed", "Confirmed", StatusIcon::Check, StatusColor::Green),
    ("in-progress", "In Progress", StatusIcon::Clock, StatusColor::Blue),
    ("completed", "Completed", StatusIcon::Check, StatusColor::Green),
    ("cancelled", "Cancelled", StatusIcon::Cross, StatusColor::Red),
    ("no-show", "No Show", StatusIcon::Alert, StatusColor::Orange),
    ("admitted", "Admitted", StatusIcon::Info, StatusColor::Blue),
    ("discharged", "Discharged", StatusIcon::Check, StatusColor::Gray),
    ("critical", "Critical", StatusIcon::Alert, StatusColor::Red),
    ("stable", "Stable", StatusIcon::Check, StatusColor::Green),
    ("paid", "Paid", StatusIcon::Check, StatusColor::Green),
    ("unpaid", "Unpaid", StatusIcon::Alert, StatusColor::Red),
    ("partially-paid", "Partially Paid", StatusIcon::Clock, StatusColor::Yellow),
    ("overdue", "Overdue", StatusIcon::Alert, StatusColor::Red),
    ("refunded", "Refunded", StatusIcon::Info, StatusColor::Purple),
    ("in-stock", "In Stock", StatusIcon::Check, StatusColor::Green),
    ("low-stock", "Low Stock", StatusIcon::Alert, StatusColor::Yellow),
    ("out-of-stock", "Out of Stock", StatusIcon::Cross, StatusColor::Red),
    ("expired", "Expired", StatusIcon::Alert, StatusColor::Red),
    ("draft", "Draft", StatusIcon::Info, StatusColor::Gray),
    ("final", "Final", StatusIcon::Check, StatusColor::Blue),
];

/// Normalize a status for lookup: trimmed, lowercase, whitespace runs become one hyphen
pub fn normalize_status(status: &str) -> String {
    status
        .split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Present a status string. Never fails; unmapped values echo the input as the label.
pub fn present_status(status: &str) -> StatusPresentation {
    let key = normalize_status(status);

    KNOWN_STATUSES
        .iter()
        .find(|(known, ..)| *known == key)
        .map(|(_, label, icon, color)| StatusPresentation {
            label: label.to_string(),
            icon: *icon,
            color: *color,
        })
        .unwrap_or_else(|| StatusPresentation {
            label: status.to_string(),
            icon: StatusIcon::Unknown,
            color: StatusColor::Gray,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_variants_render_identically() {
        let canonical = present_status("out-of-stock");
        assert_eq!(canonical.label, "Out of Stock");
        assert_eq!(canonical.color, StatusColor::Red);

        for variant in ["Out Of Stock", "OUT-OF-STOCK", "  out of   stock ", "Out of stock"] {
            assert_eq!(present_status(variant), canonical, "variant {:?}", variant);
        }
    }

    #[test]
    fn test_unknown_status_echoes_input() {
        let presentation = present_status("Awaiting Transfer");
        assert_eq!(presentation.label, "Awaiting Transfer");
        assert_eq!(presentation.icon, StatusIcon::Unknown);
        assert_eq!(presentation.color, StatusColor::Gray);

        let empty = present_status("");
        assert_eq!(empty.label, "");
        assert_eq!(empty.icon, StatusIcon::Unknown);
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status("In Progress"), "in-progress");
        assert_eq!(normalize_status("no-show"), "no-show");
        assert_eq!(normalize_status("\tPartially  Paid\n"), "partially-paid");
    }
}
