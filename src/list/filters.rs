//! Filter bar state: independent dropdown filters with an "all" sentinel

use std::collections::BTreeMap;

/// Filter value meaning "no constraint for this key"
pub const FILTER_ALL: &str = "all";

/// One selectable option of a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// A dropdown filter shown in the filter bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDefinition {
    pub key: String,
    pub label: String,
    pub options: Vec<FilterOption>,
}

impl FilterDefinition {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, value: &str, label: &str) -> Self {
        self.options.push(FilterOption::new(value, label));
        self
    }

    /// Options in display order, the implicit "all" option first
    pub fn choices(&self) -> Vec<FilterOption> {
        std::iter::once(FilterOption::new(FILTER_ALL, "All"))
            .chain(self.options.iter().cloned())
            .collect()
    }

    pub fn label_for(&self, value: &str) -> String {
        self.choices()
            .into_iter()
            .find(|option| option.value == value)
            .map(|option| option.label)
            .unwrap_or_else(|| value.to_string())
    }
}

/// Events emitted by the filter bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Changed { key: String, value: String },
    ClearAll,
}

/// Active filter values keyed by filter key
pub type FilterValues = BTreeMap<String, String>;

/// Whether a filter value actually constrains the list
pub fn is_active(value: Option<&String>) -> bool {
    matches!(value, Some(v) if v != FILTER_ALL)
}

/// Number of filters whose value is set and not "all"
pub fn active_filter_count(values: &FilterValues) -> usize {
    values.values().filter(|v| is_active(Some(*v))).count()
}

/// Keyboard-driven filter bar: one focused selector at a time
#[derive(Debug, Clone)]
pub struct FilterBar {
    pub definitions: Vec<FilterDefinition>,
    pub focused: usize,
}

impl FilterBar {
    pub fn new(definitions: Vec<FilterDefinition>) -> Self {
        Self {
            definitions,
            focused: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn focus_next(&mut self) {
        if !self.definitions.is_empty() {
            self.focused = (self.focused + 1) % self.definitions.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.definitions.is_empty() {
            self.focused = if self.focused == 0 {
                self.definitions.len() - 1
            } else {
                self.focused - 1
            };
        }
    }

    /// Current value of a filter, "all" when unset
    pub fn value_of<'a>(&self, values: &'a FilterValues, key: &str) -> &'a str {
        values.get(key).map(String::as_str).unwrap_or(FILTER_ALL)
    }

    /// Move the focused selector by `step` options, wrapping around
    pub fn cycle_focused(&self, values: &FilterValues, step: isize) -> Option<FilterEvent> {
        let definition = self.definitions.get(self.focused)?;
        let choices = definition.choices();
        let current = self.value_of(values, &definition.key);
        let idx = choices.iter().position(|c| c.value == current).unwrap_or(0) as isize;
        let len = choices.len() as isize;
        let next = (idx + step).rem_euclid(len) as usize;

        Some(FilterEvent::Changed {
            key: definition.key.clone(),
            value: choices[next].value.clone(),
        })
    }

    /// "Clear all" is only offered while some filter is active
    pub fn show_clear_all(&self, values: &FilterValues) -> bool {
        active_filter_count(values) > 0
    }

    pub fn clear_all(&self, values: &FilterValues) -> Option<FilterEvent> {
        self.show_clear_all(values).then_some(FilterEvent::ClearAll)
    }

    /// Badge text, absent when no filter is active
    pub fn badge(&self, values: &FilterValues) -> Option<String> {
        match active_filter_count(values) {
            0 => None,
            count => Some(count.to_string()),
        }
    }
}
