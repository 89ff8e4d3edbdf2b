//! Combined search / filter / sort / pagination state of a list view

use crate::list::{
    filters::{FilterDefinition, FilterValues, FILTER_ALL},
    pagination::is_valid_page_size,
    table::SortState,
};

/// Page size a list starts with
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query state driving a list fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub filters: FilterValues,
    pub sort: Option<SortState>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    /// Fresh state; an unsupported page size falls back to the default
    pub fn new(page_size: u32) -> Self {
        Self {
            search_text: String::new(),
            filters: FilterValues::new(),
            sort: None,
            page: 1,
            page_size: if is_valid_page_size(page_size) {
                page_size
            } else {
                DEFAULT_PAGE_SIZE
            },
        }
    }

    /// Seed every filter of `definitions` with "all", keeping values already set
    pub fn with_filter_defaults(mut self, definitions: &[FilterDefinition]) -> Self {
        for definition in definitions {
            self.filters
                .entry(definition.key.clone())
                .or_insert_with(|| FILTER_ALL.to_string());
        }
        self
    }

    /// Returns whether anything changed. New search text starts from page 1.
    pub fn set_search(&mut self, text: &str) -> bool {
        if self.search_text == text {
            return false;
        }
        self.search_text = text.to_string();
        self.page = 1;
        true
    }

    pub fn set_filter(&mut self, key: &str, value: &str) -> bool {
        let current = self.filters.get(key).map(String::as_str).unwrap_or(FILTER_ALL);
        if current == value {
            return false;
        }
        self.filters.insert(key.to_string(), value.to_string());
        self.page = 1;
        true
    }

    /// Reset every known filter to "all"
    pub fn clear_filters(&mut self) -> bool {
        let changed = self.filters.values().any(|v| v != FILTER_ALL);
        for value in self.filters.values_mut() {
            *value = FILTER_ALL.to_string();
        }
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn set_sort(&mut self, sort: SortState) -> bool {
        if self.sort.as_ref() == Some(&sort) {
            return false;
        }
        self.sort = Some(sort);
        true
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    /// Changing the page size always returns to page 1
    pub fn set_page_size(&mut self, size: u32) -> bool {
        if !is_valid_page_size(size) || self.page_size == size {
            return false;
        }
        self.page_size = size;
        self.page = 1;
        true
    }

    /// Query parameters in request order: page, limit, search, sort, then filters verbatim
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
            ("search".to_string(), self.search_text.clone()),
        ];

        if let Some(sort) = &self.sort {
            params.push(("sortBy".to_string(), sort.key.clone()));
            params.push(("sortOrder".to_string(), sort.direction.as_str().to_string()));
        }

        params.extend(
            self.filters
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::table::SortDirection;

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_default_params() {
        let query = QueryState::default();
        assert_eq!(
            pairs(&query.to_query_params()),
            vec![("page", "1"), ("limit", "10"), ("search", "")]
        );
    }

    #[test]
    fn test_filter_defaults_are_sent_verbatim() {
        let definitions = vec![
            FilterDefinition::new("status", "Status").with_option("paid", "Paid"),
            FilterDefinition::new("paymentMethod", "Payment"),
        ];
        let mut query = QueryState::new(10);
        query.set_filter("status", "paid");
        let query = query.with_filter_defaults(&definitions);

        assert_eq!(
            pairs(&query.to_query_params()),
            vec![
                ("page", "1"),
                ("limit", "10"),
                ("search", ""),
                ("paymentMethod", "all"),
                ("status", "paid"),
            ]
        );
    }

    #[test]
    fn test_full_params_include_sort_and_filters() {
        let mut query = QueryState::new(25);
        query.set_search("doe");
        query.set_filter("status", "active");
        query.set_filter("gender", FILTER_ALL);
        query.set_sort(SortState::new("name", SortDirection::Desc));
        query.set_page(3);

        assert_eq!(
            pairs(&query.to_query_params()),
            vec![
                ("page", "3"),
                ("limit", "25"),
                ("search", "doe"),
                ("sortBy", "name"),
                ("sortOrder", "desc"),
                ("status", "active"),
            ]
        );
    }

    #[test]
    fn test_search_filter_and_size_changes_reset_page() {
        let mut query = QueryState::default();
        query.set_page(4);
        assert!(query.set_search("a"));
        assert_eq!(query.page, 1);

        query.set_page(4);
        assert!(query.set_filter("status", "inactive"));
        assert_eq!(query.page, 1);

        query.set_page(4);
        assert!(query.set_page_size(50));
        assert_eq!(query.page, 1);

        query.set_page(4);
        assert!(query.set_sort(SortState::new("name", SortDirection::Asc)));
        assert_eq!(query.page, 4);
    }

    #[test]
    fn test_unchanged_values_report_no_change() {
        let mut query = QueryState::default();
        assert!(!query.set_search(""));
        assert!(!query.set_filter("status", FILTER_ALL));
        assert!(!query.set_page(1));
        assert!(!query.set_page_size(10));
        assert!(!query.set_page_size(30));
        assert!(!query.clear_filters());
    }

    #[test]
    fn test_clear_filters_resets_to_all() {
        let mut query = QueryState::default();
        query.set_filter("status", "active");
        query.set_filter("department", "cardiology");
        query.set_page(2);

        assert!(query.clear_filters());
        assert!(query.filters.values().all(|v| v == FILTER_ALL));
        assert_eq!(crate::list::filters::active_filter_count(&query.filters), 0);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_invalid_initial_page_size_falls_back() {
        assert_eq!(QueryState::new(7).page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(QueryState::new(100).page_size, 100);
    }
}
