//! List page controller: owns the query state and turns control events into fetches
//!
//! Every fetch is tagged with a sequence number. Only the response to the most
//! recently issued fetch updates the displayed rows, so a slow earlier request
//! can never overwrite the result of a later one.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    api::ApiError,
    entities::ListEntity,
    list::{
        filters::FilterEvent,
        pagination::{Pagination, PaginationEvent},
        query::QueryState,
        source::{ListPage, ListSource},
        table::SortState,
    },
    models::EntityKind,
};

/// A fetch the controller wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub entity: EntityKind,
    pub params: Vec<(String, String)>,
}

/// A confirmed delete the controller wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    pub entity: EntityKind,
    pub id: String,
}

/// Modal dialog owned by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    ConfirmDelete {
        id: String,
        name: String,
        verb: &'static str,
    },
    Error {
        title: String,
        message: String,
    },
}

/// Result of applying a fetch response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Response to a superseded fetch, dropped
    Stale,
    Updated,
    Failed,
    /// The page no longer exists; fetch the last page instead
    Clamped(FetchTicket),
}

pub struct ListController<R: ListEntity> {
    query: QueryState,
    rows: Vec<R>,
    total_items: u64,
    loading: bool,
    issued_seq: u64,
    last_error: Option<String>,
    dialog: Option<Dialog>,
    deleting: Option<String>,
}

impl<R: ListEntity> ListController<R> {
    /// Fresh controller with every filter of `R` set to "all"
    pub fn new(page_size: u32) -> Self {
        Self::with_query(QueryState::new(page_size).with_filter_defaults(&R::filters()))
    }

    pub fn with_query(query: QueryState) -> Self {
        Self {
            query,
            rows: Vec::new(),
            total_items: 0,
            loading: false,
            issued_seq: 0,
            last_error: None,
            dialog: None,
            deleting: None,
        }
    }

    pub fn entity(&self) -> EntityKind {
        R::KIND
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting.is_some()
    }

    pub fn latest_seq(&self) -> u64 {
        self.issued_seq
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.query.page, self.query.page_size, self.total_items)
    }

    /// Issue a fetch for the current query state
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_seq += 1;
        self.loading = true;
        let ticket = FetchTicket {
            seq: self.issued_seq,
            entity: R::KIND,
            params: self.query.to_query_params(),
        };
        debug!("{} fetch #{} with {:?}", R::KIND, ticket.seq, ticket.params);
        ticket
    }

    /// First fetch when the list is mounted
    pub fn mount(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    pub fn refresh(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Apply the response to fetch `seq`; only the latest issued fetch counts
    pub fn apply_fetch(&mut self, seq: u64, result: Result<ListPage, ApiError>) -> FetchOutcome {
        if seq != self.issued_seq {
            debug!(
                "Dropping stale {} response #{} (latest #{})",
                R::KIND,
                seq,
                self.issued_seq
            );
            return FetchOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.rows = decode_rows(page.rows);
                self.total_items = page.total;
                self.last_error = None;

                // An empty result still has a page 1
                let last_page = self.pagination().total_pages.max(1);
                if self.query.page > last_page {
                    self.query.set_page(last_page);
                    return FetchOutcome::Clamped(self.begin_fetch());
                }
                FetchOutcome::Updated
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", R::KIND, e);
                self.rows.clear();
                self.total_items = 0;
                self.last_error = Some(e.user_message());
                FetchOutcome::Failed
            }
        }
    }

    pub fn on_search(&mut self, text: &str) -> Option<FetchTicket> {
        self.query.set_search(text).then(|| self.begin_fetch())
    }

    pub fn on_filter(&mut self, event: FilterEvent) -> Option<FetchTicket> {
        let changed = match event {
            FilterEvent::Changed { key, value } => self.query.set_filter(&key, &value),
            FilterEvent::ClearAll => self.query.clear_filters(),
        };
        changed.then(|| self.begin_fetch())
    }

    pub fn on_sort(&mut self, sort: SortState) -> Option<FetchTicket> {
        self.query.set_sort(sort).then(|| self.begin_fetch())
    }

    pub fn on_pagination(&mut self, event: PaginationEvent) -> Option<FetchTicket> {
        let changed = match event {
            PaginationEvent::PageChange(page) => self.query.set_page(page),
            PaginationEvent::ItemsPerPageChange(size) => self.query.set_page_size(size),
        };
        changed.then(|| self.begin_fetch())
    }

    /// Ask for confirmation before deleting (or cancelling) `row`
    pub fn request_delete(&mut self, row: &R) {
        if self.deleting.is_some() {
            return;
        }
        self.dialog = Some(Dialog::ConfirmDelete {
            id: row.id(),
            name: row.display_name(),
            verb: R::KIND.delete_verb(),
        });
    }

    /// Drop a pending confirmation; other dialogs stay open
    pub fn cancel_delete(&mut self) {
        if matches!(self.dialog, Some(Dialog::ConfirmDelete { .. })) {
            self.dialog = None;
        }
    }

    /// Close whatever dialog is open without side effects
    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    /// Confirm the pending delete; nothing happens without a pending confirmation
    pub fn confirm_delete(&mut self) -> Option<DeleteTicket> {
        match self.dialog.take() {
            Some(Dialog::ConfirmDelete { id, .. }) => {
                self.deleting = Some(id.clone());
                Some(DeleteTicket { entity: R::KIND, id })
            }
            other => {
                self.dialog = other;
                None
            }
        }
    }

    /// Success refetches from the server; failure opens an error dialog and keeps the rows
    pub fn apply_delete(&mut self, id: &str, result: Result<(), ApiError>) -> Option<FetchTicket> {
        if self.deleting.as_deref() == Some(id) {
            self.deleting = None;
        }

        match result {
            Ok(()) => {
                info!("{} {} removed", R::KIND, id);
                Some(self.begin_fetch())
            }
            Err(e) => {
                warn!("Failed to remove {} {}: {}", R::KIND, id, e);
                self.dialog = Some(Dialog::Error {
                    title: format!("{} failed", R::KIND.delete_verb()),
                    message: e.user_message(),
                });
                None
            }
        }
    }

    /// Run `ticket` against `source`, following page clamps
    pub async fn execute(&mut self, source: &dyn ListSource, ticket: FetchTicket) -> FetchOutcome {
        let mut ticket = ticket;
        loop {
            let result = source.fetch_page(ticket.entity, &ticket.params).await;
            match self.apply_fetch(ticket.seq, result) {
                FetchOutcome::Clamped(next) => ticket = next,
                outcome => return outcome,
            }
        }
    }

    /// Fetch the current query state from `source`
    pub async fn load(&mut self, source: &dyn ListSource) -> FetchOutcome {
        let ticket = self.begin_fetch();
        self.execute(source, ticket).await
    }

    /// Confirm and run the pending delete against `source`, refreshing on success
    pub async fn confirm_delete_with(&mut self, source: &dyn ListSource) -> bool {
        let Some(ticket) = self.confirm_delete() else {
            return false;
        };
        let result = source.delete(ticket.entity, &ticket.id).await;
        match self.apply_delete(&ticket.id, result) {
            Some(refetch) => {
                self.execute(source, refetch).await;
                true
            }
            None => false,
        }
    }
}

/// Decode raw rows, skipping records that do not match the entity model
fn decode_rows<R: ListEntity>(values: Vec<Value>) -> Vec<R> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value::<R>(value) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!("Skipping malformed {} row {}: {}", R::KIND, idx, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::Patient, list::filters::FILTER_ALL, list::table::SortDirection};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// In-memory source recording every request
    #[derive(Default)]
    struct FakeSource {
        pages: Mutex<Vec<Result<ListPage, ApiError>>>,
        delete_result: Mutex<Option<Result<(), ApiError>>>,
        fetches: Mutex<Vec<Vec<(String, String)>>>,
        deletes: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn with_pages(pages: Vec<Result<ListPage, ApiError>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                ..Default::default()
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ListSource for FakeSource {
        async fn fetch_page(
            &self,
            _entity: EntityKind,
            params: &[(String, String)],
        ) -> Result<ListPage, ApiError> {
            self.fetches.lock().unwrap().push(params.to_vec());
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                Ok(page(0, 0))
            } else {
                pages.remove(0)
            }
        }

        async fn delete(&self, _entity: EntityKind, id: &str) -> Result<(), ApiError> {
            self.deletes.lock().unwrap().push(id.to_string());
            self.delete_result.lock().unwrap().take().unwrap_or(Ok(()))
        }
    }

    fn page(rows: usize, total: u64) -> ListPage {
        ListPage {
            rows: (0..rows)
                .map(|i| json!({ "id": i, "firstName": format!("Patient{}", i), "status": "active" }))
                .collect(),
            total,
        }
    }

    fn server_error() -> ApiError {
        ApiError::Status { status: 500, message: "boom".into() }
    }

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_latest_fetch_wins() {
        let mut controller = ListController::<Patient>::new(10);
        let first = controller.mount();
        let second = controller.on_search("ann").unwrap();

        assert_eq!(controller.apply_fetch(second.seq, Ok(page(2, 2))), FetchOutcome::Updated);
        assert_eq!(controller.apply_fetch(first.seq, Ok(page(9, 9))), FetchOutcome::Stale);

        assert_eq!(controller.rows().len(), 2);
        assert_eq!(controller.total_items(), 2);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_stale_response_keeps_loading_state() {
        let mut controller = ListController::<Patient>::new(10);
        let first = controller.mount();
        let _second = controller.refresh();
        assert_eq!(controller.apply_fetch(first.seq, Ok(page(1, 1))), FetchOutcome::Stale);
        assert!(controller.is_loading());
        assert!(controller.rows().is_empty());
    }

    #[test]
    fn test_fetch_failure_clears_rows() {
        let mut controller = ListController::<Patient>::new(10);
        let ticket = controller.mount();
        controller.apply_fetch(ticket.seq, Ok(page(3, 3)));

        let ticket = controller.refresh();
        assert_eq!(controller.apply_fetch(ticket.seq, Err(server_error())), FetchOutcome::Failed);
        assert!(controller.rows().is_empty());
        assert_eq!(controller.total_items(), 0);
        assert_eq!(controller.last_error(), Some("boom (status 500)"));
    }

    #[test]
    fn test_missing_total_is_handled_as_fetch_failure() {
        let mut controller = ListController::<Patient>::new(10);
        let ticket = controller.mount();
        let outcome = controller.apply_fetch(
            ticket.seq,
            Err(ApiError::MissingTotal { entity: EntityKind::Patients }),
        );
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(controller.last_error().unwrap().contains("total"));
    }

    #[test]
    fn test_every_change_issues_one_fetch_with_all_params() {
        let mut controller = ListController::<Patient>::new(25);
        controller.mount();

        let ticket = controller
            .on_filter(FilterEvent::Changed { key: "status".into(), value: "active".into() })
            .unwrap();
        assert_eq!(param(&ticket.params, "status"), Some("active"));
        assert_eq!(param(&ticket.params, "limit"), Some("25"));

        let ticket = controller.on_sort(SortState::new("name", SortDirection::Desc)).unwrap();
        assert_eq!(param(&ticket.params, "sortBy"), Some("name"));
        assert_eq!(param(&ticket.params, "sortOrder"), Some("desc"));
        assert_eq!(param(&ticket.params, "status"), Some("active"));

        let ticket = controller.on_pagination(PaginationEvent::PageChange(3)).unwrap();
        assert_eq!(param(&ticket.params, "page"), Some("3"));

        let ticket = controller
            .on_pagination(PaginationEvent::ItemsPerPageChange(50))
            .unwrap();
        assert_eq!(param(&ticket.params, "page"), Some("1"));
        assert_eq!(param(&ticket.params, "limit"), Some("50"));

        assert!(controller.on_search("").is_none());
        assert!(controller.on_pagination(PaginationEvent::PageChange(1)).is_none());
        assert_eq!(controller.latest_seq(), 5);
    }

    #[test]
    fn test_mount_sends_every_filter() {
        let mut controller = ListController::<Patient>::new(10);
        let ticket = controller.mount();
        assert_eq!(param(&ticket.params, "status"), Some(FILTER_ALL));
        assert_eq!(param(&ticket.params, "gender"), Some(FILTER_ALL));
    }

    #[test]
    fn test_clear_all_filters() {
        let mut controller = ListController::<Patient>::new(10);
        controller.on_filter(FilterEvent::Changed { key: "gender".into(), value: "female".into() });
        let ticket = controller.on_filter(FilterEvent::ClearAll).unwrap();
        assert_eq!(param(&ticket.params, "gender"), Some(FILTER_ALL));
        assert!(controller.on_filter(FilterEvent::ClearAll).is_none());
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let mut controller = ListController::<Patient>::new(10);
        controller.on_pagination(PaginationEvent::PageChange(5));
        let ticket = controller.refresh();

        match controller.apply_fetch(ticket.seq, Ok(page(0, 31))) {
            FetchOutcome::Clamped(next) => {
                assert_eq!(param(&next.params, "page"), Some("4"));
                assert!(controller.is_loading());
            }
            other => panic!("expected clamp, got {:?}", other),
        }
    }

    #[test]
    fn test_emptied_list_returns_to_first_page() {
        let mut controller = ListController::<Patient>::new(10);
        controller.on_pagination(PaginationEvent::PageChange(3));
        let ticket = controller.refresh();

        match controller.apply_fetch(ticket.seq, Ok(page(0, 0))) {
            FetchOutcome::Clamped(next) => {
                assert_eq!(param(&next.params, "page"), Some("1"));
                assert_eq!(controller.apply_fetch(next.seq, Ok(page(0, 0))), FetchOutcome::Updated);
            }
            other => panic!("expected clamp, got {:?}", other),
        }
        assert_eq!(controller.query().page, 1);
        assert!(!controller.pagination().can_go_previous());
        assert_eq!(controller.pagination().range_label(), "No results");
    }

    #[test]
    fn test_huge_total_does_not_panic() {
        let mut controller = ListController::<Patient>::new(10);
        let ticket = controller.mount();
        let outcome = controller.apply_fetch(ticket.seq, Ok(ListPage { rows: vec![], total: u64::MAX }));
        assert_eq!(outcome, FetchOutcome::Updated);
        assert_eq!(controller.pagination().total_pages, u32::MAX);
        assert!(controller.pagination().can_go_next());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let mut controller = ListController::<Patient>::new(10);
        let ticket = controller.mount();
        let body = ListPage {
            rows: vec![json!({ "id": 1, "firstName": "Ok" }), json!({ "id": { "nested": true } }), json!("junk")],
            total: 3,
        };
        controller.apply_fetch(ticket.seq, Ok(body));
        assert_eq!(controller.rows().len(), 1);
        assert_eq!(controller.total_items(), 3);
    }

    #[test]
    fn test_timestamps_and_nulls_keep_rows() {
        let mut controller = ListController::<Patient>::new(10);
        let ticket = controller.mount();
        let body = ListPage {
            rows: vec![
                json!({ "id": 1, "firstName": "Ada", "dateOfBirth": "1990-12-10T00:00:00.000Z", "status": "active" }),
                json!({ "id": 2, "lastName": null, "status": null }),
            ],
            total: 2,
        };
        controller.apply_fetch(ticket.seq, Ok(body));
        assert_eq!(controller.rows().len(), 2);
        assert_eq!(controller.rows()[1].id(), "2");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut controller = ListController::<Patient>::new(10);
        assert!(controller.confirm_delete().is_none());

        let ticket = controller.mount();
        controller.apply_fetch(ticket.seq, Ok(page(2, 2)));
        let row = controller.rows()[1].clone();

        controller.request_delete(&row);
        assert!(matches!(controller.dialog(), Some(Dialog::ConfirmDelete { verb: "Delete", .. })));

        controller.cancel_delete();
        assert!(controller.dialog().is_none());
        assert!(controller.confirm_delete().is_none());

        controller.request_delete(&row);
        let delete = controller.confirm_delete().unwrap();
        assert_eq!(delete.id, "1");
        assert!(controller.is_deleting());
        assert!(controller.dialog().is_none());
    }

    #[test]
    fn test_failed_delete_keeps_rows_and_shows_error() {
        let mut controller = ListController::<Patient>::new(10);
        let ticket = controller.mount();
        controller.apply_fetch(ticket.seq, Ok(page(2, 2)));
        let row = controller.rows()[0].clone();

        controller.request_delete(&row);
        let delete = controller.confirm_delete().unwrap();
        let seq_before = controller.latest_seq();

        assert!(controller.apply_delete(&delete.id, Err(server_error())).is_none());
        assert_eq!(controller.rows().len(), 2);
        assert_eq!(controller.latest_seq(), seq_before);
        assert!(matches!(controller.dialog(), Some(Dialog::Error { .. })));
        assert!(!controller.is_deleting());
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = FakeSource::with_pages(vec![Ok(page(3, 23))]);
        let mut controller = ListController::<Patient>::new(10);

        assert_eq!(controller.load(&source).await, FetchOutcome::Updated);
        assert_eq!(controller.rows().len(), 3);
        assert_eq!(controller.pagination().total_pages, 3);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_follows_clamp() {
        let source = FakeSource::with_pages(vec![Ok(page(0, 12)), Ok(page(2, 12))]);
        let mut controller = ListController::<Patient>::new(10);
        controller.on_pagination(PaginationEvent::PageChange(4));

        assert_eq!(controller.load(&source).await, FetchOutcome::Updated);
        assert_eq!(controller.query().page, 2);
        assert_eq!(controller.rows().len(), 2);
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refetches() {
        let source = FakeSource::with_pages(vec![Ok(page(2, 2)), Ok(page(1, 1))]);
        let mut controller = ListController::<Patient>::new(10);
        controller.load(&source).await;

        let row = controller.rows()[0].clone();
        controller.request_delete(&row);
        assert!(controller.confirm_delete_with(&source).await);

        assert_eq!(*source.deletes.lock().unwrap(), vec!["0".to_string()]);
        assert_eq!(source.fetch_count(), 2);
        assert_eq!(controller.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_sends_nothing() {
        let source = FakeSource::default();
        let mut controller = ListController::<Patient>::new(10);
        assert!(!controller.confirm_delete_with(&source).await);
        assert!(source.deletes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_against_source() {
        let source = FakeSource::with_pages(vec![Ok(page(1, 1))]);
        *source.delete_result.lock().unwrap() = Some(Err(server_error()));
        let mut controller = ListController::<Patient>::new(10);
        controller.load(&source).await;

        let row = controller.rows()[0].clone();
        controller.request_delete(&row);
        assert!(!controller.confirm_delete_with(&source).await);
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(controller.rows().len(), 1);
    }
}
