//! Reusable list view pattern: search, filter, sort and paginate one endpoint
//!
//! Everything in here is independent of the terminal; the TUI components
//! only draw the state kept by these types.

pub mod controller;
pub mod filters;
pub mod pagination;
pub mod query;
pub mod search;
pub mod source;
pub mod status;
pub mod table;

pub use controller::{DeleteTicket, Dialog, FetchOutcome, FetchTicket, ListController};
pub use filters::{FilterBar, FilterDefinition, FilterEvent, FilterOption, FILTER_ALL};
pub use pagination::{PageItem, Pagination, PaginationEvent};
pub use query::QueryState;
pub use search::SearchInput;
pub use source::{ListPage, ListSource};
pub use status::{present_status, StatusPresentation};
pub use table::{CellValue, Column, DataTable, SortDirection, SortState};
