//! Events sent back to the UI loop by background tasks

use uuid::Uuid;

use crate::{api::ApiError, list::source::ListPage};

/// Completion of a spawned request, tagged with the list screen that issued it
#[derive(Debug)]
pub enum AppEvent {
    FetchCompleted {
        instance: Uuid,
        seq: u64,
        result: Result<ListPage, ApiError>,
    },
    DeleteCompleted {
        instance: Uuid,
        id: String,
        result: Result<(), ApiError>,
    },
}

impl AppEvent {
    pub fn instance(&self) -> Uuid {
        match self {
            AppEvent::FetchCompleted { instance, .. } => *instance,
            AppEvent::DeleteCompleted { instance, .. } => *instance,
        }
    }
}
