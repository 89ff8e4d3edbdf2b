//! Data source seam between list controllers and the backend

use async_trait::async_trait;
use serde_json::Value;

use crate::{api::ApiError, models::EntityKind};

/// One page of raw rows plus the server-reported total item count
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub rows: Vec<Value>,
    pub total: u64,
}

/// Anything that can serve list pages and delete rows
#[async_trait]
pub trait ListSource: Send + Sync {
    /// Fetch one page of `entity` with the given query parameters
    async fn fetch_page(
        &self,
        entity: EntityKind,
        params: &[(String, String)],
    ) -> Result<ListPage, ApiError>;

    /// Delete (or cancel) the row identified by `id`
    async fn delete(&self, entity: EntityKind, id: &str) -> Result<(), ApiError>;
}

// Accepted locations of the total item count, in lookup order
const TOTAL_KEYS: [&str; 3] = ["total", "totalItems", "totalCount"];

/// Parse a list response body.
///
/// A missing row array defaults to no rows; a missing total is a contract error.
pub fn parse_list_body(entity: EntityKind, body: &Value) -> Result<ListPage, ApiError> {
    let object = body.as_object().ok_or_else(|| ApiError::InvalidBody {
        entity,
        reason: "expected a JSON object".to_string(),
    })?;

    let rows = object
        .get(entity.rows_key())
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let total = TOTAL_KEYS
        .iter()
        .find_map(|key| object.get(*key))
        .or_else(|| object.get("pagination").and_then(|p| p.get("total")))
        .and_then(Value::as_u64)
        .ok_or(ApiError::MissingTotal { entity })?;

    Ok(ListPage { rows, total })
}
