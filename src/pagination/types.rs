//! Pagination types
//!
//! Salesforce list and query endpoints answer with a page of records and,
//! while more remain, a `nextRecordsUrl` such as
//! `/services/data/v39.0/query/01gD0000002HU6KIAW-2000`.

use crate::error::{Error, Result};
use crate::types::JsonValue;

/// Response field carrying the next page locator
pub const NEXT_RECORDS_URL: &str = "nextRecordsUrl";

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available at this path
    Continue {
        /// Path relative to the versioned API root
        cursor: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Inspect a page response.
    ///
    /// An absent or `null` `nextRecordsUrl` ends pagination. Any other
    /// non-string value is a fault.
    pub fn from_response(endpoint: &str, body: &JsonValue) -> Result<Self> {
        match body.get(NEXT_RECORDS_URL) {
            None | Some(JsonValue::Null) => Ok(Self::Done),
            Some(JsonValue::String(url)) => Ok(Self::Continue {
                cursor: next_cursor(endpoint, url),
            }),
            Some(other) => Err(Error::record_extraction(
                NEXT_RECORDS_URL,
                format!("expected a string, got {other}"),
            )),
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Path of the next page: `endpoint` joined with the last segment of
/// `next_records_url`
///
/// ```
/// use salesforce_cdk::pagination::next_cursor;
///
/// let cursor = next_cursor("/query", "/services/data/v39.0/query/01uxx0000001");
/// assert_eq!(cursor, "/query/01uxx0000001");
/// ```
pub fn next_cursor(endpoint: &str, next_records_url: &str) -> String {
    let locator = next_records_url
        .rsplit('/')
        .next()
        .unwrap_or(next_records_url);
    format!("{endpoint}/{locator}")
}

/// Move the records array out of `body[field]`.
///
/// A missing field or a non-array value is a fault rather than an empty page.
pub fn take_records(body: &mut JsonValue, field: &str) -> Result<Vec<JsonValue>> {
    match body.get_mut(field).map(JsonValue::take) {
        Some(JsonValue::Array(records)) => Ok(records),
        Some(other) => Err(Error::record_extraction(
            field,
            format!("expected an array, got {}", kind(&other)),
        )),
        None => Err(Error::record_extraction(field, "field missing from response")),
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Path of the next page, `None` before the first request
    pub cursor: Option<String>,
    /// Pages fetched so far
    pub pages: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }

    /// Apply the outcome of a page
    pub fn advance(&mut self, next: NextPage) {
        match next {
            NextPage::Continue { cursor } => self.cursor = Some(cursor),
            NextPage::Done => self.done = true,
        }
    }
}
