//! Pagination module
//!
//! Follows `nextRecordsUrl` through a listing and collects every record.
//!
//! # Overview
//!
//! Pages are fetched strictly one after another because each cursor comes
//! from the previous response. Records are appended in server order; a
//! failure on any page discards what was collected.

mod types;

pub use types::{next_cursor, take_records, NextPage, PaginationState, NEXT_RECORDS_URL};

use crate::client::SalesforceClient;
use crate::error::Result;
use crate::http::RequestOptions;
use crate::types::{JsonValue, Method, StringMap};
use tracing::debug;

/// Fetch every page of `endpoint` and return the records under `field_name`
pub async fn collect_all(
    client: &SalesforceClient,
    field_name: &str,
    method: Method,
    endpoint: &str,
    body: JsonValue,
    query: &StringMap,
) -> Result<Vec<JsonValue>> {
    let mut state = PaginationState::new();
    let mut records = Vec::new();

    while !state.done {
        let mut response = client
            .request(
                method,
                endpoint,
                body.clone(),
                query,
                state.cursor.as_deref(),
                RequestOptions::default(),
            )
            .await?;

        let next = NextPage::from_response(endpoint, &response)?;
        let page = take_records(&mut response, field_name)?;

        state.add_page(page.len());
        debug!(
            endpoint,
            page = state.pages,
            count = page.len(),
            more = !next.is_done(),
            "Fetched page"
        );

        records.extend(page);
        state.advance(next);
    }

    debug!(
        endpoint,
        pages = state.pages,
        total = state.total_fetched,
        "Pagination complete"
    );
    Ok(records)
}
