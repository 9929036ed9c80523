//! Cursor pagination for list endpoints.
//!
//! Every list endpoint in the Parcelbase API uses the same scheme: a page
//! of records plus a `has_more` flag, with the last record's ID acting as
//! the cursor (`after_id`) for the next request. This module centralizes
//! the cursor arithmetic so each resource's list method does not repeat it.
//!
//! The engine is filter-agnostic: it only produces the `after_id` /
//! `page_size` pair, and callers merge that with whatever filter
//! parameters (date ranges, status filters) they used for the original
//! listing.
//!
//! # Example
//!
//! ```rust
//! use parcelbase_api::pagination::{next_page_params, EndOfPagination};
//!
//! // More pages available: build the cursor for the next request
//! let params = next_page_params(true, "shp_999", Some(25)).unwrap();
//! assert_eq!(params.after_id, "shp_999");
//! assert_eq!(params.page_size, Some(25));
//!
//! // Last page: a distinguished signal, not a generic error
//! let done = next_page_params(false, "shp_999", None);
//! assert_eq!(done.unwrap_err(), EndOfPagination);
//! ```

use std::collections::HashMap;

use thiserror::Error;

/// Signal that a listing has no further pages.
///
/// This is a normal loop-termination condition, distinguishable from
/// transport and API failures by type rather than by message matching:
///
/// ```rust,ignore
/// loop {
///     let page = Shipment::all(&client, Some(params.clone())).await?;
///     process(&page.objects);
///     match page.next_page_params(None) {
///         Ok(cursor) => params = params.with_cursor(cursor),
///         Err(EndOfPagination) => break,
///     }
/// }
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("There are no more pages to retrieve.")]
pub struct EndOfPagination;

/// Cursor parameters for fetching the next page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    /// The ID of the last record on the current page.
    pub after_id: String,
    /// The requested page size, when overridden.
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Converts the cursor into query parameters.
    ///
    /// The caller merges these into the query map of the next request,
    /// alongside any filter parameters from the original listing.
    #[must_use]
    pub fn into_query(self) -> HashMap<String, String> {
        let mut query = HashMap::new();
        query.insert("after_id".to_string(), self.after_id);
        if let Some(page_size) = self.page_size {
            query.insert("page_size".to_string(), page_size.to_string());
        }
        query
    }
}

/// Computes the parameters for fetching the next page.
///
/// A `page_size` of zero is treated as unset. The caller must pass the
/// *last* item's ID from the *current* page; per the empty-page invariant,
/// callers treat an empty page as the end of pagination before this
/// function is ever invoked.
///
/// # Errors
///
/// Returns [`EndOfPagination`] when `has_more` is `false`.
pub fn next_page_params(
    has_more: bool,
    last_item_id: &str,
    page_size: Option<u32>,
) -> Result<PageParams, EndOfPagination> {
    if !has_more {
        return Err(EndOfPagination);
    }

    Ok(PageParams {
        after_id: last_item_id.to_string(),
        page_size: page_size.filter(|&size| size > 0),
    })
}
