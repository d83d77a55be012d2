//! Steam Store app details.
//!
//! [`ParallelDetailFetcher`] issues one `appdetails` request per app id,
//! concurrently, and turns each response into a [`DetailRecord`].

mod fetcher;
mod parse;
mod types;

pub use fetcher::ParallelDetailFetcher;
pub use types::*;

use serde_json::Value;

const MISSING_IDS: &str = "appIds parameter is required and cannot be empty";
const NOT_INTEGERS: &str = "appIds must be an array of integers";

/// Validate a caller-supplied app id list.
///
/// Absent, `null` or empty lists are rejected, as is any element that is not
/// a non-negative integer fitting in a `u32`.
pub fn parse_app_ids(value: Option<&Value>) -> Result<Vec<u32>, StoreError> {
    let items = match value {
        None | Some(Value::Null) => return Err(StoreError::InvalidInput(MISSING_IDS.into())),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(StoreError::InvalidInput(NOT_INTEGERS.into())),
    };

    if items.is_empty() {
        return Err(StoreError::InvalidInput(MISSING_IDS.into()));
    }

    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| StoreError::InvalidInput(NOT_INTEGERS.into()))
        })
        .collect()
}
