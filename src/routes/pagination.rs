use serde::Deserialize;

use crate::store::{
    FindOptions,
    SortOrder,
};

const DEFAULT_LIMIT: u64 = 50;

/// `?skip=&limit=` query parameters. Negative or non-numeric values are
/// rejected by the query extractor.
///
/// `limit` defaults to 50 and is capped at
/// [`MAX_SCAN_LIMIT`](crate::store::MAX_SCAN_LIMIT): a larger value silently
/// returns at most 1000 records. `limit=0` returns none.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Newest first on `field`, then this page.
    pub fn newest_first(&self, field: &'static str) -> FindOptions {
        FindOptions::new(self.limit)
            .sort(field, SortOrder::Descending)
            .skip(self.skip)
    }
}
