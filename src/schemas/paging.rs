use serde::{Deserialize, Serialize};

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

impl<T> PagedResult<T> {
    /// Number of pages at the page size the server applied; a single page when unpaged.
    pub fn page_count(&self) -> u64 {
        match self.limit {
            Some(limit) if limit > 0 => self.total.div_ceil(limit).max(1),
            _ => 1,
        }
    }

    pub fn has_more(&self) -> bool {
        let shown = self.offset.unwrap_or(0) + self.items.len() as u64;
        shown < self.total
    }
}
