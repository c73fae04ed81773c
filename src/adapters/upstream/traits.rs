//! Upstream source trait and page types
//!
//! Both upstream APIs reduce to the same contract: ask for one page of
//! records of one entity kind within a date window, get back the raw
//! records plus an advisory total. Fetching is fail-fast by design; retry
//! handling belongs to the storage side, where writes are idempotent.

use crate::core::sync::DateWindow;
use crate::domain::ids::{EntityKind, UpstreamSystem};
use crate::domain::record::RawRecord;
use crate::domain::Result;
use async_trait::async_trait;

/// Hard ceiling on records per page, regardless of configuration
pub const MAX_PAGE_SIZE: usize = 100;

/// One page request in an offset/limit pagination walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based record offset
    pub offset: u64,
    /// Requested page size; clients clamp to [`MAX_PAGE_SIZE`]
    pub size: usize,
}

impl PageRequest {
    pub fn new(offset: u64, size: usize) -> Self {
        Self {
            offset,
            size: size.min(MAX_PAGE_SIZE),
        }
    }

    /// The request for the page following this one
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset + self.size as u64,
            size: self.size,
        }
    }
}

/// One fetched page of raw records
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    /// Records in upstream order
    pub items: Vec<RawRecord>,
    /// Upstream's claim of the total matching record count. Advisory
    /// only; some upstreams cap or estimate it, so termination decisions
    /// must come from page emptiness instead.
    pub total_estimate: Option<u64>,
}

impl RecordPage {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A paginated source of raw records (CRM or ERP)
///
/// Implementations are fail-fast: transport failures, non-2xx responses
/// and undecodable bodies surface immediately as errors without retry.
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    /// Which upstream system this source talks to
    fn system(&self) -> UpstreamSystem;

    /// Fetches one page of records of `entity` modified within `window`
    async fn fetch_page(
        &self,
        entity: EntityKind,
        window: &DateWindow,
        page: PageRequest,
    ) -> Result<RecordPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_size() {
        let page = PageRequest::new(0, 500);
        assert_eq!(page.size, MAX_PAGE_SIZE);

        let page = PageRequest::new(0, 25);
        assert_eq!(page.size, 25);
    }

    #[test]
    fn test_page_request_next_advances_offset() {
        let page = PageRequest::new(0, 50);
        let next = page.next();
        assert_eq!(next.offset, 50);
        assert_eq!(next.size, 50);
        assert_eq!(next.next().offset, 100);
    }

    #[test]
    fn test_record_page_len() {
        let page = RecordPage::default();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
    }
}
