//! Upstream API adapters
//!
//! One client per upstream system, both implementing [`UpstreamSource`]
//! so the sync pipeline can walk pages without caring which API is on
//! the other end.

pub mod crm;
pub mod erp;
pub mod traits;

pub use crm::CrmClient;
pub use erp::ErpClient;
pub use traits::{PageRequest, RecordPage, UpstreamSource, MAX_PAGE_SIZE};
