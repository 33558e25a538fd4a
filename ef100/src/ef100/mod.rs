//! EF100 ethtool callbacks.
//!
//! - [`ringparam`] - ring size query and negotiation
//! - [`drvinfo`] - driver and firmware version reporting
//! - [`ops`] - the EF100 operations table

pub mod drvinfo;
pub mod ops;
pub mod ringparam;

// Re-exports
pub use drvinfo::ef100_get_drvinfo;
pub use ops::ef100_ethtool_ops;
pub use ringparam::{ef100_get_ringparam, ef100_max_ring_size, ef100_set_ringparam, EF100_MAX_DMAQ_SIZE};
