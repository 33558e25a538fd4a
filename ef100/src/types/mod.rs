//! ethtool value types.
//!
//! Rust-side mirrors of the structures exchanged through the ethtool
//! callback table. Field names follow the `struct ethtool_*` ABI so that
//! values can be copied in and out of kernel structures one-to-one.

pub mod drvinfo;
pub mod msglevel;
pub mod params;
pub mod ringparam;

// Re-exports
pub use drvinfo::{DrvInfo, EthtoolStr, ETHTOOL_BUSINFO_LEN, ETHTOOL_FWVERS_LEN, ETH_GSTRING_LEN};
pub use msglevel::MsgLevel;
pub use params::{
    Channels, Duplex, FecMode, FecParam, LinkSettings, ModuleEeprom, ModuleInfo, PauseParam,
    PhysIdState, ResetFlags, RxNfc, RxfhParam, SelfTestFlags, StringSet,
};
pub use ringparam::{RingParam, RingParamRequest};
