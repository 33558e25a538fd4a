//! Parameter structures for the common ethtool callbacks.

use alloc::vec::Vec;
use bitflags::bitflags;

/// Pause frame configuration (`struct ethtool_pauseparam`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseParam {
    pub autoneg: bool,
    pub rx_pause: bool,
    pub tx_pause: bool,
}

/// Queue/channel counts (`struct ethtool_channels`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Channels {
    pub max_rx: u32,
    pub max_tx: u32,
    pub max_other: u32,
    pub max_combined: u32,
    pub rx_count: u32,
    pub tx_count: u32,
    pub other_count: u32,
    pub combined_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Duplex {
    Half,
    Full,
    #[default]
    Unknown,
}

/// Link mode settings (subset of `struct ethtool_link_ksettings`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSettings {
    /// Speed in Mb/s, `None` when unknown or link down.
    pub speed: Option<u32>,
    pub duplex: Duplex,
    pub autoneg: bool,
    /// Supported link modes (ethtool link mode bit positions).
    pub supported: u64,
    /// Advertised link modes.
    pub advertising: u64,
}

bitflags! {
    /// Forward error correction modes (`ETHTOOL_FEC_*`).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct FecMode: u32 {
        const NONE  = 1 << 0;
        const AUTO  = 1 << 1;
        const OFF   = 1 << 2;
        const RS    = 1 << 3;
        const BASER = 1 << 4;
        const LLRS  = 1 << 5;
    }
}

/// FEC configuration (`struct ethtool_fecparam`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FecParam {
    pub active_fec: FecMode,
    pub fec: FecMode,
}

/// Receive flow hash configuration (`get_rxfh`/`set_rxfh`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RxfhParam {
    /// Indirection table, one RX queue index per entry.
    pub indir: Vec<u32>,
    /// Hash key bytes.
    pub key: Vec<u8>,
    /// Hash function (`ETH_RSS_HASH_*`), 0 for "unchanged".
    pub hfunc: u8,
    /// RSS context, 0 for the default context.
    pub rss_context: u32,
}

/// Pluggable module EEPROM description (`struct ethtool_modinfo`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleInfo {
    /// SFF standard the module follows (`ETH_MODULE_SFF_*`).
    pub type_id: u32,
    pub eeprom_len: u32,
}

/// Module EEPROM read window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleEeprom {
    pub offset: u32,
    pub data: Vec<u8>,
}

/// Identify-LED state (`enum ethtool_phys_id_state`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysIdState {
    Inactive,
    Active,
    On,
    Off,
}

/// String sets (`enum ethtool_stringset`).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringSet {
    Test = 0,
    Stats = 1,
    PrivFlags = 2,
}

impl StringSet {
    /// Convert from the raw `ETH_SS_*` value.
    pub fn from_u32(val: u32) -> Option<Self> {
        match val {
            0 => Some(StringSet::Test),
            1 => Some(StringSet::Stats),
            2 => Some(StringSet::PrivFlags),
            _ => None,
        }
    }
}

bitflags! {
    /// Self-test request and result flags (`ETH_TEST_FL_*`).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct SelfTestFlags: u32 {
        const OFFLINE = 1 << 0;
        const FAILED  = 1 << 1;
        const EXTERNAL_LB = 1 << 2;
        const EXTERNAL_LB_DONE = 1 << 3;
    }
}

bitflags! {
    /// Components to reset (`enum ethtool_reset_flags`).
    ///
    /// The driver clears the bits of the components it reset; what remains
    /// is handed back to the caller.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ResetFlags: u32 {
        const MGMT    = 1 << 0;
        const IRQ     = 1 << 1;
        const DMA     = 1 << 2;
        const FILTER  = 1 << 3;
        const OFFLOAD = 1 << 4;
        const MAC     = 1 << 5;
        const PHY     = 1 << 6;
        const RAM     = 1 << 7;
        const AP      = 1 << 8;
        const DEDICATED = 0x0000_ffff;
        const ALL     = 0xffff_ffff;
    }
}

/// RX flow classification request (`struct ethtool_rxnfc`).
///
/// Carried through to the driver untouched; `cmd` selects the operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RxNfc {
    pub cmd: u32,
    pub flow_type: u32,
    pub data: u64,
    pub rule_cnt: u32,
    pub rule_locs: Vec<u32>,
}
