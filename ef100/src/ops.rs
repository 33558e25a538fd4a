//! ethtool operations table.
//!
//! [`EthtoolOps`] mirrors `struct ethtool_ops`: one optional callback per
//! operation. A `None` entry means the operation is not implemented and the
//! caller reports `-EOPNOTSUPP`.
//!
//! The [`common`] callbacks are shared by every controller generation;
//! most forward straight to [`EthtoolCommon`](crate::nic::EthtoolCommon).

use crate::error::Result;
use crate::nic::GString;
use crate::types::{
    Channels, DrvInfo, FecParam, LinkSettings, ModuleEeprom, ModuleInfo, MsgLevel, PauseParam,
    PhysIdState, ResetFlags, RingParam, RxNfc, RxfhParam, SelfTestFlags, StringSet,
};

/// Callback table for one driver type `N`.
pub struct EthtoolOps<N> {
    /// Driver supports additional RSS contexts.
    pub cap_rss_ctx_supported: bool,
    pub get_drvinfo: Option<fn(&mut N, &mut DrvInfo)>,
    pub get_msglevel: Option<fn(&N) -> MsgLevel>,
    pub set_msglevel: Option<fn(&mut N, MsgLevel)>,
    pub nway_reset: Option<fn(&mut N) -> Result<()>>,
    pub get_pauseparam: Option<fn(&N, &mut PauseParam)>,
    pub set_pauseparam: Option<fn(&mut N, &PauseParam) -> Result<()>>,
    pub get_sset_count: Option<fn(&N, StringSet) -> Result<usize>>,
    pub get_priv_flags: Option<fn(&N) -> u32>,
    pub set_priv_flags: Option<fn(&mut N, u32) -> Result<()>>,
    pub self_test: Option<fn(&mut N, &mut SelfTestFlags, &mut [u64])>,
    pub get_strings: Option<fn(&N, StringSet, &mut [GString])>,
    pub get_link_ksettings: Option<fn(&N, &mut LinkSettings) -> Result<()>>,
    pub set_link_ksettings: Option<fn(&mut N, &LinkSettings) -> Result<()>>,
    pub get_link: Option<fn(&N) -> bool>,
    pub get_ringparam: Option<fn(&N, &mut RingParam)>,
    pub set_ringparam: Option<fn(&mut N, &RingParam) -> Result<()>>,
    pub get_fecparam: Option<fn(&N, &mut FecParam) -> Result<()>>,
    pub set_fecparam: Option<fn(&mut N, &FecParam) -> Result<()>>,
    pub set_phys_id: Option<fn(&mut N, PhysIdState) -> Result<u32>>,
    pub get_ethtool_stats: Option<fn(&mut N, &mut [u64])>,
    pub get_rxnfc: Option<fn(&N, &mut RxNfc) -> Result<()>>,
    pub set_rxnfc: Option<fn(&mut N, &RxNfc) -> Result<()>>,
    pub reset: Option<fn(&mut N, &mut ResetFlags) -> Result<()>>,
    pub get_rxfh_indir_size: Option<fn(&N) -> u32>,
    pub get_rxfh_key_size: Option<fn(&N) -> u32>,
    pub get_rxfh: Option<fn(&N, &mut RxfhParam) -> Result<()>>,
    pub set_rxfh: Option<fn(&mut N, &RxfhParam) -> Result<()>>,
    pub get_module_info: Option<fn(&mut N, &mut ModuleInfo) -> Result<()>>,
    pub get_module_eeprom: Option<fn(&mut N, &mut ModuleEeprom) -> Result<()>>,
    pub get_channels: Option<fn(&N, &mut Channels)>,
    pub set_channels: Option<fn(&mut N, &Channels) -> Result<()>>,
}

impl<N> EthtoolOps<N> {
    /// Table with no operations.
    pub const EMPTY: Self = Self {
        cap_rss_ctx_supported: false,
        get_drvinfo: None,
        get_msglevel: None,
        set_msglevel: None,
        nway_reset: None,
        get_pauseparam: None,
        set_pauseparam: None,
        get_sset_count: None,
        get_priv_flags: None,
        set_priv_flags: None,
        self_test: None,
        get_strings: None,
        get_link_ksettings: None,
        set_link_ksettings: None,
        get_link: None,
        get_ringparam: None,
        set_ringparam: None,
        get_fecparam: None,
        set_fecparam: None,
        set_phys_id: None,
        get_ethtool_stats: None,
        get_rxnfc: None,
        set_rxnfc: None,
        reset: None,
        get_rxfh_indir_size: None,
        get_rxfh_key_size: None,
        get_rxfh: None,
        set_rxfh: None,
        get_module_info: None,
        get_module_eeprom: None,
        get_channels: None,
        set_channels: None,
    };
}

// Function pointers are Copy for any `N`; derive would demand `N: Copy`.
impl<N> Clone for EthtoolOps<N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for EthtoolOps<N> {}

/// Callbacks shared across controller generations.
pub mod common {
    use crate::nic::EfxNic;
    use crate::types::MsgLevel;

    /// Current diagnostic level.
    pub fn efx_ethtool_get_msglevel<N: EfxNic>(nic: &N) -> MsgLevel {
        nic.msg_enable()
    }

    /// Replace the diagnostic level. Unknown bits are stored as given.
    pub fn efx_ethtool_set_msglevel<N: EfxNic>(nic: &mut N, level: MsgLevel) {
        nic.set_msg_enable(level);
    }

    /// Link state as the stack sees it.
    pub fn ethtool_op_get_link<N: EfxNic>(nic: &N) -> bool {
        nic.carrier_ok()
    }
}
