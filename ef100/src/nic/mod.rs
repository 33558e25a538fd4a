//! Driver-instance surface consumed by the ethtool layer.
//!
//! The DMA queue engine, firmware command channel and probe code live in
//! the rest of the driver. The ethtool callbacks only see them through the
//! two traits here:
//!
//! - [`EfxNic`] - state and control the EF100 callbacks need directly
//! - [`EthtoolCommon`] - the shared ethtool callbacks the table delegates to
//!
//! [`Ef100Nic`] is a concrete instance built on a [`Platform`].

pub mod bitmap;
pub mod config;
pub mod ef100_nic;

#[cfg(test)]
pub(crate) mod testing;

pub use bitmap::RingSizeBitmap;
pub use config::Ef100Config;
pub use ef100_nic::{Ef100Nic, FwBundleVersion, Platform};

use crate::error::{EthtoolError, Result};
use crate::types::{
    Channels, DrvInfo, EthtoolStr, FecParam, LinkSettings, ModuleEeprom, ModuleInfo, MsgLevel,
    PauseParam, PhysIdState, ResetFlags, RxNfc, RxfhParam, SelfTestFlags, StringSet,
    ETHTOOL_FWVERS_LEN, ETH_GSTRING_LEN,
};

/// One statistics / self-test / private-flag name.
pub type GString = EthtoolStr<ETH_GSTRING_LEN>;

// ═══════════════════════════════════════════════════════════════════════════
// CORE DEVICE STATE
// ═══════════════════════════════════════════════════════════════════════════

/// Driver-instance state and control used by the EF100 callbacks.
///
/// Callers hold the device configuration lock; implementations need no
/// locking of their own.
pub trait EfxNic {
    /// Interface name used to prefix diagnostics.
    fn name(&self) -> &str;

    /// The device has been disabled after a fatal error.
    fn is_disabled(&self) -> bool;

    /// The interface is administratively up.
    fn is_running(&self) -> bool;

    /// Current RX ring size in descriptors.
    fn rxq_entries(&self) -> u32;

    /// Current TX ring size in descriptors.
    fn txq_entries(&self) -> u32;

    /// Store new ring sizes. Takes effect at the next datapath start.
    fn set_queue_entries(&mut self, rxq_entries: u32, txq_entries: u32);

    /// Ring sizes the hardware guarantees.
    fn guaranteed_bitmap(&self) -> RingSizeBitmap;

    /// Ring sizes the firmware accepts at all. Empty means ring sizes are fixed.
    fn supported_bitmap(&self) -> RingSizeBitmap;

    /// Number of contexts holding the device open (the stack counts as one).
    fn open_count(&self) -> u16;

    /// Stop the interface and tear down the datapath.
    fn dev_close(&mut self);

    /// Bring the interface up, building the datapath with the stored ring sizes.
    fn dev_open(&mut self) -> Result<()>;

    fn msg_enable(&self) -> MsgLevel;

    fn set_msg_enable(&mut self, level: MsgLevel);

    /// Fill driver name, version, MC firmware version and bus info.
    fn common_drvinfo(&self, info: &mut DrvInfo);

    /// Print the firmware bundle version into `buf`.
    ///
    /// Issues a firmware command, so it must not be called from interrupt
    /// context.
    fn fw_bundle_version(&mut self, buf: &mut EthtoolStr<ETHTOOL_FWVERS_LEN>) -> Result<()>;

    /// Running in atomic/interrupt context where firmware commands may not sleep.
    fn in_interrupt(&self) -> bool {
        false
    }

    /// Carrier (link) state.
    fn carrier_ok(&self) -> bool;

    /// Interface is up and the device is usable.
    fn is_up(&self) -> bool {
        !self.is_disabled() && self.is_running()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SHARED ETHTOOL CALLBACKS
// ═══════════════════════════════════════════════════════════════════════════

/// ethtool callbacks shared with the other controller generations.
///
/// Every method defaults to `NotSupported`; a driver overrides what its
/// hardware implements.
pub trait EthtoolCommon: EfxNic {
    fn nway_reset(&mut self) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn get_pauseparam(&self, _pause: &mut PauseParam) {}

    fn set_pauseparam(&mut self, _pause: &PauseParam) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    /// Number of strings in `set`.
    fn get_sset_count(&self, _set: StringSet) -> Result<usize> {
        Err(EthtoolError::NotSupported)
    }

    /// Names for `set`; `out` has `get_sset_count(set)` slots.
    fn get_strings(&self, _set: StringSet, _out: &mut [GString]) {}

    fn get_ethtool_stats(&mut self, _data: &mut [u64]) {}

    fn get_priv_flags(&self) -> u32 {
        0
    }

    fn set_priv_flags(&mut self, _flags: u32) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    /// Run the self tests, writing one result per test into `results`.
    fn self_test(&mut self, flags: &mut SelfTestFlags, _results: &mut [u64]) {
        flags.insert(SelfTestFlags::FAILED);
    }

    fn get_link_ksettings(&self, _settings: &mut LinkSettings) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn set_link_ksettings(&mut self, _settings: &LinkSettings) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn get_fecparam(&self, _fec: &mut FecParam) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn set_fecparam(&mut self, _fec: &FecParam) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    /// Drive the identify LED. `Active` may return a blink frequency in Hz.
    fn set_phys_id(&mut self, _state: PhysIdState) -> Result<u32> {
        Err(EthtoolError::NotSupported)
    }

    fn get_rxnfc(&self, _info: &mut RxNfc) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn set_rxnfc(&mut self, _info: &RxNfc) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    /// Reset the components in `flags`, clearing the bits of those reset.
    fn reset(&mut self, _flags: &mut ResetFlags) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn get_rxfh_indir_size(&self) -> u32 {
        0
    }

    fn get_rxfh_key_size(&self) -> u32 {
        0
    }

    fn get_rxfh(&self, _rxfh: &mut RxfhParam) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn set_rxfh(&mut self, _rxfh: &RxfhParam) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn get_module_info(&mut self, _info: &mut ModuleInfo) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn get_module_eeprom(&mut self, _eeprom: &mut ModuleEeprom) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    fn get_channels(&self, _channels: &mut Channels) {}

    fn set_channels(&mut self, _channels: &Channels) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }
}
