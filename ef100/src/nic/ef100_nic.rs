//! EF100 driver instance.
//!
//! Holds the per-device state the ethtool layer reads and writes, and
//! drives the hardware through a [`Platform`].
//!
//! # Open count
//! The network stack holds one reference while the interface is up.
//! Additional clients (driverlink users) attach on top of that; ring
//! resizing is refused while any of them is attached.

use core::fmt::{self, Write};

use crate::error::{errno, EthtoolError, Result};
use crate::netif::{netif_err, netif_info, netif_warn};
use crate::types::{
    Channels, DrvInfo, Duplex, EthtoolStr, LinkSettings, MsgLevel, PauseParam, StringSet,
    ETHTOOL_FWVERS_LEN,
};

use super::{EfxNic, Ef100Config, EthtoolCommon, GString, RingSizeBitmap};

// ═══════════════════════════════════════════════════════════════════════════
// FIRMWARE VERSION
// ═══════════════════════════════════════════════════════════════════════════

/// Four-part firmware version as reported by the MC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FwBundleVersion(pub [u16; 4]);

impl FwBundleVersion {
    pub const fn new(a: u16, b: u16, c: u16, d: u16) -> Self {
        Self([a, b, c, d])
    }
}

impl fmt::Display for FwBundleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PLATFORM
// ═══════════════════════════════════════════════════════════════════════════

/// Hardware side of the driver: queue engine, MC command channel and PHY.
pub trait Platform {
    /// Create the queues with the given sizes and start the datapath.
    fn start_datapath(&mut self, rxq_entries: u32, txq_entries: u32, channels: u32) -> Result<()>;

    /// Flush and free all queues.
    fn stop_datapath(&mut self);

    /// Version of the running MC firmware, read at probe time.
    fn mc_fw_version(&self) -> FwBundleVersion;

    /// Query the firmware bundle version over MCDI (NVRAM metadata).
    fn fw_bundle_version(&mut self) -> Result<FwBundleVersion>;

    fn link_up(&self) -> bool;

    /// Link speed in Mb/s while the link is up.
    fn link_speed(&self) -> Option<u32> {
        None
    }

    /// Restart autonegotiation.
    fn restart_autoneg(&mut self) -> Result<()> {
        Err(EthtoolError::NotSupported)
    }

    /// Names of the hardware statistics, in `read_stats` order.
    fn stat_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Read the hardware statistics into `data`.
    fn read_stats(&mut self, _data: &mut [u64]) {}

    /// Caller is in atomic context.
    fn in_interrupt(&self) -> bool {
        false
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// DRIVER INSTANCE
// ═══════════════════════════════════════════════════════════════════════════

/// EF100 network interface.
pub struct Ef100Nic<P: Platform> {
    config: Ef100Config,
    platform: P,
    rxq_entries: u32,
    txq_entries: u32,
    channels: u32,
    pause: PauseParam,
    msg_enable: MsgLevel,
    /// Interface is administratively up.
    running: bool,
    /// Device disabled after a fatal error.
    disabled: bool,
    open_count: u16,
}

impl<P: Platform> Ef100Nic<P> {
    /// Probe a new interface. The interface starts down.
    pub fn new(config: Ef100Config, platform: P) -> Self {
        Self {
            rxq_entries: config.rxq_entries,
            txq_entries: config.txq_entries,
            channels: config.channels,
            msg_enable: config.msg_enable,
            pause: PauseParam {
                autoneg: true,
                rx_pause: true,
                tx_pause: true,
            },
            running: false,
            disabled: false,
            open_count: 0,
            config,
            platform,
        }
    }

    pub fn config(&self) -> &Ef100Config {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Mark the device unusable after a fatal hardware error.
    pub fn disable(&mut self) {
        netif_err!(self, MsgLevel::DRV, "disabling device after fatal error");
        self.disabled = true;
    }

    /// A driverlink client takes a reference on the device.
    pub fn attach_client(&mut self) {
        self.open_count = self.open_count.saturating_add(1);
    }

    /// A driverlink client drops its reference.
    pub fn detach_client(&mut self) {
        let attached = self.open_count - u16::from(self.running);
        if attached == 0 {
            netif_warn!(self, MsgLevel::DRV, "client detach with no clients attached");
            return;
        }
        self.open_count -= 1;
    }

    /// Tear down and rebuild the datapath if the interface is up.
    fn reconfigure(&mut self) -> Result<()> {
        if !self.is_up() {
            return Ok(());
        }
        self.dev_close();
        self.dev_open()
    }
}

impl<P: Platform> EfxNic for Ef100Nic<P> {
    fn name(&self) -> &str {
        self.config.name
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn rxq_entries(&self) -> u32 {
        self.rxq_entries
    }

    fn txq_entries(&self) -> u32 {
        self.txq_entries
    }

    fn set_queue_entries(&mut self, rxq_entries: u32, txq_entries: u32) {
        self.rxq_entries = rxq_entries;
        self.txq_entries = txq_entries;
    }

    fn guaranteed_bitmap(&self) -> RingSizeBitmap {
        self.config.guaranteed_bitmap
    }

    fn supported_bitmap(&self) -> RingSizeBitmap {
        self.config.supported_bitmap
    }

    fn open_count(&self) -> u16 {
        self.open_count
    }

    fn dev_close(&mut self) {
        if !self.running {
            return;
        }
        self.platform.stop_datapath();
        self.running = false;
        self.open_count = self.open_count.saturating_sub(1);
        netif_info!(self, MsgLevel::IFDOWN, "interface down");
    }

    fn dev_open(&mut self) -> Result<()> {
        if self.running {
            return Ok(());
        }
        if self.disabled {
            return Err(EthtoolError::Io(errno::EIO));
        }
        if let Err(e) = self
            .platform
            .start_datapath(self.rxq_entries, self.txq_entries, self.channels)
        {
            netif_err!(self, MsgLevel::IFUP, "failed to start datapath: {}", e);
            return Err(e);
        }
        self.running = true;
        self.open_count = self.open_count.saturating_add(1);
        netif_info!(
            self,
            MsgLevel::IFUP,
            "interface up, rx ring {} tx ring {}",
            self.rxq_entries,
            self.txq_entries
        );
        Ok(())
    }

    fn msg_enable(&self) -> MsgLevel {
        self.msg_enable
    }

    fn set_msg_enable(&mut self, level: MsgLevel) {
        self.msg_enable = level;
    }

    fn common_drvinfo(&self, info: &mut DrvInfo) {
        info.driver.set(self.config.driver_name);
        info.version.set(self.config.driver_version);
        info.fw_version.clear();
        // EthtoolStr never fails a write; overflow is truncated.
        let _ = write!(info.fw_version, "{}", self.platform.mc_fw_version());
        info.bus_info.set(self.config.bus_info);
    }

    fn fw_bundle_version(&mut self, buf: &mut EthtoolStr<ETHTOOL_FWVERS_LEN>) -> Result<()> {
        buf.clear();
        let version = self.platform.fw_bundle_version()?;
        let _ = write!(buf, "{}", version);
        Ok(())
    }

    fn in_interrupt(&self) -> bool {
        self.platform.in_interrupt()
    }

    fn carrier_ok(&self) -> bool {
        self.running && self.platform.link_up()
    }
}

impl<P: Platform> EthtoolCommon for Ef100Nic<P> {
    fn nway_reset(&mut self) -> Result<()> {
        self.platform.restart_autoneg()
    }

    fn get_pauseparam(&self, pause: &mut PauseParam) {
        *pause = self.pause;
    }

    fn set_pauseparam(&mut self, pause: &PauseParam) -> Result<()> {
        if pause.tx_pause && !pause.rx_pause {
            // Asymmetric TX-only pause is not advertised by the MAC.
            return Err(EthtoolError::InvalidArgument);
        }
        self.pause = *pause;
        Ok(())
    }

    fn get_sset_count(&self, set: StringSet) -> Result<usize> {
        match set {
            StringSet::Stats => Ok(self.platform.stat_names().len()),
            StringSet::Test | StringSet::PrivFlags => Err(EthtoolError::NotSupported),
        }
    }

    fn get_strings(&self, set: StringSet, out: &mut [GString]) {
        if set != StringSet::Stats {
            return;
        }
        for (slot, name) in out.iter_mut().zip(self.platform.stat_names()) {
            slot.set(name);
        }
    }

    fn get_ethtool_stats(&mut self, data: &mut [u64]) {
        self.platform.read_stats(data);
    }

    fn get_link_ksettings(&self, settings: &mut LinkSettings) -> Result<()> {
        let up = self.carrier_ok();
        settings.speed = if up { self.platform.link_speed() } else { None };
        settings.duplex = if up { Duplex::Full } else { Duplex::Unknown };
        settings.autoneg = self.pause.autoneg;
        Ok(())
    }

    fn get_channels(&self, channels: &mut Channels) {
        *channels = Channels {
            max_combined: self.config.max_channels,
            combined_count: self.channels,
            ..Channels::default()
        };
    }

    fn set_channels(&mut self, channels: &Channels) -> Result<()> {
        if channels.rx_count != 0 || channels.tx_count != 0 || channels.other_count != 0 {
            return Err(EthtoolError::InvalidArgument);
        }
        if channels.combined_count == 0 || channels.combined_count > self.config.max_channels {
            return Err(EthtoolError::InvalidArgument);
        }
        if channels.combined_count == self.channels {
            return Ok(());
        }
        self.channels = channels.combined_count;
        self.reconfigure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nic::testing::{test_nic, TestPlatform};

    #[test]
    fn test_open_close_tracks_open_count() {
        let mut nic = test_nic();
        assert!(!nic.is_running());
        assert_eq!(nic.open_count(), 0);

        nic.dev_open().unwrap();
        assert!(nic.is_up());
        assert_eq!(nic.open_count(), 1);
        assert_eq!(nic.platform().starts, 1);

        // Opening twice is a no-op.
        nic.dev_open().unwrap();
        assert_eq!(nic.open_count(), 1);
        assert_eq!(nic.platform().starts, 1);

        nic.dev_close();
        assert!(!nic.is_running());
        assert_eq!(nic.open_count(), 0);
        assert_eq!(nic.platform().stops, 1);
    }

    #[test]
    fn test_open_failure_leaves_interface_down() {
        let mut nic = test_nic();
        nic.platform_mut().fail_start = Some(errno::ENOMEM);
        assert_eq!(nic.dev_open(), Err(EthtoolError::Io(errno::ENOMEM)));
        assert!(!nic.is_running());
        assert_eq!(nic.open_count(), 0);
    }

    #[test]
    fn test_disabled_device_refuses_open() {
        let mut nic = test_nic();
        nic.disable();
        assert_eq!(nic.dev_open(), Err(EthtoolError::Io(errno::EIO)));
        assert!(!nic.is_up());
    }

    #[test]
    fn test_clients_count_towards_open_count() {
        let mut nic = test_nic();
        nic.dev_open().unwrap();
        nic.attach_client();
        assert_eq!(nic.open_count(), 2);
        nic.detach_client();
        assert_eq!(nic.open_count(), 1);

        // The stack's own reference is not a client.
        nic.detach_client();
        assert_eq!(nic.open_count(), 1);
    }

    #[test]
    fn test_common_drvinfo() {
        let nic = test_nic();
        let mut info = DrvInfo::default();
        nic.common_drvinfo(&mut info);
        assert_eq!(info.driver, "sfc");
        assert_eq!(info.fw_version, "8.2.1.1000");
        assert_eq!(info.bus_info, "0000:03:00.0");
    }

    #[test]
    fn test_fw_bundle_version_failure_clears_buffer() {
        let mut nic = test_nic();
        nic.platform_mut().bundle = None;
        let mut buf = EthtoolStr::from_str_truncate("stale");
        assert!(nic.fw_bundle_version(&mut buf).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_carrier_requires_running() {
        let mut nic = test_nic();
        assert!(!nic.carrier_ok());
        nic.dev_open().unwrap();
        assert!(nic.carrier_ok());
        nic.platform_mut().link = false;
        assert!(!nic.carrier_ok());
    }

    #[test]
    fn test_set_channels_restarts_when_up() {
        let mut nic = test_nic();
        nic.dev_open().unwrap();

        let request = Channels {
            combined_count: 4,
            ..Channels::default()
        };
        nic.set_channels(&request).unwrap();
        assert_eq!(nic.channels(), 4);
        assert_eq!(nic.platform().starts, 2);
        assert_eq!(nic.platform().last_start, Some((1024, 1024, 4)));

        let bad = Channels {
            rx_count: 1,
            combined_count: 4,
            ..Channels::default()
        };
        assert_eq!(nic.set_channels(&bad), Err(EthtoolError::InvalidArgument));
    }

    #[test]
    fn test_stats_strings_and_values() {
        let mut nic = test_nic();
        assert_eq!(nic.get_sset_count(StringSet::Stats), Ok(TestPlatform::STATS.len()));
        assert_eq!(nic.get_sset_count(StringSet::Test), Err(EthtoolError::NotSupported));

        let mut names = [GString::new(); 3];
        nic.get_strings(StringSet::Stats, &mut names);
        assert_eq!(names[0], "rx_packets");
        assert_eq!(names[2], "rx_dropped");

        let mut data = [0u64; 3];
        nic.get_ethtool_stats(&mut data);
        assert_eq!(data, [10, 20, 1]);
    }

    #[test]
    fn test_pauseparam() {
        let mut nic = test_nic();
        let mut pause = PauseParam::default();
        nic.get_pauseparam(&mut pause);
        assert!(pause.rx_pause && pause.tx_pause);

        let tx_only = PauseParam {
            autoneg: false,
            rx_pause: false,
            tx_pause: true,
        };
        assert_eq!(nic.set_pauseparam(&tx_only), Err(EthtoolError::InvalidArgument));
    }
}
