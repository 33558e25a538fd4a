//! Recording platform shared by the unit tests.

use crate::error::{errno, EthtoolError, Result};

use super::{Ef100Config, Ef100Nic, FwBundleVersion, Platform, RingSizeBitmap};

pub(crate) struct TestPlatform {
    pub starts: u32,
    pub stops: u32,
    /// Arguments of the most recent `start_datapath`.
    pub last_start: Option<(u32, u32, u32)>,
    /// Fail the next starts with this errno.
    pub fail_start: Option<i32>,
    pub bundle: Option<FwBundleVersion>,
    pub link: bool,
    pub interrupt: bool,
}

impl TestPlatform {
    pub const STATS: &'static [&'static str] = &["rx_packets", "tx_packets", "rx_dropped"];

    pub fn new() -> Self {
        Self {
            starts: 0,
            stops: 0,
            last_start: None,
            fail_start: None,
            bundle: Some(FwBundleVersion::new(1, 14, 3, 7)),
            link: true,
            interrupt: false,
        }
    }
}

impl Platform for TestPlatform {
    fn start_datapath(&mut self, rxq_entries: u32, txq_entries: u32, channels: u32) -> Result<()> {
        if let Some(code) = self.fail_start {
            return Err(EthtoolError::Io(code));
        }
        self.starts += 1;
        self.last_start = Some((rxq_entries, txq_entries, channels));
        Ok(())
    }

    fn stop_datapath(&mut self) {
        self.stops += 1;
    }

    fn mc_fw_version(&self) -> FwBundleVersion {
        FwBundleVersion::new(8, 2, 1, 1000)
    }

    fn fw_bundle_version(&mut self) -> Result<FwBundleVersion> {
        self.bundle.ok_or(EthtoolError::Io(errno::EIO))
    }

    fn link_up(&self) -> bool {
        self.link
    }

    fn link_speed(&self) -> Option<u32> {
        Some(100_000)
    }

    fn stat_names(&self) -> &'static [&'static str] {
        Self::STATS
    }

    fn read_stats(&mut self, data: &mut [u64]) {
        for (slot, value) in data.iter_mut().zip([10u64, 20, 1]) {
            *slot = value;
        }
    }

    fn in_interrupt(&self) -> bool {
        self.interrupt
    }
}

/// Ring sizes {256, 1024, 4096}, resizing supported.
pub(crate) fn scenario_bitmap() -> RingSizeBitmap {
    RingSizeBitmap::from_sizes(&[256, 1024, 4096])
}

/// Down interface with the default configuration.
pub(crate) fn test_nic() -> Ef100Nic<TestPlatform> {
    Ef100Nic::new(Ef100Config::new("eth0", "0000:03:00.0"), TestPlatform::new())
}

/// Down interface with the given bitmaps and 1024-entry rings.
pub(crate) fn nic_with_bitmaps(
    guaranteed: RingSizeBitmap,
    supported: RingSizeBitmap,
) -> Ef100Nic<TestPlatform> {
    let config = Ef100Config::new("eth0", "0000:03:00.0")
        .with_ring_bitmaps(guaranteed, supported)
        .with_entries(1024, 1024);
    Ef100Nic::new(config, TestPlatform::new())
}
