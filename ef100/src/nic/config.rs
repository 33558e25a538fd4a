//! EF100 driver-instance configuration.

use crate::types::MsgLevel;

use super::RingSizeBitmap;

/// Ring size used when nothing else has been requested.
pub const EFX_DEFAULT_DMAQ_SIZE: u32 = 1024;

/// Smallest ring the queue engine accepts.
pub const EFX_MIN_DMAQ_SIZE: u32 = 512;

/// Largest ring the QDMA engine supports.
pub const EF100_MAX_DMAQ_SIZE: u32 = 16384;

/// Driver short name reported through drvinfo.
pub const EFX_DRIVER_NAME: &str = "sfc";

/// Driver version reported through drvinfo.
pub const EFX_DRIVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration an [`Ef100Nic`](super::Ef100Nic) is probed with.
#[derive(Debug, Clone)]
pub struct Ef100Config {
    /// Interface name.
    pub name: &'static str,
    /// Driver name for drvinfo.
    pub driver_name: &'static str,
    /// Driver version for drvinfo.
    pub driver_version: &'static str,
    /// Bus address for drvinfo.
    pub bus_info: &'static str,
    /// Initial RX ring size.
    pub rxq_entries: u32,
    /// Initial TX ring size.
    pub txq_entries: u32,
    /// Ring sizes the hardware guarantees.
    pub guaranteed_bitmap: RingSizeBitmap,
    /// Ring sizes the firmware accepts; empty disables resizing.
    pub supported_bitmap: RingSizeBitmap,
    /// Number of RX/TX channel pairs.
    pub channels: u32,
    /// Upper bound for `channels`.
    pub max_channels: u32,
    /// Initial diagnostic level.
    pub msg_enable: MsgLevel,
}

impl Ef100Config {
    /// Configuration with resizing over the full QDMA range.
    pub const fn new(name: &'static str, bus_info: &'static str) -> Self {
        Self {
            name,
            driver_name: EFX_DRIVER_NAME,
            driver_version: EFX_DRIVER_VERSION,
            bus_info,
            rxq_entries: EFX_DEFAULT_DMAQ_SIZE,
            txq_entries: EFX_DEFAULT_DMAQ_SIZE,
            guaranteed_bitmap: RingSizeBitmap::range(EFX_MIN_DMAQ_SIZE, EF100_MAX_DMAQ_SIZE),
            supported_bitmap: RingSizeBitmap::range(EFX_MIN_DMAQ_SIZE, EF100_MAX_DMAQ_SIZE),
            channels: 1,
            max_channels: 32,
            msg_enable: MsgLevel::DEFAULT,
        }
    }

    /// Firmware without ring-size negotiation: sizes are fixed at the default.
    pub const fn fixed_rings(name: &'static str, bus_info: &'static str) -> Self {
        let mut config = Self::new(name, bus_info);
        config.guaranteed_bitmap = RingSizeBitmap::from_sizes(&[EFX_DEFAULT_DMAQ_SIZE]);
        config.supported_bitmap = RingSizeBitmap::EMPTY;
        config
    }

    pub const fn with_ring_bitmaps(
        mut self,
        guaranteed: RingSizeBitmap,
        supported: RingSizeBitmap,
    ) -> Self {
        self.guaranteed_bitmap = guaranteed;
        self.supported_bitmap = supported;
        self
    }

    pub const fn with_entries(mut self, rxq_entries: u32, txq_entries: u32) -> Self {
        self.rxq_entries = rxq_entries;
        self.txq_entries = txq_entries;
        self
    }

    pub const fn with_channels(mut self, channels: u32) -> Self {
        self.channels = channels;
        self
    }

    pub const fn with_msg_enable(mut self, level: MsgLevel) -> Self {
        self.msg_enable = level;
        self
    }
}

impl Default for Ef100Config {
    fn default() -> Self {
        Self::new("eth0", "0000:00:00.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entries_are_guaranteed() {
        let config = Ef100Config::default();
        assert!(config.guaranteed_bitmap.contains(config.rxq_entries));
        assert!(config.guaranteed_bitmap.contains(config.txq_entries));
        assert!(!config.supported_bitmap.is_empty());
    }

    #[test]
    fn test_fixed_rings() {
        let config = Ef100Config::fixed_rings("eth1", "0000:01:00.0");
        assert!(config.supported_bitmap.is_empty());
        assert_eq!(config.guaranteed_bitmap.max_size_within(EF100_MAX_DMAQ_SIZE), 1024);
    }
}
