//! Message level (`NETIF_MSG_*`).

use bitflags::bitflags;

bitflags! {
    /// Per-device diagnostic categories, as set by `ethtool -s <if> msglvl`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MsgLevel: u32 {
        const DRV       = 0x0001;
        const PROBE     = 0x0002;
        const LINK      = 0x0004;
        const TIMER     = 0x0008;
        const IFDOWN    = 0x0010;
        const IFUP      = 0x0020;
        const RX_ERR    = 0x0040;
        const TX_ERR    = 0x0080;
        const TX_QUEUED = 0x0100;
        const INTR      = 0x0200;
        const TX_DONE   = 0x0400;
        const RX_STATUS = 0x0800;
        const PKTDATA   = 0x1000;
        const HW        = 0x2000;
        const WOL       = 0x4000;
    }
}

impl MsgLevel {
    /// Level a freshly probed interface starts with.
    pub const DEFAULT: Self = Self::DRV
        .union(Self::PROBE)
        .union(Self::LINK)
        .union(Self::IFDOWN)
        .union(Self::IFUP)
        .union(Self::RX_ERR)
        .union(Self::TX_ERR)
        .union(Self::HW);
}

impl Default for MsgLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_bits_are_kept() {
        // ethtool passes the raw word through; drivers store it untouched.
        let level = MsgLevel::from_bits_retain(0x8001);
        assert!(level.contains(MsgLevel::DRV));
        assert_eq!(level.bits(), 0x8001);
    }

    #[test]
    fn test_default_includes_drv() {
        assert!(MsgLevel::default().contains(MsgLevel::DRV));
        assert!(!MsgLevel::default().contains(MsgLevel::PKTDATA));
    }
}
