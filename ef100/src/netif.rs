//! Per-interface diagnostics.
//!
//! Messages go to the `log` facade prefixed with the interface name, and
//! only when the matching bit of the device message level is set, the way
//! the `netif_err()`/`netif_info()` family filters on `msg_enable`.

use crate::nic::EfxNic;
use crate::types::MsgLevel;

/// Target every message from this crate is logged under.
pub const LOG_TARGET: &str = "ef100";

/// Whether messages of category `level` are enabled on `nic`.
#[inline]
pub fn msg_enabled<N: EfxNic + ?Sized>(nic: &N, level: MsgLevel) -> bool {
    nic.msg_enable().intersects(level)
}

/// Error-level diagnostic, e.g. `netif_err!(nic, MsgLevel::DRV, "bad size {}", n)`.
macro_rules! netif_err {
    ($nic:expr, $level:expr, $($arg:tt)+) => {{
        let nic = &*$nic;
        if $crate::netif::msg_enabled(nic, $level) {
            ::log::error!(
                target: $crate::netif::LOG_TARGET,
                "{}: {}",
                $crate::nic::EfxNic::name(nic),
                format_args!($($arg)+)
            );
        }
    }};
}

macro_rules! netif_warn {
    ($nic:expr, $level:expr, $($arg:tt)+) => {{
        let nic = &*$nic;
        if $crate::netif::msg_enabled(nic, $level) {
            ::log::warn!(
                target: $crate::netif::LOG_TARGET,
                "{}: {}",
                $crate::nic::EfxNic::name(nic),
                format_args!($($arg)+)
            );
        }
    }};
}

macro_rules! netif_info {
    ($nic:expr, $level:expr, $($arg:tt)+) => {{
        let nic = &*$nic;
        if $crate::netif::msg_enabled(nic, $level) {
            ::log::info!(
                target: $crate::netif::LOG_TARGET,
                "{}: {}",
                $crate::nic::EfxNic::name(nic),
                format_args!($($arg)+)
            );
        }
    }};
}

pub(crate) use netif_err;
pub(crate) use netif_info;
pub(crate) use netif_warn;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nic::testing::test_nic;

    #[test]
    fn test_msg_enabled_follows_level() {
        let mut nic = test_nic();
        assert!(msg_enabled(&nic, MsgLevel::DRV));

        nic.set_msg_enable(MsgLevel::LINK);
        assert!(!msg_enabled(&nic, MsgLevel::DRV));
        assert!(msg_enabled(&nic, MsgLevel::LINK | MsgLevel::DRV));

        // Suppressed messages must still expand and type-check.
        netif_err!(&nic, MsgLevel::DRV, "suppressed {}", 1);
    }
}
