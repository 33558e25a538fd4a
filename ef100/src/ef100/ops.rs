//! EF100 ethtool operations table.

use crate::nic::EthtoolCommon;
use crate::ops::{common, EthtoolOps};

use super::drvinfo::ef100_get_drvinfo;
use super::ringparam::{ef100_get_ringparam, ef100_set_ringparam};

/// Build the EF100 table for driver type `N`.
///
/// ```ignore
/// static EF100_ETHTOOL_OPS: EthtoolOps<Ef100Nic<Board>> = ef100_ethtool_ops();
/// ```
pub const fn ef100_ethtool_ops<N: EthtoolCommon>() -> EthtoolOps<N> {
    EthtoolOps {
        cap_rss_ctx_supported: true,
        get_drvinfo: Some(ef100_get_drvinfo::<N>),
        get_msglevel: Some(common::efx_ethtool_get_msglevel::<N>),
        set_msglevel: Some(common::efx_ethtool_set_msglevel::<N>),
        nway_reset: Some(<N as EthtoolCommon>::nway_reset),
        get_pauseparam: Some(<N as EthtoolCommon>::get_pauseparam),
        set_pauseparam: Some(<N as EthtoolCommon>::set_pauseparam),
        get_sset_count: Some(<N as EthtoolCommon>::get_sset_count),
        get_priv_flags: Some(<N as EthtoolCommon>::get_priv_flags),
        set_priv_flags: Some(<N as EthtoolCommon>::set_priv_flags),
        self_test: Some(<N as EthtoolCommon>::self_test),
        get_strings: Some(<N as EthtoolCommon>::get_strings),
        get_link_ksettings: Some(<N as EthtoolCommon>::get_link_ksettings),
        set_link_ksettings: Some(<N as EthtoolCommon>::set_link_ksettings),
        get_link: Some(common::ethtool_op_get_link::<N>),
        get_ringparam: Some(ef100_get_ringparam::<N>),
        set_ringparam: Some(ef100_set_ringparam::<N>),
        get_fecparam: Some(<N as EthtoolCommon>::get_fecparam),
        set_fecparam: Some(<N as EthtoolCommon>::set_fecparam),
        set_phys_id: Some(<N as EthtoolCommon>::set_phys_id),
        get_ethtool_stats: Some(<N as EthtoolCommon>::get_ethtool_stats),
        get_rxnfc: Some(<N as EthtoolCommon>::get_rxnfc),
        set_rxnfc: Some(<N as EthtoolCommon>::set_rxnfc),
        reset: Some(<N as EthtoolCommon>::reset),
        get_rxfh_indir_size: Some(<N as EthtoolCommon>::get_rxfh_indir_size),
        get_rxfh_key_size: Some(<N as EthtoolCommon>::get_rxfh_key_size),
        get_rxfh: Some(<N as EthtoolCommon>::get_rxfh),
        set_rxfh: Some(<N as EthtoolCommon>::set_rxfh),
        get_module_info: Some(<N as EthtoolCommon>::get_module_info),
        get_module_eeprom: Some(<N as EthtoolCommon>::get_module_eeprom),
        get_channels: Some(<N as EthtoolCommon>::get_channels),
        set_channels: Some(<N as EthtoolCommon>::set_channels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EthtoolError;
    use crate::nic::testing::{test_nic, TestPlatform};
    use crate::nic::{Ef100Nic, EfxNic};
    use crate::types::{DrvInfo, MsgLevel, RingParam};

    static OPS: EthtoolOps<Ef100Nic<TestPlatform>> = ef100_ethtool_ops();

    #[test]
    fn test_table_wires_ef100_callbacks() {
        assert!(OPS.cap_rss_ctx_supported);

        let mut nic = test_nic();
        let mut info = DrvInfo::default();
        (OPS.get_drvinfo.unwrap())(&mut nic, &mut info);
        assert_eq!(info.fw_version, "1.14.3.7");

        let mut ring = RingParam::default();
        (OPS.get_ringparam.unwrap())(&nic, &mut ring);
        assert_eq!(ring.rx_max_pending, 16384);

        (OPS.set_ringparam.unwrap())(&mut nic, &RingParam::pending(2048, 512)).unwrap();
        assert_eq!((nic.rxq_entries(), nic.txq_entries()), (2048, 512));
    }

    #[test]
    fn test_table_wires_common_callbacks() {
        let mut nic = test_nic();
        (OPS.set_msglevel.unwrap())(&mut nic, MsgLevel::HW);
        assert_eq!((OPS.get_msglevel.unwrap())(&nic), MsgLevel::HW);
        assert!(!(OPS.get_link.unwrap())(&nic));

        // Not implemented by this device: falls back to the trait default.
        let mut fec = Default::default();
        assert_eq!(
            (OPS.get_fecparam.unwrap())(&nic, &mut fec),
            Err(EthtoolError::NotSupported)
        );
        assert_eq!((OPS.get_rxfh_key_size.unwrap())(&nic), 0);
    }
}
