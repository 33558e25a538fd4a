//! Network device handle and ethtool request dispatch.
//!
//! [`NetDevice`] pairs a driver instance with its [`EthtoolOps`] table and
//! plays the part of the ethtool core: it takes the device lock, checks
//! that the operation exists, applies the generic request checks and then
//! calls the driver.
//!
//! # Request checks
//! - Missing table entry: `NotSupported`
//! - Ring sizes above the advertised maximum: `InvalidArgument`
//! - Channel counts above the advertised maximum: `InvalidArgument`
//! - Module EEPROM reads past the end of the EEPROM: `InvalidArgument`
//! - RSS table or key of the wrong length: `InvalidArgument`

use alloc::vec;
use alloc::vec::Vec;

use spin::{Mutex, MutexGuard};

use crate::error::{EthtoolError, Result};
use crate::netif::LOG_TARGET;
use crate::nic::{EfxNic, GString};
use crate::ops::EthtoolOps;
use crate::types::{
    Channels, DrvInfo, FecParam, LinkSettings, ModuleEeprom, ModuleInfo, MsgLevel, PauseParam,
    PhysIdState, ResetFlags, RingParam, RingParamRequest, RxNfc, RxfhParam, SelfTestFlags,
    StringSet,
};

// ═══════════════════════════════════════════════════════════════════════════
// REQUESTS
// ═══════════════════════════════════════════════════════════════════════════

/// ethtool request as received from userspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EthtoolRequest {
    GetDrvInfo,
    GetMsgLevel,
    SetMsgLevel(MsgLevel),
    NwayReset,
    GetPauseParam,
    SetPauseParam(PauseParam),
    GetStrings(StringSet),
    GetStats,
    GetPrivFlags,
    SetPrivFlags(u32),
    SelfTest(SelfTestFlags),
    GetLinkSettings,
    SetLinkSettings(LinkSettings),
    GetLink,
    GetRingParam,
    SetRingParam(RingParamRequest),
    GetFecParam,
    SetFecParam(FecParam),
    SetPhysId(PhysIdState),
    GetRxNfc(RxNfc),
    SetRxNfc(RxNfc),
    Reset(ResetFlags),
    GetRxfh,
    SetRxfh(RxfhParam),
    GetModuleInfo,
    GetModuleEeprom { offset: u32, len: u32 },
    GetChannels,
    SetChannels(Channels),
}

impl EthtoolRequest {
    /// Command name as printed by the ethtool utility.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetDrvInfo => "GDRVINFO",
            Self::GetMsgLevel => "GMSGLVL",
            Self::SetMsgLevel(_) => "SMSGLVL",
            Self::NwayReset => "NWAY_RST",
            Self::GetPauseParam => "GPAUSEPARAM",
            Self::SetPauseParam(_) => "SPAUSEPARAM",
            Self::GetStrings(_) => "GSTRINGS",
            Self::GetStats => "GSTATS",
            Self::GetPrivFlags => "GPFLAGS",
            Self::SetPrivFlags(_) => "SPFLAGS",
            Self::SelfTest(_) => "TEST",
            Self::GetLinkSettings => "GLINKSETTINGS",
            Self::SetLinkSettings(_) => "SLINKSETTINGS",
            Self::GetLink => "GLINK",
            Self::GetRingParam => "GRINGPARAM",
            Self::SetRingParam(_) => "SRINGPARAM",
            Self::GetFecParam => "GFECPARAM",
            Self::SetFecParam(_) => "SFECPARAM",
            Self::SetPhysId(_) => "PHYS_ID",
            Self::GetRxNfc(_) => "GRXCLSRULE",
            Self::SetRxNfc(_) => "SRXCLSRLINS",
            Self::Reset(_) => "RESET",
            Self::GetRxfh => "GRSSH",
            Self::SetRxfh(_) => "SRSSH",
            Self::GetModuleInfo => "GMODULEINFO",
            Self::GetModuleEeprom { .. } => "GMODULEEEPROM",
            Self::GetChannels => "GCHANNELS",
            Self::SetChannels(_) => "SCHANNELS",
        }
    }
}

/// Reply to an [`EthtoolRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EthtoolReply {
    /// Set-type request completed.
    Done,
    DrvInfo(DrvInfo),
    MsgLevel(MsgLevel),
    PauseParam(PauseParam),
    Strings(Vec<GString>),
    Stats(Vec<u64>),
    PrivFlags(u32),
    SelfTest { flags: SelfTestFlags, results: Vec<u64> },
    LinkSettings(LinkSettings),
    Link(bool),
    RingParam(RingParam),
    FecParam(FecParam),
    /// Blink frequency requested by the driver for `PhysIdState::Active`.
    PhysId(u32),
    RxNfc(RxNfc),
    /// Components the driver did not reset.
    Reset(ResetFlags),
    Rxfh(RxfhParam),
    ModuleInfo(ModuleInfo),
    ModuleEeprom(ModuleEeprom),
    Channels(Channels),
}

// ═══════════════════════════════════════════════════════════════════════════
// DEVICE
// ═══════════════════════════════════════════════════════════════════════════

/// A registered network device.
pub struct NetDevice<N> {
    nic: Mutex<N>,
    ops: EthtoolOps<N>,
}

impl<N: EfxNic> NetDevice<N> {
    pub fn new(nic: N, ops: EthtoolOps<N>) -> Self {
        Self {
            nic: Mutex::new(nic),
            ops,
        }
    }

    pub fn ops(&self) -> &EthtoolOps<N> {
        &self.ops
    }

    /// Take the device configuration lock.
    pub fn lock(&self) -> MutexGuard<'_, N> {
        self.nic.lock()
    }

    /// Bring the interface up.
    pub fn open(&self) -> Result<()> {
        self.nic.lock().dev_open()
    }

    /// Take the interface down.
    pub fn close(&self) {
        self.nic.lock().dev_close()
    }

    pub fn into_inner(self) -> N {
        self.nic.into_inner()
    }

    /// Handle one ethtool request with the device lock held.
    pub fn ethtool(&self, request: EthtoolRequest) -> Result<EthtoolReply> {
        let mut nic = self.nic.lock();
        log::trace!(target: LOG_TARGET, "{}: ethtool {}", nic.name(), request.name());

        let result = self.dispatch(&mut nic, request);
        if let Err(e) = &result {
            log::debug!(target: LOG_TARGET, "{}: ethtool request failed: {}", nic.name(), e);
        }
        result
    }

    fn dispatch(&self, nic: &mut N, request: EthtoolRequest) -> Result<EthtoolReply> {
        let ops = &self.ops;
        match request {
            EthtoolRequest::GetDrvInfo => {
                let get_drvinfo = op(ops.get_drvinfo)?;
                let mut info = DrvInfo::default();
                get_drvinfo(nic, &mut info);
                if let Some(count) = ops.get_sset_count {
                    info.n_stats = count(nic, StringSet::Stats).unwrap_or(0) as u32;
                    info.testinfo_len = count(nic, StringSet::Test).unwrap_or(0) as u32;
                    info.n_priv_flags = count(nic, StringSet::PrivFlags).unwrap_or(0) as u32;
                }
                Ok(EthtoolReply::DrvInfo(info))
            }
            EthtoolRequest::GetMsgLevel => {
                let get = op(ops.get_msglevel)?;
                Ok(EthtoolReply::MsgLevel(get(nic)))
            }
            EthtoolRequest::SetMsgLevel(level) => {
                let set = op(ops.set_msglevel)?;
                set(nic, level);
                Ok(EthtoolReply::Done)
            }
            EthtoolRequest::NwayReset => {
                op(ops.nway_reset)?(nic)?;
                Ok(EthtoolReply::Done)
            }
            EthtoolRequest::GetPauseParam => {
                let get = op(ops.get_pauseparam)?;
                let mut pause = PauseParam::default();
                get(nic, &mut pause);
                Ok(EthtoolReply::PauseParam(pause))
            }
            EthtoolRequest::SetPauseParam(pause) => {
                op(ops.set_pauseparam)?(nic, &pause)?;
                Ok(EthtoolReply::Done)
            }
            EthtoolRequest::GetStrings(set) => {
                let get_strings = op(ops.get_strings)?;
                let count = op(ops.get_sset_count)?(nic, set)?;
                let mut strings = vec![GString::new(); count];
                get_strings(nic, set, &mut strings);
                Ok(EthtoolReply::Strings(strings))
            }
            EthtoolRequest::GetStats => {
                let get_stats = op(ops.get_ethtool_stats)?;
                let count = op(ops.get_sset_count)?(nic, StringSet::Stats)?;
                let mut data = vec![0u64; count];
                get_stats(nic, &mut data);
                Ok(EthtoolReply::Stats(data))
            }
            EthtoolRequest::GetPrivFlags => {
                let get = op(ops.get_priv_flags)?;
                Ok(EthtoolReply::PrivFlags(get(nic)))
            }
            EthtoolRequest::SetPrivFlags(flags) => {
                op(ops.set_priv_flags)?(nic, flags)?;
                Ok(EthtoolReply::Done)
            }
            EthtoolRequest::SelfTest(mut flags) => {
                let self_test = op(ops.self_test)?;
                let count = op(ops.get_sset_count)?(nic, StringSet::Test)?;
                let mut results = vec![0u64; count];
                self_test(nic, &mut flags, &mut results);
                Ok(EthtoolReply::SelfTest { flags, results })
            }
            EthtoolRequest::GetLinkSettings => {
                let get = op(ops.get_link_ksettings)?;
                let mut settings = LinkSettings::default();
                get(nic, &mut settings)?;
                Ok(EthtoolReply::LinkSettings(settings))
            }
            EthtoolRequest::SetLinkSettings(settings) => {
                op(ops.set_link_ksettings)?(nic, &settings)?;
                Ok(EthtoolReply::Done)
            }
            EthtoolRequest::GetLink => {
                let get = op(ops.get_link)?;
                Ok(EthtoolReply::Link(get(nic)))
            }
            EthtoolRequest::GetRingParam => {
                let get = op(ops.get_ringparam)?;
                let mut ring = RingParam::default();
                get(nic, &mut ring);
                Ok(EthtoolReply::RingParam(ring))
            }
            EthtoolRequest::SetRingParam(request) => {
                let get = op(ops.get_ringparam)?;
                let set = op(ops.set_ringparam)?;
                let mut current = RingParam::default();
                get(nic, &mut current);
                if request.exceeds(&current) {
                    log::debug!(
                        target: LOG_TARGET,
                        "{}: requested ring size exceeds maximum",
                        nic.name()
                    );
                    return Err(EthtoolError::InvalidArgument);
                }
                set(nic, &request.merge_into(&current))?;
                Ok(EthtoolReply::Done)
            }
            EthtoolRequest::GetFecParam => {
                let get = op(ops.get_fecparam)?;
                let mut fec = FecParam::default();
                get(nic, &mut fec)?;
                Ok(EthtoolReply::FecParam(fec))
            }
            EthtoolRequest::SetFecParam(fec) => {
                op(ops.set_fecparam)?(nic, &fec)?;
                Ok(EthtoolReply::Done)
            }
            EthtoolRequest::SetPhysId(state) => {
                let frequency = op(ops.set_phys_id)?(nic, state)?;
                Ok(EthtoolReply::PhysId(frequency))
            }
            EthtoolRequest::GetRxNfc(mut info) => {
                op(ops.get_rxnfc)?(nic, &mut info)?;
                Ok(EthtoolReply::RxNfc(info))
            }
            EthtoolRequest::SetRxNfc(info) => {
                op(ops.set_rxnfc)?(nic, &info)?;
                Ok(EthtoolReply::Done)
            }
            EthtoolRequest::Reset(mut flags) => {
                op(ops.reset)?(nic, &mut flags)?;
                Ok(EthtoolReply::Reset(flags))
            }
            EthtoolRequest::GetRxfh => {
                let get = op(ops.get_rxfh)?;
                let mut rxfh = RxfhParam {
                    indir: vec![0; table_size(ops.get_rxfh_indir_size, nic)],
                    key: vec![0; table_size(ops.get_rxfh_key_size, nic)],
                    ..RxfhParam::default()
                };
                get(nic, &mut rxfh)?;
                Ok(EthtoolReply::Rxfh(rxfh))
            }
            EthtoolRequest::SetRxfh(rxfh) => {
                let set = op(ops.set_rxfh)?;
                let indir_size = table_size(ops.get_rxfh_indir_size, nic);
                let key_size = table_size(ops.get_rxfh_key_size, nic);
                if !rxfh.indir.is_empty() && rxfh.indir.len() != indir_size {
                    return Err(EthtoolError::InvalidArgument);
                }
                if !rxfh.key.is_empty() && rxfh.key.len() != key_size {
                    return Err(EthtoolError::InvalidArgument);
                }
                set(nic, &rxfh)?;
                Ok(EthtoolReply::Done)
            }
            EthtoolRequest::GetModuleInfo => {
                let get = op(ops.get_module_info)?;
                let mut info = ModuleInfo::default();
                get(nic, &mut info)?;
                Ok(EthtoolReply::ModuleInfo(info))
            }
            EthtoolRequest::GetModuleEeprom { offset, len } => {
                let get_info = op(ops.get_module_info)?;
                let get_eeprom = op(ops.get_module_eeprom)?;
                let mut info = ModuleInfo::default();
                get_info(nic, &mut info)?;
                let end = offset.checked_add(len).ok_or(EthtoolError::InvalidArgument)?;
                if len == 0 || end > info.eeprom_len {
                    return Err(EthtoolError::InvalidArgument);
                }
                let mut eeprom = ModuleEeprom {
                    offset,
                    data: vec![0; len as usize],
                };
                get_eeprom(nic, &mut eeprom)?;
                Ok(EthtoolReply::ModuleEeprom(eeprom))
            }
            EthtoolRequest::GetChannels => {
                let get = op(ops.get_channels)?;
                let mut channels = Channels::default();
                get(nic, &mut channels);
                Ok(EthtoolReply::Channels(channels))
            }
            EthtoolRequest::SetChannels(request) => {
                let get = op(ops.get_channels)?;
                let set = op(ops.set_channels)?;
                let mut current = Channels::default();
                get(nic, &mut current);
                if request.rx_count > current.max_rx
                    || request.tx_count > current.max_tx
                    || request.other_count > current.max_other
                    || request.combined_count > current.max_combined
                {
                    return Err(EthtoolError::InvalidArgument);
                }
                set(nic, &request)?;
                Ok(EthtoolReply::Done)
            }
        }
    }
}

/// Table entry, or `NotSupported` when the driver leaves it empty.
fn op<F>(entry: Option<F>) -> Result<F> {
    entry.ok_or(EthtoolError::NotSupported)
}

fn table_size<N>(entry: Option<fn(&N) -> u32>, nic: &N) -> usize {
    entry.map_or(0, |size| size(nic) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ef100::ef100_ethtool_ops;
    use crate::nic::testing::{nic_with_bitmaps, scenario_bitmap, test_nic, TestPlatform};
    use crate::nic::Ef100Nic;

    type Nic = Ef100Nic<TestPlatform>;

    fn device(nic: Nic) -> NetDevice<Nic> {
        NetDevice::new(nic, ef100_ethtool_ops())
    }

    #[test]
    fn test_missing_entry_is_not_supported() {
        let dev = NetDevice::new(test_nic(), EthtoolOps::EMPTY);
        assert_eq!(dev.ethtool(EthtoolRequest::GetRingParam), Err(EthtoolError::NotSupported));
        assert_eq!(dev.ethtool(EthtoolRequest::GetDrvInfo), Err(EthtoolError::NotSupported));
    }

    #[test]
    fn test_drvinfo_counts_string_sets() {
        let dev = device(test_nic());
        match dev.ethtool(EthtoolRequest::GetDrvInfo).unwrap() {
            EthtoolReply::DrvInfo(info) => {
                assert_eq!(info.fw_version, "1.14.3.7");
                assert_eq!(info.n_stats, TestPlatform::STATS.len() as u32);
                assert_eq!(info.testinfo_len, 0);
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn test_ring_scenario_through_dispatch() {
        let bitmap = scenario_bitmap();
        let dev = device(nic_with_bitmaps(bitmap, bitmap));
        dev.open().unwrap();

        let rx_512 = RingParamRequest::default().rx(512);
        assert_eq!(
            dev.ethtool(EthtoolRequest::SetRingParam(rx_512)),
            Err(EthtoolError::OutOfRange)
        );

        let request = RingParamRequest::default().rx(1024).tx(256);
        assert_eq!(dev.ethtool(EthtoolRequest::SetRingParam(request)), Ok(EthtoolReply::Done));

        let nic = dev.lock();
        assert_eq!((nic.rxq_entries(), nic.txq_entries()), (1024, 256));
        assert_eq!(nic.platform().stops, 1);
        assert_eq!(nic.platform().starts, 2);
    }

    #[test]
    fn test_partial_ring_update_keeps_other_side() {
        let bitmap = scenario_bitmap();
        let dev = device(nic_with_bitmaps(bitmap, bitmap));

        let request = RingParamRequest::default().tx(4096);
        dev.ethtool(EthtoolRequest::SetRingParam(request)).unwrap();

        match dev.ethtool(EthtoolRequest::GetRingParam).unwrap() {
            EthtoolReply::RingParam(ring) => {
                assert_eq!(ring.rx_pending, 1024);
                assert_eq!(ring.tx_pending, 4096);
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn test_ring_above_maximum_rejected_before_driver() {
        let bitmap = scenario_bitmap();
        let dev = device(nic_with_bitmaps(bitmap, bitmap));

        // 8192 is a power of two but above the advertised 4096.
        let request = RingParamRequest::default().rx(8192);
        assert_eq!(
            dev.ethtool(EthtoolRequest::SetRingParam(request)),
            Err(EthtoolError::InvalidArgument)
        );
    }

    #[test]
    fn test_strings_and_stats() {
        let dev = device(test_nic());
        match dev.ethtool(EthtoolRequest::GetStrings(StringSet::Stats)).unwrap() {
            EthtoolReply::Strings(names) => {
                assert_eq!(names.len(), 3);
                assert_eq!(names[1], "tx_packets");
            }
            other => panic!("unexpected reply {:?}", other),
        }
        assert_eq!(
            dev.ethtool(EthtoolRequest::GetStats),
            Ok(EthtoolReply::Stats(vec![10, 20, 1]))
        );
        assert_eq!(
            dev.ethtool(EthtoolRequest::GetStrings(StringSet::PrivFlags)),
            Err(EthtoolError::NotSupported)
        );
    }

    #[test]
    fn test_channels_above_maximum() {
        let dev = device(test_nic());
        let request = Channels {
            combined_count: 64,
            ..Channels::default()
        };
        assert_eq!(
            dev.ethtool(EthtoolRequest::SetChannels(request)),
            Err(EthtoolError::InvalidArgument)
        );

        let request = Channels {
            combined_count: 8,
            ..Channels::default()
        };
        assert_eq!(dev.ethtool(EthtoolRequest::SetChannels(request)), Ok(EthtoolReply::Done));
        assert_eq!(dev.lock().channels(), 8);
    }

    #[test]
    fn test_msglevel_and_link() {
        let dev = device(test_nic());
        dev.ethtool(EthtoolRequest::SetMsgLevel(MsgLevel::LINK)).unwrap();
        assert_eq!(
            dev.ethtool(EthtoolRequest::GetMsgLevel),
            Ok(EthtoolReply::MsgLevel(MsgLevel::LINK))
        );

        assert_eq!(dev.ethtool(EthtoolRequest::GetLink), Ok(EthtoolReply::Link(false)));
        dev.open().unwrap();
        assert_eq!(dev.ethtool(EthtoolRequest::GetLink), Ok(EthtoolReply::Link(true)));
        dev.close();
        assert_eq!(dev.ethtool(EthtoolRequest::GetLink), Ok(EthtoolReply::Link(false)));
    }

    #[test]
    fn test_unimplemented_common_callbacks() {
        let dev = device(test_nic());
        assert_eq!(dev.ethtool(EthtoolRequest::GetFecParam), Err(EthtoolError::NotSupported));
        assert_eq!(
            dev.ethtool(EthtoolRequest::GetModuleEeprom { offset: 0, len: 16 }),
            Err(EthtoolError::NotSupported)
        );
        assert_eq!(
            dev.ethtool(EthtoolRequest::Reset(ResetFlags::ALL)),
            Err(EthtoolError::NotSupported)
        );
        assert_eq!(
            dev.ethtool(EthtoolRequest::SelfTest(SelfTestFlags::OFFLINE)),
            Err(EthtoolError::NotSupported)
        );
    }

    #[test]
    fn test_request_names() {
        assert_eq!(EthtoolRequest::GetRingParam.name(), "GRINGPARAM");
        assert_eq!(
            EthtoolRequest::SetRingParam(RingParamRequest::default()).name(),
            "SRINGPARAM"
        );
    }
}
