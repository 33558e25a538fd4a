//! EF100 ethtool support.
//!
//! ethtool callbacks for EF100 network controllers: descriptor ring
//! negotiation, driver/firmware version reporting and the operations table
//! handed to the network device layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    EF100 ethtool layer                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐                 │
//! │  │  netdev    │─▶│ EthtoolOps │─▶│  ef100     │                 │
//! │  │            │  │            │  │            │                 │
//! │  │ lock       │  │ callback   │  │ ringparam  │                 │
//! │  │ dispatch   │  │ table      │  │ drvinfo    │                 │
//! │  └────────────┘  └────────────┘  └─────┬──────┘                 │
//! │                                        │                        │
//! │                                  ┌─────▼──────┐                 │
//! │                                  │    nic     │                 │
//! │                                  │ EfxNic     │                 │
//! │                                  │ Platform   │                 │
//! │                                  └────────────┘                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ef100_ethtool::{ef100_ethtool_ops, Ef100Config, Ef100Nic, EthtoolRequest, NetDevice};
//! use ef100_ethtool::types::RingParamRequest;
//!
//! let nic = Ef100Nic::new(Ef100Config::new("eth0", "0000:03:00.0"), board);
//! let dev = NetDevice::new(nic, ef100_ethtool_ops());
//! dev.open()?;
//!
//! // ethtool -G eth0 rx 2048
//! dev.ethtool(EthtoolRequest::SetRingParam(RingParamRequest::default().rx(2048)))?;
//! ```

#![no_std]

extern crate alloc;

pub mod error;
pub mod netif;
pub mod types;
pub mod nic;
pub mod ops;
pub mod ef100;
pub mod netdev;

pub use error::{EthtoolError, Result};
pub use ef100::{ef100_ethtool_ops, ef100_get_drvinfo, ef100_get_ringparam, ef100_set_ringparam};
pub use netdev::{EthtoolReply, EthtoolRequest, NetDevice};
pub use nic::{Ef100Config, Ef100Nic, EfxNic, EthtoolCommon, Platform, RingSizeBitmap};
pub use ops::EthtoolOps;
