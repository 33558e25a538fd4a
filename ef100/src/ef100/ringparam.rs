//! Descriptor ring size negotiation.
//!
//! # Update sequence
//! 1. Reject mini/jumbo rings (not present on EF100)
//! 2. Reject sizes that are not a power of two
//! 3. Return early when nothing changes
//! 4. Reject if the firmware does not allow resizing
//! 5. Reject sizes the hardware does not guarantee
//! 6. Reject while other clients hold the device (`driverlink`)
//! 7. Store the new sizes
//! 8. Restart the interface if it was up
//!
//! Steps 1-6 run before anything is modified. A failure in step 8 is
//! returned as-is and the new sizes stay stored.

use crate::error::{EthtoolError, Result};
use crate::netif::netif_err;
use crate::nic::EfxNic;
use crate::types::{MsgLevel, RingParam};

/// Largest descriptor ring the QDMA engine supports.
pub const EF100_MAX_DMAQ_SIZE: u32 = crate::nic::config::EF100_MAX_DMAQ_SIZE;

/// Largest ring size to advertise: the biggest guaranteed size not above
/// [`EF100_MAX_DMAQ_SIZE`], or 0 if there is none.
pub fn ef100_max_ring_size<N: EfxNic + ?Sized>(nic: &N) -> u32 {
    nic.guaranteed_bitmap().max_size_within(EF100_MAX_DMAQ_SIZE)
}

/// Report current ring sizes and their limits.
pub fn ef100_get_ringparam<N: EfxNic + ?Sized>(nic: &N, ring: &mut RingParam) {
    let max_size = ef100_max_ring_size(nic);

    *ring = RingParam {
        rx_max_pending: max_size,
        tx_max_pending: max_size,
        rx_pending: nic.rxq_entries(),
        tx_pending: nic.txq_entries(),
        ..RingParam::default()
    };
}

/// Validate and apply new ring sizes.
pub fn ef100_set_ringparam<N: EfxNic + ?Sized>(nic: &mut N, ring: &RingParam) -> Result<()> {
    let is_up = nic.is_up();

    if ring.rx_mini_pending != 0 || ring.rx_jumbo_pending != 0 {
        return Err(EthtoolError::InvalidArgument);
    }

    if !ring.rx_pending.is_power_of_two() || !ring.tx_pending.is_power_of_two() {
        netif_err!(nic, MsgLevel::DRV, "ring sizes that are not pow of 2, not supported");
        return Err(EthtoolError::InvalidArgument);
    }

    if ring.rx_pending == nic.rxq_entries() && ring.tx_pending == nic.txq_entries() {
        // Nothing to do
        return Ok(());
    }

    if nic.supported_bitmap().is_empty() {
        netif_err!(nic, MsgLevel::DRV, "ring size changes not supported");
        return Err(EthtoolError::NotSupported);
    }

    let guaranteed = nic.guaranteed_bitmap();
    if ring.rx_pending != 0 && !guaranteed.contains(ring.rx_pending) {
        netif_err!(nic, MsgLevel::DRV, "unsupported ring size for RX");
        return Err(EthtoolError::OutOfRange);
    }
    if ring.tx_pending != 0 && !guaranteed.contains(ring.tx_pending) {
        netif_err!(nic, MsgLevel::DRV, "unsupported ring sizes for TX");
        return Err(EthtoolError::OutOfRange);
    }

    #[cfg(feature = "driverlink")]
    {
        let open_count = nic.open_count();
        if open_count > u16::from(is_up) {
            netif_err!(
                nic,
                MsgLevel::DRV,
                "unable to set ring sizes. device in use by {} clients",
                open_count
            );
            return Err(EthtoolError::Busy);
        }
    }

    // Apply the new settings
    nic.set_queue_entries(ring.rx_pending, ring.tx_pending);

    // Update the datapath with the new settings if the interface is up
    if is_up {
        nic.dev_close();
        nic.dev_open()?;
    }

    Ok(())
}
