//! Driver information.

use crate::nic::EfxNic;
use crate::types::DrvInfo;

/// Fill `info` with the common driver details, then replace the firmware
/// version with the bundle version.
///
/// The bundle version needs an MCDI round trip, so outside process context
/// the MC firmware version from the common details is left in place. If the
/// query fails the field is left empty.
pub fn ef100_get_drvinfo<N: EfxNic + ?Sized>(nic: &mut N, info: &mut DrvInfo) {
    nic.common_drvinfo(info);
    if !nic.in_interrupt() {
        // Failure already cleared the field.
        let _ = nic.fw_bundle_version(&mut info.fw_version);
    }
}
