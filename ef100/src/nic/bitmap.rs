//! Ring-size capability bitmap.
//!
//! The firmware reports ring sizes as a bitmap where a set bit at position
//! `n` means a ring of `1 << n` descriptors is available. Because every
//! valid size is a power of two, `bitmap & size` is a membership test.

use core::fmt;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RingSizeBitmap(u64);

impl RingSizeBitmap {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Bitmap holding exactly the given sizes. Non-power-of-two entries are ignored.
    pub const fn from_sizes(sizes: &[u32]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < sizes.len() {
            if sizes[i].is_power_of_two() {
                bits |= sizes[i] as u64;
            }
            i += 1;
        }
        Self(bits)
    }

    /// Every power of two from `min` up to and including `max`.
    pub const fn range(min: u32, max: u32) -> Self {
        if min == 0 || max < min {
            return Self::EMPTY;
        }
        let low = min.next_power_of_two() as u64;
        let high = (max as u64 + 1).next_power_of_two() >> 1;
        if high < low {
            return Self::EMPTY;
        }
        // All bits from `low` through `high`.
        Self((high | (high - 1)) & !(low - 1))
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `size` is a power of two present in the bitmap.
    pub const fn contains(self, size: u32) -> bool {
        size.is_power_of_two() && self.0 & size as u64 != 0
    }

    /// Largest size in the bitmap that does not exceed `ceiling`, or 0.
    ///
    /// `ceiling` must be a power of two.
    pub const fn max_size_within(self, ceiling: u32) -> u32 {
        let ceiling = ceiling as u64;
        let window = ceiling | ceiling.saturating_sub(1);
        let masked = self.0 & window;
        if masked == 0 {
            0
        } else {
            // rounddown_pow_of_two
            (1u64 << (63 - masked.leading_zeros())) as u32
        }
    }

    /// Iterate the sizes in the bitmap, smallest first.
    pub fn sizes(self) -> impl Iterator<Item = u64> {
        (0..64u32)
            .map(|bit| 1u64 << bit)
            .filter(move |size| self.0 & size != 0)
    }
}

impl fmt::Debug for RingSizeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.sizes()).finish()
    }
}

impl From<u64> for RingSizeBitmap {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}
