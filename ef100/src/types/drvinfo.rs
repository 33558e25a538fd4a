//! Driver information (`struct ethtool_drvinfo`).

use core::fmt;

/// Width of the driver/version/fw_version/erom_version fields.
pub const ETHTOOL_FWVERS_LEN: usize = 32;
/// Width of the bus_info field.
pub const ETHTOOL_BUSINFO_LEN: usize = 32;
/// Width of one statistics or self-test name.
pub const ETH_GSTRING_LEN: usize = 32;

/// Fixed-width, NUL-terminated string field.
///
/// Holds at most `N - 1` bytes of text. Longer input is truncated on a
/// character boundary, the way `strscpy`/`snprintf` truncate into the
/// kernel structure.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EthtoolStr<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> EthtoolStr<N> {
    /// Empty string.
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// Build from `s`, truncating if needed.
    pub fn from_str_truncate(s: &str) -> Self {
        let mut out = Self::new();
        out.push_str(s);
        out
    }

    /// Replace the contents with `s`.
    pub fn set(&mut self, s: &str) {
        self.clear();
        self.push_str(s);
    }

    /// Reset to the empty string.
    pub fn clear(&mut self) {
        self.buf = [0; N];
        self.len = 0;
    }

    /// Append as much of `s` as fits. Returns `false` if anything was cut.
    pub fn push_str(&mut self, s: &str) -> bool {
        let room = N.saturating_sub(1).saturating_sub(self.len);
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        take == s.len()
    }

    pub fn as_str(&self) -> &str {
        // Only whole UTF-8 sequences are ever copied in.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Raw field including the NUL padding.
    pub fn as_bytes_with_nul(&self) -> &[u8; N] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for EthtoolStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for EthtoolStr<N> {
    /// Truncating write; never fails, like `snprintf`.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl<const N: usize> fmt::Display for EthtoolStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for EthtoolStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> PartialEq<&str> for EthtoolStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Driver information reported by `get_drvinfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrvInfo {
    /// Driver short name.
    pub driver: EthtoolStr<ETHTOOL_FWVERS_LEN>,
    /// Driver version string.
    pub version: EthtoolStr<ETHTOOL_FWVERS_LEN>,
    /// Firmware version string.
    pub fw_version: EthtoolStr<ETHTOOL_FWVERS_LEN>,
    /// Expansion ROM version string.
    pub erom_version: EthtoolStr<ETHTOOL_FWVERS_LEN>,
    /// Bus address, e.g. the PCI function name.
    pub bus_info: EthtoolStr<ETHTOOL_BUSINFO_LEN>,
    /// Number of private flags (filled by the core from `get_sset_count`).
    pub n_priv_flags: u32,
    /// Number of statistics (filled by the core from `get_sset_count`).
    pub n_stats: u32,
    /// Number of self-test results (filled by the core from `get_sset_count`).
    pub testinfo_len: u32,
}
