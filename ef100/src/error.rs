//! ethtool error types.
//!
//! Every failure an ethtool operation can report maps onto one of the
//! negative Linux errno values the management interface hands back to
//! userspace.

use core::fmt;

pub type Result<T> = core::result::Result<T, EthtoolError>;

/// Linux errno values used by this layer.
pub mod errno {
    pub const EIO: i32 = 5;
    pub const EAGAIN: i32 = 11;
    pub const ENOMEM: i32 = 12;
    pub const EBUSY: i32 = 16;
    pub const EINVAL: i32 = 22;
    pub const ERANGE: i32 = 34;
    pub const EOPNOTSUPP: i32 = 95;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EthtoolError {
    /// Malformed request (`-EINVAL`).
    InvalidArgument,
    /// Operation or setting not available on this device (`-EOPNOTSUPP`).
    NotSupported,
    /// Value outside what the hardware can guarantee (`-ERANGE`).
    OutOfRange,
    /// Device held by other clients (`-EBUSY`).
    Busy,
    /// Failure reported by the datapath or firmware, carried as a positive errno.
    Io(i32),
}

impl EthtoolError {
    /// Negative errno as returned through the ethtool callback ABI.
    pub fn to_errno(self) -> i32 {
        match self {
            Self::InvalidArgument => -errno::EINVAL,
            Self::NotSupported => -errno::EOPNOTSUPP,
            Self::OutOfRange => -errno::ERANGE,
            Self::Busy => -errno::EBUSY,
            Self::Io(code) => -code.abs(),
        }
    }

    /// Classify a negative (or positive) errno.
    pub fn from_errno(code: i32) -> Self {
        match code.abs() {
            errno::EINVAL => Self::InvalidArgument,
            errno::EOPNOTSUPP => Self::NotSupported,
            errno::ERANGE => Self::OutOfRange,
            errno::EBUSY => Self::Busy,
            other => Self::Io(other),
        }
    }
}

/// Collapse a result into the `0` / negative-errno convention.
pub fn to_status(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.to_errno(),
    }
}

impl fmt::Display for EthtoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "Invalid argument"),
            Self::NotSupported => write!(f, "Operation not supported"),
            Self::OutOfRange => write!(f, "Value out of range"),
            Self::Busy => write!(f, "Device busy"),
            Self::Io(code) => write!(f, "Device error: errno {}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(EthtoolError::InvalidArgument.to_errno(), -22);
        assert_eq!(EthtoolError::NotSupported.to_errno(), -95);
        assert_eq!(EthtoolError::OutOfRange.to_errno(), -34);
        assert_eq!(EthtoolError::Busy.to_errno(), -16);
        assert_eq!(EthtoolError::Io(errno::EIO).to_errno(), -5);
        assert_eq!(EthtoolError::Io(-errno::ENOMEM).to_errno(), -12);
    }

    #[test]
    fn test_from_errno() {
        assert_eq!(EthtoolError::from_errno(-22), EthtoolError::InvalidArgument);
        assert_eq!(EthtoolError::from_errno(95), EthtoolError::NotSupported);
        assert_eq!(EthtoolError::from_errno(-11), EthtoolError::Io(errno::EAGAIN));
    }

    #[test]
    fn test_status() {
        assert_eq!(to_status(Ok(())), 0);
        assert_eq!(to_status(Err(EthtoolError::Busy)), -16);
    }
}
