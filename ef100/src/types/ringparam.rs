//! Ring parameters (`struct ethtool_ringparam`).

/// Descriptor ring sizes, both limits and current values.
///
/// `get_ringparam` fills every field; `set_ringparam` only reads the
/// `*_pending` fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RingParam {
    pub rx_max_pending: u32,
    pub rx_mini_max_pending: u32,
    pub rx_jumbo_max_pending: u32,
    pub tx_max_pending: u32,
    pub rx_pending: u32,
    pub rx_mini_pending: u32,
    pub rx_jumbo_pending: u32,
    pub tx_pending: u32,
}

impl RingParam {
    /// Request for the given RX/TX sizes with no mini or jumbo ring.
    pub const fn pending(rx: u32, tx: u32) -> Self {
        Self {
            rx_max_pending: 0,
            rx_mini_max_pending: 0,
            rx_jumbo_max_pending: 0,
            tx_max_pending: 0,
            rx_pending: rx,
            rx_mini_pending: 0,
            rx_jumbo_pending: 0,
            tx_pending: tx,
        }
    }
}

/// Partial ring update as carried by a netlink `RINGS_SET` request.
///
/// `None` leaves that ring at its current size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RingParamRequest {
    pub rx_pending: Option<u32>,
    pub rx_mini_pending: Option<u32>,
    pub rx_jumbo_pending: Option<u32>,
    pub tx_pending: Option<u32>,
}

impl RingParamRequest {
    pub const fn rx(mut self, entries: u32) -> Self {
        self.rx_pending = Some(entries);
        self
    }

    pub const fn tx(mut self, entries: u32) -> Self {
        self.tx_pending = Some(entries);
        self
    }

    /// Overlay this request on `current`, producing a complete request.
    pub fn merge_into(&self, current: &RingParam) -> RingParam {
        RingParam {
            rx_pending: self.rx_pending.unwrap_or(current.rx_pending),
            rx_mini_pending: self.rx_mini_pending.unwrap_or(current.rx_mini_pending),
            rx_jumbo_pending: self.rx_jumbo_pending.unwrap_or(current.rx_jumbo_pending),
            tx_pending: self.tx_pending.unwrap_or(current.tx_pending),
            ..*current
        }
    }

    /// Whether any requested value exceeds the advertised maximum.
    pub fn exceeds(&self, limits: &RingParam) -> bool {
        let over = |req: Option<u32>, max: u32| req.map_or(false, |v| v > max);
        over(self.rx_pending, limits.rx_max_pending)
            || over(self.rx_mini_pending, limits.rx_mini_max_pending)
            || over(self.rx_jumbo_pending, limits.rx_jumbo_max_pending)
            || over(self.tx_pending, limits.tx_max_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> RingParam {
        RingParam {
            rx_max_pending: 4096,
            tx_max_pending: 4096,
            rx_pending: 1024,
            tx_pending: 512,
            ..RingParam::default()
        }
    }

    #[test]
    fn test_merge_keeps_unrequested_side() {
        let merged = RingParamRequest::default().rx(2048).merge_into(&current());
        assert_eq!(merged.rx_pending, 2048);
        assert_eq!(merged.tx_pending, 512);
        assert_eq!(merged.rx_max_pending, 4096);
    }

    #[test]
    fn test_exceeds_limits() {
        assert!(RingParamRequest::default().tx(8192).exceeds(&current()));
        assert!(!RingParamRequest::default().tx(4096).exceeds(&current()));
        // Mini ring max is zero on this hardware.
        let mini = RingParamRequest {
            rx_mini_pending: Some(1),
            ..RingParamRequest::default()
        };
        assert!(mini.exceeds(&current()));
    }
}
