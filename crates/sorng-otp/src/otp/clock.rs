//! Time source used to resolve "now" into a time step.

/// Supplies the current unix time in seconds.
pub trait Clock: Send + Sync {
    fn unix_time(&self) -> u64;
}

/// Wall clock backed by [`std::time::SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_time(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Clock frozen at a fixed unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    unix_seconds: u64,
}

impl FixedClock {
    pub fn at(unix_seconds: u64) -> Self {
        Self { unix_seconds }
    }
}

impl Clock for FixedClock {
    fn unix_time(&self) -> u64 {
        self.unix_seconds
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn unix_time(&self) -> u64 {
        (**self).unix_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_fixed() {
        let c = FixedClock::at(1_111_111_109);
        assert_eq!(c.unix_time(), 1_111_111_109);
        assert_eq!(c.unix_time(), 1_111_111_109);
    }

    #[test]
    fn system_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.unix_time() > 1_577_836_800);
    }

    #[test]
    fn clock_by_reference() {
        fn read(c: impl Clock) -> u64 {
            c.unix_time()
        }
        let c = FixedClock::at(59);
        assert_eq!(read(&c), 59);
    }
}
