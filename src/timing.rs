//! Converting bit-period counts into wall-clock durations, and measuring
//! how far the real event landed from the prediction.

use std::time::Duration;

use nix::time::{clock_gettime, ClockId};

use crate::errors::{Error, Result};

/// Multiply a bit-period count by the length of one bit-period.
///
/// `Duration` spans `u64::MAX` seconds, so this only fails for absurd
/// periods. Overflow is reported, never wrapped.
pub fn bit_periods_to_duration(periods: u64, period: Duration) -> Result<Duration> {
    const NANOS_PER_SEC: u128 = 1_000_000_000;

    period
        .as_nanos()
        .checked_mul(u128::from(periods))
        .and_then(|total| {
            let secs = u64::try_from(total / NANOS_PER_SEC).ok()?;
            Some(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
        })
        .ok_or(Error::DurationOverflow { periods, period })
}

/// A reading of `CLOCK_MONOTONIC`, in nanoseconds.
///
/// This is the clock the kernel stamps GPIO line events with by default, so
/// kernel event timestamps can be wrapped with [`Timestamp::from_nanos`] and
/// compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn now() -> Result<Self> {
        let ts = clock_gettime(ClockId::CLOCK_MONOTONIC)?;
        let nanos = ts.tv_sec() as u64 * 1_000_000_000 + ts.tv_nsec() as u64;
        Ok(Self(nanos))
    }

    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Time from `earlier` to `self`, zero if `earlier` is actually later.
    pub const fn elapsed_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }
}

/// Predicted versus observed delay for a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drift {
    pub expected: Duration,
    pub arrived: Duration,
}

impl Drift {
    pub const fn new(expected: Duration, arrived: Duration) -> Self {
        Self { expected, arrived }
    }

    /// Measure the delay between two timestamps taken around a blocking wait.
    pub fn measure(expected: Duration, before: Timestamp, after: Timestamp) -> Self {
        Self::new(expected, after.elapsed_since(before))
    }

    /// `arrived - expected`; positive when the event came late.
    pub fn diff_nanos(&self) -> i128 {
        self.arrived.as_nanos() as i128 - self.expected.as_nanos() as i128
    }

    pub fn diff_micros(&self) -> i128 {
        self.diff_nanos() / 1_000
    }

    pub fn is_late(&self) -> bool {
        self.arrived > self.expected
    }
}

impl std::fmt::Display for Drift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "expected: {}, arrived: {}, diff: {}",
            self.expected.as_micros(),
            self.arrived.as_micros(),
            self.diff_micros()
        )
    }
}
