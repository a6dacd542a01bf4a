//! Processing timestamps for latency measurement.
//!
//! Timestamps are nanoseconds on a monotonic clock anchored at first use in
//! the process. They are opaque to the pipeline: callers compare them to
//! [`ProcessingTimestamp::now`] to measure end-to-end latency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use std::time::Instant;

fn clock_anchor() -> Instant {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    *ANCHOR.get_or_init(Instant::now)
}

/// Completion time of a processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessingTimestamp(i64);

impl ProcessingTimestamp {
    /// Sentinel returned across the boundary when no frame was produced.
    pub const FAILURE: Self = Self(0);

    /// Current monotonic time. Never equal to [`Self::FAILURE`].
    pub fn now() -> Self {
        let nanos = clock_anchor().elapsed().as_nanos();
        Self(i64::try_from(nanos).unwrap_or(i64::MAX - 1) + 1)
    }

    /// Wrap a raw nanosecond value.
    #[inline]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    #[inline]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_failure(self) -> bool {
        self.0 == Self::FAILURE.0
    }

    /// Nanoseconds from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn nanos_since(self, earlier: Self) -> i64 {
        self.0.saturating_sub(earlier.0).max(0)
    }

    /// Frames per second implied by the interval from `earlier` to `self`,
    /// or 0.0 for an empty interval.
    pub fn rate_since(self, earlier: Self) -> f64 {
        let delta = self.nanos_since(earlier);
        if delta > 0 {
            1e9 / delta as f64
        } else {
            0.0
        }
    }
}

impl fmt::Display for ProcessingTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

/// Issues strictly increasing timestamps.
///
/// Two frames finishing within the clock's resolution still receive
/// distinct, ordered values.
#[derive(Debug, Default)]
pub struct TimestampSource {
    last: i64,
}

impl TimestampSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp the completion of a frame.
    pub fn next(&mut self) -> ProcessingTimestamp {
        let now = ProcessingTimestamp::now().as_nanos();
        self.last = now.max(self.last.saturating_add(1));
        ProcessingTimestamp(self.last)
    }

    /// The most recently issued timestamp, or the failure sentinel.
    pub fn last(&self) -> ProcessingTimestamp {
        ProcessingTimestamp(self.last)
    }
}
