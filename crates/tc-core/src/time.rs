//! Event time model.
//!
//! The simulator stamps events in seconds since midnight of the simulated
//! day.  Values past 24:00:00 are legal (late-night returns) and are rendered
//! as e.g. `25:10:00` rather than wrapping.

use std::fmt;

/// An absolute event timestamp in seconds since simulation midnight.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventTime(pub f64);

impl EventTime {
    pub const ZERO: EventTime = EventTime(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`.  Negative if `earlier` is
    /// actually later; callers that rely on ordered streams never see that.
    #[inline]
    pub fn since(self, earlier: EventTime) -> f64 {
        self.0 - earlier.0
    }

    /// Break into (hours, minutes, seconds), hours not wrapped at 24.
    pub fn hms(self) -> (u64, u32, u32) {
        let total = self.0.max(0.0) as u64;
        let hours = total / 3_600;
        let minutes = ((total % 3_600) / 60) as u32;
        let seconds = (total % 60) as u32;
        (hours, minutes, seconds)
    }
}

impl std::ops::Add<f64> for EventTime {
    type Output = EventTime;
    #[inline]
    fn add(self, rhs: f64) -> EventTime {
        EventTime(self.0 + rhs)
    }
}

impl std::ops::Sub for EventTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: EventTime) -> f64 {
        self.0 - rhs.0
    }
}

impl From<f64> for EventTime {
    #[inline]
    fn from(secs: f64) -> Self {
        EventTime(secs)
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}
