// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time for driving fade animations.
//!
//! [`HostTime`] is a point in time expressed as platform-native monotonic
//! ticks, supplied by the host at the start of each redraw. [`Timebase`]
//! carries the rational conversion from ticks to nanoseconds, so the foldout
//! protocol can advance its animations in seconds regardless of the host's
//! clock resolution.

use core::fmt;
use core::ops::Sub;

/// A point in time expressed as platform-native monotonic ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the number of ticks between `self` and an earlier time, or
    /// zero if `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_ticks_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Sub for HostTime {
    type Output = u64;

    #[inline]
    fn sub(self, rhs: Self) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// Rational conversion factor from ticks to nanoseconds.
///
/// `nanoseconds = ticks * numer / denom`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Numerator of the ticks-to-nanoseconds ratio.
    pub numer: u32,
    /// Denominator of the ticks-to-nanoseconds ratio.
    pub denom: u32,
}

impl Timebase {
    /// A timebase where ticks are already nanoseconds (1:1).
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// A timebase where one tick is one millisecond.
    pub const MILLIS: Self = Self {
        numer: 1_000_000,
        denom: 1,
    };

    /// Converts a tick count to nanoseconds.
    ///
    /// Uses `u128` intermediate arithmetic to avoid overflow. A zero `denom`
    /// converts every tick count to zero, so time stands still instead of
    /// panicking.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        match (ticks as u128 * self.numer as u128).checked_div(self.denom as u128) {
            Some(nanos) => nanos as u64,
            None => 0,
        }
    }

    /// Converts a tick count to fractional seconds.
    #[inline]
    #[must_use]
    pub fn ticks_to_secs(self, ticks: u64) -> f64 {
        self.ticks_to_nanos(ticks) as f64 / 1_000_000_000.0
    }
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_timebase_converts_to_seconds() {
        let tb = Timebase::MILLIS;
        assert_eq!(tb.ticks_to_nanos(16), 16_000_000);
        assert!(
            (tb.ticks_to_secs(250) - 0.25).max(0.25 - tb.ticks_to_secs(250)) < 1e-12,
            "250 ms should be a quarter second"
        );
    }

    #[test]
    fn zero_denominator_stands_still() {
        let tb = Timebase { numer: 1, denom: 0 };
        assert_eq!(tb.ticks_to_nanos(1_000_000), 0);
        assert_eq!(tb.ticks_to_secs(1_000_000), 0.0);
    }

    #[test]
    fn saturating_ticks_since_never_underflows() {
        assert_eq!(HostTime(10).saturating_ticks_since(HostTime(4)), 6);
        assert_eq!(HostTime(4).saturating_ticks_since(HostTime(10)), 0);
        assert_eq!(HostTime(10) - HostTime(4), 6);
    }
}
