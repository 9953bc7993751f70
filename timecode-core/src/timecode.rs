use std::{
    iter::Sum,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    time::Duration,
};

use serde::{Deserialize, Serialize};

const MILLIS_PER_SECOND: u64 = 1000;
const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;

/// A duration or position in media (e.g. a subtitle cue or an audio track),
/// with millisecond resolution. May be negative.
///
/// Timecodes can be added, subtracted and scaled by integers. Arithmetic
/// follows `i64` overflow semantics: it panics in debug builds and wraps in
/// release builds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode(i64);

/// The unsigned parts of a [`Timecode`]. The sign is tracked separately.
///
/// When produced by [`Timecode::components`], minutes and seconds are in
/// `0..60` and millis in `0..1000`. Hours have no upper bound.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Components {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl Components {
    /// Rebuild a timecode from these parts. Out of range values are not
    /// rejected, they simply carry into the next unit.
    pub fn into_timecode(self, negative: bool) -> Timecode {
        let total = self.millis
            + self.seconds * MILLIS_PER_SECOND
            + self.minutes * SECONDS_PER_MINUTE * MILLIS_PER_SECOND
            + self.hours * MINUTES_PER_HOUR * SECONDS_PER_MINUTE * MILLIS_PER_SECOND;
        // i64::MIN has a magnitude of i64::MAX + 1, which only round trips
        // through the two's complement wrap
        let total = total as i64;
        if negative {
            Timecode(total.wrapping_neg())
        } else {
            Timecode(total)
        }
    }
}

impl Timecode {
    pub const ZERO: Timecode = Timecode(0);
    pub const MILLISECOND: Timecode = Timecode(1);
    pub const SECOND: Timecode = Timecode(1000);
    pub const MINUTE: Timecode = Timecode(60 * 1000);
    pub const HOUR: Timecode = Timecode(60 * 60 * 1000);

    pub const fn from_millis(millis: i64) -> Timecode {
        Timecode(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Construct a timecode from its parts, e.g. `-01:02:03.456` is
    /// `Timecode::from_params(true, 1, 2, 3, 456)`.
    pub fn from_params(
        negative: bool,
        hour: u64,
        minute: u64,
        second: u64,
        milli: u64,
    ) -> Timecode {
        Components {
            hours: hour,
            minutes: minute,
            seconds: second,
            millis: milli,
        }
        .into_timecode(negative)
    }

    /// Split the magnitude of this timecode into hours, minutes, seconds and
    /// millis. Use [`Timecode::is_negative`] for the sign.
    pub fn components(self) -> Components {
        let mut rem = self.0.unsigned_abs();

        let millis = rem % MILLIS_PER_SECOND;
        rem /= MILLIS_PER_SECOND;
        let seconds = rem % SECONDS_PER_MINUTE;
        rem /= SECONDS_PER_MINUTE;
        let minutes = rem % MINUTES_PER_HOUR;
        rem /= MINUTES_PER_HOUR;

        Components {
            hours: rem,
            minutes,
            seconds,
            millis,
        }
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Magnitude of this timecode. `i64::MIN` has no positive counterpart
    /// and is returned unchanged.
    pub const fn abs(self) -> Timecode {
        Timecode(self.0.wrapping_abs())
    }

    fn replace_component<F: FnOnce(&mut Components)>(self, f: F) -> Timecode {
        let mut parts = self.components();
        f(&mut parts);
        parts.into_timecode(self.is_negative())
    }

    pub fn with_hours(self, hours: u64) -> Timecode {
        self.replace_component(|c| c.hours = hours)
    }

    pub fn with_minutes(self, minutes: u64) -> Timecode {
        self.replace_component(|c| c.minutes = minutes)
    }

    pub fn with_seconds(self, seconds: u64) -> Timecode {
        self.replace_component(|c| c.seconds = seconds)
    }

    pub fn with_millis(self, millis: u64) -> Timecode {
        self.replace_component(|c| c.millis = millis)
    }

    /// Truncates to whole milliseconds. `None` if the duration does not fit.
    pub fn from_duration(duration: Duration) -> Option<Timecode> {
        i64::try_from(duration.as_millis()).ok().map(Timecode)
    }

    /// `None` for negative timecodes, which `Duration` can not represent.
    pub fn to_duration(self) -> Option<Duration> {
        u64::try_from(self.0).ok().map(Duration::from_millis)
    }
}

impl From<i64> for Timecode {
    fn from(millis: i64) -> Self {
        Timecode(millis)
    }
}

impl From<Timecode> for i64 {
    fn from(t: Timecode) -> Self {
        t.0
    }
}

impl Add for Timecode {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Timecode(self.0 + other.0)
    }
}

impl Sub for Timecode {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Timecode(self.0 - other.0)
    }
}

impl Neg for Timecode {
    type Output = Self;

    fn neg(self) -> Self {
        Timecode(-self.0)
    }
}

impl AddAssign for Timecode {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl SubAssign for Timecode {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Timecode {
    type Output = Self;

    fn mul(self, coeff: i64) -> Self {
        Timecode(self.0 * coeff)
    }
}

impl Mul<Timecode> for i64 {
    type Output = Timecode;

    fn mul(self, t: Timecode) -> Timecode {
        Timecode(self * t.0)
    }
}

impl MulAssign<i64> for Timecode {
    fn mul_assign(&mut self, coeff: i64) {
        self.0 *= coeff;
    }
}

/// Integer division, truncating toward zero. Panics on a zero divisor.
impl Div<i64> for Timecode {
    type Output = Self;

    fn div(self, coeff: i64) -> Self {
        Timecode(self.0 / coeff)
    }
}

impl DivAssign<i64> for Timecode {
    fn div_assign(&mut self, coeff: i64) {
        self.0 /= coeff;
    }
}

impl Sum for Timecode {
    fn sum<I: Iterator<Item = Timecode>>(iter: I) -> Self {
        iter.fold(Timecode::ZERO, Add::add)
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn components_roundtrip(
            negative in any::<bool>(),
            hour in 0u64..=10_000,
            minute in 0u64..60,
            second in 0u64..60,
            milli in 0u64..1000,
        ) {
            let t = Timecode::from_params(negative, hour, minute, second, milli);
            let c = t.components();
            prop_assert_eq!(
                (c.hours, c.minutes, c.seconds, c.millis),
                (hour, minute, second, milli)
            );
            prop_assert_eq!(c.into_timecode(t.is_negative()), t);
            if t == Timecode::ZERO {
                prop_assert!(!t.is_negative());
            } else {
                prop_assert_eq!(t.is_negative(), negative);
            }
        }

        #[test]
        fn compose_decompose_any_value(millis in any::<i64>()) {
            let t = Timecode::from_millis(millis);
            prop_assert_eq!(t.components().into_timecode(t.is_negative()), t);
        }
    }
}
