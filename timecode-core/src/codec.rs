use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::timecode::Timecode;

const SIGN_GROUP: usize = 1;
const HOUR_GROUP: usize = 2;
const MINUTE_GROUP: usize = 3;
const SECOND_GROUP: usize = 4;
const MILLI_GROUP: usize = 5;

/// Matches a timecode anywhere in a string, capturing the (optional) sign,
/// hours, minutes, seconds and (optional) milliseconds. Hours are limited to
/// a 24 hour clock, and the millisecond separator may be a dot or a comma.
pub static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(-)?([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9])(?:[.,]([0-9]{3}))?")
        .expect("timecode regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimecodeError {
    #[error("not a timecode: {:?}", _0)]
    Malformed(String),
}

/// Extract the first timecode found in `text`. All of these are valid:
///
/// ```
/// use timecode_core::{parse, Timecode};
///
/// let expected = Timecode::from_params(false, 1, 2, 3, 456);
/// assert_eq!(parse("01:02:03.456").unwrap(), expected);
/// assert_eq!(parse("01:02:03,456").unwrap(), expected);
/// assert_eq!(parse("-01:02:03.456").unwrap(), -expected);
/// assert_eq!(parse("01:02:03").unwrap(), expected.with_millis(0));
/// assert_eq!(parse("crouching.tiger.01:02:03.456.hidden.timecode").unwrap(), expected);
/// ```
///
/// On failure, [`Timecode::ZERO`] (the `Default`) is the conventional
/// fallback value.
pub fn parse(text: &str) -> Result<Timecode, TimecodeError> {
    TIMECODE_REGEX
        .captures(text)
        .map(|c| timecode_from_captures(&c))
        .ok_or_else(|| TimecodeError::Malformed(text.to_owned()))
}

/// Every non-overlapping timecode in `text`, in order of appearance.
pub fn parse_all(text: &str) -> impl Iterator<Item = Timecode> + '_ {
    TIMECODE_REGEX
        .captures_iter(text)
        .map(|c| timecode_from_captures(&c))
}

fn timecode_from_captures(captures: &Captures<'_>) -> Timecode {
    let negative = captures
        .get(SIGN_GROUP)
        .map(|m| !m.as_str().is_empty())
        .unwrap_or(false);

    let timecode = Timecode::from_params(
        negative,
        capture_number(captures, HOUR_GROUP),
        capture_number(captures, MINUTE_GROUP),
        capture_number(captures, SECOND_GROUP),
        capture_number(captures, MILLI_GROUP),
    );
    log::trace!("decoded {:?} from {:?}", timecode, &captures[0]);
    timecode
}

/// A missing group is zero. The regex only captures ascii digits, so a failed
/// conversion means the pattern and this function disagree.
fn capture_number(captures: &Captures<'_>, group: usize) -> u64 {
    let digits = match captures.get(group) {
        Some(m) => m.as_str(),
        None => return 0,
    };
    debug_assert!(
        digits.bytes().all(|b| b.is_ascii_digit()),
        "timecode group {} captured non-digits: {:?}",
        group,
        digits
    );
    digits.parse::<u64>().unwrap_or_else(|e| {
        log::warn!("could not convert timecode group {} {:?}: {}", group, digits, e);
        0
    })
}

/// Renders a [`Timecode`] without allocating, see [`Timecode::display`].
pub struct TimecodeDisplay<'a> {
    timecode: Timecode,
    with_millis: bool,
    separator: &'a str,
}

impl<'a> fmt::Display for TimecodeDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.timecode.is_negative() {
            f.write_str("-")?;
        }
        let c = self.timecode.components();
        write!(f, "{:02}:{:02}:{:02}", c.hours, c.minutes, c.seconds)?;
        if self.with_millis {
            write!(f, "{}{:03}", self.separator, c.millis)?;
        }
        Ok(())
    }
}

impl Timecode {
    /// Lazily formatted timecode. If `with_millis` is set, `separator` goes
    /// between the seconds and the milliseconds.
    pub fn display(self, with_millis: bool, separator: &str) -> TimecodeDisplay<'_> {
        TimecodeDisplay {
            timecode: self,
            with_millis,
            separator,
        }
    }

    pub fn format(self, with_millis: bool, separator: &str) -> String {
        self.display(with_millis, separator).to_string()
    }

    /// e.g. `01:02:03.004`
    pub fn format_dot(self) -> String {
        self.format(true, ".")
    }

    /// e.g. `01:02:03,004`, as used by SubRip
    pub fn format_comma(self) -> String {
        self.format(true, ",")
    }
}

/// Same as [`Timecode::format_dot`]. Meant for logging and diagnostics, the
/// output is not guaranteed to stay stable; call `format_dot` or
/// `format_comma` when the text will be parsed again.
impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(true, ".").fmt(f)
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Serialize for Timecode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_dot())
    }
}

impl<'de> Deserialize<'de> for Timecode {
    fn deserialize<D>(deserializer: D) -> Result<Timecode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}
