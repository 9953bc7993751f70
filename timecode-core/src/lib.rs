//! Millisecond resolution timecodes, as found in subtitle files and media
//! tooling: `HH:MM:SS.mmm`, `HH:MM:SS,mmm` or plain `HH:MM:SS`.

pub mod codec;
pub mod timecode;

pub use codec::{parse, parse_all, TimecodeError, TIMECODE_REGEX};
pub use timecode::{Components, Timecode};
