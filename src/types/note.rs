// Copyright (c) 2024 Mike Tsao

use super::{NoteTimeValue, Pitch};
use anyhow::{anyhow, Error};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// A [Note] is a [Pitch] held for a [NoteTimeValue].
///
/// Two notes are equal if they sound the same for the same length, so
/// `"C#4 1/4"` equals `"Db4 1/4"`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Note {
    /// What's played.
    pub pitch: Pitch,
    /// For how long.
    pub time_value: NoteTimeValue,
}
impl Note {
    /// Creates a [Note] from its parts.
    pub const fn new(pitch: Pitch, time_value: NoteTimeValue) -> Self {
        Self { pitch, time_value }
    }
}
impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.pitch.raw_value() == other.pitch.raw_value()
            && self.time_value.raw_value() == other.time_value.raw_value()
    }
}
impl Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pitch, self.time_value)
    }
}
impl FromStr for Note {
    type Err = Error;

    /// Parses `"<pitch> <time value>"`, separated by a single space. Both
    /// halves must parse; there is no fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split(' ');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(pitch), Some(time_value), None) => {
                Ok(Self::new(pitch.parse()?, time_value.parse()?))
            }
            _ => Err(anyhow!("\"{s}\" is not a note")),
        }
    }
}
