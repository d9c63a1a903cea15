// Copyright (c) 2024 Mike Tsao

//! Handles wall-clock, sample, and musical time.

use super::{Note, NoteModifier, NoteTimeValue, NoteTimeValueType};
use anyhow::{anyhow, Error};
use chrono::{DateTime, Utc};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use derivative::Derivative;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

static TIME_SIGNATURE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)/(\d+)$").expect("time signature pattern is a valid regex"));

/// Beats per minute.
#[derive(Synonym, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[synonym(skip(Default, Display))]
#[serde(rename_all = "kebab-case")]
pub struct Bpm(#[derivative(Default(value = "120.0"))] pub f64);
impl fmt::Display for Bpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:0.2} BPM", self.0))
    }
}
#[allow(missing_docs)]
impl Bpm {
    pub const DEFAULT_BPM: f64 = 120.0;

    /// Tempo must be positive and finite. Anything else becomes
    /// [Bpm::DEFAULT_BPM].
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            log::warn!("{value} isn't a usable tempo; substituting {}", Self::DEFAULT_BPM);
            Self(Self::DEFAULT_BPM)
        }
    }
}

/// Represents the [seconds](https://en.wikipedia.org/wiki/Second) unit of time.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Seconds(pub f64);

/// A wall-clock duration, in seconds.
pub type PhysicalDuration = Seconds;

/// Samples per second. Always a positive integer; cannot be zero.
#[derive(Synonym, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[synonym(skip(Default))]
#[serde(rename_all = "kebab-case")]
pub struct SampleRate(#[derivative(Default(value = "44100"))] pub usize);
#[allow(missing_docs)]
impl SampleRate {
    pub const DEFAULT_SAMPLE_RATE: usize = 44100;

    pub const fn new(value: usize) -> Self {
        if value != 0 {
            Self(value)
        } else {
            Self(Self::DEFAULT_SAMPLE_RATE)
        }
    }
}
impl From<SampleRate> for f64 {
    fn from(value: SampleRate) -> Self {
        value.0 as f64
    }
}

/// A position in a piece, measured in beats.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MusicTimeStamp(pub f64);
impl MusicTimeStamp {
    /// Renders as `🎼: 1.000`.
    pub fn description(&self) -> String {
        format!("🎼: {:.3}", self.0)
    }
}

/// A length of music, measured in beats.
pub type MusicDuration = MusicTimeStamp;

/// A wall-clock instant, in seconds since the Unix epoch.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PhysicalTimeStamp(pub f64);
impl PhysicalTimeStamp {
    /// The current time, to the microsecond.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_micros() as f64 / 1_000_000.0)
    }

    /// Renders the instant in UTC as `YYYY-MM-DD HH:MM:SS`, or None if it
    /// can't be represented as a calendar date.
    pub fn description(&self) -> Option<String> {
        if !self.0.is_finite() {
            return None;
        }
        let seconds = self.0.floor();
        let nanoseconds = ((self.0 - seconds) * 1_000_000_000.0) as u32;
        DateTime::<Utc>::from_timestamp(seconds as i64, nanoseconds)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

/// [TimeSignature] represents a music [time
/// signature](https://en.wikipedia.org/wiki/Time_signature).
///
/// The top number of a time signature tells how many beats are in a measure.
/// The bottom number tells the value of a beat. For example, if the bottom
/// number is 4, then a beat is a quarter-note. And if the top number is 4, then
/// you should expect to see four beats in a measure, or four quarter-notes in a
/// measure.
#[derive(Clone, Copy, Debug, Derivative, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct TimeSignature {
    /// The number of beats in a measure.
    #[derivative(Default(value = "4"))]
    pub beats: usize,

    /// The value of a beat.
    pub note_time_value: NoteTimeValueType,
}
impl Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A breve beat has no integer division and shows as 0.
        f.write_fmt(format_args!(
            "{}/{}",
            self.beats,
            self.note_time_value.denominator() as usize
        ))
    }
}
#[allow(missing_docs)]
impl TimeSignature {
    /// C time = common time = 4/4
    /// <https://en.wikipedia.org/wiki/Time_signature>
    pub const COMMON_TIME: Self = TimeSignature::new(4, NoteTimeValueType::Quarter);

    /// 𝄵 time = cut common time = alla breve = 2/2
    /// <https://en.wikipedia.org/wiki/Time_signature>
    pub const CUT_TIME: Self = TimeSignature::new(2, NoteTimeValueType::Half);

    pub const fn new(beats: usize, note_time_value: NoteTimeValueType) -> Self {
        Self {
            beats,
            note_time_value,
        }
    }

    /// Creates a [TimeSignature] from the two numbers written on a staff. The
    /// bottom number must be a power of two from 1 to 64.
    pub fn new_with(beats: usize, division: usize) -> anyhow::Result<Self, Error> {
        if beats == 0 {
            return Err(anyhow!("Time signature top can't be zero."));
        }
        if division == 0 {
            return Err(anyhow!("Time signature bottom was out of range."));
        }
        let note_time_value = NoteTimeValueType::from_denominator(division as f64)
            .map_err(|e| anyhow!("Time signature bottom was out of range: {e}"))?;
        Ok(Self::new(beats, note_time_value))
    }

    /// The beat value as a [NoteTimeValue].
    pub fn beat(&self) -> NoteTimeValue {
        NoteTimeValue::new(self.note_time_value, NoteModifier::Default)
    }
}
impl FromStr for TimeSignature {
    type Err = Error;

    /// Parses `"<beats>/<division>"`, as in `"6/8"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = TIME_SIGNATURE_PATTERN
            .captures(s)
            .ok_or_else(|| anyhow!("\"{s}\" is not a time signature"))?;
        let beats: usize = captures[1]
            .parse()
            .map_err(|e| anyhow!("\"{s}\" has an unusable top: {e}"))?;
        let division: usize = captures[2]
            .parse()
            .map_err(|e| anyhow!("\"{s}\" has an unusable bottom: {e}"))?;
        Self::new_with(beats, division)
    }
}
impl From<&str> for TimeSignature {
    /// Lenient parsing for literals. Anything unparseable becomes 4/4.
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_else(|e| {
            log::warn!("{e}; substituting {}", TimeSignature::COMMON_TIME);
            TimeSignature::COMMON_TIME
        })
    }
}

/// A [Tempo] turns symbolic durations into seconds and samples. It bundles a
/// [TimeSignature] (which decides what a beat is), a [Bpm], and a
/// [SampleRate]. Every query is a pure function of those three.
///
/// If your song is playing at 120 beats per minute in 4/4, then a beat is a
/// quarter note and lasts half a second, so a whole note lasts two seconds,
/// or 88,200 samples at 44.1 kHz.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Tempo {
    /// Decides which note value is one beat.
    pub time_signature: TimeSignature,
    /// Beats per minute. The constructors guarantee it's positive; if you
    /// set it directly, durations are only meaningful when it is.
    pub bpm: Bpm,
    /// Used by [Tempo::sample_length()].
    pub sample_rate: SampleRate,
}
impl Tempo {
    /// Creates a [Tempo] at the default sample rate.
    pub fn new(time_signature: TimeSignature, bpm: Bpm) -> Self {
        Self::new_with_sample_rate(time_signature, bpm, SampleRate::default())
    }

    /// Zero, negative, or non-finite tempos are replaced with the default
    /// [Bpm], and a zero sample rate with the default [SampleRate].
    pub fn new_with_sample_rate(
        time_signature: TimeSignature,
        bpm: Bpm,
        sample_rate: SampleRate,
    ) -> Self {
        Self {
            time_signature,
            bpm: Bpm::new(bpm.0),
            sample_rate: SampleRate::new(sample_rate.0),
        }
    }

    /// Wall-clock length of one beat.
    pub fn seconds_per_beat(&self) -> Seconds {
        Seconds(60.0 / self.bpm.0)
    }

    /// Wall-clock length of `note` at this tempo.
    pub fn duration(&self, note: &NoteTimeValue) -> Seconds {
        let beats = note.raw_value() / self.time_signature.note_time_value.fraction_of_whole();
        Seconds(beats * self.seconds_per_beat().0)
    }

    /// Wall-clock length of one beat, computed through [Tempo::duration()].
    /// Always equal to [Tempo::seconds_per_beat()].
    pub fn duration_per_beat(&self) -> Seconds {
        self.duration(&self.time_signature.beat())
    }

    /// How many beats `note` occupies.
    pub fn beats(&self, note: &Note) -> f64 {
        note.time_value.raw_value() * self.time_signature.note_time_value.denominator()
    }

    /// How many samples `note` lasts. Not rounded.
    pub fn sample_length(&self, note: &NoteTimeValue) -> f64 {
        self.duration(note).0 * f64::from(self.sample_rate)
    }
}
