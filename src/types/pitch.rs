// Copyright (c) 2024 Mike Tsao

//! Pitches: a spelled [Key] in a particular octave.

use super::{key::SEMITONES_PER_OCTAVE, FrequencyHz, Key, KeyType};
use anyhow::{anyhow, Error};
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    ops::{Add, Sub},
    str::FromStr,
};
use derivative::Derivative;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The raw value of A4, whose frequency is [FrequencyHz::A4].
const A4_RAW_VALUE: i64 = 69;

/// Octaves searched by [Pitch::nearest()].
const NEAREST_OCTAVES: core::ops::RangeInclusive<i32> = 1..=7;

static PITCH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Ga-g])([#♯♭b𝄪𝄫]*)(-?)(\d+)$").expect("pitch pattern is a valid regex")
});

/// A [Pitch] is a [Key] in an octave. Middle C is C4, and A4 is 440 Hz.
///
/// The octave is deliberately unbounded. Negative octaves and raw values above
/// 127 are legal; they just don't correspond to anything a MIDI instrument
/// will play.
///
/// `==`, `<`, and friends compare raw values, so B♯3 == C4. Use
/// [Pitch::is_identical()] to compare spelling and octave exactly.
#[derive(Clone, Copy, Debug, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct Pitch {
    /// The spelled pitch class.
    pub key: Key,
    /// Scientific-pitch-notation octave.
    #[derivative(Default(value = "4"))]
    pub octave: i32,
}
#[allow(missing_docs)]
impl Pitch {
    pub const C4: Pitch = Pitch::new(Key::natural(KeyType::C), 4);
    pub const A4: Pitch = Pitch::new(Key::natural(KeyType::A), 4);

    pub const fn new(key: Key, octave: i32) -> Self {
        Self { key, octave }
    }

    /// Builds a [Pitch] from a MIDI-style note number, spelling black keys
    /// with sharps or flats as requested. Numbers outside 0..=127 are fine;
    /// negative numbers land in negative octaves. Octaves beyond the range of
    /// `i32` saturate.
    pub fn from_midi_note(midi_note: i64, prefer_sharps: bool) -> Self {
        let semitones_per_octave = SEMITONES_PER_OCTAVE as i64;
        let octave = (midi_note.div_euclid(semitones_per_octave) - 1)
            .clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        let index = midi_note.rem_euclid(semitones_per_octave) as usize;
        let table = if prefer_sharps {
            &Key::KEYS_WITH_SHARPS
        } else {
            &Key::KEYS_WITH_FLATS
        };
        Self::new(table[index], octave)
    }

    /// The MIDI-style note number. C4 is 60. The key's offset isn't reduced
    /// modulo 12, so B♯3 and C4 both come out as 60. Every octave and
    /// accidental fits in an `i64`.
    pub const fn raw_value(&self) -> i64 {
        self.key.semitones() + (self.octave as i64 + 1) * SEMITONES_PER_OCTAVE as i64
    }

    /// Equal-tempered frequency relative to A4 = 440 Hz.
    pub fn frequency(&self) -> FrequencyHz {
        let semitones_from_a4 = (self.raw_value() - A4_RAW_VALUE) as f64;
        FrequencyHz(
            FrequencyHz::A4.0 * 2.0f64.powf(semitones_from_a4 / SEMITONES_PER_OCTAVE as f64),
        )
    }

    /// Finds the sharp-spelled pitch in octaves 1 through 7 whose frequency is
    /// closest to `frequency`. When two candidates are equally close, the one
    /// found first wins (lower octave, then C upward). Returns None only for
    /// non-finite input.
    pub fn nearest(frequency: FrequencyHz) -> Option<Pitch> {
        if !frequency.0.is_finite() {
            log::warn!("can't find the nearest pitch to {}", frequency);
            return None;
        }
        let mut best: Option<(Pitch, f64)> = None;
        for octave in NEAREST_OCTAVES {
            for key in Key::KEYS_WITH_SHARPS {
                let candidate = Pitch::new(key, octave);
                let distance = candidate.frequency().distance_to(frequency);
                if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                    best = Some((candidate, distance));
                }
            }
        }
        log::trace!("nearest pitch to {frequency} is {best:?}");
        best.map(|(pitch, _)| pitch)
    }

    /// Exact equality: same spelling and same octave.
    pub fn is_identical(&self, other: &Pitch) -> bool {
        self.key.is_identical(&other.key) && self.octave == other.octave
    }
}
impl From<i32> for Pitch {
    /// Interprets the value as a MIDI note number, spelled with sharps.
    fn from(value: i32) -> Self {
        Self::from_midi_note(value.into(), true)
    }
}
impl From<Pitch> for i64 {
    fn from(value: Pitch) -> Self {
        value.raw_value()
    }
}
impl Add<i32> for Pitch {
    type Output = Self;

    /// Raises by `rhs` semitones. The result is respelled with sharps.
    fn add(self, rhs: i32) -> Self::Output {
        Self::from_midi_note(self.raw_value() + rhs as i64, true)
    }
}
impl Sub<i32> for Pitch {
    type Output = Self;

    /// Lowers by `rhs` semitones. The result is respelled with sharps.
    fn sub(self, rhs: i32) -> Self::Output {
        Self::from_midi_note(self.raw_value() - rhs as i64, true)
    }
}
impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        self.raw_value() == other.raw_value()
    }
}
impl Eq for Pitch {}
impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw_value().cmp(&other.raw_value())
    }
}
impl Hash for Pitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw_value().hash(state);
    }
}
impl Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key, self.octave)
    }
}
impl FromStr for Pitch {
    type Err = Error;

    /// Accepts `<letter><accidentals><octave>`, where the octave may be
    /// negative: `"C4"`, `"f#-5"`, `"Bb3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = PITCH_PATTERN
            .captures(s)
            .ok_or_else(|| anyhow!("\"{s}\" is not a pitch"))?;
        let key: Key = format!("{}{}", &captures[1], &captures[2]).parse()?;
        let magnitude: i32 = captures[4]
            .parse()
            .map_err(|e| anyhow!("octave in \"{s}\" is out of range: {e}"))?;
        let octave = if &captures[3] == "-" {
            -magnitude
        } else {
            magnitude
        };
        Ok(Self::new(key, octave))
    }
}
impl From<&str> for Pitch {
    /// Lenient parsing for literals. Anything unparseable becomes C4.
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_else(|e| {
            log::warn!("{e}; substituting {}", Pitch::C4);
            Pitch::C4
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Accidental;
    use float_cmp::approx_eq;
    use more_asserts::{assert_ge, assert_gt, assert_lt};
    use std::collections::HashSet;

    #[test]
    fn pitch_from_midi_note() {
        let c0 = Pitch::from(12);
        assert!(
            c0.octave == 0
                && c0.key.accidental == Accidental::NATURAL
                && c0.key.key_type == KeyType::C
        );
        assert_eq!(c0 - 12, Pitch::from(0));
        assert_eq!((c0 - 12).raw_value(), 0);

        let c4 = Pitch::from(60);
        assert_eq!(c4.key.key_type, KeyType::C);
        assert_eq!(c4.octave, 4);

        assert_eq!(Pitch::from_midi_note(127, true).key, Key::natural(KeyType::G));
        assert_eq!(Pitch::from_midi_note(0, true).key, Key::natural(KeyType::C));
        assert!(Pitch::from_midi_note(66, false)
            .key
            .is_identical(&Key::new(KeyType::G, Accidental::FLAT)));
        assert!(Pitch::from_midi_note(66, true)
            .key
            .is_identical(&Key::new(KeyType::F, Accidental::SHARP)));
    }

    #[test]
    fn raw_value_round_trips_everywhere() {
        for raw in -40..200 {
            for prefer_sharps in [true, false] {
                assert_eq!(Pitch::from_midi_note(raw, prefer_sharps).raw_value(), raw);
            }
        }
        let low = Pitch::from(-1);
        assert_eq!(low.octave, -2);
        assert!(low.key.is_identical(&Key::natural(KeyType::B)));
    }

    #[test]
    fn unreduced_key_offsets() {
        let b_sharp_3 = Pitch::from("B#3");
        assert_eq!(b_sharp_3.raw_value(), 60);
        assert_eq!(b_sharp_3, Pitch::C4);
        assert!(!b_sharp_3.is_identical(&Pitch::C4));

        let c_flat_4 = Pitch::from("Cb4");
        assert_eq!(c_flat_4.raw_value(), 59);
        assert_eq!(c_flat_4, Pitch::from("B3"));
    }

    #[test]
    fn pitch_strings() {
        let p = Pitch::from("f#-5");
        assert!(p.key.is_identical(&Key::new(KeyType::F, Accidental::SHARP)));
        assert_eq!(p.octave, -5);

        let p = Pitch::from("A#3");
        assert!(p.key.is_identical(&Key::new(KeyType::A, Accidental::SHARP)));
        assert_eq!(p.octave, 3);

        let p = Pitch::from("F4");
        assert!(p.key.is_identical(&Key::natural(KeyType::F)));
        assert_eq!(p.octave, 4);

        assert_eq!(Pitch::from("Bb3").to_string(), "B♭3");
        assert_eq!(Pitch::from("c##-1").to_string(), "C𝄪-1");
    }

    #[test]
    fn strict_and_lenient_parsing() {
        for bad in ["", "C", "H4", "C#", "4C", "C4 ", "C--4", "Cx4", "C99999999999"] {
            assert!(bad.parse::<Pitch>().is_err(), "{bad}");
            assert!(Pitch::from(bad).is_identical(&Pitch::C4), "{bad}");
        }
    }

    #[test]
    fn huge_octaves_compare_without_overflow() {
        let high: Pitch = "C999999999".parse().unwrap();
        assert_eq!(high.raw_value(), 12_000_000_000);
        assert_ne!(high, Pitch::C4);
        assert_gt!(high, Pitch::C4);
        assert!(high.frequency().0.is_infinite());

        let low: Pitch = "B-999999999".parse().unwrap();
        assert_lt!(low, Pitch::C4);
        assert_lt!(low, high);

        let set: HashSet<Pitch> = [high, low, Pitch::C4].into_iter().collect();
        assert_eq!(set.len(), 3);

        let raised = high + 1;
        assert!(raised.is_identical(&Pitch::new(
            Key::new(KeyType::C, Accidental::SHARP),
            999_999_999
        )));
        assert_eq!(raised.raw_value(), high.raw_value() + 1);
    }

    #[test]
    fn octaves_saturate_at_the_ends_of_i32() {
        let top = Pitch::new(Key::natural(KeyType::B), i32::MAX);
        let past_top = top + 1;
        assert_eq!(past_top.octave, i32::MAX);
        assert_eq!(past_top.key.key_type, KeyType::C);

        let bottom = Pitch::new(Key::natural(KeyType::C), i32::MIN);
        let past_bottom = bottom - 1;
        assert_eq!(past_bottom.octave, i32::MIN);
        assert_eq!(past_bottom.key.key_type, KeyType::B);

        let wild = Pitch::new(Key::new(KeyType::B, Accidental::sharps(i32::MAX)), i32::MAX);
        assert_gt!(wild, top);
    }

    #[test]
    fn rendered_pitches_parse_back() {
        for raw in -30..150 {
            for prefer_sharps in [true, false] {
                let pitch = Pitch::from_midi_note(raw, prefer_sharps);
                let parsed: Pitch = pitch.to_string().parse().unwrap();
                assert!(parsed.is_identical(&pitch), "{pitch}");
            }
        }
    }

    #[test]
    fn frequency() {
        assert_eq!(Pitch::A4.frequency(), FrequencyHz::A4);
        assert_eq!(Pitch::from(69).frequency().0, 440.0);
        assert_eq!(Pitch::from("A5").frequency().0, 880.0);
        assert_eq!(Pitch::from("A3").frequency().0, 220.0);
        assert!(approx_eq!(
            f64,
            Pitch::C4.frequency().0,
            261.625_565_300_598_6,
            epsilon = 0.000_000_001
        ));
    }

    #[test]
    fn nearest_frequency() {
        let a4 = Pitch::nearest(FrequencyHz::A4).unwrap();
        assert_eq!(a4, Pitch::A4);
        assert!(a4.is_identical(&Pitch::A4));

        assert_eq!(Pitch::nearest(FrequencyHz(445.0)).unwrap(), Pitch::A4);
        assert_eq!(Pitch::nearest(FrequencyHz(262.0)).unwrap(), Pitch::C4);

        // Out-of-range targets clamp to the ends of the search space.
        assert_eq!(Pitch::nearest(FrequencyHz(1.0)).unwrap(), Pitch::from("C1"));
        assert_eq!(
            Pitch::nearest(FrequencyHz(100_000.0)).unwrap(),
            Pitch::from("B7")
        );

        // Black keys come back spelled with sharps.
        let a_sharp = Pitch::nearest(Pitch::from("Bb4").frequency()).unwrap();
        assert!(a_sharp.is_identical(&Pitch::from("A#4")));
    }

    #[test]
    fn nearest_rejects_non_finite_input() {
        assert!(Pitch::nearest(FrequencyHz(f64::NAN)).is_none());
        assert!(Pitch::nearest(FrequencyHz(f64::INFINITY)).is_none());
        assert!(Pitch::nearest(FrequencyHz(f64::NEG_INFINITY)).is_none());
    }

    #[test]
    fn ordering() {
        let c4 = Pitch::from("C4");
        assert_gt!(c4, Pitch::from("B3"));
        assert_ge!(c4, Pitch::from("C4"));
        assert_lt!(c4, Pitch::from("C#4"));
        assert_ge!(c4, Pitch::from("B#3"));
        assert_lt!(Pitch::from("C-1"), Pitch::from("C0"));
    }

    #[test]
    fn offset_respells_with_sharps() {
        let d_flat = Pitch::from("Db4");
        assert_eq!(d_flat + 0, d_flat);
        assert!(!(d_flat + 0).is_identical(&d_flat));
        assert!((d_flat + 0).is_identical(&Pitch::from("C#4")));
        assert!((Pitch::C4 - 0).is_identical(&Pitch::C4));
        assert_eq!(Pitch::C4 + 9, Pitch::A4);
        assert_eq!(Pitch::A4 - 21, Pitch::from("C3"));
    }

    #[test]
    fn hashing_follows_equality() {
        let set: HashSet<Pitch> = ["C#4", "Db4", "B##3", "C4", "B#3"]
            .into_iter()
            .map(Pitch::from)
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serialization() {
        let json = serde_json::to_string(&Pitch::from("Eb2")).unwrap();
        assert_eq!(json, r#"{"key":{"type":"e","accidental":-1},"octave":2}"#);
        let pitch: Pitch = serde_json::from_str(&json).unwrap();
        assert!(pitch.is_identical(&Pitch::from("Eb2")));
    }
}
