// Copyright (c) 2024 Mike Tsao

//! Symbolic note durations and quantization onto them.

use anyhow::{anyhow, Error};
use core::{
    fmt::{self, Display},
    ops::{Div, Mul},
    str::FromStr,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumCount, EnumIter};

/// [NoteTimeValueType] enumerates the plain note values, from the breve down
/// to the sixty-fourth note. The declaration order matters: it's the order in
/// which [NoteTimeValueType::quantize()] considers candidates.
#[derive(
    Clone, Copy, Debug, Default, EnumCount, EnumIter, Eq, Hash, PartialEq, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum NoteTimeValueType {
    /// breve
    DoubleWhole,
    /// semibreve
    Whole,
    /// minim
    Half,
    /// crotchet
    #[default]
    Quarter,
    /// quaver
    Eighth,
    /// semiquaver
    Sixteenth,
    /// demisemiquaver
    ThirtySecond,
    /// hemidemisemiquaver
    SixtyFourth,
}
impl NoteTimeValueType {
    /// How many of this note fill a whole note. A quarter note is 4, a breve is
    /// 0.5.
    pub const fn denominator(&self) -> f64 {
        match self {
            NoteTimeValueType::DoubleWhole => 0.5,
            NoteTimeValueType::Whole => 1.0,
            NoteTimeValueType::Half => 2.0,
            NoteTimeValueType::Quarter => 4.0,
            NoteTimeValueType::Eighth => 8.0,
            NoteTimeValueType::Sixteenth => 16.0,
            NoteTimeValueType::ThirtySecond => 32.0,
            NoteTimeValueType::SixtyFourth => 64.0,
        }
    }

    /// The length of this note as a fraction of a whole note.
    pub fn fraction_of_whole(&self) -> f64 {
        1.0 / self.denominator()
    }

    /// Looks up a type by its [denominator](NoteTimeValueType::denominator).
    pub fn from_denominator(denominator: f64) -> anyhow::Result<Self, Error> {
        Self::iter()
            .find(|t| t.denominator() == denominator)
            .ok_or_else(|| anyhow!("{denominator} is not a note value denominator"))
    }

    /// Looks up a type by the power of two of its denominator: 0 is a whole
    /// note, 2 is a quarter note, 6 is a sixty-fourth note.
    pub fn from_exponent(exponent: u32) -> anyhow::Result<Self, Error> {
        match exponent {
            0 => Ok(NoteTimeValueType::Whole),
            1 => Ok(NoteTimeValueType::Half),
            2 => Ok(NoteTimeValueType::Quarter),
            3 => Ok(NoteTimeValueType::Eighth),
            4 => Ok(NoteTimeValueType::Sixteenth),
            5 => Ok(NoteTimeValueType::ThirtySecond),
            6 => Ok(NoteTimeValueType::SixtyFourth),
            _ => Err(anyhow!("2^{exponent} is not a note value denominator")),
        }
    }

    /// The notation fragment for this type, as in `"1/4"`.
    pub const fn fraction_str(&self) -> &'static str {
        match self {
            NoteTimeValueType::DoubleWhole => "2",
            NoteTimeValueType::Whole => "1",
            NoteTimeValueType::Half => "1/2",
            NoteTimeValueType::Quarter => "1/4",
            NoteTimeValueType::Eighth => "1/8",
            NoteTimeValueType::Sixteenth => "1/16",
            NoteTimeValueType::ThirtySecond => "1/32",
            NoteTimeValueType::SixtyFourth => "1/64",
        }
    }

    /// Snaps `times` notes of this type onto the nearest [NoteTimeValue].
    ///
    /// Every type/modifier combination is tried, types from
    /// [NoteTimeValueType::DoubleWhole] downward and modifiers in
    /// [NoteModifier] declaration order. A candidate replaces the current
    /// best only if it is strictly closer, so ties go to whichever came first.
    ///
    /// Returns None for NaN or infinite `times`.
    pub fn quantize(&self, times: f64) -> Option<NoteTimeValue> {
        if !times.is_finite() {
            log::warn!("can't quantize {times} × {self}");
            return None;
        }
        let target = times / self.denominator();
        let mut best: Option<(NoteTimeValue, f64)> = None;
        for note_type in NoteTimeValueType::iter() {
            for modifier in NoteModifier::iter() {
                let candidate = NoteTimeValue::new(note_type, modifier);
                let distance = (candidate.raw_value() - target).abs();
                if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                    best = Some((candidate, distance));
                }
            }
        }
        log::trace!("quantized {times} × {self} to {best:?}");
        best.map(|(value, _)| value)
    }
}
impl Display for NoteTimeValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fraction_str())
    }
}
impl Mul<f64> for NoteTimeValueType {
    type Output = Option<NoteTimeValue>;

    /// See [NoteTimeValueType::quantize()].
    fn mul(self, rhs: f64) -> Self::Output {
        self.quantize(rhs)
    }
}

/// [NoteModifier] stretches or shrinks a [NoteTimeValueType].
#[derive(
    Clone, Copy, Debug, Default, EnumCount, EnumIter, Eq, Hash, PartialEq, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum NoteModifier {
    /// No change.
    #[default]
    Default,
    /// Adds half again.
    Dotted,
    /// Adds a quarter again.
    DoubleDotted,
    /// Three in the time of two.
    Triplet,
    /// Five in the time of four.
    Quintuplet,
}
impl NoteModifier {
    /// The factor applied to the base note's length.
    pub const fn multiplier(&self) -> f64 {
        match self {
            NoteModifier::Default => 1.0,
            NoteModifier::Dotted => 1.5,
            NoteModifier::DoubleDotted => 1.25,
            NoteModifier::Triplet => 0.6667,
            NoteModifier::Quintuplet => 0.8,
        }
    }

    /// The notation suffix, as in the `"."` of `"1/4."`.
    pub const fn glyph(&self) -> &'static str {
        match self {
            NoteModifier::Default => "",
            NoteModifier::Dotted => ".",
            NoteModifier::DoubleDotted => "..",
            NoteModifier::Triplet => "(2/3)",
            NoteModifier::Quintuplet => "(4/5)",
        }
    }
}
impl Display for NoteModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// A [NoteTimeValue] is a symbolic duration: a [NoteTimeValueType] and its
/// [NoteModifier]. There are exactly 40 of them.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NoteTimeValue {
    /// The base note value.
    #[serde(rename = "type")]
    pub note_type: NoteTimeValueType,
    /// How the base value is stretched.
    pub modifier: NoteModifier,
}
#[allow(missing_docs)]
impl NoteTimeValue {
    pub const fn new(note_type: NoteTimeValueType, modifier: NoteModifier) -> Self {
        Self {
            note_type,
            modifier,
        }
    }

    /// The duration as a fraction of a whole note. A dotted half is 0.75.
    pub fn raw_value(&self) -> f64 {
        *self / NoteTimeValueType::Whole
    }

    /// The duration in quarter notes. A dotted half is 3.
    pub fn times_of_quarter_note(&self) -> f64 {
        *self / NoteTimeValueType::Quarter
    }

    /// All 40 values, in quantization order.
    pub fn all() -> impl Iterator<Item = NoteTimeValue> {
        NoteTimeValueType::iter().flat_map(|note_type| {
            NoteModifier::iter().map(move |modifier| NoteTimeValue::new(note_type, modifier))
        })
    }
}
impl From<NoteTimeValueType> for NoteTimeValue {
    fn from(value: NoteTimeValueType) -> Self {
        Self::new(value, NoteModifier::Default)
    }
}
impl Div<NoteTimeValueType> for NoteTimeValue {
    type Output = f64;

    /// How many notes of `rhs` fit into this duration.
    fn div(self, rhs: NoteTimeValueType) -> Self::Output {
        self.modifier.multiplier() * rhs.denominator() / self.note_type.denominator()
    }
}
impl Display for NoteTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note_type, self.modifier)
    }
}
impl FromStr for NoteTimeValue {
    type Err = Error;

    /// Matches the input against the rendering of each of the 40 values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|value| value.to_string() == s)
            .ok_or_else(|| anyhow!("\"{s}\" is not a note time value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn conversions() {
        let dotted_half = NoteTimeValue::new(NoteTimeValueType::Half, NoteModifier::Dotted);
        assert_eq!(dotted_half / NoteTimeValueType::Sixteenth, 12.0);
        assert_eq!(dotted_half / NoteTimeValueType::Whole, 0.75);
        assert_eq!(dotted_half.raw_value(), 0.75);
        assert_eq!(dotted_half.times_of_quarter_note(), 3.0);

        let double_dotted_half =
            NoteTimeValue::new(NoteTimeValueType::Half, NoteModifier::DoubleDotted);
        assert_eq!(double_dotted_half / NoteTimeValueType::Sixteenth, 10.0);
        assert_eq!(double_dotted_half / NoteTimeValueType::Whole, 0.625);
        assert_eq!(double_dotted_half.times_of_quarter_note(), 2.5);

        assert_eq!(
            NoteTimeValue::from(NoteTimeValueType::DoubleWhole).raw_value(),
            2.0
        );
    }

    #[test]
    fn denominators() {
        assert_eq!(
            NoteTimeValueType::from_denominator(8.0).unwrap(),
            NoteTimeValueType::Eighth
        );
        assert_eq!(
            NoteTimeValueType::from_denominator(0.5).unwrap(),
            NoteTimeValueType::DoubleWhole
        );
        assert!(NoteTimeValueType::from_denominator(3.0).is_err());

        for exponent in 0..=6 {
            let note_type = NoteTimeValueType::from_exponent(exponent).unwrap();
            assert_eq!(note_type.denominator(), 2.0f64.powi(exponent as i32));
        }
        assert!(NoteTimeValueType::from_exponent(7).is_err());
    }

    #[test]
    fn strings() {
        let v = "1/32(2/3)".parse::<NoteTimeValue>().unwrap();
        assert_eq!(v.note_type, NoteTimeValueType::ThirtySecond);
        assert_eq!(v.modifier, NoteModifier::Triplet);

        let v = "1/4.".parse::<NoteTimeValue>().unwrap();
        assert_eq!(v.note_type, NoteTimeValueType::Quarter);
        assert_eq!(v.modifier, NoteModifier::Dotted);

        assert_eq!(
            NoteTimeValue::new(NoteTimeValueType::Whole, NoteModifier::DoubleDotted).to_string(),
            "1.."
        );

        for bad in ["2...", "", "1/3", "1/4 ", "(2/3)", "1/4(3/2)"] {
            assert!(bad.parse::<NoteTimeValue>().is_err(), "{bad}");
        }
    }

    #[test]
    fn every_value_renders_uniquely_and_parses_back() {
        let all: Vec<NoteTimeValue> = NoteTimeValue::all().collect();
        assert_eq!(all.len(), NoteTimeValueType::COUNT * NoteModifier::COUNT);
        for value in all {
            let rendered = value.to_string();
            let parsed: NoteTimeValue = rendered.parse().unwrap();
            assert_eq!(parsed, value);
            assert_eq!(parsed.to_string(), rendered);
        }
    }

    #[test]
    fn quantization() {
        let base = NoteTimeValueType::Quarter;
        for (times, expected) in [
            (1.0, "1/4"),
            (2.0, "1/2"),
            (1.5, "1/4."),
            (5.0, "1.."),
            (6.0, "1."),
            (1.97, "1/2"),
        ] {
            assert_eq!(
                (base * times).map(|v| v.to_string()),
                Some(expected.to_string()),
                "{times} quarters"
            );
        }
    }

    #[test]
    fn quantization_is_exact_on_the_lattice() {
        for value in NoteTimeValue::all() {
            let times = value.raw_value() * NoteTimeValueType::Eighth.denominator();
            let quantized = NoteTimeValueType::Eighth.quantize(times).unwrap();
            assert_eq!(quantized.raw_value(), value.raw_value(), "{value}");
        }
    }

    #[test]
    fn quantization_ties_go_to_the_first_candidate() {
        // 2.75 whole notes sits exactly between a dotted breve (3) and a
        // double-dotted breve (2.5). Dotted is enumerated first.
        assert_eq!(
            NoteTimeValueType::Whole.quantize(2.75).unwrap(),
            NoteTimeValue::new(NoteTimeValueType::DoubleWhole, NoteModifier::Dotted)
        );
        // 2.25 sits between a plain breve (2) and a double-dotted one (2.5).
        assert_eq!(
            NoteTimeValueType::Whole.quantize(2.25).unwrap(),
            NoteTimeValue::new(NoteTimeValueType::DoubleWhole, NoteModifier::Default)
        );
        assert_eq!(
            NoteTimeValueType::Whole.quantize(0.875).unwrap(),
            NoteTimeValue::new(NoteTimeValueType::Whole, NoteModifier::Quintuplet)
        );
    }

    #[test]
    fn quantization_extremes() {
        assert_eq!(
            NoteTimeValueType::Quarter.quantize(0.0).unwrap(),
            NoteTimeValue::new(NoteTimeValueType::SixtyFourth, NoteModifier::Triplet)
        );
        assert_eq!(
            NoteTimeValueType::Quarter.quantize(1e12).unwrap(),
            NoteTimeValue::new(NoteTimeValueType::DoubleWhole, NoteModifier::Dotted)
        );
        assert!(NoteTimeValueType::Quarter.quantize(f64::NAN).is_none());
        assert!((NoteTimeValueType::Quarter * f64::INFINITY).is_none());
    }

    #[test]
    fn serialization() {
        let value = NoteTimeValue::new(NoteTimeValueType::ThirtySecond, NoteModifier::DoubleDotted);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"type":"thirty-second","modifier":"double-dotted"}"#);
        assert_eq!(serde_json::from_str::<NoteTimeValue>(&json).unwrap(), value);
    }
}
