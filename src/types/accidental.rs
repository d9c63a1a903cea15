// Copyright (c) 2024 Mike Tsao

//! Sharps, flats, and the arithmetic between them.

use anyhow::{anyhow, Error};
use core::{
    fmt::{self, Display},
    ops::{Add, Div, Mul, Neg, Sub},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// An [Accidental] raises or lowers a [KeyType](super::KeyType) by a whole
/// number of semitones. Positive values are sharps, negative values are flats,
/// and zero is natural.
///
/// There is no upper bound. `Accidental::sharps(23)` is a perfectly good
/// value; it just happens to spell something unusual. Equality and ordering
/// are by semitone offset, so `Accidental::sharps(2) == Accidental::DOUBLE_SHARP`.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Accidental(pub i32);

#[allow(missing_docs)]
impl Accidental {
    pub const NATURAL: Accidental = Accidental(0);
    pub const SHARP: Accidental = Accidental(1);
    pub const FLAT: Accidental = Accidental(-1);
    pub const DOUBLE_SHARP: Accidental = Accidental(2);
    pub const DOUBLE_FLAT: Accidental = Accidental(-2);

    /// Raises by `amount` semitones.
    pub const fn sharps(amount: i32) -> Self {
        Self(amount)
    }

    /// Lowers by `amount` semitones.
    pub const fn flats(amount: i32) -> Self {
        Self(-amount)
    }

    /// The signed semitone offset.
    pub const fn semitones(&self) -> i32 {
        self.0
    }

    pub const fn is_natural(&self) -> bool {
        self.0 == 0
    }

    /// The semitone value of a single accidental glyph, if it is one.
    pub(crate) fn glyph_value(c: char) -> Option<i32> {
        match c {
            '#' | '♯' => Some(1),
            'b' | '♭' => Some(-1),
            '𝄪' => Some(2),
            '𝄫' => Some(-2),
            _ => None,
        }
    }
}
impl Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => Ok(()),
            1 => f.write_str("♯"),
            -1 => f.write_str("♭"),
            2 => f.write_str("𝄪"),
            -2 => f.write_str("𝄫"),
            n if n > 0 => f.write_str(&"♯".repeat(n as usize)),
            n => f.write_str(&"♭".repeat(n.unsigned_abs() as usize)),
        }
    }
}
impl FromStr for Accidental {
    type Err = Error;

    /// Sums every glyph in the string, so mixed runs like `"##b"` resolve to
    /// their net value. The empty string is natural.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars().try_fold(Self::NATURAL, |acc, c| {
            Self::glyph_value(c)
                .map(|v| acc + v)
                .ok_or_else(|| anyhow!("'{c}' is not an accidental (in \"{s}\")"))
        })
    }
}
impl From<i32> for Accidental {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
impl From<Accidental> for i32 {
    fn from(value: Accidental) -> Self {
        value.0
    }
}
impl PartialEq<i32> for Accidental {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}
impl PartialEq<Accidental> for i32 {
    fn eq(&self, other: &Accidental) -> bool {
        *self == other.0
    }
}
impl Add for Accidental {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl Add<i32> for Accidental {
    type Output = Self;

    fn add(self, rhs: i32) -> Self::Output {
        Self(self.0 + rhs)
    }
}
impl Sub for Accidental {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl Sub<i32> for Accidental {
    type Output = Self;

    fn sub(self, rhs: i32) -> Self::Output {
        Self(self.0 - rhs)
    }
}
impl Mul<i32> for Accidental {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl Div<i32> for Accidental {
    type Output = Self;

    /// Truncating integer division of the offset. Dividing by zero yields
    /// [Accidental::NATURAL] rather than panicking.
    fn div(self, rhs: i32) -> Self::Output {
        Self(self.0.checked_div(rhs).unwrap_or_default())
    }
}
impl Neg for Accidental {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
