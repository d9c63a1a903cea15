// Copyright (c) 2024 Mike Tsao

//! Letter names and spelled pitch classes.

use super::Accidental;
use anyhow::{anyhow, Error};
use core::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

/// The number of semitones in an octave.
pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// [KeyType] is one of the seven diatonic letter names. Its discriminant is
/// its position in the cycle C D E F G A B.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    EnumCount,
    EnumIter,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum KeyType {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}
impl KeyType {
    /// Every letter, in diatonic order starting from C.
    pub const ALL: [KeyType; 7] = [
        KeyType::C,
        KeyType::D,
        KeyType::E,
        KeyType::F,
        KeyType::G,
        KeyType::A,
        KeyType::B,
    ];

    /// Position in the letter cycle, 0 for C through 6 for B.
    pub const fn position(&self) -> usize {
        *self as usize
    }

    /// Semitones above C for the natural form of this letter.
    pub const fn semitones(&self) -> i32 {
        match self {
            KeyType::C => 0,
            KeyType::D => 2,
            KeyType::E => 4,
            KeyType::F => 5,
            KeyType::G => 7,
            KeyType::A => 9,
            KeyType::B => 11,
        }
    }

    /// Returns the letter `steps` diatonic positions away. Negative values
    /// walk downward. The result wraps with Euclidean modulo, so any `i32`
    /// is valid and `key_at(0)` is `self`.
    pub fn key_at(&self, steps: i32) -> KeyType {
        let len = Self::ALL.len() as i64;
        let index = (self.position() as i64 + steps as i64).rem_euclid(len);
        Self::ALL[index as usize]
    }

    /// Maps a letter, in either case, to its [KeyType].
    pub fn from_char(c: char) -> Option<KeyType> {
        match c.to_ascii_uppercase() {
            'C' => Some(KeyType::C),
            'D' => Some(KeyType::D),
            'E' => Some(KeyType::E),
            'F' => Some(KeyType::F),
            'G' => Some(KeyType::G),
            'A' => Some(KeyType::A),
            'B' => Some(KeyType::B),
            _ => None,
        }
    }
}
impl Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = self.into();
        f.write_str(s)
    }
}
impl FromStr for KeyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| anyhow!("\"{s}\" is not a key letter"))
            }
            _ => Err(anyhow!("\"{s}\" is not a key letter")),
        }
    }
}

/// A [Key] is a spelled pitch class: a letter plus an [Accidental].
///
/// `==` is *enharmonic* equality. C♭ equals B, and C𝄪 equals D, because they
/// land on the same semitone class. Use [Key::is_identical()] when the
/// spelling itself matters.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Key {
    /// The letter name.
    #[serde(rename = "type")]
    pub key_type: KeyType,
    /// How far the letter is raised or lowered.
    pub accidental: Accidental,
}
impl Key {
    /// The twelve semitone classes spelled with sharps.
    pub const KEYS_WITH_SHARPS: [Key; 12] = [
        Key::natural(KeyType::C),
        Key::new(KeyType::C, Accidental::SHARP),
        Key::natural(KeyType::D),
        Key::new(KeyType::D, Accidental::SHARP),
        Key::natural(KeyType::E),
        Key::natural(KeyType::F),
        Key::new(KeyType::F, Accidental::SHARP),
        Key::natural(KeyType::G),
        Key::new(KeyType::G, Accidental::SHARP),
        Key::natural(KeyType::A),
        Key::new(KeyType::A, Accidental::SHARP),
        Key::natural(KeyType::B),
    ];

    /// The twelve semitone classes spelled with flats.
    pub const KEYS_WITH_FLATS: [Key; 12] = [
        Key::natural(KeyType::C),
        Key::new(KeyType::D, Accidental::FLAT),
        Key::natural(KeyType::D),
        Key::new(KeyType::E, Accidental::FLAT),
        Key::natural(KeyType::E),
        Key::natural(KeyType::F),
        Key::new(KeyType::G, Accidental::FLAT),
        Key::natural(KeyType::G),
        Key::new(KeyType::A, Accidental::FLAT),
        Key::natural(KeyType::A),
        Key::new(KeyType::B, Accidental::FLAT),
        Key::natural(KeyType::B),
    ];

    #[allow(missing_docs)]
    pub const fn new(key_type: KeyType, accidental: Accidental) -> Self {
        Self {
            key_type,
            accidental,
        }
    }

    /// A [Key] with no accidental.
    pub const fn natural(key_type: KeyType) -> Self {
        Self::new(key_type, Accidental::NATURAL)
    }

    /// Semitones above C, without reducing to a single octave. C♭ is -1 and
    /// B♯ is 12. Widened to `i64` so that no accidental can overflow it.
    pub const fn semitones(&self) -> i64 {
        self.key_type.semitones() as i64 + self.accidental.semitones() as i64
    }

    /// The semitone class, always in `0..12`.
    pub const fn semitone_class(&self) -> i32 {
        self.semitones().rem_euclid(SEMITONES_PER_OCTAVE as i64) as i32
    }

    /// Exact equality: same letter and same accidental.
    pub fn is_identical(&self, other: &Key) -> bool {
        self.key_type == other.key_type && self.accidental == other.accidental
    }
}
impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.semitone_class() == other.semitone_class()
    }
}
impl Eq for Key {}
impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semitone_class().hash(state);
    }
}
impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key_type, self.accidental)
    }
}
impl FromStr for Key {
    type Err = Error;

    /// Accepts `<letter><accidentals>`, for example `"c"`, `"F#"`, `"Bbb"`, or
    /// `"a##b"` (which nets out to A♯).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let key_type = chars
            .next()
            .and_then(KeyType::from_char)
            .ok_or_else(|| anyhow!("\"{s}\" does not start with a key letter"))?;
        let accidental = chars
            .as_str()
            .parse::<Accidental>()
            .map_err(|e| anyhow!("\"{s}\" is not a key: {e}"))?;
        Ok(Self::new(key_type, accidental))
    }
}
impl From<&str> for Key {
    /// Lenient parsing for literals. Anything unparseable becomes natural C.
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_else(|e| {
            log::warn!("{e}; substituting {}", Key::default());
            Key::default()
        })
    }
}
impl From<KeyType> for Key {
    fn from(value: KeyType) -> Self {
        Self::natural(value)
    }
}
