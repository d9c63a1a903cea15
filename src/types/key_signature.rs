// Copyright (c) 2024 Mike Tsao

use super::Accidental;
use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

/// Major or minor.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum KeySignatureKind {
    #[default]
    Major,
    Minor,
}
impl Display for KeySignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeySignatureKind::Major => "Major",
            KeySignatureKind::Minor => "minor",
        })
    }
}

/// The sharps or flats written after the clef. This is a label only; it
/// doesn't affect how pitches are spelled.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeySignature {
    /// How many sharps (positive) or flats (negative) are written.
    pub accidental: Accidental,
    /// Major or minor.
    pub kind: KeySignatureKind,
}
impl KeySignature {
    #[allow(missing_docs)]
    pub const fn new(accidental: Accidental, kind: KeySignatureKind) -> Self {
        Self { accidental, kind }
    }
}
