// Copyright (c) 2024 Mike Tsao

//! Numeric types used throughout the system.

use core::fmt;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Frequency in [Hertz](https://en.wikipedia.org/wiki/Hertz).
#[derive(Synonym, Serialize, Deserialize)]
#[synonym(skip(Display))]
#[serde(rename_all = "kebab-case")]
pub struct FrequencyHz(pub f64);
impl FrequencyHz {
    /// Concert pitch, A4.
    pub const A4: FrequencyHz = FrequencyHz(440.0);

    /// Distance between two frequencies, ignoring direction.
    pub fn distance_to(&self, other: FrequencyHz) -> f64 {
        (self.0 - other.0).abs()
    }
}
impl fmt::Display for FrequencyHz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0.2} Hz", self.0)
    }
}
