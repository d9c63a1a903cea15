// Copyright (c) 2024 Mike Tsao

#![deny(missing_docs, unused_imports, unused_variables)]

//! music-symbol models musical pitch, note duration, and tempo as plain
//! values.
//!
//! * A [Pitch] is a spelled [Key] in an octave. It knows its MIDI-style raw
//! value and its equal-tempered frequency, and [Pitch::nearest()] goes the
//! other way, from a frequency to a pitch.
//! * A [NoteTimeValue] is a symbolic duration like a dotted quarter.
//! [NoteTimeValueType::quantize()] snaps an arbitrary length onto the nearest
//! one.
//! * A [Tempo] turns symbolic durations into [Seconds] and sample counts.
//!
//! Every parseable type has two ways in. [FromStr](core::str::FromStr) is
//! strict and reports what went wrong. `From<&str>`, where offered, never
//! fails and falls back to a documented default, which is handy for literals:
//!
//! ```
//! use music_symbol::prelude::*;
//!
//! let strict: anyhow::Result<Pitch> = "F#-5".parse();
//! assert!(strict.is_ok());
//! assert!("nonsense".parse::<Pitch>().is_err());
//! assert_eq!(Pitch::from("nonsense"), Pitch::C4);
//!
//! let tempo = Tempo::new(TimeSignature::from("4/4"), Bpm(120.0));
//! let dotted_quarter = (NoteTimeValueType::Quarter * 1.5).unwrap();
//! assert_eq!(dotted_quarter.to_string(), "1/4.");
//! assert_eq!(tempo.duration(&dotted_quarter).0, 0.75);
//! ```

/// A collection of imports that are useful to users of this crate. `use
/// music_symbol::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::types::prelude::*;
}

pub use types::{
    Accidental, Bpm, FrequencyHz, Key, KeyType, Note, NoteModifier, NoteTimeValue,
    NoteTimeValueType, Pitch, SampleRate, Seconds, Tempo, TimeSignature,
};

pub mod types;
