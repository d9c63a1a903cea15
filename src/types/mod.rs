// Copyright (c) 2024 Mike Tsao

//! The musical value types: pitches, durations, and tempo.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        Accidental, Bpm, FrequencyHz, Key, KeyType, Note, NoteModifier, NoteTimeValue,
        NoteTimeValueType, Pitch, SampleRate, Seconds, Tempo, TimeSignature,
    };
}

pub use {
    accidental::Accidental,
    duration::{NoteModifier, NoteTimeValue, NoteTimeValueType},
    key::{Key, KeyType, SEMITONES_PER_OCTAVE},
    key_signature::{KeySignature, KeySignatureKind},
    note::Note,
    numbers::FrequencyHz,
    pitch::Pitch,
    time::{
        Bpm, MusicDuration, MusicTimeStamp, PhysicalDuration, PhysicalTimeStamp, SampleRate,
        Seconds, Tempo, TimeSignature,
    },
};

mod accidental;
mod duration;
mod key;
mod key_signature;
mod note;
mod numbers;
mod pitch;
mod time;
