//! Core IR types for the emotive melody engine.
//!
//! This crate defines the data model shared by the mapping layer, the
//! realtime engine and the playback controller: the emotion analysis
//! received from the classifier, the musical vocabulary derived from it
//! (notes, scales, timbres, musical time) and the composition the engine
//! plays.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod emotion;
mod event;
mod fingerprint;
mod melody;
mod musical_time;
mod pitch;
mod scale;
mod timbre;

pub use emotion::{Emotion, EmotionAnalysis, IntensityTier, Movement, Temperature};
pub use event::{Event, EventPayload, EventTarget};
pub use fingerprint::EmotionFingerprint;
pub use melody::{Composition, HarmonyChord, Melody, MelodyEvent, NoteDuration, MAX_MELODY_EVENTS};
pub use musical_time::{MusicalTime, NoteValue, BEATS_PER_MEASURE, SUB_BEAT_UNIT};
pub use pitch::{Note, PitchClass};
pub use scale::{ScaleProfile, SCALE_DEGREES};
pub use timbre::{Adsr, TimbreProfile, Waveform};
