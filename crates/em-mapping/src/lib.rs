//! Emotion-to-music mapping for the emotive melody engine.
//!
//! Translates an [`EmotionAnalysis`](em_ir::EmotionAnalysis) into musical
//! parameters (tempo, register, scales, timbre), a visualization
//! fingerprint and colour palette, and the melody/harmony content the
//! engine plays.
//!
//! Every function here is total: unrecognized labels fall back to
//! documented defaults instead of failing. Randomness always comes from
//! a caller-supplied [`rand::Rng`] so sessions can be reproduced from a seed.

mod fingerprint;
mod mapper;
mod palette;
mod sequence;

pub use fingerprint::{generate_fingerprint, resolve_fingerprint};
pub use mapper::{
    base_bpm, bpm, harmony_scale, melody_scale, note_count, octave, subdivision, timbre,
    MusicParams, MAX_BPM_JITTER,
};
pub use palette::{accent_color, gradient, Gradient, Hsl, VisualParams};
pub use sequence::{compose, generate_melody, harmony_chord, melody_duration, REST_PROBABILITY, OCTAVE_UP_PROBABILITY};
