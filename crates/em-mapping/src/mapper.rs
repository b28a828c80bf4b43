//! Emotion parameter mapper: tempo, register, scales and timbre.

use em_ir::{
    Emotion, EmotionAnalysis, IntensityTier, Movement, NoteValue, ScaleProfile, Temperature,
    TimbreProfile,
};
use rand::Rng;

/// Upper (exclusive) bound of the tempo jitter added for chaotic movement.
pub const MAX_BPM_JITTER: f32 = 20.0;

/// Tempo before jitter: 70 / 100 / 130 BPM by intensity tier.
pub fn base_bpm(intensity: u8) -> f32 {
    match IntensityTier::of(intensity) {
        IntensityTier::Low => 70.0,
        IntensityTier::Medium => 100.0,
        IntensityTier::High => 130.0,
    }
}

/// Tempo in BPM. Chaotic movement adds a fresh jitter in `[0, 20)` on
/// every call, so resolve it once per session via [`MusicParams::resolve`].
pub fn bpm<R: Rng + ?Sized>(intensity: u8, movement: Movement, rng: &mut R) -> f32 {
    let base = base_bpm(intensity);
    match movement {
        Movement::Stable => base,
        Movement::Chaotic => base + rng.gen_range(0.0..MAX_BPM_JITTER),
    }
}

/// Base octave of the melody: 3 / 4 / 5 by intensity tier.
pub fn octave(intensity: u8) -> i8 {
    match IntensityTier::of(intensity) {
        IntensityTier::Low => 3,
        IntensityTier::Medium => 4,
        IntensityTier::High => 5,
    }
}

/// Melody length: 4 / 8 / 12 slots by intensity tier.
pub fn note_count(intensity: u8) -> usize {
    match IntensityTier::of(intensity) {
        IntensityTier::Low => 4,
        IntensityTier::Medium => 8,
        IntensityTier::High => 12,
    }
}

/// Melody step spacing: eighth notes at high intensity, quarters otherwise.
pub fn subdivision(intensity: u8) -> NoteValue {
    match IntensityTier::of(intensity) {
        IntensityTier::High => NoteValue::Eighth,
        IntensityTier::Low | IntensityTier::Medium => NoteValue::Quarter,
    }
}

/// Scale for the primary emotion label; joy's scale if unrecognized.
pub fn melody_scale(label: &str) -> &'static ScaleProfile {
    match Emotion::from_label(label) {
        Some(emotion) => ScaleProfile::for_emotion(emotion),
        None => {
            log::debug!("unrecognized primary emotion {:?}, using joy scale", label);
            ScaleProfile::for_emotion(Emotion::Joy)
        }
    }
}

/// Scale for the secondary emotion label; `melody` if unrecognized.
pub fn harmony_scale(label: &str, melody: &'static ScaleProfile) -> &'static ScaleProfile {
    match Emotion::from_label(label) {
        Some(emotion) => ScaleProfile::for_emotion(emotion),
        None => {
            log::debug!("unrecognized secondary emotion {:?}, reusing melody scale", label);
            melody
        }
    }
}

/// Melody timbre for a temperature.
pub fn timbre(temperature: Temperature) -> TimbreProfile {
    TimbreProfile::for_temperature(temperature)
}

/// All mapped parameters for one session, with the tempo jitter rolled once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MusicParams {
    /// Tempo driving both the transport and any display.
    pub bpm: f32,
    pub base_bpm: f32,
    pub octave: i8,
    pub note_count: usize,
    pub subdivision: NoteValue,
    pub scale: &'static ScaleProfile,
    pub harmony_scale: &'static ScaleProfile,
    pub timbre: TimbreProfile,
    pub movement: Movement,
}

impl MusicParams {
    pub fn resolve<R: Rng + ?Sized>(analysis: &EmotionAnalysis, rng: &mut R) -> Self {
        let intensity = analysis.intensity;
        let scale = melody_scale(&analysis.primary_emotion);
        Self {
            bpm: bpm(intensity, analysis.movement, rng),
            base_bpm: base_bpm(intensity),
            octave: octave(intensity),
            note_count: note_count(intensity),
            subdivision: subdivision(intensity),
            scale,
            harmony_scale: harmony_scale(&analysis.secondary_emotion, scale),
            timbre: timbre(analysis.temperature),
            movement: analysis.movement,
        }
    }

    /// One-line description, e.g. `"130 BPM • Synth • Syncopated"`.
    pub fn summary(&self) -> String {
        let feel = match self.movement {
            Movement::Chaotic => "Syncopated",
            Movement::Stable => "Steady",
        };
        format!("{} BPM • {} • {}", self.bpm.round(), self.timbre.label(), feel)
    }
}
