//! Named voice timbres.

use serde::{Deserialize, Serialize};

use crate::emotion::Temperature;

/// Oscillator shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
}

/// Attack/decay/release in seconds, sustain as a level in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Adsr {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Adsr {
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self { attack, decay, sustain, release }
    }
}

/// Closed set of voice timbres. New sounds are new variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimbreProfile {
    /// Triangle with a short envelope; used for warm melodies.
    Warm,
    /// Sine with a slow envelope; used for cold melodies.
    Cold,
    /// Slow sine pad carrying the harmony chord.
    Pad,
}

impl TimbreProfile {
    /// Melody timbre for a temperature.
    pub const fn for_temperature(temperature: Temperature) -> Self {
        match temperature {
            Temperature::Warm => TimbreProfile::Warm,
            Temperature::Cold => TimbreProfile::Cold,
        }
    }

    pub const fn waveform(self) -> Waveform {
        match self {
            TimbreProfile::Warm => Waveform::Triangle,
            TimbreProfile::Cold | TimbreProfile::Pad => Waveform::Sine,
        }
    }

    pub const fn envelope(self) -> Adsr {
        match self {
            TimbreProfile::Warm => Adsr::new(0.1, 0.3, 0.4, 0.8),
            TimbreProfile::Cold => Adsr::new(0.3, 0.5, 0.6, 1.2),
            TimbreProfile::Pad => Adsr::new(0.5, 0.8, 0.7, 2.0),
        }
    }

    /// Label shown next to the tempo ("Acoustic" for warm, "Synth" otherwise).
    pub const fn label(self) -> &'static str {
        match self {
            TimbreProfile::Warm => "Acoustic",
            TimbreProfile::Cold | TimbreProfile::Pad => "Synth",
        }
    }
}
