//! Mix levels and effect parameters.

use serde::{Deserialize, Serialize};

/// Convert decibels to a linear gain factor.
pub fn db_to_gain(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// Shared reverb send parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverbSettings {
    /// Seconds for the tail to fall by 60 dB.
    pub decay_secs: f32,
    /// Wet share of the reverb output, 0..=1.
    pub wet: f32,
}

impl Default for ReverbSettings {
    fn default() -> Self {
        Self { decay_secs: 3.0, wet: 0.4 }
    }
}

/// Levels for the two voices and the reverb they share.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixSettings {
    pub melody_volume_db: f32,
    pub harmony_volume_db: f32,
    pub reverb: ReverbSettings,
}

impl Default for MixSettings {
    fn default() -> Self {
        Self {
            melody_volume_db: -8.0,
            harmony_volume_db: -18.0,
            reverb: ReverbSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_db_is_unity() {
        assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_gain(-20.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn defaults_match_session_mix() {
        let mix = MixSettings::default();
        assert_eq!(mix.melody_volume_db, -8.0);
        assert_eq!(mix.harmony_volume_db, -18.0);
        assert_eq!(mix.reverb.decay_secs, 3.0);
        assert_eq!(mix.reverb.wet, 0.4);
    }
}
