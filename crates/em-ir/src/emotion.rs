//! Emotion analysis as received from the external classifier.

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::fingerprint::EmotionFingerprint;

/// The fixed set of emotions the classifier reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Love,
    Hope,
}

impl Emotion {
    /// All emotions in fingerprint axis order.
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Love,
        Emotion::Hope,
    ];

    /// Lower-case label used as lookup key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Love => "love",
            Emotion::Hope => "hope",
        }
    }

    /// Resolve a classifier label, ignoring ASCII case.
    ///
    /// Returns `None` for labels outside the fixed set; lookup tables
    /// decide their own fallback.
    pub fn from_label(label: &str) -> Option<Emotion> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timbre temperature reported by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Warm,
    Cold,
}

/// Rhythmic movement reported by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Stable,
    Chaotic,
}

impl Movement {
    pub fn is_chaotic(self) -> bool {
        self == Movement::Chaotic
    }
}

/// Three-step intensity tier driving tempo, register, length and subdivision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntensityTier {
    /// Intensity 1..=3 (and anything lower).
    Low,
    /// Intensity 4..=7.
    Medium,
    /// Intensity 8..=10 (and anything higher).
    High,
}

impl IntensityTier {
    /// Classify an intensity value. Total over all integers.
    pub const fn of(intensity: u8) -> Self {
        if intensity <= 3 {
            IntensityTier::Low
        } else if intensity <= 7 {
            IntensityTier::Medium
        } else {
            IntensityTier::High
        }
    }
}

/// Result of classifying a piece of text. Immutable once received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    /// Free-form label; expected to be one of the [`Emotion`] names.
    pub primary_emotion: String,
    /// Free-form label; may equal `primary_emotion`.
    pub secondary_emotion: String,
    /// Expected in 1..=10.
    pub intensity: u8,
    pub temperature: Temperature,
    pub movement: Movement,
    /// Precomputed fingerprint, if the classifier sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<EmotionFingerprint>,
}

impl EmotionAnalysis {
    /// Build an analysis without a fingerprint.
    pub fn new(
        primary: impl Into<String>,
        secondary: impl Into<String>,
        intensity: u8,
        temperature: Temperature,
        movement: Movement,
    ) -> Self {
        Self {
            primary_emotion: primary.into(),
            secondary_emotion: secondary.into(),
            intensity,
            temperature,
            movement,
            fingerprint: None,
        }
    }

    /// Primary emotion, if the label is recognized.
    pub fn primary(&self) -> Option<Emotion> {
        Emotion::from_label(&self.primary_emotion)
    }

    /// Secondary emotion, if the label is recognized.
    pub fn secondary(&self) -> Option<Emotion> {
        Emotion::from_label(&self.secondary_emotion)
    }

    pub fn tier(&self) -> IntensityTier {
        IntensityTier::of(self.intensity)
    }
}
