//! Six-axis emotion fingerprint for radar-chart rendering.

use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

/// One weight per emotion, nominally in `[0, 100]`.
///
/// Not normalized: the weights do not sum to a constant, and the primary
/// axis is not guaranteed to dominate the randomized ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionFingerprint {
    pub joy: f32,
    pub sadness: f32,
    pub anger: f32,
    pub fear: f32,
    pub love: f32,
    pub hope: f32,
}

impl EmotionFingerprint {
    pub fn get(&self, emotion: Emotion) -> f32 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Love => self.love,
            Emotion::Hope => self.hope,
        }
    }

    pub fn set(&mut self, emotion: Emotion, weight: f32) {
        let slot = match emotion {
            Emotion::Joy => &mut self.joy,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Anger => &mut self.anger,
            Emotion::Fear => &mut self.fear,
            Emotion::Love => &mut self.love,
            Emotion::Hope => &mut self.hope,
        };
        *slot = weight;
    }

    /// Axes in [`Emotion::ALL`] order.
    pub fn axes(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        Emotion::ALL.into_iter().map(move |e| (e, self.get(e)))
    }
}
