//! Fingerprint generator for the radar chart.

use em_ir::{Emotion, EmotionAnalysis, EmotionFingerprint};
use rand::Rng;

/// Derive a six-axis fingerprint from an analysis.
///
/// Primary axis = intensity × 10, secondary = intensity × 6, every other
/// axis an independent draw in `[5, 25)`. When both labels name the same
/// emotion the primary weight wins. The result is not normalized, and at
/// low intensity a random axis can outweigh the secondary one.
pub fn generate_fingerprint<R: Rng + ?Sized>(
    analysis: &EmotionAnalysis,
    rng: &mut R,
) -> EmotionFingerprint {
    let primary = analysis.primary();
    let secondary = analysis.secondary();
    let intensity = analysis.intensity as f32;

    let mut fp = EmotionFingerprint::default();
    for emotion in Emotion::ALL {
        let weight = if Some(emotion) == primary {
            intensity * 10.0
        } else if Some(emotion) == secondary {
            intensity * 6.0
        } else {
            rng.gen_range(5.0..25.0)
        };
        fp.set(emotion, weight);
    }
    fp
}

/// The analysis' own fingerprint if it carries one, otherwise a fresh one.
pub fn resolve_fingerprint<R: Rng + ?Sized>(
    analysis: &EmotionAnalysis,
    rng: &mut R,
) -> EmotionFingerprint {
    match analysis.fingerprint {
        Some(fp) => fp,
        None => generate_fingerprint(analysis, rng),
    }
}
