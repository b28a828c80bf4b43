//! Colour lookups and the values handed to visualization collaborators.

use std::fmt;

use em_ir::{Emotion, EmotionFingerprint};
use serde::{Serialize, Serializer};

/// An HSL colour, rendered as `hsl(h, s%, l%)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self { hue, saturation, lightness }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Two-stop gradient keyed by the primary emotion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Gradient(pub Hsl, pub Hsl);

fn accent_for(emotion: Emotion) -> Hsl {
    match emotion {
        Emotion::Joy => Hsl::new(50, 90, 55),
        Emotion::Sadness => Hsl::new(220, 70, 50),
        Emotion::Anger => Hsl::new(0, 80, 50),
        Emotion::Fear => Hsl::new(270, 60, 45),
        Emotion::Love => Hsl::new(340, 80, 60),
        Emotion::Hope => Hsl::new(160, 70, 50),
    }
}

fn gradient_for(emotion: Emotion) -> Gradient {
    match emotion {
        Emotion::Joy => Gradient(Hsl::new(45, 90, 55), Hsl::new(30, 95, 60)),
        Emotion::Sadness => Gradient(Hsl::new(220, 70, 45), Hsl::new(240, 60, 40)),
        Emotion::Anger => Gradient(Hsl::new(0, 80, 50), Hsl::new(20, 90, 45)),
        Emotion::Fear => Gradient(Hsl::new(270, 60, 45), Hsl::new(290, 50, 35)),
        Emotion::Love => Gradient(Hsl::new(340, 80, 55), Hsl::new(320, 70, 50)),
        Emotion::Hope => Gradient(Hsl::new(160, 70, 50), Hsl::new(185, 80, 55)),
    }
}

/// Single accent colour for a label; joy's colour if unrecognized.
pub fn accent_color(label: &str) -> Hsl {
    accent_for(Emotion::from_label(label).unwrap_or(Emotion::Joy))
}

/// Gradient for a label; joy's gradient if unrecognized.
pub fn gradient(label: &str) -> Gradient {
    gradient_for(Emotion::from_label(label).unwrap_or(Emotion::Joy))
}

/// Output contract for the visualization side: the session tempo, the
/// primary emotion's gradient and the radar fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VisualParams {
    pub bpm: f32,
    pub gradient: Gradient,
    pub fingerprint: EmotionFingerprint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_renders_css_syntax() {
        assert_eq!(Hsl::new(220, 70, 45).to_string(), "hsl(220, 70%, 45%)");
    }

    #[test]
    fn unknown_label_uses_joy_entries() {
        assert_eq!(gradient("euphoria"), gradient("joy"));
        assert_eq!(accent_color("euphoria"), accent_color("joy"));
        assert_eq!(gradient("euphoria"), Gradient(Hsl::new(45, 90, 55), Hsl::new(30, 95, 60)));
    }

    #[test]
    fn every_emotion_has_distinct_gradient() {
        let mut seen = std::collections::HashSet::new();
        for e in Emotion::ALL {
            assert!(seen.insert(gradient(e.as_str())));
        }
    }

    #[test]
    fn gradient_serializes_as_css_pair() {
        let json = serde_json::to_string(&gradient("anger")).unwrap();
        assert_eq!(json, r#"["hsl(0, 80%, 50%)","hsl(20, 90%, 45%)"]"#);
    }
}
