//! Fixed seven-degree scale per emotion.

use crate::emotion::Emotion;
use crate::pitch::{Note, PitchClass};
use PitchClass::*;

/// Number of degrees in every scale profile.
pub const SCALE_DEGREES: usize = 7;

/// Ordered pitch classes associated with one emotion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleProfile {
    pub emotion: Emotion,
    /// Human-readable mode name.
    pub mode: &'static str,
    pub degrees: [PitchClass; SCALE_DEGREES],
}

static SCALES: [ScaleProfile; 6] = [
    ScaleProfile { emotion: Emotion::Joy, mode: "major", degrees: [C, D, E, F, G, A, B] },
    ScaleProfile { emotion: Emotion::Sadness, mode: "natural minor", degrees: [A, B, C, D, E, F, G] },
    ScaleProfile { emotion: Emotion::Anger, mode: "phrygian", degrees: [E, F, G, A, BFlat, C, D] },
    ScaleProfile { emotion: Emotion::Fear, mode: "diminished", degrees: [B, C, D, EFlat, F, GFlat, AFlat] },
    ScaleProfile { emotion: Emotion::Love, mode: "lydian", degrees: [C, D, E, FSharp, G, A, B] },
    ScaleProfile { emotion: Emotion::Hope, mode: "major", degrees: [C, D, E, F, G, A, B] },
];

impl ScaleProfile {
    /// The table entry for `emotion`.
    pub fn for_emotion(emotion: Emotion) -> &'static ScaleProfile {
        &SCALES[emotion as usize]
    }

    /// Pitch class of a zero-based degree, wrapping past the seventh.
    pub fn degree(&self, index: usize) -> PitchClass {
        self.degrees[index % SCALE_DEGREES]
    }

    /// A degree voiced in `octave`.
    pub fn note(&self, index: usize, octave: i8) -> Note {
        Note::new(self.degree(index), octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_emotion() {
        for e in Emotion::ALL {
            assert_eq!(ScaleProfile::for_emotion(e).emotion, e);
        }
    }

    #[test]
    fn anger_is_phrygian_on_e() {
        let s = ScaleProfile::for_emotion(Emotion::Anger);
        assert_eq!(s.mode, "phrygian");
        assert_eq!(s.degrees, [E, F, G, A, BFlat, C, D]);
    }

    #[test]
    fn degree_wraps() {
        let s = ScaleProfile::for_emotion(Emotion::Sadness);
        assert_eq!(s.degree(0), A);
        assert_eq!(s.degree(7), A);
        assert_eq!(s.note(4, 3), Note::new(E, 3));
    }

    #[test]
    fn fear_is_spelled_with_flats() {
        let s = ScaleProfile::for_emotion(Emotion::Fear);
        assert_eq!(s.degrees, [B, C, D, EFlat, F, GFlat, AFlat]);
        assert_eq!(alloc::format!("{}", s.note(5, 5)), "Gb5");
        assert_eq!(s.note(5, 5).midi(), Note::new(FSharp, 5).midi());
    }
}
