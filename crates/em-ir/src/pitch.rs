//! Pitch classes and octave-qualified notes.
//!
//! Octave numbering follows scientific pitch notation: `C4` is MIDI note
//! 60 and `A4` sounds at 440 Hz.

use core::fmt;
use serde::{Deserialize, Serialize};

/// An equal-tempered pitch class, spelled the way the scale tables spell it.
///
/// Enharmonic spellings (`F#` and `Gb`) are separate variants that share a
/// semitone, so the frequency is the same and only the display differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    EFlat,
    E,
    F,
    FSharp,
    GFlat,
    G,
    AFlat,
    A,
    BFlat,
    B,
}

impl PitchClass {
    /// Semitones above C (0-11).
    pub const fn semitone(self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::CSharp => 1,
            PitchClass::D => 2,
            PitchClass::EFlat => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::FSharp | PitchClass::GFlat => 6,
            PitchClass::G => 7,
            PitchClass::AFlat => 8,
            PitchClass::A => 9,
            PitchClass::BFlat => 10,
            PitchClass::B => 11,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::EFlat => "Eb",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::GFlat => "Gb",
            PitchClass::G => "G",
            PitchClass::AFlat => "Ab",
            PitchClass::A => "A",
            PitchClass::BFlat => "Bb",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pitch class voiced in a specific octave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub pitch: PitchClass,
    pub octave: i8,
}

impl Note {
    pub const fn new(pitch: PitchClass, octave: i8) -> Self {
        Self { pitch, octave }
    }

    /// MIDI note number (`C4` = 60). Not clamped to 0-127.
    pub const fn midi(self) -> i16 {
        (self.octave as i16 + 1) * 12 + self.pitch.semitone() as i16
    }

    /// Equal-tempered frequency in Hz, A4 = 440.
    pub fn frequency(self) -> f32 {
        440.0 * libm::powf(2.0, (self.midi() - 69) as f32 / 12.0)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midi_numbers() {
        assert_eq!(Note::new(PitchClass::C, 4).midi(), 60);
        assert_eq!(Note::new(PitchClass::A, 4).midi(), 69);
        assert_eq!(Note::new(PitchClass::B, 2).midi(), 47);
    }

    #[test]
    fn a4_is_440() {
        assert!((Note::new(PitchClass::A, 4).frequency() - 440.0).abs() < 1e-3);
    }

    #[test]
    fn octave_up_doubles_frequency() {
        let e3 = Note::new(PitchClass::E, 3);
        let e4 = Note::new(PitchClass::E, 4);
        assert!((e4.frequency() / e3.frequency() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn enharmonics_share_pitch_but_not_spelling() {
        let gb = Note::new(PitchClass::GFlat, 5);
        let fs = Note::new(PitchClass::FSharp, 5);
        assert_eq!(gb.midi(), fs.midi());
        assert_eq!(gb.frequency(), fs.frequency());
        assert_eq!(alloc::format!("{}", gb), "Gb5");
        assert_eq!(alloc::format!("{}", Note::new(PitchClass::BFlat, 3)), "Bb3");
    }

    #[test]
    fn semitones_ascend_through_the_octave() {
        use PitchClass::*;
        let spelled = [C, CSharp, D, EFlat, E, F, FSharp, G, AFlat, A, BFlat, B];
        for (i, p) in spelled.iter().enumerate() {
            assert_eq!(p.semitone() as usize, i);
        }
    }
}
