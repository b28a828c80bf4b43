//! Generated musical content for one playback session.

use arrayvec::ArrayVec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::musical_time::NoteValue;
use crate::pitch::Note;
use crate::timbre::TimbreProfile;

/// Longest melody the sequence generator produces (high intensity tier).
pub const MAX_MELODY_EVENTS: usize = 12;

/// One melody slot: a pitched note or a rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MelodyEvent {
    Note(Note),
    Rest,
}

impl MelodyEvent {
    pub fn note(self) -> Option<Note> {
        match self {
            MelodyEvent::Note(n) => Some(n),
            MelodyEvent::Rest => None,
        }
    }

    pub fn is_rest(self) -> bool {
        self == MelodyEvent::Rest
    }
}

impl fmt::Display for MelodyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MelodyEvent::Note(n) => write!(f, "{}", n),
            MelodyEvent::Rest => f.write_str("-"),
        }
    }
}

/// Ordered melody slots, fixed capacity.
pub type Melody = ArrayVec<MelodyEvent, MAX_MELODY_EVENTS>;

/// Root, third and fifth played together by the pad voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HarmonyChord {
    pub notes: [Note; 3],
}

impl fmt::Display for HarmonyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.notes;
        write!(f, "{} {} {}", a, b, c)
    }
}

/// How long a triggered note is held before release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteDuration {
    /// Always the same value.
    Fixed(NoteValue),
    /// One of two values, chosen with equal odds each time a note fires.
    EitherOf(NoteValue, NoteValue),
}

/// Everything the engine needs to play one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Transport tempo, resolved once per session.
    pub bpm: f32,
    pub melody: Melody,
    /// Spacing between melody slots.
    pub subdivision: NoteValue,
    pub melody_timbre: TimbreProfile,
    pub melody_duration: NoteDuration,
    pub chord: HarmonyChord,
    pub chord_duration: NoteValue,
    /// Time between chord repetitions.
    pub chord_interval: NoteValue,
}

impl Composition {
    /// Number of rest slots in the melody.
    pub fn rest_count(&self) -> usize {
        self.melody.iter().filter(|e| e.is_rest()).count()
    }
}
