//! Beat-based time representation.
//!
//! `MusicalTime` uses beats as the transport coordinate. Every scheduled
//! event (melody step, harmony loop iteration) is positioned in beats so
//! that changing the tempo never moves events relative to each other.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Subdivisions per beat. LCM(1..16) = 720720, divisible by
/// any subdivision from 1 to 16 per beat.
pub const SUB_BEAT_UNIT: u32 = 720_720;

/// Beats in one measure. All sessions run in 4/4.
pub const BEATS_PER_MEASURE: u64 = 4;

/// A position in musical time (beats + fractional sub-beat).
///
/// Ordering: beat is primary, sub_beat is secondary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MusicalTime {
    /// Whole beats from transport start
    pub beat: u64,
    /// Fraction of a beat: 0..SUB_BEAT_UNIT
    pub sub_beat: u32,
}

impl MusicalTime {
    /// The zero position (transport start).
    pub const fn zero() -> Self {
        Self { beat: 0, sub_beat: 0 }
    }

    /// Create a time at an exact beat boundary.
    pub const fn from_beats(beat: u64) -> Self {
        Self { beat, sub_beat: 0 }
    }

    /// Create a time from a flat sub-beat count.
    pub const fn from_sub_beats(total: u64) -> Self {
        Self {
            beat: total / SUB_BEAT_UNIT as u64,
            sub_beat: (total % SUB_BEAT_UNIT as u64) as u32,
        }
    }

    /// Flatten to a sub-beat count.
    pub const fn as_sub_beats(self) -> u64 {
        self.beat * SUB_BEAT_UNIT as u64 + self.sub_beat as u64
    }

    /// Advance by `steps` repetitions of `value`.
    pub fn add_steps(self, steps: u32, value: NoteValue) -> Self {
        Self::from_sub_beats(self.as_sub_beats() + steps as u64 * value.sub_beats())
    }

    /// Fractional beats, for display and tempo conversion.
    pub fn as_beats_f64(self) -> f64 {
        self.beat as f64 + self.sub_beat as f64 / SUB_BEAT_UNIT as f64
    }
}

impl PartialOrd for MusicalTime {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MusicalTime {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.beat.cmp(&other.beat).then(self.sub_beat.cmp(&other.sub_beat))
    }
}

/// Rhythmic durations used by the sequencer, the loop and note lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteValue {
    /// One 4/4 measure ("1m").
    Measure,
    /// Half note ("2n").
    Half,
    /// Quarter note ("4n"), one beat.
    Quarter,
    /// Eighth note ("8n").
    Eighth,
}

impl NoteValue {
    /// Length in sub-beat units.
    pub const fn sub_beats(self) -> u64 {
        let unit = SUB_BEAT_UNIT as u64;
        match self {
            NoteValue::Measure => unit * BEATS_PER_MEASURE,
            NoteValue::Half => unit * 2,
            NoteValue::Quarter => unit,
            NoteValue::Eighth => unit / 2,
        }
    }

    /// Length in beats.
    pub fn beats(self) -> f64 {
        self.sub_beats() as f64 / SUB_BEAT_UNIT as f64
    }

    /// Length in seconds at `bpm`.
    pub fn seconds_at(self, bpm: f32) -> f64 {
        self.beats() * 60.0 / bpm as f64
    }

    /// Transport notation ("1m", "2n", "4n", "8n").
    pub const fn notation(self) -> &'static str {
        match self {
            NoteValue::Measure => "1m",
            NoteValue::Half => "2n",
            NoteValue::Quarter => "4n",
            NoteValue::Eighth => "8n",
        }
    }
}

impl fmt::Display for NoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}
