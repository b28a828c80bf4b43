//! Event types for the transport-driven engine.

use crate::melody::NoteDuration;
use crate::musical_time::MusicalTime;
use crate::pitch::Note;

/// A scheduled event, positioned within its part's cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event {
    /// When the event should fire
    pub time: MusicalTime,
    /// Which voice receives it
    pub target: EventTarget,
    /// What the event does
    pub payload: EventPayload,
}

impl Event {
    /// Create a new event.
    pub fn new(time: MusicalTime, target: EventTarget, payload: EventPayload) -> Self {
        Self {
            time,
            target,
            payload,
        }
    }
}

/// Which voice an event is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventTarget {
    /// The single melody voice
    Melody,
    /// The harmony pad voice
    Harmony,
}

/// What an event does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventPayload {
    /// Attack one note, release it after `duration`
    Note { note: Note, duration: NoteDuration },
    /// Attack three notes together, release them after `duration`
    Chord { notes: [Note; 3], duration: NoteDuration },
}
