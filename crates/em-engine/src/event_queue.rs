//! Sorted queue for scheduled events.

use em_ir::{Event, MusicalTime};

/// A queue of events sorted by timestamp.
///
/// During playback, events are consumed via a cursor that advances forward
/// without removing elements, making the realtime drain path
/// allocation-free. Rewinding the cursor replays the same events, which is
/// how looping parts repeat.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<Event>,
    /// Next event index to process (advances during playback).
    cursor: usize,
}

impl EventQueue {
    /// Create a new empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new(), cursor: 0 }
    }

    /// Push an event into the queue.
    pub fn push(&mut self, event: Event) {
        // Insert after existing events with the same time to keep push order.
        let pos = self.events.partition_point(|e| e.time <= event.time);
        self.events.insert(pos, event);
    }

    /// Return the index range of events at or before `time` (cursor-based, zero allocation).
    ///
    /// Advances the internal cursor past all consumed events. The returned
    /// range can be used with [`EventQueue::get`].
    pub fn drain_until(&mut self, time: MusicalTime) -> core::ops::Range<usize> {
        let start = self.cursor;
        while self.cursor < self.events.len() {
            if self.events[self.cursor].time <= time {
                self.cursor += 1;
            } else {
                break;
            }
        }
        start..self.cursor
    }

    /// Get an event by index (for use with `drain_until` ranges).
    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    /// Reset cursor to the beginning.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the number of events in the queue.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
