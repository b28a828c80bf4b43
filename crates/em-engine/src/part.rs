//! Looping parts: a fixed cycle of events replayed against the transport.

use core::ops::Range;

use em_ir::{
    Event, EventPayload, EventTarget, HarmonyChord, Melody, MelodyEvent, MusicalTime,
    NoteDuration, NoteValue,
};

use crate::event_queue::EventQueue;

/// A cycle of events that repeats every `period` sub-beats once started.
///
/// Event times are relative to the start of the cycle. Each time the
/// transport crosses a cycle boundary the queue cursor is rewound, so the
/// events are replayed without being rebuilt.
#[derive(Clone, Debug)]
pub struct Part {
    queue: EventQueue,
    /// Cycle length in sub-beats, never zero.
    period: u64,
    /// Transport position (sub-beats) where the current cycle began.
    origin: u64,
    active: bool,
}

impl Part {
    fn with_queue(queue: EventQueue, period: u64) -> Self {
        Self { queue, period: period.max(1), origin: 0, active: false }
    }

    /// Melody sequencer: one slot per `subdivision`, rests occupy their slot
    /// silently. An empty melody still loops on a single-slot cycle.
    pub fn sequence(melody: &Melody, subdivision: NoteValue, duration: NoteDuration) -> Self {
        let mut queue = EventQueue::new();
        let mut time = MusicalTime::zero();
        for event in melody {
            if let MelodyEvent::Note(note) = *event {
                queue.push(Event::new(
                    time,
                    EventTarget::Melody,
                    EventPayload::Note { note, duration },
                ));
            }
            time = time.add_steps(1, subdivision);
        }
        let slots = melody.len().max(1) as u64;
        Self::with_queue(queue, slots * subdivision.sub_beats())
    }

    /// Harmony loop: the chord at the top of every `interval`.
    pub fn repeating(chord: HarmonyChord, duration: NoteValue, interval: NoteValue) -> Self {
        let mut queue = EventQueue::new();
        queue.push(Event::new(
            MusicalTime::zero(),
            EventTarget::Harmony,
            EventPayload::Chord { notes: chord.notes, duration: NoteDuration::Fixed(duration) },
        ));
        Self::with_queue(queue, interval.sub_beats())
    }

    /// Begin cycling with the first cycle at transport position `at`.
    pub fn start(&mut self, at: MusicalTime) {
        self.origin = at.as_sub_beats();
        self.queue.reset_cursor();
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.queue.reset_cursor();
    }

    /// Cycle length.
    pub fn period(&self) -> MusicalTime {
        MusicalTime::from_sub_beats(self.period)
    }

    /// Number of events in one cycle.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Event by index, for use with ranges returned by [`Part::due`].
    pub fn event(&self, index: usize) -> Option<&Event> {
        self.queue.get(index)
    }

    /// Indices of events that fall due at transport position `now`
    /// (sub-beats). Called once per rendered frame; the transport moves far
    /// less than one slot per frame, so a cycle is always drained before
    /// the next one begins.
    pub fn due(&mut self, now: u64) -> Range<usize> {
        if !self.active || now < self.origin {
            return 0..0;
        }
        let elapsed = now - self.origin;
        if elapsed >= self.period {
            self.origin += elapsed - elapsed % self.period;
            self.queue.reset_cursor();
        }
        self.queue.drain_until(MusicalTime::from_sub_beats(now - self.origin))
    }
}
