//! VoicePool: a polyphonic synth voice with fixed slot capacity.

use em_ir::{Note, TimbreProfile};

use crate::voice::{Voice, VoiceState};

/// Identifier for a voice slot in the pool.
pub type VoiceId = usize;

/// Maximum number of simultaneous notes per pool.
pub const MAX_VOICES: usize = 16;

/// Polyphonic instrument: every trigger takes a slot, slots are reclaimed
/// when their release ends. Slots are allocated once, up front.
pub struct VoicePool {
    /// Voice slots (None = free).
    pub(crate) slots: Vec<Option<Voice>>,
    timbre: TimbreProfile,
    /// Linear output gain.
    gain: f32,
    sample_rate: u32,
}

impl VoicePool {
    /// Create a new empty voice pool.
    pub fn new(timbre: TimbreProfile, gain: f32, sample_rate: u32) -> Self {
        Self {
            slots: (0..MAX_VOICES).map(|_| None).collect(),
            timbre,
            gain,
            sample_rate,
        }
    }

    /// Timbre for voices triggered from now on.
    pub fn set_timbre(&mut self, timbre: TimbreProfile) {
        self.timbre = timbre;
    }

    /// Attack `note` and schedule its release after `hold_samples`.
    pub fn trigger(&mut self, note: Note, hold_samples: u32) -> VoiceId {
        let voice = Voice::new(note, self.timbre, self.sample_rate, hold_samples);
        self.allocate(voice)
    }

    /// Place a voice in a free slot, stealing one if the pool is full
    /// (released voices go first).
    fn allocate(&mut self, voice: Voice) -> VoiceId {
        if let Some(id) = self.slots.iter().position(|s| s.is_none()) {
            self.slots[id] = Some(voice);
            return id;
        }
        let id = self.find_steal_candidate();
        self.slots[id] = Some(voice);
        id
    }

    fn find_steal_candidate(&self) -> VoiceId {
        let priority = |state: VoiceState| match state {
            VoiceState::Released => 0,
            VoiceState::Active => 1,
        };
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i, priority(v.state))))
            .min_by_key(|(_, p)| *p)
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Drop every voice immediately.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Count of occupied voice slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Render all voices into one mono sample and reclaim finished ones.
    pub fn render(&mut self) -> f32 {
        let mut sum = 0.0;
        for slot in &mut self.slots {
            if let Some(voice) = slot {
                sum += voice.render();
                if !voice.is_playing() {
                    *slot = None;
                }
            }
        }
        sum * self.gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use em_ir::PitchClass;

    const SR: u32 = 8000;

    fn pool() -> VoicePool {
        VoicePool::new(TimbreProfile::Warm, 1.0, SR)
    }

    fn c(octave: i8) -> Note {
        Note::new(PitchClass::C, octave)
    }

    #[test]
    fn trigger_fills_free_slots_in_order() {
        let mut pool = pool();
        assert_eq!(pool.trigger(c(3), 100), 0);
        assert_eq!(pool.trigger(c(4), 100), 1);
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.slots[1].as_ref().unwrap().note, c(4));
    }

    #[test]
    fn full_pool_steals_released_first() {
        let mut pool = pool();
        for _ in 0..MAX_VOICES {
            pool.trigger(c(4), SR);
        }
        pool.slots[5].as_mut().unwrap().release();
        let id = pool.trigger(c(6), SR);
        assert_eq!(id, 5);
        assert_eq!(pool.active_count(), MAX_VOICES);
    }

    #[test]
    fn finished_voices_are_reclaimed() {
        let mut pool = pool();
        pool.trigger(c(4), 1);
        for _ in 0..SR * 2 {
            pool.render();
        }
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn clear_silences_immediately() {
        let mut pool = pool();
        pool.trigger(c(4), SR);
        for _ in 0..100 {
            pool.render();
        }
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.render(), 0.0);
    }

    #[test]
    fn gain_scales_output() {
        let mut loud = pool();
        let mut quiet = VoicePool::new(TimbreProfile::Warm, 0.5, SR);
        loud.trigger(c(4), SR);
        quiet.trigger(c(4), SR);
        for _ in 0..50 {
            let a = loud.render();
            let b = quiet.render();
            assert!((a * 0.5 - b).abs() < 1e-6);
        }
    }
}
