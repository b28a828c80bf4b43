//! Voice: one sounding note (oscillator + envelope).

use em_ir::{Note, TimbreProfile};

use crate::envelope::EnvelopeState;
use crate::oscillator::Oscillator;

/// Voice lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoiceState {
    /// Gate open; holding for the remaining note duration.
    #[default]
    Active,
    /// Gate closed; envelope releasing.
    Released,
}

/// A single triggered note.
#[derive(Clone, Copy, Debug)]
pub struct Voice {
    /// The pitch this voice plays.
    pub note: Note,
    /// Voice lifecycle state.
    pub state: VoiceState,
    oscillator: Oscillator,
    envelope: EnvelopeState,
    /// Samples left before the gate closes on its own.
    hold_remaining: u32,
}

impl Voice {
    /// Attack `note` with `timbre`, releasing after `hold_samples`.
    pub fn new(note: Note, timbre: TimbreProfile, sample_rate: u32, hold_samples: u32) -> Self {
        Self {
            note,
            state: VoiceState::Active,
            oscillator: Oscillator::new(timbre.waveform(), note.frequency(), sample_rate),
            envelope: EnvelopeState::new(&timbre.envelope(), sample_rate),
            hold_remaining: hold_samples,
        }
    }

    /// Close the gate now; the envelope plays out its release.
    pub fn release(&mut self) {
        self.state = VoiceState::Released;
        self.envelope.gate_off();
    }

    /// Is the voice still producing audio?
    pub fn is_playing(&self) -> bool {
        !self.envelope.is_finished()
    }

    /// Render one mono sample.
    pub fn render(&mut self) -> f32 {
        if self.state == VoiceState::Active {
            if self.hold_remaining == 0 {
                self.release();
            } else {
                self.hold_remaining -= 1;
            }
        }
        let level = self.envelope.advance();
        self.oscillator.next_sample() * level
    }
}
