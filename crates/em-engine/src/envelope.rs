//! Runtime evaluator for an ADSR envelope.

use em_ir::Adsr;

/// Envelope segment currently being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,
    Decay,
    /// Holding at the sustain level, waiting for gate-off.
    Sustain,
    Release,
    /// Release reached zero; the voice can be reclaimed.
    Finished,
}

/// Runtime state for a playing envelope. Linear segments, sample-stepped.
#[derive(Clone, Copy, Debug)]
pub struct EnvelopeState {
    stage: EnvelopeStage,
    /// Current output level.
    level: f32,
    attack_step: f32,
    decay_step: f32,
    sustain: f32,
    release_samples: f32,
    /// Per-sample decrement, fixed at gate-off from the level reached.
    release_step: f32,
}

impl EnvelopeState {
    /// Start a new envelope in its attack segment (gate on).
    pub fn new(adsr: &Adsr, sample_rate: u32) -> Self {
        let samples = |secs: f32| (secs * sample_rate as f32).max(1.0);
        let sustain = adsr.sustain.clamp(0.0, 1.0);
        Self {
            stage: EnvelopeStage::Attack,
            level: 0.0,
            attack_step: 1.0 / samples(adsr.attack),
            decay_step: (1.0 - sustain) / samples(adsr.decay),
            sustain,
            release_samples: samples(adsr.release),
            release_step: 0.0,
        }
    }

    /// Current output value.
    pub fn value(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Whether the release has completed.
    pub fn is_finished(&self) -> bool {
        self.stage == EnvelopeStage::Finished
    }

    /// Enter the release segment from wherever the envelope is.
    pub fn gate_off(&mut self) {
        if matches!(self.stage, EnvelopeStage::Release | EnvelopeStage::Finished) {
            return;
        }
        self.stage = EnvelopeStage::Release;
        self.release_step = self.level / self.release_samples;
    }

    /// Advance one sample and return the new level.
    pub fn advance(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Attack => {
                self.level += self.attack_step;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                self.level -= self.decay_step;
                if self.level <= self.sustain {
                    self.level = self.sustain;
                    self.stage = EnvelopeStage::Sustain;
                }
            }
            EnvelopeStage::Sustain => {}
            EnvelopeStage::Release => {
                self.level -= self.release_step;
                if self.level <= 0.0 {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Finished;
                }
            }
            EnvelopeStage::Finished => {}
        }
        self.level
    }
}
