//! Phase-accumulating oscillator.

use core::f32::consts::TAU;

use em_ir::Waveform;

/// A single band-unlimited oscillator. Phase is kept in `[0, 1)`.
#[derive(Clone, Copy, Debug)]
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
    increment: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f32, sample_rate: u32) -> Self {
        let increment = if sample_rate == 0 { 0.0 } else { frequency / sample_rate as f32 };
        Self { waveform, phase: 0.0, increment }
    }

    /// Next sample in `[-1, 1]`.
    pub fn next_sample(&mut self) -> f32 {
        let value = match self.waveform {
            Waveform::Sine => (self.phase * TAU).sin(),
            // Starts at 0 and rises, like the sine.
            Waveform::Triangle => 4.0 * ((self.phase + 0.75).fract() - 0.5).abs() - 1.0,
        };
        self.phase = (self.phase + self.increment).fract();
        value
    }
}
