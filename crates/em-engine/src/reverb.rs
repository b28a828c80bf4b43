//! Shared reverb send: parallel feedback combs into series allpasses.

/// Comb delay times in seconds (mutually prime in samples at common rates).
const COMB_TIMES: [f32; 4] = [0.0297, 0.0371, 0.0411, 0.0437];

/// Allpass delay times in seconds.
const ALLPASS_TIMES: [f32; 2] = [0.005, 0.0017];

const ALLPASS_GAIN: f32 = 0.5;

#[derive(Clone, Debug)]
struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    fn new(seconds: f32, sample_rate: u32) -> Self {
        let size = ((seconds * sample_rate as f32) as usize).max(1);
        Self { buffer: vec![0.0; size], write_pos: 0 }
    }

    /// Oldest sample (exactly one line length ago).
    fn read(&self) -> f32 {
        self.buffer[self.write_pos]
    }

    fn write(&mut self, value: f32) {
        self.buffer[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

/// Mono reverb; delay lines are allocated once in [`Reverb::new`].
#[derive(Clone, Debug)]
pub struct Reverb {
    combs: [DelayLine; 4],
    comb_feedback: [f32; 4],
    allpasses: [DelayLine; 2],
    wet: f32,
}

impl Reverb {
    /// `decay` is the time in seconds for the tail to fall by 60 dB;
    /// `wet` is the wet share of the reverb's own output.
    pub fn new(decay: f32, wet: f32, sample_rate: u32) -> Self {
        let combs = COMB_TIMES.map(|t| DelayLine::new(t, sample_rate));
        let decay_samples = (decay.max(0.01) * sample_rate as f32).max(1.0);
        let mut comb_feedback = [0.0; 4];
        for (g, line) in comb_feedback.iter_mut().zip(&combs) {
            // RT60: after decay_samples the loop gain reaches -60 dB.
            *g = 10f32.powf(-3.0 * line.len() as f32 / decay_samples);
        }
        Self {
            combs,
            comb_feedback,
            allpasses: ALLPASS_TIMES.map(|t| DelayLine::new(t, sample_rate)),
            wet: wet.clamp(0.0, 1.0),
        }
    }

    /// Process one input sample; returns the dry/wet blend.
    pub fn process(&mut self, input: f32) -> f32 {
        let mut tail = 0.0;
        for (line, g) in self.combs.iter_mut().zip(self.comb_feedback) {
            let delayed = line.read();
            line.write(input + delayed * g);
            tail += delayed;
        }
        tail /= self.combs.len() as f32;

        for line in &mut self.allpasses {
            let delayed = line.read();
            let v = tail + delayed * ALLPASS_GAIN;
            line.write(v);
            tail = delayed - v * ALLPASS_GAIN;
        }

        input * (1.0 - self.wet) + tail * self.wet
    }

    /// Zero the tail.
    pub fn clear(&mut self) {
        for line in self.combs.iter_mut().chain(self.allpasses.iter_mut()) {
            line.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 8000;

    #[test]
    fn silence_in_silence_out() {
        let mut reverb = Reverb::new(3.0, 0.4, SR);
        assert!((0..1000).all(|_| reverb.process(0.0) == 0.0));
    }

    #[test]
    fn impulse_leaves_a_tail() {
        let mut reverb = Reverb::new(3.0, 1.0, SR);
        reverb.process(1.0);
        let energy: f32 = (0..SR).map(|_| reverb.process(0.0).abs()).sum();
        assert!(energy > 0.1);
    }

    #[test]
    fn tail_decays() {
        let mut reverb = Reverb::new(0.5, 1.0, SR);
        reverb.process(1.0);
        let early: f32 = (0..SR / 4).map(|_| reverb.process(0.0).abs()).sum();
        for _ in 0..SR * 2 {
            reverb.process(0.0);
        }
        let late: f32 = (0..SR / 4).map(|_| reverb.process(0.0).abs()).sum();
        assert!(late < early * 0.01);
    }

    #[test]
    fn dry_only_passes_input() {
        let mut reverb = Reverb::new(3.0, 0.0, SR);
        assert_eq!(reverb.process(0.25), 0.25);
    }

    #[test]
    fn clear_kills_tail() {
        let mut reverb = Reverb::new(3.0, 1.0, SR);
        for _ in 0..100 {
            reverb.process(1.0);
        }
        reverb.clear();
        assert!((0..SR).all(|_| reverb.process(0.0) == 0.0));
    }
}
