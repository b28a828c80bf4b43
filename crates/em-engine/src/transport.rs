//! Transport clock shared by every scheduled part.

use em_ir::{MusicalTime, NoteValue, SUB_BEAT_UNIT};

/// Play state of the transport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    /// Position at zero, nothing advancing.
    #[default]
    Stopped,
    /// Advancing one sample per rendered frame.
    Started,
    /// Holding its position; `start` resumes from here.
    Paused,
}

/// Sample-driven musical clock.
#[derive(Clone, Debug)]
pub struct Transport {
    state: TransportState,
    bpm: f32,
    sample_rate: u32,
    /// Whole sub-beats reached when the tempo last changed.
    base: u64,
    /// Samples advanced since `base`.
    samples: u64,
    /// Sub-beats per sample at the current tempo.
    step: f64,
}

impl Transport {
    pub fn new(sample_rate: u32) -> Self {
        let mut transport = Self {
            state: TransportState::Stopped,
            bpm: 120.0,
            sample_rate,
            base: 0,
            samples: 0,
            step: 0.0,
        };
        transport.update_step();
        transport
    }

    fn update_step(&mut self) {
        self.step = if self.sample_rate == 0 {
            0.0
        } else {
            self.bpm as f64 / 60.0 * SUB_BEAT_UNIT as f64 / self.sample_rate as f64
        };
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    /// Change tempo. The position reached so far is kept and later samples
    /// advance at the new rate.
    pub fn set_bpm(&mut self, bpm: f32) {
        self.base = self.position_sub_beats();
        self.samples = 0;
        self.bpm = bpm.max(1.0);
        self.update_step();
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == TransportState::Started
    }

    /// Start from zero, or resume from a pause.
    pub fn start(&mut self) {
        self.state = TransportState::Started;
    }

    /// Hold the current position. No effect unless started.
    pub fn pause(&mut self) {
        if self.state == TransportState::Started {
            self.state = TransportState::Paused;
        }
    }

    /// Stop and rewind to zero.
    pub fn stop(&mut self) {
        self.state = TransportState::Stopped;
        self.base = 0;
        self.samples = 0;
    }

    /// Current position in whole sub-beats, rounded to the nearest one.
    ///
    /// Computed from the sample count rather than accumulated, so a beat
    /// lands on the sample where it falls without drift.
    pub fn position_sub_beats(&self) -> u64 {
        self.base + (self.samples as f64 * self.step).round() as u64
    }

    pub fn position(&self) -> MusicalTime {
        MusicalTime::from_sub_beats(self.position_sub_beats())
    }

    /// Move forward by one sample if started.
    pub fn advance(&mut self) {
        if self.state == TransportState::Started {
            self.samples += 1;
        }
    }

    /// Length of `value` in samples at the current tempo.
    pub fn samples_for(&self, value: NoteValue) -> u32 {
        (value.seconds_at(self.bpm) * self.sample_rate as f64).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stopped_at_zero() {
        let t = Transport::new(44100);
        assert_eq!(t.state(), TransportState::Stopped);
        assert_eq!(t.position(), MusicalTime::zero());
    }

    #[test]
    fn one_second_at_60_bpm_is_one_beat() {
        let mut t = Transport::new(1000);
        t.set_bpm(60.0);
        t.start();
        for _ in 0..1000 {
            t.advance();
        }
        let pos = t.position();
        let beats = pos.as_beats_f64();
        assert!((beats - 1.0).abs() < 1e-6, "at {} beats", beats);
    }

    #[test]
    fn beats_land_on_exact_samples() {
        let mut t = Transport::new(48000);
        t.set_bpm(90.0);
        t.start();
        // Four beats at 90 BPM are exactly 128000 samples.
        for _ in 0..128000 {
            t.advance();
        }
        let four = 4 * SUB_BEAT_UNIT as u64;
        assert_eq!(t.position_sub_beats(), four);
        t.advance();
        assert!(t.position_sub_beats() > four);
    }

    #[test]
    fn tempo_change_keeps_position() {
        let mut t = Transport::new(1000);
        t.set_bpm(60.0);
        t.start();
        for _ in 0..500 {
            t.advance();
        }
        t.set_bpm(120.0);
        assert_eq!(t.position_sub_beats(), SUB_BEAT_UNIT as u64 / 2);
        for _ in 0..250 {
            t.advance();
        }
        assert_eq!(t.position_sub_beats(), SUB_BEAT_UNIT as u64);
    }

    #[test]
    fn pause_holds_position_and_start_resumes() {
        let mut t = Transport::new(1000);
        t.start();
        for _ in 0..100 {
            t.advance();
        }
        t.pause();
        let held = t.position();
        for _ in 0..100 {
            t.advance();
        }
        assert_eq!(t.position(), held);
        t.start();
        t.advance();
        assert!(t.position() > held);
    }

    #[test]
    fn stop_rewinds() {
        let mut t = Transport::new(1000);
        t.start();
        for _ in 0..100 {
            t.advance();
        }
        t.stop();
        assert_eq!(t.position(), MusicalTime::zero());
        t.advance();
        assert_eq!(t.position(), MusicalTime::zero());
    }

    #[test]
    fn pause_when_stopped_stays_stopped() {
        let mut t = Transport::new(1000);
        t.pause();
        assert_eq!(t.state(), TransportState::Stopped);
    }

    #[test]
    fn samples_for_quarter() {
        let mut t = Transport::new(44100);
        t.set_bpm(120.0);
        assert_eq!(t.samples_for(NoteValue::Quarter), 22050);
        assert_eq!(t.samples_for(NoteValue::Eighth), 11025);
    }
}
