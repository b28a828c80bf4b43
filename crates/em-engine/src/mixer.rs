//! Main playback engine.

use em_ir::{Composition, Event, EventPayload, EventTarget, MusicalTime, NoteDuration, TimbreProfile};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::frame::Frame;
use crate::part::Part;
use crate::reverb::Reverb;
use crate::settings::{db_to_gain, MixSettings};
use crate::transport::{Transport, TransportState};
use crate::voice_pool::VoicePool;

/// Maximum number of looping parts scheduled on the transport.
pub const MAX_PARTS: usize = 4;

/// The main playback engine.
///
/// Holds the whole audio graph of one session. [`Engine::load`] builds the
/// parts (allocating); everything reached from [`Engine::render_frame`]
/// runs on preallocated state.
pub struct Engine {
    transport: Transport,
    /// Melody voice; timbre follows the session temperature.
    melody: VoicePool,
    /// Harmony pad voice.
    harmony: VoicePool,
    /// Shared send fed by both voices.
    reverb: Reverb,
    parts: heapless::Vec<Part, MAX_PARTS>,
    /// Picks between alternative note lengths at trigger time.
    rng: SmallRng,
}

impl Engine {
    /// Create an idle engine with nothing loaded.
    pub fn new(sample_rate: u32, settings: MixSettings) -> Self {
        Self {
            transport: Transport::new(sample_rate),
            melody: VoicePool::new(
                TimbreProfile::Warm,
                db_to_gain(settings.melody_volume_db),
                sample_rate,
            ),
            harmony: VoicePool::new(
                TimbreProfile::Pad,
                db_to_gain(settings.harmony_volume_db),
                sample_rate,
            ),
            reverb: Reverb::new(settings.reverb.decay_secs, settings.reverb.wet, sample_rate),
            parts: heapless::Vec::new(),
            rng: SmallRng::seed_from_u64(0),
        }
    }

    /// Replace whatever was loaded with `composition`: stop everything,
    /// schedule the melody sequencer and the harmony loop at time zero.
    /// The transport stays stopped until [`Engine::play`].
    pub fn load(&mut self, composition: &Composition, seed: u64) {
        self.stop();
        self.melody.set_timbre(composition.melody_timbre);
        self.transport.set_bpm(composition.bpm);
        self.rng = SmallRng::seed_from_u64(seed);

        let melody = Part::sequence(
            &composition.melody,
            composition.subdivision,
            composition.melody_duration,
        );
        let harmony = Part::repeating(
            composition.chord,
            composition.chord_duration,
            composition.chord_interval,
        );
        for part in [melody, harmony] {
            if self.parts.push(part).is_err() {
                log::warn!("part capacity {} reached, dropping part", MAX_PARTS);
            }
        }
        for part in &mut self.parts {
            part.start(MusicalTime::zero());
        }
        log::debug!(
            "loaded composition: {} slots at {} ({} rests), {:.1} bpm",
            composition.melody.len(),
            composition.subdivision,
            composition.rest_count(),
            composition.bpm
        );
    }

    /// Start or resume the transport.
    pub fn play(&mut self) {
        self.transport.start();
    }

    /// Hold the transport; sounding voices ring out.
    pub fn pause(&mut self) {
        self.transport.pause();
    }

    /// Stop the transport, drop all parts and silence every voice and the
    /// reverb tail.
    pub fn stop(&mut self) {
        self.transport.stop();
        for part in &mut self.parts {
            part.stop();
        }
        self.parts.clear();
        self.melody.clear();
        self.harmony.clear();
        self.reverb.clear();
    }

    pub fn transport_state(&self) -> TransportState {
        self.transport.state()
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_started()
    }

    pub fn position(&self) -> MusicalTime {
        self.transport.position()
    }

    pub fn bpm(&self) -> f32 {
        self.transport.bpm()
    }

    /// Number of parts currently scheduled.
    pub fn scheduled_parts(&self) -> usize {
        self.parts.len()
    }

    /// Sounding voices across both pools.
    pub fn active_voices(&self) -> usize {
        self.melody.active_count() + self.harmony.active_count()
    }

    /// Generate one frame of audio.
    pub fn render_frame(&mut self) -> Frame {
        if self.transport.is_started() {
            let now = self.transport.position_sub_beats();
            for idx in 0..self.parts.len() {
                let due = self.parts[idx].due(now);
                for i in due {
                    if let Some(event) = self.parts[idx].event(i).copied() {
                        self.dispatch_event(&event);
                    }
                }
            }
            self.transport.advance();
        }

        let dry = self.melody.render() + self.harmony.render();
        // Voices reach the output directly and through the reverb.
        let out = dry + self.reverb.process(dry);
        Frame::from_f32(out, out)
    }

    /// Fill `frames` from the render path.
    pub fn render_into(&mut self, frames: &mut [Frame]) {
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| self.fill(frames));
        #[cfg(not(feature = "alloc_check"))]
        self.fill(frames);
    }

    fn fill(&mut self, frames: &mut [Frame]) {
        for frame in frames {
            *frame = self.render_frame();
        }
    }

    /// Render `count` frames into a new buffer (offline use).
    pub fn render_frames(&mut self, count: usize) -> Vec<Frame> {
        let mut frames = vec![Frame::silence(); count];
        self.fill(&mut frames);
        frames
    }

    /// Dispatch an event to its target voice.
    fn dispatch_event(&mut self, event: &Event) {
        match event.payload {
            EventPayload::Note { note, duration } => {
                let hold = self.hold_samples(duration);
                self.pool(event.target).trigger(note, hold);
            }
            EventPayload::Chord { notes, duration } => {
                let hold = self.hold_samples(duration);
                let pool = self.pool(event.target);
                for note in notes {
                    pool.trigger(note, hold);
                }
            }
        }
    }

    fn pool(&mut self, target: EventTarget) -> &mut VoicePool {
        match target {
            EventTarget::Melody => &mut self.melody,
            EventTarget::Harmony => &mut self.harmony,
        }
    }

    fn hold_samples(&mut self, duration: NoteDuration) -> u32 {
        let value = match duration {
            NoteDuration::Fixed(value) => value,
            NoteDuration::EitherOf(a, b) => {
                if self.rng.gen_bool(0.5) {
                    a
                } else {
                    b
                }
            }
        };
        self.transport.samples_for(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use em_ir::{HarmonyChord, Melody, MelodyEvent, Note, NoteValue, PitchClass};

    const SR: u32 = 8000;

    fn chord() -> HarmonyChord {
        HarmonyChord {
            notes: [
                Note::new(PitchClass::C, 3),
                Note::new(PitchClass::E, 3),
                Note::new(PitchClass::G, 3),
            ],
        }
    }

    fn composition(melody: &[MelodyEvent]) -> Composition {
        Composition {
            bpm: 120.0,
            melody: melody.iter().copied().collect::<Melody>(),
            subdivision: NoteValue::Quarter,
            melody_timbre: TimbreProfile::Warm,
            melody_duration: NoteDuration::Fixed(NoteValue::Quarter),
            chord: chord(),
            chord_duration: NoteValue::Half,
            chord_interval: NoteValue::Measure,
        }
    }

    fn four_notes() -> Composition {
        composition(&[
            MelodyEvent::Note(Note::new(PitchClass::C, 4)),
            MelodyEvent::Note(Note::new(PitchClass::D, 4)),
            MelodyEvent::Note(Note::new(PitchClass::E, 4)),
            MelodyEvent::Note(Note::new(PitchClass::G, 4)),
        ])
    }

    fn engine() -> Engine {
        Engine::new(SR, MixSettings::default())
    }

    #[test]
    fn idle_engine_is_silent() {
        let mut engine = engine();
        assert!(engine.render_frames(SR as usize).iter().all(Frame::is_silent));
    }

    #[test]
    fn load_schedules_two_parts_without_playing() {
        let mut engine = engine();
        engine.load(&four_notes(), 1);
        assert_eq!(engine.scheduled_parts(), 2);
        assert_eq!(engine.transport_state(), TransportState::Stopped);
        assert_eq!(engine.bpm(), 120.0);
    }

    #[test]
    fn loading_twice_replaces_parts() {
        let mut engine = engine();
        engine.load(&four_notes(), 1);
        engine.play();
        engine.render_frames(1000);
        engine.load(&four_notes(), 2);
        assert_eq!(engine.scheduled_parts(), 2);
        assert_eq!(engine.active_voices(), 0);
    }

    #[test]
    fn playing_produces_audio() {
        let mut engine = engine();
        engine.load(&four_notes(), 1);
        engine.play();
        let frames = engine.render_frames(SR as usize);
        assert!(frames.iter().any(|f| !f.is_silent()));
        // First melody note and the three chord notes.
        assert!(engine.active_voices() >= 4);
    }

    #[test]
    fn transport_advances_at_tempo() {
        let mut engine = engine();
        engine.load(&four_notes(), 1);
        engine.play();
        engine.render_frames(SR as usize);
        let beats = engine.position().as_beats_f64();
        assert!((beats - 2.0).abs() < 0.01, "at {} beats", beats);
    }

    #[test]
    fn stop_clears_everything() {
        let mut engine = engine();
        engine.load(&four_notes(), 1);
        engine.play();
        engine.render_frames(SR as usize);
        engine.stop();
        assert_eq!(engine.scheduled_parts(), 0);
        assert_eq!(engine.active_voices(), 0);
        assert_eq!(engine.position(), MusicalTime::zero());
        assert!(engine.render_frames(SR as usize).iter().all(Frame::is_silent));
    }

    #[test]
    fn pause_stops_new_events_and_tails_fade() {
        let mut engine = engine();
        engine.load(&four_notes(), 1);
        engine.play();
        engine.render_frames(SR as usize / 4);
        engine.pause();
        let held = engine.position();
        // Longest release is the pad's two seconds plus its hold.
        engine.render_frames(SR as usize * 4);
        assert_eq!(engine.position(), held);
        assert_eq!(engine.active_voices(), 0);

        engine.play();
        engine.render_frames(SR as usize);
        assert!(engine.position() > held);
    }

    #[test]
    fn all_rest_melody_still_plays_harmony() {
        let mut engine = engine();
        engine.load(&composition(&[MelodyEvent::Rest; 8]), 1);
        engine.play();
        let frames = engine.render_frames(SR as usize);
        assert!(frames.iter().any(|f| !f.is_silent()));
        assert_eq!(engine.active_voices(), 3);
    }

    #[test]
    fn either_of_duration_resolves_per_trigger() {
        let mut engine = engine();
        engine.transport.set_bpm(120.0);
        let mut seen = [false; 2];
        for _ in 0..64 {
            let hold = engine.hold_samples(NoteDuration::EitherOf(NoteValue::Eighth, NoteValue::Quarter));
            match hold {
                2000 => seen[0] = true,
                4000 => seen[1] = true,
                other => panic!("unexpected hold {}", other),
            }
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn render_into_fills_buffer() {
        let mut engine = engine();
        engine.load(&four_notes(), 1);
        engine.play();
        let mut block = [Frame::silence(); 256];
        engine.render_into(&mut block);
        assert!(block.iter().any(|f| !f.is_silent()));
    }
}
