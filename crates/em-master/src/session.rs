//! One playback session: its resolved plan, its audio thread and the
//! handle given back to callers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use em_audio::{AudioError, AudioHost, AudioOutput};
use em_engine::{Engine, Frame};
use em_ir::{
    Composition, Emotion, EmotionAnalysis, HarmonyChord, Melody, Movement, TimbreProfile,
};
use em_mapping::{
    accent_color, compose, gradient, resolve_fingerprint, Hsl, MusicParams, VisualParams,
};
use rand::Rng;
use serde::Serialize;

use crate::settings::EngineSettings;

/// Resolved output values of a session, shared with display collaborators.
///
/// `bpm` here is the same value that drives the transport.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionInfo {
    pub bpm: f32,
    pub octave: i8,
    pub scale: Emotion,
    pub scale_mode: &'static str,
    pub harmony_scale: Emotion,
    pub harmony_mode: &'static str,
    pub timbre: TimbreProfile,
    pub movement: Movement,
    pub accent: Hsl,
    pub visual: VisualParams,
    pub melody: Melody,
    pub chord: HarmonyChord,
    pub summary: String,
}

/// Everything decided before any audio resource exists: parameters resolved
/// once (tempo jitter included), fingerprint, melody and chord.
#[derive(Clone, Debug)]
pub struct SessionPlan {
    pub info: SessionInfo,
    pub composition: Composition,
    /// Seed for trigger-time choices inside the engine.
    pub engine_seed: u64,
}

impl SessionPlan {
    pub fn new<R: Rng + ?Sized>(analysis: &EmotionAnalysis, rng: &mut R) -> Self {
        let params = MusicParams::resolve(analysis, rng);
        let fingerprint = resolve_fingerprint(analysis, rng);
        let composition = compose(&params, rng);
        let engine_seed = rng.gen();

        let info = SessionInfo {
            bpm: params.bpm,
            octave: params.octave,
            scale: params.scale.emotion,
            scale_mode: params.scale.mode,
            harmony_scale: params.harmony_scale.emotion,
            harmony_mode: params.harmony_scale.mode,
            timbre: params.timbre,
            movement: params.movement,
            accent: accent_color(&analysis.primary_emotion),
            visual: VisualParams {
                bpm: params.bpm,
                gradient: gradient(&analysis.primary_emotion),
                fingerprint,
            },
            melody: composition.melody.clone(),
            chord: composition.chord,
            summary: params.summary(),
        };

        Self { info, composition, engine_seed }
    }
}

/// Flags shared between the controller, handles and the audio thread.
#[derive(Debug, Default)]
pub(crate) struct SessionControl {
    pub(crate) stop: AtomicBool,
    pub(crate) paused: AtomicBool,
    /// Set by the audio thread once its output has been released.
    pub(crate) finished: AtomicBool,
}

/// Returned by a successful start. Cloneable and usable from any thread.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    control: Arc<SessionControl>,
    info: Arc<SessionInfo>,
}

impl SessionHandle {
    pub(crate) fn new(control: Arc<SessionControl>, info: Arc<SessionInfo>) -> Self {
        Self { control, info }
    }

    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    /// Ask the session to tear down. Idempotent; the audio thread releases
    /// its output shortly after, and the engine reports Idle from then on.
    pub fn stop(&self) {
        self.control.stop.store(true, Ordering::Release);
    }

    /// True until the session's audio thread has released its output.
    pub fn is_live(&self) -> bool {
        !self.control.finished.load(Ordering::Acquire)
    }
}

/// The live session owned by the engine's slot.
pub(crate) struct PlaybackSession {
    pub(crate) control: Arc<SessionControl>,
    pub(crate) info: Arc<SessionInfo>,
    pub(crate) thread: Option<JoinHandle<()>>,
}

impl PlaybackSession {
    pub(crate) fn handle(&self) -> SessionHandle {
        SessionHandle::new(self.control.clone(), self.info.clone())
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.control.finished.load(Ordering::Acquire)
    }

    /// Signal the thread and wait for it to release the output.
    pub(crate) fn shutdown(mut self) {
        self.control.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("audio thread panicked during shutdown");
            }
        }
    }
}

/// Body of a session's audio thread.
///
/// Opens the output, reports readiness (sample rate or the open error) on
/// `ready`, then renders blocks until asked to stop. The engine and output
/// are torn down before `finished` is raised.
pub(crate) fn audio_thread<H: AudioHost>(
    host: Arc<H>,
    composition: Composition,
    engine_seed: u64,
    settings: EngineSettings,
    control: Arc<SessionControl>,
    ready: Sender<Result<u32, AudioError>>,
) {
    let mut output = match host.open().and_then(|mut output| {
        output.start()?;
        Ok(output)
    }) {
        Ok(output) => output,
        Err(err) => {
            control.finished.store(true, Ordering::Release);
            let _ = ready.send(Err(err));
            return;
        }
    };

    let sample_rate = output.sample_rate();
    let mut engine = Engine::new(sample_rate, settings.mix);
    engine.load(&composition, engine_seed);
    engine.play();
    let mut block = vec![Frame::silence(); settings.block_size.max(1)];

    if ready.send(Ok(sample_rate)).is_err() {
        // Nobody is waiting on this session any more.
        control.stop.store(true, Ordering::Release);
    }

    let mut paused = false;
    while !control.stop.load(Ordering::Acquire) {
        let want_paused = control.paused.load(Ordering::Acquire);
        if want_paused != paused {
            if want_paused {
                engine.pause();
            } else {
                engine.play();
            }
            paused = want_paused;
        }

        engine.render_into(&mut block);
        if let Err(err) = output.write(&block, &control.stop) {
            log::error!("audio output failed, ending session: {}", err);
            break;
        }
    }

    engine.stop();
    if let Err(err) = output.stop() {
        log::warn!("failed to stop audio output: {}", err);
    }
    drop(output);
    control.finished.store(true, Ordering::Release);
    log::debug!("audio thread finished");
}
