//! The playback engine: an exclusively owned session slot and its
//! start/stop/toggle lifecycle.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use em_audio::{AudioError, AudioHost};
use em_ir::EmotionAnalysis;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::PlaybackError;
use crate::session::{
    audio_thread, PlaybackSession, SessionControl, SessionHandle, SessionInfo, SessionPlan,
};
use crate::settings::EngineSettings;

/// Observable lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No live session.
    Idle,
    /// Session live, transport advancing.
    Running,
    /// Session live, transport suspended.
    Paused,
}

/// Owns at most one live session.
///
/// Lifecycle methods take `&mut self`; share an engine across threads by
/// wrapping it in a mutex, which queues a concurrent `stop` behind an
/// in-flight `start`.
pub struct PlaybackEngine<H: AudioHost> {
    host: Arc<H>,
    settings: EngineSettings,
    rng: StdRng,
    session: Option<PlaybackSession>,
}

impl<H: AudioHost> PlaybackEngine<H> {
    pub fn new(host: H, settings: EngineSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { host: Arc::new(host), settings, rng, session: None }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    // --- Lifecycle ---

    /// Tear down any current session, then build and start a new one for
    /// `analysis`. On failure nothing is left behind and the engine is Idle.
    pub fn start(&mut self, analysis: &EmotionAnalysis) -> Result<SessionHandle, PlaybackError> {
        self.stop();

        let plan = SessionPlan::new(analysis, &mut self.rng);
        let SessionPlan { info, composition, engine_seed } = plan;
        let info = Arc::new(info);
        let control = Arc::new(SessionControl::default());
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);

        let thread = {
            let host = self.host.clone();
            let control = control.clone();
            let settings = self.settings;
            std::thread::Builder::new()
                .name("emotive-audio".into())
                .spawn(move || {
                    audio_thread(host, composition, engine_seed, settings, control, ready_tx)
                })
                .map_err(|e| AudioError::DeviceInit(format!("audio thread: {}", e)))?
        };

        let ready = ready_rx.recv().unwrap_or_else(|_| {
            Err(AudioError::DeviceInit("audio thread exited before the device was ready".into()))
        });
        match ready {
            Ok(sample_rate) => {
                log::info!(
                    "session started at {} Hz: {} ({} {})",
                    sample_rate,
                    info.summary,
                    info.scale,
                    info.scale_mode
                );
                let session = PlaybackSession { control, info, thread: Some(thread) };
                let handle = session.handle();
                self.session = Some(session);
                Ok(handle)
            }
            Err(err) => {
                if thread.join().is_err() {
                    log::error!("audio thread panicked while opening the device");
                }
                log::warn!("could not start session: {}", err);
                Err(PlaybackError::AudioUnavailable(err))
            }
        }
    }

    /// Stop and release the current session, if any. Idempotent.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.shutdown();
            log::info!("session stopped");
        }
    }

    /// Flip the live session between running and paused and report whether
    /// it is now running. Without a live session this does nothing and
    /// returns `false`; it never creates one.
    pub fn toggle(&mut self) -> bool {
        let Some(session) = self.live_session() else {
            log::warn!("toggle without a live session ignored");
            return false;
        };
        let was_paused = session.control.paused.load(Ordering::Acquire);
        session.control.paused.store(!was_paused, Ordering::Release);
        was_paused
    }

    // --- Queries ---

    pub fn state(&self) -> PlaybackState {
        match &self.session {
            Some(session) if !session.is_finished() => {
                if session.control.paused.load(Ordering::Acquire) {
                    PlaybackState::Paused
                } else {
                    PlaybackState::Running
                }
            }
            _ => PlaybackState::Idle,
        }
    }

    /// Resolved values of the live session.
    pub fn session_info(&self) -> Option<&SessionInfo> {
        self.session.as_ref().filter(|s| !s.is_finished()).map(|s| s.info.as_ref())
    }

    /// The current session if it is still live. A session whose thread has
    /// already finished (handle-initiated stop, output failure) is reaped.
    fn live_session(&mut self) -> Option<&PlaybackSession> {
        if self.session.as_ref().is_some_and(PlaybackSession::is_finished) {
            if let Some(session) = self.session.take() {
                session.shutdown();
            }
        }
        self.session.as_ref()
    }
}

impl<H: AudioHost> Drop for PlaybackEngine<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use em_audio::AudioOutput;
    use em_engine::Frame;
    use em_ir::{Movement, Temperature};
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::time::Duration;

    #[derive(Default)]
    struct NullHost {
        opens: AtomicUsize,
    }

    struct NullOutput;

    impl AudioOutput for NullOutput {
        fn sample_rate(&self) -> u32 {
            8000
        }

        fn write(&mut self, _frames: &[Frame], _cancel: &AtomicBool) -> Result<(), AudioError> {
            std::thread::sleep(Duration::from_millis(1));
            Ok(())
        }

        fn start(&mut self) -> Result<(), AudioError> {
            Ok(())
        }

        fn stop(&mut self) -> Result<(), AudioError> {
            Ok(())
        }
    }

    impl AudioHost for NullHost {
        type Output = NullOutput;

        fn open(&self) -> Result<NullOutput, AudioError> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(NullOutput)
        }
    }

    fn engine() -> PlaybackEngine<NullHost> {
        let settings = EngineSettings { seed: Some(1), block_size: 64, ..Default::default() };
        PlaybackEngine::new(NullHost::default(), settings)
    }

    fn analysis() -> EmotionAnalysis {
        EmotionAnalysis::new("love", "hope", 5, Temperature::Warm, Movement::Stable)
    }

    #[test]
    fn new_engine_is_idle() {
        let engine = engine();
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert!(engine.session_info().is_none());
    }

    #[test]
    fn start_runs_and_stop_idles() {
        let mut engine = engine();
        let handle = engine.start(&analysis()).unwrap();
        assert_eq!(engine.state(), PlaybackState::Running);
        assert!(handle.is_live());
        engine.stop();
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert!(!handle.is_live());
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let mut engine = engine();
        engine.start(&analysis()).unwrap();
        assert!(!engine.toggle());
        assert_eq!(engine.state(), PlaybackState::Paused);
        assert!(engine.toggle());
        assert_eq!(engine.state(), PlaybackState::Running);
    }

    #[test]
    fn toggle_without_session_is_noop() {
        let mut engine = engine();
        assert!(!engine.toggle());
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert_eq!(engine.host().opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handle_stop_reaps_session() {
        let mut engine = engine();
        let handle = engine.start(&analysis()).unwrap();
        handle.stop();
        while handle.is_live() {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert!(!engine.toggle());
        assert!(engine.session_info().is_none());
    }

    #[test]
    fn session_info_matches_handle() {
        let mut engine = engine();
        let handle = engine.start(&analysis()).unwrap();
        assert_eq!(engine.session_info(), Some(handle.info()));
        assert_eq!(handle.info().octave, 4);
    }
}
