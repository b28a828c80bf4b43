//! Play/pause/regenerate button state.

use em_audio::AudioHost;
use em_ir::EmotionAnalysis;

use crate::error::PlaybackError;
use crate::playback::{PlaybackEngine, PlaybackState};
use crate::session::SessionHandle;

/// What a player UI remembers between presses.
///
/// The first play press starts a session; later presses only toggle it.
/// A press with no live session (it ended on its own or was stopped)
/// starts a fresh one. When a start fails both flags keep their previous values, so the same
/// press can simply be retried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerControls {
    has_started: bool,
    is_playing: bool,
}

impl PlayerControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Handle the play/pause button. Returns whether playback is now running.
    pub fn play_pressed<H: AudioHost>(
        &mut self,
        engine: &mut PlaybackEngine<H>,
        analysis: &EmotionAnalysis,
    ) -> Result<bool, PlaybackError> {
        if self.has_started && engine.state() != PlaybackState::Idle {
            self.is_playing = engine.toggle();
        } else {
            engine.start(analysis)?;
            self.has_started = true;
            self.is_playing = true;
        }
        Ok(self.is_playing)
    }

    /// Throw the current session away and start a fresh one.
    pub fn regenerate<H: AudioHost>(
        &mut self,
        engine: &mut PlaybackEngine<H>,
        analysis: &EmotionAnalysis,
    ) -> Result<SessionHandle, PlaybackError> {
        engine.stop();
        let handle = engine.start(analysis)?;
        self.has_started = true;
        self.is_playing = true;
        Ok(handle)
    }
}
