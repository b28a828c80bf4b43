use em_audio::AudioError;
use thiserror::Error;

/// Failures surfaced by [`PlaybackEngine::start`](crate::PlaybackEngine::start).
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The output device could not be acquired or started. The engine is
    /// left idle and the call may be retried.
    #[error("audio unavailable: {0}")]
    AudioUnavailable(#[from] AudioError),
}
