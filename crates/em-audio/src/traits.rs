//! Audio output traits and error types.

use std::sync::atomic::AtomicBool;

use em_engine::Frame;
use thiserror::Error;

/// Error type for audio operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// Failed to initialize audio device
    #[error("device init error: {0}")]
    DeviceInit(String),
    /// Failed to create audio stream
    #[error("stream create error: {0}")]
    StreamCreate(String),
    /// Playback error
    #[error("playback error: {0}")]
    Playback(String),
    /// No audio device available
    #[error("no audio device available")]
    NoDevice,
}

/// Trait for audio output backends.
pub trait AudioOutput {
    /// Get the sample rate.
    fn sample_rate(&self) -> u32;

    /// Write frames to the output. Blocks until every frame is queued, which
    /// paces the caller to the device clock.
    ///
    /// While blocked, implementations must watch `cancel` and return soon
    /// after it is raised, even if frames are left unqueued.
    fn write(&mut self, frames: &[Frame], cancel: &AtomicBool) -> Result<(), AudioError>;

    /// Start playback.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Stop playback.
    fn stop(&mut self) -> Result<(), AudioError>;
}

/// Opens outputs on some audio subsystem.
///
/// Each call to [`AudioHost::open`] is one playback initialization; the
/// returned output is owned by a single session and released on drop.
/// Outputs are opened on the thread that drives them, so they need not be
/// `Send`.
pub trait AudioHost: Send + Sync + 'static {
    type Output: AudioOutput;

    fn open(&self) -> Result<Self::Output, AudioError>;
}
