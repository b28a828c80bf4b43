//! Headless playback controller for the emotive melody engine.
//!
//! [`PlaybackEngine`] owns at most one live session: an audio thread driving
//! an [`em_engine::Engine`] into an output opened from an [`AudioHost`].
//! Starting always tears the previous session down first, and a session is
//! only committed once its output device is confirmed, so callers see either
//! a whole session or none. [`PlayerControls`] tracks play/pause state the
//! way a UI button does, and [`render`] produces the same music offline.

mod controls;
mod error;
mod export;
mod playback;
pub mod render;
mod session;
mod settings;

pub use controls::PlayerControls;
pub use error::PlaybackError;
pub use export::{export_melody, ExportPayload};
pub use playback::{PlaybackEngine, PlaybackState};
pub use session::{SessionHandle, SessionInfo, SessionPlan};
pub use settings::EngineSettings;

// Re-export common types so callers don't need em-engine/em-audio directly.
pub use em_audio::{AudioError, AudioHost, AudioOutput, CpalHost};
pub use em_engine::{Frame, MixSettings, ReverbSettings};
