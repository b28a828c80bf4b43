//! Realtime renderer for the emotive melody engine.
//!
//! Owns the audio graph of one session: a melody voice pool and a harmony
//! pad pool routed through a shared reverb, a looping melody sequencer and
//! a once-per-measure harmony loop, all clocked by a single transport.
//! After [`Engine::load`] the per-frame render path does not allocate.

mod envelope;
mod event_queue;
mod frame;
mod mixer;
mod oscillator;
mod part;
mod reverb;
mod settings;
mod transport;
mod voice;
mod voice_pool;

pub use envelope::{EnvelopeStage, EnvelopeState};
pub use event_queue::EventQueue;
pub use frame::Frame;
pub use mixer::{Engine, MAX_PARTS};
pub use oscillator::Oscillator;
pub use part::Part;
pub use reverb::Reverb;
pub use settings::{db_to_gain, MixSettings, ReverbSettings};
pub use transport::{Transport, TransportState};
pub use voice::{Voice, VoiceState};
pub use voice_pool::{VoiceId, VoicePool, MAX_VOICES};
