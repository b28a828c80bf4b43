//! Audio output backends for the emotive melody engine.

mod cpal_backend;
mod traits;

pub use cpal_backend::{CpalHost, CpalOutput};
pub use traits::{AudioError, AudioHost, AudioOutput};
