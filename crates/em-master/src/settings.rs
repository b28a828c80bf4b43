//! Engine configuration.

use em_engine::MixSettings;
use serde::{Deserialize, Serialize};

/// Everything a [`PlaybackEngine`](crate::PlaybackEngine) needs besides its
/// audio host. Every field has a default, so partial config files work.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub mix: MixSettings,
    /// Frames rendered per write to the output.
    pub block_size: usize,
    /// Seed for all session randomness; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { mix: MixSettings::default(), block_size: 512, seed: None }
    }
}
