//! Animation configuration.

use std::time::Duration;

/// What the kappa says unless told otherwise.
pub const DEFAULT_MESSAGE: &str = "Hello!";

/// Configuration for an animation run.
///
/// The defaults reproduce the classic look: a 100 ms tick, clouds
/// reshuffled every 17 columns, waves every 8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationConfig {
    /// What the kappa says in its speaking pose.
    pub message: String,
    /// Time between animation steps.
    pub tick_interval: Duration,
    /// The sky is reshuffled when the scroll offset is a multiple of this.
    pub sky_update_unit: u16,
    /// The sea is reshuffled when the scroll offset is a multiple of this.
    pub sea_update_unit: u16,
    /// How long the input thread waits per poll before checking for shutdown.
    pub input_poll_timeout: Duration,
    /// Seed for cloud and wave placement. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            tick_interval: Duration::from_millis(100),
            sky_update_unit: 17,
            sea_update_unit: 8,
            input_poll_timeout: Duration::from_millis(50),
            seed: None,
        }
    }
}

impl AnimationConfig {
    /// Default configuration with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}
