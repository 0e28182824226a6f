//! Error types.

use std::io;

/// Everything that can end an animation run early.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The terminal could not be taken over, or a worker thread could not
    /// be started. Nothing was drawn.
    #[error("failed to initialize terminal: {0}")]
    Init(#[source] io::Error),

    /// Clearing or flushing a frame failed.
    #[error("failed to draw frame: {0}")]
    Draw(#[source] io::Error),

    /// The tick channel closed while the animation was running.
    #[error("ticker stopped unexpectedly")]
    TickerStopped,
}

/// Result alias for animation operations.
pub type Result<T> = std::result::Result<T, Error>;
