//! # Kappa
//!
//! A kappa strolls across your terminal while clouds drift overhead and
//! waves roll below.
//!
//! ## Core Concepts
//!
//! - **Tick-driven**: a tick channel paces the animation; every tick draws
//!   exactly one frame
//! - **Layered scene**: sky and sea are grids of glyph positions reshuffled
//!   on their own cadence, the kappa cycles through a fixed action list
//! - **Actor model**: input is polled on its own thread and reaches the
//!   animation loop over a channel, next to the tick channel; only the loop
//!   touches the terminal
//! - **Double-buffered output**: frames are diffed so each flush writes only
//!   changed cells
//!
//! ## Example
//!
//! ```rust,no_run
//! use kappa::AnimationConfig;
//!
//! let config = AnimationConfig::with_message("Kyuu!");
//! kappa::run(&config)?;
//! # Ok::<(), kappa::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod animation;
pub mod buffer;
pub mod config;
pub mod error;
pub mod scene;
pub mod terminal;

// Re-exports for convenience
pub use actor::{InputEvent, KeyCode, KeyModifiers};
pub use animation::{run, AnimationLoop, AnimationState, LoopState};
pub use buffer::{Buffer, Cell, Modifiers, Rgb};
pub use config::AnimationConfig;
pub use error::{Error, Result};
pub use scene::{KappaAnimator, OffsetGrid, SceneLayers};
pub use terminal::{CrosstermSurface, HeadlessSurface, TerminalSurface};
