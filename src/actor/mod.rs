//! Actor Model: Message-passing concurrency for the animation.
//!
//! Terminal input is polled on its own thread and forwarded to the
//! animation loop as [`InputEvent`]s. Timing comes from a
//! `crossbeam_channel::tick` channel, so the loop selects over two
//! receivers:
//!
//! ```text
//! ┌───────────────┐       Instant       ┌────────────────┐
//! │ tick channel  │ ──────────────────▶ │                │
//! └───────────────┘                     │ Animation Loop │ ──▶ TerminalSurface
//! ┌───────────────┐     InputEvent      │   (select!)    │
//! │ Input Thread  │ ──────────────────▶ │                │
//! └───────────────┘                     └────────────────┘
//! ```
//!
//! Only the animation loop touches the terminal surface.

mod input;
mod messages;

pub use input::{CrosstermEvents, EventSource, InputActor};
pub use messages::{InputEvent, KeyCode, KeyModifiers};
