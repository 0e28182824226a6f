//! Terminal module: the drawing surface the animation renders onto.
//!
//! [`TerminalSurface`] is the only way the scene touches the screen.
//! [`CrosstermSurface`] drives a real terminal; [`HeadlessSurface`] keeps
//! everything in memory for tests and benchmarks.

mod headless;
mod screen;

pub use headless::HeadlessSurface;
pub use screen::{restore_terminal, CrosstermSurface};

use crate::buffer::{Modifiers, Rgb};
use std::io;

/// A cell grid that can be cleared, drawn on, and flushed to the screen.
///
/// Writes outside the grid are silently clipped. Nothing becomes visible
/// until [`flush`](TerminalSurface::flush) succeeds.
pub trait TerminalSurface {
    /// Current size in `(columns, rows)`.
    fn size(&self) -> (u16, u16);

    /// Put a single character at (x, y).
    fn set_cell(&mut self, x: u16, y: u16, ch: char, fg: Rgb, bg: Rgb);

    /// Draw a string starting at (x, y).
    ///
    /// Returns the number of columns the string spans, including any part
    /// clipped at the right edge.
    fn draw_str(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb, modifiers: Modifiers) -> u16;

    /// Blank the whole frame with the given background.
    fn clear(&mut self, bg: Rgb) -> io::Result<()>;

    /// Push the drawn frame to the screen.
    fn flush(&mut self) -> io::Result<()>;
}
