//! `HeadlessSurface`: an in-memory surface with no terminal attached.

use super::TerminalSurface;
use crate::buffer::{Buffer, Modifiers, Rgb};
use std::io;

/// Surface that renders into memory.
///
/// The last flushed frame is available through [`screen`](Self::screen).
/// Failures can be injected with [`fail_next_clear`](Self::fail_next_clear)
/// and [`fail_next_flush`](Self::fail_next_flush).
#[derive(Debug)]
pub struct HeadlessSurface {
    next: Buffer,
    screen: Buffer,
    flushes: u64,
    fail_clear: bool,
    fail_flush: bool,
}

impl HeadlessSurface {
    /// Create a surface of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            next: Buffer::new(width, height),
            screen: Buffer::new(width, height),
            flushes: 0,
            fail_clear: false,
            fail_flush: false,
        }
    }

    /// Change the size, as a terminal resize would.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.next.resize(width, height);
        self.screen.resize(width, height);
    }

    /// The last successfully flushed frame.
    pub const fn screen(&self) -> &Buffer {
        &self.screen
    }

    /// Number of successful flushes so far.
    pub const fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Make the next [`clear`](TerminalSurface::clear) fail.
    pub const fn fail_next_clear(&mut self) {
        self.fail_clear = true;
    }

    /// Make the next [`flush`](TerminalSurface::flush) fail.
    pub const fn fail_next_flush(&mut self) {
        self.fail_flush = true;
    }
}

impl TerminalSurface for HeadlessSurface {
    fn size(&self) -> (u16, u16) {
        (self.next.width(), self.next.height())
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, fg: Rgb, bg: Rgb) {
        self.next.set_char(x, y, ch, fg, bg, Modifiers::empty());
    }

    fn draw_str(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb, modifiers: Modifiers) -> u16 {
        self.next.draw_text(x, y, text, fg, bg, modifiers)
    }

    fn clear(&mut self, bg: Rgb) -> io::Result<()> {
        if std::mem::take(&mut self.fail_clear) {
            return Err(io::Error::other("injected clear failure"));
        }
        self.next.clear(bg);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if std::mem::take(&mut self.fail_flush) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "injected flush failure"));
        }
        self.screen.copy_from(&self.next);
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_visible_before_flush() {
        let mut surface = HeadlessSurface::new(8, 2);
        surface.draw_str(0, 0, "---", Rgb::WHITE, Rgb::BLACK, Modifiers::empty());
        assert_eq!(surface.screen().line(0).trim_end(), "");

        surface.flush().unwrap();
        assert_eq!(surface.screen().line(0).trim_end(), "---");
        assert_eq!(surface.flush_count(), 1);
    }

    #[test]
    fn test_injected_failures_fire_once() {
        let mut surface = HeadlessSurface::new(4, 1);
        surface.fail_next_clear();
        assert!(surface.clear(Rgb::BLACK).is_err());
        assert!(surface.clear(Rgb::BLACK).is_ok());

        surface.fail_next_flush();
        assert_eq!(surface.flush().unwrap_err().kind(), io::ErrorKind::BrokenPipe);
        assert!(surface.flush().is_ok());
        assert_eq!(surface.flush_count(), 1);
    }

    #[test]
    fn test_set_cell_clips() {
        let mut surface = HeadlessSurface::new(2, 1);
        surface.set_cell(1, 0, '~', Rgb::WHITE, Rgb::BLACK);
        surface.set_cell(2, 0, '~', Rgb::WHITE, Rgb::BLACK);
        surface.flush().unwrap();
        assert_eq!(surface.screen().line(0), " ~");
    }
}
