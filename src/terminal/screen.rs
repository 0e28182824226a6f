//! `CrosstermSurface`: a double-buffered surface on the real terminal.
//!
//! Acquiring the surface enters raw mode and the alternate screen; dropping
//! it restores the terminal, whichever way the program leaves.

use super::TerminalSurface;
use crate::buffer::diff::{render_diff, render_full, DiffState};
use crate::buffer::{Buffer, Modifiers, Rgb};
use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};

/// Terminal surface backed by crossterm.
pub struct CrosstermSurface {
    stdout: Stdout,
    /// What the terminal currently shows.
    current: Buffer,
    /// The frame being drawn.
    next: Buffer,
    diff_state: DiffState,
    /// Pre-allocated output buffer, written with a single syscall per flush.
    output: Vec<u8>,
    needs_full_redraw: bool,
}

impl CrosstermSurface {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    ///
    /// If any step fails, whatever was already changed is undone before the
    /// error is returned.
    pub fn acquire() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut surface = Self {
            stdout: io::stdout(),
            current: Buffer::new(width, height),
            next: Buffer::new(width, height),
            diff_state: DiffState::new(),
            output: Vec::with_capacity(65536),
            needs_full_redraw: true,
        };
        execute!(
            surface.stdout,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap
        )?;

        tracing::debug!(width, height, "terminal acquired");
        Ok(surface)
    }

    /// Pick up a terminal resize before a new frame is drawn.
    fn sync_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if (width, height) != (self.next.width(), self.next.height()) {
            tracing::debug!(width, height, "terminal resized");
            self.current.resize(width, height);
            self.next.resize(width, height);
            self.needs_full_redraw = true;
        }
        Ok(())
    }
}

impl TerminalSurface for CrosstermSurface {
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
        self.sync_size()?;
        self.next.clear(bg);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.clear();

        if self.needs_full_redraw {
            render_full(&self.next, &mut self.output, &mut self.diff_state);
        } else {
            render_diff(&self.current, &self.next, &mut self.output, &mut self.diff_state);
        }

        if !self.output.is_empty() {
            let written = self
                .stdout
                .write_all(&self.output)
                .and_then(|()| self.stdout.flush());
            if let Err(err) = written {
                // The screen is in an unknown state after a partial write.
                self.needs_full_redraw = true;
                return Err(err);
            }
        }

        self.needs_full_redraw = false;
        self.current.copy_from(&self.next);
        Ok(())
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        restore_terminal();
        tracing::debug!("terminal restored");
    }
}

/// Put the terminal back into cooked mode on the main screen.
///
/// Safe to call more than once; errors are ignored since this runs on
/// teardown paths, including the panic hook.
pub fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        ResetColor,
        cursor::Show,
        EnableLineWrap,
        LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
}
