//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! 1. Compare the displayed and the next buffer
//! 2. Generate escape sequences for changed cells only
//! 3. Skip cursor moves between adjacent cells
//! 4. Track color and modifier state to avoid redundant SGR sequences
//!
//! All output is accumulated in a single `Vec<u8>` and flushed with one write.

use super::{Buffer, Cell, Modifiers, Rgb};
use std::io::Write;

/// State tracker for the diffing algorithm.
///
/// This tracks the terminal's cursor position, colors and modifiers as
/// left by the previous render.
#[derive(Debug, Clone)]
pub struct DiffState {
    cursor_x: u16,
    cursor_y: u16,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Reset the state (e.g., after a full screen clear).
    pub const fn reset(&mut self) {
        self.fg = None;
        self.bg = None;
        self.modifiers = None;
        // Force cursor move on next write
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
}

/// Render the difference between two buffers into an ANSI sequence buffer.
///
/// `current` is what the terminal shows, `next` is what it should show.
/// Both must have the same dimensions.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let width = next.width();

    for y in 0..next.height() {
        for x in 0..width {
            let idx = (y as usize) * (width as usize) + (x as usize);
            let current_cell = &current.cells()[idx];
            let next_cell = &next.cells()[idx];

            if current_cell == next_cell || next_cell.is_wide_continuation() {
                continue;
            }

            result.cells_changed += 1;

            if state.cursor_y != y || state.cursor_x != x {
                emit_cursor_move(output, x, y);
                state.cursor_x = x;
                state.cursor_y = y;
                result.cursor_moves += 1;
            }

            emit_style(output, next_cell, state, &mut result);
            emit_char(output, next_cell);

            state.cursor_x = state
                .cursor_x
                .saturating_add(u16::from(next_cell.display_width().max(1)));
        }
    }

    result
}

/// Generate a full redraw sequence (no diffing).
///
/// Used for the first frame and after a resize, when the terminal
/// content is unknown.
pub fn render_full(buffer: &Buffer, output: &mut Vec<u8>, state: &mut DiffState) {
    state.reset();
    output.extend_from_slice(b"\x1b[0m\x1b[2J");

    let mut scratch = DiffResult::default();
    for (y, row) in buffer.rows().enumerate() {
        let y = u16::try_from(y).unwrap_or(u16::MAX);
        emit_cursor_move(output, 0, y);
        for cell in row.iter().filter(|c| !c.is_wide_continuation()) {
            emit_style(output, cell, state, &mut scratch);
            emit_char(output, cell);
        }
    }
    state.cursor_x = u16::MAX;
    state.cursor_y = u16::MAX;
}

/// Emit cursor movement using the most compact form.
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    // ANSI uses 1-indexed positions
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

fn emit_style(output: &mut Vec<u8>, cell: &Cell, state: &mut DiffState, result: &mut DiffResult) {
    let next_mods = cell.modifiers();
    let current_mods = state.modifiers.unwrap_or(Modifiers::empty());

    // Removing a modifier needs a full SGR reset, which also drops colors.
    if !current_mods.difference(next_mods).is_empty() {
        output.extend_from_slice(b"\x1b[0m");
        state.fg = None;
        state.bg = None;
        state.modifiers = None;
    }

    if state.fg != Some(cell.fg()) {
        let c = cell.fg();
        let _ = write!(output, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b);
        state.fg = Some(c);
        result.color_changes += 1;
    }
    if state.bg != Some(cell.bg()) {
        let c = cell.bg();
        let _ = write!(output, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b);
        state.bg = Some(c);
        result.color_changes += 1;
    }

    if state.modifiers != Some(next_mods) {
        let added = next_mods.difference(state.modifiers.unwrap_or(Modifiers::empty()));
        if added.contains(Modifiers::BOLD) {
            output.extend_from_slice(b"\x1b[1m");
        }
        if added.contains(Modifiers::DIM) {
            output.extend_from_slice(b"\x1b[2m");
        }
        if added.contains(Modifiers::ITALIC) {
            output.extend_from_slice(b"\x1b[3m");
        }
        if added.contains(Modifiers::UNDERLINE) {
            output.extend_from_slice(b"\x1b[4m");
        }
        state.modifiers = Some(next_mods);
    }
}

#[inline]
fn emit_char(output: &mut Vec<u8>, cell: &Cell) {
    let ch = if cell.display_width() == 0 { ' ' } else { cell.ch() };
    let mut utf8 = [0u8; 4];
    output.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(width: u16, height: u16, bytes: &[u8]) -> vt100::Parser {
        let mut parser = vt100::Parser::new(height, width, 0);
        parser.process(bytes);
        parser
    }

    #[test]
    fn test_diff_identical_buffers() {
        let a = Buffer::new(10, 5);
        let b = Buffer::new(10, 5);
        let mut output = Vec::new();
        let mut state = DiffState::new();

        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_diff_adjacent_cells_no_cursor_move() {
        let a = Buffer::new(10, 5);
        let mut b = Buffer::new(10, 5);
        b.draw_text(0, 0, "---", Rgb::WHITE, Rgb::BLACK, Modifiers::empty());

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 3);
        // Cursor starts at (0,0) and the cells are adjacent
        assert_eq!(result.cursor_moves, 0);
        // fg and bg once for the first cell only
        assert_eq!(result.color_changes, 2);
    }

    #[test]
    fn test_cursor_move_forms() {
        let mut output = Vec::new();
        emit_cursor_move(&mut output, 0, 0);
        assert_eq!(&output, b"\x1b[H");

        output.clear();
        emit_cursor_move(&mut output, 0, 5);
        assert_eq!(&output, b"\x1b[6H");

        output.clear();
        emit_cursor_move(&mut output, 10, 5);
        assert_eq!(&output, b"\x1b[6;11H");
    }

    #[test]
    fn test_full_render_replays_to_same_screen() {
        let mut buffer = Buffer::new(12, 3);
        buffer.draw_text(2, 0, "---", Rgb::WHITE, Rgb::BLACK, Modifiers::empty());
        buffer.draw_text(0, 2, "(  ' e')", Rgb::new(0x6a, 0xc2, 0x5a), Rgb::BLACK, Modifiers::BOLD);

        let mut output = Vec::new();
        render_full(&buffer, &mut output, &mut DiffState::new());

        let parser = replay(12, 3, &output);
        let screen = parser.screen();
        assert_eq!(screen.contents_between(0, 0, 0, 12).trim_end(), "  ---");
        assert_eq!(screen.contents_between(2, 0, 2, 12).trim_end(), "(  ' e')");
        assert!(screen.cell(2, 0).unwrap().bold());
    }

    #[test]
    fn test_diff_after_full_render_updates_screen() {
        let mut shown = Buffer::new(10, 2);
        shown.draw_text(0, 0, "^^^^^", Rgb::WHITE, Rgb::BLACK, Modifiers::empty());

        let mut output = Vec::new();
        let mut state = DiffState::new();
        render_full(&shown, &mut output, &mut state);

        let mut next = Buffer::new(10, 2);
        next.draw_text(4, 1, "^^^^^", Rgb::WHITE, Rgb::BLACK, Modifiers::DIM);
        render_diff(&shown, &next, &mut output, &mut state);

        let parser = replay(10, 2, &output);
        let screen = parser.screen();
        assert_eq!(screen.contents_between(0, 0, 0, 10).trim(), "");
        assert_eq!(screen.contents_between(1, 0, 1, 10).trim_end(), "    ^^^^^");
    }

    #[test]
    fn test_removing_modifier_resets_colors() {
        let mut a = Buffer::new(4, 1);
        a.set(0, 0, Cell::new('a').with_modifiers(Modifiers::DIM));
        let mut b = Buffer::new(4, 1);
        b.set(0, 0, Cell::new('a').with_modifiers(Modifiers::DIM));
        b.set(1, 0, Cell::new('b'));

        let mut output = Vec::new();
        let mut state = DiffState::new();
        state.modifiers = Some(Modifiers::DIM);
        state.fg = Some(Rgb::DEFAULT_FG);
        state.bg = Some(Rgb::DEFAULT_BG);
        state.cursor_x = 1;

        let result = render_diff(&a, &b, &mut output, &mut state);
        assert_eq!(result.cells_changed, 1);
        assert!(output.starts_with(b"\x1b[0m"));
        assert_eq!(result.color_changes, 2);
    }
}
