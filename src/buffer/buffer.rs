//! Buffer: A grid of cells representing the terminal screen.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order.

use super::cell::{Cell, Modifiers, Rgb};

/// A grid of cells representing the terminal screen.
///
/// The buffer stores cells in a contiguous `Vec`.
/// Access is in row-major order: `index = y * width + x`.
/// Writes outside the grid are ignored, so callers may draw sprites that
/// run past the right edge without clipping them first.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Terminal width in columns.
    width: u16,
    /// Terminal height in rows.
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to empty (space with default colors).
    /// A zero-sized buffer is valid and simply drops every write.
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Set a character at (x, y).
    ///
    /// For wide characters this also writes a continuation cell at
    /// (x+1, y). Returns the display width of the character, or 0 if out
    /// of bounds.
    pub fn set_char(&mut self, x: u16, y: u16, ch: char, fg: Rgb, bg: Rgb, modifiers: Modifiers) -> u8 {
        let cell = Cell::new(ch)
            .with_fg(fg)
            .with_bg(bg)
            .with_modifiers(modifiers);
        if !self.set(x, y, cell) {
            return 0;
        }

        let width = cell.display_width();
        if width == 2 {
            if let Some(next) = x.checked_add(1) {
                self.set(next, y, Cell::wide_continuation(bg));
            }
        }
        width
    }

    /// Draw a string starting at (x, y), clipping at the right edge.
    ///
    /// Returns the number of columns the string occupies, clipped or not.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb, modifiers: Modifiers) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            let width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if width == 0 {
                continue;
            }
            if col < self.width {
                self.set_char(col, y, ch, fg, bg, modifiers);
            }
            col = col.saturating_add(u16::try_from(width).unwrap_or(1));
        }
        col - x
    }

    /// Fill the entire buffer with blank cells on the given background.
    pub fn clear(&mut self, bg: Rgb) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Resize the buffer, discarding its content.
    ///
    /// New cells are initialized to empty.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }
        *self = Self::new(new_width, new_height);
    }

    /// Copy content from another buffer of the same size.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// The visible text of row `y`, continuation cells skipped.
    ///
    /// Returns an empty string for rows outside the buffer.
    pub fn line(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        self.rows()
            .nth(y as usize)
            .map(|row| {
                row.iter()
                    .filter(|c| !c.is_wide_continuation())
                    .map(Cell::ch)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
