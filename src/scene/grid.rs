//! Offset grids: where the repeating clouds and waves sit on their band.

use crate::buffer::{Modifiers, Rgb};
use crate::terminal::TerminalSurface;
use rand::Rng;

/// A rows × columns matrix of horizontal positions, one per glyph.
///
/// Every regeneration replaces all positions at once, so glyphs jump to new
/// spots instead of drifting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetGrid {
    rows: u16,
    columns: usize,
    /// Row-major positions, `rows * columns` long.
    positions: Vec<u16>,
    regenerations: u64,
}

impl OffsetGrid {
    /// A grid with every position at column 0.
    pub fn new(rows: u16, columns: usize) -> Self {
        Self {
            rows,
            columns,
            positions: vec![0; rows as usize * columns],
            regenerations: 0,
        }
    }

    /// Number of rows (one per screen line of the band).
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of glyphs per row.
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// How many times [`regenerate`](Self::regenerate) has run.
    pub const fn regenerations(&self) -> u64 {
        self.regenerations
    }

    /// All positions, row-major.
    pub fn positions(&self) -> &[u16] {
        &self.positions
    }

    /// The positions of one row.
    pub fn row(&self, row: u16) -> &[u16] {
        let start = row as usize * self.columns;
        self.positions.get(start..start + self.columns).unwrap_or(&[])
    }

    /// Overwrite every position with an independent uniform draw from
    /// `[0, width)`. A width of 0 is treated as 1.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R, width: u16) {
        let width = width.max(1);
        for x in &mut self.positions {
            *x = rng.gen_range(0..width);
        }
        self.regenerations += 1;
    }

    /// Draw `glyph` at every position, row `r` landing on `band_top + r`.
    pub fn draw<S: TerminalSurface + ?Sized>(&self, surface: &mut S, band_top: u16, glyph: &str, fg: Rgb, bg: Rgb) {
        for (row, xs) in self.positions.chunks(self.columns.max(1)).enumerate() {
            let Some(y) = u16::try_from(row).ok().and_then(|r| band_top.checked_add(r)) else {
                break;
            };
            for &x in xs {
                surface.draw_str(x, y, glyph, fg, bg, Modifiers::empty());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::HeadlessSurface;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_new_grid_shape() {
        let grid = OffsetGrid::new(3, 5);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 5);
        assert_eq!(grid.positions().len(), 15);
        assert_eq!(grid.row(2), &[0; 5]);
        assert!(grid.row(3).is_empty());
        assert_eq!(grid.regenerations(), 0);
    }

    #[test]
    fn test_regenerate_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = OffsetGrid::new(4, 8);
        for width in [1u16, 2, 13, 80, 300] {
            grid.regenerate(&mut rng, width);
            assert!(grid.positions().iter().all(|&x| x < width));
        }
        assert_eq!(grid.regenerations(), 5);
    }

    #[test]
    fn test_regenerate_zero_width() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = OffsetGrid::new(2, 2);
        grid.regenerate(&mut rng, 0);
        assert_eq!(grid.positions(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_regenerate_is_uniform() {
        let mut rng = StdRng::seed_from_u64(0x6b61_7070_61);
        let mut grid = OffsetGrid::new(3, 5);
        let width = 10u16;
        let mut counts = [0u32; 10];
        let rounds = 2_000;
        for _ in 0..rounds {
            grid.regenerate(&mut rng, width);
            for &x in grid.positions() {
                counts[x as usize] += 1;
            }
        }

        // 30_000 draws over 10 buckets: expect 3_000 each, allow ±10%.
        let expected = rounds * 15 / u32::from(width);
        for (bucket, &count) in counts.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < expected / 10,
                "bucket {bucket} got {count}, expected about {expected}"
            );
        }
    }

    #[test]
    fn test_regenerate_replaces_every_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = OffsetGrid::new(3, 5);
        grid.regenerate(&mut rng, u16::MAX);
        let first = grid.positions().to_vec();
        grid.regenerate(&mut rng, u16::MAX);
        let changed = first.iter().zip(grid.positions()).filter(|(a, b)| a != b).count();
        assert!(changed >= 14, "only {changed} of 15 cells moved");
    }

    #[test]
    fn test_draw_places_glyph_per_cell() {
        let mut surface = HeadlessSurface::new(12, 4);
        let mut grid = OffsetGrid::new(2, 1);
        grid.positions = vec![1, 10];

        grid.draw(&mut surface, 2, "---", Rgb::WHITE, Rgb::BLACK);
        surface.flush().unwrap();

        assert_eq!(surface.screen().line(2), " ---        ");
        // clipped at the right edge
        assert_eq!(surface.screen().line(3), "          --");
    }
}
