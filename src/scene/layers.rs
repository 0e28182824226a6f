//! Scene layers: the sky band above the kappa and the sea band below it.
//!
//! ```text
//! row  0..3   sky     ---    ---       ---
//! row  5..9   kappa       ,< = >
//!                        (  ' e')
//! row  7      surface ~~~~(|   #|~~~~~~~~~~~~
//!                         ~~~~~~~~
//! row  9..13  sea       ^^^^^     ^^^^^
//! row 15      help    Press the 'q' key or Enter to stop.
//! ```

use super::grid::OffsetGrid;
use crate::terminal::TerminalSurface;
use rand::Rng;

/// First row of the sky band.
pub const SKY_TOP: u16 = 0;
/// Rows in the sky band.
pub const SKY_HEIGHT: u16 = 3;
/// First row of the kappa, one blank row below the sky.
pub const KAPPA_TOP: u16 = SKY_HEIGHT + 2;
/// Rows the kappa occupies.
pub const KAPPA_HEIGHT: u16 = 4;
/// First row of the wave band.
pub const SEA_TOP: u16 = KAPPA_TOP + KAPPA_HEIGHT;
/// Rows in the wave band.
pub const SEA_HEIGHT: u16 = 4;
/// The water surface line. It shares a row with the kappa's body so the
/// kappa stands in the water.
pub const SURFACE_ROW: u16 = SEA_TOP - 2;
/// Row of the help line.
pub const HELP_TOP: u16 = SEA_TOP + SEA_HEIGHT + 2;

/// Clouds per sky row.
pub const CLOUD_COUNT: usize = 5;
/// Waves per sea row.
pub const WAVE_COUNT: usize = 8;

/// Cloud glyph.
pub const CLOUD: &str = "---";
/// Wave glyph.
pub const WAVE: &str = "^^^^^";
/// Water surface glyph, repeated across the screen.
pub const WATER_SURFACE: char = '~';

/// Colors of the scene.
pub mod palette {
    use crate::buffer::Rgb;

    /// Screen background.
    pub const BACKGROUND: Rgb = Rgb::BLACK;
    /// Clouds.
    pub const CLOUD: Rgb = Rgb::WHITE;
    /// Water surface and waves.
    pub const SEA: Rgb = Rgb::from_u32(0x4F_A3_E0);
    /// The kappa.
    pub const KAPPA: Rgb = Rgb::from_u32(0x6A_C2_5A);
    /// Help line.
    pub const HELP: Rgb = Rgb::from_u32(0x9E_9E_9E);
}

/// The sky and sea layers and their glyph positions.
#[derive(Debug, Clone)]
pub struct SceneLayers {
    sky: OffsetGrid,
    sea: OffsetGrid,
}

impl Default for SceneLayers {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneLayers {
    /// Empty layers; call the regenerate methods before the first draw.
    pub fn new() -> Self {
        Self {
            sky: OffsetGrid::new(SKY_HEIGHT, CLOUD_COUNT),
            sea: OffsetGrid::new(SEA_HEIGHT, WAVE_COUNT),
        }
    }

    /// Cloud positions.
    pub const fn sky(&self) -> &OffsetGrid {
        &self.sky
    }

    /// Wave positions.
    pub const fn sea(&self) -> &OffsetGrid {
        &self.sea
    }

    /// Scatter the clouds across `[0, width)`.
    pub fn regenerate_sky<R: Rng + ?Sized>(&mut self, rng: &mut R, width: u16) {
        self.sky.regenerate(rng, width);
        tracing::debug!(width, regenerations = self.sky.regenerations(), "sky regenerated");
    }

    /// Scatter the waves across `[0, width)`.
    pub fn regenerate_sea<R: Rng + ?Sized>(&mut self, rng: &mut R, width: u16) {
        self.sea.regenerate(rng, width);
        tracing::debug!(width, regenerations = self.sea.regenerations(), "sea regenerated");
    }

    /// Draw the clouds on the sky band.
    pub fn draw_sky<S: TerminalSurface + ?Sized>(&self, surface: &mut S) {
        self.sky
            .draw(surface, SKY_TOP, CLOUD, palette::CLOUD, palette::BACKGROUND);
    }

    /// Draw the water surface across `width` columns, then the waves.
    pub fn draw_sea<S: TerminalSurface + ?Sized>(&self, surface: &mut S, width: u16) {
        for x in 0..width {
            surface.set_cell(x, SURFACE_ROW, WATER_SURFACE, palette::SEA, palette::BACKGROUND);
        }
        // The kappa's feet take the row under the surface; waves start below.
        self.sea
            .draw(surface, SEA_TOP, WAVE, palette::SEA, palette::BACKGROUND);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::HeadlessSurface;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_band_layout() {
        assert_eq!(KAPPA_TOP, 5);
        assert_eq!(SEA_TOP, 9);
        assert_eq!(SURFACE_ROW, 7);
        assert_eq!(HELP_TOP, 15);
        assert_eq!(SceneLayers::new().sky().rows(), 3);
        assert_eq!(SceneLayers::new().sea().columns(), 8);
    }

    #[test]
    fn test_draw_sea_surface_spans_width() {
        let mut surface = HeadlessSurface::new(20, 16);
        let layers = SceneLayers::new();
        layers.draw_sea(&mut surface, 20);
        surface.flush().unwrap();

        assert_eq!(surface.screen().line(SURFACE_ROW), "~".repeat(20));
        // All waves start at column 0 before the first regeneration.
        for row in SEA_TOP..SEA_TOP + SEA_HEIGHT {
            assert_eq!(surface.screen().line(row).trim_end(), WAVE);
        }
        assert_eq!(surface.screen().line(SEA_TOP - 1).trim_end(), "");
    }

    #[test]
    fn test_draw_sky_uses_sky_band() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut layers = SceneLayers::new();
        layers.regenerate_sky(&mut rng, 40);

        let mut surface = HeadlessSurface::new(50, 16);
        layers.draw_sky(&mut surface);
        surface.flush().unwrap();

        for row in 0..SKY_HEIGHT {
            let line = surface.screen().line(SKY_TOP + row);
            for &x in layers.sky().row(row) {
                assert_eq!(&line[x as usize..x as usize + 3], CLOUD);
            }
        }
        for row in SKY_HEIGHT..16 {
            assert_eq!(surface.screen().line(row).trim_end(), "");
        }
    }
}
