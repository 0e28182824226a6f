//! Scene module: everything that gets drawn each tick.
//!
//! - [`OffsetGrid`]: random glyph positions for one layer
//! - [`KappaAnimator`]: the kappa's poses and action list
//! - [`SceneLayers`]: sky and sea bands, with the fixed layout constants

mod grid;
pub mod kappa;
pub mod layers;

pub use grid::OffsetGrid;
pub use kappa::{Frame, KappaAnimator};
pub use layers::SceneLayers;
