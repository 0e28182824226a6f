//! Animation loop: ticks drive the scene, keys stop it.
//!
//! [`AnimationState`] holds everything that changes between frames and
//! knows how to advance by one tick. [`AnimationLoop`] waits on the ticker
//! and input channels and feeds the state until a quit key arrives.
//! [`run`] wires both to a real terminal.

use crate::actor::{CrosstermEvents, InputActor, InputEvent};
use crate::buffer::Modifiers;
use crate::config::AnimationConfig;
use crate::error::{Error, Result};
use crate::scene::layers::{palette, HELP_TOP, KAPPA_TOP};
use crate::scene::{KappaAnimator, SceneLayers};
use crate::terminal::{CrosstermSurface, TerminalSurface};
use crossbeam_channel::{select, unbounded, Receiver};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Instant;

/// The line printed under the sea.
pub const HELP_TEXT: &str = "Press the 'q' key or Enter to stop.";

/// Whether the loop is still animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Drawing a frame on every tick.
    Running,
    /// A quit key was pressed.
    Stopped,
}

/// Everything that changes from one frame to the next.
#[derive(Debug, Clone)]
pub struct AnimationState {
    kappa: KappaAnimator,
    layers: SceneLayers,
    rng: StdRng,
    /// Kappa x position, always in `[0, width)`.
    offset: u16,
    width: u16,
    ticks: u64,
    sky_update_unit: u16,
    sea_update_unit: u16,
}

impl AnimationState {
    /// Fresh state for a screen `width` columns wide, seeded from
    /// `config.seed` or from OS entropy.
    pub fn new(config: &AnimationConfig, width: u16) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_rng(config, width, rng)
    }

    /// Fresh state drawing positions from `rng`.
    pub fn with_rng(config: &AnimationConfig, width: u16, rng: StdRng) -> Self {
        Self {
            kappa: KappaAnimator::new(&config.message),
            layers: SceneLayers::new(),
            rng,
            offset: 0,
            width: width.max(1),
            ticks: 0,
            sky_update_unit: config.sky_update_unit.max(1),
            sea_update_unit: config.sea_update_unit.max(1),
        }
    }

    /// Current scroll offset.
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    /// Width the offset wraps at.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Completed ticks.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The kappa animator.
    pub const fn kappa(&self) -> &KappaAnimator {
        &self.kappa
    }

    /// The sky and sea layers.
    pub const fn layers(&self) -> &SceneLayers {
        &self.layers
    }

    /// Draw one frame and advance.
    ///
    /// Layers are reshuffled when the offset hits their update unit, the
    /// whole scene is redrawn and flushed, then the offset moves one column
    /// to the right, wrapping at the width.
    pub fn tick<S: TerminalSurface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        surface.clear(palette::BACKGROUND).map_err(Error::Draw)?;
        self.sync_width(surface.size().0);

        if self.offset % self.sky_update_unit == 0 {
            self.layers.regenerate_sky(&mut self.rng, self.width);
        }
        if self.offset % self.sea_update_unit == 0 {
            self.layers.regenerate_sea(&mut self.rng, self.width);
        }

        self.layers.draw_sky(surface);
        self.layers.draw_sea(surface, self.width);
        self.kappa
            .draw(surface, self.offset, KAPPA_TOP, palette::KAPPA, palette::BACKGROUND);
        surface.draw_str(
            0,
            HELP_TOP,
            HELP_TEXT,
            palette::HELP,
            palette::BACKGROUND,
            Modifiers::DIM,
        );
        surface.flush().map_err(Error::Draw)?;

        self.offset = (self.offset + 1) % self.width;
        self.ticks += 1;
        Ok(())
    }

    fn sync_width(&mut self, width: u16) {
        let width = width.max(1);
        if width != self.width {
            tracing::debug!(from = self.width, to = width, "width changed");
            self.width = width;
            self.offset %= width;
        }
    }
}

/// Runs [`AnimationState`] off a ticker until told to quit.
#[derive(Debug)]
pub struct AnimationLoop {
    state: AnimationState,
    status: LoopState,
}

impl AnimationLoop {
    /// A running loop over `state`.
    pub const fn new(state: AnimationState) -> Self {
        Self {
            state,
            status: LoopState::Running,
        }
    }

    /// The animation state.
    pub const fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Running or stopped.
    pub const fn status(&self) -> LoopState {
        self.status
    }

    /// Wait on whichever of `ticks` and `input` is ready first until a quit
    /// key arrives.
    ///
    /// Each tick draws one frame. Input never draws. A draw failure returns
    /// at once, leaving the loop in [`LoopState::Running`].
    pub fn run<S: TerminalSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        ticks: &Receiver<Instant>,
        input: &Receiver<InputEvent>,
    ) -> Result<()> {
        let closed = crossbeam_channel::never();
        let mut input_open = true;

        while self.status == LoopState::Running {
            // A closed input channel would be ready forever; stop selecting on it.
            let input = if input_open { input } else { &closed };
            select! {
                recv(ticks) -> tick => {
                    tick.map_err(|_| Error::TickerStopped)?;
                    tracing::trace!(tick = self.state.ticks, offset = self.state.offset, "tick");
                    self.state.tick(surface)?;
                }
                recv(input) -> event => match event {
                    Ok(event) => self.handle_input(&event),
                    Err(_) => {
                        tracing::debug!("input channel closed");
                        input_open = false;
                    }
                },
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if event.is_quit() {
            tracing::info!(ticks = self.state.ticks, "quit requested");
            self.status = LoopState::Stopped;
            return;
        }
        match event {
            InputEvent::Error(message) => tracing::warn!(%message, "input error"),
            InputEvent::Resize { width, height } => tracing::debug!(width, height, "resize event"),
            InputEvent::Key { .. } | InputEvent::Shutdown => {}
        }
    }
}

/// Run the animation on the terminal until a quit key is pressed.
///
/// The terminal is restored before this returns, on success and on error.
pub fn run(config: &AnimationConfig) -> Result<()> {
    let mut surface = CrosstermSurface::acquire().map_err(Error::Init)?;
    let (width, height) = surface.size();
    tracing::info!(width, height, seeded = config.seed.is_some(), "starting animation");

    let (input_tx, input_rx) = unbounded();
    let input = InputActor::spawn(CrosstermEvents, input_tx, config.input_poll_timeout)
        .map_err(Error::Init)?;
    // Holds at most one pending tick, so a slow frame skips ticks instead of queuing them.
    let ticks = crossbeam_channel::tick(config.tick_interval);

    let mut animation = AnimationLoop::new(AnimationState::new(config, width));
    let result = animation.run(&mut surface, &ticks, &input_rx);

    input.join();
    result
}
