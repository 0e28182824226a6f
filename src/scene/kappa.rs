//! The kappa: five poses and the action list that cycles through them.

use crate::buffer::{Modifiers, Rgb};
use crate::terminal::TerminalSurface;

/// The plate on the kappa's head.
pub const DISH: &str = " ,< = > ";
/// The face line.
pub const FACE: &str = "(  ' e')";
/// The body line.
pub const BODY: &str = "(|   #|";
/// Ripples around the feet.
pub const FEET: &str = "~~~~~~~~";

/// Frame indices replayed in a loop: surface, rest, speak, sink back.
pub const ACTIONS: [usize; 18] = [0, 0, 0, 1, 2, 3, 3, 3, 3, 3, 4, 4, 4, 4, 3, 3, 2, 1];

/// Index of the speaking pose in the frame palette.
pub const SPEAKING_FRAME: usize = 4;

/// One pose of the kappa: four lines, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: [String; 4],
}

impl Frame {
    fn new(lines: [&str; 4]) -> Self {
        Self {
            lines: lines.map(str::to_owned),
        }
    }

    /// The four lines; empty lines draw nothing.
    pub const fn lines(&self) -> &[String; 4] {
        &self.lines
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

/// Cycles the kappa through its poses, one frame per draw.
///
/// The frame index is its own counter and knows nothing of the scroll
/// offset the kappa is drawn at.
#[derive(Debug, Clone)]
pub struct KappaAnimator {
    frames: [Frame; 5],
    index: usize,
}

impl KappaAnimator {
    /// Build the pose palette, with `message` in the speaking pose.
    pub fn new(message: &str) -> Self {
        let speaking_face = format!("{FACE} < {message}");
        Self {
            frames: [
                Frame::new(["", "", "", ""]),
                Frame::new(["", "", DISH, FEET]),
                Frame::new(["", DISH, FACE, FEET]),
                Frame::new([DISH, FACE, BODY, FEET]),
                Frame::new([DISH, speaking_face.as_str(), BODY, FEET]),
            ],
            index: 0,
        }
    }

    /// The pose palette.
    pub const fn frames(&self) -> &[Frame; 5] {
        &self.frames
    }

    /// Position in [`ACTIONS`] of the frame the next draw will show.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The frame the next draw will show.
    pub fn current_frame(&self) -> &Frame {
        &self.frames[ACTIONS[self.index]]
    }

    /// Draw the current frame with its top line at `top` and left edge at
    /// `origin_x`, then step to the next entry of the action list.
    pub fn draw<S: TerminalSurface + ?Sized>(&mut self, surface: &mut S, origin_x: u16, top: u16, fg: Rgb, bg: Rgb) {
        let frame = &self.frames[ACTIONS[self.index]];
        for (y, line) in (top..).zip(frame.lines()) {
            if !line.is_empty() {
                surface.draw_str(origin_x, y, line, fg, bg, Modifiers::empty());
            }
        }
        self.index = (self.index + 1) % ACTIONS.len();
    }
}
