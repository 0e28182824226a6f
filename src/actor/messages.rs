//! Message types for actor communication.
//!
//! These types form the protocol between the input thread and the
//! animation loop.

/// Key codes for keyboard input.
///
/// A small subset of crossterm's `KeyCode`; everything the animation has
/// no use for maps to [`KeyCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Esc,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Any other key.
    Other,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Only the control key.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// A plain key press with no modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Whether this event asks the animation to stop.
    ///
    /// Enter, `q` and Ctrl-C quit. In raw mode Ctrl-C arrives as a key
    /// press rather than a signal.
    pub const fn is_quit(&self) -> bool {
        match self {
            Self::Key { code, modifiers } => match code {
                KeyCode::Enter | KeyCode::Char('q') => true,
                KeyCode::Char('c') => modifiers.control,
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(InputEvent::key(KeyCode::Enter).is_quit());
        assert!(InputEvent::key(KeyCode::Char('q')).is_quit());
        assert!(InputEvent::Key {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        }
        .is_quit());
    }

    #[test]
    fn test_other_events_do_not_quit() {
        assert!(!InputEvent::key(KeyCode::Char('c')).is_quit());
        assert!(!InputEvent::key(KeyCode::Char('Q')).is_quit());
        assert!(!InputEvent::key(KeyCode::Esc).is_quit());
        assert!(!InputEvent::Resize { width: 80, height: 24 }.is_quit());
        assert!(!InputEvent::Error("boom".to_string()).is_quit());
        assert!(!InputEvent::Shutdown.is_quit());
    }
}
