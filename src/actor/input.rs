//! Input Actor: Dedicated thread for polling terminal events.
//!
//! The thread waits on an [`EventSource`] with a short timeout, so it can
//! notice a shutdown request, and forwards every event to the animation
//! loop over an unbounded channel.

use super::messages::{InputEvent, KeyCode, KeyModifiers};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A blocking source of input events.
pub trait EventSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    ///
    /// Returns `Ok(None)` when the timeout passes, or when an event arrived
    /// that has no [`InputEvent`] equivalent.
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

/// Keyboard and resize events from the terminal, via crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(convert_event(event::read()?))
    }
}

/// Convert a crossterm event to our InputEvent.
fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            // Only process key press events (not release or repeat)
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            Some(InputEvent::Key {
                code: convert_key_code(key_event.code),
                modifiers: KeyModifiers {
                    shift: key_event.modifiers.contains(event::KeyModifiers::SHIFT),
                    control: key_event.modifiers.contains(event::KeyModifiers::CONTROL),
                    alt: key_event.modifiers.contains(event::KeyModifiers::ALT),
                },
            })
        }
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

const fn convert_key_code(code: event::KeyCode) -> KeyCode {
    match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Esc => KeyCode::Esc,
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        _ => KeyCode::Other,
    }
}

/// Input actor that polls an event source on its own thread.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input thread.
    ///
    /// `poll_timeout` bounds how long a shutdown request can go unnoticed.
    pub fn spawn<S: EventSource>(source: S, sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("kappa-input".to_string())
            .spawn(move || {
                Self::run_loop(source, &sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop<S: EventSource>(mut source: S, sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(InputEvent::Shutdown);
                break;
            }

            let (event, failed) = match source.poll(poll_timeout) {
                Ok(Some(event)) => (event, false),
                Ok(None) => continue,
                Err(e) => (InputEvent::Error(e.to_string()), true),
            };

            if sender.send(event).is_err() {
                // Receiver dropped, exit
                break;
            }

            // A failed source reports at most once per poll interval.
            if failed {
                thread::sleep(poll_timeout);
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::collections::VecDeque;

    /// Replays a fixed script, then idles.
    struct Scripted(VecDeque<io::Result<Option<InputEvent>>>);

    impl EventSource for Scripted {
        fn poll(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
            self.0.pop_front().unwrap_or_else(|| {
                thread::sleep(timeout);
                Ok(None)
            })
        }
    }

    #[test]
    fn test_input_actor_forwards_events_in_order() {
        let script = Scripted(VecDeque::from(vec![
            Ok(Some(InputEvent::key(KeyCode::Char('x')))),
            Ok(None),
            Err(io::Error::other("tty gone")),
            Ok(Some(InputEvent::key(KeyCode::Enter))),
        ]));
        let (tx, rx) = unbounded();
        let actor = InputActor::spawn(script, tx, Duration::from_millis(5)).unwrap();

        let timeout = Duration::from_millis(500);
        assert_eq!(rx.recv_timeout(timeout).unwrap(), InputEvent::key(KeyCode::Char('x')));
        assert_eq!(rx.recv_timeout(timeout).unwrap(), InputEvent::Error("tty gone".to_string()));
        assert_eq!(rx.recv_timeout(timeout).unwrap(), InputEvent::key(KeyCode::Enter));

        actor.join();
        assert_eq!(rx.recv_timeout(timeout).unwrap(), InputEvent::Shutdown);
    }

    #[test]
    fn test_input_actor_exits_when_receiver_dropped() {
        let script = Scripted(VecDeque::from(vec![Ok(Some(InputEvent::key(KeyCode::Char('a'))))]));
        let (tx, rx) = unbounded();
        drop(rx);
        let actor = InputActor::spawn(script, tx, Duration::from_millis(5)).unwrap();
        // join returns because the thread stops on its own or on shutdown
        actor.join();
    }

    /// Fails on every poll without waiting.
    struct Broken;

    impl EventSource for Broken {
        fn poll(&mut self, _timeout: Duration) -> io::Result<Option<InputEvent>> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
        }
    }

    #[test]
    fn test_persistent_poll_error_is_rate_limited() {
        let (tx, rx) = unbounded();
        let actor = InputActor::spawn(Broken, tx, Duration::from_millis(20)).unwrap();
        thread::sleep(Duration::from_millis(100));
        actor.join();

        let events: Vec<_> = rx.try_iter().collect();
        let errors = events.iter().filter(|e| matches!(e, InputEvent::Error(_))).count();
        // About one per 20ms interval over 100ms; a busy loop would queue thousands.
        assert!((1..=10).contains(&errors), "{errors} errors forwarded");
        assert_eq!(events.last(), Some(&InputEvent::Shutdown));
    }

    #[test]
    fn test_convert_crossterm_key_events() {
        let press = Event::Key(event::KeyEvent::new(event::KeyCode::Char('c'), event::KeyModifiers::CONTROL));
        assert!(convert_event(press).unwrap().is_quit());

        let f1 = Event::Key(event::KeyEvent::new(event::KeyCode::F(1), event::KeyModifiers::NONE));
        assert_eq!(convert_event(f1), Some(InputEvent::key(KeyCode::Other)));

        let mut release = event::KeyEvent::new(event::KeyCode::Enter, event::KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(convert_event(Event::Key(release)), None);

        assert_eq!(
            convert_event(Event::Resize(100, 40)),
            Some(InputEvent::Resize { width: 100, height: 40 })
        );
        assert_eq!(convert_event(Event::FocusGained), None);
    }
}
