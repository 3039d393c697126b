//! Event system - keyboard, mouse, timer and terminal events

use std::time::{Duration, Instant};

/// Keyboard key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Ctrl(char),
    Alt(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    BackTab,
    Backspace,
    Delete,
    Enter,
    Tab,
    Esc,
    Null,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Press(MouseButton, u16, u16), // button, col, row
    Release(u16, u16),            // col, row
    Hold(u16, u16),               // col, row (drag)
    ScrollUp(u16, u16),           // col, row
    ScrollDown(u16, u16),         // col, row
}

impl MouseEvent {
    /// Cell position of the event
    pub fn position(&self) -> (u16, u16) {
        match *self {
            MouseEvent::Press(_, col, row)
            | MouseEvent::Release(col, row)
            | MouseEvent::Hold(col, row)
            | MouseEvent::ScrollUp(col, row)
            | MouseEvent::ScrollDown(col, row) => (col, row),
        }
    }
}

/// UI events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event
    Key(Key),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resized (new cols, new rows)
    Resize(u16, u16),
    /// Focus gained
    FocusGained,
    /// Focus lost
    FocusLost,
    /// Paste event
    Paste(String),
    /// Animation clock advanced by the given amount
    Tick(Duration),
}

/// Event handler trait for components
pub trait EventHandler {
    /// Handle an event, return true if consumed (stops propagation)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Called when component gains focus
    fn on_focus(&mut self) {}

    /// Called when component loses focus
    fn on_blur(&mut self) {}
}

/// Frame timing for animation
pub struct FrameTimer {
    frame_duration: Duration,
    last_frame: Instant,
}

impl FrameTimer {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_duration: Duration::from_nanos(1_000_000_000 / fps.max(1) as u64),
            last_frame: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Time until next frame (zero if frame is due)
    pub fn time_to_next_frame(&self) -> Duration {
        self.frame_duration.saturating_sub(self.last_frame.elapsed())
    }

    /// Mark frame as rendered and return the elapsed time since the last one
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last_frame.elapsed();
        self.last_frame = Instant::now();
        elapsed
    }

    /// Check if a frame is due now
    pub fn frame_due(&self) -> bool {
        self.last_frame.elapsed() >= self.frame_duration
    }
}

#[cfg(feature = "tui")]
pub use poller::EventPoller;

#[cfg(feature = "tui")]
mod poller {
    use super::{Event, Key, MouseButton, MouseEvent};
    use anyhow::Result;
    use std::time::Duration;

    /// Event polling and conversion from crossterm events
    pub struct EventPoller {
        _enabled: bool,
    }

    impl EventPoller {
        /// Enter raw mode and start capturing mouse/focus events
        pub fn new() -> Result<Self> {
            crossterm::terminal::enable_raw_mode()?;

            // Try to enable mouse and focus, but don't fail if not available
            let _ = crossterm::execute!(
                std::io::stdout(),
                crossterm::event::EnableMouseCapture,
                crossterm::event::EnableFocusChange,
            );

            Ok(EventPoller { _enabled: true })
        }

        /// Poll for next event with timeout
        pub fn poll(&self, timeout: Duration) -> Result<Option<Event>> {
            if crossterm::event::poll(timeout)? {
                let event = crossterm::event::read()?;
                Ok(convert_crossterm_event(event))
            } else {
                Ok(None)
            }
        }

        /// Block and wait for next event
        pub fn read(&self) -> Result<Event> {
            loop {
                if let Some(event) = convert_crossterm_event(crossterm::event::read()?) {
                    return Ok(event);
                }
            }
        }
    }

    impl Drop for EventPoller {
        fn drop(&mut self) {
            let _ = crossterm::execute!(
                std::io::stdout(),
                crossterm::event::DisableMouseCapture,
                crossterm::event::DisableFocusChange,
            );
            let _ = crossterm::terminal::disable_raw_mode();
        }
    }

    /// Convert crossterm event to our Event type
    ///
    /// Key releases are dropped so that each key press dispatches once.
    fn convert_crossterm_event(event: crossterm::event::Event) -> Option<Event> {
        use crossterm::event::{Event as CEvent, KeyEventKind, MouseEventKind};

        let converted = match event {
            CEvent::Key(key) if key.kind == KeyEventKind::Release => return None,
            CEvent::Key(key) => Event::Key(convert_key(key.code, key.modifiers)),
            CEvent::Mouse(me) => {
                let (col, row) = (me.column, me.row);
                let mouse_event = match me.kind {
                    MouseEventKind::Down(btn) => {
                        let button = match btn {
                            crossterm::event::MouseButton::Left => MouseButton::Left,
                            crossterm::event::MouseButton::Right => MouseButton::Right,
                            crossterm::event::MouseButton::Middle => MouseButton::Middle,
                        };
                        MouseEvent::Press(button, col, row)
                    }
                    MouseEventKind::Up(_) => MouseEvent::Release(col, row),
                    MouseEventKind::Drag(_) | MouseEventKind::Moved => MouseEvent::Hold(col, row),
                    MouseEventKind::ScrollUp => MouseEvent::ScrollUp(col, row),
                    MouseEventKind::ScrollDown => MouseEvent::ScrollDown(col, row),
                    _ => return None,
                };
                Event::Mouse(mouse_event)
            }
            CEvent::Resize(cols, rows) => Event::Resize(cols, rows),
            CEvent::FocusGained => Event::FocusGained,
            CEvent::FocusLost => Event::FocusLost,
            CEvent::Paste(data) => Event::Paste(data),
        };
        Some(converted)
    }

    fn convert_key(code: crossterm::event::KeyCode, mods: crossterm::event::KeyModifiers) -> Key {
        use crossterm::event::{KeyCode, KeyModifiers};

        if let KeyCode::Char(c) = code {
            if mods.contains(KeyModifiers::CONTROL) {
                return Key::Ctrl(c);
            }
            if mods.contains(KeyModifiers::ALT) {
                return Key::Alt(c);
            }
        }

        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::F(n) => Key::F(n),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Esc,
            _ => Key::Null,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crossterm::event::{KeyCode, KeyModifiers};

        #[test]
        fn test_ctrl_modifier_wins() {
            assert_eq!(
                convert_key(KeyCode::Char('w'), KeyModifiers::CONTROL),
                Key::Ctrl('w')
            );
            assert_eq!(convert_key(KeyCode::Enter, KeyModifiers::NONE), Key::Enter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_position() {
        let press = MouseEvent::Press(MouseButton::Left, 4, 7);
        assert_eq!(press.position(), (4, 7));
        assert_eq!(MouseEvent::ScrollDown(1, 2).position(), (1, 2));
    }

    #[test]
    fn test_tick_event_equality() {
        let e = Event::Tick(Duration::from_millis(16));
        assert_eq!(e, Event::Tick(Duration::from_millis(16)));
        assert_ne!(e, Event::Key(Key::Enter));
    }

    #[test]
    fn test_frame_timer_duration() {
        let timer = FrameTimer::new(50);
        assert_eq!(timer.frame_duration(), Duration::from_millis(20));
        assert!(timer.time_to_next_frame() <= Duration::from_millis(20));
    }
}
