//! Window management
//!
//! A `WindowRegistry` maps caller-chosen identifiers to live windows: the
//! first `open` for an identifier creates a window, later ones bring it to
//! the front, and the entry disappears when the window closes by any means.
//! The platform side lives behind the `WindowHost` trait:
//!
//! - `TerminalHost` (feature `tui`): windows stacked inside one terminal
//! - `WinitHost` (feature `gui`): native windows through winit
//! - `HeadlessHost`: records requests without drawing
//! - `UnsupportedHost`: no windowing at all

mod headless;
mod host;
mod presentation;
mod registry;
#[cfg(feature = "tui")]
mod terminal;
#[cfg(feature = "gui")]
mod winit_host;

pub use headless::{HeadlessHost, HeadlessWindow};
pub use host::{CloseEvent, CloseNotifier, UnsupportedHost, WindowHost};
pub use presentation::{ModalOutcome, PanelSpec, SheetOutcome};
pub use registry::WindowRegistry;
#[cfg(feature = "tui")]
pub use terminal::TerminalHost;
#[cfg(feature = "gui")]
pub use winit_host::WinitHost;

use std::fmt;

/// Opaque identifier for one on-screen window, issued by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(u64);

impl WindowHandle {
    pub fn from_raw(raw: u64) -> Self {
        WindowHandle(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Window content size in points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        WindowSize { width, height }
    }
}

/// Title bar treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowChrome {
    /// Title bar showing the window title
    Titled,
    /// Title hidden and title bar transparent
    Hidden,
}

impl WindowChrome {
    /// Empty titles get no visible title bar
    pub fn for_title(title: &str) -> Self {
        if title.is_empty() {
            WindowChrome::Hidden
        } else {
            WindowChrome::Titled
        }
    }
}

/// Everything a host needs to create a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub size: WindowSize,
    pub chrome: WindowChrome,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, size: WindowSize) -> Self {
        let title = title.into();
        let chrome = WindowChrome::for_title(&title);
        WindowSpec {
            title,
            size,
            chrome,
        }
    }
}

/// What `WindowRegistry::open` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new window was created
    Created(WindowHandle),
    /// The identifier already had a window; it was brought to the front
    Focused(WindowHandle),
    /// The identifier was empty
    Rejected,
    /// The host cannot create windows
    Unsupported,
}

impl OpenOutcome {
    pub fn handle(&self) -> Option<WindowHandle> {
        match *self {
            OpenOutcome::Created(handle) | OpenOutcome::Focused(handle) => Some(handle),
            OpenOutcome::Rejected | OpenOutcome::Unsupported => None,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, OpenOutcome::Created(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_follows_title() {
        assert_eq!(
            WindowSpec::new("", WindowSize::new(300, 200)).chrome,
            WindowChrome::Hidden
        );
        assert_eq!(
            WindowSpec::new("Inspector", WindowSize::new(300, 200)).chrome,
            WindowChrome::Titled
        );
    }

    #[test]
    fn test_outcome_handle() {
        let handle = WindowHandle::from_raw(7);
        assert_eq!(OpenOutcome::Created(handle).handle(), Some(handle));
        assert_eq!(OpenOutcome::Focused(handle).handle(), Some(handle));
        assert_eq!(OpenOutcome::Rejected.handle(), None);
        assert!(!OpenOutcome::Focused(handle).is_created());
        assert_eq!(handle.to_string(), "window#7");
    }
}
