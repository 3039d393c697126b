//! widgetkit - presentational widgets and identifier-tracked windows
//!
//! Two halves:
//! - Widgets: buttons, rich text, image stacks, slideshows and alert panels,
//!   all `Component`s rendered into cell rectangles by a `Renderer`
//! - Windows: a `WindowRegistry` that opens one window per identifier,
//!   refocuses it on repeat requests, forgets it when it closes, and shows
//!   modal alerts and sheets through a pluggable `WindowHost`
//!
//! The `tui` feature hosts windows inside the terminal and `gui` hosts them
//! as native winit windows.

pub mod accessibility;
pub mod component;
pub mod components;
pub mod context;
pub mod event;
pub mod graphics;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod window;

// Re-export commonly used types
pub use accessibility::{AccessibilityRole, AccessibilitySettings, Accessible};
pub use component::{BoxedComponent, Component};
pub use components::{
    AlertPanel, AttributedText, ButtonShortcut, IconButton, Image, ImageData, LargeButton, Popup,
    PopupPosition, PopupResult, RichTextView, ScrollableView, SheetPanel, SlideShow,
    StackedImageView, Text, TextAttributes,
};
pub use context::{RenderContext, UseAccessibility, UseTheme};
pub use event::{Event, EventHandler, FrameTimer, Key, MouseButton, MouseEvent};
pub use graphics::GraphicsBackend;
pub use layout::{FlexLayout, Rect, Size};
pub use render::Renderer;
pub use terminal::{TerminalCapabilities, TerminalContext, TerminalGeometry};
pub use theme::{BorderChars, Color, Theme};
pub use window::{
    HeadlessHost, ModalOutcome, OpenOutcome, SheetOutcome, UnsupportedHost, WindowChrome,
    WindowHandle, WindowHost, WindowRegistry, WindowSize, WindowSpec,
};

#[cfg(feature = "tui")]
pub use window::TerminalHost;
#[cfg(feature = "gui")]
pub use window::WinitHost;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Label of the button that dismisses an alert
pub const OK_LABEL: &str = "OK";

/// Glyph on the slideshow's advance button
pub const ARROW_SYMBOL: &str = "➜";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_arrow_is_one_cell() {
        assert_eq!(ARROW_SYMBOL.chars().count(), 1);
    }
}
