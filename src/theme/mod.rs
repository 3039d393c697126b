//! Theming system with automatic color degradation

mod color;

pub use color::{AnsiColor, Color};

use crate::accessibility::AccessibilitySettings;
use crate::terminal::TerminalCapabilities;

/// Opacity used for translucent fills (selection, secondary capsules)
pub const TINT_OPACITY: f32 = 0.2;

/// Theme defining colors and spacing for the widgets
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color
    pub text_fg: Color,
    /// Secondary/caption text color
    pub secondary_fg: Color,
    /// Accent (tint) color used for default buttons and selection
    pub accent: Color,
    /// Text drawn on top of the accent color
    pub on_accent_fg: Color,
    /// Neutral fill for non-default buttons
    pub neutral: Color,

    pub background: Color,
    pub surface: Color,
    pub shadow: Color,

    pub border_color: Color,
    pub divider_color: Color,

    pub spacing_sm: u16,
    pub spacing_md: u16,

    pub accessibility: AccessibilitySettings,

    caps: TerminalCapabilities,
}

impl Theme {
    /// Create a theme for the given terminal capabilities
    pub fn new(caps: TerminalCapabilities) -> Self {
        Theme {
            text_fg: Color::white(),
            secondary_fg: Color::gray(),
            accent: Color::accent_blue(),
            on_accent_fg: Color::white(),
            neutral: Color::gray(),

            background: Color::black(),
            surface: Color::rgb(28, 28, 30),
            shadow: Color::rgb(8, 8, 10),

            border_color: Color::dark_gray(),
            divider_color: Color::rgb(58, 58, 60),

            spacing_sm: 1,
            spacing_md: 2,

            accessibility: AccessibilitySettings::from_env(),

            caps,
        }
    }

    /// Replace the accessibility settings
    pub fn with_accessibility(mut self, accessibility: AccessibilitySettings) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Replace the accent color
    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    pub fn capabilities(&self) -> &TerminalCapabilities {
        &self.caps
    }

    /// Foreground escape for an arbitrary color
    pub fn fg(&self, color: Color) -> String {
        color.degrade(&self.caps)
    }

    /// Background escape for an arbitrary color
    pub fn bg(&self, color: Color) -> String {
        color.bg(&self.caps)
    }

    pub fn text_style(&self) -> String {
        self.fg(self.text_fg)
    }

    pub fn caption_style(&self) -> String {
        format!("{}\x1b[2m", self.fg(self.secondary_fg))
    }

    pub fn heading_style(&self) -> String {
        format!("{}\x1b[1m", self.fg(self.text_fg))
    }

    pub fn accent_style(&self) -> String {
        self.fg(self.accent)
    }

    /// Accent tint used behind selected items
    pub fn selection_fill(&self) -> Color {
        self.accent.over(self.surface, TINT_OPACITY)
    }

    /// Neutral tint used behind secondary buttons
    pub fn neutral_fill(&self) -> Color {
        self.neutral.over(self.surface, TINT_OPACITY)
    }

    pub fn surface_style(&self) -> String {
        self.bg(self.surface)
    }

    /// Background fill for drop shadows
    pub fn shadow_style(&self) -> String {
        self.bg(self.shadow)
    }

    pub fn border_style(&self) -> String {
        self.fg(self.border_color)
    }

    pub fn divider_style(&self) -> String {
        self.fg(self.divider_color)
    }

    /// Apply accessibility font scaling to a cell dimension
    pub fn scale(&self, base: u16) -> u16 {
        self.accessibility.scale_dimension(base).max(1)
    }
}

/// Border characters for drawing boxes
#[derive(Debug, Clone, Copy)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderChars {
    pub fn single() -> Self {
        BorderChars {
            horizontal: '─',
            vertical: '│',
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
        }
    }

    pub fn rounded() -> Self {
        BorderChars {
            horizontal: '─',
            vertical: '│',
            top_left: '╭',
            top_right: '╮',
            bottom_left: '╰',
            bottom_right: '╯',
        }
    }
}
