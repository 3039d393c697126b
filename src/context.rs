//! Rendering context - provides theme and accessibility to components

use crate::accessibility::AccessibilitySettings;
use crate::theme::Theme;

/// Context passed down the component tree during rendering
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Current theme
    pub theme: &'a Theme,

    /// Accessibility settings
    pub accessibility: &'a AccessibilitySettings,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context from a theme
    pub fn new(theme: &'a Theme) -> Self {
        RenderContext {
            theme,
            accessibility: &theme.accessibility,
        }
    }

    /// Create a child context with different accessibility settings
    pub fn with_accessibility(&self, accessibility: &'a AccessibilitySettings) -> Self {
        RenderContext {
            theme: self.theme,
            accessibility,
        }
    }
}

/// Hook trait for accessing theme from context
pub trait UseTheme {
    fn use_theme<'a>(&self, ctx: &'a RenderContext) -> &'a Theme {
        ctx.theme
    }
}

/// Hook trait for accessing accessibility settings from context
pub trait UseAccessibility {
    fn use_accessibility<'a>(&self, ctx: &'a RenderContext) -> &'a AccessibilitySettings {
        ctx.accessibility
    }

    /// Whether animations should be skipped
    fn use_reduced_motion(&self, ctx: &RenderContext) -> bool {
        ctx.accessibility.prefer_reduced_motion
    }

    /// Scale a dimension based on accessibility settings
    fn use_scaled(&self, ctx: &RenderContext, base: u16) -> u16 {
        ctx.accessibility.scale_dimension(base).max(1)
    }
}

impl<T> UseTheme for T {}
impl<T> UseAccessibility for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;

    #[test]
    fn test_context_creation() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);

        assert_eq!(ctx.theme as *const _, &theme as *const _);
        assert_eq!(
            ctx.accessibility as *const _,
            &theme.accessibility as *const _
        );
    }

    #[test]
    fn test_accessibility_override() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);

        let mut reduced = AccessibilitySettings::new();
        reduced.prefer_reduced_motion = true;
        let child = ctx.with_accessibility(&reduced);

        struct Probe;
        assert!(Probe.use_reduced_motion(&child));
        assert_eq!(Probe.use_scaled(&child, 0), 1);
    }
}
