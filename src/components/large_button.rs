//! Capsule-shaped large button for welcome panels, prompts and alerts
//!
//! The default button is drawn on the accent color and answers Enter; the
//! others are drawn on a translucent neutral fill and answer Esc. Shortcuts
//! fire regardless of focus, like a dialog's default and cancel actions.

use crate::accessibility::{Accessible, AccessibilityRole};
use crate::component::Component;
use crate::context::{RenderContext, UseAccessibility};
use crate::event::{Event, EventHandler, Key, MouseButton, MouseEvent};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Capsule width in cells
pub const LARGE_BUTTON_WIDTH: u16 = 24;
/// Capsule height in cells
pub const LARGE_BUTTON_HEIGHT: u16 = 1;

/// Keyboard shortcut bound to a large button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonShortcut {
    /// Enter
    DefaultAction,
    /// Esc
    CancelAction,
}

impl ButtonShortcut {
    pub fn key(&self) -> Key {
        match self {
            ButtonShortcut::DefaultAction => Key::Enter,
            ButtonShortcut::CancelAction => Key::Esc,
        }
    }
}

/// A stylized large button rendered as a capsule
pub struct LargeButton {
    title: String,
    is_default: bool,
    action: Box<dyn FnMut()>,
    bounds: Option<Rect>,
}

impl LargeButton {
    pub fn new(title: impl Into<String>, action: impl FnMut() + 'static) -> Self {
        LargeButton {
            title: title.into(),
            is_default: false,
            action: Box::new(action),
            bounds: None,
        }
    }

    /// Mark this as the default action (accent fill, Enter shortcut)
    pub fn default_action(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn shortcut(&self) -> ButtonShortcut {
        if self.is_default {
            ButtonShortcut::DefaultAction
        } else {
            ButtonShortcut::CancelAction
        }
    }

    /// Invoke the action
    pub fn press(&mut self) {
        (self.action)();
    }

    /// Capsule label line: rounded caps around the centred title
    fn capsule_line(&self, width: u16) -> String {
        let inner = width.saturating_sub(2) as usize;
        let title: String = self.title.chars().take(inner).collect();
        let len = title.chars().count();
        let left = (inner - len) / 2;
        let right = inner - len - left;
        format!("({}{}{})", " ".repeat(left), title, " ".repeat(right))
    }
}

impl EventHandler for LargeButton {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if *key == self.shortcut().key() => {
                self.press();
                true
            }
            Event::Mouse(MouseEvent::Press(MouseButton::Left, col, row)) => {
                match self.bounds {
                    Some(bounds) if bounds.contains(*col, *row) => {
                        self.press();
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

impl Component for LargeButton {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let width = self.use_scaled(ctx, LARGE_BUTTON_WIDTH).max(4);
        let capsule = bounds.centered(width, LARGE_BUTTON_HEIGHT);
        self.bounds = Some(capsule);
        if capsule.is_empty() {
            return Ok(());
        }

        let theme = ctx.theme;
        let style = if self.is_default {
            format!(
                "{}{}\x1b[1m",
                theme.fg(theme.on_accent_fg),
                theme.bg(theme.accent)
            )
        } else {
            format!(
                "{}{}\x1b[1m",
                theme.fg(theme.text_fg),
                theme.bg(theme.neutral_fill())
            )
        };

        let line = self.capsule_line(capsule.width);
        renderer.put_text(capsule.x, capsule.y, &line, &style, capsule.width)
    }

    fn min_size(&self) -> (u16, u16) {
        (LARGE_BUTTON_WIDTH, LARGE_BUTTON_HEIGHT)
    }

    fn name(&self) -> &str {
        "LargeButton"
    }
}

impl Accessible for LargeButton {
    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Button
    }

    fn accessibility_label(&self) -> Option<&str> {
        Some(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_button(is_default: bool) -> (LargeButton, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let button = LargeButton::new("Continue", move || counter.set(counter.get() + 1))
            .default_action(is_default);
        (button, count)
    }

    #[test]
    fn test_shortcut_mapping() {
        let (default, _) = counting_button(true);
        assert_eq!(default.shortcut(), ButtonShortcut::DefaultAction);
        assert_eq!(default.shortcut().key(), Key::Enter);

        let (cancel, _) = counting_button(false);
        assert_eq!(cancel.shortcut().key(), Key::Esc);
    }

    #[test]
    fn test_default_button_fires_on_enter_only() {
        let (mut button, count) = counting_button(true);
        assert!(button.handle_event(&Event::Key(Key::Enter)));
        assert!(!button.handle_event(&Event::Key(Key::Esc)));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_click_inside_capsule() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        let (mut button, count) = counting_button(false);

        button
            .render(&mut renderer, Rect::new(0, 0, 40, 3), &ctx)
            .unwrap();
        // Capsule is centred: x 8..32, row 1
        let outside = Event::Mouse(MouseEvent::Press(MouseButton::Left, 2, 1));
        let inside = Event::Mouse(MouseEvent::Press(MouseButton::Left, 10, 1));
        assert!(!button.handle_event(&outside));
        assert!(button.handle_event(&inside));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_capsule_rendering() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        let (mut button, _) = counting_button(true);

        button
            .render(&mut renderer, Rect::new(0, 0, 24, 1), &ctx)
            .unwrap();
        let text = renderer.captured_text();
        assert_eq!(text.chars().count(), 24);
        assert!(text.starts_with('('));
        assert!(text.ends_with(')'));
        assert!(text.contains("Continue"));
        assert_eq!(button.accessibility_label(), Some("Continue"));
    }
}
