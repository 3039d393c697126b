//! Icon button: a symbol above a caption, with a tinted selection state

use crate::accessibility::{Accessible, AccessibilityRole};
use crate::component::Component;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key, MouseButton, MouseEvent};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Minimum button width in cells
pub const ICON_BUTTON_MIN_WIDTH: u16 = 8;

const PADDING: u16 = 1;

/// Button showing a symbol row over a caption row
pub struct IconButton {
    title: String,
    symbol: String,
    is_selected: bool,
    focused: bool,
    action: Box<dyn FnMut()>,
    bounds: Option<Rect>,
    dirty: bool,
}

impl IconButton {
    pub fn new(
        title: impl Into<String>,
        symbol: impl Into<String>,
        action: impl FnMut() + 'static,
    ) -> Self {
        IconButton {
            title: title.into(),
            symbol: symbol.into(),
            is_selected: false,
            focused: false,
            action: Box::new(action),
            bounds: None,
            dirty: true,
        }
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    pub fn set_selected(&mut self, is_selected: bool) {
        if self.is_selected != is_selected {
            self.is_selected = is_selected;
            self.dirty = true;
        }
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn press(&mut self) {
        (self.action)();
    }

    fn content_width(&self) -> u16 {
        self.title
            .chars()
            .count()
            .max(self.symbol.chars().count()) as u16
    }
}

impl EventHandler for IconButton {
    fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(Key::Enter) | Event::Key(Key::Char(' ')) if self.focused => {
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

    fn on_focus(&mut self) {
        self.focused = true;
        self.dirty = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.dirty = true;
    }
}

impl Component for IconButton {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let (w, h) = self.min_size();
        let area = bounds.centered(w, h);
        self.bounds = Some(area);
        if area.is_empty() {
            return Ok(());
        }

        let theme = ctx.theme;
        let background = if self.is_selected {
            theme.bg(theme.selection_fill())
        } else {
            String::new()
        };
        if self.is_selected {
            renderer.fill_rect(area, &background)?;
        }

        let inner = area.inner(PADDING);
        let symbol_len = self.symbol.chars().count() as u16;
        let title_len = self.title.chars().count() as u16;

        let symbol_style = format!("{}{}", background, theme.accent_style());
        let mut title_style = format!("{}{}", background, theme.text_style());
        if self.focused {
            title_style.push_str("\x1b[4m");
        }

        renderer.put_text(
            inner.x + inner.width.saturating_sub(symbol_len) / 2,
            inner.y,
            &self.symbol,
            &symbol_style,
            inner.width,
        )?;
        if inner.height > 1 {
            renderer.put_text(
                inner.x + inner.width.saturating_sub(title_len) / 2,
                inner.y + 1,
                &self.title,
                &title_style,
                inner.width,
            )?;
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let width = (self.content_width() + PADDING * 2).max(ICON_BUTTON_MIN_WIDTH);
        (width, 2 + PADDING * 2)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "IconButton"
    }
}

impl Accessible for IconButton {
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

    fn counting_button() -> (IconButton, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let button = IconButton::new("Files", "▤", move || counter.set(counter.get() + 1));
        (button, count)
    }

    #[test]
    fn test_min_size() {
        let (button, _) = counting_button();
        assert_eq!(button.min_size(), (8, 4));

        let wide = IconButton::new("Preferences", "*", || {});
        assert_eq!(wide.min_size(), (13, 4));
    }

    #[test]
    fn test_enter_requires_focus() {
        let (mut button, count) = counting_button();
        assert!(!button.handle_event(&Event::Key(Key::Enter)));

        button.on_focus();
        assert!(button.handle_event(&Event::Key(Key::Enter)));
        assert!(button.handle_event(&Event::Key(Key::Char(' '))));
        assert_eq!(count.get(), 2);

        button.on_blur();
        assert!(!button.handle_event(&Event::Key(Key::Enter)));
    }

    #[test]
    fn test_click_uses_rendered_bounds() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        let (mut button, count) = counting_button();

        let click = Event::Mouse(MouseEvent::Press(MouseButton::Left, 1, 1));
        assert!(!button.handle_event(&click));

        button
            .render(&mut renderer, Rect::new(0, 0, 8, 4), &ctx)
            .unwrap();
        assert!(button.handle_event(&click));
        assert_eq!(count.get(), 1);

        let text = renderer.captured_text();
        assert!(text.contains("▤"));
        assert!(text.contains("Files"));
    }

    #[test]
    fn test_selection_marks_dirty() {
        let (mut button, _) = counting_button();
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        button
            .render(&mut renderer, Rect::new(0, 0, 8, 4), &ctx)
            .unwrap();
        assert!(!button.is_dirty());

        button.set_selected(true);
        assert!(button.is_selected());
        assert!(button.is_dirty());
    }
}
