//! Popup overlay for alerts and sheets
//!
//! Provides:
//! - Centred or parent-attached positioning
//! - Rounded border with an optional title
//! - Focus trapping while visible
//! - Enter to confirm, ESC to dismiss

use crate::component::{BoxedComponent, Component};
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::BorderChars;
use anyhow::Result;

/// Where the popup sits relative to the area it is rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupPosition {
    /// Centred in the render bounds
    #[default]
    Center,
    /// Hanging from the top edge of a parent rectangle, horizontally centred
    Attached(Rect),
}

/// Result from popup interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupResult {
    Open,
    Confirmed,
    Dismissed,
}

/// Overlay that draws a bordered panel around its content
pub struct Popup {
    content: BoxedComponent,
    title: Option<String>,
    visible: bool,
    size: Option<(u16, u16)>,
    position: PopupPosition,
    border: Option<BorderChars>,
    close_on_escape: bool,
    result: PopupResult,
    dirty: bool,
}

impl std::fmt::Debug for Popup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Popup")
            .field("content", &self.content.name())
            .field("title", &self.title)
            .field("visible", &self.visible)
            .field("size", &self.size)
            .field("position", &self.position)
            .field("result", &self.result)
            .finish()
    }
}

impl Popup {
    pub fn new(content: BoxedComponent) -> Self {
        Self {
            content,
            title: None,
            visible: false,
            size: None,
            position: PopupPosition::Center,
            border: Some(BorderChars::rounded()),
            close_on_escape: true,
            result: PopupResult::Open,
            dirty: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Fixed outer size; otherwise sized from the content's minimum size
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn with_position(mut self, position: PopupPosition) -> Self {
        self.position = position;
        self
    }

    pub fn set_position(&mut self, position: PopupPosition) {
        self.position = position;
        self.dirty = true;
    }

    /// Border characters, or None for a borderless panel
    pub fn with_border(mut self, border: Option<BorderChars>) -> Self {
        self.border = border;
        self
    }

    pub fn with_close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.result = PopupResult::Open;
        self.dirty = true;
    }

    pub fn confirm(&mut self) {
        self.result = PopupResult::Confirmed;
        self.visible = false;
        self.dirty = true;
    }

    pub fn dismiss(&mut self) {
        self.result = PopupResult::Dismissed;
        self.visible = false;
        self.dirty = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn result(&self) -> PopupResult {
        self.result
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn content_mut(&mut self) -> &mut BoxedComponent {
        &mut self.content
    }

    fn border_width(&self) -> u16 {
        if self.border.is_some() {
            2
        } else {
            0
        }
    }

    /// Outer rectangle of the popup inside `parent`
    pub fn bounds_in(&self, parent: Rect) -> Rect {
        let (width, height) = self.min_size();
        let (width, height) = (width.min(parent.width), height.min(parent.height));

        match self.position {
            PopupPosition::Center => parent.centered(width, height),
            PopupPosition::Attached(anchor) => {
                let anchor = anchor.intersection(&parent);
                let width = width.min(anchor.width);
                let height = height.min(anchor.height);
                Rect::new(
                    anchor.x + (anchor.width - width) / 2,
                    anchor.y,
                    width,
                    height,
                )
            }
        }
    }

    fn content_bounds(&self, outer: Rect) -> Rect {
        outer.inner(self.border_width() / 2)
    }

    fn render_border(
        &self,
        renderer: &mut Renderer,
        outer: Rect,
        chars: &BorderChars,
        ctx: &RenderContext,
    ) -> Result<()> {
        if outer.width < 2 || outer.height < 2 {
            return Ok(());
        }

        let style = format!("{}{}", ctx.theme.border_style(), ctx.theme.surface_style());
        let inner_width = (outer.width - 2) as usize;
        let horizontal = chars.horizontal.to_string().repeat(inner_width);

        let top = match &self.title {
            Some(title) if inner_width > 2 => {
                let label: String = title.chars().take(inner_width - 2).collect();
                let label = format!(" {} ", label);
                let len = label.chars().count();
                let left = (inner_width - len) / 2;
                let right = inner_width - len - left;
                format!(
                    "{}{}{}{}{}",
                    chars.top_left,
                    chars.horizontal.to_string().repeat(left),
                    label,
                    chars.horizontal.to_string().repeat(right),
                    chars.top_right
                )
            }
            _ => format!("{}{}{}", chars.top_left, horizontal, chars.top_right),
        };
        renderer.put_text(outer.x, outer.y, &top, &style, outer.width)?;

        for y in outer.y + 1..outer.bottom() - 1 {
            renderer.put_text(outer.x, y, &chars.vertical.to_string(), &style, 1)?;
            renderer.put_text(outer.right() - 1, y, &chars.vertical.to_string(), &style, 1)?;
        }

        let bottom = format!("{}{}{}", chars.bottom_left, horizontal, chars.bottom_right);
        renderer.put_text(outer.x, outer.bottom() - 1, &bottom, &style, outer.width)
    }
}

impl EventHandler for Popup {
    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.visible {
            return false;
        }

        if self.content.handle_event(event) {
            return true;
        }

        match event {
            Event::Key(Key::Esc) if self.close_on_escape => self.dismiss(),
            Event::Key(Key::Enter) => self.confirm(),
            _ => {}
        }

        // Trap everything while visible
        true
    }
}

impl Component for Popup {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if !self.visible {
            return Ok(());
        }

        let outer = self.bounds_in(bounds);
        renderer.fill_rect(outer, &ctx.theme.surface_style())?;
        if let Some(chars) = self.border {
            self.render_border(renderer, outer, &chars, ctx)?;
        }

        let inner = self.content_bounds(outer);
        let previous = renderer.set_clip(Some(inner));
        let rendered = self.content.render(renderer, inner, ctx);
        renderer.set_clip(previous);
        rendered?;

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        match self.size {
            Some(size) => size,
            None => {
                let (w, h) = self.content.min_size();
                let title = self
                    .title
                    .as_ref()
                    .map(|t| t.chars().count() as u16 + 4)
                    .unwrap_or(0);
                let border = self.border_width();
                ((w + border).max(title), h + border)
            }
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.content.mark_dirty();
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.content.is_dirty()
    }

    fn name(&self) -> &str {
        "Popup"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::Text;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;

    struct TestContent;

    impl EventHandler for TestContent {}

    impl Component for TestContent {
        fn render(
            &mut self,
            _renderer: &mut Renderer,
            _bounds: Rect,
            _ctx: &RenderContext,
        ) -> Result<()> {
            Ok(())
        }

        fn min_size(&self) -> (u16, u16) {
            (20, 10)
        }
    }

    #[test]
    fn test_popup_results() {
        let mut popup = Popup::new(Box::new(TestContent));
        assert!(!popup.is_visible());

        popup.show();
        assert!(popup.handle_event(&Event::Key(Key::Enter)));
        assert_eq!(popup.result(), PopupResult::Confirmed);
        assert!(!popup.is_visible());

        popup.show();
        assert_eq!(popup.result(), PopupResult::Open);
        popup.handle_event(&Event::Key(Key::Esc));
        assert_eq!(popup.result(), PopupResult::Dismissed);
    }

    #[test]
    fn test_escape_can_be_disabled() {
        let mut popup = Popup::new(Box::new(TestContent)).with_close_on_escape(false);
        popup.show();
        assert!(popup.handle_event(&Event::Key(Key::Esc)));
        assert!(popup.is_visible());
    }

    #[test]
    fn test_bounds_center_and_attached() {
        let popup = Popup::new(Box::new(TestContent));
        // 20x10 content plus border
        assert_eq!(
            popup.bounds_in(Rect::new(0, 0, 80, 24)),
            Rect::new(29, 6, 22, 12)
        );

        let sheet = Popup::new(Box::new(TestContent))
            .with_position(PopupPosition::Attached(Rect::new(10, 2, 40, 20)));
        assert_eq!(
            sheet.bounds_in(Rect::new(0, 0, 80, 24)),
            Rect::new(19, 2, 22, 12)
        );
    }

    #[test]
    fn test_render_draws_title_and_content() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();

        let mut popup = Popup::new(Box::new(Text::new("Saved"))).with_title("Note");
        popup.show();
        popup
            .render(&mut renderer, Rect::new(0, 0, 40, 10), &ctx)
            .unwrap();

        let text = renderer.captured_text();
        assert!(text.contains(" Note "));
        assert!(text.contains("Saved"));
        assert!(text.contains('╭'));
    }
}
