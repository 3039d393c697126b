//! Panels hosted by modal alerts and sheets
//!
//! An alert stacks the caller's content over a divider and a single default
//! OK button. A sheet only pads its content; dismissal is left to the host.

use crate::accessibility::{Accessible, AccessibilityRole};
use crate::component::{BoxedComponent, Component};
use crate::components::large_button::{LargeButton, LARGE_BUTTON_WIDTH};
use crate::context::RenderContext;
use crate::event::{Event, EventHandler};
use crate::layout::{FlexLayout, Rect, Size};
use crate::render::Renderer;
use crate::OK_LABEL;
use anyhow::Result;
use std::cell::Cell;
use std::rc::Rc;

const PADDING: u16 = 1;

/// Content, divider and OK button stacked vertically
pub struct AlertPanel {
    content: BoxedComponent,
    ok: LargeButton,
    dismissed: Rc<Cell<bool>>,
}

impl AlertPanel {
    pub fn new(content: BoxedComponent) -> Self {
        let dismissed = Rc::new(Cell::new(false));
        let flag = dismissed.clone();
        let ok = LargeButton::new(OK_LABEL, move || flag.set(true)).default_action(true);
        AlertPanel {
            content,
            ok,
            dismissed,
        }
    }

    /// Shared flag set once OK is pressed
    pub fn dismissed_flag(&self) -> Rc<Cell<bool>> {
        self.dismissed.clone()
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed.get()
    }

    /// Press OK
    pub fn dismiss(&mut self) {
        self.ok.press();
    }

    fn sections(&self, bounds: Rect) -> Vec<Rect> {
        FlexLayout::column().padding(PADDING).layout(
            bounds,
            &[Size::Flex(1), Size::Fixed(1), Size::Fixed(1), Size::Fixed(1)],
        )
    }
}

impl EventHandler for AlertPanel {
    fn handle_event(&mut self, event: &Event) -> bool {
        self.content.handle_event(event) || self.ok.handle_event(event)
    }
}

impl Component for AlertPanel {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        let sections = self.sections(bounds);
        let &[content, divider, _, button] = sections.as_slice() else {
            return Ok(());
        };

        self.content.render(renderer, content, ctx)?;

        let style = format!("{}{}", ctx.theme.surface_style(), ctx.theme.divider_style());
        let line = "─".repeat(divider.width as usize);
        renderer.put_text(divider.x, divider.y, &line, &style, divider.width)?;

        self.ok.render(renderer, button, ctx)
    }

    fn min_size(&self) -> (u16, u16) {
        let (w, h) = self.content.min_size();
        (
            w.max(LARGE_BUTTON_WIDTH).saturating_add(PADDING * 2),
            h.saturating_add(3 + PADDING * 2),
        )
    }

    fn mark_dirty(&mut self) {
        self.content.mark_dirty();
    }

    fn is_dirty(&self) -> bool {
        self.content.is_dirty()
    }

    fn name(&self) -> &str {
        "AlertPanel"
    }
}

impl Accessible for AlertPanel {
    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Alert
    }
}

/// Padded content shown in a sheet
pub struct SheetPanel {
    content: BoxedComponent,
}

impl SheetPanel {
    pub fn new(content: BoxedComponent) -> Self {
        SheetPanel { content }
    }
}

impl EventHandler for SheetPanel {
    fn handle_event(&mut self, event: &Event) -> bool {
        self.content.handle_event(event)
    }
}

impl Component for SheetPanel {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.content.render(renderer, bounds.inner(PADDING), ctx)
    }

    fn min_size(&self) -> (u16, u16) {
        let (w, h) = self.content.min_size();
        (w.saturating_add(PADDING * 2), h.saturating_add(PADDING * 2))
    }

    fn mark_dirty(&mut self) {
        self.content.mark_dirty();
    }

    fn is_dirty(&self) -> bool {
        self.content.is_dirty()
    }

    fn name(&self) -> &str {
        "SheetPanel"
    }
}

impl Accessible for SheetPanel {
    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Dialog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::Text;
    use crate::event::Key;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;

    #[test]
    fn test_alert_layout_and_size() {
        let panel = AlertPanel::new(Box::new(Text::new("Saved")));
        assert_eq!(panel.min_size(), (26, 6));

        let sections = panel.sections(Rect::new(0, 0, 30, 8));
        assert_eq!(sections[0], Rect::new(1, 1, 28, 3));
        assert_eq!(sections[1], Rect::new(1, 4, 28, 1));
        assert_eq!(sections[3], Rect::new(1, 6, 28, 1));
    }

    #[test]
    fn test_alert_renders_divider_and_ok() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();

        let mut panel = AlertPanel::new(Box::new(Text::new("Export finished")));
        panel
            .render(&mut renderer, Rect::new(0, 0, 30, 8), &ctx)
            .unwrap();

        let text = renderer.captured_text();
        assert!(text.contains("Export finished"));
        assert!(text.contains("───"));
        assert!(text.contains(OK_LABEL));
    }

    #[test]
    fn test_enter_dismisses_alert() {
        let mut panel = AlertPanel::new(Box::new(Text::new("Done")));
        let flag = panel.dismissed_flag();
        assert!(!flag.get());

        assert!(!panel.handle_event(&Event::Key(Key::Esc)));
        assert!(panel.handle_event(&Event::Key(Key::Enter)));
        assert!(flag.get());
        assert!(panel.is_dismissed());
    }

    struct Oversized;

    impl EventHandler for Oversized {}

    impl Component for Oversized {
        fn render(
            &mut self,
            _renderer: &mut Renderer,
            _bounds: Rect,
            _ctx: &RenderContext,
        ) -> Result<()> {
            Ok(())
        }

        fn min_size(&self) -> (u16, u16) {
            (u16::MAX, u16::MAX - 1)
        }
    }

    #[test]
    fn test_min_size_saturates() {
        assert_eq!(
            AlertPanel::new(Box::new(Oversized)).min_size(),
            (u16::MAX, u16::MAX)
        );
        assert_eq!(
            SheetPanel::new(Box::new(Oversized)).min_size(),
            (u16::MAX, u16::MAX)
        );
    }

    #[test]
    fn test_sheet_pads_content() {
        let sheet = SheetPanel::new(Box::new(Text::new("Options")));
        assert_eq!(sheet.min_size(), (9, 3));
        assert_eq!(sheet.accessibility_role(), AccessibilityRole::Dialog);
    }
}
