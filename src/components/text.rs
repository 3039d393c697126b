//! Text component for displaying a single styled line

use crate::component::Component;
use crate::context::RenderContext;
use crate::event::EventHandler;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

impl TextAlign {
    /// Column offset for `len` cells of text inside `width`
    pub fn offset(&self, width: u16, len: u16) -> u16 {
        match self {
            TextAlign::Start => 0,
            TextAlign::Center => width.saturating_sub(len) / 2,
            TextAlign::End => width.saturating_sub(len),
        }
    }
}

/// Text component
pub struct Text {
    content: String,
    style: Option<String>,
    align: TextAlign,
    dirty: bool,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Text {
            content: content.into(),
            style: None,
            align: TextAlign::Start,
            dirty: true,
        }
    }

    /// Set an explicit ANSI style (defaults to the theme's text style)
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.dirty = true;
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    fn width(&self) -> u16 {
        self.content.chars().count() as u16
    }
}

impl EventHandler for Text {}

impl Component for Text {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if self.content.is_empty() || bounds.is_empty() {
            return Ok(());
        }

        let x = bounds.x + self.align.offset(bounds.width, self.width());
        let style = match &self.style {
            Some(style) => style.clone(),
            None => ctx.theme.text_style(),
        };
        let max_width = bounds.right().saturating_sub(x);
        renderer.put_text(x, bounds.y, &self.content, &style, max_width)?;

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (self.width(), 1)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "Text"
    }
}
