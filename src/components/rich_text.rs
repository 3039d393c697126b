//! Read-only rich text viewer
//!
//! Displays attributed text word-wrapped to the view width, inset from the
//! edges, with vertical scrolling and a scrollbar in the rightmost column.
//! There is no horizontal scrolling; overlong words are broken.

use crate::accessibility::{Accessible, AccessibilityRole};
use crate::component::Component;
use crate::components::scrollable::ScrollableView;
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, Key, MouseEvent};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::{Color, Theme};
use anyhow::Result;

/// Horizontal text inset in cells
pub const INSET_COLS: u16 = 2;
/// Vertical text inset in cells
pub const INSET_ROWS: u16 = 1;

/// Character attributes of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextAttributes {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Color>,
    pub link: Option<String>,
}

impl TextAttributes {
    pub fn bold() -> Self {
        TextAttributes {
            bold: true,
            ..Default::default()
        }
    }

    pub fn italic() -> Self {
        TextAttributes {
            italic: true,
            ..Default::default()
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        TextAttributes {
            link: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// ANSI style for this run on top of the theme's text style
    fn style(&self, theme: &Theme) -> String {
        let mut style = theme.surface_style();
        match (self.color, &self.link) {
            (Some(color), _) => style.push_str(&theme.fg(color)),
            (None, Some(_)) => style.push_str(&theme.accent_style()),
            (None, None) => style.push_str(&theme.text_style()),
        }
        if self.bold {
            style.push_str("\x1b[1m");
        }
        if self.italic {
            style.push_str("\x1b[3m");
        }
        if self.underline || self.link.is_some() {
            style.push_str("\x1b[4m");
        }
        style
    }
}

/// A run of text sharing one set of attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub attributes: TextAttributes,
}

/// Text made of attributed runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributedText {
    runs: Vec<TextRun>,
}

impl AttributedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run with default attributes
    pub fn push(self, text: impl Into<String>) -> Self {
        self.push_styled(text, TextAttributes::default())
    }

    /// Append a run with the given attributes
    pub fn push_styled(mut self, text: impl Into<String>, attributes: TextAttributes) -> Self {
        self.runs.push(TextRun {
            text: text.into(),
            attributes,
        });
        self
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    /// Concatenated text without attributes
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

impl From<&str> for AttributedText {
    fn from(text: &str) -> Self {
        AttributedText::new().push(text)
    }
}

impl From<String> for AttributedText {
    fn from(text: String) -> Self {
        AttributedText::new().push(text)
    }
}

/// Part of a wrapped line drawn with one run's attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    /// Index of the source run
    pub run: usize,
}

/// One display line after wrapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrappedLine {
    pub spans: Vec<Span>,
}

impl WrappedLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    fn push(&mut self, ch: char, run: usize) {
        match self.spans.last_mut() {
            Some(span) if span.run == run => span.text.push(ch),
            _ => self.spans.push(Span {
                text: ch.to_string(),
                run,
            }),
        }
    }

    fn trim_trailing_space(&mut self) {
        if let Some(span) = self.spans.last_mut() {
            if span.text.ends_with(' ') {
                span.text.pop();
                if span.text.is_empty() {
                    self.spans.pop();
                }
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

enum Token {
    Word(Vec<(char, usize)>),
    Space(usize),
    Newline,
}

fn tokenize(text: &AttributedText) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<(char, usize)> = Vec::new();

    for (run, chunk) in text.runs.iter().enumerate() {
        for ch in chunk.text.chars() {
            if ch == '\n' || ch.is_whitespace() {
                if !word.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                tokens.push(if ch == '\n' {
                    Token::Newline
                } else {
                    Token::Space(run)
                });
            } else {
                word.push((ch, run));
            }
        }
    }
    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

/// Word-wrap attributed text to `width` columns
///
/// Words that do not fit on the current line move to the next one; words
/// longer than a whole line are broken. Spaces at a wrap point are dropped.
pub fn wrap_text(text: &AttributedText, width: usize) -> Vec<WrappedLine> {
    if text.is_empty() {
        return Vec::new();
    }

    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = WrappedLine::default();
    let mut col = 0;

    for token in tokenize(text) {
        match token {
            Token::Newline => {
                lines.push(std::mem::take(&mut line));
                col = 0;
            }
            Token::Space(run) => {
                if col > 0 && col < width {
                    line.push(' ', run);
                    col += 1;
                }
            }
            Token::Word(chars) => {
                if col > 0 && col + chars.len() > width {
                    line.trim_trailing_space();
                    lines.push(std::mem::take(&mut line));
                    col = 0;
                }
                for (ch, run) in chars {
                    if col == width {
                        lines.push(std::mem::take(&mut line));
                        col = 0;
                    }
                    line.push(ch, run);
                    col += 1;
                }
            }
        }
    }
    if !line.is_empty() || !lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Scrollable, read-only view over attributed text
pub struct RichTextView {
    text: AttributedText,
    lines: Vec<WrappedLine>,
    wrap_width: Option<usize>,
    scroll: ScrollableView,
    bounds: Option<Rect>,
    dirty: bool,
}

impl RichTextView {
    pub fn new(text: impl Into<AttributedText>) -> Self {
        RichTextView {
            text: text.into(),
            lines: Vec::new(),
            wrap_width: None,
            scroll: ScrollableView::default(),
            bounds: None,
            dirty: true,
        }
    }

    /// Replace the displayed content and scroll back to the top
    pub fn set_attributed_text(&mut self, text: impl Into<AttributedText>) {
        self.text = text.into();
        self.wrap_width = None;
        self.scroll.scroll_to_top();
        self.dirty = true;
    }

    pub fn attributed_text(&self) -> &AttributedText {
        &self.text
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll.offset()
    }

    /// Area the text is laid out in, leaving the last column for the scrollbar
    pub fn text_area(bounds: Rect) -> Rect {
        Rect::new(
            bounds.x,
            bounds.y,
            bounds.width.saturating_sub(1),
            bounds.height,
        )
        .inset(INSET_COLS, INSET_ROWS)
    }

    /// Lines wrapped at the most recent layout width
    pub fn wrapped_lines(&self) -> &[WrappedLine] {
        &self.lines
    }

    fn layout(&mut self, area: Rect) {
        let width = area.width as usize;
        if self.wrap_width != Some(width) {
            self.lines = wrap_text(&self.text, width);
            self.wrap_width = Some(width);
        }
        self.scroll.set_viewport_height(area.height as usize);
        self.scroll.set_content_height(self.lines.len());
    }

    fn render_scrollbar(&self, renderer: &mut Renderer, bounds: Rect, theme: &Theme) -> Result<()> {
        let Some((start, len)) = self.scroll.thumb(bounds.height) else {
            return Ok(());
        };

        let x = bounds.right() - 1;
        let track = format!("{}{}", theme.surface_style(), theme.border_style());
        let thumb = format!("{}{}", theme.surface_style(), theme.text_style());
        for row in 0..bounds.height {
            let (ch, style) = if row >= start && row < start + len {
                ("┃", &thumb)
            } else {
                ("│", &track)
            };
            renderer.put_text(x, bounds.y + row, ch, style, 1)?;
        }
        Ok(())
    }
}

impl EventHandler for RichTextView {
    fn handle_event(&mut self, event: &Event) -> bool {
        let before = self.scroll.offset();
        match event {
            Event::Key(Key::Up) => self.scroll.line_up(),
            Event::Key(Key::Down) => self.scroll.line_down(),
            Event::Key(Key::PageUp) => self.scroll.page_up(),
            Event::Key(Key::PageDown) => self.scroll.page_down(),
            Event::Key(Key::Home) => self.scroll.scroll_to_top(),
            Event::Key(Key::End) => self.scroll.scroll_to_bottom(),
            Event::Mouse(mouse @ (MouseEvent::ScrollUp(..) | MouseEvent::ScrollDown(..))) => {
                let (col, row) = mouse.position();
                if !self.bounds.is_some_and(|b| b.contains(col, row)) {
                    return false;
                }
                match mouse {
                    MouseEvent::ScrollUp(..) => self.scroll.scroll_by(-3),
                    _ => self.scroll.scroll_by(3),
                }
            }
            _ => return false,
        }

        if self.scroll.offset() != before {
            self.dirty = true;
        }
        self.scroll.can_scroll()
    }
}

impl Component for RichTextView {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.bounds = Some(bounds);
        if bounds.is_empty() {
            return Ok(());
        }

        let theme = ctx.theme;
        renderer.fill_rect(bounds, &theme.surface_style())?;

        let area = Self::text_area(bounds);
        self.layout(area);

        let styles: Vec<String> = self
            .text
            .runs()
            .iter()
            .map(|run| run.attributes.style(theme))
            .collect();

        for (row, index) in self.scroll.visible_range().enumerate() {
            let y = area.y + row as u16;
            let mut x = area.x;
            for span in &self.lines[index].spans {
                let style = styles.get(span.run).map(String::as_str).unwrap_or("");
                renderer.put_text(x, y, &span.text, style, area.right().saturating_sub(x))?;
                x = x.saturating_add(span.text.chars().count() as u16);
            }
        }

        self.render_scrollbar(renderer, bounds, theme)?;

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        (INSET_COLS * 2 + 1 + 10, INSET_ROWS * 2 + 1)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "RichTextView"
    }
}

impl Accessible for RichTextView {
    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::TextArea
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;

    fn texts(lines: &[WrappedLine]) -> Vec<String> {
        lines.iter().map(WrappedLine::text).collect()
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        let text = AttributedText::from("The quick brown fox jumps");
        assert_eq!(
            texts(&wrap_text(&text, 10)),
            vec!["The quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_breaks_long_words_and_keeps_newlines() {
        let text = AttributedText::from("abcdefghij\nok");
        assert_eq!(texts(&wrap_text(&text, 4)), vec!["abcd", "efgh", "ij", "ok"]);
        assert!(wrap_text(&AttributedText::new(), 10).is_empty());
    }

    #[test]
    fn test_spans_follow_runs() {
        let text = AttributedText::new()
            .push_styled("Hello ", TextAttributes::bold())
            .push("world");
        let lines = wrap_text(&text, 20);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].spans,
            vec![
                Span {
                    text: "Hello ".into(),
                    run: 0
                },
                Span {
                    text: "world".into(),
                    run: 1
                },
            ]
        );
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();

        let body = vec!["line"; 30].join("\n");
        let mut view = RichTextView::new(body);
        let bounds = Rect::new(0, 0, 40, 12);
        assert_eq!(RichTextView::text_area(bounds), Rect::new(2, 1, 35, 10));

        view.render(&mut renderer, bounds, &ctx).unwrap();
        view.handle_event(&Event::Key(Key::Up));
        assert_eq!(view.scroll_offset(), 0);

        assert!(view.handle_event(&Event::Key(Key::End)));
        assert_eq!(view.scroll_offset(), 20);
        view.handle_event(&Event::Key(Key::Down));
        assert_eq!(view.scroll_offset(), 20);

        view.handle_event(&Event::Mouse(MouseEvent::ScrollUp(5, 5)));
        assert_eq!(view.scroll_offset(), 17);
    }

    #[test]
    fn test_rewraps_when_width_changes() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();

        let mut view = RichTextView::new("alpha beta gamma delta");
        view.render(&mut renderer, Rect::new(0, 0, 40, 5), &ctx)
            .unwrap();
        assert_eq!(view.wrapped_lines().len(), 1);
        assert!(renderer.captured_text().contains("alpha beta gamma delta"));

        view.render(&mut renderer, Rect::new(0, 0, 16, 5), &ctx)
            .unwrap();
        assert_eq!(texts(view.wrapped_lines()), vec!["alpha beta", "gamma delta"]);

        view.set_attributed_text("replaced");
        view.render(&mut renderer, Rect::new(0, 0, 15, 5), &ctx)
            .unwrap();
        assert_eq!(texts(view.wrapped_lines()), vec!["replaced"]);
    }
}
