//! Slideshow: one slide at a time, advanced by an arrow in the corner
//!
//! Switching slides animates a horizontal slide transition driven by
//! `Event::Tick`. The reduced-motion accessibility setting switches
//! instantly instead.

use crate::component::{BoxedComponent, Component};
use crate::context::{RenderContext, UseAccessibility};
use crate::event::{Event, EventHandler, Key, MouseButton, MouseEvent};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::ARROW_SYMBOL;
use anyhow::Result;
use std::time::Duration;

/// Length of the slide transition
pub const TRANSITION_DURATION: Duration = Duration::from_millis(400);

/// Direction slides move in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// Incoming from the trailing edge, outgoing to the leading edge
    Forward,
    /// Incoming from the leading edge, outgoing to the trailing edge
    Backward,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: usize,
    direction: SlideDirection,
    elapsed: Duration,
}

impl Transition {
    fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f32() / TRANSITION_DURATION.as_secs_f32();
        ease_in_out(t.clamp(0.0, 1.0))
    }
}

/// Quadratic ease-in-out over `0.0..=1.0`
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cycles through a list of slides
pub struct SlideShow {
    slides: Vec<BoxedComponent>,
    current: usize,
    transition: Option<Transition>,
    reduced_motion: bool,
    force_reduced_motion: bool,
    arrow_bounds: Option<Rect>,
    dirty: bool,
}

impl SlideShow {
    pub fn new(slides: Vec<BoxedComponent>) -> Self {
        SlideShow {
            slides,
            current: 0,
            transition: None,
            reduced_motion: false,
            force_reduced_motion: false,
            arrow_bounds: None,
            dirty: true,
        }
    }

    /// Always switch slides without animating
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.force_reduced_motion = reduced;
        self.reduced_motion = reduced;
        self
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Show the next slide, wrapping after the last
    pub fn advance(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        let next = (self.current + 1) % self.slides.len();
        self.go_to(next, SlideDirection::Forward);
    }

    /// Show the previous slide, wrapping before the first
    pub fn retreat(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        let len = self.slides.len();
        let previous = (self.current + len - 1) % len;
        self.go_to(previous, SlideDirection::Backward);
    }

    fn go_to(&mut self, index: usize, direction: SlideDirection) {
        let from = self.current;
        if from == index {
            return;
        }

        self.slides[from].on_blur();
        self.slides[index].on_focus();
        self.current = index;
        self.dirty = true;

        if self.reduced_motion {
            self.transition = None;
            return;
        }
        self.transition = Some(Transition {
            from,
            direction,
            elapsed: Duration::ZERO,
        });
    }

    fn tick(&mut self, dt: Duration) {
        if let Some(transition) = &mut self.transition {
            transition.elapsed += dt;
            if transition.elapsed >= TRANSITION_DURATION {
                self.transition = None;
            }
            self.dirty = true;
        }
    }

    fn arrow_rect(bounds: Rect) -> Rect {
        let width = ARROW_SYMBOL.chars().count() as u16 + 2;
        let x = bounds.right().saturating_sub(width + 1).max(bounds.x);
        let y = if bounds.height >= 2 {
            bounds.bottom() - 2
        } else {
            bounds.y
        };
        Rect::new(x, y, width, 1).intersection(&bounds)
    }

    fn render_clipped(
        slide: &mut BoxedComponent,
        renderer: &mut Renderer,
        area: Rect,
        clip: Rect,
        ctx: &RenderContext,
    ) -> Result<()> {
        if clip.is_empty() {
            return Ok(());
        }
        let previous = renderer.set_clip(Some(clip));
        let rendered = slide.render(renderer, area, ctx);
        renderer.set_clip(previous);
        rendered
    }

    fn render_transition(
        &mut self,
        renderer: &mut Renderer,
        bounds: Rect,
        transition: Transition,
        ctx: &RenderContext,
    ) -> Result<()> {
        let width = bounds.width;
        let moved = (width as f32 * transition.progress()).round() as u16;
        let (from, to) = (transition.from, self.current);

        match transition.direction {
            SlideDirection::Forward => {
                // Outgoing slide gives up its trailing columns
                let edge = width - moved.min(width);
                let leading = Rect::new(bounds.x, bounds.y, edge, bounds.height);
                let incoming = Rect::new(bounds.x + edge, bounds.y, width, bounds.height);
                Self::render_clipped(&mut self.slides[from], renderer, bounds, leading, ctx)?;
                Self::render_clipped(
                    &mut self.slides[to],
                    renderer,
                    incoming,
                    incoming.intersection(&bounds),
                    ctx,
                )
            }
            SlideDirection::Backward => {
                let edge = moved.min(width);
                let leading = Rect::new(bounds.x, bounds.y, edge, bounds.height);
                let outgoing = Rect::new(bounds.x + edge, bounds.y, width, bounds.height);
                Self::render_clipped(
                    &mut self.slides[from],
                    renderer,
                    outgoing,
                    outgoing.intersection(&bounds),
                    ctx,
                )?;
                Self::render_clipped(&mut self.slides[to], renderer, bounds, leading, ctx)
            }
        }
    }
}

impl EventHandler for SlideShow {
    fn handle_event(&mut self, event: &Event) -> bool {
        if self.slides.is_empty() {
            return false;
        }

        match event {
            Event::Tick(dt) => {
                self.tick(*dt);
                self.slides[self.current].handle_event(event);
                false
            }
            Event::Mouse(MouseEvent::Press(MouseButton::Left, col, row))
                if self
                    .arrow_bounds
                    .is_some_and(|arrow| arrow.contains(*col, *row)) =>
            {
                self.advance();
                true
            }
            _ if self.slides[self.current].handle_event(event) => true,
            Event::Key(Key::Right) => {
                self.advance();
                true
            }
            Event::Key(Key::Left) => {
                self.retreat();
                true
            }
            _ => false,
        }
    }
}

impl Component for SlideShow {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        self.reduced_motion = self.force_reduced_motion || self.use_reduced_motion(ctx);
        if self.reduced_motion {
            self.transition = None;
        }
        if self.slides.is_empty() || bounds.is_empty() {
            self.arrow_bounds = None;
            return Ok(());
        }

        match self.transition {
            Some(transition) => self.render_transition(renderer, bounds, transition, ctx)?,
            None => self.slides[self.current].render(renderer, bounds, ctx)?,
        }

        let arrow = Self::arrow_rect(bounds);
        let style = format!("{}\x1b[1m", ctx.theme.accent_style());
        renderer.put_text(
            arrow.x,
            arrow.y,
            &format!(" {} ", ARROW_SYMBOL),
            &style,
            arrow.width,
        )?;
        self.arrow_bounds = Some(arrow);

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        self.slides
            .iter()
            .map(|slide| slide.min_size())
            .fold((4, 2), |(w, h), (sw, sh)| (w.max(sw), h.max(sh)))
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        for slide in &mut self.slides {
            slide.mark_dirty();
        }
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.transition.is_some()
    }

    fn name(&self) -> &str {
        "SlideShow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::Text;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;

    fn slides(labels: &[&str]) -> Vec<BoxedComponent> {
        labels
            .iter()
            .map(|label| Box::new(Text::new(*label)) as BoxedComponent)
            .collect()
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut show = SlideShow::new(slides(&["One", "Two", "Three"])).with_reduced_motion(true);
        show.advance();
        show.advance();
        assert_eq!(show.current_index(), 2);
        show.advance();
        assert_eq!(show.current_index(), 0);

        show.retreat();
        assert_eq!(show.current_index(), 2);
    }

    #[test]
    fn test_empty_slideshow_is_inert() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();

        let mut show = SlideShow::new(Vec::new());
        show.advance();
        show.retreat();
        assert_eq!(show.current_index(), 0);
        assert!(!show.handle_event(&Event::Key(Key::Right)));

        show.render(&mut renderer, Rect::new(0, 0, 20, 5), &ctx)
            .unwrap();
        assert!(renderer.captured().is_empty());
    }

    #[test]
    fn test_transition_completes_after_duration() {
        let mut show = SlideShow::new(slides(&["One", "Two"]));
        show.advance();
        assert!(show.is_animating());
        assert_eq!(show.current_index(), 1);

        show.handle_event(&Event::Tick(Duration::from_millis(200)));
        assert!(show.is_animating());

        show.handle_event(&Event::Tick(Duration::from_millis(200)));
        assert!(!show.is_animating());
    }

    #[test]
    fn test_single_slide_does_not_animate() {
        let mut show = SlideShow::new(slides(&["Only"]));
        show.advance();
        assert_eq!(show.current_index(), 0);
        assert!(!show.is_animating());
    }

    #[test]
    fn test_reduced_motion_skips_transition() {
        let mut show = SlideShow::new(slides(&["One", "Two"])).with_reduced_motion(true);
        show.advance();
        assert!(!show.is_animating());
        assert_eq!(show.current_index(), 1);
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn test_arrow_click_advances() {
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        let mut show = SlideShow::new(slides(&["One", "Two"])).with_reduced_motion(true);

        show.render(&mut renderer, Rect::new(0, 0, 20, 5), &ctx)
            .unwrap();
        let text = renderer.captured_text();
        assert!(text.contains("One"));
        assert!(text.contains(ARROW_SYMBOL));

        // Arrow occupies columns 16..19 on row 3
        let click = Event::Mouse(MouseEvent::Press(MouseButton::Left, 17, 3));
        assert!(show.handle_event(&click));
        assert_eq!(show.current_index(), 1);

        renderer.clear_captured();
        show.render(&mut renderer, Rect::new(0, 0, 20, 5), &ctx)
            .unwrap();
        assert!(renderer.captured_text().contains("Two"));
    }
}
