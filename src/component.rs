//! Component system - trait and lifecycle for UI elements

use crate::context::RenderContext;
use crate::event::{Event, EventHandler};
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Core component trait for all UI elements
///
/// Components use a hybrid approach:
/// - Retained: component structure and state
/// - Immediate: rendering happens fresh each frame via `render()`
pub trait Component: EventHandler {
    /// Render the component to the given rectangle
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()>;

    /// Minimum size needed for this component, in cells
    fn min_size(&self) -> (u16, u16) {
        (0, 0)
    }

    /// Called when component is first mounted
    fn on_mount(&mut self) {}

    /// Called before component is unmounted
    fn on_unmount(&mut self) {}

    /// Mark component as needing redraw
    fn mark_dirty(&mut self) {}

    /// Check if component needs redraw
    fn is_dirty(&self) -> bool {
        true
    }

    /// Component name for debugging
    fn name(&self) -> &str {
        "Component"
    }
}

/// Owned, type-erased component
pub type BoxedComponent = Box<dyn Component>;

/// Helper to propagate events to children, stopping at the first consumer
pub fn propagate_event(children: &mut [BoxedComponent], event: &Event) -> bool {
    children.iter_mut().any(|child| child.handle_event(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalCapabilities;
    use crate::theme::Theme;

    struct TestComponent {
        dirty: bool,
        consumes: bool,
    }

    impl EventHandler for TestComponent {
        fn handle_event(&mut self, _event: &Event) -> bool {
            self.consumes
        }
    }

    impl Component for TestComponent {
        fn render(
            &mut self,
            _renderer: &mut Renderer,
            _bounds: Rect,
            _ctx: &RenderContext,
        ) -> Result<()> {
            self.dirty = false;
            Ok(())
        }

        fn mark_dirty(&mut self) {
            self.dirty = true;
        }

        fn is_dirty(&self) -> bool {
            self.dirty
        }
    }

    #[test]
    fn test_component_dirty_tracking() {
        let mut comp = TestComponent {
            dirty: true,
            consumes: false,
        };
        assert!(comp.is_dirty());

        let mut renderer = Renderer::headless();
        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        comp.render(&mut renderer, Rect::new(0, 0, 10, 10), &ctx)
            .unwrap();
        assert!(!comp.is_dirty());

        comp.mark_dirty();
        assert!(comp.is_dirty());
    }

    #[test]
    fn test_propagate_stops_at_consumer() {
        let mut children: Vec<BoxedComponent> = vec![
            Box::new(TestComponent {
                dirty: true,
                consumes: false,
            }),
            Box::new(TestComponent {
                dirty: true,
                consumes: true,
            }),
        ];
        assert!(propagate_event(&mut children, &Event::FocusGained));
        assert!(!propagate_event(&mut children[..1], &Event::FocusGained));
    }
}
