//! Stacked image view: up to five images fanned out on a fixed canvas
//!
//! Layer geometry is defined in canvas points (420x320) and scaled into the
//! render bounds. The first image sits in front and is the largest; the rest
//! spread to alternating sides behind it.

use crate::accessibility::{Accessible, AccessibilityRole};
use crate::component::Component;
use crate::components::image::Image;
use crate::context::RenderContext;
use crate::event::EventHandler;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::Result;

/// Maximum number of layers shown
pub const MAX_LAYERS: usize = 5;
/// Canvas width in points
pub const CANVAS_WIDTH: u32 = 420;
/// Canvas height in points
pub const CANVAS_HEIGHT: u32 = 320;

/// Frame size of a layer in canvas points
pub fn layer_size(index: usize) -> (u32, u32) {
    match index {
        0 => (420, 320),
        1 | 2 => (360, 280),
        _ => (300, 240),
    }
}

/// Horizontal offset of a layer's centre from the canvas centre, in points
pub fn layer_offset_x(index: usize) -> i32 {
    match index {
        1 => -140,
        2 => 140,
        3 => -220,
        4 => 220,
        _ => 0,
    }
}

/// Stacking order; higher is drawn on top
pub fn z_index(index: usize) -> usize {
    MAX_LAYERS.saturating_sub(index)
}

/// Displays up to five images layered in a stack
pub struct StackedImageView {
    layers: Vec<Image>,
    dirty: bool,
}

impl StackedImageView {
    pub fn new(images: Vec<Image>) -> Self {
        let mut layers = images;
        if layers.len() > MAX_LAYERS {
            log::debug!(
                "stacked image view: dropping {} layers beyond {}",
                layers.len() - MAX_LAYERS,
                MAX_LAYERS
            );
            layers.truncate(MAX_LAYERS);
        }
        StackedImageView {
            layers,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer indices from back to front
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.layers.len()).collect();
        order.sort_by_key(|&index| z_index(index));
        order
    }

    /// Cell rectangle of a layer's frame, clipped to `bounds`
    pub fn layer_rect(bounds: Rect, index: usize) -> Rect {
        let (w, h) = layer_size(index);
        let left = (CANVAS_WIDTH as i32 - w as i32) / 2 + layer_offset_x(index);
        let top = (CANVAS_HEIGHT as i32 - h as i32) / 2;

        let sx = bounds.width as f32 / CANVAS_WIDTH as f32;
        let sy = bounds.height as f32 / CANVAS_HEIGHT as f32;

        let x0 = (left as f32 * sx).round() as i32;
        let x1 = ((left + w as i32) as f32 * sx).round() as i32;
        let y0 = (top as f32 * sy).round() as i32;
        let y1 = ((top + h as i32) as f32 * sy).round() as i32;

        let clamp_x = |v: i32| v.clamp(0, bounds.width as i32) as u16;
        let clamp_y = |v: i32| v.clamp(0, bounds.height as i32) as u16;
        let (x0, x1) = (clamp_x(x0), clamp_x(x1));
        let (y0, y1) = (clamp_y(y0), clamp_y(y1));

        Rect::new(bounds.x + x0, bounds.y + y0, x1 - x0, y1 - y0)
    }
}

impl EventHandler for StackedImageView {}

impl Component for StackedImageView {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, ctx: &RenderContext) -> Result<()> {
        if self.layers.is_empty() || bounds.is_empty() {
            return Ok(());
        }

        let shadow = ctx.theme.shadow_style();
        for index in self.draw_order() {
            let frame = Self::layer_rect(bounds, index);
            if frame.is_empty() {
                continue;
            }

            let layer = &mut self.layers[index];
            let picture = layer.fitted_rect(frame);
            let drop = Rect::new(picture.x + 1, picture.y + 1, picture.width, picture.height)
                .intersection(&bounds);
            renderer.fill_rect(drop, &shadow)?;
            layer.render(renderer, frame, ctx)?;
        }

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        // One cell per 10x20 points
        ((CANVAS_WIDTH / 10) as u16, (CANVAS_HEIGHT / 20) as u16)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "StackedImageView"
    }
}

impl Accessible for StackedImageView {
    fn accessibility_role(&self) -> AccessibilityRole {
        AccessibilityRole::Image
    }
}
