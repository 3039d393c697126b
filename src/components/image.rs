//! Static image component
//!
//! Decoded pixels are kept as RGB8 and drawn with the renderer's graphics
//! backend (Kitty or Unicode blocks), scaled into the component's bounds.

use crate::component::Component;
use crate::context::RenderContext;
use crate::event::EventHandler;
use crate::layout::Rect;
use crate::render::Renderer;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Decoded RGB8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageData {
    /// Wrap raw RGB8 pixels
    pub fn from_rgb(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(anyhow!(
                "expected {} RGB bytes for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            ));
        }
        Ok(ImageData {
            pixels,
            width,
            height,
        })
    }

    /// Convert RGBA8 pixels, dropping alpha
    pub fn from_rgba(rgba: &[u8], width: u32, height: u32) -> Result<Self> {
        let rgb = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Self::from_rgb(rgb, width, height)
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).context("Failed to decode image")?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_rgb(rgb.into_raw(), width, height)
    }

    /// Load and decode an image file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("Failed to load image {}", path.display()))?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_rgb(rgb.into_raw(), width, height)
    }

    /// Solid-colour image, handy for placeholders
    pub fn solid(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        let pixels = (0..width as usize * height as usize)
            .flat_map(|_| [rgb.0, rgb.1, rgb.2])
            .collect();
        ImageData {
            pixels,
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// How an image fills its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    /// Scale to fit inside the bounds, preserving aspect ratio
    #[default]
    Fit,
    /// Stretch to the bounds
    Fill,
}

/// Static image component
pub struct Image {
    data: ImageData,
    mode: ContentMode,
    dirty: bool,
}

impl Image {
    pub fn new(data: ImageData) -> Self {
        Image {
            data,
            mode: ContentMode::Fit,
            dirty: true,
        }
    }

    pub fn with_mode(mut self, mode: ContentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn data(&self) -> &ImageData {
        &self.data
    }

    pub fn set_data(&mut self, data: ImageData) {
        self.data = data;
        self.dirty = true;
    }

    /// Cell rectangle the image occupies inside `bounds`
    ///
    /// Terminal cells are roughly twice as tall as wide, so one cell row
    /// covers two pixel-aspect units.
    pub fn fitted_rect(&self, bounds: Rect) -> Rect {
        let (w, h) = self.data.dimensions();
        if self.mode == ContentMode::Fill || w == 0 || h == 0 || bounds.is_empty() {
            return bounds;
        }

        let aspect = w as f32 / (h as f32 / 2.0);
        let mut cols = bounds.width as f32;
        let mut rows = cols / aspect;
        if rows > bounds.height as f32 {
            rows = bounds.height as f32;
            cols = rows * aspect;
        }

        let cols = (cols.round() as u16).clamp(1, bounds.width);
        let rows = (rows.round() as u16).clamp(1, bounds.height);
        bounds.centered(cols, rows)
    }
}

impl EventHandler for Image {}

impl Component for Image {
    fn render(&mut self, renderer: &mut Renderer, bounds: Rect, _ctx: &RenderContext) -> Result<()> {
        let target = self.fitted_rect(bounds);
        if target.is_empty() {
            return Ok(());
        }

        let (w, h) = self.data.dimensions();
        renderer.render_image(self.data.pixels(), w, h, target)?;

        self.dirty = false;
        Ok(())
    }

    fn min_size(&self) -> (u16, u16) {
        let (w, h) = self.data.dimensions();
        (((w / 10).max(1)) as u16, ((h / 20).max(1)) as u16)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn name(&self) -> &str {
        "Image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_conversion() {
        let data = ImageData::from_rgba(&[1, 2, 3, 255, 4, 5, 6, 0], 2, 1).unwrap();
        assert_eq!(data.pixels(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(ImageData::from_rgb(vec![0; 5], 1, 2).is_err());
    }

    #[test]
    fn test_decode_png_round_trip_dimensions() {
        let png = crate::render::image_helpers::rgb_to_png(3, 2, &[200u8; 18]).unwrap();
        let data = ImageData::decode(&png).unwrap();
        assert_eq!(data.dimensions(), (3, 2));
    }

    #[test]
    fn test_fit_preserves_aspect() {
        // 40x20 px is 40 cols by 10 rows in cell aspect
        let img = Image::new(ImageData::solid(40, 20, (0, 0, 0)));
        let rect = img.fitted_rect(Rect::new(0, 0, 80, 10));
        assert_eq!(rect, Rect::new(20, 0, 40, 10));

        let fill = Image::new(ImageData::solid(40, 20, (0, 0, 0))).with_mode(ContentMode::Fill);
        assert_eq!(
            fill.fitted_rect(Rect::new(0, 0, 80, 10)),
            Rect::new(0, 0, 80, 10)
        );
    }
}
