//! Graphics backend abstraction for image widgets
//!
//! Images are drawn with the Kitty graphics protocol when the terminal
//! supports it and with Unicode shade blocks everywhere else.

mod blocks;
mod kitty;

use anyhow::{anyhow, Result};
use std::io::Write;

/// Default capacity for line buffer in block rendering
const LINE_BUFFER_CAPACITY: usize = 512;

/// Graphics rendering backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsBackend {
    /// Kitty graphics protocol
    Kitty,
    /// Unicode block characters (universal fallback)
    Blocks,
}

impl GraphicsBackend {
    /// Detect the best available graphics backend
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        if std::env::var("KITTY_WINDOW_ID").is_ok() || term.contains("kitty") {
            GraphicsBackend::Kitty
        } else {
            GraphicsBackend::Blocks
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GraphicsBackend::Kitty => "Kitty Graphics",
            GraphicsBackend::Blocks => "Unicode Blocks",
        }
    }
}

/// Placement of an image in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

/// Raw RGB8 pixels with their dimensions
#[derive(Debug, Clone, Copy)]
pub struct RgbFrame<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> RgbFrame<'a> {
    /// Validate that the buffer holds `width * height` RGB pixels
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() < expected {
            return Err(anyhow!(
                "RGB buffer holds {} bytes, {}x{} needs {}",
                data.len(),
                width,
                height,
                expected
            ));
        }
        Ok(RgbFrame {
            data,
            width,
            height,
        })
    }

    fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}

/// Image renderer for the selected backend
pub struct ImageRenderer {
    backend: GraphicsBackend,
    /// Pre-allocated buffer for building output lines
    line_buffer: String,
    /// Next Kitty image id; ids are recycled on `delete_all_images`
    next_image_id: u32,
}

impl ImageRenderer {
    pub fn new(backend: GraphicsBackend) -> Self {
        ImageRenderer {
            backend,
            line_buffer: String::with_capacity(LINE_BUFFER_CAPACITY),
            next_image_id: 1,
        }
    }

    /// Render an RGB image into the given cell placement
    pub fn render_image<W: Write>(
        &mut self,
        writer: &mut W,
        frame: RgbFrame<'_>,
        placement: Placement,
    ) -> Result<()> {
        if placement.cols == 0 || placement.rows == 0 || frame.width == 0 || frame.height == 0 {
            return Ok(());
        }

        match self.backend {
            GraphicsBackend::Kitty => self.render_kitty(writer, frame, placement),
            GraphicsBackend::Blocks => self.render_blocks(writer, frame, placement),
        }
    }

    /// Delete every image placed by this renderer
    pub fn delete_all_images<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        if self.backend == GraphicsBackend::Kitty && self.next_image_id > 1 {
            write!(writer, "\x1b_Ga=d,d=A,q=2\x1b\\")?;
        }
        self.next_image_id = 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(GraphicsBackend::Kitty.name(), "Kitty Graphics");
        assert_eq!(GraphicsBackend::Blocks.name(), "Unicode Blocks");
    }

    #[test]
    fn test_frame_rejects_short_buffer() {
        assert!(RgbFrame::new(&[0u8; 5], 2, 1).is_err());
        assert!(RgbFrame::new(&[0u8; 6], 2, 1).is_ok());
    }

    #[test]
    fn test_zero_placement_writes_nothing() {
        let mut renderer = ImageRenderer::new(GraphicsBackend::Blocks);
        let data = [255u8; 12];
        let frame = RgbFrame::new(&data, 2, 2).unwrap();
        let mut out = Vec::new();
        renderer
            .render_image(
                &mut out,
                frame,
                Placement {
                    col: 0,
                    row: 0,
                    cols: 0,
                    rows: 3,
                },
            )
            .unwrap();
        assert!(out.is_empty());
    }
}
