//! Rendering backend - buffered terminal output, graphics and cursor management
//!
//! A `Renderer` either writes to stdout through a buffer or, when created
//! with `Renderer::headless()`, captures everything in memory so widget output
//! can be inspected without a terminal.

use crate::graphics::{GraphicsBackend, ImageRenderer, Placement, RgbFrame};
use crate::layout::Rect;
use crate::terminal::TerminalContext;
use anyhow::Result;
use std::io::{self, BufWriter, Write};

/// Default buffer capacity for write batching (16KB)
const WRITE_BUFFER_CAPACITY: usize = 16 * 1024;

enum Output {
    Terminal(BufWriter<io::Stdout>),
    Capture(Vec<u8>),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Terminal(w) => w.write(buf),
            Output::Capture(v) => v.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Terminal(w) => w.flush(),
            Output::Capture(_) => Ok(()),
        }
    }
}

/// Terminal renderer handling text, colour and images
///
/// Output is buffered; call `flush()` (or `end_frame()`) to display it.
pub struct Renderer {
    writer: Output,
    context: TerminalContext,
    image_renderer: ImageRenderer,
    in_alt_screen: bool,
    /// Active clip rectangle; text outside it is dropped
    clip: Option<Rect>,
}

impl Renderer {
    /// Create a renderer for the real terminal with a detected graphics backend
    pub fn new() -> Result<Self> {
        Self::with_backend(GraphicsBackend::detect())
    }

    /// Create a renderer for the real terminal with a specific graphics backend
    pub fn with_backend(backend: GraphicsBackend) -> Result<Self> {
        let context = TerminalContext::detect()?;
        log::debug!("graphics backend: {}", backend.name());

        Ok(Renderer {
            writer: Output::Terminal(BufWriter::with_capacity(
                WRITE_BUFFER_CAPACITY,
                io::stdout(),
            )),
            context,
            image_renderer: ImageRenderer::new(backend),
            in_alt_screen: false,
            clip: None,
        })
    }

    /// Create an in-memory renderer with an 80x24 geometry and block graphics
    pub fn headless() -> Self {
        Renderer {
            writer: Output::Capture(Vec::new()),
            context: TerminalContext::headless(),
            image_renderer: ImageRenderer::new(GraphicsBackend::Blocks),
            in_alt_screen: false,
            clip: None,
        }
    }

    /// Everything written so far by a headless renderer (empty for a terminal)
    pub fn captured(&self) -> &[u8] {
        match &self.writer {
            Output::Capture(v) => v,
            Output::Terminal(_) => &[],
        }
    }

    /// Captured output with escape sequences stripped
    pub fn captured_text(&self) -> String {
        strip_ansi(&String::from_utf8_lossy(self.captured()))
    }

    /// Discard captured output
    pub fn clear_captured(&mut self) {
        if let Output::Capture(v) = &mut self.writer {
            v.clear();
        }
    }

    pub fn context(&self) -> &TerminalContext {
        &self.context
    }

    /// Full-screen bounds
    pub fn screen(&self) -> Rect {
        let (cols, rows) = self.context.char_dimensions();
        Rect::fullscreen(cols, rows)
    }

    /// Refresh terminal geometry (call after resize)
    pub fn refresh_geometry(&mut self) -> Result<()> {
        if matches!(self.writer, Output::Terminal(_)) {
            self.context.refresh_geometry()?;
        }
        Ok(())
    }

    /// Enter alternative screen buffer
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.in_alt_screen {
            write!(self.writer, "\x1b[?1049h")?;
            self.writer.flush()?;
            self.in_alt_screen = true;
        }
        Ok(())
    }

    /// Exit alternative screen buffer
    pub fn exit_alt_screen(&mut self) -> Result<()> {
        if self.in_alt_screen {
            write!(self.writer, "\x1b[?1049l")?;
            self.writer.flush()?;
            self.in_alt_screen = false;
        }
        Ok(())
    }

    pub fn in_alt_screen(&self) -> bool {
        self.in_alt_screen
    }

    /// Clear the screen
    pub fn clear(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[2J")?;
        Ok(())
    }

    /// Restrict subsequent text output to `rect` (None to remove)
    pub fn set_clip(&mut self, rect: Option<Rect>) -> Option<Rect> {
        std::mem::replace(&mut self.clip, rect)
    }

    /// Move cursor to position (0-indexed)
    #[inline]
    pub fn move_cursor(&mut self, col: u16, row: u16) -> Result<()> {
        write!(self.writer, "\x1b[{};{}H", row + 1, col + 1)?;
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25l")?;
        Ok(())
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        write!(self.writer, "\x1b[?25h")?;
        Ok(())
    }

    /// Write text at current cursor position
    #[inline]
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        write!(self.writer, "{}", text)?;
        Ok(())
    }

    /// Write text with ANSI color/style codes
    #[inline]
    pub fn write_styled(&mut self, text: &str, style: &str) -> Result<()> {
        write!(self.writer, "{}{}\x1b[0m", style, text)?;
        Ok(())
    }

    /// Write styled text at a position, truncated to `max_width` cells and
    /// to the active clip rectangle
    pub fn put_text(
        &mut self,
        col: u16,
        row: u16,
        text: &str,
        style: &str,
        max_width: u16,
    ) -> Result<()> {
        let (col, skip, width) = match self.clip {
            Some(clip) => {
                if row < clip.y || row >= clip.bottom() || col >= clip.right() {
                    return Ok(());
                }
                let skip = clip.x.saturating_sub(col);
                let start = col.max(clip.x);
                let width = max_width
                    .saturating_sub(skip)
                    .min(clip.right().saturating_sub(start));
                (start, skip as usize, width)
            }
            None => (col, 0, max_width),
        };

        let visible: String = text.chars().skip(skip).take(width as usize).collect();
        if visible.is_empty() {
            return Ok(());
        }

        self.move_cursor(col, row)?;
        if style.is_empty() {
            self.write_text(&visible)
        } else {
            self.write_styled(&visible, style)
        }
    }

    /// Fill a rectangle with a background style
    pub fn fill_rect(&mut self, rect: Rect, style: &str) -> Result<()> {
        let rect = match self.clip {
            Some(clip) => rect.intersection(&clip),
            None => rect,
        };
        if rect.is_empty() {
            return Ok(());
        }

        let blank = " ".repeat(rect.width as usize);
        for y in rect.y..rect.bottom() {
            self.move_cursor(rect.x, y)?;
            self.write_styled(&blank, style)?;
        }
        Ok(())
    }

    /// Render an RGB8 image into the given cell rectangle
    pub fn render_image(&mut self, data: &[u8], width: u32, height: u32, cells: Rect) -> Result<()> {
        let frame = RgbFrame::new(data, width, height)?;
        let placement = Placement {
            col: cells.x,
            row: cells.y,
            cols: cells.width,
            rows: cells.height,
        };
        self.image_renderer
            .render_image(&mut self.writer, frame, placement)
    }

    /// Delete all graphics images placed by this renderer
    pub fn clear_images(&mut self) -> Result<()> {
        self.image_renderer.delete_all_images(&mut self.writer)
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Begin a render frame - hides cursor and clears previous images
    pub fn begin_frame(&mut self) -> Result<()> {
        self.hide_cursor()?;
        self.clear_images()
    }

    /// End a render frame - flushes buffered output
    pub fn end_frame(&mut self) -> Result<()> {
        self.flush()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Restore the terminal even during panics
        let _ = self.exit_alt_screen();
        if matches!(self.writer, Output::Terminal(_)) {
            let _ = self.show_cursor();
        }
        let _ = self.writer.flush();
    }
}

/// Remove CSI and APC escape sequences from rendered output
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        match chars.next() {
            // CSI: parameters until a final byte in '@'..='~'
            Some('[') => {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            // APC (Kitty graphics): until ST (ESC \)
            Some('_') => {
                while let Some(c) = chars.next() {
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    out
}

/// Helpers to create PNG images from RGB buffers
pub mod image_helpers {
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    /// Encode RGB8 buffer to PNG
    pub fn rgb_to_png(width: u32, height: u32, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        let img = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, data)
            .ok_or_else(|| anyhow::anyhow!("Invalid RGB buffer dimensions"))?;

        let mut png_data = Vec::new();
        img.write_to(&mut Cursor::new(&mut png_data), image::ImageFormat::Png)?;
        Ok(png_data)
    }
}
