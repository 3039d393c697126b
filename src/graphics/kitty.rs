//! Kitty graphics protocol rendering backend

use super::{ImageRenderer, Placement, RgbFrame};
use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::io::Write;

/// Maximum payload per escape sequence chunk
const CHUNK_SIZE: usize = 4096;

impl ImageRenderer {
    /// Transmit and place a PNG-encoded image, chunked per the protocol
    pub(super) fn render_kitty<W: Write>(
        &mut self,
        writer: &mut W,
        frame: RgbFrame<'_>,
        placement: Placement,
    ) -> Result<()> {
        let png = crate::render::image_helpers::rgb_to_png(frame.width, frame.height, frame.data)?;
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, png);

        let image_id = self.next_image_id;
        self.next_image_id = self.next_image_id.wrapping_add(1).max(1);

        write!(writer, "\x1b[{};{}H", placement.row + 1, placement.col + 1)?;

        let chunks: Vec<&[u8]> = encoded.as_bytes().chunks(CHUNK_SIZE).collect();
        let last = chunks.len().saturating_sub(1);

        for (i, chunk) in chunks.iter().enumerate() {
            let more = if i == last { 0 } else { 1 };
            self.line_buffer.clear();

            if i == 0 {
                write!(
                    self.line_buffer,
                    "\x1b_Ga=T,f=100,t=d,i={},c={},r={},C=1,q=2,m={};",
                    image_id, placement.cols, placement.rows, more
                )?;
            } else {
                write!(self.line_buffer, "\x1b_Gm={};", more)?;
            }

            // Base64 output is ASCII
            self.line_buffer.push_str(&String::from_utf8_lossy(chunk));
            self.line_buffer.push_str("\x1b\\");
            writer.write_all(self.line_buffer.as_bytes())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::GraphicsBackend;

    #[test]
    fn test_kitty_header_and_ids() {
        let data = vec![10u8; 2 * 2 * 3];
        let frame = RgbFrame::new(&data, 2, 2).unwrap();
        let placement = Placement {
            col: 0,
            row: 0,
            cols: 4,
            rows: 2,
        };
        let mut renderer = ImageRenderer::new(GraphicsBackend::Kitty);

        let mut out = Vec::new();
        renderer.render_kitty(&mut out, frame, placement).unwrap();
        renderer.render_kitty(&mut out, frame, placement).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a=T,f=100,t=d,i=1,c=4,r=2"));
        assert!(text.contains("i=2,c=4,r=2"));
        assert!(text.ends_with("\x1b\\"));
    }
}
