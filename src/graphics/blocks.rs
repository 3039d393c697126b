//! Unicode block character rendering backend (universal fallback)

use super::{ImageRenderer, Placement, RgbFrame};
use anyhow::Result;
use std::io::Write;

/// Shade ramp from dark to bright
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

impl ImageRenderer {
    /// Render using Unicode shade characters, one per cell
    ///
    /// Each cell averages the pixels it covers and picks a shade by luminance.
    pub(super) fn render_blocks<W: Write>(
        &mut self,
        writer: &mut W,
        frame: RgbFrame<'_>,
        placement: Placement,
    ) -> Result<()> {
        let cols = placement.cols as u32;
        let rows = placement.rows as u32;

        for cy in 0..rows {
            self.line_buffer.clear();
            let y0 = cy * frame.height / rows;
            let y1 = ((cy + 1) * frame.height / rows).max(y0 + 1).min(frame.height);

            for cx in 0..cols {
                let x0 = cx * frame.width / cols;
                let x1 = ((cx + 1) * frame.width / cols).max(x0 + 1).min(frame.width);
                self.line_buffer.push(shade_for(cell_luminance(&frame, x0..x1, y0..y1)));
            }

            write!(
                writer,
                "\x1b[{};{}H{}",
                placement.row as u32 + cy + 1,
                placement.col + 1,
                self.line_buffer
            )?;
        }

        Ok(())
    }
}

fn cell_luminance(frame: &RgbFrame<'_>, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> u32 {
    let mut total = 0u64;
    let mut count = 0u64;
    for y in ys {
        for x in xs.clone() {
            let (r, g, b) = frame.pixel(x, y);
            // Rec. 601 luma, integer weights summing to 1000
            total += (299 * r as u64 + 587 * g as u64 + 114 * b as u64) / 1000;
            count += 1;
        }
    }
    if count == 0 {
        0
    } else {
        (total / count) as u32
    }
}

fn shade_for(luminance: u32) -> char {
    let idx = (luminance as usize * SHADES.len() / 256).min(SHADES.len() - 1);
    SHADES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::GraphicsBackend;

    #[test]
    fn test_shade_extremes() {
        assert_eq!(shade_for(0), ' ');
        assert_eq!(shade_for(255), '█');
    }

    #[test]
    fn test_blocks_output_positions_rows() {
        let data = vec![255u8; 4 * 2 * 3];
        let frame = RgbFrame::new(&data, 4, 2).unwrap();
        let mut renderer = ImageRenderer::new(GraphicsBackend::Blocks);
        let mut out = Vec::new();
        renderer
            .render_blocks(
                &mut out,
                frame,
                Placement {
                    col: 2,
                    row: 1,
                    cols: 2,
                    rows: 2,
                },
            )
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[2;3H██"));
        assert!(text.contains("\x1b[3;3H██"));
    }
}
