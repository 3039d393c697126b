//! Terminal abstraction - geometry and capability detection

use anyhow::Result;

/// Fallback size used when the terminal cannot be queried
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Terminal geometry in cells, with estimated pixel metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    pub cols: u16,
    pub rows: u16,
    /// Estimated character width in pixels
    pub char_width: u16,
    /// Estimated character height in pixels
    pub char_height: u16,
}

impl TerminalGeometry {
    /// Query the current terminal size
    ///
    /// Without the `tui` feature there is no terminal to query and the
    /// fallback 80x24 geometry is returned.
    pub fn detect() -> Result<Self> {
        #[cfg(feature = "tui")]
        let (cols, rows) = {
            use anyhow::Context;
            crossterm::terminal::size().context("Failed to get terminal size")?
        };
        #[cfg(not(feature = "tui"))]
        let (cols, rows) = FALLBACK_SIZE;

        Ok(Self::with_char_size(cols, rows, 10, 20))
    }

    /// Geometry with explicit pixel metrics
    pub fn with_char_size(cols: u16, rows: u16, char_width: u16, char_height: u16) -> Self {
        TerminalGeometry {
            cols,
            rows,
            char_width,
            char_height,
        }
    }

    /// Fixed geometry for headless rendering
    pub fn fallback() -> Self {
        Self::with_char_size(FALLBACK_SIZE.0, FALLBACK_SIZE.1, 10, 20)
    }

    /// Convert a pixel length on the x axis into cells (rounding, minimum 1)
    pub fn px_to_cols(&self, px: f32) -> u16 {
        ((px / self.char_width.max(1) as f32).round() as u16).max(1)
    }

    /// Convert a pixel length on the y axis into cells (rounding, minimum 1)
    pub fn px_to_rows(&self, px: f32) -> u16 {
        ((px / self.char_height.max(1) as f32).round() as u16).max(1)
    }
}

/// Terminal capability detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Supports Kitty graphics protocol
    pub kitty_graphics: bool,
    /// Supports 24-bit true color
    pub truecolor: bool,
    /// Supports 256 colors
    pub colors_256: bool,
    /// Supports mouse events
    pub mouse: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from the environment
    pub fn detect() -> Self {
        let term = std::env::var("TERM").unwrap_or_default();
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        let kitty_window = std::env::var("KITTY_WINDOW_ID").is_ok();

        let kitty_graphics = kitty_window || term.contains("kitty");
        let truecolor =
            colorterm.contains("truecolor") || colorterm.contains("24bit") || kitty_window;

        TerminalCapabilities {
            kitty_graphics,
            truecolor,
            colors_256: term.contains("256") || truecolor,
            mouse: cfg!(feature = "tui"),
        }
    }

    /// Deterministic 16-color capabilities (tests and headless output)
    pub fn basic() -> Self {
        TerminalCapabilities {
            kitty_graphics: false,
            truecolor: false,
            colors_256: false,
            mouse: false,
        }
    }

    /// Full-featured capabilities
    pub fn truecolor() -> Self {
        TerminalCapabilities {
            kitty_graphics: false,
            truecolor: true,
            colors_256: true,
            mouse: true,
        }
    }
}

/// Geometry and capabilities together
#[derive(Debug, Clone)]
pub struct TerminalContext {
    pub geometry: TerminalGeometry,
    pub capabilities: TerminalCapabilities,
}

impl TerminalContext {
    /// Detect the current terminal
    pub fn detect() -> Result<Self> {
        Ok(TerminalContext {
            geometry: TerminalGeometry::detect()?,
            capabilities: TerminalCapabilities::detect(),
        })
    }

    /// Context that never touches the real terminal
    pub fn headless() -> Self {
        TerminalContext {
            geometry: TerminalGeometry::fallback(),
            capabilities: TerminalCapabilities::basic(),
        }
    }

    /// Refresh geometry after a resize
    pub fn refresh_geometry(&mut self) -> Result<()> {
        self.geometry = TerminalGeometry::detect()?;
        Ok(())
    }

    /// Size in cells
    pub fn char_dimensions(&self) -> (u16, u16) {
        (self.geometry.cols, self.geometry.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_with_char_size() {
        let geom = TerminalGeometry::with_char_size(80, 24, 10, 20);
        assert_eq!(geom.cols, 80);
        assert_eq!(geom.rows, 24);
        assert_eq!(geom.char_width, 10);
    }

    #[test]
    fn test_px_conversion_never_zero() {
        let geom = TerminalGeometry::fallback();
        assert_eq!(geom.px_to_cols(420.0), 42);
        assert_eq!(geom.px_to_rows(320.0), 16);
        assert_eq!(geom.px_to_cols(1.0), 1);
    }

    #[test]
    fn test_capabilities_detect() {
        let caps = TerminalCapabilities::detect();
        assert!(caps.colors_256 || !caps.truecolor);
    }

    #[test]
    fn test_headless_context() {
        let ctx = TerminalContext::headless();
        assert_eq!(ctx.char_dimensions(), (80, 24));
        assert!(!ctx.capabilities.truecolor);
    }
}
