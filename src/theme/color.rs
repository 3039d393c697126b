//! Color types with automatic degradation support

use crate::terminal::TerminalCapabilities;

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// True color RGB
    Rgb(u8, u8, u8),
    /// 256-color palette index
    Palette256(u8),
    /// 16-color ANSI
    Ansi16(AnsiColor),
}

/// 16-color ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

const ANSI_TABLE: [(AnsiColor, (u8, u8, u8)); 16] = [
    (AnsiColor::Black, (0, 0, 0)),
    (AnsiColor::Red, (170, 0, 0)),
    (AnsiColor::Green, (0, 170, 0)),
    (AnsiColor::Yellow, (170, 85, 0)),
    (AnsiColor::Blue, (0, 0, 170)),
    (AnsiColor::Magenta, (170, 0, 170)),
    (AnsiColor::Cyan, (0, 170, 170)),
    (AnsiColor::White, (170, 170, 170)),
    (AnsiColor::BrightBlack, (85, 85, 85)),
    (AnsiColor::BrightRed, (255, 85, 85)),
    (AnsiColor::BrightGreen, (85, 255, 85)),
    (AnsiColor::BrightYellow, (255, 255, 85)),
    (AnsiColor::BrightBlue, (85, 85, 255)),
    (AnsiColor::BrightMagenta, (255, 85, 255)),
    (AnsiColor::BrightCyan, (85, 255, 255)),
    (AnsiColor::BrightWhite, (255, 255, 255)),
];

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    pub fn white() -> Self {
        Color::Rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Color::Rgb(0, 0, 0)
    }

    pub fn gray() -> Self {
        Color::Rgb(142, 142, 147)
    }

    pub fn dark_gray() -> Self {
        Color::Rgb(128, 128, 128)
    }

    /// System-style blue accent
    pub fn accent_blue() -> Self {
        Color::Rgb(10, 132, 255)
    }

    /// Composite `self` at `opacity` over `background`
    ///
    /// Terminals have no alpha channel, so translucent fills (selection
    /// highlights, secondary button capsules) are pre-blended.
    pub fn over(self, background: Color, opacity: f32) -> Color {
        let alpha = opacity.clamp(0.0, 1.0);
        let (fr, fg, fb) = self.to_rgb();
        let (br, bg, bb) = background.to_rgb();
        let mix = |f: u8, b: u8| (f as f32 * alpha + b as f32 * (1.0 - alpha)).round() as u8;
        Color::Rgb(mix(fr, br), mix(fg, bg), mix(fb, bb))
    }

    /// Foreground escape sequence degraded to the terminal's capabilities
    pub fn degrade(&self, caps: &TerminalCapabilities) -> String {
        self.sgr(caps, 38, 30)
    }

    /// Background escape sequence degraded to the terminal's capabilities
    pub fn bg(&self, caps: &TerminalCapabilities) -> String {
        self.sgr(caps, 48, 40)
    }

    fn sgr(&self, caps: &TerminalCapabilities, extended: u8, base: u8) -> String {
        if caps.truecolor {
            let (r, g, b) = self.to_rgb();
            format!("\x1b[{};2;{};{};{}m", extended, r, g, b)
        } else if caps.colors_256 {
            let idx = match *self {
                Color::Palette256(idx) => idx,
                _ => {
                    let (r, g, b) = self.to_rgb();
                    rgb_to_256(r, g, b)
                }
            };
            format!("\x1b[{};5;{}m", extended, idx)
        } else {
            let ansi = match *self {
                Color::Ansi16(a) => a,
                _ => {
                    let (r, g, b) = self.to_rgb();
                    nearest_ansi16(r, g, b)
                }
            };
            let idx = ansi as u8;
            // Bright colors live at 90-97 / 100-107
            let code = if idx < 8 { base + idx } else { base + 60 + idx - 8 };
            format!("\x1b[{}m", code)
        }
    }

    pub(crate) fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Palette256(idx) => palette256_to_rgb(idx),
            Color::Ansi16(a) => ANSI_TABLE[a as usize].1,
        }
    }
}

/// Convert RGB to 256-color palette index
pub(crate) fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            _ => ((r - 8) / 10) + 232,
        };
    }

    let level = |c: u8| (c as u16 * 5 / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

fn palette256_to_rgb(idx: u8) -> (u8, u8, u8) {
    if idx < 16 {
        ANSI_TABLE[idx as usize].1
    } else if idx >= 232 {
        let gray = 8 + (idx - 232) * 10;
        (gray, gray, gray)
    } else {
        let idx = idx - 16;
        ((idx / 36) * 51, ((idx % 36) / 6) * 51, (idx % 6) * 51)
    }
}

/// Nearest ANSI color by squared RGB distance
fn nearest_ansi16(r: u8, g: u8, b: u8) -> AnsiColor {
    let distance = |(cr, cg, cb): (u8, u8, u8)| {
        let dr = r as i32 - cr as i32;
        let dg = g as i32 - cg as i32;
        let db = b as i32 - cb as i32;
        dr * dr + dg * dg + db * db
    };

    ANSI_TABLE
        .iter()
        .min_by_key(|(_, rgb)| distance(*rgb))
        .map(|(color, _)| *color)
        .unwrap_or(AnsiColor::White)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_256() {
        assert_eq!(rgb_to_256(255, 255, 255), 231);
        assert_eq!(rgb_to_256(0, 0, 0), 16);

        let gray_idx = rgb_to_256(128, 128, 128);
        assert!((232..=255).contains(&gray_idx));
    }

    #[test]
    fn test_truecolor_degradation() {
        let code = Color::white().degrade(&TerminalCapabilities::truecolor());
        assert!(code.contains("38;2;255;255;255"));

        let bg = Color::black().bg(&TerminalCapabilities::truecolor());
        assert!(bg.contains("48;2;0;0;0"));
    }

    #[test]
    fn test_ansi16_degradation() {
        let caps = TerminalCapabilities::basic();
        assert_eq!(Color::white().degrade(&caps), "\x1b[97m");
        assert_eq!(Color::black().bg(&caps), "\x1b[40m");
        assert_eq!(Color::Ansi16(AnsiColor::Blue).bg(&caps), "\x1b[44m");
    }

    #[test]
    fn test_over_blends_toward_background() {
        let tinted = Color::white().over(Color::black(), 0.2);
        assert_eq!(tinted, Color::Rgb(51, 51, 51));

        assert_eq!(Color::white().over(Color::black(), 1.0), Color::white());
        assert_eq!(Color::white().over(Color::black(), 0.0), Color::black());
    }
}
