//! Accessibility settings and roles

/// Accessibility settings
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilitySettings {
    /// Use high contrast colors
    pub high_contrast: bool,

    /// Reduce or disable animations
    pub prefer_reduced_motion: bool,

    /// Screen reader is active
    pub screen_reader_enabled: bool,

    /// Font scale multiplier (1.0 = normal, 1.5 = 150%, etc.)
    pub font_scale: f32,
}

impl AccessibilitySettings {
    /// Create default accessibility settings
    pub fn new() -> Self {
        Self {
            high_contrast: false,
            prefer_reduced_motion: false,
            screen_reader_enabled: false,
            font_scale: 1.0,
        }
    }

    /// Detect accessibility settings from environment
    pub fn from_env() -> Self {
        Self {
            high_contrast: std::env::var("ACCESSIBILITY_HIGH_CONTRAST").is_ok(),
            prefer_reduced_motion: std::env::var("ACCESSIBILITY_REDUCED_MOTION").is_ok(),
            screen_reader_enabled: std::env::var("SCREEN_READER").is_ok(),
            font_scale: std::env::var("FONT_SCALE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|scale: &f32| *scale > 0.0)
                .unwrap_or(1.0),
        }
    }

    /// Apply font scaling to a dimension
    pub fn scale_dimension(&self, base: u16) -> u16 {
        (base as f32 * self.font_scale).round() as u16
    }
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Accessibility role a widget reports to assistive tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityRole {
    None,
    Button,
    Image,
    Group,
    TextArea,
    Dialog,
    Alert,
}

/// Widgets that expose a label for assistive tooling
pub trait Accessible {
    fn accessibility_role(&self) -> AccessibilityRole;

    fn accessibility_label(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AccessibilitySettings::default();
        assert!(!settings.prefer_reduced_motion);
        assert_eq!(settings.font_scale, 1.0);
    }

    #[test]
    fn test_scale_dimension() {
        let mut settings = AccessibilitySettings::new();
        assert_eq!(settings.scale_dimension(10), 10);

        settings.font_scale = 1.25;
        assert_eq!(settings.scale_dimension(8), 10);
    }
}
