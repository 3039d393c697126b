//! Modal alerts and sheets
//!
//! Both are one-shot and untracked by the registry. Panel sizes are in
//! points like window sizes; `None` sizes the panel to its content.

use super::WindowSize;
use crate::component::Component;
use crate::terminal::TerminalGeometry;

/// Size request for a modal or sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelSpec {
    pub size: Option<WindowSize>,
}

impl PanelSpec {
    pub fn new(size: Option<WindowSize>) -> Self {
        PanelSpec { size }
    }

    /// Outer panel size in cells: the requested size converted with the
    /// terminal's cell metrics, or the content's minimum size plus a border
    pub fn cells(&self, content: &dyn Component, geometry: &TerminalGeometry) -> (u16, u16) {
        match self.size {
            Some(size) => (
                geometry.px_to_cols(size.width as f32),
                geometry.px_to_rows(size.height as f32),
            ),
            None => {
                let (w, h) = content.min_size();
                (w.saturating_add(2), h.saturating_add(2))
            }
        }
    }
}

/// How a modal presentation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    /// The user pressed OK
    Dismissed,
    /// The host cannot run modals
    Unsupported,
}

/// Result of attaching a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOutcome {
    /// The sheet is showing on its parent
    Attached,
    /// The parent window is not open
    NoParent,
    /// The host cannot show sheets
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::Text;

    #[test]
    fn test_panel_cells() {
        let geometry = TerminalGeometry::with_char_size(80, 24, 10, 20);
        let content = Text::new("Hello");

        assert_eq!(PanelSpec::default().cells(&content, &geometry), (7, 3));
        assert_eq!(
            PanelSpec::new(Some(WindowSize::new(300, 200))).cells(&content, &geometry),
            (30, 10)
        );
    }
}
