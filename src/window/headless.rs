//! Headless host that records window requests
//!
//! Used in tests and non-interactive embedding. Windows are kept in memory,
//! modals are rendered once into a capture buffer and dismissed immediately.

use super::{
    CloseNotifier, ModalOutcome, PanelSpec, SheetOutcome, WindowChrome, WindowHandle, WindowHost,
    WindowSize, WindowSpec,
};
use crate::component::{BoxedComponent, Component};
use crate::components::alert::{AlertPanel, SheetPanel};
use crate::context::RenderContext;
use crate::layout::Rect;
use crate::render::Renderer;
use crate::terminal::{TerminalCapabilities, TerminalGeometry};
use crate::theme::Theme;
use anyhow::{anyhow, Result};

/// Snapshot of an open headless window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessWindow {
    pub handle: WindowHandle,
    pub title: String,
    pub size: WindowSize,
    pub chrome: WindowChrome,
    /// `Component::name` of the content
    pub content: String,
}

struct OpenWindow {
    info: HeadlessWindow,
    _content: BoxedComponent,
    notifier: CloseNotifier,
    sheets: Vec<SheetPanel>,
}

/// In-memory window host
pub struct HeadlessHost {
    next_handle: u64,
    windows: Vec<OpenWindow>,
    created: Vec<WindowSpec>,
    focused: Vec<WindowHandle>,
    closed: Vec<WindowHandle>,
    modals: Vec<String>,
    notify_on_close: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        HeadlessHost {
            next_handle: 1,
            windows: Vec::new(),
            created: Vec::new(),
            focused: Vec::new(),
            closed: Vec::new(),
            modals: Vec::new(),
            notify_on_close: true,
        }
    }

    /// Do not report programmatic closes through the notifier
    pub fn without_close_notifications(mut self) -> Self {
        self.notify_on_close = false;
        self
    }

    /// Every window spec this host was asked to create, in order
    pub fn created(&self) -> &[WindowSpec] {
        &self.created
    }

    /// Handles passed to `focus_window`, in order
    pub fn focused(&self) -> &[WindowHandle] {
        &self.focused
    }

    /// Handles of closed windows, in order
    pub fn closed(&self) -> &[WindowHandle] {
        &self.closed
    }

    /// Text of each modal as it was rendered
    pub fn modals(&self) -> &[String] {
        &self.modals
    }

    pub fn open_windows(&self) -> Vec<WindowHandle> {
        self.windows.iter().map(|w| w.info.handle).collect()
    }

    pub fn window(&self, handle: WindowHandle) -> Option<&HeadlessWindow> {
        self.find(handle).map(|index| &self.windows[index].info)
    }

    /// Number of sheets attached to a window
    pub fn sheet_count(&self, handle: WindowHandle) -> usize {
        self.find(handle)
            .map(|index| self.windows[index].sheets.len())
            .unwrap_or(0)
    }

    /// The notifier registered with a window, for closing it from elsewhere
    pub fn notifier(&self, handle: WindowHandle) -> Option<CloseNotifier> {
        self.find(handle)
            .map(|index| self.windows[index].notifier.clone())
    }

    /// Close a window as if the user clicked its close button
    ///
    /// Returns false for unknown handles.
    pub fn simulate_user_close(&mut self, handle: WindowHandle) -> bool {
        match self.remove(handle) {
            Some(window) => {
                window.notifier.notify(handle);
                true
            }
            None => false,
        }
    }

    fn find(&self, handle: WindowHandle) -> Option<usize> {
        self.windows.iter().position(|w| w.info.handle == handle)
    }

    fn remove(&mut self, handle: WindowHandle) -> Option<OpenWindow> {
        let index = self.find(handle)?;
        self.closed.push(handle);
        Some(self.windows.remove(index))
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowHost for HeadlessHost {
    fn create_window(
        &mut self,
        spec: &WindowSpec,
        content: BoxedComponent,
        notifier: CloseNotifier,
    ) -> Result<WindowHandle> {
        let handle = WindowHandle::from_raw(self.next_handle);
        self.next_handle += 1;

        log::debug!("headless: create {} '{}'", handle, spec.title);
        self.created.push(spec.clone());
        self.windows.push(OpenWindow {
            info: HeadlessWindow {
                handle,
                title: spec.title.clone(),
                size: spec.size,
                chrome: spec.chrome,
                content: content.name().to_string(),
            },
            _content: content,
            notifier,
            sheets: Vec::new(),
        });
        self.focused.push(handle);
        Ok(handle)
    }

    fn focus_window(&mut self, handle: WindowHandle) -> Result<()> {
        let index = self
            .find(handle)
            .ok_or_else(|| anyhow!("no open window {}", handle))?;
        let window = self.windows.remove(index);
        self.windows.push(window);
        self.focused.push(handle);
        Ok(())
    }

    fn close_window(&mut self, handle: WindowHandle) -> Result<()> {
        if let Some(window) = self.remove(handle) {
            if self.notify_on_close {
                window.notifier.notify(handle);
            }
        }
        Ok(())
    }

    fn run_modal(&mut self, spec: &PanelSpec, mut panel: AlertPanel) -> Result<ModalOutcome> {
        let geometry = TerminalGeometry::fallback();
        let (width, height) = spec.cells(&panel, &geometry);

        let theme = Theme::new(TerminalCapabilities::basic());
        let ctx = RenderContext::new(&theme);
        let mut renderer = Renderer::headless();
        panel.render(&mut renderer, Rect::new(0, 0, width, height), &ctx)?;
        self.modals.push(renderer.captured_text());

        panel.dismiss();
        log::debug!("headless: modal dismissed");
        Ok(ModalOutcome::Dismissed)
    }

    fn begin_sheet(
        &mut self,
        parent: WindowHandle,
        _spec: &PanelSpec,
        panel: SheetPanel,
    ) -> Result<SheetOutcome> {
        match self.find(parent) {
            Some(index) => {
                self.windows[index].sheets.push(panel);
                Ok(SheetOutcome::Attached)
            }
            None => Ok(SheetOutcome::NoParent),
        }
    }
}
