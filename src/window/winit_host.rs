//! Native windows through winit
//!
//! winit only creates windows from inside a running event loop, so
//! `create_window` issues a handle immediately and queues the request. The
//! application's `ApplicationHandler` calls `realize_pending` from its
//! callbacks and forwards window events to `handle_window_event`, which
//! reports user closes back to the registry.
//!
//! Native windows own their content but do not draw it; the application
//! renders through `content_mut`. Modals and sheets are not available.

use super::{
    CloseNotifier, ModalOutcome, PanelSpec, SheetOutcome, WindowChrome, WindowHandle, WindowHost,
    WindowSpec,
};
use crate::component::BoxedComponent;
use crate::components::alert::{AlertPanel, SheetPanel};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

#[cfg(target_os = "macos")]
use winit::platform::macos::WindowAttributesExtMacOS;

struct NativeWindow {
    spec: WindowSpec,
    content: BoxedComponent,
    notifier: CloseNotifier,
    /// None until realized inside the event loop
    window: Option<Window>,
}

/// Window host backed by winit
#[derive(Default)]
pub struct WinitHost {
    next_handle: u64,
    windows: HashMap<WindowHandle, NativeWindow>,
    ids: HashMap<WindowId, WindowHandle>,
    /// Creation order of windows not yet realized
    pending: Vec<WindowHandle>,
}

impl WinitHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of windows waiting for `realize_pending`
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn handle_for(&self, id: WindowId) -> Option<WindowHandle> {
        self.ids.get(&id).copied()
    }

    /// The native window, once realized
    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.get(&handle)?.window.as_ref()
    }

    pub fn content_mut(&mut self, handle: WindowHandle) -> Option<&mut BoxedComponent> {
        self.windows.get_mut(&handle).map(|w| &mut w.content)
    }

    /// Create every queued window; call from the event loop
    ///
    /// A window the platform refuses is closed through its notifier and the
    /// error returned; requests queued after it stay pending.
    pub fn realize_pending(&mut self, event_loop: &ActiveEventLoop) -> Result<usize> {
        let mut pending = std::mem::take(&mut self.pending).into_iter();
        let mut created = 0;

        while let Some(handle) = pending.next() {
            let Some(native) = self.windows.get_mut(&handle) else {
                continue;
            };
            let window = match event_loop.create_window(attributes(&native.spec)) {
                Ok(window) => window,
                Err(err) => {
                    self.fail_realize(handle, pending.collect());
                    return Err(err.into());
                }
            };
            log::debug!("winit: realized {} as {:?}", handle, window.id());

            window.focus_window();
            self.ids.insert(window.id(), handle);
            native.window = Some(window);
            created += 1;
        }
        Ok(created)
    }

    /// Drop a window that could not be created and requeue the rest
    fn fail_realize(&mut self, failed: WindowHandle, rest: Vec<WindowHandle>) {
        log::warn!("winit: could not create {}", failed);
        self.pending = rest;
        self.remove(failed);
    }

    /// Apply a window event; returns true when it closed a window
    pub fn handle_window_event(&mut self, id: WindowId, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                let Some(handle) = self.ids.get(&id).copied() else {
                    return false;
                };
                log::debug!("winit: user closed {}", handle);
                self.remove(handle).is_some()
            }
            _ => false,
        }
    }

    fn remove(&mut self, handle: WindowHandle) -> Option<WindowHandle> {
        let mut native = self.windows.remove(&handle)?;
        self.pending.retain(|&h| h != handle);
        if let Some(window) = native.window.take() {
            self.ids.remove(&window.id());
        }
        native.content.on_unmount();
        native.notifier.notify(handle);
        Some(handle)
    }
}

fn attributes(spec: &WindowSpec) -> WindowAttributes {
    let attrs = Window::default_attributes()
        .with_title(spec.title.clone())
        .with_inner_size(LogicalSize::new(spec.size.width, spec.size.height));

    match spec.chrome {
        WindowChrome::Titled => attrs,
        #[cfg(target_os = "macos")]
        WindowChrome::Hidden => attrs
            .with_titlebar_transparent(true)
            .with_title_hidden(true)
            .with_fullsize_content_view(true),
        #[cfg(not(target_os = "macos"))]
        WindowChrome::Hidden => attrs.with_decorations(false),
    }
}

impl WindowHost for WinitHost {
    fn create_window(
        &mut self,
        spec: &WindowSpec,
        mut content: BoxedComponent,
        notifier: CloseNotifier,
    ) -> Result<WindowHandle> {
        self.next_handle += 1;
        let handle = WindowHandle::from_raw(self.next_handle);

        content.on_mount();
        self.windows.insert(
            handle,
            NativeWindow {
                spec: spec.clone(),
                content,
                notifier,
                window: None,
            },
        );
        self.pending.push(handle);
        log::debug!("winit: queued {} '{}'", handle, spec.title);
        Ok(handle)
    }

    fn focus_window(&mut self, handle: WindowHandle) -> Result<()> {
        let native = self
            .windows
            .get(&handle)
            .ok_or_else(|| anyhow!("no open window {}", handle))?;
        if let Some(window) = &native.window {
            window.set_minimized(false);
            window.set_visible(true);
            window.focus_window();
        }
        Ok(())
    }

    fn close_window(&mut self, handle: WindowHandle) -> Result<()> {
        self.remove(handle);
        Ok(())
    }

    fn run_modal(&mut self, _spec: &PanelSpec, _panel: AlertPanel) -> Result<ModalOutcome> {
        log::warn!("modal alerts are not available on native windows");
        Ok(ModalOutcome::Unsupported)
    }

    fn begin_sheet(
        &mut self,
        parent: WindowHandle,
        _spec: &PanelSpec,
        _panel: SheetPanel,
    ) -> Result<SheetOutcome> {
        if !self.windows.contains_key(&parent) {
            return Ok(SheetOutcome::NoParent);
        }
        Ok(SheetOutcome::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::Text;
    use crate::window::{WindowRegistry, WindowSize};

    fn text() -> BoxedComponent {
        Box::new(Text::new("native"))
    }

    #[test]
    fn test_create_queues_until_realized() {
        let mut registry = WindowRegistry::new(WinitHost::new());
        let outcome = registry
            .open("main", "Main", WindowSize::new(640, 480), text)
            .unwrap();
        assert!(outcome.is_created());

        let host = registry.host();
        assert_eq!(host.pending_count(), 1);
        assert!(host.window(outcome.handle().unwrap()).is_none());
    }

    #[test]
    fn test_reopen_focuses_queued_window() {
        let mut registry = WindowRegistry::new(WinitHost::new());
        let size = WindowSize::new(640, 480);
        let first = registry.open("main", "Main", size, text).unwrap();
        let second = registry.open("main", "Main", size, text).unwrap();

        assert_eq!(first.handle(), second.handle());
        assert!(!second.is_created());
        assert_eq!(registry.host().window_count(), 1);
    }

    #[test]
    fn test_close_before_realize_clears_entry() {
        let mut registry = WindowRegistry::new(WinitHost::new());
        registry
            .open("main", "Main", WindowSize::new(640, 480), text)
            .unwrap();

        registry.close("main").unwrap();
        assert!(!registry.is_open("main"));
        assert_eq!(registry.host().pending_count(), 0);
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_empty_title_drops_decorations() {
        let size = WindowSize::new(640, 480);
        let plain = attributes(&WindowSpec::new("", size));
        assert!(!plain.decorations);

        let titled = attributes(&WindowSpec::new("Main", size));
        assert!(titled.decorations);
        assert_eq!(titled.title, "Main");
    }

    #[test]
    fn test_failed_realize_forgets_window_and_keeps_queue() {
        let mut registry = WindowRegistry::new(WinitHost::new());
        let size = WindowSize::new(640, 480);
        let first = registry.open("a", "A", size, text).unwrap().handle().unwrap();
        let second = registry.open("b", "B", size, text).unwrap().handle().unwrap();
        let third = registry.open("c", "C", size, text).unwrap().handle().unwrap();

        // Platform refused `second` while realizing [second, third]
        registry.host_mut().fail_realize(second, vec![third]);

        assert!(!registry.is_open("b"));
        assert!(registry.is_open("a"));
        assert!(registry.is_open("c"));
        assert_eq!(registry.handle("a"), Some(first));
        assert_eq!(registry.host().pending, vec![third]);

        let reopened = registry.open("b", "B", size, text).unwrap();
        assert!(reopened.is_created());
    }

    #[test]
    fn test_focus_unknown_handle_errors() {
        let mut host = WinitHost::new();
        assert!(host.focus_window(WindowHandle::from_raw(9)).is_err());
    }

    #[test]
    fn test_modal_and_sheet_unsupported() {
        let mut registry = WindowRegistry::new(WinitHost::new());
        assert_eq!(
            registry.show_modal(text, None).unwrap(),
            ModalOutcome::Unsupported
        );

        let handle = registry
            .open("main", "Main", WindowSize::new(640, 480), text)
            .unwrap()
            .handle()
            .unwrap();
        assert_eq!(
            registry.show_sheet(handle, text, None).unwrap(),
            SheetOutcome::Unsupported
        );
        assert_eq!(
            registry
                .show_sheet(WindowHandle::from_raw(99), text, None)
                .unwrap(),
            SheetOutcome::NoParent
        );
    }
}
