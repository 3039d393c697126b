//! Identifier-keyed registry of open windows
//!
//! The registry lives on the UI thread. Hosts report closes through a
//! channel, and every operation drains that channel before looking at the
//! map, so an entry exists exactly while its window is open.

use super::{
    CloseEvent, CloseNotifier, ModalOutcome, OpenOutcome, PanelSpec, SheetOutcome, WindowHandle,
    WindowHost, WindowSize, WindowSpec,
};
use crate::component::BoxedComponent;
use crate::components::alert::{AlertPanel, SheetPanel};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, ThreadId};

/// Tracks at most one live window per identifier
pub struct WindowRegistry<H: WindowHost> {
    host: H,
    windows: HashMap<String, WindowHandle>,
    close_tx: Sender<CloseEvent>,
    close_rx: Receiver<CloseEvent>,
    owner: ThreadId,
}

impl<H: WindowHost> WindowRegistry<H> {
    /// Create a registry owned by the calling thread
    pub fn new(host: H) -> Self {
        let (close_tx, close_rx) = mpsc::channel();
        WindowRegistry {
            host,
            windows: HashMap::new(),
            close_tx,
            close_rx,
            owner: thread::current().id(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Open the window for `identifier`, or focus it if already open
    ///
    /// `content` is only invoked when a new window is created. An empty
    /// identifier is rejected and an unsupported host does nothing.
    pub fn open<F>(
        &mut self,
        identifier: &str,
        title: &str,
        size: WindowSize,
        content: F,
    ) -> Result<OpenOutcome>
    where
        F: FnOnce() -> BoxedComponent,
    {
        self.assert_owner();
        self.process_close_events();

        if identifier.is_empty() {
            log::warn!("refusing to open a window with an empty identifier");
            return Ok(OpenOutcome::Rejected);
        }
        if !self.host.is_supported() {
            log::debug!("window '{}' not opened: host unsupported", identifier);
            return Ok(OpenOutcome::Unsupported);
        }

        if let Some(&handle) = self.windows.get(identifier) {
            self.host.focus_window(handle)?;
            log::debug!("focused existing window '{}' ({})", identifier, handle);
            return Ok(OpenOutcome::Focused(handle));
        }

        let spec = WindowSpec::new(title, size);
        let notifier = CloseNotifier::new(identifier, self.close_tx.clone());
        let handle = self.host.create_window(&spec, content(), notifier)?;
        self.windows.insert(identifier.to_string(), handle);

        log::info!("opened window '{}' ({})", identifier, handle);
        Ok(OpenOutcome::Created(handle))
    }

    /// Close the window for `identifier`; unknown identifiers are ignored
    pub fn close(&mut self, identifier: &str) -> Result<()> {
        self.assert_owner();
        self.process_close_events();

        let Some(&handle) = self.windows.get(identifier) else {
            log::debug!("close of unknown window '{}' ignored", identifier);
            return Ok(());
        };

        self.host.close_window(handle)?;
        self.process_close_events();

        // Hosts that close asynchronously report later; that event is then
        // stale and ignored.
        if self.windows.get(identifier) == Some(&handle) {
            self.windows.remove(identifier);
            log::info!("closed window '{}' ({})", identifier, handle);
        }
        Ok(())
    }

    /// Apply close events reported by the host; returns how many removed
    /// an entry
    pub fn process_close_events(&mut self) -> usize {
        self.assert_owner();

        let mut removed = 0;
        while let Ok(event) = self.close_rx.try_recv() {
            if self.windows.get(&event.identifier) == Some(&event.handle) {
                self.windows.remove(&event.identifier);
                log::info!("window '{}' ({}) closed", event.identifier, event.handle);
                removed += 1;
            } else {
                log::debug!(
                    "stale close for '{}' ({}) ignored",
                    event.identifier,
                    event.handle
                );
            }
        }
        removed
    }

    /// Show `content` in a blocking alert with a single OK button
    pub fn show_modal<F>(&mut self, content: F, size: Option<WindowSize>) -> Result<ModalOutcome>
    where
        F: FnOnce() -> BoxedComponent,
    {
        self.assert_owner();
        self.process_close_events();

        if !self.host.is_supported() {
            return Ok(ModalOutcome::Unsupported);
        }
        let panel = AlertPanel::new(content());
        self.host.run_modal(&PanelSpec::new(size), panel)
    }

    /// Attach a sheet showing `content` to a window
    pub fn show_sheet<F>(
        &mut self,
        parent: WindowHandle,
        content: F,
        size: Option<WindowSize>,
    ) -> Result<SheetOutcome>
    where
        F: FnOnce() -> BoxedComponent,
    {
        self.assert_owner();
        self.process_close_events();

        if !self.host.is_supported() {
            return Ok(SheetOutcome::Unsupported);
        }
        let panel = SheetPanel::new(content());
        self.host.begin_sheet(parent, &PanelSpec::new(size), panel)
    }

    /// Attach a sheet to the window registered under `identifier`
    pub fn show_sheet_for<F>(
        &mut self,
        identifier: &str,
        content: F,
        size: Option<WindowSize>,
    ) -> Result<SheetOutcome>
    where
        F: FnOnce() -> BoxedComponent,
    {
        match self.handle(identifier) {
            Some(parent) => self.show_sheet(parent, content, size),
            None => Ok(SheetOutcome::NoParent),
        }
    }

    /// Whether `identifier` currently has an open window
    pub fn is_open(&mut self, identifier: &str) -> bool {
        self.handle(identifier).is_some()
    }

    pub fn handle(&mut self, identifier: &str) -> Option<WindowHandle> {
        self.process_close_events();
        self.windows.get(identifier).copied()
    }

    pub fn len(&mut self) -> usize {
        self.process_close_events();
        self.windows.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Identifiers with open windows, sorted
    pub fn identifiers(&mut self) -> Vec<String> {
        self.process_close_events();
        let mut identifiers: Vec<String> = self.windows.keys().cloned().collect();
        identifiers.sort();
        identifiers
    }

    fn assert_owner(&self) {
        debug_assert_eq!(
            thread::current().id(),
            self.owner,
            "window registry used off its owning thread"
        );
    }
}
