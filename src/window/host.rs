//! Host trait at the seam between the registry and a windowing platform

use super::{ModalOutcome, PanelSpec, SheetOutcome, WindowHandle, WindowSpec};
use crate::component::BoxedComponent;
use crate::components::alert::{AlertPanel, SheetPanel};
use anyhow::{anyhow, Result};
use std::sync::mpsc::Sender;

/// A window closed, by the user or programmatically
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseEvent {
    pub identifier: String,
    pub handle: WindowHandle,
}

/// Reports a window's closure back to the registry that opened it
///
/// Hosts keep the notifier next to the window and call `notify` once it
/// closes. It is `Send`, so it may be fired from any thread; the registry
/// applies the event on its own thread the next time it drains.
#[derive(Debug, Clone)]
pub struct CloseNotifier {
    identifier: String,
    tx: Sender<CloseEvent>,
}

impl CloseNotifier {
    pub(crate) fn new(identifier: impl Into<String>, tx: Sender<CloseEvent>) -> Self {
        CloseNotifier {
            identifier: identifier.into(),
            tx,
        }
    }

    /// Identifier the window was opened under
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Report that `handle` has closed
    pub fn notify(&self, handle: WindowHandle) {
        let event = CloseEvent {
            identifier: self.identifier.clone(),
            handle,
        };
        if self.tx.send(event).is_err() {
            log::debug!(
                "close of '{}' ({}) after registry was dropped",
                self.identifier,
                handle
            );
        }
    }
}

/// Platform operations the registry delegates to
pub trait WindowHost {
    /// Whether this host can present windows at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Create, show and focus a window, returning its handle
    ///
    /// The host must call `notifier.notify(handle)` when the window closes,
    /// whatever the cause.
    fn create_window(
        &mut self,
        spec: &WindowSpec,
        content: BoxedComponent,
        notifier: CloseNotifier,
    ) -> Result<WindowHandle>;

    /// Bring an existing window to the front
    fn focus_window(&mut self, handle: WindowHandle) -> Result<()>;

    /// Close a window; unknown handles are ignored
    fn close_window(&mut self, handle: WindowHandle) -> Result<()>;

    /// Present an alert and block until it is dismissed
    fn run_modal(&mut self, spec: &PanelSpec, panel: AlertPanel) -> Result<ModalOutcome>;

    /// Attach a sheet to a parent window without blocking
    fn begin_sheet(
        &mut self,
        parent: WindowHandle,
        spec: &PanelSpec,
        panel: SheetPanel,
    ) -> Result<SheetOutcome>;
}

/// Host for environments without windowing; everything is a no-op
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedHost;

impl WindowHost for UnsupportedHost {
    fn is_supported(&self) -> bool {
        false
    }

    fn create_window(
        &mut self,
        _spec: &WindowSpec,
        _content: BoxedComponent,
        _notifier: CloseNotifier,
    ) -> Result<WindowHandle> {
        Err(anyhow!("windows are not supported on this platform"))
    }

    fn focus_window(&mut self, _handle: WindowHandle) -> Result<()> {
        Ok(())
    }

    fn close_window(&mut self, _handle: WindowHandle) -> Result<()> {
        Ok(())
    }

    fn run_modal(&mut self, _spec: &PanelSpec, _panel: AlertPanel) -> Result<ModalOutcome> {
        Ok(ModalOutcome::Unsupported)
    }

    fn begin_sheet(
        &mut self,
        _parent: WindowHandle,
        _spec: &PanelSpec,
        _panel: SheetPanel,
    ) -> Result<SheetOutcome> {
        Ok(SheetOutcome::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_notifier_sends_identifier_and_handle() {
        let (tx, rx) = mpsc::channel();
        let notifier = CloseNotifier::new("prefs", tx);
        notifier.clone().notify(WindowHandle::from_raw(3));

        assert_eq!(
            rx.try_recv().unwrap(),
            CloseEvent {
                identifier: "prefs".into(),
                handle: WindowHandle::from_raw(3),
            }
        );
    }

    #[test]
    fn test_notify_after_receiver_dropped_is_harmless() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        CloseNotifier::new("gone", tx).notify(WindowHandle::from_raw(1));
    }

    #[test]
    fn test_unsupported_host_is_inert() {
        let mut host = UnsupportedHost;
        assert!(!host.is_supported());
        assert!(host.close_window(WindowHandle::from_raw(1)).is_ok());
    }
}
