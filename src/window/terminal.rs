//! Terminal host: windows stacked inside a single terminal screen
//!
//! Only the front window is drawn, full-screen, under a one-row title bar
//! (omitted for chrome-less windows). `Ctrl-w` or a click on the close glyph
//! closes the front window. Modal alerts block on terminal input until OK;
//! sheets hang from the parent's title bar until Enter or Esc.

use super::{
    CloseNotifier, ModalOutcome, PanelSpec, SheetOutcome, WindowChrome, WindowHandle, WindowHost,
    WindowSpec,
};
use crate::component::{BoxedComponent, Component};
use crate::components::alert::{AlertPanel, SheetPanel};
use crate::components::popup::{Popup, PopupPosition};
use crate::context::RenderContext;
use crate::event::{Event, EventHandler, EventPoller, FrameTimer, Key, MouseButton, MouseEvent};
use crate::layout::Rect;
use crate::render::Renderer;
use crate::theme::Theme;
use anyhow::{anyhow, Result};

/// Glyph drawn at the left of the title bar; clicking it closes the window
const CLOSE_GLYPH: &str = " ✕ ";

const FRAMES_PER_SECOND: u32 = 30;

struct TerminalWindow {
    handle: WindowHandle,
    spec: WindowSpec,
    content: BoxedComponent,
    notifier: CloseNotifier,
    sheet: Option<Popup>,
}

/// Window host drawing into the terminal
pub struct TerminalHost {
    renderer: Renderer,
    theme: Theme,
    poller: Option<EventPoller>,
    timer: FrameTimer,
    next_handle: u64,
    /// Back to front
    windows: Vec<TerminalWindow>,
}

impl TerminalHost {
    /// Take over the terminal: alternate screen, raw mode and mouse capture
    pub fn new() -> Result<Self> {
        let mut renderer = Renderer::new()?;
        let theme = Theme::new(renderer.context().capabilities);
        renderer.enter_alt_screen()?;
        renderer.hide_cursor()?;
        let poller = EventPoller::new()?;
        Ok(Self::assemble(renderer, theme, Some(poller)))
    }

    /// Draw with an existing renderer and no terminal input
    ///
    /// Modals cannot run without input and fail.
    pub fn with_renderer(renderer: Renderer, theme: Theme) -> Self {
        Self::assemble(renderer, theme, None)
    }

    fn assemble(renderer: Renderer, theme: Theme, poller: Option<EventPoller>) -> Self {
        TerminalHost {
            renderer,
            theme,
            poller,
            timer: FrameTimer::new(FRAMES_PER_SECOND),
            next_handle: 1,
            windows: Vec::new(),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Handle of the window currently drawn
    pub fn front(&self) -> Option<WindowHandle> {
        self.windows.last().map(|w| w.handle)
    }

    pub fn has_sheet(&self, handle: WindowHandle) -> bool {
        self.find(handle)
            .is_some_and(|index| self.windows[index].sheet.is_some())
    }

    /// Area available to a window's content
    pub fn content_area(&self, chrome: WindowChrome) -> Rect {
        let screen = self.renderer.screen();
        match chrome {
            WindowChrome::Titled => screen.split_horizontal(1).1,
            WindowChrome::Hidden => screen,
        }
    }

    /// Wait up to one frame for input, dispatch it and redraw
    ///
    /// Returns the event when no window consumed it, so the application can
    /// handle global shortcuts.
    pub fn pump(&mut self) -> Result<Option<Event>> {
        let timeout = self.timer.time_to_next_frame();
        let event = match &self.poller {
            Some(poller) => poller.poll(timeout)?,
            None => None,
        };

        let unhandled = match event {
            Some(event) if !self.dispatch(&event)? => Some(event),
            _ => None,
        };

        if self.timer.frame_due() {
            let dt = self.timer.tick();
            self.dispatch(&Event::Tick(dt))?;
        }
        self.render()?;
        Ok(unhandled)
    }

    /// Route an event to the front window; returns whether it was consumed
    pub fn dispatch(&mut self, event: &Event) -> Result<bool> {
        match event {
            Event::Resize(..) => {
                self.renderer.refresh_geometry()?;
                for window in &mut self.windows {
                    window.content.mark_dirty();
                }
                return Ok(true);
            }
            Event::Key(Key::Ctrl('w')) => {
                if let Some(handle) = self.front() {
                    self.user_close(handle);
                    return Ok(true);
                }
                return Ok(false);
            }
            Event::Mouse(MouseEvent::Press(MouseButton::Left, col, row)) => {
                if let Some(handle) = self.close_glyph_hit(*col, *row) {
                    self.user_close(handle);
                    return Ok(true);
                }
            }
            _ => {}
        }

        let Some(window) = self.windows.last_mut() else {
            return Ok(false);
        };

        if let Some(sheet) = &mut window.sheet {
            let consumed = sheet.handle_event(event);
            if !sheet.is_visible() {
                log::debug!("sheet on {} dismissed", window.handle);
                window.sheet = None;
                window.content.mark_dirty();
            }
            if consumed || matches!(event, Event::Key(_)) {
                return Ok(true);
            }
        }

        Ok(window.content.handle_event(event))
    }

    /// Draw the front window and its sheet
    pub fn render(&mut self) -> Result<()> {
        self.renderer.begin_frame()?;
        self.renderer.clear()?;
        self.draw_front()?;
        self.renderer.end_frame()
    }

    fn draw_front(&mut self) -> Result<()> {
        let screen = self.renderer.screen();
        let ctx = RenderContext::new(&self.theme);
        self.renderer.fill_rect(screen, &self.theme.bg(self.theme.background))?;

        let Some(window) = self.windows.last_mut() else {
            return Ok(());
        };

        let content_area = match window.spec.chrome {
            WindowChrome::Titled => {
                let (bar, body) = screen.split_horizontal(1);
                draw_title_bar(&mut self.renderer, &self.theme, bar, &window.spec.title)?;
                body
            }
            WindowChrome::Hidden => screen,
        };

        window.content.render(&mut self.renderer, content_area, &ctx)?;
        if let Some(sheet) = &mut window.sheet {
            sheet.set_position(PopupPosition::Attached(content_area));
            sheet.render(&mut self.renderer, screen, &ctx)?;
        }
        Ok(())
    }

    fn close_glyph_hit(&self, col: u16, row: u16) -> Option<WindowHandle> {
        let window = self.windows.last()?;
        let glyph_width = CLOSE_GLYPH.chars().count() as u16;
        let hit = window.spec.chrome == WindowChrome::Titled && row == 0 && col < glyph_width;
        hit.then_some(window.handle)
    }

    fn find(&self, handle: WindowHandle) -> Option<usize> {
        self.windows.iter().position(|w| w.handle == handle)
    }

    fn remove(&mut self, handle: WindowHandle) -> Option<TerminalWindow> {
        let index = self.find(handle)?;
        let mut window = self.windows.remove(index);
        window.content.on_unmount();
        if let Some(front) = self.windows.last_mut() {
            front.content.on_focus();
            front.content.mark_dirty();
        }
        Some(window)
    }

    fn user_close(&mut self, handle: WindowHandle) {
        if let Some(window) = self.remove(handle) {
            log::debug!("user closed {} '{}'", handle, window.spec.title);
            window.notifier.notify(handle);
        }
    }

    fn next_input(&mut self) -> Result<Event> {
        let timeout = self.timer.time_to_next_frame();
        let poller = self
            .poller
            .as_ref()
            .ok_or_else(|| anyhow!("terminal host has no input; cannot run a modal"))?;
        if let Some(event) = poller.poll(timeout)? {
            return Ok(event);
        }
        Ok(Event::Tick(self.timer.tick()))
    }
}

fn draw_title_bar(renderer: &mut Renderer, theme: &Theme, bar: Rect, title: &str) -> Result<()> {
    let style = format!("{}{}", theme.surface_style(), theme.heading_style());
    renderer.fill_rect(bar, &theme.surface_style())?;

    let glyph_width = CLOSE_GLYPH.chars().count() as u16;
    let close_style = format!("{}{}", theme.surface_style(), theme.caption_style());
    renderer.put_text(bar.x, bar.y, CLOSE_GLYPH, &close_style, bar.width)?;

    let len = title.chars().count() as u16;
    let x = bar.x + bar.width.saturating_sub(len) / 2;
    let x = x.max(bar.x + glyph_width);
    renderer.put_text(x, bar.y, title, &style, bar.right().saturating_sub(x))
}

impl WindowHost for TerminalHost {
    fn create_window(
        &mut self,
        spec: &WindowSpec,
        mut content: BoxedComponent,
        notifier: CloseNotifier,
    ) -> Result<WindowHandle> {
        let handle = WindowHandle::from_raw(self.next_handle);
        self.next_handle += 1;

        if let Some(front) = self.windows.last_mut() {
            front.content.on_blur();
        }
        content.on_mount();
        content.on_focus();

        log::debug!("terminal: create {} '{}'", handle, spec.title);
        self.windows.push(TerminalWindow {
            handle,
            spec: spec.clone(),
            content,
            notifier,
            sheet: None,
        });
        self.render()?;
        Ok(handle)
    }

    fn focus_window(&mut self, handle: WindowHandle) -> Result<()> {
        let index = self
            .find(handle)
            .ok_or_else(|| anyhow!("no open window {}", handle))?;
        if index + 1 != self.windows.len() {
            if let Some(front) = self.windows.last_mut() {
                front.content.on_blur();
            }
            let mut window = self.windows.remove(index);
            window.content.on_focus();
            window.content.mark_dirty();
            self.windows.push(window);
        }
        self.render()
    }

    fn close_window(&mut self, handle: WindowHandle) -> Result<()> {
        if let Some(window) = self.remove(handle) {
            window.notifier.notify(handle);
            self.render()?;
        }
        Ok(())
    }

    fn run_modal(&mut self, spec: &PanelSpec, panel: AlertPanel) -> Result<ModalOutcome> {
        let dismissed = panel.dismissed_flag();
        let (width, height) = spec.cells(&panel, &self.renderer.context().geometry);
        let mut popup = Popup::new(Box::new(panel))
            .with_size(width, height)
            .with_close_on_escape(false);
        popup.show();

        log::debug!("terminal: modal {}x{}", width, height);
        loop {
            let screen = self.renderer.screen();
            self.renderer.begin_frame()?;
            self.renderer.clear()?;
            self.draw_front()?;
            let ctx = RenderContext::new(&self.theme);
            popup.render(&mut self.renderer, screen, &ctx)?;
            self.renderer.end_frame()?;

            let event = self.next_input()?;
            if let Event::Resize(..) = event {
                self.renderer.refresh_geometry()?;
                continue;
            }
            popup.handle_event(&event);
            if dismissed.get() || !popup.is_visible() {
                break;
            }
        }

        self.render()?;
        Ok(ModalOutcome::Dismissed)
    }

    fn begin_sheet(
        &mut self,
        parent: WindowHandle,
        spec: &PanelSpec,
        panel: SheetPanel,
    ) -> Result<SheetOutcome> {
        let Some(index) = self.find(parent) else {
            return Ok(SheetOutcome::NoParent);
        };

        let (width, height) = spec.cells(&panel, &self.renderer.context().geometry);
        let mut popup = Popup::new(Box::new(panel)).with_size(width, height);
        popup.show();
        self.windows[index].sheet = Some(popup);

        self.render()?;
        Ok(SheetOutcome::Attached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::text::Text;
    use crate::terminal::TerminalCapabilities;
    use crate::window::{WindowRegistry, WindowSize};

    const SIZE: WindowSize = WindowSize {
        width: 400,
        height: 300,
    };

    fn host() -> TerminalHost {
        TerminalHost::with_renderer(
            Renderer::headless(),
            Theme::new(TerminalCapabilities::basic()),
        )
    }

    fn text(label: &'static str) -> impl FnOnce() -> BoxedComponent {
        move || -> BoxedComponent { Box::new(Text::new(label)) }
    }

    #[test]
    fn test_front_window_is_drawn() {
        let mut registry = WindowRegistry::new(host());
        registry.open("a", "Alpha", SIZE, text("first body")).unwrap();
        registry.open("b", "Beta", SIZE, text("second body")).unwrap();

        let host = registry.host_mut();
        host.renderer_mut().clear_captured();
        host.render().unwrap();
        let screen = host.renderer().captured_text();
        assert!(screen.contains("Beta"));
        assert!(screen.contains("second body"));
        assert!(!screen.contains("first body"));
    }

    #[test]
    fn test_refocus_brings_window_forward() {
        let mut registry = WindowRegistry::new(host());
        let a = registry.open("a", "Alpha", SIZE, text("a")).unwrap().handle();
        registry.open("b", "Beta", SIZE, text("b")).unwrap();
        registry.open("a", "Alpha", SIZE, text("a")).unwrap();
        assert_eq!(registry.host().front(), a);
    }

    #[test]
    fn test_ctrl_w_closes_front_window() {
        let mut registry = WindowRegistry::new(host());
        registry.open("a", "Alpha", SIZE, text("a")).unwrap();
        registry.open("b", "Beta", SIZE, text("b")).unwrap();

        assert!(registry
            .host_mut()
            .dispatch(&Event::Key(Key::Ctrl('w')))
            .unwrap());
        assert!(!registry.is_open("b"));
        assert!(registry.is_open("a"));
        assert_eq!(registry.host().window_count(), 1);
    }

    #[test]
    fn test_close_glyph_click() {
        let mut registry = WindowRegistry::new(host());
        registry.open("a", "Alpha", SIZE, text("a")).unwrap();

        let click = Event::Mouse(MouseEvent::Press(MouseButton::Left, 1, 0));
        assert!(registry.host_mut().dispatch(&click).unwrap());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_chrome_less_window_uses_full_screen() {
        let host = host();
        assert_eq!(host.content_area(WindowChrome::Hidden), Rect::new(0, 0, 80, 24));
        assert_eq!(host.content_area(WindowChrome::Titled), Rect::new(0, 1, 80, 23));
    }

    #[test]
    fn test_sheet_dismissed_with_escape() {
        let mut registry = WindowRegistry::new(host());
        let handle = registry
            .open("main", "Main", SIZE, text("body"))
            .unwrap()
            .handle()
            .unwrap();

        assert_eq!(
            registry.show_sheet(handle, text("Sheet text"), None).unwrap(),
            SheetOutcome::Attached
        );
        assert!(registry.host().has_sheet(handle));
        assert!(registry
            .host()
            .renderer()
            .captured_text()
            .contains("Sheet text"));

        registry
            .host_mut()
            .dispatch(&Event::Key(Key::Esc))
            .unwrap();
        assert!(!registry.host().has_sheet(handle));
        assert!(registry.is_open("main"));
    }

    #[test]
    fn test_modal_requires_input() {
        let mut registry = WindowRegistry::new(host());
        registry.open("a", "Alpha", SIZE, text("behind")).unwrap();
        registry.host_mut().renderer_mut().clear_captured();

        assert!(registry.show_modal(text("Saved"), None).is_err());

        // The alert is drawn over the front window before waiting for input
        let screen = registry.host().renderer().captured_text();
        assert!(screen.contains("behind"));
        assert!(screen.contains("Saved"));
        assert!(screen.contains(crate::OK_LABEL));
    }
}
