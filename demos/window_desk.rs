//! window_desk - a few identifier-tracked windows inside the terminal
//!
//! F1 about, F2 gallery, F3 tools, m alert, s sheet on the about window,
//! Ctrl-w closes the front window, q quits.

use anyhow::Result;
use widgetkit::{
    components::rich_text::{AttributedText, RichTextView, TextAttributes},
    components::{IconButton, SlideShow, Text},
    event::{Event, Key},
    window::{TerminalHost, WindowRegistry, WindowSize},
    BoxedComponent,
};

const WINDOW_SIZE: WindowSize = WindowSize {
    width: 640,
    height: 480,
};

fn about() -> BoxedComponent {
    let text = AttributedText::new()
        .push_styled("widgetkit", TextAttributes::bold())
        .push(" demo desk.\n\n")
        .push("Each function key opens one window. Pressing it again brings the ")
        .push("same window back to the front instead of opening another.\n\n")
        .push_styled("Ctrl-w", TextAttributes::italic())
        .push(" closes the window in front.");
    Box::new(RichTextView::new(text))
}

fn gallery() -> BoxedComponent {
    let slides: Vec<BoxedComponent> = ["First slide", "Second slide", "Third slide"]
        .into_iter()
        .map(|label| Box::new(Text::new(label)) as BoxedComponent)
        .collect();
    Box::new(SlideShow::new(slides))
}

fn tools() -> BoxedComponent {
    Box::new(IconButton::new("Refresh", "⟳", || log::info!("refresh pressed")).selected(true))
}

fn main() -> Result<()> {
    let mut registry = WindowRegistry::new(TerminalHost::new()?);
    registry.open("about", "About", WINDOW_SIZE, about)?;

    loop {
        let Some(event) = registry.host_mut().pump()? else {
            registry.process_close_events();
            continue;
        };

        match event {
            Event::Key(Key::Char('q')) | Event::Key(Key::Ctrl('c')) => break,
            Event::Key(Key::F(1)) => {
                registry.open("about", "About", WINDOW_SIZE, about)?;
            }
            Event::Key(Key::F(2)) => {
                registry.open("gallery", "Gallery", WINDOW_SIZE, gallery)?;
            }
            Event::Key(Key::F(3)) => {
                registry.open("tools", "", WINDOW_SIZE, tools)?;
            }
            Event::Key(Key::Char('m')) => {
                let open = registry.len();
                registry.show_modal(
                    move || -> BoxedComponent {
                        Box::new(Text::new(format!("{} window(s) open", open)))
                    },
                    None,
                )?;
            }
            Event::Key(Key::Char('s')) => {
                registry.show_sheet_for(
                    "about",
                    || -> BoxedComponent { Box::new(Text::new("Attached to About")) },
                    None,
                )?;
            }
            _ => {}
        }
        registry.process_close_events();
    }

    Ok(())
}
