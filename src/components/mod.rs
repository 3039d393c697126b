//! Built-in UI components

pub mod alert;
pub mod icon_button;
pub mod image;
pub mod large_button;
pub mod popup;
pub mod rich_text;
pub mod scrollable;
pub mod slideshow;
pub mod stacked_images;
pub mod text;

pub use alert::{AlertPanel, SheetPanel};
pub use icon_button::IconButton;
pub use image::{ContentMode, Image, ImageData};
pub use large_button::{ButtonShortcut, LargeButton};
pub use popup::{Popup, PopupPosition, PopupResult};
pub use rich_text::{AttributedText, RichTextView, TextAttributes, TextRun};
pub use scrollable::ScrollableView;
pub use slideshow::{SlideDirection, SlideShow};
pub use stacked_images::StackedImageView;
pub use text::{Text, TextAlign};
