//! Vertical scroll state for text views
//!
//! Tracks the offset of a viewport over taller content and keeps it inside
//! `0..=content_height - viewport_height`. Nothing is rendered here; views
//! such as `RichTextView` ask for the visible range and the scrollbar thumb.

use std::ops::Range;

/// Vertical viewport over line-based content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollableView {
    content_height: usize,
    viewport_height: usize,
    offset: usize,
}

impl ScrollableView {
    pub fn new(content_height: usize, viewport_height: usize) -> Self {
        ScrollableView {
            content_height,
            viewport_height,
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Largest valid offset
    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Whether the content overflows the viewport
    pub fn can_scroll(&self) -> bool {
        self.content_height > self.viewport_height
    }

    /// Update content height, keeping the offset valid
    pub fn set_content_height(&mut self, height: usize) {
        self.content_height = height;
        self.clamp();
    }

    /// Update viewport height, keeping the offset valid
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.clamp();
    }

    pub fn scroll_to(&mut self, offset: usize) {
        self.offset = offset;
        self.clamp();
    }

    /// Scroll by a signed number of lines
    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.clamp();
    }

    pub fn line_up(&mut self) {
        self.scroll_by(-1);
    }

    pub fn line_down(&mut self) {
        self.scroll_by(1);
    }

    /// Scroll up one page, keeping one line of overlap
    pub fn page_up(&mut self) {
        let page = self.viewport_height.saturating_sub(1).max(1);
        self.scroll_by(-(page as isize));
    }

    /// Scroll down one page, keeping one line of overlap
    pub fn page_down(&mut self) {
        let page = self.viewport_height.saturating_sub(1).max(1);
        self.scroll_by(page as isize);
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Content lines currently inside the viewport
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.viewport_height).min(self.content_height);
        self.offset..end
    }

    /// Scrollbar thumb as (start, length) within a track of `track_len` cells
    ///
    /// Returns None when everything fits.
    pub fn thumb(&self, track_len: u16) -> Option<(u16, u16)> {
        if !self.can_scroll() || track_len == 0 {
            return None;
        }

        let track = track_len as usize;
        let len = (track * self.viewport_height / self.content_height).clamp(1, track);
        let travel = track - len;
        let start = (travel * self.offset + self.max_offset() / 2) / self.max_offset();
        Some((start as u16, len as u16))
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_clamped() {
        let mut scroll = ScrollableView::new(100, 20);
        scroll.scroll_to(500);
        assert_eq!(scroll.offset(), 80);

        scroll.scroll_by(-200);
        assert_eq!(scroll.offset(), 0);

        scroll.scroll_by(5);
        assert_eq!(scroll.visible_range(), 5..25);
    }

    #[test]
    fn test_content_that_fits_does_not_scroll() {
        let mut scroll = ScrollableView::new(10, 20);
        scroll.line_down();
        assert_eq!(scroll.offset(), 0);
        assert!(!scroll.can_scroll());
        assert_eq!(scroll.thumb(20), None);
        assert_eq!(scroll.visible_range(), 0..10);
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut scroll = ScrollableView::new(100, 20);
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 80);

        scroll.set_content_height(30);
        assert_eq!(scroll.offset(), 10);

        scroll.set_viewport_height(40);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_page_navigation() {
        let mut scroll = ScrollableView::new(200, 24);
        scroll.page_down();
        assert_eq!(scroll.offset(), 23);
        scroll.page_down();
        assert_eq!(scroll.offset(), 46);
        scroll.page_up();
        assert_eq!(scroll.offset(), 23);
        scroll.scroll_to_top();
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_thumb_position() {
        let mut scroll = ScrollableView::new(200, 50);
        assert_eq!(scroll.thumb(20), Some((0, 5)));

        scroll.scroll_to_bottom();
        assert_eq!(scroll.thumb(20), Some((15, 5)));
    }
}
