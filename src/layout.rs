//! Layout system - rectangles and flex-based stacking

/// Rectangle bounds in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle filling the whole terminal
    pub fn fullscreen(cols: u16, rows: u16) -> Self {
        Rect::new(0, 0, cols, rows)
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if point is inside rectangle
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by the same padding on every side
    pub fn inner(&self, padding: u16) -> Self {
        self.inset(padding, padding)
    }

    /// Shrink by separate horizontal and vertical insets
    pub fn inset(&self, horizontal: u16, vertical: u16) -> Self {
        Rect {
            x: self.x.saturating_add(horizontal),
            y: self.y.saturating_add(vertical),
            width: self.width.saturating_sub(horizontal.saturating_mul(2)),
            height: self.height.saturating_sub(vertical.saturating_mul(2)),
        }
    }

    /// Overlapping area of two rectangles (empty if disjoint)
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    /// Rectangle of the given size centred inside this one, clamped to fit
    pub fn centered(&self, width: u16, height: u16) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }

    /// Split horizontally into top and bottom
    pub fn split_horizontal(&self, top_height: u16) -> (Rect, Rect) {
        let top_height = top_height.min(self.height);
        let top = Rect::new(self.x, self.y, self.width, top_height);
        let bottom = Rect::new(
            self.x,
            self.y.saturating_add(top_height),
            self.width,
            self.height - top_height,
        );
        (top, bottom)
    }
}

/// Flex direction for container layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

/// Size constraint for flex children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    /// Fixed size in cells
    Fixed(u16),
    /// Proportional size (flex grow factor)
    Flex(u16),
}

/// Flex container layout calculator
#[derive(Debug, Clone)]
pub struct FlexLayout {
    direction: FlexDirection,
    gap: u16,
    padding: u16,
}

impl FlexLayout {
    pub fn new(direction: FlexDirection) -> Self {
        FlexLayout {
            direction,
            gap: 0,
            padding: 0,
        }
    }

    /// Vertical stack
    pub fn column() -> Self {
        Self::new(FlexDirection::Column)
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    /// Calculate child rectangles for given container and sizes
    pub fn layout(&self, container: Rect, sizes: &[Size]) -> Vec<Rect> {
        if sizes.is_empty() {
            return Vec::new();
        }

        let inner = container.inner(self.padding);
        let flex_unit = self.flex_unit_size(&inner, sizes);

        let mut rects = Vec::with_capacity(sizes.len());
        let mut offset = 0u16;

        for size in sizes {
            let main = match size {
                Size::Fixed(s) => *s,
                Size::Flex(f) => flex_unit.saturating_mul(*f),
            };

            let rect = match self.direction {
                FlexDirection::Row => {
                    Rect::new(inner.x.saturating_add(offset), inner.y, main, inner.height)
                }
                FlexDirection::Column => {
                    Rect::new(inner.x, inner.y.saturating_add(offset), inner.width, main)
                }
            };
            rects.push(rect);
            offset = offset.saturating_add(main).saturating_add(self.gap);
        }

        rects
    }

    fn flex_unit_size(&self, inner: &Rect, sizes: &[Size]) -> u16 {
        let main_size = match self.direction {
            FlexDirection::Row => inner.width,
            FlexDirection::Column => inner.height,
        };

        let total_gap = self
            .gap
            .saturating_mul(sizes.len().saturating_sub(1) as u16);
        let available = main_size.saturating_sub(total_gap);

        let (fixed, units) = sizes
            .iter()
            .fold((0u16, 0u16), |(fixed, units), size| match size {
                Size::Fixed(s) => (fixed.saturating_add(*s), units),
                Size::Flex(f) => (fixed, units.saturating_add(*f)),
            });

        if units == 0 {
            0
        } else {
            available.saturating_sub(fixed) / units
        }
    }
}
