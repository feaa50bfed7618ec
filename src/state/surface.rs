// Narrow capability surface over the scrollable element so the overscroll
// state machine can run headless (and against a test double).

/// Anchor edge for the vertical stretch transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pivot {
    Top,
    Bottom,
}

/// Visual vertical stretch applied to the scroller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stretch {
    pub scale: f64,
    pub pivot: Pivot,
}

impl Stretch {
    pub const NEUTRAL: Stretch = Stretch {
        scale: 1.0,
        pivot: Pivot::Top,
    };

    pub fn is_neutral(&self) -> bool {
        self.scale <= 1.0
    }
}

impl Default for Stretch {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// One reading of the scroller's geometry, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_offset: f64,
    pub viewport_height: f64,
    /// Layout height of the content, before any visual scaling.
    pub content_height: f64,
    /// Visual scale the host applies to the content (page zoom).
    pub content_scale: f64,
}

impl ScrollMetrics {
    /// A reading that cannot be trusted must read as "not at a boundary".
    pub fn is_valid(&self) -> bool {
        self.scroll_offset.is_finite()
            && self.viewport_height.is_finite()
            && self.content_height.is_finite()
            && self.content_scale.is_finite()
            && self.viewport_height > 0.0
            && self.content_scale > 0.0
    }

    pub fn at_top(&self) -> bool {
        self.scroll_offset <= 0.0
    }

    pub fn at_bottom(&self) -> bool {
        self.scroll_offset + self.viewport_height >= self.content_height * self.content_scale
    }
}

pub trait ScrollSurface {
    /// Fresh geometry, or `None` when the scroller cannot be measured.
    fn metrics(&self) -> Option<ScrollMetrics>;
    /// Stretch currently applied to the scroller.
    fn stretch(&self) -> Stretch;
    fn set_stretch(&self, stretch: Stretch);
}
