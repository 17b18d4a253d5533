//! Scroll position to animation progress.

use crate::consts::{HINT_FADE_RATE, MAX_THETA};

/// Fraction of the scroll range consumed, always in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Progress {
    pub const START: Self = Self(0.0);
    pub const END: Self = Self(1.0);

    /// Clamp `raw` into `[0, 1]`. NaN maps to the start.
    #[must_use]
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::START;
        }
        Self(raw.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Curve parameter reached at this progress.
    #[must_use]
    pub fn theta(self) -> f64 {
        self.0 * MAX_THETA
    }

    /// Opacity of the "scroll to trace" caption.
    #[must_use]
    pub fn hint_opacity(self) -> f64 {
        (1.0 - self.0 * HINT_FADE_RATE).max(0.0)
    }
}

/// One reading of the page's vertical scroll geometry, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    /// Pixels the page can scroll before reaching the bottom.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        self.document_height - self.viewport_height
    }

    /// A page with nothing to scroll counts as fully traced.
    #[must_use]
    pub fn progress(&self) -> Progress {
        let max_scroll = self.max_scroll();
        if max_scroll <= 0.0 || max_scroll.is_nan() {
            return Progress::END;
        }
        Progress::new(self.scroll_y / max_scroll)
    }
}
