//! Canvas sizing and the curve-to-canvas transform.

use kurbo::{Affine, Point};

use crate::consts::{CANVAS_VIEWPORT_FRACTION, CURVE_REACH, SCALE_FRACTION};

/// Geometry of one frame, derived from the viewport.
///
/// `size`, `center` and `scale` are in CSS pixels; `backing` is the edge of
/// the canvas backing store in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLayout {
    pub size: f64,
    pub dpr: f64,
    pub backing: u32,
    pub center: Point,
    pub scale: f64,
}

impl FrameLayout {
    #[must_use]
    pub fn new(viewport_w: f64, viewport_h: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 {
            dpr
        } else {
            1.0
        };
        let size = (viewport_w.min(viewport_h) * CANVAS_VIEWPORT_FRACTION).max(0.0);
        let size = if size.is_finite() { size } else { 0.0 };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let backing = (size * dpr).floor() as u32;
        let half = size / 2.0;
        Self {
            size,
            dpr,
            backing,
            center: Point::new(half, half),
            scale: half * SCALE_FRACTION,
        }
    }

    /// Maps curve units onto CSS pixels around the canvas center.
    #[must_use]
    pub fn curve_to_canvas(&self) -> Affine {
        Affine::translate(self.center.to_vec2()) * Affine::scale(self.scale)
    }

    /// Radius of the disk the curve can reach, in CSS pixels.
    #[must_use]
    pub fn reach_radius(&self) -> f64 {
        CURVE_REACH * self.scale
    }

    /// Whether a canvas with the given backing size must be resized.
    #[must_use]
    pub fn needs_resize(&self, width: u32, height: u32) -> bool {
        width != self.backing || height != self.backing
    }

    /// Whether a canvas last styled at `css_size` needs its CSS box updated.
    ///
    /// Independent of [`needs_resize`](Self::needs_resize): browser zoom can
    /// halve the CSS size and double the pixel ratio, leaving the backing
    /// store as it was.
    #[must_use]
    pub fn needs_restyle(&self, css_size: Option<f64>) -> bool {
        css_size.map_or(true, |applied| (applied - self.size).abs() > 1e-6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve;

    #[test]
    fn square_canvas_from_smaller_dimension() {
        let layout = FrameLayout::new(1600.0, 1000.0, 1.0);
        assert!((layout.size - 850.0).abs() < 1e-9);
        assert_eq!(layout.backing, 850);
        assert_eq!(layout.center, Point::new(425.0, 425.0));
        assert!((layout.scale - 425.0 * 0.45).abs() < 1e-9);
    }

    #[test]
    fn backing_store_uses_device_pixels() {
        let layout = FrameLayout::new(800.0, 1200.0, 2.0);
        assert_eq!(layout.backing, 1360);
        assert!((layout.size - 680.0).abs() < 1e-9);
    }

    #[test]
    fn bad_pixel_ratio_falls_back_to_one() {
        for dpr in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let layout = FrameLayout::new(1000.0, 1000.0, dpr);
            assert_eq!(layout.dpr, 1.0);
            assert_eq!(layout.backing, 850);
        }
    }

    #[test]
    fn curve_fits_inside_ninety_percent() {
        let layout = FrameLayout::new(1000.0, 1000.0, 1.0);
        assert!(layout.reach_radius() <= layout.size / 2.0 * 0.9 + 1e-9);
    }

    #[test]
    fn start_point_maps_right_of_center() {
        let layout = FrameLayout::new(1000.0, 1000.0, 1.5);
        let start = layout.curve_to_canvas() * curve::START;
        let expected = Point::new(layout.center.x + 2.0 * layout.scale, layout.center.y);
        assert!(start.distance(expected) < 1e-9);
        let arm = curve::arm_at(0.0);
        let to_canvas = layout.curve_to_canvas();
        assert!((to_canvas * arm.joint).distance(expected) > 1.0);
        assert!((to_canvas * arm.pen).distance(expected) < 1e-9);
        assert_eq!(to_canvas * arm.origin, layout.center);
    }

    #[test]
    fn resize_only_when_backing_changes() {
        let layout = FrameLayout::new(1000.0, 1000.0, 2.0);
        assert!(!layout.needs_resize(1700, 1700));
        assert!(layout.needs_resize(1700, 1699));
        assert!(layout.needs_resize(300, 150));
    }

    #[test]
    fn zoom_restyles_without_resizing() {
        let before = FrameLayout::new(1000.0, 1000.0, 1.0);
        let zoomed = FrameLayout::new(500.0, 500.0, 2.0);
        assert_eq!(before.backing, zoomed.backing);
        assert!(!zoomed.needs_resize(before.backing, before.backing));
        assert!(zoomed.needs_restyle(Some(before.size)));
        assert!(!zoomed.needs_restyle(Some(zoomed.size)));
    }

    #[test]
    fn unstyled_canvas_needs_restyle() {
        let layout = FrameLayout::new(1000.0, 1000.0, 1.0);
        assert!(layout.needs_restyle(None));
    }
}
