//! The traced curve `z(t) = e^(it) + e^(iπt)`.
//!
//! Everything here is in curve units: each arm has length 1, so the pen never
//! leaves the disk of radius [`CURVE_REACH`]. [`crate::layout::FrameLayout`]
//! maps these points onto the canvas.
//!
//! The two arms turn at rates 1 and π. Because π is irrational the pen never
//! returns to an earlier position, which is what lets a fixed angular step
//! fill the disk without periodic banding.

use kurbo::{Point, Vec2};

use crate::consts::{
    CURVE_REACH, GLYPH_FADE_EXPONENT, GLYPH_FADE_RATE, GLYPH_VISIBLE_THRESHOLD, SECOND_ARM_RATE,
    THETA_STEP,
};
use crate::progress::Progress;

/// The two-link arm at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arm {
    /// Fixed hub of the first arm.
    pub origin: Point,
    /// Tip of the first arm, where the second one is mounted.
    pub joint: Point,
    /// Tip of the second arm: the current point of the curve.
    pub pen: Point,
}

/// Arm configuration at parameter `theta`.
#[must_use]
pub fn arm_at(theta: f64) -> Arm {
    let origin = Point::ORIGIN;
    let joint = origin + Vec2::from_angle(theta);
    let pen = joint + Vec2::from_angle(SECOND_ARM_RATE * theta);
    Arm { origin, joint, pen }
}

/// Curve point at parameter `theta`.
#[must_use]
pub fn point_at(theta: f64) -> Point {
    arm_at(theta).pen
}

/// Where the curve starts: both arms pointing along +x.
pub const START: Point = Point::new(CURVE_REACH, 0.0);

/// Vertices of the polyline traced up to `theta`.
///
/// Yields the start point, then one vertex every [`THETA_STEP`] radians, then
/// the exact point at `theta` so the stroke always ends under the pen. Empty
/// when `theta` is not positive.
pub fn trace(theta: f64) -> impl Iterator<Item = Point> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (theta > 0.0).then(|| (theta / THETA_STEP).floor() as u64);
    steps.into_iter().flat_map(move |steps| {
        (0..=steps)
            .map(|i| point_at(i as f64 * THETA_STEP))
            .chain(std::iter::once(point_at(theta)))
    })
}

/// Number of vertices [`trace`] yields for `theta`.
#[must_use]
pub fn trace_len(theta: f64) -> usize {
    if theta > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (theta / THETA_STEP).floor() as usize;
        steps + 2
    } else {
        0
    }
}

/// Opacity of the centred π glyph: 1 at the top of the page, gone by
/// `progress = 1/12`.
#[must_use]
pub fn glyph_opacity(progress: Progress) -> f64 {
    let fade = (GLYPH_FADE_RATE * progress.value()).powf(GLYPH_FADE_EXPONENT);
    (1.0 - fade).max(0.0)
}

#[must_use]
pub fn glyph_visible(progress: Progress) -> bool {
    glyph_opacity(progress) > GLYPH_VISIBLE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn arm_starts_folded_out_along_x() {
        let arm = arm_at(0.0);
        assert_eq!(arm.origin, Point::ORIGIN);
        assert!(close(arm.joint, Point::new(1.0, 0.0)));
        assert!(close(arm.pen, START));
    }

    #[test]
    fn arm_links_have_unit_length() {
        for theta in [0.4, 3.0, 17.25, 1000.0] {
            let arm = arm_at(theta);
            assert!((arm.origin.distance(arm.joint) - 1.0).abs() < 1e-9);
            assert!((arm.joint.distance(arm.pen) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn second_arm_turns_pi_times_faster() {
        // At t = 1 the first arm has turned 1 rad, the second π rad.
        let arm = arm_at(1.0);
        let second = arm.pen - arm.joint;
        assert!((second.x - (-1.0)).abs() < 1e-9);
        assert!(second.y.abs() < 1e-9);
    }

    #[test]
    fn empty_trace_at_zero() {
        assert_eq!(trace(0.0).count(), 0);
        assert_eq!(trace(-1.0).count(), 0);
        assert_eq!(trace_len(0.0), 0);
    }

    #[test]
    fn tiny_theta_draws_start_and_tip() {
        let pts: Vec<_> = trace(0.01).collect();
        assert_eq!(pts.len(), 2);
        assert!(close(pts[0], START));
        assert!(close(pts[1], point_at(0.01)));
    }

    #[test]
    fn trace_ends_exactly_at_pen() {
        let theta = 12.345;
        let pts: Vec<_> = trace(theta).collect();
        assert_eq!(pts.len(), trace_len(theta));
        assert!(close(pts[0], START));
        assert!(close(*pts.last().unwrap(), arm_at(theta).pen));
        // Second-to-last vertex is the last whole step.
        let whole = (theta / THETA_STEP).floor() * THETA_STEP;
        assert!(close(pts[pts.len() - 2], point_at(whole)));
    }

    #[test]
    fn glyph_fades_out() {
        assert_eq!(glyph_opacity(Progress::START), 1.0);
        assert!(glyph_visible(Progress::START));
        let mid = glyph_opacity(Progress::new(0.04));
        assert!(mid > 0.0 && mid < 1.0);
        assert!(glyph_opacity(Progress::new(1.0 / 12.0)) < 1e-12);
        assert_eq!(glyph_opacity(Progress::new(0.139)), 0.0);
        assert_eq!(glyph_opacity(Progress::END), 0.0);
        assert!(glyph_visible(Progress::new(0.08)));
        assert!(!glyph_visible(Progress::new(0.083)));
    }

    #[test]
    fn glyph_fade_is_monotonic() {
        let mut last = f64::INFINITY;
        for i in 0..=200 {
            let o = glyph_opacity(Progress::new(f64::from(i) / 1000.0));
            assert!(o <= last);
            last = o;
        }
    }
}
