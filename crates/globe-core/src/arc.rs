//! Raised quadratic Bezier arcs between two points on the globe.
//!
//! The control point sits above the midpoint of the chord at a height that
//! grows with the chord length, so long hops arc higher than short ones. Very
//! short hops may dip towards the surface; the curve is not
//! clamped against the sphere.

use crate::constants::{
    ARC_MAX_HEIGHT, ARC_MIN_HEIGHT, ARC_REFERENCE_DISTANCE, ARC_SEGMENTS, TANGENT_EPSILON,
};
use glam::Vec3;

/// Height factor (multiplied by the radius) for a chord of length `distance`.
#[inline]
pub fn arc_height(distance: f32) -> f32 {
    let normalized = (distance / ARC_REFERENCE_DISTANCE).min(1.0);
    ARC_MIN_HEIGHT + normalized * (ARC_MAX_HEIGHT - ARC_MIN_HEIGHT)
}

/// Standard quadratic Bezier evaluation over `(p0, p1, p2)`.
#[inline]
pub fn quadratic_bezier(t: f32, p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArcCurve {
    pub start: Vec3,
    pub end: Vec3,
    pub control: Vec3,
    pub height: f32,
}

impl ArcCurve {
    pub fn build(start: Vec3, end: Vec3, radius: f32) -> Self {
        let distance = start.distance(end);
        let height = arc_height(distance);
        let mid = (start + end) * 0.5;
        // Antipodal endpoints have no midpoint direction; lift along a fixed orthogonal instead.
        let up = mid.try_normalize().unwrap_or_else(|| {
            start
                .try_normalize()
                .map(|s| s.any_orthonormal_vector())
                .unwrap_or(Vec3::Y)
        });
        let control = up * (radius * height);
        Self {
            start,
            end,
            control,
            height,
        }
    }

    #[inline]
    pub fn sample(&self, t: f32) -> Vec3 {
        quadratic_bezier(t, self.start, self.control, self.end)
    }

    /// Exact derivative of the curve with respect to `t`.
    #[inline]
    pub fn derivative(&self, t: f32) -> Vec3 {
        (self.control - self.start) * (2.0 * (1.0 - t)) + (self.end - self.control) * (2.0 * t)
    }

    /// Unit direction of travel at `t`, from a forward finite difference.
    ///
    /// Falls back to the exact derivative, then to the start's outward
    /// direction, when the difference vanishes (coincident endpoints).
    pub fn tangent(&self, t: f32) -> Vec3 {
        let forward = self.sample(t + TANGENT_EPSILON) - self.sample(t);
        forward
            .try_normalize()
            .or_else(|| self.derivative(t).try_normalize())
            .or_else(|| self.start.try_normalize())
            .unwrap_or(Vec3::Y)
    }

    /// The visible path: `ARC_SEGMENTS + 1` evenly spaced samples including both ends.
    pub fn polyline(&self) -> Vec<Vec3> {
        (0..=ARC_SEGMENTS)
            .map(|i| self.sample(i as f32 / ARC_SEGMENTS as f32))
            .collect()
    }
}
