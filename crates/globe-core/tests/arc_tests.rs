// Integration tests for the raised quadratic Bezier arcs.

use globe_core::*;
use glam::Vec3;

const EPS: f32 = 1e-5;

fn surface(lat: f64, lon: f64) -> Vec3 {
    project(lat, lon, SPHERE_RADIUS)
}

#[test]
fn curve_starts_and_ends_exactly_at_the_endpoints() {
    let start = surface(27.677807, 74.006751);
    let end = surface(-23.381195, 135.039595);
    let arc = ArcCurve::build(start, end, SPHERE_RADIUS);
    assert_eq!(arc.sample(0.0), start);
    assert_eq!(arc.sample(1.0), end);
}

#[test]
fn control_point_sits_at_radius_times_height() {
    let start = surface(14.3545, 120.5838);
    let end = surface(-23.381195, 135.039595);
    let arc = ArcCurve::build(start, end, SPHERE_RADIUS);
    let expected = arc_height(start.distance(end));
    assert!((arc.height - expected).abs() < EPS);
    assert!((arc.control.length() - SPHERE_RADIUS * expected).abs() < 1e-4);
    // Pushed out along the chord midpoint direction
    let mid_dir = ((start + end) * 0.5).normalize();
    assert!(arc.control.normalize().dot(mid_dir) > 0.9999);
}

#[test]
fn height_grows_with_distance_and_saturates() {
    let mut prev = arc_height(0.0);
    assert!((prev - ARC_MIN_HEIGHT).abs() < EPS);
    for i in 1..=160 {
        let h = arc_height(i as f32 * 0.5);
        assert!(h >= prev, "height decreased at d={}", i as f32 * 0.5);
        prev = h;
    }
    assert!((arc_height(ARC_REFERENCE_DISTANCE) - ARC_MAX_HEIGHT).abs() < EPS);
    assert!((arc_height(500.0) - ARC_MAX_HEIGHT).abs() < EPS);
}

#[test]
fn unit_globe_hops_stay_near_the_minimum_height() {
    // Chords on a unit sphere never exceed 2, far below the reference distance.
    let a = surface(0.0, 0.0);
    let b = surface(0.0, 180.0);
    let h = arc_height(a.distance(b));
    assert!(h > ARC_MIN_HEIGHT && h < ARC_MIN_HEIGHT + 0.03);
}

#[test]
fn polyline_has_101_points_matching_samples() {
    let start = surface(27.677807, 74.006751);
    let end = surface(-23.381195, 135.039595);
    let arc = ArcCurve::build(start, end, SPHERE_RADIUS);
    let line = arc.polyline();
    assert_eq!(line.len(), ARC_SEGMENTS + 1);
    assert_eq!(line[0], start);
    assert_eq!(line[ARC_SEGMENTS], end);
    for (i, p) in line.iter().enumerate() {
        assert!((arc.sample(i as f32 / 100.0) - *p).length() < EPS);
    }
}

#[test]
fn tangent_is_unit_and_follows_the_derivative() {
    let start = surface(27.677807, 74.006751);
    let end = surface(-23.381195, 135.039595);
    let arc = ArcCurve::build(start, end, SPHERE_RADIUS);
    for i in 0..=20 {
        let t = i as f32 / 20.0;
        let tangent = arc.tangent(t);
        assert!((tangent.length() - 1.0).abs() < 1e-4);
        let exact = arc.derivative(t).normalize();
        assert!(tangent.dot(exact) > 0.99, "t={t} dot={}", tangent.dot(exact));
    }
}

#[test]
fn coincident_endpoints_fall_back_to_a_finite_tangent() {
    let p = surface(10.0, 20.0);
    let arc = ArcCurve::build(p, p, SPHERE_RADIUS);
    assert_eq!(arc.sample(0.0), p);
    assert_eq!(arc.sample(1.0), p);
    for t in [0.0, 0.5, 1.0] {
        let tangent = arc.tangent(t);
        assert!(tangent.is_finite());
        assert!((tangent.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn antipodal_endpoints_still_get_a_raised_control_point() {
    let a = Vec3::new(1.0, 0.0, 0.0);
    let arc = ArcCurve::build(a, -a, SPHERE_RADIUS);
    assert!(arc.control.is_finite());
    assert!((arc.control.length() - arc.height).abs() < 1e-4);
    assert!(arc.control.dot(a).abs() < 1e-4);
}
