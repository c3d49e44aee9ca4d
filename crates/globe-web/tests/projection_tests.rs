// Host-side tests for the canvas projection helpers.
// The crate itself is wasm-only, so the pure module is included directly.

#![allow(dead_code)]
mod projection {
    include!("../src/projection.rs");
}

use glam::Vec3;
use globe_core::Camera;
use projection::*;

#[test]
fn target_projects_to_canvas_centre() {
    let camera = Camera::default();
    let p = world_to_screen(camera.view_proj(), camera.eye, Vec3::ZERO, 800.0, 600.0).unwrap();
    assert!((p.x - 400.0).abs() < 1e-3);
    assert!((p.y - 300.0).abs() < 1e-3);
    assert!((p.distance - camera.eye.length()).abs() < 1e-5);
}

#[test]
fn up_is_up_on_screen() {
    let camera = Camera::default();
    let p = world_to_screen(camera.view_proj(), camera.eye, Vec3::Y, 800.0, 800.0).unwrap();
    assert!(p.y < 400.0);
    let p = world_to_screen(camera.view_proj(), camera.eye, Vec3::X, 800.0, 800.0).unwrap();
    assert!(p.x > 400.0);
}

#[test]
fn points_behind_the_camera_are_dropped() {
    let camera = Camera::default();
    let behind = camera.eye + Vec3::Z;
    assert!(world_to_screen(camera.view_proj(), camera.eye, behind, 800.0, 600.0).is_none());
}

#[test]
fn unit_globe_fills_the_expected_height() {
    let camera = Camera::default();
    let r = projected_radius_px(2.0, 5.0, camera.fovy_radians, 1000.0);
    // tan(15 deg) * 5 is the half height of the view at the globe's distance.
    let expected = 1.0 / (5.0 * (15.0f32).to_radians().tan()) * 500.0;
    assert!((r - expected).abs() < 1e-2);
    assert!(projected_radius_px(2.0, 10.0, camera.fovy_radians, 1000.0) < r);
}

#[test]
fn painter_order_is_far_to_near() {
    let mut order = Vec::new();
    back_to_front(&[1.0, 3.0, 2.0], &mut order);
    assert_eq!(order, vec![1, 2, 0]);
    back_to_front(&[], &mut order);
    assert!(order.is_empty());
}

#[test]
fn css_colour_is_clamped() {
    assert_eq!(css_rgba([1.0, 0.0, 0.5, 0.8]), "rgba(255,0,128,0.800)");
    assert_eq!(css_rgba([2.0, -1.0, 0.0, 3.0]), "rgba(255,0,0,1.000)");
}
