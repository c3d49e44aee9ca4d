// Host-side tests for building the billboard instance list.
// The binary has no library target, so the pure module is included directly.

#![allow(dead_code)]
#[path = "../src/instances.rs"]
mod instances;

use glam::Vec3;
use globe_core::*;
use instances::*;

fn line(points: Vec<Vec3>, visible: Vec<bool>) -> LinePath {
    LinePath {
        points,
        visible,
        color: [1.0, 0.5, 0.2, 0.8],
        width_px: 2.0,
    }
}

fn view() -> View {
    View {
        eye: Vec3::new(0.0, 0.0, 5.0),
        fovy_radians: 45f32.to_radians(),
        height_px: 800.0,
    }
}

#[test]
fn dots_cover_visible_segments_only() {
    let mut out = Vec::new();
    let l = line(
        vec![Vec3::ZERO, Vec3::new(0.06, 0.0, 0.0), Vec3::new(0.12, 0.0, 0.0)],
        vec![true, true, false],
    );
    line_dots(&l, &view(), &mut out);
    assert!(!out.is_empty());
    // Last point hidden, so nothing past the first segment.
    assert!(out.iter().all(|b| b.pos[0] < 0.06 + 1e-6));
    assert!(out.iter().all(|b| b.color == l.color));
}

#[test]
fn dots_are_as_wide_on_screen_as_the_line() {
    let v = view();
    let mut out = Vec::new();
    let l = line(vec![Vec3::ZERO, Vec3::new(0.05, 0.0, 0.0)], vec![true, true]);
    line_dots(&l, &v, &mut out);

    let first = &out[0];
    let distance = (Vec3::from(first.pos) - v.eye).length();
    let expected = 2.0 * distance * (v.fovy_radians / 2.0).tan() / v.height_px * l.width_px;
    assert!((first.size - expected).abs() < 1e-7);

    // Consecutive dots overlap, so the stroke has no gaps.
    for pair in out.windows(2) {
        let gap = (Vec3::from(pair[1].pos) - Vec3::from(pair[0].pos)).length();
        assert!(gap <= pair[0].size.min(pair[1].size));
    }
}

#[test]
fn wider_lines_and_farther_points_get_larger_dots() {
    let v = view();
    let near = v.dot_size(Vec3::new(0.0, 0.0, 1.0), 2.0);
    let far = v.dot_size(Vec3::new(0.0, 0.0, -1.0), 2.0);
    assert!(far > near);
    let wide = v.dot_size(Vec3::new(0.0, 0.0, 1.0), 4.0);
    assert!((wide - 2.0 * near).abs() < 1e-7);
    // A taller viewport shrinks the world size of one pixel.
    let tall = View {
        height_px: 1600.0,
        ..v
    };
    assert!((tall.world_per_pixel(4.0) * 2.0 - v.world_per_pixel(4.0)).abs() < 1e-7);
}

#[test]
fn fully_visible_line_ends_on_its_last_point() {
    let mut out = Vec::new();
    let end = Vec3::new(0.0, 0.03, 0.0);
    line_dots(&line(vec![Vec3::ZERO, end], vec![true, true]), &view(), &mut out);
    assert_eq!(out.last().unwrap().pos, end.to_array());
}

#[test]
fn sphere_is_drawn_first_then_far_to_near() {
    let mut frame = FrameGeometry::default();
    frame.sphere = Some(Billboard {
        pos: [0.0; 3],
        size: 2.0,
        color: [1.0; 4],
    });
    for z in [1.0, -0.5, 0.5] {
        frame.billboards.push(Billboard {
            pos: [0.0, 1.2, z],
            size: 0.02,
            color: [1.0; 4],
        });
    }
    let mut out = Vec::new();
    let dropped = build_instances(&frame, &view(), &Lights::default(), &mut out);

    assert_eq!(dropped, 0);
    assert_eq!(out.len(), 4);
    assert_eq!(out[0].size, 2.0);
    let zs: Vec<f32> = out[1..].iter().map(|b| b.pos[2]).collect();
    assert_eq!(zs, vec![-0.5, 0.5, 1.0]);
}

#[test]
fn over_budget_keeps_the_nearest() {
    let mut frame = FrameGeometry::default();
    for i in 0..MAX_INSTANCES + 10 {
        frame.billboards.push(Billboard {
            pos: [0.0, 0.0, -(i as f32)],
            size: 0.01,
            color: [1.0; 4],
        });
    }
    let mut out = Vec::new();
    let dropped = build_instances(&frame, &view(), &Lights::default(), &mut out);
    assert_eq!(dropped, 10);
    assert_eq!(out.len(), MAX_INSTANCES);
    assert_eq!(out.last().unwrap().pos[2], 0.0);
}
