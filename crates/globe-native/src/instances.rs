//! Turns a collected frame into the instance list the billboard pipeline draws.
//!
//! There is no depth buffer: the globe goes first and everything else is
//! sorted far to near, so alpha blending composes correctly.

use glam::Vec3;
use globe_core::{shade, Billboard, FrameGeometry, LinePath, Lights};

pub const MAX_INSTANCES: usize = 4096;
/// Gap between consecutive line dots, as a fraction of the dot diameter.
pub const LINE_DOT_SPACING: f32 = 0.75;

/// What the instance builder needs to know about the camera.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pub eye: Vec3,
    pub fovy_radians: f32,
    pub height_px: f32,
}

impl View {
    /// World-space length one screen pixel covers at `distance` from the eye.
    pub fn world_per_pixel(&self, distance: f32) -> f32 {
        2.0 * distance * (self.fovy_radians / 2.0).tan() / self.height_px.max(1.0)
    }

    /// World-space diameter that appears `width_px` wide at `at`.
    pub fn dot_size(&self, at: Vec3, width_px: f32) -> f32 {
        width_px * self.world_per_pixel((at - self.eye).length())
    }
}

/// Append dots along the visible stretches of `line`, each `line.width_px` wide on screen.
pub fn line_dots(line: &LinePath, view: &View, out: &mut Vec<Billboard>) {
    let dot = |p: Vec3, out: &mut Vec<Billboard>| {
        out.push(Billboard {
            pos: p.to_array(),
            size: view.dot_size(p, line.width_px),
            color: line.color,
        })
    };
    for (pair, vis) in line.points.windows(2).zip(line.visible.windows(2)) {
        if !(vis[0] && vis[1]) {
            continue;
        }
        let (a, b) = (pair[0], pair[1]);
        let near = view.dot_size(a, line.width_px).min(view.dot_size(b, line.width_px));
        let spacing = (near * LINE_DOT_SPACING).max(f32::EPSILON);
        let steps = ((b - a).length() / spacing).ceil().max(1.0) as usize;
        for i in 0..steps {
            dot(a.lerp(b, i as f32 / steps as f32), out);
        }
    }
    if let (Some(&last), Some(true)) = (line.points.last(), line.visible.last()) {
        dot(last, out);
    }
}

/// Build the draw list: shaded globe, then every other billboard far to near.
/// Returns how many instances were dropped to stay under `MAX_INSTANCES`.
pub fn build_instances(
    frame: &FrameGeometry,
    view: &View,
    lights: &Lights,
    out: &mut Vec<Billboard>,
) -> usize {
    out.clear();
    let eye = view.eye;
    let mut rest: Vec<Billboard> = frame.billboards.clone();
    for line in &frame.lines {
        line_dots(line, view, &mut rest);
    }
    let distance = |b: &Billboard| (Vec3::from(b.pos) - eye).length();
    rest.sort_by(|a, b| distance(b).total_cmp(&distance(a)));

    if let Some(sphere) = frame.sphere {
        let toward_eye = eye - Vec3::from(sphere.pos);
        out.push(Billboard {
            color: shade(sphere.color, toward_eye, lights),
            ..sphere
        });
    }
    let room = MAX_INSTANCES - out.len();
    // Keep the nearest ones when over budget.
    let dropped = rest.len().saturating_sub(room);
    out.extend_from_slice(&rest[dropped..]);
    dropped
}
