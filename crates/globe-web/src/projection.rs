//! Pure screen-space helpers for the canvas renderer.
//!
//! No browser types in here so the host-side tests can include this file.

use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Distance from the eye in world units.
    pub distance: f32,
}

/// Project a world point to canvas pixels. `None` when it falls outside the depth range.
pub fn world_to_screen(
    view_proj: Mat4,
    eye: Vec3,
    point: Vec3,
    width: f32,
    height: f32,
) -> Option<ScreenPoint> {
    let clip = view_proj * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if !(0.0..=1.0).contains(&ndc.z) {
        return None;
    }
    Some(ScreenPoint {
        x: (ndc.x * 0.5 + 0.5) * width,
        y: (0.5 - ndc.y * 0.5) * height,
        distance: (point - eye).length(),
    })
}

/// On-screen radius in pixels of something `size_world` across at `distance`.
#[inline]
pub fn projected_radius_px(size_world: f32, distance: f32, fovy_radians: f32, height: f32) -> f32 {
    let half_extent = distance.max(1e-3) * (fovy_radians * 0.5).tan();
    0.5 * size_world / half_extent * height * 0.5
}

/// Indices of `distances` ordered far to near, for painter's-algorithm drawing.
pub fn back_to_front(distances: &[f32], order: &mut Vec<usize>) {
    order.clear();
    order.extend(0..distances.len());
    order.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]));
}

pub fn css_rgba(color: [f32; 4]) -> String {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{:.3})",
        c(color[0]),
        c(color[1]),
        c(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}
