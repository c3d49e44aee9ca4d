//! Flattening of the scene graph into what the frontends actually draw.
//!
//! Neither frontend rasterizes real meshes: every primitive becomes one or
//! more camera-facing circles (billboards), and lines stay polylines. Things
//! hidden behind the globe are culled here so both frontends agree.

use crate::scene::{Drawable, Primitive, SceneStore};
use crate::state::{Camera, Lights};
use glam::{Mat4, Vec3};

// Smallest billboard diameter, so thin shapes stay visible.
const MIN_BILLBOARD_SIZE: f32 = 0.006;
// Slack when deciding whether a surface point is hidden by the sphere.
const OCCLUSION_SLACK: f32 = 1e-3;

/// A camera-facing circle: world position, diameter in world units and RGBA.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Billboard {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinePath {
    pub points: Vec<Vec3>,
    /// Per point: false when the globe hides it from the camera.
    pub visible: Vec<bool>,
    pub color: [f32; 4],
    pub width_px: f32,
}

#[derive(Clone, Debug, Default)]
pub struct FrameGeometry {
    /// The globe body, drawn first.
    pub sphere: Option<Billboard>,
    pub billboards: Vec<Billboard>,
    pub lines: Vec<LinePath>,
}

/// Distance along a unit `ray_dir` to the first hit with the sphere, if in front of the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// True when the globe of `radius` at the origin blocks the line of sight from `eye` to `point`.
pub fn occluded_by_globe(eye: Vec3, point: Vec3, radius: f32) -> bool {
    let to_point = point - eye;
    let dist = to_point.length();
    if dist <= f32::EPSILON {
        return false;
    }
    match ray_sphere(eye, to_point / dist, Vec3::ZERO, radius) {
        Some(t) => t < dist - OCCLUSION_SLACK,
        None => false,
    }
}

/// Lambert shading of a lit colour for a surface facing `normal`.
pub fn shade(color: [f32; 4], normal: Vec3, lights: &Lights) -> [f32; 4] {
    let to_light = lights.directional_position.normalize_or_zero();
    let diffuse = normal.normalize_or_zero().dot(to_light).max(0.0);
    // Light intensities are physical; scale them into [0, 1].
    let k = (0.2 * lights.ambient_intensity + 0.25 * lights.directional_intensity * diffuse)
        .clamp(0.0, 1.0);
    [color[0] * k, color[1] * k, color[2] * k, color[3]]
}

impl FrameGeometry {
    pub fn clear(&mut self) {
        self.sphere = None;
        self.billboards.clear();
        self.lines.clear();
    }

    /// Rebuild from the scene as seen by `camera`, culling against a globe of `radius`.
    pub fn collect(&mut self, scene: &SceneStore, camera: &Camera, radius: f32) {
        self.clear();
        let eye = camera.eye;
        for (_, drawable, world) in scene.rendered() {
            let color = drawable.material.display_rgba();
            match &drawable.primitive {
                Primitive::Sphere { radius: r, .. } => {
                    let (scale, _, translation) = world.to_scale_rotation_translation();
                    self.sphere = Some(Billboard {
                        pos: translation.to_array(),
                        size: 2.0 * r * scale.max_element(),
                        color,
                    });
                }
                Primitive::Line { points, width_px } => {
                    let points: Vec<Vec3> =
                        points.iter().map(|p| world.transform_point3(*p)).collect();
                    let visible = points
                        .iter()
                        .map(|p| !occluded_by_globe(eye, *p, radius))
                        .collect();
                    self.lines.push(LinePath {
                        points,
                        visible,
                        color,
                        width_px: *width_px,
                    });
                }
                _ => self.push_shape(drawable, &world, color, eye, radius),
            }
        }
    }

    fn push_shape(&mut self, drawable: &Drawable, world: &Mat4, color: [f32; 4], eye: Vec3, radius: f32) {
        let (scale, _, _) = world.to_scale_rotation_translation();
        let mut push = |local: Vec3, size: f32| {
            let pos = world.transform_point3(local);
            if occluded_by_globe(eye, pos, radius) {
                return;
            }
            self.billboards.push(Billboard {
                pos: pos.to_array(),
                size: size.max(MIN_BILLBOARD_SIZE),
                color,
            });
        };
        match &drawable.primitive {
            Primitive::Disc { radius: r, .. } => push(Vec3::ZERO, 2.0 * r * scale.x.max(scale.y)),
            Primitive::Plane { width, height } => {
                push(Vec3::ZERO, width.max(*height) * 0.5 * (scale.x + scale.y))
            }
            Primitive::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                // A column of dots along local Y, tapering from bottom to top radius.
                let widest = radius_top.max(*radius_bottom).max(MIN_BILLBOARD_SIZE * 0.5);
                let dots = ((height / widest).ceil() as usize).clamp(2, 24);
                for i in 0..dots {
                    let f = i as f32 / (dots - 1) as f32;
                    let y = (f - 0.5) * height;
                    let r = radius_bottom + (radius_top - radius_bottom) * f;
                    push(Vec3::new(0.0, y, 0.0), 2.0 * r * scale.x);
                }
            }
            Primitive::Sphere { .. } | Primitive::Line { .. } => {}
        }
    }
}
