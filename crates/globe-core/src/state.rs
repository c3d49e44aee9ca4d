//! Camera, lights and settings-panel state read by both frontends.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
    /// Keep the aspect ratio in sync with the drawing surface.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }
}

/// Orthographic bounds of the directional light's shadow camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for ShadowBounds {
    fn default() -> Self {
        Self {
            left: -5.0,
            right: 5.0,
            top: 5.0,
            bottom: -5.0,
        }
    }
}

/// Ambient plus one directional light, both white.
#[derive(Clone, Debug, PartialEq)]
pub struct Lights {
    pub ambient_intensity: f32,
    pub directional_position: Vec3,
    pub directional_intensity: f32,
    pub shadow: ShadowBounds,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient_intensity: AMBIENT_INTENSITY,
            directional_position: directional_position_vec3(),
            directional_intensity: DIRECTIONAL_INTENSITY,
            shadow: ShadowBounds::default(),
        }
    }
}

/// User-tweakable scene settings, the state behind the settings panel.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSettings {
    pub directional_position: Vec3,
    pub directional_intensity: f32,
    pub shadow: ShadowBounds,
    pub show_sphere: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        let lights = Lights::default();
        Self {
            directional_position: lights.directional_position,
            directional_intensity: lights.directional_intensity,
            shadow: lights.shadow,
            show_sphere: true,
        }
    }
}

impl SceneSettings {
    /// Clamp every value into the range the settings panel offers.
    pub fn clamped(&self) -> Self {
        let p = LIGHT_POSITION_RANGE;
        let s = SHADOW_CAMERA_RANGE;
        Self {
            directional_position: self
                .directional_position
                .clamp(Vec3::splat(-p), Vec3::splat(p)),
            directional_intensity: self.directional_intensity.clamp(0.0, LIGHT_INTENSITY_MAX),
            shadow: ShadowBounds {
                left: self.shadow.left.clamp(-s, s),
                right: self.shadow.right.clamp(-s, s),
                top: self.shadow.top.clamp(-s, s),
                bottom: self.shadow.bottom.clamp(-s, s),
            },
            show_sphere: self.show_sphere,
        }
    }
}
