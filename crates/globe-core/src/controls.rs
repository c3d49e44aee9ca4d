use crate::constants::{AUTO_ROTATE_SPEED, CONTROLS_DAMPING, CONTROLS_ROTATE_SPEED};
use crate::state::Camera;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

// Keep the polar angle away from the poles so look-at stays well defined.
const POLAR_EPSILON: f32 = 1e-4;

/// Orbit camera around a fixed target with optional auto-rotation and damping.
///
/// Angles are spherical: `theta` is the azimuth around `+Y` measured from `+Z`,
/// `phi` the polar angle from `+Y`. Drag input accumulates into a pending
/// delta which `update` applies, fully or gradually when damping is enabled.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_rotate: bool,
    pub rotate_speed: f32,
    radius: f32,
    theta: f32,
    phi: f32,
    delta_theta: f32,
    delta_phi: f32,
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };
        Self {
            target,
            auto_rotate: true,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            enable_damping: true,
            damping_factor: CONTROLS_DAMPING,
            enable_rotate: true,
            rotate_speed: CONTROLS_ROTATE_SPEED,
            radius,
            theta,
            phi,
            delta_theta: 0.0,
            delta_phi: 0.0,
        }
    }

    pub fn for_camera(camera: &Camera) -> Self {
        Self::new(camera.eye, camera.target)
    }

    /// Queue a rotation from a pointer drag of `(dx_px, dy_px)` on a viewport `height_px` tall.
    pub fn rotate_by_drag(&mut self, dx_px: f32, dy_px: f32, height_px: f32) {
        if !self.enable_rotate {
            return;
        }
        let h = height_px.max(1.0);
        self.delta_theta -= TAU * dx_px / h * self.rotate_speed;
        self.delta_phi -= TAU * dy_px / h * self.rotate_speed;
    }

    /// Apply pending rotation (and auto-rotation) for a frame of `dt_sec`. Returns the new eye.
    pub fn update(&mut self, dt_sec: f32) -> Vec3 {
        if self.auto_rotate {
            // One full turn every 60 / speed seconds.
            self.delta_theta -= TAU / 60.0 * self.auto_rotate_speed * dt_sec;
        }

        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        self.theta += self.delta_theta * share;
        self.phi = (self.phi + self.delta_phi * share).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.eye()
    }

    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * sin_phi * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * sin_phi * self.theta.cos(),
            )
    }

    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    pub fn polar(&self) -> f32 {
        self.phi
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
    }
}
