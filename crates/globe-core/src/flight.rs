//! Flight arcs: the visible curve plus a cone travelling along it.
//!
//! The cone is placed from the continuous curve every frame, not from the
//! sampled polyline, and points along the direction of travel.

use crate::arc::ArcCurve;
use crate::constants::*;
use crate::easing::Ease;
use crate::error::Result;
use crate::geo::{GeoPoint, SurfacePosition};
use crate::orient::rotation_aligning;
use crate::scene::{DrawableHandle, Material, Primitive, SceneGraph, Transform};
use crate::tween::Tween;
use glam::Vec3;
use rand::prelude::*;

pub struct Flight {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub curve: ArcCurve,
    pub line: DrawableHandle,
    pub cone: DrawableHandle,
    progress: f32,
    tween: Tween,
}

impl Flight {
    pub fn draw<S: SceneGraph>(
        from: GeoPoint,
        to: GeoPoint,
        radius: f32,
        rng: &mut StdRng,
        scene: &mut S,
    ) -> Result<Self> {
        let start = SurfacePosition::from_geo(from, radius).position;
        let end = SurfacePosition::from_geo(to, radius).position;
        let curve = ArcCurve::build(start, end, radius);

        let line = scene.create(
            Primitive::Line {
                points: curve.polyline(),
                width_px: ARC_LINE_WIDTH_PX,
            },
            Material::basic(hex_to_rgb(ARC_LINE_COLOR)).transparent(ARC_LINE_OPACITY),
        );
        scene.add(line, None)?;

        let cone = scene.create(
            Primitive::Cylinder {
                radius_top: 0.0,
                radius_bottom: FLIGHT_CONE_RADIUS,
                height: FLIGHT_CONE_HEIGHT,
                radial_segments: FLIGHT_CONE_SEGMENTS,
                open_ended: false,
            },
            Material::basic(hex_to_rgb(FLIGHT_CONE_COLOR)).transparent(1.0),
        );
        scene.add(cone, Some(line))?;

        let duration = FLIGHT_DURATION_MIN_SEC + rng.gen::<f32>() * FLIGHT_DURATION_JITTER_SEC;
        let delay = rng.gen::<f32>() * FLIGHT_DELAY_JITTER_SEC;
        let tween = Tween::new(duration, Ease::Power2InOut)
            .with_delay(delay)
            .repeat_forever();

        log::info!(
            "[flight] ({:.3},{:.3}) -> ({:.3},{:.3}) height={:.3} period={:.2}s delay={:.2}s",
            from.latitude,
            from.longitude,
            to.latitude,
            to.longitude,
            curve.height,
            duration,
            delay
        );

        let flight = Self {
            from,
            to,
            curve,
            line,
            cone,
            progress: 0.0,
            tween,
        };
        scene.set_transform(cone, flight.cone_transform(0.0))?;
        Ok(flight)
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    /// Cone placement at curve parameter `t`: on the curve, local `-Y` along the tangent.
    pub fn cone_transform(&self, t: f32) -> Transform {
        Transform::from_translation_rotation(
            self.curve.sample(t),
            rotation_aligning(Vec3::NEG_Y, self.curve.tangent(t)),
        )
    }

    pub fn advance<S: SceneGraph>(&mut self, dt_sec: f32, scene: &mut S) -> Result<()> {
        if let Some(step) = self.tween.advance(dt_sec) {
            self.progress = step.progress;
            scene.set_transform(self.cone, self.cone_transform(self.progress))?;
        }
        Ok(())
    }

    pub fn remove<S: SceneGraph>(&mut self, scene: &mut S) -> Result<()> {
        scene.release_all(&[self.cone, self.line])
    }
}
