use crate::constants::*;
use crate::error::Result;
use crate::geo::{GeoPoint, SurfacePosition};
use crate::globe::GlobeEvent;
use crate::orient::{facing, rotation_aligning};
use crate::ripple::RippleChain;
use crate::scene::{DrawableHandle, Material, Primitive, SceneGraph, Texture, Transform};
use crate::timer::TimerQueue;
use glam::Vec3;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub usize);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A location pin: a disc flat on the surface, a light column standing on it
/// and a chain of ripples pulsing out from it.
pub struct Marker {
    pub id: MarkerId,
    pub geo: GeoPoint,
    pub surface: SurfacePosition,
    pub disc: DrawableHandle,
    pub column: DrawableHandle,
    pub ripples: RippleChain,
}

impl Marker {
    pub fn place<S: SceneGraph>(
        id: MarkerId,
        geo: GeoPoint,
        radius: f32,
        seed: u64,
        scene: &mut S,
        timers: &mut TimerQueue<GlobeEvent>,
    ) -> Result<Self> {
        let surface = SurfacePosition::from_geo(geo, radius);

        let disc = scene.create(
            Primitive::Disc {
                radius: MARKER_DISC_RADIUS,
                segments: MARKER_DISC_SEGMENTS,
            },
            Material::basic(hex_to_rgb(MARKER_DISC_COLOR))
                .transparent(MARKER_DISC_OPACITY)
                .double_sided(),
        );
        // Face the globe centre.
        scene.set_transform(
            disc,
            Transform::from_translation_rotation(surface.position, facing(-surface.position)),
        )?;
        scene.add(disc, None)?;

        let column = scene.create(
            Primitive::Cylinder {
                radius_top: LIGHT_COLUMN_RADIUS,
                radius_bottom: LIGHT_COLUMN_RADIUS,
                height: LIGHT_COLUMN_HEIGHT,
                radial_segments: LIGHT_COLUMN_SEGMENTS,
                open_ended: true,
            },
            Material::basic(hex_to_rgb(LIGHT_COLUMN_COLOR))
                .with_texture(Texture::LightColumn)
                .transparent(LIGHT_COLUMN_OPACITY),
        );
        // Centred half its height above the surface so its base touches the globe.
        scene.set_transform(
            column,
            Transform::from_translation_rotation(
                surface.lifted(LIGHT_COLUMN_HEIGHT / 2.0),
                rotation_aligning(Vec3::Y, surface.normal),
            ),
        )?;
        scene.add(column, None)?;

        let mut ripples = RippleChain::new(id, surface, seed);
        ripples.start(scene, timers)?;

        log::info!(
            "[marker] {} at ({:.4},{:.4}) -> ({:.3},{:.3},{:.3})",
            id,
            geo.latitude,
            geo.longitude,
            surface.position.x,
            surface.position.y,
            surface.position.z
        );

        Ok(Self {
            id,
            geo,
            surface,
            disc,
            column,
            ripples,
        })
    }

    /// Stop the ripple chain and release every drawable the marker owns.
    ///
    /// Keeps going when one release fails, so nothing is left behind; the
    /// first failure is returned.
    pub fn remove<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        timers: &mut TimerQueue<GlobeEvent>,
    ) -> Result<()> {
        let stopped = self.ripples.stop(scene, timers);
        let released = scene.release_all(&[self.disc, self.column]);
        stopped.and(released)
    }
}
