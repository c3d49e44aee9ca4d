//! Scene-graph collaborator used by the globe.
//!
//! The engine only needs to create primitives, put them into (or take them
//! out of) the render graph, move them and release them. `SceneGraph` is that
//! seam; `SceneStore` is the in-memory implementation both frontends draw from.

use crate::error::{GlobeError, Result};
use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableHandle(u32);

impl DrawableHandle {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Image assets referenced by materials. Loading them is the renderer's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Texture {
    EarthMap,
    EarthBump,
    LightColumn,
    Ripple,
}

impl Texture {
    pub fn path(self) -> &'static str {
        match self {
            Texture::EarthMap => "./img/earth/earth_map.jpg",
            Texture::EarthBump => "./img/earth/earth_bump.jpg",
            Texture::LightColumn => "./img/earth/light_column.png",
            Texture::Ripple => "./img/earth/aperture.png",
        }
    }

    /// Flat tint standing in for the image when a renderer does not sample textures.
    pub fn fallback_tint(self) -> [f32; 3] {
        match self {
            Texture::EarthMap => [0.12, 0.26, 0.48],
            Texture::EarthBump => [0.5, 0.5, 0.5],
            Texture::LightColumn => [0.55, 0.85, 1.0],
            Texture::Ripple => [0.6, 0.9, 1.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Flat disc in the local XY plane, facing `+Z`.
    Disc { radius: f32, segments: u32 },
    /// Cylinder or cone along local `+Y`, centred on the origin.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        open_ended: bool,
    },
    /// Rectangle in the local XY plane, facing `+Z`.
    Plane { width: f32, height: f32 },
    /// Connected path drawn at a fixed screen-space width.
    Line { points: Vec<Vec3>, width_px: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub transparent: bool,
    pub texture: Option<Texture>,
    pub bump: Option<(Texture, f32)>,
    pub double_sided: bool,
    pub depth_write: bool,
    /// Shaded by the scene lights instead of drawn with a flat colour.
    pub lit: bool,
}

impl Material {
    pub fn basic(color: [f32; 3]) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            texture: None,
            bump: None,
            double_sided: false,
            depth_write: true,
            lit: false,
        }
    }

    pub fn transparent(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity;
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_bump(mut self, texture: Texture, scale: f32) -> Self {
        self.bump = Some((texture, scale));
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn without_depth_write(mut self) -> Self {
        self.depth_write = false;
        self
    }

    pub fn lit(mut self) -> Self {
        self.lit = true;
        self
    }

    /// RGBA for untextured drawing: colour times the texture tint, alpha from opacity.
    pub fn display_rgba(&self) -> [f32; 4] {
        let tint = self.texture.map(Texture::fallback_tint).unwrap_or([1.0; 3]);
        let alpha = if self.transparent { self.opacity } else { 1.0 };
        [
            self.color[0] * tint[0],
            self.color[1] * tint[1],
            self.color[2] * tint[2],
            alpha,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

pub trait SceneGraph {
    fn create(&mut self, primitive: Primitive, material: Material) -> DrawableHandle;
    /// Insert into the render graph, under `parent` when given.
    fn add(&mut self, handle: DrawableHandle, parent: Option<DrawableHandle>) -> Result<()>;
    fn remove(&mut self, handle: DrawableHandle) -> Result<()>;
    /// Release the drawable's resources. Disposed handles are invalid afterwards.
    fn dispose(&mut self, handle: DrawableHandle) -> Result<()>;
    fn set_transform(&mut self, handle: DrawableHandle, transform: Transform) -> Result<()>;
    fn set_opacity(&mut self, handle: DrawableHandle, opacity: f32) -> Result<()>;
    fn set_visible(&mut self, handle: DrawableHandle, visible: bool) -> Result<()>;

    /// Take the drawable out of the graph and dispose it.
    fn release(&mut self, handle: DrawableHandle) -> Result<()> {
        self.remove(handle)?;
        self.dispose(handle)
    }

    /// Release every handle, continuing past failures. Returns the first error.
    fn release_all(&mut self, handles: &[DrawableHandle]) -> Result<()> {
        let mut first_err = None;
        for &handle in handles {
            if let Err(e) = self.release(handle) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

#[derive(Clone, Debug)]
pub struct Drawable {
    pub primitive: Primitive,
    pub material: Material,
    pub transform: Transform,
    pub parent: Option<DrawableHandle>,
    pub in_scene: bool,
    pub visible: bool,
}

/// Lifecycle notifications recorded by a journaling `SceneStore`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    Created(DrawableHandle),
    Added(DrawableHandle),
    Removed(DrawableHandle),
    Disposed(DrawableHandle),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub created: usize,
    pub disposed: usize,
}

#[derive(Default)]
pub struct SceneStore {
    next_id: u32,
    drawables: FnvHashMap<DrawableHandle, Drawable>,
    // Insertion order, so frontends draw in a stable order.
    order: Vec<DrawableHandle>,
    stats: SceneStats,
    journal: Option<Vec<SceneEvent>>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that records every lifecycle event until drained with `take_events`.
    pub fn with_journal() -> Self {
        Self {
            journal: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Number of created drawables not yet disposed.
    pub fn live_count(&self) -> usize {
        self.drawables.len()
    }

    pub fn get(&self, handle: DrawableHandle) -> Option<&Drawable> {
        self.drawables.get(&handle)
    }

    /// World matrix, composing parents up to the root.
    pub fn world_matrix(&self, handle: DrawableHandle) -> Option<Mat4> {
        let mut drawable = self.drawables.get(&handle)?;
        let mut matrix = drawable.transform.matrix();
        while let Some(parent) = drawable.parent {
            drawable = self.drawables.get(&parent)?;
            matrix = drawable.transform.matrix() * matrix;
        }
        Some(matrix)
    }

    /// True when the drawable and all of its ancestors are in the scene and visible.
    pub fn is_rendered(&self, handle: DrawableHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            match self.drawables.get(&h) {
                Some(d) if d.in_scene && d.visible => current = d.parent,
                _ => return false,
            }
        }
        true
    }

    /// Everything that should be drawn this frame with its world matrix, in insertion order.
    pub fn rendered(&self) -> impl Iterator<Item = (DrawableHandle, &Drawable, Mat4)> + '_ {
        self.order.iter().filter_map(move |&h| {
            if !self.is_rendered(h) {
                return None;
            }
            let drawable = self.drawables.get(&h)?;
            let world = self.world_matrix(h)?;
            Some((h, drawable, world))
        })
    }

    fn record(&mut self, event: SceneEvent) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(event);
        }
    }

    fn drawable_mut(&mut self, handle: DrawableHandle) -> Result<&mut Drawable> {
        // Handles are never reused, so a known id that is gone was disposed.
        let issued = handle.0 < self.next_id;
        self.drawables.get_mut(&handle).ok_or(if issued {
            GlobeError::AlreadyDisposed(handle)
        } else {
            GlobeError::UnknownDrawable(handle)
        })
    }
}

impl SceneGraph for SceneStore {
    fn create(&mut self, primitive: Primitive, material: Material) -> DrawableHandle {
        let handle = DrawableHandle(self.next_id);
        self.next_id += 1;
        self.drawables.insert(
            handle,
            Drawable {
                primitive,
                material,
                transform: Transform::default(),
                parent: None,
                in_scene: false,
                visible: true,
            },
        );
        self.order.push(handle);
        self.stats.created += 1;
        self.record(SceneEvent::Created(handle));
        handle
    }

    fn add(&mut self, handle: DrawableHandle, parent: Option<DrawableHandle>) -> Result<()> {
        if let Some(p) = parent {
            self.drawable_mut(p)?;
        }
        let drawable = self.drawable_mut(handle)?;
        drawable.parent = parent;
        drawable.in_scene = true;
        self.record(SceneEvent::Added(handle));
        Ok(())
    }

    fn remove(&mut self, handle: DrawableHandle) -> Result<()> {
        let drawable = self.drawable_mut(handle)?;
        if drawable.in_scene {
            drawable.in_scene = false;
            self.record(SceneEvent::Removed(handle));
        }
        Ok(())
    }

    fn dispose(&mut self, handle: DrawableHandle) -> Result<()> {
        self.remove(handle)?;
        self.drawables.remove(&handle);
        self.order.retain(|&h| h != handle);
        self.stats.disposed += 1;
        self.record(SceneEvent::Disposed(handle));
        Ok(())
    }

    fn set_transform(&mut self, handle: DrawableHandle, transform: Transform) -> Result<()> {
        self.drawable_mut(handle)?.transform = transform;
        Ok(())
    }

    fn set_opacity(&mut self, handle: DrawableHandle, opacity: f32) -> Result<()> {
        self.drawable_mut(handle)?.material.opacity = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    fn set_visible(&mut self, handle: DrawableHandle, visible: bool) -> Result<()> {
        self.drawable_mut(handle)?.visible = visible;
        Ok(())
    }
}
