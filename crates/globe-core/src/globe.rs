//! Top-level scene assembly: the base sphere, markers, flights and lights.

use crate::constants::*;
use crate::error::{GlobeError, Result};
use crate::flight::Flight;
use crate::geo::GeoPoint;
use crate::marker::{Marker, MarkerId};
use crate::scene::{DrawableHandle, Material, Primitive, SceneGraph, Texture};
use crate::state::{Lights, SceneSettings};
use crate::timer::{Fired, TimerQueue};
use rand::prelude::*;

/// Deferred work scheduled on the globe's timer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobeEvent {
    RespawnRipple(MarkerId),
}

#[derive(Clone, Debug)]
pub struct GlobeConfig {
    pub radius: f32,
    pub seed: u64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            seed: DEFAULT_SEED,
        }
    }
}

// Derive independent per-object streams from the base seed.
#[inline]
fn mix_seed(seed: u64, salt: u64, index: usize) -> u64 {
    seed ^ salt ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

const MARKER_SALT: u64 = 0x6D61_726B;
const FLIGHT_SALT: u64 = 0x666C_6967;

pub struct Globe<S: SceneGraph> {
    config: GlobeConfig,
    scene: S,
    timers: TimerQueue<GlobeEvent>,
    base_sphere: DrawableHandle,
    markers: Vec<Marker>,
    flights: Vec<Flight>,
    lights: Lights,
    settings: SceneSettings,
    next_marker: usize,
    flight_rng: StdRng,
    fired: Vec<Fired<GlobeEvent>>,
}

impl<S: SceneGraph> Globe<S> {
    pub fn new(config: GlobeConfig, mut scene: S) -> Result<Self> {
        let base_sphere = scene.create(
            Primitive::Sphere {
                radius: config.radius,
                width_segments: SPHERE_SEGMENTS,
                height_segments: SPHERE_SEGMENTS,
            },
            Material::basic(hex_to_rgb(SPHERE_COLOR))
                .with_texture(Texture::EarthMap)
                .with_bump(Texture::EarthBump, SPHERE_BUMP_SCALE)
                .lit(),
        );
        scene.add(base_sphere, None)?;
        log::info!(
            "[globe] radius={} seed={} segments={}",
            config.radius,
            config.seed,
            SPHERE_SEGMENTS
        );
        let flight_rng = StdRng::seed_from_u64(mix_seed(config.seed, FLIGHT_SALT, 0));
        Ok(Self {
            config,
            scene,
            timers: TimerQueue::new(),
            base_sphere,
            markers: Vec::new(),
            flights: Vec::new(),
            lights: Lights::default(),
            settings: SceneSettings::default(),
            next_marker: 0,
            flight_rng,
            fired: Vec::new(),
        })
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn timers(&self) -> &TimerQueue<GlobeEvent> {
        &self.timers
    }

    pub fn base_sphere(&self) -> DrawableHandle {
        self.base_sphere
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn lights(&self) -> &Lights {
        &self.lights
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Place a marker and start its ripple chain.
    pub fn add_marker(&mut self, geo: GeoPoint) -> Result<MarkerId> {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        let seed = mix_seed(self.config.seed, MARKER_SALT, id.0);
        let marker = Marker::place(
            id,
            geo,
            self.config.radius,
            seed,
            &mut self.scene,
            &mut self.timers,
        )?;
        self.markers.push(marker);
        Ok(id)
    }

    /// Stop the marker's ripples and release its drawables.
    pub fn remove_marker(&mut self, id: MarkerId) -> Result<()> {
        let index = self
            .markers
            .iter()
            .position(|m| m.id == id)
            .ok_or(GlobeError::UnknownMarker(id))?;
        // Release before dropping the entry; a partial failure still releases the rest.
        let released = self.markers[index].remove(&mut self.scene, &mut self.timers);
        self.markers.remove(index);
        match &released {
            Ok(()) => log::info!("[globe] removed marker {}", id),
            Err(e) => log::warn!("[globe] removed marker {} with errors: {}", id, e),
        }
        released
    }

    pub fn draw_flight(&mut self, from: GeoPoint, to: GeoPoint) -> Result<usize> {
        let flight = Flight::draw(
            from,
            to,
            self.config.radius,
            &mut self.flight_rng,
            &mut self.scene,
        )?;
        self.flights.push(flight);
        Ok(self.flights.len() - 1)
    }

    /// Release a flight's line and cone. Later flights shift down by one index.
    pub fn remove_flight(&mut self, index: usize) -> Result<()> {
        if index >= self.flights.len() {
            return Err(GlobeError::UnknownFlight(index));
        }
        let released = self.flights[index].remove(&mut self.scene);
        self.flights.remove(index);
        if released.is_ok() {
            log::info!("[globe] removed flight #{}", index);
        }
        released
    }

    /// Place a marker at every location and fly each one to `target`.
    ///
    /// The location equal to `target` still gets a marker but no flight to itself.
    pub fn populate(&mut self, locations: &[GeoPoint], target: GeoPoint) -> Result<()> {
        for &location in locations {
            self.add_marker(location)?;
            if location == target {
                continue;
            }
            self.draw_flight(location, target)?;
        }
        log::info!(
            "[globe] populated markers={} flights={}",
            self.markers.len(),
            self.flights.len()
        );
        Ok(())
    }

    pub fn apply_settings(&mut self, settings: &SceneSettings) -> Result<()> {
        let settings = settings.clamped();
        self.scene
            .set_visible(self.base_sphere, settings.show_sphere)?;
        self.lights.directional_position = settings.directional_position;
        self.lights.directional_intensity = settings.directional_intensity;
        self.lights.shadow = settings.shadow;
        self.settings = settings;
        Ok(())
    }

    /// Fire due timers and advance every tween by `dt_sec`.
    ///
    /// Failures are per object: each one is logged and skipped so the rest of
    /// the globe keeps animating.
    pub fn advance(&mut self, dt_sec: f32) {
        let mut fired = std::mem::take(&mut self.fired);
        self.timers.advance(dt_sec as f64, &mut fired);
        for event in fired.drain(..) {
            match event.payload {
                GlobeEvent::RespawnRipple(id) => {
                    let Some(marker) = self.markers.iter_mut().find(|m| m.id == id) else {
                        log::warn!("[globe] respawn for unknown marker {}", id);
                        continue;
                    };
                    if let Err(e) = marker.ripples.on_timer(
                        &mut self.scene,
                        &mut self.timers,
                        event.handle,
                        event.due_sec,
                    ) {
                        log::warn!("[ripple] marker={} spawn failed: {}", id, e);
                    }
                }
            }
        }
        self.fired = fired;

        for marker in &mut self.markers {
            if let Err(e) = marker.ripples.advance(dt_sec, &mut self.scene) {
                log::warn!("[ripple] marker={} advance failed: {}", marker.id, e);
            }
        }
        for (i, flight) in self.flights.iter_mut().enumerate() {
            if let Err(e) = flight.advance(dt_sec, &mut self.scene) {
                log::warn!("[flight] #{} advance failed: {}", i, e);
            }
        }
    }

    /// Stop every ripple chain, leaving markers and flights in place.
    pub fn stop_ripples(&mut self) {
        for marker in &mut self.markers {
            if let Err(e) = marker.ripples.stop(&mut self.scene, &mut self.timers) {
                log::warn!("[ripple] marker={} stop failed: {}", marker.id, e);
            }
        }
    }
}
