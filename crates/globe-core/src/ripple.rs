//! Periodic ripple pulses anchored at a marker.
//!
//! Each marker owns a `RippleChain`. A spawned ripple grows and fades on two
//! independent tweens and is disposed when its fade completes. The next ripple
//! is scheduled on the shared timer queue at spawn time, so the gap is measured
//! from spawn to spawn rather than from disposal. The chain keeps the handle of
//! that pending timer, which is how `stop` breaks the cycle.

use crate::constants::*;
use crate::easing::Ease;
use crate::error::Result;
use crate::geo::SurfacePosition;
use crate::globe::GlobeEvent;
use crate::marker::MarkerId;
use crate::orient::rotation_aligning;
use crate::scene::{DrawableHandle, Material, Primitive, SceneGraph, Texture, Transform};
use crate::timer::{TimerHandle, TimerQueue};
use crate::tween::{lerp, Tween};
use glam::{Quat, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;

/// One short-lived pulse.
#[derive(Clone, Debug)]
pub struct Ripple {
    pub handle: DrawableHandle,
    pub spawned_at_sec: f64,
    pub scale: [f32; 2],
    pub opacity: f32,
    target_scale: [f32; 2],
    scale_tween: Tween,
    fade_tween: Tween,
    translation: Vec3,
    rotation: Quat,
}

impl Ripple {
    fn spawn<S: SceneGraph>(
        scene: &mut S,
        anchor: &SurfacePosition,
        rng: &mut StdRng,
        spawned_at_sec: f64,
    ) -> Result<Self> {
        let handle = scene.create(
            Primitive::Plane {
                width: RIPPLE_SIZE,
                height: RIPPLE_SIZE,
            },
            Material::basic(hex_to_rgb(RIPPLE_COLOR))
                .with_texture(Texture::Ripple)
                .transparent(1.0)
                .without_depth_write(),
        );
        let rotation = rotation_aligning(Vec3::Z, anchor.normal);
        let translation = anchor.position;
        scene.set_transform(handle, Transform::from_translation_rotation(translation, rotation))?;
        scene.add(handle, None)?;

        let target_scale = [
            RIPPLE_SCALE_MIN + rng.gen::<f32>() * RIPPLE_SCALE_JITTER,
            RIPPLE_SCALE_MIN + rng.gen::<f32>() * RIPPLE_SCALE_JITTER,
        ];
        let scale_duration =
            RIPPLE_SCALE_DURATION_MIN_SEC + rng.gen::<f32>() * RIPPLE_SCALE_DURATION_JITTER_SEC;

        Ok(Self {
            handle,
            spawned_at_sec,
            scale: [1.0, 1.0],
            opacity: 1.0,
            target_scale,
            scale_tween: Tween::new(scale_duration, Ease::Power2Out),
            fade_tween: Tween::new(RIPPLE_FADE_DURATION_SEC, Ease::Power2Out),
            translation,
            rotation,
        })
    }

    pub fn target_scale(&self) -> [f32; 2] {
        self.target_scale
    }

    /// Advance both tweens. Returns true once the fade has finished and the drawable is released.
    fn advance<S: SceneGraph>(&mut self, dt_sec: f32, scene: &mut S) -> Result<bool> {
        if let Some(step) = self.scale_tween.advance(dt_sec) {
            self.scale = [
                lerp(1.0, self.target_scale[0], step.progress),
                lerp(1.0, self.target_scale[1], step.progress),
            ];
            scene.set_transform(
                self.handle,
                Transform {
                    translation: self.translation,
                    rotation: self.rotation,
                    scale: Vec3::new(self.scale[0], self.scale[1], 1.0),
                },
            )?;
        }
        if let Some(step) = self.fade_tween.advance(dt_sec) {
            self.opacity = lerp(1.0, 0.0, step.progress);
            scene.set_opacity(self.handle, self.opacity)?;
            if step.completed {
                scene.release(self.handle)?;
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainState {
    /// Created but never spawned.
    Idle,
    Running { next_spawn: TimerHandle },
    Stopped,
}

pub struct RippleChain {
    marker: MarkerId,
    anchor: SurfacePosition,
    rng: StdRng,
    state: ChainState,
    active: SmallVec<[Ripple; 2]>,
    spawned: usize,
    disposed: usize,
}

impl RippleChain {
    pub fn new(marker: MarkerId, anchor: SurfacePosition, seed: u64) -> Self {
        Self {
            marker,
            anchor,
            rng: StdRng::seed_from_u64(seed),
            state: ChainState::Idle,
            active: SmallVec::new(),
            spawned: 0,
            disposed: 0,
        }
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ChainState::Running { .. })
    }

    pub fn active(&self) -> &[Ripple] {
        &self.active
    }

    pub fn spawned(&self) -> usize {
        self.spawned
    }

    pub fn disposed(&self) -> usize {
        self.disposed
    }

    /// Spawn the first ripple immediately and start the respawn cycle.
    pub fn start<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        timers: &mut TimerQueue<GlobeEvent>,
    ) -> Result<()> {
        if self.state != ChainState::Idle {
            return Ok(());
        }
        let now = timers.now_sec();
        self.spawn(scene, timers, now)
    }

    /// Handle a fired respawn timer. Stale or foreign handles are ignored.
    pub fn on_timer<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        timers: &mut TimerQueue<GlobeEvent>,
        handle: TimerHandle,
        due_sec: f64,
    ) -> Result<()> {
        match self.state {
            ChainState::Running { next_spawn } if next_spawn == handle => {
                self.spawn(scene, timers, due_sec)
            }
            _ => Ok(()),
        }
    }

    fn spawn<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        timers: &mut TimerQueue<GlobeEvent>,
        spawned_at_sec: f64,
    ) -> Result<()> {
        // Schedule first so a failed spawn does not end the chain.
        let delay = RIPPLE_RESPAWN_MIN_SEC + self.rng.gen::<f32>() * RIPPLE_RESPAWN_JITTER_SEC;
        let next_spawn = timers.schedule_at(
            spawned_at_sec + delay as f64,
            GlobeEvent::RespawnRipple(self.marker),
        );
        self.state = ChainState::Running { next_spawn };

        let ripple = Ripple::spawn(scene, &self.anchor, &mut self.rng, spawned_at_sec)?;
        log::debug!(
            "[ripple] marker={} spawn #{} next in {:.2}s",
            self.marker,
            self.spawned,
            delay
        );
        self.active.push(ripple);
        self.spawned += 1;
        Ok(())
    }

    /// Animate the active ripples, releasing those whose fade completed.
    pub fn advance<S: SceneGraph>(&mut self, dt_sec: f32, scene: &mut S) -> Result<()> {
        let mut first_err = None;
        let mut i = 0usize;
        while i < self.active.len() {
            match self.active[i].advance(dt_sec, scene) {
                Ok(false) => i += 1,
                Ok(true) => {
                    self.active.remove(i);
                    self.disposed += 1;
                }
                Err(e) => {
                    // A ripple whose drawable went missing cannot recover; forget it.
                    self.active.remove(i);
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Cancel the pending respawn and release every active ripple.
    pub fn stop<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        timers: &mut TimerQueue<GlobeEvent>,
    ) -> Result<()> {
        if let ChainState::Running { next_spawn } = self.state {
            timers.cancel(next_spawn);
        }
        self.state = ChainState::Stopped;
        let mut first_err = None;
        for ripple in self.active.drain(..) {
            match scene.release(ripple.handle) {
                Ok(()) => self.disposed += 1,
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
