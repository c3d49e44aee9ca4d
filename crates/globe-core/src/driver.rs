//! Per-frame run loop owned by the host frontend.
//!
//! The host calls `frame` from its display callback (`requestAnimationFrame`
//! on the web, the winit event loop on desktop). Each frame updates the camera
//! controls, advances the globe's timers and tweens, then renders. The loop
//! ends when the `StopToken` is triggered.

use crate::controls::OrbitControls;
use crate::globe::Globe;
use crate::scene::SceneGraph;
use crate::state::{Camera, Lights};
use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

// Cap on a single frame step so a stalled tab does not fast-forward every tween.
const MAX_FRAME_STEP_SEC: f32 = 0.25;

/// Draws the scene for one frame.
pub trait Renderer<S> {
    fn render(&mut self, scene: &S, camera: &Camera, lights: &Lights) -> anyhow::Result<()>;
}

/// Shared flag that ends the run loop. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Wall-clock frame timing for hosts that do not hand out a timestamp.
pub struct FrameClock {
    last_instant: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
        }
    }

    /// Time since the previous tick (or since creation).
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        dt
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Request the next frame.
    Continue,
    Stopped,
}

pub struct AnimationDriver<S: SceneGraph> {
    globe: Globe<S>,
    camera: Camera,
    controls: OrbitControls,
    stop: StopToken,
    frames: u64,
    elapsed_sec: f64,
}

impl<S: SceneGraph> AnimationDriver<S> {
    pub fn new(globe: Globe<S>, camera: Camera) -> Self {
        let controls = OrbitControls::for_camera(&camera);
        Self {
            globe,
            camera,
            controls,
            stop: StopToken::new(),
            frames: 0,
            elapsed_sec: 0.0,
        }
    }

    pub fn globe(&self) -> &Globe<S> {
        &self.globe
    }

    pub fn globe_mut(&mut self) -> &mut Globe<S> {
        &mut self.globe
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_sec
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    /// Run one frame. Render failures are logged and do not stop the loop.
    pub fn frame<R: Renderer<S>>(&mut self, dt: Duration, renderer: &mut R) -> FrameOutcome {
        if self.stop.is_stopped() {
            return FrameOutcome::Stopped;
        }
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_STEP_SEC);

        self.controls.update(dt_sec);
        self.controls.apply(&mut self.camera);

        self.globe.advance(dt_sec);

        if let Err(e) = renderer.render(self.globe.scene(), &self.camera, self.globe.lights()) {
            log::error!("[driver] render error: {:?}", e);
        }

        self.frames += 1;
        self.elapsed_sec += dt_sec as f64;
        if self.frames % 600 == 0 {
            log::debug!(
                "[driver] frames={} elapsed={:.1}s pending_timers={}",
                self.frames,
                self.elapsed_sec,
                self.globe.timers().len()
            );
        }
        FrameOutcome::Continue
    }

    /// Drive the loop with a fixed step until stopped or `max_frames` have run.
    /// Returns the number of frames executed.
    pub fn run_fixed<R: Renderer<S>>(
        &mut self,
        step: Duration,
        max_frames: u64,
        renderer: &mut R,
    ) -> u64 {
        let mut ran = 0;
        while ran < max_frames {
            if self.frame(step, renderer) == FrameOutcome::Stopped {
                break;
            }
            ran += 1;
        }
        ran
    }
}
