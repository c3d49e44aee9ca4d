// Tests for the per-frame animation driver.

use globe_core::*;
use std::time::Duration;

#[derive(Default)]
struct RecordingRenderer {
    frames: usize,
    eyes: Vec<glam::Vec3>,
    stop_after: Option<(usize, StopToken)>,
    fail: bool,
}

impl Renderer<SceneStore> for RecordingRenderer {
    fn render(&mut self, scene: &SceneStore, camera: &Camera, _lights: &Lights) -> anyhow::Result<()> {
        self.frames += 1;
        self.eyes.push(camera.eye);
        assert!(scene.live_count() > 0);
        if let Some((n, token)) = &self.stop_after {
            if self.frames == *n {
                token.stop();
            }
        }
        if self.fail {
            anyhow::bail!("surface lost");
        }
        Ok(())
    }
}

fn driver() -> AnimationDriver<SceneStore> {
    let mut globe = Globe::new(GlobeConfig::default(), SceneStore::new()).unwrap();
    let (locations, target) = default_locations();
    globe.populate(&locations, target).unwrap();
    AnimationDriver::new(globe, Camera::default())
}

const STEP: Duration = Duration::from_millis(16);

#[test]
fn runs_until_the_frame_limit() {
    let mut driver = driver();
    let mut renderer = RecordingRenderer::default();
    let ran = driver.run_fixed(STEP, 30, &mut renderer);
    assert_eq!(ran, 30);
    assert_eq!(renderer.frames, 30);
    assert_eq!(driver.frames(), 30);
    assert!((driver.elapsed_sec() - 30.0 * 0.016).abs() < 1e-4);
}

#[test]
fn stop_token_ends_the_loop() {
    let mut driver = driver();
    let token = driver.stop_token();
    let mut renderer = RecordingRenderer {
        stop_after: Some((5, token.clone())),
        ..Default::default()
    };
    let ran = driver.run_fixed(STEP, 100, &mut renderer);
    assert_eq!(ran, 5);
    assert!(token.is_stopped());
    assert_eq!(driver.frame(STEP, &mut renderer), FrameOutcome::Stopped);
    assert_eq!(renderer.frames, 5);
}

#[test]
fn render_errors_do_not_stop_the_loop() {
    let mut driver = driver();
    let mut renderer = RecordingRenderer {
        fail: true,
        ..Default::default()
    };
    assert_eq!(driver.run_fixed(STEP, 10, &mut renderer), 10);
    assert_eq!(renderer.frames, 10);
}

#[test]
fn camera_orbits_before_each_render() {
    let mut driver = driver();
    let start = driver.camera().eye;
    let mut renderer = RecordingRenderer::default();
    driver.run_fixed(STEP, 60, &mut renderer);

    // The first render already sees the auto-rotated camera.
    assert_ne!(renderer.eyes[0], start);
    for eye in &renderer.eyes {
        assert!((eye.length() - CAMERA_Z).abs() < 1e-3);
    }
    assert_eq!(driver.camera().eye, *renderer.eyes.last().unwrap());
}

#[test]
fn long_stalls_are_capped() {
    let mut driver = driver();
    let mut renderer = RecordingRenderer::default();
    driver.frame(Duration::from_secs(10), &mut renderer);
    assert!(driver.elapsed_sec() <= 0.25 + 1e-6);
}

#[test]
fn viewport_sets_the_aspect_ratio() {
    let mut driver = driver();
    driver.set_viewport(1600, 800);
    assert!((driver.camera().aspect - 2.0).abs() < 1e-6);
    driver.set_viewport(0, 0);
    assert!((driver.camera().aspect - 1.0).abs() < 1e-6);
}
