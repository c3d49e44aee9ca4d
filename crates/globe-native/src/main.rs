mod gpu;
mod instances;

use globe_core::{
    default_locations, AnimationDriver, Camera, FrameClock, FrameOutcome, Globe, GlobeConfig,
    SceneSettings, SceneStore,
};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

#[derive(Default)]
struct Drag {
    active: bool,
    last: Option<(f64, f64)>,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    if let Err(e) = run() {
        log::error!("fatal: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = GlobeConfig::default();
    let radius = config.radius;
    let mut globe = Globe::new(config, SceneStore::new())?;
    let (locations, target) = default_locations();
    globe.populate(&locations, target)?;
    let mut driver = AnimationDriver::new(globe, Camera::default());

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("flyglobe (native)")
        .build(&event_loop)?;

    let mut state = pollster::block_on(gpu::GpuState::new(&window, radius))?;
    let (w, h) = state.size();
    driver.set_viewport(w, h);

    let mut clock = FrameClock::new();
    let mut drag = Drag::default();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                state.resize(size);
                driver.set_viewport(size.width, size.height);
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                drag.active = button_state == ElementState::Pressed;
                if !drag.active {
                    drag.last = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if drag.active {
                    if let Some((x, y)) = drag.last {
                        let (_, h) = state.size();
                        driver.controls_mut().rotate_by_drag(
                            (position.x - x) as f32,
                            (position.y - y) as f32,
                            h as f32,
                        );
                    }
                    drag.last = Some((position.x, position.y));
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Character("s") | Key::Character("S") => {
                        let current = driver.globe().settings().clone();
                        let settings = SceneSettings {
                            show_sphere: !current.show_sphere,
                            ..current
                        };
                        if let Err(e) = driver.globe_mut().apply_settings(&settings) {
                            log::warn!("[settings] {}", e);
                        }
                    }
                    Key::Character("a") | Key::Character("A") => {
                        let controls = driver.controls_mut();
                        controls.auto_rotate = !controls.auto_rotate;
                    }
                    Key::Named(NamedKey::Escape) => {
                        driver.globe_mut().stop_ripples();
                        driver.stop_token().stop();
                    }
                    _ => {}
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let outcome = driver.frame(clock.tick(), &mut state);
            if outcome == FrameOutcome::Stopped || state.fatal {
                log::info!("[driver] stopped after {} frames", driver.frames());
                elwt.exit();
            } else {
                state.window.request_redraw();
            }
        }
        _ => {}
    })?;
    Ok(())
}
