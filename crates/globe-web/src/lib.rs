#![cfg(target_arch = "wasm32")]
mod dom;
mod frame;
mod input;
mod projection;
mod render;

use globe_core::{
    default_locations, AnimationDriver, Camera, FrameClock, Globe, GlobeConfig, SceneSettings,
    SceneStore,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type SharedDriver = Rc<RefCell<AnimationDriver<SceneStore>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, "app-canvas")?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // A fresh layout on every page load.
    let config = GlobeConfig {
        seed: (js_sys::Math::random() * u32::MAX as f64) as u64,
        ..GlobeConfig::default()
    };
    let radius = config.radius;
    let mut globe = Globe::new(config, SceneStore::new())?;
    let (locations, target) = default_locations();
    globe.populate(&locations, target)?;

    let mut driver = AnimationDriver::new(globe, Camera::default());
    driver.set_viewport(width, height);
    let driver: SharedDriver = Rc::new(RefCell::new(driver));

    let renderer = render::CanvasRenderer::new(
        canvas.clone(),
        ctx,
        radius,
        dom::device_pixel_ratio() as f32,
    );
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        driver: driver.clone(),
        renderer,
        canvas: canvas.clone(),
        clock: FrameClock::new(),
    }));

    wire_resize(&canvas, &frame_ctx);
    wire_pointer(&canvas, &driver);
    wire_keyboard(&document, &driver);

    log::info!("[init] canvas {}x{}, starting loop", width, height);
    frame::start_loop(frame_ctx);
    Ok(())
}

fn wire_resize(canvas: &web::HtmlCanvasElement, frame_ctx: &Rc<RefCell<frame::FrameContext>>) {
    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    let frame_ctx = frame_ctx.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
        frame_ctx
            .borrow_mut()
            .renderer
            .set_pixel_ratio(dom::device_pixel_ratio() as f32);
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

fn wire_pointer(canvas: &web::HtmlCanvasElement, driver: &SharedDriver) {
    let drag = Rc::new(RefCell::new(input::DragState::default()));
    {
        let drag = drag.clone();
        let canvas_down = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            drag.borrow_mut()
                .begin(input::pointer_canvas_px(&ev, &canvas_down));
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
    {
        let drag = drag.clone();
        let driver = driver.clone();
        let canvas_move = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let at = input::pointer_canvas_px(&ev, &canvas_move);
            if let Some(delta) = drag.borrow_mut().move_to(at) {
                driver.borrow_mut().controls_mut().rotate_by_drag(
                    delta.x,
                    delta.y,
                    canvas_move.height() as f32,
                );
            }
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
    for name in ["pointerup", "pointercancel", "pointerleave"] {
        let drag = drag.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            drag.borrow_mut().end();
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
}

fn wire_keyboard(document: &web::Document, driver: &SharedDriver) {
    let driver = driver.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let mut driver = driver.borrow_mut();
        match ev.key().as_str() {
            "s" | "S" => {
                let settings = SceneSettings {
                    show_sphere: !driver.globe().settings().show_sphere,
                    ..driver.globe().settings().clone()
                };
                if let Err(e) = driver.globe_mut().apply_settings(&settings) {
                    log::warn!("[settings] {}", e);
                }
            }
            "a" | "A" => {
                let controls = driver.controls_mut();
                controls.auto_rotate = !controls.auto_rotate;
            }
            "Escape" => {
                driver.globe_mut().stop_ripples();
                driver.stop_token().stop();
            }
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);
    document
        .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}
