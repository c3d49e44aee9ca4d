use crate::render::CanvasRenderer;
use globe_core::{AnimationDriver, FrameClock, FrameOutcome, SceneStore};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub driver: Rc<RefCell<AnimationDriver<SceneStore>>>,
    pub renderer: CanvasRenderer,
    pub canvas: web::HtmlCanvasElement,
    pub clock: FrameClock,
}

impl FrameContext {
    pub fn frame(&mut self) -> FrameOutcome {
        let dt = self.clock.tick();
        let mut driver = self.driver.borrow_mut();
        driver.set_viewport(self.canvas.width(), self.canvas.height());
        driver.frame(dt, &mut self.renderer)
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Drive `frame_ctx` from `requestAnimationFrame` until its driver is stopped.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        match frame_ctx_tick.borrow_mut().frame() {
            FrameOutcome::Continue => request_frame(&tick_clone),
            FrameOutcome::Stopped => log::info!("[driver] stopped"),
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
