use crate::audio::WebAudioStream;
use crate::input::{self, PointerState};
use crate::render::GpuState;
use club_core::ClubSession;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedSession = Rc<RefCell<ClubSession<WebAudioStream>>>;

pub struct FrameContext {
    pub session: SharedSession,
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
    /// `None` when no GPU adapter was available; the session still ticks.
    pub gpu: Option<GpuState>,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let elapsed = self.started.elapsed().as_secs_f32();
        let aspect = input::canvas_aspect(&self.canvas);
        input::apply_pointer_pose(&self.session, &self.pointer.borrow(), aspect);
        self.session.borrow_mut().frame(elapsed);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        let result = gpu.render(&*self.session.borrow());
        match result {
            Ok(()) => {
                if self.session.borrow().is_suspended() {
                    self.session.borrow_mut().on_surface_restored();
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.session.borrow_mut().on_surface_lost();
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("[render] surface timeout; skipping frame");
            }
            Err(e) => {
                log::error!("[render] render error: {:?}", e);
            }
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    let _ = w.request_animation_frame(cb.unchecked_ref());
}
