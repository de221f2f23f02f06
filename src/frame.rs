use crate::core::{sane_elapsed, Controller, Effect};
use crate::panel::Panel;
use crate::render;
use crate::video::VideoSource;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub controller: Rc<RefCell<Controller>>,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub video: VideoSource,
    pub panel: Option<Panel>,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = sane_elapsed((now - self.last_instant).as_secs_f32());
        self.last_instant = now;

        // Release the controller before running effects; panel building reads it.
        let out = self.controller.borrow_mut().tick(dt_sec);

        for effect in &out.effects {
            match effect {
                Effect::AcquireCamera => self.video.acquire(),
                Effect::RebuildPanel | Effect::CreatePanel => self.rebuild_panel(),
                Effect::DestroyPanel => {
                    if self.panel.take().is_some() {
                        log::info!("[panel] destroyed for fullscreen");
                    }
                }
            }
        }

        let controller = self.controller.borrow();
        if let Some(panel) = &self.panel {
            panel.sync(&controller, &out.dirty);
        }

        if let Some(g) = &mut self.gpu {
            if let Some((rgba, w, h)) = self.video.capture_frame() {
                g.upload_video(&rgba, w, h);
            }
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            g.apply_params(controller.params(), &out.dirty);
            g.set_view(&out.view);
            if let Err(e) = g.render() {
                log::error!("render error: {:?}", e);
            }
        }
    }

    fn rebuild_panel(&mut self) {
        // Old panel leaves the DOM before the new one is attached.
        self.panel = None;
        match Panel::build(&self.document, &self.controller, &self.canvas) {
            Ok(p) => self.panel = Some(p),
            Err(e) => log::error!("[panel] build error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
