// The state core and key bindings build everywhere so they can be tested on
// the host; everything touching the browser is wasm-only.
pub mod core;
pub mod keys;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use crate::constants::{CANVAS_ID, VIDEO_CANVAS_ID, VIDEO_ID};
    use crate::core::{Controller, Variant};
    use crate::{dom, events, frame, video};
    use instant::Instant;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys as web;

    fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
        dom::sync_canvas_backing_size(canvas);
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            _ = window
                .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
        }
        resize_closure.forget();
    }

    /// Query string wins over the canvas `data-variant` attribute.
    fn select_variant(canvas: &web::HtmlCanvasElement) -> Variant {
        let from_query = Variant::from_query(&dom::location_search());
        let from_attr = canvas
            .get_attribute("data-variant")
            .map(|v| v.parse::<Variant>())
            .transpose();
        match (from_query, from_attr) {
            (Ok(Some(v)), _) => v,
            (Ok(None), Ok(Some(v))) => v,
            (Ok(None), Ok(None)) => Variant::default(),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("{}; using {}", e, Variant::default());
                Variant::default()
            }
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("portal-web starting");

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    async fn init() -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

        // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
        wire_canvas_resize(&canvas);

        let variant = select_variant(&canvas);
        log::info!("[init] variant={}", variant);
        let controller = Rc::new(RefCell::new(Controller::new(variant)));

        let video = video::VideoSource::new(&document, VIDEO_ID, VIDEO_CANVAS_ID)?;

        events::wire_orientation(controller.clone());
        events::wire_fullscreen_change(&document, controller.clone());
        events::wire_global_keydown(controller.clone(), canvas.clone());

        let gpu = frame::init_gpu(&canvas).await;

        // The first tick builds the panel (camera mode starts on).
        let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
            controller,
            document,
            canvas,
            video,
            panel: None,
            gpu,
            last_instant: Instant::now(),
        }));
        frame::start_loop(frame_ctx);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod constants;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod panel;
#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod video;
