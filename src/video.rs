use crate::constants::{VIDEO_TEX_HEIGHT, VIDEO_TEX_WIDTH};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

// HTMLMediaElement.HAVE_CURRENT_DATA
const HAVE_CURRENT_DATA: u16 = 2;

/// Live camera feed, scaled through a 2-D canvas into RGBA bytes.
pub struct VideoSource {
    video: web::HtmlVideoElement,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    stream_attached: Rc<Cell<bool>>,
}

impl VideoSource {
    pub fn new(document: &web::Document, video_id: &str, canvas_id: &str) -> anyhow::Result<Self> {
        let video: web::HtmlVideoElement = document
            .get_element_by_id(video_id)
            .ok_or_else(|| anyhow::anyhow!("missing #{video_id}"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| anyhow::anyhow!("missing #{canvas_id}"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        canvas.set_width(VIDEO_TEX_WIDTH);
        canvas.set_height(VIDEO_TEX_HEIGHT);
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context on #{canvas_id}"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        video.set_muted(true);
        _ = video.set_attribute("playsinline", "");
        Ok(Self {
            video,
            canvas,
            ctx,
            stream_attached: Rc::new(Cell::new(false)),
        })
    }

    /// Ask for the rear camera. Failures are logged and otherwise ignored.
    pub fn acquire(&self) {
        let video = self.video.clone();
        let attached = self.stream_attached.clone();
        spawn_local(async move {
            match request_stream().await {
                Ok(stream) => {
                    video.set_src_object(Some(&stream));
                    if let Ok(p) = video.play() {
                        _ = JsFuture::from(p).await;
                    }
                    attached.set(true);
                    log::info!("[video] camera stream attached");
                }
                Err(e) => log::warn!("[video] camera unavailable: {:?}", e),
            }
        });
    }

    pub fn has_stream(&self) -> bool {
        self.stream_attached.get()
    }

    /// Draw the current video frame and return its RGBA pixels.
    pub fn capture_frame(&self) -> Option<(Vec<u8>, u32, u32)> {
        if !self.has_stream() || self.video.ready_state() < HAVE_CURRENT_DATA {
            return None;
        }
        let w = self.canvas.width();
        let h = self.canvas.height();
        self.ctx
            .draw_image_with_html_video_element_and_dw_and_dh(
                &self.video,
                0.0,
                0.0,
                w as f64,
                h as f64,
            )
            .ok()?;
        let image = self.ctx.get_image_data(0.0, 0.0, w as f64, h as f64).ok()?;
        Some((image.data().0, w, h))
    }
}

async fn request_stream() -> Result<web::MediaStream, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let devices = window.navigator().media_devices()?;

    let video = js_sys::Object::new();
    js_sys::Reflect::set(&video, &"facingMode".into(), &"environment".into())?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&video);

    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream = JsFuture::from(promise).await?;
    stream.dyn_into::<web::MediaStream>()
}
