use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn is_fullscreen(document: &web::Document) -> bool {
    document.fullscreen_element().is_some()
}

pub fn toggle_fullscreen(canvas: &web::HtmlCanvasElement) {
    if let Some(doc) = window_document() {
        if is_fullscreen(&doc) {
            doc.exit_fullscreen();
        } else if let Err(e) = canvas.request_fullscreen() {
            log::warn!("[dom] fullscreen request rejected: {:?}", e);
        }
    }
}

pub fn exit_fullscreen() {
    if let Some(doc) = window_document() {
        if is_fullscreen(&doc) {
            doc.exit_fullscreen();
        }
    }
}

/// `location.search` of the current page, empty when unavailable.
pub fn location_search() -> String {
    web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Screen rotation in radians, 0 when the API is missing.
pub fn screen_angle() -> f32 {
    web::window()
        .and_then(|w| w.screen().ok())
        .and_then(|s| s.orientation().angle().ok())
        .map(|deg| (deg as f32).to_radians())
        .unwrap_or(0.0)
}

pub fn open_in_new_tab(url: &str) {
    if let Some(w) = web::window() {
        _ = w.open_with_url_and_target(url, "_blank");
    }
}
