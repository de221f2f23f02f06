/// Web front-end tuning constants.
///
/// DOM ids, capture sizes and camera projection values live here so the
/// wiring code stays free of magic numbers.
// Elements expected in index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const VIDEO_ID: &str = "video";
pub const VIDEO_CANVAS_ID: &str = "video-canvas";
pub const PANEL_ID: &str = "panel";

// Camera frames are scaled into this texture size
pub const VIDEO_TEX_WIDTH: u32 = 512;
pub const VIDEO_TEX_HEIGHT: u32 = 256;

// Projection
pub const FOV_Y_DEG: f32 = 90.0;
pub const Z_NEAR: f32 = 1.0;
pub const Z_FAR: f32 = 1000.0;

// Panel
pub const UI_ZOOM_SCALE: f32 = 2.0;
pub const SOURCE_URL: &str = "https://github.com/foolmoron/portal";
