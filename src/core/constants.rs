// Shared animation tuning constants used by the controller and both variants.

pub const TAU: f32 = std::f32::consts::TAU;

// Starting value of the shader clock; the pattern looks flat near zero.
pub const DEFAULT_TIME: f32 = 30.0;
pub const DEFAULT_TIME_SCALE: f32 = 1.0;

// Frame clock: longer gaps (hidden tab, debugger) are treated as this long
pub const MAX_FRAME_DELTA_SEC: f32 = 0.1;

// Default spin of the panorama (radians per second)
pub const DEFAULT_ROTATION_VELOCITY: f32 = TAU / 8.0;
pub const ZONE_ROTATION_VELOCITY_Y: f32 = TAU / 16.0;
pub const ZONE_ROTATION_VELOCITY_X: f32 = 0.0;

// Wave amplitude gained per full turn of the device while in fullscreen
pub const SHAKINESS: f32 = 2.0;

pub const DEFAULT_WAVE_AMPLITUDE: f32 = 0.25;
pub const DEFAULT_WAVE_FREQUENCY: f32 = 4.0;

// Camera blend presets (multiply, add)
pub const CAMERA_ACTIVE_MULTIPLY: f32 = 1.0;
pub const CAMERA_ACTIVE_ADD: f32 = 1.0;
pub const CAMERA_NEUTRAL_MULTIPLY: f32 = 0.0;
pub const CAMERA_NEUTRAL_ADD: f32 = 0.0;

// Zone also drives saturation from camera mode
pub const ZONE_CAMERA_ACTIVE_SATURATION: f32 = 0.5;
pub const ZONE_CAMERA_NEUTRAL_SATURATION: f32 = 0.0;
