pub mod angle;
pub mod constants;
pub mod controller;
pub mod dirty;
pub mod modes;
pub mod params;
pub mod sensor;
pub mod variant;

pub use angle::AngleUnwrapper;
pub use controller::{sane_elapsed, Controller, FrameOutput, RotationTarget, ViewOrientation};
pub use dirty::{ChangeNotifier, DirtySet};
pub use modes::{Effect, Effects, ModeFlags, ModeTransitions};
pub use params::{ParamError, ParamId, ParamSpec, Parameter, ParameterSet};
pub use sensor::{device_quaternion, SensorSample};
pub use variant::{CameraPreset, PanelFolder, UnknownVariant, Variant};

// Shader bundled as a string constant
pub static PANORAMA_WGSL: &str = include_str!("../../shaders/panorama.wgsl");
