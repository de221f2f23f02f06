//! The per-tick parameter update loop.
//!
//! A single [`Controller`] owns every piece of animation state. Event handlers
//! (orientation, fullscreen, panel, keyboard) mutate it between ticks; the
//! frame loop calls [`Controller::tick`] once per animation frame and consumes
//! the returned [`FrameOutput`].

use super::angle::{advance_angle, AngleUnwrapper};
use super::constants::{MAX_FRAME_DELTA_SEC, SHAKINESS, TAU};
use super::dirty::{ChangeNotifier, DirtySet};
use super::modes::{Effects, ModeFlags, ModeTransitions};
use super::params::{ParamError, ParamId, ParameterSet};
use super::sensor::{device_quaternion, SensorSample};
use super::variant::Variant;
use glam::Quat;

/// Clamp a measured frame gap into something [`Controller::tick`] accepts.
#[inline]
pub fn sane_elapsed(dt_sec: f32) -> f32 {
    if dt_sec.is_finite() {
        dt_sec.clamp(0.0, MAX_FRAME_DELTA_SEC)
    } else {
        0.0
    }
}

/// Which object the rotation accumulators are driving this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationTarget {
    Camera,
    Sphere,
}

/// Orientation of the virtual camera and of the panorama sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewOrientation {
    pub camera: Quat,
    pub sphere: Quat,
    pub target: RotationTarget,
}

#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub dirty: DirtySet,
    pub effects: Effects,
    pub view: ViewOrientation,
}

#[derive(Clone, Debug)]
pub struct Controller {
    variant: Variant,
    params: ParameterSet,
    flags: ModeFlags,
    transitions: ModeTransitions,
    notifier: ChangeNotifier,
    unwrapper: AngleUnwrapper,
    latest_sample: Option<SensorSample>,
    screen_angle: f32,
    rotation_baseline: f32,
}

impl Controller {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            params: variant.default_params(),
            flags: ModeFlags::default(),
            transitions: ModeTransitions::default(),
            notifier: ChangeNotifier::default(),
            unwrapper: AngleUnwrapper::new(),
            latest_sample: None,
            screen_angle: 0.0,
            rotation_baseline: 0.0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Programmatic access; writes here are not clamped.
    pub fn params_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    pub fn flags(&self) -> &ModeFlags {
        &self.flags
    }

    pub fn camera_requested(&self) -> bool {
        self.transitions.camera_requested()
    }

    /// Panel edit by parameter name, clamped to the parameter's range.
    pub fn set_param_by_name(&mut self, name: &str, value: f32) -> Result<f32, ParamError> {
        self.params.set_by_name(name, value)
    }

    // ---------------- Events ----------------

    pub fn on_orientation(&mut self, sample: SensorSample) {
        self.unwrapper.push(sample.wrapped_yaw());
        self.latest_sample = Some(sample);
    }

    /// Screen rotation in radians (0 for portrait).
    pub fn on_screen_orientation(&mut self, angle: f32) {
        self.screen_angle = angle;
    }

    pub fn set_camera_active(&mut self, on: bool) {
        self.flags.camera_active = on;
    }

    pub fn set_fullscreen_active(&mut self, on: bool) {
        self.flags.fullscreen_active = on;
    }

    pub fn set_device_orientation(&mut self, on: bool) {
        self.flags.device_orientation = on;
        self.transitions.request_rebuild();
    }

    pub fn toggle_ui_zoom(&mut self) {
        self.flags.ui_zoomed = !self.flags.ui_zoomed;
        self.transitions.request_rebuild();
    }

    pub fn request_panel_rebuild(&mut self) {
        self.transitions.request_rebuild();
    }

    // ---------------- Tick ----------------

    /// Unwrapped device heading, if any sample has arrived.
    pub fn continuous_rotation(&self) -> Option<f32> {
        self.unwrapper.continuous()
    }

    /// Heading relative to the reference captured on fullscreen entry.
    pub fn relative_rotation(&self) -> Option<f32> {
        self.continuous_rotation().map(|r| r + self.rotation_baseline)
    }

    pub fn rotation_baseline(&self) -> f32 {
        self.rotation_baseline
    }

    /// Advance one frame. `elapsed_secs` must be finite and non-negative.
    pub fn tick(&mut self, elapsed_secs: f32) -> FrameOutput {
        let mut effects = Effects::new();
        if let Some(baseline) = self.transitions.apply(
            self.variant,
            &mut self.flags,
            &mut self.params,
            self.unwrapper.continuous(),
            &mut effects,
        ) {
            self.rotation_baseline = baseline;
        }

        let p = &mut self.params;
        let time = p.get(ParamId::Time) + elapsed_secs * p.get(ParamId::TimeScale);
        p.set(ParamId::Time, time);

        // Spin uses wall-clock elapsed; time scale only drives `time`.
        let rot_y = advance_angle(
            p.get(ParamId::RotationY),
            elapsed_secs * p.get(ParamId::RotationVelocityY),
        );
        p.set(ParamId::RotationY, rot_y);
        if self.variant.has_second_rotation() {
            let rot_x = advance_angle(
                p.get(ParamId::RotationX),
                elapsed_secs * p.get(ParamId::RotationVelocityX),
            );
            p.set(ParamId::RotationX, rot_x);
        }

        if self.variant.wave_from_rotation() && self.flags.fullscreen_active {
            if let Some(relative) = self.relative_rotation() {
                // Left untouched otherwise: the last value sticks after exit.
                self.params
                    .set(ParamId::WaveAmplitude, SHAKINESS * relative.abs() / TAU);
            }
        }

        let view = self.view_orientation();
        let dirty = self.notifier.diff(&self.params);
        FrameOutput {
            dirty,
            effects,
            view,
        }
    }

    fn spin(&self) -> Quat {
        let y = Quat::from_rotation_y(self.params.get(ParamId::RotationY));
        if self.variant.has_second_rotation() {
            y * Quat::from_rotation_x(self.params.get(ParamId::RotationX))
        } else {
            y
        }
    }

    pub fn view_orientation(&self) -> ViewOrientation {
        match self.latest_sample {
            Some(sample) if self.flags.device_orientation => ViewOrientation {
                camera: device_quaternion(&sample, self.screen_angle),
                sphere: self.spin(),
                target: RotationTarget::Sphere,
            },
            _ => ViewOrientation {
                camera: self.spin(),
                sphere: Quat::IDENTITY,
                target: RotationTarget::Camera,
            },
        }
    }
}
