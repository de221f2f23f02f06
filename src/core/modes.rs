//! Camera/fullscreen mode flags and their edge-triggered side effects.
//!
//! Flags are written by event handlers at any time; edges are only observed
//! once per tick by comparing against the values captured at the end of the
//! previous tick, so several flips between two ticks collapse to the net state.

use super::params::ParameterSet;
use super::variant::Variant;
use smallvec::SmallVec;

/// Side effects the host must carry out after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Start the camera stream. Emitted at most once per controller.
    AcquireCamera,
    RebuildPanel,
    DestroyPanel,
    CreatePanel,
}

pub type Effects = SmallVec<[Effect; 4]>;

#[derive(Clone, Debug)]
pub struct ModeFlags {
    pub camera_active: bool,
    pub previous_camera_active: bool,
    pub fullscreen_active: bool,
    pub previous_fullscreen_active: bool,
    /// Let device orientation drive the camera when samples are available.
    pub device_orientation: bool,
    pub ui_zoomed: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            // Camera starts on; the first tick sees the off→on edge.
            camera_active: true,
            previous_camera_active: false,
            fullscreen_active: false,
            previous_fullscreen_active: false,
            device_orientation: true,
            ui_zoomed: false,
        }
    }
}

/// Applies mode edges to the parameter set and records the resulting effects.
#[derive(Clone, Debug, Default)]
pub struct ModeTransitions {
    camera_requested: bool,
    rebuild_requested: bool,
}

impl ModeTransitions {
    pub fn request_rebuild(&mut self) {
        self.rebuild_requested = true;
    }

    pub fn camera_requested(&self) -> bool {
        self.camera_requested
    }

    /// Handle this tick's edges. `continuous_rotation` is the unwrapped device
    /// heading; on fullscreen entry the returned baseline replaces the old one.
    pub fn apply(
        &mut self,
        variant: Variant,
        flags: &mut ModeFlags,
        params: &mut ParameterSet,
        continuous_rotation: Option<f32>,
        effects: &mut Effects,
    ) -> Option<f32> {
        let mut new_baseline = None;
        let mut rebuild = std::mem::take(&mut self.rebuild_requested);

        if flags.camera_active {
            if !self.camera_requested {
                self.camera_requested = true;
                effects.push(Effect::AcquireCamera);
                log::info!("[modes] camera stream requested");
            }
            if !flags.previous_camera_active {
                variant.camera_active().apply(params);
                rebuild = true;
                log::info!("[modes] camera on");
            }
        } else {
            // Held neutral every tick while off, not only on the edge.
            variant.camera_neutral().apply(params);
            if flags.previous_camera_active {
                rebuild = true;
                log::info!("[modes] camera off");
            }
        }
        flags.previous_camera_active = flags.camera_active;

        match (flags.previous_fullscreen_active, flags.fullscreen_active) {
            (false, true) => {
                effects.push(Effect::DestroyPanel);
                let baseline = -continuous_rotation.unwrap_or(0.0);
                new_baseline = Some(baseline);
                rebuild = false;
                log::info!("[modes] fullscreen on, baseline={:.3}", baseline);
            }
            (true, false) => {
                effects.push(Effect::CreatePanel);
                // A fresh panel already reflects the current state.
                rebuild = false;
                log::info!("[modes] fullscreen off");
            }
            _ => {}
        }
        flags.previous_fullscreen_active = flags.fullscreen_active;

        if rebuild && !flags.fullscreen_active {
            effects.push(Effect::RebuildPanel);
        }
        new_baseline
    }
}
