//! The two demo flavours and everything that differs between them.

use super::constants::*;
use super::params::{ParamId, ParameterSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Portal,
    Zone,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown variant `{0}` (expected `portal` or `zone`)")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portal" => Ok(Variant::Portal),
            "zone" => Ok(Variant::Zone),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Portal => "portal",
            Variant::Zone => "zone",
        })
    }
}

/// Camera blend values applied on a camera-mode edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPreset {
    pub multiply: f32,
    pub add: f32,
    /// `None` leaves saturation to the user.
    pub saturation: Option<f32>,
}

impl CameraPreset {
    pub fn apply(&self, params: &mut ParameterSet) {
        params.set(ParamId::CameraMultiply, self.multiply);
        params.set(ParamId::CameraAdd, self.add);
        if let Some(s) = self.saturation {
            params.set(ParamId::Saturation, s);
        }
    }
}

/// A titled group of parameters in the panel.
#[derive(Clone, Copy, Debug)]
pub struct PanelFolder {
    pub title: &'static str,
    pub params: &'static [ParamId],
    /// The camera folder also carries the mode toggles.
    pub has_mode_toggles: bool,
}

const GENERAL_PORTAL: &[ParamId] = &[
    ParamId::TimeScale,
    ParamId::Time,
    ParamId::RotationY,
    ParamId::RotationVelocityY,
];
const GENERAL_ZONE: &[ParamId] = &[
    ParamId::TimeScale,
    ParamId::Time,
    ParamId::RotationY,
    ParamId::RotationVelocityY,
    ParamId::RotationX,
    ParamId::RotationVelocityX,
];
const COLOR: &[ParamId] = &[ParamId::Saturation, ParamId::Multiply];
const WAVE: &[ParamId] = &[ParamId::WaveAmplitude, ParamId::WaveFrequency];
const CAMERA: &[ParamId] = &[ParamId::CameraMultiply, ParamId::CameraAdd];

const PORTAL_FOLDERS: &[PanelFolder] = &[
    PanelFolder { title: "General", params: GENERAL_PORTAL, has_mode_toggles: false },
    PanelFolder { title: "Color", params: COLOR, has_mode_toggles: false },
    PanelFolder { title: "Camera", params: CAMERA, has_mode_toggles: true },
];
const ZONE_FOLDERS: &[PanelFolder] = &[
    PanelFolder { title: "General", params: GENERAL_ZONE, has_mode_toggles: false },
    PanelFolder { title: "Color", params: COLOR, has_mode_toggles: false },
    PanelFolder { title: "Wave", params: WAVE, has_mode_toggles: false },
    PanelFolder { title: "Camera", params: CAMERA, has_mode_toggles: true },
];

impl Variant {
    /// Pick the variant from a URL query string such as `?variant=zone`.
    pub fn from_query(search: &str) -> Result<Option<Variant>, UnknownVariant> {
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "variant")
            .map(|(_, value)| value.parse::<Variant>())
            .transpose()
    }

    pub fn folders(self) -> &'static [PanelFolder] {
        match self {
            Variant::Portal => PORTAL_FOLDERS,
            Variant::Zone => ZONE_FOLDERS,
        }
    }

    pub fn camera_active(self) -> CameraPreset {
        CameraPreset {
            multiply: CAMERA_ACTIVE_MULTIPLY,
            add: CAMERA_ACTIVE_ADD,
            saturation: match self {
                Variant::Portal => None,
                Variant::Zone => Some(ZONE_CAMERA_ACTIVE_SATURATION),
            },
        }
    }

    pub fn camera_neutral(self) -> CameraPreset {
        CameraPreset {
            multiply: CAMERA_NEUTRAL_MULTIPLY,
            add: CAMERA_NEUTRAL_ADD,
            saturation: match self {
                Variant::Portal => None,
                Variant::Zone => Some(ZONE_CAMERA_NEUTRAL_SATURATION),
            },
        }
    }

    /// Zone spins around a second axis.
    pub fn has_second_rotation(self) -> bool {
        matches!(self, Variant::Zone)
    }

    /// Zone derives the wave amplitude from device rotation in fullscreen.
    pub fn wave_from_rotation(self) -> bool {
        matches!(self, Variant::Zone)
    }

    pub fn default_params(self) -> ParameterSet {
        let mut params = ParameterSet::default();
        match self {
            // No wave folder on portal, so the shader wave stays flat.
            Variant::Portal => params.set(ParamId::WaveAmplitude, 0.0),
            Variant::Zone => {
                params.set(ParamId::RotationVelocityY, ZONE_ROTATION_VELOCITY_Y);
                params.set(ParamId::RotationVelocityX, ZONE_ROTATION_VELOCITY_X);
            }
        }
        params
    }
}
