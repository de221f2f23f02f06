//! The closed set of animation/shader parameters.
//!
//! Every parameter is identified by a [`ParamId`]; values live in a flat array
//! so the change notifier can diff them without reflection. Names match the
//! panel/uniform naming used by the web front-end.

use super::constants::*;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamId {
    Time,
    TimeScale,
    RotationY,
    RotationVelocityY,
    RotationX,
    RotationVelocityX,
    Saturation,
    Multiply,
    WaveAmplitude,
    WaveFrequency,
    CameraMultiply,
    CameraAdd,
}

impl ParamId {
    pub const COUNT: usize = 12;

    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::Time,
        ParamId::TimeScale,
        ParamId::RotationY,
        ParamId::RotationVelocityY,
        ParamId::RotationX,
        ParamId::RotationVelocityX,
        ParamId::Saturation,
        ParamId::Multiply,
        ParamId::WaveAmplitude,
        ParamId::WaveFrequency,
        ParamId::CameraMultiply,
        ParamId::CameraAdd,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn spec(self) -> &'static ParamSpec {
        &SPECS[self.index()]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn from_name(name: &str) -> Option<ParamId> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }

    /// Parameters the panel keeps in step with the controller after each tick.
    /// The animated accumulators are left alone so typing or dragging is not
    /// overwritten every frame.
    pub fn follows_in_panel(self) -> bool {
        !matches!(
            self,
            ParamId::Time | ParamId::RotationY | ParamId::RotationX
        )
    }

    /// Parameters that end up in the shader uniform block.
    pub fn is_uniform(self) -> bool {
        matches!(
            self,
            ParamId::Time
                | ParamId::Saturation
                | ParamId::Multiply
                | ParamId::WaveAmplitude
                | ParamId::WaveFrequency
                | ParamId::CameraMultiply
                | ParamId::CameraAdd
        )
    }
}

/// Static description of a parameter as the panel presents it.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

impl ParamSpec {
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

// Indexed by `ParamId as usize`
static SPECS: [ParamSpec; ParamId::COUNT] = [
    ParamSpec { name: "time", label: "Time", min: 0.0, max: f32::INFINITY, step: 0.1, default: DEFAULT_TIME },
    ParamSpec { name: "timeScale", label: "Time Scale", min: 0.0, max: 3.0, step: 0.1, default: DEFAULT_TIME_SCALE },
    ParamSpec { name: "rotation", label: "Rotation", min: 0.0, max: TAU, step: 0.1, default: 0.0 },
    ParamSpec { name: "rotationVelocity", label: "Rotation Velocity", min: 0.0, max: TAU * 4.0, step: 0.1, default: DEFAULT_ROTATION_VELOCITY },
    ParamSpec { name: "rotationX", label: "Tilt", min: 0.0, max: TAU, step: 0.1, default: 0.0 },
    ParamSpec { name: "rotationVelocityX", label: "Tilt Velocity", min: 0.0, max: TAU * 4.0, step: 0.1, default: 0.0 },
    ParamSpec { name: "saturation", label: "Saturation", min: 0.0, max: 1.0, step: 0.05, default: 0.0 },
    ParamSpec { name: "multiply", label: "Multiply", min: 0.0, max: 3.0, step: 0.05, default: 1.0 },
    ParamSpec { name: "waveAmplitude", label: "Amplitude", min: 0.0, max: 4.0, step: 0.05, default: DEFAULT_WAVE_AMPLITUDE },
    ParamSpec { name: "waveFrequency", label: "Frequency", min: 0.0, max: 20.0, step: 0.5, default: DEFAULT_WAVE_FREQUENCY },
    ParamSpec { name: "cameraMultiply", label: "Multiply", min: 0.0, max: 2.0, step: 0.05, default: CAMERA_NEUTRAL_MULTIPLY },
    ParamSpec { name: "cameraAdd", label: "Add", min: 0.0, max: 2.0, step: 0.05, default: CAMERA_NEUTRAL_ADD },
];

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
    #[error("non-finite value {value} for parameter `{name}`")]
    NonFinite { name: &'static str, value: f32 },
}

/// Snapshot of one parameter, as handed to the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameter {
    pub id: ParamId,
    pub name: &'static str,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    values: [f32; ParamId::COUNT],
}

impl Default for ParameterSet {
    fn default() -> Self {
        let mut values = [0.0; ParamId::COUNT];
        for id in ParamId::ALL {
            values[id.index()] = id.spec().default;
        }
        Self { values }
    }
}

impl ParameterSet {
    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }

    /// Direct write; no clamping.
    #[inline]
    pub fn set(&mut self, id: ParamId, value: f32) {
        self.values[id.index()] = value;
    }

    /// Panel write: clamps into the parameter's range and returns the stored value.
    pub fn set_clamped(&mut self, id: ParamId, value: f32) -> Result<f32, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NonFinite {
                name: id.name(),
                value,
            });
        }
        let v = id.spec().clamp(value);
        self.set(id, v);
        Ok(v)
    }

    pub fn set_by_name(&mut self, name: &str, value: f32) -> Result<f32, ParamError> {
        let id =
            ParamId::from_name(name).ok_or_else(|| ParamError::UnknownParameter(name.to_string()))?;
        self.set_clamped(id, value)
    }

    pub fn parameter(&self, id: ParamId) -> Parameter {
        let spec = id.spec();
        Parameter {
            id,
            name: spec.name,
            value: self.get(id),
            min: spec.min,
            max: spec.max,
            step: spec.step,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Parameter> + '_ {
        ParamId::ALL.iter().map(move |&id| self.parameter(id))
    }

    pub(crate) fn values(&self) -> &[f32; ParamId::COUNT] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specs_are_indexed_by_id() {
        for id in ParamId::ALL {
            assert_eq!(ParamId::from_name(id.name()), Some(id));
        }
    }

    #[test]
    fn direct_writes_bypass_clamping() {
        let mut p = ParameterSet::default();
        p.set(ParamId::Saturation, 7.0);
        assert_eq!(p.get(ParamId::Saturation), 7.0);
        assert_eq!(p.set_clamped(ParamId::Saturation, 7.0), Ok(1.0));
    }
}
