//! Device-orientation samples and their mapping to a camera rotation.

use super::angle::wrap_signed;
use glam::{EulerRot, Quat};
use std::f32::consts::FRAC_PI_2;

/// One `deviceorientation` reading, in radians.
///
/// `yaw` is the compass heading (alpha), `pitch` the front-back tilt (beta)
/// and `roll` the left-right tilt (gamma).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorSample {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl SensorSample {
    pub fn from_degrees(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            yaw: alpha.to_radians() as f32,
            pitch: beta.to_radians() as f32,
            roll: gamma.to_radians() as f32,
        }
    }

    /// Heading folded into (−π, π] for the angle unwrapper.
    #[inline]
    pub fn wrapped_yaw(&self) -> f32 {
        wrap_signed(self.yaw)
    }
}

/// Camera rotation for a phone held upright looking through its back camera.
///
/// Euler YXZ of (alpha, beta, −gamma), then a −90° turn about X so the
/// camera looks out of the back of the device instead of up from the screen,
/// then undo the screen rotation (`screen_angle`, radians) about Z.
pub fn device_quaternion(sample: &SensorSample, screen_angle: f32) -> Quat {
    let device = Quat::from_euler(EulerRot::YXZ, sample.yaw, sample.pitch, -sample.roll);
    let back_camera = Quat::from_rotation_x(-FRAC_PI_2);
    let screen = Quat::from_rotation_z(-screen_angle);
    (device * back_camera * screen).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn flat_device_looks_at_floor() {
        // Lying flat, screen up: back camera points at the floor.
        let q = device_quaternion(&SensorSample::default(), 0.0);
        let forward = q * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn upright_device_looks_at_horizon() {
        let s = SensorSample::from_degrees(0.0, 90.0, 0.0);
        let forward = device_quaternion(&s, 0.0) * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }
}
