// Host-side tests for the per-tick update loop and mode transitions.

use portal_web::core::constants::SHAKINESS;
use portal_web::core::{
    sane_elapsed, Controller, Effect, ParamId, RotationTarget, SensorSample, Variant,
};
use glam::Quat;
use std::f32::consts::{PI, TAU};

fn count(effects: &[Effect], e: Effect) -> usize {
    effects.iter().filter(|x| **x == e).count()
}

/// Feed headings (degrees) that unwrap to a continuous 3π/2.
fn turn_three_quarters(c: &mut Controller) {
    for alpha in [0.0, 90.0, 135.0, 270.0] {
        c.on_orientation(SensorSample::from_degrees(alpha, 90.0, 0.0));
    }
}

#[test]
fn first_tick_turns_camera_on() {
    let mut c = Controller::new(Variant::Portal);
    assert_eq!(c.params().get(ParamId::CameraMultiply), 0.0);
    assert_eq!(c.params().get(ParamId::CameraAdd), 0.0);

    let out = c.tick(0.016);
    assert_eq!(c.params().get(ParamId::CameraMultiply), 1.0);
    assert_eq!(c.params().get(ParamId::CameraAdd), 1.0);
    assert_eq!(count(&out.effects, Effect::AcquireCamera), 1);
    assert_eq!(count(&out.effects, Effect::RebuildPanel), 1);
    assert!(c.camera_requested());
}

#[test]
fn camera_toggle_on_jumps_blend_in_same_tick() {
    let mut c = Controller::new(Variant::Portal);
    c.set_camera_active(false);
    c.tick(0.0);
    assert_eq!(c.params().get(ParamId::CameraMultiply), 0.0);
    assert_eq!(c.params().get(ParamId::CameraAdd), 0.0);

    c.set_camera_active(true);
    let out = c.tick(0.0);
    assert_eq!(c.params().get(ParamId::CameraMultiply), 1.0);
    assert_eq!(c.params().get(ParamId::CameraAdd), 1.0);
    assert!(out.dirty.contains(ParamId::CameraMultiply));
    assert!(out.dirty.contains(ParamId::CameraAdd));
}

#[test]
fn camera_acquired_exactly_once() {
    let mut c = Controller::new(Variant::Zone);
    let mut acquired = 0;
    for i in 0..20 {
        c.set_camera_active(i % 3 != 0);
        acquired += count(&c.tick(0.01).effects, Effect::AcquireCamera);
    }
    assert_eq!(acquired, 1);
}

#[test]
fn camera_off_resets_and_holds_neutral() {
    let mut c = Controller::new(Variant::Zone);
    c.tick(0.0);
    assert_eq!(c.params().get(ParamId::Saturation), 0.5);

    c.set_camera_active(false);
    let out = c.tick(0.0);
    assert_eq!(count(&out.effects, Effect::RebuildPanel), 1);
    assert_eq!(c.params().get(ParamId::CameraMultiply), 0.0);
    assert_eq!(c.params().get(ParamId::Saturation), 0.0);

    // Panel edits are overridden while the camera stays off
    c.set_param_by_name("cameraAdd", 1.5).unwrap();
    let out = c.tick(0.0);
    assert_eq!(c.params().get(ParamId::CameraAdd), 0.0);
    assert!(!out.effects.contains(&Effect::RebuildPanel));
}

#[test]
fn toggles_between_ticks_collapse_to_net_state() {
    let mut c = Controller::new(Variant::Portal);
    c.tick(0.0);
    c.set_camera_active(false);
    c.set_camera_active(true);
    let out = c.tick(0.0);
    assert!(out.effects.is_empty());
}

#[test]
fn zero_tick_leaves_rotation_untouched() {
    let mut c = Controller::new(Variant::Zone);
    c.params_mut().set(ParamId::RotationY, 1.234);
    c.params_mut().set(ParamId::RotationX, 4.321);
    c.params_mut().set(ParamId::RotationVelocityX, 2.0);
    c.tick(0.0);
    assert_eq!(c.params().get(ParamId::RotationY), 1.234);
    assert_eq!(c.params().get(ParamId::RotationX), 4.321);
}

#[test]
fn rotation_wraps_after_full_turn() {
    let mut c = Controller::new(Variant::Portal);
    c.params_mut().set(ParamId::RotationY, 1.0);
    c.params_mut().set(ParamId::RotationVelocityY, TAU);
    c.tick(1.0);
    assert!((c.params().get(ParamId::RotationY) - 1.0).abs() < 1e-5);
}

#[test]
fn time_advances_by_scaled_elapsed() {
    let mut c = Controller::new(Variant::Portal);
    let t0 = c.params().get(ParamId::Time);
    c.params_mut().set(ParamId::TimeScale, 2.0);
    c.tick(0.05);
    assert!((c.params().get(ParamId::Time) - (t0 + 0.1)).abs() < 1e-5);
}

#[test]
fn zero_time_scale_keeps_spinning() {
    let mut c = Controller::new(Variant::Portal);
    c.params_mut().set(ParamId::TimeScale, 0.0);
    let t0 = c.params().get(ParamId::Time);
    c.params_mut().set(ParamId::RotationVelocityY, 1.0);
    c.tick(0.05);
    assert_eq!(c.params().get(ParamId::Time), t0);
    assert!((c.params().get(ParamId::RotationY) - 0.05).abs() < 1e-6);
}

#[test]
fn only_zone_spins_second_axis() {
    let mut portal = Controller::new(Variant::Portal);
    let mut zone = Controller::new(Variant::Zone);
    for c in [&mut portal, &mut zone] {
        c.params_mut().set(ParamId::RotationVelocityX, 1.0);
        c.tick(0.5);
    }
    assert_eq!(portal.params().get(ParamId::RotationX), 0.0);
    assert!((zone.params().get(ParamId::RotationX) - 0.5).abs() < 1e-6);
}

#[test]
fn dirty_tracks_value_changes_between_ticks() {
    let mut c = Controller::new(Variant::Portal);
    let first = c.tick(0.0);
    assert_eq!(first.dirty.len(), ParamId::COUNT);

    c.params_mut().set(ParamId::Time, 0.5);
    assert!(c.tick(0.0).dirty.contains(ParamId::Time));

    c.params_mut().set(ParamId::Time, 0.5);
    let out = c.tick(0.0);
    assert!(!out.dirty.contains(ParamId::Time));
    assert!(out.dirty.is_empty());

    c.params_mut().set(ParamId::Time, 0.6);
    let out = c.tick(0.0);
    assert!(out.dirty.contains(ParamId::Time));
    assert_eq!(out.dirty.len(), 1);
}

#[test]
fn fullscreen_entry_captures_baseline() {
    let mut c = Controller::new(Variant::Zone);
    c.tick(0.0);
    turn_three_quarters(&mut c);
    let cont = c.continuous_rotation().unwrap();
    assert!((cont - 3.0 * PI / 2.0).abs() < 1e-4, "{cont}");

    c.set_fullscreen_active(true);
    let out = c.tick(0.0);
    assert_eq!(out.effects.as_slice(), &[Effect::DestroyPanel]);
    assert!((c.rotation_baseline() + 3.0 * PI / 2.0).abs() < 1e-4);
    assert!(c.params().get(ParamId::WaveAmplitude).abs() < 1e-5);
}

#[test]
fn fullscreen_without_samples_uses_zero_baseline() {
    let mut c = Controller::new(Variant::Zone);
    c.tick(0.0);
    c.set_fullscreen_active(true);
    c.tick(0.0);
    assert_eq!(c.rotation_baseline(), 0.0);
    // No continuous rotation: amplitude keeps its default
    assert_eq!(c.params().get(ParamId::WaveAmplitude), 0.25);
}

#[test]
fn wave_amplitude_follows_rotation_then_sticks() {
    let mut c = Controller::new(Variant::Zone);
    c.tick(0.0);
    turn_three_quarters(&mut c);
    c.set_fullscreen_active(true);
    c.tick(0.0);

    // Another 30°: relative rotation π/6
    c.on_orientation(SensorSample::from_degrees(300.0, 90.0, 0.0));
    c.tick(0.0);
    let expected = SHAKINESS * (PI / 6.0) / TAU;
    let amp = c.params().get(ParamId::WaveAmplitude);
    assert!((amp - expected).abs() < 1e-4, "{amp} vs {expected}");

    c.set_fullscreen_active(false);
    let out = c.tick(0.0);
    assert_eq!(out.effects.as_slice(), &[Effect::CreatePanel]);

    c.on_orientation(SensorSample::from_degrees(10.0, 90.0, 0.0));
    c.tick(0.0);
    assert_eq!(c.params().get(ParamId::WaveAmplitude), amp);
}

#[test]
fn portal_ignores_rotation_for_wave() {
    let mut c = Controller::new(Variant::Portal);
    let first = c.tick(0.0);
    assert!(first.dirty.contains(ParamId::WaveAmplitude));
    assert_eq!(c.params().get(ParamId::WaveAmplitude), 0.0);
    turn_three_quarters(&mut c);
    c.set_fullscreen_active(true);
    c.tick(0.0);
    c.on_orientation(SensorSample::from_degrees(300.0, 90.0, 0.0));
    c.tick(0.0);
    assert_eq!(c.params().get(ParamId::WaveAmplitude), 0.0);
}

#[test]
fn rebuild_requests_dropped_in_fullscreen() {
    let mut c = Controller::new(Variant::Portal);
    c.tick(0.0);
    c.set_fullscreen_active(true);
    c.tick(0.0);

    c.toggle_ui_zoom();
    c.request_panel_rebuild();
    let out = c.tick(0.0);
    assert!(out.effects.is_empty());

    c.set_fullscreen_active(false);
    let out = c.tick(0.0);
    assert_eq!(out.effects.as_slice(), &[Effect::CreatePanel]);
}

#[test]
fn ui_zoom_and_orientation_toggle_request_rebuild() {
    let mut c = Controller::new(Variant::Portal);
    c.tick(0.0);

    c.toggle_ui_zoom();
    assert!(c.flags().ui_zoomed);
    assert_eq!(c.tick(0.0).effects.as_slice(), &[Effect::RebuildPanel]);

    c.set_device_orientation(false);
    assert_eq!(c.tick(0.0).effects.as_slice(), &[Effect::RebuildPanel]);
    assert!(c.tick(0.0).effects.is_empty());
}

#[test]
fn rotations_drive_camera_without_sensor() {
    let mut c = Controller::new(Variant::Portal);
    c.params_mut().set(ParamId::RotationY, 1.0);
    let view = c.tick(0.0).view;
    assert_eq!(view.target, RotationTarget::Camera);
    assert_eq!(view.sphere, Quat::IDENTITY);
    assert!(view.camera.angle_between(Quat::from_rotation_y(1.0)) < 1e-5);
}

#[test]
fn rotations_drive_sphere_with_sensor() {
    let mut c = Controller::new(Variant::Portal);
    c.params_mut().set(ParamId::RotationY, 1.0);
    c.on_orientation(SensorSample::from_degrees(45.0, 90.0, 0.0));
    let view = c.tick(0.0).view;
    assert_eq!(view.target, RotationTarget::Sphere);
    assert!(view.sphere.angle_between(Quat::from_rotation_y(1.0)) < 1e-5);

    c.set_device_orientation(false);
    assert_eq!(c.tick(0.0).view.target, RotationTarget::Camera);
}

#[test]
fn panel_writes_are_clamped() {
    let mut c = Controller::new(Variant::Portal);
    assert_eq!(c.set_param_by_name("saturation", 4.0), Ok(1.0));
    assert_eq!(c.params().get(ParamId::Saturation), 1.0);
    assert!(c.set_param_by_name("nope", 1.0).is_err());
}

#[test]
fn sane_elapsed_clamps_frame_gaps() {
    assert_eq!(sane_elapsed(0.016), 0.016);
    assert_eq!(sane_elapsed(5.0), 0.1);
    assert_eq!(sane_elapsed(-1.0), 0.0);
    assert_eq!(sane_elapsed(f32::NAN), 0.0);
    assert_eq!(sane_elapsed(f32::INFINITY), 0.0);
}
