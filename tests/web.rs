// Browser tests; run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use portal_web::core::{Controller, Variant};
use portal_web::events::sensors::sample_from_event;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn orientation_event(alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>) -> web::DeviceOrientationEvent {
    let init = web::DeviceOrientationEventInit::new();
    init.set_alpha(alpha);
    init.set_beta(beta);
    init.set_gamma(gamma);
    web::DeviceOrientationEvent::new_with_event_init_dict("deviceorientation", &init)
        .expect("construct DeviceOrientationEvent")
}

#[wasm_bindgen_test]
fn event_angles_convert_to_radians() {
    let ev = orientation_event(Some(180.0), Some(90.0), Some(-45.0));
    let s = sample_from_event(&ev).expect("sample");
    assert!((s.yaw - std::f32::consts::PI).abs() < 1e-5);
    assert!((s.pitch - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    assert!((s.roll + std::f32::consts::FRAC_PI_4).abs() < 1e-5);
}

#[wasm_bindgen_test]
fn event_without_angles_is_ignored() {
    let ev = orientation_event(None, None, None);
    assert!(sample_from_event(&ev).is_none());
}

#[wasm_bindgen_test]
fn controller_ticks_in_browser() {
    let mut c = Controller::new(Variant::Zone);
    let ev = orientation_event(Some(30.0), Some(80.0), Some(0.0));
    c.on_orientation(sample_from_event(&ev).expect("sample"));
    let out = c.tick(0.016);
    assert!(c.camera_requested());
    assert!(!out.dirty.is_empty());
}
