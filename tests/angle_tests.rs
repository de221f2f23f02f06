// Host-side tests for the angle unwrapper and rotation accumulators.

use portal_web::core::angle::{advance_angle, wrap_signed, AngleUnwrapper};
use std::f32::consts::{PI, TAU};

const STEP: f32 = 0.3;

#[test]
fn forward_sweep_stays_continuous_across_wrap() {
    let mut u = AngleUnwrapper::new();
    let mut prev = u.push(wrap_signed(0.0));
    for k in 1..100 {
        let truth = k as f32 * STEP;
        let cont = u.push(wrap_signed(truth));
        assert!(
            (cont - prev - STEP).abs() < 1e-3,
            "jump at k={k}: {prev} -> {cont}"
        );
        assert!((cont - truth).abs() < 1e-3, "k={k}: {cont} vs {truth}");
        prev = cont;
    }
    // ~30 rad is almost five turns
    assert!(u.accumulated_offset() > 4.0 * TAU - 1e-3);
}

#[test]
fn backward_sweep_stays_continuous_across_wrap() {
    let mut u = AngleUnwrapper::new();
    let mut prev = u.push(wrap_signed(0.0));
    for k in 1..60 {
        let truth = -(k as f32) * STEP;
        let cont = u.push(wrap_signed(truth));
        assert!((cont - prev + STEP).abs() < 1e-3, "jump at k={k}");
        assert!((cont - truth).abs() < 1e-3);
        prev = cont;
    }
    assert!(u.accumulated_offset() < 0.0);
}

#[test]
fn small_steps_never_touch_the_offset() {
    let mut u = AngleUnwrapper::new();
    for raw in [0.1, 0.4, -0.2, 1.5, 2.9, 2.0, -1.0, -2.8, -3.0] {
        u.push(raw);
    }
    assert_eq!(u.accumulated_offset(), 0.0);
    assert_eq!(u.continuous(), Some(-3.0));
}

#[test]
fn wrap_after_reversal_is_not_detected() {
    // 3.0 -> 3.1 -> 3.0 leaves a negative previous delta, so the jump to
    // -3.1 (a small forward turn across ±π) is not recognised as a wrap.
    let mut u = AngleUnwrapper::new();
    u.push(3.0);
    u.push(3.1);
    u.push(3.0);
    let cont = u.push(-3.1);
    assert_eq!(u.accumulated_offset(), 0.0);
    assert_eq!(cont, -3.1);
}

#[test]
fn wrap_with_matching_sign_is_corrected() {
    let mut u = AngleUnwrapper::new();
    u.push(3.0);
    u.push(3.1);
    let cont = u.push(-3.1);
    assert!((u.accumulated_offset() - TAU).abs() < 1e-6);
    assert!((cont - (TAU - 3.1)).abs() < 1e-5);
    assert!(cont > PI);
}

#[test]
fn advance_by_full_turn_returns_to_start() {
    for start in [0.0_f32, 0.5, 1.0, 3.0, 6.0] {
        let a = advance_angle(start, TAU);
        assert!((a - start).abs() < 1e-5, "{start} -> {a}");
    }
}

#[test]
fn advance_by_zero_is_exact_noop() {
    for start in [0.0_f32, 1.234_567, 6.28] {
        assert_eq!(advance_angle(start, 0.0).to_bits(), start.to_bits());
    }
}

#[test]
fn advance_stays_in_half_open_range() {
    let mut a = 0.0;
    for _ in 0..10_000 {
        a = advance_angle(a, 0.173);
        assert!((0.0..TAU).contains(&a), "{a}");
    }
}

#[test]
fn wrap_signed_range() {
    for k in -50..50 {
        let w = wrap_signed(k as f32 * 0.37);
        assert!(w > -PI && w <= PI, "{w}");
    }
}
