//! Motion Tests
//!
//! Tests for:
//! - MotionBank insertion, duplicate ids, degenerate motions, stateless evaluation
//! - play_loop: start, stop, wrap, blocking in call order
//! - play_once: start, restart, finish, blocked requests
//! - Fading of inactive motions
//! - Director transform writes

use std::sync::Arc;

use glam::{Quat, Vec3};

use weapon_rig::animation::{
    Curve, CurveSet, InterpolationMode, Motion, MotionBank, MotionDirector, MotionState,
    NO_BLOCKERS, PlayOutcome,
};
use weapon_rig::errors::{IdKind, RigError};
use weapon_rig::scene::{Offset, Transform};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// X ramps 0 -> 1 over the motion's duration.
fn ramp(id: &str, duration: f32) -> Motion {
    let curves = CurveSet::flat(duration).with_position(
        Curve::linear(0.0, 0.0, 1.0, 1.0),
        Curve::flat(),
        Curve::flat(),
    );
    Motion::new(id, Arc::new(curves))
}

/// X held at 1 for the whole duration.
fn hold(id: &str, duration: f32) -> Motion {
    let curves =
        CurveSet::flat(duration).with_position(Curve::constant(1.0), Curve::flat(), Curve::flat());
    Motion::new(id, Arc::new(curves))
}

fn director(motions: Vec<Motion>) -> MotionDirector {
    let mut bank = MotionBank::new();
    for motion in motions {
        bank.insert(motion).unwrap();
    }
    MotionDirector::new(bank)
}

fn weapon_director() -> MotionDirector {
    director(vec![
        hold("Draw", 0.5),
        hold("Recoil", 0.2),
        ramp("Bob", 1.0),
        ramp("Idle", 2.0),
    ])
}

fn state(director: &MotionDirector, id: &str) -> MotionState {
    director.bank().get(id).unwrap().state()
}

// ============================================================================
// MotionBank
// ============================================================================

#[test]
fn bank_rejects_duplicates() {
    let mut bank = MotionBank::new();
    bank.insert(ramp("Idle", 1.0)).unwrap();
    let err = bank.insert(hold("Idle", 3.0)).unwrap_err();
    assert!(matches!(
        err,
        RigError::DuplicateId { kind: IdKind::Motion, .. }
    ));
    assert_eq!(bank.len(), 1);
    assert!(approx(bank.get("Idle").unwrap().duration(), 1.0));
}

#[test]
fn bank_rejects_degenerate_motions() {
    let mut bank = MotionBank::new();

    for duration in [0.0, -1.0, f32::NAN] {
        let err = bank.insert(ramp("Bob", duration)).unwrap_err();
        assert!(
            matches!(err, RigError::InvalidConfig { field: "duration", .. }),
            "{err}"
        );
    }

    let err = bank.insert(hold("Idle", 1.0).with_weight(1.5)).unwrap_err();
    assert!(matches!(err, RigError::InvalidConfig { field: "weight", .. }));

    let broken = CurveSet::flat(1.0).with_position(
        Curve::new(Vec::new(), InterpolationMode::Linear),
        Curve::flat(),
        Curve::flat(),
    );
    let err = bank.insert(Motion::new("Draw", Arc::new(broken))).unwrap_err();
    assert!(matches!(err, RigError::InvalidCurve { axis: "position_x", .. }));
    assert!(bank.is_empty());

    // The rejected id stays free for a playable motion
    bank.insert(ramp("Bob", 1.0)).unwrap();
    let mut director = MotionDirector::new(bank);
    director.play_loop("Bob", true, NO_BLOCKERS, 1.0 / 60.0);
    assert!(director.update(1.0 / 60.0).is_finite());
}

#[test]
fn bank_keeps_insertion_order() {
    let bank = weapon_director();
    let ids: Vec<&str> = bank.bank().iter().map(Motion::id).collect();
    assert_eq!(ids, ["Draw", "Recoil", "Bob", "Idle"]);
    assert_eq!(bank.bank().lookup("Bob"), Some(2));
}

#[test]
fn bank_evaluate_is_stateless() {
    let director = weapon_director();
    let offset = director.bank().evaluate("Bob", 0.25).unwrap();
    assert!(approx(offset.position.x, 0.25));
    assert_eq!(director.bank().get("Bob").unwrap().offset(), Offset::ZERO);
    assert!(director.bank().evaluate("Missing", 0.5).is_none());
}

// ============================================================================
// play_loop
// ============================================================================

#[test]
fn loop_starts_and_advances() {
    let mut d = weapon_director();
    assert_eq!(d.play_loop("Bob", true, NO_BLOCKERS, 0.25), PlayOutcome::Playing);
    assert_eq!(state(&d, "Bob"), MotionState::Looping);
    assert!(approx(d.bank().get("Bob").unwrap().offset().position.x, 0.25));
}

#[test]
fn loop_wraps_past_duration() {
    let mut d = weapon_director();
    d.play_loop("Bob", true, NO_BLOCKERS, 0.75);
    assert!(approx(d.bank().get("Bob").unwrap().offset().position.x, 0.75));

    d.play_loop("Bob", true, NO_BLOCKERS, 0.5);
    let bob = d.bank().get("Bob").unwrap();
    assert!(approx(bob.offset().position.x, 0.25), "got {:?}", bob.offset());
    assert_eq!(bob.state(), MotionState::Looping);
}

#[test]
fn loop_stops_when_condition_drops() {
    let mut d = weapon_director();
    d.play_loop("Bob", true, NO_BLOCKERS, 0.1);
    assert_eq!(d.play_loop("Bob", false, NO_BLOCKERS, 0.1), PlayOutcome::Stopped);

    let bob = d.bank().get("Bob").unwrap();
    assert_eq!(bob.state(), MotionState::Idle);
    assert!(approx(bob.elapsed(), 0.0));
}

#[test]
fn idle_loop_request_while_idle_stays_stopped() {
    let mut d = weapon_director();
    assert_eq!(d.play_loop("Idle", false, NO_BLOCKERS, 0.1), PlayOutcome::Stopped);
    assert_eq!(state(&d, "Idle"), MotionState::Idle);
}

#[test]
fn mutual_blockers_resolve_in_call_order() {
    let mut d = weapon_director();
    let dt = 1.0 / 60.0;

    for _ in 0..3 {
        assert_eq!(d.play_loop("Bob", true, &["Idle"], dt), PlayOutcome::Playing);
        assert_eq!(d.play_loop("Idle", true, &["Bob"], dt), PlayOutcome::Blocked);
        d.update(dt);
    }
    assert_eq!(state(&d, "Bob"), MotionState::Looping);
    assert_eq!(state(&d, "Idle"), MotionState::Idle);

    // Bob's condition drops, Idle takes over in the same tick
    assert_eq!(d.play_loop("Bob", false, &["Idle"], dt), PlayOutcome::Stopped);
    assert_eq!(d.play_loop("Idle", true, &["Bob"], dt), PlayOutcome::Playing);
}

#[test]
fn blocked_loop_is_forced_idle() {
    let mut d = weapon_director();
    d.play_loop("Bob", true, NO_BLOCKERS, 0.1);
    d.play_once("Draw", NO_BLOCKERS);

    assert_eq!(d.play_loop("Bob", true, &["Draw"], 0.1), PlayOutcome::Blocked);
    assert_eq!(state(&d, "Bob"), MotionState::Idle);
}

#[test]
fn self_blocking_motion_never_activates() {
    let mut d = weapon_director();
    for _ in 0..5 {
        assert_eq!(d.play_loop("Idle", true, &["Idle"], 0.1), PlayOutcome::Blocked);
        d.update(0.1);
    }
    assert_eq!(state(&d, "Idle"), MotionState::Idle);

    assert_eq!(d.play_once("Draw", &["Draw"]), PlayOutcome::Blocked);
    assert_eq!(state(&d, "Draw"), MotionState::Idle);
}

#[test]
fn loop_request_takes_over_one_shot() {
    let mut d = weapon_director();
    d.play_once("Idle", NO_BLOCKERS);
    assert_eq!(state(&d, "Idle"), MotionState::OneShot);

    assert_eq!(d.play_loop("Idle", true, NO_BLOCKERS, 0.1), PlayOutcome::Playing);
    assert_eq!(state(&d, "Idle"), MotionState::Looping);
}

#[test]
fn unknown_blocker_does_not_block() {
    let mut d = weapon_director();
    assert!(!d.is_any_blocking(&["Nope"]));
    assert_eq!(d.play_loop("Bob", true, &["Nope"], 0.1), PlayOutcome::Playing);
    assert!(d.is_any_blocking(&["Nope", "Bob"]));
}

// ============================================================================
// play_once
// ============================================================================

#[test]
fn one_shot_finishes_after_duration() {
    let mut d = weapon_director();
    assert_eq!(d.play_once("Draw", NO_BLOCKERS), PlayOutcome::Started);

    d.update(0.25);
    assert_eq!(state(&d, "Draw"), MotionState::OneShot);
    assert!(approx(d.bank().get("Draw").unwrap().elapsed(), 0.25));

    d.update(0.25);
    let draw = d.bank().get("Draw").unwrap();
    assert_eq!(draw.state(), MotionState::Idle);
    assert!(approx(draw.elapsed(), 0.0));
}

#[test]
fn finishing_tick_is_not_faded() {
    let mut d = weapon_director();
    d.play_once("Draw", NO_BLOCKERS);

    let total = d.update(0.5);
    assert!(approx(total.position.x, 1.0), "got {total:?}");

    let total = d.update(0.05);
    assert!(approx(total.position.x, 0.5), "got {total:?}");
}

#[test]
fn play_once_restarts_from_zero() {
    let mut d = weapon_director();
    d.play_once("Draw", NO_BLOCKERS);
    d.update(0.2);
    assert!(approx(d.bank().get("Draw").unwrap().elapsed(), 0.2));

    assert_eq!(d.play_once("Draw", NO_BLOCKERS), PlayOutcome::Started);
    assert!(approx(d.bank().get("Draw").unwrap().elapsed(), 0.0));
    assert_eq!(state(&d, "Draw"), MotionState::OneShot);
}

#[test]
fn blocked_one_shot_lets_current_run_finish() {
    let mut d = weapon_director();
    d.play_once("Recoil", NO_BLOCKERS);
    d.update(0.1);
    d.play_once("Draw", NO_BLOCKERS);

    assert_eq!(d.play_once("Recoil", &["Draw"]), PlayOutcome::Blocked);
    let recoil = d.bank().get("Recoil").unwrap();
    assert_eq!(recoil.state(), MotionState::OneShot);
    assert!(approx(recoil.elapsed(), 0.1));

    d.update(0.1);
    assert_eq!(state(&d, "Recoil"), MotionState::Idle);
}

#[test]
fn unknown_ids_report_not_found() {
    let mut d = weapon_director();
    assert_eq!(d.play_loop("Nope", true, NO_BLOCKERS, 0.1), PlayOutcome::NotFound);
    assert_eq!(d.play_once("Nope", NO_BLOCKERS), PlayOutcome::NotFound);
    assert_eq!(d.stop("Nope"), PlayOutcome::NotFound);
    assert_eq!(d.update(0.1), Offset::ZERO);
}

#[test]
fn stop_forces_idle() {
    let mut d = weapon_director();
    d.play_once("Draw", NO_BLOCKERS);
    assert_eq!(d.stop("Draw"), PlayOutcome::Stopped);
    assert_eq!(state(&d, "Draw"), MotionState::Idle);
}

// ============================================================================
// Fading and aggregation
// ============================================================================

#[test]
fn inactive_offset_fades_then_snaps_to_zero() {
    let mut d = director(vec![hold("Aim", 1.0)]);
    d.play_loop("Aim", true, NO_BLOCKERS, 0.1);
    assert!(approx(d.update(0.1).position.x, 1.0));

    d.play_loop("Aim", false, NO_BLOCKERS, 0.1);
    let total = d.update(0.05);
    assert!(approx(total.position.x, 0.5), "got {total:?}");

    let mut last = total.position.x;
    for _ in 0..20 {
        let x = d.update(0.05).position.x;
        assert!(x <= last);
        last = x;
    }
    assert_eq!(d.offset(), Offset::ZERO);
}

#[test]
fn weights_scale_contributions() {
    let mut d = director(vec![
        hold("A", 1.0),
        hold("B", 1.0).with_weight(0.25),
    ]);
    d.play_loop("A", true, NO_BLOCKERS, 0.1);
    d.play_loop("B", true, NO_BLOCKERS, 0.1);

    let total = d.update(0.1);
    assert!(approx(total.position.x, 1.25));
    assert_eq!(d.offset(), total);
}

#[test]
fn director_tick_writes_from_rest_pose() {
    let mut d = director(vec![hold("Lower", 1.0)]);
    let mut transform = Transform::from_position_rotation(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY);

    d.play_loop("Lower", true, NO_BLOCKERS, 0.1);
    d.tick(0.1, &mut transform);
    assert!(approx(transform.position.x, 1.0));
    assert!(approx(transform.position.y, 1.0));

    d.tick(0.1, &mut transform);
    assert!(approx(transform.position.x, 1.0), "offset accumulated");
    assert_eq!(d.rest_pose().unwrap().position, Vec3::new(0.0, 1.0, 0.0));
}
