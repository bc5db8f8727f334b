//! Rig Tests
//!
//! Tests for:
//! - Building a rig from configuration
//! - Tick order and the single composed write
//! - Rest pose capture
//! - End-to-end fire, walk and aim scenarios

use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};

use weapon_rig::animation::{Curve, CurveSet, Motion, MotionBank, MotionDirector, NO_BLOCKERS};
use weapon_rig::config::{DriverConfig, MotionConfig, RigConfig, SpringConfig};
use weapon_rig::drivers::{
    AimSettings, BobSettings, BreathSettings, RecoilSettings, SwaySettings, WeaponMotionSettings,
};
use weapon_rig::input::RigInput;
use weapon_rig::scene::{Offset, Transform};
use weapon_rig::spring::{Oscillator, SpringEntry, SpringRegistry};
use weapon_rig::utils::FrameClock;
use weapon_rig::WeaponRig;

const EPSILON: f32 = 1e-5;
const DT: f32 = 1.0 / 60.0;

fn vec3_approx(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).abs().max_element() < eps
}

fn spring(id: &str) -> SpringConfig {
    SpringConfig::new(id).with_rotation(Default::default())
}

fn motion(id: &str, duration: f32, lift: f32) -> MotionConfig {
    MotionConfig {
        id: id.to_string(),
        curves: CurveSet::flat(duration).with_position(
            Curve::flat(),
            Curve::constant(lift),
            Curve::flat(),
        ),
        weight: 1.0,
    }
}

fn full_config() -> RigConfig {
    RigConfig {
        springs: ["Recoiling", "Bobbing", "Breathing", "Swaying", "Aiming"]
            .into_iter()
            .map(spring)
            .collect(),
        motions: vec![
            motion("Draw", 0.5, -0.1),
            motion("Recoil", 0.2, 0.01),
            motion("Bob", 1.0, 0.02),
            motion("Idle", 2.0, 0.005),
        ],
        drivers: DriverConfig {
            recoil: Some(RecoilSettings::default()),
            bob: Some(BobSettings::default()),
            breath: Some(BreathSettings::default()),
            sway: Some(SwaySettings::default()),
            aim: Some(AimSettings::default()),
            weapon: Some(WeaponMotionSettings::default()),
        },
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn from_config_builds_drivers_in_order() -> anyhow::Result<()> {
    let rig = WeaponRig::from_config(&full_config())?;
    let names: Vec<&str> = rig.driver_names().collect();
    assert_eq!(
        names,
        ["recoil", "bob", "breath", "sway", "aim", "weapon_motion"]
    );
    assert_eq!(rig.springs().len(), 5);
    assert_eq!(rig.motions().bank().len(), 4);
    assert!(rig.rest_pose().is_none());
    Ok(())
}

#[test]
fn from_config_validates() {
    let mut config = full_config();
    config.springs.retain(|s| s.id != "Swaying");
    assert!(WeaponRig::from_config(&config).is_err());
}

#[test]
fn empty_rig_keeps_transform_at_rest() {
    let mut rig = WeaponRig::default();
    let mut transform = Transform::from_position_rotation(Vec3::new(0.3, -0.2, 0.5), Quat::IDENTITY);

    for _ in 0..10 {
        assert_eq!(rig.tick(&RigInput::new(), DT, &mut transform), Offset::ZERO);
    }
    assert_eq!(transform.position, Vec3::new(0.3, -0.2, 0.5));
    assert_eq!(transform.rotation, Quat::IDENTITY);
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn springs_and_motions_are_summed_into_one_write() {
    let mut springs = SpringRegistry::new();
    springs
        .register(SpringEntry::position_only("Push", Oscillator::default()))
        .unwrap();

    let mut bank = MotionBank::new();
    let curves =
        CurveSet::flat(1.0).with_position(Curve::flat(), Curve::constant(0.5), Curve::flat());
    bank.insert(Motion::new("Lift", Arc::new(curves))).unwrap();

    let mut rig = WeaponRig::new(springs, MotionDirector::new(bank));
    let mut transform = Transform::from_position_rotation(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY);

    rig.springs_mut()
        .set_impulse("Push", Vec3::new(0.0, 0.0, -0.2), Vec3::ZERO);
    rig.motions_mut()
        .play_loop("Lift", true, NO_BLOCKERS, 0.1);

    let total = rig.tick(&RigInput::new(), 0.0, &mut transform);
    assert!(vec3_approx(total.position, Vec3::new(0.0, 0.5, -0.2), EPSILON));
    assert!(vec3_approx(transform.position, Vec3::new(1.0, 0.5, -0.2), EPSILON));
    assert_eq!(rig.last_offset(), total);
}

#[test]
fn rest_pose_captured_on_first_tick_only() {
    let mut rig = WeaponRig::from_config(&full_config()).unwrap();
    let mut transform = Transform::from_position_rotation(Vec3::new(0.2, -0.3, 0.4), Quat::IDENTITY);

    rig.tick(&RigInput::new(), DT, &mut transform);
    let rest = *rig.rest_pose().unwrap();
    assert_eq!(rest.position, Vec3::new(0.2, -0.3, 0.4));

    for _ in 0..30 {
        let offset = rig.tick(&RigInput::new(), DT, &mut transform);
        assert!(vec3_approx(transform.position, rest.position + offset.position, EPSILON));
    }
    assert_eq!(rig.rest_pose().unwrap().position, rest.position);
}

#[test]
fn host_matrix_rebuilds_only_when_the_rig_moves_the_transform() {
    let mut bank = MotionBank::new();
    let curves =
        CurveSet::flat(1.0).with_position(Curve::flat(), Curve::constant(0.5), Curve::flat());
    bank.insert(Motion::new("Lift", Arc::new(curves))).unwrap();
    let mut rig = WeaponRig::new(SpringRegistry::new(), MotionDirector::new(bank));
    let mut transform = Transform::from_position_rotation(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY);

    assert!(transform.update_local_matrix());

    // Nothing playing: the write lands on the rest pose and the cache stays valid
    rig.tick(&RigInput::new(), DT, &mut transform);
    assert!(!transform.update_local_matrix());

    rig.motions_mut().play_loop("Lift", true, NO_BLOCKERS, 0.1);
    rig.tick(&RigInput::new(), 0.0, &mut transform);
    assert!(transform.update_local_matrix());
    let translation = Vec3::from(transform.local_matrix().translation);
    assert!(vec3_approx(translation, Vec3::new(1.0, 0.5, 0.0), EPSILON));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn fire_kicks_back_then_settles() {
    let mut config = full_config();
    config.motions.clear();
    config.drivers = DriverConfig {
        recoil: Some(RecoilSettings::default()),
        ..DriverConfig::default()
    };
    let mut rig = WeaponRig::from_config(&config).unwrap();
    let mut transform = Transform::new();
    let mut input = RigInput::new();

    input.press_fire();
    let kick = rig.tick(&input, DT, &mut transform);
    assert!(kick.position.z < -0.2, "kick={kick:?}");
    assert!(kick.rotation.x < -3.0);
    input.end_frame();
    input.release_fire();

    let mut clock = FrameClock::fixed(60);
    let mut offset = kick;
    for _ in 0..120 {
        offset = rig.tick(&input, clock.tick(), &mut transform);
        input.end_frame();
    }
    assert!(offset.position.length() < 0.01, "offset={offset:?}");
    assert!(vec3_approx(transform.position, Vec3::ZERO, 0.01));
}

#[test]
fn walking_bobs_and_standing_breathes() {
    let mut rig = WeaponRig::from_config(&full_config()).unwrap();
    let mut transform = Transform::new();
    let walk = RigInput {
        move_vector: Vec2::new(0.0, 1.0),
        ..RigInput::default()
    };

    // Let the draw motion finish
    for _ in 0..60 {
        rig.tick(&RigInput::new(), DT, &mut transform);
    }

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    for _ in 0..120 {
        let offset = rig.tick(&walk, DT, &mut transform);
        assert!(offset.is_finite());
        min_x = min_x.min(offset.position.x);
        max_x = max_x.max(offset.position.x);
    }
    assert!(max_x - min_x > 0.005, "no side-to-side bob: {min_x}..{max_x}");
    assert!(rig.motions().bank().get("Bob").unwrap().is_active());
    assert!(!rig.motions().bank().get("Idle").unwrap().is_active());

    rig.tick(&RigInput::new(), DT, &mut transform);
    assert!(rig.motions().bank().get("Idle").unwrap().is_active());
    assert!(!rig.motions().bank().get("Bob").unwrap().is_active());
}

#[test]
fn aiming_moves_toward_sights() {
    let mut config = full_config();
    config.motions.clear();
    config.drivers = DriverConfig {
        aim: Some(AimSettings::default()),
        ..DriverConfig::default()
    };
    let mut rig = WeaponRig::from_config(&config).unwrap();
    let mut transform = Transform::new();
    let aim = RigInput {
        aim_held: true,
        ..RigInput::default()
    };

    let mut offset = Offset::ZERO;
    for _ in 0..180 {
        offset = rig.tick(&aim, DT, &mut transform);
    }
    assert!(vec3_approx(offset.position, Vec3::new(-0.1, 0.04, 0.0), 2e-3), "{offset:?}");
    assert!((rig.springs().get("Bobbing").unwrap().position.weight - 0.3).abs() < 1e-3);
}
