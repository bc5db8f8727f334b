//! Headless rig simulation.
//!
//! Runs a scripted few seconds of play (stand, walk while looking around,
//! fire a burst, aim) at a fixed 60 Hz and prints the weapon pose.
//!
//! ```text
//! cargo run --example rig_sim [path/to/rig.json]
//! RUST_LOG=debug cargo run --example rig_sim
//! ```

use glam::{Quat, Vec2, Vec3};
use weapon_rig::{FrameClock, RigConfig, RigInput, Transform, WeaponRig};

const DEFAULT_CONFIG: &str = include_str!("rig.json");

/// Input for the frame at `time` seconds.
fn scripted_input(input: &mut RigInput, time: f32) {
    let walking = (1.0..2.5).contains(&time);
    input.move_vector = if walking { Vec2::Y } else { Vec2::ZERO };

    if walking {
        input.handle_look((time * 4.0).sin() * 2.0, 0.3);
    }

    if (2.5..3.0).contains(&time) {
        input.press_fire();
    } else {
        input.release_fire();
    }

    input.aim_held = (3.5..4.5).contains(&time);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading rig config from {path}");
            RigConfig::from_path(path)?
        }
        None => RigConfig::from_json_str(DEFAULT_CONFIG)?,
    };

    let mut rig = WeaponRig::from_config(&config)?;
    let mut transform = Transform::from_position_rotation(Vec3::new(0.25, -0.2, 0.45), Quat::IDENTITY);
    let mut input = RigInput::new();
    let mut clock = FrameClock::fixed(60);

    println!(
        "{:>6}  {:>24}  {:>24}",
        "time", "offset position", "offset rotation (deg)"
    );

    while clock.elapsed_seconds() < 5.0 {
        scripted_input(&mut input, clock.elapsed_seconds());
        let dt = clock.tick();
        let offset = rig.tick(&input, dt, &mut transform);
        input.end_frame();

        if clock.frame_count % 10 == 0 {
            let p = offset.position;
            let r = offset.rotation;
            println!(
                "{:>6.2}  {:>7.3} {:>7.3} {:>7.3}  {:>7.2} {:>7.2} {:>7.2}",
                clock.elapsed_seconds(),
                p.x,
                p.y,
                p.z,
                r.x,
                r.y,
                r.z
            );
        }
    }

    transform.update_local_matrix();
    log::info!(
        "Final weapon position {:?} after {} frames",
        transform.local_matrix().translation,
        clock.frame_count
    );
    Ok(())
}
