//! Excitation sources.
//!
//! Drivers translate boundary signals ([`RigInput`]) into spring forces or
//! motion play commands. They run before the aggregation pass of the same
//! tick and touch the registries only through their public API.
//!
//! | Driver                  | Signal               | Writes                      |
//! |-------------------------|----------------------|-----------------------------|
//! | [`RecoilDriver`]        | fire trigger / hold  | spring (instant by default) |
//! | [`BobDriver`]           | move vector          | spring target               |
//! | [`BreathDriver`]        | standing still       | spring target               |
//! | [`SwayDriver`]          | look delta           | spring target               |
//! | [`AimDriver`]           | aim held             | spring target + weights     |
//! | [`WeaponMotionDriver`]  | move / fire          | motion director             |

pub mod aim;
pub mod bob;
pub mod breath;
pub mod recoil;
pub mod sway;
pub mod weapon;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::MotionDirector;
use crate::input::RigInput;
use crate::spring::SpringRegistry;

pub use aim::{AimDriver, AimSettings};
pub use bob::{BobDriver, BobSettings};
pub use breath::{BreathDriver, BreathSettings};
pub use recoil::{RecoilDriver, RecoilSettings};
pub use sway::{SwayDriver, SwaySettings};
pub use weapon::{WeaponMotionDriver, WeaponMotionSettings};

/// How a driver hands its offset to a spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceMode {
    /// Constant force: the spring chases the value until it changes.
    #[default]
    Target,
    /// Accumulative impulse added to the spring's velocity.
    Impulse,
    /// Instant force: snaps the spring's value, zeroes its velocity.
    Instant,
}

impl ForceMode {
    pub fn apply(self, springs: &mut SpringRegistry, id: &str, position: Vec3, rotation: Vec3) {
        match self {
            ForceMode::Target => springs.set_target(id, position, rotation),
            ForceMode::Impulse => springs.add_impulse(id, position, rotation),
            ForceMode::Instant => springs.set_impulse(id, position, rotation),
        };
    }
}

/// Everything a driver may touch during its update.
pub struct DriverContext<'a> {
    pub input: &'a RigInput,
    pub dt: f32,
    pub springs: &'a mut SpringRegistry,
    pub motions: &'a mut MotionDirector,
}

/// An excitation source run once per tick, before aggregation.
pub trait Driver: std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn update(&mut self, ctx: &mut DriverContext<'_>);
}
