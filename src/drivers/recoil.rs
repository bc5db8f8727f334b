use glam::Vec3;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::drivers::{Driver, DriverContext, ForceMode};
use crate::spring::SpringRegistry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoilSettings {
    /// Spring receiving the kick
    pub spring: String,
    /// Backward travel along -Z
    pub kickback: f32,
    /// Muzzle climb in degrees (applied as -X)
    pub pitch: f32,
    /// Maximum horizontal kick in degrees, sampled in `[-yaw, yaw]`
    pub yaw: f32,
    /// Shots per second
    pub fire_rate: f32,
    /// Keep firing while the trigger is held
    pub automatic: bool,
    pub mode: ForceMode,
    /// Seed for the horizontal kick
    pub seed: u64,
}

impl Default for RecoilSettings {
    fn default() -> Self {
        Self {
            spring: "Recoiling".to_string(),
            kickback: 0.3,
            pitch: 5.0,
            yaw: 2.0,
            fire_rate: 10.0,
            automatic: false,
            mode: ForceMode::Instant,
            seed: 0x5eed,
        }
    }
}

/// Kicks the recoil spring on fire, gated by the fire rate.
#[derive(Debug)]
pub struct RecoilDriver {
    pub settings: RecoilSettings,
    cooldown: f32,
    rng: StdRng,
}

impl RecoilDriver {
    #[must_use]
    pub fn new(settings: RecoilSettings) -> Self {
        let rng = StdRng::seed_from_u64(settings.seed);
        Self {
            settings,
            cooldown: 0.0,
            rng,
        }
    }

    /// Seconds until the next shot is allowed.
    #[must_use]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Position and rotation kick of one shot.
    pub fn sample_kick(&mut self) -> (Vec3, Vec3) {
        let s = &self.settings;
        let position = Vec3::new(0.0, 0.0, -s.kickback);
        let yaw = if s.yaw > 0.0 {
            self.rng.random_range(-s.yaw..=s.yaw)
        } else {
            0.0
        };
        let rotation = Vec3::new(-s.pitch, yaw, 0.0);
        (position, rotation)
    }

    /// Applies one kick regardless of the cooldown.
    pub fn fire(&mut self, springs: &mut SpringRegistry) {
        let (position, rotation) = self.sample_kick();
        self.settings
            .mode
            .apply(springs, &self.settings.spring, position, rotation);
        self.cooldown = 1.0 / self.settings.fire_rate;
    }

    /// Advances the cooldown and fires if the input asks for a shot.
    /// Returns whether a shot was fired.
    pub fn step(&mut self, wants_fire: bool, dt: f32, springs: &mut SpringRegistry) -> bool {
        self.cooldown = (self.cooldown - dt).max(0.0);

        if wants_fire && self.cooldown <= 0.0 {
            self.fire(springs);
            return true;
        }
        false
    }
}

impl Driver for RecoilDriver {
    fn name(&self) -> &'static str {
        "recoil"
    }

    fn update(&mut self, ctx: &mut DriverContext<'_>) {
        let wants_fire =
            ctx.input.fire_triggered || (self.settings.automatic && ctx.input.fire_held);
        if self.step(wants_fire, ctx.dt, ctx.springs) {
            log::trace!("Recoil kick on '{}'", self.settings.spring);
        }
    }
}
