//! Weapon Rig
//!
//! Composition root for one animated transform. The host owns a
//! `WeaponRig` (no global instance) and calls [`WeaponRig::tick`] once per
//! frame. A tick always runs in this order:
//!
//! 1. capture the rest pose (first tick only);
//! 2. run every driver, which injects forces and issues play commands;
//! 3. run the motion director's and the spring registry's aggregation passes;
//! 4. write `rest + motions + springs` onto the transform, once.
//!
//! Both registries are aggregated into offsets and summed before the single
//! write, so neither overwrites the other's contribution.

use std::cell::OnceCell;

use crate::animation::MotionDirector;
use crate::config::RigConfig;
use crate::drivers::{
    AimDriver, BobDriver, BreathDriver, Driver, DriverContext, RecoilDriver, SwayDriver,
    WeaponMotionDriver,
};
use crate::errors::Result;
use crate::input::RigInput;
use crate::scene::{Offset, RestPose, Transform};
use crate::spring::SpringRegistry;

#[derive(Debug, Default)]
pub struct WeaponRig {
    springs: SpringRegistry,
    motions: MotionDirector,
    drivers: Vec<Box<dyn Driver>>,
    rest_pose: OnceCell<RestPose>,
    last_offset: Offset,
}

impl WeaponRig {
    /// A rig without drivers; add them with [`push_driver`](Self::push_driver).
    #[must_use]
    pub fn new(springs: SpringRegistry, motions: MotionDirector) -> Self {
        Self {
            springs,
            motions,
            drivers: Vec::new(),
            rest_pose: OnceCell::new(),
            last_offset: Offset::ZERO,
        }
    }

    /// Builds registries and drivers from a validated configuration.
    ///
    /// Spring drivers run before the weapon motion driver, in the order
    /// recoil, bob, breath, sway, aim.
    pub fn from_config(config: &RigConfig) -> Result<Self> {
        config.validate()?;

        let springs = config.build_springs()?;
        let motions = MotionDirector::new(config.build_motions()?);
        let mut rig = Self::new(springs, motions);

        let d = &config.drivers;
        if let Some(s) = &d.recoil {
            rig.push_driver(Box::new(RecoilDriver::new(s.clone())));
        }
        if let Some(s) = &d.bob {
            rig.push_driver(Box::new(BobDriver::new(s.clone())));
        }
        if let Some(s) = &d.breath {
            rig.push_driver(Box::new(BreathDriver::new(s.clone())));
        }
        if let Some(s) = &d.sway {
            rig.push_driver(Box::new(SwayDriver::new(s.clone())));
        }
        if let Some(s) = &d.aim {
            rig.push_driver(Box::new(AimDriver::new(s.clone())));
        }
        if let Some(s) = &d.weapon {
            rig.push_driver(Box::new(WeaponMotionDriver::new(s.clone())));
        }

        log::debug!(
            "Rig built: {} springs, {} motions, drivers [{}]",
            rig.springs.len(),
            rig.motions.bank().len(),
            rig.driver_names().collect::<Vec<_>>().join(", ")
        );
        Ok(rig)
    }

    /// Appends a driver; drivers run in insertion order.
    pub fn push_driver(&mut self, driver: Box<dyn Driver>) {
        self.drivers.push(driver);
    }

    pub fn driver_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.drivers.iter().map(|d| d.name())
    }

    #[must_use]
    pub fn springs(&self) -> &SpringRegistry {
        &self.springs
    }

    pub fn springs_mut(&mut self) -> &mut SpringRegistry {
        &mut self.springs
    }

    #[must_use]
    pub fn motions(&self) -> &MotionDirector {
        &self.motions
    }

    pub fn motions_mut(&mut self) -> &mut MotionDirector {
        &mut self.motions
    }

    #[must_use]
    pub fn rest_pose(&self) -> Option<&RestPose> {
        self.rest_pose.get()
    }

    /// Offset written by the last tick.
    #[must_use]
    pub fn last_offset(&self) -> Offset {
        self.last_offset
    }

    /// Runs one frame and writes the composed offset onto `transform`.
    pub fn tick(&mut self, input: &RigInput, dt: f32, transform: &mut Transform) -> Offset {
        let rest = *self.rest_pose.get_or_init(|| RestPose::capture(transform));

        let mut ctx = DriverContext {
            input,
            dt,
            springs: &mut self.springs,
            motions: &mut self.motions,
        };
        for driver in &mut self.drivers {
            driver.update(&mut ctx);
        }

        let total = self.motions.update(dt) + self.springs.update(dt);
        rest.apply(&total, transform);

        self.last_offset = total;
        total
    }
}
