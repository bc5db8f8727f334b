//! Rig configuration.
//!
//! A rig is described once, at startup, by a [`RigConfig`] (usually a JSON
//! file) and never reloaded while ticking. [`RigConfig::validate`] rejects
//! degenerate data up front so the per-tick path has nothing left to check.
//!
//! ```json
//! {
//!   "springs": [
//!     { "id": "Recoiling", "include_rotation": true,
//!       "position": { "stiffness": 150, "damping": 20 },
//!       "rotation": { "stiffness": 150, "damping": 20 } }
//!   ],
//!   "motions": [
//!     { "id": "Draw", "weight": 1.0,
//!       "curves": { "duration": 0.4,
//!                   "rotation_x": { "keys": [ { "time": 0, "value": 30 },
//!                                             { "time": 1, "value": 0 } ] } } }
//!   ],
//!   "drivers": { "recoil": { "kickback": 0.3 } }
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::{CurveSet, Motion, MotionBank};
use crate::drivers::{
    AimSettings, BobSettings, BreathSettings, RecoilSettings, SwaySettings, WeaponMotionSettings,
};
use crate::errors::{IdKind, Result, RigError, validate_weight};
use crate::spring::{Oscillator, SpringEntry, SpringRegistry};

fn default_weight() -> f32 {
    1.0
}

/// Parameters of one oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorConfig {
    /// How tightly the spring snaps to its target
    pub stiffness: f32,
    /// Exponential velocity decay rate; higher settles faster
    pub damping: f32,
    /// Influence on the aggregated offset, `[0, 1]`
    pub weight: f32,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            stiffness: Oscillator::DEFAULT_STIFFNESS,
            damping: Oscillator::DEFAULT_DAMPING,
            weight: 1.0,
        }
    }
}

impl OscillatorConfig {
    pub fn validate(&self, id: &str) -> Result<()> {
        self.build().validate(id)
    }

    #[must_use]
    pub fn build(&self) -> Oscillator {
        Oscillator::new(self.stiffness, self.damping).with_weight(self.weight)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub id: String,
    #[serde(default)]
    pub position: OscillatorConfig,
    #[serde(default)]
    pub rotation: OscillatorConfig,
    #[serde(default)]
    pub include_rotation: bool,
}

impl SpringConfig {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: OscillatorConfig::default(),
            rotation: OscillatorConfig::default(),
            include_rotation: false,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: OscillatorConfig) -> Self {
        self.rotation = rotation;
        self.include_rotation = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.build().validate()
    }

    #[must_use]
    pub fn build(&self) -> SpringEntry {
        SpringEntry::new(
            self.id.clone(),
            self.position.build(),
            self.rotation.build(),
            self.include_rotation,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    pub id: String,
    pub curves: CurveSet,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl MotionConfig {
    pub fn validate(&self) -> Result<()> {
        self.build().validate()
    }

    #[must_use]
    pub fn build(&self) -> Motion {
        Motion::new(self.id.clone(), Arc::new(self.curves.clone())).with_weight(self.weight)
    }
}

/// Which drivers a rig runs. Absent sections are not instantiated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub recoil: Option<RecoilSettings>,
    pub bob: Option<BobSettings>,
    pub breath: Option<BreathSettings>,
    pub sway: Option<SwaySettings>,
    pub aim: Option<AimSettings>,
    pub weapon: Option<WeaponMotionSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub springs: Vec<SpringConfig>,
    pub motions: Vec<MotionConfig>,
    pub drivers: DriverConfig,
}

impl RigConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every entry and every driver reference.
    ///
    /// Duplicate ids are not an error here: the first entry wins and the
    /// rest are skipped (with a warning) when the registries are built.
    pub fn validate(&self) -> Result<()> {
        for spring in &self.springs {
            spring.validate()?;
        }
        for motion in &self.motions {
            motion.validate()?;
        }
        self.validate_drivers()
    }

    fn validate_drivers(&self) -> Result<()> {
        let has_spring = |id: &str| self.springs.iter().any(|s| s.id == id);
        let has_motion = |id: &str| self.motions.iter().any(|m| m.id == id);
        let unknown = |kind: IdKind, id: &str, referenced_by: &'static str| {
            Err(RigError::UnknownId {
                kind,
                id: id.to_string(),
                referenced_by,
            })
        };
        let positive = |id: &str, field: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(RigError::InvalidConfig {
                    id: id.to_string(),
                    field,
                    value,
                    reason: "must be finite and > 0",
                })
            }
        };

        let d = &self.drivers;
        let spring_refs = [
            d.recoil.as_ref().map(|s| (s.spring.as_str(), "recoil")),
            d.bob.as_ref().map(|s| (s.spring.as_str(), "bob")),
            d.breath.as_ref().map(|s| (s.spring.as_str(), "breath")),
            d.sway.as_ref().map(|s| (s.spring.as_str(), "sway")),
            d.aim.as_ref().map(|s| (s.spring.as_str(), "aim")),
        ];
        for (id, driver) in spring_refs.into_iter().flatten() {
            if !has_spring(id) {
                return unknown(IdKind::Spring, id, driver);
            }
        }

        if let Some(recoil) = &d.recoil {
            positive(&recoil.spring, "fire_rate", recoil.fire_rate)?;
        }
        if let Some(aim) = &d.aim {
            validate_weight(&aim.spring, aim.steady_weight)?;
            for id in aim.steadied.iter().map(String::as_str) {
                if !has_spring(id) {
                    return unknown(IdKind::Spring, id, "aim");
                }
            }
        }
        if let Some(weapon) = &d.weapon {
            for id in weapon.motion_ids() {
                if !has_motion(id) {
                    return unknown(IdKind::Motion, id, "weapon");
                }
            }
        }

        Ok(())
    }

    /// Builds the spring registry. Duplicate ids are skipped, degenerate
    /// entries fail the build.
    pub fn build_springs(&self) -> Result<SpringRegistry> {
        let mut registry = SpringRegistry::new();
        for spring in &self.springs {
            match registry.register(spring.build()) {
                Ok(()) => {}
                Err(err @ RigError::DuplicateId { .. }) => {
                    log::warn!("{err}, keeping the first definition");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(registry)
    }

    /// Builds the motion bank. Duplicate ids are skipped, degenerate entries
    /// fail the build.
    pub fn build_motions(&self) -> Result<MotionBank> {
        let mut bank = MotionBank::new();
        for motion in &self.motions {
            match bank.insert(motion.build()) {
                Ok(()) => {}
                Err(err @ RigError::DuplicateId { .. }) => {
                    log::warn!("{err}, keeping the first definition");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(bank)
    }
}
