use serde::{Deserialize, Serialize};

use crate::animation::NO_BLOCKERS;
use crate::drivers::{Driver, DriverContext};

/// Motion ids the weapon controller plays. Any of them may be `None` to
/// leave that behaviour out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponMotionSettings {
    /// One-shot played on the first tick
    pub draw: Option<String>,
    /// One-shot played on fire, blocked by draw
    pub recoil: Option<String>,
    /// Loop while moving, blocked by idle, recoil and draw
    pub bob: Option<String>,
    /// Loop while standing, blocked by bob, recoil and draw
    pub idle: Option<String>,
}

impl Default for WeaponMotionSettings {
    fn default() -> Self {
        Self {
            draw: Some("Draw".to_string()),
            recoil: Some("Recoil".to_string()),
            bob: Some("Bob".to_string()),
            idle: Some("Idle".to_string()),
        }
    }
}

impl WeaponMotionSettings {
    pub(crate) fn motion_ids(&self) -> impl Iterator<Item = &str> {
        [&self.draw, &self.recoil, &self.bob, &self.idle]
            .into_iter()
            .filter_map(|id| id.as_deref())
    }
}

/// Curve-motion counterpart of the spring drivers: draw, fire, walk and idle
/// poses expressed as play/stop commands with blocking rules.
#[derive(Debug)]
pub struct WeaponMotionDriver {
    pub settings: WeaponMotionSettings,
    drawn: bool,
    bob_blockers: Vec<String>,
    idle_blockers: Vec<String>,
}

impl WeaponMotionDriver {
    #[must_use]
    pub fn new(settings: WeaponMotionSettings) -> Self {
        let blockers = |ids: [&Option<String>; 3]| -> Vec<String> {
            ids.into_iter().flatten().cloned().collect()
        };
        let bob_blockers = blockers([&settings.idle, &settings.recoil, &settings.draw]);
        let idle_blockers = blockers([&settings.bob, &settings.recoil, &settings.draw]);

        Self {
            settings,
            drawn: false,
            bob_blockers,
            idle_blockers,
        }
    }
}

impl Driver for WeaponMotionDriver {
    fn name(&self) -> &'static str {
        "weapon_motion"
    }

    fn update(&mut self, ctx: &mut DriverContext<'_>) {
        let motions = &mut *ctx.motions;

        if !self.drawn {
            self.drawn = true;
            if let Some(draw) = &self.settings.draw {
                motions.play_once(draw, NO_BLOCKERS);
            }
        }

        if ctx.input.fire_triggered
            && let Some(recoil) = &self.settings.recoil
        {
            let blockers: &[String] = self.settings.draw.as_slice();
            motions.play_once(recoil, blockers);
        }

        let moving = ctx.input.is_moving();
        if let Some(bob) = &self.settings.bob {
            motions.play_loop(bob, moving, &self.bob_blockers, ctx.dt);
        }
        if let Some(idle) = &self.settings.idle {
            motions.play_loop(idle, !moving, &self.idle_blockers, ctx.dt);
        }
    }
}
