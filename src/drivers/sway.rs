use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::drivers::{Driver, DriverContext, ForceMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwaySettings {
    pub spring: String,
    /// Offset per unit of look delta
    pub amount: f32,
    /// Length limit of the sway offset
    pub maximum: f32,
    pub mode: ForceMode,
}

impl Default for SwaySettings {
    fn default() -> Self {
        Self {
            spring: "Swaying".to_string(),
            amount: 0.02,
            maximum: 0.06,
            mode: ForceMode::Target,
        }
    }
}

/// Look sway: the weapon lags opposite to the look direction.
#[derive(Debug)]
pub struct SwayDriver {
    pub settings: SwaySettings,
}

impl SwayDriver {
    #[must_use]
    pub fn new(settings: SwaySettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn offset_for(settings: &SwaySettings, look_delta: glam::Vec2) -> Vec3 {
        let sway = Vec3::new(-look_delta.x, -look_delta.y, 0.0) * settings.amount;
        sway.clamp_length_max(settings.maximum)
    }
}

impl Driver for SwayDriver {
    fn name(&self) -> &'static str {
        "sway"
    }

    fn update(&mut self, ctx: &mut DriverContext<'_>) {
        let position = Self::offset_for(&self.settings, ctx.input.look_delta);
        self.settings
            .mode
            .apply(ctx.springs, &self.settings.spring, position, Vec3::ZERO);
    }
}
