use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::drivers::{Driver, DriverContext, ForceMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BobSettings {
    pub spring: String,
    pub x_amplitude: f32,
    pub y_amplitude: f32,
    /// Radians per second of the side-to-side cycle
    pub frequency: f32,
    /// Peak roll around Z in degrees
    pub roll: f32,
    pub mode: ForceMode,
}

impl Default for BobSettings {
    fn default() -> Self {
        Self {
            spring: "Bobbing".to_string(),
            x_amplitude: 0.02,
            y_amplitude: 0.03,
            frequency: 10.0,
            roll: 2.0,
            mode: ForceMode::Target,
        }
    }
}

/// Walk bob: a figure-eight like sway while the player moves.
#[derive(Debug)]
pub struct BobDriver {
    pub settings: BobSettings,
    timer: f32,
}

impl BobDriver {
    #[must_use]
    pub fn new(settings: BobSettings) -> Self {
        Self {
            settings,
            timer: 0.0,
        }
    }

    #[must_use]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Bob offset at `time` seconds into the walk cycle.
    ///
    /// X swings left/right, Y dips on every half cycle, Z rolls at twice the
    /// swing frequency.
    #[must_use]
    pub fn offset_at(settings: &BobSettings, time: f32) -> (Vec3, Vec3) {
        let phase = time * settings.frequency;
        let position = Vec3::new(
            phase.sin() * settings.x_amplitude,
            -phase.sin().abs() * settings.y_amplitude * 0.5,
            0.0,
        );
        let rotation = Vec3::new(0.0, 0.0, -(phase * 2.0).sin() * settings.roll);
        (position, rotation)
    }
}

impl Driver for BobDriver {
    fn name(&self) -> &'static str {
        "bob"
    }

    fn update(&mut self, ctx: &mut DriverContext<'_>) {
        if ctx.input.is_moving() {
            self.timer += ctx.dt;
        } else {
            self.timer = 0.0;
        }

        let (position, rotation) = Self::offset_at(&self.settings, self.timer);
        self.settings
            .mode
            .apply(ctx.springs, &self.settings.spring, position, rotation);
    }
}
