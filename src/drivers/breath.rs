use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::drivers::{Driver, DriverContext, ForceMode};
use crate::utils::noise::perlin;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathSettings {
    pub spring: String,
    pub x_amplitude: f32,
    pub y_amplitude: f32,
    /// Noise scroll speed of the horizontal drift
    pub x_frequency: f32,
    /// Radians per second of the vertical breathing cycle
    pub y_frequency: f32,
    pub mode: ForceMode,
}

impl Default for BreathSettings {
    fn default() -> Self {
        Self {
            spring: "Breathing".to_string(),
            x_amplitude: 0.004,
            y_amplitude: 0.006,
            x_frequency: 0.6,
            y_frequency: 1.8,
            mode: ForceMode::Target,
        }
    }
}

/// Idle breathing: slow vertical cycle plus noisy horizontal drift while the
/// player stands still.
#[derive(Debug)]
pub struct BreathDriver {
    pub settings: BreathSettings,
    timer: f32,
}

impl BreathDriver {
    #[must_use]
    pub fn new(settings: BreathSettings) -> Self {
        Self {
            settings,
            timer: 0.0,
        }
    }

    #[must_use]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Breathing offset at `time` seconds of standing still. The vertical
    /// cycle starts at its top (`sin(π/2)`), so stopping does not jerk the
    /// weapon down.
    #[must_use]
    pub fn offset_at(settings: &BreathSettings, time: f32) -> Vec3 {
        Vec3::new(
            (perlin(time * settings.x_frequency, 0.5) * 2.0 - 1.0) * settings.x_amplitude,
            (time * settings.y_frequency + FRAC_PI_2).sin() * settings.y_amplitude,
            0.0,
        )
    }
}

impl Driver for BreathDriver {
    fn name(&self) -> &'static str {
        "breath"
    }

    fn update(&mut self, ctx: &mut DriverContext<'_>) {
        if ctx.input.is_moving() {
            self.timer = 0.0;
        } else {
            self.timer += ctx.dt;
        }

        let position = Self::offset_at(&self.settings, self.timer);
        self.settings
            .mode
            .apply(ctx.springs, &self.settings.spring, position, Vec3::ZERO);
    }
}
