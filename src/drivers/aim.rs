use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::drivers::{Driver, DriverContext};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimSettings {
    /// Spring carrying the aim offset
    pub spring: String,
    /// Offset from the hip pose to the sights pose
    pub offset: Vec3,
    /// Blend rate toward aimed / hip
    pub transition_speed: f32,
    /// Weight of the steadied springs when fully aimed
    pub steady_weight: f32,
    /// Springs whose weights are reduced while aiming
    pub steadied: Vec<String>,
}

impl Default for AimSettings {
    fn default() -> Self {
        Self {
            spring: "Aiming".to_string(),
            offset: Vec3::new(-0.1, 0.04, 0.0),
            transition_speed: 10.0,
            steady_weight: 0.3,
            steadied: vec![
                "Bobbing".to_string(),
                "Swaying".to_string(),
                "Breathing".to_string(),
            ],
        }
    }
}

/// Aim-down-sights on the weapon side: moves the weapon to the sights pose
/// and calms the idle/move springs. Camera FOV is left to the host.
#[derive(Debug)]
pub struct AimDriver {
    pub settings: AimSettings,
    blend: f32,
    // Configured (position, rotation) weights of `steadied`, read on first update
    base_weights: Option<Vec<(f32, f32)>>,
}

impl AimDriver {
    #[must_use]
    pub fn new(settings: AimSettings) -> Self {
        Self {
            settings,
            blend: 0.0,
            base_weights: None,
        }
    }

    /// 0 at the hip, 1 fully aimed.
    #[must_use]
    pub fn blend(&self) -> f32 {
        self.blend
    }
}

impl Driver for AimDriver {
    fn name(&self) -> &'static str {
        "aim"
    }

    fn update(&mut self, ctx: &mut DriverContext<'_>) {
        let goal = if ctx.input.aim_held { 1.0 } else { 0.0 };
        let t = (ctx.dt * self.settings.transition_speed).clamp(0.0, 1.0);
        self.blend += (goal - self.blend) * t;

        ctx.springs
            .set_target(&self.settings.spring, self.settings.offset * self.blend, Vec3::ZERO);

        let springs = &*ctx.springs;
        let base = self.base_weights.get_or_insert_with(|| {
            self.settings
                .steadied
                .iter()
                .map(|id| {
                    springs
                        .get(id)
                        .map_or((1.0, 1.0), |e| (e.position.weight, e.rotation.weight))
                })
                .collect()
        });

        let scale = 1.0 + (self.settings.steady_weight - 1.0) * self.blend;
        for (id, (position, rotation)) in self.settings.steadied.iter().zip(base.iter()) {
            ctx.springs.set_weight(id, position * scale, rotation * scale);
        }
    }
}
