use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::curve::{Curve, KeyframeCursor};
use crate::errors::{Result, RigError};
use crate::scene::Offset;

/// Six scalar curves over normalized time `[0, 1]` plus the real duration
/// they are stretched over. Authored data, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSet {
    #[serde(default)]
    pub position_x: Curve,
    #[serde(default)]
    pub position_y: Curve,
    #[serde(default)]
    pub position_z: Curve,
    #[serde(default)]
    pub rotation_x: Curve,
    #[serde(default)]
    pub rotation_y: Curve,
    #[serde(default)]
    pub rotation_z: Curve,
    /// Seconds one pass over `[0, 1]` takes.
    pub duration: f32,
}

/// Per-axis cursors matching a [`CurveSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveSetCursor {
    cursors: [KeyframeCursor; 6],
}

impl CurveSet {
    /// All six axes flat at zero.
    #[must_use]
    pub fn flat(duration: f32) -> Self {
        Self {
            position_x: Curve::flat(),
            position_y: Curve::flat(),
            position_z: Curve::flat(),
            rotation_x: Curve::flat(),
            rotation_y: Curve::flat(),
            rotation_z: Curve::flat(),
            duration,
        }
    }

    #[must_use]
    pub fn with_position(mut self, x: Curve, y: Curve, z: Curve) -> Self {
        self.position_x = x;
        self.position_y = y;
        self.position_z = z;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, x: Curve, y: Curve, z: Curve) -> Self {
        self.rotation_x = x;
        self.rotation_y = y;
        self.rotation_z = z;
        self
    }

    fn axes(&self) -> [(&'static str, &Curve); 6] {
        [
            ("position_x", &self.position_x),
            ("position_y", &self.position_y),
            ("position_z", &self.position_z),
            ("rotation_x", &self.rotation_x),
            ("rotation_y", &self.rotation_y),
            ("rotation_z", &self.rotation_z),
        ]
    }

    /// Rejects a non-positive duration and malformed curves.
    pub fn validate(&self, id: &str) -> Result<()> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(RigError::InvalidConfig {
                id: id.to_string(),
                field: "duration",
                value: self.duration,
                reason: "must be finite and > 0",
            });
        }

        for (axis, curve) in self.axes() {
            curve.validate().map_err(|reason| RigError::InvalidCurve {
                id: id.to_string(),
                axis,
                reason,
            })?;
        }

        Ok(())
    }

    /// Evaluates all six curves at `progress`.
    #[must_use]
    pub fn evaluate(&self, progress: f32) -> Offset {
        Offset::new(
            Vec3::new(
                self.position_x.sample(progress),
                self.position_y.sample(progress),
                self.position_z.sample(progress),
            ),
            Vec3::new(
                self.rotation_x.sample(progress),
                self.rotation_y.sample(progress),
                self.rotation_z.sample(progress),
            ),
        )
    }

    /// Same as [`evaluate`](Self::evaluate), reusing per-axis cursors.
    pub fn evaluate_with_cursor(&self, progress: f32, cursor: &mut CurveSetCursor) -> Offset {
        let [px, py, pz, rx, ry, rz] = &mut cursor.cursors;
        Offset::new(
            Vec3::new(
                self.position_x.sample_with_cursor(progress, px),
                self.position_y.sample_with_cursor(progress, py),
                self.position_z.sample_with_cursor(progress, pz),
            ),
            Vec3::new(
                self.rotation_x.sample_with_cursor(progress, rx),
                self.rotation_y.sample_with_cursor(progress, ry),
                self.rotation_z.sample_with_cursor(progress, rz),
            ),
        )
    }
}
