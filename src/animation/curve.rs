use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    Step,
    Linear,
    /// Cubic Hermite using each key's in/out tangents.
    #[default]
    Hermite,
}

/// One key of a scalar curve. Tangents are slopes (value units per unit of
/// time) and are ignored by `Step` and `Linear`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    #[must_use]
    pub const fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    #[must_use]
    pub const fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

const MAX_SCAN_OFFSET: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// Scalar curve over a sorted set of keys.
///
/// Sampling before the first key returns the first value, after the last key
/// the last value. An empty curve samples as `0.0`; configuration loading
/// rejects empty curves, this is only a guard for hand-built data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub keys: Vec<Keyframe>,
    #[serde(default)]
    pub interpolation: InterpolationMode,
}

impl Curve {
    #[must_use]
    pub fn new(keys: Vec<Keyframe>, interpolation: InterpolationMode) -> Self {
        Self {
            keys,
            interpolation,
        }
    }

    /// Constant zero. Used for the axes a motion does not animate.
    #[must_use]
    pub fn flat() -> Self {
        Self::constant(0.0)
    }

    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value)], InterpolationMode::Step)
    }

    #[must_use]
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self::new(
            vec![Keyframe::new(t0, v0), Keyframe::new(t1, v1)],
            InterpolationMode::Linear,
        )
    }

    /// Smooth-step between two keys (Hermite with flat tangents).
    #[must_use]
    pub fn ease_in_out(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self::new(
            vec![Keyframe::new(t0, v0), Keyframe::new(t1, v1)],
            InterpolationMode::Hermite,
        )
    }

    /// Checks that the curve has keys, finite data and strictly increasing
    /// times. Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.keys.is_empty() {
            return Err("curve has no keys".to_string());
        }

        for (i, key) in self.keys.iter().enumerate() {
            let finite = key.time.is_finite()
                && key.value.is_finite()
                && key.in_tangent.is_finite()
                && key.out_tangent.is_finite();
            if !finite {
                return Err(format!("key {i} is not finite"));
            }
        }

        if let Some(i) = self.keys.windows(2).position(|w| w[1].time <= w[0].time) {
            return Err(format!(
                "key times must be strictly increasing (key {} at {} follows {})",
                i + 1,
                self.keys[i + 1].time,
                self.keys[i].time
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.keys.first().map_or(0.0, |k| k.time)
    }

    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.keys.last().map_or(0.0, |k| k.time)
    }

    /// Stateless sample (binary search).
    #[must_use]
    pub fn sample(&self, time: f32) -> f32 {
        if self.keys.is_empty() {
            return 0.0;
        }

        let next_idx = self.keys.partition_point(|k| k.time <= time);
        let idx = next_idx.saturating_sub(1);
        self.sample_at_key(idx, time)
    }

    /// Samples using `cursor` as a hint for the current segment.
    ///
    /// Playback moves through a curve monotonically most of the time, so a
    /// short linear scan from the last segment hits almost always. Large
    /// jumps (loop wrap, restart) fall back to a binary search.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> f32 {
        let len = self.keys.len();
        match len {
            0 => return 0.0,
            1 => return self.keys[0].value,
            _ => {}
        }

        let i = cursor.last_index.min(len - 1);
        let t_curr = self.keys[i].time;

        let found_index = if time >= t_curr {
            // Forward: check [i, i+1), [i+1, i+2), ...
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    if time >= self.keys[len - 1].time {
                        res = Some(len - 1);
                    }
                    break;
                }
                if time < self.keys[idx + 1].time {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Backward: first key at or before `time`
            let mut res = None;
            for offset in 1..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;
                if time >= self.keys[idx].time {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let final_index = found_index.unwrap_or_else(|| {
            let next_idx = self.keys.partition_point(|k| k.time <= time);
            next_idx.saturating_sub(1)
        });
        cursor.last_index = final_index;

        self.sample_at_key(final_index, time)
    }

    fn sample_at_key(&self, index: usize, time: f32) -> f32 {
        let len = self.keys.len();

        if index >= len - 1 {
            return self.keys[len - 1].value;
        }

        let k0 = &self.keys[index];
        let k1 = &self.keys[index + 1];
        let dt = k1.time - k0.time;

        let t = if dt > 1e-6 { (time - k0.time) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => k0.value,
            InterpolationMode::Linear => k0.value + (k1.value - k0.value) * t,
            InterpolationMode::Hermite => {
                hermite(k0.value, k0.out_tangent, k1.in_tangent, k1.value, t, dt)
            }
        }
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::flat()
    }
}

/// Cubic Hermite basis. Tangents are slopes, scaled by the segment length.
#[inline]
fn hermite(v0: f32, out_tangent0: f32, in_tangent1: f32, v1: f32, t: f32, dt: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    let s0 = 1.0 - s2;
    let s1 = s3 - t2 + t;

    let m0 = out_tangent0 * dt;
    let m1 = in_tangent1 * dt;

    s0 * v0 + s1 * m0 + s2 * v1 + s3 * m1
}
