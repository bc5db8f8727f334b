use std::sync::Arc;

use crate::animation::curve_set::{CurveSet, CurveSetCursor};
use crate::errors::{Result, validate_weight};
use crate::scene::Offset;

/// Offsets below this squared magnitude count as settled.
pub const NEGLIGIBLE_OFFSET_SQ: f32 = 1e-4;

/// Rate of the exponential fade applied to inactive motions.
pub const FADE_RATE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    /// Inactive. Offsets fade toward zero.
    #[default]
    Idle,
    /// Re-evaluated by a `play_loop` poll every tick; time wraps.
    Looping,
    /// Playing once over its duration, advanced by the director's tick.
    OneShot,
}

/// A named curve-driven motion and its playback record.
///
/// The record (`state`, `elapsed`) is everything a one-shot needs to resume
/// on the next tick, there is no separate task object.
#[derive(Debug, Clone)]
pub struct Motion {
    id: String,
    curves: Arc<CurveSet>,
    pub weight: f32,

    pub(crate) offset: Offset,
    pub(crate) state: MotionState,
    pub(crate) elapsed: f32,
    pub(crate) cursor: CurveSetCursor,
}

impl Motion {
    #[must_use]
    pub fn new(id: impl Into<String>, curves: Arc<CurveSet>) -> Self {
        Self {
            id: id.into(),
            curves,
            weight: 1.0,
            offset: Offset::ZERO,
            state: MotionState::Idle,
            elapsed: 0.0,
            cursor: CurveSetCursor::default(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Rejects curves the director cannot play and weights outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        self.curves.validate(&self.id)?;
        validate_weight(&self.id, self.weight)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn curves(&self) -> &Arc<CurveSet> {
        &self.curves
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.curves.duration
    }

    #[must_use]
    pub fn state(&self) -> MotionState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != MotionState::Idle
    }

    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Last evaluated (or fading) offset, unweighted.
    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    #[must_use]
    pub fn weighted_offset(&self) -> Offset {
        self.offset * self.weight
    }

    /// Goes Idle and rewinds. The offset is kept so it can fade out.
    pub(crate) fn deactivate(&mut self) {
        self.state = MotionState::Idle;
        self.elapsed = 0.0;
    }

    pub(crate) fn evaluate_at(&mut self, progress: f32) {
        self.offset = self.curves.evaluate_with_cursor(progress, &mut self.cursor);
    }

    /// Loop step: advance, wrap, evaluate.
    pub(crate) fn advance_looping(&mut self, dt: f32) {
        self.elapsed += dt;
        let duration = self.duration();
        let progress = self.elapsed.rem_euclid(duration) / duration;
        self.evaluate_at(progress);
    }

    /// One-shot step: advance, evaluate clamped, finish when the duration is
    /// reached. Returns true on the tick the motion finished.
    pub(crate) fn advance_one_shot(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        let duration = self.duration();
        let progress = (self.elapsed / duration).clamp(0.0, 1.0);
        self.evaluate_at(progress);

        if self.elapsed >= duration {
            self.deactivate();
            return true;
        }
        false
    }

    /// Fades an inactive motion's offset toward zero.
    pub(crate) fn fade(&mut self, dt: f32) {
        if self.offset.length_squared() >= NEGLIGIBLE_OFFSET_SQ {
            self.offset = self
                .offset
                .lerp(Offset::ZERO, (dt * FADE_RATE).clamp(0.0, 1.0));
        } else {
            self.offset = Offset::ZERO;
        }
    }
}
