//! Motion Director
//!
//! Cooperative state machine over a [`MotionBank`]. Callers poll
//! [`play_loop`](MotionDirector::play_loop) and fire
//! [`play_once`](MotionDirector::play_once) during a tick, then run the
//! aggregation pass once with [`update`](MotionDirector::update) (or
//! [`tick`](MotionDirector::tick) to also write a transform).
//!
//! # Blocking
//!
//! Every play call names the motions that block it. A blocked loop request
//! forces the motion Idle; a blocked one-shot request is dropped and an
//! already running one-shot of the same id is left to finish. A motion that
//! lists itself as a blocker can never become active.
//!
//! Calls resolve in call order: when two motions block each other and both
//! are polled active in the same tick, the first call wins and the second
//! observes it.

use std::cell::OnceCell;

use crate::animation::bank::MotionBank;
use crate::animation::motion::MotionState;
use crate::scene::{Offset, RestPose, Transform};

/// Convenience for play calls without blockers.
pub const NO_BLOCKERS: &[&str] = &[];

/// Result of a play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// A one-shot was (re)started from progress 0.
    Started,
    /// The motion is active after the call.
    Playing,
    /// The motion is inactive after the call.
    Stopped,
    /// A blocking motion was active; the request was rejected.
    Blocked,
    /// No motion with that id.
    NotFound,
}

#[derive(Debug, Default)]
pub struct MotionDirector {
    bank: MotionBank,
    rest_pose: OnceCell<RestPose>,
}

impl MotionDirector {
    #[must_use]
    pub fn new(bank: MotionBank) -> Self {
        Self {
            bank,
            rest_pose: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn bank(&self) -> &MotionBank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut MotionBank {
        &mut self.bank
    }

    #[must_use]
    pub fn rest_pose(&self) -> Option<&RestPose> {
        self.rest_pose.get()
    }

    /// Captures the rest pose from `transform`. Only the first capture
    /// counts; returns whether this call captured it.
    pub fn capture_rest_pose(&self, transform: &Transform) -> bool {
        self.rest_pose.set(RestPose::capture(transform)).is_ok()
    }

    /// True iff any of `ids` names a currently active motion. Unknown ids
    /// never block.
    pub fn is_any_blocking<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        ids.iter().any(|id| {
            let id = id.as_ref();
            match self.bank.get(id) {
                Some(motion) => motion.is_active(),
                None => {
                    log::warn!("Blocking motion '{id}' not found");
                    false
                }
            }
        })
    }

    fn is_blocked<S: AsRef<str>>(&self, id: &str, blocking: &[S]) -> bool {
        blocking.iter().any(|b| b.as_ref() == id) || self.is_any_blocking(blocking)
    }

    /// Polled loop request. Call once per tick with the current condition.
    pub fn play_loop<S: AsRef<str>>(
        &mut self,
        id: &str,
        active: bool,
        blocking: &[S],
        dt: f32,
    ) -> PlayOutcome {
        if !self.bank.contains(id) {
            log::warn!("Motion '{id}' not found");
            return PlayOutcome::NotFound;
        }

        let blocked = self.is_blocked(id, blocking);
        let Some(motion) = self.bank.get_mut(id) else {
            return PlayOutcome::NotFound;
        };

        if blocked {
            if motion.is_active() {
                log::debug!("Motion '{id}' blocked");
            }
            motion.deactivate();
            return PlayOutcome::Blocked;
        }

        match (motion.state, active) {
            (MotionState::Idle, true) => {
                log::debug!("Motion '{id}' looping");
                motion.state = MotionState::Looping;
            }
            (MotionState::OneShot, true) => {
                motion.state = MotionState::Looping;
            }
            (MotionState::Looping | MotionState::OneShot, false) => {
                log::debug!("Motion '{id}' stopped");
                motion.deactivate();
            }
            (MotionState::Looping, true) | (MotionState::Idle, false) => {}
        }

        if motion.is_active() {
            motion.advance_looping(dt);
            PlayOutcome::Playing
        } else {
            PlayOutcome::Stopped
        }
    }

    /// Starts (or restarts) a one-shot. The motion is advanced by the
    /// following [`update`](Self::update) calls until its duration elapses.
    pub fn play_once<S: AsRef<str>>(&mut self, id: &str, blocking: &[S]) -> PlayOutcome {
        if !self.bank.contains(id) {
            log::warn!("Motion '{id}' not found");
            return PlayOutcome::NotFound;
        }

        // An in-flight run of this id keeps going when blocked.
        if self.is_blocked(id, blocking) {
            log::debug!("One-shot '{id}' blocked");
            return PlayOutcome::Blocked;
        }

        let Some(motion) = self.bank.get_mut(id) else {
            return PlayOutcome::NotFound;
        };
        motion.state = MotionState::OneShot;
        motion.elapsed = 0.0;
        log::debug!("One-shot '{id}' started");
        PlayOutcome::Started
    }

    /// Forces a motion Idle. Its offset fades out over the next ticks.
    pub fn stop(&mut self, id: &str) -> PlayOutcome {
        match self.bank.get_mut(id) {
            Some(motion) => {
                motion.deactivate();
                PlayOutcome::Stopped
            }
            None => {
                log::warn!("Motion '{id}' not found");
                PlayOutcome::NotFound
            }
        }
    }

    /// Aggregation pass: advances one-shots, fades inactive motions, and
    /// returns the weighted sum over all motions.
    pub fn update(&mut self, dt: f32) -> Offset {
        let mut total = Offset::ZERO;

        for motion in self.bank.iter_mut() {
            let mut finished = false;
            if motion.state == MotionState::OneShot {
                finished = motion.advance_one_shot(dt);
                if finished {
                    log::debug!("One-shot '{}' finished", motion.id());
                }
            }

            if !motion.is_active() && !finished {
                motion.fade(dt);
            }

            total += motion.weighted_offset();
        }

        log::trace!("Motion total: {total:?}");
        total
    }

    /// Current weighted sum without advancing anything.
    #[must_use]
    pub fn offset(&self) -> Offset {
        self.bank
            .iter()
            .fold(Offset::ZERO, |acc, m| acc + m.weighted_offset())
    }

    /// [`update`](Self::update), then one write onto `transform` relative to
    /// the rest pose (captured now if it was not yet).
    pub fn tick(&mut self, dt: f32, transform: &mut Transform) -> Offset {
        let rest = *self.rest_pose.get_or_init(|| RestPose::capture(transform));
        let total = self.update(dt);
        rest.apply(&total, transform);
        total
    }
}
