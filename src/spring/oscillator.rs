use glam::Vec3;

use crate::errors::{Result, RigError, validate_weight};

/// Damped spring over a 3D quantity (a position, or a rotation expressed as
/// Euler degrees).
///
/// Integration uses exponential velocity decay:
///
/// ```text
/// force     = (target - value) * stiffness
/// velocity += force * dt
/// velocity *= exp(-damping * dt)
/// value    += velocity * dt
/// ```
///
/// Damping is multiplicative, so the velocity can only shrink through it and
/// the step stays bounded for any non-negative damping. With `damping == 0`
/// the update is semi-implicit Euler and the spring oscillates around its
/// target without gaining energy, as long as `dt * sqrt(stiffness) < 2`.
///
/// `dt` is not clamped here; the host bounds it (see
/// [`FrameClock`](crate::utils::time::FrameClock)).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    value: Vec3,
    velocity: Vec3,
    target: Vec3,
    pub stiffness: f32,
    pub damping: f32,
    pub weight: f32,
}

impl Oscillator {
    pub const DEFAULT_STIFFNESS: f32 = 150.0;
    pub const DEFAULT_DAMPING: f32 = 20.0;

    #[must_use]
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            value: Vec3::ZERO,
            velocity: Vec3::ZERO,
            target: Vec3::ZERO,
            stiffness,
            damping,
            weight: 1.0,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Rejects parameters the integrator cannot run with: stiffness must be
    /// finite and positive, damping finite and non-negative, weight in
    /// `[0, 1]`. `id` names the owning spring in the error.
    pub fn validate(&self, id: &str) -> Result<()> {
        let invalid = |field: &'static str, value: f32, reason: &'static str| {
            Err(RigError::InvalidConfig {
                id: id.to_string(),
                field,
                value,
                reason,
            })
        };

        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return invalid("stiffness", self.stiffness, "must be finite and > 0");
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return invalid("damping", self.damping, "must be finite and >= 0");
        }
        validate_weight(id, self.weight)
    }

    /// Advances the spring by `dt` toward `target`.
    ///
    /// The argument also replaces the stored target, so the oscillator can be
    /// driven either with a live per-tick target or toward a fixed one.
    pub fn integrate(&mut self, target: Vec3, dt: f32) {
        self.target = target;

        let force = (self.target - self.value) * self.stiffness;
        self.velocity += force * dt;
        self.velocity *= (-self.damping * dt).exp();
        self.value += self.velocity * dt;
    }

    /// Advances the spring by `dt` toward the stored target.
    #[inline]
    pub fn step(&mut self, dt: f32) {
        self.integrate(self.target, dt);
    }

    /// Accumulative impulse: adds to the current velocity.
    #[inline]
    pub fn add_impulse(&mut self, force: Vec3) {
        self.velocity += force;
    }

    /// Non-accumulative impulse: snaps the value and kills the velocity.
    #[inline]
    pub fn set_impulse(&mut self, force: Vec3) {
        self.value = force;
        self.velocity = Vec3::ZERO;
    }

    #[inline]
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn reset(&mut self) {
        self.value = Vec3::ZERO;
        self.velocity = Vec3::ZERO;
        self.target = Vec3::ZERO;
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> Vec3 {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// `value * weight`, the oscillator's contribution to an aggregate.
    #[inline]
    #[must_use]
    pub fn weighted_value(&self) -> Vec3 {
        self.value * self.weight
    }

    /// True once the spring sits on its target with no meaningful motion.
    #[must_use]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.value - self.target).length_squared() <= epsilon * epsilon
            && self.velocity.length_squared() <= epsilon * epsilon
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STIFFNESS, Self::DEFAULT_DAMPING)
    }
}
