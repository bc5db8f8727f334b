use std::ops::{Add, AddAssign, Mul};

use glam::{Quat, Vec3};

use super::transform::{Transform, euler_degrees_to_quat};

/// A procedural offset: translation plus Euler rotation in degrees.
///
/// Both the spring registry and the motion director reduce their entries to
/// one `Offset` per tick. Offsets add component-wise, so composing two
/// sources onto the same transform is a plain sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Offset {
    pub const ZERO: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };

    #[must_use]
    pub const fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    #[must_use]
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    /// Squared magnitude over both components.
    #[inline]
    #[must_use]
    pub fn length_squared(&self) -> f32 {
        self.position.length_squared() + self.rotation.length_squared()
    }

    #[must_use]
    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(rhs.position, t),
            rotation: self.rotation.lerp(rhs.rotation, t),
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }
}

impl Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            position: self.position + rhs.position,
            rotation: self.rotation + rhs.rotation,
        }
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Self) {
        self.position += rhs.position;
        self.rotation += rhs.rotation;
    }
}

impl Mul<f32> for Offset {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            position: self.position * rhs,
            rotation: self.rotation * rhs,
        }
    }
}

/// Position and rotation captured from a transform before it is animated.
///
/// Every write the rig performs is `rest + offset`, never an accumulation
/// onto the previous frame's pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl RestPose {
    #[must_use]
    pub fn capture(transform: &Transform) -> Self {
        Self {
            position: transform.position,
            rotation: transform.rotation,
        }
    }

    /// Writes `offset` onto `transform` relative to this pose.
    pub fn apply(&self, offset: &Offset, transform: &mut Transform) {
        transform.position = self.position + offset.position;
        transform.rotation = self.rotation * euler_degrees_to_quat(offset.rotation);
    }
}

impl Default for RestPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}
