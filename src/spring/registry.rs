//! Spring Registry
//!
//! Named collection of [`Oscillator`] pairs driven by targets and impulses.
//! Each tick every entry is integrated in registration order and the
//! weighted values are summed into one [`Offset`].
//!
//! Force calls on unknown ids are no-ops with a `log::warn!`, so one
//! misconfigured id never stalls the rest of the rig.

use std::cell::OnceCell;

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::errors::{IdKind, Result, RigError};
use crate::scene::{Offset, RestPose, Transform};
use crate::spring::oscillator::Oscillator;

/// A position oscillator and an optional rotation oscillator under one id.
#[derive(Debug, Clone)]
pub struct SpringEntry {
    id: String,
    pub position: Oscillator,
    pub rotation: Oscillator,
    pub include_rotation: bool,
}

impl SpringEntry {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        position: Oscillator,
        rotation: Oscillator,
        include_rotation: bool,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            rotation,
            include_rotation,
        }
    }

    /// Position-only entry; the rotation oscillator exists but is ignored.
    #[must_use]
    pub fn position_only(id: impl Into<String>, position: Oscillator) -> Self {
        Self::new(id, position, Oscillator::default(), false)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Checks both oscillators, whether or not rotation is included.
    pub fn validate(&self) -> Result<()> {
        self.position.validate(&self.id)?;
        self.rotation.validate(&self.id)
    }

    fn step(&mut self, dt: f32) {
        self.position.step(dt);
        if self.include_rotation {
            self.rotation.step(dt);
        }
    }

    /// Weighted contribution of this entry.
    #[must_use]
    pub fn offset(&self) -> Offset {
        let rotation = if self.include_rotation {
            self.rotation.weighted_value()
        } else {
            Vec3::ZERO
        };
        Offset::new(self.position.weighted_value(), rotation)
    }
}

#[derive(Debug, Default)]
pub struct SpringRegistry {
    entries: Vec<SpringEntry>,
    index: FxHashMap<String, usize>,
    rest_pose: OnceCell<RestPose>,
}

impl SpringRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entry` unless its id is taken; the first registration wins
    /// and the registry is left unchanged. Degenerate oscillator parameters
    /// are rejected with [`RigError::InvalidConfig`].
    pub fn register(&mut self, entry: SpringEntry) -> Result<()> {
        entry.validate()?;
        if self.index.contains_key(entry.id()) {
            return Err(RigError::DuplicateId {
                kind: IdKind::Spring,
                id: entry.id().to_string(),
            });
        }

        self.index.insert(entry.id().to_string(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SpringEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut SpringEntry> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.entries[i]),
            None => None,
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SpringEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn position_oscillator(&self, id: &str) -> Option<&Oscillator> {
        self.get(id).map(|e| &e.position)
    }

    #[must_use]
    pub fn rotation_oscillator(&self, id: &str) -> Option<&Oscillator> {
        self.get(id).map(|e| &e.rotation)
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

    fn with_entry(&mut self, id: &str, f: impl FnOnce(&mut SpringEntry)) -> bool {
        if let Some(entry) = self.get_mut(id) {
            f(entry);
            true
        } else {
            log::warn!("Spring '{id}' not found");
            false
        }
    }

    /// Constant force: both oscillators chase these targets until changed.
    pub fn set_target(&mut self, id: &str, position: Vec3, rotation: Vec3) -> bool {
        self.with_entry(id, |e| {
            e.position.set_target(position);
            e.rotation.set_target(rotation);
        })
    }

    /// Accumulative impulse on both oscillators.
    pub fn add_impulse(&mut self, id: &str, position: Vec3, rotation: Vec3) -> bool {
        self.with_entry(id, |e| {
            e.position.add_impulse(position);
            e.rotation.add_impulse(rotation);
        })
    }

    /// Instant force: snaps both oscillators and zeroes their velocity.
    pub fn set_impulse(&mut self, id: &str, position: Vec3, rotation: Vec3) -> bool {
        self.with_entry(id, |e| {
            e.position.set_impulse(position);
            e.rotation.set_impulse(rotation);
        })
    }

    pub fn set_weight(&mut self, id: &str, position_weight: f32, rotation_weight: f32) -> bool {
        self.with_entry(id, |e| {
            e.position.weight = position_weight;
            e.rotation.weight = rotation_weight;
        })
    }

    /// Integrates every entry toward its target and returns the weighted
    /// total.
    pub fn update(&mut self, dt: f32) -> Offset {
        let mut total = Offset::ZERO;
        for entry in &mut self.entries {
            entry.step(dt);
            total += entry.offset();
        }

        log::trace!("Spring total: {total:?}");
        total
    }

    /// Weighted total of the current values, without integrating.
    #[must_use]
    pub fn offset(&self) -> Offset {
        self.entries
            .iter()
            .fold(Offset::ZERO, |acc, e| acc + e.offset())
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
