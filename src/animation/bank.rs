use rustc_hash::FxHashMap;

use crate::animation::motion::Motion;
use crate::errors::{IdKind, Result, RigError};
use crate::scene::Offset;

/// Named collection of motions.
///
/// Motions live in a `Vec` in insertion order, with an id index on the side,
/// so iteration (and therefore aggregation) order is stable.
#[derive(Debug, Clone, Default)]
pub struct MotionBank {
    motions: Vec<Motion>,
    index: FxHashMap<String, usize>,
}

impl MotionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `motion` unless its id is taken; the first insert wins.
    ///
    /// A non-positive duration, malformed curves or a weight outside
    /// `[0, 1]` are rejected before the id is checked.
    pub fn insert(&mut self, motion: Motion) -> Result<()> {
        motion.validate()?;
        if self.index.contains_key(motion.id()) {
            return Err(RigError::DuplicateId {
                kind: IdKind::Motion,
                id: motion.id().to_string(),
            });
        }

        self.index.insert(motion.id().to_string(), self.motions.len());
        self.motions.push(motion);
        Ok(())
    }

    /// Position of `id` in iteration order.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Motion> {
        self.lookup(id).map(|i| &self.motions[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Motion> {
        self.lookup(id).map(move |i| &mut self.motions[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.motions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Motion> {
        self.motions.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Motion> {
        self.motions.iter_mut()
    }

    /// Evaluates a motion's curves at `progress` without touching its state.
    #[must_use]
    pub fn evaluate(&self, id: &str, progress: f32) -> Option<Offset> {
        self.get(id).map(|m| m.curves().evaluate(progress))
    }
}
