//! Scene-side types the rig writes into.
//!
//! - [`Transform`]: host-owned local TRS, with a lazily rebuilt local matrix for
//!   hosts that consume the composed pose
//! - [`RestPose`]: the pose captured once before animation starts
//! - [`Offset`]: position + Euler-degree rotation produced each tick

pub mod pose;
pub mod transform;

pub use pose::{Offset, RestPose};
pub use transform::{Transform, euler_degrees_to_quat};
