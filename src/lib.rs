#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Procedural first-person weapon animation.
//!
//! Offsets for recoil, sway, breathing, bobbing and draw/idle poses are
//! generated every tick, without animation clips, from two sources:
//!
//! - [`spring`]: damped oscillators pushed around by targets and impulses
//! - [`animation`]: curve-sampled motions played by a blocking-aware director
//!
//! [`drivers`] turn input signals into forces and play commands, and
//! [`WeaponRig`] runs everything in order and writes the summed offset onto a
//! host-owned [`Transform`] relative to its rest pose.

pub mod animation;
pub mod config;
pub mod drivers;
pub mod errors;
pub mod input;
pub mod rig;
pub mod scene;
pub mod spring;
pub mod utils;

pub use animation::{Curve, CurveSet, Motion, MotionBank, MotionDirector, PlayOutcome};
pub use config::RigConfig;
pub use errors::{Result, RigError};
pub use input::RigInput;
pub use rig::WeaponRig;
pub use scene::{Offset, RestPose, Transform};
pub use spring::{Oscillator, SpringEntry, SpringRegistry};
pub use utils::FrameClock;
