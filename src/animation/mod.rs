pub mod bank;
pub mod curve;
pub mod curve_set;
pub mod director;
pub mod motion;

pub use bank::MotionBank;
pub use curve::{Curve, InterpolationMode, Keyframe, KeyframeCursor};
pub use curve_set::{CurveSet, CurveSetCursor};
pub use director::{MotionDirector, NO_BLOCKERS, PlayOutcome};
pub use motion::{Motion, MotionState};
