//! Utility Module
//!
//! - [`time`]: [`FrameClock`], the per-tick `dt` source for host loops
//! - [`noise`]: stateless 2D gradient noise used by the breathing driver

pub mod noise;
pub mod time;

pub use time::FrameClock;
