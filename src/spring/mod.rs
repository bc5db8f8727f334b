pub mod oscillator;
pub mod registry;

pub use oscillator::Oscillator;
pub use registry::{SpringEntry, SpringRegistry};
