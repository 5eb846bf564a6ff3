pub mod hits;
pub mod registry;
pub mod exposition;

pub use hits::HitCounter;
pub use registry::{Metrics, MetricsError};
