//! Component system: the per-host behavior trait and lifecycle tracking.

pub mod lifecycle;
pub mod traits;

pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use traits::Component;
