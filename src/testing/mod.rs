//! Headless testing helpers: the [`Pilot`] page driver and text snapshots.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{selection_to_string, tab_indices_to_string};
