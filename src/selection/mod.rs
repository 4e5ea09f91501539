//! Single selection across controls that share a name within one root.

pub mod control;
pub mod controller;
pub mod registry;

pub use control::SelectionControl;
pub use controller::{SelectionContext, SingleSelectionController};
pub use registry::{GroupKey, SelectionGroups};
