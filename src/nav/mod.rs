//! List navigation: the `ListItem` capability, traversal helpers, and the
//! roving-tabindex controller used by lists and menus.

pub mod controller;
pub mod item;

pub use controller::{is_navigable_key, ListNavigationConfig, ListNavigationController};
pub use item::{ActiveItem, ListItem};
