//! # material-controls
//!
//! Headless Material-style interaction controllers over a retained element
//! tree.
//!
//! The crate ships the behavior behind lists, menus and radio groups without
//! any rendering: roving-tabindex keyboard navigation, single selection scoped
//! to a `(root, name)` pair, and the element model both act on.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: slotmap-backed element arena with encapsulation boundaries,
//!   focus, direction and document order; the [`ElementTree`](dom::ElementTree)
//!   trait the controllers are written against
//! - **[`nav`]**: [`ListNavigationController`](nav::ListNavigationController)
//!   and its traversal helpers
//! - **[`selection`]**: [`SingleSelectionController`](selection::SingleSelectionController)
//!   and the explicit group registry
//! - **[`event`]**: keys, key events, messages and bubble paths
//! - **[`component`]** / **[`components`]**: per-host behavior; `List`, `Menu`
//!   and `Radio`
//! - **[`page`]**: owns a document and its components and routes input
//! - **[`testing`]**: headless [`Pilot`](testing::Pilot) and text snapshots
//!
//! Logging goes through `tracing` under the `material_controls` target when the
//! default `tracing` feature is enabled.

#[macro_use]
mod macros;

pub mod error;

// Element model
pub mod dom;

// Controllers
pub mod nav;
pub mod selection;

// Events
pub mod event;

// Components and pages
pub mod component;
pub mod components;
pub mod document;
pub mod page;

// Test support
pub mod testing;

pub use document::Document;
pub use error::{Error, Result};
pub use page::{Page, PageConfig};
