//! Event system: input, messages, dispatch.

pub mod handler;
pub mod input;
pub mod message;

pub use handler::EventDispatcher;
pub use input::{InputEvent, Key, KeyEvent, KeyParseError, Modifiers};
pub use message::{Change, Custom, DeactivateItems, Envelope, Message, RequestActivation};
