//! Event system for ManasX.
//! Handler trait with no-op defaults, synchronous dispatcher.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::ManasxEventHandler;
