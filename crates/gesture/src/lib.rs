//! Gesture recognition for mouse and touch input.
//!
//! A [`GestureCoordinator`] owns a set of recognizers, each pairing shared
//! state-machine bookkeeping with a [`GestureStrategy`] that interprets the
//! raw input. Recognizers negotiate with each other before beginning, so
//! simultaneous and mutually exclusive gestures can be declared up front.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod input;
pub mod recognizers;
pub mod state;
pub mod strategy;
pub mod tracking;

pub use config::*;
pub use coordinator::*;
pub use error::*;
pub use event::*;
pub use input::*;
pub use recognizers::*;
pub use state::*;
pub use strategy::*;
pub use tracking::*;
