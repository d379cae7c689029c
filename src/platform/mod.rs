//! Platform abstraction layer
//!
//! Translates raw device events into the held-action flags the simulation
//! samples once per tick.

pub mod input;

pub use input::{Action, ActionMap};
