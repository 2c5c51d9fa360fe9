//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod action_controller;
pub mod poller;

pub use action_controller::ActionController;
pub use poller::{Poller, PollerConfig, PollerHandle};
