//! Engine controller for running searches off the caller's thread.
//!
//! The controller owns the game position and the search tables; each search
//! runs on a dedicated worker against a snapshot of the position.

mod controller;

pub use controller::{EngineController, SearchJob};
