//! Core value types shared by the graph and the engine.
//!
//! - Node payloads via the `State` trait
//! - Guard predicates over transit arguments
//! - Transit history

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{TransitHistory, TransitRecord};
pub use state::State;
