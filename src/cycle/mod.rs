//! Cycle phases, per-sample states, results and their energy balance
pub mod phase;
pub mod result;
pub mod state;
pub mod summary;
