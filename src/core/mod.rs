//! Simulation driver and the traits shared by its parts
pub mod system;
pub mod system_builder;
pub mod traits;
