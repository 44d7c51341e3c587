//! Engine description: configuration, crank kinematics and cylinder geometry
pub mod config;
pub mod geometry;
pub mod json_reader;
pub mod kinematics;
