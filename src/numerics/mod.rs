//! Numerical building blocks shared by the thermodynamic models
pub mod fixed_point;
