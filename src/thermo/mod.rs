//! Thermodynamic models of the working fluid
pub mod gamma_solver;
pub mod isentropic;
pub mod specific_heat;
