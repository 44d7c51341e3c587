//! In-cylinder states stored once per crank sample.

use crate::core::traits::SaveData;
use ndarray::*;
use serde::{Deserialize, Serialize};

/// Common view of both working-fluid models
pub trait ThermoState {
    fn volume(&self) -> f64;
    fn pressure(&self) -> f64;
    fn temperature(&self) -> f64;
}

/// Model A: constant heat capacity ratio
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ConstantGammaState {
    pub volume: f64,      // [m³]
    pub pressure: f64,    // [Pa]
    pub temperature: f64, // [K]
}

/// Model B: temperature dependent heat capacity ratio, with the locally converged
/// `gamma` and `cv` used to reach the state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct VariableGammaState {
    pub volume: f64,      // [m³]
    pub pressure: f64,    // [Pa]
    pub temperature: f64, // [K]
    pub gamma: f64,
    pub cv: f64, // [kJ/(kg.K)]
}

impl ThermoState for ConstantGammaState {
    fn volume(&self) -> f64 {
        self.volume
    }
    fn pressure(&self) -> f64 {
        self.pressure
    }
    fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl ThermoState for VariableGammaState {
    fn volume(&self) -> f64 {
        self.volume
    }
    fn pressure(&self) -> f64 {
        self.pressure
    }
    fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl SaveData for ConstantGammaState {
    fn get_headers(&self) -> String {
        "volume [cm³]\tpressure A [bar]\ttemperature A [K]".to_string()
    }
    fn num_storable_variables(&self) -> usize {
        3
    }
    fn get_storable_data(&self) -> Array1<f64> {
        array![self.volume * 1e6, self.pressure / 1e5, self.temperature]
    }
}

// volume is shared with model A and not repeated
impl SaveData for VariableGammaState {
    fn get_headers(&self) -> String {
        "pressure B [bar]\ttemperature B [K]\tgamma B\tcv B [kJ/(kg.K)]".to_string()
    }
    fn num_storable_variables(&self) -> usize {
        4
    }
    fn get_storable_data(&self) -> Array1<f64> {
        array![self.pressure / 1e5, self.temperature, self.gamma, self.cv]
    }
}
