use crate::numerics::fixed_point::FixedPointSettings;
use crate::thermo::specific_heat::LinearCv;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonEngine {
    pub speed: f64,                // [RPM]
    pub stroke: f64,               // [mm]
    pub crank_radius: Option<f64>, // [mm] - half the stroke when omitted
    pub conrod: f64,               // [mm]
    pub bore: f64,                 // [mm]
    pub compression_ratio: f64,    // [-]
    pub gas: JsonGas,
    pub inlet: JsonInlet,
    pub peak_temperature: f64,     // [K]
    pub angle_step: Option<f64>,   // [CA deg]
    pub variable_cv: Option<LinearCv>,
    pub gamma_solver: Option<JsonGammaSolver>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonGas {
    pub gamma: f64,        // [-]
    pub cv: f64,           // [kJ/(kg.K)]
    pub gas_constant: f64, // [kJ/(kg.K)]
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonInlet {
    pub pressure: f64,    // [Pa]
    pub temperature: f64, // [K]
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonGammaSolver {
    pub iterations: usize,
    pub tolerance: Option<f64>,
}

impl From<&JsonGammaSolver> for FixedPointSettings {
    fn from(json: &JsonGammaSolver) -> FixedPointSettings {
        FixedPointSettings {
            max_iterations: json.iterations,
            tolerance: json.tolerance,
        }
    }
}
