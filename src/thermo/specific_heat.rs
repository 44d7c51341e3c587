//! Specific heat at constant volume as a function of temperature.
//!
//! All values are in kJ/(kg.K).

use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};

/// Relative width under which a temperature interval is treated as a single point.
const SAME_TEMPERATURE: f64 = 1e-12;

pub trait SpecificHeatModel: DynClone + std::fmt::Debug {
    fn model_name(&self) -> &str;
    /// Returns `cv` at temperature `temp` [K]
    fn cv(&self, temp: f64) -> f64;
    /// Returns the internal energy relative to 0 K, `∫cv dT` [kJ/kg]
    fn internal_energy(&self, temp: f64) -> f64;

    /// Secant-averaged `cv` over `[temp_1, temp_2]`, i.e. `Δu/ΔT`.
    /// Collapses to `cv(temp_1)` when both temperatures coincide.
    fn mean_cv(&self, temp_1: f64, temp_2: f64) -> f64 {
        let delta = temp_2 - temp_1;
        if delta.abs() <= SAME_TEMPERATURE * temp_1.abs().max(temp_2.abs()).max(1.0) {
            return self.cv(temp_1);
        }
        (self.internal_energy(temp_2) - self.internal_energy(temp_1)) / delta
    }
}

dyn_clone::clone_trait_object!(SpecificHeatModel);

/// Calorically perfect gas.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ConstantCv {
    pub cv: f64,
}

impl ConstantCv {
    pub fn new(cv: f64) -> ConstantCv {
        ConstantCv { cv }
    }
}

impl SpecificHeatModel for ConstantCv {
    fn model_name(&self) -> &str {
        "constant cv"
    }
    fn cv(&self, _: f64) -> f64 {
        self.cv
    }
    fn internal_energy(&self, temp: f64) -> f64 {
        self.cv * temp
    }
    fn mean_cv(&self, _: f64, _: f64) -> f64 {
        self.cv
    }
}

/// `cv(T) = a + b*T`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LinearCv {
    pub a: f64,
    pub b: f64,
}

impl LinearCv {
    pub fn new(a: f64, b: f64) -> LinearCv {
        LinearCv { a, b }
    }
}

impl Default for LinearCv {
    /// Air between roughly 300 K and 3000 K
    fn default() -> LinearCv {
        LinearCv { a: 0.71, b: 9.5e-5 }
    }
}

impl SpecificHeatModel for LinearCv {
    fn model_name(&self) -> &str {
        "linear cv(T)"
    }
    fn cv(&self, temp: f64) -> f64 {
        self.a + self.b * temp
    }
    fn internal_energy(&self, temp: f64) -> f64 {
        self.a * temp + 0.5 * self.b * temp * temp
    }
}

/// Heat capacity ratio from `cv` and the gas constant, `(cv + R)/cv`.
pub fn gamma_from_cv(cv: f64, gas_const: f64) -> f64 {
    (cv + gas_const) / cv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_mean_is_midpoint_value() {
        let model = LinearCv::default();
        let mean = model.mean_cv(300.0, 700.0);
        assert!((mean - model.cv(500.0)).abs() < 1e-12);
        // order of the interval does not matter
        assert!((model.mean_cv(700.0, 300.0) - mean).abs() < 1e-12);
    }

    #[test]
    fn equal_temperatures_use_the_limit() {
        let model = LinearCv::default();
        let cv = model.mean_cv(1200.0, 1200.0);
        assert!(cv.is_finite());
        assert!((cv - model.cv(1200.0)).abs() < 1e-12);
    }

    #[test]
    fn constant_model_ignores_temperature() {
        let model = ConstantCv::new(0.718);
        assert_eq!(model.cv(300.0), model.cv(2500.0));
        assert_eq!(model.mean_cv(300.0, 2500.0), 0.718);
    }

    #[test]
    fn boxed_models_clone() {
        let model: Box<dyn SpecificHeatModel> = Box::new(LinearCv::new(0.7, 1e-4));
        let copy = model.clone();
        assert_eq!(copy.model_name(), "linear cv(T)");
        assert_eq!(copy.cv(1000.0), model.cv(1000.0));
    }

    #[test]
    fn air_gamma() {
        let gamma = gamma_from_cv(0.718, 0.287);
        assert!((gamma - 1.3997).abs() < 1e-3);
    }
}
