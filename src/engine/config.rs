use super::json_reader::JsonEngine;
use crate::error::{SimError, SimResult};
use crate::numerics::fixed_point::FixedPointSettings;
use crate::thermo::specific_heat::{LinearCv, SpecificHeatModel};
use ansi_term::Style;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Finest crank-angle grid [CA deg]; 36001 samples per cycle.
pub const MIN_ANGLE_STEP: f64 = 0.01;

/// Residuals of the gamma iteration level off a few ulps above zero, so tighter
/// tolerances can never be met.
pub const MIN_SOLVER_TOLERANCE: f64 = 1e-12;

/// Everything a cycle simulation needs to know about the engine and its working fluid.
///
/// Lengths in meters, `speed` in RPM, `cv` and `gas_const` in kJ/(kg.K), pressures in Pa,
/// temperatures in K, `angle_step` in CA degrees.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub stroke: f64,
    pub crank_radius: f64,
    pub rod_length: f64,
    pub bore: f64,
    pub compression_ratio: f64,
    pub speed: f64,
    pub gamma: f64,
    pub cv: f64,
    pub gas_const: f64,
    pub inlet_pressure: f64,
    pub inlet_temperature: f64,
    pub peak_temperature: f64,
    pub angle_step: f64,
    /// `cv(T)` of the variable-gamma model
    pub variable_cv: LinearCv,
    pub gamma_solver: FixedPointSettings,
}

impl EngineConfig {
    /// 100 mm bore and stroke, 160 mm conrod, compression ratio 9, 1000 RPM, air at
    /// 101325 Pa and 298 K heated to 3000 K at top dead center.
    pub fn reference() -> EngineConfig {
        EngineConfig {
            stroke: 0.1,
            crank_radius: 0.05,
            rod_length: 0.16,
            bore: 0.1,
            compression_ratio: 9.0,
            speed: 1000.0,
            gamma: 1.4,
            cv: 0.718,
            gas_const: 0.287,
            inlet_pressure: 101325.0,
            inlet_temperature: 298.0,
            peak_temperature: 3000.0,
            angle_step: 1.0,
            variable_cv: LinearCv::default(),
            gamma_solver: FixedPointSettings::default(),
        }
    }

    /// Reads an engine `.json` file. Engine dimensions are given in `mm` and speed in `RPM`.
    pub fn from_json_file(file_name: &str) -> SimResult<EngineConfig> {
        let json_file = std::fs::read_to_string(file_name)?;
        EngineConfig::from_json_str(&json_file)
    }

    pub fn from_json_str(json: &str) -> SimResult<EngineConfig> {
        let data: JsonEngine = serde_json::from_str(json)?;
        let config = EngineConfig {
            stroke: data.stroke * 1e-3,
            crank_radius: data.crank_radius.unwrap_or(0.5 * data.stroke) * 1e-3,
            rod_length: data.conrod * 1e-3,
            bore: data.bore * 1e-3,
            compression_ratio: data.compression_ratio,
            speed: data.speed,
            gamma: data.gas.gamma,
            cv: data.gas.cv,
            gas_const: data.gas.gas_constant,
            inlet_pressure: data.inlet.pressure,
            inlet_temperature: data.inlet.temperature,
            peak_temperature: data.peak_temperature,
            angle_step: data.angle_step.unwrap_or(1.0),
            variable_cv: data.variable_cv.unwrap_or_default(),
            gamma_solver: data
                .gamma_solver
                .as_ref()
                .map(FixedPointSettings::from)
                .unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field before a simulation is allowed to start.
    pub fn validate(&self) -> SimResult<()> {
        let finite = [
            self.stroke,
            self.crank_radius,
            self.rod_length,
            self.bore,
            self.compression_ratio,
            self.speed,
            self.gamma,
            self.cv,
            self.gas_const,
            self.inlet_pressure,
            self.inlet_temperature,
            self.peak_temperature,
            self.angle_step,
            self.variable_cv.a,
            self.variable_cv.b,
        ];
        if let Some(v) = finite.iter().find(|v| !v.is_finite()) {
            return Err(SimError::invalid("parameters must be finite", *v));
        }

        if self.stroke <= 0.0 {
            return Err(SimError::invalid("stroke must be positive", self.stroke));
        } else if (2.0 * self.crank_radius - self.stroke).abs() > 1e-9 * self.stroke {
            return Err(SimError::invalid("crank radius must be half the stroke", self.crank_radius));
        } else if self.rod_length <= self.crank_radius {
            return Err(SimError::invalid("conrod must be longer than the crank radius", self.rod_length));
        } else if self.bore <= 0.0 {
            return Err(SimError::invalid("bore must be positive", self.bore));
        } else if self.compression_ratio <= 1.0 {
            return Err(SimError::invalid("compression ratio must be greater than one", self.compression_ratio));
        } else if self.speed < 0.0 {
            return Err(SimError::invalid("engine speed cannot be lower than zero", self.speed));
        } else if self.gamma <= 1.0 {
            return Err(SimError::invalid("gamma must be greater than one", self.gamma));
        } else if self.cv <= 0.0 {
            return Err(SimError::invalid("cv must be positive", self.cv));
        } else if self.gas_const <= 0.0 {
            return Err(SimError::invalid("gas constant must be positive", self.gas_const));
        } else if self.inlet_pressure <= 0.0 {
            return Err(SimError::invalid("inlet pressure must be positive", self.inlet_pressure));
        } else if self.inlet_temperature <= 0.0 {
            return Err(SimError::invalid("inlet temperature must be positive", self.inlet_temperature));
        } else if self.peak_temperature < self.inlet_temperature {
            return Err(SimError::invalid(
                "peak temperature cannot be lower than the inlet temperature",
                self.peak_temperature,
            ));
        } else if self.variable_cv.cv(self.inlet_temperature) <= 0.0
            || self.variable_cv.cv(self.peak_temperature) <= 0.0
        {
            return Err(SimError::invalid("variable cv must be positive over the cycle", self.variable_cv.a));
        }

        self.half_revolution_steps()?;

        if self.gamma_solver.max_iterations == 0 {
            return Err(SimError::invalid("gamma solver needs at least one iteration", 0.0));
        }
        if let Some(tol) = self.gamma_solver.tolerance {
            if !(tol >= MIN_SOLVER_TOLERANCE) {
                return Err(SimError::invalid("gamma solver tolerance must be at least 1e-12", tol));
            }
        }
        Ok(())
    }

    /// Number of crank samples between BDC and TDC
    fn half_revolution_steps(&self) -> SimResult<usize> {
        if !(self.angle_step >= MIN_ANGLE_STEP && self.angle_step <= 90.0) {
            return Err(SimError::invalid("angle step must be in [0.01, 90] CA deg", self.angle_step));
        }
        let steps = 180.0 / self.angle_step;
        if (steps - steps.round()).abs() > 1e-9 * steps {
            return Err(SimError::invalid("angle step must divide 180 CA deg", self.angle_step));
        }
        Ok(steps.round() as usize)
    }

    /// Samples from -180 to 180 CA deg, both ends included.
    pub fn sample_count(&self) -> SimResult<usize> {
        Ok(2 * self.half_revolution_steps()? + 1)
    }

    /// Crank-angle step [rad] of the sample grid
    pub fn angle_step_rad(&self) -> SimResult<f64> {
        Ok(PI / self.half_revolution_steps()? as f64)
    }
}

impl std::fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}
        {} \t\t\t {}
        stroke: {:.1} [mm] \t\t\t gamma: {:.3}
        bore: {:.1} [mm] \t\t\t cv: {:.3} [kJ/(kg.K)]
        conrod: {:.1} [mm] \t\t\t R: {:.3} [kJ/(kg.K)]
        compression ratio: {:.1} \t\t inlet: {:.0} [Pa], {:.1} [K]
        speed: {:.0} [RPM] \t\t\t peak temperature: {:.1} [K]
        crank-angle step: {} [CA deg] \t cv(T): {} + {:e} T [kJ/(kg.K)]",
            Style::new().bold().paint("engine"),
            Style::new().underline().paint("     Geometry     "),
            Style::new().underline().paint("   Working fluid   "),
            self.stroke * 1e3,
            self.gamma,
            self.bore * 1e3,
            self.cv,
            self.rod_length * 1e3,
            self.gas_const,
            self.compression_ratio,
            self.inlet_pressure,
            self.inlet_temperature,
            self.speed,
            self.peak_temperature,
            self.angle_step,
            self.variable_cv.a,
            self.variable_cv.b,
        )
    }
}
