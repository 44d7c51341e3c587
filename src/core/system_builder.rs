use super::system::CycleSimulation;
use crate::engine::config::EngineConfig;
use crate::error::{SimError, SimResult};
use crate::numerics::fixed_point::FixedPointSettings;
use crate::thermo::gamma_solver::GammaSolver;
use crate::thermo::specific_heat::SpecificHeatModel;

/// Collects the pieces of a [`CycleSimulation`]. Once the building is finished, the
/// simulation is created with `build()`, which consumes the builder.
///
/// The engine is mandatory. The variable-gamma `cv(T)` law and the solver settings default
/// to the ones of the engine configuration.
#[derive(Default)]
pub struct SimulationBuilder {
    engine: Option<EngineConfig>,
    cv_model: Option<Box<dyn SpecificHeatModel>>,
    gamma_solver: Option<FixedPointSettings>,
}

impl SimulationBuilder {
    pub fn new() -> SimulationBuilder {
        SimulationBuilder::default()
    }

    /// Add the engine from an `EngineConfig`, replacing any engine added before.
    pub fn with_engine<'a>(&'a mut self, config: EngineConfig) -> &'a mut Self {
        self.engine = Some(config);
        self
    }

    /// Add the engine from a `.json` file (dimensions in mm, speed in RPM).
    pub fn load_engine<'a>(&'a mut self, file_name: &str) -> SimResult<&'a mut Self> {
        self.engine = Some(EngineConfig::from_json_file(file_name)?);
        Ok(self)
    }

    /// Replaces the linear `cv(T)` of the configuration in the variable-gamma model.
    pub fn with_cv_model<'a>(&'a mut self, model: Box<dyn SpecificHeatModel>) -> &'a mut Self {
        self.cv_model = Some(model);
        self
    }

    pub fn with_gamma_solver<'a>(&'a mut self, settings: FixedPointSettings) -> &'a mut Self {
        self.gamma_solver = Some(settings);
        self
    }

    pub fn build(self) -> SimResult<CycleSimulation> {
        let mut config = match self.engine {
            Some(c) => c,
            None => return Err(SimError::invalid("no engine was added to the builder", 0.0)),
        };
        if let Some(settings) = self.gamma_solver {
            config.gamma_solver = settings;
        }
        let cv_model: Box<dyn SpecificHeatModel> = match self.cv_model {
            Some(model) => model,
            None => Box::new(config.variable_cv),
        };
        let solver = GammaSolver::new(cv_model, config.gas_const, config.gamma_solver);
        CycleSimulation::new(config, solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermo::specific_heat::ConstantCv;

    #[test]
    fn engine_is_mandatory() {
        assert!(matches!(
            SimulationBuilder::new().build(),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn invalid_engine_fails_before_running() {
        let mut config = EngineConfig::reference();
        config.compression_ratio = 0.5;
        let mut builder = SimulationBuilder::new();
        builder.with_engine(config);
        assert!(builder.build().is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut builder = SimulationBuilder::new();
        assert!(matches!(
            builder.load_engine("does/not/exist.json"),
            Err(SimError::Io(_))
        ));
    }

    #[test]
    fn constant_cv_makes_both_models_agree() {
        let config = EngineConfig::reference();
        let mut builder = SimulationBuilder::new();
        builder
            .with_engine(config.clone())
            .with_cv_model(Box::new(ConstantCv::new(config.cv)))
            .with_gamma_solver(FixedPointSettings::fixed_count(5));
        let sim = builder.build().unwrap();
        assert_eq!(sim.config().gamma_solver.max_iterations, 5);

        // gamma = (cv + R)/cv = 1.3997, close to the 1.4 of model A
        let res = sim.run().unwrap();
        let tdc = res.boundaries().top_dead_center;
        let a = res.constant_gamma()[tdc - 1].temperature;
        let b = res.variable_gamma()[tdc - 1].temperature;
        assert!(((a - b) / a).abs() < 1e-3);
    }
}
