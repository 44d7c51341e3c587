use crate::cycle::phase::{Phase, PhaseBoundaries};
use crate::cycle::result::SimulationResult;
use crate::cycle::state::{ConstantGammaState, VariableGammaState};
use crate::cycle::summary::CycleSummary;
use crate::engine::config::EngineConfig;
use crate::engine::geometry::Geometry;
use crate::engine::kinematics::Crankshaft;
use crate::error::{SimError, SimResult};
use crate::thermo::gamma_solver::GammaSolver;
use crate::thermo::isentropic::ConstantGammaStepper;
use crate::thermo::specific_heat::ConstantCv;
use std::f64::consts::PI;
use tracing::{debug, info, trace, warn};

/// One configured engine, ready to simulate a cycle from -180 to 180 CA deg.
///
/// Running does not mutate the simulation, so the same object can be run any number of
/// times and always returns the same result.
#[derive(Debug, Clone)]
pub struct CycleSimulation {
    config: EngineConfig,
    crankshaft: Crankshaft,
    geometry: Geometry,
    constant_gamma: ConstantGammaStepper,
    variable_gamma: GammaSolver,
}

impl CycleSimulation {
    pub(crate) fn new(config: EngineConfig, variable_gamma: GammaSolver) -> SimResult<CycleSimulation> {
        config.validate()?;
        let crankshaft = Crankshaft::new(config.crank_radius, config.rod_length, config.speed);
        let geometry = Geometry::new(config.bore, &crankshaft, config.compression_ratio);
        let constant_gamma = ConstantGammaStepper::new(config.gamma);
        Ok(CycleSimulation {
            config,
            crankshaft,
            geometry,
            constant_gamma,
            variable_gamma,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn crankshaft(&self) -> &Crankshaft {
        &self.crankshaft
    }

    pub fn run(&self) -> SimResult<SimulationResult> {
        let num_samples = self.config.sample_count()?;
        let step = self.config.angle_step_rad()?;
        let bounds = PhaseBoundaries::new(num_samples)?;
        info!(
            samples = num_samples,
            cv_model = self.variable_gamma.cv_model().model_name(),
            "simulating cycle"
        );

        let mut samples = Vec::with_capacity(num_samples);
        let mut constant: Vec<ConstantGammaState> = Vec::with_capacity(num_samples);
        let mut variable: Vec<VariableGammaState> = Vec::with_capacity(num_samples);

        // start of compression: inlet conditions
        let first = self.crankshaft.sample(-PI);
        let volume = self.geometry.volume(first.displacement);
        let (press, temp) = (self.config.inlet_pressure, self.config.inlet_temperature);
        samples.push(first);
        constant.push(ConstantGammaState {
            volume,
            pressure: press,
            temperature: temp,
        });
        variable.push(self.variable_gamma.inlet_state(volume, press, temp)?);

        let mut phase = Phase::Compression;
        for i in 1..bounds.closure {
            let angle = -PI + i as f64 * step;
            let next_phase = phase.next(angle, step).ok_or_else(|| {
                SimError::degenerate(i, format!("cannot move from {} at {:.3} CA deg", phase, angle.to_degrees()))
            })?;
            if next_phase != phase {
                debug!(sample = i, angle = angle.to_degrees(), "entering {}", next_phase);
            }
            phase = next_phase;
            if phase.is_top_dead_center() != (i == bounds.top_dead_center) {
                return Err(SimError::degenerate(i, "top dead center does not fall on the middle sample"));
            }

            let crank = self.crankshaft.sample(angle);
            let volume = self.geometry.sample_volume(crank.displacement, phase.is_top_dead_center());
            let (prev_a, prev_b) = (&constant[i - 1], &variable[i - 1]);
            let (state_a, state_b) = match phase {
                Phase::TopDeadCenter => {
                    let peak = self.config.peak_temperature;
                    (
                        self.constant_gamma.heat_addition(i, prev_a, volume, peak)?,
                        self.variable_gamma.heat_addition(i, prev_b, volume, peak)?,
                    )
                }
                Phase::Compression | Phase::Expansion => (
                    self.constant_gamma.isentropic(i, prev_a, volume)?,
                    self.variable_gamma.isentropic(i, prev_b, volume)?,
                ),
            };
            trace!(
                sample = i,
                volume,
                p_a = state_a.pressure,
                p_b = state_b.pressure,
                "advanced"
            );
            samples.push(crank);
            constant.push(state_a);
            variable.push(state_b);
        }

        // cycle closure: same crank position as the first sample
        samples.push(self.crankshaft.sample(PI));
        constant.push(constant[0]);
        variable.push(variable[0]);

        let constant_summary =
            CycleSummary::from_states(&constant, &bounds, &ConstantCv::new(self.config.cv));
        let variable_summary =
            CycleSummary::from_states(&variable, &bounds, self.variable_gamma.cv_model());
        for (name, summary) in [("constant gamma", &constant_summary), ("variable gamma", &variable_summary)].iter() {
            match summary.thermal_efficiency {
                Some(eta) => debug!(model = *name, net_work = summary.net_work, efficiency = eta, "cycle summary"),
                None => warn!(model = *name, heat_added = summary.heat_added, "no heat added, efficiency undefined"),
            }
        }
        info!(
            p_max_a = constant[bounds.top_dead_center].pressure,
            p_max_b = variable[bounds.top_dead_center].pressure,
            "cycle finished"
        );

        Ok(SimulationResult::new(
            self.config.clone(),
            self.geometry.clearance(),
            bounds,
            samples,
            constant,
            variable,
            constant_summary,
            variable_summary,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::system_builder::SimulationBuilder;

    fn reference_run() -> SimulationResult {
        let mut builder = SimulationBuilder::new();
        builder.with_engine(EngineConfig::reference());
        builder.build().unwrap().run().unwrap()
    }

    #[test]
    fn sequences_cover_the_grid() {
        let res = reference_run();
        assert_eq!(res.len(), 361);
        assert_eq!(res.constant_gamma().len(), 361);
        assert_eq!(res.variable_gamma().len(), 361);
        assert!((res.samples()[180].angle).abs() < 1e-12);
        assert_eq!(res.constant_gamma()[180].volume, res.clearance());
        assert_eq!(res.variable_gamma()[180].volume, res.clearance());
    }

    #[test]
    fn volume_falls_then_rises() {
        let res = reference_run();
        let v: Vec<f64> = res.constant_gamma().iter().map(|s| s.volume).collect();
        for i in 1..=180 {
            assert!(v[i] < v[i - 1], "sample {}", i);
        }
        for i in 181..=359 {
            assert!(v[i] > v[i - 1], "sample {}", i);
        }
        assert!(v.iter().all(|&vol| vol >= res.clearance()));
    }

    #[test]
    fn isentropic_steps_preserve_pv_gamma() {
        let res = reference_run();
        let states = res.constant_gamma();
        for i in (1..360).filter(|&i| i != 180) {
            let before = states[i - 1].pressure * states[i - 1].volume.powf(1.4);
            let after = states[i].pressure * states[i].volume.powf(1.4);
            assert!(((after - before) / before).abs() < 1e-9, "sample {}", i);
        }
    }

    #[test]
    fn gamma_and_cv_stay_physical() {
        let res = reference_run();
        for s in res.variable_gamma() {
            assert!(s.gamma > 1.0 && s.gamma < 1.45);
            assert!(s.cv > 0.0);
            assert!(s.pressure > 0.0 && s.temperature > 0.0);
        }
    }

    #[test]
    fn running_twice_gives_the_same_result() {
        let mut builder = SimulationBuilder::new();
        builder.with_engine(EngineConfig::reference());
        let sim = builder.build().unwrap();
        assert_eq!(sim.run().unwrap(), sim.clone().run().unwrap());
    }

    #[test]
    fn solver_failures_abort_the_run() {
        let mut config = EngineConfig::reference();
        config.gamma_solver = crate::numerics::fixed_point::FixedPointSettings::with_tolerance(1, 1e-12);
        let mut builder = SimulationBuilder::new();
        builder.with_engine(config);
        match builder.build().unwrap().run() {
            Err(SimError::NotConverged { sample, .. }) => assert_eq!(sample, 1),
            other => panic!("unexpected {:?}", other.map(|r| r.len())),
        }
    }
}
