//! Temperature-consistent heat capacity ratio for model B.
//!
//! Along an isentrope the exponent that predicts the new temperature depends on the
//! new temperature itself. The estimate is refined by fixed-point iteration:
//!
//! ```text
//! T' = T_prev (V_prev/V)^(γ-1)
//! cv' = mean cv over [T_prev, T']
//! γ   = (cv' + R)/cv'
//! ```

use super::isentropic::{checked_volume_ratio, isochoric_pressure};
use super::specific_heat::{gamma_from_cv, SpecificHeatModel};
use crate::cycle::state::VariableGammaState;
use crate::error::{SimError, SimResult};
use crate::numerics::fixed_point::{self, FixedPointSettings};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaSolution {
    pub temperature: f64, // [K]
    pub cv: f64,          // [kJ/(kg.K)]
    pub gamma: f64,
    pub iterations: usize,
    pub residual: f64,
}

/// Solves the self-consistent temperature, `cv` and `gamma` reached by an isentropic
/// change of volume from `v_prev` to `v_cur`, starting the search at `gamma_seed`.
///
/// `sample` is only used to locate errors.
pub fn solve_isentropic(
    cv_model: &dyn SpecificHeatModel,
    gas_const: f64,
    settings: &FixedPointSettings,
    sample: usize,
    temp_prev: f64,
    gamma_seed: f64,
    v_prev: f64,
    v_cur: f64,
) -> SimResult<GammaSolution> {
    let ratio = checked_volume_ratio(sample, v_prev, v_cur)?;
    let seed = GammaSolution {
        temperature: temp_prev,
        cv: cv_model.cv(temp_prev),
        gamma: gamma_seed,
        iterations: 0,
        residual: std::f64::INFINITY,
    };
    let outcome = fixed_point::iterate(
        seed,
        settings,
        |est: &GammaSolution| {
            let temperature = temp_prev * ratio.powf(est.gamma - 1.0);
            let cv = cv_model.mean_cv(temp_prev, temperature);
            let gamma = checked_gamma(sample, cv, gas_const)?;
            Ok::<_, SimError>(GammaSolution {
                temperature,
                cv,
                gamma,
                ..*est
            })
        },
        |a, b| (a.gamma - b.gamma).abs(),
    )?;

    if !outcome.converged {
        return Err(SimError::NotConverged {
            sample,
            iterations: outcome.iterations,
            residual: outcome.residual,
        });
    }
    Ok(GammaSolution {
        iterations: outcome.iterations,
        residual: outcome.residual,
        ..outcome.value
    })
}

fn checked_gamma(sample: usize, cv: f64, gas_const: f64) -> SimResult<f64> {
    if !(cv > 0.0) || !cv.is_finite() {
        return Err(SimError::degenerate(
            sample,
            format!("non-physical cv = {} kJ/(kg.K)", cv),
        ));
    }
    Ok(gamma_from_cv(cv, gas_const))
}

/// Advances model B (temperature dependent gamma) from one crank sample to the next.
#[derive(Debug, Clone)]
pub struct GammaSolver {
    cv_model: Box<dyn SpecificHeatModel>,
    gas_const: f64,
    settings: FixedPointSettings,
}

impl GammaSolver {
    pub fn new(
        cv_model: Box<dyn SpecificHeatModel>,
        gas_const: f64,
        settings: FixedPointSettings,
    ) -> GammaSolver {
        GammaSolver {
            cv_model,
            gas_const,
            settings,
        }
    }

    pub fn cv_model(&self) -> &dyn SpecificHeatModel {
        self.cv_model.as_ref()
    }

    pub fn settings(&self) -> &FixedPointSettings {
        &self.settings
    }

    /// State at the start of compression; `cv` and `gamma` evaluated at the inlet temperature.
    pub fn inlet_state(&self, volume: f64, pressure: f64, temp: f64) -> SimResult<VariableGammaState> {
        let cv = self.cv_model.cv(temp);
        Ok(VariableGammaState {
            volume,
            pressure,
            temperature: temp,
            gamma: checked_gamma(0, cv, self.gas_const)?,
            cv,
        })
    }

    pub fn isentropic(
        &self,
        sample: usize,
        prev: &VariableGammaState,
        volume: f64,
    ) -> SimResult<VariableGammaState> {
        let sol = solve_isentropic(
            self.cv_model.as_ref(),
            self.gas_const,
            &self.settings,
            sample,
            prev.temperature,
            prev.gamma,
            prev.volume,
            volume,
        )?;
        trace!(sample, gamma = sol.gamma, iterations = sol.iterations, "variable gamma step");
        Ok(VariableGammaState {
            volume,
            pressure: prev.pressure * (prev.volume / volume).powf(sol.gamma),
            temperature: sol.temperature,
            gamma: sol.gamma,
            cv: sol.cv,
        })
    }

    /// Top-dead-center step: temperature pinned to `peak_temp`, `cv` averaged over the jump.
    pub fn heat_addition(
        &self,
        sample: usize,
        prev: &VariableGammaState,
        volume: f64,
        peak_temp: f64,
    ) -> SimResult<VariableGammaState> {
        if !(volume > 0.0) {
            return Err(SimError::degenerate(sample, "non-positive clearance volume"));
        }
        let cv = self.cv_model.mean_cv(prev.temperature, peak_temp);
        Ok(VariableGammaState {
            volume,
            pressure: isochoric_pressure(prev.pressure, prev.temperature, peak_temp),
            temperature: peak_temp,
            gamma: checked_gamma(sample, cv, self.gas_const)?,
            cv,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermo::specific_heat::{ConstantCv, LinearCv};

    const R_AIR: f64 = 0.287;

    fn solve(settings: &FixedPointSettings, temp: f64, gamma: f64, ratio: f64) -> GammaSolution {
        solve_isentropic(&LinearCv::default(), R_AIR, settings, 1, temp, gamma, 1e-4 * ratio, 1e-4)
            .unwrap()
    }

    #[test]
    fn solution_is_self_consistent() {
        let sol = solve(&FixedPointSettings::default(), 298.0, 1.4, 9.0);
        let model = LinearCv::default();
        assert_eq!(sol.iterations, 20);
        assert!((sol.temperature - 298.0 * 9f64.powf(sol.gamma - 1.0)).abs() < 1e-6);
        assert!((sol.cv - model.mean_cv(298.0, sol.temperature)).abs() < 1e-12);
        assert!((sol.gamma - (sol.cv + R_AIR) / sol.cv).abs() < 1e-12);
        assert!(sol.gamma > 1.0 && sol.gamma < 1.4);
    }

    #[test]
    fn tighter_tolerance_barely_moves_gamma() {
        let reference = FixedPointSettings::default();
        let tight = FixedPointSettings::with_tolerance(500, 1e-12);
        for &(temp, ratio) in &[(298.0, 1.002), (650.0, 0.999), (3000.0, 0.98), (1500.0, 9.0), (900.0, 0.2)] {
            let a = solve(&reference, temp, 1.35, ratio);
            let b = solve(&tight, temp, 1.35, ratio);
            assert!((a.gamma - b.gamma).abs() < 1e-10, "T = {}, r = {}", temp, ratio);
            assert!(b.iterations < 500);
        }
    }

    #[test]
    fn constant_cv_reproduces_model_a() {
        let model = ConstantCv::new(0.718);
        let sol = solve_isentropic(&model, R_AIR, &FixedPointSettings::default(), 1, 298.0, 1.2, 9e-4, 1e-4)
            .unwrap();
        let gamma = (0.718 + R_AIR) / 0.718;
        assert!((sol.gamma - gamma).abs() < 1e-12);
        assert!((sol.temperature - 298.0 * 9f64.powf(gamma - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn unreachable_tolerance_is_not_converged() {
        let settings = FixedPointSettings::with_tolerance(2, 1e-300);
        let res = solve_isentropic(&LinearCv::default(), R_AIR, &settings, 4, 400.0, 1.4, 2e-4, 1e-4);
        match res {
            Err(SimError::NotConverged { sample, iterations, .. }) => {
                assert_eq!(sample, 4);
                assert_eq!(iterations, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn negative_cv_is_degenerate() {
        let model = LinearCv::new(-0.5, 1e-5);
        let res = solve_isentropic(&model, R_AIR, &FixedPointSettings::default(), 2, 400.0, 1.4, 2e-4, 1e-4);
        assert!(matches!(res, Err(SimError::Degenerate { sample: 2, .. })));
    }

    #[test]
    fn peak_step_uses_mean_cv_over_the_jump() {
        let solver = GammaSolver::new(Box::new(LinearCv::default()), R_AIR, FixedPointSettings::default());
        let prev = solver.inlet_state(1e-4, 2.0e6, 700.0).unwrap();
        let next = solver.heat_addition(180, &prev, 1e-4, 3000.0).unwrap();
        let expected_cv = 0.71 + 9.5e-5 * (700.0 + 3000.0) / 2.0;
        assert!((next.cv - expected_cv).abs() < 1e-12);
        assert!((next.pressure - 2.0e6 * 3000.0 / 700.0).abs() < 1e-6);
        assert_eq!(next.temperature, 3000.0);
    }

    #[test]
    fn expansion_cools_the_gas() {
        let solver = GammaSolver::new(Box::new(LinearCv::default()), R_AIR, FixedPointSettings::default());
        let prev = solver.inlet_state(1e-4, 8.0e6, 3000.0).unwrap();
        let next = solver.isentropic(181, &prev, 1.1e-4).unwrap();
        assert!(next.temperature < 3000.0);
        assert!(next.pressure < 8.0e6);
        assert!(next.gamma > 1.0);
    }
}
