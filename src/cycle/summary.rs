//! Energy balance of one simulated cycle.

use super::phase::PhaseBoundaries;
use super::state::ThermoState;
use crate::thermo::specific_heat::SpecificHeatModel;
use ansi_term::Style;
use serde::{Deserialize, Serialize};

/// Heat input [kJ/kg] under which the thermal efficiency is left undefined. Negative heat
/// input (peak below the end-of-compression temperature) falls under it too.
pub const MIN_HEAT_ADDED: f64 = 1e-9;

/// All energies in kJ/kg.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CycleSummary {
    pub heat_added: f64,
    pub heat_rejected: f64,
    pub compression_work: f64,
    pub expansion_work: f64,
    pub net_work: f64,
    /// `None` unless heat is actually added at top dead center
    pub thermal_efficiency: Option<f64>,
}

impl CycleSummary {
    /// Builds the summary from the temperatures at the phase boundaries. Every term is
    /// `mean cv * ΔT` over the corresponding interval.
    pub fn from_states<S: ThermoState>(
        states: &[S],
        bounds: &PhaseBoundaries,
        cv_model: &dyn SpecificHeatModel,
    ) -> CycleSummary {
        let t_start = states[bounds.start_of_compression].temperature();
        let t_eoc = states[bounds.end_of_compression].temperature();
        let t_tdc = states[bounds.top_dead_center].temperature();
        let t_eoe = states[bounds.end_of_expansion].temperature();

        let energy = |t_1: f64, t_2: f64| cv_model.mean_cv(t_1, t_2) * (t_2 - t_1);
        let heat_added = energy(t_eoc, t_tdc);
        let heat_rejected = energy(t_start, t_eoe);
        let compression_work = energy(t_start, t_eoc);
        let expansion_work = energy(t_eoe, t_tdc);
        let net_work = expansion_work - compression_work;
        let thermal_efficiency = if heat_added < MIN_HEAT_ADDED {
            None
        } else {
            Some(net_work / heat_added)
        };

        CycleSummary {
            heat_added,
            heat_rejected,
            compression_work,
            expansion_work,
            net_work,
            thermal_efficiency,
        }
    }
}

impl std::fmt::Display for CycleSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let efficiency = match self.thermal_efficiency {
            Some(eta) => format!("{:.2} [%]", 100.0 * eta),
            None => "undefined (no heat added)".to_string(),
        };
        write!(
            f,
            "heat added: {:.2} [kJ/kg]
        heat rejected: {:.2} [kJ/kg]
        compression work: {:.2} [kJ/kg]
        expansion work: {:.2} [kJ/kg]
        net work: {:.2} [kJ/kg]
        thermal efficiency: {}",
            self.heat_added,
            self.heat_rejected,
            self.compression_work,
            self.expansion_work,
            self.net_work,
            Style::new().bold().paint(efficiency),
        )
    }
}
