use super::phase::PhaseBoundaries;
use super::state::{ConstantGammaState, VariableGammaState};
use super::summary::CycleSummary;
use crate::core::traits::SaveData;
use crate::engine::config::EngineConfig;
use crate::engine::kinematics::CrankSample;
use crate::error::SimResult;
use ndarray::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Everything computed for one cycle. Sequences are indexed by crank sample; index 0 and
/// the last index are the same crank position.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationResult {
    config: EngineConfig,
    clearance: f64, // [m³]
    boundaries: PhaseBoundaries,
    samples: Vec<CrankSample>,
    constant_gamma: Vec<ConstantGammaState>,
    variable_gamma: Vec<VariableGammaState>,
    constant_summary: CycleSummary,
    variable_summary: CycleSummary,
}

impl SimulationResult {
    pub(crate) fn new(
        config: EngineConfig,
        clearance: f64,
        boundaries: PhaseBoundaries,
        samples: Vec<CrankSample>,
        constant_gamma: Vec<ConstantGammaState>,
        variable_gamma: Vec<VariableGammaState>,
        constant_summary: CycleSummary,
        variable_summary: CycleSummary,
    ) -> SimulationResult {
        SimulationResult {
            config,
            clearance,
            boundaries,
            samples,
            constant_gamma,
            variable_gamma,
            constant_summary,
            variable_summary,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Clearance volume [m³]
    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    pub fn boundaries(&self) -> &PhaseBoundaries {
        &self.boundaries
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[CrankSample] {
        &self.samples
    }

    pub fn constant_gamma(&self) -> &[ConstantGammaState] {
        &self.constant_gamma
    }

    pub fn variable_gamma(&self) -> &[VariableGammaState] {
        &self.variable_gamma
    }

    pub fn constant_summary(&self) -> &CycleSummary {
        &self.constant_summary
    }

    pub fn variable_summary(&self) -> &CycleSummary {
        &self.variable_summary
    }

    fn rows<'a>(
        &'a self,
    ) -> impl Iterator<Item = (&'a CrankSample, &'a ConstantGammaState, &'a VariableGammaState)> + 'a {
        self.samples
            .iter()
            .zip(self.constant_gamma.iter())
            .zip(self.variable_gamma.iter())
            .map(|((s, a), b)| (s, a, b))
    }

    pub fn get_headers(&self) -> String {
        match self.rows().next() {
            Some((s, a, b)) => format!("{}\t{}\t{}", s.get_headers(), a.get_headers(), b.get_headers()),
            None => String::new(),
        }
    }

    /// One row per crank sample: kinematics, model A and model B columns, in output units.
    pub fn to_table(&self) -> Array2<f64> {
        let num_cols = match self.rows().next() {
            Some((s, a, b)) => {
                s.num_storable_variables() + a.num_storable_variables() + b.num_storable_variables()
            }
            None => 0,
        };
        let mut table = Array2::<f64>::zeros((self.len(), num_cols));
        for (i, (s, a, b)) in self.rows().enumerate() {
            let row = stack![
                Axis(0),
                s.get_storable_data(),
                a.get_storable_data(),
                b.get_storable_data()
            ];
            table.row_mut(i).assign(&row);
        }
        table
    }

    /// Writes the table to `file_name` with a header line.
    pub fn write_to_file(&self, file_name: &str) -> SimResult<()> {
        let table = self.to_table();
        let mut result: Vec<String> = Vec::with_capacity(self.len() + 1);
        result.push(format!("{}\n", self.get_headers()));
        for row in table.outer_iter() {
            let line: Vec<String> = row.iter().map(|v| format!("{:.6e}", v)).collect();
            result.push(format!("{}\n", line.join("\t")));
        }
        let mut file = std::fs::File::create(file_name)?;
        write!(file, "{}", result.join(""))?;
        Ok(())
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
