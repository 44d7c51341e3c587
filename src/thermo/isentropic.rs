//! Isentropic and isochoric relations of a calorically perfect gas.

use crate::cycle::state::ConstantGammaState;
use crate::error::{SimError, SimResult};
use tracing::trace;

/// Returns `v_prev / v_cur` for a compression or expansion step.
///
/// Both volumes must be positive and distinct: the isentropic recurrence makes no
/// progress between equal volumes.
pub fn checked_volume_ratio(sample: usize, v_prev: f64, v_cur: f64) -> SimResult<f64> {
    if !(v_prev > 0.0) || !(v_cur > 0.0) {
        return Err(SimError::degenerate(
            sample,
            format!("non-positive volume ({:e} -> {:e} m³)", v_prev, v_cur),
        ));
    }
    if v_prev == v_cur {
        return Err(SimError::degenerate(
            sample,
            format!("consecutive samples share the volume {:e} m³ outside top dead center", v_cur),
        ));
    }
    Ok(v_prev / v_cur)
}

/// Pressure after heating at constant volume from `temp_prev` to `temp_new`
pub fn isochoric_pressure(press_prev: f64, temp_prev: f64, temp_new: f64) -> f64 {
    press_prev * temp_new / temp_prev
}

/// Advances model A (fixed gamma) from one crank sample to the next.
#[derive(Debug, Clone, Copy)]
pub struct ConstantGammaStepper {
    gamma: f64,
}

impl ConstantGammaStepper {
    pub fn new(gamma: f64) -> ConstantGammaStepper {
        ConstantGammaStepper { gamma }
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Compression or expansion step: `pV^γ` and `TV^(γ-1)` are preserved.
    pub fn isentropic(
        &self,
        sample: usize,
        prev: &ConstantGammaState,
        volume: f64,
    ) -> SimResult<ConstantGammaState> {
        let ratio = checked_volume_ratio(sample, prev.volume, volume)?;
        let state = ConstantGammaState {
            volume,
            pressure: prev.pressure * ratio.powf(self.gamma),
            temperature: prev.temperature * ratio.powf(self.gamma - 1.0),
        };
        trace!(sample, p = state.pressure, t = state.temperature, "constant gamma step");
        Ok(state)
    }

    /// Top-dead-center step: temperature is set to `peak_temp`, pressure follows at
    /// constant volume.
    pub fn heat_addition(
        &self,
        sample: usize,
        prev: &ConstantGammaState,
        volume: f64,
        peak_temp: f64,
    ) -> SimResult<ConstantGammaState> {
        if !(volume > 0.0) {
            return Err(SimError::degenerate(sample, "non-positive clearance volume"));
        }
        Ok(ConstantGammaState {
            volume,
            pressure: isochoric_pressure(prev.pressure, prev.temperature, peak_temp),
            temperature: peak_temp,
        })
    }
}
