//! Compression / top-dead-center / expansion state machine.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Compression,
    TopDeadCenter,
    Expansion,
}

impl Phase {
    /// Phase of the sample at `angle` [rad] on a crank grid of spacing `step` [rad].
    /// The TDC sample is the one within half a step of 0.
    pub fn at(angle: f64, step: f64) -> Phase {
        if angle.abs() <= 0.5 * step {
            Phase::TopDeadCenter
        } else if angle < 0.0 {
            Phase::Compression
        } else {
            Phase::Expansion
        }
    }

    /// Moves to the phase of the next sample. Returns `None` when the move would skip
    /// top dead center or run backwards.
    pub fn next(self, angle: f64, step: f64) -> Option<Phase> {
        let target = Phase::at(angle, step);
        match (self, target) {
            (Phase::Compression, Phase::Compression)
            | (Phase::Compression, Phase::TopDeadCenter)
            | (Phase::TopDeadCenter, Phase::Expansion)
            | (Phase::Expansion, Phase::Expansion) => Some(target),
            _ => None,
        }
    }

    pub fn is_top_dead_center(self) -> bool {
        self == Phase::TopDeadCenter
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Compression => "compression",
            Phase::TopDeadCenter => "top dead center",
            Phase::Expansion => "expansion",
        };
        write!(f, "{}", name)
    }
}

/// Sample indices delimiting the cycle phases. Both working-fluid models are summarized
/// with the same boundaries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseBoundaries {
    pub start_of_compression: usize,
    pub end_of_compression: usize,
    pub top_dead_center: usize,
    pub end_of_expansion: usize,
    /// same crank position as `start_of_compression`
    pub closure: usize,
}

impl PhaseBoundaries {
    /// Boundaries of a grid of `samples` points spanning -180..180 CA deg.
    pub fn new(samples: usize) -> SimResult<PhaseBoundaries> {
        if samples < 5 || samples % 2 == 0 {
            return Err(SimError::invalid(
                "crank grid needs an odd number of at least 5 samples",
                samples as f64,
            ));
        }
        let tdc = (samples - 1) / 2;
        Ok(PhaseBoundaries {
            start_of_compression: 0,
            end_of_compression: tdc - 1,
            top_dead_center: tdc,
            end_of_expansion: samples - 2,
            closure: samples - 1,
        })
    }

    pub fn samples(&self) -> usize {
        self.closure + 1
    }
}
