//! Error types of the cycle simulation.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    /// The engine description cannot be simulated. Raised before the run starts.
    #[error("Invalid configuration: {what} (value = {value})")]
    InvalidConfig { what: &'static str, value: f64 },

    /// The recurrence hit a state it cannot advance from.
    #[error("Degenerate state at sample {sample}: {what}")]
    Degenerate { sample: usize, what: String },

    #[error("Gamma iteration did not converge at sample {sample} after {iterations} iterations (residual = {residual:e})")]
    NotConverged {
        sample: usize,
        iterations: usize,
        residual: f64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(what: &'static str, value: f64) -> SimError {
        SimError::InvalidConfig { what, value }
    }

    pub(crate) fn degenerate<S: Into<String>>(sample: usize, what: S) -> SimError {
        SimError::Degenerate {
            sample,
            what: what.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = SimError::invalid("compression ratio must be greater than one", 0.5);
        assert!(format!("{}", err).contains("compression ratio"));

        let err = SimError::NotConverged {
            sample: 12,
            iterations: 50,
            residual: 1e-3,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("sample 12"));
        assert!(msg.contains("50 iterations"));
    }
}
