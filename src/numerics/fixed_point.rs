//! Fixed-point iteration `x_{k+1} = g(x_k)`

use serde::{Deserialize, Serialize};

/// Iteration budget of a fixed-point search.
///
/// Without a `tolerance` the map is applied exactly `max_iterations` times and the last
/// estimate is accepted. With a `tolerance` the search stops as soon as two successive
/// estimates are closer than the tolerance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FixedPointSettings {
    pub max_iterations: usize,
    pub tolerance: Option<f64>,
}

impl FixedPointSettings {
    pub fn fixed_count(iterations: usize) -> FixedPointSettings {
        FixedPointSettings {
            max_iterations: iterations,
            tolerance: None,
        }
    }

    pub fn with_tolerance(max_iterations: usize, tolerance: f64) -> FixedPointSettings {
        FixedPointSettings {
            max_iterations,
            tolerance: Some(tolerance),
        }
    }
}

impl Default for FixedPointSettings {
    fn default() -> FixedPointSettings {
        FixedPointSettings::fixed_count(20)
    }
}

/// Outcome of [`iterate`].
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPoint<T> {
    pub value: T,
    pub iterations: usize,
    /// distance between the last two estimates
    pub residual: f64,
    /// always `true` for fixed-count searches
    pub converged: bool,
}

/// Applies `map` starting from `seed` according to `settings`.
///
/// `distance` measures two successive estimates. Errors returned by `map` stop the
/// search immediately.
///
/// # Examples
///
/// ```
/// use ice_cycle_simulator::numerics::fixed_point::{iterate, FixedPointSettings};
///
/// let settings = FixedPointSettings::with_tolerance(200, 1e-12);
/// let root = iterate(1.0_f64, &settings, |x| Ok::<f64, ()>(x.cos()), |a, b| (a - b).abs()).unwrap();
/// assert!((root.value - 0.739_085_133_215_160_6).abs() < 1e-10);
/// ```
pub fn iterate<T, E, F, D>(
    seed: T,
    settings: &FixedPointSettings,
    mut map: F,
    distance: D,
) -> Result<FixedPoint<T>, E>
where
    F: FnMut(&T) -> Result<T, E>,
    D: Fn(&T, &T) -> f64,
{
    let mut current = seed;
    let mut residual = std::f64::INFINITY;
    for k in 1..=settings.max_iterations {
        let next = map(&current)?;
        residual = distance(&current, &next);
        current = next;
        if let Some(tol) = settings.tolerance {
            if residual < tol {
                return Ok(FixedPoint {
                    value: current,
                    iterations: k,
                    residual,
                    converged: true,
                });
            }
        }
    }
    Ok(FixedPoint {
        value: current,
        iterations: settings.max_iterations,
        residual,
        converged: settings.tolerance.is_none(),
    })
}
