//! # ice_cycle_simulator
//!
//! The `ice_cycle_simulator` crate simulates the closed air-standard cycle of one
//! reciprocating engine cylinder over a full crank revolution, from -180 CA deg (bottom
//! dead center, start of compression) to 180 CA deg (end of expansion).
//!
//! Two working-fluid models are integrated side by side:
//!
//! * **constant gamma**: isentropic compression and expansion of a calorically perfect gas;
//! * **variable gamma**: `cv` grows linearly with temperature and the heat capacity ratio
//!   of every step is found by fixed-point iteration.
//!
//! Combustion is an imposed peak temperature at top dead center.
//!
//! ```
//! use ice_cycle_simulator as ice;
//!
//! let mut builder = ice::SimulationBuilder::new();
//! builder.with_engine(ice::EngineConfig::reference());
//! let result = builder.build()?.run()?;
//!
//! let eta = result.constant_summary().thermal_efficiency.unwrap();
//! assert!(eta > 0.0 && eta < 1.0);
//! # Ok::<(), ice::SimError>(())
//! ```

mod core;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod numerics;
pub mod plot;
pub mod thermo;

// Re-exporting
pub use crate::core::system::CycleSimulation;
pub use crate::core::system_builder::SimulationBuilder;
pub use crate::core::traits::SaveData;
pub use crate::cycle::result::SimulationResult;
pub use crate::cycle::summary::CycleSummary;
pub use crate::engine::config::EngineConfig;
pub use crate::error::{SimError, SimResult};
