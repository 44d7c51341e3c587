//! Slider-crank kinematics of the piston.

use crate::core::traits::SaveData;
use ndarray::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Piston motion at one crank angle. Crank angle is 0 at top dead center.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CrankSample {
    pub angle: f64,        // [CA rad]
    pub displacement: f64, // [m] - distance from top dead center
    pub velocity: f64,     // [m/s]
    pub acceleration: f64, // [m/s²]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Crankshaft {
    crank: f64,      // [m]
    conrod: f64,     // [m]
    sec_to_rad: f64, // constant: 2*PI*speed
}

impl Crankshaft {
    /// Inputs in SI units, except `speed` in RPM.
    pub fn new(crank: f64, conrod: f64, speed: f64) -> Crankshaft {
        Crankshaft {
            crank,
            conrod,
            sec_to_rad: 2.0 * PI * speed / 60.0,
        }
    }

    pub fn crank(&self) -> f64 {
        self.crank
    }

    pub fn conrod(&self) -> f64 {
        self.conrod
    }

    /// Shaft angular speed [rad/s]
    pub fn sec_to_rad(&self) -> f64 {
        self.sec_to_rad
    }

    fn crank_conrod_ratio(&self) -> f64 {
        self.crank / self.conrod
    }

    pub fn displacement(&self, angle: f64) -> f64 {
        let lambda = self.crank_conrod_ratio();
        let half_sin = (0.5 * angle).sin();
        self.conrod * lambda * lambda * half_sin * half_sin + self.crank * (1.0 - angle.cos())
    }

    pub fn velocity(&self, angle: f64) -> f64 {
        let lambda = self.crank_conrod_ratio();
        self.crank * self.sec_to_rad * (angle.sin() + 0.5 * lambda * (2.0 * angle).sin())
    }

    pub fn acceleration(&self, angle: f64) -> f64 {
        let lambda = self.crank_conrod_ratio();
        self.crank * self.sec_to_rad * self.sec_to_rad * (angle.cos() + lambda * (2.0 * angle).cos())
    }

    pub fn sample(&self, angle: f64) -> CrankSample {
        CrankSample {
            angle,
            displacement: self.displacement(angle),
            velocity: self.velocity(angle),
            acceleration: self.acceleration(angle),
        }
    }
}

impl SaveData for CrankSample {
    fn get_headers(&self) -> String {
        "crank-angle [deg]\tdisplacement [mm]\tvelocity [m/s]\tacceleration [m/s²]".to_string()
    }
    fn num_storable_variables(&self) -> usize {
        4
    }
    fn get_storable_data(&self) -> Array1<f64> {
        array![
            self.angle.to_degrees(),
            self.displacement * 1e3,
            self.velocity,
            self.acceleration
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crankshaft() -> Crankshaft {
        // 100 mm stroke, 160 mm conrod, 1000 RPM
        Crankshaft::new(0.05, 0.16, 1000.0)
    }

    #[test]
    fn displacement_at_dead_centers() {
        let c = crankshaft();
        assert_eq!(c.displacement(0.0), 0.0);
        let bdc = 0.05 * 0.05 / 0.16 + 0.1;
        assert!((c.displacement(PI) - bdc).abs() < 1e-12);
        assert!((c.displacement(-PI) - bdc).abs() < 1e-12);
    }

    #[test]
    fn displacement_is_symmetric() {
        let c = crankshaft();
        for k in 1..18 {
            let angle = k as f64 * 10f64.to_radians();
            assert!((c.displacement(angle) - c.displacement(-angle)).abs() < 1e-15);
        }
    }

    #[test]
    fn velocity_and_acceleration() {
        let c = crankshaft();
        let omega = 2.0 * PI * 1000.0 / 60.0;
        assert!((c.sec_to_rad() - omega).abs() < 1e-12);
        assert!(c.velocity(0.0).abs() < 1e-12);
        assert!((c.velocity(0.5 * PI) - 0.05 * omega).abs() < 1e-9);
        assert!((c.acceleration(0.0) - 0.05 * omega * omega * (1.0 + 0.05 / 0.16)).abs() < 1e-9);
    }

    #[test]
    fn stored_in_output_units() {
        let s = crankshaft().sample(PI);
        let row = s.get_storable_data();
        assert_eq!(row.len(), s.num_storable_variables());
        assert!((row[0] - 180.0).abs() < 1e-12);
        assert!((row[1] - s.displacement * 1e3).abs() < 1e-12);
    }
}
