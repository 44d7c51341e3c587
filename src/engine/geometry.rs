use super::kinematics::Crankshaft;
use std::f64::consts::PI;

/// Cylinder volumes derived from the bore, the crank mechanism and the compression ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    compression_ratio: f64, //[-]
    diameter: f64,          //[m]
    transverse_area: f64,   //[m²]
    displacement: f64,      //[m³]
    clearance: f64,         //[m³]
}

impl Geometry {
    /// Creates a `Geometry` object. Inputs must be in SI units.
    /// The swept volume is the bore area times the piston travel between dead centers.
    pub fn new(diam: f64, crankshaft: &Crankshaft, comp_ratio: f64) -> Geometry {
        let transverse_area = 0.25 * PI * diam * diam;
        let displacement = transverse_area * crankshaft.displacement(PI);
        let clearance = displacement / (comp_ratio - 1.0);
        Geometry {
            compression_ratio: comp_ratio,
            diameter: diam,
            transverse_area,
            displacement,
            clearance,
        }
    }

    /// Instant volume [m³] for a piston `position` [m] measured from top dead center
    pub fn volume(&self, position: f64) -> f64 {
        self.clearance + self.transverse_area * position
    }

    /// Volume stored for a crank sample; the top-dead-center sample is the clearance volume.
    pub fn sample_volume(&self, position: f64, at_tdc: bool) -> f64 {
        if at_tdc {
            self.clearance
        } else {
            self.volume(position)
        }
    }

    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    pub fn total_volume(&self) -> f64 {
        self.displacement + self.clearance
    }

    pub fn compression_ratio(&self) -> f64 {
        self.compression_ratio
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }
}
