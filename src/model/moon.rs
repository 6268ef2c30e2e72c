use nalgebra::{Rotation3, Vector3};

use super::body::BodyID;
use crate::math::geometry::yaw;

// All the immutable info about a moon
#[derive(Debug, Clone)]
pub struct MoonInfo {
    pub name: &'static str,
    pub parent: BodyID,
    /// Display radius of the sphere.
    pub radius: f32,
    /// Distance from the parent's center.
    pub distance: f64,
    /// Tilt of the pivot about its z-axis, applied once.
    pub inclination: f64,
    /// Radians of pivot rotation per frame.
    pub spin_rate: f64,
}

/// A moon hangs off an invisible pivot attached to its parent, so it inherits
/// the parent's translation and self-rotation. Only the pivot angle changes
/// over time.
#[derive(Debug, Clone)]
pub struct Moon {
    pub info: &'static MoonInfo,
    pivot_angle: f64,
}

impl Moon {
    pub fn new(info: &'static MoonInfo) -> Self {
        Moon {
            info,
            pivot_angle: 0.0,
        }
    }

    pub fn all() -> Vec<Moon> {
        MOON_TABLE.iter().map(Moon::new).collect()
    }

    pub fn pivot_angle(&self) -> f64 {
        self.pivot_angle
    }

    pub(crate) fn spin_by(&mut self, increment: f64) {
        self.pivot_angle += increment;
    }

    /// Orientation of the pivot relative to the parent: tilt first, then spin.
    pub fn pivot_rotation(&self) -> Rotation3<f64> {
        let tilt = Rotation3::from_axis_angle(&Vector3::z_axis(), self.info.inclination);
        yaw(self.pivot_angle) * tilt
    }

    /// Position relative to the parent's center, in the parent's local frame.
    pub fn local_offset(&self) -> Vector3<f64> {
        self.pivot_rotation() * Vector3::new(self.info.distance, 0.0, 0.0)
    }
}

macro_rules! moon {
    ($name:expr, $parent:ident, $radius:expr, $distance:expr, $incl_deg:expr, $spin:expr) => {
        MoonInfo {
            name: $name,
            parent: BodyID::$parent,
            radius: $radius,
            distance: $distance,
            inclination: $incl_deg * std::f64::consts::PI / 180.0,
            spin_rate: $spin,
        }
    };
}

static MOON_TABLE: [MoonInfo; 6] = [
    moon!("Moon", Earth, 1.0, 8.0, 5.0, 0.01),
    moon!("Phobos", Mars, 0.5, 6.0, 1.0, 0.02),
    moon!("Ganymede", Jupiter, 1.5, 15.0, 15.0, 0.005),
    moon!("Titan", Saturn, 1.3, 13.0, 27.0, 0.007),
    moon!("Titania", Uranus, 1.0, 11.0, 10.0, 0.01),
    moon!("Triton", Neptune, 1.0, 10.0, 25.0, 0.008),
];
