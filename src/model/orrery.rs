use nalgebra::{Point3, Rotation3};

use super::belt::AsteroidBelt;
use super::body::BodyID;
use super::clock::Pacing;
use super::moon::Moon;
use crate::math::geometry::yaw;

/// Advances a phase angle by `delta` seconds at `rate` radians per second,
/// scaled by the global speed multiplier.
pub fn advance_angle(angle: f64, delta: f64, rate: f64, speed: f64) -> f64 {
    angle + delta * rate * speed
}

/// Position on a circular orbit in the y = 0 plane. Angle zero is +x, and the
/// angle increases towards +z.
pub fn position_on_orbit(radius: f64, angle: f64) -> Point3<f64> {
    Point3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    pub radius: f64,
    /// Accumulated phase, in radians. Never wrapped.
    pub angle: f64,
    pub rate: f64,
}

impl OrbitState {
    pub fn position(&self) -> Point3<f64> {
        position_on_orbit(self.radius, self.angle)
    }

    /// Bodies at the origin only spin in place.
    pub fn revolves(&self) -> bool {
        self.radius > 0.0
    }
}

#[derive(Debug, Clone)]
struct BodyState {
    id: BodyID,
    orbit: OrbitState,
    spin: f64,
}

/// All the mutable state of the scene: orbital phases, self-rotations, moon
/// pivots and the asteroid belt. Positions are derived, never stored.
#[derive(Debug, Clone)]
pub struct Orrery {
    // indexed by BodyID::index
    bodies: Vec<BodyState>,
    moons: Vec<Moon>,
    belt: AsteroidBelt,
    pacing: Pacing,
}

impl Orrery {
    pub fn new(belt: AsteroidBelt, pacing: Pacing) -> Self {
        let bodies = BodyID::ALL
            .iter()
            .map(|&id| {
                let info = id.info();
                BodyState {
                    id,
                    orbit: OrbitState {
                        radius: info.orbit_radius,
                        angle: 0.0,
                        rate: info.angular_rate,
                    },
                    spin: 0.0,
                }
            })
            .collect();

        Orrery {
            bodies,
            moons: Moon::all(),
            belt,
            pacing,
        }
    }

    /// Runs the kinematics for one tick: revolution scaled by `delta` and
    /// `speed`, and self-rotation of bodies, moon pivots and the belt paced
    /// per `self.pacing`.
    pub fn advance(&mut self, delta: f64, speed: f64) {
        let pacing = self.pacing;
        for body in self.bodies.iter_mut() {
            if body.orbit.revolves() {
                body.orbit.angle = advance_angle(body.orbit.angle, delta, body.orbit.rate, speed);
            }
            body.spin += pacing.increment(body.id.info().spin_rate, delta);
        }

        for moon in self.moons.iter_mut() {
            moon.spin_by(pacing.increment(moon.info.spin_rate, delta));
        }

        self.belt
            .spin_by(pacing.increment(super::belt::BELT_SPIN_RATE, delta));
    }

    pub fn bodies(&self) -> impl Iterator<Item = BodyID> + '_ {
        self.bodies.iter().map(|b| b.id)
    }

    pub fn orbit(&self, id: BodyID) -> &OrbitState {
        &self.bodies[id.index()].orbit
    }

    pub fn phase_angle(&self, id: BodyID) -> f64 {
        self.orbit(id).angle
    }

    pub fn position(&self, id: BodyID) -> Point3<f64> {
        self.orbit(id).position()
    }

    /// Accumulated self-rotation about the y-axis.
    pub fn spin(&self, id: BodyID) -> f64 {
        self.bodies[id.index()].spin
    }

    pub fn rotation(&self, id: BodyID) -> Rotation3<f64> {
        yaw(self.spin(id))
    }

    pub fn moons(&self) -> &[Moon] {
        &self.moons
    }

    /// World position of a moon, through its parent's translation and spin.
    pub fn moon_position(&self, moon: &Moon) -> Point3<f64> {
        let parent = moon.info.parent;
        self.position(parent) + self.rotation(parent) * moon.local_offset()
    }

    pub fn belt(&self) -> &AsteroidBelt {
        &self.belt
    }
}
