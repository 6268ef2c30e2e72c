use std::f64::consts::TAU;

use nalgebra::Point3;

pub const BELT_INNER_RADIUS: f64 = 90.0;
pub const BELT_OUTER_RADIUS: f64 = 125.0;
pub const BELT_HALF_THICKNESS: f64 = 1.0;
/// Radians of belt rotation per frame.
pub const BELT_SPIN_RATE: f64 = 0.002;

const ROCK_MIN_RADIUS: f32 = 0.3;
const ROCK_RADIUS_SPREAD: f32 = 0.7;

/// One asteroid, fixed in the belt's own frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Rock {
    pub position: Point3<f64>,
    pub radius: f32,
}

/// Decorative ring of rocks between Mars and Jupiter. The rocks never move
/// relative to each other; the whole belt turns as one.
#[derive(Debug, Clone)]
pub struct AsteroidBelt {
    rocks: Vec<Rock>,
    spin: f64,
}

/// Cheap integer hash, so the layout is reproducible from a seed.
fn hash(seed: u32) -> u32 {
    let mut n = seed;
    n = n.wrapping_mul(2654435761);
    n ^= n >> 16;
    n = n.wrapping_mul(2246822519);
    n ^= n >> 13;
    n
}

fn unit_fraction(h: u32) -> f64 {
    h as f64 / u32::MAX as f64
}

impl AsteroidBelt {
    pub fn generate(count: usize, seed: u32) -> Self {
        let rocks = (0..count as u32)
            .map(|i| {
                let base = seed.wrapping_add(i.wrapping_mul(5));
                let u1 = unit_fraction(hash(base.wrapping_mul(7).wrapping_add(31)));
                let u2 = unit_fraction(hash(base.wrapping_mul(13).wrapping_add(97)));
                let u3 = unit_fraction(hash(base.wrapping_mul(19).wrapping_add(151)));
                let u4 = unit_fraction(hash(base.wrapping_mul(23).wrapping_add(211)));

                let r = BELT_INNER_RADIUS + u1 * (BELT_OUTER_RADIUS - BELT_INNER_RADIUS);
                let angle = u2 * TAU;
                let y = (u3 - 0.5) * 2.0 * BELT_HALF_THICKNESS;
                Rock {
                    position: Point3::new(r * angle.cos(), y, r * angle.sin()),
                    radius: ROCK_MIN_RADIUS + u4 as f32 * ROCK_RADIUS_SPREAD,
                }
            })
            .collect();

        AsteroidBelt { rocks, spin: 0.0 }
    }

    pub fn rocks(&self) -> &[Rock] {
        &self.rocks
    }

    /// Current rotation of the whole belt about the y-axis.
    pub fn spin(&self) -> f64 {
        self.spin
    }

    pub(crate) fn spin_by(&mut self, increment: f64) {
        self.spin += increment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rocks_stay_in_belt() {
        let belt = AsteroidBelt::generate(300, 0);
        assert_eq!(belt.rocks().len(), 300);
        for rock in belt.rocks() {
            let p = rock.position;
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r >= BELT_INNER_RADIUS - 1e-9 && r <= BELT_OUTER_RADIUS + 1e-9);
            assert!(p.y.abs() <= BELT_HALF_THICKNESS);
            assert!(rock.radius >= ROCK_MIN_RADIUS);
            assert!(rock.radius <= ROCK_MIN_RADIUS + ROCK_RADIUS_SPREAD);
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        assert_eq!(
            AsteroidBelt::generate(50, 7).rocks(),
            AsteroidBelt::generate(50, 7).rocks()
        );
        assert_ne!(
            AsteroidBelt::generate(50, 7).rocks(),
            AsteroidBelt::generate(50, 8).rocks()
        );
    }

    #[test]
    fn test_empty_belt() {
        assert!(AsteroidBelt::generate(0, 0).rocks().is_empty());
    }
}
