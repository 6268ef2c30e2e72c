use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Every body the scene knows about. The order of `ALL` is the scene order:
/// the Sun first, then the planets from the inside out.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum BodyID {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

// All the immutable info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: &'static str,
    /// File name of the surface texture, under `<assets>/planets/`.
    pub texture: &'static str,
    /// Display radius of the sphere, in scene units.
    pub radius: f32,
    /// Linear RGB in [0, 1].
    pub color: [f32; 3],
    /// Distance from the origin; zero means the body never revolves.
    pub orbit_radius: f64,
    /// Radians of phase per second at speed 1.0. Negative is retrograde.
    pub angular_rate: f64,
    /// Radians of self-rotation per frame. Negative is retrograde.
    pub spin_rate: f64,
    /// Whether the camera may follow this body.
    pub selectable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no body is named {0:?}")]
pub struct UnknownBody(pub String);

impl BodyID {
    pub const ALL: [BodyID; 9] = [
        BodyID::Sun,
        BodyID::Mercury,
        BodyID::Venus,
        BodyID::Earth,
        BodyID::Mars,
        BodyID::Jupiter,
        BodyID::Saturn,
        BodyID::Uranus,
        BodyID::Neptune,
    ];

    /// Lower-case key shared by the fact table and scene nodes.
    pub fn key(self) -> &'static str {
        match self {
            BodyID::Sun => "sun",
            BodyID::Mercury => "mercury",
            BodyID::Venus => "venus",
            BodyID::Earth => "earth",
            BodyID::Mars => "mars",
            BodyID::Jupiter => "jupiter",
            BodyID::Saturn => "saturn",
            BodyID::Uranus => "uranus",
            BodyID::Neptune => "neptune",
        }
    }

    pub fn info(self) -> &'static BodyInfo {
        &BODY_TABLE[self.index()]
    }

    pub fn is_selectable(self) -> bool {
        self.info().selectable
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Iterates over the bodies the camera may follow, in scene order.
    pub fn selectable() -> impl Iterator<Item = BodyID> {
        BodyID::ALL.iter().copied().filter(|b| b.is_selectable())
    }
}

impl fmt::Display for BodyID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

impl FromStr for BodyID {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        BodyID::ALL
            .iter()
            .copied()
            .find(|b| b.key() == key)
            .ok_or_else(|| UnknownBody(s.to_owned()))
    }
}

macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        [$r as f32 / 255.0, $g as f32 / 255.0, $b as f32 / 255.0]
    };
}

// Rates are tuning constants: they keep the relative ordering of the real
// periods, but nothing here is to scale.
static BODY_TABLE: [BodyInfo; 9] = [
    BodyInfo {
        name: "Sun",
        texture: "sun.jpg",
        radius: 20.0,
        color: rgb!(0xff, 0xd2, 0x4a),
        orbit_radius: 0.0,
        angular_rate: 0.0,
        spin_rate: 0.001,
        selectable: false,
    },
    BodyInfo {
        name: "Mercury",
        texture: "mercury.jpg",
        radius: 2.0,
        color: rgb!(0x9a, 0x8c, 0x80),
        orbit_radius: 30.0,
        angular_rate: 4.15,
        spin_rate: 0.01,
        selectable: true,
    },
    BodyInfo {
        name: "Venus",
        texture: "venus_surface.jpg",
        radius: 3.0,
        color: rgb!(0xe6, 0xc0, 0x66),
        orbit_radius: 45.0,
        angular_rate: 1.62,
        spin_rate: -0.002,
        selectable: true,
    },
    BodyInfo {
        name: "Earth",
        texture: "earth_daymap.jpg",
        radius: 4.0,
        color: rgb!(0x33, 0x66, 0xcc),
        orbit_radius: 60.0,
        angular_rate: 1.0,
        spin_rate: 0.05,
        selectable: true,
    },
    BodyInfo {
        name: "Mars",
        texture: "mars.jpg",
        radius: 3.5,
        color: rgb!(0xcc, 0x4c, 0x26),
        orbit_radius: 75.0,
        angular_rate: 0.53,
        spin_rate: 0.05,
        selectable: true,
    },
    BodyInfo {
        name: "Jupiter",
        texture: "jupiter.jpg",
        radius: 10.0,
        color: rgb!(0xcc, 0xb3, 0x80),
        orbit_radius: 140.0,
        angular_rate: 0.084,
        spin_rate: 0.3,
        selectable: true,
    },
    BodyInfo {
        name: "Saturn",
        texture: "saturn.jpg",
        radius: 8.0,
        color: rgb!(0xd9, 0xbf, 0x80),
        orbit_radius: 180.0,
        angular_rate: 0.034,
        spin_rate: 0.15,
        selectable: true,
    },
    BodyInfo {
        name: "Uranus",
        texture: "uranus.jpg",
        radius: 6.0,
        color: rgb!(0x80, 0xbf, 0xd9),
        orbit_radius: 210.0,
        angular_rate: 0.0119,
        spin_rate: -0.2,
        selectable: true,
    },
    BodyInfo {
        name: "Neptune",
        texture: "neptune.jpg",
        radius: 5.0,
        color: rgb!(0x40, 0x59, 0xcc),
        orbit_radius: 240.0,
        angular_rate: 0.0061,
        spin_rate: 0.15,
        selectable: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_ids() {
        for (i, id) in BodyID::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(id.info().name.to_lowercase(), id.key());
        }
    }

    #[test]
    fn test_only_sun_is_unselectable() {
        for id in BodyID::ALL.iter() {
            assert_eq!(id.is_selectable(), *id != BodyID::Sun, "{:?}", id);
            // A selectable body must be away from the origin, or following it
            // would need to normalize a zero vector.
            if id.is_selectable() {
                assert!(id.info().orbit_radius > 0.0);
            }
        }
        assert_eq!(BodyID::selectable().count(), 8);
    }

    #[test]
    fn test_inner_planets_are_faster() {
        let rates: Vec<_> = BodyID::selectable()
            .map(|b| b.info().angular_rate)
            .collect();
        for pair in rates.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_texture_names() {
        assert_eq!(BodyID::Earth.info().texture, "earth_daymap.jpg");
        assert_eq!(BodyID::Venus.info().texture, "venus_surface.jpg");
        for id in BodyID::ALL.iter() {
            assert!(id.info().texture.starts_with(id.key()), "{:?}", id);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("earth".parse::<BodyID>(), Ok(BodyID::Earth));
        assert_eq!(" Jupiter ".parse::<BodyID>(), Ok(BodyID::Jupiter));
        assert_eq!("SUN".parse::<BodyID>(), Ok(BodyID::Sun));
        assert_eq!(
            "pluto".parse::<BodyID>(),
            Err(UnknownBody("pluto".to_owned()))
        );
    }
}
