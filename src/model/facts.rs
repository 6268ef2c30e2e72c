use super::body::BodyID;

/// The static record shown in the info popup when a body is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactSheet {
    pub name: &'static str,
    pub diameter: &'static str,
    pub distance: &'static str,
    pub rotation_period: &'static str,
    pub revolution_period: &'static str,
}

impl FactSheet {
    /// Placeholder for names that don't match any body.
    pub const UNKNOWN: FactSheet = FactSheet {
        name: "Unknown",
        diameter: "-",
        distance: "-",
        rotation_period: "-",
        revolution_period: "-",
    };

    pub fn of(id: BodyID) -> &'static FactSheet {
        &FACT_TABLE[id.index()]
    }

    /// Looks up a record from an external name, case-insensitively. Anything
    /// unrecognized gets the placeholder rather than an error.
    pub fn lookup(key: &str) -> FactSheet {
        match key.parse::<BodyID>() {
            Ok(id) => *FactSheet::of(id),
            Err(_) => FactSheet::UNKNOWN,
        }
    }

    pub fn lines(&self) -> [String; 5] {
        [
            self.name.to_owned(),
            format!("Diameter: {}", self.diameter),
            format!("Distance from Sun: {}", self.distance),
            format!("Rotation Time: {}", self.rotation_period),
            format!("Revolution Time: {}", self.revolution_period),
        ]
    }
}

static FACT_TABLE: [FactSheet; 9] = [
    FactSheet {
        name: "Sun",
        diameter: "1.39 million km",
        distance: "0",
        rotation_period: "25 days (at equator)",
        revolution_period: "-",
    },
    FactSheet {
        name: "Mercury",
        diameter: "4,879 km",
        distance: "57.9 million km",
        rotation_period: "58.6 Earth days",
        revolution_period: "88 Earth days",
    },
    FactSheet {
        name: "Venus",
        diameter: "12,104 km",
        distance: "108.2 million km",
        rotation_period: "243 Earth days (retrograde)",
        revolution_period: "225 Earth days",
    },
    FactSheet {
        name: "Earth",
        diameter: "12,742 km",
        distance: "149.6 million km",
        rotation_period: "24 hours",
        revolution_period: "365.25 days",
    },
    FactSheet {
        name: "Mars",
        diameter: "6,779 km",
        distance: "227.9 million km",
        rotation_period: "24.6 hours",
        revolution_period: "687 Earth days",
    },
    FactSheet {
        name: "Jupiter",
        diameter: "139,820 km",
        distance: "778.5 million km",
        rotation_period: "9.9 hours",
        revolution_period: "11.86 Earth years",
    },
    FactSheet {
        name: "Saturn",
        diameter: "116,460 km",
        distance: "1.43 billion km",
        rotation_period: "10.7 hours",
        revolution_period: "29.45 Earth years",
    },
    FactSheet {
        name: "Uranus",
        diameter: "50,724 km",
        distance: "2.87 billion km",
        rotation_period: "17.2 hours (retrograde)",
        revolution_period: "84 Earth years",
    },
    FactSheet {
        name: "Neptune",
        diameter: "49,244 km",
        distance: "4.5 billion km",
        rotation_period: "16.1 hours",
        revolution_period: "165 Earth years",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_body_has_a_record() {
        for id in BodyID::ALL.iter() {
            assert_eq!(FactSheet::of(*id).name, id.info().name);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(FactSheet::lookup("Earth").diameter, "12,742 km");
        assert_eq!(FactSheet::lookup("NEPTUNE").name, "Neptune");
        assert_eq!(FactSheet::lookup("phobos"), FactSheet::UNKNOWN);
        assert_eq!(FactSheet::lookup(""), FactSheet::UNKNOWN);
    }

    #[test]
    fn test_lines() {
        let lines = FactSheet::of(BodyID::Mars).lines();
        assert_eq!(lines[0], "Mars");
        assert_eq!(lines[4], "Revolution Time: 687 Earth days");
    }
}
