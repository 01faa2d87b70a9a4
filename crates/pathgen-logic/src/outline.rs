//! Mission outline is the input that drives path generation.
//!
//! An outline carries the challenge rating, the mission type, and optionally
//! a forced theme. When no theme is given the factory draws one from the
//! per-mission-type weight tables defined here.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// THEMES
// ============================================================================

/// Setting of a mission. Every node strategy carries one table entry per theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Theme {
    /// Planetary surface.
    Planet,
    /// Orbital station, crewed or abandoned.
    Station,
    /// Asteroid field or a single large rock.
    Asteroid,
    /// Wrecked vessel adrift.
    Derelict,
    /// Gas cloud with poor sensor visibility.
    Nebula,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Planet,
        Theme::Station,
        Theme::Asteroid,
        Theme::Derelict,
        Theme::Nebula,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planet => "PLANET",
            Self::Station => "STATION",
            Self::Asteroid => "ASTEROID",
            Self::Derelict => "DERELICT",
            Self::Nebula => "NEBULA",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MISSION TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionType {
    Exploration,
    Mining,
    Rescue,
    Combat,
}

impl MissionType {
    pub const ALL: [MissionType; 4] = [
        MissionType::Exploration,
        MissionType::Mining,
        MissionType::Rescue,
        MissionType::Combat,
    ];
}

/// Theme weights per mission type, in sampling order. Each table sums to 1.
pub fn theme_weights(mission_type: MissionType) -> &'static [(Theme, f64)] {
    match mission_type {
        MissionType::Exploration => &[
            (Theme::Planet, 0.35),
            (Theme::Nebula, 0.25),
            (Theme::Derelict, 0.15),
            (Theme::Asteroid, 0.15),
            (Theme::Station, 0.10),
        ],
        MissionType::Mining => &[
            (Theme::Asteroid, 0.5),
            (Theme::Planet, 0.3),
            (Theme::Nebula, 0.1),
            (Theme::Derelict, 0.1),
        ],
        MissionType::Rescue => &[
            (Theme::Station, 0.35),
            (Theme::Derelict, 0.35),
            (Theme::Planet, 0.2),
            (Theme::Nebula, 0.1),
        ],
        MissionType::Combat => &[
            (Theme::Derelict, 0.3),
            (Theme::Station, 0.3),
            (Theme::Asteroid, 0.2),
            (Theme::Nebula, 0.2),
        ],
    }
}

// ============================================================================
// OUTLINE
// ============================================================================

/// Coarse complexity label shown to players.
///
/// Stored on the outline but not read by the builder: depth comes from the
/// challenge rating alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathComplexity {
    Simple,
    Moderate,
    Complex,
}

impl PathComplexity {
    pub fn for_rating(challenge_rating: u8) -> Self {
        match challenge_rating {
            0..=2 => Self::Simple,
            3 => Self::Moderate,
            _ => Self::Complex,
        }
    }
}

/// Everything the factory needs to generate a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionOutline {
    /// Difficulty, 1-5.
    pub challenge_rating: u8,
    pub mission_type: MissionType,
    /// Forced theme. `None` means the factory draws one.
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub path_complexity: Option<PathComplexity>,
}

impl MissionOutline {
    pub fn new(challenge_rating: u8, mission_type: MissionType) -> Self {
        Self {
            challenge_rating,
            mission_type,
            theme: None,
            path_complexity: Some(PathComplexity::for_rating(challenge_rating)),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_weights_sum_to_one() {
        for mission_type in MissionType::ALL {
            let total: f64 = theme_weights(mission_type).iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-9, "{:?} sums to {}", mission_type, total);
        }
    }

    #[test]
    fn test_theme_weights_non_negative() {
        for mission_type in MissionType::ALL {
            assert!(theme_weights(mission_type).iter().all(|(_, w)| *w >= 0.0));
        }
    }

    #[test]
    fn test_complexity_for_rating() {
        assert_eq!(PathComplexity::for_rating(1), PathComplexity::Simple);
        assert_eq!(PathComplexity::for_rating(2), PathComplexity::Simple);
        assert_eq!(PathComplexity::for_rating(3), PathComplexity::Moderate);
        assert_eq!(PathComplexity::for_rating(5), PathComplexity::Complex);
    }

    #[test]
    fn test_outline_builder() {
        let outline = MissionOutline::new(3, MissionType::Exploration).with_theme(Theme::Planet);
        assert_eq!(outline.theme, Some(Theme::Planet));
        assert_eq!(outline.path_complexity, Some(PathComplexity::Moderate));
    }

    #[test]
    fn test_theme_serializes_screaming_case() {
        let json = serde_json::to_string(&Theme::Derelict).unwrap();
        assert_eq!(json, "\"DERELICT\"");
        let outline: MissionOutline =
            serde_json::from_str(r#"{"challengeRating":2,"missionType":"RESCUE"}"#).unwrap();
        assert_eq!(outline.mission_type, MissionType::Rescue);
        assert!(outline.theme.is_none());
    }
}
