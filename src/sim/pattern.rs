//! Pattern catalog and generator
//!
//! A pattern expands into obstacle requests at fixed x offsets and declares
//! a footprint that pushes back the next spawn check.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleFactory, ObstacleTag};
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Horizontal distance between consecutive members of a multi-obstacle pattern
pub const PATTERN_SPACING: f32 = 150.0;

/// Every pattern the catalog declares. Only some have a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternName {
    Single,
    Double,
    Triple,
    StairsUp,
    StairsDown,
    Wave,
    Tunnel,
    Zigzag,
    Rhythm,
    Boss,
}

impl PatternName {
    pub const ALL: [PatternName; 10] = [
        PatternName::Single,
        PatternName::Double,
        PatternName::Triple,
        PatternName::StairsUp,
        PatternName::StairsDown,
        PatternName::Wave,
        PatternName::Tunnel,
        PatternName::Zigzag,
        PatternName::Rhythm,
        PatternName::Boss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternName::Single => "SINGLE",
            PatternName::Double => "DOUBLE",
            PatternName::Triple => "TRIPLE",
            PatternName::StairsUp => "STAIRS_UP",
            PatternName::StairsDown => "STAIRS_DOWN",
            PatternName::Wave => "WAVE",
            PatternName::Tunnel => "TUNNEL",
            PatternName::Zigzag => "ZIGZAG",
            PatternName::Rhythm => "RHYTHM",
            PatternName::Boss => "BOSS",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PatternName::Single => "one obstacle",
            PatternName::Double => "two obstacles in a row, tight gap",
            PatternName::Triple => "three obstacles in a row",
            PatternName::StairsUp => "three obstacles, each taller than the last",
            PatternName::StairsDown => "three obstacles, each lower than the last",
            PatternName::Wave => "high, low, high",
            PatternName::Tunnel => "top and bottom together, pass through the middle",
            PatternName::Zigzag => "alternating crossing pattern",
            PatternName::Rhythm => "four obstacles on a steady beat",
            PatternName::Boss => "complex combined pattern",
        }
    }

    /// Obstacle requests as (x offset, tag), or None if there is no layout yet
    pub fn layout(&self) -> Option<&'static [(f32, ObstacleTag)]> {
        const S: f32 = PATTERN_SPACING;
        const S2: f32 = 2.0 * PATTERN_SPACING;
        match self {
            PatternName::Single => Some(&[(0.0, ObstacleTag::Basic)]),
            PatternName::Double => Some(&[(0.0, ObstacleTag::Basic), (S, ObstacleTag::Basic)]),
            PatternName::Triple => Some(&[
                (0.0, ObstacleTag::Basic),
                (S, ObstacleTag::Basic),
                (S2, ObstacleTag::Basic),
            ]),
            PatternName::StairsUp => Some(&[
                (0.0, ObstacleTag::Low),
                (S, ObstacleTag::Basic),
                (S2, ObstacleTag::Tall),
            ]),
            _ => None,
        }
    }

    pub fn is_implemented(&self) -> bool {
        self.layout().is_some()
    }

    /// Declared horizontal span, used to delay the next spawn
    pub fn footprint(&self) -> f32 {
        match self {
            PatternName::Triple | PatternName::StairsUp => 400.0,
            PatternName::Double => 200.0,
            _ => 100.0,
        }
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternName::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownPattern(s.to_string()))
    }
}

/// Obstacles produced by one pattern plus the span they claim
#[derive(Debug, Clone)]
pub struct SpawnedPattern {
    pub name: PatternName,
    pub obstacles: Vec<Obstacle>,
    pub footprint: f32,
}

/// Expands pattern names into concrete obstacles
#[derive(Debug, Clone, Copy)]
pub struct PatternGenerator<'a> {
    factory: ObstacleFactory<'a>,
}

impl<'a> PatternGenerator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            factory: ObstacleFactory::new(config),
        }
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        name: PatternName,
        spawn_x: f32,
        speed: f32,
        rng: &mut R,
    ) -> Result<SpawnedPattern, ConfigError> {
        let layout = name.layout().ok_or(ConfigError::NoLayout(name))?;

        let obstacles = layout
            .iter()
            .flat_map(|&(offset, tag)| self.factory.create(tag, spawn_x + offset, speed, rng))
            .collect();

        Ok(SpawnedPattern {
            name,
            obstacles,
            footprint: name.footprint(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_single_layout() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let p = PatternGenerator::new(&config)
            .generate(PatternName::Single, 800.0, 5.0, &mut rng)
            .expect("SINGLE has a layout");

        assert_eq!(p.obstacles.len(), 1);
        assert_eq!(p.obstacles[0].pos.x, 800.0);
        assert_eq!(p.footprint, 100.0);
    }

    #[test]
    fn test_stairs_up_rises() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let p = PatternGenerator::new(&config)
            .generate(PatternName::StairsUp, 800.0, 7.5, &mut rng)
            .expect("STAIRS_UP has a layout");

        let xs: Vec<f32> = p.obstacles.iter().map(|o| o.pos.x).collect();
        assert_eq!(xs, [800.0, 950.0, 1100.0]);
        assert_eq!(p.obstacles[0].kind.tag(), ObstacleTag::Low);
        assert_eq!(p.obstacles[2].kind.tag(), ObstacleTag::Tall);
        assert!(p.obstacles.iter().all(|o| o.speed == 7.5));
        assert_eq!(p.footprint, 400.0);
    }

    #[test]
    fn test_footprints() {
        assert_eq!(PatternName::Double.footprint(), 200.0);
        assert_eq!(PatternName::Triple.footprint(), 400.0);
    }

    #[test]
    fn test_unimplemented_pattern_is_error() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let generator = PatternGenerator::new(&config);
        for name in PatternName::ALL.into_iter().filter(|p| !p.is_implemented()) {
            assert!(generator.generate(name, 800.0, 5.0, &mut rng).is_err(), "{name}");
        }
    }

    #[test]
    fn test_catalog_implementation_set() {
        let implemented: Vec<_> = PatternName::ALL
            .into_iter()
            .filter(|p| p.is_implemented())
            .collect();
        assert_eq!(
            implemented,
            [
                PatternName::Single,
                PatternName::Double,
                PatternName::Triple,
                PatternName::StairsUp
            ]
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("STAIRS_UP".parse::<PatternName>(), Ok(PatternName::StairsUp));
        assert_eq!(
            "SPIRAL".parse::<PatternName>(),
            Err(ConfigError::UnknownPattern("SPIRAL".to_string()))
        );
    }
}
