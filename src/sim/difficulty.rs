//! Timed difficulty progression
//!
//! Phases advance strictly forward, at most one per update. The final phase
//! never advances. No randomness lives here, so a replayed sequence of `dt`
//! values always produces the same phase history.

use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleTag;
use super::pattern::PatternName;
use crate::error::ConfigError;

/// One row of the phase table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPhase {
    pub name: String,
    /// Seconds spent in this phase (ignored for the final phase)
    pub duration: f32,
    pub speed_multiplier: f32,
    pub spawn_interval_ms: f32,
    pub obstacle_types: Vec<ObstacleTag>,
    pub patterns: Vec<PatternName>,
}

/// Check a phase table before it is used
pub fn validate_phases(phases: &[DifficultyPhase]) -> Result<(), ConfigError> {
    let Some(last) = phases.len().checked_sub(1) else {
        return Err(ConfigError::EmptyPhaseTable);
    };

    for (i, phase) in phases.iter().enumerate() {
        if i < last && !(phase.duration > 0.0) {
            return Err(ConfigError::InvalidDuration {
                name: phase.name.clone(),
                duration: phase.duration,
            });
        }
        if !(phase.spawn_interval_ms > 0.0) {
            return Err(ConfigError::InvalidSpawnInterval {
                name: phase.name.clone(),
                interval_ms: phase.spawn_interval_ms,
            });
        }
        if phase.patterns.is_empty() {
            return Err(ConfigError::NoPatterns {
                name: phase.name.clone(),
            });
        }
        if let Some(pattern) = phase.patterns.iter().find(|p| !p.is_implemented()) {
            return Err(ConfigError::UnimplementedPattern {
                phase: phase.name.clone(),
                pattern: *pattern,
            });
        }
    }
    Ok(())
}

/// Phase sequencer producing speed, cadence and content for the current phase
#[derive(Debug, Clone)]
pub struct DifficultyEngine {
    phases: Vec<DifficultyPhase>,
    base_speed: f32,
    index: usize,
    elapsed: f32,
}

impl DifficultyEngine {
    pub fn new(phases: Vec<DifficultyPhase>, base_speed: f32) -> Result<Self, ConfigError> {
        validate_phases(&phases)?;
        Ok(Self {
            phases,
            base_speed,
            index: 0,
            elapsed: 0.0,
        })
    }

    /// Advance by `dt` seconds. Returns true if the phase changed.
    pub fn update(&mut self, dt: f32) -> bool {
        debug_assert!(dt >= 0.0, "negative dt {dt}");
        self.elapsed += dt;

        if self.is_final_phase() || self.elapsed <= self.current_phase().duration {
            return false;
        }
        self.elapsed = 0.0;
        self.index += 1;
        log::info!("Difficulty phase -> {}", self.phase_name());
        true
    }

    pub fn current_phase(&self) -> &DifficultyPhase {
        &self.phases[self.index]
    }

    pub fn phases(&self) -> &[DifficultyPhase] {
        &self.phases
    }

    pub fn phase_index(&self) -> usize {
        self.index
    }

    pub fn is_final_phase(&self) -> bool {
        self.index + 1 >= self.phases.len()
    }

    /// Scroll speed for obstacles spawned now (px/frame)
    pub fn current_speed(&self) -> f32 {
        self.base_speed * self.current_phase().speed_multiplier
    }

    pub fn spawn_interval_ms(&self) -> f32 {
        self.current_phase().spawn_interval_ms
    }

    pub fn allowed_types(&self) -> &[ObstacleTag] {
        &self.current_phase().obstacle_types
    }

    pub fn allowed_patterns(&self) -> &[PatternName] {
        &self.current_phase().patterns
    }

    pub fn phase_name(&self) -> &str {
        &self.current_phase().name
    }

    /// Seconds spent in the current phase
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_phases;
    use proptest::prelude::*;

    fn engine() -> DifficultyEngine {
        DifficultyEngine::new(default_phases(), 5.0).expect("default phases are valid")
    }

    #[test]
    fn test_tutorial_to_warmup() {
        let mut d = engine();
        assert_eq!(d.phase_name(), "Tutorial");
        assert_eq!(d.current_speed(), 5.0);
        assert_eq!(d.spawn_interval_ms(), 2000.0);
        assert_eq!(d.allowed_patterns(), &[PatternName::Single]);

        assert!(d.update(20.1));
        assert_eq!(d.phase_name(), "Warmup");
        assert_eq!(d.elapsed(), 0.0);
        assert!((d.current_speed() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_exact_duration_does_not_advance() {
        let mut d = engine();
        assert!(!d.update(20.0));
        assert_eq!(d.phase_index(), 0);
    }

    #[test]
    fn test_one_phase_per_update() {
        let mut d = engine();
        assert!(d.update(1000.0));
        assert_eq!(d.phase_index(), 1);
    }

    #[test]
    fn test_final_phase_is_fixed_point() {
        let mut d = engine();
        for _ in 0..10 {
            d.update(25.0);
        }
        assert_eq!(d.phase_name(), "Endgame");
        assert!(!d.update(5000.0));
        assert_eq!(d.phase_index(), 5);
        assert_eq!(d.elapsed(), 5000.0 + 25.0 * 5.0);
    }

    #[test]
    fn test_reset() {
        let mut d = engine();
        d.update(30.0);
        d.update(3.0);
        d.reset();
        assert_eq!(d.phase_index(), 0);
        assert_eq!(d.elapsed(), 0.0);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(
            DifficultyEngine::new(Vec::new(), 5.0).err(),
            Some(ConfigError::EmptyPhaseTable)
        );
    }

    #[test]
    fn test_unimplemented_pattern_rejected() {
        let mut phases = default_phases();
        phases[2].patterns.push(PatternName::Zigzag);
        assert_eq!(
            validate_phases(&phases),
            Err(ConfigError::UnimplementedPattern {
                phase: "Challenge".to_string(),
                pattern: PatternName::Zigzag,
            })
        );
    }

    #[test]
    fn test_final_phase_duration_not_checked() {
        let mut phases = default_phases();
        phases.last_mut().expect("non-empty").duration = 0.0;
        assert_eq!(validate_phases(&phases), Ok(()));
        phases[0].duration = 0.0;
        assert!(matches!(
            validate_phases(&phases),
            Err(ConfigError::InvalidDuration { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_replay_is_deterministic(dts in prop::collection::vec(0.0f32..5.0, 0..200)) {
            let mut a = engine();
            let mut b = engine();
            for dt in &dts {
                a.update(*dt);
                b.update(*dt);
                prop_assert_eq!(a.phase_index(), b.phase_index());
                prop_assert_eq!(a.elapsed(), b.elapsed());
                prop_assert_eq!(a.current_speed(), b.current_speed());
                prop_assert_eq!(a.spawn_interval_ms(), b.spawn_interval_ms());
            }
        }

        #[test]
        fn prop_never_skips_phases(dts in prop::collection::vec(0.0f32..100.0, 0..100)) {
            let mut d = engine();
            let last = d.phases().len() - 1;
            for dt in dts {
                let before = d.phase_index();
                let changed = d.update(dt);
                let after = d.phase_index();
                prop_assert!(after == before || after == before + 1);
                prop_assert_eq!(changed, after != before);
                prop_assert!(after <= last);
                prop_assert!(d.elapsed() >= 0.0);
            }
        }
    }
}
