//! Tunable constants for wild encounters.
//!
//! Every number the battle and capture rules depend on lives here so an
//! encounter can be rebalanced from a RON file without touching the engine.
//! Fields missing from a file keep their default.

use crate::battle::ai::OpponentPolicy;
use crate::errors::ConfigError;
use schema::StatusType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterRules {
    /// Chance that a paralyzed Pokemon loses its action for the turn.
    pub paralysis_skip_chance: f64,
    /// Fraction of max HP lost to poison each turn.
    pub poison_damage_fraction: f64,
    /// Fraction of max HP lost to a burn each turn.
    pub burn_damage_fraction: f64,
    pub critical_hit_chance: f64,
    pub critical_hit_multiplier: f64,
    pub stab_multiplier: f64,
    pub damage_variance_min: f64,
    pub damage_variance_max: f64,
    /// Chance that a freshly spawned wild Pokemon carries `wild_status`.
    pub wild_status_chance: f64,
    pub wild_status: StatusType,
    /// Inclusive bounds for the duration of the spawn status.
    pub wild_status_turns: (u8, u8),
    /// Inclusive bounds for wild levels.
    pub wild_level_range: (u8, u8),
    /// Wild experience is base happiness times this.
    pub experience_per_happiness: u32,
    pub opponent_policy: OpponentPolicy,
}

impl Default for EncounterRules {
    fn default() -> Self {
        Self {
            paralysis_skip_chance: 0.25,
            poison_damage_fraction: 0.125,
            burn_damage_fraction: 0.0625,
            critical_hit_chance: 1.0 / 16.0,
            critical_hit_multiplier: 1.5,
            stab_multiplier: 1.5,
            damage_variance_min: 0.85,
            damage_variance_max: 1.0,
            wild_status_chance: 0.2,
            wild_status: StatusType::Paralyzed,
            wild_status_turns: (1, 3),
            wild_level_range: (1, 10),
            experience_per_happiness: 10,
            opponent_policy: OpponentPolicy::FirstDamagingMove,
        }
    }
}

impl EncounterRules {
    /// Parse rules from a RON document and validate them.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let rules: EncounterRules =
            ron::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading encounter rules");
        let source = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {}", path.display(), err)))?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("paralysis_skip_chance", self.paralysis_skip_chance),
            ("poison_damage_fraction", self.poison_damage_fraction),
            ("burn_damage_fraction", self.burn_damage_fraction),
            ("critical_hit_chance", self.critical_hit_chance),
            ("wild_status_chance", self.wild_status_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.critical_hit_multiplier < 1.0 || self.stab_multiplier < 1.0 {
            return Err(ConfigError::Invalid(
                "critical hit and STAB multipliers must be at least 1".to_string(),
            ));
        }

        if self.damage_variance_min <= 0.0 || self.damage_variance_min > self.damage_variance_max {
            return Err(ConfigError::Invalid(format!(
                "damage variance window [{}, {}] must be positive and ordered",
                self.damage_variance_min, self.damage_variance_max
            )));
        }

        let (min_turns, max_turns) = self.wild_status_turns;
        if min_turns == 0 || min_turns > max_turns {
            return Err(ConfigError::Invalid(format!(
                "wild_status_turns ({}, {}) must be a non-empty range starting at 1 or more",
                min_turns, max_turns
            )));
        }

        let (min_level, max_level) = self.wild_level_range;
        if min_level == 0 || min_level > max_level {
            return Err(ConfigError::Invalid(format!(
                "wild_level_range ({}, {}) must be a non-empty range starting at 1 or more",
                min_level, max_level
            )));
        }

        if self.experience_per_happiness == 0 {
            return Err(ConfigError::Invalid(
                "experience_per_happiness must be positive".to_string(),
            ));
        }
        if (u16::MAX as u32)
            .checked_mul(self.experience_per_happiness)
            .is_none()
        {
            return Err(ConfigError::Invalid(format!(
                "experience_per_happiness {} overflows wild experience",
                self.experience_per_happiness
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(EncounterRules::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let rules = EncounterRules::from_ron_str("(wild_status_chance: 0.5, opponent_policy: Scoring)")
            .expect("partial rules should parse");

        assert_eq!(rules.wild_status_chance, 0.5);
        assert_eq!(rules.opponent_policy, OpponentPolicy::Scoring);
        assert_eq!(rules.paralysis_skip_chance, 0.25);
        assert_eq!(rules.wild_level_range, (1, 10));
    }

    #[test]
    fn test_out_of_range_probability_is_rejected() {
        let result = EncounterRules::from_ron_str("(paralysis_skip_chance: 1.5)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_variance_window_is_rejected() {
        let rules = EncounterRules {
            damage_variance_min: 1.0,
            damage_variance_max: 0.85,
            ..EncounterRules::default()
        };
        assert!(matches!(rules.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_huge_experience_factor_is_rejected() {
        let result = EncounterRules::from_ron_str("(experience_per_happiness: 100000000)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let largest = EncounterRules {
            experience_per_happiness: u32::MAX / u16::MAX as u32,
            ..EncounterRules::default()
        };
        assert_eq!(largest.validate(), Ok(()));
    }

    #[test]
    fn test_bundled_rules_match_defaults() {
        let rules = EncounterRules::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/rules.ron"))
            .expect("bundled rules should load");
        assert_eq!(rules, EncounterRules::default());
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let result = EncounterRules::from_ron_str("not ron at all {");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
