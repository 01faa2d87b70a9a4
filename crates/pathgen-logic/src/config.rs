//! Generation tunables: decision fan-out odds and depth sizing.
//!
//! Defaults reproduce the standard generator. A config can be loaded from a
//! JSON document; missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{PathError, PathResult};

/// Parameters for the path builder and factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Probability that a frontier node fans out into a decision node.
    pub decision_chance: f64,
    /// Maximum decision nodes per path.
    pub max_decision_nodes: u32,
    /// Fewest content branches below a decision node.
    pub min_decision_branches: u32,
    /// Most content branches below a decision node.
    pub max_decision_branches: u32,
    /// Depth before the challenge rating is added.
    pub base_depth: u32,
    /// Hard ceiling on path depth.
    pub depth_cap: u32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            decision_chance: 0.4,
            max_decision_nodes: 3,
            min_decision_branches: 2,
            max_decision_branches: 3,
            base_depth: 3,
            depth_cap: 7,
        }
    }
}

impl PathConfig {
    pub fn from_json(json: &str) -> PathResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PathError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PathResult<()> {
        if !(0.0..=1.0).contains(&self.decision_chance) {
            return Err(PathError::InvalidConfig(format!(
                "decision_chance {} outside [0, 1]",
                self.decision_chance
            )));
        }
        if self.min_decision_branches == 0 {
            return Err(PathError::InvalidConfig(
                "min_decision_branches must be at least 1".into(),
            ));
        }
        if self.min_decision_branches > self.max_decision_branches {
            return Err(PathError::InvalidConfig(format!(
                "decision branch range {}..={} is inverted",
                self.min_decision_branches, self.max_decision_branches
            )));
        }
        if self.depth_cap < 2 {
            return Err(PathError::InvalidConfig(format!(
                "depth_cap {} leaves no room between landing and extraction",
                self.depth_cap
            )));
        }
        Ok(())
    }

    /// Path depth for a challenge rating: `min(base + round(rating / 2), cap)`.
    pub fn target_depth(&self, challenge_rating: u8) -> u32 {
        let bonus = (challenge_rating as f64 / 2.0).round() as u32;
        (self.base_depth + bonus).min(self.depth_cap)
    }
}
