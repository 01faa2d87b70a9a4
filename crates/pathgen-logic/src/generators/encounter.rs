//! Encounter: hostile contact. The highest-risk content node.

use super::{theme_entry, vary, NodeContext, NodeGenerator};
use crate::error::PathResult;
use crate::model::{MissionNode, NodeCategory, NodeRequirement, NodeReward};
use crate::outline::Theme;
use crate::random::RandomSource;

/// Odds of a salvaged weapon dropping.
const WEAPON_DROP_CHANCE: f64 = 0.1;

struct EncounterEntry {
    title: &'static str,
    description: &'static str,
    enemies: &'static [&'static str],
}

static ENCOUNTER_TABLE: &[(Theme, EncounterEntry)] = &[
    (
        Theme::Planet,
        EncounterEntry {
            title: "Native Predators",
            description: "Something large moves through the undergrowth, circling closer.",
            enemies: &["burrow_stalker", "razorwing_swarm", "canyon_howler"],
        },
    ),
    (
        Theme::Station,
        EncounterEntry {
            title: "Security Lockdown",
            description: "Turrets drop from the ceiling as the station's defense grid wakes up.",
            enemies: &["security_drone", "sentry_turret", "rogue_maintenance_bot"],
        },
    ),
    (
        Theme::Asteroid,
        EncounterEntry {
            title: "Claim Jumpers",
            description: "A rival mining crew has staked this rock and they are not sharing.",
            enemies: &["claim_jumper", "armed_prospector", "cutter_drone"],
        },
    ),
    (
        Theme::Derelict,
        EncounterEntry {
            title: "Things in the Dark",
            description: "Scratching echoes through the vents. The crew did not leave alone.",
            enemies: &["hull_crawler", "infected_crewman", "scavenger_mech"],
        },
    ),
    (
        Theme::Nebula,
        EncounterEntry {
            title: "Ambush in the Haze",
            description: "Raider silhouettes break from the cloud on an intercept course.",
            enemies: &["void_raider", "ion_wraith", "cloud_skimmer"],
        },
    ),
];

pub struct EncounterGenerator;

impl NodeGenerator for EncounterGenerator {
    fn category(&self) -> NodeCategory {
        NodeCategory::Encounter
    }

    fn generate(
        &self,
        ctx: &NodeContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> PathResult<MissionNode> {
        let entry = theme_entry(ENCOUNTER_TABLE, self.category(), ctx.theme)?;
        let difficulty = ctx.difficulty as u32;
        let enemy = *rng.pick(entry.enemies);

        let mut node = MissionNode::new(
            ctx.id,
            self.category(),
            entry.title,
            entry.description,
            ctx.depth,
            ctx.parent_id,
        )
        .with_content("enemy_type", enemy)
        .with_content("enemy_count", 1 + difficulty / 2)
        .with_requirement(NodeRequirement::new("combat_rating", difficulty))
        .with_reward(NodeReward::guaranteed("experience", 10 + 5 * difficulty))
        .with_reward(NodeReward::new(
            "credits",
            vary((8 + 4 * difficulty) as f64, 0.2, rng),
            0.75,
        ));

        if rng.chance(WEAPON_DROP_CHANCE) {
            node = node.with_reward(NodeReward::new("salvaged_weapon", 1, 0.5));
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    fn ctx(difficulty: u8) -> NodeContext<'static> {
        NodeContext {
            theme: Theme::Derelict,
            difficulty,
            id: "node_4",
            depth: 2,
            parent_id: Some("node_3"),
        }
    }

    #[test]
    fn test_experience_scales_linearly() {
        for difficulty in 1..=5u8 {
            let mut rng = ScriptedSource::constant(0.5);
            let node = EncounterGenerator.generate(&ctx(difficulty), &mut rng).unwrap();
            let xp = node.rewards.iter().find(|r| r.reward_type == "experience").unwrap();
            assert_eq!(xp.quantity, 10 + 5 * difficulty as u32);
        }
    }

    #[test]
    fn test_rare_weapon_roll() {
        // pick, credits variance, then the drop roll
        let mut lucky = ScriptedSource::new(vec![0.0, 0.5, 0.05]);
        let node = EncounterGenerator.generate(&ctx(3), &mut lucky).unwrap();
        assert!(node.rewards.iter().any(|r| r.reward_type == "salvaged_weapon"));

        let mut unlucky = ScriptedSource::new(vec![0.0, 0.5, 0.9]);
        let node = EncounterGenerator.generate(&ctx(3), &mut unlucky).unwrap();
        assert!(!node.rewards.iter().any(|r| r.reward_type == "salvaged_weapon"));
    }

    #[test]
    fn test_enemy_from_theme_table() {
        let mut rng = ScriptedSource::constant(0.0);
        let node = EncounterGenerator.generate(&ctx(1), &mut rng).unwrap();
        assert_eq!(node.content["enemy_type"], "hull_crawler");
        assert_eq!(node.content["enemy_count"], 1);
    }
}
