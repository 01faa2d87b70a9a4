//! Treasure: caches, lockers, and lost cargo.

use super::{theme_entry, vary, NodeContext, NodeGenerator};
use crate::error::PathResult;
use crate::model::{MissionNode, NodeCategory, NodeReward};
use crate::outline::Theme;
use crate::random::RandomSource;

struct TreasureEntry {
    title: &'static str,
    description: &'static str,
    container: &'static str,
    loot: &'static [&'static str],
}

static TREASURE_TABLE: &[(Theme, TreasureEntry)] = &[
    (
        Theme::Planet,
        TreasureEntry {
            title: "Ancient Ruins",
            description: "Weathered stone pillars hide an alcove sealed for centuries.",
            container: "stone_vault",
            loot: &["relic_shard", "alien_glyph_tablet", "crystal_idol"],
        },
    ),
    (
        Theme::Station,
        TreasureEntry {
            title: "Quartermaster's Locker",
            description: "A reinforced supply locker, its keypad still blinking.",
            container: "supply_locker",
            loot: &["medkit_cache", "encrypted_datapad", "prototype_module"],
        },
    ),
    (
        Theme::Asteroid,
        TreasureEntry {
            title: "Abandoned Prospector Camp",
            description: "Someone left in a hurry. Their gear is still strapped to the rock.",
            container: "gear_crate",
            loot: &["survey_drone", "ore_sample_case", "jump_coordinates"],
        },
    ),
    (
        Theme::Derelict,
        TreasureEntry {
            title: "Captain's Safe",
            description: "Behind a cracked portrait, a safe with its lock half melted.",
            container: "wall_safe",
            loot: &["ship_logs", "bearer_bonds", "command_codes"],
        },
    ),
    (
        Theme::Nebula,
        TreasureEntry {
            title: "Drifting Cargo Pod",
            description: "A jettisoned cargo pod tumbles through the cloud, transponder dead.",
            container: "cargo_pod",
            loot: &["exotic_gas_canister", "smuggled_goods", "sensor_array"],
        },
    ),
];

pub struct TreasureGenerator;

impl TreasureGenerator {
    fn rarity(difficulty: u32) -> &'static str {
        match difficulty {
            0..=1 => "common",
            2..=3 => "uncommon",
            4 => "rare",
            _ => "epic",
        }
    }
}

impl NodeGenerator for TreasureGenerator {
    fn category(&self) -> NodeCategory {
        NodeCategory::Treasure
    }

    fn generate(
        &self,
        ctx: &NodeContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> PathResult<MissionNode> {
        let entry = theme_entry(TREASURE_TABLE, self.category(), ctx.theme)?;
        let difficulty = ctx.difficulty as u32;
        let item = *rng.pick(entry.loot);
        let credits = vary((20 + 10 * difficulty) as f64, 0.25, rng);

        let mut node = MissionNode::new(
            ctx.id,
            self.category(),
            entry.title,
            entry.description,
            ctx.depth,
            ctx.parent_id,
        )
        .with_content("container", entry.container)
        .with_content("item", item)
        .with_content("rarity", Self::rarity(difficulty))
        .with_reward(NodeReward::guaranteed("credits", credits))
        .with_reward(NodeReward::new(item, 1, 0.6));

        // Artifact odds grow with difficulty.
        let artifact_chance = 0.05 + 0.02 * difficulty as f64;
        if rng.chance(artifact_chance) {
            node = node.with_reward(NodeReward::new("artifact", 1, 0.25));
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    #[test]
    fn test_rarity_tiers() {
        assert_eq!(TreasureGenerator::rarity(1), "common");
        assert_eq!(TreasureGenerator::rarity(3), "uncommon");
        assert_eq!(TreasureGenerator::rarity(4), "rare");
        assert_eq!(TreasureGenerator::rarity(5), "epic");
    }

    #[test]
    fn test_credits_within_variance() {
        let ctx = NodeContext {
            theme: Theme::Station,
            difficulty: 2,
            id: "node_5",
            depth: 3,
            parent_id: Some("node_2"),
        };
        for v in [0.0, 0.3, 0.6, 0.99] {
            let mut rng = ScriptedSource::constant(v);
            let node = TreasureGenerator.generate(&ctx, &mut rng).unwrap();
            let credits = node.rewards[0].quantity;
            assert!((30..=50).contains(&credits), "credits {}", credits);
        }
    }
}
