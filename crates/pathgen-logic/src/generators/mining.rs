//! Mining: resource deposits. Yield scales with difficulty and theme richness.

use super::{theme_entry, NodeContext, NodeGenerator};
use crate::error::PathResult;
use crate::model::{MissionNode, NodeCategory, NodeRequirement, NodeReward};
use crate::outline::Theme;
use crate::random::RandomSource;

const CRYSTAL_CHANCE: f64 = 0.08;

struct MiningEntry {
    title: &'static str,
    description: &'static str,
    resource: &'static str,
    yield_multiplier: f64,
}

static MINING_TABLE: &[(Theme, MiningEntry)] = &[
    (
        Theme::Planet,
        MiningEntry {
            title: "Mineral Outcrop",
            description: "A vein of metallic ore breaks the surface of the cliff face.",
            resource: "iron_ore",
            yield_multiplier: 1.0,
        },
    ),
    (
        Theme::Station,
        MiningEntry {
            title: "Salvage Yard",
            description: "Stripped hull plating and wiring are piled high in a disused hangar.",
            resource: "scrap_alloy",
            yield_multiplier: 0.8,
        },
    ),
    (
        Theme::Asteroid,
        MiningEntry {
            title: "Rich Deposit",
            description: "Spectrometers light up. The core of this rock is dense with platinum.",
            resource: "platinum",
            yield_multiplier: 1.5,
        },
    ),
    (
        Theme::Derelict,
        MiningEntry {
            title: "Reactor Core",
            description: "The dead reactor still holds recoverable fuel rods.",
            resource: "fuel_rods",
            yield_multiplier: 0.9,
        },
    ),
    (
        Theme::Nebula,
        MiningEntry {
            title: "Gas Pocket",
            description: "A dense pocket of exotic gas drifts within scoop range.",
            resource: "exotic_gas",
            yield_multiplier: 1.2,
        },
    ),
];

pub struct MiningGenerator;

impl MiningGenerator {
    /// `(15 + 8 * difficulty) * multiplier`, rounded.
    pub fn base_yield(difficulty: u8, yield_multiplier: f64) -> u32 {
        ((15.0 + 8.0 * difficulty as f64) * yield_multiplier).round() as u32
    }
}

impl NodeGenerator for MiningGenerator {
    fn category(&self) -> NodeCategory {
        NodeCategory::Mining
    }

    fn generate(
        &self,
        ctx: &NodeContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> PathResult<MissionNode> {
        let entry = theme_entry(MINING_TABLE, self.category(), ctx.theme)?;
        let amount = Self::base_yield(ctx.difficulty, entry.yield_multiplier);

        let mut node = MissionNode::new(
            ctx.id,
            self.category(),
            entry.title,
            entry.description,
            ctx.depth,
            ctx.parent_id,
        )
        .with_content("resource", entry.resource)
        .with_content("yield_multiplier", entry.yield_multiplier)
        .with_requirement(NodeRequirement::new("mining_laser", 1 + ctx.difficulty as u32 / 2))
        .with_reward(NodeReward::guaranteed(entry.resource, amount));

        if rng.chance(CRYSTAL_CHANCE) {
            node = node.with_reward(NodeReward::new("rare_crystal", 1, 0.3));
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    #[test]
    fn test_base_yield() {
        assert_eq!(MiningGenerator::base_yield(1, 1.0), 23);
        assert_eq!(MiningGenerator::base_yield(5, 1.5), 83);
        assert_eq!(MiningGenerator::base_yield(3, 0.8), 31);
    }

    #[test]
    fn test_asteroid_yield_applies_multiplier() {
        let ctx = NodeContext {
            theme: Theme::Asteroid,
            difficulty: 2,
            id: "node_3",
            depth: 1,
            parent_id: Some("node_1"),
        };
        let mut rng = ScriptedSource::constant(0.9);
        let node = MiningGenerator.generate(&ctx, &mut rng).unwrap();
        assert_eq!(node.rewards.len(), 1);
        assert_eq!(node.rewards[0].reward_type, "platinum");
        assert_eq!(node.rewards[0].quantity, 47);
        assert_eq!(node.requirements[0].value, 2);
    }
}
