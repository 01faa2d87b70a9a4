//! Rest is a safe spot to recover between threats.

use super::{theme_entry, vary, NodeContext, NodeGenerator};
use crate::error::PathResult;
use crate::model::{MissionNode, NodeCategory, NodeReward};
use crate::outline::Theme;
use crate::random::RandomSource;

struct RestEntry {
    title: &'static str,
    description: &'static str,
    shelter: &'static str,
}

static REST_TABLE: &[(Theme, RestEntry)] = &[
    (
        Theme::Planet,
        RestEntry {
            title: "Sheltered Cave",
            description: "A dry cave out of the wind. Good enough to patch wounds and eat.",
            shelter: "cave",
        },
    ),
    (
        Theme::Station,
        RestEntry {
            title: "Crew Lounge",
            description: "The lounge still has power, heat, and a working ration dispenser.",
            shelter: "lounge",
        },
    ),
    (
        Theme::Asteroid,
        RestEntry {
            title: "Pressurized Hab",
            description: "An old survey hab holds pressure. You can take your helmets off.",
            shelter: "hab_module",
        },
    ),
    (
        Theme::Derelict,
        RestEntry {
            title: "Sealed Medbay",
            description: "The medbay doors held. Inside, the auto-doc hums to life.",
            shelter: "medbay",
        },
    ),
    (
        Theme::Nebula,
        RestEntry {
            title: "Calm Eddy",
            description: "A quiet current in the cloud where the static fades and systems recharge.",
            shelter: "eddy",
        },
    ),
];

pub struct RestGenerator;

impl NodeGenerator for RestGenerator {
    fn category(&self) -> NodeCategory {
        NodeCategory::Rest
    }

    fn generate(
        &self,
        ctx: &NodeContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> PathResult<MissionNode> {
        let entry = theme_entry(REST_TABLE, self.category(), ctx.theme)?;
        let difficulty = ctx.difficulty as u32;
        let heal = 15 + 5 * difficulty;

        Ok(MissionNode::new(
            ctx.id,
            self.category(),
            entry.title,
            entry.description,
            ctx.depth,
            ctx.parent_id,
        )
        .with_content("shelter", entry.shelter)
        .with_content("heal_amount", heal)
        .with_reward(NodeReward::guaranteed("health", heal))
        .with_reward(NodeReward::new(
            "supplies",
            vary((2 + difficulty) as f64, 0.3, rng),
            0.8,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    #[test]
    fn test_heal_scales_with_difficulty() {
        let ctx = NodeContext {
            theme: Theme::Nebula,
            difficulty: 3,
            id: "node_9",
            depth: 4,
            parent_id: Some("node_6"),
        };
        let mut rng = ScriptedSource::constant(0.5);
        let node = RestGenerator.generate(&ctx, &mut rng).unwrap();
        assert_eq!(node.content["heal_amount"], 30);
        assert_eq!(node.rewards[0].quantity, 30);
        assert_eq!(node.rewards[1].quantity, 5);
    }
}
