//! Extraction is the single terminal node.

use super::{theme_entry, NodeContext, NodeGenerator};
use crate::error::PathResult;
use crate::model::{MissionNode, NodeCategory, NodeReward};
use crate::outline::Theme;
use crate::random::RandomSource;

struct ExtractionEntry {
    title: &'static str,
    description: &'static str,
    vehicle: &'static str,
}

static EXTRACTION_TABLE: &[(Theme, ExtractionEntry)] = &[
    (
        Theme::Planet,
        ExtractionEntry {
            title: "Dustoff",
            description: "The dropship roars down through the clouds to pull the team out.",
            vehicle: "dropship",
        },
    ),
    (
        Theme::Station,
        ExtractionEntry {
            title: "Emergency Undock",
            description: "You race back to the airlock and blow the docking clamps.",
            vehicle: "shuttle",
        },
    ),
    (
        Theme::Asteroid,
        ExtractionEntry {
            title: "Burn for Orbit",
            description: "Thrusters fire and the rock falls away below you.",
            vehicle: "mining_skiff",
        },
    ),
    (
        Theme::Derelict,
        ExtractionEntry {
            title: "Cut Loose",
            description: "You seal the breach behind you and push away from the wreck.",
            vehicle: "boarding_craft",
        },
    ),
    (
        Theme::Nebula,
        ExtractionEntry {
            title: "Beacon Pickup",
            description: "A recovery beacon guides the mothership through the haze to your position.",
            vehicle: "mothership",
        },
    ),
];

/// Terminal node. Difficulty scales the completion rewards only.
pub struct ExtractionGenerator;

impl NodeGenerator for ExtractionGenerator {
    fn category(&self) -> NodeCategory {
        NodeCategory::Extraction
    }

    fn generate(
        &self,
        ctx: &NodeContext<'_>,
        _rng: &mut dyn RandomSource,
    ) -> PathResult<MissionNode> {
        let entry = theme_entry(EXTRACTION_TABLE, self.category(), ctx.theme)?;
        let difficulty = ctx.difficulty as u32;
        Ok(MissionNode::new(
            ctx.id,
            self.category(),
            entry.title,
            entry.description,
            ctx.depth,
            ctx.parent_id,
        )
        .with_content("vehicle", entry.vehicle)
        .with_reward(NodeReward::guaranteed("credits", 50 + 25 * difficulty))
        .with_reward(NodeReward::guaranteed("experience", 20 + 10 * difficulty)))
    }
}
