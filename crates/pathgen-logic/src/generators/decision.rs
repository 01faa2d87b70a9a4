//! Decision point is a fork the builder fans out into 2-3 content branches.

use super::{theme_entry, NodeContext, NodeGenerator};
use crate::error::PathResult;
use crate::model::{MissionNode, NodeCategory};
use crate::outline::Theme;
use crate::random::RandomSource;

struct DecisionEntry {
    title: &'static str,
    description: &'static str,
    prompt: &'static str,
}

static DECISION_TABLE: &[(Theme, DecisionEntry)] = &[
    (
        Theme::Planet,
        DecisionEntry {
            title: "Crossroads",
            description: "Several trails split off across the valley floor.",
            prompt: "Which way does the team head?",
        },
    ),
    (
        Theme::Station,
        DecisionEntry {
            title: "Junction Hub",
            description: "Corridors branch in every direction from a dim central hub.",
            prompt: "Which section do you sweep next?",
        },
    ),
    (
        Theme::Asteroid,
        DecisionEntry {
            title: "Fractured Ridge",
            description: "The ridge splits into narrow crevasses leading deeper into the rock.",
            prompt: "Which crevasse do you follow?",
        },
    ),
    (
        Theme::Derelict,
        DecisionEntry {
            title: "Bulkhead Split",
            description: "Sealed bulkheads open onto several dark passageways.",
            prompt: "Which passage do you force open?",
        },
    ),
    (
        Theme::Nebula,
        DecisionEntry {
            title: "Signal Fork",
            description: "Your scanner picks up multiple faint returns through the haze.",
            prompt: "Which signal do you chase?",
        },
    ),
];

/// Decision nodes carry no rewards; their choices are wired by the builder.
pub struct DecisionGenerator;

impl NodeGenerator for DecisionGenerator {
    fn category(&self) -> NodeCategory {
        NodeCategory::Decision
    }

    fn generate(
        &self,
        ctx: &NodeContext<'_>,
        _rng: &mut dyn RandomSource,
    ) -> PathResult<MissionNode> {
        let entry = theme_entry(DECISION_TABLE, self.category(), ctx.theme)?;
        Ok(MissionNode::new(
            ctx.id,
            self.category(),
            entry.title,
            entry.description,
            ctx.depth,
            ctx.parent_id,
        )
        .with_content("prompt", entry.prompt))
    }
}
