//! Landing site is the single start node of every path.

use super::{theme_entry, NodeContext, NodeGenerator};
use crate::error::PathResult;
use crate::model::{MissionNode, NodeCategory};
use crate::outline::Theme;
use crate::random::RandomSource;

struct LandingEntry {
    title: &'static str,
    description: &'static str,
    terrain: &'static str,
}

static LANDING_TABLE: &[(Theme, LandingEntry)] = &[
    (
        Theme::Planet,
        LandingEntry {
            title: "Planetfall",
            description: "Your lander settles onto a windswept plateau. The horizon shimmers with unfamiliar light.",
            terrain: "plateau",
        },
    ),
    (
        Theme::Station,
        LandingEntry {
            title: "Docking Bay",
            description: "Magnetic clamps lock onto the hull. The airlock cycles and the station's stale air rushes in.",
            terrain: "docking_bay",
        },
    ),
    (
        Theme::Asteroid,
        LandingEntry {
            title: "Surface Anchor",
            description: "Harpoon anchors bite into the regolith. The rock tumbles slowly beneath a field of stars.",
            terrain: "regolith",
        },
    ),
    (
        Theme::Derelict,
        LandingEntry {
            title: "Breach Point",
            description: "You cut through the outer hull of the dead ship. Emergency lights flicker somewhere deep inside.",
            terrain: "hull_breach",
        },
    ),
    (
        Theme::Nebula,
        LandingEntry {
            title: "Drift Insertion",
            description: "Sensors fade to static as the shuttle slips into the glowing cloud. Visibility drops to meters.",
            terrain: "gas_cloud",
        },
    ),
];

/// Start node. Never a leaf and carries no rewards.
pub struct LandingGenerator;

impl NodeGenerator for LandingGenerator {
    fn category(&self) -> NodeCategory {
        NodeCategory::LandingSite
    }

    fn generate(
        &self,
        ctx: &NodeContext<'_>,
        _rng: &mut dyn RandomSource,
    ) -> PathResult<MissionNode> {
        let entry = theme_entry(LANDING_TABLE, self.category(), ctx.theme)?;
        Ok(MissionNode::new(
            ctx.id,
            self.category(),
            entry.title,
            entry.description,
            ctx.depth,
            ctx.parent_id,
        )
        .with_content("terrain", entry.terrain))
    }
}
