//! Node generator strategies: one per node category.
//!
//! A strategy turns (theme, difficulty, id, depth, parent) into a fully
//! populated [`MissionNode`] with no outgoing choices. Strategies may draw
//! random numbers for reward variance and rare bonus rolls only; structural
//! decisions belong to the builder.
//!
//! Each strategy keeps a static per-theme table. A theme missing from a table
//! is a configuration error, reported as [`PathError::MissingTheme`].

use crate::error::{PathError, PathResult};
use crate::model::{MissionNode, NodeCategory};
use crate::outline::Theme;
use crate::random::RandomSource;

mod decision;
mod encounter;
mod extraction;
mod landing;
mod mining;
mod rest;
mod treasure;

pub use decision::DecisionGenerator;
pub use encounter::EncounterGenerator;
pub use extraction::ExtractionGenerator;
pub use landing::LandingGenerator;
pub use mining::MiningGenerator;
pub use rest::RestGenerator;
pub use treasure::TreasureGenerator;

/// Inputs shared by every strategy.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    pub theme: Theme,
    pub difficulty: u8,
    pub id: &'a str,
    pub depth: u32,
    pub parent_id: Option<&'a str>,
}

/// Produces nodes of a single category.
pub trait NodeGenerator {
    fn category(&self) -> NodeCategory;

    fn generate(&self, ctx: &NodeContext<'_>, rng: &mut dyn RandomSource)
        -> PathResult<MissionNode>;
}

/// Look up a theme entry, failing with the category and theme named.
pub(crate) fn theme_entry<T>(
    table: &'static [(Theme, T)],
    category: NodeCategory,
    theme: Theme,
) -> PathResult<&'static T> {
    table
        .iter()
        .find(|(t, _)| *t == theme)
        .map(|(_, entry)| entry)
        .ok_or(PathError::MissingTheme { category, theme })
}

/// Scale `base` by a uniform factor in `[1 - spread, 1 + spread)`.
pub(crate) fn vary(base: f64, spread: f64, rng: &mut dyn RandomSource) -> u32 {
    let factor = 1.0 - spread + rng.next() * spread * 2.0;
    (base * factor).round().max(0.0) as u32
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Fixed mapping from node category to its strategy.
pub struct GeneratorRegistry {
    slots: [Option<Box<dyn NodeGenerator>>; 7],
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl GeneratorRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    /// All seven built-in strategies.
    pub fn standard() -> Self {
        Self::empty()
            .with(LandingGenerator)
            .with(EncounterGenerator)
            .with(TreasureGenerator)
            .with(MiningGenerator)
            .with(RestGenerator)
            .with(DecisionGenerator)
            .with(ExtractionGenerator)
    }

    /// Register a strategy under its own category, replacing any previous one.
    pub fn register(&mut self, generator: Box<dyn NodeGenerator>) {
        let slot = slot_index(generator.category());
        self.slots[slot] = Some(generator);
    }

    pub fn with(mut self, generator: impl NodeGenerator + 'static) -> Self {
        self.register(Box::new(generator));
        self
    }

    pub fn get(&self, category: NodeCategory) -> PathResult<&dyn NodeGenerator> {
        self.slots[slot_index(category)]
            .as_deref()
            .ok_or(PathError::MissingGenerator(category))
    }

    /// Fails on the first category with no strategy.
    pub fn ensure_complete(&self) -> PathResult<()> {
        for category in NodeCategory::ALL {
            self.get(category)?;
        }
        Ok(())
    }

    pub fn generate(
        &self,
        category: NodeCategory,
        ctx: &NodeContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> PathResult<MissionNode> {
        self.get(category)?.generate(ctx, rng)
    }
}

fn slot_index(category: NodeCategory) -> usize {
    match category {
        NodeCategory::LandingSite => 0,
        NodeCategory::Encounter => 1,
        NodeCategory::Treasure => 2,
        NodeCategory::Mining => 3,
        NodeCategory::Rest => 4,
        NodeCategory::Decision => 5,
        NodeCategory::Extraction => 6,
    }
}
