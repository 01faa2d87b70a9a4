//! Path factory: resolves an outline into a finished, validated graph.
//!
//! The factory picks a theme (forced or weighted by mission type), sizes the
//! depth from the challenge rating, drives a [`PathBuilder`] until complete,
//! and offers the reachability validator.

use std::collections::HashSet;

use crate::builder::PathBuilder;
use crate::config::PathConfig;
use crate::error::PathResult;
use crate::generators::GeneratorRegistry;
use crate::model::MissionPath;
use crate::outline::{theme_weights, MissionOutline, Theme};
use crate::random::{RandomSource, RngSource, SeededSource};

pub struct PathFactory<R: RandomSource> {
    registry: GeneratorRegistry,
    config: PathConfig,
    rng: R,
}

impl PathFactory<SeededSource> {
    /// Standard strategies and default config, seeded for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngSource::seeded(seed))
    }
}

impl<R: RandomSource> PathFactory<R> {
    pub fn new(rng: R) -> Self {
        Self {
            registry: GeneratorRegistry::standard(),
            config: PathConfig::default(),
            rng,
        }
    }

    pub fn with_config(mut self, config: PathConfig) -> PathResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Forced theme if set, otherwise a weighted draw for the mission type.
    pub fn determine_theme(&mut self, outline: &MissionOutline) -> Theme {
        if let Some(theme) = outline.theme {
            return theme;
        }
        weighted_theme(theme_weights(outline.mission_type), &mut self.rng)
    }

    /// `min(3 + round(rating / 2), 7)` with the default config.
    pub fn get_target_depth(&self, challenge_rating: u8) -> u32 {
        self.config.target_depth(challenge_rating)
    }

    pub fn create_path(&mut self, outline: &MissionOutline) -> PathResult<MissionPath> {
        let theme = self.determine_theme(outline);
        let max_depth = self.get_target_depth(outline.challenge_rating);

        let mut builder = PathBuilder::new(
            &self.registry,
            &self.config,
            &mut self.rng,
            theme,
            outline.challenge_rating,
            max_depth,
        )?;
        builder.add_landing_site()?;
        while !builder.is_complete() {
            builder.process_next_level()?;
        }
        let path = builder.build()?;

        log::info!(
            "Created {} path: {} nodes, depth {}, {} decisions (rating {})",
            theme,
            path.total_nodes,
            path.max_depth,
            path.branch_count,
            outline.challenge_rating
        );
        if !validate_mission_path(&path) {
            log::warn!("Generated path from {} is not fully reachable", path.start_node_id);
        }
        Ok(path)
    }

    pub fn validate_mission_path(&self, path: &MissionPath) -> bool {
        validate_mission_path(path)
    }
}

/// Cumulative-subtraction draw over `(theme, weight)` in table order.
///
/// Falls back to the first entry if rounding leaves the draw unspent.
/// An empty table yields [`Theme::Planet`].
pub fn weighted_theme(weights: &[(Theme, f64)], rng: &mut dyn RandomSource) -> Theme {
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let mut r = rng.next() * total;
    for (theme, weight) in weights {
        r -= weight;
        if r <= 0.0 {
            return *theme;
        }
    }
    weights.first().map(|(t, _)| *t).unwrap_or(Theme::Planet)
}

/// True iff every node is reachable from the start by following choices.
///
/// Choices into unknown ids are not followed.
pub fn validate_mission_path(path: &MissionPath) -> bool {
    if !path.nodes.contains_key(&path.start_node_id) {
        return false;
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![path.start_node_id.as_str()];
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        if let Some(node) = path.nodes.get(id) {
            for choice in &node.choices {
                if path.nodes.contains_key(&choice.target_node_id)
                    && !visited.contains(choice.target_node_id.as_str())
                {
                    stack.push(choice.target_node_id.as_str());
                }
            }
        }
    }

    visited.len() == path.nodes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::generators::{
        theme_entry, EncounterGenerator, LandingGenerator, NodeContext, NodeGenerator,
    };
    use crate::model::{MissionNode, NodeCategory};
    use crate::outline::MissionType;
    use crate::random::ScriptedSource;

    #[test]
    fn test_forced_theme_wins() {
        let mut factory = PathFactory::new(ScriptedSource::constant(0.99));
        let outline = MissionOutline::new(2, MissionType::Mining).with_theme(Theme::Station);
        assert_eq!(factory.determine_theme(&outline), Theme::Station);
        assert_eq!(factory.rng_mut().draws(), 0);
    }

    #[test]
    fn test_weighted_theme_cumulative() {
        let table = theme_weights(MissionType::Exploration);
        // planet .35, nebula .25, derelict .15, asteroid .15, station .10
        let cases = [
            (0.0, Theme::Planet),
            (0.34, Theme::Planet),
            (0.36, Theme::Nebula),
            (0.61, Theme::Derelict),
            (0.76, Theme::Asteroid),
            (0.95, Theme::Station),
        ];
        for (draw, expected) in cases {
            let mut rng = ScriptedSource::constant(draw);
            assert_eq!(weighted_theme(table, &mut rng), expected, "draw {}", draw);
        }
    }

    #[test]
    fn test_weighted_theme_fallback_on_drift() {
        // Zero-weight tables resolve to the first entry.
        let table = [(Theme::Nebula, 0.0), (Theme::Asteroid, 0.0)];
        let mut rng = ScriptedSource::constant(0.5);
        assert_eq!(weighted_theme(&table, &mut rng), Theme::Nebula);
        assert_eq!(weighted_theme(&[], &mut rng), Theme::Planet);
    }

    #[test]
    fn test_target_depth() {
        let factory = PathFactory::seeded(1);
        let depths: Vec<u32> = (1..=5).map(|r| factory.get_target_depth(r)).collect();
        assert_eq!(depths, [4, 4, 5, 5, 6]);
    }

    #[test]
    fn test_create_path_scenario() {
        let mut factory = PathFactory::seeded(42);
        let outline = MissionOutline::new(3, MissionType::Exploration).with_theme(Theme::Planet);
        let path = factory.create_path(&outline).unwrap();

        assert_eq!(path.start_node_id, "node_1");
        assert_eq!(path.extraction_node_id, "extraction");
        assert_eq!(path.theme, Theme::Planet);
        assert_eq!(path.max_depth, 5);
        assert_eq!(path.difficulty, 3);
        let start = path.start().unwrap();
        assert_eq!(start.category, NodeCategory::LandingSite);
        assert_eq!(start.depth, 0);
        assert!(path
            .nodes
            .values()
            .any(|n| NodeCategory::CONTENT.contains(&n.category)));
        assert!(path.total_nodes >= 6);
        assert_eq!(path.total_nodes, path.nodes.len());
        assert!(factory.validate_mission_path(&path));
    }

    #[test]
    fn test_missing_generator_aborts() {
        let mut factory = PathFactory::seeded(3).with_registry(
            GeneratorRegistry::empty()
                .with(LandingGenerator)
                .with(EncounterGenerator),
        );
        let outline = MissionOutline::new(1, MissionType::Combat);
        assert!(matches!(
            factory.create_path(&outline),
            Err(PathError::MissingGenerator(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PathConfig {
            decision_chance: -0.1,
            ..PathConfig::default()
        };
        assert!(PathFactory::seeded(1).with_config(config).is_err());
    }

    #[test]
    fn test_validator_missing_start() {
        let mut factory = PathFactory::seeded(9);
        let mut path = factory
            .create_path(&MissionOutline::new(2, MissionType::Rescue))
            .unwrap();
        path.start_node_id = "node_999".into();
        assert!(!validate_mission_path(&path));
    }

    #[test]
    fn test_validator_detects_orphan() {
        let mut factory = PathFactory::seeded(11);
        let mut path = factory
            .create_path(&MissionOutline::new(4, MissionType::Combat))
            .unwrap();
        assert!(validate_mission_path(&path));

        let mut orphan = path.nodes["node_2"].clone();
        orphan.id = "node_orphan".into();
        path.nodes.insert(orphan.id.clone(), orphan);
        assert!(!validate_mission_path(&path));
    }

    #[test]
    fn test_validator_orphan_not_masked_by_dangling_choice() {
        let mut factory = PathFactory::seeded(13);
        let outline = MissionOutline::new(3, MissionType::Exploration).with_theme(Theme::Planet);
        let mut path = factory.create_path(&outline).unwrap();

        let mut orphan = path.nodes["node_2"].clone();
        orphan.id = "node_orphan".into();
        orphan.choices.clear();
        path.nodes.insert(orphan.id.clone(), orphan);

        let mut ghost = path.nodes["node_1"].choices[0].clone();
        ghost.id = "node_1_to_node_ghost".into();
        ghost.target_node_id = "node_ghost".into();
        path.nodes.get_mut("node_1").unwrap().choices.push(ghost);

        assert!(!validate_mission_path(&path));
    }

    struct PlanetOnlyLanding;

    static PLANET_ONLY: &[(Theme, &str)] = &[(Theme::Planet, "Drop Zone")];

    impl NodeGenerator for PlanetOnlyLanding {
        fn category(&self) -> NodeCategory {
            NodeCategory::LandingSite
        }

        fn generate(
            &self,
            ctx: &NodeContext<'_>,
            _rng: &mut dyn RandomSource,
        ) -> PathResult<MissionNode> {
            let title = theme_entry(PLANET_ONLY, self.category(), ctx.theme)?;
            Ok(MissionNode::new(
                ctx.id,
                self.category(),
                title,
                "Boots on the ground.",
                ctx.depth,
                ctx.parent_id,
            ))
        }
    }

    #[test]
    fn test_missing_theme_aborts_create_path() {
        let registry = GeneratorRegistry::standard().with(PlanetOnlyLanding);
        let mut factory = PathFactory::seeded(4).with_registry(registry);

        let station = MissionOutline::new(2, MissionType::Rescue).with_theme(Theme::Station);
        assert_eq!(
            factory.create_path(&station),
            Err(PathError::MissingTheme {
                category: NodeCategory::LandingSite,
                theme: Theme::Station,
            })
        );

        let planet = MissionOutline::new(2, MissionType::Rescue).with_theme(Theme::Planet);
        let path = factory.create_path(&planet).unwrap();
        assert_eq!(path.start().unwrap().title, "Drop Zone");
    }

    #[test]
    fn test_validator_detects_cut_edge() {
        let mut factory = PathFactory::seeded(5);
        let mut path = factory
            .create_path(&MissionOutline::new(1, MissionType::Mining))
            .unwrap();
        if let Some(start) = path.nodes.get_mut("node_1") {
            start.choices.clear();
        }
        assert!(!validate_mission_path(&path));
    }
}
