//! Property-based tests for mission path generation.
//!
//! Tests invariants:
//! - Every generated path is fully reachable from its start
//! - Leaves lead only to extraction, extraction leads nowhere
//! - Decision count and depth stay within bounds
//! - Deterministic given the same seed

use proptest::prelude::*;

use pathgen_logic::factory::{validate_mission_path, PathFactory};
use pathgen_logic::inspect::inspect_path;
use pathgen_logic::model::NodeCategory;
use pathgen_logic::outline::{MissionOutline, MissionType, Theme};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_theme() -> impl Strategy<Value = Theme> {
    prop_oneof![
        Just(Theme::Planet),
        Just(Theme::Station),
        Just(Theme::Asteroid),
        Just(Theme::Derelict),
        Just(Theme::Nebula),
    ]
}

fn arb_mission_type() -> impl Strategy<Value = MissionType> {
    prop_oneof![
        Just(MissionType::Exploration),
        Just(MissionType::Mining),
        Just(MissionType::Rescue),
        Just(MissionType::Combat),
    ]
}

fn arb_outline() -> impl Strategy<Value = MissionOutline> {
    (1u8..=5, arb_mission_type(), prop::option::of(arb_theme())).prop_map(
        |(rating, mission_type, theme)| {
            let outline = MissionOutline::new(rating, mission_type);
            match theme {
                Some(theme) => outline.with_theme(theme),
                None => outline,
            }
        },
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn generated_paths_validate(seed in any::<u64>(), outline in arb_outline()) {
        let path = PathFactory::seeded(seed).create_path(&outline).unwrap();
        prop_assert!(validate_mission_path(&path));
        let report = inspect_path(&path);
        prop_assert!(report.is_clean(), "{:?}", report.issues);
    }

    #[test]
    fn bounds_hold(seed in any::<u64>(), outline in arb_outline()) {
        let path = PathFactory::seeded(seed).create_path(&outline).unwrap();
        prop_assert!(path.branch_count <= 3);
        prop_assert!((4..=7).contains(&path.max_depth));
        prop_assert!(path.total_nodes >= 3);
        prop_assert_eq!(path.total_nodes, path.nodes.len());
        prop_assert_eq!(path.difficulty, outline.challenge_rating);
        if let Some(theme) = outline.theme {
            prop_assert_eq!(path.theme, theme);
        }
        for node in path.nodes.values() {
            prop_assert!(node.depth <= path.max_depth);
        }
    }

    #[test]
    fn leaves_wire_to_extraction(seed in any::<u64>(), outline in arb_outline()) {
        let path = PathFactory::seeded(seed).create_path(&outline).unwrap();
        let exit = path.extraction().unwrap();
        prop_assert!(exit.choices.is_empty());
        for leaf in path.leaves() {
            prop_assert_eq!(leaf.choices.len(), 1);
            prop_assert_eq!(&leaf.choices[0].target_node_id, &path.extraction_node_id);
        }
        let landings = path
            .nodes
            .values()
            .filter(|n| n.category == NodeCategory::LandingSite)
            .count();
        prop_assert_eq!(landings, 1);
    }

    #[test]
    fn same_seed_is_deterministic(seed in any::<u64>(), outline in arb_outline()) {
        let a = PathFactory::seeded(seed).create_path(&outline).unwrap();
        let b = PathFactory::seeded(seed).create_path(&outline).unwrap();
        prop_assert_eq!(a, b);
    }
}
