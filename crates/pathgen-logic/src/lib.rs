//! Pure mission path generation for PathGen.
//!
//! This crate builds branching mission graphs: a landing site, a tree of
//! encounter/treasure/mining/rest content with up to three decision forks,
//! and a single extraction node every branch leads to. It performs no I/O
//! and holds no shared state, so every call to
//! [`PathFactory::create_path`](factory::PathFactory::create_path) is
//! independent and reproducible given its random source.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`builder`] | Level-by-level tree growth, leaf wiring, choice synthesis |
//! | [`config`] | Decision odds, branch range, depth sizing |
//! | [`error`] | Fatal configuration errors |
//! | [`factory`] | Theme resolution, depth sizing, reachability validator |
//! | [`generators`] | Per-category node strategies with per-theme tables |
//! | [`inspect`] | Detailed structural diagnostics for a finished path |
//! | [`model`] | Nodes, choices, rewards, and the finished path |
//! | [`outline`] | Mission outline input, themes, theme weight tables |
//! | [`random`] | Random source trait, seeded and scripted providers |
//!
//! # Example
//!
//! ```rust
//! use pathgen_logic::factory::{validate_mission_path, PathFactory};
//! use pathgen_logic::outline::{MissionOutline, MissionType, Theme};
//!
//! let mut factory = PathFactory::seeded(42);
//! let outline = MissionOutline::new(3, MissionType::Exploration).with_theme(Theme::Planet);
//! let path = factory.create_path(&outline).unwrap();
//!
//! assert_eq!(path.start_node_id, "node_1");
//! assert!(validate_mission_path(&path));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod factory;
pub mod generators;
pub mod inspect;
pub mod model;
pub mod outline;
pub mod random;

pub use error::{PathError, PathResult};
pub use factory::{validate_mission_path, PathFactory};
pub use model::{MissionChoice, MissionNode, MissionPath, NodeCategory, RiskLevel};
pub use outline::{MissionOutline, MissionType, Theme};
