//! PathGen Headless Generation Harness
//!
//! Sweeps mission path generation across every rating, mission type, and
//! theme over many seeds, validating each result. Runs entirely in-process:
//! no UI, no persistence.
//!
//! Usage:
//!   cargo run -p pathgen-simtest
//!   cargo run -p pathgen-simtest -- --verbose --seeds 200
//!   cargo run -p pathgen-simtest -- --config tuning.json
//!   cargo run -p pathgen-simtest -- --dump 3
//!
//! Set `RUST_LOG=debug` to see per-level builder output.

use std::collections::BTreeMap;

use pathgen_logic::config::PathConfig;
use pathgen_logic::factory::{self, validate_mission_path, PathFactory};
use pathgen_logic::inspect::inspect_path;
use pathgen_logic::model::{MissionPath, NodeCategory};
use pathgen_logic::PathResult;
use pathgen_logic::outline::{theme_weights, MissionOutline, MissionType, Theme};
use pathgen_logic::random::{RngSource, ScriptedSource, SeededSource};
use serde::Serialize;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    seeds: u64,
    config: PathConfig,
    dump: Option<u8>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        verbose: false,
        seeds: 50,
        config: PathConfig::default(),
        dump: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--seeds" => {
                let value = args.next().ok_or("--seeds needs a value")?;
                options.seeds = value
                    .parse()
                    .map_err(|e| format!("bad --seeds {}: {}", value, e))?;
            }
            "--config" => {
                let file = args.next().ok_or("--config needs a file")?;
                let json = std::fs::read_to_string(&file)
                    .map_err(|e| format!("can't read {}: {}", file, e))?;
                options.config = PathConfig::from_json(&json).map_err(|e| e.to_string())?;
            }
            "--dump" => {
                let value = args.next().ok_or("--dump needs a rating")?;
                options.dump = Some(
                    value
                        .parse()
                        .map_err(|e| format!("bad --dump {}: {}", value, e))?,
                );
            }
            other => return Err(format!("unknown argument {}", other)),
        }
    }
    Ok(options)
}

fn main() {
    env_logger::init();

    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    if let Some(rating) = options.dump {
        dump_path(rating, &options.config);
        return;
    }

    println!("=== PathGen Generation Harness ===\n");
    log::info!("Sweeping {} seeds with {:?}", options.seeds, options.config);

    let mut results = Vec::new();

    // 1. Depth sizing
    results.extend(validate_depth_table(&options));

    // 2. Theme weight tables
    results.extend(validate_theme_weights(&options));

    // 3. Generation sweep
    results.extend(validate_generation_sweep(&options));

    // 4. Deterministic replay
    results.extend(validate_replay(&options));

    // 5. Serialization
    results.extend(validate_serialization(&options));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

const RATINGS: std::ops::RangeInclusive<u8> = 1..=5;

fn factory_for(seed: u64, config: &PathConfig) -> PathResult<PathFactory<SeededSource>> {
    PathFactory::seeded(seed).with_config(config.clone())
}

/// Every outline the sweep covers: each rating and mission type, drawn and forced themes.
fn all_outlines() -> Vec<MissionOutline> {
    let mut outlines = Vec::new();
    for rating in RATINGS {
        for mission_type in MissionType::ALL {
            outlines.push(MissionOutline::new(rating, mission_type));
            for theme in Theme::ALL {
                outlines.push(MissionOutline::new(rating, mission_type).with_theme(theme));
            }
        }
    }
    outlines
}

// ── Depth sizing ────────────────────────────────────────────────────────

fn validate_depth_table(options: &Options) -> Vec<TestResult> {
    println!("--- Depth Sizing ---");
    let mut results = Vec::new();
    let config = &options.config;

    let depths: Vec<u32> = RATINGS.map(|r| config.target_depth(r)).collect();
    if *config == PathConfig::default() {
        results.push(TestResult {
            name: "depth_default_table".into(),
            passed: depths == [4, 4, 5, 5, 6],
            detail: format!("ratings 1-5 -> {:?}", depths),
        });
        results.push(TestResult {
            name: "depth_cap_applies".into(),
            passed: config.target_depth(10) == 7 && config.target_depth(u8::MAX) == 7,
            detail: format!("rating 10 -> {}", config.target_depth(10)),
        });
    }

    let monotone = depths.windows(2).all(|w| w[0] <= w[1]);
    let capped = depths.iter().all(|&d| d <= config.depth_cap);
    results.push(TestResult {
        name: "depth_monotone_and_capped".into(),
        passed: monotone && capped,
        detail: format!("{:?} under cap {}", depths, config.depth_cap),
    });

    // Built paths report the sized depth and put extraction there.
    let mut mismatches = Vec::new();
    for rating in RATINGS {
        let outline = MissionOutline::new(rating, MissionType::Exploration);
        let built = factory_for(u64::from(rating), config).and_then(|mut f| f.create_path(&outline));
        match built {
            Ok(path) => {
                let expected = config.target_depth(rating);
                let exit_depth = path.extraction().map(|n| n.depth);
                if path.max_depth != expected || exit_depth != Some(expected) {
                    mismatches.push(format!(
                        "rating {}: max_depth {} extraction {:?}, expected {}",
                        rating, path.max_depth, exit_depth, expected
                    ));
                }
            }
            Err(e) => mismatches.push(format!("rating {}: {}", rating, e)),
        }
    }
    results.push(TestResult {
        name: "depth_extraction_at_max".into(),
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            "extraction sits at max depth for every rating".into()
        } else {
            mismatches.join("; ")
        },
    });

    results
}

// ── Theme weights ───────────────────────────────────────────────────────

fn validate_theme_weights(options: &Options) -> Vec<TestResult> {
    println!("--- Theme Weights ---");
    let mut results = Vec::new();

    for mission_type in MissionType::ALL {
        let table = theme_weights(mission_type);
        let total: f64 = table.iter().map(|(_, w)| w).sum();
        results.push(TestResult {
            name: format!("weights_{:?}_sum", mission_type).to_lowercase(),
            passed: (total - 1.0).abs() < 1e-9,
            detail: format!("{} themes sum to {:.3}", table.len(), total),
        });

        // Empirical frequencies track the table.
        let draws = 20_000;
        let mut rng = RngSource::seeded(options.seeds.wrapping_add(mission_type as u64));
        let mut counts: BTreeMap<Theme, u32> = BTreeMap::new();
        for _ in 0..draws {
            *counts.entry(factory::weighted_theme(table, &mut rng)).or_insert(0) += 1;
        }
        let mut worst = 0.0f64;
        for (theme, weight) in table {
            let seen = counts.get(theme).copied().unwrap_or(0) as f64 / draws as f64;
            worst = worst.max((seen - weight).abs());
        }
        let stray: Vec<_> = counts
            .keys()
            .filter(|t| !table.iter().any(|(w, _)| w == *t))
            .collect();
        if options.verbose {
            println!("  {:?}: {:?}", mission_type, counts);
        }
        results.push(TestResult {
            name: format!("weights_{:?}_frequency", mission_type).to_lowercase(),
            passed: worst < 0.02 && stray.is_empty(),
            detail: if stray.is_empty() {
                format!("largest deviation {:.4} over {} draws", worst, draws)
            } else {
                format!("drew themes outside the table: {:?}", stray)
            },
        });
    }

    results
}

// ── Generation sweep ────────────────────────────────────────────────────

#[derive(Default)]
struct RatingStats {
    paths: u32,
    nodes: usize,
    decisions: u32,
    leaves: usize,
}

fn validate_generation_sweep(options: &Options) -> Vec<TestResult> {
    println!("--- Generation Sweep ---");
    let mut results = Vec::new();
    let config = &options.config;
    let outlines = all_outlines();

    let mut errors = Vec::new();
    let mut unreachable = Vec::new();
    let mut issues = Vec::new();
    let mut over_cap = Vec::new();
    let mut theme_drift = Vec::new();
    let mut stats: BTreeMap<u8, RatingStats> = BTreeMap::new();
    let mut categories: BTreeMap<NodeCategory, usize> = BTreeMap::new();

    for seed in 0..options.seeds {
        let mut factory = match factory_for(seed, config) {
            Ok(f) => f,
            Err(e) => {
                errors.push(format!("seed {}: {}", seed, e));
                break;
            }
        };
        for outline in &outlines {
            let path = match factory.create_path(outline) {
                Ok(p) => p,
                Err(e) => {
                    errors.push(format!("seed {} {:?}: {}", seed, outline, e));
                    continue;
                }
            };
            let label = format!(
                "seed {} rating {} {:?}",
                seed, outline.challenge_rating, outline.mission_type
            );

            if !validate_mission_path(&path) {
                unreachable.push(label.clone());
            }
            let report = inspect_path(&path);
            if let Some(issue) = report.issues.first() {
                issues.push(format!("{}: {}", label, issue));
            }
            if path.branch_count > config.max_decision_nodes {
                over_cap.push(format!("{}: {} decisions", label, path.branch_count));
            }
            let theme_ok = match outline.theme {
                Some(forced) => path.theme == forced,
                None => theme_weights(outline.mission_type)
                    .iter()
                    .any(|(t, w)| *t == path.theme && *w > 0.0),
            };
            if !theme_ok {
                theme_drift.push(format!("{}: {}", label, path.theme));
            }

            let entry = stats.entry(outline.challenge_rating).or_default();
            entry.paths += 1;
            entry.nodes += path.total_nodes;
            entry.decisions += path.branch_count;
            entry.leaves += report.leaf_count;
            for (category, count) in path.category_counts() {
                *categories.entry(category).or_insert(0) += count;
            }
        }
    }

    let generated: u32 = stats.values().map(|s| s.paths).sum();
    for (name, failures, ok) in [
        ("sweep_no_errors", &errors, "every outline generated"),
        ("sweep_reachable", &unreachable, "every node reachable from start"),
        ("sweep_structure_clean", &issues, "no structural issues"),
        ("sweep_decision_cap", &over_cap, "decision count within cap"),
        ("sweep_theme_resolution", &theme_drift, "themes forced or drawn from table"),
    ] {
        results.push(TestResult {
            name: name.into(),
            passed: failures.is_empty(),
            detail: match failures.first() {
                None => format!("{} ({} paths)", ok, generated),
                Some(first) => format!("{} failures, first: {}", failures.len(), first),
            },
        });
    }

    let all_content = NodeCategory::CONTENT
        .iter()
        .all(|c| categories.get(c).copied().unwrap_or(0) > 0);
    results.push(TestResult {
        name: "sweep_content_variety".into(),
        passed: generated == 0 || all_content,
        detail: format!("{:?}", categories),
    });

    if options.verbose {
        for (rating, s) in &stats {
            let n = f64::from(s.paths.max(1));
            println!(
                "  rating {}: {} paths, avg {:.1} nodes, {:.2} decisions, {:.1} leaves",
                rating,
                s.paths,
                s.nodes as f64 / n,
                f64::from(s.decisions) / n,
                s.leaves as f64 / n
            );
        }
    }

    results
}

// ── Deterministic replay ────────────────────────────────────────────────

fn validate_replay(options: &Options) -> Vec<TestResult> {
    println!("--- Deterministic Replay ---");
    let mut results = Vec::new();
    let config = &options.config;
    let outline = MissionOutline::new(4, MissionType::Rescue);

    let same_seed = factory_for(7, config)
        .and_then(|mut f| f.create_path(&outline))
        .and_then(|a| {
            let b = factory_for(7, config)?.create_path(&outline)?;
            Ok(a == b)
        });
    results.push(TestResult {
        name: "replay_same_seed".into(),
        passed: matches!(same_seed, Ok(true)),
        detail: match same_seed {
            Ok(same) => format!("seed 7 reproduces: {}", same),
            Err(e) => e.to_string(),
        },
    });

    let script = vec![0.12, 0.73, 0.05, 0.41, 0.88, 0.27, 0.64, 0.33, 0.96, 0.18];
    let scripted = PathFactory::new(ScriptedSource::new(script))
        .with_config(config.clone())
        .and_then(|mut factory| {
            let first = factory.create_path(&outline)?;
            let draws = factory.rng_mut().draws();
            factory.rng_mut().reset();
            let second = factory.create_path(&outline)?;
            Ok((first == second, draws))
        });
    results.push(TestResult {
        name: "replay_scripted_reset".into(),
        passed: matches!(scripted, Ok((true, draws)) if draws > 0),
        detail: match scripted {
            Ok((same, draws)) => format!("identical after reset: {} ({} draws)", same, draws),
            Err(e) => e.to_string(),
        },
    });

    results
}

// ── Serialization ───────────────────────────────────────────────────────

fn validate_serialization(options: &Options) -> Vec<TestResult> {
    println!("--- Serialization ---");
    let mut results = Vec::new();

    let outline = MissionOutline::new(5, MissionType::Combat).with_theme(Theme::Derelict);
    let path = match factory_for(3, &options.config).and_then(|mut f| f.create_path(&outline)) {
        Ok(p) => p,
        Err(e) => {
            results.push(TestResult {
                name: "serialize_generate".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let restored = path
        .to_json()
        .and_then(|json| MissionPath::from_json(&json));
    match restored {
        Ok(back) => {
            let order_kept = back.nodes.keys().eq(path.nodes.keys());
            results.push(TestResult {
                name: "serialize_lossless".into(),
                passed: back == path,
                detail: format!("{} nodes restored", back.nodes.len()),
            });
            results.push(TestResult {
                name: "serialize_node_order".into(),
                passed: order_kept,
                detail: "nodes keep creation order".into(),
            });
        }
        Err(e) => results.push(TestResult {
            name: "serialize_lossless".into(),
            passed: false,
            detail: e.to_string(),
        }),
    }

    results
}

// ── Dump ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DumpSummary<'a> {
    outline: &'a MissionOutline,
    valid: bool,
    leaf_ids: Vec<&'a str>,
    issues: Vec<String>,
}

fn dump_path(rating: u8, config: &PathConfig) {
    let outline = MissionOutline::new(rating, MissionType::Exploration);
    let path = match factory_for(u64::from(rating), config).and_then(|mut f| f.create_path(&outline)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let summary = DumpSummary {
        outline: &outline,
        valid: validate_mission_path(&path),
        leaf_ids: path.leaves().iter().map(|n| n.id.as_str()).collect(),
        issues: inspect_path(&path).issues.iter().map(|i| i.to_string()).collect(),
    };
    match (path.to_json(), serde_json::to_string_pretty(&summary)) {
        (Ok(json), Ok(summary)) => {
            println!("{}", json);
            eprintln!("{}", summary);
        }
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
