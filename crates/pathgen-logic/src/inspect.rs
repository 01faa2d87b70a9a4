//! Structural diagnostics for a finished path.
//!
//! [`validate_mission_path`](crate::factory::validate_mission_path) answers a
//! single yes/no question. `inspect_path` lists every defect it finds so a
//! failing path can be logged in detail.

use std::collections::HashSet;
use std::fmt;

use crate::model::{MissionPath, NodeCategory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathIssue {
    MissingStart(String),
    MissingExtraction(String),
    /// `(node, target)` where the target id is not in the path.
    DanglingChoice(String, String),
    SelfLoop(String),
    Unreachable(String),
    ExtractionHasChoices(usize),
    /// Non-extraction node with no way forward.
    DeadEnd(String),
    /// `(node, target)` where the target is shallower than the node.
    DepthRegression(String, String),
}

impl fmt::Display for PathIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart(id) => write!(f, "start node {} missing", id),
            Self::MissingExtraction(id) => write!(f, "extraction node {} missing", id),
            Self::DanglingChoice(from, to) => write!(f, "{} has a choice into unknown {}", from, to),
            Self::SelfLoop(id) => write!(f, "{} has a choice into itself", id),
            Self::Unreachable(id) => write!(f, "{} is unreachable from start", id),
            Self::ExtractionHasChoices(n) => write!(f, "extraction has {} outgoing choices", n),
            Self::DeadEnd(id) => write!(f, "{} has no outgoing choices", id),
            Self::DepthRegression(from, to) => write!(f, "{} leads back up to {}", from, to),
        }
    }
}

/// Summary of a path's structure and any defects.
#[derive(Debug, Clone, Default)]
pub struct PathReport {
    pub issues: Vec<PathIssue>,
    pub reachable: usize,
    pub edge_count: usize,
    pub leaf_count: usize,
    pub deepest_node: u32,
}

impl PathReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn inspect_path(path: &MissionPath) -> PathReport {
    let mut report = PathReport::default();

    if !path.nodes.contains_key(&path.start_node_id) {
        report
            .issues
            .push(PathIssue::MissingStart(path.start_node_id.clone()));
    }
    match path.extraction() {
        None => report
            .issues
            .push(PathIssue::MissingExtraction(path.extraction_node_id.clone())),
        Some(exit) if !exit.choices.is_empty() => report
            .issues
            .push(PathIssue::ExtractionHasChoices(exit.choices.len())),
        Some(_) => {}
    }

    for node in path.nodes.values() {
        report.deepest_node = report.deepest_node.max(node.depth);
        report.edge_count += node.choices.len();
        if node.is_leaf_node {
            report.leaf_count += 1;
        }
        if node.category != NodeCategory::Extraction && node.choices.is_empty() {
            report.issues.push(PathIssue::DeadEnd(node.id.clone()));
        }
        for choice in &node.choices {
            let target_id = &choice.target_node_id;
            if *target_id == node.id {
                report.issues.push(PathIssue::SelfLoop(node.id.clone()));
                continue;
            }
            match path.node(target_id) {
                None => report
                    .issues
                    .push(PathIssue::DanglingChoice(node.id.clone(), target_id.clone())),
                Some(target) if target.depth < node.depth => report
                    .issues
                    .push(PathIssue::DepthRegression(node.id.clone(), target_id.clone())),
                Some(_) => {}
            }
        }
    }

    let reachable = reachable_from_start(path);
    report.reachable = reachable.len();
    if !reachable.is_empty() {
        for id in path.nodes.keys() {
            if !reachable.contains(id.as_str()) {
                report.issues.push(PathIssue::Unreachable(id.clone()));
            }
        }
    }

    report
}

/// Breadth-first set of node ids reachable from the start node.
fn reachable_from_start(path: &MissionPath) -> HashSet<&str> {
    let mut seen = HashSet::new();
    let Some(start) = path.start() else {
        return seen;
    };
    let mut queue = std::collections::VecDeque::from([start.id.as_str()]);
    seen.insert(start.id.as_str());
    while let Some(id) = queue.pop_front() {
        let Some(node) = path.node(id) else {
            continue;
        };
        for choice in &node.choices {
            if path.nodes.contains_key(&choice.target_node_id)
                && seen.insert(choice.target_node_id.as_str())
            {
                queue.push_back(choice.target_node_id.as_str());
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::PathFactory;
    use crate::model::{MissionChoice, RiskLevel};
    use crate::outline::{MissionOutline, MissionType};

    fn sample() -> MissionPath {
        PathFactory::seeded(21)
            .create_path(&MissionOutline::new(5, MissionType::Exploration))
            .unwrap()
    }

    #[test]
    fn test_generated_path_is_clean() {
        let path = sample();
        let report = inspect_path(&path);
        assert!(report.is_clean(), "issues: {:?}", report.issues);
        assert_eq!(report.reachable, path.total_nodes);
        assert!(report.deepest_node <= path.max_depth);
        assert!(report.leaf_count >= 1);
        // one edge into every node but the start, plus one per leaf into extraction
        assert_eq!(report.edge_count, path.total_nodes - 2 + report.leaf_count);
    }

    #[test]
    fn test_reports_dangling_and_self_loop() {
        let mut path = sample();
        let node = path.nodes.get_mut("node_1").unwrap();
        node.choices.push(MissionChoice {
            id: "bad".into(),
            label: "Nowhere".into(),
            description: String::new(),
            target_node_id: "node_404".into(),
            risk_level: RiskLevel::High,
        });
        node.choices.push(MissionChoice {
            id: "loop".into(),
            label: "Again".into(),
            description: String::new(),
            target_node_id: "node_1".into(),
            risk_level: RiskLevel::Low,
        });
        let report = inspect_path(&path);
        assert!(report
            .issues
            .contains(&PathIssue::DanglingChoice("node_1".into(), "node_404".into())));
        assert!(report.issues.contains(&PathIssue::SelfLoop("node_1".into())));
    }

    #[test]
    fn test_reports_extraction_choices_and_dead_ends() {
        let mut path = sample();
        let back = MissionChoice {
            id: "back".into(),
            label: "Go back".into(),
            description: String::new(),
            target_node_id: "node_1".into(),
            risk_level: RiskLevel::Low,
        };
        path.nodes.get_mut("extraction").unwrap().choices.push(back);
        path.nodes.get_mut("node_2").unwrap().choices.clear();
        let report = inspect_path(&path);
        assert!(report.issues.contains(&PathIssue::ExtractionHasChoices(1)));
        assert!(report.issues.contains(&PathIssue::DeadEnd("node_2".into())));
        assert!(report
            .issues
            .contains(&PathIssue::DepthRegression("extraction".into(), "node_1".into())));
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, PathIssue::Unreachable(_))));
    }

    #[test]
    fn test_reports_missing_endpoints() {
        let mut path = sample();
        path.start_node_id = "ghost".into();
        path.nodes.shift_remove("extraction");
        let report = inspect_path(&path);
        assert!(report.issues.contains(&PathIssue::MissingStart("ghost".into())));
        assert!(report
            .issues
            .contains(&PathIssue::MissingExtraction("extraction".into())));
        assert_eq!(report.reachable, 0);
        assert_eq!(report.issues[0].to_string(), "start node ghost missing");
    }
}
