//! Incremental mission path construction.
//!
//! The builder grows a tree level by level from a landing node:
//!
//! 1. [`PathBuilder::add_landing_site`] seeds the frontier with `node_1`.
//! 2. [`PathBuilder::process_next_level`] expands every frontier node into
//!    either a decision node with 2-3 content children, or a single content
//!    node. Repeat until [`PathBuilder::is_complete`].
//! 3. [`PathBuilder::build`] adds the extraction node, wires every leaf to it,
//!    then synthesizes forward choices for the remaining interior nodes.
//!
//! Node ids follow `node_<n>` (1-based, never reused) except the terminal
//! node, which is always `extraction`.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::PathConfig;
use crate::error::PathResult;
use crate::generators::{GeneratorRegistry, NodeContext};
use crate::model::{MissionChoice, MissionNode, MissionPath, NodeCategory, RiskLevel};
use crate::outline::Theme;
use crate::random::RandomSource;

/// Fixed id of the terminal node.
pub const EXTRACTION_NODE_ID: &str = "extraction";

/// Label of every leaf's choice into extraction.
pub const COMPLETE_MISSION_LABEL: &str = "Complete Mission";

pub struct PathBuilder<'a> {
    registry: &'a GeneratorRegistry,
    config: &'a PathConfig,
    rng: &'a mut dyn RandomSource,
    theme: Theme,
    difficulty: u8,
    max_depth: u32,

    nodes: IndexMap<String, MissionNode>,
    node_counter: u32,
    decision_node_count: u32,
    current_depth: u32,
    pending_nodes: Vec<String>,
}

impl<'a> PathBuilder<'a> {
    /// Fails if any node category lacks a strategy.
    pub fn new(
        registry: &'a GeneratorRegistry,
        config: &'a PathConfig,
        rng: &'a mut dyn RandomSource,
        theme: Theme,
        difficulty: u8,
        max_depth: u32,
    ) -> PathResult<Self> {
        registry.ensure_complete()?;
        Ok(Self {
            registry,
            config,
            rng,
            theme,
            difficulty,
            max_depth,
            nodes: IndexMap::new(),
            node_counter: 0,
            decision_node_count: 0,
            current_depth: 0,
            pending_nodes: Vec::new(),
        })
    }

    pub fn nodes(&self) -> &IndexMap<String, MissionNode> {
        &self.nodes
    }

    pub fn pending_nodes(&self) -> &[String] {
        &self.pending_nodes
    }

    pub fn current_depth(&self) -> u32 {
        self.current_depth
    }

    pub fn decision_node_count(&self) -> u32 {
        self.decision_node_count
    }

    /// Deepest level the frontier may be expanded to.
    fn last_level(&self) -> u32 {
        self.max_depth.saturating_sub(1)
    }

    fn next_node_id(&mut self) -> String {
        self.node_counter += 1;
        format!("node_{}", self.node_counter)
    }

    fn generate_node(
        &mut self,
        category: NodeCategory,
        id: &str,
        depth: u32,
        parent_id: Option<&str>,
    ) -> PathResult<MissionNode> {
        let ctx = NodeContext {
            theme: self.theme,
            difficulty: self.difficulty,
            id,
            depth,
            parent_id,
        };
        self.registry.generate(category, &ctx, &mut *self.rng)
    }

    fn insert(&mut self, node: MissionNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Creates `node_1` and seeds the frontier with it. Call once, first.
    pub fn add_landing_site(&mut self) -> PathResult<()> {
        let id = self.next_node_id();
        let node = self.generate_node(NodeCategory::LandingSite, &id, 0, None)?;
        self.insert(node);
        self.pending_nodes.push(id);
        self.current_depth = 0;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.pending_nodes.is_empty() || self.current_depth >= self.last_level()
    }

    /// Expand every frontier node by one level.
    pub fn process_next_level(&mut self) -> PathResult<()> {
        if self.is_complete() {
            return Ok(());
        }

        let frontier = std::mem::take(&mut self.pending_nodes);
        self.current_depth += 1;
        log::debug!(
            "expanding level {} ({} frontier nodes)",
            self.current_depth,
            frontier.len()
        );

        for parent_id in frontier {
            if self.should_create_decision_node() {
                self.add_decision_branch(&parent_id)?;
            } else {
                self.add_single_branch(&parent_id)?;
            }
        }
        Ok(())
    }

    /// One weighted coin flip, allowed only while under the decision cap.
    pub fn should_create_decision_node(&mut self) -> bool {
        if self.decision_node_count >= self.config.max_decision_nodes {
            return false;
        }
        self.rng.chance(self.config.decision_chance)
    }

    fn random_content_category(&mut self) -> NodeCategory {
        let rng: &mut dyn RandomSource = &mut *self.rng;
        *rng.pick(&NodeCategory::CONTENT)
    }

    fn queue_if_expandable(&mut self, node_id: String, depth: u32) {
        if depth <= self.last_level() {
            self.pending_nodes.push(node_id);
        }
    }

    fn add_decision_branch(&mut self, parent_id: &str) -> PathResult<()> {
        let depth = self.current_depth;
        let decision_id = self.next_node_id();
        let decision =
            self.generate_node(NodeCategory::Decision, &decision_id, depth, Some(parent_id))?;
        self.insert(decision);
        self.decision_node_count += 1;

        let branches = self.rng.next_int(
            self.config.min_decision_branches as i64,
            self.config.max_decision_branches as i64,
        );
        log::debug!(
            "decision {} under {} fans out into {} branches",
            decision_id,
            parent_id,
            branches
        );

        let child_depth = depth + 1;
        for _ in 0..branches {
            let category = self.random_content_category();
            let child_id = self.next_node_id();
            let child =
                self.generate_node(category, &child_id, child_depth, Some(decision_id.as_str()))?;
            let choice = self.create_choice_for_node(&decision_id, &child);
            self.insert(child);
            if let Some(decision) = self.nodes.get_mut(&decision_id) {
                decision.choices.push(choice);
            }
            self.queue_if_expandable(child_id, child_depth);
        }
        Ok(())
    }

    fn add_single_branch(&mut self, parent_id: &str) -> PathResult<()> {
        let depth = self.current_depth;
        let category = self.random_content_category();
        let child_id = self.next_node_id();
        let child = self.generate_node(category, &child_id, depth, Some(parent_id))?;
        self.insert(child);
        self.queue_if_expandable(child_id, depth);
        Ok(())
    }

    /// Forward choice from `source_id` into `target`.
    pub fn create_choice_for_node(&mut self, source_id: &str, target: &MissionNode) -> MissionChoice {
        let rng: &mut dyn RandomSource = &mut *self.rng;
        let label = *rng.pick(target.category.choice_labels());
        MissionChoice {
            id: format!("{}_to_{}", source_id, target.id),
            label: label.to_string(),
            description: target.description.clone(),
            target_node_id: target.id.clone(),
            risk_level: target.category.base_risk(),
        }
    }

    fn parent_ids(&self) -> HashSet<String> {
        self.nodes
            .values()
            .filter_map(|n| n.parent_node_id.clone())
            .collect()
    }

    /// Adds the terminal node and wires every childless node into it.
    pub fn add_extraction(&mut self) -> PathResult<()> {
        let node = self.generate_node(
            NodeCategory::Extraction,
            EXTRACTION_NODE_ID,
            self.max_depth,
            None,
        )?;
        self.insert(node);

        let parents = self.parent_ids();
        let leaves: Vec<String> = self
            .nodes
            .values()
            .filter(|n| !n.is_terminal() && !parents.contains(&n.id))
            .map(|n| n.id.clone())
            .collect();
        self.wire_to_extraction(&leaves);
        Ok(())
    }

    /// Marks each node a leaf and gives it a single choice into extraction.
    fn wire_to_extraction(&mut self, node_ids: &[String]) {
        let description = self
            .nodes
            .get(EXTRACTION_NODE_ID)
            .map(|n| n.description.clone())
            .unwrap_or_default();

        for id in node_ids {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            if node
                .choices
                .iter()
                .any(|c| c.target_node_id == EXTRACTION_NODE_ID)
            {
                continue;
            }
            node.is_leaf_node = true;
            node.choices.push(MissionChoice {
                id: format!("{}_to_{}", id, EXTRACTION_NODE_ID),
                label: COMPLETE_MISSION_LABEL.to_string(),
                description: description.clone(),
                target_node_id: EXTRACTION_NODE_ID.to_string(),
                risk_level: RiskLevel::Low,
            });
        }
    }

    /// Forward choices for interior content nodes.
    ///
    /// Skips extraction, decision nodes (wired at creation), and nodes already
    /// marked as leaves. A node found with no children is marked a leaf and
    /// returned so the caller can wire it to extraction.
    pub fn generate_choices(&mut self) -> Vec<String> {
        let candidates: Vec<String> = self
            .nodes
            .values()
            .filter(|n| {
                !matches!(n.category, NodeCategory::Extraction | NodeCategory::Decision)
                    && !n.is_leaf_node
            })
            .map(|n| n.id.clone())
            .collect();

        let mut new_leaves = Vec::new();
        for id in candidates {
            let children: Vec<MissionNode> = self
                .nodes
                .values()
                .filter(|n| n.parent_node_id.as_deref() == Some(id.as_str()))
                .cloned()
                .collect();

            if children.is_empty() {
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.is_leaf_node = true;
                }
                new_leaves.push(id);
                continue;
            }
            if children.len() > 1 {
                log::warn!("node {} has {} direct children", id, children.len());
            }

            let choices: Vec<MissionChoice> = children
                .iter()
                .map(|child| self.create_choice_for_node(&id, child))
                .collect();
            if let Some(node) = self.nodes.get_mut(&id) {
                node.choices.extend(choices);
            }
        }
        new_leaves
    }

    /// Finish the graph. Extraction wiring must run before choice synthesis.
    pub fn build(mut self) -> PathResult<MissionPath> {
        self.add_extraction()?;
        let stragglers = self.generate_choices();
        if !stragglers.is_empty() {
            log::warn!("{} childless nodes found after extraction wiring", stragglers.len());
            self.wire_to_extraction(&stragglers);
        }

        let start_node_id = self
            .nodes
            .values()
            .find(|n| n.category == NodeCategory::LandingSite)
            .map(|n| n.id.clone())
            .unwrap_or_default();

        Ok(MissionPath {
            start_node_id,
            extraction_node_id: EXTRACTION_NODE_ID.to_string(),
            total_nodes: self.nodes.len(),
            nodes: self.nodes,
            max_depth: self.max_depth,
            branch_count: self.decision_node_count,
            difficulty: self.difficulty,
            theme: self.theme,
        })
    }
}
