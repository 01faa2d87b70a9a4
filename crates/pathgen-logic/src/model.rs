//! Mission path data model: nodes, choices, rewards, and the finished graph.
//!
//! A [`MissionPath`] is a DAG of [`MissionNode`]s joined by [`MissionChoice`]
//! edges, from a single landing site to a single extraction node. The builder
//! owns and mutates nodes during construction; once built, the path is
//! treated as read-only.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::outline::Theme;

// ============================================================================
// CATEGORIES & RISK
// ============================================================================

/// Node category. Each category has exactly one generator strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeCategory {
    LandingSite,
    Encounter,
    Treasure,
    Mining,
    Rest,
    Decision,
    Extraction,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 7] = [
        NodeCategory::LandingSite,
        NodeCategory::Encounter,
        NodeCategory::Treasure,
        NodeCategory::Mining,
        NodeCategory::Rest,
        NodeCategory::Decision,
        NodeCategory::Extraction,
    ];

    /// Categories the builder draws from for ordinary content nodes.
    pub const CONTENT: [NodeCategory; 4] = [
        NodeCategory::Encounter,
        NodeCategory::Treasure,
        NodeCategory::Mining,
        NodeCategory::Rest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LandingSite => "LANDING_SITE",
            Self::Encounter => "ENCOUNTER",
            Self::Treasure => "TREASURE",
            Self::Mining => "MINING",
            Self::Rest => "REST",
            Self::Decision => "DECISION",
            Self::Extraction => "EXTRACTION",
        }
    }

    /// Risk of a choice leading into a node of this category.
    pub fn base_risk(&self) -> RiskLevel {
        match self {
            Self::LandingSite | Self::Mining | Self::Rest | Self::Extraction => RiskLevel::Low,
            Self::Treasure | Self::Decision => RiskLevel::Medium,
            Self::Encounter => RiskLevel::High,
        }
    }

    /// Labels for a choice leading into a node of this category.
    pub fn choice_labels(&self) -> &'static [&'static str] {
        match self {
            Self::LandingSite => &["Return to the landing zone", "Regroup at the lander"],
            Self::Encounter => &["Engage hostiles", "Push through the threat", "Confront the danger"],
            Self::Treasure => &["Search for valuables", "Investigate the signal", "Open the cache"],
            Self::Mining => &["Survey the deposit", "Extract resources", "Deploy mining rig"],
            Self::Rest => &["Take shelter", "Rest and recover", "Make camp"],
            Self::Decision => &["Scout ahead", "Assess the options", "Plot a course"],
            Self::Extraction => &["Complete Mission"],
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

// ============================================================================
// NODES & CHOICES
// ============================================================================

/// A forward edge from one node to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionChoice {
    pub id: String,
    pub label: String,
    pub description: String,
    pub target_node_id: String,
    pub risk_level: RiskLevel,
}

/// A reward granted on resolving a node.
///
/// `probability` is metadata for the gameplay layer; generation never rolls it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeReward {
    #[serde(rename = "type")]
    pub reward_type: String,
    pub quantity: u32,
    pub probability: f64,
}

impl NodeReward {
    pub fn new(reward_type: &str, quantity: u32, probability: f64) -> Self {
        Self {
            reward_type: reward_type.to_string(),
            quantity,
            probability: probability.clamp(0.0, 1.0),
        }
    }

    pub fn guaranteed(reward_type: &str, quantity: u32) -> Self {
        Self::new(reward_type, quantity, 1.0)
    }
}

/// A precondition for entering a node, e.g. a minimum gear level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRequirement {
    #[serde(rename = "type")]
    pub requirement_type: String,
    pub value: u32,
}

impl NodeRequirement {
    pub fn new(requirement_type: &str, value: u32) -> Self {
        Self {
            requirement_type: requirement_type.to_string(),
            value,
        }
    }
}

/// Type-specific data attached to a node.
pub type NodeContent = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionNode {
    pub id: String,
    #[serde(rename = "type")]
    pub category: NodeCategory,
    pub title: String,
    pub description: String,
    pub choices: Vec<MissionChoice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<NodeRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewards: Vec<NodeReward>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: NodeContent,
    pub depth: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node_id: Option<String>,
    pub is_leaf_node: bool,
}

impl MissionNode {
    /// A node with no choices, rewards, or content yet.
    pub fn new(
        id: &str,
        category: NodeCategory,
        title: &str,
        description: &str,
        depth: u32,
        parent_node_id: Option<&str>,
    ) -> Self {
        Self {
            id: id.to_string(),
            category,
            title: title.to_string(),
            description: description.to_string(),
            choices: Vec::new(),
            requirements: Vec::new(),
            rewards: Vec::new(),
            content: NodeContent::new(),
            depth,
            parent_node_id: parent_node_id.map(str::to_string),
            is_leaf_node: false,
        }
    }

    pub fn with_reward(mut self, reward: NodeReward) -> Self {
        self.rewards.push(reward);
        self
    }

    pub fn with_requirement(mut self, requirement: NodeRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn with_content(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.content.insert(key.to_string(), value.into());
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.category == NodeCategory::Extraction
    }
}

// ============================================================================
// MISSION PATH
// ============================================================================

/// A finished mission graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionPath {
    pub start_node_id: String,
    pub extraction_node_id: String,
    /// Nodes in creation order. Serialized as an ordered list of `[id, node]` pairs.
    #[serde(with = "node_entries")]
    pub nodes: IndexMap<String, MissionNode>,
    pub total_nodes: usize,
    pub max_depth: u32,
    /// Number of decision nodes.
    pub branch_count: u32,
    pub difficulty: u8,
    pub theme: Theme,
}

impl MissionPath {
    pub fn node(&self, id: &str) -> Option<&MissionNode> {
        self.nodes.get(id)
    }

    pub fn start(&self) -> Option<&MissionNode> {
        self.node(&self.start_node_id)
    }

    pub fn extraction(&self) -> Option<&MissionNode> {
        self.node(&self.extraction_node_id)
    }

    /// Nodes whose `parent_node_id` is `id`, in creation order.
    pub fn children_of(&self, id: &str) -> Vec<&MissionNode> {
        self.nodes
            .values()
            .filter(|n| n.parent_node_id.as_deref() == Some(id))
            .collect()
    }

    /// Non-extraction nodes that no other node names as parent.
    pub fn leaves(&self) -> Vec<&MissionNode> {
        let parents: HashSet<&str> = self
            .nodes
            .values()
            .filter_map(|n| n.parent_node_id.as_deref())
            .collect();
        self.nodes
            .values()
            .filter(|n| !n.is_terminal() && !parents.contains(n.id.as_str()))
            .collect()
    }

    pub fn nodes_at_depth(&self, depth: u32) -> Vec<&MissionNode> {
        self.nodes.values().filter(|n| n.depth == depth).collect()
    }

    pub fn category_counts(&self) -> BTreeMap<NodeCategory, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes.values() {
            *counts.entry(node.category).or_insert(0) += 1;
        }
        counts
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Serializes the node map as an explicit ordered list of `[id, node]` pairs.
mod node_entries {
    use indexmap::IndexMap;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::MissionNode;

    pub fn serialize<S: Serializer>(
        nodes: &IndexMap<String, MissionNode>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(nodes.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<String, MissionNode>, D::Error> {
        let entries: Vec<(String, MissionNode)> = Vec::deserialize(deserializer)?;
        let mut nodes = IndexMap::with_capacity(entries.len());
        for (id, node) in entries {
            if nodes.insert(id.clone(), node).is_some() {
                return Err(D::Error::custom(format!("duplicate node id {}", id)));
            }
        }
        Ok(nodes)
    }
}
