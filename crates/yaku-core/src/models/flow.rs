//! Per-node flow values

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use super::node::NodeId;

/// Total flow measured at each node, as reported by the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowTable(HashMap<NodeId, f64>);

impl FlowTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `flujos_maximos`, ignoring entries that are not finite numbers.
    #[must_use]
    pub fn from_json_map(raw: &Map<String, Value>) -> Self {
        Self(
            raw.iter()
                .filter_map(|(id, value)| {
                    let flow = value.as_f64().filter(|flow| flow.is_finite())?;
                    Some((NodeId::new(id.as_str()).ok()?, flow))
                })
                .collect(),
        )
    }

    pub fn insert(&mut self, id: NodeId, flow: f64) {
        self.0.insert(id, flow);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.0.get(id).copied()
    }

    /// Flow at `id` when strictly positive
    #[must_use]
    pub fn positive(&self, id: &str) -> Option<f64> {
        self.get(id).filter(|flow| *flow > 0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(NodeId, f64)> for FlowTable {
    fn from_iter<I: IntoIterator<Item = (NodeId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Flow restricted to nodes on active routes.
///
/// Entries keep first-seen order and each node appears at most once.
#[derive(Debug, Clone, Default)]
pub struct ActiveFlowTable {
    entries: Vec<(NodeId, f64)>,
    seen: HashSet<NodeId>,
}

impl ActiveFlowTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `(id, flow)` unless `id` was already recorded.
    ///
    /// Returns whether the entry was added.
    pub fn record(&mut self, id: &NodeId, flow: f64) -> bool {
        if !self.seen.insert(id.clone()) {
            return false;
        }
        self.entries.push((id.clone(), flow));
        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.as_str() == id)
            .map(|(_, flow)| *flow)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, f64)> + '_ {
        self.entries.iter().map(|(id, flow)| (id, *flow))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, flow)| *flow)
    }

    #[must_use]
    pub fn entries(&self) -> &[(NodeId, f64)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for ActiveFlowTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
