//! Name to coordinate lookup for route drawing

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{LatLng, Node, NodeId};
use crate::overlay::MarkerSpec;

static POPUP_HEADING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"<h6[^>]*>([^<]+)</h6>").ok());

const ICON_GLYPHS: [char; 5] = ['🏛', '⚠', '🔵', '🚫', '\u{FE0F}'];

/// Coordinates of every node that could be resolved.
///
/// A missing id means "coordinates unknown"; lookups never fail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeIndex {
    coords: HashMap<NodeId, LatLng>,
}

impl NodeIndex {
    /// Index built straight from the node list of a response
    #[must_use]
    pub fn resolve(nodes: &[Node]) -> Self {
        Self {
            coords: nodes
                .iter()
                .map(|node| (node.id.clone(), node.position))
                .collect(),
        }
    }

    /// Lossy index recovered from markers already on the map.
    ///
    /// Each marker is identified by its id tag, else its title tag, else
    /// the heading of its popup with icon glyphs stripped. Markers with
    /// none of these are skipped.
    #[must_use]
    pub fn from_markers(markers: &[MarkerSpec]) -> Self {
        Self {
            coords: markers
                .iter()
                .filter_map(|marker| Some((marker_identity(marker)?, marker.position)))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<LatLng> {
        self.coords.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.coords.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

fn marker_identity(marker: &MarkerSpec) -> Option<NodeId> {
    if let Some(id) = &marker.node_id {
        return Some(id.clone());
    }
    if let Some(id) = marker.title.as_deref().and_then(|title| NodeId::new(title.trim()).ok()) {
        return Some(id);
    }
    popup_heading_id(&marker.popup)
}

fn popup_heading_id(popup: &str) -> Option<NodeId> {
    let heading = POPUP_HEADING.as_ref()?.captures(popup)?.get(1)?.as_str();
    let decoded = html_escape::decode_html_entities(heading);
    let stripped: String = decoded
        .chars()
        .filter(|c| !ICON_GLYPHS.contains(c))
        .collect();
    NodeId::new(stripped.trim()).ok()
}
