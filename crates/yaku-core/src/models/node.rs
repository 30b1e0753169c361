//! Network node with type-safe identifiers and coordinates

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;
use serde_json::Number;

use crate::error::{Error, Result};

/// Type-safe wrapper for node identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Creates a new `NodeId` with validation
    ///
    /// # Errors
    /// Returns an error if the ID is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::invalid_node_id("node id cannot be empty"));
        }
        Ok(Self(id))
    }

    /// Id for a bare JSON number, spelled the way the dashboard's flow keys
    /// are: floats use `f64`'s shortest display, so `1.0` becomes `"1"`.
    ///
    /// # Errors
    /// Same as [`Self::new`].
    pub fn from_number(raw: &Number) -> Result<Self> {
        match raw.as_f64().filter(|_| raw.is_f64()) {
            Some(value) => Self::new(value.to_string()),
            None => Self::new(raw.to_string()),
        }
    }

    /// Returns the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new position with validation
    ///
    /// # Errors
    /// Returns an error if either coordinate is not finite
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() {
            return Err(Error::invalid_coordinate(format!(
                "latitude must be finite, got: {lat}"
            )));
        }
        if !lng.is_finite() {
            return Err(Error::invalid_coordinate(format!(
                "longitude must be finite, got: {lng}"
            )));
        }
        Ok(Self { lat, lng })
    }

    /// `[lat, lng]` pair, the shape the map engine consumes
    #[must_use]
    pub const fn as_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Role of a node in the distribution network
///
/// Unknown wire values are kept verbatim so popups can show them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum NodeKind {
    Reservoir,
    CriticalPoint,
    Other(String),
}

impl NodeKind {
    /// Value used by the processing backend
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Reservoir => "embalse",
            Self::CriticalPoint => "punto_critico",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Human readable label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Reservoir => "Reservoir",
            Self::CriticalPoint => "Critical point",
            Self::Other(raw) if raw.is_empty() || raw == "normal" => "Distribution node",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Other("normal".to_string())
    }
}

impl From<String> for NodeKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "embalse" => Self::Reservoir,
            "punto_critico" => Self::CriticalPoint,
            _ => Self::Other(raw),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_wire().to_string()
    }
}

/// Whether a node can carry flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum NodeState {
    #[default]
    Passable,
    Blocked,
    Obstacle,
}

impl NodeState {
    /// Value used by the processing backend
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Passable => "transitable",
            Self::Blocked => "bloqueado",
            Self::Obstacle => "obstaculo",
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passable => "Passable",
            Self::Blocked => "Blocked",
            Self::Obstacle => "Obstacle",
        }
    }

    /// Blocked and obstacle nodes are drawn as unusable
    #[must_use]
    pub const fn is_unusable(self) -> bool {
        matches!(self, Self::Blocked | Self::Obstacle)
    }
}

impl From<String> for NodeState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "obstaculo" => Self::Obstacle,
            "bloqueado" => Self::Blocked,
            _ => Self::Passable,
        }
    }
}

impl From<NodeState> for String {
    fn from(state: NodeState) -> Self {
        state.as_wire().to_string()
    }
}

/// A node of the water network as returned by one processing cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub state: NodeState,
    pub position: LatLng,
    pub capacity: Option<f64>,
    pub subtype: Option<String>,
}

impl Node {
    /// Creates a passable node with no capacity or subtype
    #[must_use]
    pub fn new(id: NodeId, kind: NodeKind, position: LatLng) -> Self {
        Self {
            id,
            kind,
            state: NodeState::default(),
            position,
            capacity: None,
            subtype: None,
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: NodeState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn test_node_id_rejects_blank() {
        assert!(NodeId::new("").is_err());
        assert!(NodeId::new("   ").is_err());
        assert_eq!(NodeId::new("N001").unwrap().as_str(), "N001");
    }

    #[test]
    fn test_numeric_ids_match_flow_keys() {
        let id = |raw: &str| NodeId::from_number(&serde_json::from_str(raw).unwrap()).unwrap();
        assert_eq!(id("7").as_str(), "7");
        assert_eq!(id("1.0").as_str(), "1");
        assert_eq!(id("-3.0").as_str(), "-3");
        assert_eq!(id("2.5").as_str(), "2.5");
    }

    #[test]
    fn test_node_id_serializes_as_plain_string() {
        let id = NodeId::new("N001").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""N001""#);
    }

    #[test]
    fn test_latlng_validation() {
        assert!(LatLng::new(-16.409, -71.5375).is_ok());
        assert!(LatLng::new(f64::NAN, 0.0).is_err());
        assert!(LatLng::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_node_kind_from_wire() {
        assert_eq!(NodeKind::from("embalse".to_string()), NodeKind::Reservoir);
        assert_eq!(
            NodeKind::from("punto_critico".to_string()),
            NodeKind::CriticalPoint
        );
        assert_eq!(
            NodeKind::from("distribucion".to_string()),
            NodeKind::Other("distribucion".to_string())
        );
        assert_eq!(NodeKind::default().label(), "Distribution node");
    }

    #[test]
    fn test_node_state_from_wire() {
        assert_eq!(NodeState::from("obstaculo".to_string()), NodeState::Obstacle);
        assert_eq!(NodeState::from("bloqueado".to_string()), NodeState::Blocked);
        assert_eq!(NodeState::from("transitable".to_string()), NodeState::Passable);
        assert_eq!(NodeState::from("whatever".to_string()), NodeState::Passable);
        assert!(NodeState::Obstacle.is_unusable());
        assert!(!NodeState::Passable.is_unusable());
    }

    #[test]
    fn test_node_builders() {
        let node = Node::new(
            NodeId::new("E1").unwrap(),
            NodeKind::Reservoir,
            LatLng::new(-16.35, -71.48).unwrap(),
        )
        .with_capacity(1_000_000.0)
        .with_subtype("represa");

        assert_eq!(node.state, NodeState::Passable);
        assert_eq!(node.capacity, Some(1_000_000.0));
        assert_eq!(node.subtype.as_deref(), Some("represa"));
    }
}
