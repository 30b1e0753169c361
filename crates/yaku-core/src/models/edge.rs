//! Pipe connection between two nodes

use super::node::NodeId;

/// Whether a connection is usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeState {
    #[default]
    Open,
    Blocked,
}

impl EdgeState {
    /// Value used by the processing backend
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Open => "transitable",
            Self::Blocked => "bloqueado",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Blocked => "Blocked",
        }
    }
}

impl From<String> for EdgeState {
    fn from(raw: String) -> Self {
        if raw == "bloqueado" {
            Self::Blocked
        } else {
            Self::Open
        }
    }
}

/// A pipe between two nodes of the same response
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub origin: NodeId,
    pub destination: NodeId,
    /// Length in kilometres
    pub distance_km: Option<f64>,
    pub state: EdgeState,
    pub capacity: Option<f64>,
}

impl Edge {
    /// Creates an open edge with no distance or capacity
    #[must_use]
    pub fn new(origin: NodeId, destination: NodeId) -> Self {
        Self {
            origin,
            destination,
            distance_km: None,
            state: EdgeState::default(),
            capacity: None,
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: EdgeState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }
}
