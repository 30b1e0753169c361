//! Highlighted routes and the two payload shapes they arrive in
//!
//! The backend has shipped routes both as a mapping keyed by destination
//! (`{"N7": ["E1", "N3", "N7"]}`) and as a list of route records
//! (`[{"inicio": "E1", "fin": "N7", "ruta": [...], "flujo_maximo": 120.0}]`).
//! [`RoutePayload`] models both and [`RoutePayload::normalize`] is the only
//! place that turns either into the canonical `Vec<Route>`.

use serde_json::Value;

use super::node::NodeId;
use crate::error::DataShapeError;

/// An ordered path through the network
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub start: NodeId,
    pub end: NodeId,
    /// Never empty
    pub path: Vec<NodeId>,
    /// Display-only metadata for the route popup
    pub max_flow: Option<f64>,
}

impl Route {
    /// Builds a route from a path, taking the endpoints from the path itself.
    ///
    /// Returns `None` for an empty path.
    #[must_use]
    pub fn from_path(path: Vec<NodeId>) -> Option<Self> {
        let start = path.first()?.clone();
        let end = path.last()?.clone();
        Some(Self {
            start,
            end,
            path,
            max_flow: None,
        })
    }

    #[must_use]
    pub fn with_endpoints(mut self, start: NodeId, end: NodeId) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    #[must_use]
    pub fn with_max_flow(mut self, max_flow: f64) -> Self {
        self.max_flow = Some(max_flow);
        self
    }

    /// A single-node route has no segment to draw
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.path.len() > 1
    }
}

/// Highlighted routes in either of the shapes the backend produces
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePayload {
    /// Legacy shape: destination id -> path, in document order. A key that
    /// is not a usable id is `None`; the path's last node stands in for it.
    ByDestination(Vec<(Option<NodeId>, Vec<NodeId>)>),
    /// Current shape: full route records
    AsList(Vec<Route>),
}

impl Default for RoutePayload {
    fn default() -> Self {
        Self::AsList(Vec::new())
    }
}

impl RoutePayload {
    /// Decodes the raw `rutas_destacadas` value.
    ///
    /// Absent or `null` is an empty payload. Entries whose path is not a
    /// sequence are skipped, as are path elements that are not ids. A blank
    /// mapping key does not drop its path.
    ///
    /// # Errors
    /// Returns [`DataShapeError`] when the value is neither an object nor an array.
    pub fn from_json(raw: Option<&Value>) -> Result<Self, DataShapeError> {
        match raw {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) => Ok(Self::ByDestination(
                map.iter()
                    .filter_map(|(destination, path)| {
                        let path = path.as_array().map(|items| decode_path(items))?;
                        Some((NodeId::new(destination.as_str()).ok(), path))
                    })
                    .collect(),
            )),
            Some(Value::Array(items)) => Ok(Self::AsList(
                items.iter().filter_map(decode_route_record).collect(),
            )),
            Some(Value::Bool(_)) => Err(DataShapeError { found: "boolean" }),
            Some(Value::Number(_)) => Err(DataShapeError { found: "number" }),
            Some(Value::String(_)) => Err(DataShapeError { found: "string" }),
        }
    }

    /// True when there is nothing to reconcile
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::ByDestination(entries) => entries.is_empty(),
            Self::AsList(routes) => routes.is_empty(),
        }
    }

    /// Canonical ordered route list.
    ///
    /// Mapping entries become one route each, in mapping order, with the
    /// key as the end node when it is a usable id. Empty paths are dropped.
    #[must_use]
    pub fn normalize(self) -> Vec<Route> {
        match self {
            Self::ByDestination(entries) => entries
                .into_iter()
                .filter_map(|(destination, path)| {
                    Route::from_path(path).map(|route| match destination {
                        Some(end) => {
                            let start = route.start.clone();
                            route.with_endpoints(start, end)
                        }
                        None => route,
                    })
                })
                .collect(),
            Self::AsList(routes) => routes
                .into_iter()
                .filter(|route| !route.path.is_empty())
                .collect(),
        }
    }
}

/// Path elements may be strings or bare numbers; anything else is skipped.
fn decode_path(items: &[Value]) -> Vec<NodeId> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(id) => NodeId::new(id.as_str()).ok(),
            Value::Number(id) => NodeId::from_number(id).ok(),
            _ => None,
        })
        .collect()
}

fn decode_route_record(item: &Value) -> Option<Route> {
    let record = item.as_object()?;
    let path = decode_path(record.get("ruta")?.as_array()?);
    let mut route = Route::from_path(path)?;

    let endpoint = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_str)
            .and_then(|id| NodeId::new(id).ok())
    };
    if let Some(start) = endpoint("inicio") {
        route.start = start;
    }
    if let Some(end) = endpoint("fin") {
        route.end = end;
    }
    if let Some(max_flow) = record.get("flujo_maximo").and_then(Value::as_f64) {
        route = route.with_max_flow(max_flow);
    }
    Some(route)
}
