//! Decoding of backend responses
//!
//! Every endpoint answers with loosely typed JSON. The decoders here apply
//! the request taxonomy in a fixed order: a non-2xx status is a protocol
//! error, an unparseable body is a decode error, and a 2xx body carrying an
//! `error` field is an application error. Individual nodes and edges that do
//! not decode are dropped with a warning instead of failing the response.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ProcessingError;
use crate::models::{Edge, EdgeState, FlowTable, LatLng, Network, Node, NodeId, NodeKind, NodeState};

/// Body of a successful `POST /procesar`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessResponse {
    pub network: Network,
    /// Raw `rutas_destacadas`; shape is resolved by the reconciler
    pub highlighted: Option<Value>,
    pub flows: FlowTable,
    /// Reservoir the routes were computed from
    pub source: String,
    pub processing_ms: Option<f64>,
    pub processing_id: Option<i64>,
}

/// Counts reported by `GET /status`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DataSummary {
    #[serde(rename = "embalses", default)]
    pub reservoirs: u64,
    #[serde(rename = "puntos_criticos", default)]
    pub critical_points: u64,
    #[serde(rename = "nodos", default)]
    pub nodes: u64,
    #[serde(rename = "aristas", default)]
    pub edges: u64,
}

/// What the status panel shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SystemStatus {
    /// No answer yet, or the request failed
    #[default]
    Unknown,
    Operational(DataSummary),
    Error { message: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl WireId {
    fn into_node_id(self) -> Option<NodeId> {
        match self {
            Self::Text(raw) => NodeId::new(raw).ok(),
            Self::Number(raw) => NodeId::from_number(&raw).ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireNode {
    id: WireId,
    #[serde(default)]
    tipo: Option<Value>,
    #[serde(default)]
    estado: Option<Value>,
    #[serde(default)]
    pos: Option<Value>,
    #[serde(default)]
    latitud: Option<Value>,
    #[serde(default)]
    longitud: Option<Value>,
    #[serde(default)]
    capacidad: Option<Value>,
    #[serde(default)]
    subtipo: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct WireEdge {
    origen: WireId,
    destino: WireId,
    #[serde(default)]
    distancia: Option<Value>,
    #[serde(default)]
    estado: Option<Value>,
    #[serde(default)]
    capacidad: Option<Value>,
}

/// Numbers sometimes arrive as strings from CSV-backed endpoints.
fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Display-only text fields come from CSV columns and may arrive as
/// numbers or booleans; they are spelled out rather than rejected.
fn lenient_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(n) => Some(match n.as_f64().filter(|_| n.is_f64()) {
            Some(float) => float.to_string(),
            None => n.to_string(),
        }),
        other => Some(other.to_string()),
    }
}

impl WireNode {
    fn into_node(self) -> Option<Node> {
        let id = self.id.into_node_id()?;
        let pair = self.pos.as_ref().and_then(Value::as_array).map(Vec::as_slice);
        let (lat, lng) = match pair {
            Some([lat, lng, ..]) => (lenient_f64(lat)?, lenient_f64(lng)?),
            _ => (
                lenient_f64(self.latitud.as_ref()?)?,
                lenient_f64(self.longitud.as_ref()?)?,
            ),
        };
        let position = LatLng::new(lat, lng).ok()?;

        let kind = NodeKind::from(lenient_text(self.tipo).unwrap_or_default());
        let mut node = Node::new(id, kind, position)
            .with_state(NodeState::from(lenient_text(self.estado).unwrap_or_default()));
        if let Some(capacity) = self.capacidad.as_ref().and_then(lenient_f64) {
            node = node.with_capacity(capacity);
        }
        if let Some(subtype) = lenient_text(self.subtipo).filter(|s| !s.is_empty()) {
            node = node.with_subtype(subtype);
        }
        Some(node)
    }
}

impl WireEdge {
    fn into_edge(self) -> Option<Edge> {
        let mut edge = Edge::new(self.origen.into_node_id()?, self.destino.into_node_id()?)
            .with_state(EdgeState::from(lenient_text(self.estado).unwrap_or_default()));
        if let Some(distance) = self.distancia.as_ref().and_then(lenient_f64) {
            edge = edge.with_distance(distance);
        }
        if let Some(capacity) = self.capacidad.as_ref().and_then(lenient_f64) {
            edge = edge.with_capacity(capacity);
        }
        Some(edge)
    }
}

fn decode_nodes(raw: Option<&Value>) -> Vec<Node> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let node = serde_json::from_value::<WireNode>(item.clone())
                .ok()
                .and_then(WireNode::into_node);
            if node.is_none() {
                warn!(index, "dropping node without a usable id or position");
            }
            node
        })
        .collect()
}

fn decode_edges(raw: Option<&Value>) -> Vec<Edge> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let edge = serde_json::from_value::<WireEdge>(item.clone())
                .ok()
                .and_then(WireEdge::into_edge);
            if edge.is_none() {
                warn!(index, "dropping edge without usable endpoints");
            }
            edge
        })
        .collect()
}

/// JavaScript truthiness of the `error` field
fn error_message(body: &Map<String, Value>) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn parse_object(body: &str) -> Result<Map<String, Value>, ProcessingError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ProcessingError::Decode("expected a JSON object".to_string())),
        Err(err) => Err(ProcessingError::Decode(err.to_string())),
    }
}

const fn is_success(status: u16) -> bool {
    matches!(status, 200..=299)
}

/// Decodes the answer to `POST /procesar`.
///
/// # Errors
/// [`ProcessingError::Protocol`] for a non-2xx status,
/// [`ProcessingError::Decode`] when the body is not a JSON object and
/// [`ProcessingError::Application`] when it carries an `error` field.
pub fn decode_process_body(status: u16, body: &str) -> Result<ProcessResponse, ProcessingError> {
    if !is_success(status) {
        return Err(ProcessingError::Protocol { status });
    }
    let mut body = parse_object(body)?;
    if let Some(message) = error_message(&body) {
        return Err(ProcessingError::Application(message));
    }

    let network = Network {
        nodes: decode_nodes(body.get("nodos")),
        edges: decode_edges(body.get("aristas")),
    };
    let flows = body
        .get("flujos_maximos")
        .and_then(Value::as_object)
        .map(FlowTable::from_json_map)
        .unwrap_or_default();
    let source = match body.get("fuente") {
        Some(Value::String(source)) => source.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(ProcessResponse {
        network,
        highlighted: body.remove("rutas_destacadas"),
        flows,
        source,
        processing_ms: body.get("tiempo_procesamiento_ms").and_then(lenient_f64),
        processing_id: body.get("procesamiento_id").and_then(Value::as_i64),
    })
}

/// Decodes the answer to `GET /status`.
///
/// The endpoint reports failures in the body with a 500 status, so the
/// status code is not consulted.
///
/// # Errors
/// [`ProcessingError::Decode`] when the body is not a JSON object.
pub fn decode_status_body(body: &str) -> Result<SystemStatus, ProcessingError> {
    let body = parse_object(body)?;
    if body.get("status").and_then(Value::as_str) == Some("ok") {
        let summary = body
            .get("data_summary")
            .cloned()
            .and_then(|raw| serde_json::from_value(raw).ok())
            .unwrap_or_default();
        return Ok(SystemStatus::Operational(summary));
    }
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    Ok(SystemStatus::Error { message })
}

/// Decodes the answer to `POST /api/agregar-nodo`, returning the server message.
///
/// # Errors
/// Same taxonomy as [`decode_process_body`].
pub fn decode_node_added(status: u16, body: &str) -> Result<String, ProcessingError> {
    if !is_success(status) {
        return Err(ProcessingError::Protocol { status });
    }
    let body = parse_object(body)?;
    if let Some(message) = error_message(&body) {
        return Err(ProcessingError::Application(message));
    }
    Ok(body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

/// Decodes a `{status: "success", <field>}` answer regardless of HTTP status.
///
/// Used by the critical-point and network-generation endpoints, which put
/// the outcome in the body. Returns the string under `field`.
///
/// # Errors
/// [`ProcessingError::Application`] carrying the server's `error` when
/// `status` is anything but `"success"`.
pub fn decode_success_body(body: &str, field: &str) -> Result<String, ProcessingError> {
    let body = parse_object(body)?;
    if body.get("status").and_then(Value::as_str) == Some("success") {
        return Ok(body
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string());
    }
    let message = match body.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Null) | None => "undefined".to_string(),
        Some(other) => other.to_string(),
    };
    Err(ProcessingError::Application(message))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    const SCENARIO: &str = r#"{
        "nodos": [
            {"id": "N1", "tipo": "embalse", "pos": [-16.40, -71.53], "capacidad": 5000},
            {"id": "N2", "tipo": "distribucion", "latitud": -16.41, "longitud": -71.54},
            {"id": "N3", "tipo": "distribucion"}
        ],
        "aristas": [
            {"origen": "N1", "destino": "N2", "distancia": 1.234, "estado": "transitable"},
            {"origen": "", "destino": "N2"}
        ],
        "rutas_destacadas": {"N2": ["N1", "N2"]},
        "flujos_maximos": {"N1": 100, "N2": 300},
        "fuente": "N1",
        "rutas_optimas": {"N2": ["N1", "N2"]},
        "procesamiento_id": 17,
        "tiempo_procesamiento_ms": 42.5
    }"#;

    #[test]
    fn test_process_body_decodes_scenario() {
        let response = decode_process_body(200, SCENARIO).unwrap();

        assert_eq!(response.network.nodes.len(), 2);
        assert_eq!(response.network.nodes[0].kind, NodeKind::Reservoir);
        assert_eq!(response.network.nodes[0].capacity, Some(5000.0));
        assert_eq!(response.network.nodes[1].position.lat, -16.41);
        assert_eq!(response.network.edges.len(), 1);
        assert_eq!(response.network.edges[0].distance_km, Some(1.234));
        assert_eq!(response.flows.get("N2"), Some(300.0));
        assert_eq!(response.source, "N1");
        assert_eq!(response.processing_ms, Some(42.5));
        assert_eq!(response.processing_id, Some(17));
        assert!(response.highlighted.is_some());
    }

    #[test]
    fn test_display_fields_of_any_type_keep_the_node() {
        let body = r#"{
            "nodos": [
                {"id": "P1", "tipo": "punto_critico", "subtipo": 5, "pos": [-16.4, -71.5]},
                {"id": 2.0, "tipo": null, "estado": true, "pos": [-16.41, -71.51]},
                {"id": "P3", "subtipo": "hospital", "pos": "broken"}
            ],
            "aristas": [{"origen": "P1", "destino": 2, "estado": 0}]
        }"#;
        let response = decode_process_body(200, body).unwrap();
        let nodes = &response.network.nodes;

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, NodeKind::CriticalPoint);
        assert_eq!(nodes[0].subtype.as_deref(), Some("5"));
        assert_eq!(nodes[1].id.as_str(), "2");
        assert_eq!(nodes[1].state, NodeState::default());
        assert_eq!(response.network.edges.len(), 1);
        assert_eq!(response.network.edges[0].destination.as_str(), "2");
        assert_eq!(response.network.edges[0].state, EdgeState::Open);
    }

    #[test]
    fn test_non_2xx_is_protocol_error_even_with_error_field() {
        let err = decode_process_body(400, r#"{"error": "No reservoirs found in data"}"#)
            .unwrap_err();
        assert_eq!(err, ProcessingError::Protocol { status: 400 });
    }

    #[test]
    fn test_error_field_is_application_error() {
        let err = decode_process_body(200, r#"{"error": "boom"}"#).unwrap_err();
        assert_eq!(err, ProcessingError::Application("boom".to_string()));
    }

    #[test]
    fn test_falsy_error_field_is_ignored() {
        assert!(decode_process_body(200, r#"{"error": null}"#).is_ok());
        assert!(decode_process_body(200, r#"{"error": ""}"#).is_ok());
        assert!(decode_process_body(200, r#"{"error": false}"#).is_ok());
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        let err = decode_process_body(200, "<html>").unwrap_err();
        assert_eq!(err.kind(), "decode");
        let err = decode_process_body(200, "[1, 2]").unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn test_numeric_ids_are_accepted() {
        let response = decode_process_body(
            200,
            r#"{"nodos": [{"id": 7, "tipo": "x", "pos": ["-16.4", "-71.5"]}]}"#,
        )
        .unwrap();
        assert_eq!(response.network.nodes[0].id.as_str(), "7");
        assert_eq!(response.network.nodes[0].position.lat, -16.4);
    }

    #[test]
    fn test_status_ok_reports_counts() {
        let status = decode_status_body(
            r#"{"status": "ok", "data_summary": {"embalses": 3, "puntos_criticos": 5, "nodos": 120, "aristas": 300}}"#,
        )
        .unwrap();
        assert_eq!(
            status,
            SystemStatus::Operational(DataSummary {
                reservoirs: 3,
                critical_points: 5,
                nodes: 120,
                edges: 300,
            })
        );
    }

    #[test]
    fn test_status_error_carries_message() {
        let status = decode_status_body(r#"{"status": "error", "message": "csv missing"}"#).unwrap();
        assert_eq!(
            status,
            SystemStatus::Error {
                message: "csv missing".to_string()
            }
        );
    }

    #[test]
    fn test_node_added_taxonomy() {
        let message = decode_node_added(
            200,
            r#"{"status": "success", "message": "Nodo N101 agregado exitosamente"}"#,
        )
        .unwrap();
        assert_eq!(message, "Nodo N101 agregado exitosamente");

        assert_eq!(
            decode_node_added(500, "{}").unwrap_err(),
            ProcessingError::Protocol { status: 500 }
        );
        assert_eq!(
            decode_node_added(200, r#"{"error": "El ID N1 ya existe"}"#).unwrap_err(),
            ProcessingError::Application("El ID N1 ya existe".to_string())
        );
    }

    #[test]
    fn test_success_body_reads_requested_field() {
        let summary = decode_success_body(
            r#"{"status": "success", "summary": "120 nodos, 5 obstáculos, 300 conexiones"}"#,
            "summary",
        )
        .unwrap();
        assert_eq!(summary, "120 nodos, 5 obstáculos, 300 conexiones");

        let err = decode_success_body(r#"{"error": "script failed"}"#, "summary").unwrap_err();
        assert_eq!(err.to_string(), "script failed");
    }
}
