//! Behavioral tests for the render pipeline, driven through a recording map surface

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use yaku_core::overlay::style::{ACTIVE_ROUTE_RED, IDLE_GRAY, MarkerIcon, NODE_CYAN, RESERVOIR_GREEN};
use yaku_core::wire::decode_process_body;
use yaku_core::{
    LayerKind, LineSpec, MarkerSpec, OverlaySurface, PanelView, PipelineError, PipelinePhase,
    ProcessingError, RenderPipeline,
};

#[derive(Debug, Default)]
struct RecordingSurface {
    markers: Vec<MarkerSpec>,
    connections: Vec<LineSpec>,
    routes: Vec<LineSpec>,
    clears: usize,
}

impl OverlaySurface for RecordingSurface {
    fn clear_layer(&mut self, layer: LayerKind) {
        self.clears += 1;
        match layer {
            LayerKind::Markers => self.markers.clear(),
            LayerKind::Connections => self.connections.clear(),
            LayerKind::Routes => self.routes.clear(),
        }
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        self.markers.push(marker.clone());
    }

    fn add_line(&mut self, layer: LayerKind, line: &LineSpec) {
        match layer {
            LayerKind::Routes => self.routes.push(line.clone()),
            _ => self.connections.push(line.clone()),
        }
    }
}

const SCENARIO: &str = r#"{
    "nodos": [
        {"id": "N1", "tipo": "embalse", "pos": [-16.40, -71.53]},
        {"id": "N2", "tipo": "normal", "pos": [-16.41, -71.54]}
    ],
    "aristas": [{"origen": "N1", "destino": "N2", "estado": "transitable"}],
    "rutas_destacadas": {"N2": ["N1", "N2"]},
    "flujos_maximos": {"N1": 100, "N2": 300},
    "fuente": "N1",
    "tiempo_procesamiento_ms": 12
}"#;

fn run_cycle(body: Result<yaku_core::ProcessResponse, ProcessingError>) -> (RenderPipeline, RecordingSurface) {
    let mut pipeline = RenderPipeline::new();
    let mut surface = RecordingSurface::default();
    pipeline.begin().unwrap();
    pipeline.overlay().flush_to(&mut surface);
    let _ = pipeline.complete(body);
    pipeline.overlay().flush_to(&mut surface);
    (pipeline, surface)
}

// ============================================================================
// SUCCESSFUL CYCLE BEHAVIORS
// ============================================================================

#[test]
fn given_reference_scenario_when_rendered_then_map_and_summary_agree() {
    // Given/When
    let (pipeline, surface) = run_cycle(decode_process_body(200, SCENARIO));

    // Then
    assert_eq!(pipeline.phase(), PipelinePhase::Idle);
    assert_eq!(surface.markers.len(), 2);
    assert_eq!(surface.markers[0].style.color, RESERVOIR_GREEN);
    assert_eq!(surface.markers[0].style.icon, MarkerIcon::Building);
    assert_eq!(surface.markers[1].style.color, NODE_CYAN);
    assert_eq!(surface.markers[1].style.icon, MarkerIcon::Dot);

    assert_eq!(surface.connections.len(), 1);
    assert_eq!(surface.connections[0].style.color, IDLE_GRAY);
    assert_eq!(surface.connections[0].style.dash, None);

    assert_eq!(surface.routes.len(), 1);
    assert_eq!(surface.routes[0].style.color, ACTIVE_ROUTE_RED);

    let PanelView::Results(panel) = pipeline.panel() else {
        panic!("expected results panel, got {:?}", pipeline.panel());
    };
    assert_eq!(panel.source, "N1");
    assert_eq!(panel.summary.active_count, 2);
    assert_eq!(panel.summary.total_count, 2);
    assert!((panel.summary.total_flow - 400.0).abs() < 1e-9);
    let entries: Vec<(&str, f64)> = panel
        .entries
        .iter()
        .map(|e| (e.node.as_str(), e.flow))
        .collect();
    assert_eq!(entries, vec![("N1", 100.0), ("N2", 300.0)]);
    assert_eq!(panel.processing_ms, Some(12.0));
}

#[test]
fn given_routes_without_flow_when_rendered_then_panel_reports_no_active_routes() {
    // Given
    let body = r#"{
        "nodos": [{"id": "N1", "tipo": "embalse", "pos": [-16.40, -71.53]}],
        "aristas": [],
        "rutas_destacadas": [],
        "flujos_maximos": {"N1": 100},
        "fuente": "N1"
    }"#;

    // When
    let (pipeline, surface) = run_cycle(decode_process_body(200, body));

    // Then
    assert_eq!(
        pipeline.panel(),
        &PanelView::NoActiveRoutes {
            source: "N1".to_string()
        }
    );
    assert_eq!(surface.markers.len(), 1);
    assert!(surface.routes.is_empty());
}

#[test]
fn given_scalar_route_payload_when_rendered_then_degrades_to_no_routes() {
    // Given
    let body = r#"{"nodos": [], "aristas": [], "rutas_destacadas": "N1,N2", "flujos_maximos": {}}"#;

    // When
    let (pipeline, surface) = run_cycle(decode_process_body(200, body));

    // Then
    assert_eq!(pipeline.phase(), PipelinePhase::Idle);
    assert!(matches!(pipeline.panel(), PanelView::NoActiveRoutes { .. }));
    assert!(surface.routes.is_empty());
}

#[test]
fn given_dangling_edge_when_rendered_then_only_resolvable_edges_drawn() {
    // Given
    let body = r#"{
        "nodos": [
            {"id": "N1", "tipo": "embalse", "pos": [-16.40, -71.53]},
            {"id": "N2", "tipo": "normal", "pos": [-16.41, -71.54]}
        ],
        "aristas": [
            {"origen": "N1", "destino": "N2"},
            {"origen": "N2", "destino": "GHOST", "estado": "bloqueado"}
        ],
        "rutas_destacadas": {},
        "flujos_maximos": {}
    }"#;

    // When
    let (_, surface) = run_cycle(decode_process_body(200, body));

    // Then
    assert_eq!(surface.connections.len(), 1);
}

// ============================================================================
// FAILURE BEHAVIORS
// ============================================================================

#[test]
fn given_server_error_status_when_completed_then_failed_with_cleared_overlay() {
    // Given/When
    let (pipeline, surface) = run_cycle(decode_process_body(500, r#"{"error": "boom"}"#));

    // Then
    assert_eq!(pipeline.phase(), PipelinePhase::Failed);
    assert_eq!(pipeline.overlay().counts(), [0, 0, 0]);
    assert!(surface.markers.is_empty() && surface.connections.is_empty() && surface.routes.is_empty());
    assert_eq!(
        pipeline.panel(),
        &PanelView::Failed {
            message: "HTTP error! status: 500".to_string()
        }
    );
}

#[test]
fn given_application_error_when_completed_then_message_replaces_summary() {
    // Given/When
    let (pipeline, _) = run_cycle(decode_process_body(
        200,
        r#"{"error": "No reservoirs found in data"}"#,
    ));

    // Then
    assert_eq!(
        pipeline.panel(),
        &PanelView::Failed {
            message: "No reservoirs found in data".to_string()
        }
    );
}

#[test]
fn given_transport_failure_when_completed_then_error_is_returned() {
    // Given
    let mut pipeline = RenderPipeline::new();
    pipeline.begin().unwrap();

    // When
    let result = pipeline.complete(Err(ProcessingError::Transport("offline".to_string())));

    // Then
    assert_eq!(
        result,
        Err(PipelineError::Request(ProcessingError::Transport(
            "offline".to_string()
        )))
    );
    assert!(matches!(pipeline.panel(), PanelView::Failed { .. }));
}

#[test]
fn given_previous_render_when_new_cycle_fails_then_old_overlay_is_gone() {
    // Given
    let mut pipeline = RenderPipeline::new();
    let mut surface = RecordingSurface::default();
    pipeline.begin().unwrap();
    pipeline.complete(decode_process_body(200, SCENARIO)).unwrap();
    pipeline.overlay().flush_to(&mut surface);
    assert_eq!(surface.markers.len(), 2);

    // When
    pipeline.begin().unwrap();
    pipeline.overlay().flush_to(&mut surface);
    let _ = pipeline.complete(Err(ProcessingError::Protocol { status: 502 }));
    pipeline.overlay().flush_to(&mut surface);

    // Then
    assert!(surface.markers.is_empty());
    assert!(surface.routes.is_empty());
}

// ============================================================================
// IN-FLIGHT GUARD BEHAVIORS
// ============================================================================

#[test]
fn given_request_in_flight_when_processing_again_then_rejected_and_state_kept() {
    // Given
    let mut pipeline = RenderPipeline::new();
    pipeline.begin().unwrap();

    // When
    let second = pipeline.begin();

    // Then
    assert_eq!(second, Err(PipelineError::Busy));
    assert_eq!(pipeline.phase(), PipelinePhase::Submitting);
    assert_eq!(pipeline.panel(), &PanelView::Processing);
}

#[test]
fn given_begin_when_flushed_then_every_layer_is_cleared() {
    // Given
    let mut pipeline = RenderPipeline::new();
    let mut surface = RecordingSurface::default();

    // When
    pipeline.begin().unwrap();
    pipeline.overlay().flush_to(&mut surface);

    // Then
    assert_eq!(surface.clears, 3);
}
