//! Render pipeline state machine
//!
//! `Idle -> Submitting -> Rendering -> Idle`, or `Failed` when the request
//! fails. The pipeline owns the overlay; the UI only flushes it to the map
//! after each transition. A rendered overlay is built off to the side and
//! swapped in whole, so a half-drawn state is never visible.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::error::{PipelineError, ProcessingError};
use crate::models::RoutePayload;
use crate::node_index::NodeIndex;
use crate::overlay::{OverlayState, build_edge_lines_indexed, build_node_markers, build_route_lines};
use crate::panel::{PanelView, ResultsPanel};
use crate::reconcile::{Reconciliation, reconcile};
use crate::summary::{Summary, summarize};
use crate::wire::ProcessResponse;

/// Where the pipeline is in a processing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelinePhase {
    #[default]
    Idle,
    Submitting,
    Rendering,
    Failed,
}

impl PipelinePhase {
    /// A request is in flight; the process button stays disabled
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Submitting | Self::Rendering)
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::Rendering => write!(f, "rendering"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Everything one response renders to
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub overlay: OverlayState,
    pub panel: PanelView,
    pub summary: Summary,
    pub reconciliation: Reconciliation,
}

/// Outcome of a successful cycle, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderReport {
    pub summary: Summary,
    pub markers: usize,
    pub connections: usize,
    pub routes: usize,
}

/// Builds the overlay, summary and panel for one response.
///
/// A route payload in an unknown shape degrades to "no routes".
#[must_use]
pub fn render_response(response: ProcessResponse) -> Rendered {
    let ProcessResponse {
        network,
        highlighted,
        flows,
        source,
        processing_ms,
        processing_id,
    } = response;

    let index = NodeIndex::resolve(&network.nodes);
    let markers = build_node_markers(&network.nodes);
    let connections = build_edge_lines_indexed(&index, &network.edges);
    if connections.len() < network.edges.len() {
        warn!(
            dropped = network.edges.len().saturating_sub(connections.len()),
            "edges with unknown endpoints were not drawn"
        );
    }

    let payload = RoutePayload::from_json(highlighted.as_ref()).unwrap_or_else(|err| {
        warn!(error = %err, "ignoring highlighted routes");
        RoutePayload::default()
    });
    let reconciliation = reconcile(payload, &flows);
    let summary = summarize(&reconciliation.active);
    let routes = build_route_lines(&reconciliation.routes, &index, &flows);

    let panel = if reconciliation.has_active_routes() {
        PanelView::Results(
            ResultsPanel::new(source, &reconciliation.active, summary)
                .with_processing_ms(processing_ms)
                .with_processing_id(processing_id),
        )
    } else {
        PanelView::NoActiveRoutes { source }
    };

    Rendered {
        overlay: OverlayState {
            markers,
            connections,
            routes,
        },
        panel,
        summary,
        reconciliation,
    }
}

/// Owner of the overlay and the results panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPipeline {
    phase: PipelinePhase,
    overlay: OverlayState,
    panel: PanelView,
}

impl RenderPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> PipelinePhase {
        self.phase
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    #[must_use]
    pub const fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    #[must_use]
    pub const fn panel(&self) -> &PanelView {
        &self.panel
    }

    /// Starts a cycle: clears the overlay and shows the processing panel.
    ///
    /// # Errors
    /// Returns [`PipelineError::Busy`] while another cycle is in flight.
    pub fn begin(&mut self) -> Result<(), PipelineError> {
        if self.phase.is_busy() {
            warn!(phase = %self.phase, "rejecting process request while busy");
            return Err(PipelineError::Busy);
        }
        self.phase = PipelinePhase::Submitting;
        self.overlay = OverlayState::new();
        self.panel = PanelView::Processing;
        debug!("processing request submitted");
        Ok(())
    }

    /// Finishes the cycle started by [`Self::begin`].
    ///
    /// # Errors
    /// Returns [`PipelineError::NotSubmitting`] when no cycle is in flight and
    /// [`PipelineError::Request`] when the request failed; the overlay then
    /// stays cleared and the panel shows the error.
    pub fn complete(
        &mut self,
        outcome: Result<ProcessResponse, ProcessingError>,
    ) -> Result<RenderReport, PipelineError> {
        if self.phase != PipelinePhase::Submitting {
            return Err(PipelineError::NotSubmitting);
        }
        match outcome {
            Ok(response) => Ok(self.render(response)),
            Err(err) => {
                self.fail(&err);
                Err(err.into())
            }
        }
    }

    fn render(&mut self, response: ProcessResponse) -> RenderReport {
        self.phase = PipelinePhase::Rendering;
        let processing_id = response.processing_id;
        let rendered = render_response(response);
        let [markers, connections, routes] = rendered.overlay.counts();

        self.overlay = rendered.overlay;
        self.panel = rendered.panel;
        self.phase = PipelinePhase::Idle;

        info!(
            ?processing_id,
            markers,
            connections,
            routes,
            active = rendered.summary.active_count,
            total_flow = rendered.summary.total_flow,
            "processing cycle rendered"
        );
        RenderReport {
            summary: rendered.summary,
            markers,
            connections,
            routes,
        }
    }

    fn fail(&mut self, err: &ProcessingError) {
        error!(kind = err.kind(), error = %err, "processing cycle failed");
        self.overlay = OverlayState::new();
        self.panel = PanelView::Failed {
            message: err.to_string(),
        };
        self.phase = PipelinePhase::Failed;
    }
}
