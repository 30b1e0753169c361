//! Route reconciliation and overlay synthesis for the Yaku water-network map
//!
//! This crate holds everything the dashboard does between receiving a
//! processing response and handing drawable descriptors to the map. It has
//! no browser dependencies and is fully testable natively.
//!
//! ## Pipeline
//! 1. [`wire`] decodes the loosely typed response
//! 2. [`node_index`] maps node ids to coordinates
//! 3. [`overlay`] builds markers, connection lines and route lines
//! 4. [`reconcile`] normalizes highlighted routes and derives active flows
//! 5. [`summary`] aggregates the active flows
//! 6. [`pipeline`] sequences the above and owns the overlay
//!
//! ## Module Structure
//! - `models`: nodes, edges, routes and flow tables
//! - `panel`: results panel view model
//! - `forms`: request bodies for the data-entry forms
//! - `config`: TOML configuration
//! - `error`: error types

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod models;
pub mod node_index;
pub mod overlay;
pub mod panel;
pub mod pipeline;
pub mod reconcile;
pub mod summary;
pub mod wire;

pub use config::DashboardConfig;
pub use error::{DataShapeError, Error, PipelineError, ProcessingError, Result};
pub use format::format_number;
pub use models::{
    ActiveFlowTable, Edge, EdgeState, FlowTable, LatLng, Network, Node, NodeId, NodeKind,
    NodeState, Route, RoutePayload,
};
pub use node_index::NodeIndex;
pub use overlay::{LayerKind, LineSpec, MarkerSpec, OverlayState, OverlaySurface};
pub use panel::{PanelView, ResultsPanel};
pub use pipeline::{PipelinePhase, RenderPipeline, RenderReport};
pub use reconcile::{Reconciliation, reconcile};
pub use summary::{Summary, summarize};
pub use wire::{ProcessResponse, SystemStatus};
