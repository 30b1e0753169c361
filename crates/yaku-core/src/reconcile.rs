//! Route reconciliation
//!
//! Turns the highlighted-routes payload into the canonical route list and
//! the table of flows along those routes. A node shared by several routes
//! contributes its flow once, at the position where it is first seen.

use tracing::debug;

use crate::models::{ActiveFlowTable, FlowTable, Route, RoutePayload};

/// Routes and flows of one processing cycle, ready to draw and summarize
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub active: ActiveFlowTable,
    pub routes: Vec<Route>,
}

impl Reconciliation {
    /// True when no route node carries flow
    #[must_use]
    pub fn has_active_routes(&self) -> bool {
        !self.active.is_empty()
    }
}

/// Normalizes `payload` and derives its active flow table.
#[must_use]
pub fn reconcile(payload: RoutePayload, flows: &FlowTable) -> Reconciliation {
    let routes = payload.normalize();
    let active = active_flows(&routes, flows);
    debug!(
        routes = routes.len(),
        active_nodes = active.len(),
        "reconciled highlighted routes"
    );
    Reconciliation { active, routes }
}

/// Walks every route path in order and keeps each node with positive flow once.
#[must_use]
pub fn active_flows(routes: &[Route], flows: &FlowTable) -> ActiveFlowTable {
    let mut active = ActiveFlowTable::new();
    for id in routes.iter().flat_map(|route| route.path.iter()) {
        if let Some(flow) = flows.positive(id.as_str()) {
            active.record(id, flow);
        }
    }
    active
}
