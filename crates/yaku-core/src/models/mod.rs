//! Data models for one processing cycle of the water network

pub mod edge;
pub mod flow;
pub mod node;
pub mod route;

pub use edge::{Edge, EdgeState};
pub use flow::{ActiveFlowTable, FlowTable};
pub use node::{LatLng, Node, NodeId, NodeKind, NodeState};
pub use route::{Route, RoutePayload};

/// Nodes and edges of one processing response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}
