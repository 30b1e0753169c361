//! Marker and line descriptors for one processing response

use html_escape::encode_text;
use itertools::Itertools;
use tracing::debug;

use super::style::{LineStyle, MarkerStyle, edge_style, marker_style, route_style};
use crate::format::{format_coordinate, format_number};
use crate::models::{Edge, FlowTable, LatLng, Node, NodeId, Route};
use crate::node_index::NodeIndex;

/// A circle marker for one node
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// Explicit id tag; absent on markers that did not come from a node list
    pub node_id: Option<NodeId>,
    /// Display title tag
    pub title: Option<String>,
    pub position: LatLng,
    pub style: MarkerStyle,
    /// HTML popup body
    pub popup: String,
}

/// A polyline for a connection or a route
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    pub points: Vec<LatLng>,
    pub style: LineStyle,
    /// HTML popup body
    pub popup: String,
}

fn node_popup(node: &Node, style: &MarkerStyle) -> String {
    let mut rows = vec![
        format!("<div><strong>Type:</strong> {}</div>", encode_text(node.kind.label())),
        format!("<div><strong>State:</strong> {}</div>", node.state.label()),
    ];
    if let Some(capacity) = node.capacity.filter(|c| *c != 0.0) {
        rows.push(format!(
            "<div><strong>Capacity:</strong> {} m³</div>",
            format_number(capacity)
        ));
    }
    if let Some(subtype) = &node.subtype {
        rows.push(format!(
            "<div><strong>Subtype:</strong> {}</div>",
            encode_text(subtype)
        ));
    }
    rows.push(format!(
        "<div><strong>Coordinates:</strong> {}, {}</div>",
        format_coordinate(node.position.lat),
        format_coordinate(node.position.lng)
    ));

    format!(
        r#"<div class="p-2"><h6 class="mb-2">{} {}</h6><div class="small">{}</div></div>"#,
        style.icon.glyph(),
        encode_text(node.id.as_str()),
        rows.concat()
    )
}

fn edge_popup(edge: &Edge) -> String {
    let distance = edge
        .distance_km
        .map_or_else(|| "N/A".to_string(), |d| format!("{d:.2}"));
    let capacity = edge
        .capacity
        .filter(|c| *c != 0.0)
        .map_or_else(|| "N/A".to_string(), format_number);
    format!(
        concat!(
            r#"<div class="p-2"><h6 class="mb-2">🔗 Connection</h6><div class="small">"#,
            "<div><strong>Origin:</strong> {}</div>",
            "<div><strong>Destination:</strong> {}</div>",
            "<div><strong>Distance:</strong> {} km</div>",
            "<div><strong>State:</strong> {}</div>",
            "<div><strong>Capacity:</strong> {}</div>",
            "</div></div>"
        ),
        encode_text(edge.origin.as_str()),
        encode_text(edge.destination.as_str()),
        distance,
        edge.state.label(),
        capacity
    )
}

fn route_popup(route: &Route) -> String {
    let path = route
        .path
        .iter()
        .map(|id| encode_text(id.as_str()))
        .join(" → ");
    let mut popup = format!(
        "<b>Optimal route {} → {}</b><br>{}",
        encode_text(route.start.as_str()),
        encode_text(route.end.as_str()),
        path
    );
    if let Some(max_flow) = route.max_flow {
        popup.push_str(&format!(
            "<br><b>Max flow:</b> {} units/h",
            format_number(max_flow)
        ));
    }
    popup
}

/// One marker per node, in input order
#[must_use]
pub fn build_node_markers(nodes: &[Node]) -> Vec<MarkerSpec> {
    nodes
        .iter()
        .map(|node| {
            let style = marker_style(&node.kind, node.state);
            MarkerSpec {
                node_id: Some(node.id.clone()),
                title: Some(node.id.to_string()),
                position: node.position,
                popup: node_popup(node, &style),
                style,
            }
        })
        .collect()
}

/// One line per edge whose endpoints are both among `nodes`, in input order
#[must_use]
pub fn build_edge_lines(nodes: &[Node], edges: &[Edge]) -> Vec<LineSpec> {
    build_edge_lines_indexed(&NodeIndex::resolve(nodes), edges)
}

/// Same as [`build_edge_lines`] against an index that is already built
#[must_use]
pub fn build_edge_lines_indexed(index: &NodeIndex, edges: &[Edge]) -> Vec<LineSpec> {
    edges
        .iter()
        .filter_map(|edge| {
            let (Some(origin), Some(destination)) = (
                index.get(edge.origin.as_str()),
                index.get(edge.destination.as_str()),
            ) else {
                debug!(
                    origin = %edge.origin,
                    destination = %edge.destination,
                    "skipping edge with an unknown endpoint"
                );
                return None;
            };
            Some(LineSpec {
                points: vec![origin, destination],
                style: edge_style(edge.state),
                popup: edge_popup(edge),
            })
        })
        .collect()
}

/// Flow a route is drawn with: its own max flow, else the flow at its end node
#[must_use]
pub fn route_flow(route: &Route, flows: &FlowTable) -> f64 {
    route
        .max_flow
        .or_else(|| flows.get(route.end.as_str()))
        .unwrap_or(0.0)
}

/// One polyline per route with at least two resolvable path nodes
#[must_use]
pub fn build_route_lines(routes: &[Route], index: &NodeIndex, flows: &FlowTable) -> Vec<LineSpec> {
    routes
        .iter()
        .filter(|route| route.is_drawable())
        .filter_map(|route| {
            let points: Vec<LatLng> = route
                .path
                .iter()
                .filter_map(|id| index.get(id.as_str()))
                .collect();
            if points.len() < 2 {
                debug!(start = %route.start, end = %route.end, "route has too few known nodes to draw");
                return None;
            }
            Some(LineSpec {
                points,
                style: route_style(route_flow(route, flows)),
                popup: route_popup(route),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{EdgeState, NodeKind, NodeState};
    use crate::overlay::style::{ACTIVE_ROUTE_RED, BLOCKED_RED, IDLE_GRAY, MarkerIcon};

    fn id(raw: &str) -> NodeId {
        NodeId::new(raw).unwrap()
    }

    fn node(raw: &str, kind: NodeKind, lat: f64, lng: f64) -> Node {
        Node::new(id(raw), kind, LatLng::new(lat, lng).unwrap())
    }

    fn sample_nodes() -> Vec<Node> {
        vec![
            node("N1", NodeKind::Reservoir, -16.40, -71.53),
            node("N2", NodeKind::default(), -16.41, -71.54),
            node("N3", NodeKind::default(), -16.42, -71.55).with_state(NodeState::Obstacle),
        ]
    }

    #[test]
    fn test_markers_carry_id_and_title_tags() {
        let markers = build_node_markers(&sample_nodes());
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].node_id.as_ref().map(NodeId::as_str), Some("N1"));
        assert_eq!(markers[0].title.as_deref(), Some("N1"));
        assert_eq!(markers[0].style.icon, MarkerIcon::Building);
        assert_eq!(markers[2].style.color, BLOCKED_RED);
    }

    #[test]
    fn test_node_popup_contents() {
        let nodes = vec![
            node("E<1>", NodeKind::Reservoir, -16.35, -71.48)
                .with_capacity(1_500_000.0)
                .with_subtype("represa"),
        ];
        let popup = &build_node_markers(&nodes)[0].popup;
        assert!(popup.contains("🏛️ E&lt;1&gt;"));
        assert!(popup.contains("1,500,000 m³"));
        assert!(popup.contains("represa"));
        assert!(popup.contains("-16.3500, -71.4800"));
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let edges = vec![
            Edge::new(id("N1"), id("N2")),
            Edge::new(id("N1"), id("N9")),
            Edge::new(id("N2"), id("N3")).with_state(EdgeState::Blocked),
        ];
        let lines = build_edge_lines(&sample_nodes(), &edges);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].style.color, IDLE_GRAY);
        assert_eq!(lines[1].style.dash, Some("10, 5"));
    }

    #[test]
    fn test_edge_popup_placeholders() {
        let lines = build_edge_lines(&sample_nodes(), &[Edge::new(id("N1"), id("N2"))]);
        assert!(lines[0].popup.contains("N/A km"));
        assert!(lines[0].popup.contains("<strong>Capacity:</strong> N/A"));

        let lines = build_edge_lines(
            &sample_nodes(),
            &[Edge::new(id("N1"), id("N2")).with_distance(1.2345).with_capacity(800.0)],
        );
        assert!(lines[0].popup.contains("1.23 km"));
        assert!(lines[0].popup.contains("<strong>Capacity:</strong> 800"));
    }

    #[test]
    fn test_route_flow_prefers_max_flow() {
        let flows: FlowTable = [(id("N2"), 300.0)].into_iter().collect();
        let route = Route::from_path(vec![id("N1"), id("N2")]).unwrap();
        assert!((route_flow(&route, &flows) - 300.0).abs() < f64::EPSILON);

        let route = route.with_max_flow(50.0);
        assert!((route_flow(&route, &flows) - 50.0).abs() < f64::EPSILON);

        let route = Route::from_path(vec![id("N1"), id("N3")]).unwrap();
        assert!(route_flow(&route, &flows).abs() < f64::EPSILON);
    }

    #[test]
    fn test_route_lines_need_two_known_points() {
        let index = NodeIndex::resolve(&sample_nodes());
        let flows: FlowTable = [(id("N2"), 300.0)].into_iter().collect();
        let routes = vec![
            Route::from_path(vec![id("N1"), id("N2")]).unwrap(),
            Route::from_path(vec![id("N1"), id("X"), id("Y")]).unwrap(),
            Route::from_path(vec![id("N1")]).unwrap(),
            Route::from_path(vec![id("N1"), id("X"), id("N3")]).unwrap(),
        ];
        let lines = build_route_lines(&routes, &index, &flows);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].style.color, ACTIVE_ROUTE_RED);
        assert_eq!(lines[1].points.len(), 2);
        assert_eq!(lines[1].style.dash, Some("5, 5"));
    }

    #[test]
    fn test_route_popup_lists_path_and_flow() {
        let index = NodeIndex::resolve(&sample_nodes());
        let route = Route::from_path(vec![id("N1"), id("N2"), id("N3")])
            .unwrap()
            .with_max_flow(1250.5);
        let lines = build_route_lines(&[route], &index, &FlowTable::new());
        let popup = &lines[0].popup;
        assert!(popup.contains("Optimal route N1 → N3"));
        assert!(popup.contains("N1 → N2 → N3"));
        assert!(popup.contains("Max flow:</b> 1,250.5 units/h"));
    }
}
