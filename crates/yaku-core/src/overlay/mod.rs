//! Map overlay: descriptors, styling and the surface they are drawn on
//!
//! The overlay is three layers (markers, connections, routes). It is built
//! as plain data and only reaches the map through [`OverlaySurface`], so
//! everything up to the final flush is testable without a browser.

pub mod builder;
pub mod style;

pub use builder::{
    LineSpec, MarkerSpec, build_edge_lines, build_edge_lines_indexed, build_node_markers,
    build_route_lines, route_flow,
};
pub use style::{LineStyle, MarkerIcon, MarkerStyle, RgbColor, edge_style, marker_style, route_style};

/// The three map layers the dashboard owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Markers,
    Connections,
    Routes,
}

impl LayerKind {
    pub const ALL: [Self; 3] = [Self::Markers, Self::Connections, Self::Routes];
}

/// Something overlay descriptors can be drawn on
pub trait OverlaySurface {
    /// Removes everything from one layer
    fn clear_layer(&mut self, layer: LayerKind);

    fn add_marker(&mut self, marker: &MarkerSpec);

    /// Adds a polyline to the connections or routes layer
    fn add_line(&mut self, layer: LayerKind, line: &LineSpec);
}

/// Complete contents of the three layers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    pub markers: Vec<MarkerSpec>,
    pub connections: Vec<LineSpec>,
    pub routes: Vec<LineSpec>,
}

impl OverlayState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements on each layer, in [`LayerKind::ALL`] order
    #[must_use]
    pub fn counts(&self) -> [usize; 3] {
        [self.markers.len(), self.connections.len(), self.routes.len()]
    }

    /// Replaces whatever the surface shows with this state.
    ///
    /// Every layer is cleared first, so an empty state clears the map.
    pub fn flush_to<S: OverlaySurface + ?Sized>(&self, surface: &mut S) {
        for layer in LayerKind::ALL {
            surface.clear_layer(layer);
        }
        for marker in &self.markers {
            surface.add_marker(marker);
        }
        for line in &self.connections {
            surface.add_line(LayerKind::Connections, line);
        }
        for line in &self.routes {
            surface.add_line(LayerKind::Routes, line);
        }
    }
}
