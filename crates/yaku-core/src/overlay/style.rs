//! Visual styling rules for markers and lines

use crate::models::{EdgeState, NodeKind, NodeState};

/// RGB color representation (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to hex string (#RRGGBB)
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub const RESERVOIR_GREEN: RgbColor = RgbColor::new(0x19, 0x87, 0x54);
pub const CRITICAL_ORANGE: RgbColor = RgbColor::new(0xfd, 0x7e, 0x14);
pub const BLOCKED_RED: RgbColor = RgbColor::new(0xdc, 0x35, 0x45);
pub const NODE_CYAN: RgbColor = RgbColor::new(0x0d, 0xca, 0xf0);
pub const IDLE_GRAY: RgbColor = RgbColor::new(0x6c, 0x75, 0x7d);
pub const ACTIVE_ROUTE_RED: RgbColor = RgbColor::new(0xff, 0x00, 0x00);

/// Glyph drawn next to a node's name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Building,
    Warning,
    Blocked,
    Dot,
}

impl MarkerIcon {
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Building => "🏛️",
            Self::Warning => "⚠️",
            Self::Blocked => "🚫",
            Self::Dot => "🔵",
        }
    }
}

/// Circle marker appearance
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub color: RgbColor,
    pub icon: MarkerIcon,
    pub radius: f64,
    pub class_name: &'static str,
    pub fill_opacity: f64,
    pub weight: f64,
}

/// Polyline appearance
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: RgbColor,
    pub weight: f64,
    pub opacity: f64,
    /// `None` draws a solid line
    pub dash: Option<&'static str>,
}

const LARGE_RADIUS: f64 = 10.0;
const SMALL_RADIUS: f64 = 6.0;

/// Marker appearance by node type, then state.
///
/// Reservoirs and critical points keep their color whatever their state.
#[must_use]
pub fn marker_style(kind: &NodeKind, state: NodeState) -> MarkerStyle {
    let (color, icon, radius, class_name) = match kind {
        NodeKind::Reservoir => (RESERVOIR_GREEN, MarkerIcon::Building, LARGE_RADIUS, "marker-reservoir"),
        NodeKind::CriticalPoint => (CRITICAL_ORANGE, MarkerIcon::Warning, SMALL_RADIUS, "marker-critical"),
        NodeKind::Other(_) if state.is_unusable() => {
            (BLOCKED_RED, MarkerIcon::Blocked, SMALL_RADIUS, "marker-blocked")
        }
        NodeKind::Other(_) => (NODE_CYAN, MarkerIcon::Dot, SMALL_RADIUS, "marker-node"),
    };
    MarkerStyle {
        color,
        icon,
        radius,
        class_name,
        fill_opacity: 0.8,
        weight: 2.0,
    }
}

#[must_use]
pub fn edge_style(state: EdgeState) -> LineStyle {
    match state {
        EdgeState::Blocked => LineStyle {
            color: BLOCKED_RED,
            weight: 3.0,
            opacity: 0.8,
            dash: Some("10, 5"),
        },
        EdgeState::Open => LineStyle {
            color: IDLE_GRAY,
            weight: 2.0,
            opacity: 0.5,
            dash: None,
        },
    }
}

/// Route appearance: carrying flow is solid red, idle is dashed gray
#[must_use]
pub fn route_style(flow: f64) -> LineStyle {
    if flow > 0.0 {
        LineStyle {
            color: ACTIVE_ROUTE_RED,
            weight: 8.0,
            opacity: 1.0,
            dash: None,
        }
    } else {
        LineStyle {
            color: IDLE_GRAY,
            weight: 3.0,
            opacity: 0.8,
            dash: Some("5, 5"),
        }
    }
}
