//! Map container
//!
//! The Leaflet map is created once the container is in the DOM. Clicking
//! the map copies the coordinates into the add-node form.

use leptos::html::Div;
use leptos::prelude::*;
use tracing::{error, warn};
use wasm_bindgen::JsValue;
use yaku_core::LatLng;
use yaku_core::format::format_coordinate;

use crate::leaflet;
use crate::state::DashboardState;

fn on_map_click(state: DashboardState, position: LatLng) {
    state.node_lat.set(format_coordinate(position.lat));
    state.node_lng.set(format_coordinate(position.lng));
    if let Err(err) = leaflet::show_temporary_marker(
        position,
        "📍 Coordinates copied to the form",
        state.ui().coordinate_marker_ms,
    ) {
        warn!(error = %err, "could not show coordinate marker");
    }
}

#[component]
pub fn MapView(state: DashboardState) -> impl IntoView {
    let container = NodeRef::<Div>::new();
    let (ready, set_ready) = signal(false);

    Effect::new(move |_| {
        let Some(element) = container.get() else {
            return;
        };
        let config = state.config();
        match leaflet::init_map(&JsValue::from(element), &config.map, move |position| {
            on_map_click(state, position);
        }) {
            Ok(()) => {
                set_ready.set(true);
                state.flush_overlay();
            }
            Err(err) => error!(error = %err, "map initialization failed"),
        }
    });

    view! {
        <div class="yaku-map position-relative">
            <Show when=move || !ready.get()>
                <div class="position-absolute top-50 start-50 translate-middle text-muted">
                    "Loading map..."
                </div>
            </Show>
            <div node_ref=container id="map" style="height: 100%; width: 100%;"></div>
        </div>
    }
}
