//! Add-node form

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;
use yaku_core::forms::{NewNodeRequest, next_suggested_id};

use crate::api;
use crate::state::{DashboardState, ToastLevel};

const NODE_KINDS: [(&str, &str); 3] = [
    ("normal", "Distribution node"),
    ("embalse", "Reservoir"),
    ("punto_critico", "Critical point"),
];

const NODE_STATES: [(&str, &str); 3] = [
    ("transitable", "Passable"),
    ("obstaculo", "Obstacle"),
    ("bloqueado", "Blocked"),
];

#[component]
pub fn NodeForm(state: DashboardState) -> impl IntoView {
    let node_id = RwSignal::new(String::new());
    let kind = RwSignal::new(NODE_KINDS[0].0.to_string());
    let node_state = RwSignal::new(NODE_STATES[0].0.to_string());

    let reset = move || {
        node_id.set(String::new());
        state.node_lat.set(String::new());
        state.node_lng.set(String::new());
        kind.set(NODE_KINDS[0].0.to_string());
        node_state.set(NODE_STATES[0].0.to_string());
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = match NewNodeRequest::from_form(
            &node_id.get_untracked(),
            &state.node_lat.get_untracked(),
            &state.node_lng.get_untracked(),
            &kind.get_untracked(),
            &node_state.get_untracked(),
        ) {
            Ok(request) => request,
            Err(err) => {
                state.push_toast(ToastLevel::Danger, format!("❌ Error: {err}"));
                return;
            }
        };

        let api = state.api();
        spawn_local(async move {
            match api::add_node(&api, &request).await {
                Ok(message) => {
                    info!(id = %request.id, %message, "node added");
                    state.push_toast(ToastLevel::Success, "✅ Node added successfully");
                    reset();
                    state.suggested_id.update(|id| *id = next_suggested_id(id));
                    state.refresh_status();
                }
                Err(err) => {
                    warn!(error = %err, "adding node failed");
                    state.push_toast(ToastLevel::Danger, format!("❌ Error: {err}"));
                }
            }
        });
    };

    view! {
        <form class="card mb-3" on:submit=on_submit>
            <div class="card-header">"Add node"</div>
            <div class="card-body">
                <input
                    class="form-control form-control-sm mb-2"
                    placeholder=move || state.suggested_id.get()
                    prop:value=move || node_id.get()
                    on:input=move |ev| node_id.set(event_target_value(&ev))
                />
                <div class="row g-2 mb-2">
                    <div class="col">
                        <input
                            class="form-control form-control-sm"
                            placeholder="Latitude"
                            prop:value=move || state.node_lat.get()
                            on:input=move |ev| state.node_lat.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="col">
                        <input
                            class="form-control form-control-sm"
                            placeholder="Longitude"
                            prop:value=move || state.node_lng.get()
                            on:input=move |ev| state.node_lng.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                <select
                    class="form-select form-select-sm mb-2"
                    prop:value=move || kind.get()
                    on:change=move |ev| kind.set(event_target_value(&ev))
                >
                    {NODE_KINDS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <select
                    class="form-select form-select-sm mb-2"
                    prop:value=move || node_state.get()
                    on:change=move |ev| node_state.set(event_target_value(&ev))
                >
                    {NODE_STATES
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <small class="d-block text-muted mb-2">"Click the map to fill in the coordinates."</small>
                <button type="submit" class="btn btn-sm btn-success w-100">"Add node"</button>
            </div>
        </form>
    }
}
