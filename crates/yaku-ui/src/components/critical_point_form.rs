//! Add-critical-point form

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use tracing::{error, info};
use wasm_bindgen_futures::spawn_local;
use yaku_core::ProcessingError;
use yaku_core::forms::NewCriticalPointRequest;

use crate::api;
use crate::state::{DashboardState, ToastLevel};

const POINT_KINDS: [(&str, &str); 4] = [
    ("hospital", "Hospital"),
    ("colegio", "School"),
    ("mercado", "Market"),
    ("otro", "Other"),
];

const PRIORITIES: [(&str, &str); 3] = [("alta", "High"), ("media", "Medium"), ("baja", "Low")];

/// Toast text for a failed submission
fn failure_message(err: &ProcessingError) -> String {
    match err {
        ProcessingError::Application(message) => format!("Error: {message}"),
        _ => "Connection error while adding the critical point".to_string(),
    }
}

#[component]
pub fn CriticalPointForm(state: DashboardState) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let lat = RwSignal::new(String::new());
    let lng = RwSignal::new(String::new());
    let kind = RwSignal::new(POINT_KINDS[0].0.to_string());
    let priority = RwSignal::new(PRIORITIES[0].0.to_string());
    let population = RwSignal::new(String::new());

    let reset = move || {
        name.set(String::new());
        lat.set(String::new());
        lng.set(String::new());
        kind.set(POINT_KINDS[0].0.to_string());
        priority.set(PRIORITIES[0].0.to_string());
        population.set(String::new());
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = match NewCriticalPointRequest::from_form(
            &name.get_untracked(),
            &lat.get_untracked(),
            &lng.get_untracked(),
            &kind.get_untracked(),
            &priority.get_untracked(),
            &population.get_untracked(),
        ) {
            Ok(request) => request,
            Err(err) => {
                state.push_toast(ToastLevel::Danger, format!("Error: {err}"));
                return;
            }
        };

        let api = state.api();
        spawn_local(async move {
            match api::add_critical_point(&api, &request).await {
                Ok(message) => {
                    info!(name = %request.name, "critical point added");
                    state.push_toast(ToastLevel::Success, message);
                    reset();
                    state.refresh_status_later();
                }
                Err(err) => {
                    error!(error = %err, "adding critical point failed");
                    state.push_toast(ToastLevel::Danger, failure_message(&err));
                }
            }
        });
    };

    let text_input = move |placeholder: &'static str, value: RwSignal<String>| {
        view! {
            <input
                class="form-control form-control-sm mb-2"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <form class="card mb-3" on:submit=on_submit>
            <div class="card-header">"Add critical point"</div>
            <div class="card-body">
                {text_input("Name", name)}
                {text_input("Latitude", lat)}
                {text_input("Longitude", lng)}
                <select
                    class="form-select form-select-sm mb-2"
                    prop:value=move || kind.get()
                    on:change=move |ev| kind.set(event_target_value(&ev))
                >
                    {POINT_KINDS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <select
                    class="form-select form-select-sm mb-2"
                    prop:value=move || priority.get()
                    on:change=move |ev| priority.set(event_target_value(&ev))
                >
                    {PRIORITIES
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                {text_input("Affected population", population)}
                <button type="submit" class="btn btn-sm btn-warning w-100">"Add critical point"</button>
            </div>
        </form>
    }
}
