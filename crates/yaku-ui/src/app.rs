//! Root component
//!
//! Sidebar with the status card, the process and generate buttons, the
//! results panel and both forms; the map fills the rest of the screen.

use leptos::prelude::*;
use tracing::{error, info, warn};
use wasm_bindgen_futures::spawn_local;
use yaku_core::{DashboardConfig, PipelineError, ProcessingError};

use crate::api;
use crate::components::{
    CriticalPointForm, MapView, NodeForm, ResultsPanelView, StatusPanel, Toasts,
};
use crate::state::{DashboardState, ToastLevel};

/// Runs one processing cycle and pushes each transition to the map
fn run_processing(state: DashboardState) {
    match state.pipeline.try_update(|pipeline| pipeline.begin()) {
        Some(Ok(())) => {}
        Some(Err(err)) => {
            warn!(error = %err, "process request ignored");
            return;
        }
        None => return,
    }
    state.flush_overlay();

    let api = state.api();
    spawn_local(async move {
        let outcome = api::process(&api).await;
        let report = state
            .pipeline
            .try_update(|pipeline| pipeline.complete(outcome));
        state.flush_overlay();
        match report {
            Some(Ok(report)) => info!(
                active = report.summary.active_count,
                routes = report.routes,
                "results shown"
            ),
            Some(Err(PipelineError::Request(err))) => warn!(kind = err.kind(), "results cleared"),
            Some(Err(err)) => error!(error = %err, "processing cycle out of order"),
            None => {}
        }
    });
}

fn generation_failure(err: &ProcessingError) -> String {
    match err {
        ProcessingError::Application(message) => format!("❌ Error: {message}"),
        _ => "❌ Connection error while generating the network".to_string(),
    }
}

fn run_generation(state: DashboardState) {
    if state.generating.get_untracked() {
        return;
    }
    state.generating.set(true);

    let api = state.api();
    spawn_local(async move {
        match api::generate_network(&api).await {
            Ok(summary) => {
                info!(%summary, "network generated");
                state.push_toast(
                    ToastLevel::Success,
                    format!("✅ Complete network generated: {summary}"),
                );
                state.refresh_status_later();
            }
            Err(err) => {
                error!(error = %err, "network generation failed");
                state.push_toast(ToastLevel::Danger, generation_failure(&err));
            }
        }
        state.generating.set(false);
    });
}

/// Dashboard root, mounted by `main`
#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let state = DashboardState::new(config);
    Effect::new(move |_| state.refresh_status());

    let busy = move || state.pipeline.with(|pipeline| pipeline.is_busy());

    view! {
        <div class="yaku-layout">
            <aside class="yaku-sidebar p-3">
                <h4 class="mb-3">"💧 Yaku"</h4>
                <StatusPanel state=state />
                <div class="d-grid gap-2 mb-3">
                    <button
                        class="btn btn-primary"
                        disabled=busy
                        on:click=move |_| run_processing(state)
                    >
                        {move || if busy() { "Processing..." } else { "Process" }}
                    </button>
                    <button
                        class="btn btn-outline-secondary"
                        disabled=move || state.generating.get()
                        on:click=move |_| run_generation(state)
                    >
                        {move || {
                            if state.generating.get() {
                                "Generating..."
                            } else {
                                "Generate complete network"
                            }
                        }}
                    </button>
                </div>
                <ResultsPanelView state=state />
                <hr />
                <NodeForm state=state />
                <CriticalPointForm state=state />
            </aside>
            <MapView state=state />
            <Toasts state=state />
        </div>
    }
}
