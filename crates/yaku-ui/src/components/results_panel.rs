//! Results panel: active flows, summary card and failures

use leptos::prelude::*;
use yaku_core::panel::{FlowEntry, ResultsPanel};
use yaku_core::PanelView;

use crate::state::DashboardState;

fn flow_badge(entry: &FlowEntry) -> impl IntoView + use<> {
    view! {
        <div class="mb-3 p-2 border rounded">
            <span class="badge bg-primary">{entry.node.to_string()}</span>
            <span class="float-end">{entry.flow_label()}</span>
        </div>
    }
}

fn results_view(panel: ResultsPanel) -> impl IntoView {
    let columns = panel
        .rows()
        .map(|pair| {
            let badges = pair.iter().map(flow_badge).collect_view();
            view! { <div class="col-md-6">{badges}</div> }
        })
        .collect_view();
    let processing = panel.processing_label();

    view! {
        <div class="alert alert-success">
            "Processing completed from " <strong>{panel.source.clone()}</strong>
        </div>
        <h5 class="mt-4 mb-3">"Maximum flows"</h5>
        <div class="row">{columns}</div>
        <div class="card mt-4">
            <div class="card-header bg-primary text-white">"Summary"</div>
            <div class="card-body">
                <div class="row">
                    <div class="col-6 text-center">
                        <div class="h4">{panel.summary.ratio_label()}</div>
                        <small class="text-muted">"Active routes"</small>
                    </div>
                    <div class="col-6 text-center">
                        <div class="h4">{panel.summary.total_flow_label()}</div>
                        <small class="text-muted">"Total flow"</small>
                    </div>
                </div>
            </div>
        </div>
        {processing.map(|label| view! { <p class="small text-muted mt-2">{label}</p> })}
    }
}

#[component]
pub fn ResultsPanelView(state: DashboardState) -> impl IntoView {
    let panel = Memo::new(move |_| state.pipeline.with(|pipeline| pipeline.panel().clone()));

    view! {
        <div id="results">
            {move || match panel.get() {
                PanelView::Idle => view! {
                    <p class="text-muted small">"Press Process to compute optimal routes."</p>
                }
                .into_any(),
                PanelView::Processing => view! {
                    <p class="text-muted small">"Processing data..."</p>
                }
                .into_any(),
                PanelView::Results(results) => results_view(results).into_any(),
                PanelView::NoActiveRoutes { .. } => view! {
                    <div class="alert alert-warning">"No active routes to show."</div>
                }
                .into_any(),
                PanelView::Failed { message } => view! {
                    <div class="alert alert-danger">
                        <strong>"Error: "</strong>
                        {message}
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
