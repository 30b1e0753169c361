//! System status card

use leptos::prelude::*;
use yaku_core::SystemStatus;

use crate::state::DashboardState;

#[component]
pub fn StatusPanel(state: DashboardState) -> impl IntoView {
    view! {
        <div class="card mb-3">
            <div class="card-header">"System status"</div>
            <div class="card-body small">
                {move || match state.status.get() {
                    SystemStatus::Operational(summary) => view! {
                        <div>
                            <span class="badge bg-success mb-2">"Operational"</span>
                            <div>{format!("🏛️ Reservoirs: {}", summary.reservoirs)}</div>
                            <div>{format!("⚠️ Critical points: {}", summary.critical_points)}</div>
                            <div>{format!("🔵 Nodes: {}", summary.nodes)}</div>
                            <div>{format!("🔗 Connections: {}", summary.edges)}</div>
                        </div>
                    }
                    .into_any(),
                    SystemStatus::Error { message } => view! {
                        <div>
                            <span class="badge bg-danger">"Error"</span>
                            <div class="mt-2 text-danger">{message}</div>
                        </div>
                    }
                    .into_any(),
                    SystemStatus::Unknown => view! {
                        <span class="badge bg-secondary">"Unknown"</span>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
