//! Shared dashboard state
//!
//! Every field is an arena-backed signal, so the whole struct is `Copy` and
//! can be moved into event handlers and async tasks freely.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use tracing::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use yaku_core::config::{ApiConfig, DashboardConfig, UiConfig};
use yaku_core::{RenderPipeline, SystemStatus};

use crate::api;
use crate::leaflet;

/// Toast color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Danger,
}

impl ToastLevel {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success shadow-sm",
            Self::Danger => "alert alert-danger shadow-sm",
        }
    }
}

/// A transient message in the corner of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct DashboardState {
    config: StoredValue<DashboardConfig>,
    next_toast_id: StoredValue<u64>,
    pub pipeline: RwSignal<RenderPipeline>,
    pub status: RwSignal<SystemStatus>,
    pub toasts: RwSignal<Vec<Toast>>,
    /// Coordinates shared by the add-node form and map clicks
    pub node_lat: RwSignal<String>,
    pub node_lng: RwSignal<String>,
    /// Placeholder of the add-node id field
    pub suggested_id: RwSignal<String>,
    pub generating: RwSignal<bool>,
}

impl DashboardState {
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config: StoredValue::new(config),
            next_toast_id: StoredValue::new(0),
            pipeline: RwSignal::new(RenderPipeline::new()),
            status: RwSignal::new(SystemStatus::Unknown),
            toasts: RwSignal::new(Vec::new()),
            node_lat: RwSignal::new(String::new()),
            node_lng: RwSignal::new(String::new()),
            suggested_id: RwSignal::new("N001".to_string()),
            generating: RwSignal::new(false),
        }
    }

    #[must_use]
    pub fn api(&self) -> ApiConfig {
        self.config.with_value(|config| config.api.clone())
    }

    #[must_use]
    pub fn ui(&self) -> UiConfig {
        self.config.with_value(|config| config.ui)
    }

    #[must_use]
    pub fn config(&self) -> DashboardConfig {
        self.config.get_value()
    }

    /// Shows `message` until `toast_ms` elapses
    pub fn push_toast(self, level: ToastLevel, message: impl Into<String>) {
        let id = self.next_toast_id.with_value(|id| *id);
        self.next_toast_id.update_value(|id| *id += 1);
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                level,
                message: message.into(),
            });
        });

        let toasts = self.toasts;
        Timeout::new(self.ui().toast_ms, move || {
            toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
        })
        .forget();
    }

    pub fn dismiss_toast(self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }

    /// Fetches `/status` and updates the status panel
    pub fn refresh_status(self) {
        let api = self.api();
        spawn_local(async move {
            let status = match api::fetch_status(&api).await {
                Ok(status) => status,
                Err(err) => {
                    warn!(error = %err, "status check failed");
                    SystemStatus::Unknown
                }
            };
            self.status.set(status);
        });
    }

    /// [`Self::refresh_status`] after `status_refresh_delay_ms`
    pub fn refresh_status_later(self) {
        Timeout::new(self.ui().status_refresh_delay_ms, move || self.refresh_status()).forget();
    }

    /// Pushes the pipeline's overlay to the map
    pub fn flush_overlay(self) {
        self.pipeline.with_untracked(|pipeline| {
            match leaflet::with_map(|map| pipeline.overlay().flush_to(map)) {
                Ok(()) => debug!(counts = ?pipeline.overlay().counts(), "overlay flushed"),
                Err(err) => warn!(error = %err, "overlay not drawn"),
            }
        });
    }
}
