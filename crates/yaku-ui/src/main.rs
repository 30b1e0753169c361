//! WASM entry point
//!
//! Trunk compiles this binary; it reads the embedded `yaku.toml`, installs
//! the console logger and mounts [`App`].

use leptos::prelude::*;
use tracing::{Level, info, warn};
use yaku_core::DashboardConfig;
use yaku_ui::{App, logging};

const CONFIG: &str = include_str!("../yaku.toml");

fn main() {
    console_error_panic_hook::set_once();

    let parsed = DashboardConfig::from_toml_str(CONFIG);
    let level = parsed
        .as_ref()
        .ok()
        .and_then(|config| config.level().ok())
        .unwrap_or(Level::INFO);
    logging::init(level);

    let config = parsed.unwrap_or_else(|err| {
        warn!(error = %err, "invalid yaku.toml, using defaults");
        DashboardConfig::default()
    });
    info!(api = %config.api.base_url, "starting dashboard");

    mount_to_body(move || view! { <App config=config /> });
}
