//! Leptos 0.7 CSR dashboard for the Yaku water-distribution map
//!
//! Renders the processed network on a Leaflet map and keeps the sidebar
//! panels in sync with the backend. All reconciliation and overlay logic
//! lives in `yaku-core`; this crate only moves data between the backend,
//! the signals and the map.
//!
//! ## Module Structure
//! - `app`: Root component and the process/generate actions
//! - `api`: HTTP calls to the backend
//! - `components`: Sidebar panels, forms, toasts and the map container
//! - `leaflet`: Leaflet bindings through `js_sys::Reflect`
//! - `logging`: `tracing` subscriber writing to the browser console
//! - `state`: Signals shared by the components
//! - `error`: UI error type

#![forbid(unsafe_code)]

pub mod api;
pub mod app;
pub mod components;
pub mod error;
pub mod leaflet;
pub mod logging;
pub mod state;

pub use app::App;
