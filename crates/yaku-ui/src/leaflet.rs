//! Leaflet bridge
//!
//! Leaflet is loaded as a global script, so it is reached at runtime through
//! `window.L` with `js_sys::Reflect`. The map and its three layer groups live
//! in a thread-local; the render pipeline reaches them through
//! [`OverlaySurface`].

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yaku_core::config::MapConfig;
use yaku_core::{LayerKind, LatLng, LineSpec, MarkerSpec, OverlaySurface};

use crate::error::{Result, UiError};

thread_local! {
    static MAP: RefCell<Option<LeafletMap>> = const { RefCell::new(None) };
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleMarkerOptions<'a> {
    radius: f64,
    color: &'a str,
    fill_color: &'a str,
    fill_opacity: f64,
    weight: f64,
    class_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolylineOptions<'a> {
    color: &'a str,
    weight: f64,
    opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    dash_array: Option<&'a str>,
}

#[derive(Serialize)]
struct TileOptions<'a> {
    attribution: &'a str,
}

fn leaflet() -> Result<JsValue> {
    let window = web_sys::window().ok_or(UiError::LeafletMissing)?;
    let leaflet = Reflect::get(&window, &JsValue::from_str("L")).map_err(|_| UiError::LeafletMissing)?;
    if leaflet.is_undefined() {
        return Err(UiError::LeafletMissing);
    }
    Ok(leaflet)
}

/// Calls `target[name](...args)`
fn call(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue> {
    let method = Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| UiError::map_call(name, format!("{e:?}")))?;
    let method = method
        .dyn_ref::<Function>()
        .ok_or_else(|| UiError::map_call(name, "not a function"))?;
    let args: Array = args.iter().collect();
    method
        .apply(target, &args)
        .map_err(|e| UiError::map_call(name, format!("{e:?}")))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| UiError::Serialization(e.to_string()))
}

fn lat_lng(position: LatLng) -> Result<JsValue> {
    to_js(&position.as_pair())
}

/// The map and the layer group behind each [`LayerKind`]
#[derive(Debug, Clone)]
pub struct LeafletMap {
    leaflet: JsValue,
    map: JsValue,
    markers: JsValue,
    connections: JsValue,
    routes: JsValue,
}

impl LeafletMap {
    fn create(container: &JsValue, config: &MapConfig) -> Result<Self> {
        let leaflet = leaflet()?;
        let map = call(&leaflet, "map", &[container.clone()])?;
        call(
            &map,
            "setView",
            &[
                to_js(&[config.center_lat, config.center_lng])?,
                JsValue::from(config.zoom),
            ],
        )?;

        let tiles = call(
            &leaflet,
            "tileLayer",
            &[
                JsValue::from_str(&config.tile_url),
                to_js(&TileOptions {
                    attribution: &config.attribution,
                })?,
            ],
        )?;
        call(&tiles, "addTo", &[map.clone()])?;

        let group = || -> Result<JsValue> {
            let layer = call(&leaflet, "layerGroup", &[])?;
            call(&layer, "addTo", &[map.clone()])?;
            Ok(layer)
        };
        let markers = group()?;
        let connections = group()?;
        let routes = group()?;

        Ok(Self {
            leaflet,
            map,
            markers,
            connections,
            routes,
        })
    }

    const fn layer(&self, kind: LayerKind) -> &JsValue {
        match kind {
            LayerKind::Markers => &self.markers,
            LayerKind::Connections => &self.connections,
            LayerKind::Routes => &self.routes,
        }
    }

    fn try_add_marker(&self, marker: &MarkerSpec) -> Result<()> {
        let color = marker.style.color.to_hex();
        let options = CircleMarkerOptions {
            radius: marker.style.radius,
            color: &color,
            fill_color: &color,
            fill_opacity: marker.style.fill_opacity,
            weight: marker.style.weight,
            class_name: marker.style.class_name,
            title: marker.title.as_deref(),
            node_id: marker.node_id.as_ref().map(|id| id.as_str()),
        };
        let circle = call(
            &self.leaflet,
            "circleMarker",
            &[lat_lng(marker.position)?, to_js(&options)?],
        )?;
        call(&circle, "bindPopup", &[JsValue::from_str(&marker.popup)])?;
        call(&self.markers, "addLayer", &[circle])?;
        Ok(())
    }

    fn try_add_line(&self, kind: LayerKind, line: &LineSpec) -> Result<()> {
        let color = line.style.color.to_hex();
        let options = PolylineOptions {
            color: &color,
            weight: line.style.weight,
            opacity: line.style.opacity,
            dash_array: line.style.dash,
        };
        let points: Vec<[f64; 2]> = line.points.iter().map(|p| p.as_pair()).collect();
        let polyline = call(&self.leaflet, "polyline", &[to_js(&points)?, to_js(&options)?])?;
        call(&polyline, "bindPopup", &[JsValue::from_str(&line.popup)])?;
        call(self.layer(kind), "addLayer", &[polyline])?;
        Ok(())
    }

    /// Drops a plain marker at `position` and removes it after `duration_ms`
    fn show_temporary_marker(&self, position: LatLng, label: &str, duration_ms: u32) -> Result<()> {
        let marker = call(&self.leaflet, "marker", &[lat_lng(position)?])?;
        call(&marker, "addTo", &[self.map.clone()])?;
        call(&marker, "bindPopup", &[JsValue::from_str(label)])?;
        call(&marker, "openPopup", &[])?;

        let map = self.map.clone();
        Timeout::new(duration_ms, move || {
            if let Err(err) = call(&map, "removeLayer", &[marker]) {
                warn!(error = %err, "could not remove coordinate marker");
            }
        })
        .forget();
        Ok(())
    }
}

impl OverlaySurface for LeafletMap {
    fn clear_layer(&mut self, layer: LayerKind) {
        if let Err(err) = call(self.layer(layer), "clearLayers", &[]) {
            warn!(?layer, error = %err, "could not clear layer");
        }
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        if let Err(err) = self.try_add_marker(marker) {
            warn!(title = ?marker.title, error = %err, "could not draw marker");
        }
    }

    fn add_line(&mut self, layer: LayerKind, line: &LineSpec) {
        if let Err(err) = self.try_add_line(layer, line) {
            warn!(?layer, error = %err, "could not draw line");
        }
    }
}

/// Creates the map inside `container` and wires the click handler.
///
/// `on_click` receives the clicked latitude and longitude. Calling this
/// again once the map exists does nothing.
///
/// # Errors
/// Returns an error when Leaflet is missing or one of its calls throws.
pub fn init_map(
    container: &JsValue,
    config: &MapConfig,
    on_click: impl Fn(LatLng) + 'static,
) -> Result<()> {
    if MAP.with_borrow(Option::is_some) {
        return Ok(());
    }
    let map = LeafletMap::create(container, config)?;

    let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match clicked_position(&event) {
            Some(position) => on_click(position),
            None => warn!("map click without coordinates"),
        }
    });
    call(
        &map.map,
        "on",
        &[JsValue::from_str("click"), handler.as_ref().clone()],
    )?;
    handler.forget();

    MAP.with_borrow_mut(|slot| *slot = Some(map));
    info!(zoom = config.zoom, "map initialized");
    Ok(())
}

fn clicked_position(event: &JsValue) -> Option<LatLng> {
    let latlng = Reflect::get(event, &JsValue::from_str("latlng")).ok()?;
    let lat = Reflect::get(&latlng, &JsValue::from_str("lat")).ok()?.as_f64()?;
    let lng = Reflect::get(&latlng, &JsValue::from_str("lng")).ok()?.as_f64()?;
    LatLng::new(lat, lng).ok()
}

/// Runs `f` against the live map.
///
/// # Errors
/// Returns [`UiError::MapNotReady`] before [`init_map`] succeeded.
pub fn with_map<R>(f: impl FnOnce(&mut LeafletMap) -> R) -> Result<R> {
    MAP.with_borrow_mut(|slot| slot.as_mut().map(f).ok_or(UiError::MapNotReady))
}

/// Marks a clicked point for `duration_ms`.
///
/// # Errors
/// Returns an error when the map is not ready or Leaflet throws.
pub fn show_temporary_marker(position: LatLng, label: &str, duration_ms: u32) -> Result<()> {
    with_map(|map| map.show_temporary_marker(position, label, duration_ms))?
}
