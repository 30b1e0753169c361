//! HTTP client for the processing backend
//!
//! Responses are read as text and decoded by `yaku_core::wire`, so the
//! status/body taxonomy is shared with the native tests.

use gloo_net::http::{Request, Response};
use tracing::debug;
use yaku_core::config::ApiConfig;
use yaku_core::forms::{NewCriticalPointRequest, NewNodeRequest};
use yaku_core::wire::{
    ProcessResponse, SystemStatus, decode_node_added, decode_process_body, decode_status_body,
    decode_success_body,
};
use yaku_core::ProcessingError;

fn transport(err: gloo_net::Error) -> ProcessingError {
    ProcessingError::Transport(err.to_string())
}

async fn read(response: Response) -> Result<(u16, String), ProcessingError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    debug!(status, bytes = body.len(), "response received");
    Ok((status, body))
}

/// `POST /procesar`
///
/// # Errors
/// Any [`ProcessingError`] category.
pub async fn process(api: &ApiConfig) -> Result<ProcessResponse, ProcessingError> {
    let response = Request::post(&api.endpoint("/procesar"))
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(transport)?;
    let (status, body) = read(response).await?;
    decode_process_body(status, &body)
}

/// `GET /status`
///
/// # Errors
/// [`ProcessingError::Transport`] or [`ProcessingError::Decode`].
pub async fn fetch_status(api: &ApiConfig) -> Result<SystemStatus, ProcessingError> {
    let response = Request::get(&api.endpoint("/status"))
        .send()
        .await
        .map_err(transport)?;
    let (_, body) = read(response).await?;
    decode_status_body(&body)
}

/// `POST /api/agregar-nodo`, returning the server message
///
/// # Errors
/// Any [`ProcessingError`] category.
pub async fn add_node(api: &ApiConfig, request: &NewNodeRequest) -> Result<String, ProcessingError> {
    let response = Request::post(&api.endpoint("/api/agregar-nodo"))
        .json(request)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    let (status, body) = read(response).await?;
    decode_node_added(status, &body)
}

/// `POST /api/agregar-punto-critico`, returning the server message
///
/// # Errors
/// [`ProcessingError::Application`] when the server reports a failure.
pub async fn add_critical_point(
    api: &ApiConfig,
    request: &NewCriticalPointRequest,
) -> Result<String, ProcessingError> {
    let response = Request::post(&api.endpoint("/api/agregar-punto-critico"))
        .json(request)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    let (_, body) = read(response).await?;
    decode_success_body(&body, "message")
}

/// `POST /generar-red-completa`, returning the generation summary
///
/// # Errors
/// [`ProcessingError::Application`] when the generator failed.
pub async fn generate_network(api: &ApiConfig) -> Result<String, ProcessingError> {
    let response = Request::post(&api.endpoint("/generar-red-completa"))
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(transport)?;
    let (_, body) = read(response).await?;
    decode_success_body(&body, "summary")
}
