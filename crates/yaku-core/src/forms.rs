//! Request bodies for the two data-entry forms

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{LatLng, NodeId, NodeKind, NodeState};

/// Parses a coordinate typed into a form field.
///
/// # Errors
/// Returns [`Error::InvalidField`] when the text is not a finite number.
pub fn parse_coordinate(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| Error::invalid_field(field, format!("'{raw}' is not a number")))
}

/// Affected population; blank or unparseable input counts as zero.
#[must_use]
pub fn parse_population(raw: &str) -> u64 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Id to suggest after `current` was used: `N` plus the next number, padded to three digits.
///
/// `"N099"` becomes `"N100"`. A suggestion without a leading number restarts at `"N001"`.
#[must_use]
pub fn next_suggested_id(current: &str) -> String {
    let digits: String = current
        .chars()
        .skip(1)
        .take_while(char::is_ascii_digit)
        .collect();
    let next = digits.parse::<u64>().map_or(1, |n| n.saturating_add(1));
    format!("N{next:03}")
}

/// Body of `POST /api/agregar-nodo`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNodeRequest {
    #[serde(rename = "id_nodo")]
    pub id: NodeId,
    #[serde(rename = "latitud")]
    pub lat: f64,
    #[serde(rename = "longitud")]
    pub lng: f64,
    #[serde(rename = "tipo")]
    pub kind: NodeKind,
    #[serde(rename = "estado")]
    pub state: NodeState,
}

impl NewNodeRequest {
    /// Validates raw form input.
    ///
    /// # Errors
    /// Returns an error for a blank id or a coordinate that is not a finite number.
    pub fn from_form(id: &str, lat: &str, lng: &str, kind: &str, state: &str) -> Result<Self> {
        let id = NodeId::new(id.trim())?;
        let position = LatLng::new(
            parse_coordinate("latitud", lat)?,
            parse_coordinate("longitud", lng)?,
        )?;
        Ok(Self {
            id,
            lat: position.lat,
            lng: position.lng,
            kind: NodeKind::from(kind.to_string()),
            state: NodeState::from(state.to_string()),
        })
    }
}

/// Body of `POST /api/agregar-punto-critico`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCriticalPointRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "latitud")]
    pub lat: f64,
    #[serde(rename = "longitud")]
    pub lng: f64,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "prioridad")]
    pub priority: String,
    #[serde(rename = "poblacion_afectada")]
    pub affected_population: u64,
}

impl NewCriticalPointRequest {
    /// Validates raw form input.
    ///
    /// # Errors
    /// Returns an error for a blank name or a coordinate that is not a finite number.
    pub fn from_form(
        name: &str,
        lat: &str,
        lng: &str,
        kind: &str,
        priority: &str,
        population: &str,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_field("nombre", "name cannot be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            lat: parse_coordinate("latitud", lat)?,
            lng: parse_coordinate("longitud", lng)?,
            kind: kind.to_string(),
            priority: priority.to_string(),
            affected_population: parse_population(population),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_next_suggested_id() {
        assert_eq!(next_suggested_id("N001"), "N002");
        assert_eq!(next_suggested_id("N099"), "N100");
        assert_eq!(next_suggested_id("N1234"), "N1235");
        assert_eq!(next_suggested_id(""), "N001");
        assert_eq!(next_suggested_id("Nabc"), "N001");
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("latitud", " -16.4090 ").unwrap(), -16.409);
        assert!(parse_coordinate("latitud", "").is_err());
        assert!(parse_coordinate("latitud", "NaN").is_err());
        assert!(parse_coordinate("longitud", "west").is_err());
    }

    #[test]
    fn test_population_defaults_to_zero() {
        assert_eq!(parse_population(""), 0);
        assert_eq!(parse_population("abc"), 0);
        assert_eq!(parse_population("1500"), 1500);
        assert_eq!(parse_population("250.7"), 250);
    }

    #[test]
    fn test_node_request_uses_backend_keys() {
        let request =
            NewNodeRequest::from_form("N101", "-16.4", "-71.53", "distribucion", "transitable")
                .unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "id_nodo": "N101",
                "latitud": -16.4,
                "longitud": -71.53,
                "tipo": "distribucion",
                "estado": "transitable"
            })
        );
    }

    #[test]
    fn test_node_request_rejects_blank_id() {
        assert!(NewNodeRequest::from_form("  ", "-16.4", "-71.53", "x", "x").is_err());
    }

    #[test]
    fn test_critical_point_request_shape() {
        let request = NewCriticalPointRequest::from_form(
            "Hospital Honorio Delgado",
            "-16.4050",
            "-71.5300",
            "hospital",
            "alta",
            "",
        )
        .unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["nombre"], "Hospital Honorio Delgado");
        assert_eq!(body["poblacion_afectada"], 0);
        assert_eq!(body["prioridad"], "alta");
    }
}
