//! Client-reported analytics events.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
};
use serde::Deserialize;
use tracing::instrument;

use linkbio_core::{ButtonClick, EventType, PageView};

use crate::error::{AppError, Result};
use crate::routes::record_event;
use crate::state::AppState;

/// Request body for `POST /api/events`.
#[derive(Debug, Deserialize)]
pub struct NewEvent {
    pub event_type: EventType,
    #[serde(default)]
    pub event_data: serde_json::Value,
}

/// Accept an analytics event.
///
/// Payloads are normalised to the known fields of their event type before
/// storage. Recording happens in the background, so `202 Accepted` only
/// means the event was well formed.
#[instrument(skip(state, headers, event), fields(event_type = %event.event_type))]
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<NewEvent>,
) -> Result<StatusCode> {
    let payload = normalize(event.event_type, &event.event_data)?;

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    record_event(&state, event.event_type, payload, user_agent);

    Ok(StatusCode::ACCEPTED)
}

fn normalize(event_type: EventType, data: &serde_json::Value) -> Result<serde_json::Value> {
    if !(data.is_object() || data.is_null()) {
        return Err(AppError::BadRequest(
            "event_data must be an object".to_string(),
        ));
    }

    let value = match event_type {
        EventType::PageView => {
            let page_path = data
                .get("page_path")
                .and_then(serde_json::Value::as_str)
                .filter(|p| p.starts_with('/'))
                .map_or_else(|| PageView::default().page_path, String::from);
            serde_json::to_value(PageView { page_path })
        }
        EventType::ButtonClick => serde_json::to_value(ButtonClick::from_value(data)),
    };

    value.map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_page_view() {
        let value = normalize(EventType::PageView, &json!({"page_path": "/promo", "x": 1})).unwrap();
        assert_eq!(value, json!({"page_path": "/promo"}));

        let value = normalize(EventType::PageView, &serde_json::Value::Null).unwrap();
        assert_eq!(value, json!({"page_path": "/"}));
    }

    #[test]
    fn test_normalize_button_click() {
        let value = normalize(
            EventType::ButtonClick,
            &json!({"button_title": "FRETE", "button_href": "#frete", "extra": true}),
        )
        .unwrap();
        assert_eq!(value, json!({"button_title": "FRETE", "button_href": "#frete"}));
    }

    #[test]
    fn test_normalize_rejects_non_object() {
        assert!(matches!(
            normalize(EventType::ButtonClick, &json!([1, 2])),
            Err(AppError::BadRequest(_))
        ));
    }
}
