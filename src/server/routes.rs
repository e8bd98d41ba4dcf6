use super::AppState;
use crate::errors::{CompassError, CompassResult};
use crate::facts;
use crate::narration::{self, Narration, NarrationRequest};
use crate::trade::demo;
use crate::trade::validate::parse_trade;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

fn body_or_reject(body: Result<Json<Value>, JsonRejection>) -> CompassResult<Value> {
    body.map(|Json(v)| v)
        .map_err(|rejection| CompassError::InvalidInput(rejection.body_text()))
}

/// POST /api/interpret -- validate, compute facts, narrate
pub async fn interpret(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> CompassResult<Json<Narration>> {
    let span = tracing::info_span!("interpret", request_id = %uuid::Uuid::new_v4());

    async move {
        let input = parse_trade(&body_or_reject(body)?)?;
        tracing::info!(kind = %input.kind(), ticker = input.ticker(), "trade accepted");

        let narration = narration::interpret(state.narrator.as_ref(), &input).await?;
        Ok::<_, CompassError>(Json(narration))
    }
    .instrument(span)
    .await
}

/// POST /api/facts -- validate and compute facts only (no narrator call)
pub async fn preview_facts(body: Result<Json<Value>, JsonRejection>) -> CompassResult<Json<Value>> {
    let input = parse_trade(&body_or_reject(body)?)?;
    let facts = facts::compute(&input);
    let payload = NarrationRequest {
        input: &input,
        facts: &facts,
    };
    Ok(Json(serde_json::to_value(&payload)?))
}

/// GET /api/demo/{mode} -- built-in walkthrough payload
pub async fn demo(Path(mode): Path<String>) -> Response {
    match demo::payload(&mode) {
        Some(payload) => Json(payload).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("unknown demo mode: {mode}") })),
        )
            .into_response(),
    }
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": state.version,
    }))
}
