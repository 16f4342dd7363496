use std::error::Error as StdError;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::data::error::LoadError;
use crate::data::filter::{filter_cards, FilterOptions};
use crate::data::loader::LoadReport;
use crate::data::model::{Card, FacetIndex};
use crate::deck::{Deck, DeckError};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a request, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error("card loading task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Deck(_) => StatusCode::BAD_REQUEST,
            ApiError::Load(LoadError::NotFound { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Load(LoadError::Read { .. }) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut message = self.to_string();
        let mut cause = StdError::source(&self);
        while let Some(err) = cause {
            message.push_str(&format!(": {err}"));
            cause = err.source();
        }
        if status.is_server_error() {
            log::error!("{message}");
        } else {
            log::warn!("{message}");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct FilterResponse<'a> {
    count: usize,
    cards: Vec<&'a Card>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Load the collection on the blocking pool; file I/O must not stall the runtime.
async fn load_cards(state: &AppState) -> Result<LoadReport, ApiError> {
    let state = state.clone();
    let report = tokio::task::spawn_blocking(move || state.load_cards()).await??;
    Ok(report)
}

/// GET /api/health
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /api/filter
pub async fn filter_handler(
    State(state): State<AppState>,
    payload: Result<Json<FilterOptions>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(options) = payload?;
    let report = load_cards(&state).await?;

    let cards = filter_cards(&report.cards, &options);
    log::debug!("filter matched {} of {} cards", cards.len(), report.cards.len());

    Ok(Json(FilterResponse {
        count: cards.len(),
        cards,
    })
    .into_response())
}

/// GET /api/facets
pub async fn facets_handler(State(state): State<AppState>) -> Result<Json<FacetIndex>, ApiError> {
    let report = load_cards(&state).await?;
    Ok(Json(FacetIndex::from_cards(&report.cards)))
}

/// POST /api/deck/export
pub async fn deck_export_handler(
    payload: Result<Json<Deck>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(deck) = payload?;
    let text = deck.export_text()?;
    log::debug!("exported deck '{}' with {} cards", deck.name, deck.card_count());

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}
