//! Handlers for the `/efile` resource (filing wizard).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use columbia_core::efile::{
    ensure_step_applies, next_step, validate_step, validate_step_transition,
    validate_submission, EfileDraft, EfileStep, FilingStatus,
};
use columbia_core::error::CoreError;
use columbia_db::models::filing::{CreateFiling, Filing};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::SessionUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /efile/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateStepRequest {
    /// 1-based step number.
    pub step: u8,
    /// The step the wizard is moving from, if any. Must be adjacent.
    #[serde(default)]
    pub from_step: Option<u8>,
    pub draft: EfileDraft,
}

#[derive(Debug, Serialize)]
pub struct ValidateStepResponse {
    pub valid: bool,
    /// The next applicable step, or `None` after review.
    pub next_step: Option<u8>,
}

/// Request body for `POST /efile`.
#[derive(Debug, Deserialize)]
pub struct SubmitFilingRequest {
    pub draft: EfileDraft,
}

#[derive(Debug, Serialize)]
pub struct FilingResponse {
    pub filing: Filing,
}

#[derive(Debug, Serialize)]
pub struct FilingsResponse {
    pub filings: Vec<Filing>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/efile/validate
///
/// Validate one wizard step. Nothing is stored.
pub async fn validate(
    _session: SessionUser,
    payload: Result<Json<ValidateStepRequest>, JsonRejection>,
) -> AppResult<Json<ValidateStepResponse>> {
    let Json(input) = payload?;
    let step = EfileStep::from_number(input.step)?;
    ensure_step_applies(step, input.draft.filing_type)?;
    if let Some(from) = input.from_step {
        validate_step_transition(from, input.step, input.draft.filing_type)?;
    }
    validate_step(step, &input.draft)?;

    Ok(Json(ValidateStepResponse {
        valid: true,
        next_step: next_step(step, input.draft.filing_type).map(EfileStep::to_number),
    }))
}

/// POST /api/efile
///
/// Validate the whole draft and store it as a submitted filing owned by the
/// session user. Returns 201 Created.
pub async fn submit(
    session: SessionUser,
    State(state): State<AppState>,
    payload: Result<Json<SubmitFilingRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<FilingResponse>)> {
    let Json(input) = payload?;
    let filing_type = validate_submission(&input.draft)?;

    let payload = serde_json::to_value(&input.draft)
        .map_err(|e| AppError::Core(CoreError::Internal(format!("Draft serialization: {e}"))))?;

    let filing = state
        .store
        .create_filing(&CreateFiling {
            user_id: session.user_id,
            filing_type: filing_type.as_str().to_string(),
            status: FilingStatus::Submitted.as_str().to_string(),
            payload,
        })
        .await?;

    tracing::info!(
        user_id = session.user_id,
        filing_id = filing.id,
        filing_type = filing_type.as_str(),
        "Filing submitted"
    );

    Ok((StatusCode::CREATED, Json(FilingResponse { filing })))
}

/// GET /api/efile
///
/// The caller's filings, newest first.
pub async fn list_filings(
    session: SessionUser,
    State(state): State<AppState>,
) -> AppResult<Json<FilingsResponse>> {
    let filings = state.store.list_filings(session.user_id).await?;
    Ok(Json(FilingsResponse { filings }))
}
