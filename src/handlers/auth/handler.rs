//! Registration handler implementations

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::RegistrationOutcome,
    state::AppState,
};

use super::{
    request::RegisterRequest,
    response::{AccountResponse, RegisterResponse},
};

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(payload) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    match state.registration().register(payload.into()).await {
        RegistrationOutcome::Created(account) => {
            let response = RegisterResponse {
                message: "Signup successful".to_string(),
                account: AccountResponse::from(account),
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        RegistrationOutcome::Rejected(issues) => Err(AppError::Rejected(issues)),
        RegistrationOutcome::Failed(e) => Err(AppError::Infra(e)),
    }
}
