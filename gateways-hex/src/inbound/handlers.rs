//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequest, Request, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use gateways_types::{
    Amount, AppError, AutoCreateRequest, AutoCreateResponse, BankResponse, CreateBankRequest,
    GatewayError, SecretValueReader,
};

use super::request::HttpRequestContext;
use crate::BankFactory;

/// Application state shared across handlers.
pub struct AppState<S: SecretValueReader> {
    pub factory: BankFactory<S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg, "code": 400 }),
            ),
            AppError::Unavailable(report) => (
                StatusCode::SERVICE_UNAVAILABLE,
                serde_json::json!({
                    "error": self.0.to_string(),
                    "code": 503,
                    "attempts": report.attempts,
                }),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Gateway request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": msg, "code": 500 }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections use the API error format.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Build a specific bank, or the merchant's default one.
#[tracing::instrument(skip(state, ctx), fields(identifier = %req.identifier))]
pub async fn create_bank<S: SecretValueReader>(
    State(state): State<Arc<AppState<S>>>,
    ctx: HttpRequestContext,
    ApiJson(req): ApiJson<CreateBankRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bank = state.factory.create(&ctx, req.bank_type, &req.identifier)?;
    Ok((
        StatusCode::CREATED,
        Json(BankResponse::from_bank(bank.as_ref())),
    ))
}

/// Pick the first reachable bank by the merchant's priorities.
#[tracing::instrument(skip(state, ctx), fields(identifier = %req.identifier, amount = ?req.amount))]
pub async fn auto_create_bank<S: SecretValueReader>(
    State(state): State<Arc<AppState<S>>>,
    ctx: HttpRequestContext,
    ApiJson(req): ApiJson<AutoCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let amount = match req.amount {
        Some(value) => {
            let currency = state.factory.reader().currency(&req.identifier)?;
            Some(Amount::new(value, currency).map_err(|e| AppError::BadRequest(e.to_string()))?)
        }
        None => None,
    };

    let (bank, attempts) = state
        .factory
        .auto_create_with_report(&ctx, &req.identifier, amount)
        .await?;

    Ok(Json(AutoCreateResponse {
        bank: BankResponse::from_bank(bank.as_ref()),
        attempts,
    }))
}

/// List registered bank classes.
pub async fn list_banks<S: SecretValueReader>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    Json(state.factory.registry().class_names())
}
