// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /tokens/:network/:address` | token metadata |
//! | `GET /tokens/:network/symbol/:symbol` | token metadata from the symbol index |
//! | `GET /health` | `{ "status": "ok", "timestamp": ... }` |
//! | `GET /` | API description |
//!
//! Every error, including unknown routes, unsupported methods and undecodable
//! path segments, uses the body
//! `{ "success": false, "errors": [{ "code": <status>, "message": ... }] }`.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::errors::ResolveError;
use crate::service::TokenResolver;
use crate::types::metadata::TokenMetadata;

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Serialize)]
struct ErrorItem {
    code: u16,
    message: String,
}

/// Error response in the API's uniform error body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!(error = %rejection, "Rejected request path");
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        let status =
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = ?e, "Request failed");
        } else {
            warn!(error = %e, "Request rejected");
        }
        Self::new(status, e.public_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            errors: vec![ErrorItem {
                code: self.status.as_u16(),
                message: self.message,
            }],
        };
        (self.status, Json(body)).into_response()
    }
}

/// Builds the router over a shared resolver.
pub fn router(resolver: TokenResolver) -> Router {
    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health))
        .route("/tokens/:network/:address", get(get_token))
        .route("/tokens/:network/symbol/:symbol", get(get_token_by_symbol))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(resolver)
}

/// Starts the API server.
pub async fn serve_api(listener: TcpListener, resolver: TokenResolver) -> anyhow::Result<()> {
    let app = router(resolver);

    let addr = listener.local_addr()?;

    info!(address = ?addr, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn get_token(
    State(resolver): State<TokenResolver>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TokenMetadata>, ApiError> {
    let Path((network, address)) = path?;
    info!(network = %network, address = %address, "Received token request");
    Ok(Json(resolver.resolve(&network, &address).await?))
}

async fn get_token_by_symbol(
    State(resolver): State<TokenResolver>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TokenMetadata>, ApiError> {
    let Path((network, symbol)) = path?;
    info!(network = %network, symbol = %symbol, "Received symbol request");
    Ok(Json(resolver.resolve_by_symbol(&network, &symbol).await?))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn api_info() -> Json<Value> {
    Json(json!({
        "title": "Token Metadata API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "API for fetching ERC-20 token metadata from EVM networks",
        "endpoints": {
            "GET /tokens/{network}/{address}": "Get token metadata by address",
            "GET /tokens/{network}/symbol/{symbol}": "Get previously resolved token metadata by symbol",
            "GET /health": "Health check endpoint",
        },
    }))
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::NOT_FOUND,
        format!("Route {method} {uri} not found"),
    )
}
