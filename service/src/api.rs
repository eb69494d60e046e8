//! # REST API
//!
//! Builds the axum router that exposes the wallet operations over HTTP.
//!
//! ## Endpoints
//!
//! | Method | Path                 | Description                          |
//! |--------|----------------------|--------------------------------------|
//! | GET    | `/health`            | Liveness probe                       |
//! | POST   | `/mnemonic/generate` | New 24-word recovery phrase          |
//! | POST   | `/mnemonic/validate` | BIP-39 wordlist + checksum check     |
//! | POST   | `/keys/derive`       | Keys and raw address for a phrase    |
//! | POST   | `/sign`              | Sign a message                       |
//! | POST   | `/verify`            | Verify a signature                   |
//! | POST   | `/address/checksum`  | Checksummed `dlt1` address           |
//! | POST   | `/public-key/hex`    | Hex form of public key bytes         |
//!
//! Operation failures come back as 422 with the tagged error body
//! (`{"status":"error","kind":...,"message":...}`). Bytes that are not valid
//! hex are a transport problem and get a 400 with `{"error": ...}`.
//!
//! PBKDF2 and Dilithium are CPU-bound, so every operation runs on tokio's
//! blocking pool. The service holds no wallet state between requests.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use dlt_wallet::ops::{self, OpResult};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The service's reported version string.
    pub version: String,
    /// Prometheus handles for in-handler recording.
    pub metrics: SharedMetrics,
    /// Upper bound on a single request, enforced by `TimeoutLayer`.
    pub request_timeout: Duration,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all routes, CORS, tracing, and the
/// request timeout.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    let timeout = TimeoutLayer::new(state.request_timeout);

    Router::new()
        .route("/health", get(health_handler))
        .route("/mnemonic/generate", post(generate_mnemonic_handler))
        .route("/mnemonic/validate", post(validate_mnemonic_handler))
        .route("/keys/derive", post(derive_keys_handler))
        .route("/sign", post(sign_handler))
        .route("/verify", post(verify_handler))
        .route("/address/checksum", post(checksum_address_handler))
        .route("/public-key/hex", post(public_key_hex_handler))
        .layer(timeout)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MnemonicRequest {
    pub mnemonic: String,
}

#[derive(Debug, Deserialize)]
pub struct SignRequest {
    /// Hex-encoded private key.
    pub private_key: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Hex-encoded public key.
    pub public_key: String,
    pub message: String,
    /// Hex-encoded signature.
    pub signature: String,
}

#[derive(Debug, Deserialize)]
pub struct ChecksumRequest {
    /// Raw address hex.
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct PublicKeyBytesRequest {
    /// Public key as a JSON array of bytes.
    pub public_key: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidResponse {
    pub valid: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddressResponse {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HexResponse {
    pub hex: String,
}

/// Error body for transport-level failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures that never reach a wallet operation.
#[derive(Debug)]
pub enum ApiError {
    /// The request was well-formed JSON but a field could not be decoded.
    BadRequest(String),
    /// The blocking task panicked or was cancelled.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("operation task failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

fn decode_hex_field(field: &str, value: &str) -> Result<Vec<u8>, ApiError> {
    hex::decode(value).map_err(|e| ApiError::BadRequest(format!("{field}: invalid hex ({e})")))
}

// ---------------------------------------------------------------------------
// Operation plumbing
// ---------------------------------------------------------------------------

/// Run a wallet operation on the blocking pool, timing and counting it.
async fn run_op<T, F>(state: &AppState, op: &'static str, work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let _timer = state.metrics.start_timer(op);
    let out = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("{op}: {e}")))?;
    state.metrics.record(op);
    Ok(out)
}

/// 200 with the flattened payload, or 422 with the tagged error.
fn op_response<T: Serialize>(state: &AppState, op: &'static str, result: OpResult<T>) -> Response {
    match result.error_kind().map(str::to_owned) {
        None => (StatusCode::OK, Json(result)).into_response(),
        Some(kind) => {
            state.metrics.record_failure(op, &kind);
            tracing::debug!(op, kind = %kind, "operation returned an error");
            (StatusCode::UNPROCESSABLE_ENTITY, Json(result)).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` returns 200 while the process is up.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".into(),
        version: state.version.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `POST /mnemonic/generate`
async fn generate_mnemonic_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let result = run_op(&state, "generate_mnemonic", ops::generate_mnemonic).await?;
    Ok(op_response(&state, "generate_mnemonic", result))
}

/// `POST /mnemonic/validate`
async fn validate_mnemonic_handler(
    State(state): State<AppState>,
    Json(req): Json<MnemonicRequest>,
) -> Result<Json<ValidResponse>, ApiError> {
    let valid = run_op(&state, "validate_mnemonic", move || {
        ops::validate_mnemonic(&req.mnemonic)
    })
    .await?;
    Ok(Json(ValidResponse { valid }))
}

/// `POST /keys/derive` returns keys as hex plus the raw address.
async fn derive_keys_handler(
    State(state): State<AppState>,
    Json(req): Json<MnemonicRequest>,
) -> Result<Response, ApiError> {
    let result = run_op(&state, "derive_keys", move || ops::derive_keys(&req.mnemonic)).await?;
    Ok(op_response(&state, "derive_keys", result))
}

/// `POST /sign`
async fn sign_handler(
    State(state): State<AppState>,
    Json(req): Json<SignRequest>,
) -> Result<Response, ApiError> {
    let private_key = decode_hex_field("private_key", &req.private_key)?;
    let message = req.message;
    let result = run_op(&state, "sign", move || ops::sign(&private_key, &message)).await?;
    Ok(op_response(&state, "sign", result))
}

/// `POST /verify`
async fn verify_handler(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<ValidResponse>, ApiError> {
    let public_key = decode_hex_field("public_key", &req.public_key)?;
    let signature = decode_hex_field("signature", &req.signature)?;
    let message = req.message;
    let valid = run_op(&state, "verify", move || {
        ops::verify(&public_key, &message, &signature)
    })
    .await?;
    Ok(Json(ValidResponse { valid }))
}

/// `POST /address/checksum`
async fn checksum_address_handler(
    State(state): State<AppState>,
    Json(req): Json<ChecksumRequest>,
) -> Result<Json<AddressResponse>, ApiError> {
    let address = run_op(&state, "checksum_address", move || {
        ops::checksum_address(&req.address)
    })
    .await?;
    Ok(Json(AddressResponse { address }))
}

/// `POST /public-key/hex`
async fn public_key_hex_handler(
    State(state): State<AppState>,
    Json(req): Json<PublicKeyBytesRequest>,
) -> Result<Json<HexResponse>, ApiError> {
    let hex = run_op(&state, "public_key_hex", move || {
        ops::public_key_hex(&req.public_key)
    })
    .await?;
    Ok(Json(HexResponse { hex }))
}
