use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use bookchain_crypto::ChainHasher;
use bookchain_ledger::{AuditReport, ChainAuditor, ChainReader, ChainWriter};
use bookchain_types::{Book, CheckoutEvent};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::ser::PrettyFormatter;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
        }
    }
}

/// `GET /`: every block, genesis first.
pub async fn get_chain(State(state): State<AppState>) -> ServerResult<Response> {
    let blocks = state.chain.read()?;
    json_response(StatusCode::OK, &blocks, state.config.pretty_json)
}

/// `POST /`: append a checkout event to the chain.
pub async fn write_block(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Response> {
    let event: CheckoutEvent = decode_body(body).inspect_err(|e| {
        tracing::warn!(error = %e, "could not write block");
    })?;

    let block = state.chain.append(event)?;
    json_response(StatusCode::CREATED, &block, state.config.pretty_json)
}

/// `POST /new`: create a book record with a derived id.
pub async fn new_book(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Response> {
    let book: Book = decode_body(body).inspect_err(|e| {
        tracing::warn!(error = %e, "could not create book");
    })?;

    let id = ChainHasher::book_id(&book.isbn, &book.publish_date);
    let book = book.with_id(id);
    tracing::info!(id = %book.id, title = %book.title, "created book record");
    json_response(StatusCode::OK, &book, state.config.pretty_json)
}

/// `GET /audit`: re-validate every sealed block.
pub async fn audit_chain(State(state): State<AppState>) -> ServerResult<Json<AuditReport>> {
    let report = ChainAuditor::audit(&*state.chain)?;
    Ok(Json(report))
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Json<serde_json::Value>> {
    Ok(Json(json!({
        "name": "bookchain-server",
        "version": env!("CARGO_PKG_VERSION"),
        "blocks": state.chain.block_count()?,
    })))
}

/// Request bodies are decoded as JSON whatever their `Content-Type` says.
fn decode_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> ServerResult<T> {
    let bytes = body?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Pretty output indents by a single space.
fn to_vec_indented<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b" "));
    value.serialize(&mut serializer)?;
    Ok(out)
}

fn json_response<T: Serialize>(
    status: StatusCode,
    value: &T,
    pretty: bool,
) -> ServerResult<Response> {
    let body = if pretty {
        to_vec_indented(value)
    } else {
        serde_json::to_vec(value)
    }
    .map_err(|e| ServerError::Internal(e.to_string()))?;

    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}
