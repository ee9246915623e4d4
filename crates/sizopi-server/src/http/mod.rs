// SPDX-License-Identifier: Apache-2.0

//! Handler modules plus the tiny helpers they share: error replies,
//! bearer-token extraction, and domain-error mapping.

pub(crate) mod animals;
pub(crate) mod auth;
pub(crate) mod examination;
pub(crate) mod feeding;
pub(crate) mod habitats;
pub(crate) mod medical;
pub(crate) mod misc;
pub(crate) mod reservations;

use crate::pool::PooledConn;
use crate::state::AppState;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sizopi_api::ApiError;
use sizopi_model::Username;
use sizopi_query::{AuthError, QueryError, RecordError, RegisterError};
use tracing::error;

pub(crate) fn reply_error(err: ApiError) -> Response {
    let status = StatusCode::from_u16(err.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err)).into_response()
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the caller's session or produce the 401 reply.
pub(crate) fn require_session(
    state: &AppState,
    headers: &HeaderMap,
    request_id: &str,
) -> Result<Username, Response> {
    bearer_token(headers)
        .and_then(|token| state.sessions.resolve(token))
        .ok_or_else(|| reply_error(ApiError::unauthorized().with_request_id(request_id)))
}

pub(crate) fn checkout(state: &AppState, request_id: &str) -> Result<PooledConn, Response> {
    state.pool.checkout().map_err(|e| {
        error!(request_id = %request_id, error = %e, "connection checkout failed");
        reply_error(ApiError::internal().with_request_id(request_id))
    })
}

pub(crate) fn auth_error_response(e: AuthError, request_id: &str) -> Response {
    match e {
        AuthError::UnknownAccount | AuthError::BadPassword => {
            reply_error(ApiError::invalid_credential().with_request_id(request_id))
        }
        AuthError::Invalid(v) => {
            reply_error(ApiError::validation_failed("credential", &v.0).with_request_id(request_id))
        }
        AuthError::Query(q) => {
            error!(request_id = %request_id, error = %q, "credential query failed");
            reply_error(ApiError::internal().with_request_id(request_id))
        }
    }
}

pub(crate) fn query_error_response(e: QueryError, request_id: &str) -> Response {
    error!(request_id = %request_id, error = %e, "query failed");
    reply_error(ApiError::internal().with_request_id(request_id))
}

pub(crate) fn record_error_response(e: RecordError, resource: &str, request_id: &str) -> Response {
    match e {
        RecordError::NotFound => {
            reply_error(ApiError::not_found(resource).with_request_id(request_id))
        }
        RecordError::Query(q) => query_error_response(q, request_id),
    }
}

pub(crate) fn register_error_response(e: RegisterError, request_id: &str) -> Response {
    match e {
        RegisterError::DuplicateUsername => {
            reply_error(ApiError::duplicate("username").with_request_id(request_id))
        }
        RegisterError::DuplicateEmail => {
            reply_error(ApiError::duplicate("email").with_request_id(request_id))
        }
        RegisterError::Invalid(v) => {
            reply_error(ApiError::validation_failed("registration", &v.0).with_request_id(request_id))
        }
        RegisterError::Query(q) => query_error_response(q, request_id),
    }
}
