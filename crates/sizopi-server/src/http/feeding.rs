// SPDX-License-Identifier: Apache-2.0

//! Feeding schedule endpoints. Keys ride in query parameters for the
//! mutating verbs: `?idHewan=...&jadwal=...`, where the timestamp is
//! canonicalized before it ever touches SQL.

use super::{checkout, query_error_response, record_error_response, reply_error, require_session};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sizopi_api::{ApiError, FeedingCreateRequest, FeedingPatchRequest, FeedingRow, StatusMessage};
use sizopi_model::{FeedingEntry, FeedingKey, StampText, FEEDING_STATUS_PENDING};
use sizopi_query::FeedingChanges;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedingKeyQuery {
    id_hewan: String,
    jadwal: String,
}

fn parse_key(raw_id: &str, raw_stamp: &str, rid: &str) -> Result<FeedingKey, Response> {
    FeedingKey::parse(raw_id, raw_stamp)
        .map_err(|_| reply_error(ApiError::invalid_timestamp("jadwal").with_request_id(rid)))
}

fn to_row(entry: FeedingEntry, name: Option<String>, species: Option<String>) -> FeedingRow {
    FeedingRow {
        id_hewan: entry.animal_id.as_str().to_string(),
        jadwal: entry.scheduled_at.as_str().to_string(),
        jenis_pakan: entry.feed_type,
        jumlah_pakan: entry.quantity,
        status: entry.status,
        nama_hewan: name,
        spesies: species,
    }
}

pub(crate) async fn list_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    match sizopi_query::list_feedings(&conn) {
        Ok(rows) => Json(
            rows.into_iter()
                .map(|(entry, name, species)| to_row(entry, name, species))
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => query_error_response(e, &rid),
    }
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<FeedingCreateRequest>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let key = match parse_key(&req.id_hewan, &req.jadwal, &rid) {
        Ok(key) => key,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::create_feeding(&conn, &key, &req.jenis_pakan, req.jumlah_pakan) {
        return query_error_response(e, &rid);
    }
    info!(request_id = %rid, id = %key.animal_id, at = %key.scheduled_at, "feeding scheduled");
    (
        StatusCode::CREATED,
        Json(FeedingRow {
            id_hewan: key.animal_id.as_str().to_string(),
            jadwal: key.scheduled_at.as_str().to_string(),
            jenis_pakan: req.jenis_pakan,
            jumlah_pakan: req.jumlah_pakan,
            status: FEEDING_STATUS_PENDING.to_string(),
            nama_hewan: None,
            spesies: None,
        }),
    )
        .into_response()
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FeedingKeyQuery>,
    Json(patch): Json<FeedingPatchRequest>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let key = match parse_key(&query.id_hewan, &query.jadwal, &rid) {
        Ok(key) => key,
        Err(resp) => return resp,
    };
    let reschedule = match patch.jadwal.as_deref() {
        Some(raw) => match StampText::parse(raw) {
            Ok(stamp) => Some(stamp),
            Err(_) => {
                return reply_error(ApiError::invalid_timestamp("jadwal").with_request_id(&rid))
            }
        },
        None => None,
    };
    let changes = FeedingChanges {
        feed_type: patch.jenis_pakan,
        quantity: patch.jumlah_pakan,
        status: patch.status,
        reschedule,
    };
    if changes.is_empty() {
        return reply_error(
            ApiError::validation_failed("body", "no fields to update").with_request_id(&rid),
        );
    }
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::update_feeding(&conn, &key, &changes) {
        return record_error_response(e, "feeding entry", &rid);
    }
    Json(StatusMessage::new("feeding updated")).into_response()
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FeedingKeyQuery>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let key = match parse_key(&query.id_hewan, &query.jadwal, &rid) {
        Ok(key) => key,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::delete_feeding(&conn, &key) {
        return record_error_response(e, "feeding entry", &rid);
    }
    info!(request_id = %rid, id = %key.animal_id, at = %key.scheduled_at, "feeding deleted");
    Json(StatusMessage::new("feeding deleted")).into_response()
}
