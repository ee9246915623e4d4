// SPDX-License-Identifier: Apache-2.0

//! Examination schedule endpoints. Mutations carry their key in the body:
//! `origTanggal` names the existing row, `tglSelanjutnya` the replacement.

use super::{checkout, query_error_response, record_error_response, reply_error, require_session};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sizopi_api::{
    ApiError, ExaminationDeleteRequest, ExaminationPayload, ExaminationUpdateRequest,
    StatusMessage,
};
use sizopi_model::{DateText, ExaminationKey, ExaminationSlot};
use tracing::info;

fn parse_key(raw_id: &str, raw_date: &str, field: &str, rid: &str) -> Result<ExaminationKey, Response> {
    ExaminationKey::parse(raw_id, raw_date)
        .map_err(|_| reply_error(ApiError::invalid_timestamp(field).with_request_id(rid)))
}

fn to_payload(slot: ExaminationSlot, name: Option<String>) -> ExaminationPayload {
    ExaminationPayload {
        id_hewan: slot.animal_id.as_str().to_string(),
        tgl_selanjutnya: slot.next_visit.as_str().to_string(),
        freq_rutin: slot.frequency_months,
        nama_hewan: name,
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
    match sizopi_query::list_examinations(&conn) {
        Ok(rows) => Json(
            rows.into_iter()
                .map(|(slot, name)| to_payload(slot, name))
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => query_error_response(e, &rid),
    }
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ExaminationPayload>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let key = match parse_key(&req.id_hewan, &req.tgl_selanjutnya, "tglSelanjutnya", &rid) {
        Ok(key) => key,
        Err(resp) => return resp,
    };
    let slot = ExaminationSlot {
        animal_id: key.animal_id,
        next_visit: key.next_visit,
        frequency_months: req.freq_rutin,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::create_examination(&conn, &slot) {
        return query_error_response(e, &rid);
    }
    info!(request_id = %rid, id = %slot.animal_id, on = %slot.next_visit, "examination scheduled");
    (StatusCode::CREATED, Json(to_payload(slot, None))).into_response()
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ExaminationUpdateRequest>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let key = match parse_key(&req.id_hewan, &req.orig_tanggal, "origTanggal", &rid) {
        Ok(key) => key,
        Err(resp) => return resp,
    };
    let new_date = match DateText::parse(&req.tgl_selanjutnya) {
        Ok(date) => date,
        Err(_) => {
            return reply_error(ApiError::invalid_timestamp("tglSelanjutnya").with_request_id(&rid))
        }
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::update_examination(&conn, &key, &new_date, req.freq_rutin) {
        return record_error_response(e, "examination slot", &rid);
    }
    Json(StatusMessage::new("examination updated")).into_response()
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ExaminationDeleteRequest>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let key = match parse_key(&req.id_hewan, &req.orig_tanggal, "origTanggal", &rid) {
        Ok(key) => key,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::delete_examination(&conn, &key) {
        return record_error_response(e, "examination slot", &rid);
    }
    info!(request_id = %rid, id = %key.animal_id, on = %key.next_visit, "examination deleted");
    Json(StatusMessage::new("examination deleted")).into_response()
}
