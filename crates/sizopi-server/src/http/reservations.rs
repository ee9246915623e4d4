// SPDX-License-Identifier: Apache-2.0

use super::{checkout, query_error_response, record_error_response, reply_error, require_session};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sizopi_api::{ApiError, ReservationPayload, StatusMessage};
use sizopi_model::{DateText, Reservation, Username};
use tracing::info;

/// New reservations start in this status unless the client overrides it.
const RESERVATION_STATUS_ACTIVE: &str = "Aktif";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReservationKeyQuery {
    username: String,
    nama_fasilitas: String,
    tanggal_kunjungan: String,
}

fn to_payload(reservation: Reservation) -> ReservationPayload {
    ReservationPayload {
        username: reservation.username.into_inner(),
        nama_fasilitas: reservation.facility,
        tanggal_kunjungan: reservation.visit_date.as_str().to_string(),
        jumlah_tiket: reservation.tickets,
        status: Some(reservation.status),
    }
}

fn from_payload(
    payload: ReservationPayload,
    default_status: Option<&str>,
    rid: &str,
) -> Result<Reservation, Response> {
    let username = Username::parse(&payload.username).map_err(|e| {
        reply_error(ApiError::validation_failed("username", &e.0).with_request_id(rid))
    })?;
    let visit_date = DateText::parse(&payload.tanggal_kunjungan).map_err(|_| {
        reply_error(ApiError::invalid_timestamp("tanggalKunjungan").with_request_id(rid))
    })?;
    let status = match payload.status {
        Some(status) => status,
        None => match default_status {
            Some(status) => status.to_string(),
            None => {
                return Err(reply_error(
                    ApiError::validation_failed("status", "required").with_request_id(rid),
                ))
            }
        },
    };
    Ok(Reservation {
        username,
        facility: payload.nama_fasilitas,
        visit_date,
        tickets: payload.jumlah_tiket,
        status,
    })
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
    match sizopi_query::list_reservations(&conn) {
        Ok(rows) => Json(rows.into_iter().map(to_payload).collect::<Vec<_>>()).into_response(),
        Err(e) => query_error_response(e, &rid),
    }
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ReservationPayload>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let reservation = match from_payload(payload, Some(RESERVATION_STATUS_ACTIVE), &rid) {
        Ok(reservation) => reservation,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::create_reservation(&conn, &reservation) {
        return query_error_response(e, &rid);
    }
    info!(
        request_id = %rid,
        username = %reservation.username,
        facility = %reservation.facility,
        "reservation created"
    );
    (StatusCode::CREATED, Json(to_payload(reservation))).into_response()
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ReservationPayload>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let reservation = match from_payload(payload, None, &rid) {
        Ok(reservation) => reservation,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::update_reservation(&conn, &reservation) {
        return record_error_response(e, "reservation", &rid);
    }
    Json(to_payload(reservation)).into_response()
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(key): Query<ReservationKeyQuery>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let username = match Username::parse(&key.username) {
        Ok(username) => username,
        Err(e) => {
            return reply_error(ApiError::validation_failed("username", &e.0).with_request_id(&rid))
        }
    };
    let visit_date = match DateText::parse(&key.tanggal_kunjungan) {
        Ok(date) => date,
        Err(_) => {
            return reply_error(
                ApiError::invalid_timestamp("tanggalKunjungan").with_request_id(&rid),
            )
        }
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) =
        sizopi_query::delete_reservation(&conn, &username, &key.nama_fasilitas, &visit_date)
    {
        return record_error_response(e, "reservation", &rid);
    }
    info!(request_id = %rid, username = %username, "reservation deleted");
    Json(StatusMessage::new("reservation deleted")).into_response()
}
