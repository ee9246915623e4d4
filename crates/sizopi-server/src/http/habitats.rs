// SPDX-License-Identifier: Apache-2.0

use super::{checkout, query_error_response, record_error_response, reply_error, require_session};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sizopi_api::{ApiError, HabitatPayload, StatusMessage};
use sizopi_model::Habitat;
use tracing::info;

fn to_payload(habitat: Habitat) -> HabitatPayload {
    HabitatPayload {
        nama: habitat.name,
        luas_area: habitat.area,
        kapasitas: habitat.capacity,
        status: habitat.status,
    }
}

fn from_payload(name: String, payload: HabitatPayload) -> Habitat {
    Habitat {
        name,
        area: payload.luas_area,
        capacity: payload.kapasitas,
        status: payload.status,
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
    match sizopi_query::list_habitats(&conn) {
        Ok(habitats) => {
            Json(habitats.into_iter().map(to_payload).collect::<Vec<_>>()).into_response()
        }
        Err(e) => query_error_response(e, &rid),
    }
}

pub(crate) async fn get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    match sizopi_query::get_habitat(&conn, &name) {
        Ok(Some(habitat)) => Json(to_payload(habitat)).into_response(),
        Ok(None) => reply_error(ApiError::not_found("habitat").with_request_id(&rid)),
        Err(e) => query_error_response(e, &rid),
    }
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<HabitatPayload>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let habitat = from_payload(payload.nama.clone(), payload);
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::create_habitat(&conn, &habitat) {
        return query_error_response(e, &rid);
    }
    info!(request_id = %rid, name = %habitat.name, "habitat created");
    (StatusCode::CREATED, Json(to_payload(habitat))).into_response()
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(payload): Json<HabitatPayload>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    // The path segment names the row; the body's `nama` is ignored.
    let habitat = from_payload(name, payload);
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::update_habitat(&conn, &habitat) {
        return record_error_response(e, "habitat", &rid);
    }
    Json(to_payload(habitat)).into_response()
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::delete_habitat(&conn, &name) {
        return record_error_response(e, "habitat", &rid);
    }
    info!(request_id = %rid, name = %name, "habitat deleted");
    Json(StatusMessage::new("habitat deleted")).into_response()
}
