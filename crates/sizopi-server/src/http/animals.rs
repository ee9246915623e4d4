// SPDX-License-Identifier: Apache-2.0

use super::{checkout, query_error_response, record_error_response, reply_error, require_session};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sizopi_api::{AnimalPayload, ApiError, StatusMessage};
use sizopi_core::random_token;
use sizopi_model::{Animal, AnimalId, DateText};
use tracing::info;

fn to_payload(animal: Animal) -> AnimalPayload {
    AnimalPayload {
        id: Some(animal.id.as_str().to_string()),
        nama: animal.name,
        spesies: animal.species,
        asal_hewan: animal.origin,
        tanggal_lahir: animal.birth_date.map(|d| d.as_str().to_string()),
        status_kesehatan: animal.health_status,
        nama_habitat: animal.habitat,
        url_foto: animal.photo_url,
    }
}

fn from_payload(id: AnimalId, payload: AnimalPayload, rid: &str) -> Result<Animal, Response> {
    let birth_date = match payload.tanggal_lahir.as_deref() {
        Some(raw) => Some(DateText::parse(raw).map_err(|_| {
            reply_error(ApiError::invalid_timestamp("tanggalLahir").with_request_id(rid))
        })?),
        None => None,
    };
    Ok(Animal {
        id,
        name: payload.nama,
        species: payload.spesies,
        origin: payload.asal_hewan,
        birth_date,
        health_status: payload.status_kesehatan,
        habitat: payload.nama_habitat,
        photo_url: payload.url_foto,
    })
}

fn parse_id(raw: &str, rid: &str) -> Result<AnimalId, Response> {
    AnimalId::parse(raw)
        .map_err(|e| reply_error(ApiError::validation_failed("id", &e.0).with_request_id(rid)))
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
    match sizopi_query::list_animals(&conn) {
        Ok(animals) => {
            Json(animals.into_iter().map(to_payload).collect::<Vec<_>>()).into_response()
        }
        Err(e) => query_error_response(e, &rid),
    }
}

pub(crate) async fn get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let id = match parse_id(&raw_id, &rid) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    match sizopi_query::get_animal(&conn, &id) {
        Ok(Some(animal)) => Json(to_payload(animal)).into_response(),
        Ok(None) => reply_error(ApiError::not_found("animal").with_request_id(&rid)),
        Err(e) => query_error_response(e, &rid),
    }
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AnimalPayload>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    // Mint an id when the client does not supply one.
    let raw_id = match payload.id.clone() {
        Some(raw) => raw,
        None => random_token(12),
    };
    let id = match parse_id(&raw_id, &rid) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let animal = match from_payload(id, payload, &rid) {
        Ok(animal) => animal,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::create_animal(&conn, &animal) {
        return query_error_response(e, &rid);
    }
    info!(request_id = %rid, id = %animal.id, "animal created");
    (StatusCode::CREATED, Json(to_payload(animal))).into_response()
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    Json(payload): Json<AnimalPayload>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    // The path segment names the row; an id in the body is ignored.
    let id = match parse_id(&raw_id, &rid) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let animal = match from_payload(id, payload, &rid) {
        Ok(animal) => animal,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::update_animal(&conn, &animal) {
        return record_error_response(e, "animal", &rid);
    }
    Json(to_payload(animal)).into_response()
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let id = match parse_id(&raw_id, &rid) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::delete_animal(&conn, &id) {
        return record_error_response(e, "animal", &rid);
    }
    info!(request_id = %rid, id = %id, "animal deleted");
    Json(StatusMessage::new("animal deleted")).into_response()
}
