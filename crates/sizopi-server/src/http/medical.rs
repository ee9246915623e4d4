// SPDX-License-Identifier: Apache-2.0

//! Medical record endpoints, keyed by `(animal, examination date)`.

use super::{checkout, query_error_response, record_error_response, reply_error, require_session};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use sizopi_api::{
    ApiError, MedicalRecordCreateRequest, MedicalRecordPatchRequest, MedicalRecordRow,
    StatusMessage,
};
use sizopi_model::{MedicalRecord, MedicalRecordKey, Username};
use sizopi_query::MedicalRecordChanges;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MedicalRecordKeyQuery {
    id_hewan: String,
    tanggal_pemeriksaan: String,
}

/// Optional list filter: the examining vet's own records.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MedicalRecordListQuery {
    #[serde(default)]
    username_dh: Option<String>,
}

fn parse_key(raw_id: &str, raw_date: &str, rid: &str) -> Result<MedicalRecordKey, Response> {
    MedicalRecordKey::parse(raw_id, raw_date).map_err(|_| {
        reply_error(ApiError::invalid_timestamp("tanggalPemeriksaan").with_request_id(rid))
    })
}

fn to_row(record: MedicalRecord, animal_name: Option<String>) -> MedicalRecordRow {
    MedicalRecordRow {
        id_hewan: record.animal_id.as_str().to_string(),
        username_dh: record.vet_username.into_inner(),
        tanggal_pemeriksaan: record.examined_on.as_str().to_string(),
        status_kesehatan: record.health_status,
        diagnosis: record.diagnosis,
        pengobatan: record.treatment,
        catatan_tindak_lanjut: record.follow_up,
        nama_hewan: animal_name,
    }
}

pub(crate) async fn list_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<MedicalRecordListQuery>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    match filter.username_dh.as_deref() {
        Some(raw) => {
            let vet = match Username::parse(raw) {
                Ok(vet) => vet,
                Err(e) => {
                    return reply_error(
                        ApiError::validation_failed("usernameDh", &e.0).with_request_id(&rid),
                    )
                }
            };
            match sizopi_query::list_medical_records_for_vet(&conn, &vet) {
                Ok(rows) => Json(
                    rows.into_iter()
                        .map(|(record, name)| to_row(record, name))
                        .collect::<Vec<_>>(),
                )
                .into_response(),
                Err(e) => query_error_response(e, &rid),
            }
        }
        None => match sizopi_query::list_medical_records(&conn) {
            Ok(records) => Json(
                records
                    .into_iter()
                    .map(|record| to_row(record, None))
                    .collect::<Vec<_>>(),
            )
            .into_response(),
            Err(e) => query_error_response(e, &rid),
        },
    }
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MedicalRecordCreateRequest>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let key = match parse_key(&req.id_hewan, &req.tanggal_pemeriksaan, &rid) {
        Ok(key) => key,
        Err(resp) => return resp,
    };
    let vet_username = match Username::parse(&req.username_dh) {
        Ok(username) => username,
        Err(e) => {
            return reply_error(
                ApiError::validation_failed("usernameDh", &e.0).with_request_id(&rid),
            )
        }
    };
    let record = MedicalRecord {
        animal_id: key.animal_id,
        vet_username,
        examined_on: key.examined_on,
        health_status: req.status_kesehatan,
        diagnosis: req.diagnosis,
        treatment: req.pengobatan,
        follow_up: req.catatan_tindak_lanjut,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::create_medical_record(&conn, &record) {
        return query_error_response(e, &rid);
    }
    info!(request_id = %rid, id = %record.animal_id, on = %record.examined_on, "medical record created");
    (StatusCode::CREATED, Json(to_row(record, None))).into_response()
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MedicalRecordKeyQuery>,
    Json(patch): Json<MedicalRecordPatchRequest>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let key = match parse_key(&query.id_hewan, &query.tanggal_pemeriksaan, &rid) {
        Ok(key) => key,
        Err(resp) => return resp,
    };
    let changes = MedicalRecordChanges {
        diagnosis: patch.diagnosis,
        treatment: patch.pengobatan,
        follow_up: patch.catatan_tindak_lanjut,
        health_status: patch.status_kesehatan,
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
    if let Err(e) = sizopi_query::update_medical_record(&conn, &key, &changes) {
        return record_error_response(e, "medical record", &rid);
    }
    Json(StatusMessage::new("medical record updated")).into_response()
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MedicalRecordKeyQuery>,
) -> Response {
    let rid = state.next_request_id();
    if let Err(resp) = require_session(&state, &headers, &rid) {
        return resp;
    }
    let key = match parse_key(&query.id_hewan, &query.tanggal_pemeriksaan, &rid) {
        Ok(key) => key,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::delete_medical_record(&conn, &key) {
        return record_error_response(e, "medical record", &rid);
    }
    info!(request_id = %rid, id = %key.animal_id, on = %key.examined_on, "medical record deleted");
    Json(StatusMessage::new("medical record deleted")).into_response()
}
