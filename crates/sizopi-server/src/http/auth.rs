// SPDX-License-Identifier: Apache-2.0

//! Login, logout, session introspection, registration, and the two
//! self-service profile operations.

use super::{
    auth_error_response, bearer_token, checkout, query_error_response, record_error_response,
    register_error_response, reply_error, require_session,
};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sizopi_api::{
    role_wire, ApiError, ChangePasswordRequest, LoginRequest, LoginResponse,
    ProfileUpdateRequest, RegisterRequest, RegisterResponse, SessionUser, StatusMessage,
};
use sizopi_model::{Account, DateText, Email, Role, StaffKind, Username};
use sizopi_query::{NewRegistration, ProfileChanges, RoleRequest};
use tracing::info;

fn session_user(account: Account, role: &Role) -> SessionUser {
    let (label, data) = role_wire(role);
    SessionUser {
        username: account.username.into_inner(),
        email: account.email.as_str().to_string(),
        nama_depan: account.first_name,
        nama_tengah: account.middle_name,
        nama_belakang: account.last_name,
        nomor_telepon: account.phone,
        role: label.to_string(),
        role_data: data,
    }
}

pub(crate) async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let rid = state.next_request_id();
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    let account = match sizopi_query::verify_credentials(&conn, &req.email, &req.password) {
        Ok(account) => account,
        Err(e) => return auth_error_response(e, &rid),
    };
    let role = match sizopi_query::resolve_role(&conn, &account.username) {
        Ok(role) => role,
        Err(e) => return query_error_response(e, &rid),
    };
    let token = state.sessions.issue(account.username.clone());
    info!(request_id = %rid, username = %account.username, role = role.label(), "login");
    Json(LoginResponse {
        token,
        user: session_user(account, &role),
    })
    .into_response()
}

pub(crate) async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let rid = state.next_request_id();
    if let Some(token) = bearer_token(&headers) {
        state.sessions.revoke(token);
    }
    info!(request_id = %rid, "logout");
    Json(StatusMessage::new("logged out")).into_response()
}

pub(crate) async fn session_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let rid = state.next_request_id();
    let username = match require_session(&state, &headers, &rid) {
        Ok(username) => username,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    let account = match sizopi_query::account_by_username(&conn, &username) {
        Ok(Some(account)) => account,
        Ok(None) => return reply_error(ApiError::unauthorized().with_request_id(&rid)),
        Err(e) => return query_error_response(e, &rid),
    };
    let role = match sizopi_query::resolve_role(&conn, &username) {
        Ok(role) => role,
        Err(e) => return query_error_response(e, &rid),
    };
    Json(session_user(account, &role)).into_response()
}

fn role_request(req: &RegisterRequest, rid: &str) -> Result<RoleRequest, Response> {
    match req.role.as_str() {
        "pengunjung" => {
            let Some(address) = req.alamat_lengkap.clone() else {
                return Err(reply_error(
                    ApiError::validation_failed("alamatLengkap", "required for pengunjung")
                        .with_request_id(rid),
                ));
            };
            let Some(raw_birth) = req.tanggal_lahir.as_deref() else {
                return Err(reply_error(
                    ApiError::validation_failed("tanggalLahir", "required for pengunjung")
                        .with_request_id(rid),
                ));
            };
            let birth_date = DateText::parse(raw_birth).map_err(|_| {
                reply_error(ApiError::invalid_timestamp("tanggalLahir").with_request_id(rid))
            })?;
            Ok(RoleRequest::Visitor {
                address,
                birth_date,
            })
        }
        "dokter" => {
            let Some(certification_no) = req.nomor_sertifikasi_profesional.clone() else {
                return Err(reply_error(
                    ApiError::validation_failed(
                        "nomorSertifikasiProfesional",
                        "required for dokter",
                    )
                    .with_request_id(rid),
                ));
            };
            Ok(RoleRequest::Veterinarian {
                certification_no,
                specialties: req.spesialisasi.clone(),
            })
        }
        "staff" => {
            let kind = match req.peran.as_deref() {
                Some("PJHXXX") => StaffKind::Keeper,
                Some("ADMXXX") => StaffKind::Admin,
                Some("PLPXXX") => StaffKind::Trainer,
                _ => {
                    return Err(reply_error(
                        ApiError::validation_failed("peran", "unknown staff code")
                            .with_request_id(rid),
                    ))
                }
            };
            Ok(RoleRequest::Staff { kind })
        }
        other => Err(reply_error(
            ApiError::validation_failed("role", &format!("unknown role: {other}"))
                .with_request_id(rid),
        )),
    }
}

pub(crate) async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let rid = state.next_request_id();
    let username = match Username::parse(&req.username) {
        Ok(username) => username,
        Err(e) => {
            return reply_error(ApiError::validation_failed("username", &e.0).with_request_id(&rid))
        }
    };
    let email = match Email::parse(&req.email) {
        Ok(email) => email,
        Err(e) => {
            return reply_error(ApiError::validation_failed("email", &e.0).with_request_id(&rid))
        }
    };
    let role = match role_request(&req, &rid) {
        Ok(role) => role,
        Err(resp) => return resp,
    };
    let registration = NewRegistration {
        username,
        email,
        password: req.password.clone(),
        first_name: req.nama_depan.clone(),
        middle_name: req.nama_tengah.clone(),
        last_name: req.nama_belakang.clone(),
        phone: req.nomor_telepon.clone(),
        role,
    };
    let mut conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::register(&mut conn, &registration) {
        return register_error_response(e, &rid);
    }
    info!(request_id = %rid, username = %registration.username, role = %req.role, "registered");
    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: registration.username.into_inner(),
            role: req.role,
        }),
    )
        .into_response()
}

pub(crate) async fn update_profile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ProfileUpdateRequest>,
) -> Response {
    let rid = state.next_request_id();
    let username = match require_session(&state, &headers, &rid) {
        Ok(username) => username,
        Err(resp) => return resp,
    };
    let email = match Email::parse(&req.email) {
        Ok(email) => email,
        Err(e) => {
            return reply_error(ApiError::validation_failed("email", &e.0).with_request_id(&rid))
        }
    };
    let birth_date = match req.tgl_lahir.as_deref() {
        Some(raw) => match DateText::parse(raw) {
            Ok(date) => Some(date),
            Err(_) => {
                return reply_error(ApiError::invalid_timestamp("tglLahir").with_request_id(&rid))
            }
        },
        None => None,
    };
    let changes = ProfileChanges {
        email,
        first_name: req.nama_depan,
        middle_name: req.nama_tengah,
        last_name: req.nama_belakang,
        phone: req.nomor_telepon,
        address: req.alamat,
        birth_date,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) = sizopi_query::update_profile(&conn, &username, &changes) {
        return record_error_response(e, "profile", &rid);
    }
    info!(request_id = %rid, username = %username, "profile updated");
    Json(StatusMessage::new("profile updated")).into_response()
}

pub(crate) async fn change_password_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ChangePasswordRequest>,
) -> Response {
    let rid = state.next_request_id();
    let username = match require_session(&state, &headers, &rid) {
        Ok(username) => username,
        Err(resp) => return resp,
    };
    let conn = match checkout(&state, &rid) {
        Ok(conn) => conn,
        Err(resp) => return resp,
    };
    if let Err(e) =
        sizopi_query::change_password(&conn, &username, &req.old_password, &req.new_password)
    {
        return auth_error_response(e, &rid);
    }
    info!(request_id = %rid, username = %username, "password changed");
    Json(StatusMessage::new("password changed")).into_response()
}
