// SPDX-License-Identifier: Apache-2.0

//! Transactional account creation: one `pengguna` row plus exactly one
//! subtype row, all-or-nothing.

use crate::QueryError;
use rusqlite::{params, Connection};
use sizopi_core::{hash_password, random_token};
use sizopi_model::{DateText, Email, StaffKind, Username, ValidationError};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequest {
    Visitor {
        address: String,
        birth_date: DateText,
    },
    Veterinarian {
        certification_no: String,
        specialties: Vec<String>,
    },
    Staff {
        kind: StaffKind,
    },
}

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub username: Username,
    pub email: Email,
    pub password: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone: String,
    pub role: RoleRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    DuplicateUsername,
    DuplicateEmail,
    Invalid(ValidationError),
    Query(QueryError),
}

impl Display for RegisterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateUsername => write!(f, "username is already taken"),
            Self::DuplicateEmail => write!(f, "email is already registered"),
            Self::Invalid(e) => write!(f, "invalid registration input: {e}"),
            Self::Query(e) => write!(f, "registration failed: {e}"),
        }
    }
}

impl std::error::Error for RegisterError {}

fn classify(e: rusqlite::Error) -> RegisterError {
    if let rusqlite::Error::SqliteFailure(code, Some(ref msg)) = e {
        if code.code == rusqlite::ErrorCode::ConstraintViolation {
            if msg.contains("pengguna.username") {
                return RegisterError::DuplicateUsername;
            }
            if msg.contains("pengguna.email") {
                return RegisterError::DuplicateEmail;
            }
        }
    }
    RegisterError::Query(QueryError(e.to_string()))
}

/// Insert the account row and its single subtype row inside one
/// transaction. Any failure rolls the whole registration back, so a
/// username never persists without its subtype.
pub fn register(conn: &mut Connection, reg: &NewRegistration) -> Result<(), RegisterError> {
    let password_hash = hash_password(&reg.password)
        .map_err(|e| RegisterError::Query(QueryError(e.to_string())))?;

    let tx = conn.transaction().map_err(classify)?;

    tx.execute(
        "INSERT INTO pengguna (username, email, password_hash, nama_depan, nama_tengah,
                               nama_belakang, no_telepon)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            reg.username.as_str(),
            reg.email.as_str(),
            password_hash,
            reg.first_name,
            reg.middle_name,
            reg.last_name,
            reg.phone,
        ],
    )
    .map_err(classify)?;

    match &reg.role {
        RoleRequest::Visitor {
            address,
            birth_date,
        } => {
            tx.execute(
                "INSERT INTO pengunjung (username_p, alamat, tgl_lahir) VALUES (?1, ?2, ?3)",
                params![reg.username.as_str(), address, birth_date.as_str()],
            )
            .map_err(classify)?;
        }
        RoleRequest::Veterinarian {
            certification_no,
            specialties,
        } => {
            tx.execute(
                "INSERT INTO dokter_hewan (username_dh, no_str) VALUES (?1, ?2)",
                params![reg.username.as_str(), certification_no],
            )
            .map_err(classify)?;
            for specialty in specialties {
                tx.execute(
                    "INSERT OR IGNORE INTO spesialisasi (username_sh, nama_spesialisasi)
                     VALUES (?1, ?2)",
                    params![reg.username.as_str(), specialty],
                )
                .map_err(classify)?;
            }
        }
        RoleRequest::Staff { kind } => {
            let staff_id = random_token(9);
            let sql = match kind {
                StaffKind::Keeper => {
                    "INSERT INTO penjaga_hewan (username_jh, id_staf) VALUES (?1, ?2)"
                }
                StaffKind::Admin => "INSERT INTO staf_admin (username_sa, id_staf) VALUES (?1, ?2)",
                StaffKind::Trainer => {
                    "INSERT INTO pelatih_hewan (username_lh, id_staf) VALUES (?1, ?2)"
                }
            };
            tx.execute(sql, params![reg.username.as_str(), staff_id])
                .map_err(classify)?;
        }
    }

    tx.commit().map_err(classify)
}
