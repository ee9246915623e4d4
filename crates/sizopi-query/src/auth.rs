// SPDX-License-Identifier: Apache-2.0

//! Credential verification and role resolution.

use crate::QueryError;
use rusqlite::{params, Connection, OptionalExtension};
use sizopi_core::verify_password;
use sizopi_model::{Account, Email, Role, StaffKind, Username, ValidationError};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No account for this email (or username, on self-service paths).
    /// Surfaces as the same 401 as
    /// `BadPassword`; the distinction exists for logs and tests only.
    UnknownAccount,
    BadPassword,
    Invalid(ValidationError),
    Query(QueryError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAccount => write!(f, "no matching account"),
            Self::BadPassword => write!(f, "password mismatch"),
            Self::Invalid(e) => write!(f, "invalid credential input: {e}"),
            Self::Query(e) => write!(f, "credential lookup failed: {e}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<QueryError> for AuthError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

impl From<rusqlite::Error> for AuthError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Query(QueryError(e.to_string()))
    }
}

fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    // Stored values were validated at registration; a parse failure here
    // means the row is corrupt and surfaces as a conversion error.
    let username: String = row.get(0)?;
    let username = Username::parse(&username).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let email: String = row.get(1)?;
    let email = Email::parse(&email).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Account {
        username,
        email,
        password_hash: row.get(2)?,
        first_name: row.get(3)?,
        middle_name: row.get(4)?,
        last_name: row.get(5)?,
        phone: row.get(6)?,
    })
}

/// Look up the account by email and verify the submitted password against
/// the stored argon2id hash. Read-only.
pub fn verify_credentials(
    conn: &Connection,
    email: &str,
    password: &str,
) -> Result<Account, AuthError> {
    let email = Email::parse(email).map_err(AuthError::Invalid)?;
    let found = conn
        .query_row(
            "SELECT username, email, password_hash, nama_depan, nama_tengah, nama_belakang,
                    no_telepon
             FROM pengguna WHERE email = ?1",
            params![email.as_str()],
            row_to_account,
        )
        .optional()?;
    let Some(account) = found else {
        return Err(AuthError::UnknownAccount);
    };
    let ok = verify_password(password, &account.password_hash)
        .map_err(|e| AuthError::Query(QueryError(e.to_string())))?;
    if !ok {
        return Err(AuthError::BadPassword);
    }
    Ok(account)
}

pub fn account_by_username(
    conn: &Connection,
    username: &Username,
) -> Result<Option<Account>, QueryError> {
    let found = conn
        .query_row(
            "SELECT username, email, password_hash, nama_depan, nama_tengah, nama_belakang,
                    no_telepon
             FROM pengguna WHERE username = ?1",
            params![username.as_str()],
            row_to_account,
        )
        .optional()?;
    Ok(found)
}

const STAFF_PROBES: &[(&str, &str, StaffKind)] = &[
    ("penjaga_hewan", "username_jh", StaffKind::Keeper),
    ("staf_admin", "username_sa", StaffKind::Admin),
    ("pelatih_hewan", "username_lh", StaffKind::Trainer),
];

/// Probe the five subtype tables in fixed priority order — visitor, vet,
/// keeper, admin, trainer — and stop at the first hit.
///
/// No subtype row is not an error: the account resolves to
/// [`Role::Unknown`] and callers decide what to do with it.
pub fn resolve_role(conn: &Connection, username: &Username) -> Result<Role, QueryError> {
    let visitor = conn
        .query_row(
            "SELECT alamat, tgl_lahir FROM pengunjung WHERE username_p = ?1",
            params![username.as_str()],
            |row| {
                Ok(Role::Visitor {
                    address: row.get(0)?,
                    birth_date: row.get(1)?,
                })
            },
        )
        .optional()?;
    if let Some(role) = visitor {
        return Ok(role);
    }

    let certification: Option<String> = conn
        .query_row(
            "SELECT no_str FROM dokter_hewan WHERE username_dh = ?1",
            params![username.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(certification_no) = certification {
        let mut stmt = conn.prepare(
            "SELECT DISTINCT nama_spesialisasi FROM spesialisasi
             WHERE username_sh = ?1 ORDER BY nama_spesialisasi",
        )?;
        let specialties = stmt
            .query_map(params![username.as_str()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Role::Veterinarian {
            certification_no,
            specialties,
        });
    }

    for (table, column, kind) in STAFF_PROBES {
        // Table and column names come from the constant list above, never
        // from the caller.
        let staff_id: Option<String> = conn
            .query_row(
                &format!("SELECT id_staf FROM {table} WHERE {column} = ?1"),
                params![username.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(staff_id) = staff_id {
            return Ok(Role::Staff {
                kind: *kind,
                staff_id,
            });
        }
    }

    Ok(Role::Unknown)
}
