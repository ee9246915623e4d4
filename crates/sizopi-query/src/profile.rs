// SPDX-License-Identifier: Apache-2.0

//! Account self-service: profile edits and password changes.

use crate::auth::AuthError;
use crate::records::RecordError;
use crate::QueryError;
use rusqlite::{params, Connection, OptionalExtension};
use sizopi_core::{hash_password, verify_password};
use sizopi_model::{DateText, Email, Username};

#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub email: Email,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone: String,
    /// Visitor-only fields; both statements run when either is present.
    pub address: Option<String>,
    pub birth_date: Option<DateText>,
}

/// Update the base account row and, when visitor fields are supplied, the
/// `pengunjung` row. The two statements are not atomic; the second touches
/// a different table and a failure there leaves the base row updated
/// (observed behavior of the original, kept as-is).
pub fn update_profile(
    conn: &Connection,
    username: &Username,
    changes: &ProfileChanges,
) -> Result<(), RecordError> {
    let affected = conn.execute(
        "UPDATE pengguna SET email = ?2, nama_depan = ?3, nama_tengah = ?4,
                             nama_belakang = ?5, no_telepon = ?6
         WHERE username = ?1",
        params![
            username.as_str(),
            changes.email.as_str(),
            changes.first_name,
            changes.middle_name,
            changes.last_name,
            changes.phone,
        ],
    )?;
    if affected == 0 {
        return Err(RecordError::NotFound);
    }

    if changes.address.is_some() || changes.birth_date.is_some() {
        conn.execute(
            "UPDATE pengunjung SET alamat = COALESCE(?2, alamat),
                                   tgl_lahir = COALESCE(?3, tgl_lahir)
             WHERE username_p = ?1",
            params![
                username.as_str(),
                changes.address,
                changes.birth_date.as_ref().map(DateText::as_str),
            ],
        )?;
    }
    Ok(())
}

/// Verify the old password, then store a fresh hash of the new one.
pub fn change_password(
    conn: &Connection,
    username: &Username,
    old_password: &str,
    new_password: &str,
) -> Result<(), AuthError> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT password_hash FROM pengguna WHERE username = ?1",
            params![username.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| AuthError::Query(QueryError(e.to_string())))?;
    let Some(stored) = stored else {
        return Err(AuthError::UnknownAccount);
    };

    let ok = verify_password(old_password, &stored)
        .map_err(|e| AuthError::Query(QueryError(e.to_string())))?;
    if !ok {
        return Err(AuthError::BadPassword);
    }

    let new_hash = hash_password(new_password)
        .map_err(|e| AuthError::Query(QueryError(e.to_string())))?;
    conn.execute(
        "UPDATE pengguna SET password_hash = ?2 WHERE username = ?1",
        params![username.as_str(), new_hash],
    )
    .map_err(|e| AuthError::Query(QueryError(e.to_string())))?;
    Ok(())
}
