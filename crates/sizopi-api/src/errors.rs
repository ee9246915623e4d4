// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sizopi_model::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    InvalidTimestamp,
    InvalidCredential,
    Unauthorized,
    NotFound,
    DuplicateKey,
    Internal,
}

impl ApiErrorCode {
    /// HTTP status this code maps to at the boundary.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ValidationFailed | Self::InvalidTimestamp | Self::DuplicateKey => 400,
            Self::InvalidCredential | Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn validation_failed(field: &str, reason: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            format!("invalid field: {field}"),
            json!({"field_errors": [{"field": field, "reason": reason}]}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn invalid_timestamp(field: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidTimestamp,
            format!("unparseable timestamp in field: {field}"),
            json!({"field": field}),
            "req-unknown",
        )
    }

    /// Deliberately identical for unknown email and wrong password, so the
    /// endpoint cannot be used to enumerate accounts.
    #[must_use]
    pub fn invalid_credential() -> Self {
        Self::new(
            ApiErrorCode::InvalidCredential,
            "email or password is incorrect",
            json!({}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(
            ApiErrorCode::Unauthorized,
            "missing or expired session token",
            json!({}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self::new(
            ApiErrorCode::NotFound,
            format!("{resource} not found"),
            json!({"resource": resource}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn duplicate(field: &str) -> Self {
        Self::new(
            ApiErrorCode::DuplicateKey,
            format!("{field} is already taken"),
            json!({"field": field}),
            "req-unknown",
        )
    }

    /// Generic 500 body; the diagnostic detail stays in server logs only.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            ApiErrorCode::Internal,
            "internal error",
            json!({}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = request_id.to_string();
        self
    }
}

/// Map a resolved role onto the original wire shape:
/// `("dokter", {"no_STR": ..., "spesialisasi": [...]})` and friends.
#[must_use]
pub fn role_wire(role: &Role) -> (&'static str, Value) {
    let data = match role {
        Role::Visitor {
            address,
            birth_date,
        } => json!({"alamat": address, "tgl_lahir": birth_date}),
        Role::Veterinarian {
            certification_no,
            specialties,
        } => json!({"no_STR": certification_no, "spesialisasi": specialties}),
        Role::Staff { kind, staff_id } => {
            json!({"staffType": kind.as_str(), "idStaf": staff_id})
        }
        Role::Unknown => Value::Null,
    };
    (role.label(), data)
}
