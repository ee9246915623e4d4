use crate::ident::{Email, Username};
use serde::{Deserialize, Serialize};

/// Base identity record, one row in `pengguna`.
///
/// `password_hash` is an argon2id PHC string; it never leaves the server
/// process. Wire DTOs carry every other field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: Username,
    pub email: Email,
    pub password_hash: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub phone: String,
}
