#![forbid(unsafe_code)]
//! Every SQL statement in the system lives in this crate. Functions take a
//! `&Connection` (or `&mut` where a transaction is opened) so callers own
//! pooling; no statement interpolates caller data — parameters throughout.

mod animals;
mod auth;
mod habitats;
mod profile;
mod records;
mod register;
mod reservations;
mod schema;

pub use animals::{create_animal, delete_animal, get_animal, list_animals, update_animal};
pub use auth::{account_by_username, resolve_role, verify_credentials, AuthError};
pub use habitats::{create_habitat, delete_habitat, get_habitat, list_habitats, update_habitat};
pub use profile::{change_password, update_profile, ProfileChanges};
pub use records::{
    create_examination, create_feeding, create_medical_record, delete_examination, delete_feeding,
    delete_medical_record, list_examinations, list_feedings, list_medical_records,
    list_medical_records_for_vet, update_examination, update_feeding, update_medical_record,
    FeedingChanges,
    MedicalRecordChanges, RecordError,
};
pub use register::{register, NewRegistration, RegisterError, RoleRequest};
pub use reservations::{
    create_reservation, delete_reservation, list_reservations, update_reservation,
};
pub use schema::init_schema;

use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "sizopi-query";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError(pub String);

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for QueryError {}

impl From<rusqlite::Error> for QueryError {
    fn from(e: rusqlite::Error) -> Self {
        Self(e.to_string())
    }
}
