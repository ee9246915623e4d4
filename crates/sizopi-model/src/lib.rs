#![forbid(unsafe_code)]
//! Sizopi domain model SSOT.
//!
//! Validated identifier newtypes, the account/role shapes, and the
//! composite key value objects shared by the query layer and the HTTP
//! surface. Key constructors canonicalize timestamps so that a key can
//! only ever hold the stored textual form.

mod account;
mod entity;
mod ident;
mod keys;
mod role;

pub use account::Account;
pub use entity::{
    Animal, ExaminationSlot, FeedingEntry, Habitat, MedicalRecord, Reservation,
    FEEDING_STATUS_PENDING,
};
pub use ident::{AnimalId, Email, Username, ValidationError, EMAIL_MAX_LEN, USERNAME_MAX_LEN};
pub use keys::{DateText, ExaminationKey, FeedingKey, MedicalRecordKey, StampText};
pub use role::{Role, StaffKind};

pub const CRATE_NAME: &str = "sizopi-model";
