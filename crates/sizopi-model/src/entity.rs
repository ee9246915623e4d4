use crate::ident::{AnimalId, Username};
use crate::keys::{DateText, StampText};
use serde::{Deserialize, Serialize};

/// Status a feeding entry is created with.
pub const FEEDING_STATUS_PENDING: &str = "Menunggu Pemberian";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: Option<String>,
    pub species: String,
    pub origin: String,
    pub birth_date: Option<DateText>,
    pub health_status: String,
    pub habitat: Option<String>,
    pub photo_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habitat {
    pub name: String,
    pub area: f64,
    pub capacity: i64,
    pub status: String,
}

/// Keyed by `(visitor, facility, visit date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub username: Username,
    pub facility: String,
    pub visit_date: DateText,
    pub tickets: i64,
    pub status: String,
}

/// Keyed by `(animal, examined_on)`; see [`crate::MedicalRecordKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub animal_id: AnimalId,
    pub vet_username: Username,
    pub examined_on: DateText,
    pub health_status: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub follow_up: Option<String>,
}

/// Keyed by `(animal, scheduled_at)`; see [`crate::FeedingKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingEntry {
    pub animal_id: AnimalId,
    pub scheduled_at: StampText,
    pub feed_type: String,
    pub quantity: i64,
    pub status: String,
}

/// Keyed by `(animal, next_visit)`; see [`crate::ExaminationKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationSlot {
    pub animal_id: AnimalId,
    pub next_visit: DateText,
    pub frequency_months: i64,
}
