// SPDX-License-Identifier: Apache-2.0

//! Composite key value objects.
//!
//! A key can only be built through its `parse` constructor, which runs the
//! raw caller-supplied timestamp through the shared canonicalizer. Holding
//! a `DateText`/`StampText` therefore guarantees the stored textual form.

use crate::ident::{AnimalId, ValidationError};
use serde::{Deserialize, Serialize};
use sizopi_core::{canonical_date, canonical_datetime};
use std::fmt::{Display, Formatter};

/// Canonical date-only key text, `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DateText(String);

impl DateText {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        canonical_date(raw)
            .map(Self)
            .map_err(|e| ValidationError(e.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DateText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical date-time key text, `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct StampText(String);

impl StampText {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        canonical_datetime(raw)
            .map(Self)
            .map_err(|e| ValidationError(e.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StampText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `(animal, examination date)` — identifies one medical record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MedicalRecordKey {
    pub animal_id: AnimalId,
    pub examined_on: DateText,
}

impl MedicalRecordKey {
    pub fn parse(animal_id: &str, raw_date: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            animal_id: AnimalId::parse(animal_id)?,
            examined_on: DateText::parse(raw_date)?,
        })
    }
}

/// `(animal, scheduled feeding time)` — identifies one feeding entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedingKey {
    pub animal_id: AnimalId,
    pub scheduled_at: StampText,
}

impl FeedingKey {
    pub fn parse(animal_id: &str, raw_stamp: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            animal_id: AnimalId::parse(animal_id)?,
            scheduled_at: StampText::parse(raw_stamp)?,
        })
    }
}

/// `(animal, next examination date)` — identifies one schedule slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExaminationKey {
    pub animal_id: AnimalId,
    pub next_visit: DateText,
}

impl ExaminationKey {
    pub fn parse(animal_id: &str, raw_date: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            animal_id: AnimalId::parse(animal_id)?,
            next_visit: DateText::parse(raw_date)?,
        })
    }
}
