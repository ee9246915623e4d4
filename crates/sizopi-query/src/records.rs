// SPDX-License-Identifier: Apache-2.0

//! Composite-key record services: medical records, feeding entries, and
//! the examination schedule.
//!
//! Every mutation is keyed by `(animal, timestamp)` where the timestamp is
//! canonical text produced by the key constructors in `sizopi-model`.
//! Zero affected rows is a [`RecordError::NotFound`], never a silent
//! success.

use crate::QueryError;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use sizopi_model::{
    AnimalId, DateText, ExaminationKey, ExaminationSlot, FeedingEntry, FeedingKey, MedicalRecord,
    MedicalRecordKey, StampText, Username, FEEDING_STATUS_PENDING,
};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    NotFound,
    Query(QueryError),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "record not found"),
            Self::Query(e) => write!(f, "record operation failed: {e}"),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<rusqlite::Error> for RecordError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Query(QueryError(e.to_string()))
    }
}

impl From<QueryError> for RecordError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

fn affected_to_result(affected: usize) -> Result<(), RecordError> {
    if affected == 0 {
        Err(RecordError::NotFound)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Medical records (`catatan_medis`), date-only key.

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct MedicalRecordChanges {
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub follow_up: Option<String>,
    pub health_status: Option<String>,
}

impl MedicalRecordChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnosis.is_none()
            && self.treatment.is_none()
            && self.follow_up.is_none()
            && self.health_status.is_none()
    }
}

pub fn list_medical_records(conn: &Connection) -> Result<Vec<MedicalRecord>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT id_hewan, username_dh, tanggal_pemeriksaan, status_kesehatan,
                diagnosis, pengobatan, catatan_tindak_lanjut
         FROM catatan_medis
         ORDER BY tanggal_pemeriksaan DESC, id_hewan",
    )?;
    let rows = stmt
        .query_map([], row_to_medical_record)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Records written by one examining vet, joined with the animal name for
/// display. Backs the per-vet listing (`?usernameDh=` on the list route).
pub fn list_medical_records_for_vet(
    conn: &Connection,
    vet: &Username,
) -> Result<Vec<(MedicalRecord, Option<String>)>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT cm.id_hewan, cm.username_dh, cm.tanggal_pemeriksaan, cm.status_kesehatan,
                cm.diagnosis, cm.pengobatan, cm.catatan_tindak_lanjut, h.nama
         FROM catatan_medis cm
         LEFT JOIN hewan h ON cm.id_hewan = h.id
         WHERE cm.username_dh = ?1
         ORDER BY cm.tanggal_pemeriksaan DESC, cm.id_hewan",
    )?;
    let rows = stmt
        .query_map(params![vet.as_str()], |row| {
            Ok((row_to_medical_record(row)?, row.get(7)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn row_to_medical_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<MedicalRecord> {
    let animal_id: String = row.get(0)?;
    let vet: String = row.get(1)?;
    let examined_on: String = row.get(2)?;
    Ok(MedicalRecord {
        animal_id: AnimalId::parse(&animal_id).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        vet_username: Username::parse(&vet).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        examined_on: DateText::parse(&examined_on).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        health_status: row.get(3)?,
        diagnosis: row.get(4)?,
        treatment: row.get(5)?,
        follow_up: row.get(6)?,
    })
}

pub fn create_medical_record(
    conn: &Connection,
    record: &MedicalRecord,
) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO catatan_medis (id_hewan, username_dh, tanggal_pemeriksaan,
                                    status_kesehatan, diagnosis, pengobatan,
                                    catatan_tindak_lanjut)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.animal_id.as_str(),
            record.vet_username.as_str(),
            record.examined_on.as_str(),
            record.health_status,
            record.diagnosis,
            record.treatment,
            record.follow_up,
        ],
    )?;
    Ok(())
}

pub fn update_medical_record(
    conn: &Connection,
    key: &MedicalRecordKey,
    changes: &MedicalRecordChanges,
) -> Result<(), RecordError> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(diagnosis) = &changes.diagnosis {
        sets.push("diagnosis = ?");
        values.push(Value::Text(diagnosis.clone()));
    }
    if let Some(treatment) = &changes.treatment {
        sets.push("pengobatan = ?");
        values.push(Value::Text(treatment.clone()));
    }
    if let Some(follow_up) = &changes.follow_up {
        sets.push("catatan_tindak_lanjut = ?");
        values.push(Value::Text(follow_up.clone()));
    }
    if let Some(status) = &changes.health_status {
        sets.push("status_kesehatan = ?");
        values.push(Value::Text(status.clone()));
    }
    if sets.is_empty() {
        return Err(RecordError::Query(QueryError(
            "empty medical record update".to_string(),
        )));
    }
    values.push(Value::Text(key.animal_id.as_str().to_string()));
    values.push(Value::Text(key.examined_on.as_str().to_string()));

    let sql = format!(
        "UPDATE catatan_medis SET {} WHERE id_hewan = ? AND tanggal_pemeriksaan = ?",
        sets.join(", ")
    );
    let affected = conn.execute(&sql, params_from_iter(values.iter()))?;
    affected_to_result(affected)
}

pub fn delete_medical_record(
    conn: &Connection,
    key: &MedicalRecordKey,
) -> Result<(), RecordError> {
    let affected = conn.execute(
        "DELETE FROM catatan_medis WHERE id_hewan = ?1 AND tanggal_pemeriksaan = ?2",
        params![key.animal_id.as_str(), key.examined_on.as_str()],
    )?;
    affected_to_result(affected)
}

// ---------------------------------------------------------------------------
// Feeding entries (`pakan`), date-time key.

/// Partial update; `reschedule` replaces the key timestamp itself and is
/// already canonical by construction.
#[derive(Debug, Clone, Default)]
pub struct FeedingChanges {
    pub feed_type: Option<String>,
    pub quantity: Option<i64>,
    pub status: Option<String>,
    pub reschedule: Option<StampText>,
}

impl FeedingChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.feed_type.is_none()
            && self.quantity.is_none()
            && self.status.is_none()
            && self.reschedule.is_none()
    }
}

/// Feeding rows joined with animal name/species for list views.
pub fn list_feedings(conn: &Connection) -> Result<Vec<(FeedingEntry, Option<String>, Option<String>)>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT p.id_hewan, p.jadwal, p.jenis, p.jumlah, p.status, h.nama, h.spesies
         FROM pakan p
         LEFT JOIN hewan h ON p.id_hewan = h.id
         ORDER BY p.jadwal DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            let animal_id: String = row.get(0)?;
            let scheduled_at: String = row.get(1)?;
            let entry = FeedingEntry {
                animal_id: AnimalId::parse(&animal_id).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
                scheduled_at: StampText::parse(&scheduled_at).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        1,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
                feed_type: row.get(2)?,
                quantity: row.get(3)?,
                status: row.get(4)?,
            };
            Ok((entry, row.get(5)?, row.get(6)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// New entries start in [`FEEDING_STATUS_PENDING`].
pub fn create_feeding(
    conn: &Connection,
    key: &FeedingKey,
    feed_type: &str,
    quantity: i64,
) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO pakan (id_hewan, jadwal, jenis, jumlah, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            key.animal_id.as_str(),
            key.scheduled_at.as_str(),
            feed_type,
            quantity,
            FEEDING_STATUS_PENDING,
        ],
    )?;
    Ok(())
}

pub fn update_feeding(
    conn: &Connection,
    key: &FeedingKey,
    changes: &FeedingChanges,
) -> Result<(), RecordError> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(feed_type) = &changes.feed_type {
        sets.push("jenis = ?");
        values.push(Value::Text(feed_type.clone()));
    }
    if let Some(quantity) = changes.quantity {
        sets.push("jumlah = ?");
        values.push(Value::Integer(quantity));
    }
    if let Some(status) = &changes.status {
        sets.push("status = ?");
        values.push(Value::Text(status.clone()));
    }
    if let Some(reschedule) = &changes.reschedule {
        sets.push("jadwal = ?");
        values.push(Value::Text(reschedule.as_str().to_string()));
    }
    if sets.is_empty() {
        return Err(RecordError::Query(QueryError(
            "empty feeding update".to_string(),
        )));
    }
    values.push(Value::Text(key.animal_id.as_str().to_string()));
    values.push(Value::Text(key.scheduled_at.as_str().to_string()));

    let sql = format!(
        "UPDATE pakan SET {} WHERE id_hewan = ? AND jadwal = ?",
        sets.join(", ")
    );
    let affected = conn.execute(&sql, params_from_iter(values.iter()))?;
    affected_to_result(affected)
}

pub fn delete_feeding(conn: &Connection, key: &FeedingKey) -> Result<(), RecordError> {
    let affected = conn.execute(
        "DELETE FROM pakan WHERE id_hewan = ?1 AND jadwal = ?2",
        params![key.animal_id.as_str(), key.scheduled_at.as_str()],
    )?;
    affected_to_result(affected)
}

// ---------------------------------------------------------------------------
// Examination schedule (`jadwal_pemeriksaan_kesehatan`), date-only key.

pub fn list_examinations(
    conn: &Connection,
) -> Result<Vec<(ExaminationSlot, Option<String>)>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT j.id_hewan, j.tgl_pemeriksaan_selanjutnya, j.freq_pemeriksaan_rutin, h.nama
         FROM jadwal_pemeriksaan_kesehatan j
         LEFT JOIN hewan h ON j.id_hewan = h.id
         ORDER BY h.nama, j.tgl_pemeriksaan_selanjutnya",
    )?;
    let rows = stmt
        .query_map([], |row| {
            let animal_id: String = row.get(0)?;
            let next_visit: String = row.get(1)?;
            let slot = ExaminationSlot {
                animal_id: AnimalId::parse(&animal_id).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
                next_visit: DateText::parse(&next_visit).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        1,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
                frequency_months: row.get(2)?,
            };
            Ok((slot, row.get(3)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn create_examination(conn: &Connection, slot: &ExaminationSlot) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO jadwal_pemeriksaan_kesehatan
             (id_hewan, tgl_pemeriksaan_selanjutnya, freq_pemeriksaan_rutin)
         VALUES (?1, ?2, ?3)",
        params![
            slot.animal_id.as_str(),
            slot.next_visit.as_str(),
            slot.frequency_months,
        ],
    )?;
    Ok(())
}

/// Rekey/update one slot: the original date identifies the row, the new
/// date and frequency replace its contents.
pub fn update_examination(
    conn: &Connection,
    key: &ExaminationKey,
    new_date: &DateText,
    frequency_months: i64,
) -> Result<(), RecordError> {
    let affected = conn.execute(
        "UPDATE jadwal_pemeriksaan_kesehatan
         SET tgl_pemeriksaan_selanjutnya = ?1, freq_pemeriksaan_rutin = ?2
         WHERE id_hewan = ?3 AND tgl_pemeriksaan_selanjutnya = ?4",
        params![
            new_date.as_str(),
            frequency_months,
            key.animal_id.as_str(),
            key.next_visit.as_str(),
        ],
    )?;
    affected_to_result(affected)
}

pub fn delete_examination(conn: &Connection, key: &ExaminationKey) -> Result<(), RecordError> {
    let affected = conn.execute(
        "DELETE FROM jadwal_pemeriksaan_kesehatan
         WHERE id_hewan = ?1 AND tgl_pemeriksaan_selanjutnya = ?2",
        params![key.animal_id.as_str(), key.next_visit.as_str()],
    )?;
    affected_to_result(affected)
}
