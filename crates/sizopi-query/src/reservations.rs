use crate::records::RecordError;
use crate::QueryError;
use rusqlite::{params, Connection};
use sizopi_model::{DateText, Reservation, Username};

fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let username: String = row.get(0)?;
    let visit_date: String = row.get(2)?;
    Ok(Reservation {
        username: Username::parse(&username).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        facility: row.get(1)?,
        visit_date: DateText::parse(&visit_date).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        tickets: row.get(3)?,
        status: row.get(4)?,
    })
}

pub fn list_reservations(conn: &Connection) -> Result<Vec<Reservation>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT username_p, nama_fasilitas, tanggal_kunjungan, jumlah_tiket, status
         FROM reservasi ORDER BY tanggal_kunjungan DESC",
    )?;
    let rows = stmt
        .query_map([], row_to_reservation)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn create_reservation(conn: &Connection, reservation: &Reservation) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO reservasi (username_p, nama_fasilitas, tanggal_kunjungan, jumlah_tiket,
                                status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            reservation.username.as_str(),
            reservation.facility,
            reservation.visit_date.as_str(),
            reservation.tickets,
            reservation.status,
        ],
    )?;
    Ok(())
}

/// Keyed by the full `(visitor, facility, visit date)` triple.
pub fn update_reservation(
    conn: &Connection,
    reservation: &Reservation,
) -> Result<(), RecordError> {
    let affected = conn.execute(
        "UPDATE reservasi SET jumlah_tiket = ?4, status = ?5
         WHERE username_p = ?1 AND nama_fasilitas = ?2 AND tanggal_kunjungan = ?3",
        params![
            reservation.username.as_str(),
            reservation.facility,
            reservation.visit_date.as_str(),
            reservation.tickets,
            reservation.status,
        ],
    )?;
    if affected == 0 {
        return Err(RecordError::NotFound);
    }
    Ok(())
}

pub fn delete_reservation(
    conn: &Connection,
    username: &Username,
    facility: &str,
    visit_date: &DateText,
) -> Result<(), RecordError> {
    let affected = conn.execute(
        "DELETE FROM reservasi
         WHERE username_p = ?1 AND nama_fasilitas = ?2 AND tanggal_kunjungan = ?3",
        params![username.as_str(), facility, visit_date.as_str()],
    )?;
    if affected == 0 {
        return Err(RecordError::NotFound);
    }
    Ok(())
}
