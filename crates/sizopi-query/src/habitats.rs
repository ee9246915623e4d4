use crate::records::RecordError;
use crate::QueryError;
use rusqlite::{params, Connection, OptionalExtension};
use sizopi_model::Habitat;

fn row_to_habitat(row: &rusqlite::Row<'_>) -> rusqlite::Result<Habitat> {
    Ok(Habitat {
        name: row.get(0)?,
        area: row.get(1)?,
        capacity: row.get(2)?,
        status: row.get(3)?,
    })
}

pub fn list_habitats(conn: &Connection) -> Result<Vec<Habitat>, QueryError> {
    let mut stmt =
        conn.prepare("SELECT nama, luas_area, kapasitas, status FROM habitat ORDER BY nama")?;
    let rows = stmt
        .query_map([], row_to_habitat)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_habitat(conn: &Connection, name: &str) -> Result<Option<Habitat>, QueryError> {
    let found = conn
        .query_row(
            "SELECT nama, luas_area, kapasitas, status FROM habitat WHERE nama = ?1",
            params![name],
            row_to_habitat,
        )
        .optional()?;
    Ok(found)
}

pub fn create_habitat(conn: &Connection, habitat: &Habitat) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO habitat (nama, luas_area, kapasitas, status) VALUES (?1, ?2, ?3, ?4)",
        params![
            habitat.name,
            habitat.area,
            habitat.capacity,
            habitat.status
        ],
    )?;
    Ok(())
}

pub fn update_habitat(conn: &Connection, habitat: &Habitat) -> Result<(), RecordError> {
    let affected = conn.execute(
        "UPDATE habitat SET luas_area = ?2, kapasitas = ?3, status = ?4 WHERE nama = ?1",
        params![
            habitat.name,
            habitat.area,
            habitat.capacity,
            habitat.status
        ],
    )?;
    if affected == 0 {
        return Err(RecordError::NotFound);
    }
    Ok(())
}

pub fn delete_habitat(conn: &Connection, name: &str) -> Result<(), RecordError> {
    let affected = conn.execute("DELETE FROM habitat WHERE nama = ?1", params![name])?;
    if affected == 0 {
        return Err(RecordError::NotFound);
    }
    Ok(())
}
