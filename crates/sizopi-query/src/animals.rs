use crate::records::RecordError;
use crate::QueryError;
use rusqlite::{params, Connection, OptionalExtension};
use sizopi_model::{Animal, AnimalId, DateText};

fn row_to_animal(row: &rusqlite::Row<'_>) -> rusqlite::Result<Animal> {
    let id: String = row.get(0)?;
    let birth_date: Option<String> = row.get(4)?;
    Ok(Animal {
        id: AnimalId::parse(&id).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?,
        name: row.get(1)?,
        species: row.get(2)?,
        origin: row.get(3)?,
        birth_date: birth_date
            .map(|raw| {
                DateText::parse(&raw).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })
            })
            .transpose()?,
        health_status: row.get(5)?,
        habitat: row.get(6)?,
        photo_url: row.get(7)?,
    })
}

const ANIMAL_COLUMNS: &str = "id, nama, spesies, asal_hewan, tanggal_lahir, status_kesehatan,
                              nama_habitat, url_foto";

pub fn list_animals(conn: &Connection) -> Result<Vec<Animal>, QueryError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ANIMAL_COLUMNS} FROM hewan ORDER BY nama, id"
    ))?;
    let rows = stmt
        .query_map([], row_to_animal)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_animal(conn: &Connection, id: &AnimalId) -> Result<Option<Animal>, QueryError> {
    let found = conn
        .query_row(
            &format!("SELECT {ANIMAL_COLUMNS} FROM hewan WHERE id = ?1"),
            params![id.as_str()],
            row_to_animal,
        )
        .optional()?;
    Ok(found)
}

pub fn create_animal(conn: &Connection, animal: &Animal) -> Result<(), QueryError> {
    conn.execute(
        "INSERT INTO hewan (id, nama, spesies, asal_hewan, tanggal_lahir, status_kesehatan,
                            nama_habitat, url_foto)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            animal.id.as_str(),
            animal.name,
            animal.species,
            animal.origin,
            animal.birth_date.as_ref().map(DateText::as_str),
            animal.health_status,
            animal.habitat,
            animal.photo_url,
        ],
    )?;
    Ok(())
}

pub fn update_animal(conn: &Connection, animal: &Animal) -> Result<(), RecordError> {
    let affected = conn.execute(
        "UPDATE hewan SET nama = ?2, spesies = ?3, asal_hewan = ?4, tanggal_lahir = ?5,
                          status_kesehatan = ?6, nama_habitat = ?7, url_foto = ?8
         WHERE id = ?1",
        params![
            animal.id.as_str(),
            animal.name,
            animal.species,
            animal.origin,
            animal.birth_date.as_ref().map(DateText::as_str),
            animal.health_status,
            animal.habitat,
            animal.photo_url,
        ],
    )?;
    if affected == 0 {
        return Err(RecordError::NotFound);
    }
    Ok(())
}

pub fn delete_animal(conn: &Connection, id: &AnimalId) -> Result<(), RecordError> {
    let affected = conn.execute("DELETE FROM hewan WHERE id = ?1", params![id.as_str()])?;
    if affected == 0 {
        return Err(RecordError::NotFound);
    }
    Ok(())
}
