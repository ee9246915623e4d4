use rusqlite::Connection;
use sizopi_model::{
    Animal, AnimalId, DateText, Email, ExaminationKey, ExaminationSlot, FeedingKey, MedicalRecord,
    MedicalRecordKey, Username, FEEDING_STATUS_PENDING,
};
use sizopi_query::{
    create_animal, create_examination, create_feeding, create_medical_record, delete_feeding,
    delete_medical_record, init_schema, list_feedings, list_medical_records_for_vet, register,
    update_examination, update_feeding, update_medical_record, FeedingChanges,
    MedicalRecordChanges, NewRegistration, RecordError, RoleRequest,
};

fn seeded_db() -> Connection {
    let mut conn = Connection::open_in_memory().expect("open in-memory db");
    init_schema(&conn).expect("init schema");
    for id in ["3", "7"] {
        create_animal(
            &conn,
            &Animal {
                id: AnimalId::parse(id).expect("animal id"),
                name: Some(format!("hewan-{id}")),
                species: "Panthera tigris".to_string(),
                origin: "Sumatra".to_string(),
                birth_date: Some(DateText::parse("2019-04-16").expect("date")),
                health_status: "Sehat".to_string(),
                habitat: None,
                photo_url: "https://zoo.test/t.jpg".to_string(),
            },
        )
        .expect("seed animal");
    }
    register(
        &mut conn,
        &NewRegistration {
            username: Username::parse("drh.siti").expect("username"),
            email: Email::parse("doc@zoo.test").expect("email"),
            password: "x".to_string(),
            first_name: "Siti".to_string(),
            middle_name: None,
            last_name: "Rahma".to_string(),
            phone: "0812".to_string(),
            role: RoleRequest::Veterinarian {
                certification_no: "STR-007".to_string(),
                specialties: vec![],
            },
        },
    )
    .expect("seed vet");
    conn
}

fn medical_record(animal: &str, raw_date: &str) -> MedicalRecord {
    MedicalRecord {
        animal_id: AnimalId::parse(animal).expect("animal id"),
        vet_username: Username::parse("drh.siti").expect("username"),
        examined_on: DateText::parse(raw_date).expect("date"),
        health_status: "Sehat".to_string(),
        diagnosis: None,
        treatment: None,
        follow_up: None,
    }
}

#[test]
fn date_only_key_round_trips_between_client_forms() {
    let conn = seeded_db();
    create_medical_record(&conn, &medical_record("7", "2024-05-01")).expect("create record");

    // Client later echoes the key as a full ISO instant; the key
    // constructor must land back on the stored text.
    let key = MedicalRecordKey::parse("7", "2024-05-01T00:00:00.000Z").expect("key");
    assert_eq!(key.examined_on.as_str(), "2024-05-01");
    update_medical_record(
        &conn,
        &key,
        &MedicalRecordChanges {
            diagnosis: Some("flu burung".to_string()),
            ..MedicalRecordChanges::default()
        },
    )
    .expect("update via iso-form key");

    let diagnosis: Option<String> = conn
        .query_row(
            "SELECT diagnosis FROM catatan_medis
             WHERE id_hewan = '7' AND tanggal_pemeriksaan = '2024-05-01'",
            [],
            |row| row.get(0),
        )
        .expect("read back");
    assert_eq!(diagnosis.as_deref(), Some("flu burung"));
}

#[test]
fn feeding_delete_strips_zone_suffix_to_match_stored_wall_clock() {
    let conn = seeded_db();
    let key = FeedingKey::parse("3", "2024-05-01 08:00:00").expect("stored-form key");
    create_feeding(&conn, &key, "daging", 5).expect("create feeding");

    // The client sends the same wall-clock instant with a Z suffix.
    let echoed = FeedingKey::parse("3", "2024-05-01T08:00:00.000Z").expect("echoed key");
    assert_eq!(echoed, key);
    delete_feeding(&conn, &echoed).expect("delete via echoed key");

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM pakan", [], |row| row.get(0))
        .expect("count");
    assert_eq!(remaining, 0);
}

#[test]
fn missing_key_is_not_found_never_silent_success() {
    let conn = seeded_db();
    let med_key = MedicalRecordKey::parse("7", "2030-01-01").expect("key");
    assert_eq!(
        update_medical_record(
            &conn,
            &med_key,
            &MedicalRecordChanges {
                diagnosis: Some("x".to_string()),
                ..MedicalRecordChanges::default()
            },
        )
        .expect_err("update absent record"),
        RecordError::NotFound
    );
    assert_eq!(
        delete_medical_record(&conn, &med_key).expect_err("delete absent record"),
        RecordError::NotFound
    );

    let feed_key = FeedingKey::parse("3", "2030-01-01 09:00:00").expect("key");
    assert_eq!(
        delete_feeding(&conn, &feed_key).expect_err("delete absent feeding"),
        RecordError::NotFound
    );
}

#[test]
fn feeding_reschedule_rewrites_the_key_timestamp() {
    let conn = seeded_db();
    let key = FeedingKey::parse("3", "2024-05-01T08:00:00").expect("key");
    create_feeding(&conn, &key, "daging", 5).expect("create feeding");
    assert_eq!(
        list_feedings(&conn).expect("list")[0].0.status,
        FEEDING_STATUS_PENDING
    );

    update_feeding(
        &conn,
        &key,
        &FeedingChanges {
            status: Some("Selesai Diberikan".to_string()),
            reschedule: Some(
                sizopi_model::StampText::parse("2024-05-02T08:00:00.000Z").expect("new stamp"),
            ),
            ..FeedingChanges::default()
        },
    )
    .expect("reschedule");

    let stored: String = conn
        .query_row("SELECT jadwal FROM pakan WHERE id_hewan = '3'", [], |row| {
            row.get(0)
        })
        .expect("read back");
    assert_eq!(stored, "2024-05-02 08:00:00");
    // The old key no longer matches anything.
    assert_eq!(
        delete_feeding(&conn, &key).expect_err("old key is gone"),
        RecordError::NotFound
    );
}

#[test]
fn examination_update_rekeys_by_original_date() {
    let conn = seeded_db();
    create_examination(
        &conn,
        &ExaminationSlot {
            animal_id: AnimalId::parse("7").expect("animal id"),
            next_visit: DateText::parse("2024-06-01").expect("date"),
            frequency_months: 3,
        },
    )
    .expect("create slot");

    let key = ExaminationKey::parse("7", "2024-06-01T00:00:00.000Z").expect("key");
    update_examination(&conn, &key, &DateText::parse("2024-09-01").expect("date"), 6)
        .expect("rekey slot");

    let (stored_date, freq): (String, i64) = conn
        .query_row(
            "SELECT tgl_pemeriksaan_selanjutnya, freq_pemeriksaan_rutin
             FROM jadwal_pemeriksaan_kesehatan WHERE id_hewan = '7'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("read back");
    assert_eq!(stored_date, "2024-09-01");
    assert_eq!(freq, 6);

    assert_eq!(
        update_examination(&conn, &key, &DateText::parse("2024-10-01").expect("date"), 6)
            .expect_err("original key no longer matches"),
        RecordError::NotFound
    );
}

#[test]
fn vet_listing_returns_only_that_vets_records_with_animal_names() {
    let mut conn = seeded_db();
    register(
        &mut conn,
        &NewRegistration {
            username: Username::parse("drh.bono").expect("username"),
            email: Email::parse("bono@zoo.test").expect("email"),
            password: "x".to_string(),
            first_name: "Bono".to_string(),
            middle_name: None,
            last_name: "Putra".to_string(),
            phone: "0813".to_string(),
            role: RoleRequest::Veterinarian {
                certification_no: "STR-008".to_string(),
                specialties: vec![],
            },
        },
    )
    .expect("seed second vet");

    create_medical_record(&conn, &medical_record("7", "2024-05-01")).expect("siti's record");
    let mut other = medical_record("3", "2024-05-02");
    other.vet_username = Username::parse("drh.bono").expect("username");
    create_medical_record(&conn, &other).expect("bono's record");

    let siti = Username::parse("drh.siti").expect("username");
    let rows = list_medical_records_for_vet(&conn, &siti).expect("filtered list");
    assert_eq!(rows.len(), 1);
    let (record, animal_name) = &rows[0];
    assert_eq!(record.vet_username.as_str(), "drh.siti");
    assert_eq!(record.animal_id.as_str(), "7");
    assert_eq!(animal_name.as_deref(), Some("hewan-7"));

    let nobody = Username::parse("drh.ghost").expect("username");
    assert!(list_medical_records_for_vet(&conn, &nobody)
        .expect("empty list")
        .is_empty());
}

#[test]
fn duplicate_timestamp_for_same_animal_is_rejected_by_the_key() {
    let conn = seeded_db();
    let key = FeedingKey::parse("3", "2024-05-01 08:00:00").expect("key");
    create_feeding(&conn, &key, "daging", 5).expect("first insert");
    assert!(
        create_feeding(&conn, &key, "ikan", 2).is_err(),
        "second insert with the same (animal, timestamp) must violate the primary key"
    );
}
