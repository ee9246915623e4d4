use rusqlite::{params, Connection};
use sizopi_model::{DateText, Email, Role, StaffKind, Username};
use sizopi_query::{
    init_schema, register, resolve_role, verify_credentials, AuthError, NewRegistration,
    RoleRequest,
};

fn fresh_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    init_schema(&conn).expect("init schema");
    conn
}

fn registration(username: &str, email: &str, role: RoleRequest) -> NewRegistration {
    NewRegistration {
        username: Username::parse(username).expect("username"),
        email: Email::parse(email).expect("email"),
        password: "x".to_string(),
        first_name: "Siti".to_string(),
        middle_name: None,
        last_name: "Rahma".to_string(),
        phone: "0812".to_string(),
        role,
    }
}

#[test]
fn vet_with_no_specialties_logs_in_as_dokter_with_empty_list() {
    let mut conn = fresh_db();
    register(
        &mut conn,
        &registration(
            "drh.siti",
            "doc@zoo.test",
            RoleRequest::Veterinarian {
                certification_no: "STR-007".to_string(),
                specialties: vec![],
            },
        ),
    )
    .expect("register vet");

    let account = verify_credentials(&conn, "doc@zoo.test", "x").expect("login");
    let role = resolve_role(&conn, &account.username).expect("resolve role");
    assert_eq!(role.label(), "dokter");
    assert_eq!(
        role,
        Role::Veterinarian {
            certification_no: "STR-007".to_string(),
            specialties: vec![],
        }
    );
}

#[test]
fn vet_specialties_are_deduplicated_and_sorted() {
    let mut conn = fresh_db();
    register(
        &mut conn,
        &registration(
            "drh.budi",
            "budi@zoo.test",
            RoleRequest::Veterinarian {
                certification_no: "STR-001".to_string(),
                specialties: vec![
                    "radiologi".to_string(),
                    "bedah".to_string(),
                    "bedah".to_string(),
                ],
            },
        ),
    )
    .expect("register vet");

    let role = resolve_role(&conn, &Username::parse("drh.budi").expect("username"))
        .expect("resolve role");
    let Role::Veterinarian { specialties, .. } = role else {
        panic!("expected veterinarian, got {role:?}");
    };
    assert_eq!(specialties, vec!["bedah".to_string(), "radiologi".to_string()]);
}

#[test]
fn wrong_password_and_unknown_email_are_distinct_internally() {
    let mut conn = fresh_db();
    register(
        &mut conn,
        &registration(
            "ani",
            "ani@zoo.test",
            RoleRequest::Visitor {
                address: "Jl. Margonda 1".to_string(),
                birth_date: DateText::parse("2000-01-01").expect("date"),
            },
        ),
    )
    .expect("register visitor");

    assert_eq!(
        verify_credentials(&conn, "ani@zoo.test", "wrong").expect_err("bad password"),
        AuthError::BadPassword
    );
    assert_eq!(
        verify_credentials(&conn, "nobody@zoo.test", "x").expect_err("unknown email"),
        AuthError::UnknownAccount
    );
}

#[test]
fn stored_credentials_are_hashed_not_plaintext() {
    let mut conn = fresh_db();
    register(
        &mut conn,
        &registration(
            "ani",
            "ani@zoo.test",
            RoleRequest::Visitor {
                address: "Jl. Margonda 1".to_string(),
                birth_date: DateText::parse("2000-01-01").expect("date"),
            },
        ),
    )
    .expect("register visitor");

    let stored: String = conn
        .query_row(
            "SELECT password_hash FROM pengguna WHERE username = 'ani'",
            [],
            |row| row.get(0),
        )
        .expect("stored hash");
    assert!(stored.starts_with("$argon2id$"));
    assert_ne!(stored, "x");
}

#[test]
fn each_staff_table_resolves_to_its_kind() {
    let mut conn = fresh_db();
    for (username, email, kind, label) in [
        ("keeper1", "k@zoo.test", StaffKind::Keeper, "penjaga"),
        ("admin1", "a@zoo.test", StaffKind::Admin, "admin"),
        ("trainer1", "t@zoo.test", StaffKind::Trainer, "pelatih"),
    ] {
        register(
            &mut conn,
            &registration(username, email, RoleRequest::Staff { kind }),
        )
        .expect("register staff");
        let role = resolve_role(&conn, &Username::parse(username).expect("username"))
            .expect("resolve role");
        let Role::Staff {
            kind: resolved,
            staff_id,
        } = role
        else {
            panic!("expected staff for {username}");
        };
        assert_eq!(resolved.as_str(), label);
        assert!(!staff_id.is_empty());
    }
}

#[test]
fn account_without_subtype_resolves_to_unknown() {
    let conn = fresh_db();
    conn.execute(
        "INSERT INTO pengguna (username, email, password_hash, nama_depan, nama_belakang,
                               no_telepon)
         VALUES ('pending', 'p@zoo.test', '$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$AAAA',
                 'P', 'Q', '081')",
        [],
    )
    .expect("seed bare account");

    let role = resolve_role(&conn, &Username::parse("pending").expect("username"))
        .expect("resolve role");
    assert_eq!(role, Role::Unknown);
    assert_eq!(role.label(), "unknown");
}

#[test]
fn duplicate_subtype_rows_resolve_by_priority_order() {
    let mut conn = fresh_db();
    register(
        &mut conn,
        &registration(
            "dua",
            "dua@zoo.test",
            RoleRequest::Visitor {
                address: "Jl. Anggrek 2".to_string(),
                birth_date: DateText::parse("1999-12-31").expect("date"),
            },
        ),
    )
    .expect("register visitor");
    // Corrupt the data on purpose: the same account also gains a vet row.
    conn.execute(
        "INSERT INTO dokter_hewan (username_dh, no_str) VALUES ('dua', 'STR-X')",
        params![],
    )
    .expect("inject second subtype");

    let role = resolve_role(&conn, &Username::parse("dua").expect("username"))
        .expect("resolve role");
    assert_eq!(role.label(), "pengunjung");
}
