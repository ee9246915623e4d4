// SPDX-License-Identifier: Apache-2.0

//! End-to-end exercises over a real listener: raw HTTP/1.1 against a
//! throwaway on-disk database.

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use sizopi_server::{build_router, AppState, ServerConfig};

struct TestServer {
    addr: SocketAddr,
    _dir: tempfile::TempDir,
}

async fn spawn_server() -> TestServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = ServerConfig {
        db_path: dir.path().join("sizopi.sqlite"),
        session_ttl: Duration::from_secs(3600),
        ..ServerConfig::default()
    };
    let state = AppState::from_config(&cfg).expect("state");
    {
        let conn = state.pool.checkout().expect("conn");
        sizopi_query::init_schema(&conn).expect("schema");
    }
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.expect("serve");
    });
    TestServer { addr, _dir: dir }
}

async fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (u16, Value) {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    let payload = body.map(Value::to_string);
    let mut req = format!("{method} {path} HTTP/1.1\r\nhost: test\r\nconnection: close\r\n");
    if let Some(token) = token {
        req.push_str(&format!("authorization: Bearer {token}\r\n"));
    }
    match &payload {
        Some(payload) => {
            req.push_str(&format!(
                "content-type: application/json\r\ncontent-length: {}\r\n\r\n{payload}",
                payload.len()
            ));
        }
        None => req.push_str("\r\n"),
    }
    stream.write_all(req.as_bytes()).await.expect("write");
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.expect("read");
    let text = String::from_utf8_lossy(&raw);
    let status: u16 = text
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("status line");
    let body = text
        .split_once("\r\n\r\n")
        .map(|(_, b)| b)
        .filter(|b| !b.trim().is_empty())
        .map(|b| serde_json::from_str(b.trim()).unwrap_or(Value::Null))
        .unwrap_or(Value::Null);
    (status, body)
}

fn visitor_registration(username: &str, email: &str) -> Value {
    json!({
        "role": "pengunjung",
        "username": username,
        "password": "rahasia123",
        "email": email,
        "namaDepan": "Budi",
        "namaBelakang": "Santoso",
        "nomorTelepon": "0812000111",
        "alamatLengkap": "Jl. Margonda 1",
        "tanggalLahir": "2000-01-15"
    })
}

async fn login(addr: SocketAddr, email: &str, password: &str) -> (u16, Value) {
    request(
        addr,
        "POST",
        "/login",
        None,
        Some(&json!({"email": email, "password": password})),
    )
    .await
}

#[tokio::test]
async fn login_flow_issues_token_and_session_reflects_role() {
    let server = spawn_server().await;
    let (status, _) = request(
        server.addr,
        "POST",
        "/register",
        None,
        Some(&visitor_registration("budi", "budi@zoo.test")),
    )
    .await;
    assert_eq!(status, 201);

    let (status, body) = login(server.addr, "budi@zoo.test", "rahasia123").await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["role"], "pengunjung");
    assert_eq!(body["user"]["roleData"]["alamat"], "Jl. Margonda 1");
    let token = body["token"].as_str().expect("token").to_string();
    assert!(!token.is_empty());

    let (status, session) = request(server.addr, "GET", "/session", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(session["username"], "budi");
    assert_eq!(session["roleData"]["tgl_lahir"], "2000-01-15");
}

#[tokio::test]
async fn vet_without_specialties_resolves_with_empty_list() {
    let server = spawn_server().await;
    let (status, _) = request(
        server.addr,
        "POST",
        "/register",
        None,
        Some(&json!({
            "role": "dokter",
            "username": "drh.siti",
            "password": "rahasia123",
            "email": "siti@zoo.test",
            "namaDepan": "Siti",
            "namaBelakang": "Rahma",
            "nomorTelepon": "0813000222",
            "nomorSertifikasiProfesional": "STR-441"
        })),
    )
    .await;
    assert_eq!(status, 201);

    let (status, body) = login(server.addr, "siti@zoo.test", "rahasia123").await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["role"], "dokter");
    assert_eq!(body["user"]["roleData"]["no_STR"], "STR-441");
    assert_eq!(body["user"]["roleData"]["spesialisasi"], json!([]));
}

#[tokio::test]
async fn unknown_email_and_bad_password_are_indistinguishable() {
    let server = spawn_server().await;
    let (status, _) = request(
        server.addr,
        "POST",
        "/register",
        None,
        Some(&visitor_registration("rani", "rani@zoo.test")),
    )
    .await;
    assert_eq!(status, 201);

    let (wrong_pw_status, wrong_pw) = login(server.addr, "rani@zoo.test", "salah").await;
    let (no_account_status, no_account) = login(server.addr, "ghost@zoo.test", "salah").await;
    assert_eq!(wrong_pw_status, 401);
    assert_eq!(no_account_status, 401);
    assert_eq!(wrong_pw["message"], no_account["message"]);
    assert_eq!(wrong_pw["code"], no_account["code"]);
}

#[tokio::test]
async fn duplicate_username_registration_is_rejected() {
    let server = spawn_server().await;
    let (status, _) = request(
        server.addr,
        "POST",
        "/register",
        None,
        Some(&visitor_registration("tono", "tono@zoo.test")),
    )
    .await;
    assert_eq!(status, 201);

    let (status, body) = request(
        server.addr,
        "POST",
        "/register",
        None,
        Some(&visitor_registration("tono", "tono2@zoo.test")),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["details"]["field"], "username");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let server = spawn_server().await;
    let (status, body) = request(server.addr, "GET", "/hewan", None, None).await;
    assert_eq!(status, 401);
    assert_eq!(body["code"], "Unauthorized");

    let (status, _) = request(server.addr, "GET", "/hewan", Some("bogus-token"), None).await;
    assert_eq!(status, 401);
}

async fn authed_server() -> (TestServer, String) {
    let server = spawn_server().await;
    let (status, _) = request(
        server.addr,
        "POST",
        "/register",
        None,
        Some(&visitor_registration("admin1", "admin1@zoo.test")),
    )
    .await;
    assert_eq!(status, 201);
    let (_, body) = login(server.addr, "admin1@zoo.test", "rahasia123").await;
    let token = body["token"].as_str().expect("token").to_string();
    (server, token)
}

#[tokio::test]
async fn feeding_delete_accepts_zone_suffixed_timestamps() {
    let (server, token) = authed_server().await;
    let (status, animal) = request(
        server.addr,
        "POST",
        "/hewan",
        Some(&token),
        Some(&json!({
            "nama": "Raja",
            "spesies": "Panthera leo",
            "asalHewan": "Afrika",
            "statusKesehatan": "Sehat",
            "urlFoto": "https://zoo.test/raja.jpg"
        })),
    )
    .await;
    assert_eq!(status, 201);
    let id = animal["id"].as_str().expect("animal id").to_string();

    let (status, created) = request(
        server.addr,
        "POST",
        "/pemberian-pakan",
        Some(&token),
        Some(&json!({
            "idHewan": id,
            "jadwal": "2024-05-01 08:00:00",
            "jenisPakan": "Daging",
            "jumlahPakan": 5
        })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["status"], "Menunggu Pemberian");

    // Same wall-clock instant, written with a zone suffix: the offset is
    // stripped, so it addresses the row created above.
    let (status, _) = request(
        server.addr,
        "DELETE",
        &format!("/pemberian-pakan?idHewan={id}&jadwal=2024-05-01T08:00:00Z"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);

    let (status, rows) = request(server.addr, "GET", "/pemberian-pakan", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn missing_composite_key_is_a_404_not_a_silent_success() {
    let (server, token) = authed_server().await;
    let (status, body) = request(
        server.addr,
        "DELETE",
        "/pemberian-pakan?idHewan=HW-404&jadwal=2024-05-01%2008:00:00",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "NotFound");

    let (status, _) = request(
        server.addr,
        "PUT",
        "/rekam-medis?idHewan=HW-404&tanggalPemeriksaan=2024-05-01",
        Some(&token),
        Some(&json!({"diagnosis": "flu"})),
    )
    .await;
    assert_eq!(status, 404);
}

async fn create_animal(server: &TestServer, token: &str, name: &str) -> String {
    let (status, animal) = request(
        server.addr,
        "POST",
        "/hewan",
        Some(token),
        Some(&json!({
            "nama": name,
            "spesies": "Panthera tigris",
            "asalHewan": "Sumatra",
            "statusKesehatan": "Sehat",
            "urlFoto": "https://zoo.test/t.jpg"
        })),
    )
    .await;
    assert_eq!(status, 201);
    animal["id"].as_str().expect("animal id").to_string()
}

#[tokio::test]
async fn medical_record_listing_filters_by_examining_vet() {
    let server = spawn_server().await;
    let (status, _) = request(
        server.addr,
        "POST",
        "/register",
        None,
        Some(&json!({
            "role": "dokter",
            "username": "drh.siti",
            "password": "rahasia123",
            "email": "siti@zoo.test",
            "namaDepan": "Siti",
            "namaBelakang": "Rahma",
            "nomorTelepon": "0813000222",
            "nomorSertifikasiProfesional": "STR-441"
        })),
    )
    .await;
    assert_eq!(status, 201);
    let (_, body) = login(server.addr, "siti@zoo.test", "rahasia123").await;
    let token = body["token"].as_str().expect("token").to_string();

    let id = create_animal(&server, &token, "Rimba").await;
    let (status, _) = request(
        server.addr,
        "POST",
        "/rekam-medis",
        Some(&token),
        Some(&json!({
            "idHewan": id,
            "usernameDh": "drh.siti",
            "tanggalPemeriksaan": "2024-05-01",
            "statusKesehatan": "Sehat"
        })),
    )
    .await;
    assert_eq!(status, 201);

    let (status, mine) = request(
        server.addr,
        "GET",
        "/rekam-medis?usernameDh=drh.siti",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(mine.as_array().map(Vec::len), Some(1));
    assert_eq!(mine[0]["usernameDh"], "drh.siti");
    assert_eq!(mine[0]["namaHewan"], "Rimba");

    let (status, others) = request(
        server.addr,
        "GET",
        "/rekam-medis?usernameDh=drh.lain",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(others, json!([]));
}

#[tokio::test]
async fn examination_mutations_are_keyed_by_body_carried_original_date() {
    let (server, token) = authed_server().await;
    let id = create_animal(&server, &token, "Kiki").await;

    let (status, _) = request(
        server.addr,
        "POST",
        "/jadwal-pemeriksaan",
        Some(&token),
        Some(&json!({
            "idHewan": id,
            "tglSelanjutnya": "2024-06-01",
            "freqRutin": 3
        })),
    )
    .await;
    assert_eq!(status, 201);

    // The original date in the body names the row; the new date replaces it.
    let (status, _) = request(
        server.addr,
        "PUT",
        "/jadwal-pemeriksaan",
        Some(&token),
        Some(&json!({
            "idHewan": id,
            "origTanggal": "2024-06-01",
            "tglSelanjutnya": "2024-09-01",
            "freqRutin": 6
        })),
    )
    .await;
    assert_eq!(status, 200);

    let (status, slots) = request(server.addr, "GET", "/jadwal-pemeriksaan", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(slots[0]["tglSelanjutnya"], "2024-09-01");
    assert_eq!(slots[0]["freqRutin"], 6);

    // The superseded date no longer addresses anything.
    let (status, body) = request(
        server.addr,
        "PUT",
        "/jadwal-pemeriksaan",
        Some(&token),
        Some(&json!({
            "idHewan": id,
            "origTanggal": "2024-06-01",
            "tglSelanjutnya": "2024-10-01",
            "freqRutin": 6
        })),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], "NotFound");

    let (status, _) = request(
        server.addr,
        "DELETE",
        "/jadwal-pemeriksaan",
        Some(&token),
        Some(&json!({"idHewan": id, "origTanggal": "2024-09-01"})),
    )
    .await;
    assert_eq!(status, 200);

    let (status, slots) = request(server.addr, "GET", "/jadwal-pemeriksaan", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(slots, json!([]));
}

#[tokio::test]
async fn bad_timestamp_in_key_is_a_400() {
    let (server, token) = authed_server().await;
    let (status, body) = request(
        server.addr,
        "DELETE",
        "/pemberian-pakan?idHewan=HW-1&jadwal=not-a-stamp",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "InvalidTimestamp");
}
