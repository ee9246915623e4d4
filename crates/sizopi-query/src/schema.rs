// SPDX-License-Identifier: Apache-2.0

use crate::QueryError;
use rusqlite::Connection;

/// Create every table if absent and switch foreign keys on.
///
/// Subtype tables reference `pengguna`; composite-keyed records carry
/// their `(animal, timestamp)` pair as the primary key, so the stored
/// timestamp text is the lookup key.
pub fn init_schema(conn: &Connection) -> Result<(), QueryError> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

         CREATE TABLE IF NOT EXISTS pengguna (
             username       TEXT PRIMARY KEY,
             email          TEXT NOT NULL UNIQUE,
             password_hash  TEXT NOT NULL,
             nama_depan     TEXT NOT NULL,
             nama_tengah    TEXT,
             nama_belakang  TEXT NOT NULL,
             no_telepon     TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS pengunjung (
             username_p  TEXT PRIMARY KEY REFERENCES pengguna(username),
             alamat      TEXT NOT NULL,
             tgl_lahir   TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS dokter_hewan (
             username_dh  TEXT PRIMARY KEY REFERENCES pengguna(username),
             no_str       TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS spesialisasi (
             username_sh        TEXT NOT NULL REFERENCES dokter_hewan(username_dh),
             nama_spesialisasi  TEXT NOT NULL,
             PRIMARY KEY (username_sh, nama_spesialisasi)
         );

         CREATE TABLE IF NOT EXISTS penjaga_hewan (
             username_jh  TEXT PRIMARY KEY REFERENCES pengguna(username),
             id_staf      TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS staf_admin (
             username_sa  TEXT PRIMARY KEY REFERENCES pengguna(username),
             id_staf      TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS pelatih_hewan (
             username_lh  TEXT PRIMARY KEY REFERENCES pengguna(username),
             id_staf      TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS habitat (
             nama       TEXT PRIMARY KEY,
             luas_area  REAL NOT NULL,
             kapasitas  INTEGER NOT NULL,
             status     TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS hewan (
             id                TEXT PRIMARY KEY,
             nama              TEXT,
             spesies           TEXT NOT NULL,
             asal_hewan        TEXT NOT NULL,
             tanggal_lahir     TEXT,
             status_kesehatan  TEXT NOT NULL,
             nama_habitat      TEXT REFERENCES habitat(nama),
             url_foto          TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS reservasi (
             username_p         TEXT NOT NULL REFERENCES pengunjung(username_p),
             nama_fasilitas     TEXT NOT NULL,
             tanggal_kunjungan  TEXT NOT NULL,
             jumlah_tiket       INTEGER NOT NULL,
             status             TEXT NOT NULL,
             PRIMARY KEY (username_p, nama_fasilitas, tanggal_kunjungan)
         );

         CREATE TABLE IF NOT EXISTS pakan (
             id_hewan  TEXT NOT NULL REFERENCES hewan(id),
             jadwal    TEXT NOT NULL,
             jenis     TEXT NOT NULL,
             jumlah    INTEGER NOT NULL,
             status    TEXT NOT NULL,
             PRIMARY KEY (id_hewan, jadwal)
         );

         CREATE TABLE IF NOT EXISTS catatan_medis (
             id_hewan              TEXT NOT NULL REFERENCES hewan(id),
             username_dh           TEXT NOT NULL REFERENCES dokter_hewan(username_dh),
             tanggal_pemeriksaan   TEXT NOT NULL,
             status_kesehatan      TEXT NOT NULL,
             diagnosis             TEXT,
             pengobatan            TEXT,
             catatan_tindak_lanjut TEXT,
             PRIMARY KEY (id_hewan, tanggal_pemeriksaan)
         );

         CREATE TABLE IF NOT EXISTS jadwal_pemeriksaan_kesehatan (
             id_hewan                     TEXT NOT NULL REFERENCES hewan(id),
             tgl_pemeriksaan_selanjutnya  TEXT NOT NULL,
             freq_pemeriksaan_rutin       INTEGER NOT NULL,
             PRIMARY KEY (id_hewan, tgl_pemeriksaan_selanjutnya)
         );",
    )?;
    Ok(())
}
