// SPDX-License-Identifier: Apache-2.0

//! Request and response bodies. Field names follow the original wire
//! contract (camelCase Indonesian), so existing clients keep working.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub username: String,
    pub email: String,
    pub nama_depan: String,
    pub nama_tengah: Option<String>,
    pub nama_belakang: String,
    pub nomor_telepon: String,
    pub role: String,
    pub role_data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// `pengunjung`, `dokter`, or `staff`.
    pub role: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub nama_depan: String,
    #[serde(default)]
    pub nama_tengah: Option<String>,
    pub nama_belakang: String,
    pub nomor_telepon: String,
    // Visitor fields.
    #[serde(default)]
    pub alamat_lengkap: Option<String>,
    #[serde(default)]
    pub tanggal_lahir: Option<String>,
    // Veterinarian fields.
    #[serde(default)]
    pub nomor_sertifikasi_profesional: Option<String>,
    #[serde(default)]
    pub spesialisasi: Vec<String>,
    // Staff field: `PJHXXX` keeper, `ADMXXX` admin, `PLPXXX` trainer.
    #[serde(default)]
    pub peran: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub username: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub email: String,
    pub nama_depan: String,
    #[serde(default)]
    pub nama_tengah: Option<String>,
    pub nama_belakang: String,
    pub nomor_telepon: String,
    #[serde(default)]
    pub alamat: Option<String>,
    #[serde(default)]
    pub tgl_lahir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nama: Option<String>,
    pub spesies: String,
    pub asal_hewan: String,
    #[serde(default)]
    pub tanggal_lahir: Option<String>,
    pub status_kesehatan: String,
    #[serde(default)]
    pub nama_habitat: Option<String>,
    pub url_foto: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitatPayload {
    pub nama: String,
    pub luas_area: f64,
    pub kapasitas: i64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    pub username: String,
    pub nama_fasilitas: String,
    pub tanggal_kunjungan: String,
    pub jumlah_tiket: i64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingCreateRequest {
    pub id_hewan: String,
    pub jadwal: String,
    pub jenis_pakan: String,
    pub jumlah_pakan: i64,
}

/// Partial update; `jadwal` reschedules (canonicalized before writing).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingPatchRequest {
    #[serde(default)]
    pub jenis_pakan: Option<String>,
    #[serde(default)]
    pub jumlah_pakan: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub jadwal: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingRow {
    pub id_hewan: String,
    pub jadwal: String,
    pub jenis_pakan: String,
    pub jumlah_pakan: i64,
    pub status: String,
    #[serde(default)]
    pub nama_hewan: Option<String>,
    #[serde(default)]
    pub spesies: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordCreateRequest {
    pub id_hewan: String,
    pub username_dh: String,
    pub tanggal_pemeriksaan: String,
    pub status_kesehatan: String,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub pengobatan: Option<String>,
    #[serde(default)]
    pub catatan_tindak_lanjut: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordPatchRequest {
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub pengobatan: Option<String>,
    #[serde(default)]
    pub catatan_tindak_lanjut: Option<String>,
    #[serde(default)]
    pub status_kesehatan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordRow {
    pub id_hewan: String,
    pub username_dh: String,
    pub tanggal_pemeriksaan: String,
    pub status_kesehatan: String,
    pub diagnosis: Option<String>,
    pub pengobatan: Option<String>,
    pub catatan_tindak_lanjut: Option<String>,
    /// Populated on the per-vet listing, where rows join the animal table.
    #[serde(default)]
    pub nama_hewan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaminationPayload {
    pub id_hewan: String,
    pub tgl_selanjutnya: String,
    pub freq_rutin: i64,
    #[serde(default)]
    pub nama_hewan: Option<String>,
}

/// Keys ride in the body, like the original route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaminationUpdateRequest {
    pub id_hewan: String,
    pub orig_tanggal: String,
    pub tgl_selanjutnya: String,
    pub freq_rutin: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaminationDeleteRequest {
    pub id_hewan: String,
    pub orig_tanggal: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
