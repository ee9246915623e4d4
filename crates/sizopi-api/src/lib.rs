#![forbid(unsafe_code)]
//! Wire layer: the error contract and the request/response DTOs for every
//! route. Handlers translate domain errors into [`ApiError`] and never
//! echo raw query results.

mod dto;
mod errors;

pub use dto::{
    AnimalPayload, ChangePasswordRequest, ExaminationDeleteRequest, ExaminationPayload,
    ExaminationUpdateRequest, FeedingCreateRequest, FeedingPatchRequest, FeedingRow,
    HabitatPayload, LoginRequest, LoginResponse, MedicalRecordCreateRequest,
    MedicalRecordPatchRequest, MedicalRecordRow, ProfileUpdateRequest, RegisterRequest,
    RegisterResponse, ReservationPayload, SessionUser, StatusMessage,
};
pub use errors::{role_wire, ApiError, ApiErrorCode};

pub const CRATE_NAME: &str = "sizopi-api";
