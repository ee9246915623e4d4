// SPDX-License-Identifier: Apache-2.0

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub(crate) async fn healthz_handler() -> Response {
    Json(json!({"status": "ok", "service": crate::CRATE_NAME})).into_response()
}
