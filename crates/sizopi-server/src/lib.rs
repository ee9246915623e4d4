#![forbid(unsafe_code)]
//! Sizopi HTTP surface.
//!
//! Request flow: handler mints a request id, borrows a connection from
//! [`DbPool`], calls into `sizopi-query`, and translates domain errors to
//! the `sizopi-api` error contract. Sessions are server-issued opaque
//! bearer tokens; the client-held profile is a display cache, never an
//! authorization source.

use axum::routing::{get, post, put};
use axum::Router;

mod config;
mod http;
mod pool;
mod session;
mod state;

pub use config::ServerConfig;
pub use pool::{DbPool, PoolError, PooledConn};
pub use session::SessionStore;
pub use state::AppState;

pub const CRATE_NAME: &str = "sizopi-server";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::misc::healthz_handler))
        .route("/login", post(http::auth::login_handler))
        .route("/logout", post(http::auth::logout_handler))
        .route("/session", get(http::auth::session_handler))
        .route("/register", post(http::auth::register_handler))
        .route("/profile", put(http::auth::update_profile_handler))
        .route("/profile/password", put(http::auth::change_password_handler))
        .route(
            "/hewan",
            get(http::animals::list_handler).post(http::animals::create_handler),
        )
        .route(
            "/hewan/:id",
            get(http::animals::get_handler)
                .put(http::animals::update_handler)
                .delete(http::animals::delete_handler),
        )
        .route(
            "/habitat",
            get(http::habitats::list_handler).post(http::habitats::create_handler),
        )
        .route(
            "/habitat/:nama",
            get(http::habitats::get_handler)
                .put(http::habitats::update_handler)
                .delete(http::habitats::delete_handler),
        )
        .route(
            "/reservasi",
            get(http::reservations::list_handler)
                .post(http::reservations::create_handler)
                .put(http::reservations::update_handler)
                .delete(http::reservations::delete_handler),
        )
        .route(
            "/pemberian-pakan",
            get(http::feeding::list_handler)
                .post(http::feeding::create_handler)
                .put(http::feeding::update_handler)
                .delete(http::feeding::delete_handler),
        )
        .route(
            "/rekam-medis",
            get(http::medical::list_handler)
                .post(http::medical::create_handler)
                .put(http::medical::update_handler)
                .delete(http::medical::delete_handler),
        )
        .route(
            "/jadwal-pemeriksaan",
            get(http::examination::list_handler)
                .post(http::examination::create_handler)
                .put(http::examination::update_handler)
                .delete(http::examination::delete_handler),
        )
        .with_state(state)
}
