use axum::{
    Router,
    routing::{get, post},
};

use crate::db::sqlite::AccountStorage;
use crate::handlers::register::register_handler;
use crate::service::registration::RegistrationService;

/// Application state shared across requests. The storage handle is
/// constructed once at startup and injected here; no global pool.
#[derive(Clone)]
pub struct AppState {
    pub registration: RegistrationService,
}

impl AppState {
    pub fn new(storage: AccountStorage) -> Self {
        Self {
            registration: RegistrationService::new(storage),
        }
    }
}

pub fn mindwell_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Liveness probe. The bootstrap guarantees a usable store before the
/// listener binds, so serving at all implies readiness.
async fn healthz() -> &'static str {
    "ok"
}
