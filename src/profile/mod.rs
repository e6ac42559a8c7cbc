use axum::{routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(handlers::get_profile)
            .post(handlers::upsert_profile)
            .delete(handlers::delete_profile),
    )
}
