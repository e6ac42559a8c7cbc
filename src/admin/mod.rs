use axum::{routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/admin/users",
        get(handlers::list_users)
            .put(handlers::update_user)
            .delete(handlers::delete_user),
    )
}
