use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    admin::dto::{AdminUser, TargetId, UpdateUserRequest, UserWithProfileRow},
    auth::{
        policy::require_role,
        repo::{Role, User},
        session::CurrentUser,
    },
    error::ApiError,
    profile::{handlers::sanitize_skills, repo::Profile},
    state::AppState,
};

async fn fetch_user_with_profile(db: &PgPool, id: Uuid) -> anyhow::Result<Option<AdminUser>> {
    let row = sqlx::query_as::<_, UserWithProfileRow>(
        r#"
        SELECT u.id, u.name, u.email, u.role, u.created_at,
               p.user_id AS profile_user_id, p.display_name, p.title, p.bio,
               p.location, p.skills, p.updated_at
        FROM users u
        LEFT JOIN profiles p ON p.user_id = u.id
        WHERE u.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(AdminUser::from))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Vec<AdminUser>>, ApiError> {
    require_role(&state.db, identity.id, Role::Admin).await?;

    let rows = sqlx::query_as::<_, UserWithProfileRow>(
        r#"
        SELECT u.id, u.name, u.email, u.role, u.created_at,
               p.user_id AS profile_user_id, p.display_name, p.title, p.bio,
               p.location, p.skills, p.updated_at
        FROM users u
        LEFT JOIN profiles p ON p.user_id = u.id
        ORDER BY u.created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(AdminUser::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(target): Query<TargetId>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<AdminUser>, ApiError> {
    require_role(&state.db, identity.id, Role::Admin).await?;

    let id = target
        .id
        .ok_or_else(|| ApiError::Validation("ID required".into()))?;

    let user = User::update_admin_fields(&state.db, id, payload.name.as_deref(), payload.role)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    // Profile fields ride along as an upsert. This is a second store
    // operation; a failure here is surfaced, not masked.
    if let Some(mut patch) = payload.profile {
        if let Some(skills) = patch.skills.take() {
            patch.skills = Some(sanitize_skills(skills));
        }
        Profile::upsert(&state.db, id, &patch).await?;
    }

    let updated = fetch_user_with_profile(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    info!(admin_id = %identity.id, user_id = %user.id, "admin updated user");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(target): Query<TargetId>,
) -> Result<Json<Value>, ApiError> {
    require_role(&state.db, identity.id, Role::Admin).await?;

    let id = target
        .id
        .ok_or_else(|| ApiError::Validation("ID required".into()))?;

    // The profile row goes with the user via ON DELETE CASCADE; a single
    // statement keeps both removals in one transaction. Deleting an
    // already-gone id is a no-op, not an error.
    let removed = User::delete(&state.db, id).await?;
    if removed {
        info!(admin_id = %identity.id, user_id = %id, "admin deleted user");
    } else {
        warn!(admin_id = %identity.id, user_id = %id, "delete for unknown user id");
    }
    Ok(Json(json!({ "message": "User and profile deleted" })))
}

#[cfg(test)]
mod tests {
    #[test]
    fn user_delete_cascades_to_profile_rows() {
        // delete_user relies on the schema cascading the profile removal.
        let schema = include_str!("../../migrations/0001_init.sql");
        assert!(schema.contains("REFERENCES users (id) ON DELETE CASCADE"));
    }
}
