use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::PublicUser,
        repo::User,
        session::CurrentUser,
    },
    error::ApiError,
    profile::{
        dto::{ProfileUpserted, ProfileView},
        repo::{Profile, ProfilePatch},
    },
    state::AppState,
};

/// Drop empty and whitespace-only skill entries, preserving order.
pub(crate) fn sanitize_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<ProfileView>, ApiError> {
    let user = User::find_by_id(&state.db, identity.id)
        .await?
        .ok_or_else(|| ApiError::Authentication("Not authenticated".into()))?;

    let profile = Profile::find_by_user(&state.db, identity.id).await?;

    Ok(Json(ProfileView {
        user: PublicUser::from(&user),
        profile,
    }))
}

#[instrument(skip(state, patch))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(mut patch): Json<ProfilePatch>,
) -> Result<Json<ProfileUpserted>, ApiError> {
    if let Some(skills) = patch.skills.take() {
        patch.skills = Some(sanitize_skills(skills));
    }

    let profile = Profile::upsert(&state.db, identity.id, &patch).await?;

    info!(user_id = %identity.id, "profile upserted");
    Ok(Json(ProfileUpserted {
        message: "Profile updated successfully".into(),
        profile,
    }))
}

#[instrument(skip(state))]
pub async fn delete_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let removed = Profile::delete_by_user(&state.db, identity.id).await?;
    if !removed {
        warn!(user_id = %identity.id, "delete with no profile row");
    }
    Ok(Json(json!({ "message": "Profile deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_filters_empty_and_blank_entries() {
        let skills = vec![
            "Rust".to_string(),
            "".to_string(),
            "  ".to_string(),
            " SQL ".to_string(),
        ];
        assert_eq!(sanitize_skills(skills), vec!["Rust", "SQL"]);
    }

    #[test]
    fn sanitize_preserves_order() {
        let skills = vec!["c".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(sanitize_skills(skills), vec!["c", "b", "a"]);
    }
}
