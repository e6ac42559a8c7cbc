use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::repo::{Role, User};
use crate::error::ApiError;

/// One-directional upgrade rule for the bootstrap admin address. Never
/// downgrades and never applies to any other email.
pub fn should_promote(email: &str, current_role: Role, bootstrap_email: Option<&str>) -> bool {
    match bootstrap_email {
        Some(admin_email) => email == admin_email && current_role != Role::Admin,
        None => false,
    }
}

/// Persist the admin upgrade for the bootstrap address. Must be called
/// only after the password has been verified; an unauthenticated caller
/// must not be able to trigger a role mutation.
pub async fn promote_bootstrap_admin(
    db: &PgPool,
    user: &mut User,
    bootstrap_email: Option<&str>,
) -> anyhow::Result<()> {
    if should_promote(&user.email, user.role, bootstrap_email) {
        User::set_role(db, user.id, Role::Admin).await?;
        user.role = Role::Admin;
        info!(user_id = %user.id, email = %user.email, "bootstrap admin promoted");
    }
    Ok(())
}

/// Exact-match role comparison; no hierarchy between roles.
pub fn authorize(current: Role, required: Role) -> Result<(), ApiError> {
    if current != required {
        return Err(ApiError::Authorization("Forbidden".into()));
    }
    Ok(())
}

/// Authorization check for elevated routes. Compares against the user's
/// *current* stored role, not the snapshot embedded in the session.
pub async fn require_role(db: &PgPool, user_id: Uuid, required: Role) -> Result<(), ApiError> {
    let user = User::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ApiError::Authentication("Not authenticated".into()))?;
    authorize(user.role, required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn promotes_matching_email_with_user_role() {
        assert!(should_promote(
            "admin@techhub.local",
            Role::User,
            Some("admin@techhub.local")
        ));
    }

    #[test]
    fn already_admin_is_idempotent() {
        assert!(!should_promote(
            "admin@techhub.local",
            Role::Admin,
            Some("admin@techhub.local")
        ));
    }

    #[test]
    fn other_addresses_are_never_promoted() {
        assert!(!should_promote(
            "ada@x.com",
            Role::User,
            Some("admin@techhub.local")
        ));
    }

    #[test]
    fn no_bootstrap_address_means_no_promotion() {
        assert!(!should_promote("admin@techhub.local", Role::User, None));
    }

    #[test]
    fn user_role_never_authorizes_admin_surface() {
        let err = authorize(Role::User, Role::Admin).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn admin_role_authorizes_admin_surface() {
        assert!(authorize(Role::Admin, Role::Admin).is_ok());
    }

    #[test]
    fn exact_match_required_in_both_directions() {
        assert!(authorize(Role::Admin, Role::User).is_err());
        assert!(authorize(Role::User, Role::User).is_ok());
    }

    #[test]
    fn forbidden_is_distinct_from_unauthenticated() {
        let forbidden = authorize(Role::User, Role::Admin).unwrap_err();
        let unauthenticated = ApiError::Authentication("Not authenticated".into());
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_ne!(forbidden.status(), unauthenticated.status());
    }
}
