use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Optional 1:1 extension of a user. At most one row per user id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub updated_at: OffsetDateTime,
}

/// Partial profile fields; None keeps the stored value on upsert.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl Profile {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT user_id, display_name, title, bio, location, skills, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    /// Insert-or-update keyed by user id. Absent fields keep their
    /// previous values; skill order is preserved as given.
    pub async fn upsert(db: &PgPool, user_id: Uuid, patch: &ProfilePatch) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, display_name, title, bio, location, skills)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, '{}'))
            ON CONFLICT (user_id) DO UPDATE SET
                display_name = COALESCE($2, profiles.display_name),
                title = COALESCE($3, profiles.title),
                bio = COALESCE($4, profiles.bio),
                location = COALESCE($5, profiles.location),
                skills = COALESCE($6, profiles.skills),
                updated_at = now()
            RETURNING user_id, display_name, title, bio, location, skills, updated_at
            "#,
        )
        .bind(user_id)
        .bind(patch.display_name.as_deref())
        .bind(patch.title.as_deref())
        .bind(patch.bio.as_deref())
        .bind(patch.location.as_deref())
        .bind(patch.skills.as_deref())
        .fetch_one(db)
        .await?;
        Ok(profile)
    }

    pub async fn delete_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
