use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::Role;
use crate::profile::repo::{Profile, ProfilePatch};

/// Flat row from the users LEFT JOIN profiles listing. Profile columns are
/// all nullable; `profile_user_id` marks whether the row exists.
#[derive(Debug, FromRow)]
pub struct UserWithProfileRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: OffsetDateTime,
    pub profile_user_id: Option<Uuid>,
    pub display_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub updated_at: Option<OffsetDateTime>,
}

/// Composite record returned by the admin surface. Never carries password
/// credentials.
#[derive(Debug, Serialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: OffsetDateTime,
    pub profile: Option<Profile>,
}

impl From<UserWithProfileRow> for AdminUser {
    fn from(row: UserWithProfileRow) -> Self {
        let profile = row.profile_user_id.map(|user_id| Profile {
            user_id,
            display_name: row.display_name,
            title: row.title,
            bio: row.bio,
            location: row.location,
            skills: row.skills.unwrap_or_default(),
            updated_at: row.updated_at.unwrap_or(row.created_at),
        });
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
            profile,
        }
    }
}

/// Target id for update/delete, passed in the query string.
#[derive(Debug, Deserialize)]
pub struct TargetId {
    pub id: Option<Uuid>,
}

/// Partial admin update: user-level fields plus optional profile fields,
/// applied as one logical operation.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub profile: Option<ProfilePatch>,
}
