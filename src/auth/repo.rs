use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Coarse authorization level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by (lowercased) email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, is_verified, verification_token, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, is_verified, verification_token, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        is_verified: bool,
        verification_token: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, is_verified, verification_token)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, role, is_verified, verification_token, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(is_verified)
        .bind(verification_token)
        .fetch_one(db)
        .await
    }

    pub async fn set_role(db: &PgPool, id: Uuid, role: Role) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn find_by_verification_token(
        db: &PgPool,
        token: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, is_verified, verification_token, created_at
            FROM users
            WHERE verification_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Flip the verification flag and clear the pending token.
    pub async fn mark_verified(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE users SET is_verified = TRUE, verification_token = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Apply admin-editable user fields; None keeps the stored value.
    /// Returns None when the target id does not exist.
    pub async fn update_admin_fields(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        role: Option<Role>,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name), role = COALESCE($3, role)
            WHERE id = $1
            RETURNING id, name, email, password_hash, role, is_verified, verification_token, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(role)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Delete the identity record; the profile row cascades.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_user_never_contains_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::User,
            is_verified: true,
            verification_token: Some("tok".into()),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("verification_token"));
        assert!(json.contains("ada@x.com"));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"admin\"").unwrap(),
            Role::Admin
        );
    }
}
