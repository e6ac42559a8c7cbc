use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo::{Role, User};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Query string for email verification.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    pub token: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Identity payload for the "who am I" endpoint.
#[derive(Debug, Serialize)]
pub struct MeUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<MeUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn me_response_serialization() {
        let response = MeResponse {
            authenticated: true,
            user: Some(MeUser {
                id: Uuid::new_v4(),
                email: "test@example.com".to_string(),
                role: Role::User,
            }),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("\"authenticated\":true"));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn unauthenticated_me_response_omits_user() {
        let response = MeResponse {
            authenticated: false,
            user: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, "{\"authenticated\":false}");
    }
}
