use serde::Serialize;

use crate::auth::dto::PublicUser;
use crate::profile::repo::Profile;

/// Response for `GET /api/profile`: identity plus the optional profile.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: PublicUser,
    pub profile: Option<Profile>,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpserted {
    pub message: String,
    pub profile: Profile,
}
