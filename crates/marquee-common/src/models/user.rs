use crate::models::auth::Role;
use crate::models::movie::Genre;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User profile (safe for client responses -- no password_hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub favourite_genres: Vec<Genre>,
}
