use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod handler;

/// Database model for a follow edge (follower -> followed).
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Response for follow/unfollow actions.
#[derive(Debug, Serialize)]
pub struct FollowActionResponse {
    pub following: bool,
    pub followers_count: i64,
}
