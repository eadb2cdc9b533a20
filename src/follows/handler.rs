use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::{
    auth::session::Viewer, error::AppError, follows::FollowActionResponse, response::ApiResponse,
};

/// Follow a user
/// POST /api/user/:id/follow
pub async fn follow_user(
    State(pool): State<PgPool>,
    viewer: Viewer,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if viewer.id == user_id {
        return Err(AppError::UnprocessableEntity(
            "You cannot follow yourself".to_string(),
        ));
    }

    sqlx::query("SELECT id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&pool)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    // The trigger keeps users.followers_count in sync
    sqlx::query(
        r#"
        INSERT INTO follows (follower_id, following_id)
        VALUES ($1, $2)
        ON CONFLICT (follower_id, following_id) DO NOTHING
        "#,
    )
    .bind(viewer.id)
    .bind(user_id)
    .execute(&pool)
    .await
    .map_err(|_| AppError::InternalServerError)?;

    let followers_count = fetch_followers_count(&pool, user_id).await?;

    Ok(ApiResponse::success(FollowActionResponse {
        following: true,
        followers_count,
    }))
}

/// Unfollow a user
/// DELETE /api/user/:id/follow
pub async fn unfollow_user(
    State(pool): State<PgPool>,
    viewer: Viewer,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    sqlx::query("SELECT id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&pool)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
        .bind(viewer.id)
        .bind(user_id)
        .execute(&pool)
        .await
        .map_err(|_| AppError::InternalServerError)?;

    let followers_count = fetch_followers_count(&pool, user_id).await?;

    Ok(ApiResponse::success(FollowActionResponse {
        following: false,
        followers_count,
    }))
}

async fn fetch_followers_count(pool: &PgPool, user_id: Uuid) -> Result<i64, AppError> {
    let row = sqlx::query("SELECT followers_count FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|_| AppError::InternalServerError)?;

    let followers_count: i32 = row.get("followers_count");
    Ok(followers_count as i64)
}
