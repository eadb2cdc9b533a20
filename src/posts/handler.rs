use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    error::AppError,
    posts::{PostFromDb, PostResponse, POST_SELECT},
    response::ApiResponse,
};

/// Fetch a single post by its slug.
/// GET /api/posts/:slug
pub async fn get_post(
    State(pool): State<PgPool>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let query_str = format!("{POST_SELECT} WHERE p.slug = $1");

    let post = sqlx::query_as::<_, PostFromDb>(&query_str)
        .bind(&slug)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Fetch post error: {:?}", e);
            AppError::InternalServerError
        })?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    Ok(ApiResponse::success(PostResponse::from(post)))
}
