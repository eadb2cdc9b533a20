use axum::{extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{
    auth::session::Viewer,
    error::AppError,
    feed::{merge_feed, HomePageResponse, SuggestedUser, ANONYMOUS_FEED_LIMIT, SUGGESTED_USERS_LIMIT},
    posts::{PostFromDb, PostResponse, POST_SELECT},
    response::ApiResponse,
};

/// Assemble the landing page feed.
/// GET /
///
/// Authenticated viewers get every post, partitioned into a followed-authors
/// block followed by the rest, plus up to four follow suggestions. Anonymous
/// visitors get the six most recent posts.
pub async fn home_page(
    State(pool): State<PgPool>,
    viewer: Option<Viewer>,
) -> Result<impl IntoResponse, AppError> {
    let Some(viewer) = viewer else {
        let query_str =
            format!("{POST_SELECT} ORDER BY p.created_at DESC LIMIT {ANONYMOUS_FEED_LIMIT}");
        let posts = fetch_posts(&pool, &query_str, None).await?;

        return Ok(ApiResponse::success(HomePageResponse {
            posts,
            suggested_users: None,
        }));
    };

    let following_query = format!(
        r#"{POST_SELECT}
        WHERE EXISTS (
            SELECT 1 FROM follows f
            WHERE f.follower_id = $1 AND f.following_id = p.author_id
        )
        ORDER BY p.created_at DESC"#
    );
    let remaining_query = format!(
        r#"{POST_SELECT}
        WHERE NOT EXISTS (
            SELECT 1 FROM follows f
            WHERE f.follower_id = $1 AND f.following_id = p.author_id
        )
        ORDER BY p.created_at DESC"#
    );

    let following = fetch_posts(&pool, &following_query, Some(viewer)).await?;
    let remaining = fetch_posts(&pool, &remaining_query, Some(viewer)).await?;

    let suggested_users = sqlx::query_as::<_, SuggestedUser>(
        r#"
        SELECT id, name, email, gender, followers_count
        FROM users
        WHERE id != $1
          AND NOT EXISTS (
              SELECT 1 FROM follows
              WHERE follower_id = $1 AND following_id = users.id
          )
        ORDER BY followers_count DESC
        LIMIT $2
        "#,
    )
    .bind(viewer.id)
    .bind(SUGGESTED_USERS_LIMIT)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Suggested users error: {:?}", e);
        AppError::InternalServerError
    })?;

    Ok(ApiResponse::success(HomePageResponse {
        posts: merge_feed(following, remaining),
        suggested_users: Some(suggested_users),
    }))
}

async fn fetch_posts(
    pool: &PgPool,
    query_str: &str,
    viewer: Option<Viewer>,
) -> Result<Vec<PostResponse>, AppError> {
    let mut query = sqlx::query_as::<_, PostFromDb>(query_str);
    if let Some(viewer) = viewer {
        query = query.bind(viewer.id);
    }

    let rows = query.fetch_all(pool).await.map_err(|e| {
        tracing::error!("Feed error: {:?}", e);
        AppError::InternalServerError
    })?;

    Ok(rows.into_iter().map(PostResponse::from).collect())
}
