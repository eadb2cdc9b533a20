use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use sqlx::PgPool;

use crate::{
    posts::{PostFromDb, PostResponse, POST_SELECT},
    response::ApiResponse,
    search::{
        clamp_page, like_pattern, plan_page, requested_page, search_url, total_pages, PageForm,
        PagePlan, SearchForm, SearchPageResponse, SearchParams,
    },
};

/// Render one page of search results.
/// GET /search?query=<q>&page=<n>
///
/// Out-of-range pages are corrected with a redirect so the viewer never sees
/// an invalid page. A failed query degrades to an empty result set.
pub async fn search_page(
    State(pool): State<PgPool>,
    Query(params): Query<SearchParams>,
) -> Response {
    let page = requested_page(params.page.as_deref());
    if page <= 0 {
        return Redirect::to(&search_url(&params.query, 1)).into_response();
    }

    let matches = fetch_matches(&pool, &params.query).await;

    match plan_page(matches.len(), page) {
        PagePlan::Redirect { page } => Redirect::to(&search_url(&params.query, page)).into_response(),
        PagePlan::Window {
            start,
            end,
            total_pages,
        } => {
            let posts: Vec<PostResponse> =
                matches.into_iter().skip(start).take(end - start).collect();

            let response = SearchPageResponse {
                query: params.query.clone(),
                page,
                total_pages,
                posts,
            };

            if params.query.is_empty() {
                ApiResponse::success_with_message(
                    "Enter a search term above".to_string(),
                    response,
                )
                .into_response()
            } else if response.posts.is_empty() {
                ApiResponse::success_with_message("No posts found".to_string(), response)
                    .into_response()
            } else {
                ApiResponse::success(response).into_response()
            }
        }
    }
}

/// Search form submission; lands on page 1 of the new query.
/// POST /search
pub async fn submit_search(Form(form): Form<SearchForm>) -> Redirect {
    if form.search.is_empty() {
        return Redirect::to("/search");
    }
    Redirect::to(&search_url(&form.search, 1))
}

/// Advance to the next page, clamped to the last one.
/// POST /search/next
pub async fn next_page(State(pool): State<PgPool>, Form(form): Form<PageForm>) -> Redirect {
    let current = requested_page(form.page.as_deref());
    let total = total_pages(count_matches(&pool, &form.query).await);
    Redirect::to(&search_url(&form.query, clamp_page(current + 1, total)))
}

/// Step back to the previous page, clamped to page 1.
/// POST /search/previous
pub async fn prev_page(State(pool): State<PgPool>, Form(form): Form<PageForm>) -> Redirect {
    let current = requested_page(form.page.as_deref());
    let total = total_pages(count_matches(&pool, &form.query).await);
    Redirect::to(&search_url(&form.query, clamp_page(current - 1, total)))
}

/// Case-insensitive substring match on title, newest first. An empty query
/// matches nothing, and a database failure is logged and treated the same.
async fn fetch_matches(pool: &PgPool, query: &str) -> Vec<PostResponse> {
    if query.is_empty() {
        return Vec::new();
    }

    let query_str = format!(r#"{POST_SELECT} WHERE p.title ILIKE $1 ESCAPE '\' ORDER BY p.created_at DESC"#);

    match sqlx::query_as::<_, PostFromDb>(&query_str)
        .bind(like_pattern(query))
        .fetch_all(pool)
        .await
    {
        Ok(rows) => rows.into_iter().map(PostResponse::from).collect(),
        Err(e) => {
            tracing::error!("Search query failed: {:?}", e);
            Vec::new()
        }
    }
}

async fn count_matches(pool: &PgPool, query: &str) -> usize {
    if query.is_empty() {
        return 0;
    }

    match sqlx::query_scalar::<_, i64>(
        r#"SELECT COUNT(*) FROM posts WHERE title ILIKE $1 ESCAPE '\'"#,
    )
    .bind(like_pattern(query))
    .fetch_one(pool)
    .await
    {
        Ok(count) => count as usize,
        Err(e) => {
            tracing::error!("Search count failed: {:?}", e);
            0
        }
    }
}
