use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{session, utils, LoginUser, RegisterUser, User, UserResponse},
    config::settings::Settings,
    error::AppError,
    response::ApiResponse,
};

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((session::SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub async fn signup(
    State(pool): State<PgPool>,
    State(settings): State<Settings>,
    jar: CookieJar,
    Json(payload): Json<RegisterUser>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    let password = utils::hash_password(&payload.password)
        .map_err(|_| AppError::InternalServerError)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, name, email, gender, password) VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.gender)
    .bind(&password)
    .fetch_one(&pool)
    .await
    .map_err(|e: sqlx::Error| {
        if e.to_string().contains("duplicate key value") {
            AppError::Conflict("Email already exists".to_string())
        } else {
            tracing::error!("Database error: {:?}", e);
            AppError::InternalServerError
        }
    })?;

    let token = session::create_token(user.id, &settings.session_secret)
        .map_err(|_| AppError::InternalServerError)?;

    Ok((
        jar.add(session_cookie(token)),
        ApiResponse::success(UserResponse::from(user)).created(),
    ))
}

pub async fn login(
    State(pool): State<PgPool>,
    State(settings): State<Settings>,
    jar: CookieJar,
    Json(payload): Json<LoginUser>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error: {:?}", e);
            AppError::InternalServerError
        })?
        .ok_or(AppError::Unauthorized)?;

    let hash = user.password.as_deref().ok_or(AppError::Unauthorized)?;
    utils::verify_password(hash, &payload.password).map_err(|_| AppError::Unauthorized)?;

    let token = session::create_token(user.id, &settings.session_secret)
        .map_err(|_| AppError::InternalServerError)?;

    Ok((
        jar.add(session_cookie(token)),
        ApiResponse::success(UserResponse::from(user)),
    ))
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(session::SESSION_COOKIE).path("/"));
    (jar, ApiResponse::ok("Signed out".to_string()))
}

pub async fn get_me(
    State(pool): State<PgPool>,
    viewer: session::Viewer,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, UserResponse>(
        "SELECT id, name, email, gender, image FROM users WHERE id = $1",
    )
    .bind(viewer.id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error: {:?}", e);
        AppError::InternalServerError
    })?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(ApiResponse::success(user))
}
