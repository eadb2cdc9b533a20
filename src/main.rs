use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use dotenv::dotenv;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

mod auth;
mod config;
mod error;
mod feed;
mod follows;
mod posts;
mod response;
mod search;

use config::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
    settings: Settings,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> PgPool {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for Settings {
    fn from_ref(app_state: &AppState) -> Settings {
        app_state.settings.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    info!("database connected");

    let app_state = AppState {
        pool,
        settings: settings.clone(),
    };

    let auth_router = Router::new()
        .route("/sign-in", post(auth::handler::login))
        .route("/sign-up", post(auth::handler::signup))
        .route("/sign-out", post(auth::handler::logout))
        .route("/me", get(auth::handler::get_me));

    let user_router = Router::new().route(
        "/:id/follow",
        post(follows::handler::follow_user).delete(follows::handler::unfollow_user),
    );

    let search_router = Router::new()
        .route(
            "/",
            get(search::handler::search_page).post(search::handler::submit_search),
        )
        .route("/next", post(search::handler::next_page))
        .route("/previous", post(search::handler::prev_page));

    let app = Router::new()
        .route("/", get(feed::handler::home_page))
        .nest("/search", search_router)
        .nest("/api/auth", auth_router)
        .nest("/api/user", user_router)
        .route("/api/posts/:slug", get(posts::handler::get_post))
        .with_state(app_state);

    info!("Server running on http://localhost:{}", settings.port);

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
