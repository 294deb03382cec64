use anyhow::Result;
use axum::Router;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};
use fresheats_storefront::core::{app_state::AppState, bootstrap, config, db, swagger};
use fresheats_storefront::{routes, seed};

/// Migrations embedded into the binary which helps with streamlining image building process
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_tracing();
    bootstrap::init_env();

    let routes = routes::auth::routes_with_openapi()
        .merge(routes::categories::routes_with_openapi())
        .merge(routes::foods::routes_with_openapi())
        .merge(routes::carts::routes_with_openapi())
        .merge(routes::orders::routes_with_openapi())
        .merge(routes::inquiries::routes_with_openapi());

    let mut openapi = routes.get_openapi().clone();
    openapi.info = utoipa::openapi::InfoBuilder::new()
        .title("FreshEats Storefront API")
        .version("1.0.0")
        .build();
    let swagger_ui = swagger::create_swagger_ui(openapi)?;

    tracing::info!("Running migrations...");
    let config = config::load()?;
    let migrations_count = db::run_migrations_blocking(MIGRATIONS, &config.database.url).await?;
    tracing::info!("Run {} new migrations successfully", migrations_count);

    let state = AppState::init(&config).await?;

    tracing::info!("Seeding catalog...");
    seed::seed_catalog(&state.db_pool).await?;

    let app = Router::new()
        .merge(routes)
        .merge(swagger_ui)
        .with_state(state);

    bootstrap::bootstrap("FreshEats Storefront", app, config.server.port).await
}
