use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use storage::{Database, repository::CompetitionRepository};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod pagination;
mod state;

use config::Config;
use features::competitions::services::{CompetitionQueryService, ListingSettings};
use middleware::auth::AccessTokens;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::competitions::handlers::list_competitions,
        features::competitions::handlers::get_competition,
        features::competitions::handlers::get_competition_wcif,
        features::competitions::handlers::get_competition_public_wcif,
    ),
    components(
        schemas(
            storage::dto::competition::CompetitionSummary,
            storage::dto::competition::CompetitionDetail,
            storage::dto::wcif::WcifCompetition,
            storage::dto::wcif::WcifPerson,
            storage::dto::wcif::WcifEvent,
            storage::dto::wcif::WcifSchedule,
            storage::dto::wcif::WcifVenue,
            storage::models::UserRef,
        )
    ),
    tags(
        (name = "competitions", description = "Competition listing, details and WCIF"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Access token")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting WCA competition API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let tokens = AccessTokens::from_comma_separated(&config.access_tokens)
        .context("Failed to parse ACCESS_TOKENS")?;
    tracing::info!("Loaded {} access tokens", tokens.len());

    let competitions = CompetitionQueryService::new(
        Arc::new(CompetitionRepository::new(db.pool().clone())),
        ListingSettings {
            default_per_page: config.default_per_page,
            max_per_page: config.max_per_page,
            match_mode: config.search_match,
        },
    );

    let state = AppState {
        competitions,
        tokens: Arc::new(tokens),
        public_url: Arc::from(config.public_url.as_str()),
    };

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(features::api_router(state));

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
