/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use issuedeck_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::{Config, SummaryConfig},
    middleware::{security::SecurityHeadersLayer, session::session_auth_layer},
    routes,
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use issuedeck_shared::summary::client::{CompletionClient, CompletionError, OpenAiClient, OpenAiConfig};
use sqlx::PgPool;
use std::{sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,

    pub config: Arc<Config>,

    /// Completion client for AI summaries, None when no API key is configured
    pub summarizer: Option<Arc<dyn CompletionClient>>,
}

impl AppState {
    /// State without a completion client
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            summarizer: None,
        }
    }

    pub fn with_summarizer(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.summarizer = Some(client);
        self
    }

    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the OpenAI client from configuration, or None without an API key
pub fn summarizer_from_config(
    config: &SummaryConfig,
) -> Result<Option<Arc<dyn CompletionClient>>, CompletionError> {
    let Some(api_key) = config.api_key.clone() else {
        return Ok(None);
    };

    let client = OpenAiClient::new(OpenAiConfig {
        api_key,
        base_url: config.base_url.clone(),
        model: config.model.clone(),
        timeout: Duration::from_secs(config.timeout_seconds),
    })?;

    let client: Arc<dyn CompletionClient> = Arc::new(client);
    Ok(Some(client))
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health
/// └── /api/
///     ├── POST /register                      (public)
///     ├── POST /auth/login                    (public)
///     ├── POST /auth/logout                   (public)
///     ├── GET|PUT /profile                    (session)
///     ├── GET  /profile/check-password        (session)
///     ├── PUT  /profile/password              (session)
///     ├── POST|GET|PUT|DELETE /issues         (session)
///     ├── POST|GET /teams                     (session)
///     └── POST /ai/summary                    (session)
/// ```
///
/// Middleware, outermost first: security headers, CORS, compression,
/// request tracing, then session authentication on protected routes.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let public_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout));

    let protected_routes = Router::new()
        .route(
            "/profile",
            get(routes::profile::get_profile).put(routes::profile::update_profile),
        )
        .route(
            "/profile/check-password",
            get(routes::profile::check_password),
        )
        .route(
            "/profile/password",
            axum::routing::put(routes::profile::change_password),
        )
        .route(
            "/issues",
            post(routes::issues::create_issue)
                .get(routes::issues::list_issues)
                .put(routes::issues::update_issue)
                .delete(routes::issues::delete_issue),
        )
        .route(
            "/teams",
            post(routes::teams::create_team).get(routes::teams::list_teams),
        )
        .route("/ai/summary", post(routes::summary::generate_summary))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600))
    };

    let production = state.config.api.production;

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_summarizer_without_api_key() {
        let config = SummaryConfig {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout_seconds: 30,
        };

        assert!(summarizer_from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_summarizer_with_api_key() {
        let config = SummaryConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout_seconds: 30,
        };

        assert!(summarizer_from_config(&config).unwrap().is_some());
    }
}
