//! Support Desk server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use support_desk::adapters::ai::{GeminiConfig, GeminiProvider, OpenAIConfig, OpenAIProvider};
use support_desk::adapters::http::{api_router, ChatAppState, RateLimiterState, UsersAppState};
use support_desk::adapters::memory::InMemoryRateLimiter;
use support_desk::adapters::postgres::{
    self, PostgresAccountReader, PostgresConversationRepository, PostgresUserDirectory,
};
use support_desk::application::routing::{
    BillingResponder, ClassificationStrategy, CompletionStrategy, IntentClassifier,
    IntentRouter, OrderResponder, ResponderSet, ResponderSettings, SupportResponder,
};
use support_desk::config::{AiConfig, AiProvider, AppConfig};
use support_desk::ports::{AIError, AIProvider};

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }
}

/// Builds the client for `provider`, or `None` when it has no API key.
fn build_provider(
    config: &AiConfig,
    provider: AiProvider,
) -> Result<Option<Arc<dyn AIProvider>>, AIError> {
    let Some(key) = config.api_key(provider) else {
        return Ok(None);
    };

    let client: Arc<dyn AIProvider> = match provider {
        AiProvider::OpenAI => Arc::new(OpenAIProvider::new(
            OpenAIConfig::new(key)
                .with_model(config.model(provider))
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries),
        )?),
        AiProvider::Gemini => Arc::new(GeminiProvider::new(
            GeminiConfig::new(key)
                .with_model(config.model(provider))
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries),
        )?),
    };
    Ok(Some(client))
}

fn build_classifier(config: &AiConfig) -> Result<IntentClassifier, AIError> {
    let mut strategies: Vec<Box<dyn ClassificationStrategy>> = Vec::new();
    for provider in config.classifier_order() {
        if let Some(client) = build_provider(config, provider)? {
            strategies.push(Box::new(CompletionStrategy::new(
                provider.as_str(),
                client,
                config.timeout(),
            )));
        }
    }
    Ok(IntentClassifier::new(strategies))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_logging(&config);

    tracing::info!(
        environment = ?config.server.environment,
        database = %config.database.redacted_url(),
        request_timeout = ?config.server.request_timeout(),
        worst_case_routing = ?config.ai.worst_case_routing(),
        "starting support desk"
    );

    let pool = postgres::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool)
            .await
            .context("failed to run migrations")?;
        tracing::info!("migrations applied");
    }

    let classifier = build_classifier(&config.ai)?;
    tracing::info!(strategies = ?classifier.strategy_names(), "classifier ready");

    let responder_provider = build_provider(&config.ai, config.ai.responder_provider)?
        .context("responder provider has no API key")?;
    let accounts = Arc::new(PostgresAccountReader::new(pool.clone()));
    let settings = ResponderSettings::new(config.ai.timeout());
    let responders = ResponderSet::new(
        Arc::new(SupportResponder::new(responder_provider.clone(), settings)),
        Arc::new(OrderResponder::new(accounts.clone(), responder_provider.clone(), settings)),
        Arc::new(BillingResponder::new(accounts, responder_provider, settings)),
    );
    let router = Arc::new(IntentRouter::new(classifier, responders));

    let chat = ChatAppState::new(
        Arc::new(PostgresConversationRepository::new(pool.clone())),
        router,
    );
    let users = UsersAppState::new(Arc::new(PostgresUserDirectory::new(pool)));
    let limiter: RateLimiterState = Arc::new(InMemoryRateLimiter::new(
        config.rate_limit.max_requests,
        config.rate_limit.window(),
    ));

    let cors = match config.server.cors_origins_list() {
        origins if origins.is_empty() => CorsLayer::new().allow_origin(Any),
        origins => CorsLayer::new().allow_origin(AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| o.parse::<http::HeaderValue>().ok()),
        )),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    let app = api_router(chat, users, limiter)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
