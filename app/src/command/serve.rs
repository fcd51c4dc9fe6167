use std::sync::Arc;

use anyhow::Context;
use chrono::TimeDelta;
use parley_config::Config;
use parley_conversation::HistoryConfig;
use parley_core::CompletionProvider;
use parley_providers::CohereProvider;
use parley_session::{SessionManager, SessionPolicy};
use parley_web::AppState;
use tracing::{info, warn};

use super::CommandStrategy;

/// Command-line overrides for `serve`.
pub struct ServeInput {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
}

/// Strategy for running the web server until Ctrl+C.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(host) = input.host {
            config.server.host = host;
        }
        if let Some(port) = input.port {
            config.server.port = port;
        }
        if let Some(model) = input.model {
            config.completion.model = model;
        }

        if config.providers.cohere.api_key.is_empty() {
            warn!("No Cohere API key configured; every completion will fail until API is set");
        }

        let provider = CohereProvider::new(config.providers.cohere.api_key.clone())
            .with_base_url(config.providers.cohere.base_url.clone());
        info!(
            "Cohere provider ready (base url {}, model {})",
            provider.base_url(),
            config.completion.model
        );
        let provider: Arc<dyn CompletionProvider> = Arc::new(provider);

        let policy = SessionPolicy {
            idle_timeout: seconds(config.session.idle_timeout_secs, "idle_timeout_secs")?,
            permanent_lifetime: seconds(
                config.session.permanent_lifetime_secs,
                "permanent_lifetime_secs",
            )?,
        };
        let sessions = Arc::new(SessionManager::new(policy));

        let cookie_lifetime = time::Duration::seconds(policy.permanent_lifetime.num_seconds());
        let state = AppState::new(provider, sessions)?
            .with_history_config(
                HistoryConfig::default().with_max_turns(config.history.max_turns),
            )
            .with_completion_options(
                config.completion.page_options(),
                config.completion.api_options(),
            )
            .with_permanent_lifetime(cookie_lifetime)
            .with_static_dir(config.server.static_dir.clone());

        info!("Press Ctrl+C to stop.");
        parley_web::run_with_shutdown(state, &config.server.listen_addr(), shutdown_signal()).await
    }
}

fn seconds(value: u64, field: &str) -> anyhow::Result<TimeDelta> {
    i64::try_from(value)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .with_context(|| format!("session.{field} out of range: {value}"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
