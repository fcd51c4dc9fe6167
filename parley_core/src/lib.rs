#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod completion;
pub mod error;
pub mod session;

pub use completion::{
    API_MAX_TOKENS, CompletionOptions, DEFAULT_MODEL, DEFAULT_TEMPERATURE, PAGE_MAX_TOKENS,
};
pub use error::GatewayError;
pub use session::{Session, SessionId};

/// One user input paired with the bot response it produced.
///
/// Turns carry no timestamp and cannot be edited after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    user_input: String,
    bot_response: String,
}

impl Turn {
    #[must_use]
    pub fn new(user_input: impl Into<String>, bot_response: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            bot_response: bot_response.into(),
        }
    }

    #[must_use]
    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    #[must_use]
    pub fn bot_response(&self) -> &str {
        &self.bot_response
    }
}

/// A single-shot text completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, GatewayError>;

    fn get_default_model(&self) -> &str;
}

#[async_trait]
impl<T: CompletionProvider + ?Sized> CompletionProvider for Arc<T> {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, GatewayError> {
        (**self).complete(prompt, options).await
    }

    fn get_default_model(&self) -> &str {
        (**self).get_default_model()
    }
}

/// Per-client session storage keyed by [`SessionId`].
///
/// `load` never fails for an unknown or expired id; it hands back a fresh,
/// empty session carrying the requested id instead.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self, id: &SessionId) -> anyhow::Result<Session>;
    async fn save(&self, session: Session) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: SessionStorage + ?Sized> SessionStorage for Arc<T> {
    async fn load(&self, id: &SessionId) -> anyhow::Result<Session> {
        (**self).load(id).await
    }

    async fn save(&self, session: Session) -> anyhow::Result<()> {
        (**self).save(session).await
    }
}
