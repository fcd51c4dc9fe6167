//! Application state shared across request handlers.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use parley_conversation::{HistoryConfig, HistoryStore};
use parley_core::{CompletionOptions, CompletionProvider, SessionStorage};

use crate::template::Pages;

pub struct AppState {
    /// Per-session conversation logs.
    pub history: HistoryStore,
    /// Backing session records, consulted for the permanence flag.
    pub sessions: Arc<dyn SessionStorage>,
    /// Completion gateway.
    pub provider: Arc<dyn CompletionProvider>,
    /// Parameters for the form-post page flow.
    pub page_options: CompletionOptions,
    /// Parameters for `/api/chat`.
    pub api_options: CompletionOptions,
    pub pages: Pages,
    /// Cookie `Max-Age` once a session is permanent.
    pub permanent_lifetime: time::Duration,
    pub static_dir: Option<PathBuf>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("page_options", &self.page_options)
            .field("api_options", &self.api_options)
            .field("static_dir", &self.static_dir)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build state with the provider's default model and stock limits.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        sessions: Arc<dyn SessionStorage>,
    ) -> crate::Result<Self> {
        let model = provider.get_default_model().to_string();
        Ok(Self {
            history: HistoryStore::new(Arc::clone(&sessions)),
            sessions,
            page_options: CompletionOptions::page(model.clone()),
            api_options: CompletionOptions::api(model),
            provider,
            pages: Pages::new()?,
            permanent_lifetime: time::Duration::days(31),
            static_dir: None,
        })
    }

    #[must_use]
    pub fn with_history_config(mut self, config: HistoryConfig) -> Self {
        self.history = self.history.with_config(config);
        self
    }

    #[must_use]
    pub fn with_completion_options(
        mut self,
        page_options: CompletionOptions,
        api_options: CompletionOptions,
    ) -> Self {
        self.page_options = page_options;
        self.api_options = api_options;
        self
    }

    #[must_use]
    pub const fn with_permanent_lifetime(mut self, lifetime: time::Duration) -> Self {
        self.permanent_lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }
}
