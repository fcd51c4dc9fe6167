//! Fixed parameters for a single completion call.

/// Completion model used when none is configured.
pub const DEFAULT_MODEL: &str = "command-a-03-2025";

/// Output token ceiling for the rendered page flow.
pub const PAGE_MAX_TOKENS: u32 = 1000;

/// Output token ceiling for the JSON chat endpoint.
pub const API_MAX_TOKENS: u32 = 3000;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionOptions {
    /// Options used by the form-post page flow.
    #[must_use]
    pub fn page(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: PAGE_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Options used by the programmatic `/api/chat` flow.
    #[must_use]
    pub fn api(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: API_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
