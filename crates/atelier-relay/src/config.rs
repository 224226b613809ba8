//! Relay configuration.
//!
//! The studio site historically ran two copies of the relay, each wired to a
//! different provider with its own model and persona. Both survive here as
//! [`ProviderVariant`] presets over a single [`ProviderConfig`].

use std::fmt;

use atelier_core::notices;

/// Completion path appended to a provider base URL.
pub const COMPLETIONS_PATH: &str = "/chat/completions";

/// Default sampling temperature for both presets.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const STUDIO_SYSTEM_PROMPT: &str = "\
You are the website assistant for Atelier, an independent design studio founded by \
Uday Sood and Vishal Baibhav Panda. Answer questions about the studio: its services \
(brand identity, web design and development, product and UX design), how projects \
are scoped and run, timelines, and how to get in touch. Keep answers short and \
friendly. If a question is unrelated to the studio or its work, politely say you can \
only help with questions about Atelier.";

const ASSISTANT_SYSTEM_PROMPT: &str = "\
You are Atelier's AI assistant. Atelier is a design studio led by Uday Sood and \
Vishal Baibhav Panda that builds brands, websites and digital products. Help visitors \
understand what the studio offers and how to start a project. Reply in two or three \
sentences. Do not invent prices, clients or commitments; suggest contacting the team \
for anything you cannot answer.";

/// Named provider presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderVariant {
    /// OpenAI chat completions with the studio persona.
    Studio,
    /// OpenRouter chat completions with the assistant persona.
    Assistant,
}

impl ProviderVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderVariant::Studio => "studio",
            ProviderVariant::Assistant => "assistant",
        }
    }

    /// Environment variable holding this variant's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderVariant::Studio => "OPENAI_API_KEY",
            ProviderVariant::Assistant => "OPENROUTER_API_KEY",
        }
    }
}

impl fmt::Display for ProviderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the relay needs to reach one completion provider.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Which preset this configuration started from.
    pub variant: ProviderVariant,

    /// Provider base URL, without the completions path.
    pub base_url: String,

    /// Bearer key. `None` makes every relay call fail with a configuration error.
    pub api_key: Option<String>,

    /// Model identifier sent with every call.
    pub model: String,

    /// Sampling temperature; omitted from the request when `None`.
    pub temperature: Option<f32>,

    /// System instruction prepended to every call.
    pub system_prompt: String,

    /// `HTTP-Referer` header (OpenRouter attribution).
    pub referer: Option<String>,

    /// `X-Title` header (OpenRouter attribution).
    pub title: Option<String>,

    /// Public message for unexpected failures.
    pub server_error_message: &'static str,
}

impl ProviderConfig {
    /// Preset for a variant, with no API key.
    pub fn for_variant(variant: ProviderVariant) -> Self {
        match variant {
            ProviderVariant::Studio => Self {
                variant,
                base_url: "https://api.openai.com/v1".to_string(),
                api_key: None,
                model: "gpt-4o-mini".to_string(),
                temperature: Some(DEFAULT_TEMPERATURE),
                system_prompt: STUDIO_SYSTEM_PROMPT.to_string(),
                referer: None,
                title: None,
                server_error_message: notices::SERVER_ERROR,
            },
            ProviderVariant::Assistant => Self {
                variant,
                base_url: "https://openrouter.ai/api/v1".to_string(),
                api_key: None,
                model: "mistralai/mistral-7b-instruct".to_string(),
                temperature: Some(DEFAULT_TEMPERATURE),
                system_prompt: ASSISTANT_SYSTEM_PROMPT.to_string(),
                referer: Some("https://atelier.studio".to_string()),
                title: Some("Atelier Assistant".to_string()),
                server_error_message: notices::ASSISTANT_SERVER_ERROR,
            },
        }
    }

    /// Preset overlaid with the process environment.
    ///
    /// | Variable                    | Purpose                        |
    /// |-----------------------------|--------------------------------|
    /// | `OPENAI_API_KEY`            | key for the studio variant     |
    /// | `OPENROUTER_API_KEY`        | key for the assistant variant  |
    /// | `ATELIER_PROVIDER_BASE_URL` | base URL override              |
    /// | `ATELIER_MODEL`             | model override                 |
    /// | `ATELIER_REFERER`           | `HTTP-Referer` override        |
    /// | `ATELIER_TITLE`             | `X-Title` override             |
    pub fn from_env(variant: ProviderVariant) -> Self {
        Self::from_lookup(variant, |name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with an injectable lookup.
    pub fn from_lookup(variant: ProviderVariant, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::for_variant(variant);
        config.api_key = non_empty(variant.api_key_var());
        if let Some(base_url) = non_empty("ATELIER_PROVIDER_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = non_empty("ATELIER_MODEL") {
            config.model = model;
        }
        if let Some(referer) = non_empty("ATELIER_REFERER") {
            config.referer = Some(referer);
        }
        if let Some(title) = non_empty("ATELIER_TITLE") {
            config.title = Some(title);
        }
        config
    }

    /// Full completions endpoint URL.
    pub fn completions_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), COMPLETIONS_PATH)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

// Keeps the key out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("variant", &self.variant)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .finish()
    }
}

/// Relay server configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// HTTP server bind address.
    pub bind_addr: String,

    /// Path the relay endpoint is mounted on.
    pub relay_path: String,

    /// Provider the relay forwards to.
    pub provider: ProviderConfig,
}
