//! AI Provider Implementations
//!
//! Concrete implementations of the AIProvider trait.

mod anthropic;

pub use anthropic::AnthropicProvider;

use serde::{Deserialize, Serialize};

use super::provider::AIProvider;
use crate::CoreResult;

// =============================================================================
// Provider Configuration
// =============================================================================

/// Supported AI provider types
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Anthropic Claude models
    Anthropic,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(ProviderType::Anthropic),
            _ => Err(format!("Unknown provider type: {}", s)),
        }
    }
}

/// Configuration for creating a provider
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Provider type
    pub provider_type: ProviderType,
    /// API key (for cloud providers)
    pub api_key: Option<String>,
    /// Base URL (for custom endpoints)
    pub base_url: Option<String>,
    /// Default model to use
    pub model: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// Creates a new Anthropic provider config
    pub fn anthropic(api_key: &str) -> Self {
        Self {
            provider_type: ProviderType::Anthropic,
            api_key: Some(api_key.to_string()),
            base_url: None,
            model: Some("claude-sonnet-4-20250514".to_string()),
            timeout_secs: Some(60),
        }
    }

    /// Sets the model
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Sets the base URL
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }
}

// =============================================================================
// Provider Factory
// =============================================================================

/// Creates an AI provider from configuration
pub fn create_provider(config: ProviderConfig) -> CoreResult<Box<dyn AIProvider>> {
    match config.provider_type {
        ProviderType::Anthropic => {
            let provider = AnthropicProvider::new(config)?;
            Ok(Box::new(provider))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
