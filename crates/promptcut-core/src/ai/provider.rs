//! AI Provider Module
//!
//! Defines the trait and types for AI providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

// =============================================================================
// AI Provider Trait
// =============================================================================

/// Trait for AI providers (Anthropic, mock, etc.)
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Returns the provider name
    fn name(&self) -> &str;

    /// Generates a completion from a prompt
    async fn complete(&self, request: CompletionRequest) -> CoreResult<CompletionResponse>;

    /// Performs a lightweight connectivity/auth check.
    ///
    /// This should be cheap (no expensive completions) and should not leak
    /// secrets in error messages.
    async fn health_check(&self) -> CoreResult<()> {
        Ok(())
    }

    /// Checks if the provider is available
    fn is_available(&self) -> bool;
}

// =============================================================================
// Completion Request
// =============================================================================

/// Request for text completion
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// System prompt/instructions
    pub system: Option<String>,
    /// User prompt
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Model to use (provider-specific)
    pub model: Option<String>,
}

impl CompletionRequest {
    /// Creates a new completion request
    pub fn new(prompt: &str) -> Self {
        Self {
            system: None,
            prompt: prompt.to_string(),
            max_tokens: None,
            temperature: None,
            model: None,
        }
    }

    /// Sets the system prompt
    pub fn with_system(mut self, system: &str) -> Self {
        self.system = Some(system.to_string());
        self
    }

    /// Sets the maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the model
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }
}

// =============================================================================
// Completion Response
// =============================================================================

/// Response from text completion
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    /// Generated text
    pub text: String,
    /// Model used
    pub model: String,
    /// Token usage
    pub usage: TokenUsage,
    /// Finish reason
    pub finish_reason: FinishReason,
}

impl CompletionResponse {
    /// Creates a new completion response
    pub fn new(text: &str, model: &str) -> Self {
        Self {
            text: text.to_string(),
            model: model.to_string(),
            usage: TokenUsage::default(),
            finish_reason: FinishReason::Stop,
        }
    }
}

// =============================================================================
// Token Usage
// =============================================================================

/// Token usage statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates a new token usage record
    pub fn new(prompt: u32, completion: u32) -> Self {
        Self {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: prompt + completion,
        }
    }
}

// =============================================================================
// Finish Reason
// =============================================================================

/// Reason for completion finish
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Normal stop
    #[default]
    Stop,
    /// Reached max tokens
    Length,
    /// Content filter triggered
    ContentFilter,
    /// Function/tool call
    ToolCalls,
}

// =============================================================================
// Mock Provider (for testing)
// =============================================================================

/// Mock AI provider for testing
pub struct MockAIProvider {
    name: String,
    response: String,
    available: bool,
}

impl MockAIProvider {
    /// Creates a new mock provider
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            response: "Mock response".to_string(),
            available: true,
        }
    }

    /// Sets the mock response
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Sets availability
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, _request: CompletionRequest) -> CoreResult<CompletionResponse> {
        if !self.available {
            return Err(CoreError::Internal("Provider not available".to_string()));
        }

        Ok(CompletionResponse {
            text: self.response.clone(),
            model: "mock-model".to_string(),
            usage: TokenUsage::new(10, 20),
            finish_reason: FinishReason::Stop,
        })
    }

    async fn health_check(&self) -> CoreResult<()> {
        if !self.available {
            return Err(CoreError::Internal("Provider not available".to_string()));
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_request_builder() {
        let request = CompletionRequest::new("Hello")
            .with_system("You are a helpful assistant")
            .with_max_tokens(100)
            .with_temperature(0.7)
            .with_model("claude-sonnet-4-20250514");

        assert_eq!(request.prompt, "Hello");
        assert_eq!(
            request.system,
            Some("You are a helpful assistant".to_string())
        );
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.model, Some("claude-sonnet-4-20250514".to_string()));
    }

    #[test]
    fn test_completion_response() {
        let response = CompletionResponse::new("Hello world", "mock-model");

        assert_eq!(response.text, "Hello world");
        assert_eq!(response.model, "mock-model");
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn test_token_usage() {
        let usage = TokenUsage::new(100, 50);

        assert_eq!(usage.prompt_tokens, 100);
        assert_eq!(usage.completion_tokens, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockAIProvider::new("test").with_response("Test response");

        assert_eq!(provider.name(), "test");
        assert!(provider.is_available());

        let request = CompletionRequest::new("Hello");
        let response = provider.complete(request).await.unwrap();

        assert_eq!(response.text, "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_unavailable() {
        let provider = MockAIProvider::new("test").with_available(false);

        assert!(!provider.is_available());

        let request = CompletionRequest::new("Hello");
        let result = provider.complete(request).await;

        assert!(result.is_err());
    }
}
