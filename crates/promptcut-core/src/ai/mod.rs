//! AI Integration Module
//!
//! Provider abstraction plus the natural-language prompt parser. The parser
//! is the only component that talks to a model; everything downstream of it
//! works on validated [`VideoCommand`](crate::commands::VideoCommand) lists.

mod parser;
mod provider;
pub mod providers;

pub use parser::{ParsedPromptResult, PromptParser};
pub use provider::{
    AIProvider, CompletionRequest, CompletionResponse, FinishReason, MockAIProvider, TokenUsage,
};
