//! Promptcut Core Engine
//!
//! Translates natural-language video editing requests into a deterministic
//! pipeline of FFmpeg processing operations.
//!
//! The flow is: an [`ai::PromptParser`] turns a user prompt into a list of
//! typed [`commands::VideoCommand`]s (via an [`ai::AIProvider`]), the
//! [`commands::validate`] pass clamps their numeric parameters against the
//! video's physical constraints, and the [`pipeline::PipelineCompiler`] maps
//! each command to one concrete operation, threading intermediate artifact
//! names into a strict linear chain. Execution is handed off to
//! [`engine::FfmpegEngine`], which runs the operations strictly in order.

pub mod ai;
pub mod commands;
pub mod engine;
pub mod pipeline;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;
