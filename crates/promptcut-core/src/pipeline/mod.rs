//! Processing Pipeline Model
//!
//! Defines the structured operation descriptors the compiler emits. Each
//! operation names exactly one input artifact and one output artifact; a
//! pipeline is a strict linear chain of them plus the final output name.
//!
//! Directives are kept structured (argv, not a shell string) so the compiler
//! stays testable via structured equality; rendering to a display string
//! happens only at the execution boundary.

use serde::{Deserialize, Serialize};

mod compiler;
mod filters;
mod segments;

pub use compiler::PipelineCompiler;
pub use segments::{keep_segments, KeepSegment};

// =============================================================================
// FFmpeg Directive
// =============================================================================

/// A complete, self-contained FFmpeg invocation description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FfmpegDirective {
    /// Input artifact path
    pub input: String,
    /// Arguments between the input and the output (filters, codecs, maps)
    pub args: Vec<String>,
    /// Output artifact path
    pub output: String,
}

impl FfmpegDirective {
    pub fn new(input: &str, args: Vec<String>, output: &str) -> Self {
        Self {
            input: input.to_string(),
            args,
            output: output.to_string(),
        }
    }

    /// Full argv for the ffmpeg binary (without the program name).
    pub fn to_args(&self) -> Vec<String> {
        let mut argv = vec!["-i".to_string(), self.input.clone()];
        argv.extend(self.args.iter().cloned());
        argv.push("-y".to_string());
        argv.push(self.output.clone());
        argv
    }

    /// Human-readable command line for logs and API responses.
    ///
    /// Filter expressions and paths are quoted the way a user would type
    /// them into a shell; this string is for display, execution goes through
    /// [`FfmpegDirective::to_args`].
    pub fn to_command_string(&self) -> String {
        let mut parts = vec![
            "ffmpeg".to_string(),
            "-i".to_string(),
            format!("\"{}\"", self.input),
        ];

        let mut quote_next = false;
        for arg in &self.args {
            if quote_next {
                parts.push(format!("\"{}\"", arg));
                quote_next = false;
                continue;
            }
            quote_next = matches!(arg.as_str(), "-vf" | "-af" | "-filter_complex" | "-map");
            parts.push(arg.clone());
        }

        parts.push(format!("\"{}\"", self.output));
        parts.join(" ")
    }
}

// =============================================================================
// Processing Operation
// =============================================================================

/// One concrete processing step, immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingOperation {
    /// The processing directive to execute
    pub directive: FfmpegDirective,
    /// Human-readable description of what the step does
    pub description: String,
    /// Heuristic wall-clock estimate in seconds (not measured)
    pub estimated_duration_sec: f64,
    /// Output artifact name, equal to `directive.output`
    pub output: String,
}

impl ProcessingOperation {
    pub fn new(directive: FfmpegDirective, description: &str, estimated_duration_sec: f64) -> Self {
        let output = directive.output.clone();
        Self {
            directive,
            description: description.to_string(),
            estimated_duration_sec,
            output,
        }
    }
}

// =============================================================================
// Processing Pipeline
// =============================================================================

/// An ordered execution plan: operations plus the final output artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingPipeline {
    pub operations: Vec<ProcessingOperation>,
    /// The last operation's output, or the original source when empty
    pub final_output: String,
}

impl ProcessingPipeline {
    /// Total of the per-operation duration heuristics.
    pub fn estimated_duration_sec(&self) -> f64 {
        self.operations
            .iter()
            .map(|op| op.estimated_duration_sec)
            .sum()
    }

    /// Flattened display command strings, one per operation.
    pub fn descriptor_strings(&self) -> Vec<String> {
        self.operations
            .iter()
            .map(|op| op.directive.to_command_string())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
