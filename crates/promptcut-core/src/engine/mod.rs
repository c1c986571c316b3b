//! Execution Engine
//!
//! Runs a compiled [`ProcessingPipeline`] against a real FFmpeg binary.
//! Operations execute strictly in order: each one reads the artifact the
//! previous one wrote, so there is no parallelism within a pipeline. The
//! engine is the only component that touches the filesystem or spawns
//! processes; everything upstream is pure.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::pipeline::ProcessingPipeline;

// =============================================================================
// Errors
// =============================================================================

/// Engine-related error types
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("FFmpeg not found. Please install FFmpeg and ensure it is on PATH.")]
    NotFound,

    #[error("FFmpeg execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Process error: {0}")]
    ProcessError(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// FFmpeg Engine
// =============================================================================

/// Sequential FFmpeg pipeline executor
pub struct FfmpegEngine {
    ffmpeg_path: PathBuf,
}

impl FfmpegEngine {
    /// Creates an engine for a known FFmpeg binary path
    pub fn with_path(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Creates an engine from the system-installed FFmpeg.
    ///
    /// Probes `ffmpeg -version` through PATH; fails with [`EngineError::NotFound`]
    /// when the binary is missing or does not answer the version query.
    pub fn system() -> EngineResult<Self> {
        let path = PathBuf::from("ffmpeg");
        let version = probe_version(&path)?;
        debug!(version = %version, "detected system ffmpeg");
        Ok(Self { ffmpeg_path: path })
    }

    /// Path of the FFmpeg binary this engine runs
    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// Executes every operation of the pipeline in order.
    ///
    /// Fails fast on the first non-zero exit, returning the captured stderr.
    /// On success, returns the output artifact paths in execution order.
    pub async fn execute(&self, pipeline: &ProcessingPipeline) -> EngineResult<Vec<String>> {
        let mut outputs = Vec::with_capacity(pipeline.operations.len());

        for (index, op) in pipeline.operations.iter().enumerate() {
            info!(
                step = index + 1,
                total = pipeline.operations.len(),
                description = %op.description,
                "running pipeline operation"
            );

            let result = tokio::process::Command::new(&self.ffmpeg_path)
                .args(op.directive.to_args())
                .output()
                .await?;

            if !result.status.success() {
                let stderr = String::from_utf8_lossy(&result.stderr);
                return Err(EngineError::ExecutionFailed(format!(
                    "step {} ({}): {}",
                    index + 1,
                    op.description,
                    stderr.trim()
                )));
            }

            outputs.push(op.output.clone());
        }

        Ok(outputs)
    }
}

/// Runs `ffmpeg -version` and returns the first line of its output
fn probe_version(path: &Path) -> EngineResult<String> {
    let output = Command::new(path)
        .arg("-version")
        .output()
        .map_err(|_| EngineError::NotFound)?;

    if !output.status.success() {
        return Err(EngineError::NotFound);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or("unknown").to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{FfmpegDirective, ProcessingOperation};

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::NotFound;
        assert!(err.to_string().contains("FFmpeg not found"));

        let err = EngineError::ExecutionFailed("exit code 1".to_string());
        assert!(err.to_string().contains("exit code 1"));
    }

    #[test]
    fn test_with_path() {
        let engine = FfmpegEngine::with_path("/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(
            engine.ffmpeg_path(),
            Path::new("/opt/ffmpeg/bin/ffmpeg")
        );
    }

    #[tokio::test]
    async fn test_execute_empty_pipeline() {
        // No operations means no processes are spawned, even with a bogus binary
        let engine = FfmpegEngine::with_path("/nonexistent/ffmpeg");
        let pipeline = ProcessingPipeline {
            operations: Vec::new(),
            final_output: "in.mp4".to_string(),
        };

        let outputs = engine.execute(&pipeline).await.unwrap();
        assert!(outputs.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_fails_fast_on_nonzero_exit() {
        let engine = FfmpegEngine::with_path("/bin/false");
        let pipeline = ProcessingPipeline {
            operations: vec![
                ProcessingOperation::new(
                    FfmpegDirective::new("in.mp4", vec![], "a.mp4"),
                    "First step",
                    1.0,
                ),
                ProcessingOperation::new(
                    FfmpegDirective::new("a.mp4", vec![], "b.mp4"),
                    "Second step",
                    1.0,
                ),
            ],
            final_output: "b.mp4".to_string(),
        };

        let err = engine.execute(&pipeline).await.unwrap_err();
        match err {
            EngineError::ExecutionFailed(msg) => assert!(msg.contains("step 1")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_collects_outputs_in_order() {
        let engine = FfmpegEngine::with_path("/bin/true");
        let pipeline = ProcessingPipeline {
            operations: vec![
                ProcessingOperation::new(
                    FfmpegDirective::new("in.mp4", vec![], "a.mp4"),
                    "First step",
                    1.0,
                ),
                ProcessingOperation::new(
                    FfmpegDirective::new("a.mp4", vec![], "b.mp4"),
                    "Second step",
                    1.0,
                ),
            ],
            final_output: "b.mp4".to_string(),
        };

        let outputs = engine.execute(&pipeline).await.unwrap();
        assert_eq!(outputs, vec!["a.mp4".to_string(), "b.mp4".to_string()]);
    }
}
