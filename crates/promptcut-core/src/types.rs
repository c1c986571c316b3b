//! Promptcut Core Type Definitions
//!
//! Defines fundamental types shared across the command model, the pipeline
//! compiler, and the AI parser.

use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Formats a time in seconds as `M:SS` for human-readable descriptions.
pub fn format_timestamp(seconds: TimeSec) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let mins = total / 60;
    let secs = total % 60;
    format!("{}:{:02}", mins, secs)
}

// =============================================================================
// Spatial Types
// =============================================================================

/// 2D size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size2D {
    pub width: u32,
    pub height: u32,
}

impl Size2D {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Size2D {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

// =============================================================================
// Video Context
// =============================================================================

/// Read-only description of the source video, supplied by the caller.
///
/// Used only to clamp time-based command fields and to size thumbnail
/// sampling intervals; the core never opens the file itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContext {
    /// Duration in seconds (must be > 0 for meaningful clamping)
    pub duration: TimeSec,
    /// Whether the source carries an audio stream
    pub has_audio: bool,
    /// Source resolution
    pub resolution: Size2D,
}

impl VideoContext {
    pub fn new(duration: TimeSec, has_audio: bool, resolution: Size2D) -> Self {
        if duration <= 0.0 {
            warn!(
                "VideoContext created with non-positive duration {}",
                duration
            );
        }
        Self {
            duration,
            has_audio,
            resolution,
        }
    }
}

// =============================================================================
// ASS Color Conversion
// =============================================================================

/// Converts a `#RRGGBB` hex color into the ASS subtitle `AABBGGRR` form.
///
/// The subtitle renderer expects alpha-blue-green-red hex with a leading
/// `00` (opaque) alpha byte. Anything other than exactly six hex digits
/// falls back to opaque white.
pub fn hex_to_ass(hex: &str) -> String {
    let clean = hex.trim().trim_start_matches('#');

    if clean.len() == 6 && clean.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = &clean[0..2];
        let g = &clean[2..4];
        let b = &clean[4..6];
        return format!("00{}{}{}", b, g, r).to_uppercase();
    }

    warn!("Invalid hex color '{}', defaulting to opaque white", hex);
    "00FFFFFF".to_string()
}

// =============================================================================
// Clamping
// =============================================================================

/// Clamps a value to `[min, max]`, the validator's sole numeric policy.
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.clamp(min, max)
}

// =============================================================================
// Tests
// =============================================================================
