//! Video Command Model
//!
//! Defines the closed set of edit commands produced by the AI prompt parser
//! and consumed by the pipeline compiler. The union is internally tagged by
//! `type` on the wire, matching the JSON schema the AI provider is prompted
//! to emit.

use serde::{Deserialize, Serialize};

use crate::TimeSec;

mod validator;
pub use validator::validate;

// =============================================================================
// VideoCommand
// =============================================================================

/// A single structured edit intent.
///
/// Tags the AI emits but this compiler does not recognize deserialize into
/// [`VideoCommand::Unknown`]; the compiler skips them and carries the current
/// artifact forward unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum VideoCommand {
    /// Keep only the portion between `start_time` and `end_time`
    Trim {
        start_time: TimeSec,
        end_time: TimeSec,
    },
    /// Remove the listed segments from the video
    Cut { segments: Vec<CutSegment> },
    /// Remove silent stretches from both ends of every boundary
    RemoveSilence {
        /// Silence threshold in dB (negative)
        threshold: f64,
        /// Minimum silence duration to remove, seconds
        min_duration: TimeSec,
        /// Padding to keep around speech, seconds
        padding: TimeSec,
    },
    /// Burn in subtitles from a pre-generated caption file
    AddCaptions {
        style: CaptionStyle,
        language: String,
    },
    /// Apply a color preset and/or manual adjustments
    ColorCorrection {
        adjustments: ColorAdjustments,
        #[serde(skip_serializing_if = "Option::is_none")]
        preset: Option<ColorPreset>,
    },
    /// Apply one audio filter, passing video through untouched
    Audio {
        action: AudioAction,
        params: AudioParams,
    },
    /// Add a transition at the requested position
    Transition {
        transition_type: TransitionType,
        duration: TimeSec,
        position: TransitionPosition,
    },
    /// Apply a visual effect by name
    Effect {
        /// Open string; unrecognized names compile to an identity filter
        effect_name: String,
        /// 0..1, mapped into filter-specific ranges by the compiler
        intensity: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        params: Option<serde_json::Value>,
    },
    /// Final encode settings; always produces the terminal artifact
    Export {
        format: ExportFormat,
        resolution: ExportResolution,
        aspect_ratio: AspectRatio,
        quality: ExportQuality,
        fps: u32,
    },
    /// Extract still frames as a side artifact
    Thumbnail {
        count: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<ThumbnailStyle>,
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamps: Option<Vec<TimeSec>>,
    },
    /// Catch-all for structurally valid but unrecognized tags
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Command Payloads
// =============================================================================

/// One time range to remove from the video
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutSegment {
    pub start_time: TimeSec,
    pub end_time: TimeSec,
}

impl CutSegment {
    pub fn new(start_time: TimeSec, end_time: TimeSec) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

/// Caption rendering style
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionStyle {
    pub font_family: String,
    /// Font size in px
    pub font_size: u32,
    /// `#RRGGBB` hex
    pub font_color: String,
    /// `#RRGGBB` hex
    pub background_color: String,
    pub position: CaptionPosition,
    pub outline: bool,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 24,
            font_color: "#FFFFFF".to_string(),
            background_color: "#000000".to_string(),
            position: CaptionPosition::Bottom,
            outline: true,
        }
    }
}

/// Caption placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionPosition {
    Bottom,
    Top,
    Center,
}

/// Manual color adjustments, each in [-1, 1] after validation.
///
/// Absent fields stay absent: the compiler emits an `eq` parameter only for
/// fields that are present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorAdjustments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    /// -1 (cool) to 1 (warm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure: Option<f64>,
}

/// Named color grade presets with fixed filter chains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPreset {
    Cinematic,
    Vintage,
    Vibrant,
    Moody,
    Warm,
    Cool,
    Noir,
}

impl std::fmt::Display for ColorPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColorPreset::Cinematic => "cinematic",
            ColorPreset::Vintage => "vintage",
            ColorPreset::Vibrant => "vibrant",
            ColorPreset::Moody => "moody",
            ColorPreset::Warm => "warm",
            ColorPreset::Cool => "cool",
            ColorPreset::Noir => "noir",
        };
        write!(f, "{}", name)
    }
}

/// Audio processing action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioAction {
    Normalize,
    ReduceNoise,
    AddMusic,
    AdjustVolume,
    Ducking,
    FadeIn,
    FadeOut,
}

/// Parameters for audio actions; irrelevant fields are simply absent
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioParams {
    /// 0..2, 1 is unity gain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_url: Option<String>,
    /// 0..1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_volume: Option<f64>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_duration: Option<TimeSec>,
    /// 0..1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_reduction: Option<f64>,
}

/// Transition kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionType {
    Fade,
    Dissolve,
    Wipe,
    Slide,
    Zoom,
    Blur,
}

impl std::fmt::Display for TransitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransitionType::Fade => "fade",
            TransitionType::Dissolve => "dissolve",
            TransitionType::Wipe => "wipe",
            TransitionType::Slide => "slide",
            TransitionType::Zoom => "zoom",
            TransitionType::Blur => "blur",
        };
        write!(f, "{}", name)
    }
}

/// Where a transition applies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPosition {
    BetweenClips,
    Start,
    End,
    All,
}

/// Output container format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Mp4,
    Mov,
    Webm,
    Gif,
}

impl ExportFormat {
    /// File extension for the terminal output artifact
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Mp4 => "mp4",
            ExportFormat::Mov => "mov",
            ExportFormat::Webm => "webm",
            ExportFormat::Gif => "gif",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Output resolution target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportResolution {
    #[serde(rename = "4k")]
    UltraHd,
    #[serde(rename = "1080p")]
    FullHd,
    #[serde(rename = "720p")]
    Hd,
    #[serde(rename = "480p")]
    Sd,
    #[serde(rename = "original")]
    Original,
}

impl ExportResolution {
    /// Fixed `width:height` scale target, or None for original
    pub fn scale_target(&self) -> Option<(u32, u32)> {
        match self {
            ExportResolution::UltraHd => Some((3840, 2160)),
            ExportResolution::FullHd => Some((1920, 1080)),
            ExportResolution::Hd => Some((1280, 720)),
            ExportResolution::Sd => Some((854, 480)),
            ExportResolution::Original => None,
        }
    }
}

impl std::fmt::Display for ExportResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExportResolution::UltraHd => "4k",
            ExportResolution::FullHd => "1080p",
            ExportResolution::Hd => "720p",
            ExportResolution::Sd => "480p",
            ExportResolution::Original => "original",
        };
        write!(f, "{}", name)
    }
}

/// Output aspect ratio target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Vertical,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Portrait,
    #[serde(rename = "21:9")]
    Ultrawide,
    #[serde(rename = "original")]
    Original,
}

impl AspectRatio {
    /// Ratio as a `num/den` expression for a height-relative crop
    pub fn crop_expr(&self) -> Option<&'static str> {
        match self {
            AspectRatio::Wide => Some("16/9"),
            AspectRatio::Vertical => Some("9/16"),
            AspectRatio::Square => Some("1/1"),
            AspectRatio::Portrait => Some("4/5"),
            AspectRatio::Ultrawide => Some("21/9"),
            AspectRatio::Original => None,
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AspectRatio::Wide => "16:9",
            AspectRatio::Vertical => "9:16",
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "4:5",
            AspectRatio::Ultrawide => "21:9",
            AspectRatio::Original => "original",
        };
        write!(f, "{}", name)
    }
}

/// Encode quality preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportQuality {
    High,
    Medium,
    Low,
}

impl ExportQuality {
    /// (crf, x264 preset) pair
    pub fn encode_flags(&self) -> (u32, &'static str) {
        match self {
            ExportQuality::High => (18, "slow"),
            ExportQuality::Medium => (23, "medium"),
            ExportQuality::Low => (28, "fast"),
        }
    }
}

/// Thumbnail generation style
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailStyle {
    Auto,
    TextOverlay,
    Collage,
}

// =============================================================================
// Tests
// =============================================================================
