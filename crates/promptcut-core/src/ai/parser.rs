//! Prompt Parser
//!
//! Turns natural-language editing requests into validated [`VideoCommand`]
//! lists by delegating to an [`AIProvider`]. The model is instructed to
//! answer with JSON only; the parser strips markdown code fences anyway,
//! deserializes, and runs every command through the validator before
//! returning. Parsing never fails: any provider or decode error degrades
//! to a fallback result with zero confidence and no commands.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::provider::{AIProvider, CompletionRequest};
use crate::commands::{validate, VideoCommand};
use crate::{format_timestamp, VideoContext};

// =============================================================================
// System Prompt
// =============================================================================

const SYSTEM_PROMPT: &str = r##"You are an AI assistant that parses natural language video editing requests into structured commands.

You must respond with valid JSON only, no other text. The response should match this structure:
{
  "commands": [...],
  "explanation": "Brief explanation of what will be done",
  "confidence": 0.95,
  "warnings": ["Optional warnings about the request"]
}

Available command types and their structures:

1. TRIM - Keep only a portion of the video
{
  "type": "trim",
  "startTime": <seconds>,
  "endTime": <seconds>
}

2. CUT - Remove specific segments
{
  "type": "cut",
  "segments": [{ "startTime": <seconds>, "endTime": <seconds> }]
}

3. REMOVE_SILENCE - Remove silent parts
{
  "type": "remove_silence",
  "threshold": -30,
  "minDuration": 1,
  "padding": 0.2
}

4. ADD_CAPTIONS - Generate and add subtitles
{
  "type": "add_captions",
  "style": {
    "fontFamily": "Arial",
    "fontSize": 24,
    "fontColor": "#FFFFFF",
    "backgroundColor": "#000000",
    "position": "bottom",
    "outline": true
  },
  "language": "en"
}

5. COLOR_CORRECTION - Adjust colors
{
  "type": "color_correction",
  "adjustments": {
    "brightness": <-1 to 1>,
    "contrast": <-1 to 1>,
    "saturation": <-1 to 1>,
    "temperature": <-1 to 1>,
    "exposure": <-1 to 1>
  },
  "preset": "cinematic" | "vintage" | "vibrant" | "moody" | "warm" | "cool" | "noir"
}

6. AUDIO - Audio adjustments
{
  "type": "audio",
  "action": "normalize" | "reduce_noise" | "add_music" | "adjust_volume" | "ducking" | "fade_in" | "fade_out",
  "params": {
    "volume": <0 to 2>,
    "musicVolume": <0 to 1>,
    "fadeDuration": <seconds>,
    "noiseReduction": <0 to 1>
  }
}

7. TRANSITION - Add transitions
{
  "type": "transition",
  "transitionType": "fade" | "dissolve" | "wipe" | "slide" | "zoom" | "blur",
  "duration": <seconds>,
  "position": "between_clips" | "start" | "end" | "all"
}

8. EFFECT - Apply visual effects
{
  "type": "effect",
  "effectName": "blur" | "sharpen" | "vignette" | "film_grain" | "slow_motion" | "speed_up" | "stabilize" | "zoom_in" | "zoom_out",
  "intensity": <0 to 1>,
  "params": {}
}

9. EXPORT - Export settings
{
  "type": "export",
  "format": "mp4" | "mov" | "webm" | "gif",
  "resolution": "4k" | "1080p" | "720p" | "480p" | "original",
  "aspectRatio": "16:9" | "9:16" | "1:1" | "4:5" | "21:9" | "original",
  "quality": "high" | "medium" | "low",
  "fps": 30
}

10. THUMBNAIL - Generate thumbnails
{
  "type": "thumbnail",
  "count": <number>,
  "style": "auto" | "text_overlay" | "collage"
}

Time format hints:
- "first 10 seconds" = startTime: 0, endTime: 10
- "from 1:30 to 2:15" = startTime: 90, endTime: 135
- "last 30 seconds" = requires video duration context
- "the beginning" = first ~5 seconds
- "the end" = last ~5 seconds

Parse the user's request and generate the appropriate commands. You can combine multiple commands for complex requests."##;

// =============================================================================
// Parsed Result
// =============================================================================

/// Parsed result from the AI
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPromptResult {
    pub commands: Vec<VideoCommand>,
    pub explanation: String,
    /// 0.0 - 1.0
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl ParsedPromptResult {
    /// Empty result returned when the provider fails or the response
    /// cannot be decoded
    pub fn fallback() -> Self {
        Self {
            commands: Vec::new(),
            explanation: "I couldn't understand that request. Please try rephrasing.".to_string(),
            confidence: 0.0,
            warnings: Some(vec![
                "Failed to parse the request. Please try again with a clearer description."
                    .to_string(),
            ]),
        }
    }
}

// =============================================================================
// Prompt Parser
// =============================================================================

/// Natural-language command parser backed by an AI provider
pub struct PromptParser {
    provider: Box<dyn AIProvider>,
}

impl PromptParser {
    pub fn new(provider: Box<dyn AIProvider>) -> Self {
        Self { provider }
    }

    /// Parses a user request into validated commands.
    ///
    /// When a [`VideoContext`] is given, its duration, audio presence and
    /// resolution are prepended to the prompt so the model can resolve
    /// relative references like "the last 30 seconds", and time bounds are
    /// clamped against the real duration afterwards.
    pub async fn parse(
        &self,
        user_prompt: &str,
        video_context: Option<&VideoContext>,
    ) -> ParsedPromptResult {
        let context_info = match video_context {
            Some(ctx) => format!(
                "\nVideo context:\n- Duration: {} seconds ({})\n- Has audio: {}\n- Resolution: {}x{}\n",
                ctx.duration,
                format_timestamp(ctx.duration),
                ctx.has_audio,
                ctx.resolution.width,
                ctx.resolution.height
            ),
            None => String::new(),
        };

        let prompt = format!(
            "{}\n\nUser request: \"{}\"\n\nParse this request into video editing commands. Respond with JSON only.",
            context_info, user_prompt
        );

        let request = CompletionRequest::new(&prompt)
            .with_system(SYSTEM_PROMPT)
            .with_max_tokens(1024);

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "AI request failed");
                return ParsedPromptResult::fallback();
            }
        };

        let json = Self::extract_json(&response.text);
        let mut result: ParsedPromptResult = match serde_json::from_str(json) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "failed to decode AI response");
                return ParsedPromptResult::fallback();
            }
        };

        result.commands = validate(result.commands, video_context.map(|c| c.duration));
        result
    }

    /// Extracts the JSON payload from a response that may wrap it in
    /// markdown code fences
    fn extract_json(text: &str) -> &str {
        let inner = if text.contains("```json") {
            text.split("```json")
                .nth(1)
                .and_then(|s| s.split("```").next())
                .unwrap_or(text)
        } else if text.contains("```") {
            text.split("```")
                .nth(1)
                .and_then(|s| s.split("```").next())
                .unwrap_or(text)
        } else {
            text
        };
        inner.trim()
    }
}

// =============================================================================
// Tests
// =============================================================================
