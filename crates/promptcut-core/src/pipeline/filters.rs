//! FFmpeg Filter Builders
//!
//! Maps validated command parameters onto concrete FFmpeg filter strings:
//! color grade presets, manual adjustment stages, audio actions, transitions
//! and named visual effects. Intensities arrive pre-clamped to 0..1 from the
//! validator; each builder maps them into its filter-specific range.

use crate::commands::{
    AudioAction, AudioParams, ColorAdjustments, ColorPreset, TransitionPosition, TransitionType,
};

// =============================================================================
// Color Grading
// =============================================================================

/// Fixed filter chains for the named color presets.
pub fn preset_filters(preset: ColorPreset) -> Vec<&'static str> {
    match preset {
        ColorPreset::Cinematic => vec![
            "eq=contrast=1.1:brightness=0.05:saturation=0.9",
            "curves=preset=cross_process",
            "colorbalance=rs=0.1:gs=-0.05:bs=-0.1",
        ],
        ColorPreset::Vintage => vec![
            "eq=saturation=0.7:contrast=1.1",
            "colorbalance=rs=0.2:gs=0.1:bs=-0.1",
            "curves=preset=vintage",
        ],
        ColorPreset::Vibrant => vec![
            "eq=saturation=1.4:contrast=1.1:brightness=0.02",
            "vibrance=intensity=0.3",
        ],
        ColorPreset::Moody => vec![
            "eq=contrast=1.2:brightness=-0.05:saturation=0.7",
            "colorbalance=rs=-0.1:gs=-0.1:bs=0.15",
        ],
        ColorPreset::Warm => vec![
            "colortemperature=temperature=6500",
            "eq=saturation=1.1",
            "colorbalance=rs=0.1:gs=0.05:bs=-0.1",
        ],
        ColorPreset::Cool => vec![
            "colortemperature=temperature=4500",
            "eq=saturation=0.95",
            "colorbalance=rs=-0.1:gs=0:bs=0.1",
        ],
        ColorPreset::Noir => vec![
            "eq=saturation=0:contrast=1.3:brightness=-0.1",
            "curves=preset=darker",
        ],
    }
}

/// Combined brightness/contrast/saturation `eq` stage for the fields that
/// are present. Returns None when none are set.
pub fn eq_stage(adjustments: &ColorAdjustments) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(b) = adjustments.brightness {
        parts.push(format!("brightness={}", b));
    }
    if let Some(c) = adjustments.contrast {
        parts.push(format!("contrast={}", 1.0 + c));
    }
    if let Some(s) = adjustments.saturation {
        parts.push(format!("saturation={}", 1.0 + s));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("eq={}", parts.join(":")))
    }
}

/// Color temperature stage mapping signed [-1, 1] onto absolute Kelvin
/// around 6500K. The slopes differ above and below zero.
pub fn temperature_stage(temperature: f64) -> String {
    let kelvin = if temperature > 0.0 {
        6500.0 + temperature * 3000.0
    } else {
        6500.0 + temperature * 2500.0
    };
    format!("colortemperature=temperature={}", kelvin)
}

// =============================================================================
// Silence Removal
// =============================================================================

/// Double-pass silence trim: detect from the start, reverse, detect again,
/// reverse back — so silence is stripped consistently at both boundary ends.
pub fn silence_removal_filter(threshold: f64, min_duration: f64) -> String {
    let pass = format!(
        "silenceremove=start_periods=1:start_duration={}:start_threshold={}dB:detection=peak",
        min_duration, threshold
    );
    format!("{pass},areverse,{pass},areverse")
}

// =============================================================================
// Audio Actions
// =============================================================================

/// Maps an audio action onto exactly one audio filter plus a description.
/// Unrecognized combinations fall back to `anull` passthrough; video is
/// always copied untouched by the caller.
pub fn audio_filter(action: AudioAction, params: &AudioParams) -> (String, String) {
    match action {
        AudioAction::Normalize => (
            "loudnorm=I=-16:TP=-1.5:LRA=11".to_string(),
            "Normalize audio levels".to_string(),
        ),
        AudioAction::ReduceNoise => {
            let reduction = params.noise_reduction.unwrap_or(0.5);
            (
                format!("afftdn=nf=-{}", 20.0 + reduction * 30.0),
                "Reduce background noise".to_string(),
            )
        }
        AudioAction::AdjustVolume => {
            let volume = params.volume.unwrap_or(1.0);
            (
                format!("volume={}", volume),
                format!("Adjust volume to {}%", (volume * 100.0).round()),
            )
        }
        AudioAction::FadeIn => {
            let duration = params.fade_duration.unwrap_or(1.0);
            (
                format!("afade=t=in:st=0:d={}", duration),
                format!("Add {}s audio fade in", duration),
            )
        }
        AudioAction::FadeOut => {
            let duration = params.fade_duration.unwrap_or(1.0);
            (
                format!("afade=t=out:st=0:d={}", duration),
                format!("Add {}s audio fade out", duration),
            )
        }
        // add_music and ducking need a second input stream the linear
        // pipeline does not model; they degrade to a passthrough
        AudioAction::AddMusic | AudioAction::Ducking => {
            ("anull".to_string(), "Process audio".to_string())
        }
    }
}

// =============================================================================
// Transitions
// =============================================================================

/// Builds the transition filter for a single-input pipeline stage.
///
/// Fade composes in/out filters by position; blur is time-gated over the
/// transition window. Every other type currently falls back to a fade-in.
pub fn transition_filter(
    transition_type: TransitionType,
    duration: f64,
    position: TransitionPosition,
) -> String {
    match transition_type {
        TransitionType::Fade => {
            let mut filter = String::new();
            if matches!(
                position,
                TransitionPosition::Start | TransitionPosition::All
            ) {
                filter.push_str(&format!("fade=t=in:st=0:d={}", duration));
            }
            if matches!(position, TransitionPosition::End | TransitionPosition::All) {
                if !filter.is_empty() {
                    filter.push(',');
                }
                filter.push_str(&format!("fade=t=out:st=0:d={}", duration));
            }
            if filter.is_empty() {
                // between_clips has no single-input rendering; fall back to
                // a fade-in like the unmatched types below
                filter = format!("fade=t=in:st=0:d={}", duration);
            }
            filter
        }
        TransitionType::Blur => format!(
            "boxblur=luma_radius=min(h\\,w)/20:luma_power=1:enable='between(t,0,{})'",
            duration
        ),
        _ => format!("fade=t=in:st=0:d={}", duration),
    }
}

// =============================================================================
// Visual Effects
// =============================================================================

/// Maps an effect name and 0..1 intensity onto one video filter.
/// Unrecognized names compile to an explicit identity filter.
pub fn effect_filter(effect_name: &str, intensity: f64) -> String {
    match effect_name {
        "blur" => {
            let amount = (intensity * 10.0).round() as i64;
            format!("boxblur={}:{}", amount, amount)
        }
        "sharpen" => {
            let amount = intensity * 2.0;
            format!("unsharp=5:5:{}:5:5:{}", amount, amount)
        }
        "vignette" => {
            let angle = 0.5 + intensity * 0.5;
            format!("vignette=angle={}", angle)
        }
        "film_grain" => {
            let amount = (intensity * 50.0).round() as i64;
            format!("noise=alls={}:allf=t", amount)
        }
        "slow_motion" => {
            let factor = 1.0 + intensity;
            format!("setpts={}*PTS", factor)
        }
        "speed_up" => {
            let factor = 1.0 - intensity * 0.5;
            format!("setpts={}*PTS", factor)
        }
        // Two-pass motion stabilization; intensity is ignored
        "stabilize" => "vidstabdetect,vidstabtransform".to_string(),
        _ => "null".to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_tables() {
        let cinematic = preset_filters(ColorPreset::Cinematic);
        assert_eq!(cinematic.len(), 3);
        assert!(cinematic[0].starts_with("eq="));
        assert_eq!(cinematic[1], "curves=preset=cross_process");

        let noir = preset_filters(ColorPreset::Noir);
        assert_eq!(noir.len(), 2);
        assert!(noir[0].contains("saturation=0"));
    }

    #[test]
    fn test_eq_stage_present_fields_only() {
        let adjustments = ColorAdjustments {
            contrast: Some(0.2),
            ..Default::default()
        };
        assert_eq!(eq_stage(&adjustments), Some("eq=contrast=1.2".to_string()));

        let all = ColorAdjustments {
            brightness: Some(0.1),
            contrast: Some(-0.5),
            saturation: Some(1.0),
            ..Default::default()
        };
        assert_eq!(
            eq_stage(&all),
            Some("eq=brightness=0.1:contrast=0.5:saturation=2".to_string())
        );

        assert_eq!(eq_stage(&ColorAdjustments::default()), None);
    }

    #[test]
    fn test_temperature_stage_asymmetric_slopes() {
        assert_eq!(
            temperature_stage(1.0),
            "colortemperature=temperature=9500"
        );
        assert_eq!(
            temperature_stage(-1.0),
            "colortemperature=temperature=4000"
        );
        assert_eq!(
            temperature_stage(0.5),
            "colortemperature=temperature=8000"
        );
    }

    #[test]
    fn test_silence_removal_double_pass() {
        let filter = silence_removal_filter(-30.0, 1.0);
        assert_eq!(filter.matches("silenceremove=").count(), 2);
        assert_eq!(filter.matches("areverse").count(), 2);
        assert!(filter.contains("start_threshold=-30dB"));
        assert!(filter.contains("start_duration=1"));
    }

    #[test]
    fn test_audio_filters() {
        let params = AudioParams::default();

        let (f, _) = audio_filter(AudioAction::Normalize, &params);
        assert_eq!(f, "loudnorm=I=-16:TP=-1.5:LRA=11");

        let (f, _) = audio_filter(AudioAction::ReduceNoise, &params);
        // Default reduction 0.5 -> nf = -(20 + 15)
        assert_eq!(f, "afftdn=nf=-35");

        let (f, desc) = audio_filter(
            AudioAction::AdjustVolume,
            &AudioParams {
                volume: Some(1.5),
                ..Default::default()
            },
        );
        assert_eq!(f, "volume=1.5");
        assert!(desc.contains("150%"));

        let (f, _) = audio_filter(
            AudioAction::FadeOut,
            &AudioParams {
                fade_duration: Some(2.5),
                ..Default::default()
            },
        );
        assert_eq!(f, "afade=t=out:st=0:d=2.5");
    }

    #[test]
    fn test_audio_unsupported_actions_pass_through() {
        let params = AudioParams::default();
        let (f, _) = audio_filter(AudioAction::AddMusic, &params);
        assert_eq!(f, "anull");
        let (f, _) = audio_filter(AudioAction::Ducking, &params);
        assert_eq!(f, "anull");
    }

    #[test]
    fn test_fade_transition_positions() {
        let start = transition_filter(TransitionType::Fade, 1.0, TransitionPosition::Start);
        assert_eq!(start, "fade=t=in:st=0:d=1");

        let end = transition_filter(TransitionType::Fade, 1.0, TransitionPosition::End);
        assert_eq!(end, "fade=t=out:st=0:d=1");

        let all = transition_filter(TransitionType::Fade, 2.0, TransitionPosition::All);
        assert_eq!(all, "fade=t=in:st=0:d=2,fade=t=out:st=0:d=2");
    }

    #[test]
    fn test_blur_transition_is_time_gated() {
        let filter = transition_filter(TransitionType::Blur, 1.5, TransitionPosition::Start);
        assert!(filter.starts_with("boxblur="));
        assert!(filter.contains("between(t,0,1.5)"));
    }

    #[test]
    fn test_unmatched_transition_types_fall_back_to_fade_in() {
        // Known incompleteness carried over deliberately: dissolve, wipe,
        // slide and zoom all currently compile to a fade-in.
        for t in [
            TransitionType::Dissolve,
            TransitionType::Wipe,
            TransitionType::Slide,
            TransitionType::Zoom,
        ] {
            let filter = transition_filter(t, 1.0, TransitionPosition::Start);
            assert_eq!(filter, "fade=t=in:st=0:d=1", "type {:?}", t);
        }
    }

    #[test]
    fn test_effect_intensity_mappings() {
        assert_eq!(effect_filter("blur", 0.5), "boxblur=5:5");
        assert_eq!(effect_filter("sharpen", 0.5), "unsharp=5:5:1:5:5:1");
        assert_eq!(effect_filter("vignette", 1.0), "vignette=angle=1");
        assert_eq!(effect_filter("film_grain", 0.4), "noise=alls=20:allf=t");
        assert_eq!(effect_filter("slow_motion", 0.5), "setpts=1.5*PTS");
        assert_eq!(effect_filter("speed_up", 1.0), "setpts=0.5*PTS");
        assert_eq!(
            effect_filter("stabilize", 0.3),
            "vidstabdetect,vidstabtransform"
        );
    }

    #[test]
    fn test_unrecognized_effect_maps_to_identity() {
        assert_eq!(effect_filter("hologram", 0.8), "null");
    }
}
