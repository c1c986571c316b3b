//! Command Validator
//!
//! Normalizes AI-produced commands against physical constraints before they
//! reach the pipeline compiler. Out-of-range values are silently clamped,
//! never rejected; the compiler trusts validated input and performs no
//! further clamping of its own.

use tracing::debug;

use super::VideoCommand;
use crate::clamp;

/// Clamps numeric command parameters into their valid ranges.
///
/// Time fields are clamped against `video_duration` only when it is known;
/// an unknown duration leaves end times untouched. Inverted or zero-length
/// ranges pass through deliberately — downstream treats them as degenerate
/// segments, not errors.
pub fn validate(commands: Vec<VideoCommand>, video_duration: Option<f64>) -> Vec<VideoCommand> {
    commands
        .into_iter()
        .map(|cmd| validate_one(cmd, video_duration))
        .collect()
}

fn validate_one(cmd: VideoCommand, video_duration: Option<f64>) -> VideoCommand {
    match cmd {
        VideoCommand::Trim {
            start_time,
            end_time,
        } => VideoCommand::Trim {
            start_time: start_time.max(0.0),
            end_time: match video_duration {
                Some(d) => end_time.min(d),
                None => end_time,
            },
        },
        VideoCommand::Cut { segments } => VideoCommand::Cut {
            segments: segments
                .into_iter()
                .map(|seg| super::CutSegment {
                    start_time: seg.start_time.max(0.0),
                    end_time: match video_duration {
                        Some(d) => seg.end_time.min(d),
                        None => seg.end_time,
                    },
                })
                .collect(),
        },
        VideoCommand::ColorCorrection {
            mut adjustments,
            preset,
        } => {
            adjustments.brightness = adjustments.brightness.map(|v| clamp(v, -1.0, 1.0));
            adjustments.contrast = adjustments.contrast.map(|v| clamp(v, -1.0, 1.0));
            adjustments.saturation = adjustments.saturation.map(|v| clamp(v, -1.0, 1.0));
            adjustments.temperature = adjustments.temperature.map(|v| clamp(v, -1.0, 1.0));
            adjustments.tint = adjustments.tint.map(|v| clamp(v, -1.0, 1.0));
            adjustments.exposure = adjustments.exposure.map(|v| clamp(v, -1.0, 1.0));
            VideoCommand::ColorCorrection {
                adjustments,
                preset,
            }
        }
        VideoCommand::Audio { action, mut params } => {
            params.volume = params.volume.map(|v| clamp(v, 0.0, 2.0));
            params.music_volume = params.music_volume.map(|v| clamp(v, 0.0, 1.0));
            params.noise_reduction = params.noise_reduction.map(|v| clamp(v, 0.0, 1.0));
            VideoCommand::Audio { action, params }
        }
        VideoCommand::Effect {
            effect_name,
            intensity,
            params,
        } => VideoCommand::Effect {
            effect_name,
            intensity: clamp(intensity, 0.0, 1.0),
            params,
        },
        // remove_silence, add_captions, transition, export, thumbnail and
        // unknown tags carry no fields with a clamping policy here
        other => {
            debug!(command = ?other, "command passes validation unchanged");
            other
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{
        AudioAction, AudioParams, ColorAdjustments, ColorPreset, CutSegment, VideoCommand,
    };

    #[test]
    fn test_trim_clamped_to_bounds() {
        let cmds = vec![VideoCommand::Trim {
            start_time: -5.0,
            end_time: 500.0,
        }];

        let out = validate(cmds, Some(100.0));
        assert_eq!(
            out[0],
            VideoCommand::Trim {
                start_time: 0.0,
                end_time: 100.0,
            }
        );
    }

    #[test]
    fn test_trim_end_unclamped_without_duration() {
        let cmds = vec![VideoCommand::Trim {
            start_time: -1.0,
            end_time: 500.0,
        }];

        let out = validate(cmds, None);
        assert_eq!(
            out[0],
            VideoCommand::Trim {
                start_time: 0.0,
                end_time: 500.0,
            }
        );
    }

    #[test]
    fn test_inverted_trim_range_passes_through() {
        // Deliberate permissive behavior: start >= end is not rejected or
        // reordered, downstream treats it as a degenerate segment.
        let cmds = vec![VideoCommand::Trim {
            start_time: 50.0,
            end_time: 10.0,
        }];

        let out = validate(cmds, Some(100.0));
        assert_eq!(
            out[0],
            VideoCommand::Trim {
                start_time: 50.0,
                end_time: 10.0,
            }
        );
    }

    #[test]
    fn test_cut_segments_clamped() {
        let cmds = vec![VideoCommand::Cut {
            segments: vec![CutSegment::new(-2.0, 20.0), CutSegment::new(90.0, 140.0)],
        }];

        let out = validate(cmds, Some(100.0));
        match &out[0] {
            VideoCommand::Cut { segments } => {
                assert_eq!(segments[0], CutSegment::new(0.0, 20.0));
                assert_eq!(segments[1], CutSegment::new(90.0, 100.0));
            }
            other => panic!("Expected cut command, got {:?}", other),
        }
    }

    #[test]
    fn test_color_adjustments_clamped_independently() {
        let cmds = vec![VideoCommand::ColorCorrection {
            adjustments: ColorAdjustments {
                brightness: Some(5.0),
                contrast: Some(-3.0),
                saturation: None,
                temperature: Some(0.5),
                tint: Some(2.0),
                exposure: Some(-2.0),
            },
            preset: Some(ColorPreset::Vibrant),
        }];

        let out = validate(cmds, None);
        match &out[0] {
            VideoCommand::ColorCorrection {
                adjustments,
                preset,
            } => {
                assert_eq!(adjustments.brightness, Some(1.0));
                assert_eq!(adjustments.contrast, Some(-1.0));
                assert_eq!(adjustments.saturation, None);
                assert_eq!(adjustments.temperature, Some(0.5));
                assert_eq!(adjustments.tint, Some(1.0));
                assert_eq!(adjustments.exposure, Some(-1.0));
                assert_eq!(*preset, Some(ColorPreset::Vibrant));
            }
            other => panic!("Expected color_correction command, got {:?}", other),
        }
    }

    #[test]
    fn test_audio_params_clamped() {
        let cmds = vec![VideoCommand::Audio {
            action: AudioAction::AdjustVolume,
            params: AudioParams {
                volume: Some(9.0),
                music_volume: Some(-1.0),
                noise_reduction: Some(1.5),
                ..Default::default()
            },
        }];

        let out = validate(cmds, None);
        match &out[0] {
            VideoCommand::Audio { params, .. } => {
                assert_eq!(params.volume, Some(2.0));
                assert_eq!(params.music_volume, Some(0.0));
                assert_eq!(params.noise_reduction, Some(1.0));
            }
            other => panic!("Expected audio command, got {:?}", other),
        }
    }

    #[test]
    fn test_effect_intensity_clamped() {
        let cmds = vec![VideoCommand::Effect {
            effect_name: "blur".to_string(),
            intensity: 7.0,
            params: None,
        }];

        let out = validate(cmds, None);
        match &out[0] {
            VideoCommand::Effect { intensity, .. } => assert_eq!(*intensity, 1.0),
            other => panic!("Expected effect command, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_passes_through() {
        let out = validate(vec![VideoCommand::Unknown], Some(60.0));
        assert_eq!(out, vec![VideoCommand::Unknown]);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let cmds = vec![
            VideoCommand::Trim {
                start_time: -5.0,
                end_time: 500.0,
            },
            VideoCommand::ColorCorrection {
                adjustments: ColorAdjustments {
                    brightness: Some(5.0),
                    ..Default::default()
                },
                preset: None,
            },
            VideoCommand::Effect {
                effect_name: "sharpen".to_string(),
                intensity: -0.3,
                params: None,
            },
        ];

        let once = validate(cmds, Some(100.0));
        let twice = validate(once.clone(), Some(100.0));
        assert_eq!(once, twice);
    }
}
