//! Pipeline Compiler
//!
//! Maps an ordered list of validated commands onto a linear chain of FFmpeg
//! operations. Each command yields zero or one operation; every operation's
//! input is exactly the previous operation's output artifact. The compiler
//! performs no I/O and cannot fail on valid input — it is a pure function
//! from (commands, context) to an execution plan.

use tracing::debug;

use super::filters;
use super::segments::keep_segments;
use super::{FfmpegDirective, ProcessingOperation, ProcessingPipeline};
use crate::commands::{
    AspectRatio, AudioAction, AudioParams, CaptionStyle, ColorAdjustments, ColorPreset,
    CutSegment, ExportFormat, ExportQuality, ExportResolution, ThumbnailStyle, TransitionPosition,
    TransitionType, VideoCommand,
};
use crate::{format_timestamp, hex_to_ass, TimeSec, VideoContext};

/// Compiles validated commands into a processing pipeline.
///
/// Instances hold only the source artifact and the working directory; the
/// intermediate-artifact counter is scoped to each [`compile`] call, so
/// independent instances can compile concurrently with no coordination.
///
/// [`compile`]: PipelineCompiler::compile
pub struct PipelineCompiler {
    source: String,
    work_dir: String,
}

impl PipelineCompiler {
    pub fn new(source_artifact: &str, work_dir: &str) -> Self {
        Self {
            source: source_artifact.to_string(),
            work_dir: work_dir.trim_end_matches('/').to_string(),
        }
    }

    /// Compiles the command list into an ordered operation chain.
    ///
    /// Commands are processed strictly in list order and never reordered.
    /// Unknown commands produce no operation; the current artifact carries
    /// forward unchanged. An empty command list yields an empty pipeline
    /// whose final output is the source artifact itself.
    pub fn compile(&self, commands: &[VideoCommand], ctx: &VideoContext) -> ProcessingPipeline {
        let mut operations: Vec<ProcessingOperation> = Vec::new();
        let mut current_input = self.source.clone();
        let mut temp_counter: u32 = 0;

        for cmd in commands {
            if let Some(op) = self.compile_one(cmd, &current_input, ctx, &mut temp_counter) {
                current_input = op.output.clone();
                operations.push(op);
            } else {
                debug!(command = ?cmd, "command produced no operation, skipping");
            }
        }

        ProcessingPipeline {
            operations,
            final_output: current_input,
        }
    }

    fn temp_artifact(&self, counter: &mut u32) -> String {
        *counter += 1;
        format!("{}/temp_{}.mp4", self.work_dir, counter)
    }

    fn compile_one(
        &self,
        cmd: &VideoCommand,
        input: &str,
        ctx: &VideoContext,
        counter: &mut u32,
    ) -> Option<ProcessingOperation> {
        match cmd {
            VideoCommand::Trim {
                start_time,
                end_time,
            } => Some(self.compile_trim(*start_time, *end_time, input, counter)),
            VideoCommand::Cut { segments } => {
                Some(self.compile_cut(segments, input, ctx.duration, counter))
            }
            VideoCommand::RemoveSilence {
                threshold,
                min_duration,
                ..
            } => Some(self.compile_silence_removal(*threshold, *min_duration, input, counter)),
            VideoCommand::AddCaptions { style, language } => {
                Some(self.compile_captions(style, language, input, counter))
            }
            VideoCommand::ColorCorrection {
                adjustments,
                preset,
            } => Some(self.compile_color_correction(adjustments, *preset, input, counter)),
            VideoCommand::Audio { action, params } => {
                Some(self.compile_audio(*action, params, input, counter))
            }
            VideoCommand::Transition {
                transition_type,
                duration,
                position,
            } => Some(self.compile_transition(*transition_type, *duration, *position, input, counter)),
            VideoCommand::Effect {
                effect_name,
                intensity,
                ..
            } => Some(self.compile_effect(effect_name, *intensity, input, counter)),
            VideoCommand::Export {
                format,
                resolution,
                aspect_ratio,
                quality,
                fps,
            } => Some(self.compile_export(*format, *resolution, *aspect_ratio, *quality, *fps, input)),
            VideoCommand::Thumbnail {
                count,
                style,
                timestamps,
            } => Some(self.compile_thumbnail(*count, *style, timestamps.as_deref(), input, ctx.duration)),
            VideoCommand::Unknown => None,
        }
    }

    // -------------------------------------------------------------------------
    // Per-Command Generators
    // -------------------------------------------------------------------------

    /// Time-windowed stream copy; no re-encode, so this is cheap.
    fn compile_trim(
        &self,
        start_time: TimeSec,
        end_time: TimeSec,
        input: &str,
        counter: &mut u32,
    ) -> ProcessingOperation {
        let output = self.temp_artifact(counter);
        let span = end_time - start_time;

        let directive = FfmpegDirective::new(
            input,
            vec![
                "-ss".to_string(),
                format!("{}", start_time),
                "-t".to_string(),
                format!("{}", span),
                "-c".to_string(),
                "copy".to_string(),
            ],
            &output,
        );

        ProcessingOperation::new(
            directive,
            &format!(
                "Trim video from {} to {}",
                format_timestamp(start_time),
                format_timestamp(end_time)
            ),
            span * 0.1,
        )
    }

    /// Complements the removal segments against the full duration, then
    /// trims and re-stamps every keep segment for video and audio
    /// independently before concatenating them in order.
    fn compile_cut(
        &self,
        segments: &[CutSegment],
        input: &str,
        duration: TimeSec,
        counter: &mut u32,
    ) -> ProcessingOperation {
        let output = self.temp_artifact(counter);
        let keep = keep_segments(segments, duration);

        let mut filter_parts: Vec<String> = Vec::new();
        let mut concat_inputs = String::new();

        for (i, seg) in keep.iter().enumerate() {
            filter_parts.push(format!(
                "[0:v]trim=start={}:end={},setpts=PTS-STARTPTS[v{i}]",
                seg.start, seg.end
            ));
            filter_parts.push(format!(
                "[0:a]atrim=start={}:end={},asetpts=PTS-STARTPTS[a{i}]",
                seg.start, seg.end
            ));
            concat_inputs.push_str(&format!("[v{i}][a{i}]"));
        }

        let filter_complex = format!(
            "{}; {}concat=n={}:v=1:a=1[outv][outa]",
            filter_parts.join("; "),
            concat_inputs,
            keep.len()
        );

        let directive = FfmpegDirective::new(
            input,
            vec![
                "-filter_complex".to_string(),
                filter_complex,
                "-map".to_string(),
                "[outv]".to_string(),
                "-map".to_string(),
                "[outa]".to_string(),
            ],
            &output,
        );

        ProcessingOperation::new(
            directive,
            &format!("Cut {} segment(s) from video", segments.len()),
            duration * 0.3,
        )
    }

    fn compile_silence_removal(
        &self,
        threshold: f64,
        min_duration: TimeSec,
        input: &str,
        counter: &mut u32,
    ) -> ProcessingOperation {
        let output = self.temp_artifact(counter);
        let filter = filters::silence_removal_filter(threshold, min_duration);

        let directive = FfmpegDirective::new(
            input,
            vec![
                "-af".to_string(),
                filter,
                "-c:v".to_string(),
                "copy".to_string(),
            ],
            &output,
        );

        ProcessingOperation::new(
            directive,
            &format!(
                "Remove silent parts (threshold: {}dB, min duration: {}s)",
                threshold, min_duration
            ),
            30.0,
        )
    }

    /// Burns in subtitles from the fixed `captions.srt` convention; caption
    /// text generation itself happens upstream (speech-to-text).
    fn compile_captions(
        &self,
        style: &CaptionStyle,
        language: &str,
        input: &str,
        counter: &mut u32,
    ) -> ProcessingOperation {
        let output = self.temp_artifact(counter);

        let force_style = format!(
            "FontName={},FontSize={},PrimaryColour=&H{},BackColour=&H{}",
            style.font_family,
            style.font_size,
            hex_to_ass(&style.font_color),
            hex_to_ass(&style.background_color)
        );

        let directive = FfmpegDirective::new(
            input,
            vec![
                "-vf".to_string(),
                format!("subtitles=captions.srt:force_style='{}'", force_style),
            ],
            &output,
        );

        ProcessingOperation::new(
            directive,
            &format!(
                "Add {} captions with {} font",
                language, style.font_family
            ),
            60.0,
        )
    }

    /// Preset stages first, then a present-fields-only `eq` stage, then the
    /// temperature stage — all concatenated into a single filter chain.
    fn compile_color_correction(
        &self,
        adjustments: &ColorAdjustments,
        preset: Option<ColorPreset>,
        input: &str,
        counter: &mut u32,
    ) -> ProcessingOperation {
        let output = self.temp_artifact(counter);
        let mut stages: Vec<String> = Vec::new();

        if let Some(p) = preset {
            stages.extend(filters::preset_filters(p).iter().map(|s| s.to_string()));
        }

        if let Some(eq) = filters::eq_stage(adjustments) {
            stages.push(eq);
        }

        if let Some(t) = adjustments.temperature {
            stages.push(filters::temperature_stage(t));
        }

        // Neither preset nor adjustments selected: compile to an explicit
        // identity filter instead of an empty -vf argument
        let filter_chain = if stages.is_empty() {
            "null".to_string()
        } else {
            stages.join(",")
        };

        let directive = FfmpegDirective::new(
            input,
            vec![
                "-vf".to_string(),
                filter_chain,
                "-c:a".to_string(),
                "copy".to_string(),
            ],
            &output,
        );

        let description = match preset {
            Some(p) => format!("Apply {} color preset", p),
            None => "Apply color adjustments".to_string(),
        };

        ProcessingOperation::new(directive, &description, 45.0)
    }

    fn compile_audio(
        &self,
        action: AudioAction,
        params: &AudioParams,
        input: &str,
        counter: &mut u32,
    ) -> ProcessingOperation {
        let output = self.temp_artifact(counter);
        let (filter, description) = filters::audio_filter(action, params);

        let directive = FfmpegDirective::new(
            input,
            vec![
                "-af".to_string(),
                filter,
                "-c:v".to_string(),
                "copy".to_string(),
            ],
            &output,
        );

        ProcessingOperation::new(directive, &description, 20.0)
    }

    fn compile_transition(
        &self,
        transition_type: TransitionType,
        duration: TimeSec,
        position: TransitionPosition,
        input: &str,
        counter: &mut u32,
    ) -> ProcessingOperation {
        let output = self.temp_artifact(counter);
        let filter = filters::transition_filter(transition_type, duration, position);

        let directive = FfmpegDirective::new(
            input,
            vec![
                "-vf".to_string(),
                filter,
                "-c:a".to_string(),
                "copy".to_string(),
            ],
            &output,
        );

        ProcessingOperation::new(
            directive,
            &format!("Add {} transition", transition_type),
            15.0,
        )
    }

    fn compile_effect(
        &self,
        effect_name: &str,
        intensity: f64,
        input: &str,
        counter: &mut u32,
    ) -> ProcessingOperation {
        let output = self.temp_artifact(counter);
        let filter = filters::effect_filter(effect_name, intensity);

        let directive = FfmpegDirective::new(
            input,
            vec![
                "-vf".to_string(),
                filter,
                "-c:a".to_string(),
                "copy".to_string(),
            ],
            &output,
        );

        ProcessingOperation::new(
            directive,
            &format!("Apply {} effect", effect_name),
            30.0,
        )
    }

    /// Always targets the terminal `output.<format>` artifact, regardless of
    /// its position in the command list.
    fn compile_export(
        &self,
        format: ExportFormat,
        resolution: ExportResolution,
        aspect_ratio: AspectRatio,
        quality: ExportQuality,
        fps: u32,
        input: &str,
    ) -> ProcessingOperation {
        let output = format!("{}/output.{}", self.work_dir, format.extension());
        let mut stages: Vec<String> = Vec::new();

        if let Some((w, h)) = resolution.scale_target() {
            stages.push(format!(
                "scale={}:{}:force_original_aspect_ratio=decrease",
                w, h
            ));
        }

        if let Some(ratio) = aspect_ratio.crop_expr() {
            stages.push(format!("crop=ih*{}:ih", ratio));
        }

        let mut args: Vec<String> = Vec::new();
        if !stages.is_empty() {
            args.push("-vf".to_string());
            args.push(stages.join(","));
        }

        let (crf, preset) = quality.encode_flags();
        args.extend([
            "-r".to_string(),
            fps.to_string(),
            "-crf".to_string(),
            crf.to_string(),
            "-preset".to_string(),
            preset.to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
        ]);

        let directive = FfmpegDirective::new(input, args, &output);

        ProcessingOperation::new(
            directive,
            &format!(
                "Export as {} {} ({})",
                resolution,
                format.extension().to_uppercase(),
                aspect_ratio
            ),
            60.0,
        )
    }

    /// Side artifact: thumbnails do not feed further video operations, but
    /// the pattern output still participates in the artifact chain.
    fn compile_thumbnail(
        &self,
        count: u32,
        _style: Option<ThumbnailStyle>,
        timestamps: Option<&[TimeSec]>,
        input: &str,
        duration: TimeSec,
    ) -> ProcessingOperation {
        let output = format!("{}/thumbnail_%03d.jpg", self.work_dir);

        let args = match timestamps {
            Some(ts) if !ts.is_empty() => {
                let select_expr = ts
                    .iter()
                    .map(|t| format!("eq(t,{})", t))
                    .collect::<Vec<_>>()
                    .join("+");
                vec![
                    "-vf".to_string(),
                    format!("select='{}',scale=1920:-1", select_expr),
                    "-vsync".to_string(),
                    "vfr".to_string(),
                ]
            }
            _ => {
                // Even sampling that never lands on frame 0 or the very end
                let interval = duration / (count as f64 + 1.0);
                vec![
                    "-vf".to_string(),
                    format!("fps=1/{},scale=1920:-1", interval),
                    "-frames:v".to_string(),
                    count.to_string(),
                ]
            }
        };

        let directive = FfmpegDirective::new(input, args, &output);

        ProcessingOperation::new(
            directive,
            &format!("Generate {} thumbnail(s)", count),
            10.0,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
