//! Promptcut CLI
//!
//! Headless front end for the prompt-to-FFmpeg pipeline: compile command
//! lists into execution plans, parse natural-language prompts through an AI
//! provider, or run a compiled plan against the system FFmpeg.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use promptcut_core::ai::providers::ProviderConfig;
use promptcut_core::ai::{ParsedPromptResult, PromptParser};
use promptcut_core::commands::{validate, VideoCommand};
use promptcut_core::engine::FfmpegEngine;
use promptcut_core::pipeline::{PipelineCompiler, ProcessingPipeline};
use promptcut_core::{Size2D, VideoContext};

#[derive(Parser)]
#[command(
    name = "promptcut",
    version,
    about = "Natural-language video editing compiler",
    long_about = "Turns structured editing commands (or natural-language prompts, via an AI\n\
                  provider) into ordered FFmpeg operation plans, and optionally executes them."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a command list into an FFmpeg operation plan
    Compile(CompileArgs),

    /// Parse a natural-language prompt into commands and compile them
    Plan(PlanArgs),

    /// Compile a command list and execute it with the system FFmpeg
    Run(RunArgs),
}

#[derive(Parser)]
struct CompileArgs {
    /// Path to a JSON file holding the command array
    #[arg(long)]
    commands: PathBuf,

    /// Source video artifact
    #[arg(long)]
    input: String,

    /// Video duration in seconds, used for clamping and cut complements
    #[arg(long)]
    duration: Option<f64>,

    /// Directory for intermediate artifacts
    #[arg(long, default_value = "/tmp/video-processing")]
    work_dir: String,

    /// Pretty-print the pipeline JSON
    #[arg(long)]
    pretty: bool,

    /// Print only the flattened command strings, one per line
    #[arg(long)]
    commands_only: bool,
}

#[derive(Parser)]
struct PlanArgs {
    /// Natural-language editing request
    #[arg(long)]
    prompt: String,

    /// Source video artifact
    #[arg(long)]
    input: String,

    /// Video duration in seconds
    #[arg(long)]
    duration: f64,

    /// Video width in pixels
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Video height in pixels
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Mark the video as having no audio track
    #[arg(long)]
    no_audio: bool,

    /// Directory for intermediate artifacts
    #[arg(long, default_value = "/tmp/video-processing")]
    work_dir: String,

    /// Model override for the AI provider
    #[arg(long)]
    model: Option<String>,

    /// Pretty-print the result JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser)]
struct RunArgs {
    /// Path to a JSON file holding the command array
    #[arg(long)]
    commands: PathBuf,

    /// Source video artifact
    #[arg(long)]
    input: String,

    /// Video duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Directory for intermediate artifacts
    #[arg(long, default_value = "/tmp/video-processing")]
    work_dir: String,
}

/// Plan output: the parse result plus the flattened FFmpeg command strings
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResult {
    #[serde(flatten)]
    parsed: ParsedPromptResult,
    ffmpeg_commands: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Compile(args) => compile_command(args),
        Commands::Plan(args) => plan_command(args).await,
        Commands::Run(args) => run_command(args).await,
    }
}

fn load_commands(path: &PathBuf, duration: Option<f64>) -> Result<Vec<VideoCommand>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read commands file {}", path.display()))?;
    let commands: Vec<VideoCommand> =
        serde_json::from_str(&raw).context("commands file is not a valid command array")?;
    Ok(validate(commands, duration))
}

fn build_pipeline(
    commands: &[VideoCommand],
    input: &str,
    work_dir: &str,
    duration: f64,
    has_audio: bool,
    resolution: Size2D,
) -> ProcessingPipeline {
    let ctx = VideoContext::new(duration, has_audio, resolution);
    let compiler = PipelineCompiler::new(input, work_dir);
    compiler.compile(commands, &ctx)
}

fn compile_command(args: CompileArgs) -> Result<()> {
    let commands = load_commands(&args.commands, args.duration)?;
    let pipeline = build_pipeline(
        &commands,
        &args.input,
        &args.work_dir,
        args.duration.unwrap_or(0.0),
        true,
        Size2D::default(),
    );

    if args.commands_only {
        for line in pipeline.descriptor_strings() {
            println!("{line}");
        }
        return Ok(());
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&pipeline)?
    } else {
        serde_json::to_string(&pipeline)?
    };
    println!("{json}");
    Ok(())
}

async fn plan_command(args: PlanArgs) -> Result<()> {
    let api_key = std::env::var("ANTHROPIC_API_KEY")
        .context("ANTHROPIC_API_KEY is required for the plan command")?;

    let mut config = ProviderConfig::anthropic(&api_key);
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    let provider = promptcut_core::ai::providers::create_provider(config)?;

    let ctx = VideoContext::new(
        args.duration,
        !args.no_audio,
        Size2D::new(args.width, args.height),
    );

    let parser = PromptParser::new(provider);
    let parsed = parser.parse(&args.prompt, Some(&ctx)).await;

    let ffmpeg_commands = if parsed.commands.is_empty() {
        Vec::new()
    } else {
        let compiler = PipelineCompiler::new(&args.input, &args.work_dir);
        compiler.compile(&parsed.commands, &ctx).descriptor_strings()
    };

    let result = PlanResult {
        parsed,
        ffmpeg_commands,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}

async fn run_command(args: RunArgs) -> Result<()> {
    let commands = load_commands(&args.commands, args.duration)?;
    let pipeline = build_pipeline(
        &commands,
        &args.input,
        &args.work_dir,
        args.duration.unwrap_or(0.0),
        true,
        Size2D::default(),
    );

    if pipeline.is_empty() {
        println!("Nothing to do.");
        return Ok(());
    }

    std::fs::create_dir_all(&args.work_dir)
        .with_context(|| format!("failed to create work dir {}", args.work_dir))?;

    let engine = FfmpegEngine::system()?;
    let outputs = engine.execute(&pipeline).await?;

    for output in &outputs {
        println!("wrote {output}");
    }
    println!("final output: {}", pipeline.final_output);
    Ok(())
}
