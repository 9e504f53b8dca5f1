/// Storyboard: turn a story file into a shot list or JSON export.
///
/// Usage: storyboard [--file <story.txt> | --text <story>] [--length short|medium|long]
///                   [--style <name>] [--pacing <secs>] [--config <settings.ron>]
///                   [--rules <rules.ron>]... [--format text|json] [--output <path>]
///
/// Reads the story from stdin when neither --file nor --text is given.
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use storymode::cli::{init_tracing, LogArgs};
use storymode::core::pipeline::StoryboardEngine;
use storymode::core::session::Session;
use storymode::schema::settings::{SceneLength, Settings, Style};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain-text shot list
    Text,
    /// JSON export with settings and scenes
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Split a story into annotated scenes", long_about = None)]
struct Args {
    /// Story text file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Story text given inline
    #[arg(short, long)]
    text: Option<String>,

    /// Settings file (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene length: short, medium or long (unknown values mean long)
    #[arg(short, long)]
    length: Option<String>,

    /// Presentation style, e.g. cinematic, kids, noir
    #[arg(short, long)]
    style: Option<String>,

    /// Seconds per scene recorded in the export
    #[arg(short, long)]
    pacing: Option<f64>,

    /// Extra visual rule file (RON), may be repeated
    #[arg(short, long)]
    rules: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log);

    let settings = resolve_settings(&args)?;
    let engine = StoryboardEngine::from_settings(&settings)?;
    let story = read_story(&args)?;

    let mut session = Session::new(engine, settings);
    let count = session.generate(&story)?;
    info!(scenes = count, "storyboard ready");

    let rendered = render(&session, args.format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} scenes to {}", count, path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// The exact bytes written to stdout or the output file. Both formats end
/// with a single newline.
fn render(session: &Session, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => session.shot_list(),
        OutputFormat::Json => {
            let mut json = session.export_json()?;
            json.push('\n');
            json
        }
    })
}

/// Settings file first, then command-line overrides.
fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from_ron(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(length) = &args.length {
        settings.scene_length = SceneLength::from_name(length);
    }
    if let Some(style) = &args.style {
        settings.style = Style::new(style.as_str());
    }
    if let Some(pacing) = args.pacing {
        settings.pacing_seconds = pacing;
    }
    settings.rules.extend(args.rules.iter().cloned());
    settings.validate()?;

    Ok(settings)
}

fn read_story(args: &Args) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read story from stdin")?;
    if text.trim().is_empty() {
        bail!("No story text provided (use --file, --text or stdin)");
    }
    Ok(text)
}
