//! CLI tool for custom story files.
//!
//! Usage:
//!   story-tool inspect story.json
//!   story-tool normalize story.json [--output story.normalized.json]
//!   story-tool package story.json --file-name mypack [--base-url http://127.0.0.1:3939]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use custom_story::story::package::failure_message;
use custom_story::{ImportedStory, PackagingClient, PackagingConfig, StoryEditor};

#[derive(Parser, Debug)]
#[command(
    name = "story-tool",
    about = "Inspect, normalize and package custom story files",
    version
)]
struct Args {
    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scenes contained in a story file
    Inspect {
        /// Story JSON file
        input: PathBuf,
    },

    /// Re-import a story file, renumbering scenes from 0
    Normalize {
        /// Story JSON file
        input: PathBuf,

        /// Output file path (defaults to <stem>.normalized.json next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send a story to the packaging endpoint
    Package {
        /// Story JSON file
        input: PathBuf,

        /// Name of the mod pack to create
        #[arg(short = 'n', long)]
        file_name: String,

        /// Backend base URL
        #[arg(
            short = 'b',
            long,
            env = "CUSTOM_STORY_BASE_URL",
            default_value = "http://127.0.0.1:3939"
        )]
        base_url: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a story file into a fresh editor.
fn load(input: &Path) -> Result<StoryEditor> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    let text = std::fs::read_to_string(input).context("Failed to read input file")?;
    let story = ImportedStory::parse(&text).context("Failed to parse story file")?;

    let mut editor = StoryEditor::new();
    editor
        .import_story(story)
        .context("Failed to import story")?;
    Ok(editor)
}

fn inspect(input: &Path) -> Result<()> {
    let text = std::fs::read_to_string(input).context("Failed to read input file")?;
    let story = ImportedStory::parse(&text).context("Failed to parse story file")?;

    println!("{}: {} scenes", input.display(), story.len());
    for (position, scene) in story.scenes_data.iter().enumerate() {
        let keys = match &scene.data {
            serde_json::Value::Object(map) => map.keys().cloned().collect::<Vec<_>>().join(", "),
            other => format!("<{}>", json_kind(other)),
        };
        println!("  [{position}] index {}: {keys}", scene.index);
    }
    Ok(())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn normalize(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let editor = load(input)?;

    let output_path = output.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "story".to_string());
        input.with_file_name(format!("{stem}.normalized.json"))
    });
    let file_name = output_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .context("Output path has no file name")?;
    let dir = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let download = editor.export(&file_name).context("Failed to export story")?;
    let written = download
        .write_to(&dir)
        .context("Failed to write output file")?;

    println!(
        "Normalized {} scenes: {} → {}",
        editor.records().len(),
        input.display(),
        written.display()
    );
    Ok(())
}

async fn package(input: &Path, file_name: &str, base_url: &str) -> Result<()> {
    let editor = load(input)?;
    let request = editor.packaging_request(file_name);

    let client = PackagingClient::new(&PackagingConfig::with_base_url(base_url))?;
    match client.export_story(&request).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, url = client.url(), "packaging failed");
            anyhow::bail!(failure_message(&e))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Inspect { input } => inspect(&input),
        Command::Normalize { input, output } => normalize(&input, output),
        Command::Package {
            input,
            file_name,
            base_url,
        } => package(&input, &file_name, &base_url).await,
    }
}
