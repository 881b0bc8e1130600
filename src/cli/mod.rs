//! Command-line interface parsing and handling

pub mod generate;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::api::gemini::{ClientInitError, GeminiClient};
use crate::cli::generate::run_generate;
use crate::core::config::Config;
use crate::core::controller::SceneController;
use crate::core::generator::SceneGenerator;
use crate::ui::scene_loop::run_scene_ui;
use crate::utils::logging::init_file_logging;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    " ",
    env!("VERGEN_GIT_SHA"),
    ")\nbuilt ",
    env!("VERGEN_BUILD_DATE"),
    " with rustc ",
    env!("VERGEN_RUSTC_SEMVER"),
);

#[derive(Parser)]
#[command(name = "screenwright")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Turn a scene description into a screenplay scene with Gemini")]
#[command(
    long_about = "Screenwright is a full-screen terminal screenplay generator. Describe a scene, \
and the Gemini API writes it in standard screenplay format: scene heading, action, \
character names and dialogue.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY    Your Gemini API key (API_KEY is used as a fallback)\n\
  RUST_LOG          Diagnostic log filter (default: screenwright=info)\n\n\
Controls:\n\
  Type              Enter the scene description\n\
  Ctrl+Enter/Ctrl+J Generate the scene\n\
  Tab               Move focus between the input and the Generate button\n\
  Enter/Space       Activate the focused button\n\
  PageUp/PageDown   Scroll through generated scenes\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive scene generator (default)
    Ui,
    /// Generate a single scene and print it without the terminal UI
    Generate {
        /// Scene description (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    if let Some(path) = config.log_path(args.log.as_deref()) {
        if let Err(err) = init_file_logging(&path) {
            eprintln!("⚠️  Diagnostic logging disabled ({}): {err}", path.display());
        }
    }

    let controller = build_controller(&config);
    match args.command.unwrap_or(Commands::Ui) {
        Commands::Ui => run_scene_ui(controller).await,
        Commands::Generate { description } => run_generate(description, controller).await,
    }
}

/// Construct the controller, rendering a client construction failure into it.
pub fn build_controller(config: &Config) -> SceneController {
    SceneController::from_init(connect(config))
}

fn connect(config: &Config) -> Result<Arc<dyn SceneGenerator>, ClientInitError> {
    let api_key = config.resolve_api_key()?;
    let client = GeminiClient::new(api_key, config.base_url())?;
    info!(
        model = client.model(),
        base_url = config.base_url(),
        "Gemini client ready"
    );
    let generator: Arc<dyn SceneGenerator> = Arc::new(client);
    Ok(generator)
}
