use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use doodlepad::access::DirectoryAccess;
use doodlepad::export::{ExportManager, ExportOutcome};
use doodlepad::session::{DrawingSession, ImagePicker};
use doodlepad::{Config, script};

#[derive(Parser, Debug)]
#[command(name = "doodlepad")]
#[command(
    version,
    about = "Freehand drawing canvas with undo, background import and PNG export"
)]
struct Cli {
    /// Read configuration from FILE instead of ~/.config/doodlepad/config.toml
    #[arg(long, short = 'c', value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a drawing script and export the result as PNG
    Render(RenderArgs),
    /// Write the documented default config to ~/.config/doodlepad/config.toml
    InitConfig,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON drawing script to replay
    #[arg(long, short = 's', value_name = "FILE")]
    script: PathBuf,

    /// Canvas width in pixels (defaults to canvas.width from the config)
    #[arg(long)]
    width: Option<i32>,

    /// Canvas height in pixels (defaults to canvas.height from the config)
    #[arg(long)]
    height: Option<i32>,

    /// Image painted behind the strokes
    #[arg(long, short = 'b', value_name = "IMAGE")]
    background: Option<PathBuf>,

    /// Directory the PNG is written to (defaults to export.directory from the config)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Skip handing the exported file to the share target
    #[arg(long)]
    no_share: bool,
}

/// Picker that hands back bytes already read from disk.
struct LoadedImage(Option<Vec<u8>>);

impl ImagePicker for LoadedImage {
    fn pick(&mut self) -> Option<Vec<u8>> {
        self.0.take()
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Render(args)) => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            };
            render(config, args)
        }
        Some(Command::InitConfig) => {
            let path = Config::create_default_file()?;
            println!("Created {}", path.display());
            Ok(())
        }
        None => {
            println!("doodlepad: Freehand drawing canvas with undo, background import and PNG export");
            println!();
            println!("Usage:");
            println!("  doodlepad render --script <FILE>   Replay a drawing script and export a PNG");
            println!("  doodlepad init-config              Write the default config file");
            println!("  doodlepad --help                   Show help");
            Ok(())
        }
    }
}

fn render(mut config: Config, args: RenderArgs) -> Result<()> {
    if let Some(dir) = args.output_dir {
        config.export.directory = Some(dir);
    }
    if args.no_share {
        config.export.share_after_save = false;
    }

    let actions = script::load(&args.script)?;
    let width = args.width.unwrap_or(config.canvas.width);
    let height = args.height.unwrap_or(config.canvas.height);
    if width <= 0 || height <= 0 {
        return Err(anyhow::anyhow!(
            "Canvas size must be positive, got {width}x{height}"
        ));
    }

    let mut session =
        DrawingSession::new(&config, width, height).context("Failed to create canvas")?;
    let access = DirectoryAccess::new(config.export.resolved_directory());

    if let Some(path) = &args.background {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read background {}", path.display()))?;
        session
            .import_background(&mut LoadedImage(Some(bytes)), &access)
            .with_context(|| format!("Failed to import background {}", path.display()))?;
    }

    let summary = script::replay(&mut session, &actions)?;
    log::info!(
        "Script applied: {} actions, {} ignored",
        summary.applied,
        summary.ignored
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start export runtime")?;
    let manager = ExportManager::new(runtime.handle());
    let ticket = session.export(&manager, &access)?;

    match runtime.block_on(ticket.wait()) {
        ExportOutcome::Success(result) => {
            println!("{}", result.path.display());
            if config.export.share_after_save && !result.shared {
                log::warn!("Export saved but could not be shared");
            }
            Ok(())
        }
        ExportOutcome::Failed(reason) => Err(anyhow::anyhow!("Export failed: {reason}")),
    }
}
