use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inkboard::{Board, Config};
use inkboard::export;
use inkboard::script::Script;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inkboard")]
#[command(version, about = "Freehand drawing board: replay, render and inspect strokes")]
struct Cli {
    /// Load settings from this file instead of ~/.config/inkboard/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the documented default config (to --config PATH when given)
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script and save the canvas as PNG
    Render {
        /// Replay script (JSON)
        script: PathBuf,

        /// Output file; defaults to the export directory and filename template
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Surface layout width (overrides config and script)
        #[arg(long)]
        width: Option<f64>,

        /// Surface layout height (overrides config and script)
        #[arg(long)]
        height: Option<f64>,

        /// Device pixel ratio (overrides config and script)
        #[arg(long)]
        dpr: Option<f64>,
    },
    /// Replay a script and print the committed strokes as JSON
    Strokes {
        /// Replay script (JSON)
        script: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = match cli.config {
            Some(path) => {
                Config::create_default_file_at(&path)?;
                path
            }
            None => Config::create_default_file()?,
        };
        println!("Created {}", path.display());
        return Ok(());
    }

    match cli.command {
        Some(Command::Render {
            script,
            output,
            width,
            height,
            dpr,
        }) => {
            let mut config = load_config(cli.config.as_ref())?;
            let script = Script::load(&script)?;
            script.apply_surface(&mut config);
            if let Some(width) = width {
                config.surface.width = width;
            }
            if let Some(height) = height {
                config.surface.height = height;
            }
            if let Some(dpr) = dpr {
                config.surface.device_pixel_ratio = dpr;
            }
            config.validate_and_clamp();
            let mut board = Board::new(&config, script.actor.clone());

            let report = script.run(&mut board);
            let png = board.export_png().context("Failed to encode canvas")?;
            let path = match output {
                Some(path) => {
                    export::write_png(&png, &path)?;
                    path
                }
                None => export::save_png(&png, &config.export)?,
            };

            println!(
                "Saved {} ({} strokes, {} ignored events)",
                path.display(),
                board.store().len(),
                report.ignored
            );
        }
        Some(Command::Strokes { script }) => {
            let config = load_config(cli.config.as_ref())?;
            let script = Script::load(&script)?;
            let mut board = script.board(&config);
            script.run(&mut board);

            let json = serde_json::to_string_pretty(board.store().strokes())
                .context("Failed to serialize strokes")?;
            println!("{json}");
        }
        None => {
            println!("inkboard: Freehand drawing board");
            println!();
            println!("Usage:");
            println!("  inkboard render <SCRIPT> [-o FILE]   Replay a script and save a PNG");
            println!("  inkboard strokes <SCRIPT>            Replay a script and print strokes as JSON");
            println!("  inkboard --init-config               Write the default config file");
            println!("  inkboard --help                      Show help");
            println!();
            println!("Config: ~/.config/inkboard/config.toml (override with --config PATH)");
        }
    }

    Ok(())
}
