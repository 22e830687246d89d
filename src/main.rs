use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use sketchboard::assets::DirTextureProvider;
use sketchboard::board::{DrawingBoard, MemorySurfaceHost};
use sketchboard::config::Config;
use sketchboard::draw::ShapeKind;
use sketchboard::export::{PngExporter, default_export_directory, expand_tilde};
use sketchboard::script;

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(
    version,
    about = "Freehand and shape drawing surface with undo/redo and PNG export"
)]
struct Cli {
    /// Replay a gesture script against a fresh surface ("-" reads stdin)
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Surface width in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    width: Option<i32>,

    /// Surface height in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    height: Option<i32>,

    /// Directory saved drawings are written to (overrides config)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory texture names resolve against (overrides config)
    #[arg(long, value_name = "DIR")]
    texture_dir: Option<PathBuf>,

    /// Seed for randomized coloring (deterministic replays)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let Some(script_path) = cli.script else {
        println!("sketchboard: freehand and shape drawing surface");
        println!();
        println!("Usage:");
        println!("  sketchboard --script <FILE>   Replay a gesture script and export PNGs");
        println!("  sketchboard --script -        Read the script from stdin");
        println!("  sketchboard --help            Show all options");
        println!();
        println!("Script commands:");
        println!("  shape <freestyle|circle|line|rectangle>");
        println!("  color <palette name>      texture <name>      size <px>");
        println!("  down <x> <y>              move <x> <y>        up <x> <y>");
        println!("  random-color              undo / redo / clear / save");
        return Ok(());
    };

    let source = read_script(&script_path)?;

    let width = cli.width.unwrap_or(config.surface.width);
    let height = cli.height.unwrap_or(config.surface.height);

    let texture_dir = cli
        .texture_dir
        .or_else(|| {
            config
                .assets
                .texture_directory
                .as_deref()
                .map(expand_tilde)
        })
        .unwrap_or_else(|| PathBuf::from("textures"));

    let export_dir = cli
        .output_dir
        .or_else(|| config.export.directory.as_deref().map(expand_tilde))
        .unwrap_or_else(default_export_directory);

    log::info!("Surface {width}x{height}, exporting to {}", export_dir.display());

    let host = MemorySurfaceHost::new(width, height)
        .with_context(|| format!("Failed to create a {width}x{height} surface"))?;
    let assets = DirTextureProvider::new(texture_dir);
    let exporter = PngExporter::new(export_dir).with_template(config.export.filename_template);

    let mut board = DrawingBoard::new(host, Box::new(assets), Box::new(exporter));
    if let Some(seed) = cli.seed {
        board = board.with_gesture_seed(seed);
    }

    board.set_background(config.drawing.background_color.to_color());
    board.select_color(config.drawing.default_color.to_color());
    board.select_stroke_size(config.drawing.default_stroke_width);
    board.select_shape_kind(
        config
            .drawing
            .default_shape
            .parse()
            .unwrap_or(ShapeKind::FreeStyle),
    );
    if config.drawing.random_color {
        board.enable_random_color();
    }

    board.activate().context("Failed to activate the surface")?;

    let summary = script::run(&mut board, &source)?;

    log::info!(
        "Replayed {} command(s); {} shape(s) on the surface",
        summary.commands,
        board.history().len()
    );
    for path in &summary.saved {
        println!("Saved {}", path.display());
    }

    if summary.save_failures > 0 {
        anyhow::bail!("{} save(s) failed; see log for details", summary.save_failures);
    }

    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read script from stdin")?;
        Ok(source)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read script from {}", path.display()))
    }
}
