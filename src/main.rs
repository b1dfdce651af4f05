//! Bitmap Platformer entry point
//!
//! Loads settings and the level list, then either prints each level's
//! layout (`--inspect`) or runs the headless frame loop. The `paint`
//! subcommand edits a level bitmap instead.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use bitmap_platformer::Settings;
use bitmap_platformer::app::{self, AppError, HeadlessFrontend};
use bitmap_platformer::level::{Canvas, CanvasError, FileSource, LevelConfig, Stroke};
use bitmap_platformer::sim::GameState;

#[derive(Parser, Debug)]
#[command(version, about = "Platformer whose levels are painted as bitmaps")]
struct Args {
    /// Level list (JSON object with a `levels` map)
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Physics and window tuning; defaults are used if the file is missing
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Frames to simulate before exiting
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Print each level's segmented layout and exit
    #[arg(long)]
    inspect: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or edit a level bitmap by clicking cells
    Paint {
        /// Bitmap to write
        out: PathBuf,

        /// Start from this bitmap instead of a blank grid
        #[arg(long)]
        from: Option<PathBuf>,

        /// Grid width for a blank canvas (1-30)
        #[arg(long, default_value_t = 10)]
        width: u32,

        /// Grid height for a blank canvas (1-30)
        #[arg(long, default_value_t = 10)]
        height: u32,

        /// Cell click as `x,y,color`; color is a palette name or #rrggbb.
        /// Clicking a cell that already has the color fills from the last
        /// painted cell.
        #[arg(long = "click", value_name = "X,Y,COLOR")]
        clicks: Vec<Stroke>,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = match &args.command {
        Some(Command::Paint {
            out,
            from,
            width,
            height,
            clicks,
        }) => paint(out, from.as_deref(), *width, *height, clicks).map_err(AppError::from),
        None => start(&args),
    };
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn paint(
    out: &Path,
    from: Option<&Path>,
    width: u32,
    height: u32,
    clicks: &[Stroke],
) -> Result<(), CanvasError> {
    let mut canvas = match from {
        Some(path) => Canvas::load(path)?,
        None => Canvas::new(width, height)?,
    };
    for stroke in clicks {
        canvas.apply(stroke)?;
    }
    canvas.save(out)
}

fn start(args: &Args) -> Result<(), AppError> {
    log::info!("Bitmap Platformer starting...");
    let settings = Settings::load(&args.settings)?;
    let levels = LevelConfig::load(&args.config)?;
    let source = FileSource;

    let mut state = GameState::new(settings, levels, &source)?;

    if args.inspect {
        let layouts = app::inspect_levels(&state, &source)?;
        for (entry, layout) in state.levels.levels.iter().zip(&layouts) {
            println!("{} ({})", entry.name, entry.path.display());
            println!(
                "  player     {:?}",
                (layout.player.x, layout.player.y, layout.player.width, layout.player.height)
            );
            println!("  platforms  {}", layout.platforms.len());
            for rect in &layout.platforms {
                println!("    {:?}", (rect.x, rect.y, rect.width, rect.height));
            }
            println!("  checkpoints {}", layout.checkpoints.len());
            println!("  enemies    {}", layout.enemies.len());
        }
        return Ok(());
    }

    let mut frontend = HeadlessFrontend::new(args.frames);
    let summary = app::run(&mut state, &mut frontend, &source)?;
    println!(
        "{} frames, level {}, {} deaths, {} level loads",
        summary.frames, state.current_level, summary.deaths, summary.levels_loaded
    );
    Ok(())
}
