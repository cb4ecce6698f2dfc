mod script;

use anyhow::Result;
use clap::Parser;
use gba_hal::video::PresentationMode;
use gse_core::Gba;
use heli::{Game, GameConfig, Outcome};
use tracing::{Level, info, warn};
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "gse")]
#[command(version, about = "Run the heli game headless on the simulator", long_about = None)]
struct Cli {
    /// Stop after this many frames if the session hasn't ended
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Buttons to hold, e.g. `up:30,none:10,a:1`. Nothing is held once it runs out
    #[arg(short, long, default_value = "")]
    script: String,

    /// Busy-wait units after every frame
    #[arg(long, default_value_t = GameConfig::DEFAULT.delay)]
    delay: u32,

    /// Present a full-screen bitmap instead of tile layers
    #[arg(long)]
    bitmap: bool,

    /// Write the scroll counter to the background every frame
    #[arg(long)]
    apply_scroll: bool,

    /// More logging; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> GameConfig {
        GameConfig {
            presentation: if self.bitmap {
                PresentationMode::Bitmap
            } else {
                PresentationMode::Tiled
            },
            delay: self.delay,
            apply_scroll: self.apply_scroll,
            ..GameConfig::DEFAULT
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .init();

    let script = script::parse(&cli.script)?;
    let mut game = Game::new(Gba::with_script(script), cli.config())?;

    let mut outcome = Outcome::Continuing;
    while game.frame() < cli.frames {
        outcome = game.tick();
        if outcome.is_over() {
            break;
        }
    }

    let gba = &game.console.hw;
    info!(
        "{} frames, {} vblanks, {} dma transfers, scroll {}",
        game.frame(),
        gba.vblanks(),
        gba.dma_count(),
        game.scroll.x
    );
    match outcome {
        Outcome::Collision { wall } => {
            let (x, y) = (game.walls[wall].x, game.walls[wall].y);
            println!("collision with wall {wall} at ({x}, {y}) after {} frames", game.frame());
        }
        Outcome::Aborted => println!("aborted after {} frames", game.frame()),
        Outcome::Continuing => {
            warn!("frame budget of {} used up", cli.frames);
            println!(
                "still flying after {} frames, copter at ({}, {})",
                game.frame(),
                game.copter.x,
                game.copter.y
            );
        }
    }
    Ok(())
}
