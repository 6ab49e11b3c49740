mod config;
mod offline;

use clap::{Parser, ValueEnum};
use common::games::snake::{GameMode, SessionOutcome};
use common::{log, logger};

use config::{get_config_manager, GameModeConfig};
use offline::{discard_pending_input, next_match, run_snake_game, spawn_stdin_reader, RunOptions};
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Single,
    Double,
}

impl From<ModeArg> for GameModeConfig {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => GameModeConfig::SinglePlayer,
            ModeArg::Double => GameModeConfig::DoublePlayer,
        }
    }
}

#[derive(Parser)]
#[command(name = "face_snake")]
struct Args {
    /// Game mode; defaults to the last mode played.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Config file path; defaults to face_snake_config.yaml next to the executable.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// Let the built-in bot steer every snake.
    #[arg(long)]
    autopilot: bool,

    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    no_countdown: bool,

    /// Print the board after every tick.
    #[arg(long)]
    draw_frames: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("FaceSnake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager = get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_or_create_config()?;

    let mut mode: GameMode = args
        .mode
        .map(GameModeConfig::from)
        .or(config.last_mode)
        .unwrap_or(GameModeConfig::SinglePlayer)
        .into();

    let mut options = RunOptions {
        seed: args.seed,
        autopilot: args.autopilot,
        max_ticks: args.max_ticks,
        skip_countdown: args.no_countdown,
        draw_frames: args.draw_frames,
    };

    let (line_tx, mut lines) = mpsc::unbounded_channel();
    spawn_stdin_reader(line_tx);

    loop {
        let mode_config = GameModeConfig::from(mode);
        if config.last_mode != Some(mode_config) {
            config.last_mode = Some(mode_config);
            if let Err(e) = config_manager.set_config(&config) {
                log!("Failed to save config: {}", e);
            }
        }

        match run_snake_game(&config, mode, &options, &mut lines).await? {
            SessionOutcome::Finished(summary) => log!("Game over: {}", summary.result),
            SessionOutcome::Quit => {
                log!("Quit");
                break;
            }
            SessionOutcome::TickLimitReached => {
                log!("Tick limit reached");
                break;
            }
            SessionOutcome::Aborted(e) => {
                log!("Game aborted: {}", e);
                return Err(e.into());
            }
        }

        // A fixed seed only pins the first match.
        options.seed = None;
        discard_pending_input(&mut lines);
        match next_match(&mut lines).await {
            Some(next_mode) => mode = next_mode,
            None => break,
        }
    }

    Ok(())
}
