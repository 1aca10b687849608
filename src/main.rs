mod answer;
mod hunt;
mod play;
mod progress;
mod puzzle;
mod screen;
mod settings;
mod store;
mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hunt::{HuntSession, Phase};
use screen::{Presentation, Screens};
use settings::Settings;
use std::io;
use std::path::PathBuf;
use std::process;
use store::FileStore;

/// Solve a chain of riddles, one answer at a time.
#[derive(Parser)]
#[command(name = "treasure-hunt", version)]
struct Cli {
    /// Directory holding settings, templates and saved progress.
    #[arg(
        long,
        env = "TREASURE_HUNT_DIR",
        default_value = ".treasure-hunt",
        global = true
    )]
    data_dir: PathBuf,

    /// Read settings from this file instead of `<data-dir>/treasure-hunt.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively (the default).
    Play,
    /// Start the hunt, or resume it, and show the current screen.
    Start,
    /// Submit an answer for the current clue.
    Answer {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Show the current clue with its hint revealed.
    Hint,
    /// Erase saved progress and return to the home screen.
    Restart,
    /// Show the current screen.
    Status {
        /// Print a single JSON line instead of the screen.
        #[arg(long)]
        json: bool,
    },
}

fn run(cli: Cli) -> Result<()> {
    let store = FileStore::open(&cli.data_dir)?;
    let settings = match &cli.config {
        Some(path) => Settings::load_file(path)?,
        None => Settings::load(&cli.data_dir)?,
    };
    let puzzles = settings.puzzle_set().context("invalid puzzle set")?;
    let options = settings.hunt_options()?;
    let screens = Screens::load(&settings.templates, &cli.data_dir)?;
    let mut session = HuntSession::load(puzzles, store, options);
    let mut presentation = Presentation::new(false);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            return play::run(&mut session, &screens, stdin.lock(), &mut stdout);
        }
        Command::Start => session.start(),
        Command::Answer { text } => {
            let submission = session.submit_answer(&text.join(" "))?;
            presentation.observe(&submission);
        }
        Command::Hint => match session.phase() {
            Phase::InProgress(i) => presentation.reveal_hint(i),
            phase => anyhow::bail!("no clue on screen ({})", phase.name()),
        },
        Command::Restart => session.restart(),
        Command::Status { json: true } => {
            let status = serde_json::json!({
                "phase": session.phase().name(),
                "index": session.index(),
                "total": session.total(),
                "progress": session.progress(),
            });
            println!("{status}");
            return Ok(());
        }
        Command::Status { json: false } => {}
    }

    println!("{}", screens.render(&session, &presentation)?);
    Ok(())
}

fn main() {
    telemetry::init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("treasure-hunt: {err:#}");
        process::exit(2);
    }
}
