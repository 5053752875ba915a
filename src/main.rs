use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use speedtype::{
    app::{App, Flow},
    config::{ConfigStore, FileConfigStore},
    corpus::{Corpus, Difficulty},
    logging,
    metrics::{compute_wpm, format_metric},
    runtime::{AppEvent, EventSource, FixedTicker, Runner, TerminalEvents, Ticker},
    ui,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
};

/// typing speed practice with live per-word feedback
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a sample sentence against the clock. Words turn green, red or yellow as you type, and stopping the test reports elapsed time and words per minute."
)]
pub struct Cli {
    /// difficulty to start with (defaults to the last one used)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// JSON file with "easy", "medium" and "hard" sentence lists
    #[clap(long, value_name = "FILE", global = true)]
    samples: Option<PathBuf>,

    /// seed for sample selection, for repeatable sessions
    #[clap(long, global = true)]
    seed: Option<u64>,

    /// where to write logs
    #[clap(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// screen refresh interval while a test is running
    #[clap(long, value_name = "MS")]
    tick_rate_ms: Option<u64>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// print one sample sentence and exit
    Sample {
        /// selector value; unknown values use the easy sentences
        #[clap(short = 'd', long, default_value = "easy")]
        difficulty: String,
    },
    /// print words per minute for TEXT typed in SECONDS and exit
    #[clap(allow_negative_numbers = true)]
    Wpm { text: String, seconds: f64 },
}

fn load_corpus(path: Option<&Path>) -> Corpus {
    let loaded = match path {
        Some(p) => Corpus::from_path(p),
        None => Corpus::builtin(),
    };

    loaded.unwrap_or_else(|err| {
        let source = path.map_or("built-in samples".to_string(), |p| p.display().to_string());
        Cli::command()
            .error(ErrorKind::InvalidValue, format!("{source}: {err}"))
            .exit()
    })
}

/// Logging is optional, a bad log location only costs the log.
fn start_logging(path: Option<&Path>) -> Option<PathBuf> {
    logging::init(path)
        .map_err(|err| eprintln!("warning: logging disabled: {err}"))
        .ok()
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let store = FileConfigStore::new();
    let mut config = store.load();
    let samples = cli.samples.clone().or_else(|| config.samples_path.clone());

    match &cli.command {
        Some(Command::Wpm { text, seconds }) => {
            println!("{}", format_metric(compute_wpm(text, *seconds)));
            return Ok(());
        }
        Some(Command::Sample { difficulty }) => {
            let corpus = load_corpus(samples.as_deref());
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            println!("{}", corpus.pick_sample(difficulty, &mut rng));
            return Ok(());
        }
        None => {}
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let corpus = load_corpus(samples.as_deref());
    if let Some(log_path) = start_logging(cli.log_file.as_deref()) {
        log::info!("starting, logging to {}", log_path.display());
    }

    let difficulty = cli.difficulty.unwrap_or(config.difficulty);
    let tick_rate_ms = cli.tick_rate_ms.unwrap_or(config.tick_rate_ms);
    let mut app = App::new(difficulty, corpus, cli.seed);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(TerminalEvents::new(), FixedTicker::from_millis(tick_rate_ms));
    let outcome = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    config.difficulty = app.difficulty();
    if let Err(err) = store.save(&config) {
        log::warn!("could not save settings to {}: {err}", store.path().display());
    }

    outcome
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;

    while let Some(event) = runner.step() {
        match event {
            AppEvent::Tick => {
                // only the running indicator changes between keys
                if app.controller.is_running() {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => {
                if app.handle_key(key) == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}
