mod event;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use rand::rngs::SmallRng;

use event::{AppEvent, EventHandler};
use stonecut::config::Config;
use stonecut::engine::Model;
use stonecut::session::StateMachine;
use stonecut::ui::screen::ScreenBuffer;
use stonecut::ui::view::GameView;

type Game = StateMachine<SmallRng, ScreenBuffer>;

#[derive(Parser)]
#[command(name = "stonecut", version, about = "Terminal stone-cutting game with adaptive success chance")]
struct Cli {
    #[arg(short, long, help = "Config file (defaults to the user config dir)")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Seed the random source for a reproducible session")]
    seed: Option<u64>,

    #[arg(long, help = "Write log output to this file")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Write the effective config to the config path and exit")]
    init_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = Config::resolve(cli.config.as_deref(), cli.seed)?;
    let keymap = config.keymap()?;

    if cli.init_config {
        let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
        config.save_to(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    log::info!("starting session (seed: {:?})", config.seed);
    let mut game = StateMachine::new(Model::seeded(config.seed), keymap, ScreenBuffer::default());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(keymap.quit);

    let result = run_app(&mut terminal, &mut game, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    print_summary(game.model());
    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // Logging to the terminal would scribble over the game screen.
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let view = GameView::new(game.sink(), game.keymap());
            frame.render_widget(view, frame.area());
        })?;

        match events.next()? {
            AppEvent::Char(ch) => {
                game.handle_input(ch);
            }
            AppEvent::Redraw => {}
            AppEvent::Quit => return Ok(()),
        }
    }
}

fn print_summary(model: &Model) {
    let stats = model.statistics();
    if stats.is_empty() {
        println!("No stones finished this session.");
        return;
    }
    println!("Session results (A, B): repeats");
    for ((a, b), count) in stats.rows() {
        println!("  ({a:>2}, {b:>2}): {count}");
    }
}
