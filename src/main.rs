//! Entry point and game loop.
//!
//! `main` is the composition root: it loads the config, installs logging,
//! builds the one `Game` for this session and hands it to the loop. Input
//! lines arrive from a reader thread; the loop owns the game and advances its
//! clock between lines so delayed resets fire on time.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use chocobox::config::GameConfig;
use chocobox::sim::game::Game;
use chocobox::ui::input::{parse_command, Command};
use chocobox::ui::renderer::Renderer;

fn main() {
    // Config warnings go to stderr before the real filter is known.
    let config = tracing::subscriber::with_default(stderr_logger("warn"), GameConfig::load);
    tracing::subscriber::set_global_default(stderr_logger(&config.log_filter))
        .unwrap_or_else(|e| eprintln!("Logging disabled: {e}"));

    let mut game = Game::from_config(config.clone());
    let mut renderer = Renderer::new(io::stdout());

    if let Err(e) = game_loop(&mut game, &mut renderer, &config) {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Chocolate Box!");
    println!("All-time score: {}", game.score().total);
}

/// `RUST_LOG` wins over the config file.
fn stderr_logger(default_filter: &str) -> impl tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish()
}

fn game_loop(
    game: &mut Game,
    renderer: &mut Renderer<io::Stdout>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let lines = spawn_line_reader();

    renderer.banner()?;
    let events = game.start_run();
    renderer.events(&events)?;
    renderer.board(game)?;
    renderer.prompt()?;

    let mut last_tick = Instant::now();

    loop {
        match lines.recv_timeout(config.timing.tick) {
            Ok(line) => {
                // Catch the clock up first so a reset that is already due
                // lands before the new action.
                tick(game, renderer, &mut last_tick)?;
                match parse_command(&line, game.selected_color()) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => renderer.help()?,
                    Ok(Command::Show) => renderer.board(game)?,
                    Ok(Command::Play(action)) => {
                        tracing::debug!(?action, "player action");
                        let events = game.dispatch(action);
                        renderer.events(&events)?;
                        renderer.board(game)?;
                    }
                    Err(e) => renderer.hint(&e.to_string())?,
                }
                renderer.prompt()?;
            }
            Err(RecvTimeoutError::Timeout) => {
                if tick(game, renderer, &mut last_tick)? {
                    renderer.prompt()?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Advance the game clock by the real time elapsed. Returns whether
/// anything was printed.
fn tick(
    game: &mut Game,
    renderer: &mut Renderer<io::Stdout>,
    last_tick: &mut Instant,
) -> io::Result<bool> {
    let now = Instant::now();
    let events = game.advance_time(now.duration_since(*last_tick));
    *last_tick = now;
    if events.is_empty() {
        return Ok(false);
    }
    renderer.newline()?;
    renderer.events(&events)?;
    renderer.board(game)?;
    Ok(true)
}

/// Read stdin on a helper thread; the channel closes on EOF.
fn spawn_line_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
