mod render;

use std::error::Error;
use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing::{error, info, trace};
use tracing_subscriber::EnvFilter;

use pacman_sim::config::Settings;
use pacman_sim::timer::FixedStep;
use pacman_sim::{Dir, Game, Phase};

use crate::render::Renderer;

enum Control {
    Continue,
    Quit,
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;
    if let Some(path) = &settings.log_file {
        init_tracing(path)?;
    }
    let game = Game::new(settings.variant.maze(), settings.game_config())?;
    info!(variant = ?settings.variant, tick_ms = settings.tick_ms, fps = settings.render_fps, "starting");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, game, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    if let Err(err) = &result {
        error!(%err, "terminal loop failed");
    }
    Ok(result?)
}

/// Log to a file; the terminal itself is owned by the game screen.
fn init_tracing(path: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .compact()
        .init();

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        error!(%panic, "panicked");
        default_hook(panic);
    }));
    Ok(())
}

fn run(stdout: &mut Stdout, mut game: Game, settings: &Settings) -> io::Result<()> {
    let mut renderer = Renderer::new(game.maze());
    let mut clock = FixedStep::new(Duration::from_millis(settings.tick_ms));
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps);
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                if let Control::Quit = handle_key(&mut game, key.code) {
                    info!(score = game.score(), "quit");
                    return Ok(());
                }
            }
        }

        let due = clock.advance(frame_start.duration_since(last_frame));
        last_frame = frame_start;
        if game.phase() == Phase::Playing {
            for _ in 0..due {
                for event in game.tick() {
                    trace!(?event, "game event");
                }
            }
        } else {
            // Resume from a clean slate instead of replaying idle time.
            clock.reset();
        }

        renderer.draw(stdout, game.maze(), &game.snapshot())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn handle_key(game: &mut Game, code: KeyCode) -> Control {
    let dir = match code {
        KeyCode::Char('q') => return Control::Quit,
        KeyCode::Char(' ') => {
            game.toggle_pause();
            return Control::Continue;
        }
        KeyCode::Enter | KeyCode::Char('r') => {
            game.start_or_reset();
            return Control::Continue;
        }
        KeyCode::Esc => {
            game.return_to_menu();
            return Control::Continue;
        }
        KeyCode::Up | KeyCode::Char('k') => Dir::Up,
        KeyCode::Down | KeyCode::Char('j') => Dir::Down,
        KeyCode::Left | KeyCode::Char('h') => Dir::Left,
        KeyCode::Right | KeyCode::Char('l') => Dir::Right,
        _ => return Control::Continue,
    };
    game.set_queued_direction(dir);
    Control::Continue
}
