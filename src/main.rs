use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::{Stdout, stdout};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use space_adventure::assets::{ImageAssets, Sprites};
use space_adventure::audio::AudioManager;
use space_adventure::clock::SystemClock;
use space_adventure::config::GameConfig;
use space_adventure::input::KeyboardInput;
use space_adventure::random::SeededRandom;
use space_adventure::renderer::TerminalRenderer;
use space_adventure::{App, SessionEnd};

const LOG_FILE: &str = "debug.log";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let config = GameConfig::from_env()?;
    info!(?config, "starting space adventure");

    // Load everything that can log before the terminal is taken over
    let sprites = Sprites::load(&ImageAssets::new(&config.asset_dir));
    let audio = if config.audio {
        AudioManager::new(&config.asset_dir)
    } else {
        AudioManager::disabled()
    };
    let app = App::new(sprites, Box::new(SeededRandom::new(config.seed)), audio);

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!(supports_keyboard_enhancement, "keyboard capabilities");

    let mut renderer = TerminalRenderer::new(setup_terminal(supports_keyboard_enhancement)?);
    let mut input = KeyboardInput::new(supports_keyboard_enhancement);
    let mut clock = SystemClock::new();

    let result = app.run(&mut input, &mut clock, &mut renderer);

    // Restore the terminal even when the game loop failed
    restore_terminal(renderer.terminal_mut(), supports_keyboard_enhancement)?;

    match result? {
        SessionEnd::Quit => info!("session ended by player"),
        SessionEnd::GameOver { score } => {
            info!(score, "session ended");
            println!("Game over! Final score: {score}");
        }
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("cannot create {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("cannot install logger: {err}"))?;
    Ok(())
}

fn setup_terminal(keyboard_enhancement: bool) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhancement: bool,
) -> Result<()> {
    if keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
