#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::sync::Arc;
use std::time::{Duration, Instant};

use aipuzzle::Time;
use aipuzzle::app::App;
use aipuzzle::cli_options;
use aipuzzle::config;
use aipuzzle::content::{ContentProvider, GeminiClient, OfflineProvider};
use aipuzzle::ui;
use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info, warn};
use ratatui::{Terminal, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli_options::parse();
    args.apply_config_override();

    // Create log file and redirect stderr to it
    let log_path = "aipuzzle.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Failed to create log file {log_path}"))?;

    // Redirect stderr to the log file
    let stderr_fd = std::io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open; stderr now refers to the log file
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.default_log_filter()),
    )
    .format_timestamp(None)
    .format_module_path(false)
    .init();

    info!("Starting AI Puzzle");

    if let Err(e) = config::init() {
        error!("Failed to load configuration: {e}");
        // Continue with default configuration
    } else {
        info!("Configuration loaded successfully");
    }
    let settings = config::current();

    let provider = content_provider(&settings.content, args.offline);
    let mut app = App::new(provider, args.rng());
    app.first_level = args.level;

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(settings.ui.tick_rate_ms);
    let game_tick_rate = Duration::from_millis(settings.ui.game_tick_rate_ms);
    let res = run_app(&mut terminal, app, tick_rate, game_tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn content_provider(settings: &config::ContentConfig, offline: bool) -> Arc<dyn ContentProvider> {
    if offline || settings.offline {
        info!("Offline mode: levels use the default theme");
        return Arc::new(OfflineProvider);
    }
    match GeminiClient::from_config(settings) {
        Ok(client) => {
            if !client.has_api_key() {
                warn!("No API key in ${}; levels will use the default theme", settings.api_key_env);
            }
            Arc::new(client)
        }
        Err(e) => {
            warn!("Cannot create the content client ({e}); running offline");
            Arc::new(OfflineProvider)
        }
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
    game_tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    // Explicitly flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    debug!("Resources initialized");

    loop {
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        if last_game_tick.elapsed() >= game_tick_rate {
            last_game_tick = Instant::now();
            app.world.resource_mut::<Time>().update();
            app.on_tick();
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }

        if event::poll(Duration::from_millis(5))? {
            match event::read()? {
                Event::Key(key) => {
                    // Key releases carry no command
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    debug!("Key event: {key:?}");
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        debug!("Click at {},{}", mouse.column, mouse.row);
                        app.handle_click(mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }
    }
}
