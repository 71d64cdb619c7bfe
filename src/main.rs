//! Terminal geography quiz (default binary).
//!
//! Loads the datasets, restores the session from the state file and runs a
//! crossterm event loop over a framebuffer renderer. Logs go to a file since
//! the terminal is in raw mode.

use std::fs::File;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use geo_quiz::app::App;
use geo_quiz::core::{QuizGame, SimpleRng};
use geo_quiz::data::{load_all, JsonFileStore, QuizConfig};
use geo_quiz::input::{handle_key_event, should_quit};
use geo_quiz::term::{FrameBuffer, QuizView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = QuizConfig::from_env();
    init_tracing(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    let report = runtime.block_on(load_all(&config.data_dir));

    let seed = config.seed.unwrap_or_else(clock_seed);
    info!(seed, data_dir = %config.data_dir.display(), "starting quiz");

    let store = JsonFileStore::open(&config.state_path);
    let game = QuizGame::new(report.datasets, store, SimpleRng::new(seed));
    let mut app = App::new(game);
    if !report.failures.is_empty() {
        let missing: Vec<&str> = report.failures.iter().map(|(s, _)| s.as_str()).collect();
        app.set_notice(format!("Missing data: {}", missing.join(", ")));
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App<JsonFileStore, SimpleRng>) -> Result<()> {
    let view = QuizView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        app.render_into(&view, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    let step = view
                        .projection(viewport)
                        .map(|p| p.cell_size())
                        .unwrap_or((0.1, 0.1));
                    app.handle(action, step);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

fn init_tracing(config: &QuizConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|e| {
        eprintln!("invalid GEO_QUIZ_LOG directive ({e}), using geo_quiz=info");
        EnvFilter::new("geo_quiz=info")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => (d.as_nanos() as u32) ^ (d.as_secs() as u32),
        Err(e) => {
            warn!(error = %e, "system clock before epoch, using fixed seed");
            1
        }
    }
}
