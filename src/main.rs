use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, info};
use terminal_pacman::config::{
    DEFAULT_CELL_SIZE, DEFAULT_TICK_INTERVAL_MS, INPUT_POLL_TIMEOUT_MS, MovePolicy, RenderMode,
    THEME_CLASSIC,
};
use terminal_pacman::error::AppError;
use terminal_pacman::game::GameState;
use terminal_pacman::grid::Layout;
use terminal_pacman::input::{GameInput, InputConfig, InputHandler};
use terminal_pacman::logging;
use terminal_pacman::renderer::{self, RenderOptions};
use terminal_pacman::terminal_runtime::{AppTerminal, TerminalSession};
use terminal_pacman::ticker::Ticker;
use terminal_pacman::ui::hud::HudInfo;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// When the player moves: every tick along the last direction, or once per key press.
    #[arg(long, value_enum, default_value_t = MovePolicy::FixedInterval)]
    policy: MovePolicy,

    /// Tick interval in milliseconds for the fixed-interval policy.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// ASCII layout file (`#` wall, `.` pellet, space empty, `P` start).
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Draw one glyph per cell, or paint scaled shapes on a canvas.
    #[arg(long, value_enum, default_value_t = RenderMode::Glyph)]
    render: RenderMode,

    /// Cell size in drawing units for canvas rendering.
    #[arg(
        long = "cell-size",
        default_value_t = DEFAULT_CELL_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    cell_size: u32,

    /// Stop the player when an unbound key is pressed.
    #[arg(long = "stop-on-unmapped")]
    stop_on_unmapped: bool,

    /// Write log records to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let layout = load_layout(cli.layout.as_deref())?;
    let mut session = TerminalSession::enter()?;
    run(session.terminal_mut(), &cli, layout)
}

fn load_layout(path: Option<&Path>) -> Result<Layout, AppError> {
    let Some(path) = path else {
        return Ok(Layout::builtin());
    };

    let text = fs::read_to_string(path).map_err(|source| AppError::LayoutFile {
        path: path.display().to_string(),
        source,
    })?;
    let layout = Layout::parse(&text)?;
    info!(
        "loaded layout {} ({}x{})",
        path.display(),
        layout.grid.size().width,
        layout.grid.size().height
    );

    Ok(layout)
}

fn run(terminal: &mut AppTerminal, cli: &Cli, layout: Layout) -> Result<(), AppError> {
    let mut state = GameState::from_layout(layout, cli.policy);
    let mut input = InputHandler::new(InputConfig {
        stop_on_unmapped: cli.stop_on_unmapped,
    });
    let mut ticker = Ticker::from_millis(cli.tick_ms);
    let mut hud = HudInfo::new(&THEME_CLASSIC, cli.policy);
    let options = RenderOptions {
        mode: cli.render,
        cell_size: cli.cell_size,
        theme: &THEME_CLASSIC,
    };
    let poll_timeout = Duration::from_millis(INPUT_POLL_TIMEOUT_MS);

    resume_ticker(&mut ticker, cli.policy);
    info!(
        "session started: policy {:?}, interval {:?}, {} pellets",
        cli.policy,
        ticker.interval(),
        state.pellets_remaining()
    );

    loop {
        terminal.draw(|frame| renderer::render(frame, &state, options, &hud))?;

        if let Some(game_input) = input.poll_input(poll_timeout)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Pause => {
                    hud.paused = !hud.paused;
                    debug!("paused: {}", hud.paused);
                    update_suspension(&mut ticker, &hud, cli.policy);
                }
                GameInput::Help => {
                    hud.show_help = !hud.show_help;
                    update_suspension(&mut ticker, &hud, cli.policy);
                }
                other if !is_suspended(&hud) => {
                    if let Some(outcome) = state.apply_input(other) {
                        hud.record_outcome(outcome);
                    }
                }
                _ => {}
            }
        }

        if ticker.poll(Instant::now()) {
            let outcome = state.tick();
            hud.record_outcome(outcome);
        }
    }

    ticker.stop();
    let progress = state.progress();
    info!(
        "session ended: level {}, score {}, {} ticks",
        progress.level, progress.score, state.tick_count
    );

    Ok(())
}

fn is_suspended(hud: &HudInfo<'_>) -> bool {
    hud.paused || hud.show_help
}

fn update_suspension(ticker: &mut Ticker, hud: &HudInfo<'_>, policy: MovePolicy) {
    if is_suspended(hud) {
        ticker.stop();
    } else {
        resume_ticker(ticker, policy);
    }
}

fn resume_ticker(ticker: &mut Ticker, policy: MovePolicy) {
    if policy.latches_direction() {
        ticker.start(Instant::now());
    }
}
