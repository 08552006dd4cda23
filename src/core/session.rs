//! Interactive Enduro session: terminal setup, the frame loop, teardown.

use crate::core::frame_clock::FrameClock;
use crate::enduro::logic::step_frame;
use crate::enduro::types::{ConfigError, EnduroConfig, EnduroGame, RunOutcome};
use crate::input::{map_key, EnduroInput, HeldKeys};
use crate::ui::enduro_scene::render_enduro_scene;
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long the crash screen waits for a key before closing.
const CRASH_SCREEN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// What happened during a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub outcome: RunOutcome,
    pub frames: u64,
    pub elapsed_ms: u64,
    pub obstacles_spawned: u64,
}

/// Raw mode + alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    key_release_events: bool,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                return Err(e);
            }
        };

        // From here on, drop restores the terminal
        let mut session = Self {
            terminal,
            key_release_events: false,
        };
        session.terminal.backend_mut().execute(EnterAlternateScreen)?;

        if matches!(supports_keyboard_enhancement(), Ok(true)) {
            session
                .terminal
                .backend_mut()
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))?;
            session.key_release_events = true;
        }
        debug!("key release events: {}", session.key_release_events);

        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.key_release_events {
            let _ = self
                .terminal
                .backend_mut()
                .execute(PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = self.terminal.backend_mut().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Play one run in the terminal until the player quits or crashes.
///
/// `seed` makes traffic placement reproducible.
pub fn run_session(
    config: EnduroConfig,
    seed: Option<u64>,
) -> Result<SessionSummary, SessionError> {
    let mut game = EnduroGame::new(config)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = TerminalSession::enter()?;
    let mut keys = HeldKeys::new();
    let mut clock = FrameClock::new(game.config.target_fps);
    info!(
        "starting run: {}x{} board, {} fps",
        game.config.width, game.config.height, game.config.target_fps
    );

    while game.is_running() {
        drain_key_events(&mut keys)?;
        step_frame(&mut game, keys.sample(), clock.elapsed_ms(), &mut rng);

        session.terminal.draw(|frame| {
            let area = frame.size();
            render_enduro_scene(frame, area, &game);
        })?;

        let frame_time = clock.tick();
        if frame_time > clock.budget() * 2 {
            debug!("slow frame: {:?}", frame_time);
        }
    }

    if game.outcome == Some(RunOutcome::Crashed) {
        wait_for_dismiss(CRASH_SCREEN_TIMEOUT)?;
    }

    drop(session);

    let summary = SessionSummary {
        outcome: game.outcome.unwrap_or(RunOutcome::Quit),
        frames: game.frame_count,
        elapsed_ms: game.elapsed_ms,
        obstacles_spawned: game.obstacles_spawned,
    };
    info!("run finished: {:?}", summary);
    Ok(summary)
}

/// Feed every pending key event to `keys` without blocking.
fn drain_key_events(keys: &mut HeldKeys) -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            keys.handle_key(&key);
        }
    }
    Ok(())
}

/// Wait for a non-steering key press, up to `timeout`. Steering keys are
/// ignored so a held arrow does not skip the crash screen.
fn wait_for_dismiss(timeout: Duration) -> io::Result<()> {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || !event::poll(remaining)? {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match map_key(&key) {
                Some(EnduroInput::SteerLeft) | Some(EnduroInput::SteerRight) => continue,
                _ => return Ok(()),
            }
        }
    }
}
