use std::io;
use std::time::{Duration, Instant};

use log::{error, info};

use crate::error::RuntimeError;
use crate::game::{GameEngine, GameStatus, Snapshot, TickOutcome};
use crate::input::Direction;

/// How long to wait for input while no tick is scheduled.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Messages serialized onto the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Tick,
    SetDirection(Direction),
    Restart,
    Quit,
}

/// Produces commands from raw input.
pub trait InputSource {
    /// Waits at most `timeout` for the next command.
    fn next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Consumes snapshots after every state change.
pub trait Display {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

/// Fixed-interval tick schedule that can be stopped and re-armed.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Creates a ticker whose first tick is due one interval after `now`.
    #[must_use]
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: Some(now + interval),
        }
    }

    /// Returns true when a tick should fire at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Schedules the following tick one interval after `now`.
    pub fn rearm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Stops scheduling ticks until re-armed.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.next_due.is_none()
    }

    /// Longest input wait that does not delay the next tick.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => IDLE_POLL_INTERVAL,
        }
    }
}

/// Totals reported when a session loop ends.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SessionSummary {
    pub final_score: u32,
    pub ticks: u64,
    pub games_played: u32,
}

/// Applies one non-quit command to the engine. Returns true when the
/// displayed state may have changed.
pub fn dispatch(engine: &mut GameEngine, command: Command) -> Result<bool, RuntimeError> {
    let changed = match command {
        Command::Tick => !matches!(engine.tick(), TickOutcome::Idle),
        Command::SetDirection(direction) => {
            engine.set_direction(direction);
            false
        }
        Command::Restart if engine.status() == GameStatus::GameOver => {
            engine.reset()?;
            true
        }
        Command::Restart | Command::Quit => false,
    };

    Ok(changed)
}

/// Runs the game loop until the input source asks to quit.
///
/// Input and ticks are handled on this thread only; a tick always completes
/// before the next command is read.
pub fn run<I, D>(
    engine: &mut GameEngine,
    input: &mut I,
    display: &mut D,
    interval: Duration,
) -> Result<SessionSummary, RuntimeError>
where
    I: InputSource,
    D: Display,
{
    let mut ticker = Ticker::start(interval, Instant::now());
    let mut ticks = 0_u64;
    let mut games_played = 1_u32;

    display.present(&engine.snapshot())?;

    loop {
        let timeout = ticker.time_until_due(Instant::now());
        if let Some(command) = input.next_command(timeout)? {
            if command == Command::Quit {
                break;
            }

            let restarted = command == Command::Restart && engine.status() == GameStatus::GameOver;
            if dispatch(engine, command)? {
                if restarted {
                    games_played += 1;
                    ticker.rearm(Instant::now());
                }
                display.present(&engine.snapshot())?;
            }
        }

        let now = Instant::now();
        if !ticker.is_due(now) {
            continue;
        }

        dispatch(engine, Command::Tick)?;
        ticks += 1;
        if let Err(violation) = engine.check_invariants() {
            error!("aborting session: {violation}");
            return Err(violation.into());
        }

        if engine.status() == GameStatus::GameOver {
            ticker.stop();
        } else {
            ticker.rearm(now);
        }
        display.present(&engine.snapshot())?;
    }

    info!(
        "session ended after {games_played} game(s) and {ticks} ticks, final score {}",
        engine.score()
    );

    Ok(SessionSummary {
        final_score: engine.score(),
        ticks,
        games_played,
    })
}
