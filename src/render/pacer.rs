use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

use crate::error::Result;

/// Whether the frame loop should keep going after a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceOutcome {
    Continue,
    Stop,
}

/// Paces the frame loop. One `wait` call separates consecutive frames.
pub trait Pacer {
    fn wait(&mut self) -> Result<PaceOutcome>;
}

/// Real-time pacer: sleeps out the configured frame delay while watching for
/// quit keys (`q`, `Esc`, `Ctrl-C`).
pub struct FramePacer {
    delay: Duration,
}

impl FramePacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Pacer for FramePacer {
    fn wait(&mut self) -> Result<PaceOutcome> {
        let deadline = Instant::now() + self.delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(PaceOutcome::Continue);
            }
            // The poll doubles as the frame sleep; input wakes it early.
            if event::poll(remaining)? {
                if let Event::Key(key) = event::read()? {
                    let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL));
                    if quit {
                        return Ok(PaceOutcome::Stop);
                    }
                }
            }
        }
    }
}
