use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use super::Renderer;
use crate::error::Result;

/// Renders spectrum lines to stdout on an alternate screen.
///
/// Raw mode stays enabled for the lifetime of the renderer so quit keys can
/// be read without line buffering; `Drop` restores the terminal even when
/// the run aborts early.
pub struct TerminalRenderer {
    stdout: Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }
}

impl Renderer for TerminalRenderer {
    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        queue!(self.stdout, Print(line), Print("\r\n"))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        // Restoration must not panic in a drop path.
        let _ = execute!(self.stdout, LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
    }
}
