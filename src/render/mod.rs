pub mod pacer;
pub mod terminal;

use crate::error::Result;

/// Sink for rendered spectrum lines. The terminal implementation writes to
/// stdout; tests capture frames in memory.
pub trait Renderer {
    /// Erase the previous frame.
    fn clear(&mut self) -> Result<()>;

    /// Write one complete frame line.
    fn write_line(&mut self, line: &str) -> Result<()>;
}

/// In-memory renderer used by driver tests.
#[cfg(test)]
pub struct CaptureRenderer {
    pub frames: Vec<String>,
    pub clears: usize,
}

#[cfg(test)]
impl CaptureRenderer {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            clears: 0,
        }
    }
}

#[cfg(test)]
impl Renderer for CaptureRenderer {
    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.frames.push(line.to_string());
        Ok(())
    }
}
