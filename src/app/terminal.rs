//! Terminal: raw mode, alternate screen, plain-text frames.
//!
//! Frames are whole strings. A frame identical to the previous one is skipped.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, event, style::Print, terminal, QueueableCommand};

pub struct Terminal {
    stdout: io::Stdout,
    last: Option<String>,
    buf: Vec<u8>,
    active: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(4 * 1024),
            active: false,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(event::EnableMouseCapture)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(event::DisableMouseCapture)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &str) -> Result<()> {
        if self.last.as_deref() == Some(frame) {
            return Ok(());
        }
        self.buf.clear();
        encode_frame_into(frame, &mut self.buf)?;
        self.flush_buf()?;
        self.last = Some(frame.to_string());
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Clear and print `frame`; raw mode needs `\r\n` line breaks.
pub fn encode_frame_into(frame: &str, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    for (i, line) in frame.lines().enumerate() {
        if i > 0 {
            out.queue(Print("\r\n"))?;
        }
        out.queue(Print(line))?;
    }
    Ok(())
}
