//! TerminalRenderer: flushes rendered lines to a real terminal.
//!
//! Frames are diffed line by line against the previous one; only changed
//! lines are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Vec<String>>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a frame, swapping it into internal state.
    ///
    /// The renderer diffs against the previous frame and then swaps buffers
    /// so the caller can reuse the old lines without cloning.
    pub fn draw_swap(&mut self, lines: &mut Vec<String>) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.len() == lines.len() => {
                encode_diff_into(&prev, lines, &mut self.buf)?;
                prev
            }
            other => {
                encode_full_into(lines, &mut self.buf)?;
                other.unwrap_or_default()
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, lines);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(lines: &[String], out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for (y, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

/// Encode only the lines that differ between `prev` and `next`.
pub fn encode_diff_into(prev: &[String], next: &[String], out: &mut Vec<u8>) -> Result<()> {
    for y in changed_lines(prev, next) {
        out.queue(cursor::MoveTo(0, y as u16))?;
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        out.queue(Print(&next[y]))?;
    }
    Ok(())
}

fn changed_lines<'a>(prev: &'a [String], next: &'a [String]) -> impl Iterator<Item = usize> + 'a {
    next.iter()
        .enumerate()
        .filter(move |(y, line)| prev.get(*y) != Some(*line))
        .map(|(y, _)| y)
}
