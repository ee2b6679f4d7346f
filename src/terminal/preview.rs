//! Terminal preview: A display sink that draws the matrix in a terminal.
//!
//! Two matrix rows share one terminal row (see [`crate::buffer::diff`]), so
//! a 64x32 panel needs a 64x16 terminal area plus one title line. After the
//! first frame only changed cells are re-emitted.

use super::output::OutputBuffer;
use crate::actor::DisplaySink;
use crate::buffer::diff::{render_diff, render_full, DiffState};
use crate::buffer::{Frame, Size};
use crate::error::{Error, Result};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use tracing::{debug, warn};

/// Configuration for the [`TerminalSink`].
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Brightness applied to every pixel, 0-100.
    pub brightness: u8,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Title printed above the panel. `None` draws the panel at the top.
    pub title: Option<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            brightness: 100,
            alternate_screen: true,
            title: None,
        }
    }
}

/// Display sink rendering to a terminal with true-color half blocks.
pub struct TerminalSink<W: Write> {
    /// Terminal (or any byte sink, for tests).
    writer: W,
    /// Pre-allocated output buffer.
    output: OutputBuffer,
    /// What is on screen.
    current: Frame,
    /// Brightness-scaled copy of the incoming frame.
    next: Frame,
    /// Whether `current` reflects the screen yet.
    drawn: bool,
    /// Diff state for cursor/color tracking.
    diff_state: DiffState,
    /// Configuration.
    config: PreviewConfig,
    /// Whether raw mode / alternate screen must be restored on close.
    owns_terminal: bool,
    /// Whether close has run.
    closed: bool,
    /// Frames drawn.
    frames: u64,
}

impl TerminalSink<Stdout> {
    /// Take over stdout: raw mode, alternate screen, hidden cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn stdout(size: Size, config: PreviewConfig) -> Result<Self> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(e) = enter_screen(&mut stdout, config.alternate_screen) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }

        let mut sink = Self::with_writer(stdout, size, config);
        sink.owns_terminal = true;
        Ok(sink)
    }
}

/// Switch screens, hide the cursor and clear.
fn enter_screen(stdout: &mut Stdout, alternate_screen: bool) -> io::Result<()> {
    if alternate_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    execute!(
        stdout,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All)
    )
}

impl<W: Write> TerminalSink<W> {
    /// Render into an arbitrary writer without touching terminal modes.
    pub fn with_writer(writer: W, size: Size, config: PreviewConfig) -> Self {
        Self {
            writer,
            output: OutputBuffer::new(),
            current: Frame::with_size(size),
            next: Frame::with_size(size),
            drawn: false,
            diff_state: DiffState::new(),
            config,
            owns_terminal: false,
            closed: false,
            frames: 0,
        }
    }

    /// Get a reference to the writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Frames drawn so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Terminal (column, row) of the panel's top-left pixel.
    const fn origin(&self) -> (u16, u16) {
        if self.config.title.is_some() {
            (0, 1)
        } else {
            (0, 0)
        }
    }

    /// Render `next` and swap it on screen.
    fn draw_next(&mut self) -> Result<()> {
        self.output.clear();
        let origin = self.origin();

        if self.drawn {
            render_diff(
                &self.current,
                &self.next,
                origin,
                self.output.data_mut(),
                &mut self.diff_state,
            );
        } else {
            if let Some(title) = &self.config.title {
                self.output.cursor_move(0, 0);
                self.output.reset_attrs();
                self.output.write_str(title);
            }
            render_full(&self.next, origin, self.output.data_mut(), &mut self.diff_state);
        }
        self.output.reset_attrs();
        // Colors were reset; make the diff re-emit them.
        self.diff_state.reset();

        self.output.flush_to(&mut self.writer)?;
        std::mem::swap(&mut self.current, &mut self.next);
        self.drawn = true;
        Ok(())
    }

    /// Leave raw mode and the alternate screen if we entered them.
    fn restore(&mut self) -> Result<()> {
        if !self.owns_terminal {
            return Ok(());
        }
        self.owns_terminal = false;

        // Every step runs even if an earlier one failed; the first error is kept.
        let shown = execute!(self.writer, cursor::Show);
        let left = if self.config.alternate_screen {
            execute!(self.writer, LeaveAlternateScreen)
        } else {
            Ok(())
        };
        let cooked = terminal::disable_raw_mode();
        shown.and(left).and(cooked)?;
        Ok(())
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn submit(&mut self, frame: &Frame) -> Result<()> {
        if self.closed {
            return Err(Error::sink("terminal preview already closed"));
        }
        if frame.size() != self.next.size() {
            return Err(Error::FrameSize {
                expected: self.next.size(),
                actual: frame.size(),
            });
        }

        self.next.copy_scaled_from(frame, self.config.brightness);
        self.draw_next()?;
        self.frames += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!(frames = self.frames, "closing terminal preview");

        // Blank the panel before letting go of it.
        self.next.clear();
        let blanked = self.draw_next();
        let restored = self.restore();
        blanked.and(restored)
    }
}

impl<W: Write> Drop for TerminalSink<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "restoring the terminal failed");
        }
    }
}
