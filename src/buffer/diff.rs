//! Diffing Engine: Generate minimal ANSI sequences from frame changes.
//!
//! The terminal preview packs two matrix rows into one terminal cell using
//! the upper half block (`▀`): the foreground paints the top pixel and the
//! background paints the bottom pixel. This module:
//! 1. Compares the current and next frames cell pair by cell pair
//! 2. Generates ANSI escape sequences for changed cells only
//! 3. Skips cursor moves when writing adjacent cells
//! 4. Tracks color state to avoid redundant SGR sequences
//!
//! All output is accumulated in a single buffer and flushed with one syscall.

use super::{Frame, Rgb};
use std::io::Write;

/// Upper half block, UTF-8 encoded.
const HALF_BLOCK: &[u8] = "\u{2580}".as_bytes();

/// State tracker for the diffing algorithm.
///
/// This tracks the "current" terminal state (cursor position, colors)
/// to minimize the number of escape sequences we need to emit.
#[derive(Debug, Clone)]
pub struct DiffState {
    /// Last known cursor X position (0-indexed).
    cursor_x: u16,
    /// Last known cursor Y position (0-indexed).
    cursor_y: u16,
    /// Last emitted foreground color.
    fg: Option<Rgb>,
    /// Last emitted background color.
    bg: Option<Rgb>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor_x: u16::MAX,
            cursor_y: u16::MAX,
            fg: None,
            bg: None,
        }
    }

    /// Reset the state (e.g., after a full screen clear).
    pub const fn reset(&mut self) {
        self.fg = None;
        self.bg = None;
        // Force cursor move on next write
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Number of terminal cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
}

/// Number of terminal rows needed to show a frame.
#[inline]
pub const fn terminal_rows(frame_height: u16) -> u16 {
    frame_height.div_ceil(2)
}

/// Render the difference between two frames into an ANSI sequence buffer.
///
/// `origin` is the terminal (column, row) of the frame's top-left pixel.
///
/// # Returns
///
/// Statistics about the diff operation.
pub fn render_diff(
    current: &Frame,
    next: &Frame,
    origin: (u16, u16),
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.size(), next.size());
    render_cells(Some(current), next, origin, output, state)
}

/// Generate a full redraw sequence (no diffing).
pub fn render_full(
    next: &Frame,
    origin: (u16, u16),
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    state.reset();
    render_cells(None, next, origin, output, state)
}

fn render_cells(
    current: Option<&Frame>,
    next: &Frame,
    origin: (u16, u16),
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    let mut result = DiffResult::default();

    for row in 0..terminal_rows(next.height()) {
        let top_y = row * 2;
        let bottom_y = top_y + 1;
        for x in 0..next.width() {
            let top = next.get(x, top_y).unwrap_or(Rgb::BLACK);
            // Odd heights leave the last bottom half unlit.
            let bottom = next.get(x, bottom_y).unwrap_or(Rgb::BLACK);

            if let Some(current) = current {
                let old_top = current.get(x, top_y).unwrap_or(Rgb::BLACK);
                let old_bottom = current.get(x, bottom_y).unwrap_or(Rgb::BLACK);
                if old_top == top && old_bottom == bottom {
                    continue;
                }
            }

            result.cells_changed += 1;

            let col = origin.0 + x;
            let line = origin.1 + row;
            if state.cursor_y != line || state.cursor_x != col {
                emit_cursor_move(output, col, line);
                state.cursor_x = col;
                state.cursor_y = line;
                result.cursor_moves += 1;
            }

            if state.fg != Some(top) {
                emit_fg_color(output, top);
                state.fg = Some(top);
                result.color_changes += 1;
            }

            if state.bg != Some(bottom) {
                emit_bg_color(output, bottom);
                state.bg = Some(bottom);
                result.color_changes += 1;
            }

            output.extend_from_slice(HALF_BLOCK);
            state.cursor_x = state.cursor_x.saturating_add(1);
        }
    }

    result
}

/// Emit a cursor move sequence.
///
/// Uses the most compact representation:
/// - `\x1b[H` for home (1,1)
/// - `\x1b[{row};{col}H` for absolute positioning
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    // ANSI uses 1-indexed positions
    let row = y + 1;
    let col = x + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

/// Emit a foreground color sequence (true color).
#[inline]
fn emit_fg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

/// Emit a background color sequence (true color).
#[inline]
fn emit_bg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_rows() {
        assert_eq!(terminal_rows(32), 16);
        assert_eq!(terminal_rows(5), 3);
    }

    #[test]
    fn test_identical_frames_emit_nothing() {
        let a = Frame::new(8, 4);
        let b = a.clone();
        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, (0, 0), &mut output, &mut state);
        assert_eq!(result.cells_changed, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_single_pixel_change() {
        let a = Frame::new(8, 4);
        let mut b = a.clone();
        b.set(3, 3, Rgb::RED);

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, (0, 0), &mut output, &mut state);

        // Pixel row 3 is the bottom half of terminal row 1.
        assert_eq!(result.cells_changed, 1);
        assert_eq!(result.cursor_moves, 1);
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("\x1b[2;4H"));
        assert!(text.contains("\x1b[48;2;255;0;0m"));
        assert!(text.ends_with('\u{2580}'));
    }

    #[test]
    fn test_adjacent_cells_skip_cursor_move() {
        let a = Frame::new(8, 2);
        let mut b = a.clone();
        b.set(0, 0, Rgb::BLUE);
        b.set(1, 0, Rgb::BLUE);

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, (0, 0), &mut output, &mut state);
        assert_eq!(result.cells_changed, 2);
        assert_eq!(result.cursor_moves, 1);
        // Same colors for both cells: one fg and one bg sequence.
        assert_eq!(result.color_changes, 2);
    }

    #[test]
    fn test_full_render_covers_every_cell() {
        let frame = Frame::new(4, 3);
        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_full(&frame, (2, 1), &mut output, &mut state);
        assert_eq!(result.cells_changed, 4 * 2);
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("\x1b[2;3H"));
    }
}
