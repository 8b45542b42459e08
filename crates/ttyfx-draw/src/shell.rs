// SPDX-License-Identifier: MIT
//
// Shell — a box outline drawn with relative cursor motion only.
//
// Starting wherever the cursor is, the top edge is printed left to right.
// Each following row steps back `width` columns and down one line, then
// prints its own edge. The cursor finishes just past the bottom-right
// corner. Nothing is positioned absolutely, so the terminal cursor must not
// be disturbed while a shell is being drawn.
//
//   ┌────┐
//   │    │   width = 6, height = 4
//   │    │
//   └────┘

use std::io::{self, Write};

use tracing::warn;
use ttyfx_term::ansi;

use crate::error::{Error, Result};

pub const TOP_LEFT: char = '┌';
pub const TOP: char = '─';
pub const TOP_RIGHT: char = '┐';
pub const LEFT: char = '│';
pub const INNER: char = ' ';
pub const RIGHT: char = '│';
pub const BOTTOM_LEFT: char = '└';
pub const BOTTOM: char = '─';
pub const BOTTOM_RIGHT: char = '┘';

/// Draw a `width × height` box starting at the cursor.
///
/// Sizes below 2 are not rejected; the edge fill simply runs zero times.
/// Use [`shell_checked`] to refuse them instead.
pub fn shell(w: &mut impl Write, width: u16, height: u16) -> io::Result<()> {
    let inner = width.saturating_sub(2);

    row(w, TOP_LEFT, TOP, TOP_RIGHT, inner)?;

    for _ in 0..height.saturating_sub(2) {
        next_row(w, width)?;
        row(w, LEFT, INNER, RIGHT, inner)?;
    }

    next_row(w, width)?;
    row(w, BOTTOM_LEFT, BOTTOM, BOTTOM_RIGHT, inner)
}

/// [`shell`], after checking that both dimensions are at least 2.
///
/// # Errors
///
/// [`Error::InvalidDimension`] before anything is written, or
/// [`Error::Io`] if the sink fails.
pub fn shell_checked(w: &mut impl Write, width: u16, height: u16) -> Result<()> {
    if width < 2 || height < 2 {
        warn!(width, height, "refusing to draw undersized shell");
        return Err(Error::InvalidDimension { width, height });
    }
    shell(w, width, height)?;
    Ok(())
}

fn row(w: &mut impl Write, first: char, fill: char, last: char, inner: u16) -> io::Result<()> {
    ansi::glyph(w, first)?;
    ansi::glyphs(w, fill, inner)?;
    ansi::glyph(w, last)
}

fn next_row(w: &mut impl Write, width: u16) -> io::Result<()> {
    ansi::cursor_left(w, width)?;
    ansi::cursor_down(w, 1)
}
