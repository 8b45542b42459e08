// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write one escape sequence (or one literal glyph) to
// any `impl Write`. No state and no decisions: the caller decides when to
// emit, these functions only know the byte-level encoding.
//
// Cursor motion is relative (CUU/CUD/CUF/CUB) except for `cursor_position`,
// which takes 1-based coordinates exactly as the terminal expects them.
// A count of 0 is written verbatim; most terminals treat it as 1.
//
// All functions return `io::Result` propagated from the underlying writer.
use std::io::{self, Write};

use crate::style::{Attr, Bg, Fg};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor up `n` rows (CUU).
#[inline]
pub fn cursor_up(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}A")
}

/// Move the cursor down `n` rows (CUD).
#[inline]
pub fn cursor_down(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}B")
}

/// Move the cursor right `n` columns (CUF).
#[inline]
pub fn cursor_right(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}C")
}

/// Move the cursor left `n` columns (CUB).
#[inline]
pub fn cursor_left(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}D")
}

/// Move the cursor to column `col`, row `row` (HVP).
///
/// Both coordinates are 1-based, per ANSI convention. Note the argument
/// order: column first, but the sequence carries the row first.
#[inline]
pub fn cursor_position(w: &mut impl Write, col: u16, row: u16) -> io::Result<()> {
    write!(w, "\x1b[{row};{col}f")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn hide_cursor(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn show_cursor(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Save the cursor position into the terminal's single save slot.
#[inline]
pub fn save_cursor(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[s")
}

/// Restore the cursor position saved by [`save_cursor`].
///
/// Restoring with nothing saved is left to the terminal.
#[inline]
pub fn restore_cursor(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[u")
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// Set foreground and background together in one SGR sequence.
#[inline]
pub fn colors(w: &mut impl Write, fg: Fg, bg: Bg) -> io::Result<()> {
    write!(w, "\x1b[{};{}m", fg.code(), bg.code())
}

/// Set a single text attribute.
#[inline]
pub fn attribute(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    write!(w, "\x1b[{}m", attr.code())
}

/// Reset every attribute and color to the terminal defaults (SGR 0).
///
/// Stateless: two calls write two identical sequences.
#[inline]
pub fn reset_attributes(w: &mut impl Write) -> io::Result<()> {
    attribute(w, Attr::Normal)
}

// ─── Terminal ────────────────────────────────────────────────────────────────

/// Full terminal reset (RIS). Clears the screen and resets all modes.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1bc")
}

// ─── Glyphs ──────────────────────────────────────────────────────────────────

/// Write one literal character, UTF-8 encoded.
#[inline]
pub fn glyph(w: &mut impl Write, ch: char) -> io::Result<()> {
    let mut enc = [0u8; 4];
    w.write_all(ch.encode_utf8(&mut enc).as_bytes())
}

/// Write the same character `n` times.
pub fn glyphs(w: &mut impl Write, ch: char, n: u16) -> io::Result<()> {
    let mut enc = [0u8; 4];
    let bytes = ch.encode_utf8(&mut enc).as_bytes();
    for _ in 0..n {
        w.write_all(bytes)?;
    }
    Ok(())
}

/// Backspace (BS, 0x08): move the cursor one column left without erasing.
#[inline]
pub fn backspace(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x08")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
