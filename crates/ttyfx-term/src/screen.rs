// SPDX-License-Identifier: MIT
//
// Screen — a virtual terminal that plays escape sequences back into a grid.
//
// Drawing code in ttyfx never tracks where the cursor is; it trusts the
// terminal to be exactly where the last sequence left it. Asserting on raw
// bytes alone can't check that trust, so tests write into a `Screen`
// instead: it implements `io::Write`, parses everything the `ansi` module
// can produce, and maintains a cursor, a pen (colors + attribute), a save
// slot and a cell grid. After rendering, the test inspects what a user
// would actually see.
//
// Model:
//
//   - Fixed size, no scrolling, no autowrap. Printing at the right edge
//     drops the glyph and parks the cursor one past the last column.
//   - Relative moves clamp to the grid. A count of 0 counts as 1, the
//     way VT100-family terminals read it.
//   - Bytes may arrive split at any point; incomplete sequences and
//     partial UTF-8 are held until the rest shows up.
//   - Sequences it doesn't understand are consumed and ignored.

use std::fmt;
use std::io::{self, Write};

use unicode_width::UnicodeWidthChar;

use crate::style::{Attr, Color};

// ─── Pen & Cell ──────────────────────────────────────────────────────────────

/// The drawing state applied to every printed glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pen {
    /// Foreground hue, `None` for the terminal default.
    pub fg: Option<Color>,
    /// Background hue, `None` for the terminal default.
    pub bg: Option<Color>,
    /// The most recently selected attribute.
    pub attr: Attr,
}

/// One character position on the virtual screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub pen: Pen,
}

impl Cell {
    /// A blank cell with the default pen.
    pub const BLANK: Self = Self {
        ch: ' ',
        pen: Pen {
            fg: None,
            bg: None,
            attr: Attr::Normal,
        },
    };
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// In-memory terminal model. See the module docs for what it emulates.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use ttyfx_term::screen::Screen;
///
/// let mut screen = Screen::new(10, 2);
/// screen.write_all(b"ab\x1b[1B\x1b[2Dcd").unwrap();
/// assert_eq!(screen.line(0), "ab");
/// assert_eq!(screen.line(1), "cd");
/// assert_eq!(screen.cursor(), (2, 1));
/// ```
pub struct Screen {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    /// Cursor column; may equal `width` after printing in the last column.
    x: u16,
    y: u16,
    saved: Option<(u16, u16)>,
    cursor_visible: bool,
    pen: Pen,
    /// Unconsumed bytes from a sequence split across writes.
    pending: Vec<u8>,
}

impl Screen {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a blank screen with the cursor at the top-left corner.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; size],
            x: 0,
            y: 0,
            saved: None,
            cursor_visible: true,
            pen: Pen::default(),
            pending: Vec::with_capacity(16),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Cursor position as 0-based `(column, row)`.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// The pen that the next printed glyph will use.
    #[inline]
    #[must_use]
    pub const fn pen(&self) -> Pen {
        self.pen
    }

    /// The saved cursor position, if any.
    #[inline]
    #[must_use]
    pub const fn saved_cursor(&self) -> Option<(u16, u16)> {
        self.saved
    }

    /// Get a cell, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// The character at `(x, y)`, or `None` if out of bounds.
    #[must_use]
    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        self.get(x, y).map(|c| c.ch)
    }

    /// Row `y` as a string with trailing blanks removed.
    #[must_use]
    pub fn line(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        let row: String = self.cells[start..start + usize::from(self.width)]
            .iter()
            .map(|c| c.ch)
            .collect();
        row.trim_end().to_owned()
    }

    /// How many cells currently hold `ch`.
    #[must_use]
    pub fn count(&self, ch: char) -> usize {
        self.cells.iter().filter(|c| c.ch == ch).count()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Feed raw output bytes and apply every complete sequence.
    ///
    /// Incomplete trailing bytes are kept and combined with the next call.
    pub fn feed(&mut self, data: &[u8]) {
        self.pending.extend_from_slice(data);
        let mut pos = 0;

        while pos < self.pending.len() {
            match try_parse(&self.pending[pos..]) {
                Parsed::Op(op, consumed) => {
                    self.apply(op);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.pending.drain(..pos);
        }
    }

    // ─── Internals ───────────────────────────────────────────────────────

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    const fn last_col(&self) -> u16 {
        self.width.saturating_sub(1)
    }

    const fn last_row(&self) -> u16 {
        self.height.saturating_sub(1)
    }

    fn apply(&mut self, op: Op) {
        match op {
            Op::Print(ch) => self.print(ch),
            Op::Backspace => self.x = self.x.saturating_sub(1).min(self.last_col()),
            Op::CarriageReturn => self.x = 0,
            Op::LineFeed => self.y = self.y.saturating_add(1).min(self.last_row()),
            Op::Up(n) => self.y = self.y.saturating_sub(n),
            Op::Down(n) => self.y = self.y.saturating_add(n).min(self.last_row()),
            Op::Right(n) => self.x = self.x.saturating_add(n).min(self.last_col()),
            Op::Left(n) => self.x = self.x.saturating_sub(n),
            Op::Position { row, col } => {
                self.y = row.saturating_sub(1).min(self.last_row());
                self.x = col.saturating_sub(1).min(self.last_col());
            }
            Op::Sgr(params) => self.select_graphic_rendition(&params),
            Op::CursorVisible(visible) => self.cursor_visible = visible,
            Op::Save => self.saved = Some((self.x, self.y)),
            Op::Restore => {
                if let Some((x, y)) = self.saved {
                    self.x = x;
                    self.y = y;
                }
            }
            Op::FullReset => {
                self.cells.fill(Cell::BLANK);
                self.x = 0;
                self.y = 0;
                self.saved = None;
                self.cursor_visible = true;
                self.pen = Pen::default();
            }
        }
    }

    fn print(&mut self, ch: char) {
        let w = ch.width().unwrap_or(0);
        if w == 0 {
            return;
        }
        if self.x < self.width && self.y < self.height {
            let idx = self.index(self.x, self.y);
            self.cells[idx] = Cell { ch, pen: self.pen };
        }
        #[allow(clippy::cast_possible_truncation)] // Char widths are 1 or 2.
        let advance = w as u16;
        self.x = self.x.saturating_add(advance).min(self.width);
    }

    fn select_graphic_rendition(&mut self, params: &[u16]) {
        if params.is_empty() {
            self.pen = Pen::default();
            return;
        }
        for &p in params {
            match p {
                0 => self.pen = Pen::default(),
                30..=37 => self.pen.fg = palette(p - 30),
                39 => self.pen.fg = None,
                40..=47 => self.pen.bg = palette(p - 40),
                49 => self.pen.bg = None,
                _ => {
                    if let Some(attr) = Attr::from_code(p) {
                        self.pen.attr = attr;
                    }
                }
            }
        }
    }
}

impl Write for Screen {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.feed(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Display for Screen {
    /// Every row, trailing blanks trimmed, joined by newlines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&self.line(y))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Screen({}x{}, cursor {:?})",
            self.width,
            self.height,
            self.cursor()
        )
    }
}

fn palette(index: u16) -> Option<Color> {
    Color::ALL.get(usize::from(index)).copied()
}

// ─── Parsing ─────────────────────────────────────────────────────────────────
//
// Pure functions: read from the front of `buf`, return what was found and
// how many bytes it took.

/// A terminal operation decoded from the byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Print(char),
    Backspace,
    CarriageReturn,
    LineFeed,
    Up(u16),
    Down(u16),
    Right(u16),
    Left(u16),
    Position { row: u16, col: u16 },
    Sgr(Vec<u16>),
    CursorVisible(bool),
    Save,
    Restore,
    FullReset,
}

enum Parsed {
    /// Decoded an operation, consuming `usize` bytes.
    Op(Op, usize),
    /// Need more bytes.
    Incomplete,
    /// Unrecognized byte(s), skip `usize` bytes (always ≥ 1).
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    match buf[0] {
        0x1B => parse_escape(buf),
        0x08 => Parsed::Op(Op::Backspace, 1),
        b'\r' => Parsed::Op(Op::CarriageReturn, 1),
        b'\n' => Parsed::Op(Op::LineFeed, 1),
        b @ 0x20..=0x7E => Parsed::Op(Op::Print(b as char), 1),
        0x00..=0x1F | 0x7F => Parsed::Skip(1),
        _ => parse_utf8(buf),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    if buf.len() < 2 {
        return Parsed::Incomplete;
    }
    match buf[1] {
        b'[' => parse_csi(buf),
        b'c' => Parsed::Op(Op::FullReset, 2),
        _ => Parsed::Skip(2),
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    // Scan for the final byte (0x40..=0x7E). Parameter bytes are
    // 0x30..=0x3F, intermediates 0x20..=0x2F.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let raw = &buf[2..end];
    let consumed = end + 1;

    let private = raw.first() == Some(&b'?');
    let params = parse_params(if private { &raw[1..] } else { raw });

    let op = match (private, final_byte) {
        (true, b'l') if params == [25] => Op::CursorVisible(false),
        (true, b'h') if params == [25] => Op::CursorVisible(true),
        (false, b'A') => Op::Up(count(&params)),
        (false, b'B') => Op::Down(count(&params)),
        (false, b'C') => Op::Right(count(&params)),
        (false, b'D') => Op::Left(count(&params)),
        (false, b'f' | b'H') => Op::Position {
            row: params.first().copied().unwrap_or(1),
            col: params.get(1).copied().unwrap_or(1),
        },
        (false, b'm') => Op::Sgr(params),
        (false, b's') => Op::Save,
        (false, b'u') => Op::Restore,
        _ => return Parsed::Skip(consumed),
    };
    Parsed::Op(op, consumed)
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = utf8_char_len(buf[0]);
    if expected == 0 {
        return Parsed::Skip(1);
    }
    if buf.len() < expected {
        return Parsed::Incomplete;
    }
    std::str::from_utf8(&buf[..expected]).map_or(Parsed::Skip(1), |s| {
        s.chars()
            .next()
            .map_or(Parsed::Skip(expected), |ch| Parsed::Op(Op::Print(ch), expected))
    })
}

/// Movement count: missing or 0 means 1.
fn count(params: &[u16]) -> u16 {
    params.first().copied().filter(|&n| n > 0).unwrap_or(1)
}

/// Parse semicolon-separated decimal parameters. Empty fields are 0.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |val, &b| {
                    val.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// Expected byte length of a UTF-8 character from its lead byte.
/// Returns 0 for invalid lead bytes.
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
