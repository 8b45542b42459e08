// SPDX-License-Identifier: MIT
//
// Aligned text inside a bordered field.
//
// The field is `width` columns including one border column on each side.
// The renderer blanks `width - 2` columns from the cursor, steps back
// `width` columns, then forward by the alignment offset plus the 2-column
// border inset, and prints the text as-is. Where the cursor ends up
// depends on the text's length.

use std::io::{self, Write};

use ttyfx_term::ansi;

use crate::layout::{self, Align};

/// Filler written over the field interior before the text.
pub const FILL: char = ' ';

/// Clear a field interior and write `text` aligned inside it.
///
/// The text is neither escaped nor truncated. A negative alignment
/// offset large enough to make the inset negative results in a zero-count
/// rightward move.
pub fn text(w: &mut impl Write, width: u16, align: Align, text: &str) -> io::Result<()> {
    ansi::glyphs(w, FILL, width.saturating_sub(2))?;
    ansi::cursor_left(w, width)?;

    let shift = layout::offset(align, width, text).saturating_add(2);
    ansi::cursor_right(w, u16::try_from(shift.max(0)).unwrap_or(u16::MAX))?;

    w.write_all(text.as_bytes())
}
