// SPDX-License-Identifier: MIT
//
// Spinner — a one-column rotating indicator.

use std::io::{self, Write};

use tracing::{debug, trace};
use ttyfx_term::ansi;

/// The rotation, indexed by `tick % 4`.
pub const GLYPHS: [char; 4] = ['|', '/', '-', '\\'];

/// Glyph shown for a given tick.
#[inline]
#[must_use]
pub const fn glyph_for(tick: u32) -> char {
    GLYPHS[(tick % 4) as usize]
}

/// Step back one column and draw the glyph for `tick`.
pub fn spinner_frame(w: &mut impl Write, tick: u32) -> io::Result<()> {
    ansi::backspace(w)?;
    ansi::glyph(w, glyph_for(tick))
}

/// Draw one frame per value until the stream closes.
///
/// Only `value % 4` matters. The sink is flushed after every frame so the
/// rotation is visible on line-buffered outputs.
pub fn spinner(w: &mut impl Write, ticks: impl IntoIterator<Item = u32>) -> io::Result<()> {
    let mut frames = 0u64;
    for tick in ticks {
        trace!(tick, "spinner frame");
        spinner_frame(w, tick)?;
        w.flush()?;
        frames += 1;
    }
    debug!(frames, "spinner stream closed");
    Ok(())
}
