// SPDX-License-Identifier: MIT
//
// Incremental progress bar.
//
// The bar is a `width`-column strip of light shade that fills with solid
// blocks from the left. Its input is a stream of integers in which the
// first value is the denominator (`max`) and every later value is a
// numerator sample against it.
//
// Redraw rule:
//
//   filled   = floor(value · width / max)
//   boundary = width - filled           (unfilled columns left)
//
//   `last` holds the boundary as of the previous redraw, starting at
//   `width`. An update writes blocks only when it moves the boundary
//   below `last`, and then only `last - boundary` of them, continuing
//   from where the cursor was left. An update that doesn't cross a whole
//   column, or that computes zero filled columns, writes nothing.
//
// So a tick costs O(Δ) glyphs, never a repaint, and `last` only goes
// down. It reaches 0 exactly when a value reaches `max`.
//
// Closing the stream early leaves the bar partly filled. `finish` fills
// the rest, but only when the caller asks.

use std::io::{self, Write};

use tracing::{debug, trace, warn};
use ttyfx_term::ansi;

use crate::error::{Error, Result};

/// Background glyph (light shade).
pub const SHADE: char = '░';
/// Filled glyph.
pub const BLOCK: char = '▋';

/// State of one bar between updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    width: u16,
    /// Denominator, set by the first value fed in.
    max: Option<u32>,
    /// Unfilled columns remaining at the last redraw.
    last: u16,
}

impl ProgressBar {
    /// Draw the empty bar and return the cursor to its left edge.
    pub fn begin(w: &mut impl Write, width: u16) -> io::Result<Self> {
        ansi::glyphs(w, SHADE, width)?;
        ansi::cursor_left(w, width)?;
        Ok(Self {
            width,
            max: None,
            last: width,
        })
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// The denominator, once the first value has been received.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> Option<u32> {
        self.max
    }

    /// Columns still unfilled.
    #[inline]
    #[must_use]
    pub const fn last(&self) -> u16 {
        self.last
    }

    /// Columns per unit of progress (`width / max`).
    #[must_use]
    pub fn step(&self) -> Option<f64> {
        self.max.map(|max| f64::from(self.width) / f64::from(max))
    }

    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.last == 0
    }

    /// Feed the next stream value. Returns how many blocks were written.
    ///
    /// The first call only records the denominator. A denominator of 0 is
    /// not rejected: a value of 0 then fills nothing and any positive value
    /// fills the whole bar.
    pub fn update(&mut self, w: &mut impl Write, value: u32) -> io::Result<u16> {
        let Some(max) = self.max else {
            debug!(max = value, width = self.width, "progress denominator");
            self.max = Some(value);
            self.last = self.width;
            return Ok(0);
        };

        let filled = self.filled(value, max);
        let boundary = self.width - filled;
        if filled == 0 || boundary >= self.last {
            trace!(value, filled, last = self.last, "progress unchanged");
            return Ok(0);
        }

        let delta = self.last - boundary;
        ansi::glyphs(w, BLOCK, delta)?;
        trace!(value, filled, delta, "progress redraw");
        self.last = boundary;
        Ok(delta)
    }

    /// Fill every column still unfilled.
    ///
    /// Not called by [`progress_bar`]; a stream that closes early leaves the
    /// bar as it was.
    pub fn finish(&mut self, w: &mut impl Write) -> io::Result<()> {
        ansi::glyphs(w, BLOCK, self.last)?;
        self.last = 0;
        Ok(())
    }

    /// `floor(value · width / max)`, capped at `width`.
    ///
    /// Multiplying before dividing keeps `value == max` exact.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn filled(&self, value: u32, max: u32) -> u16 {
        let exact = f64::from(value) * f64::from(self.width) / f64::from(max);
        // NaN (0 / 0) saturates to 0, infinity to u16::MAX.
        (exact.floor() as u16).min(self.width)
    }
}

/// Draw a bar of `width` columns and drive it from `values` until the
/// stream closes.
///
/// The first value is the denominator. Returns the final state so the
/// caller can inspect it or [`finish`](ProgressBar::finish) it.
pub fn progress_bar(
    w: &mut impl Write,
    width: u16,
    values: impl IntoIterator<Item = u32>,
) -> io::Result<ProgressBar> {
    let mut bar = ProgressBar::begin(w, width)?;
    w.flush()?;
    for value in values {
        if bar.update(w, value)? > 0 {
            w.flush()?;
        }
    }
    debug!(last = bar.last, "progress stream closed");
    Ok(bar)
}

/// [`progress_bar`] that refuses a zero width or a zero denominator.
///
/// # Errors
///
/// [`Error::InvalidDimension`] if `width` is 0 (nothing is written),
/// [`Error::InvalidDenominator`] if the first value is 0 (the empty bar has
/// already been drawn), or [`Error::Io`] if the sink fails.
pub fn progress_bar_checked(
    w: &mut impl Write,
    width: u16,
    values: impl IntoIterator<Item = u32>,
) -> Result<ProgressBar> {
    if width == 0 {
        warn!("refusing to draw zero-width progress bar");
        return Err(Error::InvalidDimension { width, height: 1 });
    }

    let mut values = values.into_iter();
    let mut bar = ProgressBar::begin(w, width)?;
    w.flush()?;

    match values.next() {
        Some(0) => {
            warn!("progress stream opened with a zero denominator");
            return Err(Error::InvalidDenominator);
        }
        Some(max) => {
            bar.update(w, max)?;
        }
        None => return Ok(bar),
    }

    for value in values {
        if bar.update(w, value)? > 0 {
            w.flush()?;
        }
    }
    debug!(last = bar.last, "progress stream closed");
    Ok(bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ttyfx_term::screen::Screen;

    fn blocks(n: usize) -> String {
        BLOCK.to_string().repeat(n)
    }

    /// A screen with a bar begun at column 2 of row 0.
    fn begun(width: u16) -> (Screen, ProgressBar) {
        let mut screen = Screen::new(width + 4, 1);
        screen.feed(b"[ ");
        let bar = ProgressBar::begin(&mut screen, width).unwrap();
        (screen, bar)
    }

    // ── Initial state ───────────────────────────────────────────────────

    #[test]
    fn begin_draws_background_and_returns() {
        let mut buf = Vec::new();
        let bar = ProgressBar::begin(&mut buf, 4).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "░░░░\x1b[4D");
        assert_eq!(bar.last(), 4);
        assert_eq!(bar.max(), None);
        assert_eq!(bar.step(), None);
    }

    #[test]
    fn first_value_is_the_denominator() {
        let mut buf = Vec::new();
        let mut bar = ProgressBar::begin(&mut buf, 10).unwrap();
        buf.clear();
        assert_eq!(bar.update(&mut buf, 40).unwrap(), 0);
        assert!(buf.is_empty());
        assert_eq!(bar.max(), Some(40));
        assert_eq!(bar.step(), Some(0.25));
        assert_eq!(bar.last(), 10);
    }

    // ── Redraw rule ─────────────────────────────────────────────────────

    #[test]
    fn monotonic_fill_to_max() {
        let mut buf = Vec::new();
        let mut bar = ProgressBar::begin(&mut buf, 20).unwrap();
        bar.update(&mut buf, 100).unwrap();

        let mut lasts = vec![bar.last()];
        for value in [0, 10, 25, 50, 100] {
            bar.update(&mut buf, value).unwrap();
            lasts.push(bar.last());
        }

        assert_eq!(lasts, vec![20, 20, 18, 15, 10, 0]);
        assert!(lasts.windows(2).all(|p| p[1] <= p[0]));
        assert!(bar.is_complete());

        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.matches(BLOCK).count(), 20);
    }

    #[test]
    fn last_hits_zero_only_at_max() {
        let mut bar = ProgressBar::begin(&mut io::sink(), 7).unwrap();
        let mut sink = Vec::new();
        bar.update(&mut sink, 3).unwrap();
        bar.update(&mut sink, 2).unwrap();
        assert!(!bar.is_complete());
        bar.update(&mut sink, 3).unwrap();
        assert!(bar.is_complete());
        assert_eq!(sink.len(), 7 * BLOCK.len_utf8());
    }

    #[test]
    fn no_advance_writes_nothing() {
        let mut buf = Vec::new();
        let mut bar = ProgressBar::begin(&mut buf, 10).unwrap();
        bar.update(&mut buf, 100).unwrap();
        assert_eq!(bar.update(&mut buf, 30).unwrap(), 3);
        buf.clear();

        // Still 3 columns: same boundary as `last`.
        assert_eq!(bar.update(&mut buf, 35).unwrap(), 0);
        // Going backwards never un-fills.
        assert_eq!(bar.update(&mut buf, 10).unwrap(), 0);
        // Less than one column computes to zero filled.
        assert_eq!(bar.update(&mut buf, 9).unwrap(), 0);
        assert!(buf.is_empty());
        assert_eq!(bar.last(), 7);
    }

    #[test]
    fn zero_value_writes_nothing() {
        let mut buf = Vec::new();
        let mut bar = ProgressBar::begin(&mut buf, 10).unwrap();
        bar.update(&mut buf, 5).unwrap();
        buf.clear();
        assert_eq!(bar.update(&mut buf, 0).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn denominator_one_fills_in_one_step() {
        let mut buf = Vec::new();
        let mut bar = ProgressBar::begin(&mut buf, 12).unwrap();
        bar.update(&mut buf, 1).unwrap();
        buf.clear();
        assert_eq!(bar.update(&mut buf, 1).unwrap(), 12);
        assert_eq!(bar.last(), 0);
        assert_eq!(String::from_utf8(buf).unwrap(), blocks(12));
    }

    #[test]
    fn fractional_step() {
        // 10 columns over 3 units: 3.33 columns per unit.
        let mut bar = ProgressBar::begin(&mut io::sink(), 10).unwrap();
        let mut sink = Vec::new();
        bar.update(&mut sink, 3).unwrap();
        assert_eq!(bar.update(&mut sink, 1).unwrap(), 3);
        assert_eq!(bar.update(&mut sink, 2).unwrap(), 3);
        assert_eq!(bar.update(&mut sink, 3).unwrap(), 4);
        assert!(bar.is_complete());
    }

    #[test]
    fn values_past_max_cap_at_width() {
        let mut bar = ProgressBar::begin(&mut io::sink(), 8).unwrap();
        let mut sink = Vec::new();
        bar.update(&mut sink, 10).unwrap();
        assert_eq!(bar.update(&mut sink, 50).unwrap(), 8);
        assert_eq!(bar.last(), 0);
    }

    #[test]
    fn zero_denominator_is_not_rejected() {
        let mut bar = ProgressBar::begin(&mut io::sink(), 5).unwrap();
        let mut sink = Vec::new();
        bar.update(&mut sink, 0).unwrap();
        assert_eq!(bar.update(&mut sink, 0).unwrap(), 0);
        assert_eq!(bar.update(&mut sink, 1).unwrap(), 5);
    }

    // ── On screen ───────────────────────────────────────────────────────

    #[test]
    fn fills_left_to_right_in_place() {
        let (mut screen, mut bar) = begun(10);
        assert_eq!(screen.line(0), "[ ░░░░░░░░░░");
        assert_eq!(screen.cursor(), (2, 0));

        bar.update(&mut screen, 4).unwrap();
        bar.update(&mut screen, 1).unwrap();
        assert_eq!(screen.line(0), format!("[ {}{}", blocks(2), "░".repeat(8)));

        bar.update(&mut screen, 3).unwrap();
        assert_eq!(screen.line(0), format!("[ {}{}", blocks(7), "░".repeat(3)));
        assert_eq!(screen.cursor(), (9, 0));

        bar.update(&mut screen, 4).unwrap();
        assert_eq!(screen.line(0), format!("[ {}", blocks(10)));
        assert_eq!(screen.count(SHADE), 0);
    }

    #[test]
    fn early_close_leaves_bar_partial() {
        let mut screen = Screen::new(12, 1);
        let bar = progress_bar(&mut screen, 10, [10, 2, 5]).unwrap();
        assert_eq!(bar.last(), 5);
        assert_eq!(screen.count(BLOCK), 5);
        assert_eq!(screen.count(SHADE), 5);
    }

    #[test]
    fn finish_fills_the_rest() {
        let mut screen = Screen::new(12, 1);
        let mut bar = progress_bar(&mut screen, 10, [10, 2, 5]).unwrap();
        bar.finish(&mut screen).unwrap();
        assert!(bar.is_complete());
        assert_eq!(screen.line(0), blocks(10));
        assert_eq!(screen.cursor(), (10, 0));

        // Nothing left to fill.
        let mut buf = Vec::new();
        bar.finish(&mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn drives_from_a_channel() {
        let (tx, rx) = std::sync::mpsc::channel();
        for v in [4, 1, 2, 3, 4] {
            tx.send(v).unwrap();
        }
        drop(tx);

        let mut screen = Screen::new(10, 1);
        let bar = progress_bar(&mut screen, 8, rx).unwrap();
        assert!(bar.is_complete());
        assert_eq!(screen.line(0), blocks(8));
    }

    // ── Checked ─────────────────────────────────────────────────────────

    #[test]
    fn checked_rejects_zero_width() {
        let mut buf = Vec::new();
        let err = progress_bar_checked(&mut buf, 0, [10, 5]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { width: 0, .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn checked_rejects_zero_denominator() {
        let mut buf = Vec::new();
        let err = progress_bar_checked(&mut buf, 4, [0, 1]).unwrap_err();
        assert!(matches!(err, Error::InvalidDenominator));
        assert_eq!(String::from_utf8(buf).unwrap(), "░░░░\x1b[4D");
    }

    #[test]
    fn checked_matches_unchecked() {
        let values = [20, 3, 9, 14, 20];
        let mut a = Vec::new();
        let mut b = Vec::new();
        let bar_a = progress_bar(&mut a, 15, values).unwrap();
        let bar_b = progress_bar_checked(&mut b, 15, values).unwrap();
        assert_eq!(a, b);
        assert_eq!(bar_a, bar_b);
    }

    #[test]
    fn checked_empty_stream() {
        let mut buf = Vec::new();
        let bar = progress_bar_checked(&mut buf, 3, std::iter::empty()).unwrap();
        assert_eq!(bar.max(), None);
        assert_eq!(bar.last(), 3);
    }
}
