// SPDX-License-Identifier: MIT
//
// ttyfx-term — escape-sequence layer for ttyfx.
//
// The bottom of the stack: pure functions that encode VT100/ANSI control
// sequences onto any `impl Write`, the small set of style types those
// sequences carry, and a virtual screen that plays the sequences back
// into a cell grid so drawing code can be tested without a real terminal.
//
// No terminal detection, no raw mode, no buffering. The caller owns the
// sink and the cursor; we only know the bytes.

pub mod ansi;
pub mod screen;
pub mod style;
