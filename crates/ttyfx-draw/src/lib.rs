// SPDX-License-Identifier: MIT
//
// ttyfx-draw — framed UI primitives drawn with relative cursor motion.
//
// Everything here writes straight to a caller-supplied `impl Write`, one
// sequence at a time, and trusts the terminal's cursor to stay where the
// previous sequence left it. No absolute positioning, no screen model, no
// buffering. Two pieces carry real logic:
//
//   shell    — a width × height box drawn row by row, stepping back to the
//              left edge and down one line between rows.
//   progress — a bar that fills only the columns crossed since the last
//              update, so a tick costs O(Δ) instead of a full repaint.
//
// The remaining modules (layout, text, spinner) are thin, and `task` runs
// the stream consumers on their own threads so producers can cancel by
// dropping their sender.

pub mod error;
pub mod layout;
pub mod progress;
pub mod shell;
pub mod spinner;
pub mod task;
pub mod text;

pub use error::{Error, Result};
pub use layout::Align;
pub use progress::ProgressBar;
