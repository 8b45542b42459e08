// SPDX-License-Identifier: MIT
//
// Stream consumers on their own threads.
//
// A spinner or progress bar blocks on its input stream. These helpers move
// that loop onto a named background thread and hand the caller the sending
// half of a channel:
//
//   let (tx, handle) = spawn_progress_bar(io::stdout(), 40);
//   tx.send(total)?;            // denominator
//   tx.send(done)?;             // ... as work completes
//   drop(tx);                   // close the stream: the thread exits
//   let (stdout, bar) = handle.join().unwrap()?;
//
// Dropping every sender is the only way to stop a consumer. The sink moves
// into the thread and comes back through the join handle, so nothing else
// can write to it in between.

use std::io::{self, Write};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use crate::progress::{self, ProgressBar};
use crate::spinner;

/// Run [`spinner::spinner`] on a background thread.
///
/// # Panics
///
/// Panics if the OS cannot spawn a new thread.
#[must_use]
pub fn spawn_spinner<W>(mut sink: W) -> (Sender<u32>, JoinHandle<io::Result<W>>)
where
    W: Write + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("ttyfx-spinner".into())
        .spawn(move || {
            spinner::spinner(&mut sink, rx)?;
            sink.flush()?;
            Ok(sink)
        })
        .expect("failed to spawn spinner thread");
    (tx, handle)
}

/// Run [`progress::progress_bar`] on a background thread.
///
/// The first value sent is the denominator. The join handle returns the
/// sink and the bar's final state.
///
/// # Panics
///
/// Panics if the OS cannot spawn a new thread.
#[must_use]
pub fn spawn_progress_bar<W>(
    mut sink: W,
    width: u16,
) -> (Sender<u32>, JoinHandle<io::Result<(W, ProgressBar)>>)
where
    W: Write + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("ttyfx-progress".into())
        .spawn(move || {
            let bar = progress::progress_bar(&mut sink, width, rx)?;
            sink.flush()?;
            Ok((sink, bar))
        })
        .expect("failed to spawn progress bar thread");
    (tx, handle)
}
