// SPDX-License-Identifier: MIT
//
// Errors for the checked drawing entry points.
//
// The plain renderers only propagate `io::Error` from the sink and never
// inspect their geometry. The `_checked` variants validate first and use
// this type to say why they refused.

use std::io;

use thiserror::Error;

/// Why a checked drawing operation failed.
#[derive(Debug, Error)]
pub enum Error {
    /// The sink rejected a write.
    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),

    /// A frame or bar too small to draw.
    #[error("invalid dimension {width}x{height}")]
    InvalidDimension { width: u16, height: u16 },

    /// A progress stream whose first value (the denominator) was 0.
    #[error("progress denominator must be non-zero")]
    InvalidDenominator,
}

pub type Result<T> = std::result::Result<T, Error>;
