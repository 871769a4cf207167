// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Defects and resource limits. Ordinary parse failures are [`Failure`] values, not errors.
//!
//! [`Failure`]: ../struct.Failure.html

use crate::position::Index;

/// An `enum` of the conditions that halt a parse session or prevent a grammar from being built.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A character class pattern could not be compiled.
    #[error("invalid character class `{pattern}`")]
    InvalidCharClass {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// A one-or-more repetition matched nothing, yet its parser succeeded when re-run at the same
    /// position. Parsers must be pure for memoization to be sound.
    #[error("inconsistent repetition at {position}: parser succeeded after matching nothing")]
    InconsistentRepetition { position: Index },
    /// An ordered choice was built with no alternatives.
    #[error("empty choice at {position}")]
    EmptyChoice { position: Index },
    /// The configured call limit was reached.
    #[error("call limit reached at {position}")]
    CallLimitReached { position: Index },
}

impl Error {
    /// Returns the position the session was halted at, if the error stems from a parse.
    pub fn position(&self) -> Option<Index> {
        match *self {
            Error::InvalidCharClass { .. } => None,
            Error::InconsistentRepetition { position }
            | Error::EmptyChoice { position }
            | Error::CallLimitReached { position } => Some(position),
        }
    }
}
