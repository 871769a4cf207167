// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Grammars written against the `packrat` runtime.

use std::fmt::Debug;

use packrat::{Failure, Index, Value};

pub mod calculator;
pub mod csv;

/// Everything that can go wrong between input text and a grammar's result.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    /// The input does not match the grammar.
    #[error("{expected} at {position}")]
    Syntax { expected: String, position: Index },
    /// The parse session was halted.
    #[error(transparent)]
    Engine(#[from] packrat::Error),
    #[error("division by zero at {position}")]
    DivisionByZero { position: Index },
    #[error("invalid number `{text}` at {position}")]
    InvalidNumber { text: String, position: Index },
    #[error("unrecognized match `{text}` at {position}")]
    Malformed { text: String, position: Index },
}

impl GrammarError {
    pub(crate) fn from_failure<N: Debug>(failure: &Failure<'_, N>) -> Self {
        GrammarError::Syntax {
            expected: failure.expected.to_string(),
            position: failure.position,
        }
    }

    /// Returns where in the input the error was found, if known.
    pub fn position(&self) -> Option<Index> {
        match self {
            GrammarError::Syntax { position, .. }
            | GrammarError::DivisionByZero { position }
            | GrammarError::InvalidNumber { position, .. }
            | GrammarError::Malformed { position, .. } => Some(*position),
            GrammarError::Engine(error) => error.position(),
        }
    }
}

// The `n`th element of a sequence value, or `Empty` if there is none.
pub(crate) fn nth<'i, N: Clone>(value: &Value<'i, N>, n: usize) -> Value<'i, N> {
    value
        .as_seq()
        .and_then(|values| values.get(n))
        .cloned()
        .unwrap_or(Value::Empty)
}
