// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! # packrat. A memoizing PEG runtime
//!
//! A small algebra of parser functions plus a memo store that makes the composed grammar run in
//! linear time despite unrestricted backtracking.
//!
//! A grammar is a set of named rules. Each rule is a plain function that goes through
//! [`ParserState::rule`] (or [`rule_with`], to build an AST node from the match), and whose body
//! is composed from the [`matchers`] and [`combinators`]:
//!
//! ```
//! use packrat::{
//!     char_class, literal, one_or_more, sequence, state, Index, ParseResult, ParserState, Value,
//! };
//!
//! fn word<'i>(s: &mut ParserState<'i, ()>, input: &'i str, pos: Index) -> ParseResult<'i, ()> {
//!     s.rule("word", input, pos, sequence![one_or_more(char_class!("a")), literal("b")])
//! }
//!
//! let success = state("aab", word).unwrap().unwrap();
//!
//! assert_eq!(
//!     success.value,
//!     Value::seq(vec![
//!         Value::seq(vec![Value::Text("a"), Value::Text("a")]),
//!         Value::Text("b"),
//!     ])
//! );
//! assert!(success.is_complete());
//! assert_eq!(success.position, Index::new(1, 4));
//! ```
//!
//! Failures are values: every parser returns a [`Failure`] describing what it expected and where,
//! and ordered choice reports the failure of its first alternative. Only defects and the
//! configured call limit halt a session with an [`Error`].
//!
//! [`ParserState::rule`]: struct.ParserState.html#method.rule
//! [`rule_with`]: struct.ParserState.html#method.rule_with
//! [`matchers`]: matchers/index.html
//! [`combinators`]: combinators/index.html
//! [`Failure`]: struct.Failure.html
//! [`Error`]: enum.Error.html

#![doc(html_root_url = "https://docs.rs/packrat")]

#[doc(hidden)]
pub use once_cell;

#[macro_use]
mod macros;

pub mod combinators;
mod config;
mod error;
pub mod matchers;
mod memo;
mod parser;
mod parser_state;
mod position;
mod result;

pub use crate::combinators::{
    and, choice, negative_lookahead, one_or_more, optional, positive_lookahead, scan, sequence,
    zero_or_more,
};
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::matchers::{
    any_char, end_of_input, end_of_line, insensitive, literal, range, CharClass,
};
pub use crate::memo::{MemoStats, MemoStore};
pub use crate::parser::{boxed, from_fn, BoxedParser, Parser};
pub use crate::parser_state::{identity, state, state_with, ParserState};
pub use crate::position::{advance, Index, LINE_TERMINATOR};
pub use crate::result::{Expected, Failure, ParseResult, Success, Value};
