// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::position::Index;

/// The payload of a successful match.
///
/// `N` is the node type a grammar author's transforms produce; the engine never looks inside it.
///
/// Sequences and nodes are reference counted, so cloning a value (as the memo store does on every
/// insert and hit) never copies the subtree under it.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Value<'i, N> {
    /// A run of the input matched by a class or a literal.
    Text(&'i str),
    /// A single character matched by `any_char` or `range`.
    Char(char),
    /// The ordered values of a repetition or a sequence.
    Seq(Rc<[Value<'i, N>]>),
    /// What `optional` produces when its parser fails.
    Empty,
    /// The sentinel produced by `end_of_input`.
    Eof,
    /// A node built by a rule transform.
    Node(Rc<N>),
}

impl<'i, N> Value<'i, N> {
    /// Wraps `values` as a `Seq`.
    #[inline]
    pub fn seq(values: Vec<Value<'i, N>>) -> Self {
        Value::Seq(values.into())
    }

    /// Wraps `node` as a `Node`.
    #[inline]
    pub fn node(node: N) -> Self {
        Value::Node(Rc::new(node))
    }

    /// Returns the matched text when `self` is `Text`.
    pub fn as_str(&self) -> Option<&'i str> {
        match *self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the inner values when `self` is `Seq`.
    pub fn as_seq(&self) -> Option<&[Value<'i, N>]> {
        match self {
            Value::Seq(values) => Some(&values[..]),
            _ => None,
        }
    }

    /// Returns a copy of the inner values when `self` is `Seq`. Only the outer list is copied.
    pub fn into_seq(self) -> Option<Vec<Value<'i, N>>>
    where
        N: Clone,
    {
        match self {
            Value::Seq(values) => Some(values.to_vec()),
            _ => None,
        }
    }

    /// Returns the node when `self` is `Node`.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            Value::Node(node) => Some(&**node),
            _ => None,
        }
    }

    /// Consumes `self` and returns the shared node when it is `Node`.
    pub fn into_node(self) -> Option<Rc<N>> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Concatenates every piece of matched text under `self`, in order. Nodes contribute nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packrat::Value;
    /// let value: Value<'_, ()> = Value::seq(vec![
    ///     Value::Text("ab"),
    ///     Value::seq(vec![Value::Char('c'), Value::Empty]),
    /// ]);
    ///
    /// assert_eq!(value.flatten(), "abc");
    /// ```
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut String) {
        match self {
            Value::Text(text) => out.push_str(text),
            Value::Char(c) => out.push(*c),
            Value::Seq(values) => values.iter().for_each(|v| v.flatten_into(out)),
            Value::Empty | Value::Eof | Value::Node(_) => {}
        }
    }
}

impl<'i, N: fmt::Debug> fmt::Display for Value<'i, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{:?}", text),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Seq(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
            Value::Empty => f.write_str("()"),
            Value::Eof => f.write_str("eof"),
            Value::Node(node) => write!(f, "{:?}", node),
        }
    }
}

/// What a failing parser expected to see.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Expected<'i, N> {
    /// A character class, by its pattern.
    CharClass(String),
    /// An exact string.
    Literal(String),
    /// Any character at all, i.e. the input was empty.
    AnyChar,
    /// The end of the input.
    Eof,
    /// At least one match of a repeated parser, wrapping why its first attempt failed.
    AtLeastOne(Box<Expected<'i, N>>),
    /// Nothing matching; carries what a negative lookahead's parser did match.
    NoMatch(Value<'i, N>),
    /// The session was halted by a defect or a resource limit. Never reported to callers of
    /// [`state`](fn.state.html); they receive the halting [`Error`](enum.Error.html) instead.
    Aborted,
}

impl<'i, N: fmt::Debug> fmt::Display for Expected<'i, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::CharClass(pattern) => write!(f, "expected character-class {}", pattern),
            Expected::Literal(string) => write!(f, "expected string {}", string),
            Expected::AnyChar => f.write_str("expected any-character"),
            Expected::Eof => f.write_str("expected eof"),
            Expected::AtLeastOne(inner) => write!(f, "expected at-least-one of ({})", inner),
            Expected::NoMatch(value) => write!(f, "expected no-match of {}", value),
            Expected::Aborted => f.write_str("parsing aborted"),
        }
    }
}

/// A successful match: the value, the input left over and the position after the match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Success<'i, N> {
    pub value: Value<'i, N>,
    pub rest: &'i str,
    pub position: Index,
}

impl<'i, N> Success<'i, N> {
    #[inline]
    pub fn new(value: Value<'i, N>, rest: &'i str, position: Index) -> Self {
        Success {
            value,
            rest,
            position,
        }
    }

    /// Returns `true` if the match consumed the whole input.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.rest.is_empty()
    }

    /// Generates a pretty-printed JSON rendering of the value, the rest and the position.
    pub fn to_json(&self) -> Result<String, serde_json::Error>
    where
        N: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}

/// A failed match. Failures never consume input: `position` is where the failing parser started.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Failure<'i, N> {
    pub expected: Expected<'i, N>,
    pub position: Index,
}

impl<'i, N> Failure<'i, N> {
    #[inline]
    pub fn new(expected: Expected<'i, N>, position: Index) -> Self {
        Failure { expected, position }
    }
}

impl<'i, N: fmt::Debug> fmt::Display for Failure<'i, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.expected, self.position)
    }
}

/// The result of every parser function.
pub type ParseResult<'i, N> = Result<Success<'i, N>, Failure<'i, N>>;
