// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Leaf parsers. None of them calls another parser and none of them touches the session state.

use std::fmt;
use std::ops::RangeInclusive;

use regex::Regex;

use crate::error::Error;
use crate::parser::{from_fn, Parser};
use crate::parser_state::ParserState;
use crate::position::Index;
use crate::result::{Expected, Failure, ParseResult, Success, Value};

/// A character class compiled once from a `regex` pattern and matched anchored at the start of
/// the remaining input.
///
/// Matching is greedy, so a class such as `[0-9]+` takes the longest run available. Cloning is
/// cheap; the compiled program is shared.
///
/// # Examples
///
/// ```
/// # use packrat::{state, CharClass, Value};
/// let digits = CharClass::new("[0-9]+").unwrap();
/// let success = state::<(), _>("123abc", digits).unwrap().unwrap();
///
/// assert_eq!(success.value, Value::Text("123"));
/// assert_eq!(success.rest, "abc");
/// ```
#[derive(Clone)]
pub struct CharClass {
    pattern: String,
    regex: Regex,
}

impl CharClass {
    pub fn new(pattern: &str) -> Result<CharClass, Error> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
            Error::InvalidCharClass {
                pattern: pattern.to_owned(),
                source,
            }
        })?;

        Ok(CharClass {
            pattern: pattern.to_owned(),
            regex,
        })
    }

    /// The pattern the class was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the length in bytes of the match at the start of `input`.
    #[inline]
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex.find(input).map(|m| m.end())
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CharClass").field(&self.pattern).finish()
    }
}

impl<'i, N> Parser<'i, N> for CharClass {
    fn parse(
        &self,
        _state: &mut ParserState<'i, N>,
        input: &'i str,
        position: Index,
    ) -> ParseResult<'i, N> {
        match self.match_len(input) {
            Some(len) => {
                let (matched, rest) = input.split_at(len);
                Ok(Success::new(
                    Value::Text(matched),
                    rest,
                    position.advance(matched),
                ))
            }
            None => Err(Failure::new(
                Expected::CharClass(self.pattern.clone()),
                position,
            )),
        }
    }
}

/// Matches exactly one character.
pub fn any_char<'i, N>() -> impl Parser<'i, N> {
    from_fn(|_: &mut ParserState<'i, N>, input: &'i str, position: Index| {
        match input.chars().next() {
            Some(c) => Ok(Success::new(
                Value::Char(c),
                &input[c.len_utf8()..],
                position.advance_char(c),
            )),
            None => Err(Failure::new(Expected::AnyChar, position)),
        }
    })
}

/// Matches `string` exactly.
///
/// # Examples
///
/// ```
/// # use packrat::{literal, state, Expected, Index};
/// let failure = state::<(), _>("x", literal("a")).unwrap().unwrap_err();
///
/// assert_eq!(failure.expected, Expected::Literal("a".to_owned()));
/// assert_eq!(failure.position, Index::start());
/// ```
pub fn literal<'i, N>(string: &str) -> impl Parser<'i, N> {
    let string = string.to_owned();

    from_fn(move |_: &mut ParserState<'i, N>, input: &'i str, position: Index| {
        if input.starts_with(string.as_str()) {
            let (matched, rest) = input.split_at(string.len());
            Ok(Success::new(
                Value::Text(matched),
                rest,
                position.advance(matched),
            ))
        } else {
            Err(Failure::new(Expected::Literal(string.clone()), position))
        }
    })
}

/// Matches `string` ignoring ASCII case. The value is the text as it appears in the input.
pub fn insensitive<'i, N>(string: &str) -> impl Parser<'i, N> {
    let string = string.to_owned();

    from_fn(move |_: &mut ParserState<'i, N>, input: &'i str, position: Index| {
        match input.get(..string.len()) {
            Some(matched) if matched.eq_ignore_ascii_case(&string) => Ok(Success::new(
                Value::Text(matched),
                &input[string.len()..],
                position.advance(matched),
            )),
            _ => Err(Failure::new(Expected::Literal(string.clone()), position)),
        }
    })
}

/// Matches one character within `range`.
pub fn range<'i, N>(range: RangeInclusive<char>) -> impl Parser<'i, N> {
    let description = format!("{}-{}", range.start(), range.end());

    from_fn(move |_: &mut ParserState<'i, N>, input: &'i str, position: Index| {
        match input.chars().next() {
            Some(c) if range.contains(&c) => Ok(Success::new(
                Value::Char(c),
                &input[c.len_utf8()..],
                position.advance_char(c),
            )),
            _ => Err(Failure::new(
                Expected::CharClass(description.clone()),
                position,
            )),
        }
    })
}

/// Matches one line break, `\n` or `\r\n`.
pub fn end_of_line() -> CharClass {
    crate::char_class!("\r?\n")
}

/// Succeeds without consuming anything iff the input is exhausted.
pub fn end_of_input<'i, N>() -> impl Parser<'i, N> {
    from_fn(|_: &mut ParserState<'i, N>, input: &'i str, position: Index| {
        if input.is_empty() {
            Ok(Success::new(Value::Eof, input, position))
        } else {
            Err(Failure::new(Expected::Eof, position))
        }
    })
}
