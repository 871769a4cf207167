// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use crate::parser_state::ParserState;
use crate::position::Index;
use crate::result::ParseResult;

/// A parser function: given the remaining input and the position it starts at, produce a
/// [`ParseResult`]. The session state is threaded through so named rules can reach the memo
/// store.
///
/// Every `Fn(&mut ParserState<'i, N>, &'i str, Index) -> ParseResult<'i, N>` is a `Parser`, so
/// named rules are plain `fn` items and combinators return closures.
///
/// [`ParseResult`]: type.ParseResult.html
pub trait Parser<'i, N> {
    fn parse(&self, state: &mut ParserState<'i, N>, input: &'i str, position: Index)
        -> ParseResult<'i, N>;
}

impl<'i, N, F> Parser<'i, N> for F
where
    F: Fn(&mut ParserState<'i, N>, &'i str, Index) -> ParseResult<'i, N>,
{
    #[inline]
    fn parse(
        &self,
        state: &mut ParserState<'i, N>,
        input: &'i str,
        position: Index,
    ) -> ParseResult<'i, N> {
        self(state, input, position)
    }
}

/// A type-erased parser, as taken by the n-ary combinators.
pub type BoxedParser<'g, 'i, N> = Box<dyn Parser<'i, N> + 'g>;

/// Boxes `parser` for use in [`choice`] or [`sequence`].
///
/// [`choice`]: combinators/fn.choice.html
/// [`sequence`]: combinators/fn.sequence.html
#[inline]
pub fn boxed<'g, 'i, N, P>(parser: P) -> BoxedParser<'g, 'i, N>
where
    P: Parser<'i, N> + 'g,
{
    Box::new(parser)
}

/// Turns a closure into a parser, fixing its signature so the closure's argument types need no
/// annotations.
///
/// # Examples
///
/// ```
/// # use packrat::{from_fn, state, Success, Value};
/// let skip_one = from_fn(|_, input, position| {
///     let rest = input.get(1..).unwrap_or("");
///     Ok(Success::<()>::new(Value::Empty, rest, position))
/// });
///
/// assert_eq!(state("ab", skip_one).unwrap().unwrap().rest, "b");
/// ```
#[inline]
pub fn from_fn<'i, N, F>(f: F) -> F
where
    F: Fn(&mut ParserState<'i, N>, &'i str, Index) -> ParseResult<'i, N>,
{
    f
}
