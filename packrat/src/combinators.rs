// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Higher-order parsers: each takes one or more parsers and returns a new one.
//!
//! Every combinator counts once against the session's call limit and stops early once the
//! session has been halted. Recursion depth follows grammar nesting; there is no trampoline, so
//! deeply nested input is bounded by the thread's stack.

use crate::error::Error;
use crate::parser::{from_fn, BoxedParser, Parser};
use crate::parser_state::ParserState;
use crate::position::Index;
use crate::result::{Expected, Failure, Success, Value};

/// Applies `parser` until it fails, returning the values matched so far, the remaining input and
/// the position after the last match. Never fails; zero matches is a valid outcome. A failure
/// that halted the session also ends the scan, so callers check [`ParserState::is_halted`].
///
/// [`ParserState::is_halted`]: ../struct.ParserState.html#method.is_halted
///
/// A match that consumes nothing is recorded once and ends the scan, since repeating it could
/// never make progress.
pub fn scan<'i, N, P>(
    state: &mut ParserState<'i, N>,
    parser: &P,
    input: &'i str,
    position: Index,
) -> (Vec<Value<'i, N>>, &'i str, Index)
where
    N: Clone,
    P: Parser<'i, N> + ?Sized,
{
    let mut values = vec![];
    let mut rest = input;
    let mut end = position;

    while let Ok(success) = parser.parse(state, rest, end) {
        let consumed = success.rest.len() < rest.len();

        values.push(success.value);
        rest = success.rest;
        end = success.position;

        if !consumed {
            break;
        }
    }

    (values, rest, end)
}

/// Matches `parser` zero or more times. Always succeeds with the sequence of matched values.
///
/// # Examples
///
/// ```
/// # use packrat::{state, literal, zero_or_more, Value};
/// let success = state::<(), _>("aab", zero_or_more(literal("a"))).unwrap().unwrap();
///
/// assert_eq!(success.value, Value::seq(vec![Value::Text("a"), Value::Text("a")]));
/// assert_eq!(success.rest, "b");
/// ```
pub fn zero_or_more<'i, N, P>(parser: P) -> impl Parser<'i, N>
where
    N: Clone,
    P: Parser<'i, N>,
{
    from_fn(
        move |state: &mut ParserState<'i, N>, input: &'i str, position: Index| {
            state.inc_call_check_limit(position)?;

            let (values, rest, end) = scan(state, &parser, input, position);
            if state.is_halted() {
                return Err(Failure::new(Expected::Aborted, position));
            }

            Ok(Success::new(Value::seq(values), rest, end))
        },
    )
}

/// Matches `parser` one or more times.
///
/// When there is no match at all, `parser` is run once more to describe why, and that failure is
/// wrapped as `expected at-least-one of (..)`. If the second run succeeds, the parser is impure
/// and the session is halted with [`Error::InconsistentRepetition`].
///
/// [`Error::InconsistentRepetition`]: ../enum.Error.html#variant.InconsistentRepetition
pub fn one_or_more<'i, N, P>(parser: P) -> impl Parser<'i, N>
where
    N: Clone,
    P: Parser<'i, N>,
{
    from_fn(
        move |state: &mut ParserState<'i, N>, input: &'i str, position: Index| {
            state.inc_call_check_limit(position)?;

            let (values, rest, end) = scan(state, &parser, input, position);
            if state.is_halted() {
                return Err(Failure::new(Expected::Aborted, position));
            }
            if !values.is_empty() {
                return Ok(Success::new(Value::seq(values), rest, end));
            }

            match parser.parse(state, input, position) {
                Err(failure) => Err(Failure::new(
                    Expected::AtLeastOne(Box::new(failure.expected)),
                    position,
                )),
                Ok(_) => Err(state.halt(Error::InconsistentRepetition { position }, position)),
            }
        },
    )
}

/// Ordered choice: tries each parser at the same position and returns the first success.
///
/// If every alternative fails, the failure of the *first* alternative is returned, even when a
/// later one got further into the input.
///
/// # Examples
///
/// ```
/// # use packrat::{choice, literal, state, Expected};
/// let failure = state::<(), _>("x", choice![literal("a"), literal("b")])
///     .unwrap()
///     .unwrap_err();
///
/// assert_eq!(failure.to_string(), "expected string a at 1:1");
/// ```
pub fn choice<'g, 'i, N>(parsers: Vec<BoxedParser<'g, 'i, N>>) -> impl Parser<'i, N> + 'g
where
    N: Clone + 'g,
    'i: 'g,
{
    from_fn(
        move |state: &mut ParserState<'i, N>, input: &'i str, position: Index| {
            state.inc_call_check_limit(position)?;

            let mut first_failure = None;
            for parser in &parsers {
                match parser.parse(state, input, position) {
                    Ok(success) => return Ok(success),
                    Err(failure) if state.is_halted() => return Err(failure),
                    Err(failure) => {
                        if first_failure.is_none() {
                            first_failure = Some(failure);
                        }
                    }
                }
            }

            match first_failure {
                Some(failure) => Err(failure),
                None => Err(state.halt(Error::EmptyChoice { position }, position)),
            }
        },
    )
}

/// Matches every parser in order over the progressively consumed input. The value is the
/// sequence of their values; the first failure is returned as is.
pub fn sequence<'g, 'i, N>(parsers: Vec<BoxedParser<'g, 'i, N>>) -> impl Parser<'i, N> + 'g
where
    N: Clone + 'g,
    'i: 'g,
{
    from_fn(
        move |state: &mut ParserState<'i, N>, input: &'i str, position: Index| {
            state.inc_call_check_limit(position)?;

            let mut values = Vec::with_capacity(parsers.len());
            let mut rest = input;
            let mut end = position;

            for parser in &parsers {
                let success = parser.parse(state, rest, end)?;

                values.push(success.value);
                rest = success.rest;
                end = success.position;
            }

            Ok(Success::new(Value::seq(values), rest, end))
        },
    )
}

/// The "and" grouping of grammar notation. Identical to [`sequence`].
///
/// [`sequence`]: fn.sequence.html
#[inline]
pub fn and<'g, 'i, N>(parsers: Vec<BoxedParser<'g, 'i, N>>) -> impl Parser<'i, N> + 'g
where
    N: Clone + 'g,
    'i: 'g,
{
    sequence(parsers)
}

/// Succeeds with an empty sequence, consuming nothing, if `parser` matches here. Otherwise
/// `parser`'s failure is returned unchanged.
pub fn positive_lookahead<'i, N, P>(parser: P) -> impl Parser<'i, N>
where
    N: Clone,
    P: Parser<'i, N>,
{
    from_fn(
        move |state: &mut ParserState<'i, N>, input: &'i str, position: Index| {
            state.inc_call_check_limit(position)?;

            parser
                .parse(state, input, position)
                .map(|_| Success::new(Value::seq(vec![]), input, position))
        },
    )
}

/// Succeeds with an empty sequence, consuming nothing, if `parser` fails here. If it matches,
/// fails with `expected no-match of <value>`, carrying the matched value.
///
/// # Examples
///
/// ```
/// # use packrat::{literal, negative_lookahead, state, Expected, Value};
/// let failure = state::<(), _>("ab", negative_lookahead(literal("a")))
///     .unwrap()
///     .unwrap_err();
///
/// assert_eq!(failure.expected, Expected::NoMatch(Value::Text("a")));
/// ```
pub fn negative_lookahead<'i, N, P>(parser: P) -> impl Parser<'i, N>
where
    N: Clone,
    P: Parser<'i, N>,
{
    from_fn(
        move |state: &mut ParserState<'i, N>, input: &'i str, position: Index| {
            state.inc_call_check_limit(position)?;

            match parser.parse(state, input, position) {
                Ok(success) => Err(Failure::new(Expected::NoMatch(success.value), position)),
                Err(failure) if state.is_halted() => Err(failure),
                Err(_) => Ok(Success::new(Value::seq(vec![]), input, position)),
            }
        },
    )
}

/// Returns `parser`'s success, or succeeds with [`Value::Empty`] and nothing consumed if it
/// fails. Never fails on its own.
///
/// [`Value::Empty`]: ../enum.Value.html#variant.Empty
pub fn optional<'i, N, P>(parser: P) -> impl Parser<'i, N>
where
    N: Clone,
    P: Parser<'i, N>,
{
    from_fn(
        move |state: &mut ParserState<'i, N>, input: &'i str, position: Index| {
            state.inc_call_check_limit(position)?;

            match parser.parse(state, input, position) {
                Ok(success) => Ok(success),
                Err(failure) if state.is_halted() => Err(failure),
                Err(_) => Ok(Success::new(Value::Empty, input, position)),
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::config::Config;
    use crate::matchers::{any_char, end_of_input, literal, CharClass};
    use crate::result::ParseResult;

    fn run<'i, P: Parser<'i, ()>>(parser: P, input: &'i str) -> ParseResult<'i, ()> {
        let mut state = ParserState::new(Config::default());
        parser.parse(&mut state, input, Index::start())
    }

    fn text(s: &str) -> Value<'_, ()> {
        Value::Text(s)
    }

    #[test]
    fn scan_zero_matches() {
        let mut state = ParserState::<()>::new(Config::default());
        let (values, rest, end) = scan(&mut state, &literal("a"), "bbb", Index::new(2, 2));

        assert!(values.is_empty());
        assert_eq!(rest, "bbb");
        assert_eq!(end, Index::new(2, 2));
    }

    #[test]
    fn scan_stops_on_empty_match() {
        let mut state = ParserState::<()>::new(Config::default());
        let (values, rest, _) = scan(&mut state, &optional(literal("a")), "b", Index::start());

        assert_eq!(values, vec![Value::Empty]);
        assert_eq!(rest, "b");
    }

    #[test]
    fn zero_or_more_empty() {
        let success = run(zero_or_more(literal("a")), "").unwrap();

        assert_eq!(success.value, Value::seq(vec![]));
        assert_eq!(success.position, Index::start());
    }

    #[test]
    fn zero_or_more_across_lines() {
        let success = run(zero_or_more(any_char()), "a\nb").unwrap();

        assert_eq!(
            success.value,
            Value::seq(vec![Value::Char('a'), Value::Char('\n'), Value::Char('b')])
        );
        assert_eq!(success.position, Index::new(2, 2));
    }

    #[test]
    fn one_or_more_wraps_failure() {
        let failure = run(one_or_more(literal("a")), "b").unwrap_err();

        assert_eq!(
            failure.expected,
            Expected::AtLeastOne(Box::new(Expected::Literal("a".to_owned())))
        );
        assert_eq!(failure.position, Index::start());
    }

    #[test]
    fn one_or_more_impure_parser_halts() {
        let calls = Cell::new(0);
        let flaky = from_fn(
            |s: &mut ParserState<'static, ()>, input: &'static str, pos: Index| {
                calls.set(calls.get() + 1);
                if calls.get() == 1 {
                    literal("never").parse(s, input, pos)
                } else {
                    literal("").parse(s, input, pos)
                }
            },
        );
        let mut state = ParserState::new(Config::default());

        let failure = one_or_more(&flaky)
            .parse(&mut state, "abc", Index::start())
            .unwrap_err();

        assert_eq!(failure.expected, Expected::Aborted);
        assert!(matches!(
            state.halted(),
            Some(Error::InconsistentRepetition { position }) if *position == Index::start()
        ));
    }

    #[test]
    fn choice_first_success() {
        let success = run(choice![literal("a"), literal("ab")], "ab").unwrap();

        assert_eq!(success.value, text("a"));
        assert_eq!(success.rest, "b");
    }

    #[test]
    fn choice_first_failure_wins() {
        // The second alternative gets three characters further before failing.
        let deep = sequence![literal("xyz"), literal("!")];
        let failure = run(choice![literal("a"), deep], "xyz?").unwrap_err();

        assert_eq!(failure.expected, Expected::Literal("a".to_owned()));
        assert_eq!(failure.position, Index::start());
    }

    #[test]
    fn choice_empty_halts() {
        let mut state = ParserState::<()>::new(Config::default());
        let failure = choice(vec![])
            .parse(&mut state, "x", Index::start())
            .unwrap_err();

        assert_eq!(failure.expected, Expected::Aborted);
        assert!(matches!(state.halted(), Some(Error::EmptyChoice { .. })));
    }

    #[test]
    fn sequence_values() {
        let success = run(sequence![literal("a"), any_char(), end_of_input()], "ab").unwrap();

        assert_eq!(
            success.value,
            Value::seq(vec![text("a"), Value::Char('b'), Value::Eof])
        );
        assert_eq!(success.position, Index::new(1, 3));
    }

    #[test]
    fn sequence_short_circuits() {
        let failure = run(sequence![literal("a"), literal("c")], "ab").unwrap_err();

        assert_eq!(failure.expected, Expected::Literal("c".to_owned()));
        assert_eq!(failure.position, Index::new(1, 2));
    }

    fn a_then_b<'i>() -> Vec<BoxedParser<'i, 'i, ()>> {
        vec![crate::boxed(literal("a")), crate::boxed(literal("b"))]
    }

    #[test]
    fn and_is_sequence() {
        assert_eq!(run(and(a_then_b()), "ab"), run(sequence(a_then_b()), "ab"));
        assert_eq!(run(and(a_then_b()), "ax"), run(sequence(a_then_b()), "ax"));
    }

    #[test]
    fn empty_sequence() {
        let success = run(sequence(vec![]), "x").unwrap();

        assert_eq!(success.value, Value::seq(vec![]));
        assert_eq!(success.rest, "x");
    }

    #[test]
    fn positive_lookahead_consumes_nothing() {
        let success = run(positive_lookahead(literal("ab")), "abc").unwrap();

        assert_eq!(success.value, Value::seq(vec![]));
        assert_eq!(success.rest, "abc");
        assert_eq!(success.position, Index::start());

        let failure = run(positive_lookahead(literal("x")), "abc").unwrap_err();
        assert_eq!(failure.expected, Expected::Literal("x".to_owned()));
    }

    #[test]
    fn negative_lookahead_carries_match() {
        let class = CharClass::new("[a-z]+").unwrap();
        let failure = run(negative_lookahead(class), "abc1").unwrap_err();

        assert_eq!(failure.expected, Expected::NoMatch(text("abc")));
        assert_eq!(failure.position, Index::start());
        assert_eq!(failure.to_string(), "expected no-match of \"abc\" at 1:1");

        let success = run(negative_lookahead(literal("x")), "abc").unwrap();
        assert_eq!(success.rest, "abc");
    }

    #[test]
    fn optional_miss() {
        let success = run(optional(literal("x")), "abc").unwrap();

        assert_eq!(success.value, Value::Empty);
        assert_eq!(success.rest, "abc");
        assert_eq!(success.position, Index::start());
    }

    #[test]
    fn optional_hit() {
        assert_eq!(
            run(optional(literal("a")), "abc"),
            run(literal("a"), "abc")
        );
    }

    // Succeeds once, then halts the session on its second call.
    fn halting_after_one<'i>(
        s: &mut ParserState<'i, ()>,
        input: &'i str,
        pos: Index,
    ) -> ParseResult<'i, ()> {
        if pos == Index::start() {
            literal("a").parse(s, input, pos)
        } else {
            choice(vec![]).parse(s, input, pos)
        }
    }

    #[test]
    fn zero_or_more_stops_on_halt() {
        let mut state = ParserState::<()>::new(Config::default());
        let failure = zero_or_more(choice(vec![]))
            .parse(&mut state, "abc", Index::start())
            .unwrap_err();

        assert_eq!(failure.expected, Expected::Aborted);
        assert!(matches!(state.halted(), Some(Error::EmptyChoice { .. })));
    }

    #[rstest::rstest]
    #[case::zero_or_more(true)]
    #[case::one_or_more(false)]
    fn repetition_after_halt_fails(#[case] zero: bool) {
        let mut state = ParserState::<()>::new(Config::default());
        let result = if zero {
            zero_or_more(halting_after_one).parse(&mut state, "aa", Index::start())
        } else {
            one_or_more(halting_after_one).parse(&mut state, "aa", Index::start())
        };

        assert_eq!(result.unwrap_err().expected, Expected::Aborted);
        assert!(state.is_halted());
    }

    #[test]
    fn halted_session_is_not_recovered() {
        let mut state = ParserState::<()>::new(Config::default());
        state.halt(Error::EmptyChoice { position: Index::start() }, Index::start());

        let failure = optional(literal("a"))
            .parse(&mut state, "a", Index::start())
            .unwrap_err();

        assert_eq!(failure.expected, Expected::Aborted);
    }
}
