// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

/// Compiles a literal character class pattern once, on first use, and yields a [`CharClass`].
///
/// # Panics
///
/// Panics on first use if the pattern is not a valid class.
///
/// # Examples
///
/// ```
/// # use packrat::{char_class, state};
/// let result = state::<(), _>("  x", char_class!("[ \t]+")).unwrap();
///
/// assert_eq!(result.unwrap().rest, "x");
/// ```
///
/// [`CharClass`]: matchers/struct.CharClass.html
#[macro_export]
macro_rules! char_class {
    ($pattern:literal) => {{
        static CLASS: $crate::once_cell::sync::Lazy<$crate::CharClass> =
            $crate::once_cell::sync::Lazy::new(|| {
                $crate::CharClass::new($pattern).expect("invalid character class literal")
            });
        ::std::clone::Clone::clone(&*CLASS)
    }};
}

/// Builds an ordered [`choice`] from a list of parsers, boxing each one.
///
/// [`choice`]: combinators/fn.choice.html
#[macro_export]
macro_rules! choice {
    ( $( $parser:expr ),+ $(,)? ) => {
        $crate::combinators::choice(vec![ $( $crate::boxed($parser) ),+ ])
    };
}

/// Builds a [`sequence`] from a list of parsers, boxing each one.
///
/// [`sequence`]: combinators/fn.sequence.html
#[macro_export]
macro_rules! sequence {
    ( $( $parser:expr ),+ $(,)? ) => {
        $crate::combinators::sequence(vec![ $( $crate::boxed($parser) ),+ ])
    };
}

/// Asserts that `parser` matches `input` with the given value, leftover input and end position.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate packrat;
/// # use packrat::{literal, Value};
/// # fn main() {
/// parses_to! {
///     parser: literal::<()>("ab"),
///     input: "abc",
///     value: Value::Text("ab"),
///     rest: "c",
///     position: (1, 3)
/// };
/// # }
/// ```
#[macro_export]
macro_rules! parses_to {
    ( parser: $parser:expr, input: $input:expr, value: $value:expr, rest: $rest:expr,
      position: ( $line:expr, $column:expr ) $(,)? ) => {
        match $crate::state($input, $parser) {
            Ok(Ok(success)) => {
                assert_eq!(success.value, $value);
                assert_eq!(success.rest, $rest);
                assert_eq!(success.position.line_col(), ($line, $column));
            }
            Ok(Err(failure)) => panic!("expected a match, but parsing failed: {}", failure),
            Err(error) => panic!("expected a match, but the session halted: {}", error),
        }
    };
}

/// Asserts that `parser` fails on `input` with the given description at the given position.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate packrat;
/// # use packrat::literal;
/// # fn main() {
/// fails_with! {
///     parser: literal::<()>("ab"),
///     input: "ax",
///     expected: "expected string ab",
///     position: (1, 1)
/// };
/// # }
/// ```
#[macro_export]
macro_rules! fails_with {
    ( parser: $parser:expr, input: $input:expr, expected: $expected:expr,
      position: ( $line:expr, $column:expr ) $(,)? ) => {
        match $crate::state($input, $parser) {
            Ok(Err(failure)) => {
                assert_eq!(failure.expected.to_string(), $expected);
                assert_eq!(failure.position.line_col(), ($line, $column));
            }
            Ok(Ok(success)) => panic!(
                "expected a failure, but matched {} leaving {:?}",
                success.value, success.rest
            ),
            Err(error) => panic!("expected a failure, but the session halted: {}", error),
        }
    };
}
