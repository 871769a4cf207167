// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The only character that starts a new line. A `\r\n` pair therefore advances like a single
/// line break: the `\r` bumps the column, the `\n` resets it.
pub const LINE_TERMINATOR: char = '\n';

/// A 1-based `(line, column)` cursor into the input.
///
/// An `Index` is a pure function of what has been consumed so far; it is never mutated in place,
/// every advance returns a new one.
///
/// # Examples
///
/// ```
/// # use packrat::Index;
/// let index = Index::start().advance("ab\nc");
///
/// assert_eq!(index.line_col(), (2, 2));
/// ```
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(try_from = "RawIndex")]
pub struct Index {
    line: usize,
    column: usize,
}

const NOT_ONE_BASED: &str = "index coordinates are 1-based";

#[derive(Deserialize)]
struct RawIndex {
    line: usize,
    column: usize,
}

impl TryFrom<RawIndex> for Index {
    type Error = &'static str;

    fn try_from(raw: RawIndex) -> Result<Index, Self::Error> {
        if raw.line == 0 || raw.column == 0 {
            return Err(NOT_ONE_BASED);
        }
        Ok(Index {
            line: raw.line,
            column: raw.column,
        })
    }
}

impl Index {
    /// Creates an `Index` at `line` and `column`.
    ///
    /// # Panics
    ///
    /// Panics when either coordinate is `0`.
    #[inline]
    pub fn new(line: usize, column: usize) -> Index {
        assert!(line > 0 && column > 0, "{}", NOT_ONE_BASED);
        Index { line, column }
    }

    /// The index of the first character of any input, `(1, 1)`.
    #[inline]
    pub fn start() -> Index {
        Index { line: 1, column: 1 }
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the line - and column number pair of the `Index`.
    #[inline]
    pub fn line_col(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Advances over a single consumed character.
    #[inline]
    pub fn advance_char(self, c: char) -> Index {
        if c == LINE_TERMINATOR {
            Index {
                line: self.line + 1,
                column: 1,
            }
        } else {
            Index {
                line: self.line,
                column: self.column + 1,
            }
        }
    }

    /// Advances over a consumed run of text, one character at a time.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packrat::Index;
    /// let index = Index::new(3, 7);
    ///
    /// assert_eq!(index.advance("abc"), Index::new(3, 10));
    /// assert_eq!(index.advance("a\n\nbc"), Index::new(5, 3));
    /// ```
    #[inline]
    pub fn advance(self, consumed: &str) -> Index {
        consumed.chars().fold(self, Index::advance_char)
    }
}

impl Default for Index {
    fn default() -> Index {
        Index::start()
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Advances `position` over `consumed`. Free-function form of [`Index::advance`].
///
/// [`Index::advance`]: struct.Index.html#method.advance
#[inline]
pub fn advance(consumed: &str, position: Index) -> Index {
    position.advance(consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty() {
        assert_eq!(advance("", Index::start()), Index::start());
        assert_eq!(advance("", Index::new(4, 2)), Index::new(4, 2));
    }

    #[test]
    fn parts() {
        let index = Index::new(2, 5);

        assert_eq!(index.line(), 2);
        assert_eq!(index.column(), 5);
        assert_eq!(index.line_col(), (2, 5));
        assert_eq!(index.to_string(), "2:5");
    }

    #[rstest]
    #[case("a", (1, 2))]
    #[case("abc", (1, 4))]
    #[case("\n", (2, 1))]
    #[case("ab\n", (2, 1))]
    #[case("ab\ncd", (2, 3))]
    #[case("\r\na", (2, 2))]
    #[case("\n\n\n", (4, 1))]
    #[case("äöü", (1, 4))]
    fn line_col(#[case] consumed: &str, #[case] expected: (usize, usize)) {
        assert_eq!(Index::start().advance(consumed).line_col(), expected);
    }

    #[test]
    fn whole_run_equals_fold() {
        let text = "let x =\n  1 +\r\n  2;";
        let folded = text.chars().fold(Index::start(), |i, c| i.advance_char(c));

        assert_eq!(Index::start().advance(text), folded);
    }

    #[test]
    fn split_runs_compose() {
        let (a, b) = "first line\nsecond".split_at(7);

        assert_eq!(
            Index::start().advance(a).advance(b),
            Index::start().advance("first line\nsecond")
        );
    }

    #[test]
    fn ordering() {
        assert!(Index::new(1, 9) < Index::new(2, 1));
        assert!(Index::new(2, 1) < Index::new(2, 2));
    }

    #[test]
    fn deserialize() {
        let index: Index = serde_json::from_str(r#"{ "line": 3, "column": 4 }"#).unwrap();
        assert_eq!(index, Index::new(3, 4));

        for json in [r#"{ "line": 0, "column": 4 }"#, r#"{ "line": 3, "column": 0 }"#] {
            let error = serde_json::from_str::<Index>(json).unwrap_err();
            assert!(error.to_string().contains("1-based"));
        }
    }

    #[test]
    #[should_panic(expected = "1-based")]
    fn zero_column() {
        Index::new(1, 0);
    }
}
