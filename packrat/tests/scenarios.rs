// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

#[macro_use]
extern crate packrat;

use packrat::{
    end_of_input, end_of_line, insensitive, literal, negative_lookahead, one_or_more, optional,
    range, state, state_with, zero_or_more, Config, Expected, Index, ParseResult, ParserState,
    Value,
};
use rstest::rstest;

#[test]
fn repetition_then_literal() {
    parses_to! {
        parser: sequence![one_or_more(char_class!("a")), literal::<()>("b")],
        input: "aab",
        value: Value::seq(vec![
            Value::seq(vec![Value::Text("a"), Value::Text("a")]),
            Value::Text("b"),
        ]),
        rest: "",
        position: (1, 4)
    };
}

#[test]
fn end_of_empty_input() {
    parses_to! {
        parser: end_of_input::<()>(),
        input: "",
        value: Value::Eof,
        rest: "",
        position: (1, 1)
    };
}

#[test]
fn choice_reports_first_alternative() {
    fails_with! {
        parser: choice![literal::<()>("a"), literal("b")],
        input: "x",
        expected: "expected string a",
        position: (1, 1)
    };
}

#[test]
fn choice_ignores_deeper_failures() {
    // The second alternative fails seven characters in, the first one three.
    fails_with! {
        parser: choice![
            sequence![literal::<()>("abc"), literal("!")],
            sequence![literal("abcdefg"), literal("!")]
        ],
        input: "abcdefg?",
        expected: "expected string !",
        position: (1, 4)
    };
}

#[test]
fn sequence_reports_second_failure() {
    let result = state::<(), _>("a\nbz", sequence![literal("a\nb"), literal("c")]).unwrap();
    let failure = result.unwrap_err();

    assert_eq!(failure.expected, Expected::Literal("c".to_owned()));
    assert_eq!(failure.position, Index::new(2, 2));
}

#[rstest]
#[case("", "expected at-least-one of (expected string a)")]
#[case("b", "expected at-least-one of (expected string a)")]
fn one_or_more_failures(#[case] input: &str, #[case] expected: &str) {
    fails_with! {
        parser: one_or_more(literal::<()>("a")),
        input: input,
        expected: expected,
        position: (1, 1)
    };
}

#[test]
fn negative_lookahead_describes_match() {
    fails_with! {
        parser: negative_lookahead(literal::<()>("a")),
        input: "ab",
        expected: "expected no-match of \"a\"",
        position: (1, 1)
    };
    fails_with! {
        parser: negative_lookahead(sequence![literal::<()>("a"), literal("b")]),
        input: "abc",
        expected: "expected no-match of [\"a\", \"b\"]",
        position: (1, 1)
    };
}

#[rstest]
#[case("\n", (2, 1))]
#[case("\r\n", (2, 1))]
#[case("ab\n\ncd", (3, 3))]
fn positions_across_lines(#[case] input: &str, #[case] position: (usize, usize)) {
    let parser = zero_or_more(choice![end_of_line(), range::<()>('a'..='z')]);
    let success = state(input, parser).unwrap().unwrap();

    assert!(success.is_complete());
    assert_eq!(success.position.line_col(), position);
}

#[test]
fn keyword_not_identifier_prefix() {
    let keyword = || {
        sequence![
            insensitive::<()>("select"),
            negative_lookahead(range('a'..='z'))
        ]
    };

    assert!(state("SELECT *", keyword()).unwrap().is_ok());
    assert!(state("selection", keyword()).unwrap().is_err());
}

#[test]
fn optional_never_fails() {
    parses_to! {
        parser: sequence![optional(literal::<()>("-")), char_class!("[0-9]+")],
        input: "42",
        value: Value::seq(vec![Value::Empty, Value::Text("42")]),
        rest: "",
        position: (1, 3)
    };
}

type State<'i> = ParserState<'i, String>;

fn list<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, String> {
    s.rule(
        "list",
        input,
        pos,
        choice![
            sequence![item, literal(","), list],
            sequence![item, literal(";"), list],
            item
        ],
    )
}

fn item<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, String> {
    s.rule_with("item", input, pos, char_class!("[a-z]+"), |value, pos| {
        Value::node(format!("{}@{}", value.flatten(), pos))
    })
}

#[test]
fn memoization_is_transparent() {
    let input = "ab;cd,ef\nx";
    let memoized = state_with(Config::default(), input, list).unwrap();
    let recomputed = state_with(Config::default().with_memoization(false), input, list).unwrap();

    assert_eq!(memoized, recomputed);

    let success = memoized.unwrap();
    assert_eq!(success.rest, "\nx");
    assert_eq!(
        success.value.flatten(),
        ";,",
        "nodes contribute no text, separators do"
    );
}

#[test]
fn memo_store_serves_backtracking() {
    let mut state = ParserState::new(Config::default());
    list(&mut state, "ab;cd", Index::start()).unwrap();

    let (error, stats) = state.release();
    assert!(error.is_none());
    assert!(stats.hits > 0);
    assert_eq!(stats.entries, stats.inserts);
}

#[test]
fn success_to_json() {
    let success = state("ab", list).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&success.to_json().unwrap()).unwrap();

    assert_eq!(json["value"]["Node"], "ab@1:1");
    assert_eq!(json["position"]["column"], 3);
}
