// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Comma-separated values with RFC 4180 style quoting.
//!
//! ```text
//! file          = record (EOL !EOI record)* EOL? EOI
//! record        = field ("," field)*
//! field         = quoted / bare
//! quoted        = "\"" (escaped_quote / !"\"" ANY)* "\""
//! escaped_quote = "\"\""
//! bare          = (!("," / EOL / "\"") ANY)*
//! ```

use packrat::{
    any_char, choice, end_of_input, end_of_line, literal, negative_lookahead, optional, sequence,
    zero_or_more, Index, ParseResult, ParserState, Value,
};

use crate::{nth, GrammarError};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Csv {
    Field(String),
    Record(Vec<String>),
    File(Vec<Vec<String>>),
}

type State<'i> = ParserState<'i, Csv>;

fn file<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Csv> {
    s.rule_with(
        "file",
        input,
        pos,
        sequence![
            record,
            zero_or_more(sequence![
                end_of_line(),
                negative_lookahead(end_of_input()),
                record
            ]),
            optional(end_of_line()),
            end_of_input()
        ],
        |value, _| {
            let rest = nth(&value, 1).into_seq().unwrap_or_default();
            let records = std::iter::once(nth(&value, 0))
                .chain(rest.iter().map(|step| nth(step, 2)))
                .filter_map(|record| match record.as_node() {
                    Some(Csv::Record(fields)) => Some(fields.clone()),
                    _ => None,
                })
                .collect();

            Value::node(Csv::File(records))
        },
    )
}

fn record<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Csv> {
    s.rule_with(
        "record",
        input,
        pos,
        sequence![field, zero_or_more(sequence![literal(","), field])],
        |value, _| {
            let rest = nth(&value, 1).into_seq().unwrap_or_default();
            let fields = std::iter::once(nth(&value, 0))
                .chain(rest.iter().map(|step| nth(step, 1)))
                .filter_map(|field| match field.as_node() {
                    Some(Csv::Field(text)) => Some(text.clone()),
                    _ => None,
                })
                .collect();

            Value::node(Csv::Record(fields))
        },
    )
}

fn field<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Csv> {
    s.rule("field", input, pos, choice![quoted, bare])
}

fn quoted<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Csv> {
    s.rule_with(
        "quoted",
        input,
        pos,
        sequence![
            literal("\""),
            zero_or_more(choice![
                escaped_quote,
                sequence![negative_lookahead(literal("\"")), any_char()]
            ]),
            literal("\"")
        ],
        |value, _| Value::node(Csv::Field(nth(&value, 1).flatten())),
    )
}

fn escaped_quote<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Csv> {
    s.rule_with("escaped_quote", input, pos, literal("\"\""), |_, _| {
        Value::Char('"')
    })
}

fn bare<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Csv> {
    s.rule_with(
        "bare",
        input,
        pos,
        zero_or_more(sequence![
            negative_lookahead(choice![literal(","), end_of_line(), literal("\"")]),
            any_char()
        ]),
        |value, _| Value::node(Csv::Field(value.flatten())),
    )
}

/// Parses `input` into records of fields.
///
/// # Examples
///
/// ```
/// # use packrat_grammars::csv;
/// let records = csv::parse("a,\"b,c\"\n1,2\n").unwrap();
///
/// assert_eq!(records, vec![vec!["a", "b,c"], vec!["1", "2"]]);
/// ```
pub fn parse(input: &str) -> Result<Vec<Vec<String>>, GrammarError> {
    log::debug!("parsing csv of {} bytes", input.len());

    match packrat::state(input, file)? {
        Ok(success) => match success.value.as_node() {
            Some(Csv::File(records)) => Ok(records.clone()),
            _ => Err(GrammarError::Malformed {
                text: success.value.flatten(),
                position: Index::start(),
            }),
        },
        Err(failure) => Err(GrammarError::from_failure(&failure)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_quotes() {
        let records = parse("\"say \"\"hi\"\"\",x").unwrap();

        assert_eq!(records, vec![vec!["say \"hi\"", "x"]]);
    }

    #[test]
    fn empty_fields() {
        assert_eq!(parse(",,").unwrap(), vec![vec!["", "", ""]]);
    }

    #[test]
    fn windows_line_endings() {
        let records = parse("a,b\r\nc,d\r\n").unwrap();

        assert_eq!(records, vec![vec!["a", "b"], vec!["c", "d"]]);
    }
}
