// packrat. A memoizing PEG runtime
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Arithmetic expressions with the usual precedence.
//!
//! ```text
//! expression    = skip sum skip EOI
//! sum           = product (skip ("+" / "-") skip product)*
//! product       = unary (skip ("*" / "/") skip unary)*
//! unary         = "-" skip unary / atom
//! atom          = number / parenthesized
//! parenthesized = "(" skip sum skip ")"
//! number        = [0-9]+ ("." [0-9]+)?
//! skip          = [ \t\r\n]*
//! ```

use std::rc::Rc;

use packrat::{
    char_class, choice, end_of_input, literal, optional, sequence, zero_or_more, Index,
    ParseResult, ParserState, Value,
};
use serde::Serialize;

use crate::{nth, GrammarError};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }
}

/// The AST built by the rule transforms. Every node remembers where it started. Children are
/// shared with the memo store rather than copied out of it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expr {
    Number {
        text: String,
        position: Index,
    },
    Neg {
        operand: Rc<Expr>,
        position: Index,
    },
    Binary {
        op: BinaryOp,
        lhs: Rc<Expr>,
        rhs: Rc<Expr>,
        position: Index,
    },
    /// A match whose shape the transforms did not recognize.
    Malformed { text: String, position: Index },
}

impl Expr {
    pub fn position(&self) -> Index {
        match *self {
            Expr::Number { position, .. }
            | Expr::Neg { position, .. }
            | Expr::Binary { position, .. }
            | Expr::Malformed { position, .. } => position,
        }
    }

    pub fn eval(&self) -> Result<f64, GrammarError> {
        match self {
            Expr::Number { text, position } => {
                text.parse()
                    .map_err(|_| GrammarError::InvalidNumber {
                        text: text.clone(),
                        position: *position,
                    })
            }
            Expr::Neg { operand, .. } => Ok(-operand.eval()?),
            Expr::Binary {
                op,
                lhs,
                rhs,
                position,
            } => {
                let (lhs, rhs) = (lhs.eval()?, rhs.eval()?);
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div if rhs == 0.0 => Err(GrammarError::DivisionByZero {
                        position: *position,
                    }),
                    BinaryOp::Div => Ok(lhs / rhs),
                }
            }
            Expr::Malformed { text, position } => Err(GrammarError::Malformed {
                text: text.clone(),
                position: *position,
            }),
        }
    }
}

type State<'i> = ParserState<'i, Expr>;

fn into_expr(value: Value<'_, Expr>, position: Index) -> Rc<Expr> {
    match value {
        Value::Node(expr) => expr,
        other => Rc::new(Expr::Malformed {
            text: other.flatten(),
            position,
        }),
    }
}

// Folds `first (skip op skip operand)*` into a left-associative tree.
fn fold_binary<'i>(value: Value<'i, Expr>, position: Index) -> Value<'i, Expr> {
    let first = into_expr(nth(&value, 0), position);
    let steps = nth(&value, 1).into_seq().unwrap_or_default();

    let expr = steps.into_iter().fold(first, |lhs, step| {
        let symbol = nth(&step, 1);
        let rhs = into_expr(nth(&step, 3), position);

        let node = match symbol.as_str().and_then(BinaryOp::from_symbol) {
            Some(op) => Expr::Binary {
                op,
                position: lhs.position(),
                lhs,
                rhs,
            },
            None => Expr::Malformed {
                text: step.flatten(),
                position,
            },
        };
        Rc::new(node)
    });

    Value::Node(expr)
}

fn expression<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Expr> {
    s.rule_with(
        "expression",
        input,
        pos,
        sequence![skip, sum, skip, end_of_input()],
        |value, _| nth(&value, 1),
    )
}

fn sum<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Expr> {
    s.rule_with(
        "sum",
        input,
        pos,
        sequence![
            product,
            zero_or_more(sequence![
                skip,
                choice![literal("+"), literal("-")],
                skip,
                product
            ])
        ],
        fold_binary,
    )
}

fn product<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Expr> {
    s.rule_with(
        "product",
        input,
        pos,
        sequence![
            unary,
            zero_or_more(sequence![
                skip,
                choice![literal("*"), literal("/")],
                skip,
                unary
            ])
        ],
        fold_binary,
    )
}

fn unary<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Expr> {
    s.rule_with(
        "unary",
        input,
        pos,
        choice![sequence![literal("-"), skip, unary], atom],
        |value, position| {
            if value.as_seq().is_some() {
                Value::node(Expr::Neg {
                    operand: into_expr(nth(&value, 2), position),
                    position,
                })
            } else {
                value
            }
        },
    )
}

fn atom<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Expr> {
    s.rule("atom", input, pos, choice![number, parenthesized])
}

fn parenthesized<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Expr> {
    s.rule_with(
        "parenthesized",
        input,
        pos,
        sequence![literal("("), skip, sum, skip, literal(")")],
        |value, _| nth(&value, 2),
    )
}

fn number<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Expr> {
    s.rule_with(
        "number",
        input,
        pos,
        char_class!(r"[0-9]+(\.[0-9]+)?"),
        |value, position| {
            Value::node(Expr::Number {
                text: value.flatten(),
                position,
            })
        },
    )
}

fn skip<'i>(s: &mut State<'i>, input: &'i str, pos: Index) -> ParseResult<'i, Expr> {
    s.rule("skip", input, pos, optional(char_class!("[ \t\r\n]+")))
}

/// Parses `input` into an expression tree.
///
/// # Examples
///
/// ```
/// # use packrat_grammars::calculator;
/// let expr = calculator::parse("1 + 2 * 3").unwrap();
///
/// assert_eq!(expr.eval().unwrap(), 7.0);
/// ```
pub fn parse(input: &str) -> Result<Expr, GrammarError> {
    log::debug!("parsing expression of {} bytes", input.len());

    match packrat::state(input, expression)? {
        Ok(success) => {
            let expr = into_expr(success.value, Index::start());
            Ok(Rc::try_unwrap(expr).unwrap_or_else(|shared| (*shared).clone()))
        }
        Err(failure) => Err(GrammarError::from_failure(&failure)),
    }
}

/// Parses and evaluates `input`.
pub fn evaluate(input: &str) -> Result<f64, GrammarError> {
    parse(input)?.eval()
}
