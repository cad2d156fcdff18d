// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! WHERE / WHEN predicates
//!
//! A predicate is a running list of terms. The first term is the base
//! expression; every later term attaches with its own connective. A lone
//! term is emitted verbatim. Once terms are combined (or negated), a term
//! with a top-level AND, OR or XOR is wrapped in parentheses so it keeps its
//! own grouping.
//!
//! `?` placeholders outside string literals are replaced by the encoded
//! arguments of their term, in order.

use crate::error::{NgqlError, Result};
use crate::value::{encode, Value};

/// How a term attaches to the terms before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    Xor,
    /// `AND NOT`, or a bare `NOT` as the first term
    Not,
}

impl Connective {
    fn joiner(&self) -> &'static str {
        match self {
            Connective::And => " AND ",
            Connective::Or => " OR ",
            Connective::Xor => " XOR ",
            Connective::Not => " AND NOT ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub connective: Connective,
    pub expr: String,
    pub args: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    pub terms: Vec<Term>,
}

impl Predicate {
    pub fn new<S: Into<String>>(connective: Connective, expr: S, args: Vec<Value>) -> Self {
        Self {
            terms: vec![Term {
                connective,
                expr: expr.into(),
                args,
            }],
        }
    }

    pub(crate) fn extend(&mut self, next: Predicate) {
        self.terms.extend(next.terms);
    }

    pub(crate) fn render(&self, keyword: &str, out: &mut String) -> Result<()> {
        if self.terms.is_empty() {
            return Err(NgqlError::invalid_clause(keyword, "predicate is empty"));
        }
        let combined = self.terms.len() > 1 || self.terms[0].connective == Connective::Not;
        let mut predicate = String::new();
        for (i, term) in self.terms.iter().enumerate() {
            let mut expr = substitute(keyword, &term.expr, &term.args)?;
            if expr.trim().is_empty() {
                return Err(NgqlError::invalid_clause(keyword, "predicate term is empty"));
            }
            if combined && has_top_level_connective(&expr) {
                expr = format!("({})", expr.trim());
            }
            if i == 0 {
                if term.connective == Connective::Not {
                    predicate.push_str("NOT ");
                }
            } else {
                predicate.push_str(term.connective.joiner());
            }
            predicate.push_str(&expr);
        }
        out.push_str(keyword);
        out.push(' ');
        out.push_str(&predicate);
        Ok(())
    }
}

/// Whether `expr` has an AND, OR or XOR outside parentheses and string
/// literals
fn has_top_level_connective(expr: &str) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut word = String::new();

    let is_connective = |word: &str| {
        word.eq_ignore_ascii_case("AND")
            || word.eq_ignore_ascii_case("OR")
            || word.eq_ignore_ascii_case("XOR")
    };

    for c in expr.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' {
            word.push(c);
            continue;
        }
        if depth == 0 && is_connective(&word) {
            return true;
        }
        word.clear();
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth == 0 && is_connective(&word)
}

/// Replace `?` placeholders outside string literals with encoded `args`
pub(crate) fn substitute(clause: &str, expr: &str, args: &[Value]) -> Result<String> {
    let mut out = String::with_capacity(expr.len());
    let mut args_iter = args.iter();
    let mut used = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in expr.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
                out.push(c);
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    out.push(c);
                }
                '?' => {
                    let arg = args_iter.next().ok_or_else(|| {
                        NgqlError::invalid_clause(
                            clause,
                            format!(
                                "expression has more placeholders than the {} argument(s) given",
                                args.len()
                            ),
                        )
                    })?;
                    out.push_str(&encode(None, arg).map_err(|err| err.in_clause(clause))?);
                    used += 1;
                }
                c => out.push(c),
            },
        }
    }

    if used != args.len() {
        return Err(NgqlError::invalid_clause(
            clause,
            format!(
                "expression has {} placeholder(s) but {} argument(s) were given",
                used,
                args.len()
            ),
        ));
    }
    Ok(out)
}
