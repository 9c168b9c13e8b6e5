// This file is part of mish, a minimal POSIX shell.
// Copyright (C) 2026 WATANABE Yuki
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Syntax parser that converts a command line into a [`Pipeline`]
//!
//! [`parse_line`] is the entry point used by the shell: it runs the
//! [lexer](lex) and arranges the resulting tokens into stages. The
//! intermediate functions [`parse_pipeline`] and [`parse_stage`] are public
//! so that callers holding tokens can use them directly.

pub mod lex;

use self::lex::{Operator, Token};
use crate::syntax::{Fd, Pipeline, Redir, RedirOp, Stage};
use thiserror::Error;

/// Types of syntax errors
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("{}", self.message())]
#[non_exhaustive]
pub enum SyntaxError {
    /// A single quotation lacks a closing `'`.
    UnclosedSingleQuote,
    /// A double quotation lacks a closing `"`.
    UnclosedDoubleQuote,
    /// A redirection operator is missing its operand.
    MissingRedirOperand,
    /// The input contains no command at all.
    MissingCommand,
    /// A pipeline starts with a `|` token.
    MissingCommandBeforeBar,
    /// A `|` token is not followed by a command.
    MissingCommandAfterBar,
}

impl SyntaxError {
    /// Returns an error message describing the error.
    #[must_use]
    pub fn message(&self) -> &'static str {
        use SyntaxError::*;
        match self {
            UnclosedSingleQuote => "the single quote is not closed",
            UnclosedDoubleQuote => "the double quote is not closed",
            MissingRedirOperand => "the redirection operator is missing its operand",
            MissingCommand => "a command is missing",
            MissingCommandBeforeBar => "a command is missing before `|`",
            MissingCommandAfterBar => "a command is missing after `|`",
        }
    }
}

/// Result type for parsing
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Parses a whole command line into a pipeline.
///
/// The input should have its trailing newline already removed. The result
/// contains at least one stage.
pub fn parse_line(line: &str) -> Result<Pipeline> {
    parse_pipeline(lex::lex(line)?)
}

/// Splits a token sequence on `|` operators and parses each stage.
///
/// An empty stage (a leading, trailing, or doubled `|`, or an empty token
/// sequence) is a syntax error.
pub fn parse_pipeline(tokens: Vec<Token>) -> Result<Pipeline> {
    let mut stages = Vec::new();
    let mut current = Vec::new();
    let token_count = tokens.len();

    for token in tokens {
        if token == Token::Operator(Operator::Bar) {
            if current.is_empty() {
                return Err(if stages.is_empty() {
                    SyntaxError::MissingCommandBeforeBar
                } else {
                    SyntaxError::MissingCommandAfterBar
                });
            }
            stages.push(parse_stage(std::mem::take(&mut current))?);
        } else {
            current.push(token);
        }
    }

    if current.is_empty() {
        return Err(if token_count == 0 {
            SyntaxError::MissingCommand
        } else {
            SyntaxError::MissingCommandAfterBar
        });
    }
    stages.push(parse_stage(current)?);

    Ok(Pipeline { stages })
}

/// Parses the tokens of one stage into words and redirections.
///
/// Every operator token must be followed by exactly one word, which becomes
/// the redirection target and is removed from the word stream along with the
/// operator. Redirections are kept in input order, duplicates included.
pub fn parse_stage(tokens: Vec<Token>) -> Result<Stage> {
    let mut argv = Vec::new();
    let mut redirs = Vec::new();
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        match token {
            Token::Word(word) => argv.push(word),
            Token::Operator(operator) => {
                let (fd, op) = redir_for(operator);
                match tokens.next() {
                    Some(Token::Word(path)) => redirs.push(Redir { fd, op, path }),
                    _ => return Err(SyntaxError::MissingRedirOperand),
                }
            }
        }
    }

    Ok(Stage { argv, redirs })
}

/// Returns the file descriptor and open mode a redirection operator stands
/// for.
///
/// `>` and `1>` are equivalent, as are `>>` and `1>>`. The pipe operator
/// never reaches this function because [`parse_pipeline`] splits on it
/// before stages are parsed.
fn redir_for(operator: Operator) -> (Fd, RedirOp) {
    use Operator::*;
    match operator {
        Greater | OneGreater => (Fd::STDOUT, RedirOp::FileOut),
        GreaterGreater | OneGreaterGreater => (Fd::STDOUT, RedirOp::FileAppend),
        TwoGreater => (Fd::STDERR, RedirOp::FileOut),
        TwoGreaterGreater => (Fd::STDERR, RedirOp::FileAppend),
        Bar => unreachable!("`|` is split before stage parsing"),
    }
}
