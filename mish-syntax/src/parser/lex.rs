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

//! Lexical analysis of command lines
//!
//! The [`lex`] function scans a raw command line left to right and produces
//! a sequence of [`Token`]s. Scanning happens in one of three states:
//!
//! - In the normal state, blank characters separate words, `'` and `"` open
//!   quotations, a backslash escapes the next character verbatim, and the
//!   [operators](Operator) are recognized with a greedy longest-first match.
//! - Inside single quotes, every character up to the closing `'` is literal.
//! - Inside double quotes, a backslash is special only before `"`, `\`, `$`,
//!   or a backtick; everything else up to the closing `"` is literal.
//!
//! Operators are recognized only in the normal state, and a match also
//! terminates the word being accumulated, so `a2>f` lexes as the word `a`,
//! the operator `2>`, and the word `f`. Explicit empty quotations produce
//! empty words: `""` is a word of length zero, not nothing.

use super::SyntaxError;
use std::fmt;

/// Operator token identifier
///
/// Only the operators actually used by the shell grammar are defined: the
/// pipe and the file output redirections for the standard output and
/// standard error.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    /// `|`
    Bar,
    /// `>`
    Greater,
    /// `>>`
    GreaterGreater,
    /// `1>`
    OneGreater,
    /// `1>>`
    OneGreaterGreater,
    /// `2>`
    TwoGreater,
    /// `2>>`
    TwoGreaterGreater,
}

/// All operators with their lexemes, in longest-first match order
///
/// The order matters: [`Operator::at_start_of`] tries the entries from the
/// top, so a lexeme must come before every one of its prefixes.
const OPERATORS: &[(&str, Operator)] = &[
    ("1>>", Operator::OneGreaterGreater),
    ("2>>", Operator::TwoGreaterGreater),
    (">>", Operator::GreaterGreater),
    ("1>", Operator::OneGreater),
    ("2>", Operator::TwoGreater),
    (">", Operator::Greater),
    ("|", Operator::Bar),
];

impl Operator {
    /// Returns the lexeme of the operator.
    #[must_use]
    pub fn lexeme(&self) -> &'static str {
        use Operator::*;
        match self {
            Bar => "|",
            Greater => ">",
            GreaterGreater => ">>",
            OneGreater => "1>",
            OneGreaterGreater => "1>>",
            TwoGreater => "2>",
            TwoGreaterGreater => "2>>",
        }
    }

    /// Returns the operator whose lexeme the given input starts with, if any.
    ///
    /// When more than one lexeme matches, the longest wins, so `">>x"` yields
    /// `GreaterGreater` rather than `Greater`.
    #[must_use]
    pub fn at_start_of(input: &str) -> Option<Operator> {
        OPERATORS
            .iter()
            .find(|(lexeme, _)| input.starts_with(lexeme))
            .map(|&(_, operator)| operator)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

/// Result of lexical analysis
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    /// Word with all quotation removed
    Word(String),
    /// Operator
    Operator(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => f.write_str(word),
            Token::Operator(operator) => operator.fmt(f),
        }
    }
}

/// Returns true if the character separates words in the normal state.
#[must_use]
pub fn is_blank(c: char) -> bool {
    c.is_whitespace()
}

/// Scanner state
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Normal,
    SingleQuote,
    DoubleQuote,
}

/// Characters a backslash escapes inside double quotes
const DOUBLE_QUOTE_ESCAPABLE: [char; 4] = ['"', '\\', '$', '`'];

/// Performs lexical analysis of a command line.
///
/// The input should be a single line with the trailing newline already
/// removed. The result is the token sequence in input order.
///
/// # Errors
///
/// Returns [`SyntaxError::UnclosedSingleQuote`] or
/// [`SyntaxError::UnclosedDoubleQuote`] if the input ends inside a
/// quotation.
pub fn lex(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    // `""` must yield an empty word, so whether a word is in progress is
    // tracked apart from the accumulated text.
    let mut in_word = false;
    let mut state = State::Normal;
    let mut chars = input.char_indices();

    while let Some((index, c)) = chars.next() {
        match state {
            State::Normal => {
                if is_blank(c) {
                    if in_word {
                        tokens.push(Token::Word(std::mem::take(&mut word)));
                        in_word = false;
                    }
                } else if c == '\'' {
                    state = State::SingleQuote;
                    in_word = true;
                } else if c == '"' {
                    state = State::DoubleQuote;
                    in_word = true;
                } else if c == '\\' {
                    match chars.next() {
                        Some((_, escaped)) => word.push(escaped),
                        // A backslash at the end of the input is literal.
                        None => word.push('\\'),
                    }
                    in_word = true;
                } else if let Some(operator) = Operator::at_start_of(&input[index..]) {
                    if in_word {
                        tokens.push(Token::Word(std::mem::take(&mut word)));
                        in_word = false;
                    }
                    tokens.push(Token::Operator(operator));
                    // The operator lexemes are ASCII, so one char is one byte.
                    for _ in 1..operator.lexeme().len() {
                        chars.next();
                    }
                } else {
                    word.push(c);
                    in_word = true;
                }
            }

            State::SingleQuote => {
                if c == '\'' {
                    state = State::Normal;
                } else {
                    word.push(c);
                }
            }

            State::DoubleQuote => {
                if c == '"' {
                    state = State::Normal;
                } else if c == '\\' {
                    match chars.clone().next() {
                        Some((_, escaped)) if DOUBLE_QUOTE_ESCAPABLE.contains(&escaped) => {
                            chars.next();
                            word.push(escaped);
                        }
                        _ => word.push('\\'),
                    }
                } else {
                    word.push(c);
                }
            }
        }
    }

    match state {
        State::Normal => {
            if in_word {
                tokens.push(Token::Word(word));
            }
            Ok(tokens)
        }
        State::SingleQuote => Err(SyntaxError::UnclosedSingleQuote),
        State::DoubleQuote => Err(SyntaxError::UnclosedDoubleQuote),
    }
}
