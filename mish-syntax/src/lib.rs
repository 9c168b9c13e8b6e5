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

//! This crate defines the command line syntax of the mish shell.
//!
//! The [`syntax`] module contains the abstract syntax types that describe a
//! parsed command line: a [pipeline](syntax::Pipeline) of
//! [stages](syntax::Stage), each carrying its words and
//! [redirections](syntax::Redir). The [`parser`] module converts a raw
//! command line string into those types, with the lexical analysis living in
//! the [`parser::lex`] submodule.
//!
//! The supported grammar is deliberately small: words with POSIX
//! single-quote, double-quote, and backslash quoting, the pipe operator, and
//! the file output redirection operators (`>`, `>>`, `1>`, `1>>`, `2>`,
//! `2>>`). There are no compound commands, expansions, or here-documents.

pub mod parser;
pub mod syntax;
