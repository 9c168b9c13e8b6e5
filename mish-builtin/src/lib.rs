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

//! Implementation of the shell built-in utilities
//!
//! Each built-in utility is implemented in the submodule named after the
//! utility. The submodule contains the `main` function that implements the
//! built-in. The module documentation for each submodule describes the
//! behavior of the built-in.
//!
//! The [`common`] module provides helper functions shared by the built-in
//! implementations.
//!
//! Every `main` function receives the shell environment, the arguments (not
//! including the command name), and the effective I/O triple of the
//! invocation. Built-ins write through the triple, never directly to the
//! process streams, so redirections and pipes apply to them transparently.

pub mod cd;
pub mod common;
pub mod echo;
pub mod exit;
pub mod history;
pub mod pwd;
pub mod r#type;

#[doc(no_inline)]
pub use mish_env::builtin::*;

/// Returns an iterator over all the implemented built-in utilities.
///
/// Each item is a tuple of the built-in name and the corresponding
/// [`Builtin`] definition. The items are sorted by name in ascending order.
pub fn iter() -> impl Iterator<Item = (&'static str, Builtin)> {
    [
        ("cd", Builtin::new(cd::main)),
        ("echo", Builtin::new(echo::main)),
        ("exit", Builtin::new(exit::main)),
        ("history", Builtin::new(history::main)),
        ("pwd", Builtin::new(pwd::main)),
        ("type", Builtin::new(r#type::main)),
    ]
    .into_iter()
}
