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

//! Type definitions for built-in utilities
//!
//! This module provides data types for defining built-in utilities. Concrete
//! implementations of the built-ins live in the `mish-builtin` crate.

use crate::Env;
use crate::io::IoTriple;
use crate::semantics::{Divert, ExitStatus};
use std::fmt::Debug;
use std::ops::ControlFlow::{Break, Continue};

/// Result of built-in utility execution
///
/// The result contains the exit status of the built-in and an optional
/// [`Divert`] that may affect the behavior of the shell after the built-in
/// returns.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[must_use]
pub struct Result {
    exit_status: ExitStatus,
    divert: crate::semantics::Result,
}

impl Result {
    /// Creates a new result with the given exit status and no divert.
    pub const fn new(exit_status: ExitStatus) -> Self {
        Self {
            exit_status,
            divert: Continue(()),
        }
    }

    /// Creates a new result with the given exit status and divert.
    #[inline]
    pub const fn with_exit_status_and_divert(
        exit_status: ExitStatus,
        divert: crate::semantics::Result,
    ) -> Self {
        Self {
            exit_status,
            divert,
        }
    }

    /// Returns the exit status of this result.
    #[inline]
    #[must_use]
    pub const fn exit_status(&self) -> ExitStatus {
        self.exit_status
    }

    /// Returns the optional divert to be taken by the caller.
    #[inline]
    #[must_use]
    pub const fn divert(&self) -> crate::semantics::Result {
        self.divert
    }

    /// Returns true if this result requests the shell to exit.
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        matches!(self.divert, Break(Divert::Exit(_)))
    }
}

impl Default for Result {
    #[inline]
    fn default() -> Self {
        Self::new(ExitStatus::default())
    }
}

impl From<ExitStatus> for Result {
    #[inline]
    fn from(exit_status: ExitStatus) -> Self {
        Self::new(exit_status)
    }
}

/// Type of functions that implement the behavior of a built-in
///
/// The function takes three arguments: the environment the built-in runs
/// in, the arguments to the built-in (not including the command name), and
/// the I/O triple the built-in should read from and write to.
pub type Main = fn(&mut Env, Vec<String>, &mut IoTriple) -> Result;

/// Built-in utility definition
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct Builtin {
    /// Function that implements the behavior of the built-in
    pub execute: Main,

    /// Whether the built-in consumes its standard input
    ///
    /// When a built-in that does not read its standard input runs in the
    /// middle of a pipeline, the executor drains the upstream pipe on its
    /// behalf so the upstream writer cannot block on a full pipe.
    pub reads_stdin: bool,
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
            .field("reads_stdin", &self.reads_stdin)
            .finish_non_exhaustive()
    }
}

impl Builtin {
    /// Creates a new built-in utility definition.
    ///
    /// The `reads_stdin` field is set to `false`, which is correct for every
    /// built-in currently implemented.
    pub const fn new(execute: Main) -> Self {
        Self {
            execute,
            reads_stdin: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(_env: &mut Env, _args: Vec<String>, _io: &mut IoTriple) -> Result {
        Result::default()
    }

    #[test]
    fn result_defaults_to_success_without_divert() {
        let result = Result::default();
        assert_eq!(result.exit_status(), ExitStatus::SUCCESS);
        assert_eq!(result.divert(), Continue(()));
        assert!(!result.is_exit());
    }

    #[test]
    fn result_with_divert() {
        let result = Result::with_exit_status_and_divert(
            ExitStatus(7),
            Break(Divert::Exit(Some(ExitStatus(7)))),
        );
        assert_eq!(result.exit_status(), ExitStatus(7));
        assert!(result.is_exit());
    }

    #[test]
    fn builtin_new_does_not_read_stdin() {
        let builtin = Builtin::new(dummy);
        assert!(!builtin.reads_stdin);
    }
}
