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

//! This crate defines the shell execution environment.
//!
//! The [`Env`] struct collects the state that may affect or be affected by
//! command execution: the registered built-in utilities, the command
//! history, and the exit status of the last executed pipeline. An `Env`
//! instance is passed explicitly to every operation; the shell keeps no
//! process-wide mutable state of its own.
//!
//! System-managed state (the working directory, the process environment
//! variables `PATH`, `HOME`, and `HISTFILE`, and the open file descriptors)
//! is accessed through the underlying system at point of use. The [`system`]
//! module collects the thin wrappers this crate uses for that access.

pub mod builtin;
pub mod history;
pub mod io;
pub mod path;
pub mod semantics;
pub mod system;

use self::builtin::Builtin;
use self::history::History;
use self::semantics::ExitStatus;
use std::collections::HashMap;

/// Whole shell execution environment
#[derive(Clone, Debug, Default)]
pub struct Env {
    /// Built-in utilities available in the environment
    pub builtins: HashMap<&'static str, Builtin>,

    /// Command history of the current shell session
    pub history: History,

    /// Exit status of the last executed pipeline
    pub exit_status: ExitStatus,
}

impl Env {
    /// Creates a new environment with no built-ins and an empty history.
    #[must_use]
    pub fn new() -> Env {
        Env::default()
    }
}
