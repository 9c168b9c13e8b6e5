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

//! Shell startup
//!
//! Startup builds the execution environment the read-eval loop runs in:
//! it registers the built-in utilities and seeds the command history from
//! the file named by `$HISTFILE`, when that variable is set and the file
//! exists. The number of lines loaded becomes the history's initial size,
//! so that exit-time persistence appends only what this session adds.

use mish_env::Env;
use std::path::PathBuf;

/// Returns the path of the history file, if one is configured.
///
/// The path comes from `$HISTFILE`. An unset or empty variable means no
/// history persistence.
#[must_use]
pub fn history_file() -> Option<PathBuf> {
    let value = std::env::var_os("HISTFILE")?;
    if value.is_empty() {
        return None;
    }
    Some(PathBuf::from(value))
}

/// Prepares the shell execution environment.
///
/// A failure to read an existing history file is reported to the standard
/// error once and otherwise ignored; the shell still starts.
#[must_use]
pub fn prepare_env() -> Env {
    let mut env = Env::new();
    env.builtins.extend(mish_builtin::iter());

    if let Some(path) = history_file() {
        if path.exists() {
            if let Err(error) = env.history.load_initial(&path) {
                eprintln!("mish: cannot read {}: {error}", path.display());
            }
        }
    }

    env
}
