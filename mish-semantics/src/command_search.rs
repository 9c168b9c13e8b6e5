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

//! Command search
//!
//! The command search determines the target a command name refers to. A
//! [target](Target) is either a built-in utility or an external utility.
//!
//! If the command name contains a slash, the name itself is probed as the
//! path of an external utility, bypassing `$PATH`. Otherwise built-ins take
//! priority, and the remaining names are searched for in `$PATH`.

use mish_env::Env;
use mish_env::builtin::Builtin;
use mish_env::path::{PathEnv, search_path};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Target of a command name
///
/// This is the result of the [command search](search).
#[derive(Clone, Debug)]
pub enum Target {
    /// Built-in utility
    Builtin(Builtin),
    /// External utility
    External {
        /// Path to the external utility
        ///
        /// The path is not necessarily absolute: a relative `$PATH` entry
        /// yields a relative path, and a slash-containing command name is
        /// used as is.
        path: PathBuf,
    },
}

impl From<Builtin> for Target {
    fn from(builtin: Builtin) -> Target {
        Target::Builtin(builtin)
    }
}

/// Part of the shell execution environment the command search depends on
pub trait SearchEnv: PathEnv {
    /// Accesses the built-in set in the environment.
    fn builtins(&self) -> &HashMap<&'static str, Builtin>;
}

impl SearchEnv for Env {
    fn builtins(&self) -> &HashMap<&'static str, Builtin> {
        &self.builtins
    }
}

/// Performs command search.
///
/// Returns `None` if the name is neither a built-in nor an executable
/// regular file, in which case the caller reports the command as not
/// found.
#[must_use]
pub fn search<E: SearchEnv>(env: &E, name: &str) -> Option<Target> {
    if name.contains('/') {
        return env
            .is_executable_file(Path::new(name))
            .then(|| Target::External {
                path: PathBuf::from(name),
            });
    }

    if let Some(&builtin) = env.builtins().get(name) {
        return Some(builtin.into());
    }

    search_path(env, name).map(|path| Target::External { path })
}
