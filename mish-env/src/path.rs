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

//! `$PATH` search for external utilities
//!
//! [`search_path`] finds the first executable regular file for a bare
//! command name in the directories named by `$PATH`. The search re-probes
//! the file system on every call so that `$PATH` changes and newly
//! installed binaries take effect immediately.

use crate::Env;
use crate::system;
use std::path::{Path, PathBuf};

/// Part of the shell execution environment the path search depends on
///
/// Abstracting the environment behind this trait keeps the search testable
/// without touching the real `$PATH` or file system.
pub trait PathEnv {
    /// Returns the value of `$PATH`, if set.
    fn path(&self) -> Option<String>;
    /// Returns true if there is an executable regular file at the path.
    fn is_executable_file(&self, path: &Path) -> bool;
}

impl PathEnv for Env {
    fn path(&self) -> Option<String> {
        std::env::var("PATH").ok()
    }
    fn is_executable_file(&self, path: &Path) -> bool {
        system::is_executable_file(path)
    }
}

/// Searches `$PATH` for an executable file.
///
/// The directories are tried in order; an empty element stands for the
/// current directory. The returned path is the first candidate that names
/// an executable regular file. The result is relative if the matching
/// `$PATH` element is relative.
#[must_use]
pub fn search_path<E: PathEnv>(env: &E, name: &str) -> Option<PathBuf> {
    let path = env.path()?;
    for dir in path.split(':') {
        let dir = if dir.is_empty() { "." } else { dir };
        let candidate = Path::new(dir).join(name);
        if env.is_executable_file(&candidate) {
            return Some(candidate);
        }
    }
    None
}
