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

//! Type built-in
//!
//! The **`type`** built-in identifies a command name.
//!
//! # Synopsis
//!
//! ```sh
//! type name
//! ```
//!
//! # Description
//!
//! The built-in prints how the shell would interpret the name, using the
//! same resolution order as command execution: built-ins first, then the
//! `$PATH` search.
//!
//! - `<name> is a shell builtin` if the name is a built-in utility
//! - `<name> is <path>` if the name resolves to an executable file
//! - `<name>: not found` otherwise
//!
//! All three lines go to the standard output.
//!
//! # Exit status
//!
//! Zero if the name was resolved; one if the name was not found or no
//! operand was given.

use crate::common::output;
use mish_env::Env;
use mish_env::builtin::Result;
use mish_env::io::IoTriple;
use mish_env::path::search_path;
use mish_env::semantics::ExitStatus;
use mish_env::system;
use std::io::Write;
use std::path::Path;

/// Entry point for executing the `type` built-in
pub fn main(env: &mut Env, args: Vec<String>, io: &mut IoTriple) -> Result {
    let Some(name) = args.first() else {
        return ExitStatus::FAILURE.into();
    };

    if env.builtins.contains_key(name.as_str()) {
        return output(io, &format!("{name} is a shell builtin\n"));
    }

    if name.contains('/') {
        if system::is_executable_file(Path::new(name)) {
            return output(io, &format!("{name} is {name}\n"));
        }
    } else if let Some(path) = search_path(env, name) {
        return output(io, &format!("{name} is {}\n", path.display()));
    }

    let _ = writeln!(io.stdout, "{name}: not found");
    let _ = io.stdout.flush();
    ExitStatus::FAILURE.into()
}
