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

//! Echo built-in
//!
//! The **`echo`** built-in prints its arguments.
//!
//! # Synopsis
//!
//! ```sh
//! echo [argument...]
//! ```
//!
//! # Description
//!
//! The built-in prints the arguments joined with single spaces, followed by
//! a newline, to the standard output. No options or escape sequences are
//! recognized; every argument is printed verbatim.
//!
//! # Exit status
//!
//! Always zero. A write error is silently ignored: the downstream consumer
//! that closed the stream is responsible for its own state.

use mish_env::Env;
use mish_env::builtin::Result;
use mish_env::io::IoTriple;
use mish_env::semantics::ExitStatus;
use std::io::Write;

/// Entry point for executing the `echo` built-in
pub fn main(_env: &mut Env, args: Vec<String>, io: &mut IoTriple) -> Result {
    let line = args.join(" ");
    let _ = writeln!(io.stdout, "{line}");
    let _ = io.stdout.flush();
    ExitStatus::SUCCESS.into()
}
