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

//! Common items for implementing built-ins
//!
//! Built-ins report their regular output and their error messages through
//! the functions in this module so that the streams of the effective
//! [`IoTriple`] are used consistently.

use mish_env::builtin::Result;
use mish_env::io::IoTriple;
use mish_env::semantics::ExitStatus;
use std::fmt::Display;
use std::io::Write;

/// Prints the content to the triple's standard output.
///
/// Returns a successful result, or a failure result if the output could not
/// be written, in which case a message is printed to the triple's standard
/// error.
pub fn output(io: &mut IoTriple, content: &str) -> Result {
    match io
        .stdout
        .write_all(content.as_bytes())
        .and_then(|()| io.stdout.flush())
    {
        Ok(()) => ExitStatus::SUCCESS.into(),
        Err(error) => report_failure(io, format_args!("error printing results: {error}")),
    }
}

/// Prints a message to the triple's standard error and returns a failure
/// result ([`ExitStatus::FAILURE`]).
///
/// A newline is appended to the message. Errors writing the message are
/// ignored; there is nowhere left to report them.
pub fn report_failure(io: &mut IoTriple, message: impl Display) -> Result {
    report(io, message, ExitStatus::FAILURE)
}

/// Prints a message to the triple's standard error and returns a result
/// with the given exit status.
pub fn report(io: &mut IoTriple, message: impl Display, exit_status: ExitStatus) -> Result {
    let _ = writeln!(io.stderr, "{message}");
    let _ = io.stderr.flush();
    exit_status.into()
}
