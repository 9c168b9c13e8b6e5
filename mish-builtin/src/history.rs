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

//! History built-in
//!
//! The **`history`** built-in prints or manipulates the command history.
//!
//! # Synopsis
//!
//! ```sh
//! history [count]
//! history -r file
//! history -w file
//! history -a file
//! ```
//!
//! # Description
//!
//! Without arguments, the built-in prints the whole in-memory history to
//! the standard output, one command per line, numbered from 1. With a
//! ***count*** operand, only the last *count* entries are printed, still
//! carrying their original numbers.
//!
//! With the **`-r`** option, the non-empty lines of ***file*** are read and
//! appended to the in-memory history.
//!
//! With the **`-w`** option, ***file*** is overwritten with the whole
//! in-memory history, one command per line.
//!
//! With the **`-a`** option, the whole in-memory history is appended to
//! ***file*** and the in-memory history is then cleared.
//!
//! These explicit operations are independent of the automatic history file
//! handling the shell performs at startup and exit.
//!
//! # Errors
//!
//! Option and file errors are reported to the standard error with a
//! `history:` prefix.
//!
//! # Exit status
//!
//! Zero on success; one on error.

use crate::common::{output, report_failure};
use mish_env::Env;
use mish_env::builtin::Result;
use mish_env::io::IoTriple;
use mish_env::semantics::ExitStatus;
use std::fmt::Write as _;
use std::path::Path;

/// Prints the numbered history listing.
///
/// With `count`, only that many trailing entries are printed; the numbers
/// still reflect each entry's position in the whole history.
fn list(env: &mut Env, io: &mut IoTriple, count: Option<usize>) -> Result {
    let entries = env.history.entries();
    let start = match count {
        Some(count) => entries.len().saturating_sub(count),
        None => 0,
    };

    let mut listing = String::new();
    for (index, entry) in entries.iter().enumerate().skip(start) {
        _ = writeln!(listing, "{:5}  {}", index + 1, entry);
    }
    output(io, &listing)
}

/// Entry point for executing the `history` built-in
pub fn main(env: &mut Env, args: Vec<String>, io: &mut IoTriple) -> Result {
    match args.first().map(String::as_str) {
        None => list(env, io, None),

        Some(option @ ("-r" | "-w" | "-a")) => {
            let Some(file) = args.get(1) else {
                return report_failure(io, format_args!("history: {option}: missing file operand"));
            };
            let path = Path::new(file);
            let result = match option {
                "-r" => env.history.load(path).map(drop),
                "-w" => env.history.write_to(path),
                _ => env.history.append_to(path).map(|()| env.history.clear()),
            };
            match result {
                Ok(()) => ExitStatus::SUCCESS.into(),
                Err(error) => report_failure(io, format_args!("history: {file}: {error}")),
            }
        }

        Some(operand) => match operand.parse::<usize>() {
            Ok(count) => list(env, io, Some(count)),
            Err(_) => report_failure(
                io,
                format_args!("history: {operand}: numeric argument required"),
            ),
        },
    }
}
