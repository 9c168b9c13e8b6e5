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

//! Exit built-in
//!
//! The **`exit`** built-in causes the shell to exit.
//!
//! # Synopsis
//!
//! ```sh
//! exit [exit_status]
//! ```
//!
//! # Semantics
//!
//! The shell exits with the given exit status. If the operand is omitted,
//! not a non-negative decimal integer, or out of range, the shell exits
//! with status zero.
//!
//! When `exit` runs as one stage of a longer pipeline it does nothing: only
//! an `exit` that is the sole stage of its pipeline terminates the shell.
//!
//! # Implementation notes
//!
//! The built-in does not exit the process itself; it returns a result with
//! [`Divert::Exit`], and the read-eval loop is responsible for persisting
//! the history tail and terminating. The executor ignores the divert for
//! non-sole pipeline stages, which makes the built-in a no-op there.

use mish_env::Env;
use mish_env::builtin::Result;
use mish_env::io::IoTriple;
use mish_env::semantics::{Divert, ExitStatus};
use std::ffi::c_int;
use std::ops::ControlFlow::Break;

/// Entry point for executing the `exit` built-in
pub fn main(_env: &mut Env, args: Vec<String>, _io: &mut IoTriple) -> Result {
    let exit_status = args
        .first()
        .and_then(|operand| operand.parse::<c_int>().ok())
        .filter(|&status| status >= 0)
        .map(ExitStatus)
        .unwrap_or(ExitStatus::SUCCESS);
    Result::with_exit_status_and_divert(exit_status, Break(Divert::Exit(Some(exit_status))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_without_operand() {
        let mut env = Env::new();
        let mut io = IoTriple::inherited();
        let result = main(&mut env, vec![], &mut io);
        let expected = Result::with_exit_status_and_divert(
            ExitStatus::SUCCESS,
            Break(Divert::Exit(Some(ExitStatus::SUCCESS))),
        );
        assert_eq!(result, expected);
    }

    #[test]
    fn exit_with_numeric_operand() {
        let mut env = Env::new();
        let mut io = IoTriple::inherited();
        let result = main(&mut env, vec!["42".to_string()], &mut io);
        let expected = Result::with_exit_status_and_divert(
            ExitStatus(42),
            Break(Divert::Exit(Some(ExitStatus(42)))),
        );
        assert_eq!(result, expected);
    }

    #[test]
    fn exit_ignores_non_numeric_operand() {
        let mut env = Env::new();
        let mut io = IoTriple::inherited();
        let result = main(&mut env, vec!["now".to_string()], &mut io);
        assert_eq!(result.exit_status(), ExitStatus::SUCCESS);
        assert!(result.is_exit());
    }

    #[test]
    fn exit_ignores_negative_operand() {
        let mut env = Env::new();
        let mut io = IoTriple::inherited();
        let result = main(&mut env, vec!["-1".to_string()], &mut io);
        assert_eq!(result.exit_status(), ExitStatus::SUCCESS);
        assert!(result.is_exit());
    }
}
