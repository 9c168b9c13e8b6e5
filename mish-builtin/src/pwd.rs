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

//! Pwd built-in
//!
//! The **`pwd`** built-in prints the pathname of the current working
//! directory followed by a newline to the standard output.
//!
//! # Exit status
//!
//! Zero if the path was successfully printed; non-zero otherwise. The
//! built-in may fail if the working directory has been removed or an
//! ancestor directory is not accessible, in which case the error is
//! reported to the standard error.

use crate::common::{output, report_failure};
use mish_env::Env;
use mish_env::builtin::Result;
use mish_env::io::IoTriple;

/// Entry point for executing the `pwd` built-in
pub fn main(_env: &mut Env, _args: Vec<String>, io: &mut IoTriple) -> Result {
    match std::env::current_dir() {
        Ok(path) => output(io, &format!("{}\n", path.display())),
        Err(error) => report_failure(io, format_args!("pwd: {error}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mish_env::semantics::ExitStatus;

    #[test]
    fn pwd_prints_the_working_directory() {
        let mut env = Env::new();
        let (mut io, stdout, _stderr) = IoTriple::captured();
        let result = main(&mut env, vec![], &mut io);
        assert_eq!(result.exit_status(), ExitStatus::SUCCESS);

        let expected = format!("{}\n", std::env::current_dir().unwrap().display());
        assert_eq!(*stdout.borrow(), expected.as_bytes());
    }
}
