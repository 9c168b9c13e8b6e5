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

//! Cd built-in
//!
//! The **`cd`** built-in changes the working directory.
//!
//! # Synopsis
//!
//! ```sh
//! cd [directory]
//! ```
//!
//! # Description
//!
//! The built-in changes the working directory to the operand. If the
//! operand is omitted or is a single tilde (`~`), the value of `$HOME` is
//! used; an operand starting with `~/` has the tilde replaced with `$HOME`.
//! Any other operand is used as is, absolute or relative to the current
//! working directory.
//!
//! If the operand is omitted and `$HOME` is not set, the built-in does
//! nothing and succeeds.
//!
//! # Errors
//!
//! If the working directory cannot be changed, a message naming the operand
//! as given is printed to the standard error:
//!
//! - `cd: <operand>: No such file or directory`
//! - `cd: <operand>: Permission denied`
//!
//! Other failures print the operating system's description of the error.
//!
//! # Exit status
//!
//! Zero if the working directory was changed (or there was nothing to do);
//! one on error.

use crate::common::report_failure;
use mish_env::Env;
use mish_env::builtin::Result;
use mish_env::io::IoTriple;
use mish_env::semantics::ExitStatus;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Resolves the operand to the directory to change to.
///
/// Returns `None` if there is no operand and no home directory to default
/// to.
fn target(operand: Option<&str>, home: Option<&str>) -> Option<PathBuf> {
    match operand {
        None | Some("~") => home.map(PathBuf::from),
        Some(operand) => match operand.strip_prefix("~/") {
            Some(rest) => match home {
                Some(home) => Some(PathBuf::from(home).join(rest)),
                None => Some(PathBuf::from(operand)),
            },
            None => Some(PathBuf::from(operand)),
        },
    }
}

/// Entry point for executing the `cd` built-in
pub fn main(_env: &mut Env, args: Vec<String>, io: &mut IoTriple) -> Result {
    let operand = args.first().map(String::as_str);
    let home = std::env::var("HOME").ok();
    let Some(path) = target(operand, home.as_deref()) else {
        return ExitStatus::SUCCESS.into();
    };

    match std::env::set_current_dir(&path) {
        Ok(()) => ExitStatus::SUCCESS.into(),
        Err(error) => {
            let shown = operand.unwrap_or("~");
            match error.kind() {
                ErrorKind::NotFound => {
                    report_failure(io, format_args!("cd: {shown}: No such file or directory"))
                }
                ErrorKind::PermissionDenied => {
                    report_failure(io, format_args!("cd: {shown}: Permission denied"))
                }
                _ => report_failure(io, format_args!("cd: {shown}: {error}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // `main` changes the working directory of the whole test process, so
    // only the error paths and the pure operand resolution are tested here.
    // The successful paths are covered by the integration tests driving the
    // shell binary.

    #[test]
    fn target_defaults_to_home() {
        assert_eq!(target(None, Some("/home/u")), Some(PathBuf::from("/home/u")));
        assert_eq!(target(None, None), None);
    }

    #[test]
    fn target_expands_tilde() {
        let home = Some("/home/u");
        assert_eq!(target(Some("~"), home), Some(PathBuf::from("/home/u")));
        assert_eq!(
            target(Some("~/src"), home),
            Some(PathBuf::from("/home/u/src"))
        );
    }

    #[test]
    fn target_keeps_other_operands_verbatim() {
        assert_eq!(target(Some("/tmp"), None), Some(PathBuf::from("/tmp")));
        assert_eq!(target(Some("sub/dir"), None), Some(PathBuf::from("sub/dir")));
        // A tilde not followed by a slash is not expanded.
        assert_eq!(target(Some("~user"), None), Some(PathBuf::from("~user")));
    }

    #[test]
    fn cd_to_missing_directory_reports_not_found() {
        let mut env = Env::new();
        let (mut io, stdout, stderr) = IoTriple::captured();
        let args = vec!["/no/such/directory".to_string()];
        let result = main(&mut env, args, &mut io);
        assert_eq!(result.exit_status(), ExitStatus::FAILURE);
        assert_eq!(*stdout.borrow(), b"");
        assert_eq!(
            *stderr.borrow(),
            b"cd: /no/such/directory: No such file or directory\n"
        );
    }
}
