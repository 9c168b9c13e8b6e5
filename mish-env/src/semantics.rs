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

//! Type definitions for command execution

use std::ffi::c_int;
use std::ops::ControlFlow;

/// Number that summarizes the result of command execution
///
/// An exit status is an integer returned from a utility (or command) when
/// executed. Many utilities return an exit status of zero when successful
/// and non-zero otherwise.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub c_int);

impl ExitStatus {
    /// Exit status of successful execution
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Exit status of failed execution
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// Exit status for errors that prevent execution
    pub const ERROR: ExitStatus = ExitStatus(2);

    /// Exit status for a command that was found but could not be executed
    pub const NOEXEC: ExitStatus = ExitStatus(126);

    /// Exit status for a command that was not found
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<c_int> for ExitStatus {
    fn from(value: c_int) -> ExitStatus {
        ExitStatus(value)
    }
}

impl From<ExitStatus> for c_int {
    fn from(exit_status: ExitStatus) -> c_int {
        exit_status.0
    }
}

/// Converts the wait status of a child process to an exit status.
///
/// A signaled child yields 128 plus the signal number, the convention most
/// shells follow.
impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        match status.code() {
            Some(code) => ExitStatus(code),
            None => ExitStatus(128 + status.signal().unwrap_or(0)),
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(exit_status: ExitStatus) -> std::process::ExitCode {
        std::process::ExitCode::from(exit_status.0 as u8)
    }
}

/// Request to deviate from the normal flow of execution
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Divert {
    /// Exit from the shell
    ///
    /// The optional exit status overrides the current `$?`-equivalent; if it
    /// is `None`, the environment's last exit status is used.
    Exit(Option<ExitStatus>),
}

impl Divert {
    /// Returns the exit status associated with the divert, if any.
    #[must_use]
    pub fn exit_status(&self) -> Option<ExitStatus> {
        match self {
            Divert::Exit(exit_status) => *exit_status,
        }
    }
}

/// Result of command execution
///
/// `Break` means the caller should divert the flow of execution instead of
/// continuing to the next command.
pub type Result<T = ()> = ControlFlow<Divert, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_constants() {
        assert_eq!(ExitStatus::SUCCESS.0, 0);
        assert_eq!(ExitStatus::FAILURE.0, 1);
        assert_eq!(ExitStatus::ERROR.0, 2);
        assert_eq!(ExitStatus::NOEXEC.0, 126);
        assert_eq!(ExitStatus::NOT_FOUND.0, 127);
    }

    #[test]
    fn divert_exit_status() {
        assert_eq!(Divert::Exit(None).exit_status(), None);
        let divert = Divert::Exit(Some(ExitStatus(42)));
        assert_eq!(divert.exit_status(), Some(ExitStatus(42)));
    }
}
