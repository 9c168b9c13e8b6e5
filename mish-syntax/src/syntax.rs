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

//! Abstract syntax types for parsed command lines
//!
//! A successfully parsed command line is a [`Pipeline`], which is a non-empty
//! sequence of [`Stage`]s. Each stage carries the decoded words that make up
//! its command name and arguments, plus the [`Redir`]ections that apply to
//! it. The types in this module are plain data; all behavior attached to
//! them lives in the `mish-semantics` crate.
//!
//! The `Display` implementations print words verbatim without reconstructing
//! the quotation that produced them, so the output is meant for diagnostics,
//! not for re-parsing.

use std::fmt;
use std::os::fd::RawFd;

/// File descriptor number
///
/// This is a thin wrapper around the raw integer value. It does not own the
/// underlying descriptor; ownership is tracked with `std::os::fd::OwnedFd`
/// where it matters.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fd(pub RawFd);

impl Fd {
    /// File descriptor for the standard input
    pub const STDIN: Fd = Fd(0);
    /// File descriptor for the standard output
    pub const STDOUT: Fd = Fd(1);
    /// File descriptor for the standard error
    pub const STDERR: Fd = Fd(2);
}

impl From<RawFd> for Fd {
    fn from(raw_fd: RawFd) -> Fd {
        Fd(raw_fd)
    }
}

impl fmt::Display for Fd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Redirection operators
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedirOp {
    /// `>` (truncate the file, creating it if missing)
    FileOut,
    /// `>>` (append to the file, creating it if missing)
    FileAppend,
}

impl fmt::Display for RedirOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirOp::FileOut => f.write_str(">"),
            RedirOp::FileAppend => f.write_str(">>"),
        }
    }
}

/// Redirection of one file descriptor to a file
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redir {
    /// File descriptor the redirection applies to (1 or 2)
    pub fd: Fd,
    /// How the target file is opened
    pub op: RedirOp,
    /// Pathname of the target file
    pub path: String,
}

impl fmt::Display for Redir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fd == Fd::STDOUT {
            write!(f, "{} {}", self.op, self.path)
        } else {
            write!(f, "{}{} {}", self.fd, self.op, self.path)
        }
    }
}

/// One command position within a pipeline
///
/// The words are the decoded command name and arguments in input order. A
/// stage with an empty `argv` is a pure redirection: its files are opened
/// (and created or truncated) but no command runs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stage {
    /// Command name and arguments (`argv[0]` is the name)
    pub argv: Vec<String>,
    /// Redirections in input order
    ///
    /// Duplicates for one file descriptor are preserved; the last one wins
    /// at execution time while the earlier ones are still opened for their
    /// side effects.
    pub redirs: Vec<Redir>,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for word in &self.argv {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
            first = false;
        }
        for redir in &self.redirs {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{redir}")?;
            first = false;
        }
        Ok(())
    }
}

/// Sequence of stages connected with pipes
///
/// A parsed pipeline always contains at least one stage. Every boundary
/// between two adjacent stages stands for exactly one anonymous pipe
/// connecting the former's standard output to the latter's standard input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pipeline {
    /// Stages in input order
    pub stages: Vec<Stage>,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for stage in &self.stages {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{stage}")?;
            first = false;
        }
        Ok(())
    }
}
