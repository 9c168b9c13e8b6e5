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

//! Redirection application
//!
//! [`apply_redirs`] opens a stage's redirection targets and installs them in
//! the stage's I/O triple. Every listed file is opened in input order with
//! its own mode, so `cmd > a > b` creates and truncates both `a` and `b`;
//! the last open for each file descriptor becomes the effective stream
//! (here `b`), matching observable shell behavior.

use mish_env::io::{Fd, IoTriple, Output};
use mish_syntax::syntax::{Redir, RedirOp};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use thiserror::Error;

/// Error opening a redirection target
#[derive(Debug, Error)]
#[error("{path}: {source}")]
pub struct RedirError {
    /// Pathname of the file that could not be opened
    pub path: String,
    /// Underlying error
    #[source]
    pub source: io::Error,
}

/// Opens one redirection target with the mode its operator calls for.
///
/// The file is created with mode 0644 if it does not exist.
fn open(redir: &Redir) -> Result<File, RedirError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).mode(0o644);
    match redir.op {
        RedirOp::FileOut => options.truncate(true),
        RedirOp::FileAppend => options.append(true),
    };
    options.open(&redir.path).map_err(|source| RedirError {
        path: redir.path.clone(),
        source,
    })
}

/// Applies a stage's redirections to its I/O triple.
///
/// The redirections are processed in input order. Each target is opened
/// even when a later redirection overrides it, preserving the truncation
/// and creation side effects of the earlier ones. On error, targets opened
/// so far keep their side effects, but the returned error means the stage
/// must not execute.
pub fn apply_redirs(redirs: &[Redir], io: &mut IoTriple) -> Result<(), RedirError> {
    for redir in redirs {
        let file = open(redir)?;
        match redir.fd {
            Fd::STDERR => io.stderr = Output::File(file),
            _ => io.stdout = Output::File(file),
        }
    }
    Ok(())
}
