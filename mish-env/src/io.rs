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

//! Type definitions for I/O
//!
//! Every command invocation, built-in or external, receives an
//! [`IoTriple`]: the three effective standard streams for that invocation.
//! The handles own the file descriptors they refer to, so dropping a triple
//! closes exactly the descriptors that belong to it and nothing else. A
//! descriptor handed to a child process or a drainer thread is moved out of
//! the triple, transferring the obligation to close it.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::os::fd::OwnedFd;
use std::process::Stdio;
use std::rc::Rc;

#[doc(no_inline)]
pub use mish_syntax::syntax::Fd;

/// Standard input handle of one command invocation
#[derive(Debug)]
pub enum Input {
    /// The shell's own standard input
    Inherit,
    /// Read end of an anonymous pipe from the previous pipeline stage
    Pipe(OwnedFd),
}

impl Input {
    /// Returns true if the input is a pipe from an upstream stage.
    #[must_use]
    pub fn is_pipe(&self) -> bool {
        matches!(self, Input::Pipe(_))
    }

    /// Converts the input into a standard stream for a child process.
    #[must_use]
    pub fn into_stdio(self) -> Stdio {
        match self {
            Input::Inherit => Stdio::inherit(),
            Input::Pipe(fd) => Stdio::from(fd),
        }
    }
}

/// Standard output or standard error handle of one command invocation
#[derive(Debug)]
pub enum Output {
    /// One of the shell's own standard streams
    ///
    /// The descriptor is [`Fd::STDOUT`] or [`Fd::STDERR`]; the shell never
    /// closes it.
    Inherit(Fd),
    /// An owned open file: a redirection target or a pipe write end
    File(File),
    /// In-memory sink that collects everything written to it
    ///
    /// This is the capture device used by unit tests of built-ins; real
    /// execution never constructs it. It cannot back a child process.
    Captured(Rc<RefCell<Vec<u8>>>),
}

impl Output {
    /// Returns a handle for the shell's own standard output.
    #[must_use]
    pub fn stdout() -> Output {
        Output::Inherit(Fd::STDOUT)
    }

    /// Returns a handle for the shell's own standard error.
    #[must_use]
    pub fn stderr() -> Output {
        Output::Inherit(Fd::STDERR)
    }

    /// Wraps the write end of a pipe.
    #[must_use]
    pub fn from_pipe(fd: OwnedFd) -> Output {
        Output::File(File::from(fd))
    }

    /// Returns a capturing handle together with its backing buffer.
    #[must_use]
    pub fn captured() -> (Output, Rc<RefCell<Vec<u8>>>) {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        (Output::Captured(Rc::clone(&buffer)), buffer)
    }

    /// Converts the output into a standard stream for a child process.
    ///
    /// # Errors
    ///
    /// A [`Captured`](Self::Captured) handle has no file descriptor behind
    /// it, so the conversion fails with [`io::ErrorKind::Unsupported`].
    pub fn into_stdio(self) -> io::Result<Stdio> {
        match self {
            Output::Inherit(_) => Ok(Stdio::inherit()),
            Output::File(file) => Ok(Stdio::from(file)),
            Output::Captured(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "captured output cannot back a child process",
            )),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Inherit(fd) if *fd == Fd::STDOUT => io::stdout().write(buf),
            Output::Inherit(_) => io::stderr().write(buf),
            Output::File(file) => file.write(buf),
            Output::Captured(buffer) => {
                buffer.borrow_mut().extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Inherit(fd) if *fd == Fd::STDOUT => io::stdout().flush(),
            Output::Inherit(_) => io::stderr().flush(),
            Output::File(file) => file.flush(),
            Output::Captured(_) => Ok(()),
        }
    }
}

/// The three effective standard streams of one command invocation
#[derive(Debug)]
pub struct IoTriple {
    /// Effective standard input
    pub stdin: Input,
    /// Effective standard output
    pub stdout: Output,
    /// Effective standard error
    pub stderr: Output,
}

impl IoTriple {
    /// Returns a triple referring to the shell's own standard streams.
    #[must_use]
    pub fn inherited() -> IoTriple {
        IoTriple {
            stdin: Input::Inherit,
            stdout: Output::stdout(),
            stderr: Output::stderr(),
        }
    }

    /// Returns a triple that captures both output streams in memory.
    ///
    /// The returned buffers collect what is written to the triple's standard
    /// output and standard error. Like [`Output::captured`], this is meant
    /// for tests.
    #[must_use]
    pub fn captured() -> (IoTriple, Rc<RefCell<Vec<u8>>>, Rc<RefCell<Vec<u8>>>) {
        let (stdout, out_buffer) = Output::captured();
        let (stderr, err_buffer) = Output::captured();
        let triple = IoTriple {
            stdin: Input::Inherit,
            stdout,
            stderr,
        };
        (triple, out_buffer, err_buffer)
    }
}

impl Default for IoTriple {
    fn default() -> IoTriple {
        IoTriple::inherited()
    }
}
