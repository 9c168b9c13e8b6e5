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

//! Line editor
//!
//! The editor reads one command line per call, emitting the `$ ` prompt
//! first. When the standard input is a terminal, the terminal is switched
//! to character mode (`ICANON` and `ECHO` off) for the duration of the
//! read and every byte is handled as it arrives: printable bytes echo and
//! accumulate, backspace erases, TAB invokes the completion engine, and
//! newline delivers the line. When the standard input is not a terminal,
//! the editor degrades to plain buffered line reads (still emitting the
//! prompt) and completion never triggers.
//!
//! Raw mode is restored by a guard on every exit path, including panics
//! and errors in the middle of a read.

use crate::completion::{self, Action, TabState};
use mish_env::Env;
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use std::io::{self, IsTerminal, Read, Write};

/// The command line prompt
pub const PROMPT: &str = "$ ";

/// Bell control byte, emitted for ambiguous completions
const BELL: u8 = 0x07;

/// Result of reading one line
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReadLine {
    /// A complete line, without the trailing newline
    Line(String),
    /// End of input; the shell should exit cleanly
    Eof,
}

/// Scoped character-mode switch for the terminal
///
/// Creating the guard turns off canonical input processing and input echo
/// on the standard input; dropping it restores the saved settings.
#[derive(Debug)]
struct RawModeGuard {
    saved: Termios,
}

impl RawModeGuard {
    fn enter() -> io::Result<RawModeGuard> {
        let stdin = io::stdin();
        let saved = termios::tcgetattr(&stdin)?;
        let mut raw = saved.clone();
        raw.local_flags &= !(LocalFlags::ICANON | LocalFlags::ECHO);
        // Deliver every byte as soon as it arrives.
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(&stdin, SetArg::TCSANOW, &raw)?;
        Ok(RawModeGuard { saved })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let stdin = io::stdin();
        let _ = termios::tcsetattr(&stdin, SetArg::TCSANOW, &self.saved);
    }
}

/// Character-mode line editor over the standard input
#[derive(Debug)]
pub struct LineEditor {
    interactive: bool,
}

impl LineEditor {
    /// Creates an editor, detecting whether the standard input is a
    /// terminal.
    #[must_use]
    pub fn new() -> LineEditor {
        LineEditor {
            interactive: io::stdin().is_terminal(),
        }
    }

    /// Reads one command line, prompting first.
    pub fn read_line(&mut self, env: &Env) -> io::Result<ReadLine> {
        let mut stdout = io::stdout();
        stdout.write_all(PROMPT.as_bytes())?;
        stdout.flush()?;

        if self.interactive {
            read_interactive(env)
        } else {
            read_plain()
        }
    }
}

impl Default for LineEditor {
    fn default() -> LineEditor {
        LineEditor::new()
    }
}

/// Reads a line without echo or completion (piped standard input).
fn read_plain() -> io::Result<ReadLine> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(ReadLine::Eof);
    }
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(ReadLine::Line(line))
}

/// Reads one byte from the standard input, retrying on interruption.
///
/// Returns `None` at end of input.
fn read_byte() -> io::Result<Option<u8>> {
    let mut byte = [0; 1];
    loop {
        match io::stdin().lock().read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
}

/// Reads a line in character mode with echo, backspace, and completion.
fn read_interactive(env: &Env) -> io::Result<ReadLine> {
    let _guard = RawModeGuard::enter()?;
    let mut stdout = io::stdout();
    let mut buffer = Vec::new();
    let mut tabs = TabState::new();

    loop {
        let Some(byte) = read_byte()? else {
            return Ok(ReadLine::Eof);
        };

        match byte {
            b'\n' | b'\r' => {
                stdout.write_all(b"\n")?;
                stdout.flush()?;
                return Ok(ReadLine::Line(
                    String::from_utf8_lossy(&buffer).into_owned(),
                ));
            }

            // Backspace or delete erases one character.
            0x08 | 0x7F => {
                if pop_char(&mut buffer) {
                    stdout.write_all(b"\x08 \x08")?;
                    stdout.flush()?;
                }
            }

            // TAB invokes completion.
            b'\t' => {
                let line = String::from_utf8_lossy(&buffer).into_owned();
                match completion::complete(env, &line, &mut tabs) {
                    Action::None => {}
                    Action::Insert(suffix) => {
                        buffer.extend_from_slice(suffix.as_bytes());
                        stdout.write_all(suffix.as_bytes())?;
                    }
                    Action::Bell => stdout.write_all(&[BELL])?,
                    Action::List(candidates) => {
                        stdout.write_all(b"\n")?;
                        stdout.write_all(candidates.join("  ").as_bytes())?;
                        stdout.write_all(b"\n")?;
                        stdout.write_all(PROMPT.as_bytes())?;
                        stdout.write_all(&buffer)?;
                    }
                }
                stdout.flush()?;
            }

            // End-of-transmission on an empty line ends the session; in
            // the middle of a line it is ignored, like in other shells.
            0x04 => {
                if buffer.is_empty() {
                    stdout.write_all(b"\n")?;
                    stdout.flush()?;
                    return Ok(ReadLine::Eof);
                }
            }

            byte => {
                buffer.push(byte);
                stdout.write_all(&[byte])?;
                stdout.flush()?;
            }
        }
    }
}

/// Removes the last character (a whole UTF-8 sequence) from the buffer.
///
/// Returns false if the buffer was empty.
fn pop_char(buffer: &mut Vec<u8>) -> bool {
    if buffer.is_empty() {
        return false;
    }
    // Drop continuation bytes, then the leading byte.
    while let Some(&byte) = buffer.last() {
        buffer.pop();
        if byte & 0xC0 != 0x80 {
            break;
        }
    }
    true
}
