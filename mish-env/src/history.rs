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

//! Command history
//!
//! The history is an append-only sequence of command lines in submission
//! order. Besides the entries themselves, [`History`] records how many
//! entries existed when the shell started (the *initial size*): the entries
//! beyond that mark are the tail that gets appended to the history file
//! when the shell exits.
//!
//! The history file format is one command per line, newline-terminated,
//! UTF-8, with no escaping. Blank lines are ignored on load.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Command history of a shell session
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct History {
    entries: Vec<String>,
    initial_size: usize,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> History {
        History::default()
    }

    /// Returns the recorded command lines in submission order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the number of recorded command lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no command lines are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries that existed at shell startup.
    #[must_use]
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Appends one command line.
    pub fn push<S: Into<String>>(&mut self, line: S) {
        self.entries.push(line.into());
    }

    /// Removes all entries and resets the initial size to zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.initial_size = 0;
    }

    /// Reads a history file, appending its non-empty lines.
    ///
    /// Returns the number of lines appended. The initial size is not
    /// changed; use [`load_initial`](Self::load_initial) at startup.
    pub fn load(&mut self, path: &Path) -> io::Result<usize> {
        let reader = BufReader::new(File::open(path)?);
        let mut count = 0;
        for line in reader.lines() {
            let line = line?;
            if !line.is_empty() {
                self.entries.push(line);
                count += 1;
            }
        }
        Ok(count)
    }

    /// Reads a history file at startup.
    ///
    /// Like [`load`](Self::load), but additionally marks everything loaded
    /// so far as pre-existing: the initial size becomes the current number
    /// of entries.
    pub fn load_initial(&mut self, path: &Path) -> io::Result<()> {
        self.load(path)?;
        self.initial_size = self.entries.len();
        Ok(())
    }

    /// Overwrites a file with the whole in-memory history.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_entries(file, &self.entries)
    }

    /// Appends the whole in-memory history to a file.
    ///
    /// The file is created if it does not exist.
    pub fn append_to(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_entries(file, &self.entries)
    }

    /// Appends the entries recorded since startup to a file.
    ///
    /// This is the `exit`-time persistence: only the entries beyond the
    /// initial size are written. The file is created if it does not exist.
    pub fn append_tail_to(&self, path: &Path) -> io::Result<()> {
        let start = self.initial_size.min(self.entries.len());
        let tail = &self.entries[start..];
        if tail.is_empty() {
            return Ok(());
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_entries(file, tail)
    }

    fn write_entries(&self, file: File, entries: &[String]) -> io::Result<()> {
        let mut writer = BufWriter::new(file);
        for entry in entries {
            writeln!(writer, "{entry}")?;
        }
        writer.flush()
    }
}
