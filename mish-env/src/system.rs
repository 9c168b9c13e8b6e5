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

//! Thin wrappers over the underlying system
//!
//! The shell interacts with the operating system through the functions in
//! this module rather than calling `nix` directly from business logic.

use nix::libc::{S_IFMT, S_IFREG};
use nix::sys::stat::stat;
use nix::unistd::AccessFlags;
use nix::unistd::access;
use std::io;
use std::os::fd::OwnedFd;
use std::path::Path;

/// Returns true if the current process may execute the file.
#[must_use]
pub fn is_executable(path: &Path) -> bool {
    access(path, AccessFlags::X_OK).is_ok()
}

/// Returns true if the path names a regular file.
#[must_use]
pub fn is_regular_file(path: &Path) -> bool {
    match stat(path) {
        Ok(stat) => stat.st_mode & S_IFMT == S_IFREG,
        Err(_) => false,
    }
}

/// Returns true if the path names an executable regular file.
///
/// This is the test command search applies to every candidate. It always
/// probes the file system; nothing is cached, so newly installed binaries
/// and `$PATH` changes take effect immediately.
#[must_use]
pub fn is_executable_file(path: &Path) -> bool {
    is_regular_file(path) && is_executable(path)
}

/// Creates an anonymous pipe.
///
/// Returns the read end and the write end, in that order. Both ends are
/// owned; dropping an end closes it.
pub fn pipe() -> io::Result<(OwnedFd, OwnedFd)> {
    nix::unistd::pipe().map_err(io::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    #[test]
    fn regular_file_probe() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(is_regular_file(file.path()));
        assert!(!is_regular_file(Path::new("/")));
        assert!(!is_regular_file(Path::new("/no/such/file/anywhere")));
    }

    #[test]
    fn executable_file_probe() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A fresh temporary file has mode 0o600.
        assert!(!is_executable_file(file.path()));
        assert!(is_executable_file(Path::new("/bin/sh")));
        // A directory is executable but not a regular file.
        assert!(!is_executable_file(Path::new("/")));
    }

    #[test]
    fn pipe_transfers_bytes_and_closes_on_drop() {
        let (reader, writer) = pipe().unwrap();
        let mut writer = std::fs::File::from(writer);
        writer.write_all(b"ping").unwrap();
        drop(writer);

        let mut reader = std::fs::File::from(reader);
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"ping");
    }
}
