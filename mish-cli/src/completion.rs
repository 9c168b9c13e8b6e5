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

//! TAB completion
//!
//! The completion engine works on the last token of the edit buffer, that
//! is, the characters after the last unquoted blank. Candidates are the built-in
//! names and the basenames of executable regular files in the `$PATH`
//! directories, sorted and deduplicated.
//!
//! The engine itself is pure: [`complete`] inspects the buffer and the
//! [`TabState`] carried across consecutive TAB presses and returns the
//! [`Action`] the line editor should perform. The state machine implements
//! the usual protocol: a sole candidate completes with a trailing space, a
//! common prefix extends the token, and an ambiguous token rings the bell
//! on the first TAB and lists the candidates on the second.

use itertools::Itertools;
use mish_env::Env;
use mish_env::system;

/// Completion state carried across consecutive TAB presses
///
/// The state records the token the last TAB press saw and how many
/// consecutive presses have seen it. A TAB at a different token resets the
/// count.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TabState {
    last_prefix: String,
    presses: u32,
}

impl TabState {
    /// Creates a fresh state with no TAB presses recorded.
    #[must_use]
    pub fn new() -> TabState {
        TabState::default()
    }

    /// Records a press on the given token and returns the updated count.
    fn press(&mut self, prefix: &str) -> u32 {
        if self.last_prefix == prefix {
            self.presses += 1;
        } else {
            self.last_prefix = prefix.to_string();
            self.presses = 1;
        }
        self.presses
    }

    /// Remembers the token without counting a press against it.
    fn settle(&mut self, prefix: &str) {
        self.last_prefix = prefix.to_string();
        self.presses = 0;
    }
}

/// What the line editor should do in response to a TAB press
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// Do nothing (the buffer ends in a blank; there is nothing to complete)
    None,
    /// Append the string to the buffer and echo it
    Insert(String),
    /// Ring the terminal bell
    Bell,
    /// Print the candidates on a fresh line, then redraw the prompt and
    /// buffer
    List(Vec<String>),
}

/// Computes the completion action for a TAB press.
pub fn complete(env: &Env, buffer: &str, state: &mut TabState) -> Action {
    let token = last_token(buffer);
    if token.is_empty() {
        return Action::None;
    }
    decide(candidates(env, token), token, state)
}

/// Applies the result protocol to a candidate list.
///
/// This is [`complete`] minus the candidate enumeration, separated so the
/// protocol is testable with a fixed candidate list.
fn decide(candidates: Vec<String>, token: &str, state: &mut TabState) -> Action {
    match candidates.len() {
        0 => {
            state.settle(token);
            Action::Bell
        }

        1 => {
            let mut completion = candidates[0][token.len()..].to_string();
            completion.push(' ');
            state.settle(token);
            Action::Insert(completion)
        }

        _ => {
            let prefix = longest_common_prefix(&candidates);
            if prefix.len() > token.len() {
                let completion = prefix[token.len()..].to_string();
                // The next TAB press sees the extended token.
                state.settle(prefix);
                Action::Insert(completion)
            } else if state.press(token) >= 2 {
                Action::List(candidates)
            } else {
                Action::Bell
            }
        }
    }
}

/// Returns the last token of the buffer: the characters after the last
/// unquoted blank.
///
/// If the buffer ends in an unquoted blank, the last token is empty and
/// completion has nothing to work on.
#[must_use]
pub fn last_token(buffer: &str) -> &str {
    let mut start = 0;
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    for (index, c) in buffer.char_indices() {
        if escaped {
            escaped = false;
        } else if in_single {
            in_single = c != '\'';
        } else if in_double {
            match c {
                '"' => in_double = false,
                '\\' => escaped = true,
                _ => {}
            }
        } else {
            match c {
                '\'' => in_single = true,
                '"' => in_double = true,
                '\\' => escaped = true,
                c if c.is_whitespace() => start = index + c.len_utf8(),
                _ => {}
            }
        }
    }
    &buffer[start..]
}

/// Enumerates the completion candidates for a token.
///
/// The result is the sorted, deduplicated union of the built-in names and
/// the `$PATH` executables starting with the token.
#[must_use]
pub fn candidates(env: &Env, token: &str) -> Vec<String> {
    let builtins = env
        .builtins
        .keys()
        .filter(|name| name.starts_with(token))
        .map(|name| name.to_string());
    let path = std::env::var("PATH").unwrap_or_default();
    builtins
        .chain(path_candidates(&path, token))
        .sorted()
        .dedup()
        .collect()
}

/// Enumerates the executables in the `$PATH` directories whose basename
/// starts with the token.
///
/// An empty `$PATH` element stands for the current directory. Unreadable
/// directories are skipped. Entries must be executable regular files.
#[must_use]
pub fn path_candidates(path: &str, token: &str) -> Vec<String> {
    let mut found = Vec::new();
    for dir in path.split(':') {
        let dir = if dir.is_empty() { "." } else { dir };
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with(token) && system::is_executable_file(&entry.path()) {
                found.push(name);
            }
        }
    }
    found
}

/// Returns the longest common prefix of the candidates.
///
/// The result is a prefix of the first candidate. An empty slice yields an
/// empty prefix.
#[must_use]
pub fn longest_common_prefix(candidates: &[String]) -> &str {
    let Some(first) = candidates.first() else {
        return "";
    };
    let mut len = first.len();
    for candidate in &candidates[1..] {
        while !candidate.starts_with(&first[..len]) {
            len -= 1;
            while !first.is_char_boundary(len) {
                len -= 1;
            }
        }
    }
    &first[..len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::unix::fs::PermissionsExt;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn last_token_of_simple_buffers() {
        assert_eq!(last_token(""), "");
        assert_eq!(last_token("ec"), "ec");
        assert_eq!(last_token("echo hel"), "hel");
        assert_eq!(last_token("echo hello "), "");
    }

    #[test]
    fn last_token_ignores_quoted_blanks() {
        assert_eq!(last_token("echo 'a b"), "'a b");
        assert_eq!(last_token("echo \"a b"), "\"a b");
        assert_eq!(last_token(r"echo a\ b"), r"a\ b");
    }

    #[test]
    fn longest_common_prefix_of_candidates() {
        assert_eq!(longest_common_prefix(&strings(&[])), "");
        assert_eq!(longest_common_prefix(&strings(&["echo"])), "echo");
        assert_eq!(
            longest_common_prefix(&strings(&["echo", "exit", "export"])),
            "e"
        );
        assert_eq!(
            longest_common_prefix(&strings(&["history", "histfile"])),
            "hist"
        );
        assert_eq!(longest_common_prefix(&strings(&["cat", "dog"])), "");
    }

    #[test]
    fn zero_candidates_ring_the_bell() {
        let mut state = TabState::new();
        assert_eq!(decide(vec![], "xyz", &mut state), Action::Bell);
    }

    #[test]
    fn sole_candidate_completes_with_a_space() {
        let mut state = TabState::new();
        let action = decide(strings(&["echo"]), "ec", &mut state);
        assert_eq!(action, Action::Insert("ho ".to_string()));
    }

    #[test]
    fn sole_exact_candidate_still_appends_the_space() {
        let mut state = TabState::new();
        let action = decide(strings(&["echo"]), "echo", &mut state);
        assert_eq!(action, Action::Insert(" ".to_string()));
    }

    #[test]
    fn common_prefix_extends_the_token() {
        let mut state = TabState::new();
        let action = decide(strings(&["history", "histfile"]), "hi", &mut state);
        assert_eq!(action, Action::Insert("st".to_string()));
    }

    #[test]
    fn ambiguous_token_bells_then_lists() {
        let candidates = strings(&["echo", "exit"]);
        let mut state = TabState::new();
        assert_eq!(decide(candidates.clone(), "e", &mut state), Action::Bell);
        assert_eq!(
            decide(candidates.clone(), "e", &mut state),
            Action::List(candidates)
        );
    }

    #[test]
    fn changing_the_token_resets_the_press_count() {
        let mut state = TabState::new();
        assert_eq!(decide(strings(&["echo", "exit"]), "e", &mut state), Action::Bell);
        // A TAB at a different prefix starts over.
        assert_eq!(
            decide(strings(&["cat", "cd"]), "c", &mut state),
            Action::Bell
        );
        assert_eq!(
            decide(strings(&["cat", "cd"]), "c", &mut state),
            Action::List(strings(&["cat", "cd"]))
        );
    }

    #[test]
    fn extension_then_bell_then_list() {
        // xyz_foo and xyz_bar share the prefix xyz_: the first TAB extends,
        // the next two apply the bell/list protocol at the extended token.
        let candidates = strings(&["xyz_bar", "xyz_foo"]);
        let mut state = TabState::new();
        assert_eq!(
            decide(candidates.clone(), "x", &mut state),
            Action::Insert("yz_".to_string())
        );
        assert_eq!(decide(candidates.clone(), "xyz_", &mut state), Action::Bell);
        assert_eq!(
            decide(candidates.clone(), "xyz_", &mut state),
            Action::List(candidates)
        );
    }

    #[test]
    fn path_candidates_are_executable_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        let make = |name: &str, mode: u32| {
            let path = dir.path().join(name);
            File::create(&path).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        };
        make("mytool", 0o755);
        make("mytool2", 0o755);
        make("mydata", 0o644); // not executable
        std::fs::create_dir(dir.path().join("mydir")).unwrap(); // not a file

        let path = dir.path().display().to_string();
        let mut found = path_candidates(&path, "my");
        found.sort_unstable();
        assert_eq!(found, ["mytool", "mytool2"]);

        assert_eq!(path_candidates(&path, "zzz"), Vec::<String>::new());
    }

    #[test]
    fn candidates_include_builtins_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("echo");
        File::create(&path).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut env = Env::new();
        env.builtins.extend(mish_builtin::iter());

        // Narrow $PATH to the temporary directory for a deterministic result.
        let saved = std::env::var_os("PATH");
        unsafe { std::env::set_var("PATH", dir.path()) };
        let found = candidates(&env, "e");
        match &saved {
            Some(saved) => unsafe { std::env::set_var("PATH", saved) },
            None => unsafe { std::env::remove_var("PATH") },
        }

        // The external `echo` and the built-in `echo` collapse into one.
        assert_eq!(found, ["echo", "exit"]);
    }
}
