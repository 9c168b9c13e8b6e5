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

//! Whole-session tests
//!
//! These tests run the compiled `mish` binary with its standard input
//! piped, feed it a scripted session, and examine the captured output and
//! exit status. With a piped standard input the shell runs in its
//! line-at-a-time mode, so the prompts appear on the standard output but
//! no echo or completion interferes with the expectations.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_mish");

/// Runs a shell session with the given input in the given directory.
///
/// `$HISTFILE` is cleared unless the caller overrides it via `envs`.
fn run_session_in(dir: &Path, envs: &[(&str, &str)], input: &str) -> Output {
    let mut child = Command::new(BIN)
        .current_dir(dir)
        .env_remove("HISTFILE")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("the shell binary should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .expect("writing the session input should succeed");
    child
        .wait_with_output()
        .expect("the shell should run to completion")
}

/// Runs a shell session in a throwaway directory.
fn run_session(input: &str) -> Output {
    let dir = tempfile::tempdir().unwrap();
    run_session_in(dir.path(), &[], input)
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn prompt_is_emitted_before_each_line() {
    let output = run_session("echo hello world\n");
    assert_eq!(stdout_of(&output), "$ hello world\n$ ");
    assert!(output.status.success());
}

#[test]
fn echo_joins_arguments() {
    let output = run_session("echo one   two\n");
    assert!(stdout_of(&output).contains("one two\n"));
}

#[test]
fn type_identifies_a_builtin() {
    let output = run_session("type exit\n");
    assert!(stdout_of(&output).contains("exit is a shell builtin\n"));
    assert!(output.status.success());
}

#[test]
fn type_reports_an_unknown_name_on_stdout() {
    let output = run_session("type no-such-command-zzz\n");
    assert!(stdout_of(&output).contains("no-such-command-zzz: not found\n"));
}

#[test]
fn producer_into_non_consuming_builtin_does_not_deadlock() {
    let output = run_session("ls | type exit\n");
    assert!(stdout_of(&output).contains("exit is a shell builtin\n"));
    assert!(output.status.success());
}

#[test]
fn redirections_truncate_and_append() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_session_in(dir.path(), &[], "echo foo > out.txt\necho bar >> out.txt\n");
    assert!(output.status.success());
    let contents = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(contents, "foo\nbar\n");
}

#[test]
fn single_quoted_pipe_is_literal() {
    let output = run_session("echo 'a | b'\n");
    assert!(stdout_of(&output).contains("a | b\n"));
}

#[test]
fn double_quoted_backslash_n_stays_literal_through_a_pipe() {
    let output = run_session("echo \"raspberry\\nblueberry\" | wc\n");
    // One line, one word, 21 bytes: the backslash-n is two literal bytes.
    let stdout = stdout_of(&output);
    let counts: Vec<&str> = stdout
        .strip_prefix("$ ")
        .unwrap_or(&stdout)
        .split_whitespace()
        .take(3)
        .collect();
    assert_eq!(counts, ["1", "1", "21"], "full output: {stdout:?}");
}

#[test]
fn command_not_found_goes_to_stderr() {
    let output = run_session("no-such-command-zzz\n");
    assert!(stderr_of(&output).contains("no-such-command-zzz: command not found"));
    assert!(output.status.success(), "EOF after the failure exits 0");
}

#[test]
fn exit_reports_its_operand() {
    let output = run_session("exit 7\n");
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn exit_without_operand_reports_zero() {
    let output = run_session("exit\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn end_of_input_exits_zero() {
    let output = run_session("");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "$ ");
}

#[test]
fn exit_in_a_pipeline_does_not_end_the_session() {
    let output = run_session("exit 5 | cat\necho still here\n");
    assert!(stdout_of(&output).contains("still here\n"));
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn pipeline_of_builtin_and_external() {
    let output = run_session("echo one | wc -c\n");
    assert!(stdout_of(&output).contains("4\n"));
}

#[test]
fn cd_changes_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().canonicalize().unwrap();
    let input = format!("cd {}\npwd\n", target.display());
    let output = run_session(&input);
    let expected = format!("{}\n", target.display());
    assert!(
        stdout_of(&output).contains(&expected),
        "stdout: {:?}",
        stdout_of(&output)
    );
}

#[test]
fn cd_reports_a_missing_directory() {
    let output = run_session("cd /no/such/dir\n");
    assert!(
        stderr_of(&output).contains("cd: /no/such/dir: No such file or directory")
    );
}

#[test]
fn syntax_error_abandons_the_line_but_not_the_session() {
    let output = run_session("echo 'oops\necho recovered\n");
    assert!(stderr_of(&output).contains("the single quote is not closed"));
    assert!(stdout_of(&output).contains("recovered\n"));
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn pure_redirection_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_session_in(dir.path(), &[], "> created.txt\n");
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("created.txt")).unwrap(),
        ""
    );
}

#[test]
fn history_builtin_numbers_from_one() {
    let output = run_session("echo hi\nhistory\n");
    let stdout = stdout_of(&output);
    assert!(stdout.contains("    1  echo hi\n"), "stdout: {stdout:?}");
    assert!(stdout.contains("    2  history\n"), "stdout: {stdout:?}");
}

#[test]
fn history_tail_is_appended_on_exit() {
    let dir = tempfile::tempdir().unwrap();
    let histfile = dir.path().join("history");
    std::fs::write(&histfile, "old one\nold two\n").unwrap();

    let envs = [("HISTFILE", histfile.to_str().unwrap())];
    let output = run_session_in(dir.path(), &envs, "echo fresh\nexit\n");
    assert!(output.status.success());

    let contents = std::fs::read_to_string(&histfile).unwrap();
    assert_eq!(contents, "old one\nold two\necho fresh\nexit\n");
}

#[test]
fn history_tail_is_appended_on_end_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let histfile = dir.path().join("history");

    let envs = [("HISTFILE", histfile.to_str().unwrap())];
    let output = run_session_in(dir.path(), &envs, "echo only\n");
    assert!(output.status.success());

    let contents = std::fs::read_to_string(&histfile).unwrap();
    assert_eq!(contents, "echo only\n");
}
