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

//! Interactive front end of the mish shell
//!
//! This crate ties the other mish crates together into the `mish` binary:
//! [`startup`] prepares the execution environment, [`editor`] reads command
//! lines (with completion from [`completion`] when the input is a
//! terminal), and [`read_eval_loop`] parses and executes each line until
//! the `exit` built-in or end of input ends the session.

pub mod completion;
pub mod editor;
pub mod startup;

use crate::editor::{LineEditor, ReadLine};
use mish_env::Env;
use mish_env::semantics::ExitStatus;
use mish_semantics::execute_pipeline;
use mish_syntax::parser::parse_line;
use std::ops::ControlFlow::Break;
use std::process::ExitCode;

/// Runs the read-eval loop until exit or end of input.
///
/// Each non-empty line is recorded in the history, parsed, and executed.
/// Syntax errors are reported to the standard error and abandon the line;
/// the loop continues. The history tail is persisted when the loop ends.
///
/// The returned value is the shell's exit status: the `exit` operand when
/// the `exit` built-in ended the session, or zero on end of input.
pub fn read_eval_loop(env: &mut Env) -> ExitStatus {
    let mut editor = LineEditor::new();

    loop {
        let line = match editor.read_line(env) {
            Ok(ReadLine::Line(line)) => line,
            Ok(ReadLine::Eof) => break,
            Err(error) => {
                eprintln!("mish: cannot read the command line: {error}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        env.history.push(line.clone());

        let pipeline = match parse_line(&line) {
            Ok(pipeline) => pipeline,
            Err(error) => {
                eprintln!("mish: {error}");
                env.exit_status = ExitStatus::ERROR;
                continue;
            }
        };

        if let Break(divert) = execute_pipeline(env, &pipeline) {
            save_history(env);
            return divert.exit_status().unwrap_or(env.exit_status);
        }
    }

    save_history(env);
    ExitStatus::SUCCESS
}

/// Appends the history tail to the configured history file.
fn save_history(env: &Env) {
    if let Some(path) = startup::history_file() {
        if let Err(error) = env.history.append_tail_to(&path) {
            eprintln!("mish: cannot save {}: {error}", path.display());
        }
    }
}

/// Entry point of the `mish` binary
#[must_use]
pub fn bin_main() -> ExitCode {
    let mut env = startup::prepare_env();
    read_eval_loop(&mut env).into()
}
