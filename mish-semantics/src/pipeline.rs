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

//! Pipeline execution
//!
//! [`execute_pipeline`] runs a parsed pipeline in three passes:
//!
//! 1. **Launch.** Walking the stages in order, each inter-stage boundary
//!    gets one anonymous pipe. External commands are spawned immediately
//!    with their endpoints installed as standard streams; built-in stages
//!    keep their I/O triple for the second pass. A built-in that does not
//!    consume its standard input has the upstream pipe handed to a drainer
//!    thread right away, so an upstream writer can never block on a full
//!    pipe.
//! 2. **Built-ins.** Each pending built-in runs to completion in the shell
//!    process, in stage order, writing through its triple. By now every
//!    downstream external holds its read end, so a built-in's output has a
//!    live reader. Dropping the triple afterwards closes the stage's write
//!    end, which is what lets the downstream stage see end-of-file.
//! 3. **Reap.** Children are awaited in launch order; the last stage's
//!    status becomes the pipeline's and is stored in the environment.
//!
//! Endpoint ownership does the descriptor bookkeeping: every pipe end moves
//! into exactly one child, triple, or drainer, and closing happens when the
//! owner drops. The shell's own standard streams are never closed.
//!
//! A [`Divert`] requested by a built-in (that is, `exit`) is honored only
//! when the pipeline consists of that single stage; in a longer pipeline
//! the built-in is a no-op member.
//!
//! [`Divert`]: mish_env::semantics::Divert

use crate::command_search::{Target, search};
use crate::redir::apply_redirs;
use mish_env::Env;
use mish_env::builtin::Builtin;
use mish_env::io::{Fd, Input, IoTriple, Output};
use mish_env::semantics::{ExitStatus, Result};
use mish_env::system;
use mish_syntax::syntax::{Pipeline, Stage};
use std::fs::File;
use std::io::Write;
use std::ops::ControlFlow::Continue;
use std::os::fd::OwnedFd;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command};
use std::thread::JoinHandle;

/// One launched stage awaiting the reap pass
enum StageRun {
    /// Spawned external command
    External(Child),
    /// Built-in waiting to run in the shell process
    Builtin {
        builtin: Builtin,
        args: Vec<String>,
        io: IoTriple,
    },
    /// Stage that already has its final status
    ///
    /// Used for pure redirections, unresolvable commands, and stages that
    /// failed before launching.
    Finished(ExitStatus),
}

/// Executes a pipeline and stores its exit status in the environment.
///
/// The returned value is `Break` when a sole-stage built-in requested a
/// divert, in which case the caller is expected to exit the shell.
pub fn execute_pipeline(env: &mut Env, pipeline: &Pipeline) -> Result {
    let stages = &pipeline.stages;
    let mut runs = Vec::with_capacity(stages.len());
    let mut drainers = Vec::new();

    // Launch pass: create pipes and spawn externals.
    let mut upstream: Option<OwnedFd> = None;
    for (index, stage) in stages.iter().enumerate() {
        let stdin = match upstream.take() {
            Some(fd) => Input::Pipe(fd),
            None => Input::Inherit,
        };
        let stdout = if index + 1 < stages.len() {
            match system::pipe() {
                Ok((read_end, write_end)) => {
                    upstream = Some(read_end);
                    Output::from_pipe(write_end)
                }
                Err(error) => {
                    eprintln!("mish: cannot create a pipe: {error}");
                    runs.push(StageRun::Finished(ExitStatus::ERROR));
                    // The stages launched so far still get reaped.
                    break;
                }
            }
        } else {
            Output::Inherit(Fd::STDOUT)
        };
        let io = IoTriple {
            stdin,
            stdout,
            stderr: Output::Inherit(Fd::STDERR),
        };
        runs.push(launch_stage(env, stage, io, &mut drainers));
    }

    // Built-in pass: run pending built-ins in stage order. Only a built-in
    // that is the sole stage of the pipeline may divert the shell.
    let sole = stages.len() == 1;
    let mut divert = Continue(());
    for run in &mut runs {
        if let StageRun::Builtin { .. } = run {
            let placeholder = StageRun::Finished(ExitStatus::SUCCESS);
            let StageRun::Builtin {
                builtin,
                args,
                mut io,
            } = std::mem::replace(run, placeholder)
            else {
                unreachable!("the run was just matched as a built-in");
            };
            let result = (builtin.execute)(env, args, &mut io);
            if sole {
                divert = result.divert();
            }
            *run = StageRun::Finished(result.exit_status());
        }
    }

    // Reap pass: await children in launch order; the last stage's status
    // wins.
    let mut last_status = ExitStatus::SUCCESS;
    for run in runs {
        last_status = match run {
            StageRun::External(mut child) => match child.wait() {
                Ok(status) => ExitStatus::from(status),
                Err(error) => {
                    eprintln!("mish: cannot await a child process: {error}");
                    ExitStatus::ERROR
                }
            },
            StageRun::Finished(status) => status,
            StageRun::Builtin { .. } => {
                unreachable!("every built-in was finished in the built-in pass")
            }
        };
    }

    for drainer in drainers {
        let _ = drainer.join();
    }

    env.exit_status = last_status;
    divert
}

/// Resolves and launches one stage.
fn launch_stage(
    env: &mut Env,
    stage: &Stage,
    mut io: IoTriple,
    drainers: &mut Vec<JoinHandle<()>>,
) -> StageRun {
    if let Err(error) = apply_redirs(&stage.redirs, &mut io) {
        eprintln!("mish: {error}");
        return StageRun::Finished(ExitStatus::FAILURE);
    }

    let Some(name) = stage.argv.first() else {
        // Pure redirection: the files were opened (and created or
        // truncated); there is nothing to run.
        return StageRun::Finished(ExitStatus::SUCCESS);
    };

    match search(env, name) {
        Some(Target::Builtin(builtin)) => {
            if !builtin.reads_stdin && io.stdin.is_pipe() {
                // Start draining before the built-in body ever runs so the
                // upstream writer cannot block on a full pipe.
                if let Input::Pipe(fd) = std::mem::replace(&mut io.stdin, Input::Inherit) {
                    drainers.push(spawn_drainer(fd));
                }
            }
            StageRun::Builtin {
                builtin,
                args: stage.argv[1..].to_vec(),
                io,
            }
        }

        Some(Target::External { path }) => {
            let mut command = Command::new(&path);
            command.arg0(name).args(&stage.argv[1..]);
            match install_stdio(&mut command, io) {
                Ok(()) => match command.spawn() {
                    Ok(child) => StageRun::External(child),
                    Err(error) => {
                        eprintln!("mish: cannot execute {name}: {error}");
                        StageRun::Finished(ExitStatus::NOEXEC)
                    }
                },
                Err(error) => {
                    eprintln!("mish: cannot execute {name}: {error}");
                    StageRun::Finished(ExitStatus::NOEXEC)
                }
            }
        }

        None => {
            let _ = writeln!(io.stderr, "{name}: command not found");
            let _ = io.stderr.flush();
            StageRun::Finished(ExitStatus::NOT_FOUND)
        }
    }
}

/// Moves the triple's endpoints into the command's standard streams.
fn install_stdio(command: &mut Command, io: IoTriple) -> std::io::Result<()> {
    let IoTriple {
        stdin,
        stdout,
        stderr,
    } = io;
    command
        .stdin(stdin.into_stdio())
        .stdout(stdout.into_stdio()?)
        .stderr(stderr.into_stdio()?);
    Ok(())
}

/// Consumes a pipe read end until end-of-file on a background thread.
///
/// The thread owns the descriptor and closes it when the drain finishes.
fn spawn_drainer(fd: OwnedFd) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut reader = File::from(fd);
        let _ = std::io::copy(&mut reader, &mut std::io::sink());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mish_env::semantics::Divert;
    use mish_syntax::parser::parse_line;
    use mish_syntax::syntax::{Redir, RedirOp};
    use std::fs::read_to_string;
    use std::ops::ControlFlow::Break;
    use std::path::Path;

    fn test_env() -> Env {
        let mut env = Env::new();
        env.builtins.extend(mish_builtin::iter());
        env
    }

    fn run(env: &mut Env, line: &str) -> Result {
        let pipeline = parse_line(line).unwrap();
        execute_pipeline(env, &pipeline)
    }

    /// Builds a pipeline from the line with the last stage's output sent to
    /// the file, then executes it.
    fn run_to_file(env: &mut Env, line: &str, path: &Path) -> Result {
        let mut pipeline = parse_line(line).unwrap();
        pipeline.stages.last_mut().unwrap().redirs.push(Redir {
            fd: Fd::STDOUT,
            op: RedirOp::FileOut,
            path: path.display().to_string(),
        });
        execute_pipeline(env, &pipeline)
    }

    #[test]
    fn external_command_output_is_redirected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        // With no built-ins registered, `echo` resolves to the external one.
        let mut env = Env::new();
        let result = run_to_file(&mut env, "echo external hello", &out);
        assert_eq!(result, Continue(()));
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
        assert_eq!(read_to_string(&out).unwrap(), "external hello\n");
    }

    #[test]
    fn builtin_runs_in_the_shell_process() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut env = test_env();
        let result = run_to_file(&mut env, "echo from builtin", &out);
        assert_eq!(result, Continue(()));
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
        assert_eq!(read_to_string(&out).unwrap(), "from builtin\n");
    }

    #[test]
    fn two_stage_pipeline_of_externals() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut env = Env::new();
        let result = run_to_file(&mut env, "echo pipe me | cat", &out);
        assert_eq!(result, Continue(()));
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
        assert_eq!(read_to_string(&out).unwrap(), "pipe me\n");
    }

    #[test]
    fn builtin_output_flows_into_an_external_stage() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut env = test_env();
        let result = run_to_file(&mut env, "echo through the pipe | cat", &out);
        assert_eq!(result, Continue(()));
        assert_eq!(read_to_string(&out).unwrap(), "through the pipe\n");
    }

    #[test]
    fn unconsumed_pipe_input_is_drained() {
        // The producer writes well past the pipe buffer capacity; if the
        // drainer did not run, the pipeline would deadlock here.
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut env = test_env();
        let result = run_to_file(
            &mut env,
            "dd if=/dev/zero bs=1024 count=256 2> /dev/null | echo drained",
            &out,
        );
        assert_eq!(result, Continue(()));
        assert_eq!(read_to_string(&out).unwrap(), "drained\n");
    }

    #[test]
    fn command_not_found_status_and_pipeline_continuation() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let err = dir.path().join("err");
        let mut env = test_env();

        // The unresolvable stage reports on its own stderr and the rest of
        // the pipeline still runs.
        let mut pipeline = parse_line("no-such-command-zzz | cat").unwrap();
        pipeline.stages[0].redirs.push(Redir {
            fd: Fd::STDERR,
            op: RedirOp::FileOut,
            path: err.display().to_string(),
        });
        pipeline.stages.last_mut().unwrap().redirs.push(Redir {
            fd: Fd::STDOUT,
            op: RedirOp::FileOut,
            path: out.display().to_string(),
        });
        let result = execute_pipeline(&mut env, &pipeline);
        assert_eq!(result, Continue(()));
        assert_eq!(env.exit_status, ExitStatus::SUCCESS); // `cat` is last
        assert!(
            read_to_string(&err)
                .unwrap()
                .contains("no-such-command-zzz: command not found")
        );
        assert_eq!(read_to_string(&out).unwrap(), "");
    }

    #[test]
    fn sole_not_found_command_sets_status_127() {
        let dir = tempfile::tempdir().unwrap();
        let err = dir.path().join("err");
        let mut env = test_env();
        let _ = run(&mut env, &format!("no-such-command-zzz 2> {}", err.display()));
        assert_eq!(env.exit_status, ExitStatus::NOT_FOUND);
    }

    #[test]
    fn last_stage_status_wins() {
        let mut env = Env::new();
        let result = run(&mut env, "false | true");
        assert_eq!(result, Continue(()));
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);

        let result = run(&mut env, "true | false");
        assert_eq!(result, Continue(()));
        assert_eq!(env.exit_status, ExitStatus::FAILURE);
    }

    #[test]
    fn sole_exit_diverts_the_shell() {
        let mut env = test_env();
        let result = run(&mut env, "exit 7");
        assert_eq!(result, Break(Divert::Exit(Some(ExitStatus(7)))));
        assert_eq!(env.exit_status, ExitStatus(7));
    }

    #[test]
    fn exit_in_a_pipeline_is_a_no_op() {
        let mut env = test_env();
        let result = run(&mut env, "exit 7 | cat");
        assert_eq!(result, Continue(()));
        // The shell did not exit; the pipeline status is `cat`'s.
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn pure_redirection_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("created");
        let mut env = test_env();
        let result = run(&mut env, &format!("> {}", path.display()));
        assert_eq!(result, Continue(()));
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
        assert_eq!(read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn redirection_open_failure_skips_the_stage() {
        let mut env = test_env();
        let _ = run(&mut env, "echo hi > /no/such/dir/out");
        assert_eq!(env.exit_status, ExitStatus::FAILURE);
    }

    #[test]
    fn earlier_redirections_are_opened_for_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        std::fs::write(&first, "stale").unwrap();

        let mut env = test_env();
        let line = format!("echo last wins > {} > {}", first.display(), second.display());
        let result = run(&mut env, &line);
        assert_eq!(result, Continue(()));
        assert_eq!(read_to_string(&first).unwrap(), "");
        assert_eq!(read_to_string(&second).unwrap(), "last wins\n");
    }
}
