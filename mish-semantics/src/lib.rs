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

//! This crate implements the execution semantics of the mish shell.
//!
//! The [`command_search`] module decides whether a command name means a
//! built-in utility or an external utility found in `$PATH`. The [`redir`]
//! module applies a stage's redirections to its I/O triple. The
//! [`pipeline`] module executes a whole parsed [`Pipeline`]: it allocates
//! the connecting pipes, spawns external commands, runs built-ins in the
//! shell process, drains unconsumed pipe input, and collects exit statuses.
//!
//! File descriptors are owned values throughout. A pipe endpoint moves into
//! exactly one place (a child's standard stream, a built-in's I/O triple,
//! or a drainer thread) and is closed when its owner is dropped, so a
//! finished pipeline leaves no descriptor behind.
//!
//! [`Pipeline`]: mish_syntax::syntax::Pipeline

pub mod command_search;
pub mod pipeline;
pub mod redir;

pub use pipeline::execute_pipeline;
