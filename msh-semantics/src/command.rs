// This file is part of msh, a POSIX-style command shell.
// Copyright (C) 2025 WATANABE Yuki
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

//! Tree execution
//!
//! The executor walks the command tree, dispatching by variant. Connection
//! nodes run in the shell process; only simple-command leaves fork. The
//! flag set accumulates as the recursion descends: `&` forces `Async` onto
//! its left leg, a pipe puts `ForkNoWait` (and, for `|&`, `PipeStderr`) on
//! its left leg, and command substitution seeds the whole walk with
//! `ForcePipe` so the leaves take the inherited descriptors even under
//! non-pipe connectors.
//!
//! Within a pipeline the left child starts before the right; the parent
//! closes its write end before the right child runs and its read end
//! after, then reaps the remaining children unless the pipeline itself is
//! on a no-wait or background path.

use crate::simple_command;
use enumset::EnumSet;
use msh_env::semantics::{ExecFlag, ExitStatus};
use msh_env::system;
use msh_env::system::{STDIN_FILENO, STDOUT_FILENO};
use msh_env::Env;
use msh_syntax::syntax::{Command, ConnectionCommand, Connector};
use std::os::fd::RawFd;

/// Executes a command tree with inherited standard input and output.
///
/// The environment's last exit status is updated to the result.
pub fn execute(env: &mut Env, command: Command) -> ExitStatus {
    execute_tree(env, command, STDIN_FILENO, STDOUT_FILENO, EnumSet::empty(), true)
}

/// Recursive entry point.
///
/// `expand_aliases` is cleared when a simple command re-splits after alias
/// expansion, so an alias chain is rewritten at most once per command.
pub(crate) fn execute_tree(
    env: &mut Env,
    command: Command,
    in_fd: RawFd,
    out_fd: RawFd,
    flags: EnumSet<ExecFlag>,
    expand_aliases: bool,
) -> ExitStatus {
    let status = match command {
        Command::Simple(simple) => simple_command::execute_simple(
            env,
            simple.tokens,
            in_fd,
            out_fd,
            flags,
            expand_aliases,
        ),
        Command::Connection(connection) => {
            execute_connection(env, *connection, in_fd, out_fd, flags, expand_aliases)
        }
    };
    env.exit_status = status;
    status
}

fn execute_connection(
    env: &mut Env,
    connection: ConnectionCommand,
    in_fd: RawFd,
    out_fd: RawFd,
    flags: EnumSet<ExecFlag>,
    expand_aliases: bool,
) -> ExitStatus {
    let ConnectionCommand {
        connector,
        lhs,
        rhs,
    } = connection;

    // Command substitution needs its descriptors to reach the leaves even
    // across `;`-like connectors.
    let keep = flags & ExecFlag::ForcePipe;
    let (child_in, child_out) = if flags.contains(ExecFlag::ForcePipe) {
        (in_fd, out_fd)
    } else {
        (STDIN_FILENO, STDOUT_FILENO)
    };
    let inherited_async = flags & ExecFlag::Async;

    match connector {
        Connector::Semicolon => {
            execute_tree(env, lhs, child_in, child_out, keep, expand_aliases);
            execute_tree(
                env,
                rhs,
                child_in,
                child_out,
                keep | inherited_async,
                expand_aliases,
            )
        }
        Connector::Amp => {
            execute_tree(
                env,
                lhs,
                child_in,
                child_out,
                keep | ExecFlag::Async,
                expand_aliases,
            );
            execute_tree(
                env,
                rhs,
                child_in,
                child_out,
                keep | inherited_async,
                expand_aliases,
            )
        }
        Connector::And => {
            let status = execute_tree(
                env,
                lhs,
                child_in,
                child_out,
                keep | inherited_async,
                expand_aliases,
            );
            if status.is_successful() {
                execute_tree(
                    env,
                    rhs,
                    child_in,
                    child_out,
                    keep | inherited_async,
                    expand_aliases,
                )
            } else {
                status
            }
        }
        Connector::Or => {
            let status = execute_tree(
                env,
                lhs,
                child_in,
                child_out,
                keep | inherited_async,
                expand_aliases,
            );
            if status.is_successful() {
                status
            } else {
                execute_tree(
                    env,
                    rhs,
                    child_in,
                    child_out,
                    keep | inherited_async,
                    expand_aliases,
                )
            }
        }
        Connector::Pipe => {
            execute_pipeline(env, lhs, rhs, in_fd, out_fd, flags, expand_aliases, false)
        }
        Connector::PipeAmp => {
            execute_pipeline(env, lhs, rhs, in_fd, out_fd, flags, expand_aliases, true)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn execute_pipeline(
    env: &mut Env,
    lhs: Command,
    rhs: Command,
    in_fd: RawFd,
    out_fd: RawFd,
    flags: EnumSet<ExecFlag>,
    expand_aliases: bool,
    pipe_stderr: bool,
) -> ExitStatus {
    let (reader, writer) = match system::pipe() {
        Ok(pipe) => pipe,
        Err(errno) => {
            env.print_error(format_args!("{}", errno.desc()));
            return ExitStatus::UNKNOWN;
        }
    };

    let mut lhs_flags = flags | ExecFlag::ForkNoWait;
    if pipe_stderr {
        lhs_flags |= ExecFlag::PipeStderr;
    }
    execute_tree(env, lhs, in_fd, writer, lhs_flags, expand_aliases);
    system::close(writer);
    let status = execute_tree(env, rhs, reader, out_fd, flags, expand_aliases);
    system::close(reader);

    if flags.is_disjoint(ExecFlag::ForkNoWait | ExecFlag::Async) {
        env.reap_children();
    }
    status
}
