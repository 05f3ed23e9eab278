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

//! Simple command execution
//!
//! The leaf of the executor: expand aliases (re-splitting if the
//! replacement introduced connectors), run the token processors, extract
//! redirections, build `argv`, and run the program.
//!
//! The command must fork when the descriptors are not the inherited ones,
//! when it runs in the background, or when it is not a built-in. A
//! built-in with inherited stdio runs in the shell process, with
//! redirections applied and then reverted through saved descriptors.

use crate::command;
use crate::expansion;
use crate::external;
use crate::redir::{do_redirects, SavedFds};
use enumset::EnumSet;
use msh_env::alias::Glossary;
use msh_env::builtin::Builtin;
use msh_env::semantics::{ExecFlag, ExitStatus};
use msh_env::system;
use msh_env::system::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use msh_env::Env;
use msh_syntax::alias::expand_aliases;
use msh_syntax::parser::split_commands;
use msh_syntax::redir::{parse_redirects, Redirect};
use msh_syntax::syntax::Connector;
use msh_syntax::{Token, TokenFlag};
use nix::unistd::ForkResult;
use std::os::fd::RawFd;

pub(crate) fn execute_simple(
    env: &mut Env,
    mut tokens: Vec<Token>,
    in_fd: RawFd,
    out_fd: RawFd,
    mut flags: EnumSet<ExecFlag>,
    aliases: bool,
) -> ExitStatus {
    if aliases && !Glossary::is_empty(&env.aliases) {
        if let Err(error) = expand_aliases(&mut tokens, &env.aliases) {
            env.print_error(format_args!("{error}"));
            return ExitStatus::FAILURE;
        }
        // A replacement may introduce its own connectors; they become real
        // separators in the splitter.
        if tokens
            .iter()
            .any(|t| Connector::from_token(t.kind).is_some())
        {
            let subtree = split_commands(tokens);
            return command::execute_tree(env, subtree, in_fd, out_fd, flags, false);
        }
    }

    if let Err(error) = expansion::process_tokens(env, &mut tokens) {
        env.print_error(format_args!("{error}"));
        return error.exit_status();
    }
    let redirects = match parse_redirects(&mut tokens) {
        Ok(redirects) => redirects,
        Err(error) => {
            env.print_error(format_args!("{error}"));
            return ExitStatus::FAILURE;
        }
    };

    let argv: Vec<String> = tokens
        .iter()
        .filter(|t| t.has_flag(TokenFlag::WordLike) && !t.value.is_empty())
        .map(|t| t.value.clone())
        .collect();
    if argv.is_empty() {
        // Only assignments (or nothing); the variable table side effect is
        // all there was to do.
        return ExitStatus::SUCCESS;
    }

    let builtin = env.builtins.get(argv[0].as_str()).copied();
    if builtin.is_some() {
        flags |= ExecFlag::Builtin;
    }
    let must_fork = in_fd != STDIN_FILENO
        || out_fd != STDOUT_FILENO
        || builtin.is_none()
        || flags.contains(ExecFlag::Async);

    match builtin {
        Some(builtin) if !must_fork => run_builtin_in_place(env, builtin, &argv, &redirects),
        _ => fork_and_run(env, builtin, &argv, &redirects, in_fd, out_fd, flags),
    }
}

fn run_builtin_in_place(
    env: &mut Env,
    builtin: Builtin,
    argv: &[String],
    redirects: &[Redirect],
) -> ExitStatus {
    if redirects.is_empty() {
        return (builtin.execute)(env, argv);
    }

    let saved = match SavedFds::save() {
        Ok(saved) => saved,
        Err(errno) => {
            env.print_error(format_args!("cannot redirect: {}", errno.desc()));
            return ExitStatus::FAILURE;
        }
    };
    let mut opened = Vec::new();
    let result = do_redirects(redirects, Some(&mut opened));
    let status = match &result {
        Ok(()) => (builtin.execute)(env, argv),
        Err(_) => ExitStatus::FAILURE,
    };
    saved.restore(&opened);
    if let Err(error) = result {
        env.print_error(format_args!("{error}"));
    }
    status
}

fn fork_and_run(
    env: &mut Env,
    builtin: Option<Builtin>,
    argv: &[String],
    redirects: &[Redirect],
    in_fd: RawFd,
    out_fd: RawFd,
    flags: EnumSet<ExecFlag>,
) -> ExitStatus {
    match unsafe { nix::unistd::fork() } {
        Err(errno) => {
            env.print_error(format_args!("{}", errno.desc()));
            ExitStatus::UNKNOWN
        }
        Ok(ForkResult::Child) => {
            let status = run_in_child(env, builtin, argv, redirects, in_fd, out_fd, flags);
            std::process::exit(status.0)
        }
        Ok(ForkResult::Parent { child }) => {
            env.jobs.add(child, flags, argv);
            if flags.contains(ExecFlag::Async) {
                println!("[{}] {}", env.jobs.running_count(), child);
                return ExitStatus::SUCCESS;
            }
            if flags.contains(ExecFlag::ForkNoWait) {
                return ExitStatus::SUCCESS;
            }
            env.wait_for_process(child)
        }
    }
}

fn run_in_child(
    env: &mut Env,
    builtin: Option<Builtin>,
    argv: &[String],
    redirects: &[Redirect],
    in_fd: RawFd,
    out_fd: RawFd,
    flags: EnumSet<ExecFlag>,
) -> ExitStatus {
    if in_fd != STDIN_FILENO {
        let _ = system::dup2(in_fd, STDIN_FILENO);
        system::close(in_fd);
    }
    if out_fd != STDOUT_FILENO {
        let _ = system::dup2(out_fd, STDOUT_FILENO);
    }
    if let Err(error) = do_redirects(redirects, None) {
        env.print_error(format_args!("{error}"));
        return ExitStatus::FAILURE;
    }
    if flags.contains(ExecFlag::PipeStderr) && out_fd != STDOUT_FILENO {
        let _ = system::dup2(out_fd, STDERR_FILENO);
    }
    if out_fd != STDOUT_FILENO {
        system::close(out_fd);
    }

    match builtin {
        Some(builtin) => (builtin.execute)(env, argv),
        None => external::exec_external(env, argv),
    }
}
