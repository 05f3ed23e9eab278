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

//! External command execution
//!
//! Runs in the forked child. A name containing a slash is executed
//! directly; anything else goes through the `PATH` search. A file the
//! kernel refuses with `ENOEXEC` is re-run line by line as a script.
//! The C-string `argv` and environment are built here, just before the
//! exec call, from the already-finalized argument words.

use crate::runner;
use msh_env::semantics::ExitStatus;
use msh_env::Env;
use nix::errno::Errno;
use std::ffi::CString;
use std::path::Path;

pub(crate) fn exec_external(env: &mut Env, argv: &[String]) -> ExitStatus {
    let args: Vec<CString> = match argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<Result<_, _>>()
    {
        Ok(args) => args,
        Err(_) => {
            env.print_error(format_args!("{}: invalid argument", argv[0]));
            return ExitStatus::UNKNOWN;
        }
    };
    let envs: Vec<CString> = std::env::vars()
        .filter_map(|(name, value)| CString::new(format!("{name}={value}")).ok())
        .collect();

    if argv[0].contains('/') {
        match nix::unistd::execve(&args[0], &args, &envs) {
            Err(Errno::ENOEXEC) => runner::run_script(env, &argv[0]),
            Err(errno) => {
                if Path::new(&argv[0]).is_dir() {
                    env.print_error(format_args!("{}: Is a directory", argv[0]));
                } else {
                    env.print_error(format_args!("{}: {}", argv[0], errno.desc()));
                }
                ExitStatus::UNKNOWN
            }
            Ok(never) => match never {},
        }
    } else {
        match nix::unistd::execvpe(&args[0], &args, &envs) {
            Err(Errno::ENOENT) => {
                env.print_error(format_args!("Command not found: {}", argv[0]));
                ExitStatus::NOT_FOUND
            }
            Err(errno) => {
                env.print_error(format_args!("{}", errno.desc()));
                ExitStatus::UNKNOWN
            }
            Ok(never) => match never {},
        }
    }
}
