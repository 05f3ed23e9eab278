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

//! Built-in command `pwd`

use crate::common::{handle_help, report_usage, BuiltinDoc};
use msh_env::semantics::ExitStatus;
use msh_env::Env;

static DOC: BuiltinDoc = BuiltinDoc {
    name: "pwd",
    args: "[-h|--help]",
    brief: "Print the current working directory",
    long: "Returns 1 if any arguments specified or the working directory\n\
           cannot be determined, 0 otherwise.",
};

pub fn main(env: &mut Env, args: &[String]) -> ExitStatus {
    if handle_help(args, &DOC) {
        return ExitStatus::SUCCESS;
    }
    if args.len() > 1 {
        report_usage(env, &DOC, "wrong number of arguments");
        return ExitStatus::FAILURE;
    }
    match nix::unistd::getcwd() {
        Ok(path) => {
            println!("{}", path.display());
            ExitStatus::SUCCESS
        }
        Err(errno) => {
            env.print_error(format_args!("{}: {}", DOC.name, errno.desc()));
            ExitStatus::FAILURE
        }
    }
}
