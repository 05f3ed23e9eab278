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

//! Built-in command `cd`

use crate::common::{handle_help, report_usage, BuiltinDoc};
use msh_env::semantics::ExitStatus;
use msh_env::Env;
use std::path::Path;

static DOC: BuiltinDoc = BuiltinDoc {
    name: "cd",
    args: "<path> [-h|--help]",
    brief: "Change working directory",
    long: "Returns 0 unless given wrong number of arguments or chdir() fails.",
};

pub fn main(env: &mut Env, args: &[String]) -> ExitStatus {
    if handle_help(args, &DOC) {
        return ExitStatus::SUCCESS;
    }
    if args.len() != 2 {
        report_usage(env, &DOC, "wrong number of arguments");
        return ExitStatus::FAILURE;
    }
    match nix::unistd::chdir(Path::new(&args[1])) {
        Ok(()) => ExitStatus::SUCCESS,
        Err(errno) => {
            env.print_error(format_args!("{}: {}: {}", DOC.name, errno.desc(), args[1]));
            ExitStatus::FAILURE
        }
    }
}
