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

//! Built-in command `exit`

use crate::common::{handle_help, report_usage, BuiltinDoc};
use msh_env::semantics::ExitStatus;
use msh_env::Env;

static DOC: BuiltinDoc = BuiltinDoc {
    name: "exit",
    args: "[code] [-h|--help]",
    brief: "Exit the shell",
    long: "Exits the shell with a status of code given as an argument.\n\
           If no argument is given exits with a status of 0.\n\
           Doesn't return unless given wrong number of arguments or code is invalid.",
};

pub fn main(env: &mut Env, args: &[String]) -> ExitStatus {
    if handle_help(args, &DOC) {
        return ExitStatus::SUCCESS;
    }
    match args.len() {
        1 => std::process::exit(0),
        2 => match args[1].parse::<i32>() {
            Ok(code) => std::process::exit(code),
            Err(_) => {
                env.print_error(format_args!("{}: invalid argument: {}", DOC.name, args[1]));
                std::process::exit(ExitStatus::USAGE.0)
            }
        },
        _ => {
            report_usage(env, &DOC, "wrong number of arguments");
            ExitStatus::FAILURE
        }
    }
}
