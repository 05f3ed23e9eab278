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

//! Built-in command `export`
//!
//! Exporting is the one operation that keeps the internal variable table
//! and the process environment in sync: `name=value` writes both, a bare
//! `name` copies the internal value into the environment.

use crate::common::{handle_help, BuiltinDoc};
use msh_env::semantics::ExitStatus;
use msh_env::Env;

static DOC: BuiltinDoc = BuiltinDoc {
    name: "export",
    args: "[name[=value] ...] [-h|--help]",
    brief: "Export variables to the environment",
    long: "Without arguments, prints the process environment.\n\n\
           For each NAME=VALUE argument, sets the variable and exports it.\n\
           For each bare NAME, exports the variable's current value.\n\n\
           Returns 0 unless an undefined name is given.",
};

pub fn main(env: &mut Env, args: &[String]) -> ExitStatus {
    if handle_help(args, &DOC) {
        return ExitStatus::SUCCESS;
    }

    if args.len() == 1 {
        for (name, value) in std::env::vars() {
            println!("{name}={value}");
        }
        return ExitStatus::SUCCESS;
    }

    for arg in &args[1..] {
        match arg.split_once('=') {
            Some((name, value)) => {
                env.variables.set(name, value);
                std::env::set_var(name, value);
            }
            None => match env.variables.get(arg) {
                Some(value) => {
                    let value = value.to_string();
                    std::env::set_var(arg, value);
                }
                None => {
                    env.print_error(format_args!("{}: {}: not found", DOC.name, arg));
                    return ExitStatus::FAILURE;
                }
            },
        }
    }
    ExitStatus::SUCCESS
}
