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

//! Built-in command `unalias`

use crate::common::{handle_help, report_usage, BuiltinDoc};
use msh_env::semantics::ExitStatus;
use msh_env::Env;

static DOC: BuiltinDoc = BuiltinDoc {
    name: "unalias",
    args: "<alias>... [-h|--help]",
    brief: "Remove aliases",
    long: "Removes aliases from the list of aliases.\n\
           Returns 0 unless alias is not found or no arguments are given.",
};

pub fn main(env: &mut Env, args: &[String]) -> ExitStatus {
    if handle_help(args, &DOC) {
        return ExitStatus::SUCCESS;
    }
    if args.len() == 1 {
        report_usage(env, &DOC, "wrong number of arguments");
        return ExitStatus::FAILURE;
    }

    for arg in &args[1..] {
        if !env.aliases.remove(arg.as_str()) {
            env.print_error(format_args!("{}: {}: not found", DOC.name, arg));
            return ExitStatus::FAILURE;
        }
    }
    ExitStatus::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use msh_env::alias::HashEntry;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn removes_defined_alias() {
        let mut env = Env::new();
        env.aliases.insert(HashEntry::new("ll", "ls -l"));
        let status = main(&mut env, &args(&["unalias", "ll"]));
        assert_eq!(status, ExitStatus::SUCCESS);
        assert!(env.aliases.is_empty());
    }

    #[test]
    fn unknown_alias_fails() {
        let mut env = Env::new();
        let status = main(&mut env, &args(&["unalias", "nothing"]));
        assert_eq!(status, ExitStatus::FAILURE);
    }

    #[test]
    fn no_arguments_is_a_usage_error() {
        let mut env = Env::new();
        let status = main(&mut env, &args(&["unalias"]));
        assert_eq!(status, ExitStatus::FAILURE);
    }
}
