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

//! Built-in command `alias`

use crate::common::{handle_help, BuiltinDoc};
use msh_env::alias::{Glossary, HashEntry};
use msh_env::semantics::ExitStatus;
use msh_env::Env;

static DOC: BuiltinDoc = BuiltinDoc {
    name: "alias",
    args: "[name[=value] ...] [-h|--help]",
    brief: "Create or print aliases",
    long: "Without arguments, prints all aliases.\n\n\
           If arguments are given, creates an alias for each argument of the form NAME=VALUE\n\
           or prints the value of the alias with the given name.\n\n\
           Returns 0 unless an unknown alias is given.",
};

fn print_all(env: &Env) {
    let mut entries: Vec<_> = env
        .aliases
        .iter()
        .map(|entry| (&entry.0.name, &entry.0.replacement))
        .collect();
    entries.sort();
    for (name, replacement) in entries {
        println!("alias {name}='{replacement}'");
    }
}

pub fn main(env: &mut Env, args: &[String]) -> ExitStatus {
    if handle_help(args, &DOC) {
        return ExitStatus::SUCCESS;
    }

    if args.len() == 1 {
        print_all(env);
        return ExitStatus::SUCCESS;
    }

    for arg in &args[1..] {
        match arg.split_once('=') {
            Some((name, replacement)) => {
                env.aliases.replace(HashEntry::new(name, replacement));
            }
            None => match env.aliases.look_up(arg) {
                Some(alias) => println!("alias {}='{}'", alias.name, alias.replacement),
                None => {
                    env.print_error(format_args!("{}: {}: not found", DOC.name, arg));
                    return ExitStatus::FAILURE;
                }
            },
        }
    }
    ExitStatus::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn definition_is_stored() {
        let mut env = Env::new();
        let status = main(&mut env, &args(&["alias", "ll=ls -l"]));
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(env.aliases.look_up("ll").unwrap().replacement, "ls -l");
    }

    #[test]
    fn redefinition_replaces() {
        let mut env = Env::new();
        main(&mut env, &args(&["alias", "ll=ls -l"]));
        main(&mut env, &args(&["alias", "ll=ls -la"]));
        assert_eq!(env.aliases.look_up("ll").unwrap().replacement, "ls -la");
        assert_eq!(env.aliases.len(), 1);
    }

    #[test]
    fn unknown_name_fails() {
        let mut env = Env::new();
        let status = main(&mut env, &args(&["alias", "nothing"]));
        assert_eq!(status, ExitStatus::FAILURE);
    }

    #[test]
    fn value_may_contain_equals() {
        let mut env = Env::new();
        main(&mut env, &args(&["alias", "grep=grep --color=auto"]));
        assert_eq!(
            env.aliases.look_up("grep").unwrap().replacement,
            "grep --color=auto"
        );
    }
}
