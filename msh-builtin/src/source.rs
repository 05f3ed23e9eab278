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

//! Built-in command `source` (also spelled `.`)

use crate::common::{handle_help, report_usage, BuiltinDoc};
use msh_env::semantics::ExitStatus;
use msh_env::Env;

static DOC: BuiltinDoc = BuiltinDoc {
    name: "source",
    args: "<file> [-h|--help]",
    brief: "Execute commands from a file",
    long: "Reads and executes commands from the file, line by line, in the\n\
           current shell environment.\n\
           Returns the exit status of the last command executed.",
};

pub fn main(env: &mut Env, args: &[String]) -> ExitStatus {
    if handle_help(args, &DOC) {
        return ExitStatus::SUCCESS;
    }
    if args.len() != 2 {
        report_usage(env, &DOC, "wrong number of arguments");
        return ExitStatus::FAILURE;
    }
    msh_semantics::run_script(env, &args[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn missing_file_fails() {
        let mut env = Env::new();
        let status = main(&mut env, &args(&["source", "/definitely/not/a/script"]));
        assert_eq!(status, ExitStatus::FAILURE);
    }

    #[test]
    fn sourced_assignments_affect_the_environment() {
        let mut env = Env::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rc.msh");
        std::fs::write(&path, "GREETING=hello\n").unwrap();
        let path = path.display().to_string();
        let status = main(&mut env, &args(&["source", &path]));
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(env.variables.get("GREETING"), Some("hello"));
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        let mut env = Env::new();
        assert_eq!(main(&mut env, &args(&["source"])), ExitStatus::FAILURE);
        assert_eq!(
            main(&mut env, &args(&["source", "a", "b"])),
            ExitStatus::FAILURE
        );
    }
}
