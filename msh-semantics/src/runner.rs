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

//! Line and script execution
//!
//! [`execute_line`] is what both the interactive loop and the script
//! runner feed each line into. [`run_script`] iterates over a file,
//! publishing the `(path, line)` pair so diagnostics from within the
//! script carry their origin; an error on one line does not abort the
//! rest, it only updates the last exit status.

use crate::command;
use msh_env::io::ScriptLocation;
use msh_env::semantics::ExitStatus;
use msh_env::Env;
use msh_syntax::parser::parse_line;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses and executes one line of input.
///
/// A parse error is reported and sets the last exit status to 1; empty
/// input leaves the status untouched.
pub fn execute_line(env: &mut Env, line: &str) -> ExitStatus {
    match parse_line(line) {
        Ok(Some(tree)) => command::execute(env, tree),
        Ok(None) => env.exit_status,
        Err(error) => {
            env.print_error(format_args!("{error}"));
            env.exit_status = ExitStatus::FAILURE;
            ExitStatus::FAILURE
        }
    }
}

/// Executes a file line by line, as if each line were typed interactively.
///
/// Returns the exit status of the last executed line (0 for an empty
/// file), which the `source` built-in propagates.
pub fn run_script<P: AsRef<Path>>(env: &mut Env, path: P) -> ExitStatus {
    run_script_at(env, path.as_ref())
}

fn run_script_at(env: &mut Env, path: &Path) -> ExitStatus {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) => {
            env.print_error(format_args!("{}: {}", path.display(), error));
            return ExitStatus::FAILURE;
        }
    };

    let outer = env.script.take();
    let mut status = ExitStatus::SUCCESS;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                env.print_error(format_args!("{}: {}", path.display(), error));
                status = ExitStatus::FAILURE;
                break;
            }
        };
        env.script = Some(ScriptLocation {
            path: path.display().to_string(),
            line: index as u64 + 1,
        });
        status = execute_line(env, &line);
    }
    env.script = outer;
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests stick to commands that run without forking: assignments
    // and parse errors. The full executor is exercised end to end by the
    // scripted tests in the msh-cli crate.

    #[test]
    fn assignment_updates_the_variable_table() {
        let mut env = Env::new();
        let status = execute_line(&mut env, "FOO=bar");
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(env.variables.get("FOO"), Some("bar"));
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn assignments_chain_across_separators() {
        // The quoted value is a separate token, so it goes through variable
        // expansion before the assignment captures it.
        let mut env = Env::new();
        execute_line(&mut env, r#"A=1; B="$A-2""#);
        assert_eq!(env.variables.get("B"), Some("1-2"));
    }

    #[test]
    fn parse_error_sets_errno_to_one() {
        let mut env = Env::new();
        let status = execute_line(&mut env, "echo 'unclosed");
        assert_eq!(status, ExitStatus::FAILURE);
        assert_eq!(env.exit_status, ExitStatus::FAILURE);
    }

    #[test]
    fn empty_line_preserves_errno() {
        let mut env = Env::new();
        env.exit_status = ExitStatus::NOT_FOUND;
        let status = execute_line(&mut env, "   ");
        assert_eq!(status, ExitStatus::NOT_FOUND);
        assert_eq!(env.exit_status, ExitStatus::NOT_FOUND);
    }

    #[test]
    fn missing_script_fails() {
        let mut env = Env::new();
        let status = run_script(&mut env, "/definitely/not/a/script");
        assert_eq!(status, ExitStatus::FAILURE);
        assert_eq!(env.script, None);
    }

    #[test]
    fn script_lines_execute_in_order() {
        let mut env = Env::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.msh");
        std::fs::write(&path, "A=1\nB=\"$A$A\"\n").unwrap();
        let status = run_script(&mut env, &path);
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(env.variables.get("B"), Some("11"));
        // The script location is restored afterwards.
        assert_eq!(env.script, None);
    }
}
