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

//! Utilities shared by the built-ins

use msh_env::Env;

/// Documentation record of one built-in
#[derive(Clone, Copy, Debug)]
pub struct BuiltinDoc {
    /// Name the built-in is registered under
    pub name: &'static str,
    /// Argument synopsis
    pub args: &'static str,
    /// One-line summary
    pub brief: &'static str,
    /// Longer description, possibly empty
    pub long: &'static str,
}

impl BuiltinDoc {
    /// Usage line printed on argument errors.
    #[must_use]
    pub fn usage(&self) -> String {
        format!("Usage: {} {}", self.name, self.args)
    }
}

/// Handles `-h`/`--help` uniformly.
///
/// When either flag is present, prints the built-in's documentation and
/// returns true so the handler can short-circuit.
pub fn handle_help(args: &[String], doc: &BuiltinDoc) -> bool {
    if args.iter().skip(1).any(|arg| arg == "-h" || arg == "--help") {
        println!("{} {} -- {}", doc.name, doc.args, doc.brief);
        if !doc.long.is_empty() {
            println!("\n{}", doc.long);
        }
        true
    } else {
        false
    }
}

/// Reports a usage error with the built-in's synopsis.
pub fn report_usage(env: &Env, doc: &BuiltinDoc, message: &str) {
    env.print_error(format_args!("{}: {}", doc.name, message));
    eprintln!("{}", doc.usage());
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: BuiltinDoc = BuiltinDoc {
        name: "demo",
        args: "[-h|--help]",
        brief: "Demonstrate",
        long: "",
    };

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn help_flag_is_recognized_anywhere() {
        assert!(handle_help(&args(&["demo", "-h"]), &DOC));
        assert!(handle_help(&args(&["demo", "x", "--help"]), &DOC));
        assert!(!handle_help(&args(&["demo", "x"]), &DOC));
    }

    #[test]
    fn name_position_is_not_a_help_flag() {
        assert!(!handle_help(&args(&["-h"]), &DOC));
    }

    #[test]
    fn usage_line_includes_synopsis() {
        assert_eq!(DOC.usage(), "Usage: demo [-h|--help]");
    }
}
