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

//! Prompt assembly

use crate::expand::{expand_ps1, DEFAULT_PS1};
use msh_env::Env;

const BACKGROUND: &str = "\x1b[48;5;236m";
const FOREGROUND: &str = "\x1b[38;5;236m";
const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const MARKER_SUCCESS: &str = "\u{2714}";
const MARKER_FAILURE: &str = "\u{2718}";

/// Renders the prompt for the next input line.
///
/// The template comes from `PS1` (the internal table is consulted first,
/// then the process environment), defaulting to [`DEFAULT_PS1`]. A marker
/// derived from the last exit status is appended: a green check after
/// success, the code and a red cross after failure.
#[must_use]
pub fn render(env: &Env) -> String {
    let ps1 = env
        .variables
        .value_or_env("PS1")
        .unwrap_or_else(|| DEFAULT_PS1.to_string());
    let prompt = expand_ps1(&ps1);

    let errno = env.exit_status;
    let (color, code, marker) = if errno.is_successful() {
        (GREEN, String::new(), MARKER_SUCCESS)
    } else {
        (RED, format!("{errno} "), MARKER_FAILURE)
    };

    format!(
        "{BACKGROUND}{prompt}{BACKGROUND} \x1b[1;37m|\
         {BACKGROUND} {color}{code}{marker} {RESET}{FOREGROUND}{RESET} "
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use msh_env::semantics::ExitStatus;

    #[test]
    fn success_marker_after_zero_status() {
        let env = Env::new();
        let prompt = render(&env);
        assert!(prompt.contains(MARKER_SUCCESS));
        assert!(!prompt.contains(MARKER_FAILURE));
    }

    #[test]
    fn failure_marker_carries_the_code() {
        let mut env = Env::new();
        env.exit_status = ExitStatus::NOT_FOUND;
        let prompt = render(&env);
        assert!(prompt.contains("127 "));
        assert!(prompt.contains(MARKER_FAILURE));
    }

    #[test]
    fn ps1_from_the_variable_table_wins() {
        let mut env = Env::new();
        env.variables.set("PS1", "plain> ");
        let prompt = render(&env);
        assert!(prompt.contains("plain> "));
    }
}
