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

//! Diagnostics output
//!
//! All error text the shell produces goes through [`Env::print_error`], so
//! the `path:line:` prefix for script execution is applied in exactly one
//! place.

use crate::Env;
use std::fmt::Arguments;

/// Position in a script being executed
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScriptLocation {
    /// Path of the script file
    pub path: String,
    /// One-based line number of the line being executed
    pub line: u64,
}

impl Env {
    /// Prints a diagnostic message to the standard error.
    ///
    /// The message is prefixed with `msh: `, and with the current script
    /// path and line number when a script line is executing.
    pub fn print_error(&self, message: Arguments<'_>) {
        match &self.script {
            Some(location) => {
                eprintln!("{}:{}: msh: {}", location.path, location.line, message)
            }
            None => eprintln!("msh: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_location_equality() {
        let a = ScriptLocation {
            path: "setup.msh".to_string(),
            line: 3,
        };
        assert_eq!(a, a.clone());
        assert_ne!(
            a,
            ScriptLocation {
                path: "setup.msh".to_string(),
                line: 4,
            }
        );
    }
}
