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

//! Implementations of the built-in utilities
//!
//! Each module implements one built-in with a `main` function of the
//! registry signature and a documentation record the shared help helper
//! prints for `-h`/`--help`. [`builtins`] assembles the name-to-definition
//! map the executor dispatches through.

pub mod alias;
pub mod cd;
pub mod common;
pub mod echo;
pub mod errno;
pub mod exit;
pub mod export;
pub mod jobs;
pub mod pwd;
pub mod source;
pub mod unalias;

use msh_env::builtin::Builtin;
use std::collections::HashMap;

/// Returns the built-in utilities available in msh.
///
/// `.` is the traditional spelling of `source`.
#[must_use]
pub fn builtins() -> HashMap<&'static str, Builtin> {
    HashMap::from([
        ("alias", Builtin::new(alias::main)),
        ("cd", Builtin::new(cd::main)),
        ("echo", Builtin::new(echo::main)),
        ("errno", Builtin::new(errno::main)),
        ("exit", Builtin::new(exit::main)),
        ("export", Builtin::new(export::main)),
        ("jobs", Builtin::new(jobs::main)),
        ("pwd", Builtin::new(pwd::main)),
        ("source", Builtin::new(source::main)),
        (".", Builtin::new(source::main)),
        ("unalias", Builtin::new(unalias::main)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_every_builtin() {
        let map = builtins();
        for name in [
            "alias", "cd", "echo", "errno", "exit", "export", "jobs", "pwd", "source", ".",
            "unalias",
        ] {
            assert!(map.contains_key(name), "missing {name}");
        }
        assert_eq!(map.len(), 11);
    }
}
