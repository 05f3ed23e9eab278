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

//! Shell execution environment
//!
//! This crate defines the state an msh process carries between commands: the
//! variable table, the alias table, the process (job) table, the built-in
//! registry, and the exit status of the last executed command. All of it is
//! bundled into a single [`Env`] that is passed by reference through the
//! lexing, expansion, and execution pipeline.
//!
//! The crate also provides the thin system-call helpers ([`system`]) the
//! executor plumbs file descriptors with, and the single diagnostics channel
//! ([`Env::print_error`]) everything reports errors through.

pub mod alias;
pub mod builtin;
pub mod io;
pub mod job;
pub mod semantics;
pub mod system;
pub mod variable;

use self::alias::AliasSet;
use self::builtin::Builtin;
use self::io::ScriptLocation;
use self::job::ProcessSet;
use self::semantics::ExitStatus;
use self::variable::VariableSet;
use std::collections::HashMap;

/// Whole shell execution environment.
///
/// The environment is process-wide mutable state. Only the main thread
/// mutates it; the `SIGCHLD` handler merely latches a flag that the main
/// thread observes (see [`job`]).
#[derive(Debug, Default)]
pub struct Env {
    /// Aliases defined in this environment
    pub aliases: AliasSet,

    /// Built-in utilities available in this environment
    ///
    /// The map is empty by default. The frontend fills it at startup.
    pub builtins: HashMap<&'static str, Builtin>,

    /// Exit status of the last executed command
    pub exit_status: ExitStatus,

    /// Processes started by this environment
    pub jobs: ProcessSet,

    /// Position in the script currently being executed, if any
    ///
    /// Used to prefix diagnostics with `path:line:` while a script line runs.
    pub script: Option<ScriptLocation>,

    /// Variables defined in this environment
    pub variables: VariableSet,
}

impl Env {
    /// Creates a new empty environment.
    #[must_use]
    pub fn new() -> Env {
        Env::default()
    }
}
