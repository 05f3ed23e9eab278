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

//! Type definitions for command execution.

use enumset::EnumSetType;
use std::ffi::c_int;

/// Number that summarizes the result of command execution.
///
/// An exit status is an integer returned from a utility (or command) when
/// executed. Zero conventionally means success and non-zero failure. The
/// shell keeps the exit status of the most recently executed command in
/// [`Env::exit_status`](crate::Env::exit_status); the prompt renderer and
/// the `errno` built-in read it from there.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub c_int);

impl ExitStatus {
    /// Exit status of successful execution
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Exit status of failed execution, including syntax and expansion errors
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// Exit status of a built-in given unusable arguments
    pub const USAGE: ExitStatus = ExitStatus(2);

    /// Exit status when a command is not found
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);

    /// Exit status for an unclassified system error
    pub const UNKNOWN: ExitStatus = ExitStatus(128);

    /// Returns true if and only if the exit status is zero.
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<c_int> for ExitStatus {
    fn from(value: c_int) -> ExitStatus {
        ExitStatus(value)
    }
}

impl From<ExitStatus> for c_int {
    fn from(exit_status: ExitStatus) -> c_int {
        exit_status.0
    }
}

/// Flags the executor accumulates as it descends the command tree.
///
/// The flags do not live on the tree nodes; each recursion step passes the
/// set it received, extended as the connector semantics demand.
#[derive(Debug, EnumSetType)]
pub enum ExecFlag {
    /// The command name resolved to a built-in utility.
    Builtin,

    /// Set on the left leg of a pipeline: the parent must not wait for the
    /// forked child; a later batch reap collects it.
    ForkNoWait,

    /// The command runs in the background (`&`).
    Async,

    /// Simple-command leaves must use the inherited descriptors even under
    /// non-pipe connectors. This is how command substitution funnels output
    /// into its pipe.
    ForcePipe,

    /// The child's standard error is also connected to the pipe (`|&`).
    PipeStderr,
}
