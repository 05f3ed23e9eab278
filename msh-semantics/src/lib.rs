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

//! Command semantics
//!
//! This crate implements the execution side of the shell: the token
//! processors that rewrite a simple command's tokens in place (variable
//! expansion, command substitution, assignment capture, glob expansion,
//! word coalescing), the application of parsed redirections, and the tree
//! executor that sets up pipes and forks around child processes.
//!
//! The crate's entry points are [`execute_line`] for one line of input and
//! [`run_script`] for a file of lines.

pub mod command;
pub mod expansion;
pub mod redir;
pub mod runner;

mod external;
mod simple_command;

pub use self::command::execute;
pub use self::runner::{execute_line, run_script};
