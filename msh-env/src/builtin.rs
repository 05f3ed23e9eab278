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

//! Type definitions for built-in utilities
//!
//! This module provides data types for defining built-in utilities. Concrete
//! implementations are not included in the `msh-env` crate; see the
//! `msh-builtin` crate for those.

use crate::semantics::ExitStatus;
use crate::Env;
use std::fmt::Debug;

/// Type of functions that implement the behavior of a built-in
///
/// The function takes the environment the built-in runs in and the argument
/// words, `argv[0]` being the name the built-in was invoked as.
pub type Main = fn(&mut Env, &[String]) -> ExitStatus;

/// Built-in utility definition
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Builtin {
    /// Function that implements the behavior of the built-in
    pub execute: Main,
}

impl Builtin {
    /// Creates a new built-in utility definition.
    pub const fn new(execute: Main) -> Self {
        Self { execute }
    }
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").finish_non_exhaustive()
    }
}
