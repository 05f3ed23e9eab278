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

//! Prompt rendering
//!
//! [`expand_ps1`] is a pure rewriter over the `PS1` template; [`render`]
//! wraps the expansion with the success/failure marker derived from the
//! last exit status.

mod expand;
mod prompter;

pub use self::expand::{expand_ps1, DEFAULT_PS1};
pub use self::prompter::render;
