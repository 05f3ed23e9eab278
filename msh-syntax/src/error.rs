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

//! Syntax errors

use thiserror::Error;

/// Error in lexing or parsing one line of input
///
/// Every variant sets the last-errno to 1 when reported; none of them abort
/// the shell or a running script.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SyntaxError {
    /// A quote was left open at the end of the line.
    #[error("unclosed delimiter: {0}")]
    UnclosedDelimiter(char),

    /// A `$(` was left open at the end of the line.
    #[error("expected ')'")]
    UnclosedSubstitution,

    /// A quote inside `$( … )` was left open at the end of the line.
    #[error("expected '{0}'")]
    UnclosedQuote(char),

    /// A token appeared where the grammar does not allow it.
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    /// A token the shell does not support.
    #[error("unsupported token: {0}")]
    UnsupportedToken(String),

    /// A redirection operator has no target word.
    #[error("parse error near {0}")]
    MissingRedirectTarget(String),

    /// `<&` with a target that does not name a file descriptor.
    #[error("{0}: ambiguous redirect")]
    AmbiguousRedirect(String),

    /// A descriptor number that does not fit a file descriptor.
    #[error("invalid file descriptor: {0}")]
    InvalidFileDescriptor(String),
}
