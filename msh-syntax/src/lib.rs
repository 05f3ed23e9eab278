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

//! Command line syntax
//!
//! This crate turns one line of input into a tree of commands. The
//! [`lexer`] classifies the raw characters into [`Token`]s, the
//! [`parser`] checks the token arrangement and splits the stream into a
//! left-leaning binary [`Command`](syntax::Command) tree, and the
//! [`alias`] module rewrites command words from the alias table. The
//! [`redir`] module extracts redirection operators from a simple command's
//! tokens.
//!
//! Tokens are created here, mutated in place by the token processors in
//! `msh-semantics`, and consumed by the executor; they never outlive the
//! handling of one input line.

pub mod alias;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod redir;
pub mod syntax;
pub mod token;

pub use self::error::SyntaxError;
pub use self::token::{Token, TokenFlag, TokenKind};
