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

//! Abstract syntax of one command line
//!
//! A line parses into a [`Command`]: either a [`SimpleCommand`] holding the
//! tokens of a single program invocation, or a [`ConnectionCommand`] joining
//! two commands with a [`Connector`]. The tree is a pure tree with unique
//! ownership; the splitter builds it left-leaning, so the left spine of a
//! line with N separators has depth N.

use crate::token::{Token, TokenKind};
use std::fmt;

/// Token that separates two commands
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Connector {
    /// `;`
    Semicolon,
    /// `&`
    Amp,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `|`
    Pipe,
    /// `|&`
    PipeAmp,
}

impl Connector {
    /// Maps a token kind to the connector it denotes, if any.
    #[must_use]
    pub fn from_token(kind: TokenKind) -> Option<Connector> {
        match kind {
            TokenKind::Semicolon => Some(Connector::Semicolon),
            TokenKind::Amp => Some(Connector::Amp),
            TokenKind::And => Some(Connector::And),
            TokenKind::Or => Some(Connector::Or),
            TokenKind::Pipe => Some(Connector::Pipe),
            TokenKind::PipeAmp => Some(Connector::PipeAmp),
            _ => None,
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Connector::Semicolon => ";",
            Connector::Amp => "&",
            Connector::And => "&&",
            Connector::Or => "||",
            Connector::Pipe => "|",
            Connector::PipeAmp => "|&",
        })
    }
}

/// Single program invocation, the terminal node of the command tree
///
/// The tokens are carried unprocessed; expansion, redirection extraction,
/// and `argv` construction happen at execution time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimpleCommand {
    pub tokens: Vec<Token>,
}

/// Internal node joining two commands with a connector
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectionCommand {
    pub connector: Connector,
    pub lhs: Command,
    pub rhs: Command,
}

/// Either a simple command or a connection of two commands
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Simple(SimpleCommand),
    Connection(Box<ConnectionCommand>),
}

impl Command {
    /// Creates a simple command from its tokens.
    #[must_use]
    pub fn simple(tokens: Vec<Token>) -> Command {
        Command::Simple(SimpleCommand { tokens })
    }

    /// Creates a connection command.
    #[must_use]
    pub fn connection(lhs: Command, connector: Connector, rhs: Command) -> Command {
        Command::Connection(Box::new(ConnectionCommand {
            connector,
            lhs,
            rhs,
        }))
    }
}
