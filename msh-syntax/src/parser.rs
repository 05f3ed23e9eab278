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

//! Parsing one line of input
//!
//! [`parse_line`] runs the lexer, checks the token arrangement, and splits
//! the stream into the command tree. Token processing (expansion, alias
//! rewriting, redirection extraction) is deferred to execution time.

use crate::error::SyntaxError;
use crate::lexer::lex;
use crate::syntax::{Command, Connector};
use crate::token::{Token, TokenFlag, TokenKind};

/// Parses one line of input into a command tree.
///
/// Returns `Ok(None)` for empty (or blank) input.
pub fn parse_line(input: &str) -> Result<Option<Command>, SyntaxError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let tokens = lex(input)?;
    check_syntax(&tokens)?;
    Ok(Some(split_commands(tokens)))
}

/// Rejects token arrangements the executor cannot handle.
///
/// Unsupported tokens (grouping parentheses in this revision) are refused,
/// as are a leading command separator and a trailing connector that
/// requires a right-hand side. A trailing `;` or `&` is legal.
pub fn check_syntax(tokens: &[Token]) -> Result<(), SyntaxError> {
    for token in tokens {
        if token.has_flag(TokenFlag::Unsupported) {
            return Err(SyntaxError::UnsupportedToken(token.value.clone()));
        }
    }

    let mut significant = tokens.iter().filter(|t| t.kind != TokenKind::Empty);
    if let Some(first) = significant.next() {
        if first.has_flag(TokenFlag::CommandSeparator) {
            return Err(SyntaxError::UnexpectedToken(first.value.clone()));
        }
    }
    if let Some(last) = tokens.iter().rev().find(|t| t.kind != TokenKind::Empty) {
        if matches!(
            last.kind,
            TokenKind::Pipe | TokenKind::PipeAmp | TokenKind::And | TokenKind::Or
        ) {
            return Err(SyntaxError::UnexpectedToken(last.value.clone()));
        }
    }
    Ok(())
}

/// Splits a token stream into a binary tree of commands.
///
/// The scan is linear: every connector token freezes the accumulated tokens
/// into a simple command that completes the tree built so far, and the
/// whole tree becomes the left child of the next connection node. The
/// result is strictly left-leaning.
pub fn split_commands(tokens: Vec<Token>) -> Command {
    let mut current_tokens: Vec<Token> = Vec::new();
    let mut tree: Option<(Command, Connector)> = None;

    for token in tokens {
        match Connector::from_token(token.kind) {
            Some(connector) => {
                let simple = Command::simple(std::mem::take(&mut current_tokens));
                let completed = match tree {
                    None => simple,
                    Some((lhs, pending)) => Command::connection(lhs, pending, simple),
                };
                tree = Some((completed, connector));
            }
            None => current_tokens.push(token),
        }
    }

    let last = Command::simple(current_tokens);
    match tree {
        None => last,
        Some((lhs, pending)) => Command::connection(lhs, pending, last),
    }
}
