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

//! Command substitution
//!
//! Each `$( … )` token's body is parsed as a full input line and executed
//! with its standard output funneled into a pipe; the collected output,
//! stripped of trailing newlines, replaces the token. Unless the token was
//! born inside double quotes, the output is word-split like any expansion.

use super::{replace_token, split_words, ExpansionError};
use crate::command;
use msh_env::semantics::ExecFlag;
use msh_env::system;
use msh_env::system::STDIN_FILENO;
use msh_env::Env;
use msh_syntax::parser::parse_line;
use msh_syntax::{Token, TokenFlag, TokenKind};
use nix::errno::Errno;

/// Substitutes every `ComSub` token with the output of its body.
pub fn substitute_commands(
    env: &mut Env,
    tokens: &mut Vec<Token>,
) -> Result<(), ExpansionError> {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind != TokenKind::ComSub {
            i += 1;
            continue;
        }
        let output = capture_output(env, &tokens[i].value)?;
        if tokens[i].has_flag(TokenFlag::NoWordSplit) {
            tokens[i].value = output;
            i += 1;
        } else {
            i = replace_token(tokens, i, split_words(&output));
        }
    }
    Ok(())
}

/// Runs a source string with its standard output captured through a pipe.
fn capture_output(env: &mut Env, source: &str) -> Result<String, ExpansionError> {
    let (reader, writer) = system::pipe().map_err(ExpansionError::Substitution)?;

    match parse_line(source) {
        Ok(Some(tree)) => {
            command::execute_tree(env, tree, STDIN_FILENO, writer, ExecFlag::ForcePipe.into(), true);
        }
        Ok(None) => {}
        Err(error) => {
            system::close(writer);
            system::close(reader);
            return Err(error.into());
        }
    }
    system::close(writer);

    let mut output = Vec::new();
    let mut buffer = [0; 1024];
    loop {
        match system::read(reader, &mut buffer) {
            Ok(0) => break,
            Ok(count) => output.extend_from_slice(&buffer[..count]),
            Err(Errno::EINTR) => {}
            Err(errno) => {
                system::close(reader);
                return Err(ExpansionError::Substitution(errno));
            }
        }
    }
    system::close(reader);

    let mut result = String::from_utf8_lossy(&output).into_owned();
    while result.ends_with('\n') {
        result.pop();
    }
    Ok(result)
}
