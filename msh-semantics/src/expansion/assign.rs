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

//! Assignment capture
//!
//! A `VAR_DECL` token first absorbs an immediately adjacent word-like token
//! (which is how `X="a b"` receives its quoted value), then splits on the
//! first `=` and is committed to the variable table. Assignments are
//! evaluated left to right; the declaration tokens carry no `WordLike`
//! flag, so they never reach `argv`.

use msh_env::Env;
use msh_syntax::{Token, TokenFlag, TokenKind};

/// Commits every `VAR_DECL` token to the variable table.
pub fn set_variables(env: &mut Env, tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind == TokenKind::VarDecl {
            if i + 1 < tokens.len() && tokens[i + 1].has_flag(TokenFlag::WordLike) {
                let next = tokens.remove(i + 1);
                tokens[i].value.push_str(&next.value);
            }
            let (name, value) = match tokens[i].value.split_once('=') {
                Some(pair) => pair,
                None => (tokens[i].value.as_str(), ""),
            };
            env.variables.set(name, value);
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::var::expand_vars;
    use msh_syntax::lexer::lex;

    #[test]
    fn plain_assignment() {
        let mut env = Env::new();
        let mut tokens = lex("FOO=bar").unwrap();
        set_variables(&mut env, &mut tokens);
        assert_eq!(env.variables.get("FOO"), Some("bar"));
    }

    #[test]
    fn quoted_value_is_absorbed() {
        let mut env = Env::new();
        let mut tokens = lex(r#"X="a b""#).unwrap();
        expand_vars(&env, &mut tokens);
        set_variables(&mut env, &mut tokens);
        assert_eq!(env.variables.get("X"), Some("a b"));
    }

    #[test]
    fn assignments_evaluate_left_to_right() {
        let mut env = Env::new();
        let mut tokens = lex("A=1 A=2").unwrap();
        set_variables(&mut env, &mut tokens);
        assert_eq!(env.variables.get("A"), Some("2"));
    }

    #[test]
    fn value_may_contain_equals() {
        let mut env = Env::new();
        let mut tokens = lex("OPTS=a=b").unwrap();
        set_variables(&mut env, &mut tokens);
        assert_eq!(env.variables.get("OPTS"), Some("a=b"));
    }

    #[test]
    fn declarations_do_not_reach_argv() {
        let mut env = Env::new();
        let mut tokens = lex("FOO=bar echo hi").unwrap();
        set_variables(&mut env, &mut tokens);
        let argv: Vec<&str> = tokens
            .iter()
            .filter(|t| t.has_flag(TokenFlag::WordLike) && !t.value.is_empty())
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(argv, ["echo", "hi"]);
        assert_eq!(env.variables.get("FOO"), Some("bar"));
    }
}
