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

//! Variable expansion
//!
//! `$NAME` consumes the longest run of `[A-Za-z0-9_]` after the dollar;
//! the internal table is consulted before the process environment, and an
//! unresolved name expands to the empty string. `\$` yields a literal `$`.
//! Unless the token is protected by `NoWordSplit`, the expanded value is
//! re-split on the `IFS` delimiters.

use super::{replace_token, split_words};
use msh_env::Env;
use msh_syntax::{Token, TokenFlag};

/// Expands variables in every token carrying the `VarExpand` flag.
pub fn expand_vars(env: &Env, tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i < tokens.len() {
        if !tokens[i].has_flag(TokenFlag::VarExpand) {
            i += 1;
            continue;
        }
        let expanded = expand_in(env, &tokens[i].value);
        if tokens[i].has_flag(TokenFlag::NoWordSplit) {
            tokens[i].value = expanded;
            i += 1;
        } else {
            i = replace_token(tokens, i, split_words(&expanded));
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn expand_in(env: &Env, value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut result = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\\' && chars.get(i + 1) == Some(&'$') {
            result.push('$');
            i += 2;
            continue;
        }
        if chars[i] != '$' {
            result.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i + 1;
        let mut end = start;
        while end < chars.len() && is_name_char(chars[end]) {
            end += 1;
        }
        if end == start {
            result.push('$');
            i += 1;
            continue;
        }

        let name: String = chars[start..end].iter().collect();
        if let Some(value) = env.variables.value_or_env(&name) {
            result.push_str(&value);
        }
        i = end;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use msh_syntax::lexer::lex;
    use msh_syntax::TokenKind;

    fn words(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Empty)
            .map(|t| t.value.as_str())
            .collect()
    }

    #[test]
    fn defined_variable_expands() {
        let mut env = Env::new();
        env.variables.set("FOO", "bar");
        let mut tokens = lex("echo $FOO").unwrap();
        expand_vars(&env, &mut tokens);
        assert_eq!(words(&tokens), ["echo", "bar"]);
    }

    #[test]
    fn undefined_variable_expands_to_nothing() {
        let env = Env::new();
        assert_eq!(expand_in(&env, "a$msh_test_undefined_name b"), "a b");
        assert_eq!(expand_in(&env, "x$msh_test_undefined_name"), "x");
    }

    #[test]
    fn name_is_longest_alphanumeric_run() {
        let mut env = Env::new();
        env.variables.set("FOO", "f");
        env.variables.set("FOO_2", "g");
        assert_eq!(expand_in(&env, "$FOO-x"), "f-x");
        assert_eq!(expand_in(&env, "$FOO_2"), "g");
    }

    #[test]
    fn escaped_dollar_is_literal() {
        let mut env = Env::new();
        env.variables.set("FOO", "bar");
        assert_eq!(expand_in(&env, r"\$FOO"), "$FOO");
    }

    #[test]
    fn lone_dollar_is_literal() {
        let env = Env::new();
        assert_eq!(expand_in(&env, "a$ b"), "a$ b");
        assert_eq!(expand_in(&env, "$"), "$");
    }

    #[test]
    fn internal_table_wins_over_environment() {
        let mut env = Env::new();
        env.variables.set("PATH", "table-value");
        assert_eq!(expand_in(&env, "$PATH"), "table-value");
    }

    #[test]
    fn expansion_splits_unquoted_words() {
        let mut env = Env::new();
        env.variables.set("ARGS", "one two");
        let mut tokens = lex("echo $ARGS").unwrap();
        expand_vars(&env, &mut tokens);
        let split: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(split, ["one", "two"]);
    }

    #[test]
    fn quoted_expansion_is_not_split() {
        let mut env = Env::new();
        env.variables.set("ARGS", "one two");
        let mut tokens = lex(r#"echo "$ARGS""#).unwrap();
        expand_vars(&env, &mut tokens);
        assert_eq!(words(&tokens), ["echo", "one two"]);
    }
}
