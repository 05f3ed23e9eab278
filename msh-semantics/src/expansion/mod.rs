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

//! Token processing
//!
//! [`process_tokens`] runs the in-place rewriting passes over a simple
//! command's tokens in their required order: variable expansion, command
//! substitution, assignment capture, glob expansion, and finally the
//! coalescing of adjacent word-like tokens. Expansions never cross command
//! separators, so the separator count of a token stream is invariant under
//! processing.

pub mod assign;
pub mod command_subst;
pub mod glob;
pub mod var;

use msh_env::semantics::ExitStatus;
use msh_env::Env;
use msh_syntax::{SyntaxError, Token, TokenFlag, TokenKind};
use nix::errno::Errno;
use thiserror::Error;

/// Error in one of the token processing passes
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ExpansionError {
    /// Parse error, e.g. in a command substitution body
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Pipe or read failure during command substitution
    #[error("command substitution: {0}")]
    Substitution(Errno),
}

impl ExpansionError {
    /// Exit status the enclosing simple command reports for this error.
    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            ExpansionError::Syntax(_) => ExitStatus::FAILURE,
            ExpansionError::Substitution(_) => ExitStatus::UNKNOWN,
        }
    }
}

/// Runs all token processing passes in order.
pub fn process_tokens(env: &mut Env, tokens: &mut Vec<Token>) -> Result<(), ExpansionError> {
    var::expand_vars(env, tokens);
    command_subst::substitute_commands(env, tokens)?;
    assign::set_variables(env, tokens);
    glob::expand_globs(tokens);
    squash_tokens(tokens);

    for token in tokens.iter() {
        if token.has_flag(TokenFlag::Unsupported) {
            return Err(SyntaxError::UnsupportedToken(token.value.clone()).into());
        }
    }
    Ok(())
}

/// Replaces the token at `index` with a sequence of tokens.
///
/// Returns the index one past the last inserted token, so the caller's scan
/// continues after the spliced-in region.
pub(crate) fn replace_token(tokens: &mut Vec<Token>, index: usize, sub: Vec<Token>) -> usize {
    let count = sub.len();
    tokens.splice(index..=index, sub);
    index + count
}

/// Splits a string into `WORD, EMPTY, WORD, …` tokens on the `IFS`
/// delimiters.
///
/// The delimiters come from the `IFS` environment variable, defaulting to
/// space, tab and newline; consecutive delimiters collapse. The `EMPTY`
/// markers keep the produced words from being coalesced back together. An
/// input with no words yields a single empty `WORD`.
pub(crate) fn split_words(input: &str) -> Vec<Token> {
    let ifs = std::env::var("IFS").unwrap_or_else(|_| " \t\n".to_string());

    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in input.chars() {
        if ifs.contains(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    if words.is_empty() {
        words.push(String::new());
    }

    itertools::intersperse(
        words
            .into_iter()
            .map(|word| Token::with_value(TokenKind::Word, word)),
        Token::new(TokenKind::Empty),
    )
    .collect()
}

/// Concatenates adjacent word-like tokens.
///
/// The left token's value moves into the right one and the left becomes
/// `EMPTY`, so a chain of adjacent word-like tokens accumulates left to
/// right. This is what turns `hello"world"` into one `argv` entry.
pub(crate) fn squash_tokens(tokens: &mut [Token]) {
    for i in 1..tokens.len() {
        if tokens[i - 1].has_flag(TokenFlag::WordLike) && tokens[i].has_flag(TokenFlag::WordLike) {
            let left = std::mem::take(&mut tokens[i - 1].value);
            tokens[i].value = left + &tokens[i].value;
            tokens[i - 1].set_kind(TokenKind::Empty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msh_syntax::lexer::lex;

    fn argv(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.has_flag(TokenFlag::WordLike) && !t.value.is_empty())
            .map(|t| t.value.as_str())
            .collect()
    }

    #[test]
    fn split_words_on_default_ifs() {
        let tokens = split_words("a b\tc");
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(words, ["a", "b", "c"]);
        // Words are kept apart by EMPTY markers.
        assert_eq!(tokens[1].kind, TokenKind::Empty);
        assert_eq!(tokens[3].kind, TokenKind::Empty);
    }

    #[test]
    fn split_words_collapses_consecutive_delimiters() {
        let tokens = split_words("  a   b  ");
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(words, ["a", "b"]);
    }

    #[test]
    fn split_words_of_empty_input_yields_one_empty_word() {
        let tokens = split_words("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].value, "");
    }

    #[test]
    fn squash_joins_adjacent_word_like_tokens() {
        let mut tokens = lex(r#"echo hello"world""#).unwrap();
        squash_tokens(&mut tokens);
        assert_eq!(argv(&tokens), ["echo", "helloworld"]);
    }

    #[test]
    fn squash_does_not_join_across_empty_markers() {
        let mut tokens = lex("echo hello world").unwrap();
        squash_tokens(&mut tokens);
        assert_eq!(argv(&tokens), ["echo", "hello", "world"]);
    }

    #[test]
    fn squash_accumulates_chains() {
        let mut tokens = vec![
            Token::with_value(TokenKind::Word, "a"),
            Token::with_value(TokenKind::Word, "b"),
            Token::with_value(TokenKind::Word, "c"),
        ];
        squash_tokens(&mut tokens);
        assert_eq!(argv(&tokens), ["abc"]);
    }

    #[test]
    fn replace_token_splices_in_place() {
        let mut tokens = lex("a b c").unwrap();
        let next = replace_token(
            &mut tokens,
            2,
            vec![
                Token::with_value(TokenKind::Word, "x"),
                Token::new(TokenKind::Empty),
                Token::with_value(TokenKind::Word, "y"),
            ],
        );
        assert_eq!(next, 5);
        assert_eq!(argv(&tokens), ["a", "x", "y", "c"]);
    }

    #[test]
    fn processing_reports_unsupported_tokens() {
        let mut env = Env::new();
        let mut tokens = vec![Token::with_value(TokenKind::SubClose, ")")];
        let result = process_tokens(&mut env, &mut tokens);
        assert_eq!(
            result,
            Err(SyntaxError::UnsupportedToken(")".to_string()).into())
        );
    }

    #[test]
    fn processing_preserves_separator_count() {
        let mut env = Env::new();
        env.variables.set("X", "1 2 3");
        let mut tokens = lex("a $X ; b").unwrap();
        let before = tokens
            .iter()
            .filter(|t| t.has_flag(TokenFlag::CommandSeparator))
            .count();
        process_tokens(&mut env, &mut tokens).unwrap();
        let after = tokens
            .iter()
            .filter(|t| t.has_flag(TokenFlag::CommandSeparator))
            .count();
        assert_eq!(before, after);
    }
}
