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

//! Alias expansion
//!
//! Rewrites [`TokenKind::Command`] tokens whose value names an alias: the
//! replacement text is re-lexed and spliced in place of the command token.
//! The chain's seen-set keeps any alias name from expanding twice on the
//! same chain, so `alias ls='ls --color'` terminates, as does any cycle.
//!
//! A replacement may contain its own connectors; the caller is expected to
//! re-split the expanded stream when that happens.

use crate::error::SyntaxError;
use crate::lexer::lex;
use crate::token::{Token, TokenKind};
use msh_env::alias::Glossary;

/// Expands aliases in a token stream in place.
///
/// Only `Command` tokens are eligible. Lexing a replacement can fail, in
/// which case the stream is left unchanged.
pub fn expand_aliases<G: Glossary>(
    tokens: &mut Vec<Token>,
    glossary: &G,
) -> Result<(), SyntaxError> {
    if glossary.is_empty() {
        return Ok(());
    }

    let mut expanded = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    expand_into(std::mem::take(tokens), glossary, &mut seen, &mut expanded)?;
    *tokens = expanded;
    Ok(())
}

fn expand_into<G: Glossary>(
    tokens: Vec<Token>,
    glossary: &G,
    seen: &mut Vec<String>,
    out: &mut Vec<Token>,
) -> Result<(), SyntaxError> {
    for token in tokens {
        if token.kind == TokenKind::Command && !seen.iter().any(|name| *name == token.value) {
            if let Some(alias) = glossary.look_up(&token.value) {
                let replacement = lex(&alias.replacement)?;
                seen.push(token.value);
                expand_into(replacement, glossary, seen, out)?;
                seen.pop();
                continue;
            }
        }
        out.push(token);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenFlag;
    use msh_env::alias::{AliasSet, HashEntry};

    fn aliases(defs: &[(&str, &str)]) -> AliasSet {
        defs.iter()
            .map(|(name, replacement)| HashEntry::new(*name, *replacement))
            .collect()
    }

    fn words(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Empty)
            .map(|t| t.value.as_str())
            .collect()
    }

    #[test]
    fn command_token_is_replaced() {
        let set = aliases(&[("ll", "ls -l")]);
        let mut tokens = lex("ll /tmp").unwrap();
        expand_aliases(&mut tokens, &set).unwrap();
        assert_eq!(words(&tokens), ["ls", "-l", "/tmp"]);
    }

    #[test]
    fn non_command_tokens_are_untouched() {
        let set = aliases(&[("ll", "ls -l")]);
        let mut tokens = lex("echo ll").unwrap();
        expand_aliases(&mut tokens, &set).unwrap();
        assert_eq!(words(&tokens), ["echo", "ll"]);
    }

    #[test]
    fn chained_aliases_expand_fully() {
        let set = aliases(&[("ll", "ls -l"), ("la", "ll -a")]);
        let mut tokens = lex("la").unwrap();
        expand_aliases(&mut tokens, &set).unwrap();
        assert_eq!(words(&tokens), ["ls", "-l", "-a"]);
    }

    #[test]
    fn self_reference_terminates() {
        let set = aliases(&[("ls", "ls --color")]);
        let mut tokens = lex("ls").unwrap();
        expand_aliases(&mut tokens, &set).unwrap();
        assert_eq!(words(&tokens), ["ls", "--color"]);
    }

    #[test]
    fn cycle_terminates() {
        let set = aliases(&[("a", "b"), ("b", "a x")]);
        let mut tokens = lex("a").unwrap();
        expand_aliases(&mut tokens, &set).unwrap();
        assert_eq!(words(&tokens), ["a", "x"]);
    }

    #[test]
    fn replacement_may_introduce_connectors() {
        let set = aliases(&[("both", "date; ls")]);
        let mut tokens = lex("both").unwrap();
        expand_aliases(&mut tokens, &set).unwrap();
        assert!(tokens.iter().any(|t| t.has_flag(TokenFlag::CommandSeparator)));
        assert_eq!(words(&tokens), ["date", ";", "ls"]);
    }

    #[test]
    fn expansion_applies_after_each_separator() {
        let set = aliases(&[("ll", "ls -l")]);
        let mut tokens = lex("echo x; ll").unwrap();
        expand_aliases(&mut tokens, &set).unwrap();
        assert_eq!(words(&tokens), ["echo", "x", ";", "ls", "-l"]);
    }
}
