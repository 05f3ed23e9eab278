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

//! Glob expansion
//!
//! Tokens carrying the `GlobExpand` flag are matched against the file
//! system, with a leading `~` resolved to the home directory first. One or
//! more matches replace the token as a sorted `WORD, EMPTY, WORD, …`
//! sequence; with no match the token is left unchanged, pattern and all.

use super::replace_token;
use msh_syntax::{Token, TokenFlag, TokenKind};

/// Expands glob patterns in every token carrying the `GlobExpand` flag.
pub fn expand_globs(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i < tokens.len() {
        if !tokens[i].has_flag(TokenFlag::GlobExpand) || tokens[i].value.is_empty() {
            i += 1;
            continue;
        }

        let pattern = expand_tilde(&tokens[i].value);
        let mut matches: Vec<String> = match glob::glob(&pattern) {
            Ok(paths) => paths
                .filter_map(Result::ok)
                .map(|path| path.display().to_string())
                .collect(),
            Err(_) => Vec::new(),
        };
        if matches.is_empty() {
            i += 1;
            continue;
        }
        matches.sort();

        let sub: Vec<Token> = itertools::intersperse(
            matches
                .into_iter()
                .map(|path| Token::with_value(TokenKind::Word, path)),
            Token::new(TokenKind::Empty),
        )
        .collect();
        i = replace_token(tokens, i, sub);
    }
}

fn expand_tilde(pattern: &str) -> String {
    if pattern == "~" || pattern.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &pattern[1..]);
        }
    }
    pattern.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn word_token(value: &str) -> Token {
        Token::with_value(TokenKind::Word, value)
    }

    fn words(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.value.as_str())
            .collect()
    }

    #[test]
    fn matches_replace_the_pattern_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.log"] {
            File::create(dir.path().join(name)).unwrap();
        }
        let pattern = format!("{}/*.txt", dir.path().display());
        let mut tokens = vec![word_token(&pattern)];
        expand_globs(&mut tokens);
        let expected = [
            format!("{}/a.txt", dir.path().display()),
            format!("{}/b.txt", dir.path().display()),
        ];
        assert_eq!(words(&tokens), expected);
        // The two matches are separated by an EMPTY marker.
        assert_eq!(tokens[1].kind, TokenKind::Empty);
    }

    #[test]
    fn no_match_leaves_the_token_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.absent", dir.path().display());
        let mut tokens = vec![word_token(&pattern)];
        expand_globs(&mut tokens);
        assert_eq!(words(&tokens), [pattern.as_str()]);
    }

    #[test]
    fn invalid_pattern_is_left_alone() {
        let mut tokens = vec![word_token("[")];
        expand_globs(&mut tokens);
        assert_eq!(words(&tokens), ["["]);
    }

    #[test]
    fn quoted_tokens_are_not_expanded() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("x.txt")).unwrap();
        let pattern = format!("{}/*.txt", dir.path().display());
        let mut tokens = vec![Token::with_value(TokenKind::DqString, &pattern)];
        expand_globs(&mut tokens);
        assert_eq!(tokens[0].value, pattern);
    }

    #[test]
    fn tilde_prefix_resolves_to_home() {
        if dirs::home_dir().is_none() {
            return;
        }
        let expanded = expand_tilde("~/x");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/x"));
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }
}
