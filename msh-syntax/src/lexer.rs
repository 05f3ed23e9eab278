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

//! Lexical analysis
//!
//! A single left-to-right scan classifies the input into [`Token`]s. The
//! scanner keeps three orthogonal pieces of state: the currently open quote,
//! a stack of `$( … )` nesting levels (each remembering whether a quote is
//! open inside it), and the `command_expected` flag that retypes the next
//! completed word to [`TokenKind::Command`].
//!
//! The token stream deliberately keeps [`TokenKind::Empty`] markers where
//! the input had whitespace; the coalescing pass later joins adjacent
//! word-like tokens and the markers are what keep separate words apart.

use crate::error::SyntaxError;
use crate::token::{Token, TokenFlag, TokenKind};

/// Pushes `current` to the output and replaces it with `new`.
fn start(tokens: &mut Vec<Token>, current: &mut Token, new: Token) {
    tokens.push(std::mem::replace(current, new));
}

/// Performs lexical analysis on one line of input.
///
/// Returns the classified token sequence, or an error for an unclosed
/// quote, an unterminated `$(`, or two adjacent command separators.
pub fn lex(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut current = Token::new(TokenKind::Empty);
    let mut previous_separator = false;
    let mut command_expected = true;
    let mut open_until: Option<char> = None;
    // One entry per open `$(`; the entry holds the quote open at that level.
    let mut substitutions: Vec<Option<char>> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if current.kind != TokenKind::Empty {
            previous_separator = current.has_flag(TokenFlag::CommandSeparator);
        }

        if command_expected {
            if let Some(last) = tokens.last_mut() {
                if last.kind == TokenKind::Word {
                    last.set_kind(TokenKind::Command);
                    command_expected = false;
                }
            }
        }
        if current.has_flag(TokenFlag::CommandSeparator) {
            command_expected = true;
        }

        if open_until == Some(c) && substitutions.is_empty() {
            open_until = None;
            i += 1;
            continue;
        }

        if open_until.is_some() && current.kind == TokenKind::Empty {
            match open_until {
                Some('"') => current.set_kind(TokenKind::DqString),
                Some('\'') => current.set_kind(TokenKind::SqString),
                _ => {}
            }
        }

        if open_until == Some('\'') {
            while i < chars.len() && chars[i] != '\'' {
                current.value.push(chars[i]);
                i += 1;
            }
            continue;
        }

        if c == '$' && next == Some('(') {
            if substitutions.is_empty() {
                substitutions.push(None);
                start(&mut tokens, &mut current, Token::new(TokenKind::ComSub));
                if open_until == Some('"') {
                    current.flags |= TokenFlag::NoWordSplit;
                }
            } else {
                substitutions.push(None);
                current.value.push('$');
                current.value.push('(');
            }
            i += 2;
            continue;
        }

        if !substitutions.is_empty() {
            match c {
                '"' | '\'' => {
                    if let Some(top) = substitutions.last_mut() {
                        *top = if top.is_none() { Some(c) } else { None };
                    }
                }
                '(' if substitutions.last() == Some(&None) => substitutions.push(None),
                ')' if substitutions.last() == Some(&None) => {
                    substitutions.pop();
                    if substitutions.is_empty() {
                        start(&mut tokens, &mut current, Token::new(TokenKind::Empty));
                        i += 1;
                        continue;
                    }
                }
                _ => {}
            }
            current.value.push(c);
            i += 1;
            continue;
        }

        if open_until == Some('"') {
            if c == '\\' && next == Some('\\') {
                current.value.push('\\');
                i += 2;
            } else if c == '\\' && next == Some('"') {
                current.value.push('"');
                i += 2;
            } else {
                current.value.push(c);
                i += 1;
            }
            continue;
        }

        match c {
            '\\' => {
                if current.kind != TokenKind::Word && current.kind != TokenKind::VarDecl {
                    start(&mut tokens, &mut current, Token::new(TokenKind::Word));
                }
                if next == Some('$') {
                    // Kept for the variable expander, which turns `\$` into
                    // a literal dollar.
                    current.value.push('\\');
                } else if let Some(escaped) = next {
                    current.value.push(escaped);
                    i += 1;
                }
            }
            '&' => {
                let token = match next {
                    Some('&') => {
                        i += 1;
                        Token::with_value(TokenKind::And, "&&")
                    }
                    Some('>') => {
                        i += 1;
                        Token::with_value(TokenKind::AmpOut, "&>")
                    }
                    _ => Token::with_value(TokenKind::Amp, "&"),
                };
                start(&mut tokens, &mut current, token);
            }
            '|' => {
                let token = match next {
                    Some('|') => {
                        i += 1;
                        Token::with_value(TokenKind::Or, "||")
                    }
                    Some('&') => {
                        i += 1;
                        Token::with_value(TokenKind::PipeAmp, "|&")
                    }
                    _ => Token::with_value(TokenKind::Pipe, "|"),
                };
                start(&mut tokens, &mut current, token);
            }
            '>' => {
                if current.kind == TokenKind::AmpOut {
                    current.set_kind(TokenKind::AmpAppend);
                    current.value = "&>>".to_string();
                } else {
                    let token = match next {
                        Some('&') => {
                            i += 1;
                            Token::with_value(TokenKind::OutAmp, ">&")
                        }
                        Some('>') => {
                            i += 1;
                            Token::with_value(TokenKind::OutAppend, ">>")
                        }
                        _ => Token::with_value(TokenKind::Out, ">"),
                    };
                    start(&mut tokens, &mut current, token);
                }
            }
            '<' => {
                let token = if next == Some('&') {
                    i += 1;
                    Token::with_value(TokenKind::InAmp, "<&")
                } else {
                    Token::with_value(TokenKind::In, "<")
                };
                start(&mut tokens, &mut current, token);
            }
            ';' => {
                start(
                    &mut tokens,
                    &mut current,
                    Token::with_value(TokenKind::Semicolon, ";"),
                );
            }
            '"' => {
                start(&mut tokens, &mut current, Token::new(TokenKind::DqString));
                open_until = Some('"');
            }
            '\'' => {
                start(&mut tokens, &mut current, Token::new(TokenKind::SqString));
                open_until = Some('\'');
            }
            '=' => {
                if command_expected {
                    current.set_kind(TokenKind::VarDecl);
                }
                if current.kind == TokenKind::Empty {
                    start(&mut tokens, &mut current, Token::new(TokenKind::Word));
                }
                current.value.push('=');
            }
            '#' => {
                start(&mut tokens, &mut current, Token::new(TokenKind::Empty));
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '(' => {
                start(
                    &mut tokens,
                    &mut current,
                    Token::with_value(TokenKind::SubOpen, "("),
                );
            }
            ')' => {
                start(
                    &mut tokens,
                    &mut current,
                    Token::with_value(TokenKind::SubClose, ")"),
                );
            }
            ' ' | '\t' => {
                if current.kind != TokenKind::Empty {
                    start(&mut tokens, &mut current, Token::new(TokenKind::Empty));
                }
            }
            _ => {
                if current.kind == TokenKind::Word || current.kind == TokenKind::VarDecl {
                    current.value.push(c);
                } else {
                    start(&mut tokens, &mut current, Token::with_value(TokenKind::Word, c));
                }
            }
        }

        if current.has_flag(TokenFlag::CommandSeparator) && previous_separator {
            return Err(SyntaxError::UnexpectedToken(current.value.clone()));
        }
        i += 1;
    }

    if current.kind != TokenKind::Empty {
        tokens.push(current);
    }

    if let Some(top) = substitutions.last() {
        return Err(match top {
            None => SyntaxError::UnclosedSubstitution,
            Some(quote) => SyntaxError::UnclosedQuote(*quote),
        });
    }
    if let Some(quote) = open_until {
        return Err(SyntaxError::UnclosedDelimiter(quote));
    }

    if tokens.first().map(|t| t.kind) == Some(TokenKind::Empty) {
        tokens.remove(0);
    }
    if command_expected {
        if let Some(last) = tokens.last_mut() {
            if last.kind == TokenKind::Word {
                last.set_kind(TokenKind::Command);
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn first_word_becomes_command() {
        let tokens = lex("echo hello world").unwrap();
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Command,
                TokenKind::Empty,
                TokenKind::Word,
                TokenKind::Empty,
                TokenKind::Word,
            ]
        );
        assert_eq!(values(&tokens), ["echo", "", "hello", "", "world"]);
    }

    #[test]
    fn word_after_separator_becomes_command() {
        let tokens = lex("a; b | c && d").unwrap();
        let commands: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Command)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(commands, ["a", "b", "c", "d"]);
    }

    #[test]
    fn single_quotes_take_text_verbatim() {
        let tokens = lex("echo '$FOO \\n'").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::SqString);
        assert_eq!(tokens[2].value, "$FOO \\n");
        assert!(!tokens[2].has_flag(TokenFlag::VarExpand));
    }

    #[test]
    fn double_quotes_allow_expansion_without_splitting() {
        let tokens = lex(r#"echo "$FOO bar""#).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::DqString);
        assert_eq!(tokens[2].value, "$FOO bar");
        assert!(tokens[2].has_flag(TokenFlag::VarExpand));
        assert!(tokens[2].has_flag(TokenFlag::NoWordSplit));
    }

    #[test]
    fn double_quote_escapes() {
        let tokens = lex(r#"echo "a\\b \" c""#).unwrap();
        assert_eq!(tokens[2].value, r#"a\b " c"#);
    }

    #[test]
    fn backslash_escapes_next_character() {
        let tokens = lex(r"echo a\ b").unwrap();
        assert_eq!(values(&tokens), ["echo", "", "a b"]);
    }

    #[test]
    fn backslash_dollar_is_preserved_for_the_expander() {
        let tokens = lex(r"echo \$HOME").unwrap();
        assert_eq!(tokens[2].value, r"\$HOME");
    }

    #[test]
    fn operators_coalesce() {
        let pairs = [
            ("a && b", TokenKind::And),
            ("a || b", TokenKind::Or),
            ("a | b", TokenKind::Pipe),
            ("a |& b", TokenKind::PipeAmp),
            ("a > b", TokenKind::Out),
            ("a >> b", TokenKind::OutAppend),
            ("a < b", TokenKind::In),
            ("a >& b", TokenKind::OutAmp),
            ("a <& b", TokenKind::InAmp),
            ("a &> b", TokenKind::AmpOut),
            ("a &>> b", TokenKind::AmpAppend),
        ];
        for (input, kind) in pairs {
            let tokens = lex(input).unwrap();
            assert!(
                tokens.iter().any(|t| t.kind == kind),
                "{input:?} should contain {kind:?}, got {tokens:?}"
            );
        }
    }

    #[test]
    fn assignment_in_command_position_is_var_decl() {
        let tokens = lex("FOO=bar").unwrap();
        assert_eq!(kinds(&tokens), [TokenKind::VarDecl]);
        assert_eq!(tokens[0].value, "FOO=bar");
    }

    #[test]
    fn assignment_after_command_stays_a_word() {
        let tokens = lex("echo FOO=bar").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Word);
        assert_eq!(tokens[2].value, "FOO=bar");
    }

    #[test]
    fn consecutive_assignments_are_all_var_decls() {
        let tokens = lex("A=1 B=2 cmd").unwrap();
        let decls: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::VarDecl)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(decls, ["A=1", "B=2"]);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Command);
    }

    #[test]
    fn quoted_assignment_value_stays_adjacent() {
        let tokens = lex(r#"X="a b""#).unwrap();
        assert_eq!(kinds(&tokens), [TokenKind::VarDecl, TokenKind::DqString]);
        assert_eq!(values(&tokens), ["X=", "a b"]);
    }

    #[test]
    fn command_substitution_captures_body_verbatim() {
        let tokens = lex("echo $(ls -l | wc)").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::ComSub);
        assert_eq!(tokens[2].value, "ls -l | wc");
        assert!(!tokens[2].has_flag(TokenFlag::NoWordSplit));
    }

    #[test]
    fn nested_command_substitution_is_one_token() {
        let tokens = lex("echo $(echo nested $(echo deep))").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::ComSub);
        assert_eq!(tokens[2].value, "echo nested $(echo deep)");
    }

    #[test]
    fn command_substitution_in_quotes_is_not_split() {
        let tokens = lex(r#"echo "$(ls)""#).unwrap();
        let comsub = tokens.iter().find(|t| t.kind == TokenKind::ComSub).unwrap();
        assert!(comsub.has_flag(TokenFlag::NoWordSplit));
    }

    #[test]
    fn parenthesis_in_substitution_quotes_does_not_close() {
        let tokens = lex(r#"echo $(echo "a)b")"#).unwrap();
        assert_eq!(tokens[2].value, r#"echo "a)b""#);
    }

    #[test]
    fn comment_consumes_rest_of_line() {
        let tokens = lex("echo hi # not this").unwrap();
        assert_eq!(values(&tokens), ["echo", "", "hi", ""]);
    }

    #[test]
    fn adjacent_word_and_quote_have_no_empty_between() {
        let tokens = lex(r#"echo hello"world""#).unwrap();
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Command,
                TokenKind::Empty,
                TokenKind::Word,
                TokenKind::DqString,
            ]
        );
    }

    #[test]
    fn adjacent_separators_are_rejected() {
        assert_matches!(lex("a ;; b"), Err(SyntaxError::UnexpectedToken(t)) if t == ";");
        assert_matches!(lex("a & && b"), Err(SyntaxError::UnexpectedToken(t)) if t == "&&");
        assert_matches!(lex("a | ; b"), Err(SyntaxError::UnexpectedToken(_)));
    }

    #[test]
    fn unclosed_quote_is_rejected() {
        assert_matches!(lex("echo 'abc"), Err(SyntaxError::UnclosedDelimiter('\'')));
        assert_matches!(lex("echo \"abc"), Err(SyntaxError::UnclosedDelimiter('"')));
    }

    #[test]
    fn unclosed_substitution_is_rejected() {
        assert_matches!(lex("echo $(ls"), Err(SyntaxError::UnclosedSubstitution));
        assert_matches!(lex("echo $(ls 'x"), Err(SyntaxError::UnclosedQuote('\'')));
    }

    #[test]
    fn grouping_parentheses_lex_as_sub_tokens() {
        let tokens = lex("(echo)").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::SubOpen);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::SubClose);
    }

    #[test]
    fn lexed_values_partition_the_input() {
        // Concatenating the verbatim substrings reproduces the input modulo
        // whitespace and quoting.
        let tokens = lex("echo a&&b|c;d>e").unwrap();
        let joined: String = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(joined, "echoa&&b|c;d>e");
    }
}
