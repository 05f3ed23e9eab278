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

//! Redirection parsing
//!
//! Runs per simple command after expansion, before `argv` construction.
//! Each token carrying the `Redirect` flag is combined with an optional
//! preceding descriptor number and the following target word into a
//! [`Redirect`] record; all three tokens are removed from the stream.
//!
//! Opening the target is deferred until execution; see the redirection
//! module in `msh-semantics`.

use crate::error::SyntaxError;
use crate::token::{Token, TokenFlag, TokenKind};
use std::os::fd::RawFd;

/// What a redirection reads from or writes to
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Redirectee {
    /// An already-open descriptor to duplicate
    Fd(RawFd),
    /// A path to open when the redirection is applied
    Path(String),
}

/// How the target is opened
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedirKind {
    /// Open for reading
    In,
    /// Open for writing, truncating
    Out,
    /// Open for writing, appending
    OutAppend,
}

/// One parsed redirection
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redirect {
    /// In-process descriptor the target is duplicated onto
    pub fd: RawFd,
    /// Descriptor or path providing the target
    pub target: Redirectee,
    /// Open mode for path targets
    pub kind: RedirKind,
    /// Also duplicate standard output onto standard error afterwards
    /// (`&>`, `&>>`, and `>&` with a non-numeric target)
    pub both_err_out: bool,
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Extracts the redirections from a simple command's tokens.
///
/// The operator and target tokens (and a consumed descriptor-number token)
/// are removed from the stream; the records are returned in source order.
pub fn parse_redirects(tokens: &mut Vec<Token>) -> Result<Vec<Redirect>, SyntaxError> {
    let mut redirects = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if !tokens[i].has_flag(TokenFlag::Redirect) {
            i += 1;
            continue;
        }
        let op_kind = tokens[i].kind;
        let op_value = tokens[i].value.clone();

        let (kind, mut fd, mut both_err_out) = match op_kind {
            TokenKind::In | TokenKind::InAmp => (RedirKind::In, 0, false),
            TokenKind::Out | TokenKind::OutAmp => (RedirKind::Out, 1, false),
            TokenKind::OutAppend => (RedirKind::OutAppend, 1, false),
            TokenKind::AmpOut => (RedirKind::Out, 1, true),
            TokenKind::AmpAppend => (RedirKind::OutAppend, 1, true),
            _ => unreachable!("token {op_kind:?} carries the Redirect flag"),
        };

        // An immediately preceding all-digit word names the source
        // descriptor, except for the `&>` forms.
        let amp_form = matches!(op_kind, TokenKind::AmpOut | TokenKind::AmpAppend);
        if i > 0 && !amp_form {
            let prev = &tokens[i - 1];
            if prev.has_flag(TokenFlag::WordLike) && is_all_digits(&prev.value) {
                if let Ok(number) = prev.value.parse::<RawFd>() {
                    fd = number;
                    tokens.remove(i - 1);
                    i -= 1;
                }
            }
        }

        let Some(target_index) =
            (i + 1..tokens.len()).find(|&j| tokens[j].has_flag(TokenFlag::WordLike))
        else {
            return Err(SyntaxError::MissingRedirectTarget(op_value));
        };
        let word = tokens[target_index].value.clone();

        let target = match op_kind {
            TokenKind::OutAmp | TokenKind::InAmp => {
                if is_all_digits(&word) {
                    match word.parse::<RawFd>() {
                        Ok(number) => Redirectee::Fd(number),
                        Err(_) => return Err(SyntaxError::InvalidFileDescriptor(word)),
                    }
                } else if op_kind == TokenKind::OutAmp {
                    // `>&word` with a non-numeric word sends both standard
                    // output and standard error to the file.
                    both_err_out = true;
                    Redirectee::Path(word)
                } else {
                    return Err(SyntaxError::AmbiguousRedirect(word));
                }
            }
            _ => Redirectee::Path(word),
        };

        tokens.remove(target_index);
        tokens.remove(i);
        redirects.push(Redirect {
            fd,
            target,
            kind,
            both_err_out,
        });
    }

    Ok(redirects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use assert_matches::assert_matches;

    fn parse(input: &str) -> (Vec<Token>, Result<Vec<Redirect>, SyntaxError>) {
        let mut tokens = lex(input).unwrap();
        let redirects = parse_redirects(&mut tokens);
        (tokens, redirects)
    }

    fn remaining_words(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.has_flag(TokenFlag::WordLike) && !t.value.is_empty())
            .map(|t| t.value.as_str())
            .collect()
    }

    #[test]
    fn no_redirect_tokens_is_a_no_op() {
        let (tokens, redirects) = parse("echo hello");
        assert_eq!(redirects.unwrap(), []);
        assert_eq!(remaining_words(&tokens), ["echo", "hello"]);
    }

    #[test]
    fn output_redirect_defaults_to_stdout() {
        let (tokens, redirects) = parse("echo out > file");
        let redirects = redirects.unwrap();
        assert_eq!(redirects.len(), 1);
        assert_eq!(redirects[0].fd, 1);
        assert_eq!(redirects[0].kind, RedirKind::Out);
        assert_eq!(redirects[0].target, Redirectee::Path("file".to_string()));
        assert!(!redirects[0].both_err_out);
        assert_eq!(remaining_words(&tokens), ["echo", "out"]);
    }

    #[test]
    fn input_redirect_defaults_to_stdin() {
        let (_, redirects) = parse("cat < file");
        let redirects = redirects.unwrap();
        assert_eq!(redirects[0].fd, 0);
        assert_eq!(redirects[0].kind, RedirKind::In);
    }

    #[test]
    fn append_redirect() {
        let (_, redirects) = parse("echo x >> log");
        assert_eq!(redirects.unwrap()[0].kind, RedirKind::OutAppend);
    }

    #[test]
    fn explicit_source_descriptor_is_consumed() {
        let (tokens, redirects) = parse("cmd 2> errors");
        let redirects = redirects.unwrap();
        assert_eq!(redirects[0].fd, 2);
        assert_eq!(remaining_words(&tokens), ["cmd"]);
    }

    #[test]
    fn descriptor_duplication() {
        let (tokens, redirects) = parse("cmd 2>&1");
        let redirects = redirects.unwrap();
        assert_eq!(redirects[0].fd, 2);
        assert_eq!(redirects[0].target, Redirectee::Fd(1));
        assert!(!redirects[0].both_err_out);
        assert_eq!(remaining_words(&tokens), ["cmd"]);
    }

    #[test]
    fn out_amp_with_filename_redirects_both() {
        let (_, redirects) = parse("cmd >& all.log");
        let redirects = redirects.unwrap();
        assert_eq!(redirects[0].target, Redirectee::Path("all.log".to_string()));
        assert!(redirects[0].both_err_out);
    }

    #[test]
    fn amp_out_redirects_both() {
        let (_, redirects) = parse("cmd &> all.log");
        let redirects = redirects.unwrap();
        assert_eq!(redirects[0].fd, 1);
        assert!(redirects[0].both_err_out);
        assert_eq!(redirects[0].kind, RedirKind::Out);
    }

    #[test]
    fn amp_append_redirects_both_appending() {
        let (_, redirects) = parse("cmd &>> all.log");
        let redirects = redirects.unwrap();
        assert!(redirects[0].both_err_out);
        assert_eq!(redirects[0].kind, RedirKind::OutAppend);
    }

    #[test]
    fn amp_out_does_not_take_a_source_descriptor() {
        // The `2` is an argument here, not a descriptor number.
        let (tokens, redirects) = parse("cmd 2 &> all.log");
        assert_eq!(redirects.unwrap()[0].fd, 1);
        assert_eq!(remaining_words(&tokens), ["cmd", "2"]);
    }

    #[test]
    fn in_amp_with_filename_is_ambiguous() {
        let (_, redirects) = parse("cmd <& file");
        assert_matches!(redirects, Err(SyntaxError::AmbiguousRedirect(w)) if w == "file");
    }

    #[test]
    fn missing_target_is_an_error() {
        let (_, redirects) = parse("echo hi >");
        assert_matches!(redirects, Err(SyntaxError::MissingRedirectTarget(op)) if op == ">");
    }

    #[test]
    fn oversized_descriptor_is_rejected() {
        let (_, redirects) = parse("cmd >& 99999999999999999999");
        assert_matches!(redirects, Err(SyntaxError::InvalidFileDescriptor(_)));
    }

    #[test]
    fn multiple_redirects_parse_in_order() {
        let (tokens, redirects) = parse("cmd 2>&1 err-like > out.txt");
        let redirects = redirects.unwrap();
        assert_eq!(redirects.len(), 2);
        assert_eq!(redirects[0].fd, 2);
        assert_eq!(redirects[0].target, Redirectee::Fd(1));
        assert_eq!(redirects[1].fd, 1);
        assert_eq!(
            redirects[1].target,
            Redirectee::Path("out.txt".to_string())
        );
        assert_eq!(remaining_words(&tokens), ["cmd", "err-like"]);
    }
}
