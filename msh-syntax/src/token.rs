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

//! Token model
//!
//! A [`Token`] pairs a [`TokenKind`] with its text. Each kind implies a set
//! of semantic [`TokenFlag`]s, derived by [`TokenKind::flags`] so that kind
//! and flags cannot disagree; the only flag ever added on top is
//! [`TokenFlag::NoWordSplit`] on a command substitution born inside double
//! quotes.

use enumset::{enum_set, EnumSet, EnumSetType};

/// Semantic property of a token
#[derive(Debug, EnumSetType)]
pub enum TokenFlag {
    /// The token is rejected by the syntax check.
    Unsupported,
    /// The value is a shell glob pattern to be expanded.
    GlobExpand,
    /// `$NAME` is substituted in the value.
    VarExpand,
    /// The token contributes to `argv`.
    WordLike,
    /// The value is protected from whitespace re-splitting.
    NoWordSplit,
    /// The token terminates a simple command in the splitter.
    CommandSeparator,
    /// The token is a redirection operator.
    Redirect,
}

/// Classification of a token
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Empty,
    Word,
    Command,
    /// `&`
    Amp,
    /// `&&`
    And,
    /// `|`
    Pipe,
    /// `|&`
    PipeAmp,
    /// `||`
    Or,
    /// `>`
    Out,
    /// `>>`
    OutAppend,
    /// `<`
    In,
    /// `>&`
    OutAmp,
    /// `<&`
    InAmp,
    /// `&>`
    AmpOut,
    /// `&>>`
    AmpAppend,
    /// `;`
    Semicolon,
    /// Double-quoted string
    DqString,
    /// Single-quoted string
    SqString,
    /// Assignment word seen in command position
    VarDecl,
    /// `(`
    SubOpen,
    /// `)`
    SubClose,
    /// `$( … )`
    ComSub,
}

impl TokenKind {
    /// Returns the flags implied by this token kind.
    #[must_use]
    pub const fn flags(self) -> EnumSet<TokenFlag> {
        use TokenFlag::*;
        match self {
            TokenKind::Empty => enum_set!(),
            TokenKind::Word => enum_set!(WordLike | GlobExpand | VarExpand),
            TokenKind::Command => enum_set!(WordLike | VarExpand),
            TokenKind::DqString => enum_set!(WordLike | NoWordSplit | VarExpand),
            TokenKind::SqString => enum_set!(WordLike | NoWordSplit),
            TokenKind::VarDecl => enum_set!(),
            TokenKind::SubOpen => enum_set!(Unsupported | CommandSeparator),
            TokenKind::SubClose => enum_set!(Unsupported),
            TokenKind::Amp
            | TokenKind::And
            | TokenKind::Pipe
            | TokenKind::PipeAmp
            | TokenKind::Or
            | TokenKind::Semicolon => enum_set!(CommandSeparator),
            TokenKind::Out
            | TokenKind::OutAppend
            | TokenKind::In
            | TokenKind::OutAmp
            | TokenKind::InAmp
            | TokenKind::AmpOut
            | TokenKind::AmpAppend => enum_set!(Redirect),
            TokenKind::ComSub => enum_set!(WordLike),
        }
    }
}

/// Single unit of input produced by the lexer
///
/// All processing operations are performed on tokens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub flags: EnumSet<TokenFlag>,
}

impl Token {
    /// Creates a token with an empty value.
    #[must_use]
    pub fn new(kind: TokenKind) -> Token {
        Token {
            kind,
            value: String::new(),
            flags: kind.flags(),
        }
    }

    /// Creates a token with the given value.
    #[must_use]
    pub fn with_value<V: Into<String>>(kind: TokenKind, value: V) -> Token {
        Token {
            kind,
            value: value.into(),
            flags: kind.flags(),
        }
    }

    /// Changes the kind of this token, re-deriving its flags.
    pub fn set_kind(&mut self, kind: TokenKind) {
        self.kind = kind;
        self.flags = kind.flags();
    }

    /// Tests a flag.
    #[must_use]
    pub fn has_flag(&self, flag: TokenFlag) -> bool {
        self.flags.contains(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_kind() {
        let mut token = Token::with_value(TokenKind::Word, "ls");
        assert!(token.has_flag(TokenFlag::WordLike));
        assert!(token.has_flag(TokenFlag::GlobExpand));
        token.set_kind(TokenKind::Command);
        assert!(token.has_flag(TokenFlag::WordLike));
        assert!(!token.has_flag(TokenFlag::GlobExpand));
        assert!(token.has_flag(TokenFlag::VarExpand));
    }

    #[test]
    fn separators_and_redirects_are_disjoint() {
        for kind in [
            TokenKind::Amp,
            TokenKind::And,
            TokenKind::Pipe,
            TokenKind::PipeAmp,
            TokenKind::Or,
            TokenKind::Semicolon,
        ] {
            assert!(kind.flags().contains(TokenFlag::CommandSeparator));
            assert!(!kind.flags().contains(TokenFlag::Redirect));
        }
        for kind in [
            TokenKind::Out,
            TokenKind::OutAppend,
            TokenKind::In,
            TokenKind::OutAmp,
            TokenKind::InAmp,
            TokenKind::AmpOut,
            TokenKind::AmpAppend,
        ] {
            assert!(kind.flags().contains(TokenFlag::Redirect));
            assert!(!kind.flags().contains(TokenFlag::CommandSeparator));
        }
    }

    #[test]
    fn quoted_strings_are_not_split_or_globbed() {
        assert!(TokenKind::DqString.flags().contains(TokenFlag::NoWordSplit));
        assert!(!TokenKind::DqString.flags().contains(TokenFlag::GlobExpand));
        assert!(TokenKind::SqString.flags().contains(TokenFlag::NoWordSplit));
        assert!(!TokenKind::SqString.flags().contains(TokenFlag::VarExpand));
    }

    #[test]
    fn grouping_tokens_are_unsupported() {
        assert!(TokenKind::SubOpen.flags().contains(TokenFlag::Unsupported));
        assert!(TokenKind::SubClose.flags().contains(TokenFlag::Unsupported));
    }
}
