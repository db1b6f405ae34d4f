// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Token definitions for the Adder language.
//!
//! The tokenizer produces a flat sequence of [`Token`]s. Block structure is
//! carried by the synthetic [`TokenKind::Indent`], [`TokenKind::Dedent`], and
//! [`TokenKind::Newline`] tokens rather than by braces. Comments are retained
//! as tokens and filtered out by the parser.

use ecow::EcoString;
use std::fmt;

use super::Span;

/// The kind of a token, including its payload where one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Integer literal (decimal, `$` hex, or `%` binary), max 65535.
    Integer(u16),
    /// Decimal literal with a fractional part, kept as written.
    Decimal(EcoString),
    /// Double-quoted string literal (escapes already resolved).
    String(EcoString),
    /// Single-quoted character literal.
    Char(char),
    /// An identifier that is neither a keyword nor a type name.
    Identifier(EcoString),
    /// One of the eight built-in type names (`byte`, `word`, ...).
    TypeName(EcoString),
    /// A `#` comment, without the trailing newline.
    Comment(EcoString),

    // Keywords
    Def,
    If,
    Elif,
    Else,
    While,
    For,
    In,
    To,
    Downto,
    Break,
    Continue,
    Return,
    Pass,
    And,
    Or,
    Not,
    Data,
    End,
    Include,
    True,
    False,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    ShiftLeft,
    ShiftRight,
    EqualEqual,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    AmpersandEqual,
    PipeEqual,
    CaretEqual,
    ShiftLeftEqual,
    ShiftRightEqual,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Arrow,

    // Block structure
    Newline,
    Indent,
    Dedent,

    /// End of input; exactly one per token stream.
    Eof,
}

impl TokenKind {
    /// Resolves a word to its keyword or type-name token, or `None` if it is
    /// an ordinary identifier.
    #[must_use]
    pub fn from_word(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "def" => TokenKind::Def,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "to" => TokenKind::To,
            "downto" => TokenKind::Downto,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "return" => TokenKind::Return,
            "pass" => TokenKind::Pass,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "data" => TokenKind::Data,
            "end" => TokenKind::End,
            "include" => TokenKind::Include,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "byte" | "word" | "sbyte" | "sword" | "bool" | "string" | "fixed" | "float" => {
                TokenKind::TypeName(word.into())
            }
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this token is a literal value.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer(_)
                | TokenKind::Decimal(_)
                | TokenKind::String(_)
                | TokenKind::Char(_)
                | TokenKind::True
                | TokenKind::False
        )
    }

    #[must_use]
    pub fn is_identifier(&self) -> bool {
        matches!(self, TokenKind::Identifier(_))
    }

    #[must_use]
    pub fn is_type_name(&self) -> bool {
        matches!(self, TokenKind::TypeName(_))
    }

    /// Whether this token is a comparison operator.
    #[must_use]
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::EqualEqual
                | TokenKind::NotEqual
                | TokenKind::Less
                | TokenKind::Greater
                | TokenKind::LessEqual
                | TokenKind::GreaterEqual
        )
    }

    /// Whether this token is `=` or one of the compound assignment operators.
    #[must_use]
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::StarEqual
                | TokenKind::SlashEqual
                | TokenKind::PercentEqual
                | TokenKind::AmpersandEqual
                | TokenKind::PipeEqual
                | TokenKind::CaretEqual
                | TokenKind::ShiftLeftEqual
                | TokenKind::ShiftRightEqual
        )
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }

    /// The identifier or type-name text, if this token carries one.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            TokenKind::Identifier(name) | TokenKind::TypeName(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer(n) => write!(f, "{n}"),
            TokenKind::Decimal(s) => write!(f, "{s}"),
            TokenKind::String(s) => write!(f, "\"{s}\""),
            TokenKind::Char(c) => write!(f, "'{c}'"),
            TokenKind::Identifier(name) | TokenKind::TypeName(name) => write!(f, "{name}"),
            TokenKind::Comment(text) => write!(f, "#{text}"),
            TokenKind::Def => write!(f, "def"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Elif => write!(f, "elif"),
            TokenKind::Else => write!(f, "else"),
            TokenKind::While => write!(f, "while"),
            TokenKind::For => write!(f, "for"),
            TokenKind::In => write!(f, "in"),
            TokenKind::To => write!(f, "to"),
            TokenKind::Downto => write!(f, "downto"),
            TokenKind::Break => write!(f, "break"),
            TokenKind::Continue => write!(f, "continue"),
            TokenKind::Return => write!(f, "return"),
            TokenKind::Pass => write!(f, "pass"),
            TokenKind::And => write!(f, "and"),
            TokenKind::Or => write!(f, "or"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::Data => write!(f, "data"),
            TokenKind::End => write!(f, "end"),
            TokenKind::Include => write!(f, "include"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Ampersand => write!(f, "&"),
            TokenKind::Pipe => write!(f, "|"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::Tilde => write!(f, "~"),
            TokenKind::ShiftLeft => write!(f, "<<"),
            TokenKind::ShiftRight => write!(f, ">>"),
            TokenKind::EqualEqual => write!(f, "=="),
            TokenKind::NotEqual => write!(f, "!="),
            TokenKind::Less => write!(f, "<"),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::LessEqual => write!(f, "<="),
            TokenKind::GreaterEqual => write!(f, ">="),
            TokenKind::Equal => write!(f, "="),
            TokenKind::PlusEqual => write!(f, "+="),
            TokenKind::MinusEqual => write!(f, "-="),
            TokenKind::StarEqual => write!(f, "*="),
            TokenKind::SlashEqual => write!(f, "/="),
            TokenKind::PercentEqual => write!(f, "%="),
            TokenKind::AmpersandEqual => write!(f, "&="),
            TokenKind::PipeEqual => write!(f, "|="),
            TokenKind::CaretEqual => write!(f, "^="),
            TokenKind::ShiftLeftEqual => write!(f, "<<="),
            TokenKind::ShiftRightEqual => write!(f, ">>="),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Arrow => write!(f, "->"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Indent => write!(f, "indent"),
            TokenKind::Dedent => write!(f, "dedent"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A token with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_resolve() {
        assert_eq!(TokenKind::from_word("def"), Some(TokenKind::Def));
        assert_eq!(TokenKind::from_word("downto"), Some(TokenKind::Downto));
        assert_eq!(TokenKind::from_word("include"), Some(TokenKind::Include));
        assert_eq!(TokenKind::from_word("true"), Some(TokenKind::True));
    }

    #[test]
    fn type_names_resolve_to_type_name_token() {
        let kind = TokenKind::from_word("sword");
        assert_eq!(kind, Some(TokenKind::TypeName("sword".into())));
        assert!(kind.is_some_and(|k| k.is_type_name()));
    }

    #[test]
    fn ordinary_words_are_not_keywords() {
        assert_eq!(TokenKind::from_word("main"), None);
        assert_eq!(TokenKind::from_word("Define"), None);
        assert_eq!(TokenKind::from_word("BYTE"), None);
    }

    #[test]
    fn literal_predicate() {
        assert!(TokenKind::Integer(42).is_literal());
        assert!(TokenKind::Decimal("1.5".into()).is_literal());
        assert!(TokenKind::True.is_literal());
        assert!(!TokenKind::Identifier("x".into()).is_literal());
        assert!(!TokenKind::Newline.is_literal());
    }

    #[test]
    fn comparison_predicate() {
        assert!(TokenKind::EqualEqual.is_comparison());
        assert!(TokenKind::LessEqual.is_comparison());
        assert!(!TokenKind::Equal.is_comparison());
        assert!(!TokenKind::ShiftLeft.is_comparison());
    }

    #[test]
    fn assignment_predicate_covers_compound_forms() {
        assert!(TokenKind::Equal.is_assignment());
        assert!(TokenKind::PlusEqual.is_assignment());
        assert!(TokenKind::ShiftRightEqual.is_assignment());
        assert!(!TokenKind::EqualEqual.is_assignment());
    }

    #[test]
    fn display_round_trips_operators() {
        assert_eq!(TokenKind::ShiftLeftEqual.to_string(), "<<=");
        assert_eq!(TokenKind::Arrow.to_string(), "->");
        assert_eq!(TokenKind::NotEqual.to_string(), "!=");
        assert_eq!(TokenKind::Eof.to_string(), "end of file");
    }

    #[test]
    fn as_name_extracts_identifier_text() {
        assert_eq!(
            TokenKind::Identifier("score".into()).as_name(),
            Some("score")
        );
        assert_eq!(TokenKind::TypeName("byte".into()).as_name(), Some("byte"));
        assert_eq!(TokenKind::Plus.as_name(), None);
    }
}
