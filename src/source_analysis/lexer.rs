// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Indentation-sensitive tokenizer for the Adder language.
//!
//! [`tokenize`] is a total function: it never fails, always terminates the
//! token list with exactly one [`TokenKind::Eof`], and reports every lexical
//! problem as a [`Diagnostic`] while synthesizing a best-effort token so the
//! parser can keep going.
//!
//! Block structure is synthesized from leading whitespace: the lexer keeps a
//! stack of indentation widths (starting at `[0]`) and emits `Indent` when a
//! logical line is deeper than the stack top and one `Dedent` per popped
//! level when it is shallower. Blank lines and comment-only lines never
//! affect indentation.

use ecow::EcoString;
use std::iter::Peekable;
use std::str::CharIndices;

use super::diagnostic::{Diagnostic, DiagnosticCode};
use super::span::Span;
use super::token::{Token, TokenKind};

/// Tokenizes Adder source text.
///
/// Returns the token list (always terminated by exactly one `Eof`) and any
/// lexical diagnostics, in source order.
///
/// # Examples
///
/// ```
/// use adder_core::source_analysis::{tokenize, TokenKind};
///
/// let (tokens, diagnostics) = tokenize("x: byte = $FF");
/// assert!(diagnostics.is_empty());
/// assert_eq!(tokens.last().map(|t| t.kind.clone()), Some(TokenKind::Eof));
/// ```
#[must_use]
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source).run()
}

struct Lexer<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    /// Open indentation widths; invariant: non-empty, first element is 0.
    indent_stack: Vec<u32>,
    at_line_start: bool,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            indent_stack: vec![0],
            at_line_start: true,
        }
    }

    fn run(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        loop {
            if self.at_line_start {
                self.handle_line_start();
                self.at_line_start = false;
            }
            let Some(&(_, c)) = self.chars.peek() else {
                break;
            };
            if c == '\n' {
                let start = self.current_position();
                self.chars.next();
                self.push(TokenKind::Newline, Span::new(start, start + 1));
                self.at_line_start = true;
                continue;
            }
            self.lex_token(c);
        }

        // Close any still-open line and blocks at end of input.
        let end = self.current_position();
        if self
            .tokens
            .last()
            .is_some_and(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Dedent))
        {
            self.push(TokenKind::Newline, Span::point(end));
        }
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push(TokenKind::Dedent, Span::point(end));
        }
        self.push(TokenKind::Eof, Span::point(end));
        (self.tokens, self.diagnostics)
    }

    /// Measures indentation at the start of a logical line and emits
    /// `Indent`/`Dedent` tokens. Blank and comment-only lines are consumed
    /// here without touching the indentation stack.
    fn handle_line_start(&mut self) {
        loop {
            let line_start = self.current_position();
            let mut width: u32 = 0;
            let mut saw_tab = false;
            while let Some(&(_, c)) = self.chars.peek() {
                match c {
                    ' ' => {
                        self.chars.next();
                        width += 1;
                    }
                    '\t' => {
                        // Counted as one column so recovery still lines up.
                        let pos = self.current_position();
                        self.chars.next();
                        width += 1;
                        if !saw_tab {
                            self.diagnostics.push(
                                Diagnostic::error(
                                    DiagnosticCode::TabIndentation,
                                    "tab character in indentation",
                                    Span::new(pos, pos + 1),
                                )
                                .with_hint("indent with 4 spaces per level"),
                            );
                            saw_tab = true;
                        }
                    }
                    _ => break,
                }
            }

            match self.chars.peek() {
                None => return,
                Some(&(_, '\r')) => {
                    self.chars.next();
                    continue;
                }
                Some(&(_, '\n')) => {
                    // Blank line: invisible to indentation.
                    self.chars.next();
                    continue;
                }
                Some(&(_, '#')) => {
                    self.lex_comment();
                    if let Some(&(_, '\n')) = self.chars.peek() {
                        self.chars.next();
                    }
                    continue;
                }
                Some(_) => {
                    self.apply_indentation(width, line_start);
                    return;
                }
            }
        }
    }

    fn apply_indentation(&mut self, width: u32, line_start: u32) {
        let here = self.current_position();
        let top = *self.indent_stack.last().unwrap_or(&0);
        if width > top {
            self.indent_stack.push(width);
            self.push(TokenKind::Indent, Span::new(line_start, here));
        } else if width < top {
            while self.indent_stack.last().is_some_and(|&t| t > width) {
                self.indent_stack.pop();
                self.push(TokenKind::Dedent, Span::point(here));
            }
            // Recover to the nearest enclosing level on a mismatch.
            if self.indent_stack.last() != Some(&width) {
                self.diagnostics.push(
                    Diagnostic::error(
                        DiagnosticCode::InconsistentIndentation,
                        "indentation does not match any open block",
                        Span::new(line_start, here),
                    )
                    .with_hint("dedent to a previously used indentation level"),
                );
            }
        }
    }

    fn lex_token(&mut self, c: char) {
        match c {
            '#' => self.lex_comment(),
            '"' => self.lex_string(),
            '\'' => self.lex_char(),
            '$' => self.lex_hex(),
            '0'..='9' => self.lex_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_word(),
            _ => self.lex_operator(c),
        }
    }

    fn lex_comment(&mut self) {
        let start = self.current_position();
        self.chars.next(); // '#'
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
        let span = self.span_from(start);
        let text: EcoString = self.source[(start as usize + 1)..span.end() as usize].into();
        self.push(TokenKind::Comment(text), span);
    }

    fn lex_string(&mut self) {
        let start = self.current_position();
        self.chars.next(); // opening quote
        let mut value = EcoString::new();
        loop {
            match self.chars.peek() {
                None | Some(&(_, '\n')) => {
                    let span = self.span_from(start);
                    self.diagnostics.push(
                        Diagnostic::error(
                            DiagnosticCode::UnterminatedString,
                            "unterminated string literal",
                            span,
                        )
                        .with_hint("add a closing '\"'"),
                    );
                    self.push(TokenKind::String(value), span);
                    return;
                }
                Some(&(_, '"')) => {
                    self.chars.next();
                    let span = self.span_from(start);
                    self.push(TokenKind::String(value), span);
                    return;
                }
                Some(&(_, '\\')) => {
                    self.chars.next();
                    if let Some(resolved) = self.lex_escape() {
                        value.push(resolved);
                    }
                }
                Some(&(_, c)) => {
                    self.chars.next();
                    value.push(c);
                }
            }
        }
    }

    /// Resolves the character after a backslash. Reports invalid escapes and
    /// returns the raw character so the literal still has its content.
    fn lex_escape(&mut self) -> Option<char> {
        let pos = self.current_position();
        let (_, c) = self.chars.next()?;
        let resolved = match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            '0' => '\0',
            other => {
                let span = Span::new(pos - 1, self.current_position());
                self.diagnostics.push(
                    Diagnostic::error(
                        DiagnosticCode::InvalidEscape,
                        format!("invalid escape sequence '\\{other}'"),
                        span,
                    )
                    .with_hint("valid escapes are \\n \\r \\t \\\\ \\\" \\' \\0"),
                );
                other
            }
        };
        Some(resolved)
    }

    fn lex_char(&mut self) {
        let start = self.current_position();
        self.chars.next(); // opening quote
        let value = match self.chars.peek() {
            None | Some(&(_, '\n')) => {
                let span = self.span_from(start);
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::UnterminatedChar,
                    "unterminated character literal",
                    span,
                ));
                self.push(TokenKind::Char('\0'), span);
                return;
            }
            Some(&(_, '\'')) => {
                self.chars.next();
                let span = self.span_from(start);
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::InvalidCharLiteral,
                    "empty character literal",
                    span,
                ));
                self.push(TokenKind::Char('\0'), span);
                return;
            }
            Some(&(_, '\\')) => {
                self.chars.next();
                self.lex_escape().unwrap_or('\0')
            }
            Some(&(_, c)) => {
                self.chars.next();
                c
            }
        };
        match self.chars.peek() {
            Some(&(_, '\'')) => {
                self.chars.next();
            }
            Some(&(_, '\n')) | None => {
                let span = self.span_from(start);
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::UnterminatedChar,
                    "unterminated character literal",
                    span,
                ));
            }
            Some(_) => {
                // More than one character; skip to the closing quote.
                while let Some(&(_, c)) = self.chars.peek() {
                    if c == '\'' || c == '\n' {
                        break;
                    }
                    self.chars.next();
                }
                if let Some(&(_, '\'')) = self.chars.peek() {
                    self.chars.next();
                }
                let span = self.span_from(start);
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::InvalidCharLiteral,
                    "character literal holds more than one character",
                    span,
                ));
            }
        }
        let span = self.span_from(start);
        self.push(TokenKind::Char(value), span);
    }

    fn lex_hex(&mut self) {
        let start = self.current_position();
        self.chars.next(); // '$'
        let digits_start = self.current_position();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_hexdigit() {
                self.chars.next();
            } else {
                break;
            }
        }
        let span = self.span_from(start);
        let digits = &self.source[digits_start as usize..span.end() as usize];
        if digits.is_empty() {
            self.diagnostics.push(Diagnostic::error(
                DiagnosticCode::InvalidNumber,
                "'$' must be followed by hexadecimal digits",
                span,
            ));
            self.push(TokenKind::Integer(0), span);
            return;
        }
        let value = u32::from_str_radix(digits, 16).unwrap_or(u32::MAX);
        self.push_integer(value, span, digits);
    }

    /// Lexes a `%`-prefixed binary literal; called from the operator path
    /// once a binary digit is known to follow.
    fn lex_binary(&mut self, start: u32) {
        let digits_start = self.current_position();
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '0' || c == '1' {
                self.chars.next();
            } else {
                break;
            }
        }
        let span = self.span_from(start);
        let digits = &self.source[digits_start as usize..span.end() as usize];
        let value = u32::from_str_radix(digits, 2).unwrap_or(u32::MAX);
        self.push_integer(value, span, digits);
    }

    fn lex_number(&mut self) {
        let start = self.current_position();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.chars.next();
            } else {
                break;
            }
        }
        // A '.' followed by a digit makes this a decimal literal.
        let mut is_decimal = false;
        if let Some(&(idx, '.')) = self.chars.peek() {
            let after_dot = self.source[idx + 1..].chars().next();
            if after_dot.is_some_and(|c| c.is_ascii_digit()) {
                is_decimal = true;
                self.chars.next(); // '.'
                while let Some(&(_, c)) = self.chars.peek() {
                    if c.is_ascii_digit() {
                        self.chars.next();
                    } else {
                        break;
                    }
                }
            }
        }
        let span = self.span_from(start);
        let text = &self.source[span.as_range()];
        if is_decimal {
            self.push(TokenKind::Decimal(text.into()), span);
        } else {
            let value = text.parse::<u32>().unwrap_or(u32::MAX);
            self.push_integer(value, span, text);
        }
    }

    fn push_integer(&mut self, value: u32, span: Span, text: &str) {
        if value > u32::from(u16::MAX) {
            self.diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::IntegerTooLarge,
                    format!("integer literal '{text}' exceeds 65535"),
                    span,
                )
                .with_hint("the largest integer type is word (16 bits)"),
            );
            self.push(TokenKind::Integer(u16::MAX), span);
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "value checked against u16::MAX above"
            )]
            let value = value as u16;
            self.push(TokenKind::Integer(value), span);
        }
    }

    fn lex_word(&mut self) {
        let start = self.current_position();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.chars.next();
            } else {
                break;
            }
        }
        let span = self.span_from(start);
        let text = &self.source[span.as_range()];
        let kind = TokenKind::from_word(text)
            .unwrap_or_else(|| TokenKind::Identifier(text.into()));
        self.push(kind, span);
    }

    fn lex_operator(&mut self, c: char) {
        let start = self.current_position();
        self.chars.next();
        let kind = match c {
            '+' => self.with_equal(TokenKind::PlusEqual, TokenKind::Plus),
            '-' => {
                if self.eat('>') {
                    TokenKind::Arrow
                } else {
                    self.with_equal(TokenKind::MinusEqual, TokenKind::Minus)
                }
            }
            '*' => self.with_equal(TokenKind::StarEqual, TokenKind::Star),
            '/' => self.with_equal(TokenKind::SlashEqual, TokenKind::Slash),
            '%' => {
                // A binary digit directly after '%' makes a binary literal.
                if matches!(self.chars.peek(), Some(&(_, '0' | '1'))) {
                    self.lex_binary(start);
                    return;
                }
                self.with_equal(TokenKind::PercentEqual, TokenKind::Percent)
            }
            '&' => self.with_equal(TokenKind::AmpersandEqual, TokenKind::Ampersand),
            '|' => self.with_equal(TokenKind::PipeEqual, TokenKind::Pipe),
            '^' => self.with_equal(TokenKind::CaretEqual, TokenKind::Caret),
            '~' => TokenKind::Tilde,
            '<' => {
                if self.eat('<') {
                    self.with_equal(TokenKind::ShiftLeftEqual, TokenKind::ShiftLeft)
                } else {
                    self.with_equal(TokenKind::LessEqual, TokenKind::Less)
                }
            }
            '>' => {
                if self.eat('>') {
                    self.with_equal(TokenKind::ShiftRightEqual, TokenKind::ShiftRight)
                } else {
                    self.with_equal(TokenKind::GreaterEqual, TokenKind::Greater)
                }
            }
            '=' => self.with_equal(TokenKind::EqualEqual, TokenKind::Equal),
            '!' => {
                if self.eat('=') {
                    TokenKind::NotEqual
                } else {
                    let span = self.span_from(start);
                    self.diagnostics.push(
                        Diagnostic::error(
                            DiagnosticCode::InvalidCharacter,
                            "unexpected character '!'",
                            span,
                        )
                        .with_hint("use 'not' for logical negation"),
                    );
                    return;
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ' ' | '\r' => return,
            '\t' => {
                // Tabs between tokens are harmless whitespace.
                return;
            }
            other => {
                let span = self.span_from(start);
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::InvalidCharacter,
                    format!("unexpected character '{other}'"),
                    span,
                ));
                return;
            }
        };
        let span = self.span_from(start);
        self.push(kind, span);
    }

    /// Consumes `'='` if it is next and returns `with`, otherwise `without`.
    fn with_equal(&mut self, with: TokenKind, without: TokenKind) -> TokenKind {
        if self.eat('=') { with } else { without }
    }

    fn eat(&mut self, expected: char) -> bool {
        if let Some(&(_, c)) = self.chars.peek() {
            if c == expected {
                self.chars.next();
                return true;
            }
        }
        false
    }

    /// Byte offset of the next unconsumed character.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn current_position(&mut self) -> u32 {
        match self.chars.peek() {
            Some(&(idx, _)) => idx as u32,
            None => self.source.len() as u32,
        }
    }

    fn span_from(&mut self, start: u32) -> Span {
        let end = self.current_position();
        Span::new(start, end)
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token::new(kind, span));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).0.into_iter().map(|t| t.kind).collect()
    }

    fn codes(source: &str) -> Vec<&'static str> {
        tokenize(source)
            .1
            .into_iter()
            .map(|d| d.code.as_str())
            .collect()
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert!(codes("").is_empty());
    }

    #[test]
    fn whitespace_only_input_is_just_eof() {
        assert_eq!(kinds("   \n  \n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn simple_declaration() {
        assert_eq!(
            kinds("x: byte = 1"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::Colon,
                TokenKind::TypeName("byte".into()),
                TokenKind::Equal,
                TokenKind::Integer(1),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn indentation_round_trip() {
        let toks = kinds("def f():\n    x: byte = 1\n    y: byte = 2\n");
        let indents = toks
            .iter()
            .filter(|k| matches!(k, TokenKind::Indent))
            .count();
        let dedents = toks
            .iter()
            .filter(|k| matches!(k, TokenKind::Dedent))
            .count();
        assert_eq!(indents, 1);
        assert_eq!(dedents, 1);
    }

    #[test]
    fn nested_blocks_dedent_in_order() {
        let toks = kinds("def f():\n    if x:\n        pass\n    pass\n");
        let indents = toks
            .iter()
            .filter(|k| matches!(k, TokenKind::Indent))
            .count();
        let dedents = toks
            .iter()
            .filter(|k| matches!(k, TokenKind::Dedent))
            .count();
        assert_eq!(indents, 2);
        assert_eq!(dedents, 2);
    }

    #[test]
    fn blank_and_comment_lines_do_not_affect_indentation() {
        let toks = kinds("def f():\n    x: byte = 1\n\n    # note\n    y: byte = 2\n");
        let indents = toks
            .iter()
            .filter(|k| matches!(k, TokenKind::Indent))
            .count();
        let dedents = toks
            .iter()
            .filter(|k| matches!(k, TokenKind::Dedent))
            .count();
        assert_eq!(indents, 1);
        assert_eq!(dedents, 1);
    }

    #[test]
    fn inconsistent_dedent_recovers_to_enclosing_level() {
        let (tokens, diagnostics) = tokenize("def f():\n    pass\n  pass\n");
        assert!(diagnostics.iter().any(|d| d.code.as_str() == "E031"));
        // Still exactly one Eof and balanced block structure.
        let eofs = tokens.iter().filter(|t| t.kind.is_eof()).count();
        assert_eq!(eofs, 1);
    }

    #[test]
    fn tab_indentation_is_reported() {
        assert!(codes("def f():\n\tpass\n").contains(&"E030"));
    }

    #[test]
    fn hex_and_binary_literals() {
        assert_eq!(
            kinds("$FF %1010"),
            vec![
                TokenKind::Integer(255),
                TokenKind::Integer(10),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn percent_is_modulo_when_not_followed_by_binary_digit() {
        assert_eq!(
            kinds("a % b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Percent,
                TokenKind::Identifier("b".into()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn decimal_literal_requires_fractional_digit() {
        assert_eq!(
            kinds("3.14"),
            vec![
                TokenKind::Decimal("3.14".into()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        // "3." is an integer followed by a stray dot.
        let (_, diagnostics) = tokenize("3.");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::InvalidCharacter)
        );
    }

    #[test]
    fn integer_overflow_is_clamped_and_reported() {
        let (tokens, diagnostics) = tokenize("70000");
        assert_eq!(tokens[0].kind, TokenKind::Integer(65535));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::IntegerTooLarge);
    }

    #[test]
    fn string_escapes_resolve() {
        let toks = kinds(r#""a\n\t\"b""#);
        assert_eq!(toks[0], TokenKind::String("a\n\t\"b".into()));
    }

    #[test]
    fn unterminated_string_recovers() {
        let (tokens, diagnostics) = tokenize("\"abc\nx = 1");
        assert_eq!(diagnostics[0].code, DiagnosticCode::UnterminatedString);
        assert_eq!(tokens[0].kind, TokenKind::String("abc".into()));
        // Lexing continues on the next line.
        assert!(
            tokens
                .iter()
                .any(|t| t.kind == TokenKind::Identifier("x".into()))
        );
    }

    #[test]
    fn invalid_escape_reported_but_kept() {
        let (tokens, diagnostics) = tokenize(r#""a\qb""#);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidEscape);
        // The span covers just the backslash and the escape character.
        assert_eq!(diagnostics[0].span, Span::new(2, 4));
        assert_eq!(tokens[0].kind, TokenKind::String("aqb".into()));
    }

    #[test]
    fn unterminated_char_literal_span_covers_the_literal() {
        let (_, diagnostics) = tokenize("'a");
        assert_eq!(diagnostics[0].code, DiagnosticCode::UnterminatedChar);
        assert_eq!(diagnostics[0].span, Span::new(0, 2));
    }

    #[test]
    fn bare_bang_is_reported_with_its_span() {
        let (tokens, diagnostics) = tokenize("x ! y");
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidCharacter);
        assert_eq!(diagnostics[0].span, Span::new(2, 3));
        assert!(
            tokens
                .iter()
                .any(|t| t.kind == TokenKind::Identifier("y".into()))
        );
    }

    #[test]
    fn char_literals() {
        assert_eq!(kinds("'A'")[0], TokenKind::Char('A'));
        assert_eq!(kinds(r"'\n'")[0], TokenKind::Char('\n'));
        let (_, diagnostics) = tokenize("''");
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidCharLiteral);
        let (_, diagnostics) = tokenize("'ab'");
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidCharLiteral);
    }

    #[test]
    fn maximal_munch_operators() {
        assert_eq!(
            kinds("a <<= 1"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::ShiftLeftEqual,
                TokenKind::Integer(1),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("x >= y")[1], TokenKind::GreaterEqual);
        assert_eq!(kinds("x >> y")[1], TokenKind::ShiftRight);
        assert_eq!(kinds("f() -> byte")[3], TokenKind::Arrow);
    }

    #[test]
    fn trailing_comment_is_a_token() {
        let toks = kinds("x = 1 # note\n");
        assert!(toks.contains(&TokenKind::Comment(" note".into())));
    }

    #[test]
    fn invalid_character_is_skipped_with_diagnostic() {
        let (tokens, diagnostics) = tokenize("x = @ 1");
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidCharacter);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Integer(1)));
    }

    #[test]
    fn missing_trailing_newline_is_synthesized() {
        let toks = kinds("x = 1");
        assert_eq!(toks[toks.len() - 2], TokenKind::Newline);
        assert_eq!(toks[toks.len() - 1], TokenKind::Eof);
    }

    #[test]
    fn dollar_without_digits_is_reported() {
        let (tokens, diagnostics) = tokenize("$");
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidNumber);
        assert_eq!(tokens[0].kind, TokenKind::Integer(0));
    }

    #[test]
    fn spans_are_half_open_and_ordered() {
        let (tokens, _) = tokenize("ab + cd");
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(3, 4));
        assert_eq!(tokens[2].span, Span::new(5, 7));
    }
}
