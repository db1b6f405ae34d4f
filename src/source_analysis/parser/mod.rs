// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser for the Adder language.
//!
//! [`parse`] consumes the token stream produced by
//! [`tokenize`](crate::source_analysis::tokenize) and always returns a
//! best-effort [`Program`] plus accumulated diagnostics. Parsing never
//! aborts: every failed production reports one diagnostic and substitutes a
//! placeholder node, and the top-level loop resynchronizes by skipping one
//! token at a time so a single bad line does not hide later declarations.
//!
//! Statements are parsed by recursive descent
//! ([`statements`]/[`declarations`]); expressions use precedence climbing
//! ([`expressions`]); data blocks have their own small grammar
//! ([`data_blocks`]).

mod data_blocks;
mod declarations;
mod expressions;
mod statements;


use ecow::EcoString;

use crate::ast::Program;
use crate::source_analysis::diagnostic::{Diagnostic, DiagnosticCode};
use crate::source_analysis::span::Span;
use crate::source_analysis::token::{Token, TokenKind};

/// Maximum expression nesting depth before the parser gives up on a branch.
///
/// Prevents stack overflow on adversarial input like `((((((...))))))`.
const MAX_NESTING_DEPTH: usize = 64;

/// Parses a token stream into a [`Program`].
///
/// Always returns a tree; syntax errors are reported in the diagnostic list
/// and represented by placeholder nodes in the tree.
///
/// # Examples
///
/// ```
/// use adder_core::source_analysis::{parse, tokenize};
///
/// let (tokens, _) = tokenize("def main():\n    pass\n");
/// let (program, diagnostics) = parse(tokens);
/// assert!(diagnostics.is_empty());
/// assert_eq!(program.items.len(), 1);
/// ```
#[must_use]
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    (program, parser.diagnostics)
}

/// Returns true if the first alphabetic character of `name` is uppercase,
/// which makes the declaration a constant by convention.
#[must_use]
pub fn is_constant_name(name: &str) -> bool {
    name.chars()
        .find(|c| c.is_ascii_alphabetic())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Validates the casing rule: constant-style names must be all uppercase,
/// and a name must contain at least one letter.
#[must_use]
pub fn has_valid_casing(name: &str) -> bool {
    let mut has_letter = false;
    let mut has_upper = false;
    let mut has_lower = false;
    for c in name.chars() {
        if c.is_ascii_alphabetic() {
            has_letter = true;
            if c.is_ascii_uppercase() {
                has_upper = true;
            } else {
                has_lower = true;
            }
        }
    }
    if !has_letter {
        return false;
    }
    if is_constant_name(name) {
        !has_lower
    } else {
        // Variable-style names may mix cases after the first letter.
        let _ = has_upper;
        true
    }
}

pub(crate) struct Parser {
    /// Token stream with comments filtered out; always ends with `Eof`.
    tokens: Vec<Token>,
    position: usize,
    diagnostics: Vec<Diagnostic>,
    nesting_depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Comment(_)))
            .collect();
        if !tokens.last().is_some_and(|t| t.kind.is_eof()) {
            let end = tokens.last().map_or(0, |t| t.span.end());
            tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        }
        Self {
            tokens,
            position: 0,
            diagnostics: Vec::new(),
            nesting_depth: 0,
        }
    }

    fn parse_program(&mut self) -> Program {
        let mut items = Vec::new();
        while !self.is_at_end() {
            match self.current_kind() {
                TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent => {
                    self.advance();
                }
                TokenKind::Def => items.push(self.parse_function_def()),
                TokenKind::Data => items.push(self.parse_data_block()),
                TokenKind::Identifier(_) => items.push(self.parse_top_level_decl()),
                _ => {
                    // Panic-mode resync: report and skip a single token so
                    // later declarations are still discovered.
                    let token = self.current_token().clone();
                    self.error(
                        DiagnosticCode::UnexpectedToken,
                        format!("unexpected token '{}' at top level", token.kind),
                        token.span,
                    );
                    self.advance();
                }
            }
        }
        Program { items }
    }

    // ========================================================================
    // Token management
    // ========================================================================

    fn current_token(&self) -> &Token {
        // The stream is Eof-terminated, so position is always in bounds.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current_token().kind
    }

    fn current_span(&self) -> Span {
        self.current_token().span
    }

    /// The token after the current one (`Eof` at the end).
    fn peek_kind(&self) -> &TokenKind {
        let idx = (self.position + 1).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn previous_span(&self) -> Span {
        if self.position == 0 {
            return self.current_span();
        }
        self.tokens[self.position - 1].span
    }

    fn is_at_end(&self) -> bool {
        self.current_kind().is_eof()
    }

    fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    /// Whether the current token has the same discriminant as `kind`
    /// (payloads are ignored).
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Consumes the current token if it matches `kind`.
    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the expected kind or reports `code` and returns
    /// `None` without consuming anything.
    fn expect(
        &mut self,
        kind: &TokenKind,
        code: DiagnosticCode,
        message: impl Into<EcoString>,
    ) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error(code, message, self.current_span());
            None
        }
    }

    fn error(&mut self, code: DiagnosticCode, message: impl Into<EcoString>, span: Span) {
        self.diagnostics.push(Diagnostic::error(code, message, span));
    }

    fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skips to the next statement boundary (newline, dedent, or EOF) and
    /// consumes the newline.
    fn recover_to_statement_boundary(&mut self) {
        while !matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
        ) {
            self.advance();
        }
        if self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Guards against runaway recursion; returns false (and reports) when
    /// the nesting limit is reached.
    fn enter_nesting(&mut self) -> bool {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            self.error(
                DiagnosticCode::UnexpectedToken,
                "expression is nested too deeply",
                self.current_span(),
            );
            return false;
        }
        self.nesting_depth += 1;
        true
    }

    fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TopLevelItem;
    use crate::source_analysis::tokenize;

    pub(super) fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
        let (tokens, lex_diagnostics) = tokenize(source);
        assert!(
            lex_diagnostics.is_empty(),
            "unexpected lexical diagnostics: {lex_diagnostics:?}"
        );
        parse(tokens)
    }

    #[test]
    fn empty_input_parses_to_empty_program() {
        let (program, diagnostics) = parse_source("");
        assert!(program.items.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn constant_name_predicate() {
        assert!(is_constant_name("MAX"));
        assert!(is_constant_name("_MAX"));
        assert!(!is_constant_name("max"));
        assert!(!is_constant_name("_x1"));
    }

    #[test]
    fn casing_validation() {
        assert!(has_valid_casing("MAX_SIZE"));
        assert!(has_valid_casing("score"));
        assert!(has_valid_casing("playerX"));
        assert!(!has_valid_casing("Max_size"));
        assert!(!has_valid_casing("__"));
    }

    #[test]
    fn unexpected_top_level_token_is_skipped() {
        let (program, diagnostics) = parse_source("+\ndef main():\n    pass\n");
        assert_eq!(program.items.len(), 1);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::UnexpectedToken)
        );
        assert!(matches!(program.items[0], TopLevelItem::Function(_)));
    }

    #[test]
    fn multiple_items_survive_one_bad_line() {
        // A stray statement keyword at file scope is skipped with one
        // diagnostic, and both surrounding functions are still discovered.
        let source = "def first():\n    pass\nbreak\ndef second():\n    pass\n";
        let (program, diagnostics) = parse_source(source);
        assert_eq!(program.items.len(), 2);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::UnexpectedToken)
        );
        assert!(matches!(program.items[1], TopLevelItem::Function(_)));
    }
}
