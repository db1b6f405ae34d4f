// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Declaration parsing: function definitions, top-level variables and
//! constants, and type annotations.
//!
//! Declarations require an explicit type after `:`. A missing annotation is
//! reported (`E147`) but the declaration is still synthesized with a null
//! type so analysis and editor features keep working on the rest of the
//! file.

use crate::ast::{
    ConstDecl, FunctionDef, Identifier, Parameter, TopLevelItem, VarDecl,
};
use crate::source_analysis::diagnostic::DiagnosticCode;
use crate::source_analysis::token::TokenKind;
use crate::types::Type;

use super::{Parser, has_valid_casing, is_constant_name};

impl Parser {
    /// Parses `def name(params) [-> type]:` plus its body.
    pub(super) fn parse_function_def(&mut self) -> TopLevelItem {
        let start = self.current_span();
        self.advance(); // 'def'

        let name = self.parse_identifier("expected function name after 'def'");

        let parameters = if self
            .expect(
                &TokenKind::LParen,
                DiagnosticCode::UnexpectedToken,
                "expected '(' after function name",
            )
            .is_some()
        {
            self.parse_parameter_list()
        } else {
            Vec::new()
        };

        let return_type = if self.match_token(&TokenKind::Arrow) {
            self.parse_type()
        } else {
            None
        };

        let body = self.parse_block("function body");
        let span = start.merge(self.previous_span());

        TopLevelItem::Function(FunctionDef {
            name,
            parameters,
            return_type,
            body,
            span,
        })
    }

    /// Parses a comma-separated parameter list up to the closing `)`.
    fn parse_parameter_list(&mut self) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        if self.match_token(&TokenKind::RParen) {
            return parameters;
        }
        loop {
            let name = self.parse_identifier("expected parameter name");
            self.expect(
                &TokenKind::Colon,
                DiagnosticCode::UnexpectedToken,
                "expected ':' after parameter name",
            );
            let ty = self.parse_type().unwrap_or(Type::Byte);
            let span = name.span.merge(self.previous_span());
            parameters.push(Parameter { name, ty, span });

            if self.match_token(&TokenKind::Comma) {
                continue;
            }
            if self.match_token(&TokenKind::RParen) {
                break;
            }
            self.error(
                DiagnosticCode::UnexpectedToken,
                format!("expected ',' or ')', found '{}'", self.current_kind()),
                self.current_span(),
            );
            // Drop the rest of the list rather than loop on a bad token.
            while !matches!(
                self.current_kind(),
                TokenKind::RParen | TokenKind::Colon | TokenKind::Newline | TokenKind::Eof
            ) {
                self.advance();
            }
            self.match_token(&TokenKind::RParen);
            break;
        }
        parameters
    }

    /// Parses a top-level `name: type = value` declaration. Whether it is a
    /// constant or a variable is decided by the casing convention.
    pub(super) fn parse_top_level_decl(&mut self) -> TopLevelItem {
        let name = self.parse_identifier("expected a name");
        if !has_valid_casing(&name.name) {
            self.error(
                DiagnosticCode::InvalidConstantName,
                format!(
                    "invalid name '{}': constants are all uppercase, variables start lowercase",
                    name.name
                ),
                name.span,
            );
        }

        // `x = 42` — annotation missing entirely. Report once and keep the
        // declaration with a null type.
        let ty = if self.check(&TokenKind::Equal) {
            self.error(
                DiagnosticCode::MissingTypeAnnotation,
                format!("declaration of '{}' is missing a type annotation", name.name),
                name.span,
            );
            None
        } else {
            self.expect(
                &TokenKind::Colon,
                DiagnosticCode::UnexpectedToken,
                "expected ':' and a type after the name",
            );
            self.parse_type()
        };

        let initializer = if self.match_token(&TokenKind::Equal) {
            Some(self.parse_expression())
        } else {
            None
        };

        let span = name.span.merge(self.previous_span());
        self.end_of_statement();

        if is_constant_name(&name.name) {
            let value = initializer.unwrap_or_else(|| {
                self.error(
                    DiagnosticCode::UnexpectedToken,
                    format!("constant '{}' requires a value", name.name),
                    span,
                );
                crate::ast::Expression::error(span)
            });
            TopLevelItem::Constant(ConstDecl {
                name,
                ty,
                value,
                span,
            })
        } else {
            TopLevelItem::Variable(VarDecl {
                name,
                ty,
                initializer,
                span,
            })
        }
    }

    /// Parses a type annotation, including an optional `[size]` array
    /// suffix. Reports `E102` and returns `None` when no type name is
    /// present.
    pub(super) fn parse_type(&mut self) -> Option<Type> {
        let TokenKind::TypeName(name) = self.current_kind() else {
            self.error(
                DiagnosticCode::ExpectedType,
                format!("expected a type name, found '{}'", self.current_kind()),
                self.current_span(),
            );
            return None;
        };
        // All TypeName payloads resolve; the lexer only produces known names.
        let base = Type::from_name(name).unwrap_or(Type::Byte);
        self.advance();

        if self.match_token(&TokenKind::LBracket) {
            let size = if let TokenKind::Integer(n) = *self.current_kind() {
                self.advance();
                Some(n)
            } else {
                None
            };
            self.expect(
                &TokenKind::RBracket,
                DiagnosticCode::UnexpectedToken,
                "expected ']' after array size",
            );
            return Some(Type::Array {
                element: Box::new(base),
                size,
            });
        }
        Some(base)
    }

    /// Parses an identifier or substitutes `__error__` with a diagnostic.
    pub(super) fn parse_identifier(&mut self, message: &str) -> Identifier {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let name = name.clone();
            let token = self.advance();
            Identifier::new(name, token.span)
        } else {
            self.error(
                DiagnosticCode::ExpectedIdentifier,
                message,
                self.current_span(),
            );
            Identifier::new("__error__", self.current_span())
        }
    }

    /// Consumes the newline that terminates a simple statement. Dedent and
    /// EOF also count as boundaries; anything else is reported and skipped.
    pub(super) fn end_of_statement(&mut self) {
        match self.current_kind() {
            TokenKind::Newline => {
                self.advance();
            }
            TokenKind::Dedent | TokenKind::Eof => {}
            _ => {
                let message = format!("expected end of line, found '{}'", self.current_kind());
                self.error(
                    DiagnosticCode::ExpectedNewline,
                    message,
                    self.current_span(),
                );
                self.recover_to_statement_boundary();
            }
        }
    }
}
