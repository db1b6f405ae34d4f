// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Statement and block parsing.
//!
//! Blocks are `:` followed by a mandatory `Indent`, statements, and a
//! terminating `Dedent`. A missing `Indent` is reported and an empty block
//! substituted. Inside a block, a failed statement resynchronizes at the
//! next line so the rest of the block still parses.

use crate::ast::{
    AssignOp, AssignTarget, Block, ConstDecl, ElifBranch, Expression, ExpressionKind,
    ForStatement, IfStatement, Statement, StatementKind, VarDecl, WhileStatement,
};
use crate::source_analysis::diagnostic::DiagnosticCode;
use crate::source_analysis::span::Span;
use crate::source_analysis::token::TokenKind;

use super::{Parser, has_valid_casing, is_constant_name};

impl Parser {
    /// Parses `:` + newline + an indented statement sequence.
    ///
    /// `context` names the construct for diagnostics ("function body",
    /// "'if' body", ...).
    pub(super) fn parse_block(&mut self, context: &str) -> Block {
        let start = self.current_span();
        self.expect(
            &TokenKind::Colon,
            DiagnosticCode::UnexpectedToken,
            format!("expected ':' before {context}"),
        );
        self.expect(
            &TokenKind::Newline,
            DiagnosticCode::ExpectedNewline,
            format!("expected a newline after ':' in {context}"),
        );

        if !self.match_token(&TokenKind::Indent) {
            self.error(
                DiagnosticCode::ExpectedIndentedBlock,
                format!("expected an indented {context}"),
                self.current_span(),
            );
            return Block {
                statements: Vec::new(),
                span: Span::point(start.start()),
            };
        }

        let mut statements = Vec::new();
        while !matches!(self.current_kind(), TokenKind::Dedent | TokenKind::Eof) {
            if self.check(&TokenKind::Newline) {
                self.advance();
                continue;
            }
            let before = self.position;
            statements.push(self.parse_statement());
            if self.position == before {
                // The statement consumed nothing; force progress.
                self.advance();
            }
        }
        self.match_token(&TokenKind::Dedent);

        let span = statements
            .iter()
            .fold(start, |acc, s: &Statement| acc.merge(s.span));
        Block { statements, span }
    }

    pub(super) fn parse_statement(&mut self) -> Statement {
        let start = self.current_span();
        match self.current_kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => self.parse_simple_keyword(StatementKind::Break),
            TokenKind::Continue => self.parse_simple_keyword(StatementKind::Continue),
            TokenKind::Pass => self.parse_simple_keyword(StatementKind::Pass),
            TokenKind::Identifier(_) if matches!(self.peek_kind(), TokenKind::Colon) => {
                self.parse_local_decl()
            }
            _ => self.parse_expression_or_assignment(start),
        }
    }

    fn parse_simple_keyword(&mut self, kind: StatementKind) -> Statement {
        let span = self.advance().span;
        self.end_of_statement();
        Statement::new(kind, span)
    }

    fn parse_return(&mut self) -> Statement {
        let start = self.advance().span; // 'return'
        let value = if matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof
        ) {
            None
        } else {
            Some(self.parse_expression())
        };
        let span = value.as_ref().map_or(start, |v| start.merge(v.span));
        self.end_of_statement();
        Statement::new(StatementKind::Return(value), span)
    }

    fn parse_if(&mut self) -> Statement {
        let start = self.advance().span; // 'if'
        let condition = self.parse_expression();
        let then_block = self.parse_block("'if' body");

        let mut elif_branches = Vec::new();
        while self.check(&TokenKind::Elif) {
            let elif_start = self.advance().span;
            let condition = self.parse_expression();
            let block = self.parse_block("'elif' body");
            let span = elif_start.merge(block.span);
            elif_branches.push(ElifBranch {
                condition,
                block,
                span,
            });
        }

        let else_block = if self.check(&TokenKind::Else) {
            self.advance();
            Some(self.parse_block("'else' body"))
        } else {
            None
        };

        let end = else_block
            .as_ref()
            .map(|b| b.span)
            .or_else(|| elif_branches.last().map(|b| b.span))
            .unwrap_or(then_block.span);
        Statement::new(
            StatementKind::If(IfStatement {
                condition,
                then_block,
                elif_branches,
                else_block,
            }),
            start.merge(end),
        )
    }

    fn parse_while(&mut self) -> Statement {
        let start = self.advance().span; // 'while'
        let condition = self.parse_expression();
        let body = self.parse_block("'while' body");
        let span = start.merge(body.span);
        Statement::new(StatementKind::While(WhileStatement { condition, body }), span)
    }

    /// Parses `for v in start to end:` / `for v in start downto end:`.
    fn parse_for(&mut self) -> Statement {
        let start = self.advance().span; // 'for'
        let variable = self.parse_identifier("expected loop variable after 'for'");
        self.expect(
            &TokenKind::In,
            DiagnosticCode::UnexpectedToken,
            "expected 'in' after the loop variable",
        );
        let from = self.parse_expression();
        let descending = match self.current_kind() {
            TokenKind::To => {
                self.advance();
                false
            }
            TokenKind::Downto => {
                self.advance();
                true
            }
            _ => {
                self.error(
                    DiagnosticCode::UnexpectedToken,
                    "expected 'to' or 'downto' in for loop",
                    self.current_span(),
                );
                false
            }
        };
        let to = self.parse_expression();
        let body = self.parse_block("'for' body");
        let span = start.merge(body.span);
        Statement::new(
            StatementKind::For(ForStatement {
                variable,
                start: from,
                end: to,
                descending,
                body,
            }),
            span,
        )
    }

    /// Parses `name: type = expr` inside a function body. The same casing
    /// convention as at top level decides constant vs variable.
    fn parse_local_decl(&mut self) -> Statement {
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
        self.advance(); // ':'
        let ty = self.parse_type();
        let initializer = if self.match_token(&TokenKind::Equal) {
            Some(self.parse_expression())
        } else {
            None
        };
        let span = name.span.merge(self.previous_span());
        self.end_of_statement();

        if is_constant_name(&name.name) {
            let value = initializer.unwrap_or_else(|| {
                Expression::error(span)
            });
            Statement::new(
                StatementKind::ConstDecl(ConstDecl {
                    name,
                    ty,
                    value,
                    span,
                }),
                span,
            )
        } else {
            Statement::new(
                StatementKind::VarDecl(VarDecl {
                    name,
                    ty,
                    initializer,
                    span,
                }),
                span,
            )
        }
    }

    /// Parses an expression statement, converting it into an assignment when
    /// an assignment operator follows a valid target.
    fn parse_expression_or_assignment(&mut self, start: Span) -> Statement {
        let expr = self.parse_expression();

        if self.current_kind().is_assignment() {
            let op = Self::assign_op(self.current_kind());
            self.advance();
            let value = self.parse_expression();
            let span = start.merge(value.span);

            let target = match expr.kind {
                ExpressionKind::Identifier(name) => {
                    Some(AssignTarget::Variable(crate::ast::Identifier::new(
                        name, expr.span,
                    )))
                }
                ExpressionKind::Index { name, index } => Some(AssignTarget::Element {
                    name,
                    index: *index,
                    span: expr.span,
                }),
                _ => {
                    self.error(
                        DiagnosticCode::UnexpectedToken,
                        "invalid assignment target",
                        expr.span,
                    );
                    None
                }
            };
            self.end_of_statement();
            return match target {
                Some(target) => {
                    Statement::new(StatementKind::Assignment { target, op, value }, span)
                }
                None => Statement::new(StatementKind::Error, span),
            };
        }

        if matches!(expr.kind, ExpressionKind::Error) {
            // Nothing recognizable; skip the line.
            self.recover_to_statement_boundary();
            return Statement::new(StatementKind::Error, expr.span);
        }

        let span = expr.span;
        self.end_of_statement();
        Statement::new(StatementKind::Expression(expr), span)
    }

    fn assign_op(kind: &TokenKind) -> AssignOp {
        match kind {
            TokenKind::PlusEqual => AssignOp::Add,
            TokenKind::MinusEqual => AssignOp::Sub,
            TokenKind::StarEqual => AssignOp::Mul,
            TokenKind::SlashEqual => AssignOp::Div,
            TokenKind::PercentEqual => AssignOp::Mod,
            TokenKind::AmpersandEqual => AssignOp::BitAnd,
            TokenKind::PipeEqual => AssignOp::BitOr,
            TokenKind::CaretEqual => AssignOp::BitXor,
            TokenKind::ShiftLeftEqual => AssignOp::Shl,
            TokenKind::ShiftRightEqual => AssignOp::Shr,
            _ => AssignOp::Assign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse_source;
    use crate::ast::{AssignOp, AssignTarget, StatementKind, TopLevelItem};
    use crate::source_analysis::diagnostic::DiagnosticCode;
    use crate::types::Type;

    fn body_of(source: &str) -> Vec<StatementKind> {
        let (program, diagnostics) = parse_source(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let TopLevelItem::Function(f) = &program.items[0] else {
            panic!("expected function");
        };
        f.body.statements.iter().map(|s| s.kind.clone()).collect()
    }

    #[test]
    fn local_declaration_and_assignment() {
        let body = body_of("def f():\n    x: byte = 1\n    x = 2\n");
        assert!(matches!(&body[0], StatementKind::VarDecl(v) if v.ty == Some(Type::Byte)));
        assert!(matches!(
            &body[1],
            StatementKind::Assignment {
                op: AssignOp::Assign,
                ..
            }
        ));
    }

    #[test]
    fn compound_assignment() {
        let body = body_of("def f():\n    x: byte = 1\n    x += 2\n    x <<= 1\n");
        assert!(matches!(
            &body[1],
            StatementKind::Assignment {
                op: AssignOp::Add,
                ..
            }
        ));
        assert!(matches!(
            &body[2],
            StatementKind::Assignment {
                op: AssignOp::Shl,
                ..
            }
        ));
    }

    #[test]
    fn array_element_assignment() {
        let body = body_of("def f():\n    tiles[2] = 7\n");
        let StatementKind::Assignment { target, .. } = &body[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(target, AssignTarget::Element { name, .. } if name.name == "tiles"));
    }

    #[test]
    fn if_elif_else_chain() {
        let body = body_of(
            "def f():\n    if a:\n        pass\n    elif b:\n        pass\n    elif c:\n        pass\n    else:\n        pass\n",
        );
        let StatementKind::If(stmt) = &body[0] else {
            panic!("expected if");
        };
        assert_eq!(stmt.elif_branches.len(), 2);
        assert!(stmt.else_block.is_some());
    }

    #[test]
    fn while_loop() {
        let body = body_of("def f():\n    while x < 10:\n        x += 1\n");
        assert!(matches!(&body[0], StatementKind::While(_)));
    }

    #[test]
    fn for_loop_ascending_and_descending() {
        let body = body_of(
            "def f():\n    for i in 0 to 9:\n        pass\n    for j in 9 downto 0:\n        pass\n",
        );
        let StatementKind::For(up) = &body[0] else {
            panic!("expected for");
        };
        let StatementKind::For(down) = &body[1] else {
            panic!("expected for");
        };
        assert!(!up.descending);
        assert!(down.descending);
        assert_eq!(up.variable.name, "i");
    }

    #[test]
    fn return_with_and_without_value() {
        let body = body_of("def f() -> byte:\n    if x:\n        return 1\n    return\n");
        assert!(matches!(&body[1], StatementKind::Return(None)));
    }

    #[test]
    fn break_continue_pass() {
        let body = body_of(
            "def f():\n    while true:\n        break\n        continue\n    pass\n",
        );
        let StatementKind::While(w) = &body[0] else {
            panic!("expected while");
        };
        assert!(matches!(w.body.statements[0].kind, StatementKind::Break));
        assert!(matches!(w.body.statements[1].kind, StatementKind::Continue));
        assert!(matches!(body[1], StatementKind::Pass));
    }

    #[test]
    fn bad_statement_recovers_within_block() {
        let (program, diagnostics) =
            parse_source("def f():\n    x: byte = 1\n    + +\n    y: byte = 2\n");
        assert!(!diagnostics.is_empty());
        let TopLevelItem::Function(f) = &program.items[0] else {
            panic!("expected function");
        };
        // First and last statements survive the bad middle line.
        assert!(matches!(f.body.statements.first().map(|s| &s.kind), Some(StatementKind::VarDecl(_))));
        assert!(matches!(f.body.statements.last().map(|s| &s.kind), Some(StatementKind::VarDecl(_))));
    }

    #[test]
    fn invalid_assignment_target_is_reported() {
        let (_, diagnostics) = parse_source("def f():\n    1 + 2 = 3\n");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::UnexpectedToken)
        );
    }
}
