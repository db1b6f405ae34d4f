// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing by precedence climbing.
//!
//! Binding powers, loosest to tightest: `or` < `and` < comparisons < `|` <
//! `^` < `&` < shifts < `+ -` < `* / %` < unary < postfix (call, index).
//! All binary operators are left-associative; unary operators nest through
//! recursion.
//!
//! A call whose callee is a type name and which takes exactly one argument
//! is reinterpreted as an explicit type cast at parse time.

use crate::ast::{BinaryOp, Expression, ExpressionKind, Identifier, UnaryOp};
use crate::source_analysis::diagnostic::DiagnosticCode;
use crate::source_analysis::token::TokenKind;
use crate::types::Type;

use super::Parser;

/// Binding power of a binary operator token, or `None` if the token does not
/// start a binary operator.
fn binary_binding_power(kind: &TokenKind) -> Option<(BinaryOp, u8)> {
    let entry = match kind {
        TokenKind::Or => (BinaryOp::Or, 1),
        TokenKind::And => (BinaryOp::And, 2),
        TokenKind::EqualEqual => (BinaryOp::Eq, 3),
        TokenKind::NotEqual => (BinaryOp::Ne, 3),
        TokenKind::Less => (BinaryOp::Lt, 3),
        TokenKind::Greater => (BinaryOp::Gt, 3),
        TokenKind::LessEqual => (BinaryOp::Le, 3),
        TokenKind::GreaterEqual => (BinaryOp::Ge, 3),
        TokenKind::Pipe => (BinaryOp::BitOr, 4),
        TokenKind::Caret => (BinaryOp::BitXor, 5),
        TokenKind::Ampersand => (BinaryOp::BitAnd, 6),
        TokenKind::ShiftLeft => (BinaryOp::Shl, 7),
        TokenKind::ShiftRight => (BinaryOp::Shr, 7),
        TokenKind::Plus => (BinaryOp::Add, 8),
        TokenKind::Minus => (BinaryOp::Sub, 8),
        TokenKind::Star => (BinaryOp::Mul, 9),
        TokenKind::Slash => (BinaryOp::Div, 9),
        TokenKind::Percent => (BinaryOp::Mod, 9),
        _ => return None,
    };
    Some(entry)
}

impl Parser {
    pub(super) fn parse_expression(&mut self) -> Expression {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_power: u8) -> Expression {
        if !self.enter_nesting() {
            let span = self.current_span();
            self.recover_to_statement_boundary();
            return Expression::error(span);
        }
        let mut lhs = self.parse_unary();
        while let Some((op, power)) = binary_binding_power(self.current_kind()) {
            if power < min_power {
                break;
            }
            self.advance();
            let rhs = self.parse_binary(power + 1);
            let span = lhs.span.merge(rhs.span);
            lhs = Expression::new(
                ExpressionKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }
        self.leave_nesting();
        lhs
    }

    fn parse_unary(&mut self) -> Expression {
        let op = match self.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Negate),
            TokenKind::Not => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix();
        };
        let start = self.advance().span;
        let operand = self.parse_unary();
        let span = start.merge(operand.span);
        Expression::new(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    fn parse_postfix(&mut self) -> Expression {
        match self.current_kind().clone() {
            TokenKind::Identifier(name) => {
                let token = self.advance();
                let ident = Identifier::new(name, token.span);
                match self.current_kind() {
                    TokenKind::LParen => self.parse_call(ident),
                    TokenKind::LBracket => self.parse_index(ident),
                    _ => Expression::new(
                        ExpressionKind::Identifier(ident.name),
                        ident.span,
                    ),
                }
            }
            TokenKind::TypeName(name) => {
                let token = self.advance();
                let ident = Identifier::new(name, token.span);
                if self.check(&TokenKind::LParen) {
                    self.parse_cast_or_call(ident)
                } else {
                    self.error(
                        DiagnosticCode::ExpectedExpression,
                        format!("type name '{}' is not a value", ident.name),
                        ident.span,
                    );
                    Expression::error(ident.span)
                }
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_call(&mut self, callee: Identifier) -> Expression {
        let arguments = self.parse_argument_list();
        let span = callee.span.merge(self.previous_span());
        Expression::new(ExpressionKind::Call { callee, arguments }, span)
    }

    /// `typename(expr)` is a cast; any other argument count falls back to a
    /// call so the analyzer can report it as an ordinary arity problem.
    fn parse_cast_or_call(&mut self, callee: Identifier) -> Expression {
        let mut arguments = self.parse_argument_list();
        let span = callee.span.merge(self.previous_span());
        if arguments.len() == 1 {
            // Known type names are the only way to lex a TypeName token.
            let target = Type::from_name(&callee.name).unwrap_or(Type::Byte);
            let operand = arguments.remove(0);
            Expression::new(
                ExpressionKind::Cast {
                    target,
                    operand: Box::new(operand),
                },
                span,
            )
        } else {
            Expression::new(ExpressionKind::Call { callee, arguments }, span)
        }
    }

    /// Parses `( args )`; the opening parenthesis is the current token.
    fn parse_argument_list(&mut self) -> Vec<Expression> {
        self.advance(); // '('
        let mut arguments = Vec::new();
        if self.match_token(&TokenKind::RParen) {
            return arguments;
        }
        loop {
            arguments.push(self.parse_expression());
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
            // Abandon the argument list at a line boundary.
            while !matches!(
                self.current_kind(),
                TokenKind::RParen | TokenKind::Newline | TokenKind::Eof
            ) {
                self.advance();
            }
            self.match_token(&TokenKind::RParen);
            break;
        }
        arguments
    }

    fn parse_index(&mut self, name: Identifier) -> Expression {
        self.advance(); // '['
        let index = self.parse_expression();
        self.expect(
            &TokenKind::RBracket,
            DiagnosticCode::UnexpectedToken,
            "expected ']' after index expression",
        );
        let span = name.span.merge(self.previous_span());
        Expression::new(
            ExpressionKind::Index {
                name,
                index: Box::new(index),
            },
            span,
        )
    }

    fn parse_primary(&mut self) -> Expression {
        let span = self.current_span();
        let kind = match self.current_kind().clone() {
            TokenKind::Integer(value) => {
                self.advance();
                ExpressionKind::Integer(value)
            }
            TokenKind::Decimal(text) => {
                self.advance();
                ExpressionKind::Decimal(text)
            }
            TokenKind::String(text) => {
                self.advance();
                ExpressionKind::String(text)
            }
            TokenKind::Char(c) => {
                self.advance();
                ExpressionKind::Char(c)
            }
            TokenKind::True => {
                self.advance();
                ExpressionKind::Bool(true)
            }
            TokenKind::False => {
                self.advance();
                ExpressionKind::Bool(false)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression();
                self.expect(
                    &TokenKind::RParen,
                    DiagnosticCode::UnexpectedToken,
                    "expected ')' to close the parenthesized expression",
                );
                let span = span.merge(self.previous_span());
                return Expression::new(ExpressionKind::Grouped(Box::new(inner)), span);
            }
            TokenKind::LBracket => return self.parse_array_literal(),
            other => {
                // Report without consuming; callers resynchronize.
                self.error(
                    DiagnosticCode::ExpectedExpression,
                    format!("expected an expression, found '{other}'"),
                    span,
                );
                return Expression::error(span);
            }
        };
        Expression::new(kind, span)
    }

    fn parse_array_literal(&mut self) -> Expression {
        let start = self.advance().span; // '['
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                elements.push(self.parse_expression());
                if self.match_token(&TokenKind::Comma) {
                    continue;
                }
                break;
            }
        }
        self.expect(
            &TokenKind::RBracket,
            DiagnosticCode::UnexpectedToken,
            "expected ']' to close the array literal",
        );
        let span = start.merge(self.previous_span());
        Expression::new(ExpressionKind::ArrayLiteral(elements), span)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse_source;
    use crate::ast::{
        BinaryOp, Expression, ExpressionKind, StatementKind, TopLevelItem, UnaryOp,
    };
    use crate::source_analysis::diagnostic::DiagnosticCode;
    use crate::types::Type;

    fn first_expression(source: &str) -> Expression {
        let (program, diagnostics) = parse_source(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let TopLevelItem::Function(f) = &program.items[0] else {
            panic!("expected function");
        };
        match &f.body.statements[0].kind {
            StatementKind::Expression(e) => e.clone(),
            StatementKind::Assignment { value, .. } => value.clone(),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = first_expression("def f():\n    x = 1 + 2 * 3\n");
        let ExpressionKind::Binary { op, rhs, .. } = &expr.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(
            &rhs.kind,
            ExpressionKind::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn comparison_binds_looser_than_bitwise_or() {
        let expr = first_expression("def f():\n    x = a | b == c\n");
        // `a | b == c` parses as `(a | b) == c`.
        let ExpressionKind::Binary { op, lhs, .. } = &expr.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Eq);
        assert!(matches!(
            &lhs.kind,
            ExpressionKind::Binary {
                op: BinaryOp::BitOr,
                ..
            }
        ));
    }

    #[test]
    fn logical_operators_are_loosest() {
        let expr = first_expression("def f():\n    x = a == b and c == d or e\n");
        let ExpressionKind::Binary { op, .. } = &expr.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Or);
    }

    #[test]
    fn binary_operators_are_left_associative() {
        let expr = first_expression("def f():\n    x = 1 - 2 - 3\n");
        let ExpressionKind::Binary { op, lhs, .. } = &expr.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Sub);
        assert!(matches!(
            &lhs.kind,
            ExpressionKind::Binary {
                op: BinaryOp::Sub,
                ..
            }
        ));
    }

    #[test]
    fn unary_is_right_associative_and_tighter_than_binary() {
        let expr = first_expression("def f():\n    x = -a * b\n");
        let ExpressionKind::Binary { op, lhs, .. } = &expr.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Mul);
        assert!(matches!(
            &lhs.kind,
            ExpressionKind::Unary {
                op: UnaryOp::Negate,
                ..
            }
        ));

        let expr = first_expression("def f():\n    x = not not a\n");
        let ExpressionKind::Unary { operand, .. } = &expr.kind else {
            panic!("expected unary expression");
        };
        assert!(matches!(&operand.kind, ExpressionKind::Unary { .. }));
    }

    #[test]
    fn call_and_index_postfix() {
        let expr = first_expression("def f():\n    rand_byte(0, 9)\n");
        let ExpressionKind::Call { callee, arguments } = &expr.kind else {
            panic!("expected call");
        };
        assert_eq!(callee.name, "rand_byte");
        assert_eq!(arguments.len(), 2);

        let expr = first_expression("def f():\n    tiles[i + 1]\n");
        assert!(matches!(&expr.kind, ExpressionKind::Index { name, .. } if name.name == "tiles"));
    }

    #[test]
    fn type_name_call_with_one_argument_is_a_cast() {
        let expr = first_expression("def f():\n    x = word(y)\n");
        let ExpressionKind::Cast { target, operand } = &expr.kind else {
            panic!("expected cast, got {:?}", expr.kind);
        };
        assert_eq!(*target, Type::Word);
        assert!(matches!(&operand.kind, ExpressionKind::Identifier(n) if n == "y"));
    }

    #[test]
    fn type_name_call_with_two_arguments_stays_a_call() {
        let (program, _) = parse_source("def f():\n    x = word(a, b)\n");
        let TopLevelItem::Function(f) = &program.items[0] else {
            panic!("expected function");
        };
        let StatementKind::Assignment { value, .. } = &f.body.statements[0].kind else {
            panic!("expected assignment");
        };
        assert!(matches!(&value.kind, ExpressionKind::Call { callee, .. } if callee.name == "word"));
    }

    #[test]
    fn grouping_overrides_precedence() {
        let expr = first_expression("def f():\n    x = (1 + 2) * 3\n");
        let ExpressionKind::Binary { op, lhs, .. } = &expr.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(*op, BinaryOp::Mul);
        assert!(matches!(&lhs.kind, ExpressionKind::Grouped(_)));
    }

    #[test]
    fn array_literal() {
        let expr = first_expression("def f():\n    x = [1, 2, 3]\n");
        let ExpressionKind::ArrayLiteral(elements) = &expr.kind else {
            panic!("expected array literal");
        };
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn literals() {
        assert!(matches!(
            first_expression("def f():\n    x = 'A'\n").kind,
            ExpressionKind::Char('A')
        ));
        assert!(matches!(
            first_expression("def f():\n    x = 3.5\n").kind,
            ExpressionKind::Decimal(_)
        ));
        assert!(matches!(
            first_expression("def f():\n    x = true\n").kind,
            ExpressionKind::Bool(true)
        ));
        assert!(matches!(
            first_expression("def f():\n    x = \"hi\"\n").kind,
            ExpressionKind::String(_)
        ));
    }

    #[test]
    fn missing_operand_substitutes_placeholder() {
        let (program, diagnostics) = {
            use crate::source_analysis::{parse, tokenize};
            let (tokens, _) = tokenize("def f():\n    x = 1 +\n");
            parse(tokens)
        };
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::ExpectedExpression)
        );
        // The assignment is still in the tree.
        let TopLevelItem::Function(f) = &program.items[0] else {
            panic!("expected function");
        };
        assert!(matches!(
            f.body.statements[0].kind,
            StatementKind::Assignment { .. }
        ));
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let mut source = String::from("def f():\n    x = ");
        for _ in 0..200 {
            source.push('(');
        }
        source.push('1');
        for _ in 0..200 {
            source.push(')');
        }
        source.push('\n');
        let (tokens, _) = crate::source_analysis::tokenize(&source);
        let (_, diagnostics) = crate::source_analysis::parse(tokens);
        assert!(!diagnostics.is_empty());
    }
}
