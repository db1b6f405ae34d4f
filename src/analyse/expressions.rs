// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Expression type inference.
//!
//! Every expression gets a type, recorded in the analysis output keyed by
//! span. Inference never fails: unresolved names and broken subtrees
//! degrade to `byte` so that enclosing expressions still get a usable type.

use crate::ast::{BinaryOp, Expression, ExpressionKind, UnaryOp};
use crate::source_analysis::DiagnosticCode;
use crate::types::Type;

use super::Analyzer;

impl Analyzer {
    /// Infers the type of `expr`, recording it for the language service.
    pub(crate) fn infer_expression(&mut self, expr: &Expression) -> Type {
        let ty = match &expr.kind {
            ExpressionKind::Integer(value) => Type::smallest_for(*value),
            ExpressionKind::Decimal(_) => Type::Float,
            ExpressionKind::String(_) => Type::String,
            ExpressionKind::Char(_) => Type::Byte,
            ExpressionKind::Bool(_) => Type::Bool,
            ExpressionKind::Identifier(name) => match self.scopes.lookup(name) {
                Some(symbol) => symbol.ty.clone(),
                None => {
                    self.error(
                        DiagnosticCode::UndefinedVariable,
                        format!("'{name}' is not defined"),
                        expr.span,
                    );
                    Type::Byte
                }
            },
            ExpressionKind::Binary { op, lhs, rhs } => self.infer_binary(*op, lhs, rhs),
            ExpressionKind::Unary { op, operand } => {
                let operand_ty = self.infer_expression(operand);
                match op {
                    UnaryOp::Not => Type::Bool,
                    UnaryOp::BitNot => operand_ty,
                    UnaryOp::Negate => match operand_ty {
                        Type::Byte => Type::SByte,
                        Type::Word => Type::SWord,
                        other => other,
                    },
                }
            }
            ExpressionKind::Call { callee, arguments } => self.infer_call(callee, arguments),
            ExpressionKind::Index { name, index } => {
                let index_ty = self.infer_expression(index);
                if !index_ty.is_integer() {
                    self.warning(
                        DiagnosticCode::PrecisionLoss,
                        format!("array index has type {index_ty}, expected an integer"),
                        index.span,
                    );
                }
                match self.scopes.lookup(&name.name).cloned() {
                    Some(symbol) => match symbol.ty.element_type() {
                        Some(element) => element.clone(),
                        None => {
                            self.error(
                                DiagnosticCode::NotAnArray,
                                format!(
                                    "'{}' has type {} and cannot be indexed",
                                    name.name, symbol.ty
                                ),
                                name.span,
                            );
                            Type::Byte
                        }
                    },
                    None => {
                        self.error(
                            DiagnosticCode::UndefinedVariable,
                            format!("'{}' is not defined", name.name),
                            name.span,
                        );
                        Type::Byte
                    }
                }
            }
            ExpressionKind::Cast { target, operand } => {
                let operand_ty = self.infer_expression(operand);
                self.check_cast(operand, &operand_ty, target);
                target.clone()
            }
            ExpressionKind::ArrayLiteral(elements) => {
                let mut element_ty: Option<Type> = None;
                for element in elements {
                    let ty = self.infer_expression(element);
                    element_ty = Some(match element_ty {
                        Some(current) => current.promote(&ty).unwrap_or(current),
                        None => ty,
                    });
                }
                Type::Array {
                    element: Box::new(element_ty.unwrap_or(Type::Byte)),
                    size: u16::try_from(elements.len()).ok(),
                }
            }
            ExpressionKind::Grouped(inner) => self.infer_expression(inner),
            ExpressionKind::Error => Type::Byte,
        };
        self.expression_types.insert(expr.span, ty.clone());
        ty
    }

    fn infer_binary(&mut self, op: BinaryOp, lhs: &Expression, rhs: &Expression) -> Type {
        let mut lhs_ty = self.infer_expression(lhs);
        let mut rhs_ty = self.infer_expression(rhs);

        // A decimal literal next to a fixed-point operand stays fixed-point
        // instead of widening the whole expression to float.
        if lhs_ty == Type::Float && rhs_ty == Type::Fixed && is_decimal_literal(lhs) {
            lhs_ty = Type::Fixed;
            self.expression_types.insert(lhs.span, Type::Fixed);
        }
        if rhs_ty == Type::Float && lhs_ty == Type::Fixed && is_decimal_literal(rhs) {
            rhs_ty = Type::Fixed;
            self.expression_types.insert(rhs.span, Type::Fixed);
        }

        if lhs_ty.is_integer()
            && rhs_ty.is_integer()
            && lhs_ty.is_signed() != rhs_ty.is_signed()
            && integer_literal_value(lhs).is_none()
            && integer_literal_value(rhs).is_none()
        {
            self.warning(
                DiagnosticCode::SignednessMix,
                format!("mixing {lhs_ty} and {rhs_ty} in one expression"),
                lhs.span.merge(rhs.span),
            );
        }

        if op.yields_bool() {
            return Type::Bool;
        }
        lhs_ty.promote(&rhs_ty).unwrap_or(Type::Byte)
    }

    fn infer_call(
        &mut self,
        callee: &crate::ast::Identifier,
        arguments: &[Expression],
    ) -> Type {
        for argument in arguments {
            self.infer_expression(argument);
        }

        // A type name in call position is a cast that lost its single
        // argument somewhere; the parser only builds Call for other counts.
        if let Some(target) = Type::from_name(&callee.name) {
            self.error(
                DiagnosticCode::WrongArgumentCount,
                format!(
                    "cast to {} takes exactly 1 argument, found {}",
                    target,
                    arguments.len()
                ),
                callee.span,
            );
            return target;
        }

        let Some(info) = self.function_info(&callee.name) else {
            self.error(
                DiagnosticCode::UndefinedFunction,
                format!("function '{}' is not defined", callee.name),
                callee.span,
            );
            return Type::Byte;
        };
        let expected = info.parameters.len();
        let return_type = info.return_type.clone();
        if arguments.len() != expected {
            self.error(
                DiagnosticCode::WrongArgumentCount,
                format!(
                    "'{}' takes {} argument{}, found {}",
                    callee.name,
                    expected,
                    if expected == 1 { "" } else { "s" },
                    arguments.len()
                ),
                callee.span,
            );
        }
        return_type
    }

    /// Warnings for a value flowing into a typed slot: declarations,
    /// assignments, and return values.
    pub(crate) fn check_initializer(
        &mut self,
        value: &Expression,
        target_ty: &Type,
        value_ty: &Type,
    ) {
        if let Some(literal) = integer_literal_value(value) {
            self.check_literal_fits(literal, target_ty, value.span);
            return;
        }
        if value_ty.is_numeric()
            && target_ty.is_integer()
            && matches!(value_ty, Type::Fixed | Type::Float)
        {
            self.warning(
                DiagnosticCode::PrecisionLoss,
                format!("implicit conversion from {value_ty} to {target_ty} loses precision"),
                value.span,
            );
        }
    }

    fn check_cast(&mut self, operand: &Expression, operand_ty: &Type, target: &Type) {
        if let Some(literal) = integer_literal_value(operand) {
            self.check_literal_fits(literal, target, operand.span);
            return;
        }
        let narrowing = matches!(
            (operand_ty, target),
            (Type::Fixed | Type::Float, t) if t.is_integer()
        ) || (*operand_ty == Type::Float && *target == Type::Fixed);
        if narrowing {
            self.warning(
                DiagnosticCode::PrecisionLoss,
                format!("cast from {operand_ty} to {target} loses precision"),
                operand.span,
            );
        } else if operand_ty.is_integer()
            && target.is_integer()
            && operand_ty.size() > target.size()
        {
            self.warning(
                DiagnosticCode::LiteralTruncation,
                format!("cast from {operand_ty} to {target} may truncate"),
                operand.span,
            );
        }
    }

    fn check_literal_fits(
        &mut self,
        value: i32,
        target: &Type,
        span: crate::source_analysis::Span,
    ) {
        let Some((min, max)) = integer_range(target) else {
            return;
        };
        if value < 0 && min == 0 {
            self.warning(
                DiagnosticCode::NegativeToUnsigned,
                format!("negative value {value} wraps in unsigned type {target}"),
                span,
            );
        } else if value < min || value > max {
            self.warning(
                DiagnosticCode::LiteralTruncation,
                format!("value {value} does not fit in {target}"),
                span,
            );
        }
    }
}

/// The inclusive value range of an integer type.
fn integer_range(ty: &Type) -> Option<(i32, i32)> {
    match ty {
        Type::Byte => Some((0, 255)),
        Type::SByte => Some((-128, 127)),
        Type::Word => Some((0, 65535)),
        Type::SWord => Some((-32768, 32767)),
        _ => None,
    }
}

/// The value of a constant integer literal, seeing through grouping and a
/// leading minus.
fn integer_literal_value(expr: &Expression) -> Option<i32> {
    match &expr.kind {
        ExpressionKind::Integer(value) => Some(i32::from(*value)),
        ExpressionKind::Grouped(inner) => integer_literal_value(inner),
        ExpressionKind::Unary {
            op: UnaryOp::Negate,
            operand,
        } => integer_literal_value(operand).map(|v| -v),
        _ => None,
    }
}

fn is_decimal_literal(expr: &Expression) -> bool {
    match &expr.kind {
        ExpressionKind::Decimal(_) => true,
        ExpressionKind::Grouped(inner) => is_decimal_literal(inner),
        ExpressionKind::Unary {
            op: UnaryOp::Negate,
            operand,
        } => is_decimal_literal(operand),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{analyze_source, codes};
    use crate::ast::{ExpressionKind, StatementKind, TopLevelItem};
    use crate::source_analysis::{DiagnosticCode, parse, tokenize};
    use crate::types::Type;

    /// Analyzes `main` and returns the inferred type of the expression in
    /// its last statement.
    fn last_expression_type(body: &str) -> Type {
        let source = format!("def main():\n{body}");
        let (tokens, _) = tokenize(&source);
        let (program, parse_diagnostics) = parse(tokens);
        assert!(parse_diagnostics.is_empty(), "{parse_diagnostics:?}");
        let analysis = super::super::analyze(&program);
        let TopLevelItem::Function(f) = &program.items[0] else {
            panic!("expected function");
        };
        let expr = match &f.body.statements.last().map(|s| &s.kind) {
            Some(StatementKind::Expression(e)) => e,
            Some(StatementKind::Assignment { value, .. }) => value,
            Some(StatementKind::VarDecl(v)) => v.initializer.as_ref().expect("initializer"),
            other => panic!("unexpected statement {other:?}"),
        };
        analysis
            .type_of(expr.span)
            .cloned()
            .expect("expression was not typed")
    }

    #[test]
    fn literals_infer_their_smallest_type() {
        assert_eq!(last_expression_type("    200\n"), Type::Byte);
        assert_eq!(last_expression_type("    1000\n"), Type::Word);
        assert_eq!(last_expression_type("    'A'\n"), Type::Byte);
        assert_eq!(last_expression_type("    3.5\n"), Type::Float);
        assert_eq!(last_expression_type("    true\n"), Type::Bool);
    }

    #[test]
    fn arithmetic_promotes_operands() {
        assert_eq!(
            last_expression_type("    x: byte = 1\n    y: word = 2\n    x + y\n"),
            Type::Word
        );
    }

    #[test]
    fn comparisons_yield_bool() {
        assert_eq!(
            last_expression_type("    x: byte = 1\n    x < 2\n"),
            Type::Bool
        );
        assert_eq!(
            last_expression_type("    true and false\n"),
            Type::Bool
        );
    }

    #[test]
    fn negating_unsigned_yields_signed() {
        assert_eq!(last_expression_type("    x: byte = 1\n    -x\n"), Type::SByte);
        assert_eq!(last_expression_type("    x: word = 1\n    -x\n"), Type::SWord);
    }

    #[test]
    fn decimal_literal_adapts_to_fixed_operand() {
        assert_eq!(
            last_expression_type("    x: fixed = rand()\n    x + 0.5\n"),
            Type::Fixed
        );
    }

    #[test]
    fn call_returns_declared_type() {
        assert_eq!(last_expression_type("    peek($d000)\n"), Type::Byte);
        assert_eq!(last_expression_type("    rand()\n"), Type::Fixed);
    }

    #[test]
    fn cast_yields_target_type() {
        assert_eq!(
            last_expression_type("    x: byte = 1\n    word(x)\n"),
            Type::Word
        );
    }

    #[test]
    fn indexing_an_array_yields_the_element_type() {
        assert_eq!(
            last_expression_type("    tiles: word[4] = [1, 2, 3, 4]\n    tiles[0]\n"),
            Type::Word
        );
    }

    #[test]
    fn array_literal_promotes_its_elements() {
        assert_eq!(
            last_expression_type("    [1, 2, 1000]\n"),
            Type::Array {
                element: Box::new(Type::Word),
                size: Some(3)
            }
        );
    }

    #[test]
    fn literal_truncation_warns() {
        let analysis = analyze_source("def main():\n    x: byte = 300\n");
        assert!(codes(&analysis).contains(&DiagnosticCode::LiteralTruncation));
    }

    #[test]
    fn negative_literal_to_unsigned_warns() {
        let analysis = analyze_source("def main():\n    x: byte = -1\n");
        assert!(codes(&analysis).contains(&DiagnosticCode::NegativeToUnsigned));
    }

    #[test]
    fn fitting_literal_does_not_warn() {
        let analysis = analyze_source("def main():\n    x: byte = 255\n");
        assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
    }

    #[test]
    fn signedness_mix_warns() {
        let analysis = analyze_source(
            "def main():\n    \
                 a: byte = 1\n    \
                 b: sbyte = 1\n    \
                 c: word = word(a + b)\n",
        );
        assert!(codes(&analysis).contains(&DiagnosticCode::SignednessMix));
    }

    #[test]
    fn float_to_integer_assignment_warns() {
        let analysis = analyze_source(
            "def main():\n    \
                 f: float = 1.5\n    \
                 b: byte = 1\n    \
                 b = f\n",
        );
        assert!(codes(&analysis).contains(&DiagnosticCode::PrecisionLoss));
    }

    #[test]
    fn narrowing_cast_warns_but_is_not_an_error() {
        let analysis = analyze_source(
            "def main():\n    \
                 f: fixed = rand()\n    \
                 b: byte = byte(f)\n",
        );
        assert!(codes(&analysis).contains(&DiagnosticCode::PrecisionLoss));
        assert!(
            analysis
                .diagnostics
                .iter()
                .all(|d| d.severity == crate::source_analysis::Severity::Warning)
        );
    }

    #[test]
    fn cast_call_with_wrong_arity_reports_count() {
        let source = "def main():\n    x: word = word(1, 2)\n";
        let (tokens, _) = tokenize(source);
        let (program, _) = parse(tokens);
        let analysis = super::super::analyze(&program);
        assert!(
            analysis
                .diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::WrongArgumentCount)
        );
    }

    #[test]
    fn undefined_name_degrades_to_byte() {
        let source = "def main():\n    mystery + 1\n";
        let (tokens, _) = tokenize(source);
        let (program, _) = parse(tokens);
        let analysis = super::super::analyze(&program);
        let TopLevelItem::Function(f) = &program.items[0] else {
            panic!("expected function");
        };
        let StatementKind::Expression(expr) = &f.body.statements[0].kind else {
            panic!("expected expression");
        };
        let ExpressionKind::Binary { lhs, .. } = &expr.kind else {
            panic!("expected binary");
        };
        assert_eq!(analysis.type_of(lhs.span), Some(&Type::Byte));
    }
}
