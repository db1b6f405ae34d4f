// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Inlay hints: parameter names at call sites and inferred types on
//! annotation-less declarations.

use crate::analyse::Analysis;
use crate::ast::{
    Expression, ExpressionKind, Program, Statement, StatementKind, TopLevelItem,
};
use crate::language_service::{ByteOffset, InlayHint, InlayHintKind};

/// Computes every inlay hint for the file.
///
/// Parameter-name hints are placed before call arguments, except where the
/// argument is an identifier with the same name as the parameter. Type
/// hints are placed after the name of declarations that were written
/// without a type annotation, using the initializer's inferred type.
#[must_use]
pub fn compute_inlay_hints(program: &Program, analysis: &Analysis) -> Vec<InlayHint> {
    let mut hints = Vec::new();

    for item in &program.items {
        match item {
            TopLevelItem::Function(function) => {
                for statement in &function.body.statements {
                    statement_hints(statement, analysis, &mut hints);
                }
            }
            TopLevelItem::Variable(variable) => {
                if variable.ty.is_none() {
                    if let Some(initializer) = &variable.initializer {
                        push_type_hint(variable.name.span, initializer, analysis, &mut hints);
                    }
                }
            }
            TopLevelItem::Constant(_) | TopLevelItem::Data(_) => {}
        }
    }

    super::for_each_expression(program, &mut |expr| {
        if let ExpressionKind::Call { callee, arguments } = &expr.kind {
            call_hints(callee, arguments, analysis, &mut hints);
        }
    });

    hints.sort_by_key(|hint| hint.offset);
    hints
}

fn statement_hints(statement: &Statement, analysis: &Analysis, hints: &mut Vec<InlayHint>) {
    match &statement.kind {
        StatementKind::VarDecl(v) if v.ty.is_none() => {
            if let Some(initializer) = &v.initializer {
                push_type_hint(v.name.span, initializer, analysis, hints);
            }
        }
        StatementKind::If(if_statement) => {
            for nested in &if_statement.then_block.statements {
                statement_hints(nested, analysis, hints);
            }
            for branch in &if_statement.elif_branches {
                for nested in &branch.block.statements {
                    statement_hints(nested, analysis, hints);
                }
            }
            if let Some(else_block) = &if_statement.else_block {
                for nested in &else_block.statements {
                    statement_hints(nested, analysis, hints);
                }
            }
        }
        StatementKind::While(while_statement) => {
            for nested in &while_statement.body.statements {
                statement_hints(nested, analysis, hints);
            }
        }
        StatementKind::For(for_statement) => {
            for nested in &for_statement.body.statements {
                statement_hints(nested, analysis, hints);
            }
        }
        _ => {}
    }
}

fn push_type_hint(
    name_span: crate::source_analysis::Span,
    initializer: &Expression,
    analysis: &Analysis,
    hints: &mut Vec<InlayHint>,
) {
    let Some(ty) = analysis.type_of(initializer.span) else {
        return;
    };
    hints.push(InlayHint {
        offset: ByteOffset::new(name_span.end()),
        label: format!(": {ty}").into(),
        kind: InlayHintKind::Type,
    });
}

fn call_hints(
    callee: &crate::ast::Identifier,
    arguments: &[Expression],
    analysis: &Analysis,
    hints: &mut Vec<InlayHint>,
) {
    let Some(info) = analysis.function(&callee.name) else {
        return;
    };
    for (parameter, argument) in info.parameters.iter().zip(arguments) {
        if argument.is_identifier_named(&parameter.name) {
            continue;
        }
        hints.push(InlayHint {
            offset: ByteOffset::new(argument.span.start()),
            label: format!("{}:", parameter.name).into(),
            kind: InlayHintKind::Parameter,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyse::analyze;
    use crate::source_analysis::{parse, tokenize};

    fn hints_for(source: &str) -> Vec<InlayHint> {
        let (tokens, _) = tokenize(source);
        let (program, _) = parse(tokens);
        let analysis = analyze(&program);
        compute_inlay_hints(&program, &analysis)
    }

    #[test]
    fn parameter_hints_for_a_builtin_call() {
        let hints = hints_for("def main():\n    poke($d020, 0)\n");
        let labels: Vec<_> = hints.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, ["address:", "value:"]);
        assert!(hints.iter().all(|h| h.kind == InlayHintKind::Parameter));
    }

    #[test]
    fn identically_named_argument_gets_no_hint() {
        let source = "def main():\n    \
                          address: word = $d020\n    \
                          poke(address, 1)\n";
        let hints = hints_for(source);
        let labels: Vec<_> = hints.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, ["value:"]);
    }

    #[test]
    fn type_hint_on_unannotated_global() {
        let source = "score = 1000\ndef main():\n    pass\n";
        let hints = hints_for(source);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].label, ": word");
        assert_eq!(hints[0].kind, InlayHintKind::Type);
        // Anchored right after the name.
        assert_eq!(hints[0].offset.get() as usize, "score".len());
    }

    #[test]
    fn parameter_hints_inside_nested_blocks() {
        let source = "def main():\n    \
                          while true:\n        \
                              sprite_y(0, 100)\n";
        let hints = hints_for(source);
        let labels: Vec<_> = hints.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, ["sprite:", "y:"]);
    }

    #[test]
    fn annotated_declarations_get_no_type_hint() {
        let hints = hints_for("def main():\n    x: byte = 1\n");
        assert!(hints.is_empty());
    }

    #[test]
    fn hints_are_ordered_by_offset() {
        let source = "def main():\n    \
                          cursor(1, 2)\n    \
                          poke($d020, 0)\n";
        let hints = hints_for(source);
        for pair in hints.windows(2) {
            assert!(pair[0].offset <= pair[1].offset);
        }
        assert_eq!(hints.len(), 4);
    }
}
