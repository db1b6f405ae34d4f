// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor queries.
//!
//! Each provider is a pure function over the parse tree, the source text,
//! and the analysis result. Hosts (an LSP server, a CLI) own caching and
//! document management; the providers only compute answers.

mod completion_provider;
mod definition_provider;
mod diagnostics;
mod document_symbols_provider;
mod inlay_hints_provider;
mod signature_help_provider;

pub use completion_provider::compute_completions;
pub use definition_provider::compute_definition;
pub use diagnostics::compute_diagnostics;
pub use document_symbols_provider::compute_document_symbols;
pub use inlay_hints_provider::compute_inlay_hints;
pub use signature_help_provider::compute_signature_help;

use crate::ast::{
    AssignTarget, Block, Expression, ExpressionKind, FunctionDef, Program, Statement,
    StatementKind, TopLevelItem,
};

/// Calls `f` for every expression in the program, parents before children.
pub(crate) fn for_each_expression<'a>(program: &'a Program, f: &mut dyn FnMut(&'a Expression)) {
    for item in &program.items {
        match item {
            TopLevelItem::Function(function) => visit_block(&function.body, f),
            TopLevelItem::Variable(variable) => {
                if let Some(initializer) = &variable.initializer {
                    visit_expression(initializer, f);
                }
            }
            TopLevelItem::Constant(constant) => visit_expression(&constant.value, f),
            TopLevelItem::Data(_) => {}
        }
    }
}

pub(crate) fn visit_block<'a>(block: &'a Block, f: &mut dyn FnMut(&'a Expression)) {
    for statement in &block.statements {
        visit_statement(statement, f);
    }
}

pub(crate) fn visit_statement<'a>(statement: &'a Statement, f: &mut dyn FnMut(&'a Expression)) {
    match &statement.kind {
        StatementKind::VarDecl(v) => {
            if let Some(initializer) = &v.initializer {
                visit_expression(initializer, f);
            }
        }
        StatementKind::ConstDecl(c) => visit_expression(&c.value, f),
        StatementKind::Assignment { target, value, .. } => {
            if let AssignTarget::Element { index, .. } = target {
                visit_expression(index, f);
            }
            visit_expression(value, f);
        }
        StatementKind::If(if_statement) => {
            visit_expression(&if_statement.condition, f);
            visit_block(&if_statement.then_block, f);
            for branch in &if_statement.elif_branches {
                visit_expression(&branch.condition, f);
                visit_block(&branch.block, f);
            }
            if let Some(else_block) = &if_statement.else_block {
                visit_block(else_block, f);
            }
        }
        StatementKind::While(while_statement) => {
            visit_expression(&while_statement.condition, f);
            visit_block(&while_statement.body, f);
        }
        StatementKind::For(for_statement) => {
            visit_expression(&for_statement.start, f);
            visit_expression(&for_statement.end, f);
            visit_block(&for_statement.body, f);
        }
        StatementKind::Return(Some(value)) => visit_expression(value, f),
        StatementKind::Expression(expr) => visit_expression(expr, f),
        StatementKind::Return(None)
        | StatementKind::Break
        | StatementKind::Continue
        | StatementKind::Pass
        | StatementKind::Error => {}
    }
}

pub(crate) fn visit_expression<'a>(expr: &'a Expression, f: &mut dyn FnMut(&'a Expression)) {
    f(expr);
    match &expr.kind {
        ExpressionKind::Binary { lhs, rhs, .. } => {
            visit_expression(lhs, f);
            visit_expression(rhs, f);
        }
        ExpressionKind::Unary { operand, .. } => visit_expression(operand, f),
        ExpressionKind::Call { arguments, .. } => {
            for argument in arguments {
                visit_expression(argument, f);
            }
        }
        ExpressionKind::Index { index, .. } => visit_expression(index, f),
        ExpressionKind::Cast { operand, .. } => visit_expression(operand, f),
        ExpressionKind::ArrayLiteral(elements) => {
            for element in elements {
                visit_expression(element, f);
            }
        }
        ExpressionKind::Grouped(inner) => visit_expression(inner, f),
        ExpressionKind::Integer(_)
        | ExpressionKind::Decimal(_)
        | ExpressionKind::String(_)
        | ExpressionKind::Char(_)
        | ExpressionKind::Bool(_)
        | ExpressionKind::Identifier(_)
        | ExpressionKind::Error => {}
    }
}

/// The function whose definition span contains `offset`.
pub(crate) fn enclosing_function(program: &Program, offset: u32) -> Option<&FunctionDef> {
    program.items.iter().find_map(|item| match item {
        TopLevelItem::Function(function) if function.span.contains_offset(offset) => {
            Some(function)
        }
        _ => None,
    })
}
