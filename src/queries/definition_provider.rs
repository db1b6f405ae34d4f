// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Go to definition.

use camino::Utf8Path;
use ecow::EcoString;

use crate::analyse::Analysis;
use crate::ast::{ExpressionKind, Program, StatementKind, TopLevelItem};
use crate::language_service::{Location, Position};
use crate::source_analysis::Span;

/// Resolves the symbol under the cursor to its declaration site.
///
/// Built-ins have no declaration in user code and resolve to `None`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "source files over 4GB are not supported"
)]
pub fn compute_definition(
    program: &Program,
    source: &str,
    position: Position,
    analysis: &Analysis,
    file: &Utf8Path,
) -> Option<Location> {
    let offset = position.to_offset(source)? as u32;
    let name = identifier_at(program, offset)?;
    let span = resolve(program, analysis, &name, offset)?;
    Some(Location::new(file.to_path_buf(), span))
}

/// The name of the identifier whose span contains `offset`.
fn identifier_at(program: &Program, offset: u32) -> Option<EcoString> {
    // Declaration names resolve to themselves, so they count as hits too.
    for item in &program.items {
        match item {
            TopLevelItem::Function(function) => {
                if function.name.span.contains_offset(offset) {
                    return Some(function.name.name.clone());
                }
                for parameter in &function.parameters {
                    if parameter.name.span.contains_offset(offset) {
                        return Some(parameter.name.name.clone());
                    }
                }
                for statement in &function.body.statements {
                    if let Some(name) = declaration_name_at(statement, offset) {
                        return Some(name);
                    }
                }
            }
            TopLevelItem::Variable(v) if v.name.span.contains_offset(offset) => {
                return Some(v.name.name.clone());
            }
            TopLevelItem::Constant(c) if c.name.span.contains_offset(offset) => {
                return Some(c.name.name.clone());
            }
            TopLevelItem::Data(d) if d.name.span.contains_offset(offset) => {
                return Some(d.name.name.clone());
            }
            _ => {}
        }
    }

    // Assignment targets are not expressions; check them separately.
    let mut found: Option<EcoString> = None;
    for item in &program.items {
        if let TopLevelItem::Function(function) = item {
            for statement in &function.body.statements {
                if let Some(name) = assignment_target_at(statement, offset) {
                    found = Some(name);
                }
            }
        }
    }
    if found.is_some() {
        return found;
    }

    super::for_each_expression(program, &mut |expr| {
        if found.is_some() || !expr.span.contains_offset(offset) {
            return;
        }
        match &expr.kind {
            ExpressionKind::Identifier(name) => found = Some(name.clone()),
            ExpressionKind::Call { callee, .. } if callee.span.contains_offset(offset) => {
                found = Some(callee.name.clone());
            }
            ExpressionKind::Index { name, .. } if name.span.contains_offset(offset) => {
                found = Some(name.name.clone());
            }
            _ => {}
        }
    });
    found
}

fn declaration_name_at(
    statement: &crate::ast::Statement,
    offset: u32,
) -> Option<EcoString> {
    match &statement.kind {
        StatementKind::VarDecl(v) if v.name.span.contains_offset(offset) => {
            Some(v.name.name.clone())
        }
        StatementKind::ConstDecl(c) if c.name.span.contains_offset(offset) => {
            Some(c.name.name.clone())
        }
        StatementKind::If(if_statement) => if_statement
            .then_block
            .statements
            .iter()
            .chain(
                if_statement
                    .elif_branches
                    .iter()
                    .flat_map(|b| b.block.statements.iter()),
            )
            .chain(
                if_statement
                    .else_block
                    .iter()
                    .flat_map(|b| b.statements.iter()),
            )
            .find_map(|s| declaration_name_at(s, offset)),
        StatementKind::While(w) => w
            .body
            .statements
            .iter()
            .find_map(|s| declaration_name_at(s, offset)),
        StatementKind::For(f) => {
            if f.variable.span.contains_offset(offset) {
                return Some(f.variable.name.clone());
            }
            f.body
                .statements
                .iter()
                .find_map(|s| declaration_name_at(s, offset))
        }
        _ => None,
    }
}

fn assignment_target_at(
    statement: &crate::ast::Statement,
    offset: u32,
) -> Option<EcoString> {
    match &statement.kind {
        StatementKind::Assignment { target, .. } => {
            let name = target.name();
            name.span.contains_offset(offset).then(|| name.name.clone())
        }
        StatementKind::If(if_statement) => if_statement
            .then_block
            .statements
            .iter()
            .chain(
                if_statement
                    .elif_branches
                    .iter()
                    .flat_map(|b| b.block.statements.iter()),
            )
            .chain(
                if_statement
                    .else_block
                    .iter()
                    .flat_map(|b| b.statements.iter()),
            )
            .find_map(|s| assignment_target_at(s, offset)),
        StatementKind::While(w) => w
            .body
            .statements
            .iter()
            .find_map(|s| assignment_target_at(s, offset)),
        StatementKind::For(f) => f
            .body
            .statements
            .iter()
            .find_map(|s| assignment_target_at(s, offset)),
        _ => None,
    }
}

/// Picks the declaration span for `name` as seen from `offset`: locals of
/// the enclosing function first, then globals, then functions.
fn resolve(program: &Program, analysis: &Analysis, name: &str, offset: u32) -> Option<Span> {
    if let Some(function) = super::enclosing_function(program, offset) {
        if let Some(info) = analysis.function(&function.name.name) {
            // Last declaration before the cursor wins, matching shadowing.
            if let Some(local) = info
                .locals
                .iter()
                .filter(|s| s.name == name && s.span.start() <= offset)
                .last()
            {
                return Some(local.span);
            }
        }
    }
    if let Some(global) = analysis.global(name) {
        return Some(global.span);
    }
    let info = analysis.function(name)?;
    if info.builtin {
        return None;
    }
    Some(info.name_span)
}
