// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Code completion.
//!
//! Suggestions are drawn from the keyword list, the type names, the built-in
//! catalog, user functions, globals, and the locals of the enclosing
//! function, filtered by the identifier prefix under the cursor. Directly
//! after a `:` only type names are offered, since that is the annotation
//! position.

use ecow::EcoString;

use crate::analyse::{Analysis, FunctionInfo};
use crate::ast::Program;
use crate::language_service::{Completion, CompletionKind, Position};

const KEYWORDS: &[&str] = &[
    "and", "break", "continue", "data", "def", "downto", "elif", "else", "end", "false", "for",
    "if", "in", "include", "not", "or", "pass", "return", "to", "true", "while",
];

const TYPE_NAMES: &[&str] = &[
    "bool", "byte", "fixed", "float", "sbyte", "string", "sword", "word",
];

/// Computes completion suggestions at `position`.
#[must_use]
pub fn compute_completions(
    program: &Program,
    source: &str,
    position: Position,
    analysis: &Analysis,
) -> Vec<Completion> {
    let Some(offset) = position.to_offset(source) else {
        return Vec::new();
    };

    let prefix = identifier_prefix(source, offset);
    let prefix_start = offset - prefix.len();

    let mut completions = Vec::new();
    if in_type_position(source, prefix_start) {
        push_type_names(&mut completions, prefix);
    } else {
        push_keywords(&mut completions, prefix);
        push_type_names(&mut completions, prefix);
        push_functions(analysis, &mut completions, prefix);
        push_symbols(program, analysis, offset, &mut completions, prefix);
    }
    completions.sort_by(|a, b| a.label.cmp(&b.label));
    completions
}

/// The partial identifier immediately before `offset`.
fn identifier_prefix(source: &str, offset: usize) -> &str {
    let head = &source[..offset];
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        .last()
        .map_or(offset, |(i, _)| i);
    &head[start..]
}

/// True when the first non-space character before the prefix is a `:`,
/// which puts the cursor in annotation position.
fn in_type_position(source: &str, prefix_start: usize) -> bool {
    source[..prefix_start]
        .chars()
        .rev()
        .find(|c| *c != ' ')
        .is_some_and(|c| c == ':')
}

fn push_keywords(completions: &mut Vec<Completion>, prefix: &str) {
    for keyword in KEYWORDS {
        if keyword.starts_with(prefix) {
            completions.push(Completion::new(*keyword, CompletionKind::Keyword));
        }
    }
}

fn push_type_names(completions: &mut Vec<Completion>, prefix: &str) {
    for name in TYPE_NAMES {
        if name.starts_with(prefix) {
            completions.push(Completion::new(*name, CompletionKind::Type));
        }
    }
}

fn push_functions(analysis: &Analysis, completions: &mut Vec<Completion>, prefix: &str) {
    for function in &analysis.functions {
        if !function.name.starts_with(prefix) {
            continue;
        }
        let mut completion = Completion::new(function.name.clone(), CompletionKind::Function)
            .with_detail(signature_detail(function));
        if let Some(doc) = &function.doc {
            completion = completion.with_documentation(doc.clone());
        }
        completions.push(completion);
    }
}

fn signature_detail(function: &FunctionInfo) -> EcoString {
    use std::fmt::Write;
    let mut detail = String::from("(");
    for (i, parameter) in function.parameters.iter().enumerate() {
        if i > 0 {
            detail.push_str(", ");
        }
        let _ = write!(detail, "{}: {}", parameter.name, parameter.ty);
    }
    detail.push(')');
    if function.return_type != crate::types::Type::Void {
        let _ = write!(detail, " -> {}", function.return_type);
    }
    detail.into()
}

fn push_symbols(
    program: &Program,
    analysis: &Analysis,
    offset: usize,
    completions: &mut Vec<Completion>,
    prefix: &str,
) {
    for symbol in crate::analyse::builtins::CONSTANTS {
        if symbol.name.starts_with(prefix) {
            completions.push(
                Completion::new(symbol.name, CompletionKind::Constant)
                    .with_detail(symbol.ty.to_string())
                    .with_documentation(symbol.doc),
            );
        }
    }
    for symbol in &analysis.globals {
        if symbol.name.starts_with(prefix) {
            completions.push(
                Completion::new(symbol.name.clone(), global_kind(symbol))
                    .with_detail(symbol.ty.to_string()),
            );
        }
    }
    // Locals of the function under the cursor.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    let Some(function) = super::enclosing_function(program, offset as u32) else {
        return;
    };
    let Some(info) = analysis.function(&function.name.name) else {
        return;
    };
    for local in &info.locals {
        if local.name.starts_with(prefix) {
            completions.push(
                Completion::new(local.name.clone(), CompletionKind::Variable)
                    .with_detail(local.ty.to_string()),
            );
        }
    }
}

fn global_kind(symbol: &crate::analyse::Symbol) -> CompletionKind {
    use crate::analyse::SymbolKind;
    match symbol.kind {
        SymbolKind::Constant | SymbolKind::DataBlock => CompletionKind::Constant,
        SymbolKind::Variable | SymbolKind::Parameter => CompletionKind::Variable,
    }
}
