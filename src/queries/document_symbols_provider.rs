// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Document outline.

use ecow::EcoString;

use crate::ast::{FunctionDef, Program, TopLevelItem};
use crate::language_service::{DocumentSymbol, DocumentSymbolKind};
use crate::types::Type;

/// Computes the outline of a file: functions with their parameters as
/// children, globals, constants, and data blocks, in source order.
#[must_use]
pub fn compute_document_symbols(program: &Program) -> Vec<DocumentSymbol> {
    program
        .items
        .iter()
        .map(|item| match item {
            TopLevelItem::Function(function) => function_symbol(function),
            TopLevelItem::Variable(v) => {
                let mut symbol = DocumentSymbol::new(
                    v.name.name.clone(),
                    DocumentSymbolKind::Variable,
                    v.span,
                    v.name.span,
                );
                if let Some(ty) = &v.ty {
                    symbol = symbol.with_detail(ty.to_string());
                }
                symbol
            }
            TopLevelItem::Constant(c) => {
                let mut symbol = DocumentSymbol::new(
                    c.name.name.clone(),
                    DocumentSymbolKind::Constant,
                    c.span,
                    c.name.span,
                );
                if let Some(ty) = &c.ty {
                    symbol = symbol.with_detail(ty.to_string());
                }
                symbol
            }
            TopLevelItem::Data(d) => DocumentSymbol::new(
                d.name.name.clone(),
                DocumentSymbolKind::Data,
                d.span,
                d.name.span,
            )
            .with_detail(format!("{} bytes", d.known_size())),
        })
        .collect()
}

fn function_symbol(function: &FunctionDef) -> DocumentSymbol {
    let children = function
        .parameters
        .iter()
        .map(|parameter| {
            DocumentSymbol::new(
                parameter.name.name.clone(),
                DocumentSymbolKind::Parameter,
                parameter.span,
                parameter.name.span,
            )
            .with_detail(parameter.ty.to_string())
        })
        .collect();

    DocumentSymbol::new(
        function.name.name.clone(),
        DocumentSymbolKind::Function,
        function.span,
        function.name.span,
    )
    .with_detail(render_signature_detail(function))
    .with_children(children)
}

fn render_signature_detail(function: &FunctionDef) -> EcoString {
    let return_type = function.return_type.clone().unwrap_or(Type::Void);
    if return_type == Type::Void {
        format!("({} parameters)", function.parameters.len()).into()
    } else {
        format!("({} parameters) -> {return_type}", function.parameters.len()).into()
    }
}
