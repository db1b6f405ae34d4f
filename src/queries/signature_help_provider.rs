// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Signature help for the call under the cursor.

use std::fmt::Write;

use ecow::EcoString;

use crate::analyse::{Analysis, FunctionInfo};
use crate::ast::{Expression, ExpressionKind, Identifier, Program};
use crate::language_service::{ParameterInfo, Position, SignatureHelp, SignatureInfo};

/// Computes signature help at `position`.
///
/// Finds the innermost call expression containing the cursor and renders
/// its signature; the active parameter is the argument slot the cursor is
/// in.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "source files over 4GB are not supported"
)]
pub fn compute_signature_help(
    program: &Program,
    source: &str,
    position: Position,
    analysis: &Analysis,
) -> Option<SignatureHelp> {
    let offset = position.to_offset(source)? as u32;

    let mut innermost: Option<(&Identifier, &[Expression])> = None;
    let mut innermost_start = 0;
    super::for_each_expression(program, &mut |expr| {
        if let ExpressionKind::Call { callee, arguments } = &expr.kind {
            // The cursor must be past the callee, inside the argument list.
            if expr.span.contains_offset(offset)
                && offset > callee.span.end()
                && expr.span.start() >= innermost_start
            {
                innermost = Some((callee, arguments));
                innermost_start = expr.span.start();
            }
        }
    });
    let (callee, arguments) = innermost?;

    let info = analysis.function(&callee.name)?;
    let active_parameter = arguments
        .iter()
        .filter(|argument| argument.span.end() < offset)
        .count() as u32;

    Some(SignatureHelp {
        signatures: vec![render_signature(info)],
        active_signature: 0,
        active_parameter,
    })
}

fn render_signature(info: &FunctionInfo) -> SignatureInfo {
    let mut label = String::new();
    let _ = write!(label, "{}(", info.name);
    let mut parameters = Vec::new();
    for (i, parameter) in info.parameters.iter().enumerate() {
        if i > 0 {
            label.push_str(", ");
        }
        let rendered: EcoString = format!("{}: {}", parameter.name, parameter.ty).into();
        label.push_str(&rendered);
        parameters.push(ParameterInfo {
            label: rendered,
            documentation: None,
        });
    }
    label.push(')');
    if info.return_type != crate::types::Type::Void {
        let _ = write!(label, " -> {}", info.return_type);
    }
    SignatureInfo {
        label: label.into(),
        documentation: info.doc.clone(),
        parameters,
    }
}
