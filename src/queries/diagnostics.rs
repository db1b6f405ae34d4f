// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! The merged diagnostic list for a source file.

use crate::analyse::analyze;
use crate::source_analysis::{Diagnostic, parse, tokenize};

/// Runs the whole front end over `source` and returns every diagnostic from
/// every phase, ordered by source position.
#[must_use]
pub fn compute_diagnostics(source: &str) -> Vec<Diagnostic> {
    let (tokens, mut diagnostics) = tokenize(source);
    let (program, parse_diagnostics) = parse(tokens);
    diagnostics.extend(parse_diagnostics);
    diagnostics.extend(analyze(&program).diagnostics);
    diagnostics.sort_by_key(|d| (d.span.start(), d.span.end(), d.code.as_str()));
    diagnostics
}
