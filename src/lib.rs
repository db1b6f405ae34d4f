// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Adder compiler front end.
//!
//! Adder is a small statically typed language with Python-style indentation
//! syntax, compiled for 8-bit targets. This crate contains the front end:
//! - Lexical analysis (indentation-sensitive tokenization)
//! - Parsing (AST construction with error recovery)
//! - Semantic analysis (name resolution, type inference, validation)
//! - Editor queries (completion, signature help, inlay hints, navigation)
//!
//! The front end is designed as a language service: every phase is total,
//! returning a best-effort result plus diagnostics, so editors always get
//! an answer even for broken source.

pub mod analyse;
pub mod ast;
pub mod language_service;
pub mod queries;
pub mod source_analysis;
pub mod types;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::analyse::{Analysis, analyze};
    pub use crate::ast::{Expression, Identifier, Program};
    pub use crate::queries::compute_diagnostics;
    pub use crate::source_analysis::{Diagnostic, Span, parse, tokenize};
    pub use crate::types::Type;
}
