// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Lexical and syntactic analysis.
//!
//! [`tokenize`] turns source text into a token stream with synthetic
//! `Indent`/`Dedent` tokens encoding the indentation structure; [`parse`]
//! turns the token stream into a [`Program`](crate::ast::Program). Both are
//! total: they always produce output and report problems as [`Diagnostic`]s
//! rather than failing.

mod diagnostic;
mod lexer;
mod parser;
mod span;
mod token;

#[cfg(test)]
mod lexer_property_tests;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use lexer::tokenize;
pub use parser::{has_valid_casing, is_constant_name, parse};
pub use span::Span;
pub use token::{Token, TokenKind};
