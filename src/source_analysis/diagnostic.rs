// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics for all three front-end stages.
//!
//! Diagnostics are values, not control flow: the tokenizer, parser, and
//! analyzer each accumulate them in a sink and always run to completion.
//! Every diagnostic carries a stable code so tooling can filter or suppress
//! by code (`E0xx` lexical, `E1xx` syntax, `E2xx` semantic, `W0xx` warnings).
//! The type integrates with [`miette`] so hosts can render rich reports.

use ecow::EcoString;
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use super::Span;

/// How severe a diagnostic is.
///
/// Warnings are advisory only; no downstream consumer is blocked by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A stable diagnostic code.
///
/// Codes never change meaning once published; new codes are appended within
/// their family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Lexical (E0xx)
    InvalidCharacter,
    UnterminatedString,
    UnterminatedChar,
    InvalidEscape,
    InvalidCharLiteral,
    IntegerTooLarge,
    InvalidNumber,
    TabIndentation,
    InconsistentIndentation,

    // Syntax (E1xx)
    UnexpectedToken,
    ExpectedIdentifier,
    ExpectedType,
    ExpectedExpression,
    ExpectedIndentedBlock,
    ExpectedNewline,
    ExpectedDataValue,
    DataByteOutOfRange,
    InvalidConstantName,
    MissingTypeAnnotation,

    // Semantic (E2xx)
    UndefinedVariable,
    DuplicateDefinition,
    AssignmentToConstant,
    UndefinedFunction,
    WrongArgumentCount,
    NotAnArray,
    BuiltinRedefinition,
    MissingMain,
    BreakOutsideLoop,
    ContinueOutsideLoop,
    ReturnValueInVoidFunction,

    // Warnings (W0xx)
    ShadowedName,
    LiteralTruncation,
    NegativeToUnsigned,
    SignednessMix,
    PrecisionLoss,
}

impl DiagnosticCode {
    /// The stable code string shown to users and matched by tooling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::InvalidCharacter => "E001",
            DiagnosticCode::UnterminatedString => "E010",
            DiagnosticCode::UnterminatedChar => "E011",
            DiagnosticCode::InvalidEscape => "E012",
            DiagnosticCode::InvalidCharLiteral => "E013",
            DiagnosticCode::IntegerTooLarge => "E020",
            DiagnosticCode::InvalidNumber => "E021",
            DiagnosticCode::TabIndentation => "E030",
            DiagnosticCode::InconsistentIndentation => "E031",

            DiagnosticCode::UnexpectedToken => "E100",
            DiagnosticCode::ExpectedIdentifier => "E101",
            DiagnosticCode::ExpectedType => "E102",
            DiagnosticCode::ExpectedExpression => "E103",
            DiagnosticCode::ExpectedIndentedBlock => "E110",
            DiagnosticCode::ExpectedNewline => "E111",
            DiagnosticCode::ExpectedDataValue => "E120",
            DiagnosticCode::DataByteOutOfRange => "E121",
            DiagnosticCode::InvalidConstantName => "E130",
            DiagnosticCode::MissingTypeAnnotation => "E147",

            DiagnosticCode::UndefinedVariable => "E200",
            DiagnosticCode::DuplicateDefinition => "E201",
            DiagnosticCode::AssignmentToConstant => "E202",
            DiagnosticCode::UndefinedFunction => "E203",
            DiagnosticCode::WrongArgumentCount => "E204",
            DiagnosticCode::NotAnArray => "E205",
            DiagnosticCode::BuiltinRedefinition => "E206",
            DiagnosticCode::MissingMain => "E210",
            DiagnosticCode::BreakOutsideLoop => "E220",
            DiagnosticCode::ContinueOutsideLoop => "E221",
            DiagnosticCode::ReturnValueInVoidFunction => "E222",

            DiagnosticCode::ShadowedName => "W001",
            DiagnosticCode::LiteralTruncation => "W002",
            DiagnosticCode::NegativeToUnsigned => "W003",
            DiagnosticCode::SignednessMix => "W004",
            DiagnosticCode::PrecisionLoss => "W005",
        }
    }

    /// The default severity for this code.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            DiagnosticCode::ShadowedName
            | DiagnosticCode::LiteralTruncation
            | DiagnosticCode::NegativeToUnsigned
            | DiagnosticCode::SignednessMix
            | DiagnosticCode::PrecisionLoss => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic produced by any front-end stage.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("{code}: {message}")]
pub struct Diagnostic {
    /// The stable code.
    pub code: DiagnosticCode,
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable description.
    pub message: EcoString,
    /// The source range the diagnostic applies to.
    #[label("here")]
    pub span: Span,
    /// An optional short suggestion.
    #[help]
    pub hint: Option<EcoString>,
}

impl Diagnostic {
    /// Creates a diagnostic with the code's default severity.
    #[must_use]
    pub fn new(code: DiagnosticCode, message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(code: DiagnosticCode, message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::new(code, message, span)
        }
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(code: DiagnosticCode, message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::new(code, message, span)
        }
    }

    /// Attaches a suggestion shown alongside the message.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_strings() {
        assert_eq!(DiagnosticCode::InvalidCharacter.as_str(), "E001");
        assert_eq!(DiagnosticCode::MissingTypeAnnotation.as_str(), "E147");
        assert_eq!(DiagnosticCode::UndefinedVariable.as_str(), "E200");
        assert_eq!(DiagnosticCode::ShadowedName.as_str(), "W001");
    }

    #[test]
    fn default_severity_follows_family() {
        assert_eq!(DiagnosticCode::MissingMain.severity(), Severity::Error);
        assert_eq!(
            DiagnosticCode::LiteralTruncation.severity(),
            Severity::Warning
        );
    }

    #[test]
    fn display_includes_code_and_message() {
        let d = Diagnostic::error(
            DiagnosticCode::UndefinedVariable,
            "undefined variable `x`",
            Span::new(0, 1),
        );
        assert_eq!(d.to_string(), "E200: undefined variable `x`");
    }

    #[test]
    fn hint_is_carried() {
        let d = Diagnostic::new(
            DiagnosticCode::TabIndentation,
            "tab character in indentation",
            Span::new(0, 1),
        )
        .with_hint("use 4 spaces per indentation level");
        assert_eq!(
            d.hint.as_deref(),
            Some("use 4 spaces per indentation level")
        );
        assert_eq!(d.severity, Severity::Error);
    }
}
