// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Value objects for editor integration.
//!
//! The front end IS the language service: the same tokenizer, parser, and
//! analyzer that produce diagnostics also answer editor queries. This module
//! holds the position arithmetic and the result types; the queries
//! themselves are pure functions in [`crate::queries`].

use camino::Utf8PathBuf;
use ecow::EcoString;

use crate::source_analysis::Span;
use crate::types::Type;

/// A byte offset in a source file (0-indexed).
///
/// This newtype provides type safety to prevent mixing positions and offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteOffset(pub u32);

impl ByteOffset {
    #[must_use]
    pub const fn new(offset: u32) -> Self {
        Self(offset)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// A position in a source file (line and column, both 0-indexed).
///
/// The `column` field is a **byte offset within the line**, not a character
/// count. Callers must ensure that it always lies on a valid UTF-8 character
/// boundary in the corresponding source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (0-indexed).
    pub line: u32,
    /// Column offset in bytes from the start of the line (0-indexed).
    /// Must be at a valid UTF-8 character boundary.
    pub column: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Converts a byte offset to a position given source text.
    ///
    /// Returns `None` if the offset is out of bounds.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    pub fn from_byte_offset(source: &str, offset: ByteOffset) -> Option<Self> {
        let offset_val = offset.get() as usize;
        if offset_val > source.len() {
            return None;
        }

        let mut line = 0;
        let mut line_start = 0;

        for (i, ch) in source.char_indices() {
            if i >= offset_val {
                return Some(Self::new(line, (offset_val - line_start) as u32));
            }
            if ch == '\n' {
                line += 1;
                line_start = i + 1;
            }
        }

        Some(Self::new(line, (offset_val - line_start) as u32))
    }

    /// Converts a byte offset to a position given source text.
    ///
    /// Returns `None` if the offset is out of bounds.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    pub fn from_offset(source: &str, offset: usize) -> Option<Self> {
        Self::from_byte_offset(source, ByteOffset::new(offset as u32))
    }

    /// Converts a position to a byte offset given source text.
    ///
    /// Returns `None` if the position is out of bounds.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    pub fn to_byte_offset(self, source: &str) -> Option<ByteOffset> {
        self.to_offset(source)
            .map(|off| ByteOffset::new(off as u32))
    }

    /// Converts a position to a byte offset given source text.
    ///
    /// Returns `None` if the position is out of bounds.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    pub fn to_offset(self, source: &str) -> Option<usize> {
        let mut current_line = 0;
        let mut line_start = 0;

        for (i, ch) in source.char_indices() {
            if current_line == self.line {
                let col = (i - line_start) as u32;
                if col == self.column {
                    return Some(i);
                }
            }
            if ch == '\n' {
                if current_line == self.line {
                    // Past the end of the requested line.
                    return None;
                }
                current_line += 1;
                line_start = i + 1;
            }
        }

        // Position at the end of the last line.
        if current_line == self.line {
            let col = (source.len() - line_start) as u32;
            if col == self.column {
                return Some(source.len());
            }
        }

        None
    }
}

/// A location in a source file (file path and span).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Utf8PathBuf,
    pub span: Span,
}

impl Location {
    #[must_use]
    pub fn new(file: Utf8PathBuf, span: Span) -> Self {
        Self { file, span }
    }
}

/// A code completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The text to insert.
    pub label: EcoString,
    /// The kind of completion (function, variable, etc.).
    pub kind: CompletionKind,
    /// Short extra text, usually a type or signature.
    pub detail: Option<EcoString>,
    /// Longer documentation.
    pub documentation: Option<EcoString>,
}

/// The kind of a completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Function,
    Variable,
    Constant,
    Type,
    Keyword,
}

impl Completion {
    #[must_use]
    pub fn new(label: impl Into<EcoString>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<EcoString>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<EcoString>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

/// Help for the call the cursor is inside of.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureHelp {
    /// Candidate signatures; in Adder a name has exactly one.
    pub signatures: Vec<SignatureInfo>,
    /// Index into `signatures`.
    pub active_signature: u32,
    /// Index of the parameter the cursor is on.
    pub active_parameter: u32,
}

/// One function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureInfo {
    /// The rendered signature, e.g. `poke(address: word, value: byte)`.
    pub label: EcoString,
    pub documentation: Option<EcoString>,
    pub parameters: Vec<ParameterInfo>,
}

/// One parameter in a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// The parameter as it appears in the signature label, e.g.
    /// `address: word`.
    pub label: EcoString,
    pub documentation: Option<EcoString>,
}

/// A small annotation rendered inline by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlayHint {
    /// Byte offset the hint is anchored to.
    pub offset: ByteOffset,
    /// The rendered text, e.g. `value:` or `: word`.
    pub label: EcoString,
    pub kind: InlayHintKind,
}

/// What an inlay hint annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlayHintKind {
    /// A parameter name in front of a call argument.
    Parameter,
    /// An inferred type after a declaration without an annotation.
    Type,
}

/// One entry in the document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSymbol {
    pub name: EcoString,
    pub kind: DocumentSymbolKind,
    /// Span of the whole item.
    pub span: Span,
    /// Span of just the name, for selection.
    pub selection_span: Span,
    /// Short extra text, usually a type.
    pub detail: Option<EcoString>,
    pub children: Vec<DocumentSymbol>,
}

/// The kind of a document symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSymbolKind {
    Function,
    Parameter,
    Variable,
    Constant,
    Data,
}

impl DocumentSymbol {
    #[must_use]
    pub fn new(
        name: impl Into<EcoString>,
        kind: DocumentSymbolKind,
        span: Span,
        selection_span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            span,
            selection_span,
            detail: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<EcoString>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<DocumentSymbol>) -> Self {
        self.children = children;
        self
    }
}

/// Renders a type for display in hints and completion detail.
#[must_use]
pub fn display_type(ty: &Type) -> EcoString {
    ty.to_string().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_from_offset_first_line() {
        let source = "hello world";
        let pos = Position::from_offset(source, 6).unwrap();
        assert_eq!(pos, Position::new(0, 6));
    }

    #[test]
    fn position_from_offset_multi_line() {
        let source = "line one\nline two\nline three";
        let pos = Position::from_offset(source, 9).unwrap();
        assert_eq!(pos, Position::new(1, 0));
        let pos = Position::from_offset(source, 14).unwrap();
        assert_eq!(pos, Position::new(1, 5));
    }

    #[test]
    fn position_from_offset_out_of_bounds() {
        assert!(Position::from_offset("short", 100).is_none());
    }

    #[test]
    fn position_from_offset_at_end() {
        let source = "ab\ncd";
        let pos = Position::from_offset(source, 5).unwrap();
        assert_eq!(pos, Position::new(1, 2));
    }

    #[test]
    fn position_to_offset_round_trips() {
        let source = "def main():\n    pass\n";
        for offset in 0..=source.len() {
            if !source.is_char_boundary(offset) {
                continue;
            }
            let pos = Position::from_offset(source, offset).unwrap();
            assert_eq!(pos.to_offset(source), Some(offset), "offset {offset}");
        }
    }

    #[test]
    fn position_to_offset_invalid_column() {
        assert!(Position::new(0, 99).to_offset("short\nlines").is_none());
        assert!(Position::new(9, 0).to_offset("one line").is_none());
    }

    #[test]
    fn position_handles_multibyte_characters() {
        let source = "x = \"höhe\"\ny = 1";
        // 'ö' is two bytes; the byte after the string's closing quote.
        let offset = source.find('\n').unwrap();
        let pos = Position::from_offset(source, offset).unwrap();
        assert_eq!(pos.line, 0);
        assert_eq!(pos.to_offset(source), Some(offset));
    }

    #[test]
    fn completion_builder() {
        let completion = Completion::new("peek", CompletionKind::Function)
            .with_detail("(address: word) -> byte")
            .with_documentation("Read a byte from a memory address.");
        assert_eq!(completion.label, "peek");
        assert!(completion.detail.is_some());
        assert!(completion.documentation.is_some());
    }

    #[test]
    fn document_symbol_builder() {
        let symbol = DocumentSymbol::new(
            "main",
            DocumentSymbolKind::Function,
            Span::new(0, 20),
            Span::new(4, 8),
        )
        .with_children(vec![DocumentSymbol::new(
            "x",
            DocumentSymbolKind::Variable,
            Span::new(10, 15),
            Span::new(10, 11),
        )]);
        assert_eq!(symbol.children.len(), 1);
    }
}
