// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Parsing for `data` blocks.
//!
//! A data block names a region of raw bytes assembled from literal runs and
//! file inclusions:
//!
//! ```text
//! data SPRITES:
//!     $ff, $81, $81, $ff
//!     include "font.bin", 2, 64
//! end
//! ```
//!
//! Each entry line is either a comma-separated run of byte values or an
//! `include` directive with an optional offset and length. The block is
//! closed by the `end` keyword.

use crate::ast::{DataBlock, DataEntry, TopLevelItem};
use crate::source_analysis::diagnostic::DiagnosticCode;
use crate::source_analysis::token::TokenKind;

use super::Parser;

impl Parser {
    /// Parses `data NAME:` through the closing `end`.
    pub(super) fn parse_data_block(&mut self) -> TopLevelItem {
        let start = self.current_span();
        self.advance(); // 'data'

        let name = self.parse_identifier("expected data block name after 'data'");
        self.expect(
            &TokenKind::Colon,
            DiagnosticCode::UnexpectedToken,
            "expected ':' after data block name",
        );
        self.end_of_statement();

        // Entry lines may or may not be indented; accept both layouts.
        let indented = self.match_token(&TokenKind::Indent);

        let mut entries = Vec::new();
        loop {
            self.skip_newlines();
            match self.current_kind() {
                TokenKind::End => {
                    self.advance();
                    self.end_of_statement();
                    break;
                }
                TokenKind::Dedent => {
                    self.advance();
                    if indented {
                        // The indented region is over; `end` follows at the
                        // outer level.
                        self.skip_newlines();
                        if self.match_token(&TokenKind::End) {
                            self.end_of_statement();
                        } else {
                            self.error(
                                DiagnosticCode::UnexpectedToken,
                                format!("expected 'end' to close data block '{}'", name.name),
                                self.current_span(),
                            );
                        }
                        break;
                    }
                }
                TokenKind::Eof => {
                    self.error(
                        DiagnosticCode::UnexpectedToken,
                        format!("data block '{}' is never closed with 'end'", name.name),
                        self.current_span(),
                    );
                    break;
                }
                TokenKind::Include => entries.push(self.parse_include_entry()),
                _ => {
                    if let Some(entry) = self.parse_byte_run() {
                        entries.push(entry);
                    }
                }
            }
        }

        let span = start.merge(self.previous_span());
        TopLevelItem::Data(DataBlock {
            name,
            entries,
            span,
        })
    }

    /// Parses one line of comma-separated byte values. Returns `None` when
    /// the line yields nothing usable.
    fn parse_byte_run(&mut self) -> Option<DataEntry> {
        let start = self.current_span();
        let mut values = Vec::new();
        loop {
            match *self.current_kind() {
                TokenKind::Integer(value) => {
                    let span = self.current_span();
                    self.advance();
                    if value > 255 {
                        self.error(
                            DiagnosticCode::DataByteOutOfRange,
                            format!("data value {value} does not fit in a byte"),
                            span,
                        );
                    }
                    values.push((value & 0xff) as u8);
                }
                TokenKind::Char(c) => {
                    let span = self.current_span();
                    self.advance();
                    if c.is_ascii() {
                        values.push(c as u8);
                    } else {
                        self.error(
                            DiagnosticCode::DataByteOutOfRange,
                            format!("character '{c}' is not a single byte"),
                            span,
                        );
                    }
                }
                _ => {
                    self.error(
                        DiagnosticCode::ExpectedDataValue,
                        format!(
                            "expected a byte value, found '{}'",
                            self.current_kind()
                        ),
                        self.current_span(),
                    );
                    self.recover_to_statement_boundary();
                    break;
                }
            }
            if self.match_token(&TokenKind::Comma) {
                continue;
            }
            self.end_of_statement();
            break;
        }
        if values.is_empty() {
            return None;
        }
        let span = start.merge(self.previous_span());
        Some(DataEntry::Bytes { values, span })
    }

    /// Parses `include "path"[, offset[, length]]`.
    fn parse_include_entry(&mut self) -> DataEntry {
        let start = self.current_span();
        self.advance(); // 'include'

        let path = if let TokenKind::String(path) = self.current_kind() {
            let path = path.clone();
            self.advance();
            path
        } else {
            self.error(
                DiagnosticCode::ExpectedDataValue,
                "expected a quoted file path after 'include'",
                self.current_span(),
            );
            self.recover_to_statement_boundary();
            let span = start.merge(self.previous_span());
            return DataEntry::Include {
                path: "".into(),
                offset: None,
                length: None,
                span,
            };
        };

        let offset = self.parse_include_number();
        let length = if offset.is_some() {
            self.parse_include_number()
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        self.end_of_statement();
        DataEntry::Include {
            path,
            offset,
            length,
            span,
        }
    }

    /// Parses `, N` if present.
    fn parse_include_number(&mut self) -> Option<u32> {
        if !self.match_token(&TokenKind::Comma) {
            return None;
        }
        if let TokenKind::Integer(value) = *self.current_kind() {
            self.advance();
            Some(u32::from(value))
        } else {
            self.error(
                DiagnosticCode::ExpectedDataValue,
                format!("expected a number, found '{}'", self.current_kind()),
                self.current_span(),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse_source;
    use crate::ast::{DataEntry, TopLevelItem};
    use crate::source_analysis::diagnostic::DiagnosticCode;

    fn data_entries(source: &str) -> Vec<DataEntry> {
        let (program, diagnostics) = parse_source(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let TopLevelItem::Data(block) = &program.items[0] else {
            panic!("expected data block");
        };
        block.entries.clone()
    }

    #[test]
    fn byte_runs_collect_values() {
        let entries = data_entries("data SPRITE:\n    $ff, $81, 129, %1111\n    0, 1\nend\n");
        assert_eq!(entries.len(), 2);
        let DataEntry::Bytes { values, .. } = &entries[0] else {
            panic!("expected bytes");
        };
        assert_eq!(values, &[0xff, 0x81, 129, 0b1111]);
        let DataEntry::Bytes { values, .. } = &entries[1] else {
            panic!("expected bytes");
        };
        assert_eq!(values, &[0, 1]);
    }

    #[test]
    fn char_values_store_their_byte() {
        let entries = data_entries("data TEXT:\n    'A', 'B'\nend\n");
        let DataEntry::Bytes { values, .. } = &entries[0] else {
            panic!("expected bytes");
        };
        assert_eq!(values, &[b'A', b'B']);
    }

    #[test]
    fn unindented_entries_are_accepted() {
        let entries = data_entries("data FLAT:\n1, 2, 3\nend\n");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn include_with_offset_and_length() {
        let entries = data_entries("data FONT:\n    include \"font.bin\", 2, 64\nend\n");
        let DataEntry::Include {
            path,
            offset,
            length,
            ..
        } = &entries[0]
        else {
            panic!("expected include");
        };
        assert_eq!(path, "font.bin");
        assert_eq!(*offset, Some(2));
        assert_eq!(*length, Some(64));
    }

    #[test]
    fn include_without_offset() {
        let entries = data_entries("data FONT:\n    include \"font.bin\"\nend\n");
        let DataEntry::Include { offset, length, .. } = &entries[0] else {
            panic!("expected include");
        };
        assert_eq!(*offset, None);
        assert_eq!(*length, None);
    }

    #[test]
    fn value_out_of_range_is_reported_and_truncated() {
        let (program, diagnostics) = parse_source("data D:\n    300\nend\n");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::DataByteOutOfRange)
        );
        let TopLevelItem::Data(block) = &program.items[0] else {
            panic!("expected data block");
        };
        let DataEntry::Bytes { values, .. } = &block.entries[0] else {
            panic!("expected bytes");
        };
        assert_eq!(values, &[300u16 as u8]);
    }

    #[test]
    fn non_value_line_is_reported_and_skipped() {
        let (program, diagnostics) = parse_source("data D:\n    1, 2\n    oops\n    3\nend\n");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::ExpectedDataValue)
        );
        let TopLevelItem::Data(block) = &program.items[0] else {
            panic!("expected data block");
        };
        assert_eq!(block.entries.len(), 2);
    }

    #[test]
    fn unterminated_block_is_reported() {
        let (_, diagnostics) = parse_source("data D:\n    1, 2\n");
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::UnexpectedToken && d.message.contains("'end'"))
        );
    }

    #[test]
    fn known_size_accounts_for_includes() {
        let (program, _) =
            parse_source("data D:\n    1, 2, 3\n    include \"x.bin\", 0, 16\nend\n");
        let TopLevelItem::Data(block) = &program.items[0] else {
            panic!("expected data block");
        };
        assert_eq!(block.known_size(), 3 + 16);

        let (program, _) = parse_source("data D:\n    1, 2, 3\nend\n");
        let TopLevelItem::Data(block) = &program.items[0] else {
            panic!("expected data block");
        };
        assert_eq!(block.known_size(), 3);
    }
}
