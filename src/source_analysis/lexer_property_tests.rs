// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the lexer.

use proptest::prelude::*;

use crate::source_analysis::{TokenKind, tokenize};

proptest! {
    /// The lexer is total: any input produces tokens, never a panic.
    #[test]
    fn tokenizing_arbitrary_input_never_panics(source in "\\PC{0,300}") {
        let (_, _) = tokenize(&source);
    }

    /// Exactly one `Eof` token, always last.
    #[test]
    fn token_stream_ends_with_a_single_eof(source in "\\PC{0,200}") {
        let (tokens, _) = tokenize(&source);
        let eof_count = tokens.iter().filter(|t| t.kind.is_eof()).count();
        prop_assert_eq!(eof_count, 1);
        prop_assert!(tokens.last().is_some_and(|t| t.kind.is_eof()));
    }

    /// Every `Indent` is matched by a `Dedent` by end of input.
    #[test]
    fn indents_and_dedents_balance(source in "[a-z(): \n]{0,200}") {
        let (tokens, _) = tokenize(&source);
        let mut depth: i64 = 0;
        for token in &tokens {
            match token.kind {
                TokenKind::Indent => depth += 1,
                TokenKind::Dedent => {
                    depth -= 1;
                    prop_assert!(depth >= 0, "dedent without a matching indent");
                }
                _ => {}
            }
        }
        prop_assert_eq!(depth, 0);
    }

    /// Token spans never go backwards and never exceed the source length.
    #[test]
    fn token_spans_are_monotonic(source in "\\PC{0,200}") {
        let (tokens, _) = tokenize(&source);
        let mut previous_start = 0;
        for token in &tokens {
            prop_assert!(token.span.start() >= previous_start);
            prop_assert!(token.span.end() as usize <= source.len());
            previous_start = token.span.start();
        }
    }

    /// Identifiers survive the round trip through the lexer.
    #[test]
    fn identifiers_keep_their_text(name in "[a-z][a-z0-9_]{0,10}") {
        // Keywords and type names lex as their own kinds.
        if TokenKind::from_word(&name).is_none() {
            let (tokens, diagnostics) = tokenize(&name);
            prop_assert!(diagnostics.is_empty());
            prop_assert_eq!(
                &tokens[0].kind,
                &TokenKind::Identifier(name.as_str().into())
            );
        }
    }
}
