// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! The Adder type system.
//!
//! Adder has a small, closed set of types sized for 8-bit targets: unsigned
//! and signed 8/16-bit integers, a 12.4 fixed-point type, a 16-bit float,
//! booleans, strings, and fixed-size arrays. Numeric results of binary
//! operations are resolved through a fixed promotion order; there are no
//! user-defined types.

use std::fmt;

/// A type in the Adder language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Unsigned 8-bit integer (0..=255).
    Byte,
    /// Unsigned 16-bit integer (0..=65535).
    Word,
    /// Signed 8-bit integer (-128..=127).
    SByte,
    /// Signed 16-bit integer (-32768..=32767).
    SWord,
    /// 12.4 fixed-point number.
    Fixed,
    /// 16-bit floating point number.
    Float,
    /// Boolean.
    Bool,
    /// Immutable string.
    String,
    /// Absence of a value (function without a return type).
    Void,
    /// Fixed-size array; `size` is `None` while the length is still unknown
    /// (e.g. inferred later from an initializer).
    Array {
        element: Box<Type>,
        size: Option<u16>,
    },
}

/// Promotion order for numeric types; higher wins in binary operations.
const PROMOTION_ORDER: [Type; 6] = [
    Type::Byte,
    Type::SByte,
    Type::Word,
    Type::SWord,
    Type::Fixed,
    Type::Float,
];

impl Type {
    /// Resolves a type-name keyword (`byte`, `word`, ...) to a `Type`.
    ///
    /// Returns `None` for anything that is not one of the eight spellable
    /// type names; `void` and array types have no keyword.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Type> {
        match name {
            "byte" => Some(Type::Byte),
            "word" => Some(Type::Word),
            "sbyte" => Some(Type::SByte),
            "sword" => Some(Type::SWord),
            "fixed" => Some(Type::Fixed),
            "float" => Some(Type::Float),
            "bool" => Some(Type::Bool),
            "string" => Some(Type::String),
            _ => None,
        }
    }

    /// The storage size of a value of this type, in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Type::Byte | Type::SByte | Type::Bool => 1,
            Type::Word | Type::SWord | Type::Fixed | Type::Float | Type::String => 2,
            Type::Void => 0,
            Type::Array { element, size } => {
                element.size() * size.map_or(0, usize::from)
            }
        }
    }

    /// Whether this is one of the four integer types.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Byte | Type::Word | Type::SByte | Type::SWord)
    }

    /// Whether this is any numeric type (integer, fixed, or float).
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Type::Fixed | Type::Float)
    }

    /// Whether values of this type can be negative.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        matches!(self, Type::SByte | Type::SWord | Type::Fixed | Type::Float)
    }

    /// The element type of an array, or `None` for scalars.
    #[must_use]
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Position in the promotion order, or `None` for non-numeric types.
    fn promotion_rank(&self) -> Option<usize> {
        PROMOTION_ORDER.iter().position(|t| t == self)
    }

    /// The result type of a binary arithmetic or bitwise operation.
    ///
    /// Whichever operand's type is higher in the fixed order
    /// `byte < sbyte < word < sword < fixed < float` wins. Non-numeric
    /// operands yield `None`.
    #[must_use]
    pub fn promote(&self, other: &Type) -> Option<Type> {
        let a = self.promotion_rank()?;
        let b = other.promotion_rank()?;
        Some(PROMOTION_ORDER[a.max(b)].clone())
    }

    /// The smallest integer type that fits a non-negative literal value.
    #[must_use]
    pub fn smallest_for(value: u16) -> Type {
        if value <= 255 { Type::Byte } else { Type::Word }
    }

    /// The display name, matching the source-level keyword where one exists.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Type::Byte => "byte".to_string(),
            Type::Word => "word".to_string(),
            Type::SByte => "sbyte".to_string(),
            Type::SWord => "sword".to_string(),
            Type::Fixed => "fixed".to_string(),
            Type::Float => "float".to_string(),
            Type::Bool => "bool".to_string(),
            Type::String => "string".to_string(),
            Type::Void => "void".to_string(),
            Type::Array { element, size } => match size {
                Some(n) => format!("{}[{n}]", element.name()),
                None => format!("{}[]", element.name()),
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_resolves_all_keywords() {
        assert_eq!(Type::from_name("byte"), Some(Type::Byte));
        assert_eq!(Type::from_name("word"), Some(Type::Word));
        assert_eq!(Type::from_name("sbyte"), Some(Type::SByte));
        assert_eq!(Type::from_name("sword"), Some(Type::SWord));
        assert_eq!(Type::from_name("fixed"), Some(Type::Fixed));
        assert_eq!(Type::from_name("float"), Some(Type::Float));
        assert_eq!(Type::from_name("bool"), Some(Type::Bool));
        assert_eq!(Type::from_name("string"), Some(Type::String));
        assert_eq!(Type::from_name("void"), None);
        assert_eq!(Type::from_name("int"), None);
    }

    #[test]
    fn sizes() {
        assert_eq!(Type::Byte.size(), 1);
        assert_eq!(Type::Bool.size(), 1);
        assert_eq!(Type::Word.size(), 2);
        assert_eq!(Type::Fixed.size(), 2);
        assert_eq!(Type::Void.size(), 0);
        let arr = Type::Array {
            element: Box::new(Type::Word),
            size: Some(4),
        };
        assert_eq!(arr.size(), 8);
    }

    #[test]
    fn promotion_higher_operand_wins() {
        assert_eq!(Type::Byte.promote(&Type::Word), Some(Type::Word));
        assert_eq!(Type::Word.promote(&Type::Byte), Some(Type::Word));
        assert_eq!(Type::Byte.promote(&Type::SByte), Some(Type::SByte));
        assert_eq!(Type::SWord.promote(&Type::Fixed), Some(Type::Fixed));
        assert_eq!(Type::Fixed.promote(&Type::Float), Some(Type::Float));
        assert_eq!(Type::Byte.promote(&Type::Byte), Some(Type::Byte));
    }

    #[test]
    fn promotion_rejects_non_numeric() {
        assert_eq!(Type::Bool.promote(&Type::Byte), None);
        assert_eq!(Type::Byte.promote(&Type::String), None);
    }

    #[test]
    fn smallest_integer_fit() {
        assert_eq!(Type::smallest_for(0), Type::Byte);
        assert_eq!(Type::smallest_for(255), Type::Byte);
        assert_eq!(Type::smallest_for(256), Type::Word);
        assert_eq!(Type::smallest_for(65535), Type::Word);
    }

    #[test]
    fn display_names() {
        assert_eq!(Type::SByte.to_string(), "sbyte");
        let arr = Type::Array {
            element: Box::new(Type::Byte),
            size: Some(8),
        };
        assert_eq!(arr.to_string(), "byte[8]");
        let open = Type::Array {
            element: Box::new(Type::Word),
            size: None,
        };
        assert_eq!(open.to_string(), "word[]");
    }
}
