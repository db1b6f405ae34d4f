// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Abstract syntax tree for the Adder language.
//!
//! A [`Program`] owns an ordered list of top-level items; each node owns its
//! children and carries a [`Span`] covering its full source extent. The
//! parser guarantees that a node's span contains the spans of all its
//! children and that sibling spans are source-ordered.
//!
//! Error recovery is represented in the tree itself: [`StatementKind::Error`]
//! and [`ExpressionKind::Error`] are placeholders substituted where a
//! production failed, so downstream passes never see a malformed tree.

use ecow::EcoString;
use std::fmt;

use crate::source_analysis::Span;
use crate::types::Type;

/// A complete parsed document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub items: Vec<TopLevelItem>,
}

/// A declaration at file scope.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelItem {
    Function(FunctionDef),
    Variable(VarDecl),
    Constant(ConstDecl),
    Data(DataBlock),
}

impl TopLevelItem {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            TopLevelItem::Function(f) => f.span,
            TopLevelItem::Variable(v) => v.span,
            TopLevelItem::Constant(c) => c.span,
            TopLevelItem::Data(d) => d.span,
        }
    }

    /// The declared name of this item.
    #[must_use]
    pub fn name(&self) -> &Identifier {
        match self {
            TopLevelItem::Function(f) => &f.name,
            TopLevelItem::Variable(v) => &v.name,
            TopLevelItem::Constant(c) => &c.name,
            TopLevelItem::Data(d) => &d.name,
        }
    }
}

/// An identifier with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: EcoString,
    pub span: Span,
}

impl Identifier {
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A function definition: `def name(params) [-> type]:` + body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    /// `None` for functions without a `->` clause (void).
    pub return_type: Option<Type>,
    pub body: Block,
    pub span: Span,
}

/// A function parameter: `name: type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub ty: Type,
    pub span: Span,
}

/// An indented statement block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// A variable declaration: `name: type = expr`.
///
/// `ty` is `None` when the annotation was missing; the parser reports that
/// but keeps the declaration so analysis and editor features continue.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Identifier,
    pub ty: Option<Type>,
    pub initializer: Option<Expression>,
    pub span: Span,
}

/// A constant declaration: `NAME: type = expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Identifier,
    pub ty: Option<Type>,
    pub value: Expression,
    pub span: Span,
}

/// A named block of raw bytes: `data NAME:` entries `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBlock {
    pub name: Identifier,
    pub entries: Vec<DataEntry>,
    pub span: Span,
}

impl DataBlock {
    /// Total byte size of all inline entries; included files contribute
    /// their declared length when one is given, otherwise nothing (the size
    /// is only known at link time).
    #[must_use]
    pub fn known_size(&self) -> usize {
        self.entries
            .iter()
            .map(|e| match e {
                DataEntry::Bytes { values, .. } => values.len(),
                DataEntry::Include { length, .. } => {
                    length.map_or(0, |l| l as usize)
                }
            })
            .sum()
    }
}

/// One entry in a data block.
#[derive(Debug, Clone, PartialEq)]
pub enum DataEntry {
    /// A comma-separated run of literal byte values.
    Bytes { values: Vec<u8>, span: Span },
    /// `include "path"[, offset[, length]]`.
    Include {
        path: EcoString,
        offset: Option<u32>,
        length: Option<u32>,
        span: Span,
    },
}

impl DataEntry {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            DataEntry::Bytes { span, .. } | DataEntry::Include { span, .. } => *span,
        }
    }
}

/// A statement with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    #[must_use]
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    VarDecl(VarDecl),
    ConstDecl(ConstDecl),
    Assignment {
        target: AssignTarget,
        op: AssignOp,
        value: Expression,
    },
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Return(Option<Expression>),
    Break,
    Continue,
    Pass,
    Expression(Expression),
    /// Placeholder left behind by error recovery.
    Error,
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Variable(Identifier),
    /// `name[index]`.
    Element {
        name: Identifier,
        index: Expression,
        span: Span,
    },
}

impl AssignTarget {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            AssignTarget::Variable(ident) => ident.span,
            AssignTarget::Element { span, .. } => *span,
        }
    }

    /// The assigned variable's name.
    #[must_use]
    pub fn name(&self) -> &Identifier {
        match self {
            AssignTarget::Variable(ident) => ident,
            AssignTarget::Element { name, .. } => name,
        }
    }
}

/// Plain `=` or one of the compound assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl AssignOp {
    /// The binary operation a compound assignment applies, or `None` for
    /// plain `=`.
    #[must_use]
    pub fn binary_op(self) -> Option<BinaryOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::Add => Some(BinaryOp::Add),
            AssignOp::Sub => Some(BinaryOp::Sub),
            AssignOp::Mul => Some(BinaryOp::Mul),
            AssignOp::Div => Some(BinaryOp::Div),
            AssignOp::Mod => Some(BinaryOp::Mod),
            AssignOp::BitAnd => Some(BinaryOp::BitAnd),
            AssignOp::BitOr => Some(BinaryOp::BitOr),
            AssignOp::BitXor => Some(BinaryOp::BitXor),
            AssignOp::Shl => Some(BinaryOp::Shl),
            AssignOp::Shr => Some(BinaryOp::Shr),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_block: Block,
    pub elif_branches: Vec<ElifBranch>,
    pub else_block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElifBranch {
    pub condition: Expression,
    pub block: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Block,
}

/// `for v in start to end:` (or `downto` for descending loops).
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub variable: Identifier,
    pub start: Expression,
    pub end: Expression,
    pub descending: bool,
    pub body: Block,
}

/// An expression with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    #[must_use]
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The placeholder expression substituted during error recovery.
    #[must_use]
    pub fn error(span: Span) -> Self {
        Self::new(ExpressionKind::Error, span)
    }

    /// Whether this node (or its grouped payload) is an identifier with the
    /// given name. Used by inlay hints to suppress redundant labels.
    #[must_use]
    pub fn is_identifier_named(&self, name: &str) -> bool {
        match &self.kind {
            ExpressionKind::Identifier(n) => n == name,
            ExpressionKind::Grouped(inner) => inner.is_identifier_named(name),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Integer(u16),
    /// Decimal literal text as written (`"3.14"`).
    Decimal(EcoString),
    String(EcoString),
    Char(char),
    Bool(bool),
    Identifier(EcoString),
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Call {
        callee: Identifier,
        arguments: Vec<Expression>,
    },
    Index {
        name: Identifier,
        index: Box<Expression>,
    },
    /// Explicit cast `typename(expr)`, recognized at parse time.
    Cast {
        target: Type,
        operand: Box<Expression>,
    },
    ArrayLiteral(Vec<Expression>),
    Grouped(Box<Expression>),
    /// Placeholder left behind by error recovery.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Whether this operator always yields `bool`.
    #[must_use]
    pub fn yields_bool(self) -> bool {
        matches!(
            self,
            BinaryOp::Or
                | BinaryOp::And
                | BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::Le
                | BinaryOp::Ge
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation `-`.
    Negate,
    /// Logical `not`.
    Not,
    /// Bitwise complement `~`.
    BitNot,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "not",
            UnaryOp::BitNot => "~",
        };
        f.write_str(s)
    }
}
