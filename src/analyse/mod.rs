// Copyright 2026 The Adder Project Authors
// SPDX-License-Identifier: Apache-2.0

//! Semantic analysis.
//!
//! [`analyze`] walks a parsed [`Program`] in two passes. The first pass
//! registers every top-level name (functions, globals, constants, data
//! blocks) so that forward references work; the second pass walks function
//! bodies and initializers, resolving names against the scope chain and
//! inferring a type for every expression.
//!
//! Analysis is total: unresolved names are reported and degrade to `byte`
//! so that downstream consumers (editor services in particular) always get
//! a type for every expression.

pub mod builtins;
mod expressions;
mod scope;

use std::collections::HashMap;

use ecow::EcoString;

use crate::ast::{
    AssignTarget, Block, DataEntry, Expression, FunctionDef, Program, Statement, StatementKind,
    TopLevelItem,
};
use crate::source_analysis::{Diagnostic, DiagnosticCode, Span};
use crate::types::Type;

pub use scope::{ScopeChain, Symbol, SymbolKind};

/// One parameter of a known function.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    pub name: EcoString,
    pub ty: Type,
}

/// Everything the analyzer knows about one function, built-in or user
/// defined.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    pub name: EcoString,
    pub parameters: Vec<ParamInfo>,
    /// [`Type::Void`] for procedures.
    pub return_type: Type,
    /// Span of the whole definition; empty for built-ins.
    pub span: Span,
    /// Span of just the name, the go-to-definition target.
    pub name_span: Span,
    pub builtin: bool,
    pub doc: Option<EcoString>,
    /// Parameters and locals declared in the body, in declaration order.
    pub locals: Vec<Symbol>,
}

/// The result of analyzing a program.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub diagnostics: Vec<Diagnostic>,
    /// User-declared globals, constants, and data blocks in source order.
    pub globals: Vec<Symbol>,
    /// Built-in functions first, then user functions in source order.
    pub functions: Vec<FunctionInfo>,
    /// Inferred type of every analyzed expression, keyed by span.
    pub expression_types: HashMap<Span, Type>,
}

impl Analysis {
    /// Looks up a function by name. User functions come after the built-ins
    /// in the table, so a user definition wins.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.iter().rev().find(|f| f.name == name)
    }

    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Symbol> {
        self.globals.iter().find(|s| s.name == name)
    }

    /// The inferred type of the expression at `span`, if it was analyzed.
    #[must_use]
    pub fn type_of(&self, span: Span) -> Option<&Type> {
        self.expression_types.get(&span)
    }
}

/// Analyzes a program.
///
/// Never fails; problems are reported through [`Analysis::diagnostics`].
///
/// # Examples
///
/// ```
/// use adder_core::analyse::analyze;
/// use adder_core::source_analysis::{parse, tokenize};
///
/// let (tokens, _) = tokenize("def main():\n    x: byte = 1\n");
/// let (program, _) = parse(tokens);
/// let analysis = analyze(&program);
/// assert!(analysis.diagnostics.is_empty());
/// ```
#[must_use]
pub fn analyze(program: &Program) -> Analysis {
    let mut analyzer = Analyzer::new();
    analyzer.register_top_level(program);
    analyzer.check_main(program);
    analyzer.walk_bodies(program);
    analyzer.finish()
}

pub(crate) struct Analyzer {
    pub(crate) scopes: ScopeChain,
    functions: Vec<FunctionInfo>,
    globals: Vec<Symbol>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) expression_types: HashMap<Span, Type>,
    loop_depth: usize,
    /// Return type of the function currently being analyzed.
    current_return: Type,
    /// Locals collected for the function currently being analyzed.
    current_locals: Vec<Symbol>,
}

impl Analyzer {
    fn new() -> Self {
        let mut scopes = ScopeChain::new();
        for constant in builtins::CONSTANTS {
            scopes.define(Symbol::builtin_constant(constant.name, constant.ty.clone()));
        }
        let functions = builtins::FUNCTIONS
            .iter()
            .map(|f| FunctionInfo {
                name: f.name.into(),
                parameters: f
                    .parameters
                    .iter()
                    .map(|(name, ty)| ParamInfo {
                        name: (*name).into(),
                        ty: ty.clone(),
                    })
                    .collect(),
                return_type: f.return_type.clone(),
                span: Span::point(0),
                name_span: Span::point(0),
                builtin: true,
                doc: Some(f.doc.into()),
                locals: Vec::new(),
            })
            .collect();
        Self {
            scopes,
            functions,
            globals: Vec::new(),
            diagnostics: Vec::new(),
            expression_types: HashMap::new(),
            loop_depth: 0,
            current_return: Type::Void,
            current_locals: Vec::new(),
        }
    }

    fn finish(self) -> Analysis {
        Analysis {
            diagnostics: self.diagnostics,
            globals: self.globals,
            functions: self.functions,
            expression_types: self.expression_types,
        }
    }

    pub(crate) fn error(
        &mut self,
        code: DiagnosticCode,
        message: impl Into<EcoString>,
        span: Span,
    ) {
        self.diagnostics.push(Diagnostic::error(code, message, span));
    }

    pub(crate) fn warning(
        &mut self,
        code: DiagnosticCode,
        message: impl Into<EcoString>,
        span: Span,
    ) {
        self.diagnostics
            .push(Diagnostic::warning(code, message, span));
    }

    pub(crate) fn function_info(&self, name: &str) -> Option<&FunctionInfo> {
        // User functions are appended after the built-ins and win lookups.
        self.functions.iter().rev().find(|f| f.name == name)
    }

    // ========================================================================
    // Pass 1: top-level registration
    // ========================================================================

    fn register_top_level(&mut self, program: &Program) {
        for item in &program.items {
            match item {
                TopLevelItem::Function(f) => self.register_function(f),
                TopLevelItem::Variable(v) => {
                    let ty = v
                        .ty
                        .clone()
                        .or_else(|| v.initializer.as_ref().and_then(Self::shallow_type))
                        .unwrap_or(Type::Byte);
                    let symbol =
                        Symbol::new(v.name.name.clone(), SymbolKind::Variable, ty, v.name.span);
                    self.register_global(symbol);
                }
                TopLevelItem::Constant(c) => {
                    let ty = c
                        .ty
                        .clone()
                        .or_else(|| Self::shallow_type(&c.value))
                        .unwrap_or(Type::Byte);
                    let symbol =
                        Symbol::new(c.name.name.clone(), SymbolKind::Constant, ty, c.name.span);
                    self.register_global(symbol);
                }
                TopLevelItem::Data(d) => {
                    let size = data_block_size(&d.entries);
                    let ty = Type::Array {
                        element: Box::new(Type::Byte),
                        size,
                    };
                    let symbol =
                        Symbol::new(d.name.name.clone(), SymbolKind::DataBlock, ty, d.name.span);
                    self.register_global(symbol);
                }
            }
        }
    }

    fn register_function(&mut self, f: &FunctionDef) {
        if builtins::function(&f.name.name).is_some() {
            self.error(
                DiagnosticCode::BuiltinRedefinition,
                format!("'{}' is a built-in function and cannot be redefined", f.name.name),
                f.name.span,
            );
            return;
        }
        if self.function_info(&f.name.name).is_some_and(|i| !i.builtin) {
            self.error(
                DiagnosticCode::DuplicateDefinition,
                format!("function '{}' is defined more than once", f.name.name),
                f.name.span,
            );
            return;
        }
        self.functions.push(FunctionInfo {
            name: f.name.name.clone(),
            parameters: f
                .parameters
                .iter()
                .map(|p| ParamInfo {
                    name: p.name.name.clone(),
                    ty: p.ty.clone(),
                })
                .collect(),
            return_type: f.return_type.clone().unwrap_or(Type::Void),
            span: f.span,
            name_span: f.name.span,
            builtin: false,
            doc: None,
            locals: Vec::new(),
        });
    }

    fn register_global(&mut self, symbol: Symbol) {
        if let Some(previous) = self.scopes.define(symbol.clone()) {
            if previous.builtin {
                self.warning(
                    DiagnosticCode::ShadowedName,
                    format!("'{}' shadows a built-in constant", symbol.name),
                    symbol.span,
                );
            } else {
                self.error(
                    DiagnosticCode::DuplicateDefinition,
                    format!("'{}' is defined more than once", symbol.name),
                    symbol.span,
                );
                return;
            }
        }
        self.globals.push(symbol);
    }

    /// Literal-only type guess used during registration, before the full
    /// inference of pass 2 runs.
    fn shallow_type(expr: &Expression) -> Option<Type> {
        use crate::ast::ExpressionKind;
        match &expr.kind {
            ExpressionKind::Integer(value) => Some(Type::smallest_for(*value)),
            ExpressionKind::Decimal(_) => Some(Type::Float),
            ExpressionKind::String(_) => Some(Type::String),
            ExpressionKind::Char(_) => Some(Type::Byte),
            ExpressionKind::Bool(_) => Some(Type::Bool),
            ExpressionKind::ArrayLiteral(elements) => Some(Type::Array {
                element: Box::new(
                    elements.first().and_then(Self::shallow_type).unwrap_or(Type::Byte),
                ),
                size: u16::try_from(elements.len()).ok(),
            }),
            ExpressionKind::Grouped(inner) => Self::shallow_type(inner),
            _ => None,
        }
    }

    fn check_main(&mut self, program: &Program) {
        let main = self
            .function_info("main")
            .filter(|info| !info.builtin)
            .map(|info| (info.parameters.is_empty(), info.name_span));
        match main {
            Some((true, _)) => {}
            Some((false, name_span)) => {
                self.error(
                    DiagnosticCode::MissingMain,
                    "'main' must not take parameters",
                    name_span,
                );
            }
            None => {
                let span = program
                    .items
                    .first()
                    .map_or(Span::point(0), |item| Span::point(item.span().start()));
                self.error(
                    DiagnosticCode::MissingMain,
                    "program has no 'main' function",
                    span,
                );
            }
        }
    }

    // ========================================================================
    // Pass 2: bodies and initializers
    // ========================================================================

    fn walk_bodies(&mut self, program: &Program) {
        for item in &program.items {
            match item {
                TopLevelItem::Function(f) => self.walk_function(f),
                TopLevelItem::Variable(v) => {
                    if let Some(initializer) = &v.initializer {
                        let inferred = self.infer_expression(initializer);
                        match &v.ty {
                            Some(declared) => {
                                self.check_initializer(initializer, declared, &inferred);
                            }
                            None => self.update_global_type(&v.name.name, inferred),
                        }
                    }
                }
                TopLevelItem::Constant(c) => {
                    let inferred = self.infer_expression(&c.value);
                    match &c.ty {
                        Some(declared) => self.check_initializer(&c.value, declared, &inferred),
                        None => self.update_global_type(&c.name.name, inferred),
                    }
                }
                TopLevelItem::Data(_) => {}
            }
        }
    }

    /// Retypes a global declared without an annotation once its initializer
    /// has been inferred.
    fn update_global_type(&mut self, name: &str, ty: Type) {
        if let Some(symbol) = self.globals.iter_mut().find(|s| s.name == name) {
            symbol.ty = ty.clone();
            let updated = symbol.clone();
            self.scopes.define(updated);
        }
    }

    fn walk_function(&mut self, f: &FunctionDef) {
        // Redefinitions were rejected in pass 1 and have no body to check.
        let Some(info) = self.function_info(&f.name.name) else {
            return;
        };
        if info.builtin || info.name_span != f.name.span {
            return;
        }

        self.scopes.push();
        self.current_return = f.return_type.clone().unwrap_or(Type::Void);
        self.current_locals = Vec::new();
        self.loop_depth = 0;

        for parameter in &f.parameters {
            let symbol = Symbol::new(
                parameter.name.name.clone(),
                SymbolKind::Parameter,
                parameter.ty.clone(),
                parameter.name.span,
            );
            self.declare_local(symbol);
        }

        self.walk_block(&f.body);
        self.scopes.pop();

        let locals = std::mem::take(&mut self.current_locals);
        if let Some(info) = self
            .functions
            .iter_mut()
            .find(|i| !i.builtin && i.name_span == f.name.span)
        {
            info.locals = locals;
        }
    }

    /// Defines a symbol in the innermost scope with duplicate and shadowing
    /// checks, and records it as a local of the current function.
    fn declare_local(&mut self, symbol: Symbol) {
        if self.scopes.shadows(&symbol.name) {
            self.warning(
                DiagnosticCode::ShadowedName,
                format!("'{}' shadows a name from an enclosing scope", symbol.name),
                symbol.span,
            );
        }
        if let Some(previous) = self.scopes.define(symbol.clone()) {
            if !previous.builtin {
                self.error(
                    DiagnosticCode::DuplicateDefinition,
                    format!("'{}' is defined more than once in this scope", symbol.name),
                    symbol.span,
                );
                return;
            }
        }
        self.current_locals.push(symbol);
    }

    fn walk_block(&mut self, block: &Block) {
        for statement in &block.statements {
            self.walk_statement(statement);
        }
    }

    fn walk_statement(&mut self, statement: &Statement) {
        match &statement.kind {
            StatementKind::VarDecl(v) => {
                let inferred = v.initializer.as_ref().map(|e| self.infer_expression(e));
                let ty = match (&v.ty, inferred) {
                    (Some(declared), Some(inferred)) => {
                        if let Some(initializer) = &v.initializer {
                            self.check_initializer(initializer, declared, &inferred);
                        }
                        declared.clone()
                    }
                    (Some(declared), None) => declared.clone(),
                    (None, Some(inferred)) => inferred,
                    (None, None) => Type::Byte,
                };
                let symbol = Symbol::new(v.name.name.clone(), SymbolKind::Variable, ty, v.name.span);
                self.declare_local(symbol);
            }
            StatementKind::ConstDecl(c) => {
                let inferred = self.infer_expression(&c.value);
                let ty = match &c.ty {
                    Some(declared) => {
                        self.check_initializer(&c.value, declared, &inferred);
                        declared.clone()
                    }
                    None => inferred,
                };
                let symbol = Symbol::new(c.name.name.clone(), SymbolKind::Constant, ty, c.name.span);
                self.declare_local(symbol);
            }
            StatementKind::Assignment { target, op, value } => {
                self.walk_assignment(target, *op, value);
            }
            // `if` and `while` bodies analyze in the enclosing scope:
            // variables have one region per function, and indentation alone
            // does not open an analyzer scope.
            StatementKind::If(if_statement) => {
                self.infer_expression(&if_statement.condition);
                self.walk_block(&if_statement.then_block);
                for branch in &if_statement.elif_branches {
                    self.infer_expression(&branch.condition);
                    self.walk_block(&branch.block);
                }
                if let Some(else_block) = &if_statement.else_block {
                    self.walk_block(else_block);
                }
            }
            StatementKind::While(while_statement) => {
                self.infer_expression(&while_statement.condition);
                self.loop_depth += 1;
                self.walk_block(&while_statement.body);
                self.loop_depth -= 1;
            }
            StatementKind::For(for_statement) => {
                self.infer_expression(&for_statement.start);
                self.infer_expression(&for_statement.end);
                // The loop scope holds only the counter, which is always a
                // byte regardless of the range expressions.
                self.scopes.push();
                let symbol = Symbol::new(
                    for_statement.variable.name.clone(),
                    SymbolKind::Variable,
                    Type::Byte,
                    for_statement.variable.span,
                );
                self.declare_local(symbol);
                self.loop_depth += 1;
                self.walk_block(&for_statement.body);
                self.loop_depth -= 1;
                self.scopes.pop();
            }
            StatementKind::Return(value) => {
                if let Some(value) = value {
                    let ty = self.infer_expression(value);
                    if self.current_return == Type::Void {
                        self.error(
                            DiagnosticCode::ReturnValueInVoidFunction,
                            "this function has no return type but returns a value",
                            value.span,
                        );
                    } else {
                        let expected = self.current_return.clone();
                        self.check_initializer(value, &expected, &ty);
                    }
                }
            }
            StatementKind::Break => {
                if self.loop_depth == 0 {
                    self.error(
                        DiagnosticCode::BreakOutsideLoop,
                        "'break' outside of a loop",
                        statement.span,
                    );
                }
            }
            StatementKind::Continue => {
                if self.loop_depth == 0 {
                    self.error(
                        DiagnosticCode::ContinueOutsideLoop,
                        "'continue' outside of a loop",
                        statement.span,
                    );
                }
            }
            StatementKind::Expression(expr) => {
                self.infer_expression(expr);
            }
            StatementKind::Pass | StatementKind::Error => {}
        }
    }

    fn walk_assignment(
        &mut self,
        target: &AssignTarget,
        op: crate::ast::AssignOp,
        value: &Expression,
    ) {
        let value_ty = self.infer_expression(value);
        match target {
            AssignTarget::Variable(name) => {
                let Some(symbol) = self.scopes.lookup(&name.name).cloned() else {
                    self.error(
                        DiagnosticCode::UndefinedVariable,
                        format!("'{}' is not defined", name.name),
                        name.span,
                    );
                    return;
                };
                if symbol.is_immutable() {
                    self.error(
                        DiagnosticCode::AssignmentToConstant,
                        format!("cannot assign to constant '{}'", name.name),
                        name.span,
                    );
                }
                self.check_assignment_value(op, value, &symbol.ty, &value_ty);
            }
            AssignTarget::Element { name, index, span } => {
                let index_ty = self.infer_expression(index);
                if !index_ty.is_integer() {
                    self.warning(
                        DiagnosticCode::PrecisionLoss,
                        format!("array index has type {index_ty}, expected an integer"),
                        index.span,
                    );
                }
                let Some(symbol) = self.scopes.lookup(&name.name).cloned() else {
                    self.error(
                        DiagnosticCode::UndefinedVariable,
                        format!("'{}' is not defined", name.name),
                        name.span,
                    );
                    return;
                };
                if symbol.is_immutable() {
                    self.error(
                        DiagnosticCode::AssignmentToConstant,
                        format!("cannot assign to '{}'", name.name),
                        name.span,
                    );
                }
                match symbol.ty.element_type() {
                    Some(element) => {
                        let element = element.clone();
                        self.check_assignment_value(op, value, &element, &value_ty);
                    }
                    None => {
                        self.error(
                            DiagnosticCode::NotAnArray,
                            format!("'{}' has type {} and cannot be indexed", name.name, symbol.ty),
                            *span,
                        );
                    }
                }
            }
        }
    }

    fn check_assignment_value(
        &mut self,
        op: crate::ast::AssignOp,
        value: &Expression,
        target_ty: &Type,
        value_ty: &Type,
    ) {
        self.check_initializer(value, target_ty, value_ty);
        if op.binary_op().is_some()
            && target_ty.is_integer()
            && value_ty.is_integer()
            && target_ty.is_signed() != value_ty.is_signed()
        {
            self.warning(
                DiagnosticCode::SignednessMix,
                format!("mixing {target_ty} and {value_ty} in a compound assignment"),
                value.span,
            );
        }
    }
}

/// Total size of a data block, when every entry's size is known.
fn data_block_size(entries: &[DataEntry]) -> Option<u16> {
    let mut total: usize = 0;
    for entry in entries {
        match entry {
            DataEntry::Bytes { values, .. } => total += values.len(),
            DataEntry::Include { length, .. } => total += (*length)? as usize,
        }
    }
    u16::try_from(total).ok()
}
