//! Typed intermediate representation of generated TypeScript
//!
//! Synthesis code builds these nodes; [`crate::printer`] is the only place
//! that turns them into source text.

use serde_json::Value;

/// A complete generated source unit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Leading line comment
    pub header: Option<String>,
    pub items: Vec<Item>,
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Import(ImportDecl),
    TypeAlias(TypeAlias),
    Class(ClassDecl),
    Const(ConstDecl),
}

/// `import { A, type B } from 'source';` or `import * as ns from 'source';`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub specifiers: ImportSpecifiers,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifiers {
    Named(Vec<ImportName>),
    Namespace(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportName {
    pub name: String,
    pub type_only: bool,
}

impl ImportDecl {
    /// `import { name } from 'source';`
    pub fn named(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            specifiers: ImportSpecifiers::Named(vec![ImportName {
                name: name.into(),
                type_only: false,
            }]),
            source: source.into(),
        }
    }

    /// `import { type name } from 'source';`
    pub fn type_only(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            specifiers: ImportSpecifiers::Named(vec![ImportName {
                name: name.into(),
                type_only: true,
            }]),
            source: source.into(),
        }
    }

    /// `import * as alias from 'source';`
    pub fn namespace(alias: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            specifiers: ImportSpecifiers::Namespace(alias.into()),
            source: source.into(),
        }
    }
}

/// Type expression
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Named type (`string`, `RequestOptions`)
    Named(String),

    /// Generic application (`Promise<Notification>`)
    Generic { name: String, args: Vec<TypeExpr> },

    /// `A | B`
    Union(Vec<TypeExpr>),

    /// `typeof schemas.NotificationSchema`
    TypeOf(String),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn generic(name: impl Into<String>, arg: TypeExpr) -> Self {
        TypeExpr::Generic {
            name: name.into(),
            args: vec![arg],
        }
    }
}

/// `type Name = Type;`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    pub ty: TypeExpr,
    pub exported: bool,
}

/// `export const Name = <literal> as const;`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: String,
    pub value: Value,
}

/// `export class Name extends Base { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub extends: Option<String>,
    pub members: Vec<ClassMember>,
}

/// Class body member
#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    /// `name = value;`
    Property { name: String, value: Expr },

    /// Overload declaration without a body
    Declaration(MethodSignature),

    /// Method with a body
    Method {
        signature: MethodSignature,
        body: Vec<Stmt>,
    },
}

/// Method name, parameters and return type, with an optional doc comment
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub doc: Option<DocComment>,
    pub name: String,
    pub params: Vec<Param>,
    pub returns: TypeExpr,
}

/// `name?: Type`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeExpr,
    pub optional: bool,
}

impl Param {
    pub fn required(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }
}

/// JSDoc block; an empty line renders as a bare ` *`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocComment {
    pub lines: Vec<String>,
}

/// Statement inside a method body
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Return(Expr),
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Bare identifier or dotted path (`this.request`, `options`)
    Ident(String),

    Str(String),

    Bool(bool),

    /// `{ key: value }` with properties in insertion order
    Object(Vec<(String, Expr)>),

    Call { callee: Box<Expr>, args: Vec<Expr> },

    New { callee: String, args: Vec<Expr> },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(Expr::Ident(callee.into())),
            args,
        }
    }
}
