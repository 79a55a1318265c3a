// AST (Abstract Syntax Tree) definitions for hatch
//
// Every composite node owns its children outright; nothing is shared and the
// tree is never mutated after the parser returns it.

use super::lexer::{Token, TokenKind};

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Token),
    Group(Box<Expr>),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    Subscript(SubscriptExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: TokenKind,
    pub operand: Box<Expr>,
    pub postfix: bool,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: TokenKind,
    pub right: Box<Expr>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: Box<Expr>,
    pub op: TokenKind,
    pub value: Box<Expr>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpr {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
    pub line: usize,
}

impl Expr {
    /// Source line of the node's operator, or of the literal itself.
    pub fn line(&self) -> usize {
        match self {
            Expr::Literal(token) => token.line,
            Expr::Group(inner) => inner.line(),
            Expr::Unary(e) => e.line,
            Expr::Binary(e) => e.line,
            Expr::Assignment(e) => e.line,
            Expr::Call(e) => e.line,
            Expr::Subscript(e) => e.line,
        }
    }
}

/// Type nodes. Pointer and array wrappers nest without limit.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// A primitive type keyword or an identifier naming a declared type
    Trivial(Token),
    Pointer(Box<Type>),
    Array { element: Box<Type>, size: usize },
}

impl Type {
    /// Innermost trivial token.
    pub fn base(&self) -> &Token {
        match self {
            Type::Trivial(token) => token,
            Type::Pointer(inner) => inner.base(),
            Type::Array { element, .. } => element.base(),
        }
    }
}

/// Variable or parameter declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub specifiers: Vec<TokenKind>,
    pub ty: Type,
    pub identifier: Token,
    pub initializer: Option<Expr>,
}

impl Decl {
    pub fn name(&self) -> &str {
        self.identifier.text().unwrap_or_default()
    }
}

/// Function definition or prototype (`body == None`)
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub specifiers: Vec<TokenKind>,
    pub return_type: Type,
    pub identifier: Token,
    pub params: Vec<Decl>,
    pub body: Option<Vec<Stmt>>,
}

impl FunctionDef {
    pub fn name(&self) -> &str {
        self.identifier.text().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub do_while: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedefDecl {
    pub ty: Type,
    pub alias: Token,
}

/// Class member access qualifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessQualifier {
    Public,
    #[default]
    Private,
    Protected,
}

impl AccessQualifier {
    pub fn from_token(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Public => AccessQualifier::Public,
            TokenKind::Protected => AccessQualifier::Protected,
            _ => AccessQualifier::Private,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessQualifier::Public => "PUBLIC",
            AccessQualifier::Private => "PRIVATE",
            AccessQualifier::Protected => "PROTECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Field(Decl),
    Method(FunctionDef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedMember {
    pub access: AccessQualifier,
    pub is_static: bool,
    pub member: ClassMember,
}

/// Class declaration; `body == None` is a forward declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    pub identifier: Token,
    pub body: Option<Vec<QualifiedMember>>,
}

impl ClassInfo {
    pub fn name(&self) -> &str {
        self.identifier.text().unwrap_or_default()
    }
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Block(Vec<Stmt>),
    Decl(Decl),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Return(Option<Expr>),
    /// `break` or `continue`, keeping the keyword token for diagnostics
    LoopControl(Token),
    FunctionDef(FunctionDef),
    Class(ClassInfo),
    Typedef(TypedefDecl),
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub declarations: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
