//! S-expression rendering of the AST, for debugging and the `hatch` binary
//!
//! ```text
//! (+ 1 (* 2 3))          binary
//! (++ x) / (x ++)        prefix / postfix unary
//! (ptr i32)              pointer type
//! (let const i32 x 4)    declaration
//! ```
//!
//! The format is a diagnostic aid and may change.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind, TokenValue};
use crate::parser::visitor::AstVisitor;

/// Visitor that accumulates the printed form of whatever it is given.
#[derive(Debug, Default)]
pub struct AstPrinter {
    out: String,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn op(&mut self, kind: TokenKind) {
        self.push(kind.lexeme().unwrap_or_else(|| kind.name()));
    }

    fn specifiers(&mut self, specifiers: &[TokenKind]) {
        for spec in specifiers {
            self.op(*spec);
            self.push(" ");
        }
    }

    /// `(<head> specs type name[ init])`
    fn declarator(&mut self, head: &str, decl: &Decl) {
        self.push("(");
        self.push(head);
        self.push(" ");
        self.specifiers(&decl.specifiers);
        decl.ty.accept(self);
        self.push(" ");
        self.push(decl.name());
        if let Some(init) = &decl.initializer {
            self.push(" ");
            init.accept(self);
        }
        self.push(")");
    }

    fn optional_expr(&mut self, expr: Option<&Expr>) {
        match expr {
            Some(expr) => expr.accept(self),
            None => self.push("_"),
        }
    }
}

impl AstVisitor for AstPrinter {
    fn visit_program(&mut self, program: &Program) {
        for decl in &program.declarations {
            decl.accept(self);
            self.push("\n");
        }
    }

    fn visit_expr_stmt(&mut self, expr: &Expr) {
        self.push("(expr ");
        expr.accept(self);
        self.push(")");
    }

    fn visit_block_stmt(&mut self, statements: &[Stmt]) {
        self.push("(block");
        for stmt in statements {
            self.push(" ");
            stmt.accept(self);
        }
        self.push(")");
    }

    fn visit_decl_stmt(&mut self, decl: &Decl) {
        self.declarator("let", decl);
    }

    fn visit_if_stmt(&mut self, stmt: &IfStmt) {
        self.push("(if ");
        stmt.condition.accept(self);
        self.push(" ");
        stmt.body.accept(self);
        if let Some(else_branch) = &stmt.else_branch {
            self.push(" ");
            else_branch.accept(self);
        }
        self.push(")");
    }

    fn visit_for_stmt(&mut self, stmt: &ForStmt) {
        self.push("(for ");
        match &stmt.init {
            Some(init) => init.accept(self),
            None => self.push("_"),
        }
        self.push(" ");
        self.optional_expr(stmt.condition.as_ref());
        self.push(" ");
        self.optional_expr(stmt.increment.as_ref());
        self.push(" ");
        stmt.body.accept(self);
        self.push(")");
    }

    fn visit_while_stmt(&mut self, stmt: &WhileStmt) {
        if stmt.do_while {
            self.push("(do-while ");
            stmt.body.accept(self);
            self.push(" ");
            stmt.condition.accept(self);
        } else {
            self.push("(while ");
            stmt.condition.accept(self);
            self.push(" ");
            stmt.body.accept(self);
        }
        self.push(")");
    }

    fn visit_ret_stmt(&mut self, value: Option<&Expr>) {
        self.push("(return");
        if let Some(value) = value {
            self.push(" ");
            value.accept(self);
        }
        self.push(")");
    }

    fn visit_loop_ctrl_stmt(&mut self, keyword: &Token) {
        self.push("(");
        self.op(keyword.kind);
        self.push(")");
    }

    fn visit_fun_def_stmt(&mut self, def: &FunctionDef) {
        self.push("(fun ");
        self.specifiers(&def.specifiers);
        def.return_type.accept(self);
        self.push(" ");
        self.push(def.name());
        self.push(" (params");
        for param in &def.params {
            self.push(" ");
            self.declarator("param", param);
        }
        self.push(")");
        if let Some(body) = &def.body {
            self.push(" ");
            self.visit_block_stmt(body);
        }
        self.push(")");
    }

    fn visit_class(&mut self, class: &ClassInfo) {
        self.push("(class ");
        self.push(class.name());
        for member in class.body.iter().flatten() {
            self.push(" (");
            self.push(&member.access.as_str().to_lowercase());
            if member.is_static {
                self.push(" static");
            }
            self.push(" ");
            match &member.member {
                ClassMember::Field(decl) => self.visit_decl_stmt(decl),
                ClassMember::Method(def) => self.visit_fun_def_stmt(def),
            }
            self.push(")");
        }
        self.push(")");
    }

    fn visit_typedef(&mut self, typedef: &TypedefDecl) {
        self.push("(typedef ");
        typedef.ty.accept(self);
        self.push(" ");
        self.push(typedef.alias.text().unwrap_or_default());
        self.push(")");
    }

    fn visit_type(&mut self, ty: &Type) {
        match ty {
            Type::Trivial(token) => self.visit_literal_expr(token),
            Type::Pointer(inner) => {
                self.push("(ptr ");
                inner.accept(self);
                self.push(")");
            }
            Type::Array { element, size } => {
                self.push("(array ");
                element.accept(self);
                self.push(&format!(" {size})"));
            }
        }
    }

    fn visit_literal_expr(&mut self, literal: &Token) {
        match &literal.value {
            TokenValue::Str(s) if literal.kind == TokenKind::String => {
                self.push(&format!("\"{s}\""));
            }
            TokenValue::Str(s) => self.push(s),
            TokenValue::Int(n) => self.push(&n.to_string()),
            TokenValue::Float(x) => self.push(&format!("{x:?}")),
            TokenValue::None => self.op(literal.kind),
        }
    }

    fn visit_group_expr(&mut self, inner: &Expr) {
        self.push("(group ");
        inner.accept(self);
        self.push(")");
    }

    fn visit_unary_expr(&mut self, expr: &UnaryExpr) {
        self.push("(");
        if expr.postfix {
            expr.operand.accept(self);
            self.push(" ");
            self.op(expr.op);
        } else {
            self.op(expr.op);
            self.push(" ");
            expr.operand.accept(self);
        }
        self.push(")");
    }

    fn visit_binary_expr(&mut self, expr: &BinaryExpr) {
        self.push("(");
        self.op(expr.op);
        self.push(" ");
        expr.left.accept(self);
        self.push(" ");
        expr.right.accept(self);
        self.push(")");
    }

    fn visit_assignment_expr(&mut self, expr: &AssignmentExpr) {
        self.push("(");
        self.op(expr.op);
        self.push(" ");
        expr.target.accept(self);
        self.push(" ");
        expr.value.accept(self);
        self.push(")");
    }

    fn visit_call_expr(&mut self, expr: &CallExpr) {
        self.push("(call ");
        expr.callee.accept(self);
        for arg in &expr.args {
            self.push(" ");
            arg.accept(self);
        }
        self.push(")");
    }

    fn visit_subscript_expr(&mut self, expr: &SubscriptExpr) {
        self.push("(index ");
        expr.array.accept(self);
        self.push(" ");
        expr.index.accept(self);
        self.push(")");
    }
}

pub fn print_program(program: &Program) -> String {
    let mut printer = AstPrinter::new();
    program.accept(&mut printer);
    printer.finish()
}

pub fn print_stmt(stmt: &Stmt) -> String {
    let mut printer = AstPrinter::new();
    stmt.accept(&mut printer);
    printer.finish()
}

pub fn print_expr(expr: &Expr) -> String {
    let mut printer = AstPrinter::new();
    expr.accept(&mut printer);
    printer.finish()
}

pub fn print_type(ty: &Type) -> String {
    let mut printer = AstPrinter::new();
    ty.accept(&mut printer);
    printer.finish()
}
