//! Generic AST traversal
//!
//! [`AstVisitor`] has one method per node kind, every one of them a no-op by
//! default, so an implementation only overrides what it cares about. The
//! `accept` methods dispatch a node to its specific method and then, for
//! statements and expressions, to the generic [`AstVisitor::visit_stmt`] or
//! [`AstVisitor::visit_expr`]. A program hands each top-level item to
//! `visit_stmt` after `visit_program`. Visitors are not walked into children
//! automatically; a method that wants the subtree calls `accept` on it.

use crate::parser::ast::*;
use crate::parser::lexer::Token;

#[allow(unused_variables)]
pub trait AstVisitor {
    fn visit_program(&mut self, program: &Program) {}

    /// Called for every statement, after its specific method.
    fn visit_stmt(&mut self, stmt: &Stmt) {}
    fn visit_expr_stmt(&mut self, expr: &Expr) {}
    fn visit_block_stmt(&mut self, statements: &[Stmt]) {}
    fn visit_decl_stmt(&mut self, decl: &Decl) {}
    fn visit_if_stmt(&mut self, stmt: &IfStmt) {}
    fn visit_for_stmt(&mut self, stmt: &ForStmt) {}
    fn visit_while_stmt(&mut self, stmt: &WhileStmt) {}
    fn visit_ret_stmt(&mut self, value: Option<&Expr>) {}
    fn visit_loop_ctrl_stmt(&mut self, keyword: &Token) {}
    fn visit_fun_def_stmt(&mut self, def: &FunctionDef) {}
    fn visit_class(&mut self, class: &ClassInfo) {}
    fn visit_typedef(&mut self, typedef: &TypedefDecl) {}

    fn visit_type(&mut self, ty: &Type) {}

    /// Called for every expression, after its specific method.
    fn visit_expr(&mut self, expr: &Expr) {}
    fn visit_literal_expr(&mut self, literal: &Token) {}
    fn visit_group_expr(&mut self, inner: &Expr) {}
    fn visit_unary_expr(&mut self, expr: &UnaryExpr) {}
    fn visit_binary_expr(&mut self, expr: &BinaryExpr) {}
    fn visit_assignment_expr(&mut self, expr: &AssignmentExpr) {}
    fn visit_call_expr(&mut self, expr: &CallExpr) {}
    fn visit_subscript_expr(&mut self, expr: &SubscriptExpr) {}
}

impl Program {
    /// `visit_program`, then the generic `visit_stmt` for each top-level item.
    pub fn accept<V: AstVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_program(self);
        for decl in &self.declarations {
            visitor.visit_stmt(decl);
        }
    }
}

impl Stmt {
    pub fn accept<V: AstVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Stmt::Expression(expr) => visitor.visit_expr_stmt(expr),
            Stmt::Block(statements) => visitor.visit_block_stmt(statements),
            Stmt::Decl(decl) => visitor.visit_decl_stmt(decl),
            Stmt::If(stmt) => visitor.visit_if_stmt(stmt),
            Stmt::For(stmt) => visitor.visit_for_stmt(stmt),
            Stmt::While(stmt) => visitor.visit_while_stmt(stmt),
            Stmt::Return(value) => visitor.visit_ret_stmt(value.as_ref()),
            Stmt::LoopControl(keyword) => visitor.visit_loop_ctrl_stmt(keyword),
            Stmt::FunctionDef(def) => visitor.visit_fun_def_stmt(def),
            Stmt::Class(class) => visitor.visit_class(class),
            Stmt::Typedef(typedef) => visitor.visit_typedef(typedef),
        }
        visitor.visit_stmt(self);
    }
}

impl Expr {
    pub fn accept<V: AstVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Expr::Literal(token) => visitor.visit_literal_expr(token),
            Expr::Group(inner) => visitor.visit_group_expr(inner),
            Expr::Unary(expr) => visitor.visit_unary_expr(expr),
            Expr::Binary(expr) => visitor.visit_binary_expr(expr),
            Expr::Assignment(expr) => visitor.visit_assignment_expr(expr),
            Expr::Call(expr) => visitor.visit_call_expr(expr),
            Expr::Subscript(expr) => visitor.visit_subscript_expr(expr),
        }
        visitor.visit_expr(self);
    }
}

impl Type {
    pub fn accept<V: AstVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_type(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{parse_source, Parser};

    /// Only the generic callbacks, recording what they saw.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl AstVisitor for Recorder {
        fn visit_binary_expr(&mut self, expr: &BinaryExpr) {
            self.events.push(format!("binary {}", expr.op));
            expr.left.accept(self);
            expr.right.accept(self);
        }

        fn visit_expr(&mut self, expr: &Expr) {
            let label = match expr {
                Expr::Literal(_) => "literal",
                Expr::Binary(_) => "binary",
                _ => "other",
            };
            self.events.push(format!("expr {label}"));
        }

        fn visit_stmt(&mut self, _stmt: &Stmt) {
            self.events.push("stmt".to_string());
        }
    }

    /// Counts identifiers across a whole program.
    #[derive(Default)]
    struct IdentifierCounter {
        count: usize,
    }

    impl AstVisitor for IdentifierCounter {
        fn visit_program(&mut self, program: &Program) {
            for decl in &program.declarations {
                decl.accept(self);
            }
        }

        fn visit_fun_def_stmt(&mut self, def: &FunctionDef) {
            for stmt in def.body.iter().flatten() {
                stmt.accept(self);
            }
        }

        fn visit_expr_stmt(&mut self, expr: &Expr) {
            expr.accept(self);
        }

        fn visit_assignment_expr(&mut self, expr: &AssignmentExpr) {
            expr.target.accept(self);
            expr.value.accept(self);
        }

        fn visit_call_expr(&mut self, expr: &CallExpr) {
            expr.callee.accept(self);
            for arg in &expr.args {
                arg.accept(self);
            }
        }

        fn visit_literal_expr(&mut self, literal: &Token) {
            if literal.kind == TokenKind::Identifier {
                self.count += 1;
            }
        }
    }

    struct Silent;
    impl AstVisitor for Silent {}

    #[test]
    fn test_generic_callback_runs_after_specific() {
        let mut parser = Parser::new("1 + 2").unwrap();
        let expr = parser.parse_expression().unwrap();

        let mut recorder = Recorder::default();
        expr.accept(&mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "binary PLUS",
                "expr literal",
                "expr literal",
                "expr binary",
            ]
        );
    }

    #[test]
    fn test_statement_generic_callback() {
        let program = parse_source("x = 1; y = 2;").unwrap();
        let mut recorder = Recorder::default();
        for stmt in &program.declarations {
            stmt.accept(&mut recorder);
        }
        // The default visit_expr_stmt does not descend into the expression.
        assert_eq!(recorder.events, vec!["stmt", "stmt"]);
    }

    #[test]
    fn test_program_reports_each_top_level_item() {
        let program = parse_source("let i32 a; fun void f(); class C").unwrap();
        let mut recorder = Recorder::default();
        program.accept(&mut recorder);
        assert_eq!(recorder.events, vec!["stmt", "stmt", "stmt"]);
    }

    #[test]
    fn test_missing_handlers_are_no_ops() {
        let program = parse_source(
            "class A { let i32 x; } typedef A* P; fun void f() { for (;;) break; }",
        )
        .unwrap();

        let mut silent = Silent;
        program.accept(&mut silent);
        for stmt in &program.declarations {
            stmt.accept(&mut silent);
        }
    }

    #[test]
    fn test_visitor_drives_its_own_descent() {
        let program = parse_source("fun void main() { a = f(b, c); g(); }").unwrap();
        let mut counter = IdentifierCounter::default();
        program.accept(&mut counter);
        assert_eq!(counter.count, 5);
    }

    #[test]
    fn test_dyn_visitor() {
        let program = parse_source("x;").unwrap();
        let mut recorder = Recorder::default();
        let visitor: &mut dyn AstVisitor = &mut recorder;
        program.declarations[0].accept(visitor);
        assert_eq!(recorder.events, vec!["stmt"]);
    }
}
