//! Shared helpers for the integration tests: an id-assigning tree
//! builder standing in for the external front end, and a capture-friendly
//! output channel.

#![allow(dead_code)]

use minic::ast::{
    BinOp, DeclId, Expr, ExprId, ExprKind, FuncDecl, Param, Program, Stmt, TopLevel, Type, UnOp,
    VarDecl,
};
use minic::interp::{InterpResult, Interpreter, Value};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Builds program trees by hand, assigning fresh node and declaration
/// identities the way a front end would
pub struct TreeBuilder {
    next_expr: u32,
    next_decl: u32,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            next_expr: 0,
            next_decl: 0,
        }
    }

    pub fn fresh_decl(&mut self) -> DeclId {
        let id = DeclId(self.next_decl);
        self.next_decl += 1;
        id
    }

    fn node(&mut self, ty: Type, kind: ExprKind) -> Expr {
        let id = ExprId(self.next_expr);
        self.next_expr += 1;
        Expr { id, ty, kind }
    }

    pub fn int(&mut self, n: i64) -> Expr {
        self.node(Type::Int, ExprKind::IntLit(n))
    }

    pub fn ch(&mut self, c: char) -> Expr {
        self.node(Type::Char, ExprKind::CharLit(c))
    }

    pub fn var(&mut self, decl: DeclId, name: &str, ty: Type) -> Expr {
        self.node(
            ty,
            ExprKind::Var {
                decl,
                name: name.to_string(),
            },
        )
    }

    pub fn bin(&mut self, op: BinOp, left: Expr, right: Expr) -> Expr {
        let ty = if left.ty.is_address() && matches!(op, BinOp::Add | BinOp::Sub) {
            left.ty.clone()
        } else {
            Type::Int
        };
        self.node(
            ty,
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn assign(&mut self, target: Expr, value: Expr) -> Expr {
        let ty = target.ty.clone();
        self.node(
            ty,
            ExprKind::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
        )
    }

    pub fn index(&mut self, base: Expr, index: Expr) -> Expr {
        self.node(
            Type::Int,
            ExprKind::Index {
                base: Box::new(base),
                index: Box::new(index),
            },
        )
    }

    pub fn deref(&mut self, operand: Expr) -> Expr {
        self.node(
            Type::Int,
            ExprKind::Unary {
                op: UnOp::Deref,
                operand: Box::new(operand),
            },
        )
    }

    pub fn addr_of(&mut self, operand: Expr) -> Expr {
        let ty = Type::Ptr(Box::new(operand.ty.clone()));
        self.node(
            ty,
            ExprKind::Unary {
                op: UnOp::AddrOf,
                operand: Box::new(operand),
            },
        )
    }

    pub fn neg(&mut self, operand: Expr) -> Expr {
        self.node(
            Type::Int,
            ExprKind::Unary {
                op: UnOp::Neg,
                operand: Box::new(operand),
            },
        )
    }

    pub fn plus(&mut self, operand: Expr) -> Expr {
        self.node(
            Type::Int,
            ExprKind::Unary {
                op: UnOp::Plus,
                operand: Box::new(operand),
            },
        )
    }

    pub fn paren(&mut self, inner: Expr) -> Expr {
        let ty = inner.ty.clone();
        self.node(ty, ExprKind::Paren(Box::new(inner)))
    }

    pub fn cast(&mut self, to: Type, operand: Expr) -> Expr {
        self.node(
            to.clone(),
            ExprKind::Cast {
                to,
                operand: Box::new(operand),
            },
        )
    }

    pub fn sizeof(&mut self, ty: Type) -> Expr {
        self.node(Type::Int, ExprKind::Sizeof(ty))
    }

    pub fn call(&mut self, callee: &str, args: Vec<Expr>) -> Expr {
        self.node(
            Type::Int,
            ExprKind::Call {
                callee: callee.to_string(),
                args,
            },
        )
    }

    pub fn scalar(&mut self, name: &str, ty: Type, init: Option<Expr>) -> VarDecl {
        VarDecl {
            id: self.fresh_decl(),
            name: name.to_string(),
            ty,
            init,
        }
    }

    pub fn int_array(&mut self, name: &str, len: usize) -> VarDecl {
        VarDecl {
            id: self.fresh_decl(),
            name: name.to_string(),
            ty: Type::Array(Box::new(Type::Int), len),
            init: None,
        }
    }

    pub fn param(&mut self, name: &str, ty: Type) -> Param {
        Param {
            id: self.fresh_decl(),
            name: name.to_string(),
            ty,
        }
    }
}

// Statement shorthands

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr(expr)
}

pub fn decl_stmt(vars: Vec<VarDecl>) -> Stmt {
    Stmt::Decl(vars)
}

pub fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt::Block(stmts)
}

pub fn ret(expr: Expr) -> Stmt {
    Stmt::Return(Some(expr))
}

pub fn if_then(cond: Expr, then_branch: Stmt) -> Stmt {
    Stmt::If {
        cond,
        then_branch: Box::new(then_branch),
        else_branch: None,
    }
}

pub fn if_else(cond: Expr, then_branch: Stmt, else_branch: Stmt) -> Stmt {
    Stmt::If {
        cond,
        then_branch: Box::new(then_branch),
        else_branch: Some(Box::new(else_branch)),
    }
}

pub fn while_loop(cond: Expr, body: Stmt) -> Stmt {
    Stmt::While {
        cond,
        body: Box::new(body),
    }
}

pub fn for_loop(init: Stmt, cond: Expr, step: Expr, body: Stmt) -> Stmt {
    Stmt::For {
        init: Some(Box::new(init)),
        cond: Some(cond),
        step: Some(step),
        body: Box::new(body),
    }
}

// Program assembly

/// The extern declarations every test program starts with
pub fn extern_builtins() -> Vec<TopLevel> {
    ["GET", "PRINT", "MALLOC", "FREE"]
        .iter()
        .map(|name| {
            TopLevel::Func(FuncDecl {
                name: name.to_string(),
                params: vec![],
                ret_ty: Type::Int,
                body: None,
            })
        })
        .collect()
}

pub fn func(name: &str, params: Vec<Param>, body: Vec<Stmt>) -> TopLevel {
    TopLevel::Func(FuncDecl {
        name: name.to_string(),
        params,
        ret_ty: Type::Int,
        body: Some(Stmt::Block(body)),
    })
}

pub fn global(var: VarDecl) -> TopLevel {
    TopLevel::Var(var)
}

/// A program: the built-in externs followed by the given declarations
pub fn program(decls: Vec<TopLevel>) -> Program {
    let mut all = extern_builtins();
    all.extend(decls);
    Program { decls: all }
}

// IO capture

/// Output channel that tests can read back after the interpreter is done
#[derive(Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Build an interpreter over `program` reading from `input`, paired with
/// the handle that collects everything PRINT writes
pub fn interpreter(program: &Program, input: &str) -> (Interpreter, SharedOutput) {
    let out = SharedOutput::new();
    let interp = Interpreter::with_io(
        program,
        Box::new(io::Cursor::new(input.to_string())),
        Box::new(out.clone()),
    )
    .expect("program initializes");
    (interp, out)
}

/// Run a program with the given stdin text, returning the entry
/// function's result and everything PRINT wrote
pub fn run_program(program: &Program, input: &str) -> (InterpResult<Value>, String) {
    let (mut interp, out) = interpreter(program, input);
    let result = interp.run();
    (result, out.contents())
}
