//! Expression and statement evaluator
//!
//! Single-threaded, depth-first tree walking. Expressions produce a
//! [`Value`] and memoize it on their node in the active frame;
//! statements execute effects and drive the per-activation
//! Running -> (Returned | Exhausted) state machine kept in the frame.

use super::env::{Builtin, Environment};
use super::error::{InterpResult, RuntimeError};
use super::heap::Heap;
use super::value::{SLOT_SIZE, Value, truthy};
use crate::ast::{BinOp, Expr, ExprKind, FuncDecl, Program, Stmt, Type, UnOp, VarDecl};
use std::io::{self, BufRead, Write};

/// Call depth at which evaluation gives up with a stack-exhaustion error
const MAX_CALL_DEPTH: usize = 100_000;

/// Stack growth parameters for deep recursion
const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// The tree-walking evaluator
pub struct Interpreter {
    env: Environment,
    heap: Heap,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Interpreter {
    /// Build an interpreter over a parsed program, wired to stdin and
    /// stdout. Fails when the program has no entry function.
    pub fn new(program: &Program) -> InterpResult<Self> {
        Self::with_io(
            program,
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    /// Build an interpreter with explicit input and output channels
    pub fn with_io(
        program: &Program,
        input: Box<dyn BufRead>,
        output: Box<dyn Write>,
    ) -> InterpResult<Self> {
        Ok(Interpreter {
            env: Environment::initialize(program)?,
            heap: Heap::new(),
            input,
            output,
        })
    }

    /// Bind the globals, then execute the entry function to completion.
    /// Returns the entry function's return value.
    pub fn run(&mut self) -> InterpResult<Value> {
        for var in self.env.take_globals() {
            let val = self.initial_value(&var)?;
            self.env.global_mut().bind_decl(var.id, val);
        }
        let entry = self.env.entry();
        self.call_user(&entry, &[])
    }

    /// The call stack and resolved handles
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The simulated heap
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Value a declaration binds to: arrays get a fresh zero-filled
    /// block, scalars their evaluated initializer or 0
    fn initial_value(&mut self, var: &VarDecl) -> InterpResult<Value> {
        match &var.ty {
            Type::Array(_, len) => Ok(self.heap.alloc_zeroed(*len as i64 * SLOT_SIZE)),
            _ => match &var.init {
                Some(init) => self.eval_expr(init),
                None => Ok(0),
            },
        }
    }

    /// Invoke a user-defined function. Arguments are already evaluated
    /// in the caller's frame; this pushes a fresh frame, binds the
    /// parameters positionally, executes the body, pops the frame, and
    /// returns the pending return value (0 when the body exhausted its
    /// statement list).
    fn call_user(&mut self, func: &FuncDecl, args: &[Value]) -> InterpResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.call_user_inner(func, args)
        })
    }

    fn call_user_inner(&mut self, func: &FuncDecl, args: &[Value]) -> InterpResult<Value> {
        let Some(body) = &func.body else {
            return Err(RuntimeError::UndefinedFunction(func.name.clone()));
        };
        if func.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                name: func.name.clone(),
                expected: func.params.len(),
                got: args.len(),
            });
        }
        if self.env.depth() >= MAX_CALL_DEPTH {
            return Err(RuntimeError::CallStackExhausted);
        }

        self.env.push_frame();
        for (param, arg) in func.params.iter().zip(args) {
            self.env.top_mut().bind_decl(param.id, *arg);
        }
        let result = self.exec_stmt(body);
        let frame = self.env.pop_frame();
        // Pop before propagating so the stack stays balanced on error
        result?;
        Ok(frame.return_value())
    }

    /// Execute one statement. Once the active frame has returned, every
    /// remaining statement of the activation is skipped at dispatch; loops
    /// additionally check the flag at each iteration boundary, before
    /// re-evaluating the condition and before the `for` step clause.
    fn exec_stmt(&mut self, stmt: &Stmt) -> InterpResult<()> {
        if self.env.top().has_returned() {
            return Ok(());
        }
        match stmt {
            Stmt::Empty => Ok(()),
            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(())
            }
            Stmt::Decl(vars) => {
                for var in vars {
                    let val = self.initial_value(var)?;
                    self.env.top_mut().bind_decl(var.id, val);
                }
                Ok(())
            }
            Stmt::Block(stmts) => {
                for stmt in stmts {
                    self.exec_stmt(stmt)?;
                }
                Ok(())
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if truthy(self.eval_expr(cond)?) {
                    self.exec_stmt(then_branch)
                } else if let Some(els) = else_branch {
                    self.exec_stmt(els)
                } else {
                    Ok(())
                }
            }
            Stmt::While { cond, body } => {
                while !self.env.top().has_returned() && truthy(self.eval_expr(cond)?) {
                    self.exec_stmt(body)?;
                }
                Ok(())
            }
            Stmt::For {
                init,
                cond,
                step,
                body,
            } => {
                if let Some(init) = init {
                    self.exec_stmt(init)?;
                }
                loop {
                    if self.env.top().has_returned() {
                        break;
                    }
                    let live = match cond {
                        Some(cond) => truthy(self.eval_expr(cond)?),
                        // `for (;;)` runs until something else stops it
                        None => true,
                    };
                    if !live {
                        break;
                    }
                    self.exec_stmt(body)?;
                    if self.env.top().has_returned() {
                        break;
                    }
                    if let Some(step) = step {
                        self.eval_expr(step)?;
                    }
                }
                Ok(())
            }
            Stmt::Return(expr) => {
                let val = match expr {
                    Some(expr) => self.eval_expr(expr)?,
                    None => 0,
                };
                self.env.top_mut().set_return(val);
                Ok(())
            }
        }
    }

    /// Evaluate an expression, memoizing the result on its node in the
    /// active frame (pass-throughs excepted)
    fn eval_expr(&mut self, expr: &Expr) -> InterpResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> InterpResult<Value> {
        self.env.top_mut().set_pc(expr.id);
        match &expr.kind {
            ExprKind::IntLit(n) => Ok(self.env.top_mut().bind_expr(expr.id, *n)),
            ExprKind::CharLit(c) => Ok(self.env.top_mut().bind_expr(expr.id, *c as i64)),
            ExprKind::Var { decl, name } => {
                let val = self
                    .env
                    .decl_val(*decl)
                    .ok_or_else(|| RuntimeError::UnboundVariable(name.clone()))?;
                Ok(self.env.top_mut().bind_expr(expr.id, val))
            }
            ExprKind::Paren(inner) => self.eval_expr(inner),
            ExprKind::Cast { operand, .. } => self.eval_expr(operand),
            ExprKind::Sizeof(ty) => Ok(self.env.top_mut().bind_expr(expr.id, type_size(ty))),
            ExprKind::Unary { op, operand } => {
                let val = match op {
                    UnOp::Neg => -self.eval_expr(operand)?,
                    UnOp::Plus => self.eval_expr(operand)?,
                    UnOp::Deref => {
                        let addr = self.eval_expr(operand)?;
                        self.heap.load(addr)
                    }
                    UnOp::AddrOf => self.lvalue_address(operand)?,
                };
                Ok(self.env.top_mut().bind_expr(expr.id, val))
            }
            ExprKind::Index { base, index } => {
                let base_addr = self.eval_expr(base)?;
                let idx = self.eval_expr(index)?;
                let val = self.heap.load(base_addr + idx * SLOT_SIZE);
                Ok(self.env.top_mut().bind_expr(expr.id, val))
            }
            ExprKind::Binary { op, left, right } => {
                // Left before right: the ordering guarantee for nested
                // side effects
                let lhs = self.eval_expr(left)?;
                let rhs = self.eval_expr(right)?;
                let val = self.apply_binop(*op, lhs, rhs, left.ty.is_address())?;
                Ok(self.env.top_mut().bind_expr(expr.id, val))
            }
            ExprKind::Assign { target, value } => {
                let val = self.eval_expr(value)?;
                self.assign(target, val)?;
                Ok(self.env.top_mut().bind_expr(expr.id, val))
            }
            ExprKind::Call { callee, args } => {
                let mut vals = Vec::with_capacity(args.len());
                for arg in args {
                    vals.push(self.eval_expr(arg)?);
                }
                let val = if let Some(builtin) = self.env.builtin(callee) {
                    self.call_builtin(builtin, callee, &vals)?
                } else {
                    let func = self
                        .env
                        .function(callee)
                        .ok_or_else(|| RuntimeError::UndefinedFunction(callee.clone()))?;
                    self.call_user(&func, &vals)?
                };
                Ok(self.env.top_mut().bind_expr(expr.id, val))
            }
        }
    }

    /// Apply a binary operator. When the left operand is address-typed,
    /// `+` and `-` scale the right operand by the slot width.
    fn apply_binop(
        &self,
        op: BinOp,
        lhs: Value,
        rhs: Value,
        address_lhs: bool,
    ) -> InterpResult<Value> {
        let val = match op {
            BinOp::Add => {
                let rhs = if address_lhs { rhs * SLOT_SIZE } else { rhs };
                lhs + rhs
            }
            BinOp::Sub => {
                let rhs = if address_lhs { rhs * SLOT_SIZE } else { rhs };
                lhs - rhs
            }
            BinOp::Mul => lhs * rhs,
            BinOp::Div => {
                if rhs == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                if lhs % rhs != 0 {
                    eprintln!("warning: {lhs} / {rhs} is not exact; truncating");
                }
                lhs / rhs
            }
            BinOp::Lt => (lhs < rhs) as i64,
            BinOp::Gt => (lhs > rhs) as i64,
            BinOp::Eq => (lhs == rhs) as i64,
        };
        Ok(val)
    }

    /// Store into an assignment target: a variable rebinds, a subscript
    /// or dereference writes through to the heap. Other shapes are
    /// rejected.
    fn assign(&mut self, target: &Expr, val: Value) -> InterpResult<()> {
        match &target.kind {
            ExprKind::Var { decl, name } => {
                if !self.env.rebind(*decl, val) {
                    return Err(RuntimeError::UnboundVariable(name.clone()));
                }
            }
            ExprKind::Index { base, index } => {
                let base_addr = self.eval_expr(base)?;
                let idx = self.eval_expr(index)?;
                self.heap.store(base_addr + idx * SLOT_SIZE, val);
            }
            ExprKind::Unary {
                op: UnOp::Deref,
                operand,
            } => {
                let addr = self.eval_expr(operand)?;
                self.heap.store(addr, val);
            }
            ExprKind::Paren(inner) => return self.assign(inner, val),
            _ => return Err(RuntimeError::UnsupportedAssignTarget),
        }
        self.env.top_mut().bind_expr(target.id, val);
        Ok(())
    }

    /// Address of an lvalue, for the address-of operator. Subscripts and
    /// dereferences have heap addresses; frame-resident scalars do not.
    fn lvalue_address(&mut self, operand: &Expr) -> InterpResult<Value> {
        match &operand.kind {
            ExprKind::Index { base, index } => {
                let base_addr = self.eval_expr(base)?;
                let idx = self.eval_expr(index)?;
                Ok(base_addr + idx * SLOT_SIZE)
            }
            ExprKind::Unary {
                op: UnOp::Deref,
                operand,
            } => self.eval_expr(operand),
            ExprKind::Paren(inner) => self.lvalue_address(inner),
            _ => Err(RuntimeError::UnsupportedAddressOf),
        }
    }

    /// Perform a built-in's effect directly; built-ins never push a frame
    fn call_builtin(
        &mut self,
        builtin: Builtin,
        name: &str,
        args: &[Value],
    ) -> InterpResult<Value> {
        match builtin {
            Builtin::Get => {
                expect_arity(name, 0, args)?;
                self.read_int()
            }
            Builtin::Print => {
                expect_arity(name, 1, args)?;
                writeln!(self.output, "{}", args[0])
                    .map_err(|e| RuntimeError::Output(e.to_string()))?;
                Ok(0)
            }
            Builtin::Malloc => {
                expect_arity(name, 1, args)?;
                Ok(self.heap.alloc(args[0]))
            }
            Builtin::Free => {
                expect_arity(name, 1, args)?;
                self.heap.free(args[0]);
                Ok(0)
            }
        }
    }

    /// Read one line from the input channel and parse it as an integer
    fn read_int(&mut self) -> InterpResult<Value> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| RuntimeError::Input(e.to_string()))?;
        if read == 0 {
            return Err(RuntimeError::Input("end of input".to_string()));
        }
        line.trim()
            .parse::<i64>()
            .map_err(|_| RuntimeError::Input(format!("not an integer: {:?}", line.trim())))
    }
}

/// Size in bytes of a value of the given type. Every scalar kind shares
/// the single slot width, pointers included.
fn type_size(ty: &Type) -> i64 {
    match ty {
        Type::Int | Type::Char | Type::Ptr(_) | Type::Array(_, _) => SLOT_SIZE,
    }
}

/// Arity check shared by the built-ins
fn expect_arity(name: &str, expected: usize, args: &[Value]) -> InterpResult<()> {
    if args.len() != expected {
        return Err(RuntimeError::ArityMismatch {
            name: name.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}
