//! The Interpreter walks a parsed program statement by statement.
//!
//! Labels are resolved in one pass before anything runs. Execution then
//! follows an explicit instruction pointer: jumps move it to the statement
//! after their label, every other statement advances it by one.
use std::collections::HashMap;
use std::io::Write;

use super::ast::*;
use super::error::{RuntimeError, RuntimeErrorKind};

/// Execution context for one program: the register file, the comparison
/// flags and the label table. `print` output goes to `out`.
pub struct Interpreter<W: Write> {
    registers: HashMap<String, i32>,
    flags:     Flags,
    labels:    HashMap<String, usize>,
    out:       W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Interpreter {
            registers: HashMap::new(),
            flags:     Flags::default(),
            labels:    HashMap::new(),
            out,
        }
    }

    pub fn registers(&self) -> &HashMap<String, i32> {
        &self.registers
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Runs `program` to completion. The first runtime error aborts the run;
    /// anything printed before it has already been written.
    pub fn interpret(&mut self, program: &[Node]) -> Result<(), RuntimeError> {
        self.resolve_labels(program);

        let mut ip = 0;
        while ip < program.len() {
            ip = self.step(ip, &program[ip])?;
        }

        self.out
            .flush()
            .map_err(|e| RuntimeError::new(program.len(), RuntimeErrorKind::Output(e)))
    }

    /// Records the index of every label. A name defined twice resolves to
    /// its last definition.
    fn resolve_labels(&mut self, program: &[Node]) {
        self.labels.clear();
        for (idx, node) in program.iter().enumerate() {
            if let Node::Label(name) = node {
                if let Some(prev) = self.labels.insert(name.clone(), idx) {
                    warn!("label `{}` at statement {} shadows statement {}", name, idx, prev);
                }
            }
        }
        debug!("resolved {} label(s)", self.labels.len());
    }

    /// Executes one statement and returns the index of the next one.
    fn step(&mut self, ip: usize, node: &Node) -> Result<usize, RuntimeError> {
        trace!("{:04}: {}", ip, node);
        let fail = |kind: RuntimeErrorKind| RuntimeError::new(ip, kind);

        match node {
            Node::Jump { kind, target } => return Ok(self.jump(ip, *kind, target)),

            Node::Assignment { target, value } => {
                let value = self.eval(value).map_err(fail)?;
                self.registers.insert(target.clone(), value);
            }

            Node::BinaryOp { left, op, right } => {
                // A register that was never assigned reads as 0 here, unlike
                // in `eval`.
                let lhs = self.registers.get(left).copied().unwrap_or(0);
                let rhs = self.eval(right).map_err(fail)?;
                self.registers.insert(left.clone(), op.apply(lhs, rhs));
            }

            Node::Compare { left, right } => {
                let lhs = self.eval(left).map_err(fail)?;
                let rhs = self.eval(right).map_err(fail)?;
                self.flags = Flags::compare(lhs, rhs);
            }

            Node::Print(expr) => {
                let value = self.eval(expr).map_err(fail)?;
                writeln!(self.out, "{}", value)
                    .map_err(|e| fail(RuntimeErrorKind::Output(e)))?;
            }

            Node::Label(_) | Node::Expression(_) => {}
        }

        Ok(ip + 1)
    }

    fn jump(&self, ip: usize, kind: JumpKind, target: &str) -> usize {
        if !kind.is_taken(self.flags) {
            return ip + 1;
        }

        match self.labels.get(target) {
            Some(idx) => idx + 1,
            None => {
                warn!("statement {}: `{} {}` names an undefined label, falling through", ip, kind.keyword(), target);
                ip + 1
            }
        }
    }

    fn eval(&self, expr: &Expr) -> Result<i32, RuntimeErrorKind> {
        match expr {
            Expr::Number(text) => text
                .parse::<i32>()
                .map_err(|_| RuntimeErrorKind::InvalidInteger(text.clone())),
            Expr::Identifier(name) => self
                .registers
                .get(name)
                .copied()
                .ok_or_else(|| RuntimeErrorKind::UnknownRegister(name.clone())),
        }
    }
}
