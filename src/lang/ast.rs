//! This AST describes a parsed ASMP program.
//!
//! A program is a flat list of statements. Execution begins with the
//! first statement and proceeds in order unless a jump transfers control
//! to the statement after a label.
//! Comments are prefixed with semicolons (;) and are single-line only.
//! Statements are delimited by newlines.
//!
//! Supported statements:
//!
//! ```nasm
//! let r = E     ; r <= E, creating r if needed
//! add r, E      ; r <= r + E (r reads as 0 if it was never assigned)
//! sub r, E      ; r <= r - E
//! mul r, E      ; r <= r * E
//! div r, E      ; r <= r / E, or 0 when E is 0
//! cmp A, B      ; set the equal/less/greater flags from A and B
//! jmp L         ; unconditionally continue after label L
//! je/jne L      ; jump if equal / not equal
//! jl/jle L      ; jump if less / less or equal
//! jg/jge L      ; jump if greater / greater or equal
//! print E       ; write E as a line of decimal text
//! L:            ; label definition
//! ```
//!
//! An operand `E` is either an integer literal or a register name.

use std::fmt;

/// The operand of a statement: a literal or a register reference.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    /// Literal digits, converted to an integer when evaluated.
    Number(String),
    Identifier(String),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number(text)     => write!(f, "{}", text),
            Expr::Identifier(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn from_keyword(kw: &str) -> Option<Self> {
        use BinaryOperator::*;
        match kw {
            "add" => Some(Add),
            "sub" => Some(Sub),
            "mul" => Some(Mul),
            "div" => Some(Div),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            Div => "div",
        }
    }

    /// Applies the operator. Results wrap on overflow and division by
    /// zero yields 0.
    pub fn apply(&self, lhs: i32, rhs: i32) -> i32 {
        use BinaryOperator::*;
        match self {
            Add => lhs.wrapping_add(rhs),
            Sub => lhs.wrapping_sub(rhs),
            Mul => lhs.wrapping_mul(rhs),
            Div => if rhs == 0 { 0 } else { lhs.wrapping_div(rhs) },
        }
    }
}

/// Flags left behind by the most recent `cmp`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct Flags {
    pub equal:   bool,
    pub less:    bool,
    pub greater: bool,
}

impl Flags {
    pub fn compare(lhs: i32, rhs: i32) -> Self {
        Flags {
            equal:   lhs == rhs,
            less:    lhs < rhs,
            greater: lhs > rhs,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum JumpKind {
    Jmp,
    Je,
    Jne,
    Jl,
    Jle,
    Jg,
    Jge,
}

impl JumpKind {
    pub fn from_keyword(kw: &str) -> Option<Self> {
        use JumpKind::*;
        match kw {
            "jmp" => Some(Jmp),
            "je"  => Some(Je),
            "jne" => Some(Jne),
            "jl"  => Some(Jl),
            "jle" => Some(Jle),
            "jg"  => Some(Jg),
            "jge" => Some(Jge),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        use JumpKind::*;
        match self {
            Jmp => "jmp",
            Je  => "je",
            Jne => "jne",
            Jl  => "jl",
            Jle => "jle",
            Jg  => "jg",
            Jge => "jge",
        }
    }

    /// Whether a jump of this kind is taken under the given flags.
    pub fn is_taken(&self, flags: Flags) -> bool {
        use JumpKind::*;
        match self {
            Jmp => true,
            Je  => flags.equal,
            Jne => !flags.equal,
            Jl  => flags.less,
            Jle => flags.less || flags.equal,
            Jg  => flags.greater,
            Jge => flags.greater || flags.equal,
        }
    }
}

/// A top-level statement.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
    /// A bare operand on its own line. Parsed, but does nothing when run.
    Expression(Expr),
    Assignment { target: String, value: Expr },
    /// Updates `left` in place with `left <op> right`.
    BinaryOp { left: String, op: BinaryOperator, right: Expr },
    Print(Expr),
    Label(String),
    Jump { kind: JumpKind, target: String },
    Compare { left: Expr, right: Expr },
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Node::*;
        match self {
            Expression(e)                   => write!(f, "{}", e),
            Assignment { target, value }    => write!(f, "let {} = {}", target, value),
            BinaryOp { left, op, right }    => write!(f, "{} {}, {}", op.keyword(), left, right),
            Print(e)                        => write!(f, "print {}", e),
            Label(name)                     => write!(f, "{}:", name),
            Jump { kind, target }           => write!(f, "{} {}", kind.keyword(), target),
            Compare { left, right }         => write!(f, "cmp {}, {}", left, right),
        }
    }
}
