mod eval;
mod member;
mod op;
mod operand;
mod predicate;

pub use eval::*;
pub use member::*;
pub use op::*;
pub use operand::*;
pub use predicate::*;

use crate::{AsValue, SqlWriter, Value};

/// Untyped predicate and value tree, built through [`Member`], [`Operand`] and [`Predicate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to an entity member, by member name.
    Column(&'static str),
    Constant(Value),
    Binary(BinaryOp),
    Unary(UnaryOp),
    Pattern(PatternOp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub op: BinaryOpType,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOpType,
    pub arg: Box<Expr>,
}

/// `target like pattern`, the pattern gets decorated with `%` according to the kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternOp {
    pub kind: PatternKind,
    pub target: Box<Expr>,
    pub pattern: Box<Expr>,
}

impl Expr {
    pub fn column(member: &'static str) -> Self {
        Expr::Column(member)
    }

    pub fn constant(value: impl AsValue) -> Self {
        Expr::Constant(value.as_value())
    }

    pub fn binary(op: BinaryOpType, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(BinaryOp {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        })
    }

    pub fn unary(op: UnaryOpType, arg: Expr) -> Self {
        Expr::Unary(UnaryOp {
            op,
            arg: arg.into(),
        })
    }

    pub fn pattern(kind: PatternKind, target: Expr, pattern: Expr) -> Self {
        Expr::Pattern(PatternOp {
            kind,
            target: target.into(),
            pattern: pattern.into(),
        })
    }

    /// True when some node references a member, such expressions cannot be evaluated eagerly.
    pub fn references_member(&self) -> bool {
        match self {
            Expr::Column(..) => true,
            Expr::Constant(..) => false,
            Expr::Binary(v) => v.lhs.references_member() || v.rhs.references_member(),
            Expr::Unary(v) => v.arg.references_member(),
            Expr::Pattern(v) => v.target.references_member() || v.pattern.references_member(),
        }
    }

    /// Precedence of the rendered expression, used to decide on parentheses.
    ///
    /// Foldable constant subtrees render as a single parameter, the others keep their operators.
    pub fn precedence(&self, writer: &dyn SqlWriter) -> i32 {
        if !self.references_member() && evaluate(self).is_some() {
            return 1_000_000;
        }
        match self {
            Expr::Column(..) | Expr::Constant(..) => 1_000_000,
            Expr::Binary(v) => writer.expression_binary_op_precedence(&v.op),
            Expr::Unary(v) => writer.expression_unary_op_precedence(&v.op),
            Expr::Pattern(..) => writer.expression_pattern_precedence(),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Constant(value)
    }
}
