use crate::{AsValue, BinaryOpType, Expr, Member, Predicate, UnaryOpType, Value};
use std::{
    marker::PhantomData,
    ops::{Add, Div, Mul, Neg, Rem, Sub},
};

/// Value position expression over entity `E`: a constant, a member or an arithmetic combination.
pub struct Operand<E> {
    expr: Expr,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Operand<E> {
    fn clone(&self) -> Self {
        Self::from_expr(self.expr.clone())
    }
}

impl<E> std::fmt::Debug for Operand<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.expr, f)
    }
}

impl<E> Operand<E> {
    pub fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _entity: PhantomData,
        }
    }

    pub fn value(value: Value) -> Self {
        Self::from_expr(Expr::Constant(value))
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    pub(crate) fn compare(self, op: BinaryOpType, rhs: impl Into<Operand<E>>) -> Predicate<E> {
        Predicate::from_expr(Expr::binary(op, self.expr, rhs.into().expr))
    }

    pub fn eq(self, rhs: impl Into<Operand<E>>) -> Predicate<E> {
        self.compare(BinaryOpType::Equal, rhs)
    }

    pub fn ne(self, rhs: impl Into<Operand<E>>) -> Predicate<E> {
        self.compare(BinaryOpType::NotEqual, rhs)
    }

    pub fn lt(self, rhs: impl Into<Operand<E>>) -> Predicate<E> {
        self.compare(BinaryOpType::Less, rhs)
    }

    pub fn le(self, rhs: impl Into<Operand<E>>) -> Predicate<E> {
        self.compare(BinaryOpType::LessEqual, rhs)
    }

    pub fn gt(self, rhs: impl Into<Operand<E>>) -> Predicate<E> {
        self.compare(BinaryOpType::Greater, rhs)
    }

    pub fn ge(self, rhs: impl Into<Operand<E>>) -> Predicate<E> {
        self.compare(BinaryOpType::GreaterEqual, rhs)
    }

    pub fn is_null(self) -> Predicate<E> {
        self.compare(BinaryOpType::Equal, Operand::value(Value::Null))
    }

    pub fn is_not_null(self) -> Predicate<E> {
        self.compare(BinaryOpType::NotEqual, Operand::value(Value::Null))
    }
}

impl<E, V: AsValue> From<V> for Operand<E> {
    fn from(value: V) -> Self {
        Self::value(value.as_value())
    }
}

impl<E> From<Value> for Operand<E> {
    fn from(value: Value) -> Self {
        Self::value(value)
    }
}

impl<E, T> From<Member<E, T>> for Operand<E> {
    fn from(value: Member<E, T>) -> Self {
        Self::from_expr(value.expr())
    }
}

impl<E> From<Predicate<E>> for Operand<E> {
    fn from(value: Predicate<E>) -> Self {
        Self::from_expr(value.into_expr())
    }
}

macro_rules! impl_arithmetic {
    ($trait:ident, $method:ident, $op:path) => {
        impl<E, R: Into<Operand<E>>> $trait<R> for Operand<E> {
            type Output = Operand<E>;
            fn $method(self, rhs: R) -> Self::Output {
                Operand::from_expr(Expr::binary($op, self.expr, rhs.into().expr))
            }
        }
        impl<E, T, R: Into<Operand<E>>> $trait<R> for Member<E, T> {
            type Output = Operand<E>;
            fn $method(self, rhs: R) -> Self::Output {
                Operand::from_expr(Expr::binary($op, self.expr(), rhs.into().expr))
            }
        }
    };
}
impl_arithmetic!(Add, add, BinaryOpType::Addition);
impl_arithmetic!(Sub, sub, BinaryOpType::Subtraction);
impl_arithmetic!(Mul, mul, BinaryOpType::Multiplication);
impl_arithmetic!(Div, div, BinaryOpType::Division);
impl_arithmetic!(Rem, rem, BinaryOpType::Remainder);

impl<E> Neg for Operand<E> {
    type Output = Operand<E>;
    fn neg(self) -> Self::Output {
        Operand::from_expr(Expr::unary(UnaryOpType::Negative, self.expr))
    }
}

impl<E, T> Neg for Member<E, T> {
    type Output = Operand<E>;
    fn neg(self) -> Self::Output {
        Operand::from_expr(Expr::unary(UnaryOpType::Negative, self.expr()))
    }
}
