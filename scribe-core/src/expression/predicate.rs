use crate::{BinaryOpType, Expr, Flag, Member, UnaryOpType};
use std::{
    marker::PhantomData,
    ops::{BitAnd, BitOr, Not},
};

/// Boolean condition over entity `E`.
///
/// ```ignore
/// let cheap = Product::Price.lt(10) & !Product::Discontinued;
/// ```
pub struct Predicate<E> {
    expr: Expr,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Self::from_expr(self.expr.clone())
    }
}

impl<E> std::fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.expr, f)
    }
}

impl<E> Predicate<E> {
    pub fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _entity: PhantomData,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    pub fn and(self, rhs: impl Into<Predicate<E>>) -> Self {
        Self::from_expr(Expr::binary(BinaryOpType::And, self.expr, rhs.into().expr))
    }

    pub fn or(self, rhs: impl Into<Predicate<E>>) -> Self {
        Self::from_expr(Expr::binary(BinaryOpType::Or, self.expr, rhs.into().expr))
    }

    pub fn not(self) -> Self {
        Self::from_expr(Expr::unary(UnaryOpType::Not, self.expr))
    }
}

impl<E> From<bool> for Predicate<E> {
    fn from(value: bool) -> Self {
        Self::from_expr(Expr::constant(value))
    }
}

impl<E, T: Flag> From<Member<E, T>> for Predicate<E> {
    fn from(value: Member<E, T>) -> Self {
        Self::from_expr(value.expr())
    }
}

impl<E, R: Into<Predicate<E>>> BitAnd<R> for Predicate<E> {
    type Output = Predicate<E>;
    fn bitand(self, rhs: R) -> Self::Output {
        self.and(rhs)
    }
}

impl<E, R: Into<Predicate<E>>> BitOr<R> for Predicate<E> {
    type Output = Predicate<E>;
    fn bitor(self, rhs: R) -> Self::Output {
        self.or(rhs)
    }
}

impl<E> Not for Predicate<E> {
    type Output = Predicate<E>;
    fn not(self) -> Self::Output {
        Predicate::not(self)
    }
}

impl<E, T: Flag> Not for Member<E, T> {
    type Output = Predicate<E>;
    fn not(self) -> Self::Output {
        Predicate::from(self).not()
    }
}

impl<E, T: Flag, R: Into<Predicate<E>>> BitAnd<R> for Member<E, T> {
    type Output = Predicate<E>;
    fn bitand(self, rhs: R) -> Self::Output {
        Predicate::from(self).and(rhs)
    }
}

impl<E, T: Flag, R: Into<Predicate<E>>> BitOr<R> for Member<E, T> {
    type Output = Predicate<E>;
    fn bitor(self, rhs: R) -> Self::Output {
        Predicate::from(self).or(rhs)
    }
}
