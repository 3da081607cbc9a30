use crate::{BinaryOpType, Expr, Operand, PatternKind, Predicate, Value};
use std::{borrow::Cow, fmt, marker::PhantomData};

/// Member types usable in `contains`, `starts_with` and `ends_with`.
pub trait Text {}
impl Text for String {}
impl Text for &str {}
impl Text for Cow<'_, str> {}
impl<T: Text> Text for Option<T> {}

/// Member types usable as a bare predicate.
pub trait Flag {}
impl Flag for bool {}
impl<T: Flag> Flag for Option<T> {}

/// Typed reference to the member of entity `E` whose Rust type is `T`.
///
/// The derive macro emits one constant per field in the `{Entity}Members` trait.
pub struct Member<E, T> {
    name: &'static str,
    _entity: PhantomData<fn() -> (E, T)>,
}

impl<E, T> Clone for Member<E, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, T> Copy for Member<E, T> {}

impl<E, T> fmt::Debug for Member<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Member").field(&self.name).finish()
    }
}

impl<E, T> Member<E, T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _entity: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn expr(&self) -> Expr {
        Expr::Column(self.name)
    }

    fn compare(self, op: BinaryOpType, rhs: impl Into<Operand<E>>) -> Predicate<E> {
        Operand::<E>::from(self).compare(op, rhs)
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

impl<E, T: Text> Member<E, T> {
    fn pattern(self, kind: PatternKind, pattern: impl Into<Operand<E>>) -> Predicate<E> {
        Predicate::from_expr(Expr::pattern(
            kind,
            self.expr(),
            pattern.into().into_expr(),
        ))
    }

    pub fn contains(self, pattern: impl Into<Operand<E>>) -> Predicate<E> {
        self.pattern(PatternKind::Contains, pattern)
    }

    pub fn starts_with(self, pattern: impl Into<Operand<E>>) -> Predicate<E> {
        self.pattern(PatternKind::StartsWith, pattern)
    }

    pub fn ends_with(self, pattern: impl Into<Operand<E>>) -> Predicate<E> {
        self.pattern(PatternKind::EndsWith, pattern)
    }
}
