use crate::{Expr, Member, Operand, Predicate};
use std::marker::PhantomData;

/// Partial update of `E`: explicit assignments and an optional filter.
///
/// ```ignore
/// let update = DynamicUpdate::new()
///     .set(Product::category_id, Product::category_id * 2)
///     .set(Product::name, "renamed")
///     .filter(Product::id.eq(7));
/// ```
pub struct DynamicUpdate<E> {
    assignments: Vec<(&'static str, Expr)>,
    condition: Option<Expr>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Default for DynamicUpdate<E> {
    fn default() -> Self {
        Self {
            assignments: Vec::new(),
            condition: None,
            _entity: PhantomData,
        }
    }
}

impl<E> DynamicUpdate<E> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Assign `value` to `member`, the value may reference other members.
    pub fn set<T>(mut self, member: Member<E, T>, value: impl Into<Operand<E>>) -> Self {
        self.assignments
            .push((member.name(), value.into().into_expr()));
        self
    }

    pub fn filter(mut self, predicate: impl Into<Predicate<E>>) -> Self {
        self.condition = Some(predicate.into().into_expr());
        self
    }

    pub fn assignments(&self) -> &[(&'static str, Expr)] {
        &self.assignments
    }

    pub fn condition(&self) -> Option<&Expr> {
        self.condition.as_ref()
    }
}
