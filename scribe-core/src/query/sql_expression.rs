use crate::{
    BinaryOpType, ColumnDescriptor, Context, Entity, EntityDescriptor, EntityType, Expr, Member,
    Predicate, PredicateCompiler, QueryCacheKey, QueryCacheType, Result, SqlGenerator, SqlWriter,
    Statement, separated_by, try_separated_by,
};
use std::marker::PhantomData;

/// Fluent description of a read over `E`, turned into a [`Statement`] on demand.
pub struct SqlExpression<'a, E> {
    generator: &'a SqlGenerator,
    writer: &'a dyn SqlWriter,
    includes: Vec<EntityType>,
    projection: Vec<&'static str>,
    project_all: bool,
    condition: Option<Expr>,
    order: Vec<(&'static str, bool)>,
    page: Option<(i64, u32)>,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E: Entity> SqlExpression<'a, E> {
    pub fn new(generator: &'a SqlGenerator, writer: &'a dyn SqlWriter) -> Self {
        Self {
            generator,
            writer,
            includes: Vec::new(),
            projection: Vec::new(),
            project_all: false,
            condition: None,
            order: Vec::new(),
            page: None,
            _entity: PhantomData,
        }
    }

    /// Add a `left join` to `entity`, related to the root type.
    pub fn include(mut self, entity: EntityType) -> Self {
        self.includes.push(entity);
        self
    }

    pub fn include_all(mut self, entities: &[EntityType]) -> Self {
        self.includes.extend_from_slice(entities);
        self
    }

    /// Replace the filter.
    pub fn filter(mut self, predicate: impl Into<Predicate<E>>) -> Self {
        self.condition = Some(predicate.into().into_expr());
        self
    }

    pub fn and_filter(self, predicate: impl Into<Predicate<E>>) -> Self {
        self.combine(BinaryOpType::And, predicate.into())
    }

    pub fn or_filter(self, predicate: impl Into<Predicate<E>>) -> Self {
        self.combine(BinaryOpType::Or, predicate.into())
    }

    fn combine(mut self, op: BinaryOpType, predicate: Predicate<E>) -> Self {
        let rhs = predicate.into_expr();
        self.condition = Some(match self.condition.take() {
            Some(lhs) => Expr::binary(op, lhs, rhs),
            None => rhs,
        });
        self
    }

    pub fn order_by<T>(mut self, member: Member<E, T>) -> Self {
        self.order.push((member.name(), false));
        self
    }

    pub fn order_by_descending<T>(mut self, member: Member<E, T>) -> Self {
        self.order.push((member.name(), true));
        self
    }

    /// Restrict to a page, 1 based. Without explicit order the key columns are used.
    pub fn page(mut self, page: i64, page_size: u32) -> Self {
        self.page = Some((page, page_size));
        self
    }

    /// Add a column to the projection, `*` is selected when none is added.
    pub fn select<T>(mut self, member: Member<E, T>) -> Self {
        self.projection.push(member.name());
        self
    }

    /// Project every mapped column.
    pub fn project(mut self) -> Self {
        self.project_all = true;
        self
    }

    fn write_condition(
        &self,
        out: &mut String,
        entity: &EntityDescriptor,
        context: &mut Context,
    ) -> Result<()> {
        if let Some(condition) = &self.condition {
            let mut sql = String::with_capacity(64);
            PredicateCompiler::new(self.writer, entity, context).write_predicate(&mut sql, condition)?;
            self.writer.write_where(out, &sql);
        }
        Ok(())
    }

    fn write_order(&self, out: &mut String, entity: &EntityDescriptor) -> Result<()> {
        let context = Context::default();
        if self.order.is_empty() {
            separated_by(
                out,
                &entity.keys,
                |out, v| self.writer.write_column_ref(&context, out, entity, v),
                ", ",
            );
            return Ok(());
        }
        try_separated_by(
            out,
            &self.order,
            |out, (member, descending)| {
                let column = entity.mapped_column(*member)?;
                self.writer.write_column_ref(&context, out, entity, column);
                if *descending {
                    out.push_str(" desc");
                }
                Ok(())
            },
            ", ",
        )
    }

    /// `select` statement with joins, filter, order and page.
    pub fn to_statement(&self) -> Result<Statement> {
        let entity = self.generator.describe::<E>(self.writer)?;
        let mut out = String::with_capacity(256);
        if self.projection.is_empty() {
            let kind = if self.project_all {
                QueryCacheType::ProjectAll
            } else {
                QueryCacheType::GetAll
            };
            out.push_str(&self.generator.select_text::<E>(self.writer, kind, &self.includes)?);
        } else {
            let columns = self
                .projection
                .iter()
                .map(|v| entity.mapped_column(*v))
                .collect::<Result<Vec<&ColumnDescriptor>>>()?;
            self.writer.write_select(&mut out, &entity, &columns);
            self.generator
                .write_joins(&mut out, self.writer, E::entity_type(), &self.includes)?;
        }
        let mut context = Context::default();
        self.write_condition(&mut out, &entity, &mut context)?;
        if let Some((page, page_size)) = self.page {
            let mut order = String::with_capacity(64);
            self.write_order(&mut order, &entity)?;
            self.writer.write_paging(&mut out, &order, page, page_size);
        } else if !self.order.is_empty() {
            let mut order = String::with_capacity(64);
            self.write_order(&mut order, &entity)?;
            self.writer.write_order_by(&mut out, &order);
        }
        Ok(Statement::new(out, context.parameters))
    }

    /// `select count(*)` with joins and filter.
    pub fn to_count_statement(&self) -> Result<Statement> {
        self.to_aggregate_statement(QueryCacheType::Count)
    }

    /// Existence probe returning at most one row.
    pub fn to_any_statement(&self) -> Result<Statement> {
        self.to_aggregate_statement(QueryCacheType::Any)
    }

    fn to_aggregate_statement(&self, kind: QueryCacheType) -> Result<Statement> {
        let entity = self.generator.describe::<E>(self.writer)?;
        let key = QueryCacheKey::new(kind, self.writer.dialect_id(), E::entity_type());
        let base = self.generator.cached_text(key, || {
            let mut out = String::with_capacity(64);
            if kind == QueryCacheType::Count {
                self.writer.write_count(&mut out, &entity);
            } else {
                self.writer.write_any(&mut out, &entity);
            }
            Ok(out)
        })?;
        let mut out = String::with_capacity(base.len() + 128);
        out.push_str(&base);
        self.generator
            .write_joins(&mut out, self.writer, E::entity_type(), &self.includes)?;
        let mut context = Context::default();
        self.write_condition(&mut out, &entity, &mut context)?;
        if kind == QueryCacheType::Any {
            self.writer.write_limit(&mut out, 1);
        }
        Ok(Statement::new(out, context.parameters))
    }
}
