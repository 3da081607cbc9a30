use crate::{
    AsValue, ColumnDescriptor, Context, DynamicUpdate, Entity, EntityDescriptor, EntityType,
    Error, MetadataResolver, Parameters, Predicate, PredicateCompiler, QueryCache, QueryCacheKey,
    QueryCacheType, QueryError, Resolvers, Result, Row, SqlExpression, SqlWriter, Statement,
    Value, truncate_long, try_separated_by,
};
use std::{
    ops::Deref,
    sync::{Arc, LazyLock},
};

static GLOBAL: LazyLock<SqlGenerator> = LazyLock::new(SqlGenerator::default);

/// Composes entity metadata, a dialect and compiled predicates into complete statements.
///
/// Static statement shapes are memoized in the owned [`QueryCache`], descriptors in the owned
/// [`MetadataResolver`]. Every method takes the dialect explicitly.
///
/// ```ignore
/// let generator = SqlGenerator::default();
/// let statement = generator.get::<Product>(&SqliteSqlWriter::new(), 42)?;
/// assert_eq!(&*statement.sql, "select * from Products where Products.Id = @Id");
/// ```
#[derive(Debug, Default)]
pub struct SqlGenerator {
    metadata: MetadataResolver,
    cache: QueryCache,
}

impl SqlGenerator {
    pub fn new(resolvers: Resolvers) -> Self {
        Self {
            metadata: MetadataResolver::new(resolvers),
            cache: QueryCache::new(),
        }
    }

    /// Process wide instance with the default resolvers.
    pub fn global() -> &'static SqlGenerator {
        &GLOBAL
    }

    pub fn metadata(&self) -> &MetadataResolver {
        &self.metadata
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Drop every memoized descriptor, relation and statement.
    pub fn clear(&self) {
        self.cache.clear();
        self.metadata.clear();
    }

    pub fn describe<E: Entity>(&self, writer: &dyn SqlWriter) -> Result<Arc<EntityDescriptor>> {
        self.metadata.resolve(E::entity_type(), writer)
    }

    /// Fluent builder for `select`, `count` and `any` statements over `E`.
    pub fn from<'a, E: Entity>(&'a self, writer: &'a dyn SqlWriter) -> SqlExpression<'a, E> {
        SqlExpression::new(self, writer)
    }

    pub(crate) fn cached_text(
        &self,
        key: QueryCacheKey,
        build: impl FnOnce() -> Result<String>,
    ) -> Result<Arc<str>> {
        self.cache.get_or_compute(&key, || {
            let sql = build()?;
            log::debug!(
                "Generated {:?} statement for {} on {}: {}",
                key.kind,
                key.entity.name(),
                key.dialect,
                truncate_long!(sql)
            );
            Ok(sql)
        })
    }

    pub(crate) fn write_joins(
        &self,
        out: &mut String,
        writer: &dyn SqlWriter,
        root: EntityType,
        includes: &[EntityType],
    ) -> Result<()> {
        for include in includes {
            let relation = self.metadata.resolve_relation(root, *include, writer)?;
            writer.write_join(out, &relation);
        }
        Ok(())
    }

    /// `select * from {T}` or `select {T}.{c}, ... from {T}`, joins included.
    pub(crate) fn select_text<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        kind: QueryCacheType,
        includes: &[EntityType],
    ) -> Result<Arc<str>> {
        let key = QueryCacheKey::new(kind, writer.dialect_id(), E::entity_type()).with_includes(includes);
        self.cached_text(key, || {
            let entity = self.describe::<E>(writer)?;
            let mut out = String::with_capacity(128);
            let columns: Vec<&ColumnDescriptor> = if kind == QueryCacheType::ProjectAll {
                entity.columns.iter().collect()
            } else {
                Vec::new()
            };
            writer.write_select(&mut out, &entity, &columns);
            self.write_joins(&mut out, writer, E::entity_type(), includes)?;
            Ok(out)
        })
    }

    fn single_key(&self, entity: &EntityDescriptor) -> Result<()> {
        if entity.keys.len() != 1 {
            return Err(QueryError::CompositeKeyArgumentMismatch {
                entity: entity.entity,
                expected: entity.keys.len(),
                supplied: 1,
            }
            .into());
        }
        Ok(())
    }

    /// Point lookup by a single key value, bound as `Id`.
    pub fn get<E: Entity>(&self, writer: &dyn SqlWriter, id: impl AsValue) -> Result<Statement> {
        self.get_joined::<E>(writer, &[], id)
    }

    /// Point lookup with one `left join` per included type, in order.
    pub fn get_joined<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        includes: &[EntityType],
        id: impl AsValue,
    ) -> Result<Statement> {
        let entity = self.describe::<E>(writer)?;
        self.single_key(&entity)?;
        let key = QueryCacheKey::new(QueryCacheType::Get, writer.dialect_id(), E::entity_type())
            .with_includes(includes);
        let sql = self.cached_text(key, || {
            let mut out = String::with_capacity(128);
            writer.write_select(&mut out, &entity, &[]);
            self.write_joins(&mut out, writer, E::entity_type(), includes)?;
            out.push_str(" where ");
            writer.write_key_condition(&mut out, &entity, &["Id"]);
            Ok(out)
        })?;
        let mut parameters = Parameters::new();
        parameters.push("Id", id.as_value());
        Ok(Statement::new(sql, parameters))
    }

    /// Point lookup by a composite key, values bound as `Id0`, `Id1`, ... in key order.
    pub fn get_by_ids<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        ids: impl IntoIterator<Item = Value>,
    ) -> Result<Statement> {
        let entity = self.describe::<E>(writer)?;
        let ids: Vec<Value> = ids.into_iter().collect();
        if ids.len() != entity.keys.len() {
            return Err(QueryError::CompositeKeyArgumentMismatch {
                entity: entity.entity,
                expected: entity.keys.len(),
                supplied: ids.len(),
            }
            .into());
        }
        let names: Vec<String> = (0..ids.len()).map(|i| format!("Id{i}")).collect();
        let key = QueryCacheKey::new(
            QueryCacheType::GetByMultipleIds,
            writer.dialect_id(),
            E::entity_type(),
        );
        let sql = self.cached_text(key, || {
            let mut out = String::with_capacity(128);
            writer.write_select(&mut out, &entity, &[]);
            out.push_str(" where ");
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            writer.write_key_condition(&mut out, &entity, &names);
            Ok(out)
        })?;
        Ok(Statement::new(sql, names.into_iter().zip(ids).collect()))
    }

    pub fn get_all<E: Entity>(&self, writer: &dyn SqlWriter) -> Result<Statement> {
        self.get_all_joined::<E>(writer, &[])
    }

    pub fn get_all_joined<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        includes: &[EntityType],
    ) -> Result<Statement> {
        let sql = self.select_text::<E>(writer, QueryCacheType::GetAll, includes)?;
        Ok(Statement::new(sql, Parameters::new()))
    }

    /// Page of every row, ordered by the key columns.
    pub fn get_paged<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        page: i64,
        page_size: u32,
    ) -> Result<Statement> {
        self.from::<E>(writer).page(page, page_size).to_statement()
    }

    /// Point lookup projecting every mapped column.
    pub fn project<E: Entity>(&self, writer: &dyn SqlWriter, id: impl AsValue) -> Result<Statement> {
        let entity = self.describe::<E>(writer)?;
        self.single_key(&entity)?;
        let key = QueryCacheKey::new(QueryCacheType::Project, writer.dialect_id(), E::entity_type());
        let sql = self.cached_text(key, || {
            let mut out = String::with_capacity(256);
            let columns: Vec<&ColumnDescriptor> = entity.columns.iter().collect();
            writer.write_select(&mut out, &entity, &columns);
            out.push_str(" where ");
            writer.write_key_condition(&mut out, &entity, &["Id"]);
            Ok(out)
        })?;
        let mut parameters = Parameters::new();
        parameters.push("Id", id.as_value());
        Ok(Statement::new(sql, parameters))
    }

    pub fn project_all<E: Entity>(&self, writer: &dyn SqlWriter) -> Result<Statement> {
        let sql = self.select_text::<E>(writer, QueryCacheType::ProjectAll, &[])?;
        Ok(Statement::new(sql, Parameters::new()))
    }

    pub fn project_paged<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        page: i64,
        page_size: u32,
    ) -> Result<Statement> {
        self.from::<E>(writer)
            .project()
            .page(page, page_size)
            .to_statement()
    }

    /// `select * from {T} where {predicate}`.
    pub fn select<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        predicate: impl Into<Predicate<E>>,
    ) -> Result<Statement> {
        self.from::<E>(writer).filter(predicate).to_statement()
    }

    pub fn select_joined<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        includes: &[EntityType],
        predicate: impl Into<Predicate<E>>,
    ) -> Result<Statement> {
        self.from::<E>(writer)
            .include_all(includes)
            .filter(predicate)
            .to_statement()
    }

    pub fn select_paged<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        predicate: impl Into<Predicate<E>>,
        page: i64,
        page_size: u32,
    ) -> Result<Statement> {
        self.from::<E>(writer)
            .filter(predicate)
            .page(page, page_size)
            .to_statement()
    }

    pub fn count<E: Entity>(&self, writer: &dyn SqlWriter) -> Result<Statement> {
        self.from::<E>(writer).to_count_statement()
    }

    pub fn count_where<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        predicate: impl Into<Predicate<E>>,
    ) -> Result<Statement> {
        self.from::<E>(writer).filter(predicate).to_count_statement()
    }

    pub fn any<E: Entity>(&self, writer: &dyn SqlWriter) -> Result<Statement> {
        self.from::<E>(writer).to_any_statement()
    }

    pub fn any_where<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        predicate: impl Into<Predicate<E>>,
    ) -> Result<Statement> {
        self.from::<E>(writer).filter(predicate).to_any_statement()
    }

    /// Insert of every `None` generation column, the dialect retrieves the generated key.
    pub fn insert<E: Entity>(&self, writer: &dyn SqlWriter, value: &E) -> Result<Statement> {
        let entity = self.describe::<E>(writer)?;
        let key = QueryCacheKey::new(QueryCacheType::Insert, writer.dialect_id(), E::entity_type());
        let sql = self.cached_text(key, || {
            let mut out = String::with_capacity(256);
            let columns: Vec<&ColumnDescriptor> = entity.writable_columns().collect();
            writer.write_insert(&mut out, &entity, &columns)?;
            Ok(out)
        })?;
        let parameters = row_parameters(&entity, &value.row(), entity.writable_columns())?;
        Ok(Statement::new(sql, parameters))
    }

    /// Update of every `None` generation column, matched by key.
    pub fn update<E: Entity>(&self, writer: &dyn SqlWriter, value: &E) -> Result<Statement> {
        let entity = self.describe::<E>(writer)?;
        let key = QueryCacheKey::new(QueryCacheType::Update, writer.dialect_id(), E::entity_type());
        let sql = self.cached_text(key, || {
            let mut out = String::with_capacity(256);
            let columns: Vec<&ColumnDescriptor> = entity.writable_columns().collect();
            if columns.is_empty() {
                return Err(Error::msg(format!(
                    "Entity `{}` has no column to update",
                    entity.entity
                )));
            }
            writer.write_update(&mut out, &entity, &columns);
            out.push_str(" where ");
            let names: Vec<&str> = entity.keys.iter().map(|v| v.member).collect();
            writer.write_key_condition(&mut out, &entity, &names);
            Ok(out)
        })?;
        let parameters = row_parameters(
            &entity,
            &value.row(),
            entity
                .writable_columns()
                .chain(entity.keys.iter().map(Deref::deref)),
        )?;
        Ok(Statement::new(sql, parameters))
    }

    /// Update of the assignments in `update`, restricted by its filter.
    ///
    /// The filter is compiled first, the assignment values continue its parameter numbering.
    pub fn update_where<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        update: &DynamicUpdate<E>,
    ) -> Result<Statement> {
        let entity = self.describe::<E>(writer)?;
        if update.assignments().is_empty() {
            return Err(Error::msg(format!(
                "Dynamic update of `{}` requires at least one assignment",
                entity.entity
            )));
        }
        let key = QueryCacheKey::new(
            QueryCacheType::UpdateMultiple,
            writer.dialect_id(),
            E::entity_type(),
        );
        let prefix = self.cached_text(key, || Ok(format!("update {}", entity.table_identifier)))?;
        let mut context = Context::default();
        let mut compiler = PredicateCompiler::new(writer, &entity, &mut context);
        let mut condition = String::with_capacity(64);
        if let Some(filter) = update.condition() {
            compiler.write_predicate(&mut condition, filter)?;
        }
        let mut out = String::with_capacity(prefix.len() + condition.len() + 128);
        out.push_str(&prefix);
        out.push_str(" set ");
        try_separated_by(
            &mut out,
            update.assignments(),
            |out, (member, value)| {
                let column = entity.mapped_column(*member)?;
                writer.write_column_ref(&Context::default(), out, &entity, column);
                out.push_str(" = ");
                compiler.write_expression(out, value)
            },
            ", ",
        )?;
        writer.write_where(&mut out, &condition);
        log::debug!("Generated dynamic update for {}: {}", entity.entity, truncate_long!(out));
        Ok(Statement::new(out, context.parameters))
    }

    /// Delete matched by the key of `value`.
    pub fn delete<E: Entity>(&self, writer: &dyn SqlWriter, value: &E) -> Result<Statement> {
        let entity = self.describe::<E>(writer)?;
        let key = QueryCacheKey::new(QueryCacheType::Delete, writer.dialect_id(), E::entity_type());
        let sql = self.cached_text(key, || {
            let mut out = String::with_capacity(128);
            writer.write_delete(&mut out, &entity);
            out.push_str(" where ");
            let names: Vec<&str> = entity.keys.iter().map(|v| v.member).collect();
            writer.write_key_condition(&mut out, &entity, &names);
            Ok(out)
        })?;
        let parameters = row_parameters(
            &entity,
            &value.row(),
            entity.keys.iter().map(Deref::deref),
        )?;
        Ok(Statement::new(sql, parameters))
    }

    pub fn delete_where<E: Entity>(
        &self,
        writer: &dyn SqlWriter,
        predicate: impl Into<Predicate<E>>,
    ) -> Result<Statement> {
        let entity = self.describe::<E>(writer)?;
        let key = QueryCacheKey::new(
            QueryCacheType::DeleteMultiple,
            writer.dialect_id(),
            E::entity_type(),
        );
        let prefix = self.cached_text(key, || {
            let mut out = String::with_capacity(64);
            writer.write_delete(&mut out, &entity);
            Ok(out)
        })?;
        let mut context = Context::default();
        let mut condition = String::with_capacity(64);
        PredicateCompiler::new(writer, &entity, &mut context)
            .write_predicate(&mut condition, predicate.into().expr())?;
        let mut out = String::with_capacity(prefix.len() + condition.len() + 8);
        out.push_str(&prefix);
        writer.write_where(&mut out, &condition);
        Ok(Statement::new(out, context.parameters))
    }

    pub fn delete_all<E: Entity>(&self, writer: &dyn SqlWriter) -> Result<Statement> {
        let entity = self.describe::<E>(writer)?;
        let key = QueryCacheKey::new(QueryCacheType::DeleteAll, writer.dialect_id(), E::entity_type());
        let sql = self.cached_text(key, || {
            let mut out = String::with_capacity(64);
            writer.write_delete(&mut out, &entity);
            Ok(out)
        })?;
        Ok(Statement::new(sql, Parameters::new()))
    }
}

/// Values of `columns` taken from `row`, named after the members, without duplicates.
fn row_parameters<'c>(
    entity: &EntityDescriptor,
    row: &Row,
    columns: impl IntoIterator<Item = &'c ColumnDescriptor>,
) -> Result<Parameters> {
    let mut parameters = Parameters::new();
    for column in columns {
        if parameters.contains(column.member) {
            continue;
        }
        let value = row
            .iter()
            .find(|(member, _)| *member == column.member)
            .map(|(_, value)| value.clone())
            .ok_or(QueryError::UnmappedMember {
                entity: entity.entity,
                member: column.member,
            })?;
        parameters.push(column.member, value);
    }
    Ok(parameters)
}
