use crate::{
    ColumnDescriptor, DialectId, EntityDescriptor, EntityType, ForeignKeyDeclaration,
    ForeignKeyRelation, GenerationStrategy, KeyColumnDescriptor, QueryError, RelationKind,
    Resolvers, Result, SqlWriter, cache::get_or_insert_with,
};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

type RelationKey = (EntityType, EntityType, DialectId);

/// Builds and memoizes [`EntityDescriptor`] and [`ForeignKeyRelation`] per dialect.
#[derive(Debug, Default)]
pub struct MetadataResolver {
    resolvers: Resolvers,
    entities: RwLock<HashMap<(EntityType, DialectId), Arc<EntityDescriptor>>>,
    relations: RwLock<HashMap<RelationKey, Arc<ForeignKeyRelation>>>,
}

impl MetadataResolver {
    pub fn new(resolvers: Resolvers) -> Self {
        Self {
            resolvers,
            entities: Default::default(),
            relations: Default::default(),
        }
    }

    pub fn resolvers(&self) -> &Resolvers {
        &self.resolvers
    }

    /// Descriptor of `entity` for the dialect of `writer`, built on first use.
    pub fn resolve(&self, entity: EntityType, writer: &dyn SqlWriter) -> Result<Arc<EntityDescriptor>> {
        let key = (entity, writer.dialect_id());
        get_or_insert_with(&self.entities, &key, || {
            self.describe(entity, writer).map(Arc::new)
        })
        .map(|(v, _)| v)
    }

    /// Build a descriptor without touching the memoization table.
    pub fn describe(&self, entity: EntityType, writer: &dyn SqlWriter) -> Result<EntityDescriptor> {
        let def = entity.def();
        let table = self.resolvers.table.resolve_table_name(def);
        let mut table_identifier = String::with_capacity(table.name.len() + 2);
        writer.write_table_ref(&mut table_identifier, &table);
        let key_members = self.resolvers.key.resolve_key_properties(def)?;
        let columns: Vec<ColumnDescriptor> = def
            .members
            .iter()
            .map(|member| {
                let name = self.resolvers.column.resolve_column_name(def, member);
                let is_key = key_members.iter().any(|v| v.name == member.name);
                ColumnDescriptor {
                    member: member.name,
                    identifier: writer.quote_identifier(&name),
                    name,
                    generation: match (member.generated, is_key) {
                        (Some(v), _) => v,
                        (None, true) => GenerationStrategy::Identity,
                        (None, false) => GenerationStrategy::None,
                    },
                    is_key,
                    nullable: member.nullable,
                    is_bool: member.boolean,
                }
            })
            .collect();
        let keys = key_members
            .iter()
            .filter_map(|member| {
                let column = columns.iter().find(|v| v.member == member.name)?;
                Some(KeyColumnDescriptor::new(column.clone(), Some(column.generation)))
            })
            .collect();
        let foreign_keys = def
            .members
            .iter()
            .filter_map(|member| {
                Some(ForeignKeyDeclaration {
                    member: member.name,
                    target: member.foreign_key?,
                })
            })
            .collect();
        log::trace!(
            "Resolved entity {} as table {} for {}",
            def.name,
            table_identifier,
            writer.dialect_name(),
        );
        Ok(EntityDescriptor {
            entity: def.name,
            table,
            table_identifier,
            columns,
            keys,
            foreign_keys,
        })
    }

    /// Relation joining `target` to the root `source`.
    pub fn resolve_relation(
        &self,
        source: EntityType,
        target: EntityType,
        writer: &dyn SqlWriter,
    ) -> Result<Arc<ForeignKeyRelation>> {
        let key = (source, target, writer.dialect_id());
        get_or_insert_with(&self.relations, &key, || {
            self.describe_relation(source, target, writer).map(Arc::new)
        })
        .map(|(v, _)| v)
    }

    fn describe_relation(
        &self,
        source: EntityType,
        target: EntityType,
        writer: &dyn SqlWriter,
    ) -> Result<ForeignKeyRelation> {
        let (member, kind) = self
            .resolvers
            .foreign_key
            .resolve_foreign_key(source.def(), target.def())?;
        let source_descriptor = self.resolve(source, writer)?;
        let target_descriptor = self.resolve(target, writer)?;
        let (holder, referenced) = match kind {
            RelationKind::OneToOne => (&source_descriptor, &target_descriptor),
            RelationKind::OneToMany => (&target_descriptor, &source_descriptor),
        };
        let error = || QueryError::ForeignKeyResolution {
            entity: source.name(),
            related: target.name(),
        };
        let foreign_key = holder.column(member.name).ok_or_else(error)?;
        let [referenced_key] = referenced.keys.as_slice() else {
            return Err(error().into());
        };
        let qualified = |entity: &EntityDescriptor, column: &ColumnDescriptor| {
            format!("{}.{}", entity.table_identifier, column.identifier)
        };
        log::trace!(
            "Resolved relation {} -> {} through {}.{} ({:?})",
            source.name(),
            target.name(),
            holder.entity,
            member.name,
            kind,
        );
        Ok(ForeignKeyRelation {
            source: source.name(),
            target: target.name(),
            kind,
            joined_table: target_descriptor.table_identifier.clone(),
            foreign_key: qualified(holder, foreign_key),
            referenced_key: qualified(referenced, referenced_key),
            nullable: foreign_key.nullable,
        })
    }

    /// Drop every memoized descriptor and relation.
    pub fn clear(&self) {
        self.entities
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.relations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
